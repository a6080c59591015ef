use std::collections::HashSet;

use lgen_core::Address;

use crate::error::{Result, TokenError};

/// Single-owner access control
#[derive(Debug, Clone)]
pub struct Ownable {
    owner: Address,
}

impl Ownable {
    pub fn new(owner: Address) -> Self {
        Self { owner }
    }

    pub fn owner(&self) -> Address {
        self.owner
    }

    pub fn only_owner(&self, caller: &Address) -> Result<()> {
        if *caller != self.owner {
            return Err(TokenError::NotOwner);
        }
        Ok(())
    }

    /// Hand over ownership, returning the previous owner
    pub fn transfer(&mut self, new_owner: Address) -> Result<Address> {
        if new_owner.is_zero() {
            return Err(TokenError::ZeroAddress);
        }
        Ok(std::mem::replace(&mut self.owner, new_owner))
    }
}

#[derive(Debug, Clone, Default)]
pub struct MinterRoles {
    minters: HashSet<Address>,
}

impl MinterRoles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn grant(&mut self, account: Address) {
        self.minters.insert(account);
    }

    pub fn revoke(&mut self, account: &Address) {
        self.minters.remove(account);
    }

    pub fn contains(&self, account: &Address) -> bool {
        self.minters.contains(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_owner() {
        let ownable = Ownable::new(Address::repeat_byte(1));
        assert!(ownable.only_owner(&Address::repeat_byte(1)).is_ok());
        assert_eq!(
            ownable.only_owner(&Address::repeat_byte(2)),
            Err(TokenError::NotOwner)
        );
    }

    #[test]
    fn test_transfer_rejects_zero() {
        let mut ownable = Ownable::new(Address::repeat_byte(1));
        assert_eq!(
            ownable.transfer(Address::zero()),
            Err(TokenError::ZeroAddress)
        );
        assert_eq!(
            ownable.transfer(Address::repeat_byte(2)),
            Ok(Address::repeat_byte(1))
        );
        assert_eq!(ownable.owner(), Address::repeat_byte(2));
    }
}
