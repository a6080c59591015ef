use lgen_core::{
    Address, Amount, ExemptStatus, FeeBucketKind, SwapGuard, TaxRates, TaxSettings, TokenEvent,
    UNLIMITED_ALLOWANCE,
};
use lgen_ports::{AmmResult, AmmRouter, TokenLedger};
use log::{info, warn};

use super::state::{SwapSettings, TokenMetadata, TokenState};
use crate::config::{SupplyPolicy, TokenConfig};
use crate::domain::{ExemptionStore, Ledger, MinterRoles, Ownable, PairRegistry, TaxEngine};
use crate::error::{Result, TokenError};

/// Taxed fungible token that converts its fee reserves through an AMM.
///
/// Every mutator takes the calling account first and is all-or-nothing:
/// on error the token state and the venue are restored to what they were
/// before the call, notifications included.
#[derive(Debug, Clone)]
pub struct LiquidityGenerator<R: AmmRouter + Clone> {
    pub(super) state: TokenState,
    pub(super) router: R,
}

impl<R: AmmRouter + Clone> LiquidityGenerator<R> {
    /// Deploy the token: create its pair on the venue and credit the
    /// initial supply to `deployer`, who becomes owner and minter.
    pub fn deploy(deployer: Address, config: TokenConfig, mut router: R) -> Result<Self> {
        config.validate()?;
        if deployer.is_zero() {
            return Err(TokenError::ZeroAddress);
        }

        let weth = router.weth();
        let default_pair_token = config.default_pair_token.unwrap_or(weth);
        if default_pair_token != weth {
            return Err(TokenError::UnsupportedPairToken);
        }

        let lp_pair = match router.get_pair(config.address, weth) {
            Some(pair) => pair,
            None => router.create_pair(config.address, weth)?,
        };

        let tax = TaxEngine::new(
            (config.auto_liquidity.rates(), config.auto_liquidity.recipient),
            (config.marketing.rates(), config.marketing.recipient),
        )?;

        let meta = TokenMetadata {
            name: config.name.clone(),
            symbol: config.symbol.clone(),
            decimals: config.decimals,
            address: config.address,
            supply_policy: config.supply_policy,
            router: router.address(),
            factory: router.factory(),
            default_pair_token,
            lp_pair,
        };
        let mut state = TokenState {
            meta,
            ledger: Ledger::new(),
            pairs: PairRegistry::new(),
            exemptions: ExemptionStore::new(),
            tax,
            ownable: Ownable::new(deployer),
            minters: MinterRoles::new(),
            settings: SwapSettings {
                swap_threshold: config.swap_threshold_or_default(),
                tax_enabled: config.tax_enabled,
                swap_enabled: config.swap_enabled,
            },
            guard: SwapGuard::default(),
            events: Vec::new(),
        };

        state.pairs.set(lp_pair, true);
        state.ledger.mint(&deployer, config.initial_supply)?;
        state.emit(TokenEvent::transfer(
            Address::zero(),
            deployer,
            config.initial_supply,
        ));

        state.minters.grant(deployer);
        state.exemptions.set_from(deployer, true);
        state.exemptions.set(config.address, ExemptStatus::full());
        state
            .ledger
            .approve(config.address, router.address(), UNLIMITED_ALLOWANCE);
        state.emit(TokenEvent::OwnershipTransferred {
            previous_owner: Address::zero(),
            new_owner: deployer,
        });

        info!(
            "Token deployed: symbol={}, address={:?}, pair={:?}, supply={}, owner={:?}",
            config.symbol, config.address, lp_pair, config.initial_supply, deployer
        );
        Ok(Self { state, router })
    }

    /// Run `op` as one unit of work; roll back token and venue on error
    pub(super) fn atomic<T>(&mut self, op: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        let state = self.state.clone();
        let router = self.router.clone();
        match op(self) {
            Ok(value) => Ok(value),
            Err(err) => {
                warn!("Call reverted: {}", err);
                self.state = state;
                self.router = router;
                Err(err)
            }
        }
    }

    // ---- Read surface ----

    pub fn name(&self) -> &str {
        &self.state.meta.name
    }

    pub fn symbol(&self) -> &str {
        &self.state.meta.symbol
    }

    pub fn decimals(&self) -> u8 {
        self.state.meta.decimals
    }

    /// Ledger identity of the token contract
    pub fn address(&self) -> Address {
        self.state.meta.address
    }

    pub fn total_supply(&self) -> Amount {
        self.state.ledger.total_supply()
    }

    pub fn balance_of(&self, account: Address) -> Amount {
        self.state.ledger.balance_of(&account)
    }

    pub fn allowance(&self, owner: Address, spender: Address) -> Amount {
        self.state.ledger.allowance(&owner, &spender)
    }

    /// Sum over every balance; always equals `total_supply`
    pub fn sum_of_balances(&self) -> Amount {
        self.state.ledger.sum_of_balances()
    }

    pub fn auto_liquidity_tax(&self) -> TaxSettings {
        self.state.tax.settings(FeeBucketKind::AutoLiquidity)
    }

    pub fn marketing_tax(&self) -> TaxSettings {
        self.state.tax.settings(FeeBucketKind::Marketing)
    }

    pub fn is_excluded_from_tax(&self, account: Address) -> ExemptStatus {
        self.state.exemptions.get(&account)
    }

    pub fn is_lp_pair(&self, account: Address) -> bool {
        self.state.pairs.contains(&account)
    }

    pub fn swap_threshold(&self) -> Amount {
        self.state.settings.swap_threshold
    }

    pub fn tax_enabled(&self) -> bool {
        self.state.settings.tax_enabled
    }

    pub fn swap_enabled(&self) -> bool {
        self.state.settings.swap_enabled
    }

    pub fn auto_lp_reserves(&self) -> Amount {
        self.state.tax.reserve(FeeBucketKind::AutoLiquidity)
    }

    pub fn marketing_reserves(&self) -> Amount {
        self.state.tax.reserve(FeeBucketKind::Marketing)
    }

    pub fn owner(&self) -> Address {
        self.state.ownable.owner()
    }

    pub fn is_minter(&self, account: Address) -> bool {
        self.state.is_minter(&account)
    }

    pub fn router(&self) -> Address {
        self.state.meta.router
    }

    pub fn factory(&self) -> Address {
        self.state.meta.factory
    }

    pub fn default_pair_token(&self) -> Address {
        self.state.meta.default_pair_token
    }

    /// Whether the default pair token is the venue's wrapped native token
    pub fn is_weth(&self) -> bool {
        self.state.meta.default_pair_token == self.router.weth()
    }

    /// Pair created at deployment
    pub fn lp_pair(&self) -> Address {
        self.state.meta.lp_pair
    }

    pub fn supply_policy(&self) -> SupplyPolicy {
        self.state.meta.supply_policy
    }

    pub fn is_swapping(&self) -> bool {
        self.state.guard.is_swapping()
    }

    /// Notifications emitted so far, oldest first
    pub fn events(&self) -> &[TokenEvent] {
        &self.state.events
    }

    /// The venue this token converts its reserves through
    pub fn amm(&self) -> &R {
        &self.router
    }

    // ---- ERC20 ----

    pub fn transfer(&mut self, caller: Address, to: Address, amount: Amount) -> Result<()> {
        self.atomic(|token| {
            let outcome = token.state.execute_transfer(caller, to, amount)?;
            token.after_transfer(&outcome)
        })
    }

    pub fn transfer_from(
        &mut self,
        caller: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<()> {
        self.atomic(|token| {
            let outcome = token
                .state
                .execute_transfer_from(caller, from, to, amount)?;
            token.after_transfer(&outcome)
        })
    }

    pub fn approve(&mut self, caller: Address, spender: Address, amount: Amount) -> Result<()> {
        if spender.is_zero() {
            return Err(TokenError::ZeroAddress);
        }
        self.state.ledger.approve(caller, spender, amount);
        self.state
            .emit(TokenEvent::approval(caller, spender, amount));
        Ok(())
    }

    pub fn mint(&mut self, caller: Address, to: Address, amount: Amount) -> Result<()> {
        if !self.state.is_minter(&caller) {
            return Err(TokenError::NotMinter);
        }
        if self.state.meta.supply_policy == SupplyPolicy::Fixed {
            return Err(TokenError::MintingDisabled);
        }
        if to.is_zero() {
            return Err(TokenError::InvalidRecipient);
        }
        self.atomic(|token| {
            token.state.ledger.mint(&to, amount)?;
            token
                .state
                .emit(TokenEvent::transfer(Address::zero(), to, amount));
            info!("Minted: to={:?}, amount={}, by={:?}", to, amount, caller);
            Ok(())
        })
    }

    /// Destroy `amount` of the caller's own balance
    pub fn burn(&mut self, caller: Address, amount: Amount) -> Result<()> {
        self.state.ledger.burn(&caller, amount)?;
        self.state
            .emit(TokenEvent::transfer(caller, Address::zero(), amount));
        Ok(())
    }

    // ---- Owner-gated configuration ----

    pub fn set_auto_liquidity_tax(&mut self, caller: Address, rates: TaxRates) -> Result<()> {
        self.set_rates(caller, FeeBucketKind::AutoLiquidity, rates)
    }

    pub fn set_marketing_tax(&mut self, caller: Address, rates: TaxRates) -> Result<()> {
        self.set_rates(caller, FeeBucketKind::Marketing, rates)
    }

    fn set_rates(&mut self, caller: Address, kind: FeeBucketKind, rates: TaxRates) -> Result<()> {
        self.state.ownable.only_owner(&caller)?;
        self.state.tax.set_rates(kind, rates)?;
        info!(
            "Tax rates updated: bucket={}, buy={}%, sell={}%, transfer={}%",
            kind.as_str(),
            rates.on_buy,
            rates.on_sell,
            rates.on_transfer
        );
        Ok(())
    }

    pub fn set_auto_lp_receiver(&mut self, caller: Address, receiver: Address) -> Result<()> {
        self.set_receiver(caller, FeeBucketKind::AutoLiquidity, receiver)
    }

    pub fn set_marketing_receiver(&mut self, caller: Address, receiver: Address) -> Result<()> {
        self.set_receiver(caller, FeeBucketKind::Marketing, receiver)
    }

    fn set_receiver(
        &mut self,
        caller: Address,
        kind: FeeBucketKind,
        receiver: Address,
    ) -> Result<()> {
        self.state.ownable.only_owner(&caller)?;
        self.state.tax.set_recipient(kind, receiver)?;
        info!(
            "Receiver updated: bucket={}, receiver={:?}",
            kind.as_str(),
            receiver
        );
        Ok(())
    }

    pub fn add_pair(&mut self, caller: Address, pair: Address) -> Result<()> {
        self.state.ownable.only_owner(&caller)?;
        self.state.pairs.set(pair, true);
        info!("Pair added: {:?}", pair);
        Ok(())
    }

    pub fn remove_pair(&mut self, caller: Address, pair: Address) -> Result<()> {
        self.state.ownable.only_owner(&caller)?;
        self.state.pairs.set(pair, false);
        info!("Pair removed: {:?}", pair);
        Ok(())
    }

    pub fn set_swap_threshold(&mut self, caller: Address, threshold: Amount) -> Result<()> {
        self.state.ownable.only_owner(&caller)?;
        self.state.settings.swap_threshold = threshold;
        info!("Swap threshold set to {}", threshold);
        Ok(())
    }

    pub fn set_tax_enabled(&mut self, caller: Address, enabled: bool) -> Result<()> {
        self.state.ownable.only_owner(&caller)?;
        self.state.settings.tax_enabled = enabled;
        info!("Tax enabled: {}", enabled);
        Ok(())
    }

    pub fn set_swap_enabled(&mut self, caller: Address, enabled: bool) -> Result<()> {
        self.state.ownable.only_owner(&caller)?;
        self.state.settings.swap_enabled = enabled;
        info!("Swap enabled: {}", enabled);
        Ok(())
    }

    /// The token's own address cannot be changed; it holds the reserves
    pub fn set_tax_exempt(
        &mut self,
        caller: Address,
        account: Address,
        exempt_from: bool,
        exempt_to: bool,
    ) -> Result<()> {
        self.state.ownable.only_owner(&caller)?;
        if account == self.state.meta.address {
            return Err(TokenError::ProtectedAddress);
        }
        self.state
            .exemptions
            .set(account, ExemptStatus::new(exempt_from, exempt_to));
        info!(
            "Tax exemption set: account={:?}, from={}, to={}",
            account, exempt_from, exempt_to
        );
        Ok(())
    }

    /// Convert the whole auto-liquidity reserve now, ignoring the threshold
    pub fn swap_and_liquify(&mut self, caller: Address) -> Result<()> {
        self.state.ownable.only_owner(&caller)?;
        self.atomic(|token| token.run_swap(FeeBucketKind::AutoLiquidity))
    }

    /// Sell the whole marketing reserve now, ignoring the threshold
    pub fn swap_marketing(&mut self, caller: Address) -> Result<()> {
        self.state.ownable.only_owner(&caller)?;
        self.atomic(|token| token.run_swap(FeeBucketKind::Marketing))
    }

    // ---- Ownership and minters ----

    /// Moves the sender exemption and minter role along with ownership
    pub fn transfer_ownership(&mut self, caller: Address, new_owner: Address) -> Result<()> {
        self.state.ownable.only_owner(&caller)?;
        let previous_owner = self.state.ownable.transfer(new_owner)?;

        let state = &mut self.state;
        state.exemptions.set_from(previous_owner, false);
        state.minters.revoke(&previous_owner);
        state.exemptions.set_from(new_owner, true);
        state.minters.grant(new_owner);
        state.emit(TokenEvent::OwnershipTransferred {
            previous_owner,
            new_owner,
        });

        info!(
            "Ownership transferred: {:?} -> {:?}",
            previous_owner, new_owner
        );
        Ok(())
    }

    pub fn add_minter(&mut self, caller: Address, account: Address) -> Result<()> {
        self.state.ownable.only_owner(&caller)?;
        if account.is_zero() {
            return Err(TokenError::ZeroAddress);
        }
        self.state.minters.grant(account);
        info!("Minter added: {:?}", account);
        Ok(())
    }

    pub fn remove_minter(&mut self, caller: Address, account: Address) -> Result<()> {
        self.state.ownable.only_owner(&caller)?;
        self.state.minters.revoke(&account);
        info!("Minter removed: {:?}", account);
        Ok(())
    }

    // ---- Venue access ----

    /// Run a user call against the venue with this token as its ledger.
    ///
    /// Token movements made by the venue are classified and taxed like any
    /// other transfer but do not fire the trigger. The call is atomic.
    /// The venue trusts the `sender` it is given, as it would a signed
    /// transaction.
    pub fn with_amm<T>(
        &mut self,
        op: impl FnOnce(&mut R, &mut dyn TokenLedger) -> AmmResult<T>,
    ) -> Result<T> {
        self.atomic(|token| {
            let Self { state, router } = token;
            Ok(op(router, state)?)
        })
    }
}
