use primitive_types::{H160, U256};

/// Account identifier - 20 bytes, the null address is `Address::zero()`
pub type Address = H160;

/// Token amount in base units
pub type Amount = U256;

/// Integer percent rate (0-100)
pub type Percent = u8;

/// Allowance value meaning "unlimited": never decremented by spending
pub const UNLIMITED_ALLOWANCE: Amount = U256::MAX;

/// `floor(amount * rate / 100)` without widening.
///
/// Splits `amount` as `100q + r` so the product never exceeds `Amount::MAX`:
/// `floor((100q + r) * rate / 100) == q * rate + floor(r * rate / 100)`.
pub fn percent_of(amount: Amount, rate: Percent) -> Amount {
    let hundred = U256::from(100u8);
    let rate = U256::from(rate.min(100));
    let (quotient, remainder) = amount.div_mod(hundred);
    quotient * rate + remainder * rate / hundred
}
