use serde::{Deserialize, Serialize};

use super::category::TaxCategory;
use crate::values::{Address, Amount, Percent, percent_of};

/// Highest accepted rate for a single bucket and category.
/// Two buckets together can therefore take up to 40%.
pub const MAX_TAX_RATE: Percent = 20;

/// Per-category rates of one bucket
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRates {
    pub on_buy: Percent,
    pub on_sell: Percent,
    pub on_transfer: Percent,
}

impl TaxRates {
    pub fn new(on_buy: Percent, on_sell: Percent, on_transfer: Percent) -> Self {
        Self {
            on_buy,
            on_sell,
            on_transfer,
        }
    }

    /// Rate applied to a transfer of the given category
    pub fn rate_for(&self, category: TaxCategory) -> Percent {
        match category {
            TaxCategory::Buy => self.on_buy,
            TaxCategory::Sell => self.on_sell,
            TaxCategory::Transfer => self.on_transfer,
        }
    }

    /// Check every component against `MAX_TAX_RATE`.
    ///
    /// Components are checked in buy, sell, transfer order; the first
    /// offending category and its rate are returned.
    pub fn validate(&self) -> Result<(), (TaxCategory, Percent)> {
        [
            (TaxCategory::Buy, self.on_buy),
            (TaxCategory::Sell, self.on_sell),
            (TaxCategory::Transfer, self.on_transfer),
        ]
        .into_iter()
        .find(|(_, rate)| *rate > MAX_TAX_RATE)
        .map_or(Ok(()), Err)
    }

    /// `floor(amount * rate / 100)` for the category
    pub fn fee_for(&self, category: TaxCategory, amount: Amount) -> Amount {
        percent_of(amount, self.rate_for(category))
    }
}

/// Public view of a bucket: its rates and who receives the proceeds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxSettings {
    pub on_buy: Percent,
    pub on_sell: Percent,
    pub on_transfer: Percent,
    pub recipient: Address,
}

impl TaxSettings {
    pub fn new(rates: TaxRates, recipient: Address) -> Self {
        Self {
            on_buy: rates.on_buy,
            on_sell: rates.on_sell,
            on_transfer: rates.on_transfer,
            recipient,
        }
    }

    pub fn rates(&self) -> TaxRates {
        TaxRates::new(self.on_buy, self.on_sell, self.on_transfer)
    }
}

/// Which of the two fee accumulators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeBucketKind {
    AutoLiquidity,
    Marketing,
}

impl FeeBucketKind {
    pub const ALL: [FeeBucketKind; 2] = [FeeBucketKind::AutoLiquidity, FeeBucketKind::Marketing];

    pub fn as_str(&self) -> &'static str {
        match self {
            FeeBucketKind::AutoLiquidity => "auto-liquidity",
            FeeBucketKind::Marketing => "marketing",
        }
    }
}

/// Fee accumulator: rates, recipient and the token reserve awaiting conversion.
///
/// The reserve is held as part of the token contract's own balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeBucket {
    pub rates: TaxRates,
    pub recipient: Address,
    pub reserve: Amount,
}

impl FeeBucket {
    pub fn new(rates: TaxRates, recipient: Address) -> Self {
        Self {
            rates,
            recipient,
            reserve: Amount::zero(),
        }
    }

    pub fn settings(&self) -> TaxSettings {
        TaxSettings::new(self.rates, self.recipient)
    }

    pub fn accrue(&mut self, fee: Amount) {
        self.reserve += fee;
    }

    /// Zero the reserve, returning what it held
    pub fn drain(&mut self) -> Amount {
        std::mem::take(&mut self.reserve)
    }
}

/// Outcome of taxing a gross amount: `net + auto_liquidity + marketing == gross`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSplit {
    pub gross: Amount,
    pub net: Amount,
    pub auto_liquidity: Amount,
    pub marketing: Amount,
}

impl FeeSplit {
    /// Nothing withheld
    pub fn untaxed(gross: Amount) -> Self {
        Self {
            gross,
            net: gross,
            auto_liquidity: Amount::zero(),
            marketing: Amount::zero(),
        }
    }

    /// Apply both buckets' rates for the category to `gross`
    pub fn compute(
        gross: Amount,
        category: TaxCategory,
        auto_liquidity: &TaxRates,
        marketing: &TaxRates,
    ) -> Self {
        let lp_fee = auto_liquidity.fee_for(category, gross);
        let marketing_fee = marketing.fee_for(category, gross);
        Self {
            gross,
            // Each fee is at most 20% of gross, so this never underflows
            net: gross - lp_fee - marketing_fee,
            auto_liquidity: lp_fee,
            marketing: marketing_fee,
        }
    }

    pub fn total_fees(&self) -> Amount {
        self.auto_liquidity + self.marketing
    }

    pub fn fee(&self, bucket: FeeBucketKind) -> Amount {
        match bucket {
            FeeBucketKind::AutoLiquidity => self.auto_liquidity,
            FeeBucketKind::Marketing => self.marketing,
        }
    }

    pub fn is_taxed(&self) -> bool {
        !self.total_fees().is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use primitive_types::U256;

    fn tokens(n: u64) -> Amount {
        U256::from(n) * U256::exp10(18)
    }

    #[test]
    fn test_rate_for_category() {
        let rates = TaxRates::new(1, 2, 3);
        assert_eq!(rates.rate_for(TaxCategory::Buy), 1);
        assert_eq!(rates.rate_for(TaxCategory::Sell), 2);
        assert_eq!(rates.rate_for(TaxCategory::Transfer), 3);
    }

    #[test]
    fn test_validate_boundary() {
        assert!(TaxRates::new(20, 20, 20).validate().is_ok());
        assert_eq!(
            TaxRates::new(21, 1, 1).validate(),
            Err((TaxCategory::Buy, 21))
        );
        assert_eq!(
            TaxRates::new(1, 21, 1).validate(),
            Err((TaxCategory::Sell, 21))
        );
        assert_eq!(
            TaxRates::new(1, 1, 21).validate(),
            Err((TaxCategory::Transfer, 21))
        );
    }

    #[test]
    fn test_split_three_percent_each() {
        let rates = TaxRates::new(0, 0, 3);
        let split = FeeSplit::compute(tokens(1000), TaxCategory::Transfer, &rates, &rates);

        assert_eq!(split.auto_liquidity, tokens(30));
        assert_eq!(split.marketing, tokens(30));
        assert_eq!(split.net, tokens(940));
        assert_eq!(split.net + split.total_fees(), split.gross);
    }

    #[test]
    fn test_split_conserves_odd_amounts() {
        let lp = TaxRates::new(7, 13, 19);
        let mkt = TaxRates::new(20, 20, 20);
        for raw in [1u64, 7, 99, 101, 12_345, 999_999_999] {
            for category in [TaxCategory::Buy, TaxCategory::Sell, TaxCategory::Transfer] {
                let split = FeeSplit::compute(U256::from(raw), category, &lp, &mkt);
                assert_eq!(split.net + split.total_fees(), U256::from(raw));
            }
        }
    }

    #[test]
    fn test_untaxed_split() {
        let split = FeeSplit::untaxed(tokens(5));
        assert_eq!(split.net, tokens(5));
        assert!(!split.is_taxed());
    }

    #[test]
    fn test_bucket_drain() {
        let mut bucket = FeeBucket::new(TaxRates::new(1, 2, 3), Address::repeat_byte(0xaa));
        bucket.accrue(tokens(2));
        bucket.accrue(tokens(3));
        assert_eq!(bucket.reserve, tokens(5));

        assert_eq!(bucket.drain(), tokens(5));
        assert!(bucket.reserve.is_zero());
        assert_eq!(bucket.drain(), Amount::zero());
    }
}
