use lgen_core::{
    Address, Amount, FeeBucket, FeeBucketKind, FeeSplit, TaxCategory, TaxRates, TaxSettings,
};

use crate::error::{Result, TokenError};

/// The two fee buckets and the rules for changing them
#[derive(Debug, Clone)]
pub struct TaxEngine {
    auto_liquidity: FeeBucket,
    marketing: FeeBucket,
}

impl TaxEngine {
    /// Build both buckets, rejecting any rate above the cap
    pub fn new(
        auto_liquidity: (TaxRates, Address),
        marketing: (TaxRates, Address),
    ) -> Result<Self> {
        check_rates(&auto_liquidity.0)?;
        check_rates(&marketing.0)?;
        Ok(Self {
            auto_liquidity: FeeBucket::new(auto_liquidity.0, auto_liquidity.1),
            marketing: FeeBucket::new(marketing.0, marketing.1),
        })
    }

    pub fn bucket(&self, kind: FeeBucketKind) -> &FeeBucket {
        match kind {
            FeeBucketKind::AutoLiquidity => &self.auto_liquidity,
            FeeBucketKind::Marketing => &self.marketing,
        }
    }

    fn bucket_mut(&mut self, kind: FeeBucketKind) -> &mut FeeBucket {
        match kind {
            FeeBucketKind::AutoLiquidity => &mut self.auto_liquidity,
            FeeBucketKind::Marketing => &mut self.marketing,
        }
    }

    pub fn settings(&self, kind: FeeBucketKind) -> TaxSettings {
        self.bucket(kind).settings()
    }

    pub fn reserve(&self, kind: FeeBucketKind) -> Amount {
        self.bucket(kind).reserve
    }

    pub fn total_reserves(&self) -> Amount {
        self.auto_liquidity.reserve + self.marketing.reserve
    }

    pub fn assess(&self, gross: Amount, category: TaxCategory) -> FeeSplit {
        FeeSplit::compute(
            gross,
            category,
            &self.auto_liquidity.rates,
            &self.marketing.rates,
        )
    }

    pub fn accrue(&mut self, split: &FeeSplit) {
        self.auto_liquidity.accrue(split.auto_liquidity);
        self.marketing.accrue(split.marketing);
    }

    pub fn drain(&mut self, kind: FeeBucketKind) -> Amount {
        self.bucket_mut(kind).drain()
    }

    /// Replace all three rates of a bucket; nothing changes on rejection
    pub fn set_rates(&mut self, kind: FeeBucketKind, rates: TaxRates) -> Result<()> {
        check_rates(&rates)?;
        self.bucket_mut(kind).rates = rates;
        Ok(())
    }

    pub fn set_recipient(&mut self, kind: FeeBucketKind, recipient: Address) -> Result<()> {
        if recipient.is_zero() {
            return Err(TokenError::ZeroAddress);
        }
        self.bucket_mut(kind).recipient = recipient;
        Ok(())
    }
}

fn check_rates(rates: &TaxRates) -> Result<()> {
    rates
        .validate()
        .map_err(|(category, rate)| TokenError::RateTooHigh { category, rate })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> TaxEngine {
        TaxEngine::new(
            (TaxRates::new(1, 2, 3), Address::repeat_byte(0x11)),
            (TaxRates::new(4, 5, 6), Address::repeat_byte(0x22)),
        )
        .unwrap()
    }

    #[test]
    fn test_rejects_rate_above_cap() {
        let mut engine = engine();
        let err = engine
            .set_rates(FeeBucketKind::Marketing, TaxRates::new(0, 21, 0))
            .unwrap_err();
        assert_eq!(
            err,
            TokenError::RateTooHigh {
                category: TaxCategory::Sell,
                rate: 21
            }
        );
        // untouched
        assert_eq!(
            engine.settings(FeeBucketKind::Marketing).rates(),
            TaxRates::new(4, 5, 6)
        );

        engine
            .set_rates(FeeBucketKind::Marketing, TaxRates::new(20, 20, 20))
            .unwrap();
        assert_eq!(engine.settings(FeeBucketKind::Marketing).on_sell, 20);
    }

    #[test]
    fn test_recipient_cannot_be_zero() {
        let mut engine = engine();
        assert_eq!(
            engine.set_recipient(FeeBucketKind::AutoLiquidity, Address::zero()),
            Err(TokenError::ZeroAddress)
        );
    }

    #[test]
    fn test_accrue_then_drain() {
        let mut engine = engine();
        let split = engine.assess(Amount::from(1000u64), TaxCategory::Sell);
        assert_eq!(split.auto_liquidity, Amount::from(20u64));
        assert_eq!(split.marketing, Amount::from(50u64));

        engine.accrue(&split);
        assert_eq!(engine.total_reserves(), Amount::from(70u64));
        assert_eq!(
            engine.drain(FeeBucketKind::AutoLiquidity),
            Amount::from(20u64)
        );
        assert_eq!(engine.reserve(FeeBucketKind::Marketing), Amount::from(50u64));
    }
}
