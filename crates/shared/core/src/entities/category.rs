use serde::{Deserialize, Serialize};

/// Transfer category derived from the counterparties
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxCategory {
    /// Tokens leave a registered pair
    Buy,
    /// Tokens enter a registered pair
    Sell,
    /// Wallet to wallet
    Transfer,
}

impl TaxCategory {
    /// Classify a movement given pair membership of each endpoint.
    ///
    /// The sending side wins when both endpoints are pairs.
    pub fn classify(from_is_pair: bool, to_is_pair: bool) -> Self {
        if from_is_pair {
            TaxCategory::Buy
        } else if to_is_pair {
            TaxCategory::Sell
        } else {
            TaxCategory::Transfer
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TaxCategory::Buy => "buy",
            TaxCategory::Sell => "sell",
            TaxCategory::Transfer => "transfer",
        }
    }
}

impl std::fmt::Display for TaxCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(TaxCategory::classify(true, false), TaxCategory::Buy);
        assert_eq!(TaxCategory::classify(false, true), TaxCategory::Sell);
        assert_eq!(TaxCategory::classify(false, false), TaxCategory::Transfer);
    }

    #[test]
    fn test_pair_to_pair_is_buy() {
        assert_eq!(TaxCategory::classify(true, true), TaxCategory::Buy);
    }
}
