//! Serde helpers for `Amount` fields.
//!
//! Amounts are written as decimal strings. On input a decimal string
//! (underscores allowed as digit separators), a `0x` hex string or a plain
//! JSON integer is accepted.

use lgen_core::Amount;
use primitive_types::U256;
use serde::{Deserialize, Deserializer, Serializer, de};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Text(String),
    Number(u64),
}

impl RawAmount {
    fn into_amount(self) -> Result<Amount, String> {
        match self {
            RawAmount::Text(text) => parse_amount(&text),
            RawAmount::Number(n) => Ok(U256::from(n)),
        }
    }
}

/// Parse `"1_000_000"`, `"1000000"` or `"0xf4240"`
pub fn parse_amount(raw: &str) -> Result<Amount, String> {
    let trimmed = raw.trim();
    if let Some(hex) = trimmed.strip_prefix("0x") {
        return U256::from_str_radix(hex, 16)
            .map_err(|e| format!("invalid hex amount {raw:?}: {e:?}"));
    }
    let digits: String = trimmed.chars().filter(|c| *c != '_').collect();
    if digits.is_empty() {
        return Err(format!("invalid amount {raw:?}: empty"));
    }
    U256::from_dec_str(&digits).map_err(|e| format!("invalid amount {raw:?}: {e:?}"))
}

pub fn serialize<S: Serializer>(value: &Amount, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Amount, D::Error> {
    RawAmount::deserialize(deserializer)?
        .into_amount()
        .map_err(de::Error::custom)
}

pub mod option {
    use super::*;

    pub fn serialize<S: Serializer>(
        value: &Option<Amount>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(amount) => serializer.collect_str(amount),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Amount>, D::Error> {
        Option::<RawAmount>::deserialize(deserializer)?
            .map(RawAmount::into_amount)
            .transpose()
            .map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_forms() {
        assert_eq!(parse_amount("1000").unwrap(), U256::from(1000u64));
        assert_eq!(parse_amount("1_000").unwrap(), U256::from(1000u64));
        assert_eq!(parse_amount("0x3e8").unwrap(), U256::from(1000u64));
        assert_eq!(
            parse_amount("1000000000000000000000000").unwrap(),
            U256::from(1_000_000u64) * U256::exp10(18)
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_amount("").is_err());
        assert!(parse_amount("12a").is_err());
        assert!(parse_amount("-5").is_err());
    }
}
