//! Dataset record types.
//!
//! A `Dataset` is owned and mutated only by the marketplace contract.
//! The client reads it for a single display (or a single purchase) and
//! never caches it.

use std::fmt;

use alloy::primitives::{Address, U256};
use serde::Serialize;
use thiserror::Error;

use super::amount::format_ether;

/// On-chain dataset record as returned by `getDataset(id)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    /// Contract-assigned dataset id.
    pub id: U256,
    /// Content address of the dataset payload (IPFS CID).
    pub ipfs_hash: String,
    /// Current owner account.
    pub owner: Address,
    /// Sale price in wei.
    pub price: U256,
    /// Whether the dataset can currently be bought.
    pub is_for_sale: bool,
}

/// Reasons a dataset id field can be rejected before submission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DatasetIdError {
    #[error("dataset id is empty")]
    Empty,
    #[error("dataset id {0:?} is not a non-negative integer")]
    Invalid(String),
}

/// Parse a dataset id typed by the user.
///
/// Decimal is the normal form; `0x`-prefixed hex is also accepted.
pub fn parse_dataset_id(input: &str) -> Result<U256, DatasetIdError> {
    let s = input.trim();
    if s.is_empty() {
        return Err(DatasetIdError::Empty);
    }

    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) if !hex.is_empty() => U256::from_str_radix(hex, 16),
        Some(_) => return Err(DatasetIdError::Invalid(s.to_string())),
        None => U256::from_str_radix(s, 10),
    };

    parsed.map_err(|_| DatasetIdError::Invalid(s.to_string()))
}

/// Display-ready projection of a [`Dataset`].
///
/// Serialized as-is when the front-end runs in JSON output mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetView {
    pub id: String,
    pub ipfs_hash: String,
    pub owner: String,
    /// Human decimal price with currency suffix, e.g. `"1.5 ETH"`.
    pub price: String,
    pub for_sale: bool,
}

impl DatasetView {
    /// Build the view, formatting the wei price with `currency_symbol`.
    pub fn new(dataset: &Dataset, currency_symbol: &str) -> Self {
        Self {
            id: dataset.id.to_string(),
            ipfs_hash: dataset.ipfs_hash.clone(),
            owner: dataset.owner.to_checksum(None),
            price: format!("{} {currency_symbol}", format_ether(dataset.price)),
            for_sale: dataset.is_for_sale,
        }
    }
}

impl fmt::Display for DatasetView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Dataset Info:")?;
        writeln!(f, "  ID: {}", self.id)?;
        writeln!(f, "  IPFS Hash: {}", self.ipfs_hash)?;
        writeln!(f, "  Owner: {}", self.owner)?;
        writeln!(f, "  Price: {}", self.price)?;
        write!(f, "  For Sale: {}", self.for_sale)
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::address;

    use super::*;
    use crate::domain::amount::WEI_PER_ETHER;

    #[test]
    fn test_parse_dataset_id() {
        assert_eq!(parse_dataset_id("42").unwrap(), U256::from(42));
        assert_eq!(parse_dataset_id(" 7 ").unwrap(), U256::from(7));
        assert_eq!(parse_dataset_id("0x10").unwrap(), U256::from(16));
        assert_eq!(parse_dataset_id(""), Err(DatasetIdError::Empty));
        assert!(matches!(
            parse_dataset_id("abc"),
            Err(DatasetIdError::Invalid(_))
        ));
        assert!(matches!(
            parse_dataset_id("-1"),
            Err(DatasetIdError::Invalid(_))
        ));
        assert!(matches!(
            parse_dataset_id("0x"),
            Err(DatasetIdError::Invalid(_))
        ));
    }

    #[test]
    fn test_view_formats_price_and_owner() {
        let dataset = Dataset {
            id: U256::from(3),
            ipfs_hash: "QmTestHash".to_string(),
            owner: address!("f39fd6e51aad88f6f4ce6ab8827279cfffb92266"),
            price: WEI_PER_ETHER * U256::from(5) / U256::from(4),
            is_for_sale: true,
        };

        let view = DatasetView::new(&dataset, "ETH");
        assert_eq!(view.id, "3");
        assert_eq!(view.price, "1.25 ETH");
        assert_eq!(view.owner, "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");

        let text = view.to_string();
        assert!(text.starts_with("Dataset Info:"));
        assert!(text.contains("IPFS Hash: QmTestHash"));
        assert!(text.ends_with("For Sale: true"));
    }
}
