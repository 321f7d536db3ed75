//! Transient form fields backing the five marketplace actions.
//!
//! Fields are raw strings; they are only validated (non-empty,
//! numeric-parseable) when an action is submitted. `dataset_id` is
//! shared by buy / update / list / get, and `price` by upload and
//! list-for-sale, the same way the forms share them on screen.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Current contents of every input field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub ipfs_hash: String,
    pub price: String,
    pub dataset_id: String,
    pub new_price: String,
}

/// Addressable form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    IpfsHash,
    Price,
    DatasetId,
    NewPrice,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown form field {0:?} (expected ipfs-hash, price, dataset-id or new-price)")]
pub struct UnknownField(pub String);

impl FormState {
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        *self.field_mut(field) = value.into();
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::IpfsHash => &self.ipfs_hash,
            FormField::Price => &self.price,
            FormField::DatasetId => &self.dataset_id,
            FormField::NewPrice => &self.new_price,
        }
    }

    /// Overwrite `field` only when a value was supplied.
    pub fn apply(&mut self, field: FormField, value: Option<&str>) {
        if let Some(v) = value {
            self.set(field, v);
        }
    }

    fn field_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::IpfsHash => &mut self.ipfs_hash,
            FormField::Price => &mut self.price,
            FormField::DatasetId => &mut self.dataset_id,
            FormField::NewPrice => &mut self.new_price,
        }
    }
}

impl FormField {
    pub const ALL: [Self; 4] = [Self::IpfsHash, Self::Price, Self::DatasetId, Self::NewPrice];

    /// Placeholder text of the matching input.
    pub const fn placeholder(self) -> &'static str {
        match self {
            Self::IpfsHash => "IPFS Hash",
            Self::Price => "Price (ETH)",
            Self::DatasetId => "Dataset ID",
            Self::NewPrice => "New Price (ETH)",
        }
    }
}

impl FromStr for FormField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "ipfs-hash" | "ipfshash" | "hash" => Ok(Self::IpfsHash),
            "price" => Ok(Self::Price),
            "dataset-id" | "datasetid" | "id" => Ok(Self::DatasetId),
            "new-price" | "newprice" => Ok(Self::NewPrice),
            _ => Err(UnknownField(s.to_string())),
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::IpfsHash => "ipfs-hash",
            Self::Price => "price",
            Self::DatasetId => "dataset-id",
            Self::NewPrice => "new-price",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_keeps_previous_value_when_absent() {
        let mut form = FormState::default();
        form.apply(FormField::DatasetId, Some("5"));
        form.apply(FormField::DatasetId, None);
        assert_eq!(form.get(FormField::DatasetId), "5");
    }

    #[test]
    fn test_field_names() {
        assert_eq!("ipfs_hash".parse::<FormField>().unwrap(), FormField::IpfsHash);
        assert_eq!("newPrice".parse::<FormField>().unwrap(), FormField::NewPrice);
        assert_eq!("ID".parse::<FormField>().unwrap(), FormField::DatasetId);
        assert!("colour".parse::<FormField>().is_err());

        for field in FormField::ALL {
            assert_eq!(field.to_string().parse::<FormField>().unwrap(), field);
        }
    }
}
