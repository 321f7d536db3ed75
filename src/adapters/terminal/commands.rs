//! Terminal command parsing.
//!
//! One command per form on the marketplace page, plus session and
//! wallet controls. Arguments omitted from an action command fall back
//! to the current form field values.

use alloy::primitives::Address;
use thiserror::Error;

use crate::domain::form::{FormField, FormState, UnknownField};
use crate::usecases::action_dispatcher::ActionKind;

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Blank line.
    Empty,
    Connect,
    Upload { ipfs_hash: Option<String>, price: Option<String> },
    Buy { dataset_id: Option<String> },
    UpdatePrice { dataset_id: Option<String>, new_price: Option<String> },
    ListForSale { dataset_id: Option<String>, price: Option<String> },
    Get { dataset_id: Option<String> },
    Count,
    Set { field: FormField, value: String },
    Form,
    Accounts,
    Use(Address),
    Lock,
    Status,
    Metrics,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command {0:?}, type `help`")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error(transparent)]
    Field(#[from] UnknownField),
    #[error("invalid address {0:?} (hex address required, names are not resolved)")]
    Address(String),
}

pub const HELP: &str = "\
Commands:
  connect                         connect the wallet
  upload [ipfs-hash] [price]      upload a dataset
  buy [dataset-id]                buy a dataset at its listed price
  update-price [dataset-id] [new-price]
  list [dataset-id] [price]       list a dataset for sale
  get [dataset-id]                show a dataset
  count                           show the number of datasets
  set <field> <value>             edit a form field (ipfs-hash, price, dataset-id, new-price)
  form                            show the form fields
  accounts                        show wallet accounts
  use <address>                   switch the wallet's selected account
  lock                            lock the wallet
  status                          show the session
  metrics                         show client metrics
  help | quit";

impl Command {
    /// Parse one input line.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Ok(Self::Empty);
        };
        let args: Vec<String> = words.map(str::to_string).collect();

        let arg = |i: usize| args.get(i).cloned();
        let at_most = |n: usize, usage: &'static str| {
            if args.len() > n {
                Err(CommandError::Usage(usage))
            } else {
                Ok(())
            }
        };

        let command = match head.to_ascii_lowercase().as_str() {
            "connect" => Self::Connect,
            "upload" => {
                at_most(2, "upload [ipfs-hash] [price]")?;
                Self::Upload {
                    ipfs_hash: arg(0),
                    price: arg(1),
                }
            }
            "buy" => {
                at_most(1, "buy [dataset-id]")?;
                Self::Buy { dataset_id: arg(0) }
            }
            "update-price" | "update" | "reprice" => {
                at_most(2, "update-price [dataset-id] [new-price]")?;
                Self::UpdatePrice {
                    dataset_id: arg(0),
                    new_price: arg(1),
                }
            }
            "list" | "list-for-sale" => {
                at_most(2, "list [dataset-id] [price]")?;
                Self::ListForSale {
                    dataset_id: arg(0),
                    price: arg(1),
                }
            }
            "get" => {
                at_most(1, "get [dataset-id]")?;
                Self::Get { dataset_id: arg(0) }
            }
            "count" => Self::Count,
            "set" => {
                let (Some(field), Some(value)) = (arg(0), arg(1)) else {
                    return Err(CommandError::Usage("set <field> <value>"));
                };
                at_most(2, "set <field> <value>")?;
                Self::Set {
                    field: field.parse()?,
                    value,
                }
            }
            "form" => Self::Form,
            "accounts" => Self::Accounts,
            "use" => {
                let Some(raw) = arg(0) else {
                    return Err(CommandError::Usage("use <address>"));
                };
                let address = raw.parse().map_err(|_| CommandError::Address(raw))?;
                Self::Use(address)
            }
            "lock" => Self::Lock,
            "status" => Self::Status,
            "metrics" => Self::Metrics,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };

        Ok(command)
    }

    /// Copy supplied arguments into the form and return the action to
    /// submit, if this is an action command.
    pub fn apply_to(&self, form: &mut FormState) -> Option<ActionKind> {
        match self {
            Self::Upload { ipfs_hash, price } => {
                form.apply(FormField::IpfsHash, ipfs_hash.as_deref());
                form.apply(FormField::Price, price.as_deref());
                Some(ActionKind::Upload)
            }
            Self::Buy { dataset_id } => {
                form.apply(FormField::DatasetId, dataset_id.as_deref());
                Some(ActionKind::Buy)
            }
            Self::UpdatePrice {
                dataset_id,
                new_price,
            } => {
                form.apply(FormField::DatasetId, dataset_id.as_deref());
                form.apply(FormField::NewPrice, new_price.as_deref());
                Some(ActionKind::UpdatePrice)
            }
            Self::ListForSale { dataset_id, price } => {
                form.apply(FormField::DatasetId, dataset_id.as_deref());
                form.apply(FormField::Price, price.as_deref());
                Some(ActionKind::ListForSale)
            }
            Self::Get { dataset_id } => {
                form.apply(FormField::DatasetId, dataset_id.as_deref());
                Some(ActionKind::GetDataset)
            }
            Self::Count => Some(ActionKind::DatasetCount),
            _ => None,
        }
    }
}
