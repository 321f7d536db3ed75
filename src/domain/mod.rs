//! Domain layer - Marketplace values and conversions.
//!
//! Pure types with no I/O: wei amount codec, dataset records,
//! session identity and form state. Only `alloy` primitives are used
//! here, for `Address` and `U256`.

pub mod amount;
pub mod dataset;
pub mod form;
pub mod session;

// Re-export core types for convenience
pub use amount::{AmountError, format_ether, parse_ether};
pub use dataset::{Dataset, DatasetIdError, DatasetView, parse_dataset_id};
pub use form::{FormField, FormState};
pub use session::Session;
