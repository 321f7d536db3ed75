//! Property-Based Tests — Domain Layer Invariants
//!
//! Uses `proptest` to verify the ether amount codec, dataset id
//! parsing and form field names across random inputs.

use alloy::primitives::U256;
use proptest::prelude::*;

use dataset_marketplace_client::domain::amount::{format_ether, parse_ether, WEI_PER_ETHER};
use dataset_marketplace_client::domain::dataset::parse_dataset_id;
use dataset_marketplace_client::domain::form::FormField;

/// Canonical decimal ether string: no leading zeros, at least one
/// fractional digit, no trailing fractional zeros beyond the first.
fn canonical_ether() -> impl Strategy<Value = String> {
    (0u64..1_000_000_000, "[0-9]{0,17}[1-9]").prop_map(|(whole, frac)| format!("{whole}.{frac}"))
}

// ── Amount Codec Properties ─────────────────────────────────

proptest! {
    /// Formatting a parsed canonical string gives the string back.
    #[test]
    fn canonical_strings_survive_parse_and_format(text in canonical_ether()) {
        let wei = parse_ether(&text).unwrap();
        prop_assert_eq!(format_ether(wei), text);
    }

    /// Whole ether amounts render with a single trailing zero.
    #[test]
    fn whole_amounts_format_with_dot_zero(whole in 0u64..u64::MAX) {
        let wei = U256::from(whole) * WEI_PER_ETHER;
        prop_assert_eq!(format_ether(wei), format!("{whole}.0"));
    }

    /// Parsing the formatted form of any wei amount is lossless.
    #[test]
    fn wei_amounts_survive_format_and_parse(limbs in any::<[u64; 3]>()) {
        let wei = U256::from_limbs([limbs[0], limbs[1], limbs[2], 0]);
        prop_assert_eq!(parse_ether(&format_ether(wei)).unwrap(), wei);
    }

    /// Trailing fractional zeros never change the parsed value.
    #[test]
    fn trailing_zeros_are_insignificant(text in canonical_ether(), zeros in 0usize..30) {
        let padded = format!("{text}{}", "0".repeat(zeros));
        prop_assert_eq!(parse_ether(&padded).unwrap(), parse_ether(&text).unwrap());
    }

    /// Anything with a letter in it is rejected.
    #[test]
    fn letters_are_rejected(prefix in "[0-9]{0,5}", letter in "[a-zA-Z]", suffix in "[0-9]{0,5}") {
        let text = format!("{prefix}{letter}{suffix}");
        prop_assert!(parse_ether(&text).is_err());
    }
}

// ── Dataset Id Properties ───────────────────────────────────

proptest! {
    /// Decimal and hex spellings of an id parse to the same value.
    #[test]
    fn decimal_and_hex_ids_agree(id in any::<u64>()) {
        let decimal = parse_dataset_id(&id.to_string()).unwrap();
        let hex = parse_dataset_id(&format!("{id:#x}")).unwrap();
        prop_assert_eq!(decimal, U256::from(id));
        prop_assert_eq!(hex, decimal);
    }
}

// ── Form Field Names ────────────────────────────────────────

proptest! {
    /// Field names parse back regardless of case.
    #[test]
    fn field_names_are_case_insensitive(index in 0usize..FormField::ALL.len(), upper in any::<bool>()) {
        let field = FormField::ALL[index];
        let name = field.to_string();
        let name = if upper { name.to_uppercase() } else { name };
        prop_assert_eq!(name.parse::<FormField>().unwrap(), field);
    }
}
