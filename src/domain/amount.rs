//! Ether Amount Codec — Decimal Strings ⇄ Wei
//!
//! The marketplace contract prices datasets in wei (18 decimals).
//! Users type human decimal strings ("1.5"); these functions convert
//! between the two representations.
//!
//! Formatting is canonical: trailing fractional zeros are trimmed and
//! at least one fractional digit is kept (`1 ether` → `"1.0"`), so
//! `format_ether(parse_ether(x)) == x` for every canonical `x`.

use alloy::primitives::U256;
use thiserror::Error;

/// Number of fractional digits in one ether.
pub const ETHER_DECIMALS: usize = 18;

/// Wei per ether (10^18).
pub const WEI_PER_ETHER: U256 = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);

/// Reasons a decimal amount string can be rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    /// Nothing (or only whitespace) was entered.
    #[error("amount is empty")]
    Empty,
    /// A character other than ASCII digits and a single `.`.
    #[error("invalid character {0:?} in amount")]
    InvalidCharacter(char),
    /// More than one decimal point, or a lone `.`.
    #[error("malformed decimal amount")]
    Malformed,
    /// More than 18 significant fractional digits.
    #[error("too many decimals: {0} (max 18)")]
    TooManyDecimals(usize),
    /// The value does not fit in 256 bits of wei.
    #[error("amount overflows uint256")]
    Overflow,
}

/// Parse a human decimal ether amount into wei.
///
/// Accepts `"1"`, `"1.5"`, `".5"`, `"5."`; surrounding whitespace is
/// ignored. Signs, exponents and thousands separators are rejected.
/// Trailing fractional zeros beyond 18 digits are tolerated.
pub fn parse_ether(input: &str) -> Result<U256, AmountError> {
    let s = input.trim();
    if s.is_empty() {
        return Err(AmountError::Empty);
    }

    if let Some(c) = s.chars().find(|c| !c.is_ascii_digit() && *c != '.') {
        return Err(AmountError::InvalidCharacter(c));
    }

    let (whole, fraction) = match s.split_once('.') {
        Some((w, f)) => {
            if f.contains('.') || (w.is_empty() && f.is_empty()) {
                return Err(AmountError::Malformed);
            }
            (w, f.trim_end_matches('0'))
        }
        None => (s, ""),
    };

    if fraction.len() > ETHER_DECIMALS {
        return Err(AmountError::TooManyDecimals(fraction.len()));
    }

    let whole_wei = if whole.is_empty() {
        U256::ZERO
    } else {
        U256::from_str_radix(whole, 10)
            .map_err(|_| AmountError::Overflow)?
            .checked_mul(WEI_PER_ETHER)
            .ok_or(AmountError::Overflow)?
    };

    let fraction_wei = if fraction.is_empty() {
        0u64
    } else {
        // At most 18 digits after padding, which always fits in a u64.
        format!("{fraction:0<width$}", width = ETHER_DECIMALS)
            .parse::<u64>()
            .map_err(|_| AmountError::Malformed)?
    };

    whole_wei
        .checked_add(U256::from(fraction_wei))
        .ok_or(AmountError::Overflow)
}

/// Format a wei amount as a canonical decimal ether string.
pub fn format_ether(wei: U256) -> String {
    let whole = wei / WEI_PER_ETHER;
    let fraction = (wei % WEI_PER_ETHER).to::<u64>();

    let digits = format!("{fraction:0>width$}", width = ETHER_DECIMALS);
    let trimmed = digits.trim_end_matches('0');
    let fraction_str = if trimmed.is_empty() { "0" } else { trimmed };

    format!("{whole}.{fraction_str}")
}
