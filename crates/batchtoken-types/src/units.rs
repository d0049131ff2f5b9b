//! Conversion between human-readable token quantities and base units.
//!
//! `parse_units("1000.5", 18)` yields `1000.5 × 10^18` base units;
//! `format_units` goes the other way. Both work on the integer and
//! fractional digit strings directly, so every [`Amount`] at every
//! precision up to `MAX_DECIMALS` converts exactly.

use crate::{scale_factor, Amount, LedgerError, Result};

/// Parse a human-readable quantity into base units.
///
/// # Errors
/// - `Serialization` if `value` is not a decimal number
/// - `InvalidAmount` if it is negative or has more fractional digits than `decimals`
/// - `Overflow` if the base-unit value does not fit in an [`Amount`]
pub fn parse_units(value: &str, decimals: u8) -> Result<Amount> {
    let trimmed = value.trim();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty()) || !is_digits(whole) || !is_digits(fraction) {
        return Err(LedgerError::Serialization(format!("invalid quantity {value:?}")));
    }

    let whole = whole.trim_start_matches('0');
    let fraction = fraction.trim_end_matches('0');
    if negative {
        // "-0" and "-0.000" are still zero.
        if whole.is_empty() && fraction.is_empty() {
            return Ok(0);
        }
        return Err(LedgerError::InvalidAmount { index: None });
    }
    if fraction.len() > usize::from(decimals) {
        return Err(LedgerError::InvalidAmount { index: None });
    }

    let whole_units = digits_to_amount(whole)?
        .checked_mul(scale_factor(decimals)?)
        .ok_or(LedgerError::Overflow)?;
    // `fraction.len() <= decimals`, so the padding exponent fits in a u8.
    let padding = u8::try_from(usize::from(decimals) - fraction.len())
        .map_err(|_| LedgerError::Overflow)?;
    let fraction_units = digits_to_amount(fraction)?
        .checked_mul(scale_factor(padding)?)
        .ok_or(LedgerError::Overflow)?;

    whole_units
        .checked_add(fraction_units)
        .ok_or(LedgerError::Overflow)
}

/// Render base units as a human-readable quantity with trailing zeros trimmed.
///
/// # Errors
/// Returns `Overflow` if `decimals` is beyond the largest precision whose
/// scale factor fits in an [`Amount`].
pub fn format_units(amount: Amount, decimals: u8) -> Result<String> {
    let factor = scale_factor(decimals)?;
    let whole = amount / factor;
    let fraction = amount % factor;
    if fraction == 0 {
        return Ok(whole.to_string());
    }

    let width = usize::from(decimals);
    let padded = format!("{fraction:0width$}");
    Ok(format!("{whole}.{}", padded.trim_end_matches('0')))
}

/// Accumulate an ASCII digit string into an [`Amount`], checking overflow.
fn digits_to_amount(digits: &str) -> Result<Amount> {
    digits.bytes().try_fold(0, |acc: Amount, b| {
        acc.checked_mul(10)
            .and_then(|acc| acc.checked_add(Amount::from(b - b'0')))
            .ok_or(LedgerError::Overflow)
    })
}
