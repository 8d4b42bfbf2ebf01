use bigdecimal::BigDecimal;
use num_bigint::{BigInt, ToBigInt};

use crate::error::{Result, SignerError};

/// Largest exponent magnitude accepted in literals like `2.5e3`. Keeps a
/// short input from expanding into an arbitrarily large integer.
const MAX_EXPONENT: i64 = 256;

/// Split a literal into its integer mantissa and scale, the power of ten
/// that divides it: `"2.5e3"` gives `(25, -2)`.
///
/// Accepted: an optional `+`, digits with an optional `.` on either side
/// (`"5"`, `"5."`, `".5"`, `"5.25"`) and an optional `e`/`E` exponent.
/// Signs other than a leading `+`, whitespace and special values are not.
fn parse_literal(amount: &str) -> Option<(BigInt, i64)> {
    let unsigned = amount.strip_prefix('+').unwrap_or(amount);
    let (mantissa, exponent) = match unsigned.split_once(['e', 'E']) {
        Some((m, e)) => (m, Some(e)),
        None => (unsigned, None),
    };
    let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));

    let is_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty()) || !is_digits(whole) || !is_digits(fraction) {
        return None;
    }

    let exponent = match exponent {
        Some(e) => {
            let digits = e.strip_prefix(['+', '-']).unwrap_or(e);
            if digits.is_empty() || !is_digits(digits) {
                return None;
            }
            let value: i64 = e.parse().ok()?;
            if !(-MAX_EXPONENT..=MAX_EXPONENT).contains(&value) {
                return None;
            }
            value
        }
        None => 0,
    };

    let int_val = BigInt::parse_bytes(format!("{}{}", whole, fraction).as_bytes(), 10)?;
    let scale = i64::try_from(fraction.len()).ok()? - exponent;
    Some((int_val, scale))
}

/// Convert a whole-unit decimal amount into atomic units
///
/// `"2.5"` with 18 decimals becomes `"2500000000000000000"`. The scaling is
/// exact decimal arithmetic; a result that still has a fractional part (more
/// fractional digits than `decimals`) is rejected instead of being rounded.
pub fn to_atomic_units(amount: &str, decimals: u8) -> Result<String> {
    let (int_val, scale) = parse_literal(amount).ok_or_else(|| {
        SignerError::InvalidAmount(format!(
            "'{}' is not a non-negative decimal number",
            amount
        ))
    })?;

    // value * 10^decimals
    let scaled = BigDecimal::new(int_val, scale - i64::from(decimals));

    if !scaled.is_integer() {
        return Err(SignerError::InvalidAmount(format!(
            "'{}' has more than {} fractional digits",
            amount, decimals
        )));
    }

    let atomic = scaled
        .to_bigint()
        .ok_or_else(|| SignerError::InvalidAmount(format!("'{}' cannot be scaled", amount)))?;

    tracing::trace!("{} -> {} atomic units ({} decimals)", amount, atomic, decimals);
    Ok(atomic.to_string())
}
