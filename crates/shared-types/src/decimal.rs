//! # Fixed-Point Decimals
//!
//! Conversion between human decimal text (`"0.25"`, `"1.0"`, `"1e-4"`) and
//! scaled integers. A severity score of `1.0` is `10^18` internally.

use primitive_types::U256;
use thiserror::Error;

/// Scale of every fixed-point value handled by the middleware.
pub const WAD_DECIMALS: u32 = 18;

/// `10^18`.
pub fn wad() -> U256 {
    U256::exp10(WAD_DECIMALS as usize)
}

/// Decimal parsing failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecimalError {
    /// Input had no digits.
    #[error("empty number")]
    Empty,

    /// Negative values are never meaningful here.
    #[error("negative number")]
    Negative,

    /// Anything other than digits, one dot and an optional exponent.
    #[error("malformed number: {0}")]
    Malformed(String),

    /// More significant fractional digits than the scale can hold.
    #[error("more than {max} decimal places")]
    TooPrecise { max: u32 },

    /// Value does not fit in 256 bits.
    #[error("number overflows 256 bits")]
    Overflow,
}

/// Parse a non-negative decimal integer (`"0"`, `"1200"`).
pub fn parse_integer(value: &str) -> Result<U256, DecimalError> {
    if value.is_empty() {
        return Err(DecimalError::Empty);
    }
    if value.starts_with('-') {
        return Err(DecimalError::Negative);
    }
    if !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DecimalError::Malformed(value.to_owned()));
    }
    U256::from_dec_str(value).map_err(|_| DecimalError::Overflow)
}

/// Parse decimal text into an integer scaled by `10^decimals`.
///
/// Accepts `int`, `int.frac`, `.frac`, `int.` and an optional `e`/`E`
/// exponent (the form `serde_json` prints for small floats). Digits beyond
/// the scale must be zero; nothing is rounded.
pub fn parse_units(value: &str, decimals: u32) -> Result<U256, DecimalError> {
    if value.is_empty() {
        return Err(DecimalError::Empty);
    }
    if value.starts_with('-') {
        return Err(DecimalError::Negative);
    }
    let malformed = || DecimalError::Malformed(value.to_owned());

    let (mantissa, exponent) = match value.find(['e', 'E']) {
        Some(pos) => {
            let exp = value[pos + 1..].parse::<i32>().map_err(|_| malformed())?;
            (&value[..pos], exp)
        }
        None => (value, 0),
    };

    let (int_part, frac_part) = match mantissa.split_once('.') {
        Some((i, f)) => (i, f),
        None => (mantissa, ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(DecimalError::Empty);
    }
    if !int_part.bytes().all(|b| b.is_ascii_digit())
        || !frac_part.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(malformed());
    }

    let mut digits = format!("{int_part}{frac_part}");
    let mut shift = i64::from(decimals) - frac_part.len() as i64 + i64::from(exponent);

    // Negative shift drops digits, which must all be zero.
    while shift < 0 {
        match digits.pop() {
            Some('0') => shift += 1,
            Some(_) => return Err(DecimalError::TooPrecise { max: decimals }),
            None => break,
        }
    }
    let digits = digits.trim_start_matches('0');
    if digits.is_empty() {
        return Ok(U256::zero());
    }

    let base = U256::from_dec_str(digits).map_err(|_| DecimalError::Overflow)?;
    if shift > 77 {
        return Err(DecimalError::Overflow);
    }
    let factor = U256::from(10u8)
        .checked_pow(U256::from(shift as u64))
        .ok_or(DecimalError::Overflow)?;
    base.checked_mul(factor).ok_or(DecimalError::Overflow)
}

/// Render a scaled integer as decimal text without trailing zeros.
pub fn format_units(value: U256, decimals: u32) -> String {
    let unit = U256::exp10(decimals as usize);
    let int_part = value / unit;
    let frac_part = value % unit;
    if frac_part.is_zero() {
        return int_part.to_string();
    }
    let frac = format!("{:0>width$}", frac_part.to_string(), width = decimals as usize);
    format!("{}.{}", int_part, frac.trim_end_matches('0'))
}
