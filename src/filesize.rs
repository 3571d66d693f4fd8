//! Byte-count conversions for storage size queries.
//!
//! Companions to [`PathBuilder::size`](crate::PathBuilder::size): the
//! builder reports raw bytes, these helpers convert to and from larger
//! units. Binary conversions use 1024-based multiples; the `_decimal`
//! variants use 1000-based multiples as file managers display them.
//!
//! Byte counts are unsigned, so negative counts are unrepresentable in the
//! `to_*` direction; the fractional `from_*` inputs are validated instead.

use crate::error::{Error, Result};

const KIB: f64 = 1024.0;
const MIB: f64 = 1024.0 * 1024.0;
const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

const KB: f64 = 1000.0;
const MB: f64 = 1000.0 * 1000.0;
const GB: f64 = 1000.0 * 1000.0 * 1000.0;

fn validate(value: f64, argument: &str) -> Result<f64> {
    if !value.is_finite() {
        return Err(Error::InvalidArgument {
            argument: argument.to_string(),
            reason: format!("value must be finite, got {value}"),
        });
    }

    if value < 0.0 {
        return Err(Error::InvalidArgument {
            argument: argument.to_string(),
            reason: "value cannot be negative".to_string(),
        });
    }

    Ok(value)
}

/// Convert kilobytes (binary, 1024-based) to bytes.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] for negative or non-finite input.
///
/// # Examples
///
/// ```
/// use pathforge::filesize;
///
/// assert_eq!(filesize::from_kb(2.0).unwrap(), 2048);
/// assert!(filesize::from_kb(-1.0).is_err());
/// ```
pub fn from_kb(kilobytes: f64) -> Result<u64> {
    Ok((validate(kilobytes, "kilobytes")? * KIB) as u64)
}

/// Convert megabytes (binary, 1024-based) to bytes.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] for negative or non-finite input.
pub fn from_mb(megabytes: f64) -> Result<u64> {
    Ok((validate(megabytes, "megabytes")? * MIB) as u64)
}

/// Convert gigabytes (binary, 1024-based) to bytes.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] for negative or non-finite input.
pub fn from_gb(gigabytes: f64) -> Result<u64> {
    Ok((validate(gigabytes, "gigabytes")? * GIB) as u64)
}

/// Convert bytes to kilobytes (binary, 1024-based).
#[must_use]
pub fn to_kb(bytes: u64) -> f64 {
    bytes as f64 / KIB
}

/// Convert bytes to megabytes (binary, 1024-based).
#[must_use]
pub fn to_mb(bytes: u64) -> f64 {
    bytes as f64 / MIB
}

/// Convert bytes to gigabytes (binary, 1024-based).
#[must_use]
pub fn to_gb(bytes: u64) -> f64 {
    bytes as f64 / GIB
}

/// Convert bytes to kilobytes (decimal, 1000-based).
#[must_use]
pub fn to_kb_decimal(bytes: u64) -> f64 {
    bytes as f64 / KB
}

/// Convert bytes to megabytes (decimal, 1000-based).
#[must_use]
pub fn to_mb_decimal(bytes: u64) -> f64 {
    bytes as f64 / MB
}

/// Convert bytes to gigabytes (decimal, 1000-based).
#[must_use]
pub fn to_gb_decimal(bytes: u64) -> f64 {
    bytes as f64 / GB
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_binary_units() {
        assert_eq!(from_kb(1.0).unwrap(), 1024);
        assert_eq!(from_mb(1.0).unwrap(), 1024 * 1024);
        assert_eq!(from_gb(1.0).unwrap(), 1024 * 1024 * 1024);
        assert_eq!(from_mb(1.5).unwrap(), 1_572_864);
    }

    #[test]
    fn test_from_rejects_negative() {
        assert!(from_kb(-0.5).is_err());
        assert!(from_mb(-1.0).is_err());
        assert!(from_gb(-100.0).is_err());
    }

    #[test]
    fn test_from_rejects_non_finite() {
        assert!(from_mb(f64::NAN).is_err());
        assert!(from_mb(f64::INFINITY).is_err());
    }

    #[test]
    fn test_to_binary_units() {
        assert!((to_kb(2048) - 2.0).abs() < f64::EPSILON);
        assert!((to_mb(1_572_864) - 1.5).abs() < f64::EPSILON);
        assert!((to_gb(1024 * 1024 * 1024) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_to_decimal_units() {
        assert!((to_kb_decimal(2000) - 2.0).abs() < f64::EPSILON);
        assert!((to_mb_decimal(1_500_000) - 1.5).abs() < f64::EPSILON);
        assert!((to_gb_decimal(1_000_000_000) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_round_trip() {
        let bytes = from_mb(12.25).unwrap();
        assert!((to_mb(bytes) - 12.25).abs() < 1e-9);
    }
}
