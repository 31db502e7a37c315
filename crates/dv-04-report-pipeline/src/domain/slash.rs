//! # Slash Amount Calculator
//!
//! Fixed-point recomputation of the penalty at 18 decimals:
//!
//! ```text
//! slash = floor(maxSlashable * severity / 10^18)
//! ```
//!
//! The product is taken in 512 bits so no input can overflow before the
//! single floor division. The reporter's proposal is only ever ratified,
//! never corrected.

use crate::domain::errors::{messages, ReportError};
use primitive_types::{U256, U512};
use shared_types::{format_units, parse_units, wad, DebtPosition, EventType, WAD_DECIMALS};

/// Parse an oracle severity score into WAD units.
///
/// Valid scores lie in `(0, 1]`.
pub fn parse_severity(text: &str) -> Result<U256, ReportError> {
    let invalid = || ReportError::reconciliation(messages::INVALID_SEVERITY_SCORE);
    let severity = parse_units(text.trim(), WAD_DECIMALS).map_err(|_| invalid())?;
    if severity.is_zero() || severity > wad() {
        return Err(invalid());
    }
    Ok(severity)
}

/// `floor(max_slashable * severity / 10^18)`, or `None` if it exceeds 256 bits.
pub fn compute_slash_amount(max_slashable: U256, severity: U256) -> Option<U256> {
    let product: U512 = max_slashable.full_mul(severity);
    U256::try_from(product / U512::from(wad())).ok()
}

/// Recompute the amount for `event_type` and require exact equality.
pub fn ratify_slash_amount(
    event_type: EventType,
    position: &DebtPosition,
    severity: U256,
    proposed: U256,
) -> Result<U256, ReportError> {
    let max = position.max_slashable_for(event_type);
    let expected = compute_slash_amount(max, severity)
        .ok_or_else(|| ReportError::reconciliation(messages::INVALID_SEVERITY_SCORE))?;

    if expected != proposed {
        tracing::info!(
            %expected,
            %proposed,
            %max,
            severity = %format_units(severity, WAD_DECIMALS),
            "Proposed slash amount rejected"
        );
        return Err(ReportError::slash_mismatch(expected, max));
    }
    Ok(expected)
}
