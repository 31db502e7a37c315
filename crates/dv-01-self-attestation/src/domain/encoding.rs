//! # Point and Scalar Encoding
//!
//! Transport forms of the proof primitive's algebraic values:
//!
//! - Points are hex SEC1 encodings (compressed or uncompressed), `0x` optional.
//! - Scalars are hex big integers of at most 64 digits, reduced modulo the
//!   group order `n`.

use super::errors::AttestationError;
use k256::elliptic_curve::ops::Reduce;
use k256::elliptic_curve::sec1::{FromEncodedPoint, ToEncodedPoint};
use k256::{AffinePoint, EncodedPoint, FieldBytes, ProjectivePoint, Scalar};

fn strip_prefix(value: &str) -> &str {
    value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value)
}

/// Decode a SEC1 hex point. The identity is rejected.
pub fn decode_point(
    component: &'static str,
    encoded: &str,
) -> Result<ProjectivePoint, AttestationError> {
    let bytes = hex::decode(strip_prefix(encoded)).map_err(|_| AttestationError::InvalidPoint {
        component,
        reason: "not hex",
    })?;

    let encoded_point =
        EncodedPoint::from_bytes(&bytes).map_err(|_| AttestationError::InvalidPoint {
            component,
            reason: "not a SEC1 encoding",
        })?;
    if encoded_point.is_identity() {
        return Err(AttestationError::InvalidPoint {
            component,
            reason: "identity",
        });
    }

    let affine: Option<AffinePoint> = AffinePoint::from_encoded_point(&encoded_point).into();
    affine
        .map(ProjectivePoint::from)
        .ok_or(AttestationError::InvalidPoint {
            component,
            reason: "not on curve",
        })
}

/// Compressed SEC1 hex (no prefix).
pub fn encode_point(point: &ProjectivePoint) -> String {
    hex::encode(point.to_affine().to_encoded_point(true).as_bytes())
}

/// Compressed SEC1 bytes, used as hash input.
pub(crate) fn compressed_bytes(point: &ProjectivePoint) -> Vec<u8> {
    point.to_affine().to_encoded_point(true).as_bytes().to_vec()
}

/// Parse a hex big integer and reduce it into the scalar field.
pub fn reduce_scalar(component: &'static str, encoded: &str) -> Result<Scalar, AttestationError> {
    let digits = strip_prefix(encoded);
    if digits.is_empty() {
        return Err(AttestationError::InvalidScalar {
            component,
            reason: "empty",
        });
    }
    if digits.len() > 64 {
        return Err(AttestationError::InvalidScalar {
            component,
            reason: "wider than 256 bits",
        });
    }

    let padded = format!("{digits:0>64}");
    let mut bytes = [0u8; 32];
    hex::decode_to_slice(&padded, &mut bytes).map_err(|_| AttestationError::InvalidScalar {
        component,
        reason: "not hex",
    })?;

    Ok(<Scalar as Reduce<k256::U256>>::reduce_bytes(&FieldBytes::from(bytes)))
}

/// Big-endian hex of a scalar (64 digits, no prefix).
pub fn encode_scalar(scalar: &Scalar) -> String {
    hex::encode(scalar.to_bytes())
}
