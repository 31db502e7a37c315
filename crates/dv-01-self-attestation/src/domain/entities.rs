//! # Attestation Entities
//!
//! The proof bundle in its transport form (`EncodedProof`) and decoded into
//! curve values (`ProofSignature`).

use super::encoding::{decode_point, reduce_scalar};
use super::errors::AttestationError;
use k256::{ProjectivePoint, Scalar};
use serde_json::{Map, Value};

/// Every key of a proof bundle.
pub const PROOF_COMPONENTS: [&str; 6] = ["z1Hat", "c1Hat", "s1Hat", "c2Hat", "s2Hat", "m1Hat"];

/// Proof bundle as submitted: component name to hex string.
///
/// Keeps the submission order of the components, which is the order used
/// when the bundle is embedded in a slashing report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedProof {
    components: Vec<(&'static str, String)>,
}

impl EncodedProof {
    /// Parse a JSON object holding exactly the six proof components.
    pub fn from_json(value: &Value) -> Result<Self, AttestationError> {
        value
            .as_object()
            .ok_or(AttestationError::NotAnObject)
            .and_then(Self::from_map)
    }

    pub fn from_map(map: &Map<String, Value>) -> Result<Self, AttestationError> {
        let mut components = Vec::with_capacity(PROOF_COMPONENTS.len());
        for (key, value) in map {
            let name = PROOF_COMPONENTS
                .iter()
                .copied()
                .find(|c| *c == key)
                .ok_or_else(|| AttestationError::UnexpectedComponent(key.clone()))?;
            let text = value
                .as_str()
                .ok_or_else(|| AttestationError::NotAString(key.clone()))?;
            components.push((name, text.to_owned()));
        }

        let proof = Self { components };
        for name in PROOF_COMPONENTS {
            if proof.component(name).is_none() {
                return Err(AttestationError::MissingComponent(name));
            }
        }
        Ok(proof)
    }

    /// Build from `(name, hex)` pairs in the given order.
    pub fn from_components<I>(components: I) -> Result<Self, AttestationError>
    where
        I: IntoIterator<Item = (&'static str, String)>,
    {
        let map: Map<String, Value> = components
            .into_iter()
            .map(|(k, v)| (k.to_string(), Value::String(v)))
            .collect();
        Self::from_map(&map)
    }

    pub fn component(&self, name: &str) -> Option<&str> {
        self.components
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn to_json(&self) -> Value {
        Value::Object(
            self.components
                .iter()
                .map(|(k, v)| (k.to_string(), Value::String(v.clone())))
                .collect(),
        )
    }

    /// Decode all components into curve values.
    pub fn decode(&self) -> Result<ProofSignature, AttestationError> {
        let get = |name: &'static str| {
            self.component(name)
                .ok_or(AttestationError::MissingComponent(name))
        };
        Ok(ProofSignature {
            z1_hat: decode_point("z1Hat", get("z1Hat")?)?,
            m1_hat: decode_point("m1Hat", get("m1Hat")?)?,
            c1_hat: reduce_scalar("c1Hat", get("c1Hat")?)?,
            s1_hat: reduce_scalar("s1Hat", get("s1Hat")?)?,
            c2_hat: reduce_scalar("c2Hat", get("c2Hat")?)?,
            s2_hat: reduce_scalar("s2Hat", get("s2Hat")?)?,
        })
    }
}

/// Decoded proof bundle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProofSignature {
    pub z1_hat: ProjectivePoint,
    pub m1_hat: ProjectivePoint,
    pub c1_hat: Scalar,
    pub s1_hat: Scalar,
    pub c2_hat: Scalar,
    pub s2_hat: Scalar,
}
