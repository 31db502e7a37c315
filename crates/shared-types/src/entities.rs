//! # Core Entities
//!
//! Event kinds, the debt position read from the lending ledger, the slashing
//! report submitted on-chain and the designated verifier's co-signature.

use crate::serde_helpers::{hex_bytes, hex_hash, strip_hex_prefix, u256_dec};
use primitive_types::{H160, U256};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// 20-byte Ethereum account address.
pub type Address = H160;

/// 32-byte digest (Keccak-256 output, typed-data hash).
pub type Hash = [u8; 32];

/// Parse a 20-byte hex address, `0x` prefix optional. No checksum check.
pub fn parse_address(value: &str) -> Option<Address> {
    let digits = strip_hex_prefix(value.trim());
    if digits.len() != 40 {
        return None;
    }
    let bytes = hex::decode(digits).ok()?;
    Some(Address::from_slice(&bytes))
}

// =============================================================================
// EVENT KINDS
// =============================================================================

/// Kind of misbehaviour a reporter alleges.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventType {
    /// Service provider failed to keep its validators online.
    Liveness,
    /// Service provider signed or proposed something it must not have.
    Corruption,
}

impl EventType {
    /// Wire name used in request bodies.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Liveness => "LIVENESS",
            Self::Corruption => "CORRUPTION",
        }
    }

    /// Parse the wire name. Matching is exact and case sensitive.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "LIVENESS" => Some(Self::Liveness),
            "CORRUPTION" => Some(Self::Corruption),
            _ => None,
        }
    }

    /// Contract enum value for this event kind.
    pub fn slash_type(&self) -> SlashType {
        match self {
            Self::Liveness => SlashType::Liveness,
            Self::Corruption => SlashType::Corruption,
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `SlashType` enum of the reporter registry contract.
///
/// Serialized as the decimal string of its discriminant (`"0"` / `"1"`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SlashType {
    Liveness = 0,
    Corruption = 1,
}

impl SlashType {
    /// ABI value (`uint8`).
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl Serialize for SlashType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_u8().to_string())
    }
}

// =============================================================================
// LEDGER STATE
// =============================================================================

/// Collateralized debt position of a service provider.
///
/// Owned by the lending contract and immutable for the duration of a request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DebtPosition {
    /// Zero means the address has no active position.
    pub end_timestamp: U256,
    /// Penalty ceiling for one liveness event (wei-scaled).
    pub max_slashable_amount_per_liveness: U256,
    /// Penalty ceiling for one corruption event (wei-scaled).
    pub max_slashable_amount_per_corruption: U256,
}

impl DebtPosition {
    /// Whether a position is open for this debtor.
    pub fn is_active(&self) -> bool {
        !self.end_timestamp.is_zero()
    }

    /// Penalty ceiling applicable to the given event kind.
    pub fn max_slashable_for(&self, event_type: EventType) -> U256 {
        match event_type {
            EventType::Liveness => self.max_slashable_amount_per_liveness,
            EventType::Corruption => self.max_slashable_amount_per_corruption,
        }
    }
}

// =============================================================================
// SLASHING REPORT
// =============================================================================

/// Report with a ratified amount but no identifier or deadline yet.
///
/// This is the shape posted to the identifier service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnsignedReport {
    pub slash_type: SlashType,
    pub debtor: Address,
    #[serde(with = "u256_dec")]
    pub amount: U256,
    /// Hex encoding of the reporter's proof bundle.
    #[serde(with = "hex_bytes")]
    pub signature: Vec<u8>,
}

impl UnsignedReport {
    /// Complete the report with its replay identifier and deadline block.
    pub fn finalize(self, identifier: U256, block: u64) -> SlashingReport {
        SlashingReport {
            slash_type: self.slash_type,
            debtor: self.debtor,
            amount: self.amount,
            identifier,
            block,
            signature: self.signature,
        }
    }
}

/// Report struct as accepted by the reporter registry.
///
/// ABI field order: `(slashType, debtor, amount, identifier, block, signature)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlashingReport {
    pub slash_type: SlashType,
    pub debtor: Address,
    #[serde(with = "u256_dec")]
    pub amount: U256,
    #[serde(with = "u256_dec")]
    pub identifier: U256,
    /// Deadline block after which the registry rejects the report.
    pub block: u64,
    #[serde(with = "hex_bytes")]
    pub signature: Vec<u8>,
}

/// ECDSA co-signature of the designated verifier over the report digest.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DesignatedVerifierSignature {
    pub deadline: u64,
    /// Ethereum-style recovery byte (27 or 28), emitted as a decimal string.
    #[serde(serialize_with = "serialize_v")]
    pub v: u8,
    #[serde(with = "hex_hash")]
    pub r: Hash,
    #[serde(with = "hex_hash")]
    pub s: Hash,
}

fn serialize_v<S: Serializer>(v: &u8, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&v.to_string())
}
