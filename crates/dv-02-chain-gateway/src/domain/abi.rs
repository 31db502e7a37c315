//! # ABI Codec
//!
//! The slice of the Solidity ABI the middleware needs: function selectors,
//! static words, one dynamic `bytes` inside a tuple, and word-offset reads
//! of return data.

use super::errors::AbiError;
use primitive_types::{H160, U256};
use sha3::{Digest, Keccak256};
use shared_types::{Hash, SlashingReport};

/// `getDebtor(address)` on the lending contract.
pub const GET_DEBTOR_SIGNATURE: &str = "getDebtor(address)";

/// `reportTypedHash(Report)` on the reporter registry.
pub const REPORT_TYPED_HASH_SIGNATURE: &str =
    "reportTypedHash((uint8,address,uint256,uint256,uint256,bytes))";

/// Word offsets in the `getDebtor` return data.
pub const DEBTOR_END_TIMESTAMP_WORD: usize = 3;
pub const DEBTOR_MAX_LIVENESS_WORD: usize = 5;
pub const DEBTOR_MAX_CORRUPTION_WORD: usize = 6;

const WORD: usize = 32;

/// First four bytes of `keccak256(signature)`.
pub fn selector(signature: &str) -> [u8; 4] {
    let digest = Keccak256::digest(signature.as_bytes());
    [digest[0], digest[1], digest[2], digest[3]]
}

fn word_u256(value: U256) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    value.to_big_endian(&mut word);
    word
}

fn word_address(address: &H160) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    word[12..].copy_from_slice(address.as_bytes());
    word
}

/// Calldata for `getDebtor(debtor)`.
pub fn encode_get_debtor(debtor: &H160) -> Vec<u8> {
    let mut data = Vec::with_capacity(4 + WORD);
    data.extend_from_slice(&selector(GET_DEBTOR_SIGNATURE));
    data.extend_from_slice(&word_address(debtor));
    data
}

/// Calldata for `reportTypedHash(report)`.
///
/// The tuple is dynamic because of its trailing `bytes`, so the argument
/// head is an offset to the tuple, and the tuple head holds an offset to
/// the bytes relative to the tuple start.
pub fn encode_report_typed_hash(report: &SlashingReport) -> Vec<u8> {
    let padded_len = report.signature.len().div_ceil(WORD) * WORD;
    let mut data = Vec::with_capacity(4 + WORD * 8 + padded_len);

    data.extend_from_slice(&selector(REPORT_TYPED_HASH_SIGNATURE));
    data.extend_from_slice(&word_u256(U256::from(WORD)));

    // Tuple head.
    data.extend_from_slice(&word_u256(U256::from(report.slash_type.as_u8())));
    data.extend_from_slice(&word_address(&report.debtor));
    data.extend_from_slice(&word_u256(report.amount));
    data.extend_from_slice(&word_u256(report.identifier));
    data.extend_from_slice(&word_u256(U256::from(report.block)));
    data.extend_from_slice(&word_u256(U256::from(6 * WORD)));

    // Tuple tail: length-prefixed, right-padded bytes.
    data.extend_from_slice(&word_u256(U256::from(report.signature.len())));
    data.extend_from_slice(&report.signature);
    data.resize(data.len() + (padded_len - report.signature.len()), 0);
    data
}

/// Read the `index`-th 32-byte word of return data.
pub fn word_at(data: &[u8], index: usize) -> Result<U256, AbiError> {
    let start = index * WORD;
    let end = start + WORD;
    if data.len() < end {
        return Err(AbiError::Truncated {
            needed: end,
            got: data.len(),
        });
    }
    Ok(U256::from_big_endian(&data[start..end]))
}

/// Decode a single `bytes32` return value.
pub fn decode_bytes32(data: &[u8]) -> Result<Hash, AbiError> {
    if data.len() < WORD {
        return Err(AbiError::Truncated {
            needed: WORD,
            got: data.len(),
        });
    }
    let mut hash = [0u8; WORD];
    hash.copy_from_slice(&data[..WORD]);
    Ok(hash)
}
