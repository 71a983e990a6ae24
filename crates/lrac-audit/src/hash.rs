//! Content and structural hashing.
//!
//! Both roles use SHA-256 and return lowercase 64-character hex strings.
//!
//! Structural hash input layout (bytes, in order):
//!   1. index as 8-byte little-endian
//!   2. timestamp as RFC 3339 UTF-8, nanosecond precision, `Z` suffix
//!   3. previous_hash as UTF-8 bytes
//!   4. canonical JSON of data (serde_json, no pretty-printing)
//!   5. nonce as 8-byte little-endian
//!
//! The nonce goes last so the miner can hash fields 1–4 once and only feed
//! the nonce on each attempt.  `hash` itself is never part of the input.
//!
//! Field 4 is only reproducible if JSON numbers parse back to the exact
//! value that was written, which is why the workspace enables serde_json's
//! `float_roundtrip` feature.

use chrono::SecondsFormat;
use sha2::{Digest, Sha256};

use lrac_contracts::Block;

/// SHA-256 of `text` as UTF-8.
pub fn content_hash(text: &str) -> String {
    hex::encode(Sha256::digest(text.as_bytes()))
}

/// The structural hash of `block`, ignoring its stored `hash` field.
///
/// # Panics
///
/// Panics if the event cannot be serialized to JSON, which cannot happen
/// for `AuditEvent`: its metadata keys are strings and values are already
/// `serde_json::Value`.
pub fn structural_hash(block: &Block) -> String {
    finish_with_nonce(prefix_hasher(block), block.nonce)
}

/// A hasher already fed every field except the nonce.
pub(crate) fn prefix_hasher(block: &Block) -> Sha256 {
    let data_json =
        serde_json::to_vec(&block.data).expect("AuditEvent must always be serializable to JSON");

    let mut hasher = Sha256::new();
    hasher.update(block.index.to_le_bytes());
    hasher.update(
        block
            .timestamp
            .to_rfc3339_opts(SecondsFormat::Nanos, true)
            .as_bytes(),
    );
    hasher.update(block.previous_hash.as_bytes());
    hasher.update(&data_json);
    hasher
}

pub(crate) fn finish_with_nonce(mut hasher: Sha256, nonce: u64) -> String {
    hasher.update(nonce.to_le_bytes());
    hex::encode(hasher.finalize())
}

/// True when the first `difficulty` characters of `hash` are all `'0'`.
///
/// A hash shorter than `difficulty` never qualifies.
pub fn meets_difficulty(hash: &str, difficulty: usize) -> bool {
    hash.len() >= difficulty && hash.bytes().take(difficulty).all(|b| b == b'0')
}
