//! Derived integrity reports: document certificates and tamper checks.
//!
//! Neither type is ever stored in the chain.  Both are computed on demand
//! from the current ledger state and caller-supplied text.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A point-in-time integrity summary for one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    pub document_id: String,

    /// SHA-256 (hex) of the document text supplied at issue time.
    pub document_hash: String,

    /// Number of ledger blocks recorded for the document.
    pub block_count: usize,

    /// SHA-256 (hex) of `document_hash` followed by `aggregate_hash`.
    pub certificate_hash: String,

    /// SHA-256 (hex) of the document's block hashes concatenated in chain
    /// order.
    ///
    /// Serialized as `merkleRoot` for compatibility with existing consumers.
    /// It is a flat aggregate, not a Merkle tree, and supports no inclusion
    /// proofs.
    #[serde(rename = "merkleRoot")]
    pub aggregate_hash: String,

    /// When the certificate was issued.
    pub timestamp: DateTime<Utc>,

    /// Human-readable id, e.g. `LRAC-2025-04-22-6`.
    pub registration_id: String,
}

/// The result of comparing two text snapshots by content hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TamperReport {
    /// True when the hashes differ.
    pub tampered: bool,
    pub original_hash: String,
    pub current_hash: String,
    #[serde(rename = "match")]
    pub matches: bool,
}
