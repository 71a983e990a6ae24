//! The `Block` type: one mined entry in the ledger.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::event::AuditEvent;

/// A single entry in the hash chain.
///
/// Each block commits to its predecessor via `previous_hash`.  Changing any
/// field after mining, including those of the embedded event, invalidates
/// `hash` and every later `previous_hash`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    /// Position in the chain, starting at 0 for genesis.
    pub index: u64,

    /// Wall-clock time (UTC) the block was constructed.
    pub timestamp: DateTime<Utc>,

    /// The event this block records.
    pub data: AuditEvent,

    /// Structural hash of the preceding block, or `GENESIS_PREVIOUS_HASH`.
    pub previous_hash: String,

    /// Structural hash of this block.  Empty until mined.
    pub hash: String,

    /// Proof-of-work counter, only changed by the miner.
    pub nonce: u64,
}

impl Block {
    /// The `previous_hash` of the genesis block.
    pub const GENESIS_PREVIOUS_HASH: &'static str = "0";

    /// An unmined block: `nonce = 0` and an empty `hash`.
    pub fn candidate(
        index: u64,
        timestamp: DateTime<Utc>,
        data: AuditEvent,
        previous_hash: impl Into<String>,
    ) -> Self {
        Self {
            index,
            timestamp,
            data,
            previous_hash: previous_hash.into(),
            hash: String::new(),
            nonce: 0,
        }
    }

    pub fn is_genesis(&self) -> bool {
        self.index == 0
    }

    /// True if this block records an event for `document_id`.
    pub fn belongs_to(&self, document_id: &str) -> bool {
        self.data.document_id.as_deref() == Some(document_id)
    }
}
