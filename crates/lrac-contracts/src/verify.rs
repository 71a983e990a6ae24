//! Chain verification report types.
//!
//! The verifier walks a chain snapshot and collects every problem it finds
//! instead of stopping at the first, so operators see the full damage in one
//! pass.

use serde::{Deserialize, Serialize};

/// What went wrong with a single block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChainIssueKind {
    /// `previous_hash` does not equal the preceding block's `hash`.
    BrokenLink { expected: String, found: String },

    /// The stored `hash` does not match the recomputed structural hash.
    HashMismatch { stored: String, computed: String },

    /// `index` is not one more than the preceding block's index.
    IndexGap { expected: u64, found: u64 },

    /// The stored hash lacks the required leading zeros.
    InsufficientWork { difficulty: usize },

    /// The first block is not a well-formed genesis block.
    BadGenesis { found: String },
}

/// A problem found at a specific chain position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainIssue {
    /// Position of the offending block in the chain, which equals its
    /// `index` field whenever the chain is well formed.
    pub index: u64,
    #[serde(flatten)]
    pub kind: ChainIssueKind,
}

/// The outcome of verifying a chain snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainVerification {
    /// True only when `issues` is empty.
    pub valid: bool,

    /// Positions of every block with at least one issue, ascending, no repeats.
    pub invalid_blocks: Vec<u64>,

    pub issues: Vec<ChainIssue>,
}

impl ChainVerification {
    /// Build a report from collected issues.
    pub fn from_issues(issues: Vec<ChainIssue>) -> Self {
        let mut invalid_blocks: Vec<u64> = issues.iter().map(|i| i.index).collect();
        invalid_blocks.sort_unstable();
        invalid_blocks.dedup();
        Self {
            valid: issues.is_empty(),
            invalid_blocks,
            issues,
        }
    }
}
