//! Chain integrity verification.
//!
//! Rules checked for every block, genesis included:
//!
//! 1. **Hash correctness** — the stored `hash` equals the recomputed
//!    structural hash.
//! 2. **Linkage** — `previous_hash` equals the preceding block's `hash`
//!    (for genesis: equals `Block::GENESIS_PREVIOUS_HASH`).
//! 3. **Sequence** — `index` is one more than the preceding block's index
//!    (for genesis: 0).
//! 4. **Work** (only with `verify_chain_with_difficulty`) — the stored hash
//!    carries the required leading zeros.  This catches a block that was
//!    edited and re-hashed without being re-mined.
//!
//! Verification is a pure function over a snapshot.  It never errors and
//! collects every issue rather than stopping at the first one.

use tracing::{debug, warn};

use lrac_contracts::{Block, ChainIssue, ChainIssueKind, ChainVerification};

use crate::hash::{meets_difficulty, structural_hash};

/// Verify linkage, sequence and hash correctness of `blocks`.
///
/// `blocks` must be the whole chain starting from genesis.  An empty chain
/// is valid.
pub fn verify_chain(blocks: &[Block]) -> ChainVerification {
    finish(collect_issues(blocks, None), blocks.len())
}

/// `verify_chain` plus a proof-of-work check at `difficulty`.
pub fn verify_chain_with_difficulty(blocks: &[Block], difficulty: usize) -> ChainVerification {
    finish(collect_issues(blocks, Some(difficulty)), blocks.len())
}

fn collect_issues(blocks: &[Block], difficulty: Option<usize>) -> Vec<ChainIssue> {
    let mut issues = Vec::new();

    for (position, block) in blocks.iter().enumerate() {
        let at = position as u64;
        let mut flag = |kind: ChainIssueKind| {
            warn!(index = at, issue = ?kind, "chain verification issue");
            issues.push(ChainIssue { index: at, kind });
        };

        match position.checked_sub(1).map(|p| &blocks[p]) {
            None => {
                if block.previous_hash != Block::GENESIS_PREVIOUS_HASH {
                    flag(ChainIssueKind::BadGenesis {
                        found: block.previous_hash.clone(),
                    });
                }
                if block.index != 0 {
                    flag(ChainIssueKind::IndexGap {
                        expected: 0,
                        found: block.index,
                    });
                }
            }
            Some(previous) => {
                if block.previous_hash != previous.hash {
                    flag(ChainIssueKind::BrokenLink {
                        expected: previous.hash.clone(),
                        found: block.previous_hash.clone(),
                    });
                }
                let expected_index = previous.index.wrapping_add(1);
                if block.index != expected_index {
                    flag(ChainIssueKind::IndexGap {
                        expected: expected_index,
                        found: block.index,
                    });
                }
            }
        }

        let computed = structural_hash(block);
        if computed != block.hash {
            flag(ChainIssueKind::HashMismatch {
                stored: block.hash.clone(),
                computed,
            });
        }

        if let Some(difficulty) = difficulty {
            if !meets_difficulty(&block.hash, difficulty) {
                flag(ChainIssueKind::InsufficientWork { difficulty });
            }
        }
    }

    issues
}

fn finish(issues: Vec<ChainIssue>, block_count: usize) -> ChainVerification {
    let report = ChainVerification::from_issues(issues);
    debug!(
        block_count,
        valid = report.valid,
        invalid = report.invalid_blocks.len(),
        "chain verified"
    );
    report
}
