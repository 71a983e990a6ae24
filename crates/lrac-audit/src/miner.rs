//! Proof-of-work mining.
//!
//! A toy proof-of-work: at the default difficulty of two hex zeros a block
//! takes about 256 attempts.  It gives every block a reproducible, non-trivial
//! linkage hash; it is not meant to resist an attacker willing to re-mine.

use tracing::{debug, warn};

use lrac_contracts::{Block, LedgerError, LedgerResult};
use lrac_core::{traits::Miner, LedgerConfig, DEFAULT_DIFFICULTY};

use crate::hash::{finish_with_nonce, meets_difficulty, prefix_hasher};

/// Searches nonces sequentially from the candidate's starting nonce.
///
/// Without `max_iterations` the search is unbounded, so raising the
/// difficulty raises worst-case latency without limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofOfWorkMiner {
    difficulty: usize,
    max_iterations: Option<u64>,
}

impl ProofOfWorkMiner {
    pub fn new(difficulty: usize) -> Self {
        Self {
            difficulty,
            max_iterations: None,
        }
    }

    /// Give up with `LedgerError::MiningExhausted` after `max` attempts.
    pub fn with_max_iterations(mut self, max: u64) -> Self {
        self.max_iterations = Some(max);
        self
    }

    pub fn from_config(config: &LedgerConfig) -> Self {
        Self {
            difficulty: config.difficulty,
            max_iterations: config.max_iterations,
        }
    }
}

impl Default for ProofOfWorkMiner {
    fn default() -> Self {
        Self::new(DEFAULT_DIFFICULTY)
    }
}

impl Miner for ProofOfWorkMiner {
    fn mine(&self, mut candidate: Block) -> LedgerResult<Block> {
        let prefix = prefix_hasher(&candidate);
        let mut attempts: u64 = 0;

        loop {
            let digest = finish_with_nonce(prefix.clone(), candidate.nonce);
            attempts += 1;

            if meets_difficulty(&digest, self.difficulty) {
                debug!(
                    index = candidate.index,
                    nonce = candidate.nonce,
                    attempts,
                    hash = %digest,
                    "block mined"
                );
                candidate.hash = digest;
                return Ok(candidate);
            }

            if self.max_iterations.is_some_and(|max| attempts >= max) {
                warn!(index = candidate.index, attempts, difficulty = self.difficulty, "mining gave up");
                return Err(LedgerError::MiningExhausted {
                    index: candidate.index,
                    attempts,
                });
            }

            candidate.nonce = candidate
                .nonce
                .checked_add(1)
                .ok_or(LedgerError::MiningExhausted {
                    index: candidate.index,
                    attempts,
                })?;
        }
    }

    fn difficulty(&self) -> usize {
        self.difficulty
    }
}
