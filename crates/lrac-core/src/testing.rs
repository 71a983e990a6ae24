//! Test doubles for the seam traits.

use std::sync::Mutex;

use lrac_contracts::{Block, LedgerError, LedgerResult};

use crate::traits::{BlockReader, BlockStore, Miner};

/// A plain `Vec` behind a mutex.
#[derive(Default)]
pub(crate) struct MockStore {
    blocks: Mutex<Vec<Block>>,
}

impl BlockReader for MockStore {
    fn latest(&self) -> LedgerResult<Block> {
        self.blocks.lock().unwrap().last().cloned().ok_or(LedgerError::EmptyChain)
    }

    fn all(&self) -> LedgerResult<Vec<Block>> {
        Ok(self.blocks.lock().unwrap().clone())
    }

    fn len(&self) -> LedgerResult<usize> {
        Ok(self.blocks.lock().unwrap().len())
    }
}

impl BlockStore for MockStore {
    fn append(&self, block: Block) -> LedgerResult<()> {
        self.blocks.lock().unwrap().push(block);
        Ok(())
    }

    fn reset(&self) -> LedgerResult<()> {
        self.blocks.lock().unwrap().clear();
        Ok(())
    }
}

/// Assigns `hash = "00mock-<index>-<previous hash length>"` without any search.
///
/// With `fail_from_index` set, mining any block at or above that index
/// returns `MiningExhausted`.
#[derive(Default)]
pub(crate) struct MockMiner {
    pub(crate) fail_from_index: Option<u64>,
}

impl Miner for MockMiner {
    fn mine(&self, mut candidate: Block) -> LedgerResult<Block> {
        if let Some(limit) = self.fail_from_index {
            if candidate.index >= limit {
                return Err(LedgerError::MiningExhausted {
                    index: candidate.index,
                    attempts: 1,
                });
            }
        }
        candidate.hash = format!("00mock-{}-{}", candidate.index, candidate.previous_hash.len());
        Ok(candidate)
    }

    fn difficulty(&self) -> usize {
        2
    }
}
