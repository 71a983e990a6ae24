//! In-memory implementation of `BlockStore`.
//!
//! `InMemoryBlockStore` keeps the chain in a `Vec` behind an
//! `Arc<Mutex<_>>`.  Clones share the same chain.  The ledger writes
//! through one handle; everyone else gets an `InMemoryBlockReader` from
//! `reader()`, which shares the chain but cannot append or reset it.
//! Contents live for the life of the process; see `crate::snapshot` for
//! persisting them.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;

use lrac_contracts::{Block, LedgerError, LedgerResult};
use lrac_core::traits::{BlockReader, BlockStore};

/// An append-only block sequence held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBlockStore {
    pub(crate) blocks: Arc<Mutex<Vec<Block>>>,
}

impl InMemoryBlockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store from previously persisted blocks.
    ///
    /// The blocks are taken as-is.  Run `verify_chain` on them before
    /// trusting anything derived from the store.
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        debug!(block_count = blocks.len(), "block store seeded");
        Self {
            blocks: Arc::new(Mutex::new(blocks)),
        }
    }

    /// A read-only handle onto this store's chain.
    pub fn reader(&self) -> InMemoryBlockReader {
        InMemoryBlockReader {
            inner: self.clone(),
        }
    }

    fn lock(&self) -> LedgerResult<MutexGuard<'_, Vec<Block>>> {
        self.blocks.lock().map_err(|e| LedgerError::StoreFailed {
            reason: format!("block store lock poisoned: {}", e),
        })
    }
}

impl BlockReader for InMemoryBlockStore {
    fn latest(&self) -> LedgerResult<Block> {
        self.lock()?.last().cloned().ok_or(LedgerError::EmptyChain)
    }

    fn all(&self) -> LedgerResult<Vec<Block>> {
        Ok(self.lock()?.clone())
    }

    fn len(&self) -> LedgerResult<usize> {
        Ok(self.lock()?.len())
    }

    /// Filters under the lock instead of copying the whole chain first.
    fn by_document(&self, document_id: &str) -> LedgerResult<Vec<Block>> {
        Ok(self
            .lock()?
            .iter()
            .filter(|block| block.belongs_to(document_id))
            .cloned()
            .collect())
    }
}

impl BlockStore for InMemoryBlockStore {
    fn append(&self, block: Block) -> LedgerResult<()> {
        self.lock()?.push(block);
        Ok(())
    }

    fn reset(&self) -> LedgerResult<()> {
        self.lock()?.clear();
        Ok(())
    }
}

/// Shares an `InMemoryBlockStore`'s chain without its write methods.
///
/// Sees every block the ledger appends, the moment it is appended.
#[derive(Debug, Clone)]
pub struct InMemoryBlockReader {
    pub(crate) inner: InMemoryBlockStore,
}

impl BlockReader for InMemoryBlockReader {
    fn latest(&self) -> LedgerResult<Block> {
        self.inner.latest()
    }

    fn all(&self) -> LedgerResult<Vec<Block>> {
        self.inner.all()
    }

    fn len(&self) -> LedgerResult<usize> {
        self.inner.len()
    }

    fn by_document(&self, document_id: &str) -> LedgerResult<Vec<Block>> {
        self.inner.by_document(document_id)
    }
}
