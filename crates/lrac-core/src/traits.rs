//! Seam traits for the LRAC ledger.
//!
//! - `BlockReader` — read-only view of the chain's blocks, by copy
//! - `BlockStore`  — a `BlockReader` that also owns appends and resets
//! - `Miner`       — turns a candidate block into a mined one
//!
//! `Ledger` wires them together.  It is the only component that builds
//! blocks or calls `BlockStore::append`; everything else gets a
//! `BlockReader`.

use lrac_contracts::{Block, LedgerResult};

/// Read access to an ordered block sequence.
///
/// Every read returns owned copies; callers can never mutate stored blocks
/// through them.
pub trait BlockReader: Send + Sync {
    /// The last block, or `LedgerError::EmptyChain` before genesis.
    fn latest(&self) -> LedgerResult<Block>;

    /// A copy of every block in insertion order.
    fn all(&self) -> LedgerResult<Vec<Block>>;

    /// Number of stored blocks.
    fn len(&self) -> LedgerResult<usize>;

    fn is_empty(&self) -> LedgerResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Blocks whose event references `document_id`, in chain order.
    ///
    /// Empty for an unknown id.
    fn by_document(&self, document_id: &str) -> LedgerResult<Vec<Block>> {
        Ok(self
            .all()?
            .into_iter()
            .filter(|block| block.belongs_to(document_id))
            .collect())
    }
}

/// An ordered, append-only sequence of blocks.
///
/// Implementations use interior mutability so a single store can be shared
/// by the ledger (writer) and any number of readers.
pub trait BlockStore: BlockReader {
    /// Add `block` to the end of the sequence.
    ///
    /// No validation happens here.  `Ledger` has already linked and mined
    /// the block before calling this.
    fn append(&self, block: Block) -> LedgerResult<()>;

    /// Drop every block, returning the store to its freshly created state.
    fn reset(&self) -> LedgerResult<()>;
}

/// A proof-of-work search over a candidate block's nonce.
pub trait Miner: Send + Sync {
    /// Search nonces from `candidate.nonce` upward until the block's hash
    /// meets the difficulty, then return the block with `hash` and `nonce`
    /// set.
    ///
    /// Must be deterministic: the same candidate always mines to the same
    /// nonce and hash.
    fn mine(&self, candidate: Block) -> LedgerResult<Block>;

    /// Number of leading `'0'` hex characters a mined hash carries.
    fn difficulty(&self) -> usize;
}
