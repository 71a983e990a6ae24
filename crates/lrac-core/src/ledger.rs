//! The chain core: genesis creation, block construction and the single
//! serialized write path into the store.
//!
//!   validate event → init (genesis once) → latest → candidate → mine → append
//!
//! The whole pipeline runs under one writer lock.  Two concurrent callers
//! would otherwise both read the same latest block and produce two blocks
//! claiming the same index and predecessor.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use tracing::{debug, info, warn};

use lrac_contracts::{
    Actor, AuditEvent, AuditEventType, Block, LedgerError, LedgerResult,
};

use crate::{
    config::LedgerConfig,
    traits::{BlockReader, BlockStore, Miner},
};

/// Details text stored in the genesis block's event.
pub const GENESIS_DETAILS: &str = "Genesis block";

/// The ledger's chain core.
///
/// Owns the miner and shares the store.  `add_block` is the only way blocks
/// enter the chain.  The ledger is itself a `BlockReader`, so it can be
/// handed to read-side collaborators such as certificate generation without
/// exposing the store's write methods.
pub struct Ledger {
    store: Arc<dyn BlockStore>,
    miner: Box<dyn Miner>,
    config: LedgerConfig,
    writer: Mutex<()>,
}

impl Ledger {
    pub fn new(store: Arc<dyn BlockStore>, miner: Box<dyn Miner>, config: LedgerConfig) -> Self {
        Self {
            store,
            miner,
            config,
            writer: Mutex::new(()),
        }
    }

    /// Build and mine the index-0 block.
    ///
    /// The payload is a `SYSTEM_BACKUP` event attributed to the configured
    /// genesis actor; `previous_hash` is `Block::GENESIS_PREVIOUS_HASH`.
    /// Does not touch the store.
    ///
    /// Returns `LedgerError::InvalidEvent` when the configured actor has a
    /// blank id or email.
    pub fn genesis(&self) -> LedgerResult<Block> {
        let actor = Actor::from(&self.config.genesis_actor);
        let event =
            AuditEvent::system(AuditEventType::SystemBackup, &actor).with_details(GENESIS_DETAILS);
        if let Err(e) = event.validate() {
            warn!(error = %e, "rejected genesis actor");
            return Err(e);
        }

        let candidate = Block::candidate(0, Utc::now(), event, Block::GENESIS_PREVIOUS_HASH);
        self.miner.mine(candidate)
    }

    /// Append the genesis block if the store is empty.
    ///
    /// Idempotent: once the store holds any block this is a no-op.
    pub fn init(&self) -> LedgerResult<()> {
        let _writer = self.lock_writer()?;
        self.init_locked()
    }

    /// Record `event` as a new mined block and return it.
    ///
    /// Returns `LedgerError::InvalidEvent` before anything is built when the
    /// event lacks identity fields, and `LedgerError::MiningExhausted` if
    /// the miner gives up.  On any error the store is left unchanged.
    pub fn add_block(&self, event: AuditEvent) -> LedgerResult<Block> {
        if let Err(e) = event.validate() {
            warn!(event_type = %event.event_type, error = %e, "rejected audit event");
            return Err(e);
        }

        let _writer = self.lock_writer()?;
        self.init_locked()?;

        let latest = self.store.latest()?;
        let candidate = Block::candidate(latest.index + 1, Utc::now(), event, latest.hash);
        let block = self.miner.mine(candidate)?;

        self.store.append(block.clone())?;

        info!(
            index = block.index,
            event_type = %block.data.event_type,
            document_id = block.data.document_id.as_deref().unwrap_or("-"),
            nonce = block.nonce,
            hash = %block.hash,
            "block appended"
        );

        Ok(block)
    }

    /// Wipe the chain.  The next `init` or `add_block` creates a new genesis.
    pub fn reset(&self) -> LedgerResult<()> {
        let _writer = self.lock_writer()?;
        self.store.reset()?;
        debug!("ledger reset");
        Ok(())
    }

    /// A copy of every block in chain order.
    pub fn blocks(&self) -> LedgerResult<Vec<Block>> {
        self.store.all()
    }

    pub fn blocks_for_document(&self, document_id: &str) -> LedgerResult<Vec<Block>> {
        self.store.by_document(document_id)
    }

    pub fn difficulty(&self) -> usize {
        self.miner.difficulty()
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    // ── Internals ────────────────────────────────────────────────────────────

    fn lock_writer(&self) -> LedgerResult<MutexGuard<'_, ()>> {
        self.writer.lock().map_err(|e| LedgerError::StoreFailed {
            reason: format!("ledger writer lock poisoned: {}", e),
        })
    }

    /// Caller must hold the writer lock.
    fn init_locked(&self) -> LedgerResult<()> {
        if !self.store.is_empty()? {
            return Ok(());
        }

        let genesis = self.genesis()?;
        let hash = genesis.hash.clone();
        self.store.append(genesis)?;

        info!(hash = %hash, difficulty = self.miner.difficulty(), "genesis block created");
        Ok(())
    }
}

impl BlockReader for Ledger {
    fn latest(&self) -> LedgerResult<Block> {
        self.store.latest()
    }

    fn all(&self) -> LedgerResult<Vec<Block>> {
        self.store.all()
    }

    fn len(&self) -> LedgerResult<usize> {
        self.store.len()
    }

    fn by_document(&self, document_id: &str) -> LedgerResult<Vec<Block>> {
        self.store.by_document(document_id)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
