//! Error types for the LRAC ledger.
//!
//! Every fallible ledger operation returns `LedgerResult<T>`.  Verification,
//! certification and tamper detection report their findings as structured
//! values instead, so they never produce an error for bad data.

use thiserror::Error;

/// The unified error type for the LRAC crates.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// An audit event is missing required identity or document fields.
    ///
    /// Raised before any block is constructed.
    #[error("invalid audit event: {reason}")]
    InvalidEvent { reason: String },

    /// The store holds no blocks, so there is no latest block to link to.
    ///
    /// `Ledger` always runs `init()` before reading the latest block, so
    /// callers going through the ledger should never see this.
    #[error("chain is empty: no genesis block has been created")]
    EmptyChain,

    /// The miner reached its iteration cap before finding a nonce.
    #[error("mining block {index} gave up after {attempts} attempts")]
    MiningExhausted { index: u64, attempts: u64 },

    /// The block store could not be read or written.
    #[error("block store failure: {reason}")]
    StoreFailed { reason: String },

    /// A configuration value is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// A file the ledger was asked to read or write is inaccessible.
    #[error("i/o error: {reason}")]
    Io { reason: String },

    /// A persisted chain snapshot is malformed.
    #[error("invalid chain snapshot: {reason}")]
    SnapshotInvalid { reason: String },
}

/// Convenience alias used throughout the LRAC crates.
pub type LedgerResult<T> = Result<T, LedgerError>;
