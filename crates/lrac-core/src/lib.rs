//! # lrac-core
//!
//! The chain core of the LRAC audit ledger.
//!
//! This crate provides:
//! - The seam traits (`BlockReader`, `BlockStore`, `Miner`)
//! - `Ledger`, which creates genesis, builds blocks and serializes writes
//! - `AuditRecorder`, the typed entry point for document and system events
//! - `LedgerConfig`, loaded from TOML
//!
//! ## Usage
//!
//! ```rust,ignore
//! use lrac_core::{AuditRecorder, Ledger, LedgerConfig};
//!
//! let ledger = Ledger::new(store, miner, LedgerConfig::default());
//! AuditRecorder::new(&ledger).record_system_event(
//!     AuditEventType::UserLogin, &actor, None, None,
//! )?;
//! ```

pub mod config;
pub mod ledger;
pub mod recorder;
pub mod traits;

#[cfg(test)]
mod testing;

pub use config::{GenesisActor, LedgerConfig, DEFAULT_DIFFICULTY};
pub use ledger::Ledger;
pub use recorder::AuditRecorder;
pub use traits::{BlockReader, BlockStore, Miner};
