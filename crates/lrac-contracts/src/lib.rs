//! # lrac-contracts
//!
//! Shared types and error contracts for the LRAC audit ledger.
//!
//! All crates in the workspace import from here.  No hashing, mining or
//! storage lives in this crate, only data definitions and error types.

pub mod block;
pub mod certificate;
pub mod error;
pub mod event;
pub mod verify;

pub use block::Block;
pub use certificate::{Certificate, TamperReport};
pub use error::{LedgerError, LedgerResult};
pub use event::{Actor, AuditEvent, AuditEventType, Metadata};
pub use verify::{ChainIssue, ChainIssueKind, ChainVerification};
