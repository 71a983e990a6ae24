//! # lrac-certify
//!
//! Integrity reports derived from the LRAC ledger.
//!
//! - [`CertificateGenerator`] — binds a document's current text to its
//!   recorded blocks.
//! - [`detect_tampering`] — compares two text snapshots by content hash.
//!
//! Neither writes to the ledger.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use lrac_certify::{detect_tampering, CertificateGenerator};
//!
//! let cert = CertificateGenerator::from_config(ledger.config())
//!     .generate(&ledger, "doc-1", &text)?;
//! let report = detect_tampering(&signed_text, &text);
//! ```

pub mod certificate;
pub mod tamper;

pub use certificate::CertificateGenerator;
pub use tamper::detect_tampering;

// ── Tests ─────────────────────────────────────────────────────────────────────
