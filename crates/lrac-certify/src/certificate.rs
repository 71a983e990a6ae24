//! Document integrity certificates.
//!
//! A certificate binds the current text of a document to the ledger's
//! record of that document:
//!
//! 1. `document_hash`    = SHA-256(content)
//! 2. `aggregate_hash`   = SHA-256(hash₀ ‖ hash₁ ‖ … ) over the document's
//!    blocks in chain order
//! 3. `certificate_hash` = SHA-256(document_hash ‖ aggregate_hash)
//!
//! The aggregate is a flat concatenation, not a Merkle tree: it commits to
//! the whole block list but cannot prove inclusion of a single block.
//!
//! Everything except `timestamp` is a pure function of the store contents
//! and the supplied text, so two certificates issued with no block added in
//! between agree on every hash.

use chrono::{DateTime, Utc};
use tracing::debug;

use lrac_audit::content_hash;
use lrac_contracts::{Certificate, LedgerResult};
use lrac_core::{config::DEFAULT_REGISTRATION_PREFIX, traits::BlockReader, LedgerConfig};

/// Issues certificates with registration ids of the form
/// `{prefix}-{YYYY}-{MM}-{DD}-{block_count}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateGenerator {
    registration_prefix: String,
}

impl CertificateGenerator {
    pub fn new(registration_prefix: impl Into<String>) -> Self {
        Self {
            registration_prefix: registration_prefix.into(),
        }
    }

    pub fn from_config(config: &LedgerConfig) -> Self {
        Self::new(config.registration_prefix.clone())
    }

    /// Issue a certificate for `document_id` as of now.
    ///
    /// A document with no blocks still gets a certificate, with
    /// `block_count: 0`.  Only store failures produce an error.
    pub fn generate(
        &self,
        store: &dyn BlockReader,
        document_id: &str,
        content: &str,
    ) -> LedgerResult<Certificate> {
        self.generate_at(store, document_id, content, Utc::now())
    }

    /// `generate` with an explicit issue time.
    pub fn generate_at(
        &self,
        store: &dyn BlockReader,
        document_id: &str,
        content: &str,
        issued_at: DateTime<Utc>,
    ) -> LedgerResult<Certificate> {
        let blocks = store.by_document(document_id)?;

        let document_hash = content_hash(content);
        let concatenated: String = blocks.iter().map(|b| b.hash.as_str()).collect();
        let aggregate_hash = content_hash(&concatenated);
        let certificate_hash = content_hash(&format!("{}{}", document_hash, aggregate_hash));
        let registration_id = self.registration_id(issued_at, blocks.len());

        debug!(
            document_id,
            block_count = blocks.len(),
            registration_id = %registration_id,
            certificate_hash = %certificate_hash,
            "certificate issued"
        );

        Ok(Certificate {
            document_id: document_id.to_string(),
            document_hash,
            block_count: blocks.len(),
            certificate_hash,
            aggregate_hash,
            timestamp: issued_at,
            registration_id,
        })
    }

    fn registration_id(&self, issued_at: DateTime<Utc>, block_count: usize) -> String {
        format!(
            "{}-{}-{}",
            self.registration_prefix,
            issued_at.format("%Y-%m-%d"),
            block_count
        )
    }
}

impl Default for CertificateGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_REGISTRATION_PREFIX)
    }
}
