//! Text tamper detection.
//!
//! Compares two snapshots of a document by SHA-256 only.  There is no
//! similarity score: one changed byte is as "tampered" as a rewrite.
//! Working out which sections changed is left to the caller.

use tracing::debug;

use lrac_audit::content_hash;
use lrac_contracts::TamperReport;

/// Hash both texts and report whether they match.
pub fn detect_tampering(original: &str, current: &str) -> TamperReport {
    let original_hash = content_hash(original);
    let current_hash = content_hash(current);
    let matches = original_hash == current_hash;

    debug!(matches, "tamper check");

    TamperReport {
        tampered: !matches,
        original_hash,
        current_hash,
        matches,
    }
}
