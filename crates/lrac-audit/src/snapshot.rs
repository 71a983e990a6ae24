//! JSON snapshots of a chain.
//!
//! The ledger itself is process-lifetime only.  A snapshot is the JSON array
//! of blocks in their serde layout (camelCase keys, RFC 3339 timestamps),
//! suitable for an append-only log table or a document store.
//!
//! Imports run in two phases:
//!
//! 1. **Structural** — the document is validated against `snapshot_schema()`
//!    with the `jsonschema` crate; every violation is reported at once.
//! 2. **Typed** — the validated value is deserialized into `Vec<Block>`.
//!
//! A structurally valid snapshot can still have been tampered with.  Run
//! `verify_chain` on the imported blocks before relying on them.

use serde_json::{json, Value};
use tracing::{debug, warn};

use lrac_contracts::{Block, LedgerError, LedgerResult};

/// Serialize `blocks` as a pretty-printed JSON array.
pub fn export_snapshot(blocks: &[Block]) -> LedgerResult<String> {
    serde_json::to_string_pretty(blocks).map_err(|e| LedgerError::SnapshotInvalid {
        reason: format!("failed to serialize chain: {}", e),
    })
}

/// Parse and validate a snapshot produced by `export_snapshot`.
pub fn import_snapshot(json: &str) -> LedgerResult<Vec<Block>> {
    let value: Value = serde_json::from_str(json).map_err(|e| LedgerError::SnapshotInvalid {
        reason: format!("snapshot is not valid JSON: {}", e),
    })?;

    let schema = snapshot_schema();
    let validator = jsonschema::validator_for(&schema).map_err(|e| LedgerError::SnapshotInvalid {
        reason: format!("invalid snapshot schema document: {}", e),
    })?;

    let violations: Vec<String> = validator
        .iter_errors(&value)
        .map(|error| format!("{} at {}", error, error.instance_path))
        .collect();
    if !violations.is_empty() {
        warn!(violations = violations.len(), "snapshot failed schema validation");
        return Err(LedgerError::SnapshotInvalid {
            reason: violations.join("; "),
        });
    }

    let blocks: Vec<Block> =
        serde_json::from_value(value).map_err(|e| LedgerError::SnapshotInvalid {
            reason: format!("snapshot does not describe blocks: {}", e),
        })?;

    debug!(block_count = blocks.len(), "snapshot imported");
    Ok(blocks)
}

/// The JSON Schema every snapshot must satisfy.
pub fn snapshot_schema() -> Value {
    json!({
        "type": "array",
        "items": {
            "type": "object",
            "required": ["index", "timestamp", "data", "previousHash", "hash", "nonce"],
            "additionalProperties": false,
            "properties": {
                "index": { "type": "integer", "minimum": 0 },
                "timestamp": { "type": "string", "minLength": 1 },
                "previousHash": { "type": "string", "pattern": "^(0|[0-9a-f]{64})$" },
                "hash": { "type": "string", "pattern": "^[0-9a-f]{64}$" },
                "nonce": { "type": "integer", "minimum": 0 },
                "data": {
                    "type": "object",
                    "required": ["type", "userId", "userEmail"],
                    "additionalProperties": false,
                    "properties": {
                        "type": {
                            "enum": [
                                "DOCUMENT_CREATED",
                                "DOCUMENT_EDITED",
                                "DOCUMENT_REVIEWED",
                                "DOCUMENT_SIGNED",
                                "DOCUMENT_FINALIZED",
                                "DOCUMENT_EXPORTED",
                                "DOCUMENT_VERIFIED",
                                "DOCUMENT_MODIFIED",
                                "USER_LOGIN",
                                "SEARCH_PERFORMED",
                                "SYSTEM_BACKUP"
                            ]
                        },
                        "documentId": { "type": "string" },
                        "documentName": { "type": "string" },
                        "userId": { "type": "string", "minLength": 1 },
                        "userEmail": { "type": "string", "minLength": 1 },
                        "details": { "type": "string" },
                        "metadata": { "type": "object" }
                    }
                }
            }
        }
    })
}
