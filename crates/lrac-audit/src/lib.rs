//! # lrac-audit
//!
//! Hashing, mining, verification and storage for the LRAC audit ledger.
//!
//! ## Overview
//!
//! Every block links to its predecessor through a SHA-256 structural hash
//! and is mined until that hash starts with `difficulty` hex zeros.  Editing
//! any stored block, even a single byte of its event, breaks the chain and is
//! reported by `verify_chain`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use lrac_audit::{in_memory_ledger, verify_chain};
//! use lrac_core::{AuditRecorder, LedgerConfig};
//!
//! let (ledger, store) = in_memory_ledger(LedgerConfig::default());
//! AuditRecorder::new(&ledger).record_document_event(
//!     AuditEventType::DocumentCreated, "doc-1", "Brief", &alice, None, None,
//! )?;
//!
//! assert!(verify_chain(&ledger.blocks()?).valid);
//! ```

pub mod chain;
pub mod hash;
pub mod memory;
pub mod miner;
pub mod snapshot;

use std::sync::Arc;

use lrac_core::{Ledger, LedgerConfig};

pub use chain::{verify_chain, verify_chain_with_difficulty};
pub use hash::{content_hash, meets_difficulty, structural_hash};
pub use memory::{InMemoryBlockReader, InMemoryBlockStore};
pub use miner::ProofOfWorkMiner;
pub use snapshot::{export_snapshot, import_snapshot, snapshot_schema};

/// Build a ledger over a fresh in-memory store, mining per `config`.
///
/// The returned reader shares the ledger's chain and can be handed to
/// read-side collaborators.  Only the ledger can write to it.
pub fn in_memory_ledger(config: LedgerConfig) -> (Ledger, InMemoryBlockReader) {
    let store = InMemoryBlockStore::new();
    let reader = store.reader();
    let miner = ProofOfWorkMiner::from_config(&config);
    let ledger = Ledger::new(Arc::new(store), Box::new(miner), config);
    (ledger, reader)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    use lrac_contracts::{
        Actor, AuditEvent, AuditEventType, Block, ChainIssueKind, LedgerError, Metadata,
    };
    use lrac_core::{traits::BlockReader, traits::Miner, AuditRecorder, Ledger, LedgerConfig};

    use super::*;

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn alice() -> Actor {
        Actor::new("u-alice", "alice@example.com")
    }

    fn bob() -> Actor {
        Actor::new("u-bob", "bob@example.com")
    }

    /// A candidate with a fixed timestamp so mining results are reproducible.
    fn fixed_candidate(index: u64, previous_hash: &str) -> Block {
        let ts = Utc.with_ymd_and_hms(2025, 4, 22, 10, 0, 0).unwrap();
        let event = AuditEvent::document(AuditEventType::DocumentCreated, "doc-1", "Brief", &alice());
        Block::candidate(index, ts, event, previous_hash)
    }

    /// Metadata values whose JSON text is easy to get subtly wrong: floats
    /// with long or tiny mantissas, nested containers and integers at the
    /// edges of their range.
    fn awkward_metadata() -> Metadata {
        let mut metadata = Metadata::new();
        metadata.insert("score".to_string(), json!(2.663987731472464e-34));
        metadata.insert("ratio".to_string(), json!(0.1));
        metadata.insert("threshold".to_string(), json!(1e-7));
        metadata.insert("fee".to_string(), json!(1234.5678));
        metadata.insert("maxId".to_string(), json!(u64::MAX));
        metadata.insert("minOffset".to_string(), json!(i64::MIN));
        metadata.insert(
            "citation".to_string(),
            json!({
                "court": "Supreme",
                "pages": [14, 15.25, -3],
                "weights": { "relevance": 0.30000000000000004, "recency": 6.02214076e23 },
                "overruled": null
            }),
        );
        metadata
    }

    /// A ledger holding genesis plus `n` document events for doc-1.
    fn populated(n: usize) -> (Ledger, InMemoryBlockReader) {
        let (ledger, store) = in_memory_ledger(LedgerConfig::default());
        let recorder = AuditRecorder::new(&ledger);
        for i in 0..n {
            recorder
                .record_document_event(
                    AuditEventType::DocumentEdited,
                    "doc-1",
                    "Brief",
                    &alice(),
                    Some(&format!("revision {i}")),
                    None,
                )
                .unwrap();
        }
        (ledger, store)
    }

    // ── Hashing ───────────────────────────────────────────────────────────────

    #[test]
    fn test_content_hash_known_vector() {
        assert_eq!(
            content_hash("hello world"),
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
        assert_eq!(content_hash("hello world"), content_hash("hello world"));
        assert_ne!(content_hash("hello world"), content_hash("hello world!"));
    }

    #[test]
    fn test_structural_hash_ignores_hash_field() {
        let mut block = fixed_candidate(1, "0");
        let before = structural_hash(&block);
        block.hash = "anything".to_string();
        assert_eq!(structural_hash(&block), before);

        block.nonce += 1;
        assert_ne!(structural_hash(&block), before, "nonce must feed the hash");
    }

    #[test]
    fn test_structural_hash_stable_across_json_round_trip() {
        let mut metadata = Metadata::new();
        metadata.insert("court".to_string(), json!("Supreme"));
        metadata.insert("pages".to_string(), json!(14));
        let mut block = fixed_candidate(2, "0");
        block.data = block.data.with_metadata(metadata);

        let json = serde_json::to_string(&block).unwrap();
        let back: Block = serde_json::from_str(&json).unwrap();
        assert_eq!(structural_hash(&back), structural_hash(&block));
    }

    #[test]
    fn test_structural_hash_stable_for_numeric_and_nested_metadata() {
        let mut block = fixed_candidate(2, "0");
        block.data = block.data.with_metadata(awkward_metadata());
        let original = structural_hash(&block);

        for json in [
            serde_json::to_string(&block).unwrap(),
            serde_json::to_string_pretty(&block).unwrap(),
        ] {
            let back: Block = serde_json::from_str(&json).unwrap();
            assert_eq!(back, block);
            assert_eq!(structural_hash(&back), original);
        }
    }

    #[test]
    fn test_meets_difficulty() {
        assert!(meets_difficulty("00ab", 2));
        assert!(meets_difficulty("000b", 2));
        assert!(!meets_difficulty("0a0b", 2));
        assert!(!meets_difficulty("0", 2));
        assert!(meets_difficulty("abc", 0));
    }

    // ── Mining ────────────────────────────────────────────────────────────────

    #[test]
    fn test_mining_is_deterministic() {
        let miner = ProofOfWorkMiner::default();
        let a = miner.mine(fixed_candidate(1, "0")).unwrap();
        let b = miner.mine(fixed_candidate(1, "0")).unwrap();

        assert_eq!(a.nonce, b.nonce);
        assert_eq!(a.hash, b.hash);
    }

    #[test]
    fn test_mined_hash_satisfies_difficulty() {
        let miner = ProofOfWorkMiner::new(3);
        let block = miner.mine(fixed_candidate(5, "0")).unwrap();

        assert!(block.hash.starts_with("000"), "hash {} lacks work", block.hash);
        assert_eq!(block.hash, structural_hash(&block));
        assert_eq!(miner.difficulty(), 3);
    }

    #[test]
    fn test_mining_cap_reports_exhaustion() {
        // Difficulty 64 is unreachable, so the cap must trigger.
        let miner = ProofOfWorkMiner::new(64).with_max_iterations(10);
        match miner.mine(fixed_candidate(7, "0")) {
            Err(LedgerError::MiningExhausted { index, attempts }) => {
                assert_eq!(index, 7);
                assert_eq!(attempts, 10);
            }
            other => panic!("expected MiningExhausted, got {:?}", other),
        }
    }

    #[test]
    fn test_miner_from_config() {
        let config = LedgerConfig::from_toml_str("difficulty = 1\nmax_iterations = 99").unwrap();
        let miner = ProofOfWorkMiner::from_config(&config);
        assert_eq!(miner, ProofOfWorkMiner::new(1).with_max_iterations(99));
    }

    // ── Block store ───────────────────────────────────────────────────────────

    #[test]
    fn test_store_latest_on_empty_chain() {
        let store = InMemoryBlockStore::new();
        assert!(matches!(store.latest(), Err(LedgerError::EmptyChain)));
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn test_store_returns_defensive_copies() {
        let (_ledger, store) = populated(1);
        let mut copy = store.all().unwrap();
        copy[1].data.details = Some("rewritten".to_string());
        copy.clear();

        let fresh = store.all().unwrap();
        assert_eq!(fresh.len(), 2);
        assert_eq!(fresh[1].data.details.as_deref(), Some("revision 0"));
    }

    #[test]
    fn test_by_document_filters_in_order() {
        let (ledger, store) = in_memory_ledger(LedgerConfig::default());
        let recorder = AuditRecorder::new(&ledger);
        recorder
            .record_document_event(AuditEventType::DocumentCreated, "doc-a", "A", &alice(), None, None)
            .unwrap();
        recorder
            .record_system_event(AuditEventType::UserLogin, &bob(), None, None)
            .unwrap();
        recorder
            .record_document_event(AuditEventType::DocumentCreated, "doc-b", "B", &bob(), None, None)
            .unwrap();
        recorder
            .record_document_event(AuditEventType::DocumentSigned, "doc-a", "A", &bob(), None, None)
            .unwrap();

        let all = store.all().unwrap();
        let doc_a = store.by_document("doc-a").unwrap();
        let expected: Vec<Block> = all.iter().filter(|b| b.belongs_to("doc-a")).cloned().collect();

        assert_eq!(doc_a, expected);
        assert_eq!(doc_a.len(), 2);
        assert!(doc_a[0].index < doc_a[1].index);
        assert_eq!(doc_a[1].data.event_type, AuditEventType::DocumentSigned);
        assert!(store.by_document("doc-unknown").unwrap().is_empty());
    }

    #[test]
    fn test_reader_follows_ledger_writes() {
        let (ledger, reader) = in_memory_ledger(LedgerConfig::default());
        assert!(reader.is_empty().unwrap());

        let block = AuditRecorder::new(&ledger)
            .record_document_event(AuditEventType::DocumentCreated, "doc-1", "Brief", &alice(), None, None)
            .unwrap();
        assert_eq!(reader.len().unwrap(), 2);
        assert_eq!(reader.latest().unwrap(), block);
        assert_eq!(reader.by_document("doc-1").unwrap(), vec![block]);

        // The ledger reads the same chain through the same seam.
        let via_ledger: &dyn BlockReader = &ledger;
        assert_eq!(via_ledger.all().unwrap(), reader.all().unwrap());
    }

    #[test]
    fn test_store_clones_share_chain() {
        let (ledger, store) = populated(2);
        let other = store.clone();
        assert_eq!(other.len().unwrap(), 3);

        ledger.reset().unwrap();
        assert!(other.is_empty().unwrap());
    }

    // ── Chain linkage ─────────────────────────────────────────────────────────

    #[test]
    fn test_ledger_chain_links_and_mines() {
        let (ledger, _store) = populated(4);
        let blocks = ledger.blocks().unwrap();

        assert_eq!(blocks.len(), 5);
        assert_eq!(blocks[0].previous_hash, Block::GENESIS_PREVIOUS_HASH);
        for pair in blocks.windows(2) {
            assert_eq!(pair[1].previous_hash, pair[0].hash);
            assert_eq!(pair[1].index, pair[0].index + 1);
        }
        for block in &blocks {
            assert!(meets_difficulty(&block.hash, 2));
            assert_eq!(structural_hash(block), block.hash);
        }
        assert_eq!(ledger.difficulty(), 2);
    }

    // ── Verifier ──────────────────────────────────────────────────────────────

    #[test]
    fn test_verify_trivial_chains() {
        assert!(verify_chain(&[]).valid);

        let (ledger, _store) = in_memory_ledger(LedgerConfig::default());
        ledger.init().unwrap();
        let report = verify_chain(&ledger.blocks().unwrap());
        assert!(report.valid);
        assert!(report.invalid_blocks.is_empty());
    }

    #[test]
    fn test_verify_detects_tampered_data() {
        let (ledger, _store) = populated(3);
        let mut blocks = ledger.blocks().unwrap();
        assert!(verify_chain(&blocks).valid);

        blocks[2].data.details = Some("TAMPERED".to_string());

        let report = verify_chain(&blocks);
        assert!(!report.valid);
        assert_eq!(report.invalid_blocks, vec![2]);
        assert!(matches!(report.issues[0].kind, ChainIssueKind::HashMismatch { .. }));
    }

    #[test]
    fn test_verify_detects_corrupted_previous_hash() {
        let (ledger, _store) = populated(3);
        let mut blocks = ledger.blocks().unwrap();
        blocks[3].previous_hash = "f".repeat(64);

        let report = verify_chain(&blocks);
        assert!(!report.valid);
        assert_eq!(report.invalid_blocks, vec![3]);
        assert!(report
            .issues
            .iter()
            .any(|i| matches!(i.kind, ChainIssueKind::BrokenLink { .. })));
    }

    #[test]
    fn test_verify_checks_genesis() {
        let (ledger, _store) = populated(1);
        let mut blocks = ledger.blocks().unwrap();
        blocks[0].data.user_id = "intruder".to_string();

        let report = verify_chain(&blocks);
        assert_eq!(report.invalid_blocks, vec![0]);

        let mut blocks = ledger.blocks().unwrap();
        blocks[0].previous_hash = "1".to_string();
        let report = verify_chain(&blocks);
        assert!(report
            .issues
            .iter()
            .any(|i| i.index == 0 && matches!(i.kind, ChainIssueKind::BadGenesis { .. })));
    }

    #[test]
    fn test_verify_detects_removed_block() {
        let (ledger, _store) = populated(3);
        let mut blocks = ledger.blocks().unwrap();
        blocks.remove(2);

        let report = verify_chain(&blocks);
        assert_eq!(report.invalid_blocks, vec![2]);
        let kinds: Vec<_> = report.issues.iter().map(|i| &i.kind).collect();
        assert!(kinds.iter().any(|k| matches!(k, ChainIssueKind::BrokenLink { .. })));
        assert!(kinds.iter().any(|k| matches!(k, ChainIssueKind::IndexGap { expected: 2, found: 3 })));
    }

    #[test]
    fn test_verify_with_difficulty_catches_rehashed_block() {
        let (ledger, _store) = populated(2);
        let mut blocks = ledger.blocks().unwrap();

        // Edit block 2 and recompute its hash without mining, then search for
        // a nonce whose hash does NOT meet the difficulty.
        blocks[2].data.details = Some("quietly edited".to_string());
        blocks[2].nonce = 0;
        while meets_difficulty(&structural_hash(&blocks[2]), 2) {
            blocks[2].nonce += 1;
        }
        blocks[2].hash = structural_hash(&blocks[2]);

        assert!(verify_chain(&blocks).valid, "linkage and hash alone cannot see this edit");

        let report = verify_chain_with_difficulty(&blocks, 2);
        assert!(!report.valid);
        assert_eq!(report.invalid_blocks, vec![2]);
        assert!(matches!(
            report.issues[0].kind,
            ChainIssueKind::InsufficientWork { difficulty: 2 }
        ));
    }

    // ── Snapshots ─────────────────────────────────────────────────────────────

    #[test]
    fn test_snapshot_export_import_preserves_validity() {
        let (ledger, _store) = populated(2);
        let blocks = ledger.blocks().unwrap();

        let json = export_snapshot(&blocks).unwrap();
        let imported = import_snapshot(&json).unwrap();

        assert_eq!(imported, blocks);
        assert!(verify_chain_with_difficulty(&imported, 2).valid);

        let restored = InMemoryBlockStore::from_blocks(imported);
        assert_eq!(restored.latest().unwrap(), blocks[2]);
    }

    #[test]
    fn test_snapshot_round_trip_keeps_metadata_hashes() {
        let (ledger, _store) = populated(1);
        let recorder = AuditRecorder::new(&ledger);
        recorder
            .record_document_event(
                AuditEventType::DocumentReviewed,
                "doc-1",
                "Brief",
                &bob(),
                Some("scored"),
                Some(awkward_metadata()),
            )
            .unwrap();
        let mut tiny = Metadata::new();
        tiny.insert("score".to_string(), json!(2.663987731472464e-34));
        recorder
            .record_system_event(AuditEventType::SearchPerformed, &alice(), None, Some(tiny))
            .unwrap();

        let blocks = ledger.blocks().unwrap();
        assert!(verify_chain_with_difficulty(&blocks, 2).valid);

        let imported = import_snapshot(&export_snapshot(&blocks).unwrap()).unwrap();
        assert_eq!(imported, blocks);

        let report = verify_chain_with_difficulty(&imported, 2);
        assert!(report.valid, "honest chain rejected after import: {:?}", report.issues);
    }

    #[test]
    fn test_snapshot_rejects_schema_violations() {
        let (ledger, _store) = populated(1);
        let mut value = serde_json::to_value(ledger.blocks().unwrap()).unwrap();
        value[1]["data"]["type"] = json!("DOCUMENT_SHREDDED");
        value[1]["hash"] = json!("not-hex");

        match import_snapshot(&value.to_string()) {
            Err(LedgerError::SnapshotInvalid { reason }) => {
                assert!(reason.contains("DOCUMENT_SHREDDED"), "unexpected reason: {reason}");
                assert!(reason.contains("not-hex"), "all violations must be reported: {reason}");
            }
            other => panic!("expected SnapshotInvalid, got {:?}", other),
        }
    }

    #[test]
    fn test_snapshot_rejects_bad_json() {
        assert!(matches!(
            import_snapshot("{ not json"),
            Err(LedgerError::SnapshotInvalid { .. })
        ));
        assert!(matches!(
            import_snapshot(r#"{"index": 0}"#),
            Err(LedgerError::SnapshotInvalid { .. })
        ));
    }

    // ── Direct mutation of the store ──────────────────────────────────────────

    /// Editing a stored block in place is caught by the next verification.
    #[test]
    fn test_in_place_tamper_detected() {
        let (ledger, store) = populated(2);
        {
            let mut blocks = store.inner.blocks.lock().unwrap();
            blocks[1].data.user_email = "mallory@example.com".to_string();
        }

        let report = verify_chain(&ledger.blocks().unwrap());
        assert!(!report.valid);
        assert_eq!(report.invalid_blocks, vec![1]);
    }
}
