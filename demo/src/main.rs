//! LRAC audit ledger — demo CLI
//!
//! Records a short document history on an in-memory ledger, or inspects a
//! chain snapshot exported from one.
//!
//! Usage:
//!   cargo run -p demo -- scenario --export chain.json
//!   cargo run -p demo -- verify chain.json
//!   cargo run -p demo -- certify chain.json doc-1 brief.txt
//!   cargo run -p demo -- tamper signed.txt current.txt
//!   cargo run -p demo -- --config lrac.toml scenario

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use lrac_audit::{
    export_snapshot, import_snapshot, in_memory_ledger, verify_chain_with_difficulty,
    InMemoryBlockStore,
};
use lrac_certify::{detect_tampering, CertificateGenerator};
use lrac_contracts::{
    Actor, AuditEventType, Block, ChainVerification, LedgerError, LedgerResult, Metadata,
};
use lrac_core::{AuditRecorder, LedgerConfig};

// ── CLI definition ────────────────────────────────────────────────────────────

/// LRAC — tamper-evident audit ledger for legal documents.
#[derive(Parser)]
#[command(
    name = "lrac",
    about = "LRAC audit ledger demo",
    long_about = "Records document events on a hash-chained, proof-of-work ledger,\n\
                  verifies exported chains, and issues integrity certificates."
)]
struct Cli {
    /// Ledger configuration file (TOML).  Defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Record a create/edit history for doc-1, verify it and certify it.
    Scenario {
        /// Write the resulting chain to this file as a JSON snapshot.
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// Verify a chain snapshot.  Exits with status 1 if it is invalid.
    Verify { snapshot: PathBuf },
    /// Issue a certificate for one document in a chain snapshot.
    Certify {
        snapshot: PathBuf,
        document_id: String,
        /// File holding the document's current text.
        content: PathBuf,
    },
    /// Compare two text files by content hash.
    Tamper { original: PathBuf, current: PathBuf },
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Set RUST_LOG=debug to see mining and certificate details.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let result = load_config(cli.config.as_deref()).and_then(|config| match cli.command {
        Command::Scenario { export } => run_scenario(config, export.as_deref()),
        Command::Verify { snapshot } => run_verify(&config, &snapshot),
        Command::Certify {
            snapshot,
            document_id,
            content,
        } => run_certify(&config, &snapshot, &document_id, &content),
        Command::Tamper { original, current } => run_tamper(&original, &current),
    });

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("lrac error: {}", e);
            std::process::exit(2);
        }
    }
}

// ── Commands ──────────────────────────────────────────────────────────────────
//
// Each command returns Ok(false) when it ran but found a problem.

fn run_scenario(config: LedgerConfig, export: Option<&Path>) -> LedgerResult<bool> {
    let (ledger, store) = in_memory_ledger(config);
    let recorder = AuditRecorder::new(&ledger);

    let alice = Actor::new("u-alice", "alice@example.com");
    let bob = Actor::new("u-bob", "bob@example.com");

    recorder.record_system_event(AuditEventType::UserLogin, &alice, None, None)?;
    recorder.record_document_event(
        AuditEventType::DocumentCreated,
        "doc-1",
        "Lease Agreement",
        &alice,
        Some("initial draft"),
        None,
    )?;

    let mut metadata = Metadata::new();
    metadata.insert("section".to_string(), serde_json::json!("4(b)"));
    recorder.record_document_event(
        AuditEventType::DocumentEdited,
        "doc-1",
        "Lease Agreement",
        &bob,
        Some("revised rent clause"),
        Some(metadata),
    )?;

    let blocks = ledger.blocks()?;
    print_chain(&blocks);

    let report = verify_chain_with_difficulty(&blocks, ledger.difficulty());
    print_verification(&report);

    let certificate = CertificateGenerator::from_config(ledger.config())
        .generate(&store, "doc-1", "hello world")?;
    println!("Certificate for doc-1:");
    println!("{}", to_pretty_json(&certificate)?);

    if let Some(path) = export {
        write_file(path, &export_snapshot(&blocks)?)?;
        info!(path = %path.display(), block_count = blocks.len(), "snapshot exported");
        println!("Snapshot written to {}", path.display());
    }

    Ok(report.valid)
}

fn run_verify(config: &LedgerConfig, snapshot: &Path) -> LedgerResult<bool> {
    let blocks = import_snapshot(&read_file(snapshot)?)?;
    let report = verify_chain_with_difficulty(&blocks, config.difficulty);
    print_verification(&report);
    Ok(report.valid)
}

fn run_certify(
    config: &LedgerConfig,
    snapshot: &Path,
    document_id: &str,
    content: &Path,
) -> LedgerResult<bool> {
    let blocks = import_snapshot(&read_file(snapshot)?)?;

    // A certificate over a broken chain would vouch for forged history.
    let report = verify_chain_with_difficulty(&blocks, config.difficulty);
    if !report.valid {
        print_verification(&report);
        return Ok(false);
    }

    let store = InMemoryBlockStore::from_blocks(blocks);
    let certificate = CertificateGenerator::from_config(config).generate(
        &store,
        document_id,
        &read_file(content)?,
    )?;
    println!("{}", to_pretty_json(&certificate)?);
    Ok(true)
}

fn run_tamper(original: &Path, current: &Path) -> LedgerResult<bool> {
    let report = detect_tampering(&read_file(original)?, &read_file(current)?);
    println!("{}", to_pretty_json(&report)?);
    Ok(!report.tampered)
}

// ── Output ────────────────────────────────────────────────────────────────────

fn print_chain(blocks: &[Block]) {
    println!();
    println!("Chain ({} blocks)", blocks.len());
    println!("=================");
    for block in blocks {
        println!(
            "  #{:<3} {:<18} {:<8} {:<20} nonce={:<5} hash={}…",
            block.index,
            block.data.event_type,
            block.data.document_id.as_deref().unwrap_or("-"),
            block.data.user_email,
            block.nonce,
            &block.hash[..block.hash.len().min(16)],
        );
    }
    println!();
}

fn print_verification(report: &ChainVerification) {
    if report.valid {
        println!("Chain verification: VALID");
        return;
    }
    println!(
        "Chain verification: INVALID (blocks {:?})",
        report.invalid_blocks
    );
    for issue in &report.issues {
        println!("  block {}: {:?}", issue.index, issue.kind);
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn load_config(path: Option<&Path>) -> LedgerResult<LedgerConfig> {
    match path {
        Some(path) => LedgerConfig::from_file(path),
        None => Ok(LedgerConfig::default()),
    }
}

fn read_file(path: &Path) -> LedgerResult<String> {
    std::fs::read_to_string(path).map_err(|e| LedgerError::Io {
        reason: format!("failed to read '{}': {}", path.display(), e),
    })
}

fn write_file(path: &Path, contents: &str) -> LedgerResult<()> {
    std::fs::write(path, contents).map_err(|e| LedgerError::Io {
        reason: format!("failed to write '{}': {}", path.display(), e),
    })
}

fn to_pretty_json<T: serde::Serialize>(value: &T) -> LedgerResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| LedgerError::Io {
        reason: format!("failed to render JSON: {}", e),
    })
}
