//! The audit recorder: typed entry points for logging events.
//!
//! Callers in the surrounding application (document editor, search, login)
//! describe what happened; the recorder builds the `AuditEvent` and hands it
//! to `Ledger::add_block`.  It adds no checks beyond `AuditEvent::validate`.

use lrac_contracts::{Actor, AuditEvent, AuditEventType, Block, LedgerResult, Metadata};

use crate::ledger::Ledger;

pub struct AuditRecorder<'a> {
    ledger: &'a Ledger,
}

impl<'a> AuditRecorder<'a> {
    pub fn new(ledger: &'a Ledger) -> Self {
        Self { ledger }
    }

    /// Record an event about a specific document.
    pub fn record_document_event(
        &self,
        event_type: AuditEventType,
        document_id: &str,
        document_name: &str,
        actor: &Actor,
        details: Option<&str>,
        metadata: Option<Metadata>,
    ) -> LedgerResult<Block> {
        let event = AuditEvent::document(event_type, document_id, document_name, actor);
        self.ledger.add_block(decorate(event, details, metadata))
    }

    /// Record an event with no document reference, such as a login.
    pub fn record_system_event(
        &self,
        event_type: AuditEventType,
        actor: &Actor,
        details: Option<&str>,
        metadata: Option<Metadata>,
    ) -> LedgerResult<Block> {
        let event = AuditEvent::system(event_type, actor);
        self.ledger.add_block(decorate(event, details, metadata))
    }
}

fn decorate(mut event: AuditEvent, details: Option<&str>, metadata: Option<Metadata>) -> AuditEvent {
    event.details = details.map(str::to_string);
    event.metadata = metadata;
    event
}
