//! Audit event payloads.
//!
//! An `AuditEvent` describes one logged occurrence and becomes the `data`
//! field of a mined `Block`.  Document lifecycle events carry a document
//! reference; system events do not.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};

/// Open key/value context attached to an event.
///
/// A `BTreeMap` keeps keys sorted, so the JSON fed into the structural hash
/// is identical every time the same event is serialized.
pub type Metadata = BTreeMap<String, serde_json::Value>;

/// The closed set of events the ledger records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditEventType {
    DocumentCreated,
    DocumentEdited,
    DocumentReviewed,
    DocumentSigned,
    DocumentFinalized,
    DocumentExported,
    DocumentVerified,
    DocumentModified,
    UserLogin,
    SearchPerformed,
    SystemBackup,
}

impl AuditEventType {
    /// True for the document lifecycle variants.
    pub fn is_document_event(self) -> bool {
        matches!(
            self,
            Self::DocumentCreated
                | Self::DocumentEdited
                | Self::DocumentReviewed
                | Self::DocumentSigned
                | Self::DocumentFinalized
                | Self::DocumentExported
                | Self::DocumentVerified
                | Self::DocumentModified
        )
    }

    /// The wire name, e.g. `"DOCUMENT_CREATED"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DocumentCreated => "DOCUMENT_CREATED",
            Self::DocumentEdited => "DOCUMENT_EDITED",
            Self::DocumentReviewed => "DOCUMENT_REVIEWED",
            Self::DocumentSigned => "DOCUMENT_SIGNED",
            Self::DocumentFinalized => "DOCUMENT_FINALIZED",
            Self::DocumentExported => "DOCUMENT_EXPORTED",
            Self::DocumentVerified => "DOCUMENT_VERIFIED",
            Self::DocumentModified => "DOCUMENT_MODIFIED",
            Self::UserLogin => "USER_LOGIN",
            Self::SearchPerformed => "SEARCH_PERFORMED",
            Self::SystemBackup => "SYSTEM_BACKUP",
        }
    }
}

impl std::fmt::Display for AuditEventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// The identity of whoever triggered an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    pub user_id: String,
    pub user_email: String,
}

impl Actor {
    pub fn new(user_id: impl Into<String>, user_email: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            user_email: user_email.into(),
        }
    }
}

/// One logged occurrence, stored as a block's payload.
///
/// Optional fields are omitted from the JSON form when absent, which keeps
/// system events free of empty document keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEvent {
    #[serde(rename = "type")]
    pub event_type: AuditEventType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_name: Option<String>,

    pub user_id: String,

    pub user_email: String,

    /// Free-text description shown in audit trails.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl AuditEvent {
    /// A document-scoped event.
    pub fn document(
        event_type: AuditEventType,
        document_id: impl Into<String>,
        document_name: impl Into<String>,
        actor: &Actor,
    ) -> Self {
        Self {
            event_type,
            document_id: Some(document_id.into()),
            document_name: Some(document_name.into()),
            user_id: actor.user_id.clone(),
            user_email: actor.user_email.clone(),
            details: None,
            metadata: None,
        }
    }

    /// A system event with no document reference.
    pub fn system(event_type: AuditEventType, actor: &Actor) -> Self {
        Self {
            event_type,
            document_id: None,
            document_name: None,
            user_id: actor.user_id.clone(),
            user_email: actor.user_email.clone(),
            details: None,
            metadata: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Check the fields every event must carry.
    ///
    /// Returns `LedgerError::InvalidEvent` when `user_id` or `user_email` is
    /// blank, or when a `document_id` is present but blank.
    pub fn validate(&self) -> LedgerResult<()> {
        if self.user_id.trim().is_empty() {
            return Err(LedgerError::InvalidEvent {
                reason: format!("{} event has an empty user_id", self.event_type),
            });
        }
        if self.user_email.trim().is_empty() {
            return Err(LedgerError::InvalidEvent {
                reason: format!("{} event has an empty user_email", self.event_type),
            });
        }
        if let Some(document_id) = &self.document_id {
            if document_id.trim().is_empty() {
                return Err(LedgerError::InvalidEvent {
                    reason: format!("{} event has an empty document_id", self.event_type),
                });
            }
        }
        Ok(())
    }
}
