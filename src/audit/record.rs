//! Audit trail records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What happened to the entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    /// The entity was persisted for the first time.
    Create,
    /// An existing entity was modified.
    Update,
    /// The entity was deleted.
    Remove,
}

/// One audit trail entry, built by the [`AuditListener`](super::AuditListener)
/// and handed to the backing [`AuditStore`](super::AuditStore).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    /// The lifecycle event being recorded.
    pub action: AuditAction,
    /// Acting user, or `"undefined"` when none could be resolved.
    pub user_name: String,
    /// When the event was recorded.
    pub date: DateTime<Utc>,
    /// Short name of the entity type.
    pub entity_name: String,
    /// Entity identifier, or `"undefined"` when the entity has none yet.
    pub entity_id: String,
    /// Snapshot of the entity value, captured only when the listener is
    /// configured to save values (and never on remove).
    pub updated_value: Option<String>,
}
