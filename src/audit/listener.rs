//! Entity lifecycle hooks producing audit records.

use super::record::{AuditAction, AuditRecord};
use crate::error::AuditError;
use chrono::Utc;
use std::fmt::Debug;
use std::sync::Arc;
use tracing::warn;

const UNDEFINED: &str = "undefined";

/// Implemented by entities whose lifecycle is audited.
pub trait Auditable: Debug {
    /// Entity name recorded in the trail. Defaults to the type's short name.
    fn entity_name(&self) -> String {
        let full = std::any::type_name::<Self>();
        full.rsplit("::").next().unwrap_or(full).to_string()
    }

    /// Identifier recorded in the trail. `None` (e.g. an id not yet
    /// assigned) is recorded as `"undefined"`.
    fn entity_id(&self) -> Option<String>;

    /// Value snapshot stored when the listener is configured to save
    /// values. Defaults to the `Debug` rendering.
    fn snapshot(&self) -> String {
        format!("{self:?}")
    }
}

/// Destination for audit records.
///
/// Persistence is outside this crate; implement this over whatever storage
/// the application uses.
pub trait AuditStore: Send + Sync {
    /// Persist one record.
    ///
    /// # Errors
    ///
    /// Implementations report storage failures as [`AuditError::Save`]; the
    /// listener logs them and continues.
    fn save(&self, record: AuditRecord) -> Result<(), AuditError>;
}

/// Resolver for the acting user at record time.
pub trait CurrentUser: Send + Sync {
    /// Name of the current user, if one is known.
    fn current_user(&self) -> Option<String>;
}

/// Builds and persists audit records on entity lifecycle events.
///
/// Collaborators are supplied at construction. A store failure is logged as
/// a warning and never propagates into the entity operation that triggered
/// it.
///
/// # Examples
///
/// ```rust
/// use crosscut::audit::{AuditListener, AuditRecord, AuditStore, Auditable, CurrentUser};
/// use crosscut::error::AuditError;
/// use std::sync::{Arc, Mutex};
///
/// #[derive(Debug)]
/// struct Account {
///     id: Option<u64>,
/// }
///
/// impl Auditable for Account {
///     fn entity_id(&self) -> Option<String> {
///         self.id.map(|id| id.to_string())
///     }
/// }
///
/// struct MemoryStore(Mutex<Vec<AuditRecord>>);
///
/// impl AuditStore for MemoryStore {
///     fn save(&self, record: AuditRecord) -> Result<(), AuditError> {
///         self.0.lock().unwrap().push(record);
///         Ok(())
///     }
/// }
///
/// struct NoUser;
///
/// impl CurrentUser for NoUser {
///     fn current_user(&self) -> Option<String> {
///         None
///     }
/// }
///
/// let store = Arc::new(MemoryStore(Mutex::new(Vec::new())));
/// let listener = AuditListener::new(store.clone(), Arc::new(NoUser));
/// listener.entity_created(&Account { id: Some(7) });
/// assert_eq!(store.0.lock().unwrap().len(), 1);
/// ```
pub struct AuditListener {
    store: Arc<dyn AuditStore>,
    users: Arc<dyn CurrentUser>,
    save_value: bool,
}

impl AuditListener {
    /// Create a listener persisting to `store`, resolving users via `users`.
    ///
    /// Value snapshots are off by default; enable them with
    /// [`with_saved_values`](Self::with_saved_values).
    pub fn new(store: Arc<dyn AuditStore>, users: Arc<dyn CurrentUser>) -> Self {
        Self {
            store,
            users,
            save_value: false,
        }
    }

    /// Also capture the entity snapshot on create and update records.
    pub fn with_saved_values(mut self) -> Self {
        self.save_value = true;
        self
    }

    /// Record that `entity` was created.
    pub fn entity_created(&self, entity: &dyn Auditable) {
        self.record(entity, AuditAction::Create);
    }

    /// Record that `entity` was updated.
    pub fn entity_updated(&self, entity: &dyn Auditable) {
        self.record(entity, AuditAction::Update);
    }

    /// Record that `entity` was removed. Never captures a snapshot.
    pub fn entity_removed(&self, entity: &dyn Auditable) {
        self.record(entity, AuditAction::Remove);
    }

    fn record(&self, entity: &dyn Auditable, action: AuditAction) {
        let updated_value = (self.save_value && action != AuditAction::Remove)
            .then(|| entity.snapshot());
        let record = AuditRecord {
            action,
            user_name: self
                .users
                .current_user()
                .unwrap_or_else(|| UNDEFINED.to_string()),
            date: Utc::now(),
            entity_name: entity.entity_name(),
            entity_id: entity.entity_id().unwrap_or_else(|| UNDEFINED.to_string()),
            updated_value,
        };
        if let Err(err) = self.store.save(record) {
            warn!(error = %err, "failed to persist audit record");
        }
    }
}
