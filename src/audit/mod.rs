//! Entity audit trail.
//!
//! Lifecycle hooks that build an [`AuditRecord`] for every entity create,
//! update, and remove, and hand it to an abstract [`AuditStore`]. The acting
//! user is resolved through an abstract [`CurrentUser`] provider. All
//! collaborators are injected at construction; there is no global listener
//! state.

mod listener;
mod record;

pub use listener::{AuditListener, AuditStore, Auditable, CurrentUser};
pub use record::{AuditAction, AuditRecord};
