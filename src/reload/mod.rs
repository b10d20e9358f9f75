//! Live properties reload.
//!
//! Coordinates filesystem change notification, background polling, and a
//! safe field-update protocol so that edits to tracked properties files show
//! up in running objects without a restart:
//!
//! 1. [`SourceRegistry`] records which backing files feed the running
//!    configuration, by explicit declaration or by scanning
//!    `…[file:<path>]` property-source descriptors.
//! 2. One [`FileWatcher`] per tracked file drains the directory's queued OS
//!    events on a fixed poll interval and reports changes to the watched
//!    path, coalesced to at most one callback per poll.
//! 3. [`ReloadCoordinator`] resolves the changed path back to its source,
//!    re-reads it ([`read_properties`]), and hands the parsed
//!    [`PropertySet`] to the [`FieldUpdater`].
//! 4. The updater walks the shared [`ObservableSet`], locking one object at
//!    a time, applying the bindings whose keys are present, and firing each
//!    object's on-update hook.
//!
//! Every per-cycle failure degrades to "skip this cycle, log a warning";
//! the application keeps serving with its last-known values and the
//! background tasks keep running.

pub mod reader;
pub mod registry;
pub mod sources;
pub mod updater;

#[cfg(feature = "file-watch")]
pub mod coordinator;
#[cfg(feature = "file-watch")]
pub mod watcher;

pub use reader::{PropertySet, parse_properties, read_properties};
pub use registry::{HookError, Observable, ObservableSet};
pub use sources::{SourceRegistry, TrackedSource};
pub use updater::FieldUpdater;

#[cfg(feature = "file-watch")]
pub use coordinator::ReloadCoordinator;
#[cfg(feature = "file-watch")]
pub use watcher::{DEFAULT_POLL_INTERVAL, FileWatcher};
