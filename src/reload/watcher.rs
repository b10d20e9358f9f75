//! Background file watching with periodic event polling.

use crate::error::{ReloadError, Result};
use crate::reload::sources::normalize;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher as NotifyWatcher};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::warn;

/// Default pause between polls of the queued directory events.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Bound on how long [`FileWatcher::close`] waits for the poll task to stop.
const CLOSE_GRACE: Duration = Duration::from_secs(1);

/// Watches one file path for create/modify/delete events.
///
/// An OS-level watch is registered on the path's containing directory (the
/// current working directory when the path has no parent); queued events are
/// drained once per poll interval on a dedicated background task, and events
/// resolving to the watched file are coalesced into at most one callback
/// invocation per poll. The first poll runs one full interval after
/// construction.
///
/// # Examples
///
/// ```rust,no_run
/// use crosscut::reload::FileWatcher;
///
/// # fn example() -> crosscut::error::Result<()> {
/// let watcher = FileWatcher::new("/etc/app/app.properties", |path| {
///     println!("{} changed", path.display());
/// })?;
/// # drop(watcher);
/// # Ok(())
/// # }
/// ```
pub struct FileWatcher {
    path: PathBuf,
    dir: PathBuf,
    watcher: RecommendedWatcher,
    task: JoinHandle<()>,
    shutdown: tokio::sync::watch::Sender<bool>,
}

impl FileWatcher {
    /// Watch `path` with the default poll interval.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`ReloadError::WatchSetup`] when the watch on the containing
    /// directory cannot be established. Setup is not retried internally; the
    /// caller decides whether degraded (non-reloading) operation is
    /// acceptable.
    pub fn new(
        path: impl AsRef<Path>,
        on_change: impl Fn(&Path) + Send + 'static,
    ) -> Result<Self> {
        Self::with_interval(path, on_change, DEFAULT_POLL_INTERVAL)
    }

    /// Watch `path`, draining queued events every `poll_interval`.
    ///
    /// # Errors
    ///
    /// Same as [`FileWatcher::new`].
    pub fn with_interval(
        path: impl AsRef<Path>,
        on_change: impl Fn(&Path) + Send + 'static,
        poll_interval: Duration,
    ) -> Result<Self> {
        let path = normalize(path.as_ref());
        let dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        let (event_tx, event_rx) = mpsc::channel::<Event>();
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            if let Ok(event) = res {
                if matches!(
                    event.kind,
                    EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
                ) {
                    let _ = event_tx.send(event);
                }
            }
        })
        .map_err(|e| ReloadError::WatchSetup {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        watcher
            .watch(&dir, RecursiveMode::NonRecursive)
            .map_err(|e| ReloadError::WatchSetup {
                path: path.clone(),
                reason: e.to_string(),
            })?;

        let (shutdown, mut shutdown_rx) = tokio::sync::watch::channel(false);
        let watched = path.clone();
        let task = tokio::spawn(async move {
            let mut tick = time::interval_at(time::Instant::now() + poll_interval, poll_interval);
            tick.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = shutdown_rx.changed() => break,
                    _ = tick.tick() => {
                        if drain_matches(&event_rx, &watched) {
                            // Nothing may escape into the task: a panicking
                            // callback would silently end all future polls.
                            let call = catch_unwind(AssertUnwindSafe(|| on_change(&watched)));
                            if call.is_err() {
                                warn!(
                                    path = %watched.display(),
                                    "change callback panicked; watcher keeps polling"
                                );
                            }
                        }
                    }
                }
            }
        });

        Ok(Self {
            path,
            dir,
            watcher,
            task,
            shutdown,
        })
    }

    /// The absolute, normalized path being watched.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Cancel the directory watch and stop the poll task.
    ///
    /// Waits up to one second for the task to finish; a task that fails to
    /// stop within the bound is aborted and the failure swallowed. The
    /// underlying OS watch handle is released either way.
    pub async fn close(mut self) {
        let _ = self.watcher.unwatch(&self.dir);
        let _ = self.shutdown.send(true);
        if time::timeout(CLOSE_GRACE, &mut self.task).await.is_err() {
            self.task.abort();
        }
    }
}

/// Drain every queued event, reporting whether any resolved to the watched
/// file. Multiple queued events for the same file collapse into that single
/// report.
fn drain_matches(rx: &mpsc::Receiver<Event>, watched: &Path) -> bool {
    let mut matched = false;
    while let Ok(event) = rx.try_recv() {
        if event.paths.iter().any(|p| normalize(p) == watched) {
            matched = true;
        }
    }
    matched
}
