//! Orchestration of the reload lifecycle.

use crate::reload::reader::read_properties;
use crate::reload::registry::ObservableSet;
use crate::reload::sources::{SourceRegistry, TrackedSource};
use crate::reload::updater::FieldUpdater;
use crate::reload::watcher::{DEFAULT_POLL_INTERVAL, FileWatcher};
use arc_swap::ArcSwapOption;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Orchestrates the full reload lifecycle: one watcher per tracked source,
/// change callbacks resolved back to their source, file re-read, and fan-out
/// through the [`FieldUpdater`].
///
/// Reload failures never surface past this type: a source whose watch cannot
/// be established is skipped with a warning, and a file that cannot be
/// re-read leaves the previous in-memory values in place.
///
/// # Examples
///
/// ```rust,no_run
/// use crosscut::reload::{Observable, ObservableSet, ReloadCoordinator, SourceRegistry};
/// use std::sync::{Arc, Mutex};
///
/// struct Greeter {
///     greeting: String,
/// }
///
/// # async fn example() {
/// let mut sources = SourceRegistry::new();
/// sources.register_file("/etc/app/app.properties");
///
/// let greeter = Arc::new(Mutex::new(Greeter { greeting: "hello".into() }));
/// let observables = ObservableSet::new();
/// observables
///     .register(Observable::new("greeter", &greeter).bind(
///         "${app.greeting}",
///         |g: &mut Greeter, v| g.greeting = v.to_string(),
///     ))
///     .unwrap();
///
/// let mut coordinator = ReloadCoordinator::new(sources);
/// coordinator.set_observables(&observables);
/// coordinator.init();
///
/// // … application runs; edits to app.properties now update the greeter …
///
/// coordinator.tear_down().await;
/// # }
/// ```
pub struct ReloadCoordinator {
    inner: Arc<Inner>,
    poll_interval: Duration,
    watchers: Vec<FileWatcher>,
}

struct Inner {
    sources: Vec<TrackedSource>,
    updater: ArcSwapOption<FieldUpdater>,
}

impl ReloadCoordinator {
    /// Create a coordinator over the registry's tracked sources, polling at
    /// the default interval.
    pub fn new(sources: SourceRegistry) -> Self {
        Self::with_poll_interval(sources, DEFAULT_POLL_INTERVAL)
    }

    /// Create a coordinator with a custom watcher poll interval.
    pub fn with_poll_interval(sources: SourceRegistry, poll_interval: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                sources: sources.sources().to_vec(),
                updater: ArcSwapOption::empty(),
            }),
            poll_interval,
            watchers: Vec::new(),
        }
    }

    /// Register how property updates are fanned out.
    ///
    /// May be called before or after [`init`](Self::init); change events
    /// arriving before the observable set is supplied are silent no-ops.
    /// The set is shared, so observables registered after this call are
    /// still picked up by later updates.
    pub fn set_observables(&self, observables: &ObservableSet) {
        self.inner
            .updater
            .store(Some(Arc::new(FieldUpdater::new(observables.clone()))));
    }

    /// Start one watcher per tracked source.
    ///
    /// Must be called from within a tokio runtime. A source whose watch
    /// cannot be established is logged as a warning and skipped; the
    /// remaining sources still get working watchers, and the application
    /// starts either way, degraded to "no hot reload" for the failed
    /// sources.
    pub fn init(&mut self) {
        let paths: Vec<_> = self
            .inner
            .sources
            .iter()
            .map(|s| s.path().to_path_buf())
            .collect();
        for path in paths {
            let inner = Arc::clone(&self.inner);
            match FileWatcher::with_interval(
                &path,
                move |changed: &Path| inner.on_change(changed),
                self.poll_interval,
            ) {
                Ok(watcher) => self.watchers.push(watcher),
                Err(err) => warn!(
                    path = %path.display(),
                    error = %err,
                    "cannot watch properties source; live reload disabled for it"
                ),
            }
        }
        debug!(
            watchers = self.watchers.len(),
            sources = self.inner.sources.len(),
            "reload coordinator initialized"
        );
    }

    /// Number of active watchers.
    pub fn watcher_count(&self) -> usize {
        self.watchers.len()
    }

    /// Close every watcher and release their background tasks.
    ///
    /// Idempotent: calling it again after the watchers are already closed is
    /// a no-op. Individual close failures are bounded and swallowed inside
    /// [`FileWatcher::close`], so one watcher cannot block the rest.
    pub async fn tear_down(&mut self) {
        for watcher in self.watchers.drain(..) {
            watcher.close().await;
        }
    }
}

impl Inner {
    fn on_change(&self, changed: &Path) {
        let Some(source) = self.sources.iter().find(|s| s.path() == changed) else {
            return;
        };
        match read_properties(source.path()) {
            Ok(props) => match self.updater.load_full() {
                Some(updater) => updater.update(&props),
                None => debug!(
                    path = %source.path().display(),
                    "properties changed before observables were registered; skipping"
                ),
            },
            Err(err) => warn!(
                path = %source.path().display(),
                error = %err,
                "cannot reload properties; keeping previous values"
            ),
        }
    }
}
