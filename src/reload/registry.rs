//! Opt-in registration of live-reloadable objects.

use crate::error::{ReloadError, Result};
use crate::reload::reader::PropertySet;
use std::sync::{Arc, Mutex, PoisonError, RwLock, Weak};
use tracing::{debug, warn};

/// Error type an on-update hook may fail with.
pub type HookError = Box<dyn std::error::Error + Send + Sync>;

type Setter<T> = Box<dyn Fn(&mut T, &str) + Send + Sync>;
type Hook<T> = Box<dyn Fn(&mut T) -> std::result::Result<(), HookError> + Send + Sync>;

struct Binding<T> {
    key: String,
    set: Setter<T>,
}

/// Declaration of one live-reloadable object: its property bindings and an
/// optional on-update hook.
///
/// Built explicitly and handed to [`ObservableSet::register`]; the set keeps
/// only a weak reference to the target, never extending its lifetime.
///
/// # Examples
///
/// ```rust
/// use crosscut::reload::{Observable, ObservableSet};
/// use std::sync::{Arc, Mutex};
///
/// struct Mailer {
///     host: String,
/// }
///
/// let mailer = Arc::new(Mutex::new(Mailer { host: "localhost".into() }));
///
/// let set = ObservableSet::new();
/// set.register(
///     Observable::new("mailer", &mailer)
///         .bind("${mail.host}", |m: &mut Mailer, v| m.host = v.to_string()),
/// )
/// .unwrap();
/// ```
pub struct Observable<T> {
    name: String,
    target: Weak<Mutex<T>>,
    bindings: Vec<Binding<T>>,
    hook: Option<Hook<T>>,
    duplicate_hook: bool,
}

impl<T: Send + 'static> Observable<T> {
    /// Start describing `target`, identified by `name` in log output.
    pub fn new(name: impl Into<String>, target: &Arc<Mutex<T>>) -> Self {
        Self {
            name: name.into(),
            target: Arc::downgrade(target),
            bindings: Vec::new(),
            hook: None,
            duplicate_hook: false,
        }
    }

    /// Bind a `${property.name}` placeholder to a field setter.
    ///
    /// The property key is extracted from the placeholder exactly once,
    /// here; it never changes for the life of the binding. A string without
    /// the `${…}` wrapper is accepted as the bare key. Values are applied as
    /// strings with no coercion.
    pub fn bind(
        mut self,
        placeholder: &str,
        set: impl Fn(&mut T, &str) + Send + Sync + 'static,
    ) -> Self {
        let key = extract_key(placeholder).unwrap_or(placeholder).to_string();
        self.bindings.push(Binding {
            key,
            set: Box::new(set),
        });
        self
    }

    /// Declare the hook invoked after each property update applied to this
    /// object.
    ///
    /// At most one hook is honored; declaring a second is a configuration
    /// error surfaced by [`ObservableSet::register`].
    pub fn on_update(
        mut self,
        hook: impl Fn(&mut T) -> std::result::Result<(), HookError> + Send + Sync + 'static,
    ) -> Self {
        if self.hook.is_some() {
            self.duplicate_hook = true;
        } else {
            self.hook = Some(Box::new(hook));
        }
        self
    }
}

/// Extract `property.name` from `${property.name}`.
fn extract_key(placeholder: &str) -> Option<&str> {
    placeholder.strip_prefix("${")?.strip_suffix('}')
}

/// Type-erased registered observable.
pub(crate) trait AnyObservable: Send + Sync {
    /// Lock the target, apply every binding whose key is present in `props`,
    /// then fire the hook. Per-object failures are logged, never propagated.
    fn apply(&self, props: &PropertySet);
}

struct Registered<T> {
    name: String,
    target: Weak<Mutex<T>>,
    bindings: Vec<Binding<T>>,
    hook: Option<Hook<T>>,
}

impl<T: Send + 'static> AnyObservable for Registered<T> {
    fn apply(&self, props: &PropertySet) {
        let Some(target) = self.target.upgrade() else {
            debug!(observable = %self.name, "target dropped; skipping update");
            return;
        };
        // The per-object lock: serializes near-simultaneous reload triggers
        // against the same object.
        let mut guard = target.lock().unwrap_or_else(PoisonError::into_inner);
        for binding in &self.bindings {
            if let Some(value) = props.get(&binding.key) {
                (binding.set)(&mut guard, value);
            }
        }
        if let Some(hook) = &self.hook {
            if let Err(err) = hook(&mut guard) {
                warn!(observable = %self.name, error = %err, "on-update hook failed");
            }
        }
    }
}

/// Shared set of objects that opted into live reload.
///
/// Cheap to clone; all clones see the same underlying set, so registrations
/// made after the set has been handed to a coordinator are still picked up
/// by later updates. Mutated during the registration phase, read-mostly
/// afterward.
#[derive(Clone, Default)]
pub struct ObservableSet {
    inner: Arc<RwLock<Vec<Arc<dyn AnyObservable>>>>,
}

impl ObservableSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observable.
    ///
    /// # Errors
    ///
    /// Returns [`ReloadError::DuplicateUpdateHook`] when the declaration
    /// carries more than one on-update hook; the set is left unchanged.
    pub fn register<T: Send + 'static>(&self, observable: Observable<T>) -> Result<()> {
        if observable.duplicate_hook {
            return Err(ReloadError::DuplicateUpdateHook {
                name: observable.name,
            });
        }
        let entry: Arc<dyn AnyObservable> = Arc::new(Registered {
            name: observable.name,
            target: observable.target,
            bindings: observable.bindings,
            hook: observable.hook,
        });
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry);
        Ok(())
    }

    /// Number of registered observables.
    pub fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn snapshot(&self) -> Vec<Arc<dyn AnyObservable>> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
