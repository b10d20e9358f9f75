//! Fan-out of property updates to registered objects.

use crate::reload::reader::PropertySet;
use crate::reload::registry::ObservableSet;
use tracing::debug;

/// Applies new property values to every registered observable.
///
/// Each update locks one object at a time, applies the bindings whose keys
/// are present in the property set (bindings with absent keys are left
/// untouched; partial updates are the norm, not an error), then invokes the
/// object's on-update hook if it declared one. A hook failure is logged per
/// object and does not prevent the remaining objects from updating.
pub struct FieldUpdater {
    observables: ObservableSet,
}

impl FieldUpdater {
    /// Create an updater fanning out to `observables`.
    ///
    /// The set is read lazily on every update, so objects registered after
    /// construction are still picked up.
    pub fn new(observables: ObservableSet) -> Self {
        Self { observables }
    }

    /// Apply `props` to every registered object.
    ///
    /// A no-op when the set is empty.
    pub fn update(&self, props: &PropertySet) {
        let entries = self.observables.snapshot();
        debug!(
            objects = entries.len(),
            properties = props.len(),
            "applying property update"
        );
        for entry in entries {
            entry.apply(props);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reload::registry::Observable;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct Settings {
        greeting: String,
        farewell: String,
        updates_seen: usize,
    }

    fn props(pairs: &[(&str, &str)]) -> PropertySet {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn register_settings(set: &ObservableSet, settings: &Arc<Mutex<Settings>>) {
        set.register(
            Observable::new("settings", settings)
                .bind("${app.greeting}", |s: &mut Settings, v| {
                    s.greeting = v.to_string()
                })
                .bind("${app.farewell}", |s: &mut Settings, v| {
                    s.farewell = v.to_string()
                })
                .on_update(|s: &mut Settings| {
                    s.updates_seen += 1;
                    Ok(())
                }),
        )
        .unwrap();
    }

    #[test]
    fn applies_matching_bindings() {
        let settings = Arc::new(Mutex::new(Settings::default()));
        let set = ObservableSet::new();
        register_settings(&set, &settings);

        let updater = FieldUpdater::new(set);
        updater.update(&props(&[("app.greeting", "hello"), ("app.farewell", "bye")]));

        let s = settings.lock().unwrap();
        assert_eq!(s.greeting, "hello");
        assert_eq!(s.farewell, "bye");
    }

    #[test]
    fn absent_keys_leave_fields_untouched() {
        let settings = Arc::new(Mutex::new(Settings {
            greeting: "hello".into(),
            farewell: "bye".into(),
            updates_seen: 0,
        }));
        let set = ObservableSet::new();
        register_settings(&set, &settings);

        let updater = FieldUpdater::new(set);
        updater.update(&props(&[("app.greeting", "hi")]));

        let s = settings.lock().unwrap();
        assert_eq!(s.greeting, "hi");
        assert_eq!(s.farewell, "bye");
    }

    #[test]
    fn hook_fires_once_per_update_call() {
        let settings = Arc::new(Mutex::new(Settings::default()));
        let set = ObservableSet::new();
        register_settings(&set, &settings);

        let updater = FieldUpdater::new(set);
        updater.update(&props(&[("app.greeting", "hello")]));
        updater.update(&props(&[("app.greeting", "hello again")]));

        assert_eq!(settings.lock().unwrap().updates_seen, 2);
    }

    #[test]
    fn object_without_hook_is_updated_silently() {
        let settings = Arc::new(Mutex::new(Settings::default()));
        let set = ObservableSet::new();
        set.register(Observable::new("settings", &settings).bind(
            "${app.greeting}",
            |s: &mut Settings, v| s.greeting = v.to_string(),
        ))
        .unwrap();

        let updater = FieldUpdater::new(set);
        updater.update(&props(&[("app.greeting", "hello")]));

        let s = settings.lock().unwrap();
        assert_eq!(s.greeting, "hello");
        assert_eq!(s.updates_seen, 0);
    }

    #[test]
    fn unregistered_objects_are_never_mutated() {
        let registered = Arc::new(Mutex::new(Settings::default()));
        let bystander = Arc::new(Mutex::new(Settings::default()));
        let set = ObservableSet::new();
        register_settings(&set, &registered);

        let updater = FieldUpdater::new(set);
        updater.update(&props(&[("app.greeting", "hello")]));

        assert_eq!(registered.lock().unwrap().greeting, "hello");
        let b = bystander.lock().unwrap();
        assert_eq!(b.greeting, "");
        assert_eq!(b.updates_seen, 0);
    }

    #[test]
    fn hook_failure_does_not_block_other_objects() {
        let failing = Arc::new(Mutex::new(Settings::default()));
        let healthy = Arc::new(Mutex::new(Settings::default()));
        let set = ObservableSet::new();
        set.register(
            Observable::new("failing", &failing)
                .bind("${app.greeting}", |s: &mut Settings, v| {
                    s.greeting = v.to_string()
                })
                .on_update(|_s: &mut Settings| Err("refresh blew up".into())),
        )
        .unwrap();
        register_settings(&set, &healthy);

        let updater = FieldUpdater::new(set);
        updater.update(&props(&[("app.greeting", "hello")]));

        assert_eq!(failing.lock().unwrap().greeting, "hello");
        let h = healthy.lock().unwrap();
        assert_eq!(h.greeting, "hello");
        assert_eq!(h.updates_seen, 1);
    }

    #[test]
    fn empty_set_is_a_no_op() {
        let updater = FieldUpdater::new(ObservableSet::new());
        updater.update(&props(&[("app.greeting", "hello")]));
    }

    #[test]
    fn late_registration_is_visible_through_the_shared_set() {
        let set = ObservableSet::new();
        let updater = FieldUpdater::new(set.clone());

        let settings = Arc::new(Mutex::new(Settings::default()));
        register_settings(&set, &settings);

        updater.update(&props(&[("app.greeting", "hello")]));
        assert_eq!(settings.lock().unwrap().greeting, "hello");
    }
}
