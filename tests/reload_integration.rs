//! End-to-end reload tests exercising the full watcher → reader → updater
//! pipeline against real files.

use crosscut::prelude::*;
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

const POLL: Duration = Duration::from_millis(100);
// Long enough for the OS event to be queued and drained by at least one poll.
const SETTLE: Duration = Duration::from_millis(600);

#[derive(Default)]
struct TestBean {
    property: String,
    other: String,
    hook_count: usize,
}

fn wire(path: &Path, bean: &Arc<Mutex<TestBean>>) -> ReloadCoordinator {
    let mut sources = SourceRegistry::new();
    sources.register_file(path);

    let observables = ObservableSet::new();
    observables
        .register(
            Observable::new("test-bean", bean)
                .bind("${test.property}", |b: &mut TestBean, v| {
                    b.property = v.to_string()
                })
                .bind("${test.other}", |b: &mut TestBean, v| {
                    b.other = v.to_string()
                })
                .on_update(|b: &mut TestBean| {
                    b.hook_count += 1;
                    Ok(())
                }),
        )
        .unwrap();

    let mut coordinator = ReloadCoordinator::with_poll_interval(sources, POLL);
    coordinator.set_observables(&observables);
    coordinator.init();
    coordinator
}

#[tokio::test]
async fn round_trip_updates_the_bound_field_and_fires_the_hook() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("app.properties");
    fs::write(&path, "test.property=old\n").unwrap();

    let bean = Arc::new(Mutex::new(TestBean {
        property: "old".into(),
        ..TestBean::default()
    }));
    let mut coordinator = wire(&path, &bean);

    fs::write(&path, "test.property=new\n").unwrap();
    sleep(SETTLE).await;

    {
        let b = bean.lock().unwrap();
        assert_eq!(b.property, "new");
        assert_eq!(b.hook_count, 1);
    }

    // No further file change: no event, no update call, no hook increment.
    sleep(SETTLE).await;
    assert_eq!(bean.lock().unwrap().hook_count, 1);

    coordinator.tear_down().await;
}

#[tokio::test]
async fn partial_update_leaves_unmentioned_keys_untouched() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("app.properties");
    fs::write(&path, "test.property=one\ntest.other=two\n").unwrap();

    let bean = Arc::new(Mutex::new(TestBean {
        property: "one".into(),
        other: "two".into(),
        ..TestBean::default()
    }));
    let mut coordinator = wire(&path, &bean);

    // The rewritten file drops `test.other` entirely.
    fs::write(&path, "test.property=changed\n").unwrap();
    sleep(SETTLE).await;

    {
        let b = bean.lock().unwrap();
        assert_eq!(b.property, "changed");
        assert_eq!(b.other, "two");
    }

    coordinator.tear_down().await;
}

#[tokio::test]
async fn unregistered_objects_are_isolated_from_reloads() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("app.properties");
    fs::write(&path, "test.property=old\n").unwrap();

    let registered = Arc::new(Mutex::new(TestBean::default()));
    let bystander = Arc::new(Mutex::new(TestBean::default()));
    let mut coordinator = wire(&path, &registered);

    fs::write(&path, "test.property=new\n").unwrap();
    sleep(SETTLE).await;

    assert_eq!(registered.lock().unwrap().property, "new");
    {
        let b = bystander.lock().unwrap();
        assert_eq!(b.property, "");
        assert_eq!(b.hook_count, 0);
    }

    coordinator.tear_down().await;
}

#[tokio::test]
async fn tear_down_after_tear_down_neither_throws_nor_hangs() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("app.properties");
    fs::write(&path, "test.property=old\n").unwrap();

    let bean = Arc::new(Mutex::new(TestBean::default()));
    let mut coordinator = wire(&path, &bean);

    let start = std::time::Instant::now();
    coordinator.tear_down().await;
    coordinator.tear_down().await;
    assert!(start.elapsed() < Duration::from_secs(3));
}

#[tokio::test]
async fn descriptor_scanned_source_round_trips() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("app.properties");
    fs::write(&path, "test.property=old\n").unwrap();

    let mut sources = SourceRegistry::new();
    sources.scan_descriptors([
        "systemEnvironment".to_string(),
        format!("properties [file:{}]", path.display()),
    ]);
    assert_eq!(sources.len(), 1);

    let bean = Arc::new(Mutex::new(TestBean::default()));
    let observables = ObservableSet::new();
    observables
        .register(Observable::new("test-bean", &bean).bind(
            "${test.property}",
            |b: &mut TestBean, v| b.property = v.to_string(),
        ))
        .unwrap();

    let mut coordinator = ReloadCoordinator::with_poll_interval(sources, POLL);
    coordinator.set_observables(&observables);
    coordinator.init();
    assert_eq!(coordinator.watcher_count(), 1);

    fs::write(&path, "test.property=new\n").unwrap();
    sleep(SETTLE).await;
    assert_eq!(bean.lock().unwrap().property, "new");

    coordinator.tear_down().await;
}
