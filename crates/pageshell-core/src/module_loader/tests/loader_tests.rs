use std::rc::Rc;

use futures::executor::LocalPool;

use crate::host::LocalPoolSpawner;
use crate::module_loader::{ModuleLoader, ModuleOutcome, ModuleState};
use crate::tests::common::StubSource;

fn pool() -> (LocalPool, LocalPoolSpawner) {
    let pool = LocalPool::new();
    let spawner = LocalPoolSpawner::new(pool.spawner());
    (pool, spawner)
}

#[test]
fn test_load_returns_before_module_settles() {
    let (mut pool, spawner) = pool();
    let source = Rc::new(StubSource::succeeding());
    let loader = ModuleLoader::new(source.clone());

    let handle = loader.load("pkg/index_bg.wasm", &spawner);
    assert_eq!(handle.path(), "pkg/index_bg.wasm");
    assert_eq!(handle.state(), ModuleState::Loading);
    assert!(!handle.is_settled());

    pool.run_until_stalled();
    assert_eq!(handle.state(), ModuleState::Loaded);
    assert!(handle.is_settled());
    assert_eq!(source.calls(), 1);
}

#[test]
fn test_failure_is_recorded_not_propagated() {
    let (mut pool, spawner) = pool();
    let loader = ModuleLoader::new(Rc::new(StubSource::failing("boom")));

    let handle = loader.load("pkg/index_bg.wasm", &spawner);
    pool.run_until_stalled();

    match handle.state() {
        ModuleState::Failed(reason) => assert!(reason.contains("boom"), "reason was {}", reason),
        other => panic!("expected failure, got {:?}", other),
    }
    let outcome = pool.run_until(handle.wait());
    assert!(!outcome.is_loaded());
}

#[test]
fn test_held_load_stays_loading_until_released() {
    let (mut pool, spawner) = pool();
    let (source, release) = StubSource::succeeding().held();
    let loader = ModuleLoader::new(Rc::new(source));

    let handle = loader.load("pkg/index_bg.wasm", &spawner);
    pool.run_until_stalled();
    assert_eq!(handle.state(), ModuleState::Loading);

    release.send(()).unwrap();
    pool.run_until_stalled();
    assert_eq!(handle.state(), ModuleState::Loaded);
}

#[test]
fn test_load_runs_even_if_handle_dropped() {
    let (mut pool, spawner) = pool();
    let source = Rc::new(StubSource::succeeding());
    let loader = ModuleLoader::new(source.clone());

    drop(loader.load("pkg/index_bg.wasm", &spawner));
    pool.run_until_stalled();
    assert_eq!(source.calls(), 1);
}

#[test]
fn test_clones_share_one_attempt() {
    let (mut pool, spawner) = pool();
    let source = Rc::new(StubSource::succeeding());
    let loader = ModuleLoader::new(source.clone());

    let handle = loader.load("pkg/index_bg.wasm", &spawner);
    let other = handle.clone();
    pool.run_until_stalled();

    assert_eq!(pool.run_until(handle.wait()), ModuleOutcome::Loaded);
    assert_eq!(pool.run_until(other.wait()), ModuleOutcome::Loaded);
    assert_eq!(source.calls(), 1, "settled handles are never retried");
}
