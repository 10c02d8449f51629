//! # pageshell Host Event Loop
//!
//! The shell runs on a single thread. Asynchronous work (the module load) is
//! handed to whichever local executor the host provides through [`Spawner`].
use std::fmt;

use futures::executor::LocalSpawner;
use futures::future::LocalBoxFuture;
use futures::task::LocalSpawnExt;

/// Spawns `!Send` tasks onto the host's single-threaded event loop.
pub trait Spawner {
    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>);
}

/// Spawner backed by a `futures::executor::LocalPool`.
///
/// Tasks only make progress while the owning pool is being run.
#[derive(Clone)]
pub struct LocalPoolSpawner {
    spawner: LocalSpawner,
}

impl fmt::Debug for LocalPoolSpawner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalPoolSpawner").finish_non_exhaustive()
    }
}

impl LocalPoolSpawner {
    pub fn new(spawner: LocalSpawner) -> Self {
        Self { spawner }
    }
}

impl Spawner for LocalPoolSpawner {
    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>) {
        if let Err(e) = self.spawner.spawn_local(task) {
            log::error!("Failed to spawn local task: {}", e);
        }
    }
}

/// Spawner for a tokio `LocalSet`.
///
/// Must be used from inside `LocalSet::run_until` (or a task spawned on it).
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSpawner;

impl Spawner for TokioSpawner {
    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>) {
        tokio::task::spawn_local(task);
    }
}

/// Spawner for the browser microtask queue.
#[cfg(all(feature = "web", target_arch = "wasm32"))]
#[derive(Debug, Clone, Copy, Default)]
pub struct WebSpawner;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
impl Spawner for WebSpawner {
    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>) {
        wasm_bindgen_futures::spawn_local(task);
    }
}
