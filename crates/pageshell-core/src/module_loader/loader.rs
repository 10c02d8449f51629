use std::fmt;
use std::rc::Rc;

use futures::future::{FutureExt, LocalBoxFuture, Shared};

use crate::host::Spawner;
use crate::module_loader::ModuleSource;

/// Final result of a load attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleOutcome {
    /// The module loaded and initialized itself
    Loaded,
    /// Loading failed; the reason has already been logged
    Failed { reason: String },
}

impl ModuleOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self, ModuleOutcome::Loaded)
    }
}

/// Observable state of a [`ModuleHandle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleState {
    /// The load task has not finished yet
    Loading,
    /// Terminal: loaded
    Loaded,
    /// Terminal: failed with the given reason
    Failed(String),
}

/// Handle to one load attempt.
///
/// Resolves exactly once and is never retried. Cloning shares the same attempt.
#[derive(Clone)]
pub struct ModuleHandle {
    path: String,
    outcome: Shared<LocalBoxFuture<'static, ModuleOutcome>>,
}

impl fmt::Debug for ModuleHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleHandle")
         .field("path", &self.path)
         .field("state", &self.state())
         .finish()
    }
}

impl ModuleHandle {
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Current state without waiting.
    pub fn state(&self) -> ModuleState {
        match self.outcome.peek() {
            None => ModuleState::Loading,
            Some(ModuleOutcome::Loaded) => ModuleState::Loaded,
            Some(ModuleOutcome::Failed { reason }) => ModuleState::Failed(reason.clone()),
        }
    }

    pub fn is_settled(&self) -> bool {
        self.outcome.peek().is_some()
    }

    /// Wait for the outcome. Never fails; failures come back as [`ModuleOutcome::Failed`].
    pub async fn wait(&self) -> ModuleOutcome {
        self.outcome.clone().await
    }
}

/// Starts fire-and-forget module loads.
#[derive(Clone)]
pub struct ModuleLoader {
    source: Rc<dyn ModuleSource>,
}

impl fmt::Debug for ModuleLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleLoader")
         .field("source", &self.source.name())
         .finish()
    }
}

impl ModuleLoader {
    pub fn new(source: Rc<dyn ModuleSource>) -> Self {
        Self { source }
    }

    /// Spawn a load of the module at `path` and return immediately.
    ///
    /// The spawned task drives the load to completion even if the returned
    /// handle is dropped. Failures are logged here and otherwise swallowed.
    pub fn load(&self, path: impl Into<String>, spawner: &dyn Spawner) -> ModuleHandle {
        let path = path.into();
        let source = self.source.clone();
        let task_path = path.clone();
        log::info!("Loading module '{}' via {}", path, source.name());

        let outcome = async move {
            match source.load_and_init(&task_path).await {
                Ok(()) => {
                    log::info!("Module '{}' loaded", task_path);
                    ModuleOutcome::Loaded
                }
                Err(e) => {
                    log::error!("Failed to load module '{}': {}", task_path, e);
                    ModuleOutcome::Failed { reason: e.to_string() }
                }
            }
        }
        .boxed_local()
        .shared();

        spawner.spawn_local(outcome.clone().map(|_| ()).boxed_local());

        ModuleHandle { path, outcome }
    }
}
