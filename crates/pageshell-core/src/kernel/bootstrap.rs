use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde_json::Value;

use crate::config::ShellConfig;
use crate::dom::DomCapability;
use crate::event::{EventBus, NotificationEvent};
use crate::host::Spawner;
use crate::kernel::constants;
use crate::kernel::error::{BootstrapPhase, Error, Result};
use crate::module_loader::{ModuleHandle, ModuleLoader, ModuleSource};
use crate::readiness::{ReadinessGate, ReadySubscription};
use crate::region::{RegionId, RegionRegistry};

/// State of the UI track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiStage {
    /// Nothing registered yet
    Idle,
    /// Initializer registered, document still loading
    AwaitingReady,
    /// Regions populated and app region subscribed. Terminal.
    Initialized,
    /// Initializer returned an error; whatever it did before failing stays. Terminal.
    Failed(String),
}

impl UiStage {
    pub fn is_terminal(&self) -> bool {
        matches!(self, UiStage::Initialized | UiStage::Failed(_))
    }
}

/// Wires the module loader, readiness gate, regions and event bus together.
///
/// [`start`](Self::start) consumes the bootstrap, so a page can only be
/// bootstrapped once.
pub struct Bootstrap {
    dom: Rc<dyn DomCapability>,
    spawner: Rc<dyn Spawner>,
    loader: ModuleLoader,
    config: ShellConfig,
}

impl fmt::Debug for Bootstrap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bootstrap")
         .field("ready_state", &self.dom.ready_state())
         .field("loader", &self.loader)
         .field("config", &self.config)
         .finish_non_exhaustive()
    }
}

impl Bootstrap {
    pub fn new(
        dom: Rc<dyn DomCapability>,
        spawner: Rc<dyn Spawner>,
        source: Rc<dyn ModuleSource>,
        config: ShellConfig,
    ) -> Self {
        Self {
            dom,
            spawner,
            loader: ModuleLoader::new(source),
            config,
        }
    }

    /// Start both tracks.
    ///
    /// The module load is spawned first and never awaited. The UI initializer
    /// then runs inline if the document is already parsed, or on the first
    /// `DOMContentLoaded` otherwise.
    pub fn start(self) -> Result<Shell> {
        log::info!("Starting {} v{}", constants::APP_NAME, constants::APP_VERSION);

        // Module track
        let module = self.loader.load(self.config.module_path.clone(), self.spawner.as_ref());

        // UI track
        let regions = Rc::new(RegionRegistry::new(self.dom.clone()));
        let bus = EventBus::new(self.dom.clone());
        let stage = Rc::new(RefCell::new(UiStage::Idle));

        let initializer = {
            let regions = regions.clone();
            let bus = bus.clone();
            let stage = stage.clone();
            let config = self.config.clone();
            move || run_initializer(&regions, &bus, &config, &stage)
        };
        *stage.borrow_mut() = UiStage::AwaitingReady;
        let readiness = match ReadinessGate::new(self.dom.clone()).on_ready(initializer) {
            Ok(readiness) => readiness,
            Err(e) => {
                *stage.borrow_mut() = UiStage::Failed(e.to_string());
                return Err(e.into());
            }
        };

        Ok(Shell { module, regions, bus, stage, readiness })
    }
}

fn run_initializer(regions: &RegionRegistry, bus: &EventBus, config: &ShellConfig, stage: &RefCell<UiStage>) {
    if *stage.borrow() != UiStage::AwaitingReady {
        log::warn!("UI initializer invoked in stage {:?}; ignoring", stage.borrow());
        return;
    }
    let next = match initialize_regions(regions, bus, config) {
        Ok(()) => {
            log::info!("{}", constants::PAGE_LOADED_MARKER);
            UiStage::Initialized
        }
        Err(e) => {
            log::error!("UI initialization failed: {}", e);
            UiStage::Failed(e.to_string())
        }
    };
    *stage.borrow_mut() = next;
}

/// Populate every region, then subscribe the app region. One synchronous unit.
fn initialize_regions(regions: &RegionRegistry, bus: &EventBus, config: &ShellConfig) -> Result<()> {
    for id in RegionId::ALL {
        let region = regions
            .resolve(id)
            .map_err(|e| Error::bootstrap(BootstrapPhase::Populate, format!("resolving region '{}'", id), e.into()))?;
        regions
            .insert_after(&region, config.content.for_region(id))
            .map_err(|e| Error::bootstrap(BootstrapPhase::Populate, format!("filling region '{}'", id), e.into()))?;
    }

    let app = regions
        .resolve(RegionId::App)
        .map_err(|e| Error::bootstrap(BootstrapPhase::Subscribe, "resolving app region", e.into()))?;
    let subscription = bus
        .on(&app, constants::NEW_MESSAGE_EVENT, log_received_message)
        .map_err(|e| Error::bootstrap(BootstrapPhase::Subscribe, "subscribing app region", e.into()))?;
    regions.attach(RegionId::App, subscription);
    Ok(())
}

/// Echo a received notification to the log.
fn log_received_message(event: &NotificationEvent) {
    let event_json = serde_json::to_string(event).unwrap_or_else(|e| format!("<unserializable event: {}>", e));
    log::info!("Received the following event details: {} {}", event_json, event.detail);
}

/// Running shell returned by [`Bootstrap::start`].
pub struct Shell {
    module: ModuleHandle,
    regions: Rc<RegionRegistry>,
    bus: EventBus,
    stage: Rc<RefCell<UiStage>>,
    readiness: ReadySubscription,
}

impl fmt::Debug for Shell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shell")
         .field("module", &self.module)
         .field("stage", &self.stage.borrow())
         .field("readiness", &self.readiness)
         .finish_non_exhaustive()
    }
}

impl Shell {
    /// Handle to the module load started by the bootstrap.
    pub fn module(&self) -> &ModuleHandle {
        &self.module
    }

    pub fn ui_stage(&self) -> UiStage {
        self.stage.borrow().clone()
    }

    pub fn is_initialized(&self) -> bool {
        *self.stage.borrow() == UiStage::Initialized
    }

    pub fn regions(&self) -> &RegionRegistry {
        &self.regions
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn readiness(&self) -> &ReadySubscription {
        &self.readiness
    }

    /// Emit `new_message` with `detail` on the app region.
    ///
    /// Returns the number of listeners invoked.
    pub fn emit_message(&self, detail: Value) -> Result<usize> {
        let app = self.regions.resolve(RegionId::App)?;
        Ok(self.bus.emit(&app, constants::NEW_MESSAGE_EVENT, detail)?)
    }

    /// Cancel a pending initializer and detach every region subscription.
    ///
    /// Returns the number of listeners removed. The shell cannot be restarted afterwards.
    pub fn teardown(&self) -> usize {
        if self.readiness.cancel() {
            log::debug!("Cancelled pending UI initializer");
        }
        RegionId::ALL.into_iter().map(|id| self.regions.teardown(id)).sum()
    }
}
