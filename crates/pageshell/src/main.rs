mod cli; // Command-line arguments
mod logging; // Subscriber setup

use std::process::ExitCode;
use std::rc::Rc;

use clap::Parser;
use pageshell_core::host::TokioSpawner;
use pageshell_core::module_loader::FsModuleSource;
use pageshell_core::{Bootstrap, MemoryDocument, ModuleOutcome, ReadyState, RegionId, ShellConfig, UiStage};
use tokio::task::LocalSet;

use crate::cli::CliArgs;

/// What a run produced, printed to stdout once the shell settles.
struct Report {
    rendered: String,
    module: ModuleOutcome,
    ui: UiStage,
    delivered: usize,
}

impl Report {
    fn print(&self) {
        println!("{}", self.rendered);
        println!("module: {}", if self.module.is_loaded() { "loaded" } else { "failed" });
        let ui = match self.ui {
            UiStage::Initialized => "initialized",
            UiStage::Failed(_) => "failed",
            UiStage::Idle | UiStage::AwaitingReady => "pending",
        };
        println!("ui: {}", ui);
        println!("delivered: {}", self.delivered);
    }
}

/// Page skeleton with every region except the omitted ones.
fn build_document(omit: &[RegionId], loading: bool) -> MemoryDocument {
    let state = if loading { ReadyState::Loading } else { ReadyState::Complete };
    let doc = MemoryDocument::with_ready_state(state);
    for id in RegionId::ALL {
        if !omit.contains(&id) {
            doc.append_element("div", Some(id.name()));
        }
    }
    doc
}

fn load_config(args: &CliArgs) -> Result<ShellConfig, pageshell_core::Error> {
    let mut config = match &args.config {
        Some(path) => ShellConfig::load(path)?,
        None => ShellConfig::default(),
    };
    if let Some(module) = &args.module {
        config.module_path = module.clone();
    }
    Ok(config)
}

async fn run(args: &CliArgs, config: ShellConfig) -> Result<Report, pageshell_core::Error> {
    let doc = Rc::new(build_document(&args.omit, args.loading));
    let source = Rc::new(FsModuleSource::new(&args.base_dir));

    let shell = Bootstrap::new(doc.clone(), Rc::new(TokioSpawner), source, config).start()?;
    if args.loading {
        doc.finish_parsing();
    }

    // Let the module track settle so the summary is deterministic.
    let module = shell.module().wait().await;

    let mut delivered = 0;
    for payload in &args.emit {
        delivered += shell.emit_message(payload.clone())?;
    }

    let report = Report {
        rendered: doc.render(),
        module,
        ui: shell.ui_stage(),
        delivered,
    };
    let removed = shell.teardown();
    log::debug!("Shell torn down, {} listener(s) removed", removed);
    Ok(report)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = logging::init(args.log_format, &config.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        return ExitCode::FAILURE;
    }
    tracing::debug!(module_path = %config.module_path, base_dir = %args.base_dir.display(), "configuration loaded");

    // Bootstrap uses spawn_local, so everything runs inside a LocalSet.
    let local = LocalSet::new();
    match local.run_until(run(&args, config)).await {
        Ok(report) => {
            report.print();
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Bootstrap failed: {}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
