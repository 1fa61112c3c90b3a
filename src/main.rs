//! CLI entry point for the krawl tool.

// Clippy lints - strict for binary code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, error, warn};

use krawl_core::{
    CrawlOrchestrator, ManifestNormalizer, ProjectStateStore, RateLimit, RateLimiter,
    build_default_fetcher_registry,
};

mod app;
mod cli;
mod commands;

use app::config::{Settings, load_config};
use app::{exit_handler, terminal};
use cli::{Cli, Command, ListTarget, ValidateTarget};

/// Process outcome, mapped to the exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ProcessExit {
    Success,
    /// Some projects failed hard while others succeeded.
    Partial,
    /// A manifest did not pass validation.
    Invalid,
    Failure,
}

impl ProcessExit {
    pub(crate) fn code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::Partial | Self::Invalid => 1,
            Self::Failure => 2,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let cli = Cli::parse();

    let no_color =
        terminal::should_disable_color(terminal::no_color_env_requested(), terminal::is_dumb_terminal());
    terminal::init_tracing(terminal::default_log_level(cli.verbose, cli.quiet), no_color);
    debug!(?cli, "CLI arguments parsed");

    match run(cli).await {
        Ok(exit) => ExitCode::from(exit.code()),
        Err(e) => {
            error!(error = %format_args!("{e:#}"), "krawl failed");
            ExitCode::from(ProcessExit::Failure.code())
        }
    }
}

async fn run(cli: Cli) -> Result<ProcessExit> {
    let file = load_config(cli.config.as_deref())?;
    let settings = Settings::resolve(file, cli.workdir.clone());
    let normalizer = ManifestNormalizer::new(settings.license_policy.clone());

    match &cli.command {
        Command::Fetch(args) => {
            let registry = build_registry(&settings);
            let store = open_store(&settings).await?;
            let orchestrator = CrawlOrchestrator::new(store, normalizer);
            let interrupted = install_interrupt_handler();
            commands::run_fetch_command(
                args,
                &settings,
                &registry,
                &orchestrator,
                cli.quiet,
                interrupted,
            )
            .await
        }
        Command::Convert(args) => {
            commands::run_convert_command(args, &normalizer)?;
            Ok(ProcessExit::Success)
        }
        Command::Validate {
            target: ValidateTarget::Manifest(args),
        } => {
            let valid = commands::run_validate_manifest_command(args, &normalizer, cli.quiet)?;
            Ok(exit_handler::determine_validation_outcome(valid))
        }
        Command::List {
            target: ListTarget::Fetchers,
        } => {
            commands::run_list_fetchers_command(&build_registry(&settings));
            Ok(ProcessExit::Success)
        }
        Command::Export(args) => {
            let store = open_store(&settings).await?;
            commands::run_export_command(args, &store, cli.quiet).await?;
            Ok(ProcessExit::Success)
        }
    }
}

fn build_registry(settings: &Settings) -> krawl_core::FetcherRegistry {
    let limiter = Arc::new(RateLimiter::new(RateLimit::new(1, Duration::from_secs(1))));
    build_default_fetcher_registry(&settings.fetchers, &settings.fetcher_defaults, limiter)
}

async fn open_store(settings: &Settings) -> Result<ProjectStateStore> {
    ProjectStateStore::open(&settings.workdir)
        .await
        .with_context(|| format!("Failed to open store in '{}'", settings.workdir.display()))
}

/// Sets the returned flag on the first Ctrl-C; in-flight projects finish.
fn install_interrupt_handler() -> Arc<AtomicBool> {
    let interrupted = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&interrupted);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received; finishing projects in progress");
            flag.store(true, Ordering::SeqCst);
        }
    });
    interrupted
}
