//! Fetch command handler: crawl a platform or a list of URLs.

use std::collections::BTreeMap;
use std::io::{self, IsTerminal};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use anyhow::{Context, Result};
use tracing::{debug, info};

use krawl_core::fetcher::{DiscoverOptions, Fetcher};
use krawl_core::{
    CrawlOptions, CrawlOrchestrator, CrawlReport, FetcherRegistry, ProjectRef, RefreshPolicy,
    RetryPolicy,
};

use crate::ProcessExit;
use crate::app::config::Settings;
use crate::app::{exit_handler, progress, terminal};
use crate::cli::FetchArgs;

pub async fn run_fetch_command(
    args: &FetchArgs,
    settings: &Settings,
    registry: &FetcherRegistry,
    orchestrator: &CrawlOrchestrator,
    quiet: bool,
    interrupted: Arc<AtomicBool>,
) -> Result<ProcessExit> {
    let concurrency = args
        .concurrency
        .map_or(settings.concurrency, usize::from);
    let mut options = CrawlOptions {
        concurrency,
        refresh: if args.force {
            RefreshPolicy::forced()
        } else {
            settings.refresh
        },
        hash_skip: settings.hash_skip,
        max_projects: args.max_projects,
        discover: DiscoverOptions {
            start_over: args.start_over,
        },
        retry: RetryPolicy::default(),
        platform_retry: BTreeMap::new(),
    };

    let use_spinner =
        terminal::should_use_spinner(io::stderr().is_terminal(), quiet, terminal::is_dumb_terminal());

    let report = if args.is_url_target() {
        let projects = resolve_urls(registry, &args.urls)?;
        options.refresh = RefreshPolicy::forced();
        match args.retries {
            Some(retries) => options.retry = RetryPolicy::from_retries(retries),
            None => options.platform_retry = platform_retry(registry, &projects),
        }
        info!(projects = projects.len(), "fetching URLs");
        let (handle, stop) =
            progress::spawn_progress_ui(use_spinner, orchestrator.store().clone(), "URLs".into());
        let report = orchestrator.run_refs(projects, &options, interrupted).await;
        progress::stop_progress_ui(handle, &stop).await;
        report
    } else {
        let fetcher = registry
            .get(&args.target)
            .with_context(|| format!("Cannot crawl '{}'", args.target))?;
        options.retry = args.retries.map_or_else(
            || registry.retry_policy(fetcher.platform()),
            RetryPolicy::from_retries,
        );
        let label = fetcher.platform().to_string();
        let (handle, stop) =
            progress::spawn_progress_ui(use_spinner, orchestrator.store().clone(), label);
        let report = orchestrator.run_platform(fetcher, &options, interrupted).await;
        progress::stop_progress_ui(handle, &stop).await;
        report
    };

    if let Some(path) = &args.report {
        write_report(path, &report)?;
    }
    if !quiet {
        print_summary(&report);
    }
    Ok(exit_handler::determine_exit_outcome(report.outcome()))
}

fn resolve_urls(
    registry: &FetcherRegistry,
    urls: &[String],
) -> Result<Vec<(Arc<dyn Fetcher>, ProjectRef)>> {
    urls.iter()
        .map(|url| -> Result<(Arc<dyn Fetcher>, ProjectRef)> {
            let (fetcher, project) = registry.find_for_url(url)?;
            debug!(url = %url, project = %project, "URL resolved");
            Ok((fetcher, project))
        })
        .collect()
}

/// Each platform's configured retry policy, for the platforms in `projects`.
fn platform_retry(
    registry: &FetcherRegistry,
    projects: &[(Arc<dyn Fetcher>, ProjectRef)],
) -> BTreeMap<&'static str, RetryPolicy> {
    projects
        .iter()
        .map(|(fetcher, _)| fetcher.platform())
        .map(|platform| (platform, registry.retry_policy(platform)))
        .collect()
}

fn write_report(path: &Path, report: &CrawlReport) -> Result<()> {
    let mut json = serde_json::to_string_pretty(report)?;
    json.push('\n');
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write report '{}'", path.display()))?;
    debug!(path = %path.display(), "report written");
    Ok(())
}

fn print_summary(report: &CrawlReport) {
    let scope = report.platform.as_deref().unwrap_or("URLs");
    println!(
        "{scope}: {} succeeded ({} unchanged), {} skipped, {} failed",
        report.succeeded,
        report.unchanged,
        report.skipped,
        report.failed_total()
    );
    for (kind, failures) in report.failures_by_kind() {
        println!("  {kind} ({}):", failures.len());
        for failure in failures {
            println!("    {} [{}] {}", failure.project, failure.stage, failure.message);
        }
    }
    if !report.warnings.is_empty() {
        println!("  warnings ({}):", report.warnings.len());
        for entry in &report.warnings {
            println!("    {} {}", entry.project, entry.warning);
        }
    }
    if let Some(error) = &report.discovery_error {
        println!("  discovery stopped: {error}");
    }
    if report.interrupted {
        println!("  interrupted; rerun to continue");
    }
}
