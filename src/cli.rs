//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Crawl open hardware projects into OKH manifests and RDF.
///
/// Krawl discovers projects on hosting platforms, normalizes their metadata
/// into Open Know-How manifests and keeps the results in a local store.
#[derive(Parser, Debug)]
#[command(name = "krawl")]
#[command(author, version, about)]
pub struct Cli {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config file (default: $XDG_CONFIG_HOME/krawl/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// State directory holding the project store
    #[arg(long, global = true, value_name = "PATH")]
    pub workdir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch projects from a platform or from URLs
    Fetch(FetchArgs),
    /// Convert a manifest between formats
    Convert(ConvertArgs),
    /// Validate manifests
    Validate {
        #[command(subcommand)]
        target: ValidateTarget,
    },
    /// List registered components
    List {
        #[command(subcommand)]
        target: ListTarget,
    },
    /// Write the store as a directory tree
    Export(ExportArgs),
}

/// Options of `fetch`. The target `url` fetches the given URLs directly;
/// any other target names a platform to crawl.
#[derive(Args, Debug, Clone)]
pub struct FetchArgs {
    /// `url`, or a platform key or short name (github, oshwa, thingiverse, ...)
    pub target: String,

    /// Project URLs, for `fetch url`
    #[arg(value_name = "URL", required_if_eq("target", "url"))]
    pub urls: Vec<String>,

    /// Write the run report as JSON
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Ignore a saved discovery cursor
    #[arg(long)]
    pub start_over: bool,

    /// Refetch projects even when they are fresh
    #[arg(long)]
    pub force: bool,

    /// Stop after this many projects
    #[arg(long, value_name = "N")]
    pub max_projects: Option<usize>,

    /// Projects processed at once (1-64)
    #[arg(short = 'c', long, value_parser = clap::value_parser!(u8).range(1..=64))]
    pub concurrency: Option<u8>,

    /// Retries after the first attempt (0-10)
    #[arg(short = 'r', long, value_parser = clap::value_parser!(u32).range(0..=10))]
    pub retries: Option<u32>,
}

impl FetchArgs {
    /// True for `fetch url`.
    #[must_use]
    pub fn is_url_target(&self) -> bool {
        self.target.eq_ignore_ascii_case("url")
    }
}

#[derive(Args, Debug, Clone)]
pub struct ConvertArgs {
    /// Input manifest (.yaml, .yml, .toml or .json)
    pub input: PathBuf,

    /// Output file (.yaml, .yml, .toml, .json, .ttl or .nt)
    pub output: PathBuf,

    /// Overwrite an existing output file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Subcommand, Debug)]
pub enum ValidateTarget {
    /// Check one manifest file
    Manifest(ValidateManifestArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ValidateManifestArgs {
    /// Manifest file
    pub file: PathBuf,

    /// Also require version, function, licensor and an SPDX license
    #[arg(long)]
    pub strict: bool,
}

#[derive(Subcommand, Debug)]
pub enum ListTarget {
    /// Show platforms and whether they are usable
    Fetchers,
}

#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    /// Target directory
    pub dir: PathBuf,

    /// Only export one platform
    #[arg(long, value_name = "P")]
    pub platform: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_verbose_flag_increments_count() {
        let cli = Cli::try_parse_from(["krawl", "-vv", "list", "fetchers"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(!cli.quiet);
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["krawl", "list", "fetchers", "-q", "--workdir", "/tmp/k"]).unwrap();
        assert!(cli.quiet);
        assert_eq!(cli.workdir, Some(PathBuf::from("/tmp/k")));
    }

    #[test]
    fn test_cli_help_flag_shows_usage() {
        let err = Cli::try_parse_from(["krawl", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_cli_version_flag_shows_version() {
        let err = Cli::try_parse_from(["krawl", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["krawl"]).is_err());
    }

    // ==================== Fetch Tests ====================

    fn fetch_args(args: &[&str]) -> FetchArgs {
        let cli = Cli::try_parse_from(args.iter().copied()).unwrap();
        let Command::Fetch(fetch) = cli.command else {
            panic!("expected fetch");
        };
        fetch
    }

    #[test]
    fn test_fetch_url_collects_urls_and_report() {
        let args = fetch_args(&[
            "krawl",
            "fetch",
            "url",
            "https://github.com/a/b",
            "https://example.org/okh.toml",
            "--report",
            "r.json",
        ]);
        assert!(args.is_url_target());
        assert_eq!(args.urls.len(), 2);
        assert_eq!(args.report, Some(PathBuf::from("r.json")));
    }

    #[test]
    fn test_fetch_url_requires_a_url() {
        let err = Cli::try_parse_from(["krawl", "fetch", "url"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_fetch_platform_options() {
        let args = fetch_args(&[
            "krawl",
            "fetch",
            "oshwa",
            "--start-over",
            "--max-projects",
            "5",
            "-c",
            "8",
        ]);
        assert!(!args.is_url_target());
        assert_eq!(args.target, "oshwa");
        assert!(args.start_over);
        assert!(!args.force);
        assert_eq!(args.max_projects, Some(5));
        assert_eq!(args.concurrency, Some(8));
        assert_eq!(args.retries, None);
    }

    #[test]
    fn test_fetch_platform_concurrency_range() {
        let err = Cli::try_parse_from(["krawl", "fetch", "github", "-c", "0"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
        let err = Cli::try_parse_from(["krawl", "fetch", "github", "-c", "65"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_fetch_platform_retries_range() {
        let args = fetch_args(&["krawl", "fetch", "github", "-r", "0"]);
        assert_eq!(args.retries, Some(0));
        let err = Cli::try_parse_from(["krawl", "fetch", "github", "-r", "11"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    // ==================== Other Command Tests ====================

    #[test]
    fn test_convert_args() {
        let cli = Cli::try_parse_from(["krawl", "convert", "in.yml", "out.ttl", "--force"]).unwrap();
        let Command::Convert(args) = cli.command else {
            panic!("expected convert");
        };
        assert_eq!(args.input, PathBuf::from("in.yml"));
        assert_eq!(args.output, PathBuf::from("out.ttl"));
        assert!(args.force);
    }

    #[test]
    fn test_validate_manifest_strict() {
        let cli =
            Cli::try_parse_from(["krawl", "validate", "manifest", "okh.toml", "--strict"]).unwrap();
        let Command::Validate {
            target: ValidateTarget::Manifest(args),
        } = cli.command
        else {
            panic!("expected validate manifest");
        };
        assert!(args.strict);
        assert_eq!(args.file, PathBuf::from("okh.toml"));
    }

    #[test]
    fn test_export_platform_filter() {
        let cli = Cli::try_parse_from(["krawl", "export", "out", "--platform", "oshwa"]).unwrap();
        let Command::Export(args) = cli.command else {
            panic!("expected export");
        };
        assert_eq!(args.platform.as_deref(), Some("oshwa"));
    }
}
