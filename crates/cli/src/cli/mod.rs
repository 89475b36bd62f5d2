use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use route_params::{Config, FileReport, LintError, Options, PromiseParamsSetting, fix_source, lint_file};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod files;
pub mod output;

#[derive(Debug, Parser)]
#[command(
    name = "route-params",
    about = "Check that route handlers declare the params their directory path provides",
    version
)]
pub struct Cli {
    /// Files or directories to check
    #[arg(default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// Project directory holding route-params.json and package.json
    #[arg(long, default_value = ".")]
    pub project: PathBuf,

    /// Write fixes back to the checked files
    #[arg(long)]
    pub fix: bool,

    /// Skip searchParams checks
    #[arg(long)]
    pub no_search_params: bool,

    /// Whether params must be wrapped in a Promise
    #[arg(long, value_enum)]
    pub promise_params: Option<PromiseParamsArg>,

    /// Directory the routing tree starts at
    #[arg(long)]
    pub root_dir: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value = "pretty")]
    pub format: Format,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PromiseParamsArg {
    Auto,
    Required,
    Forbidden,
}

impl From<PromiseParamsArg> for PromiseParamsSetting {
    fn from(arg: PromiseParamsArg) -> Self {
        match arg {
            PromiseParamsArg::Auto => PromiseParamsSetting::Auto,
            PromiseParamsArg::Required => PromiseParamsSetting::Required,
            PromiseParamsArg::Forbidden => PromiseParamsSetting::Forbidden,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Pretty,
    Json,
}

/// Process outcome, mapped to the exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Clean,
    Problems,
    Fatal,
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        match status {
            Status::Clean => ExitCode::SUCCESS,
            Status::Problems => ExitCode::from(1),
            Status::Fatal => ExitCode::from(2),
        }
    }
}

pub fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "route_params=debug,cli=debug" } else { "warn" };
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

/// Options from the project configuration with command line overrides
/// applied.
pub fn resolve_options(args: &Cli) -> Options {
    let mut config = Config::load(&args.project);
    if args.no_search_params {
        config.search_params = Some(false);
    }
    if let Some(root_dir) = &args.root_dir {
        config.root_dir = Some(root_dir.clone());
    }
    if let Some(promise_params) = args.promise_params {
        config.promise_params = Some(promise_params.into());
    }
    config.resolve(&args.project)
}

pub fn execute(args: &Cli) -> Result<Status> {
    let options = resolve_options(args);
    tracing::debug!(?options, "resolved options");

    let paths = files::collect_route_files(&args.paths)?;
    tracing::debug!(files = paths.len(), "collected route files");

    let mut reports = Vec::with_capacity(paths.len());
    let mut failures = 0;
    for path in &paths {
        let display = files::display_path(path, &args.project);
        let result = if args.fix {
            fix_file(path, &display, &options)
        } else {
            lint_file(path, &display, &options)
        };
        match result {
            Ok(report) => reports.push(report),
            Err(err) => {
                failures += 1;
                eprintln!("{}", err);
            }
        }
    }

    let rendered = match args.format {
        Format::Pretty => output::render_pretty(&reports),
        Format::Json => output::render_json(&reports).context("failed to serialize reports")?,
    };
    println!("{}", rendered);

    if failures > 0 || reports.iter().any(|report| !report.is_clean()) {
        Ok(Status::Problems)
    } else {
        Ok(Status::Clean)
    }
}

/// Fix `path` in place and report what is left.
pub fn fix_file(path: &Path, display_path: &str, options: &Options) -> Result<FileReport, LintError> {
    let source = std::fs::read_to_string(path).map_err(|source| LintError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let outcome = fix_source(&source, display_path, options)?;
    if outcome.changed() {
        std::fs::write(path, &outcome.source).map_err(|source| LintError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = display_path, passes = outcome.passes, "applied fixes");
    }
    Ok(FileReport {
        path: display_path.to_string(),
        source: outcome.source,
        diagnostics: outcome.remaining,
    })
}
