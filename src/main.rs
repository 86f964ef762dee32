//! Site Chart main entry point
//!
//! This is the command-line interface for the Site Chart sitemap generator
//! and link checker.

use anyhow::Context;
use clap::{Parser, Subcommand};
use site_chart::checker::Checker;
use site_chart::config::{load_config, load_default_config, settings_from_env, RunConfig, Settings};
use site_chart::crawler::Crawler;
use site_chart::output::{write_pages, write_report};
use site_chart::{shutdown, ChartError, Result};
use std::io::{BufRead, IsTerminal};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

/// chart is a fast and flexible sitemap generator
///
/// Site Chart crawls a website and generates a comprehensive sitemap. It
/// follows links within the same origin to map out the site's structure.
/// Depth and output format can be set with flags, a config file
/// ($HOME/.chart.toml) or CHART_* environment variables.
#[derive(Parser, Debug)]
#[command(name = "chart")]
#[command(version = "1.0.0")]
#[command(about = "chart is a fast and flexible sitemap generator")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Config file (default is $HOME/.chart.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Number of concurrent workers [default: 10]
    #[arg(short, long, global = true)]
    concurrency: Option<i64>,

    /// Rate limit in requests per second, 0 for no limit [default: 2]
    #[arg(short, long, global = true, allow_negative_numbers = true)]
    rate_limit: Option<f64>,

    /// Custom User-Agent header for HTTP requests [default: SiteChart-Sitemapper/1.0]
    #[arg(short, long, global = true)]
    user_agent: Option<String>,

    /// Global timeout for the command (e.g. 30s, 1m, 1h)
    #[arg(short, long, global = true)]
    timeout: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error logging
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Builds a sitemap for the provided URL
    Build {
        /// The URL to start crawling from
        url: String,

        /// The maximum depth to traverse [default: 3]
        #[arg(short, long)]
        depth: Option<u32>,

        /// The output format (xml or txt) [default: xml]
        #[arg(short, long)]
        format: Option<String>,
    },

    /// Checks if provided URLs are live or dead
    ///
    /// Provide URLs as arguments or pipe them via stdin:
    ///
    ///   chart check https://example1.com https://example2.com
    ///
    ///   cat urls.txt | chart check
    Check {
        /// URLs to check
        urls: Vec<String>,
    },
}

impl Cli {
    /// Settings given explicitly on the command line
    fn settings(&self) -> Settings {
        let (depth, format) = match &self.command {
            Command::Build { depth, format, .. } => (*depth, format.clone()),
            Command::Check { .. } => (None, None),
        };

        Settings {
            depth,
            format,
            concurrency: self.concurrency,
            rate_limit: self.rate_limit,
            user_agent: self.user_agent.clone(),
            timeout: self.timeout.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = load_run_config(&cli)?;
    tracing::debug!("Resolved configuration: {:?}", config);

    let cancel = CancellationToken::new();
    let watcher = shutdown::spawn_watcher(cancel.clone(), config.timeout);

    let result = match cli.command {
        Command::Build { url, .. } => handle_build(&url, &config, cancel.clone()).await,
        Command::Check { urls } => handle_check(urls, &config, cancel.clone()).await,
    };

    // Stop the watcher if it has not fired
    cancel.cancel();
    let _ = watcher.await;

    if let Err(e) = &result {
        tracing::error!("{}", e);
    }
    Ok(result?)
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr; stdout carries only the sitemap or report.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("site_chart=info,warn"),
            1 => EnvFilter::new("site_chart=debug,info"),
            2 => EnvFilter::new("site_chart=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Merges config file, environment and flags into a [`RunConfig`]
fn load_run_config(cli: &Cli) -> anyhow::Result<RunConfig> {
    let file_settings = match &cli.config {
        Some(path) => {
            let settings = load_config(path)
                .with_context(|| format!("Failed to load config file {}", path.display()))?;
            tracing::info!("Using config file: {}", path.display());
            settings
        }
        None => match load_default_config().context("Failed to load default config file")? {
            Some((path, settings)) => {
                tracing::info!("Using config file: {}", path.display());
                settings
            }
            None => Settings::default(),
        },
    };

    let env_settings = settings_from_env().context("Invalid CHART_* environment variable")?;
    let settings = file_settings.merge(env_settings).merge(cli.settings());

    Ok(RunConfig::resolve(settings)?)
}

/// Handles the `build` command: crawl and print the sitemap
async fn handle_build(url: &str, config: &RunConfig, cancel: CancellationToken) -> Result<()> {
    let crawler = Crawler::new(config, cancel)?;
    let pages = crawler.crawl(url).await;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_pages(&pages, config.format, &mut out)?;

    Ok(())
}

/// Handles the `check` command: check URLs and print the live/dead report
async fn handle_check(
    args: Vec<String>,
    config: &RunConfig,
    cancel: CancellationToken,
) -> Result<()> {
    let urls = if args.is_empty() {
        read_urls_from_stdin()?
    } else {
        args
    };

    let checker = Checker::new(config, cancel)?;
    let report = checker.check(urls).await;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_report(&report, &mut out)?;

    Ok(())
}

/// Reads one URL per line from piped stdin
///
/// Fails with [`ChartError::NoInput`] when stdin is a terminal or yields no
/// URLs, so no work starts without input.
fn read_urls_from_stdin() -> Result<Vec<String>> {
    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Err(ChartError::NoInput);
    }

    let mut urls = Vec::new();
    for line in stdin.lock().lines() {
        let line = line?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            urls.push(trimmed.to_string());
        }
    }

    if urls.is_empty() {
        return Err(ChartError::NoInput);
    }
    Ok(urls)
}
