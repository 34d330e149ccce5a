//! Robots-Gate main entry point
//!
//! Command-line interface for checking URLs against their hosts' robots.txt.

use anyhow::Context;
use clap::Parser;
use robots_gate::config::{load_config, Config};
use robots_gate::robots::{HttpFetcher, SystemClock};
use robots_gate::Robots;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Robots-Gate: robots.txt permission checks for polite crawlers
///
/// Checks each URL against its host's robots.txt, fetching every host's
/// policy once and honouring Crawl-delay between URLs on the same host.
#[derive(Parser, Debug)]
#[command(name = "robots-gate")]
#[command(version = "1.0.0")]
#[command(about = "Check URLs against robots.txt", long_about = None)]
struct Cli {
    /// URLs to check
    #[arg(value_name = "URL", required = true)]
    urls: Vec<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// User agent to check as (overrides the configuration)
    #[arg(short = 'a', long, value_name = "STRING")]
    user_agent: Option<String>,

    /// Timeout for fetching robots.txt, in seconds (overrides the configuration)
    #[arg(short, long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Also print non-standard directives such as Sitemap
    #[arg(long)]
    other: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("failed to load configuration {}", path.display()))?
        }
        None => Config::from_user_agent("robots-gate"),
    };

    if let Some(timeout) = cli.timeout {
        config.fetch.timeout_secs = timeout;
        robots_gate::config::validate(&config).context("invalid --timeout")?;
    }

    let mut robots = match &cli.user_agent {
        Some(agent) => {
            let fetcher = HttpFetcher::from_config(&config.fetch)
                .context("failed to build robots.txt client")?;
            Robots::with_parts(agent, fetcher, SystemClock)
        }
        None => Robots::from_config(&config).context("failed to build robots.txt client")?,
    };

    tracing::info!("Checking {} URL(s) as {}", cli.urls.len(), robots.user_agent());

    for url in &cli.urls {
        let verdict = if robots.is_allowed(url) {
            "allowed"
        } else {
            "disallowed"
        };
        println!("{}\t{}", verdict, url);

        if cli.other {
            let mut other: Vec<_> = robots.other_values(url).into_iter().collect();
            other.sort();
            for (key, values) in other {
                for value in values {
                    println!("\t{}: {}", key, value);
                }
            }
        }
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("robots_gate=warn,warn"),
            1 => EnvFilter::new("robots_gate=info,warn"),
            2 => EnvFilter::new("robots_gate=debug,info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}
