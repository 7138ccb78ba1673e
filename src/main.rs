//! Inkmap main entry point
//!
//! Command-line interface: crawl a site and write the sitemap XML to a file.

use anyhow::Context;
use clap::Parser;
use inkmap::crawler::{crawl, CrawlOptions};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

/// Inkmap: generate a sitemap by crawling a website
///
/// Starts at the given URL, follows every same-domain link, and writes a
/// sitemap XML document listing each discovered page with its last-modified
/// date, content fingerprint, and embedded images.
#[derive(Parser, Debug)]
#[command(name = "inkmap")]
#[command(version)]
#[command(about = "Generate a sitemap by crawling a website", long_about = None)]
struct Cli {
    /// URL to analyze; http is assumed when no protocol is given
    #[arg(short, long)]
    url: String,

    /// File to write the sitemap to
    #[arg(short, long, default_value = "sitemap.xml")]
    output: PathBuf,

    /// Show ignored and failing URLs after the crawl
    #[arg(short, long)]
    debug: bool,

    /// Maximum number of concurrent connections
    #[arg(short, long, default_value_t = 8)]
    pool_size: usize,

    /// Include extra static assets (JS, CSS) in the sitemap (experimental, not standard)
    #[arg(short, long)]
    extras: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,

    /// Suppress non-error log output
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let options = CrawlOptions {
        pool_size: cli.pool_size,
        extras: cli.extras,
    };

    let started = Instant::now();
    let report = crawl(&cli.url, options).await.context("crawl failed")?;
    println!();

    if cli.debug {
        println!("Ignored: {:#?}", report.ignored);
        println!("Failed: {:#?}", report.errors);
    }

    std::fs::write(&cli.output, &report.xml)
        .with_context(|| format!("writing {} failed", cli.output.display()))?;

    println!("Sitemap saved to {}", cli.output.display());
    println!("Elapsed time: {}", format_elapsed(started.elapsed()));

    Ok(())
}

/// Sets up the tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("inkmap=warn"),
            1 => EnvFilter::new("inkmap=info"),
            2 => EnvFilter::new("inkmap=debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Formats a duration as minutes:seconds
fn format_elapsed(elapsed: Duration) -> String {
    let seconds = elapsed.as_secs();
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_elapsed_zero() {
        assert_eq!(format_elapsed(Duration::from_secs(0)), "0:00");
    }

    #[test]
    fn test_format_elapsed_pads_seconds() {
        assert_eq!(format_elapsed(Duration::from_secs(65)), "1:05");
        assert_eq!(format_elapsed(Duration::from_secs(600)), "10:00");
    }
}
