//! Shopcheck runner
//!
//! Runs the scenario catalog against the configured storefront and writes
//! the suite summary plus per-scenario artifacts to the results directory.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use shopcheck::config::{Settings, DEFAULT_PROPERTIES_FILE};
use shopcheck::flows;
use shopcheck::scenario::ScenarioRunner;

/// Shopcheck end-to-end harness
#[derive(Parser, Debug)]
#[command(name = "shopcheck")]
#[command(version)]
#[command(about = "End-to-end UI+API verification harness for a sample storefront")]
struct Args {
    /// Path to the properties file
    #[arg(short, long, default_value = DEFAULT_PROPERTIES_FILE)]
    config: PathBuf,

    /// Browser to drive (chrome|chromium)
    #[arg(long)]
    browser: Option<String>,

    /// Run the browser headless
    #[arg(long)]
    headless: bool,

    /// Slow-motion delay between actions in milliseconds (0 disables)
    #[arg(long)]
    slow_mo: Option<u64>,

    /// Directory for artifacts and the suite summary
    #[arg(long)]
    results_dir: Option<PathBuf>,

    /// Only run scenarios whose name contains this substring
    #[arg(short, long)]
    scenario: Option<String>,

    /// List scenarios and exit
    #[arg(long)]
    list: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let catalog = flows::catalog();
    if args.list {
        for scenario in &catalog {
            println!("{}", scenario.name());
        }
        return Ok(());
    }

    let mut settings = Settings::load_from(&args.config);
    if let Some(browser) = &args.browser {
        settings.set("browser", browser.clone());
    }
    if args.headless {
        settings.set("headless.mode", "true");
    }
    if let Some(slow_mo) = args.slow_mo {
        settings.set("slow.mo", slow_mo.to_string());
    }
    if let Some(dir) = &args.results_dir {
        settings.set("results.dir", dir.display().to_string());
    }

    let selected: Vec<_> = match &args.scenario {
        Some(filter) => catalog
            .into_iter()
            .filter(|s| s.name().contains(filter.as_str()))
            .collect(),
        None => catalog,
    };
    if selected.is_empty() {
        anyhow::bail!(
            "no scenario matches `{}`",
            args.scenario.as_deref().unwrap_or("")
        );
    }

    tracing::info!("shopcheck {} starting", shopcheck::VERSION);

    let runner = ScenarioRunner::new(settings);
    let suite = runner.run_suite(&selected).await;
    runner
        .write_summary(&suite)
        .context("writing suite summary")?;

    if !suite.all_passed() {
        std::process::exit(1);
    }
    Ok(())
}
