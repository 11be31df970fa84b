//! Command-line interface for flexprobe
//!
//! This module provides the CLI commands and argument parsing for the
//! flexprobe tool: cache reload, query cycles, the scripted demo walkthrough,
//! and the dashboard embed snippet.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use flexprobe_api::HttpAnalyticsApi;
use flexprobe_config::{CliOverrides, Config, ConfigError};
use flexprobe_engine::{Orchestrator, QueryOutcome, dashboard};
use flexprobe_session::{DashboardLog, QueryType};

use crate::exit_codes::ExitCode;
use crate::logging;

/// flexprobe - cached vs. uncached analytical query latency probe
#[derive(Parser)]
#[command(name = "flexprobe")]
#[command(about = "Measure cached vs. uncached analytical query latency against a data platform")]
#[command(long_about = r#"
flexprobe drives a FlexQuery-style analytics platform through its cache
invalidation, query submission, and result retrieval endpoints, measuring the
wall-clock duration of each call. Every execution is classified as cached or
uncached based on whether a cache reload preceded it.

EXAMPLES:
  # Three cached cycles, a reload, then three uncached cycles
  flexprobe demo

  # Run query cycles by hand
  flexprobe query --count 3
  flexprobe reload
  flexprobe query --count 3

  # Machine-readable history of a run
  flexprobe query --count 5 --json

  # Print the embeddable dashboard snippet
  flexprobe dashboard

CONFIGURATION:
  Configuration is loaded with precedence: CLI flags > config file > defaults.
  The config file is ./flexprobe.toml unless --config names another path.
  The API token is read from the environment variable named by `token_env`
  (default FLEXPROBE_TOKEN); it never lives in the file.

  Use `reload` with caution: it invalidates the platform's in-memory cache,
  so following queries run against the underlying database.
"#)]
#[command(version)]
pub struct Cli {
    /// Path to configuration file (overrides discovery)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Platform base URL, e.g. https://demo.cloud.gooddata.com
    #[arg(long, global = true)]
    pub hostname: Option<String>,

    /// Workspace the AFM executions run in
    #[arg(long, global = true)]
    pub workspace_id: Option<String>,

    /// Data source whose cache the reload invalidates
    #[arg(long, global = true)]
    pub data_source_id: Option<String>,

    /// Environment variable holding the API token
    #[arg(long, global = true)]
    pub token_env: Option<String>,

    /// Path to the AFM execution body (passed through verbatim)
    #[arg(long, global = true)]
    pub body: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Invalidate the platform cache so the next query runs uncached
    Reload,

    /// Run query cycles and report per-cycle and summary timings
    Query {
        /// Number of query cycles to run
        #[arg(long, default_value_t = 1)]
        count: u32,

        /// Emit the timing history as JSON after the run
        #[arg(long)]
        json: bool,
    },

    /// Scripted walkthrough: cached cycles, reload, uncached cycles
    Demo {
        /// Query cycles to run before the reload (tagged cached)
        #[arg(long, default_value_t = 3)]
        cached: u32,

        /// Query cycles to run after the reload (first is tagged uncached)
        #[arg(long, default_value_t = 3)]
        uncached: u32,
    },

    /// Print the embeddable dashboard snippet and record load-time events
    Dashboard {
        /// Load-time event payload posted back by the embedded dashboard,
        /// e.g. '{"type": "Initialization", "loadTime": 812.4}' (repeatable)
        #[arg(long)]
        event: Vec<String>,
    },
}

/// CLI entry point: parse, dispatch, map errors to exit codes.
pub fn run() -> Result<(), ExitCode> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match execute(cli) {
        Ok(()) => Ok(()),
        Err(err) => {
            eprintln!("error: {err:#}");
            if err.downcast_ref::<ConfigError>().is_some() {
                Err(ExitCode::ConfigError)
            } else {
                Err(ExitCode::Failure)
            }
        }
    }
}

fn execute(cli: Cli) -> Result<()> {
    let overrides = CliOverrides {
        config: cli.config,
        hostname: cli.hostname,
        workspace_id: cli.workspace_id,
        data_source_id: cli.data_source_id,
        token_env: cli.token_env,
        request_body: cli.body,
    };
    let config = Config::discover(&overrides)?;

    match cli.command {
        // Dashboard rendering is purely local; no runtime needed.
        Commands::Dashboard { event } => run_dashboard(&config, &event),
        command => {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .context("failed to start async runtime")?;

            match command {
                Commands::Reload => runtime.block_on(run_reload(&config)),
                Commands::Query { count, json } => runtime.block_on(run_query(&config, count, json)),
                Commands::Demo { cached, uncached } => {
                    runtime.block_on(run_demo(&config, cached, uncached))
                }
                Commands::Dashboard { .. } => unreachable!("handled above"),
            }
        }
    }
}

fn build_orchestrator(config: &Config) -> Result<Orchestrator> {
    let api = HttpAnalyticsApi::new_from_config(config)?;
    let body = config.load_request_body()?;
    Ok(Orchestrator::new(Box::new(api), body))
}

async fn run_reload(config: &Config) -> Result<()> {
    let mut orchestrator = build_orchestrator(config)?;
    orchestrator
        .run_reload_cache()
        .await
        .context("cache reload failed")?;
    println!("Cache reloaded successfully; the next query will run uncached.");
    Ok(())
}

async fn run_query(config: &Config, count: u32, json: bool) -> Result<()> {
    let mut orchestrator = build_orchestrator(config)?;
    let result = run_cycles(&mut orchestrator, count).await;

    // Partial failures still produced partial measurements; show what we have.
    print_summary(&orchestrator);
    if json {
        print_history_json(&orchestrator)?;
    }
    result
}

async fn run_demo(config: &Config, cached: u32, uncached: u32) -> Result<()> {
    let mut orchestrator = build_orchestrator(config)?;

    println!("Running {cached} query cycle(s) against the warm cache...");
    run_cycles(&mut orchestrator, cached).await?;

    println!("Reloading the cache...");
    orchestrator
        .run_reload_cache()
        .await
        .context("cache reload failed")?;

    println!("Running {uncached} query cycle(s) after the reload...");
    let result = run_cycles(&mut orchestrator, uncached).await;

    print_summary(&orchestrator);
    result
}

async fn run_cycles(orchestrator: &mut Orchestrator, count: u32) -> Result<()> {
    for cycle in 1..=count {
        let outcome = orchestrator
            .run_query()
            .await
            .with_context(|| format!("query cycle {cycle} failed"))?;
        print_outcome(cycle, &outcome);
    }
    Ok(())
}

fn print_outcome(cycle: u32, outcome: &QueryOutcome) {
    let timing = &outcome.timing;
    let get = timing
        .get_ms
        .map_or_else(|| "-".to_string(), |ms| format!("{ms:.2} ms"));
    let total = timing
        .total_ms
        .map_or_else(|| "-".to_string(), |ms| format!("{ms:.2} ms"));

    println!(
        "cycle {cycle} [{}]  POST {:.2} ms  GET {get}  total {total}  {} row(s)",
        timing.query_type,
        timing.post_ms,
        outcome.rows.len(),
    );

    if let Some(decode_failure) = &outcome.decode_failure {
        println!("  warning: result could not be decoded: {decode_failure}");
    }
}

fn print_summary(orchestrator: &Orchestrator) {
    let tracker = &orchestrator.session().tracker;
    if tracker.is_empty() {
        return;
    }

    println!("\nExecution times summary:");
    for query_type in [QueryType::Cached, QueryType::Uncached] {
        let Some(summary) = tracker.summary(query_type) else {
            continue;
        };
        let get = summary
            .mean_get_ms
            .map_or_else(|| "-".to_string(), |ms| format!("{ms:.2} ms"));
        let total = summary
            .mean_total_ms
            .map_or_else(|| "-".to_string(), |ms| format!("{ms:.2} ms"));
        println!(
            "  {query_type}: {} run(s)  mean POST {:.2} ms  mean GET {get}  mean total {total}",
            summary.count, summary.mean_post_ms,
        );
    }
}

fn print_history_json(orchestrator: &Orchestrator) -> Result<()> {
    let history = orchestrator.session().tracker.history();
    let rendered =
        serde_json::to_string_pretty(history).context("failed to serialize timing history")?;
    println!("{rendered}");
    Ok(())
}

fn run_dashboard(config: &Config, events: &[String]) -> Result<()> {
    let dashboard_config = config.dashboard()?;

    let mut log = DashboardLog::new();
    for payload in events {
        let sample = dashboard::parse_load_event(payload)
            .map(|(stage, load_ms)| log.record(stage, load_ms))
            .with_context(|| format!("invalid dashboard event: {payload}"))?;
        println!("{}: {:.2} ms", sample.stage, sample.load_ms);
    }

    print!("{}", dashboard::embed_html(&config.hostname, dashboard_config));
    Ok(())
}
