//! lspipeline CLI
//!
//! Lists CodePipeline pipelines, or shows one pipeline's stage status as a
//! live terminal dashboard.

use std::io::{self, IsTerminal};
use std::process::ExitCode;

use clap::Parser;
use tracing::info;

use lspipeline_cli::aws::AwsPipelineApi;
use lspipeline_cli::ui::{Renderer, table};
use lspipeline_cli::{list_cmd, tui};
use lspipeline_core::{DisplayZone, config};
use lspipeline_core::tracing_init::{DEFAULT_FILTER, init_tracing};

#[derive(Parser, Debug)]
#[command(name = "lspipeline")]
#[command(version, about = "Live terminal dashboard for AWS CodePipeline", long_about = None)]
struct Cli {
    /// Pipeline to show; lists all pipelines when omitted
    pipeline: Option<String>,

    /// Print the status once as a table instead of the live dashboard
    #[arg(long)]
    table: bool,

    /// Seconds between dashboard refreshes
    #[arg(short, long)]
    interval: Option<u64>,

    /// AWS region (defaults to the SDK's region chain)
    #[arg(long)]
    region: Option<String>,

    /// AWS shared-config profile
    #[arg(long)]
    profile: Option<String>,

    /// Emit logs as JSON lines on stderr
    #[arg(long)]
    log_json: bool,
}

#[tokio::main]
#[allow(clippy::print_stderr)]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(DEFAULT_FILTER, cli.log_json);
    info!(version = env!("CARGO_PKG_VERSION"), "Starting lspipeline");

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = config::load_config()?;
    if let Some(secs) = cli.interval {
        config.refresh_interval_secs = secs;
    }
    if cli.region.is_some() {
        config.region = cli.region;
    }
    if cli.profile.is_some() {
        config.profile = cli.profile;
    }
    config.validate()?;

    let palette = config.palette();
    let api = AwsPipelineApi::from_env(config.region.clone(), config.profile.clone()).await;
    let mut stdout = io::stdout();

    let Some(pipeline) = cli.pipeline else {
        let program = std::env::args()
            .next()
            .unwrap_or_else(|| "lspipeline".to_string());
        list_cmd::run(&api, &program, &mut stdout).await?;
        return Ok(());
    };

    let zone = DisplayZone::detect();
    match Renderer::from_flags(cli.table) {
        Renderer::Table => {
            let color = stdout.is_terminal();
            table::print_snapshot(&api, &pipeline, &palette, zone, color, &mut stdout).await?;
        }
        Renderer::Dashboard => {
            tui::run(&api, &pipeline, &palette, zone, config.refresh_interval()).await?;
        }
    }
    Ok(())
}
