//! Study Planner MCP Server - Main Entry Point
//!
//! The actual implementation is in the `study_planner` library.

use anyhow::Result;
use clap::{CommandFactory, Parser};
use mcp_attr::server::serve_stdio;
use std::path::PathBuf;
use study_planner::{Config, StudyPlannerHandler, logging};
use tracing::info;

/// Study Planner MCP Server - tasks, habits and a Pomodoro timer via Model Context Protocol
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding the planner data
    data_dir: PathBuf,

    /// Path to a TOML config file
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Check if no arguments were provided (except the program name)
    if std::env::args().len() == 1 {
        let mut cmd = Args::command();
        cmd.print_help().ok();
        println!();
        std::process::exit(2);
    }

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    logging::init(config.logging.filter.as_deref());

    let handler = StudyPlannerHandler::new(&args.data_dir, &config)?;
    let ticker = handler.spawn_ticker(config.tick_interval());
    info!(data_dir = %args.data_dir.display(), "study planner server starting");

    serve_stdio(handler).await?;
    ticker.abort();
    Ok(())
}
