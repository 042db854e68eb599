mod cli;
mod config;
mod delivery;
mod engine;
mod report;
mod sarif;

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::{Cli, ConvertArgs, EngineArgs, PublishArgs};
use config::RemoraConfig;
use delivery::{DeliveryClient, DeliveryTarget, DEFAULT_BASE_URL};
use engine::Engine;
use report::annotation::{InsightReport, Verdict};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("remora=debug")
    } else if cli.quiet {
        EnvFilter::new("remora=error")
    } else {
        EnvFilter::new("remora=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    info!("remora v{}", env!("CARGO_PKG_VERSION"));

    match &cli.command {
        cli::Commands::Convert(args) => {
            let report = run_engine(&args.engine)?;
            render(args, &report)?;
            exit_on_failure(&report);
        }
        cli::Commands::Publish(args) => {
            let report = run_engine(&args.engine)?;
            let client = build_client(args)?;
            client.publish(&report)?;
            exit_on_failure(&report);
        }
        cli::Commands::Init => {
            config::init_config()?;
        }
    }

    Ok(())
}

/// Read the SARIF document and run the conversion pipeline.
fn run_engine(args: &EngineArgs) -> Result<InsightReport> {
    let input = read_input(&args.input)?;
    let file_config = RemoraConfig::load(&config_search_root());
    let config = args.resolve(file_config.as_ref());
    let report = Engine::new(config).run(&input)?;
    Ok(report)
}

fn config_search_root() -> std::path::PathBuf {
    std::env::current_dir().unwrap_or_else(|_| std::path::PathBuf::from("."))
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read SARIF document from stdin")?;
        Ok(buffer)
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))
    }
}

fn render(args: &ConvertArgs, report: &InsightReport) -> Result<()> {
    match args.format.as_str() {
        "json" => {
            let output = report::json::render(report)?;
            if let Some(ref path) = args.out {
                std::fs::write(path, &output)?;
                info!("Report written to {}", path.display());
            } else {
                println!("{output}");
            }
        }
        _ => {
            report::terminal::render(report);
            if let Some(ref path) = args.out {
                let json_output = report::json::render(report)?;
                std::fs::write(path, &json_output)?;
                info!("JSON report also written to {}", path.display());
            }
        }
    }
    Ok(())
}

/// Assemble the delivery client from flags, config file, and environment.
fn build_client(args: &PublishArgs) -> Result<DeliveryClient> {
    let file = RemoraConfig::load(&config_search_root());
    let file_target = file.map(|f| f.target).unwrap_or_default();

    let target = DeliveryTarget {
        base_url: args
            .base_url
            .clone()
            .or(file_target.base_url)
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        workspace: args
            .workspace
            .clone()
            .or(file_target.workspace)
            .context("no workspace configured (--workspace or .remora.toml)")?,
        repository: args
            .repository
            .clone()
            .or(file_target.repository)
            .context("no repository configured (--repository or .remora.toml)")?,
        commit: args
            .commit
            .clone()
            .or(file_target.commit)
            .context("no commit configured (--commit or .remora.toml)")?,
    };

    let token = args
        .token
        .clone()
        .or_else(|| std::env::var("REMORA_TOKEN").ok())
        .context("no access token configured (--token or REMORA_TOKEN)")?;

    Ok(DeliveryClient::new(target, token))
}

fn exit_on_failure(report: &InsightReport) {
    if report.verdict == Verdict::Failed {
        std::process::exit(1);
    }
}
