use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::api::{ApiClient, ContainerSummary, SnapshotLines};
use crate::config::Config;
use crate::export;

/// Sandtail - sandbox container log viewer
#[derive(Parser, Debug)]
#[command(name = "sandtail")]
#[command(version)]
#[command(about = "Live and snapshot log viewer for sandbox containers")]
#[command(long_about = "Sandtail tails logs from sandboxed execution containers.

It attaches to the platform's streaming endpoint for live, pausable log
views, fetches bounded snapshots of recent lines over the HTTP API, and
exports either view to a plain-text file.

Quick start:
  1. Run 'sandtail --init' to generate .sandtail.toml
  2. Set server_url (and token, if your platform requires one)
  3. Run 'sandtail' to open the TUI, or 'sandtail logs <container>' for a
     one-shot snapshot")]
pub struct Cli {
    /// Path to config file (defaults to .sandtail.toml)
    #[arg(short, long, default_value = ".sandtail.toml")]
    pub config: String,

    /// Platform URL (overrides config file setting)
    #[arg(short, long)]
    pub server: Option<String>,

    /// Initialize a new .sandtail.toml config file
    #[arg(long)]
    pub init: bool,

    /// Subcommand for one-shot operations (no TUI)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// One-shot subcommands that talk to the platform API and exit
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List containers and their status
    Containers,
    /// Fetch a snapshot of recent logs for a container
    Logs {
        /// Container name or numeric id
        container: String,
        /// How many recent lines to fetch
        #[arg(short, long, default_value_t = 100, value_parser = parse_line_count)]
        lines: u32,
        /// Write "{name}-logs.txt" into this directory instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn parse_line_count(value: &str) -> Result<u32, String> {
    let count: u32 = value
        .parse()
        .map_err(|_| format!("'{}' is not a number", value))?;
    if SnapshotLines::from_count(count).is_some() {
        Ok(count)
    } else {
        Err(format!(
            "line count must be one of {:?}",
            SnapshotLines::CHOICES
        ))
    }
}

/// Write a fresh config file for the user to edit (the `--init` flag).
pub fn init_config(path: &str) -> anyhow::Result<()> {
    if Path::new(path).exists() {
        anyhow::bail!("Config file {} already exists", path);
    }
    Config::default().save(path)?;
    println!("Created {}", path);
    println!("Edit it to point at your platform, then run 'sandtail'.");
    Ok(())
}

/// Execute a one-shot subcommand against the platform API.
pub fn run_command(command: &Commands, config: &Config) -> anyhow::Result<()> {
    let client = ApiClient::new(&config.server_url, config.token.clone());
    match command {
        Commands::Containers => {
            let containers = client.list_containers()?;
            if containers.is_empty() {
                println!("No containers found");
                return Ok(());
            }
            for container in &containers {
                println!(
                    "{:>6}  {:<24} {:<10} {}",
                    container.id,
                    container.name,
                    container.status.as_deref().unwrap_or("unknown"),
                    container.image.as_deref().unwrap_or("-"),
                );
            }
            Ok(())
        }
        Commands::Logs {
            container,
            lines,
            output,
        } => {
            let summary = resolve_container(&client, container)?;
            let lines = SnapshotLines::from_count(*lines)
                .context("Invalid line count")?;
            let logs = client.fetch_logs(summary.id, lines)?;
            match output {
                Some(dir) => {
                    let path = export::export_snapshot(&logs, &summary.name, dir)?;
                    println!("Wrote {} lines to {}", logs.len(), path.display());
                }
                None => {
                    for line in &logs {
                        println!("{}", line);
                    }
                }
            }
            Ok(())
        }
    }
}

/// Accept either a container name or a numeric id on the command line.
fn resolve_container(client: &ApiClient, name_or_id: &str) -> anyhow::Result<ContainerSummary> {
    let containers = client.list_containers()?;
    if let Ok(id) = name_or_id.parse::<i64>() {
        if let Some(found) = containers.iter().find(|c| c.id == id) {
            return Ok(found.clone());
        }
    }
    containers
        .into_iter()
        .find(|c| c.name == name_or_id)
        .ok_or_else(|| anyhow::anyhow!("Container '{}' not found", name_or_id))
}
