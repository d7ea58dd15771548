use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use solar_core::{Config, catalog, provider::provider_from_config, radiation_for};
use std::path::PathBuf;

use crate::server;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "solar-dashboard", version, about = "Solar radiation dashboard for Dominican Republic provinces")]
pub struct Cli {
    /// Path to a TOML config file; defaults to the platform config directory.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Listen host, overriding `server.host`.
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Listen port, overriding `server.port`.
    #[arg(long, global = true, env = "PORT")]
    pub port: Option<u16>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the web dashboard (default).
    Serve,

    /// List the selectable provinces and their coordinates.
    Provinces,

    /// Fetch and print the reshaped radiation forecast for one province.
    Radiation {
        /// Province name exactly as listed by `provinces`.
        provincia: String,
    },

    /// Write a config file with default values.
    InitConfig {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            None | Some(Command::Serve) => {
                let mut config = Config::load(self.config.as_deref())?;
                if let Some(host) = self.host {
                    config.server.host = host;
                }
                if let Some(port) = self.port {
                    config.server.port = port;
                }
                server::run(config).await
            }
            Some(Command::Provinces) => {
                for p in catalog::provinces() {
                    println!("{}\t{}\t{}", p.name, p.latitude, p.longitude);
                }
                Ok(())
            }
            Some(Command::Radiation { provincia }) => {
                let config = Config::load(self.config.as_deref())?;
                let provider = provider_from_config(&config)?;
                let payload = radiation_for(provider.as_ref(), &provincia)
                    .await
                    .with_context(|| format!("No forecast for '{provincia}'"))?;
                println!("{}", serde_json::to_string_pretty(&payload)?);
                Ok(())
            }
            Some(Command::InitConfig { force }) => {
                let path = match self.config {
                    Some(path) => path,
                    None => Config::config_file_path()?,
                };
                if path.exists() && !force {
                    bail!("Config file already exists: {} (use --force to overwrite)", path.display());
                }
                Config::default().save_to(&path)?;
                println!("Wrote default config to {}", path.display());
                Ok(())
            }
        }
    }
}
