//! CLI for the CDL catalog downloader.

mod commands;

use anyhow::Result;
use cdl_core::config::{self, CdlConfig};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::{run_config, run_pipeline, run_status, RunOverrides};

/// Top-level CLI for the CDL catalog downloader.
#[derive(Debug, Parser)]
#[command(name = "cdl")]
#[command(about = "CDL: fetch a paginated catalog, its detail records, images and archives", long_about = None)]
pub struct Cli {
    /// Config file (default: ~/.config/cdl/config.toml, created if missing).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log to stderr instead of the log file (`[log] file`, default ~/.local/state/cdl/cdl.log).
    #[arg(long, global = true)]
    pub log_stderr: bool,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Walk the catalog, download images, resolve details, download archives.
    Run {
        /// Number of catalog pages to request (overrides page_count).
        #[arg(long, value_name = "N")]
        pages: Option<u32>,
        /// Records per catalog page (overrides page_size).
        #[arg(long, value_name = "N")]
        page_size: Option<u32>,
        /// Follow the API's `next` cursor instead of requesting a fixed page range.
        #[arg(long)]
        follow_next: bool,
        /// Name assets `<record id>-<file name>` so equal file names don't overwrite each other.
        #[arg(long)]
        owner_prefixed: bool,
    },

    /// Show what the last run left on disk (snapshot sizes, file counts).
    Status,

    /// Print the config file path and the effective configuration.
    Config,
}

impl Cli {
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// Run the selected command with the already loaded `cfg`.
    pub fn run(self, cfg: CdlConfig) -> Result<()> {
        tracing::debug!("loaded config: {:?}", cfg);

        match self.command {
            CliCommand::Run {
                pages,
                page_size,
                follow_next,
                owner_prefixed,
            } => {
                let overrides = RunOverrides {
                    pages,
                    page_size,
                    follow_next,
                    owner_prefixed,
                };
                run_pipeline(cfg, &overrides)?;
            }
            CliCommand::Status => run_status(&cfg)?,
            CliCommand::Config => run_config(&cfg, self.config.as_deref())?,
        }

        Ok(())
    }

    pub fn load_config(&self) -> Result<CdlConfig> {
        match &self.config {
            Some(path) => config::load_from_path(path),
            None => config::load_or_init(),
        }
    }
}

#[cfg(test)]
mod tests;
