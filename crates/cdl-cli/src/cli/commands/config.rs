//! `cdl config` – show where the config lives and what is in effect.

use anyhow::Result;
use cdl_core::config::{self, CdlConfig};
use std::path::Path;

pub fn run_config(cfg: &CdlConfig, explicit_path: Option<&Path>) -> Result<()> {
    let path = match explicit_path {
        Some(p) => p.to_path_buf(),
        None => config::config_path()?,
    };
    println!("# {}", path.display());
    print!("{}", toml::to_string_pretty(cfg)?);
    Ok(())
}
