//! `cdl run` – run the whole pipeline once.

use anyhow::{Context, Result};
use cdl_core::config::{CdlConfig, FileNaming, Pagination};
use cdl_core::fetch::CurlFetcher;
use cdl_core::pipeline;
use cdl_core::report::{ItemFailure, RunSummary};
use std::time::Instant;

/// Command-line overrides applied on top of the loaded config.
#[derive(Debug, Clone, Default)]
pub struct RunOverrides {
    pub pages: Option<u32>,
    pub page_size: Option<u32>,
    pub follow_next: bool,
    pub owner_prefixed: bool,
}

impl RunOverrides {
    pub fn apply(&self, cfg: &mut CdlConfig) {
        if let Some(pages) = self.pages {
            cfg.page_count = pages;
        }
        if let Some(size) = self.page_size {
            cfg.page_size = size;
        }
        if self.follow_next {
            cfg.pagination = Pagination::FollowNext;
        }
        if self.owner_prefixed {
            cfg.file_naming = FileNaming::OwnerPrefixed;
        }
    }
}

pub fn run_pipeline(mut cfg: CdlConfig, overrides: &RunOverrides) -> Result<()> {
    overrides.apply(&mut cfg);
    cfg.validate().context("invalid configuration")?;

    let fetcher = CurlFetcher::new(cfg.http.clone());
    let mut failures: Vec<ItemFailure> = Vec::new();
    let started = Instant::now();

    let summary = pipeline::run(&cfg, &fetcher, &mut failures)?;

    println!("{}", summary_line(&summary, started.elapsed().as_secs_f64()));
    for failure in &failures {
        println!("  {}", failure);
    }
    Ok(())
}

fn summary_line(summary: &RunSummary, secs: f64) -> String {
    match summary.items_skipped() {
        0 => format!("Done in {:.1}s: {}", secs, summary),
        n => format!("Done in {:.1}s: {} ({} item(s) skipped)", secs, summary, n),
    }
}
