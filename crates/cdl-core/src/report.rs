//! Per-item failure reporting and run summaries.
//!
//! Stages never abort on a single record. Each skipped record is handed to a
//! [`FailureSink`] (and logged), so callers can see exactly what is missing
//! from the snapshots and asset directories.

use std::fmt;

/// Which asset downloader produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Image,
    Archive,
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetKind::Image => write!(f, "image"),
            AssetKind::Archive => write!(f, "archive"),
        }
    }
}

/// A record or asset that was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemFailure {
    /// Detail fetch or decode failed; no detail record exists for `id`.
    Detail {
        id: i64,
        title: String,
        image: String,
        reason: String,
    },
    /// Asset fetch or write failed.
    Asset {
        kind: AssetKind,
        owner_id: i64,
        owner_title: String,
        url: String,
        reason: String,
    },
}

impl fmt::Display for ItemFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemFailure::Detail {
                id,
                title,
                image,
                reason,
            } => write!(f, "detail {id} ({title}, image {image}): {reason}"),
            ItemFailure::Asset {
                kind,
                owner_id,
                owner_title,
                url,
                reason,
            } => write!(f, "{kind} {url} of {owner_id} ({owner_title}): {reason}"),
        }
    }
}

/// Receives every skipped item.
pub trait FailureSink {
    fn item_skipped(&mut self, failure: ItemFailure);
}

/// Collects failures in order.
impl FailureSink for Vec<ItemFailure> {
    fn item_skipped(&mut self, failure: ItemFailure) {
        self.push(failure);
    }
}

/// Outcome of one asset downloader pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssetStats {
    /// URLs attempted.
    pub attempted: usize,
    /// Files written (including overwrites).
    pub written: usize,
    /// Writes that replaced a file written earlier in the same pass.
    pub overwritten: usize,
    pub failed: usize,
}

/// Counts for a whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub summaries: usize,
    pub details: usize,
    pub images: AssetStats,
    pub archives: AssetStats,
}

impl RunSummary {
    /// Summaries that did not resolve to a detail record.
    pub fn details_skipped(&self) -> usize {
        self.summaries.saturating_sub(self.details)
    }

    /// Everything left out: unresolved details plus failed asset downloads.
    pub fn items_skipped(&self) -> usize {
        self.details_skipped() + self.images.failed + self.archives.failed
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} summaries, {} details, {}/{} images, {}/{} archives",
            self.summaries,
            self.details,
            self.images.written,
            self.images.attempted,
            self.archives.written,
            self.archives.attempted
        )
    }
}
