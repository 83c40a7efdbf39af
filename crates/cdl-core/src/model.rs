//! Records exchanged with the catalog API and persisted in snapshots.
//!
//! Field names follow the remote JSON keys. The API is loosely typed, so every
//! record tolerates missing fields (they decode to empty values).

use serde::{Deserialize, Serialize};

/// A `(year, article_id)` pair attached to both summary and detail records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct YearArticleRef {
    pub year: i64,
    pub article_id: i64,
}

/// Catalog entry as returned by the paginated list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryRecord {
    pub id: i64,
    pub title: String,
    pub description: String,
    /// Absolute image URL.
    pub image: String,
    #[serde(rename = "year")]
    pub years: Vec<YearArticleRef>,
}

/// Downloadable archive referenced by a detail record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetRef {
    /// Display name, e.g. `MOX7MI6`.
    #[serde(rename = "torrent")]
    pub asset_name: String,
    /// Path relative to the asset base URL, e.g. `bt/MOX7MI6.rar`.
    #[serde(rename = "torrent_path")]
    pub asset_path: String,
    pub article_id: i64,
}

/// Full record fetched from the detail endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetailRecord {
    pub id: i64,
    #[serde(rename = "year")]
    pub years: Vec<YearArticleRef>,
    #[serde(rename = "torrent")]
    pub assets: Vec<AssetRef>,
    pub title: String,
    /// The API spells this key `descriptiion`; snapshots keep that spelling.
    #[serde(rename = "descriptiion", alias = "description")]
    pub description: String,
    pub content: String,
    pub image: String,
}

/// One page of the list endpoint. Not persisted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CatalogPage {
    pub count: i64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<SummaryRecord>,
}

impl CatalogPage {
    /// The `next` cursor, if the API returned a non-empty one.
    pub fn next_url(&self) -> Option<&str> {
        self.next.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}
