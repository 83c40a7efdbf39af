use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// How the catalog walker decides which pages to request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Pagination {
    /// Request pages `1..=page_count` regardless of the `next` cursor.
    #[default]
    Fixed,
    /// Start at page 1 and follow `next` until it is empty; `page_count` caps the walk.
    FollowNext,
}

/// How downloaded assets are named on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileNaming {
    /// Final URL path segment, verbatim. Equal segments overwrite each other.
    #[default]
    Basename,
    /// `<owner id>-<final segment>`, so assets of different records never collide.
    OwnerPrefixed,
}

/// HTTP timeouts (optional `[http]` section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Connect timeout for every request.
    pub connect_timeout_secs: u64,
    /// Total timeout for list and detail API calls.
    pub api_timeout_secs: u64,
    /// Asset downloads abort when throughput stays under 1 KiB/s for this long.
    pub asset_stall_secs: u64,
    /// Optional hard cap on a single asset download (None = no cap).
    pub asset_timeout_secs: Option<u64>,
    /// Optional User-Agent header.
    pub user_agent: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 15,
            api_timeout_secs: 30,
            asset_stall_secs: 60,
            asset_timeout_secs: None,
            user_agent: None,
        }
    }
}

/// Logging options (optional `[log]` section in config.toml).
///
/// `RUST_LOG` still wins over `filter` when set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `EnvFilter` directives, e.g. `"warn,cdl_core=info"`.
    pub filter: Option<String>,
    /// Log file (default `~/.local/state/cdl/cdl.log`).
    pub file: Option<PathBuf>,
}

/// Global configuration loaded from `~/.config/cdl/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CdlConfig {
    /// Paginated list endpoint; `page_size` and `page` are appended as query parameters.
    pub list_endpoint: String,
    /// Detail endpoint; the record id is appended as the last path segment.
    pub detail_endpoint: String,
    /// Base URL prefixed to each archive `torrent_path`.
    pub asset_base_url: String,
    pub page_size: u32,
    pub page_count: u32,
    pub list_snapshot_path: PathBuf,
    pub article_snapshot_path: PathBuf,
    pub image_dir: PathBuf,
    pub archive_dir: PathBuf,
    #[serde(default)]
    pub pagination: Pagination,
    #[serde(default)]
    pub file_naming: FileNaming,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub log: LogConfig,
}

impl Default for CdlConfig {
    fn default() -> Self {
        Self {
            list_endpoint: "http://fishtim.com/dev-api/list".to_string(),
            detail_endpoint: "http://fishtim.com/dev-api/article/".to_string(),
            asset_base_url: "http://sinacloud.net/fishtim/".to_string(),
            page_size: 10,
            page_count: 259,
            list_snapshot_path: PathBuf::from("list.json"),
            article_snapshot_path: PathBuf::from("articles.json"),
            image_dir: PathBuf::from("image"),
            archive_dir: PathBuf::from("torrent"),
            pagination: Pagination::Fixed,
            file_naming: FileNaming::Basename,
            http: HttpConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl CdlConfig {
    /// Checks values that would otherwise only fail deep inside a run.
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            anyhow::bail!("page_size must be at least 1");
        }
        if self.page_count == 0 {
            anyhow::bail!("page_count must be at least 1");
        }
        for (name, value) in [
            ("list_endpoint", &self.list_endpoint),
            ("detail_endpoint", &self.detail_endpoint),
            ("asset_base_url", &self.asset_base_url),
        ] {
            url::Url::parse(value).with_context(|| format!("{name} is not a valid URL: {value}"))?;
        }
        if let Some(filter) = &self.log.filter {
            tracing_subscriber::EnvFilter::try_new(filter)
                .with_context(|| format!("log.filter is not a valid filter: {filter}"))?;
        }
        Ok(())
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("cdl")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<CdlConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = CdlConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from_path(&path)
}

/// Load configuration from an explicit file (e.g. `--config`).
pub fn load_from_path(path: &Path) -> Result<CdlConfig> {
    let data = fs::read_to_string(path).with_context(|| format!("read config: {}", path.display()))?;
    let cfg: CdlConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    Ok(cfg)
}
