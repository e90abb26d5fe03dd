//! SDK configuration: query defaults and logging, loaded from TOML with environment overrides.

use crate::errors::SdkError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_PAGE_SIZE: u64 = 100;
pub const DEFAULT_CHUNK_SIZE: u64 = 50;
pub const DEFAULT_PER_PAGE: u64 = 15;
pub const DEFAULT_SEQUENCE: &str = "id";

const CONFIG_FILE_NAME: &str = "phonecom-sdk.toml";

/// Defaults the builder falls back to when the caller does not say otherwise.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryDefaults {
    /// Page size used by `get()` when no explicit limit is set.
    pub page_size: u64,
    /// Batch size for chunked `update`/`delete`.
    pub chunk_size: u64,
    /// Page size for `for_page`.
    pub per_page: u64,
    /// Response field read by `insert_get_id`.
    pub sequence: String,
}

impl Default for QueryDefaults {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            chunk_size: DEFAULT_CHUNK_SIZE,
            per_page: DEFAULT_PER_PAGE,
            sequence: DEFAULT_SEQUENCE.to_string(),
        }
    }
}

impl QueryDefaults {
    /// # Errors
    /// Returns `Config` when a size is zero or the sequence field is empty.
    pub fn validate(&self) -> Result<(), SdkError> {
        for (name, v) in
            [("page_size", self.page_size), ("chunk_size", self.chunk_size), ("per_page", self.per_page)]
        {
            if v == 0 {
                return Err(SdkError::Config(format!("{name} must be greater than zero")));
            }
        }
        if self.sequence.is_empty() {
            return Err(SdkError::Config("sequence must not be empty".into()));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub dir: Option<PathBuf>,
    pub level: String,
    pub retention: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { dir: None, level: "info".to_string(), retention: 7 }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SdkConfig {
    pub query: QueryDefaults,
    pub log: LogConfig,
}

impl SdkConfig {
    /// # Errors
    /// Returns `Toml` for malformed input and `Config` for invalid values.
    pub fn from_toml_str(s: &str) -> Result<Self, SdkError> {
        let cfg: Self = toml::from_str(s)?;
        cfg.query.validate()?;
        Ok(cfg)
    }

    /// # Errors
    /// Returns `Io` if the file cannot be read, otherwise see [`SdkConfig::from_toml_str`].
    pub fn from_file(path: &Path) -> Result<Self, SdkError> {
        let s = std::fs::read_to_string(path)
            .map_err(|e| SdkError::Io(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&s)
    }

    /// Candidate config files, highest precedence first.
    #[must_use]
    pub fn search_paths(explicit: Option<&Path>) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = vec![];
        if let Some(p) = explicit {
            paths.push(p.to_path_buf());
        }
        if let Ok(p) = std::env::var("PHONECOM_SDK_CONFIG") {
            paths.push(PathBuf::from(p));
        }
        if let Some(dir) = dirs_next::config_dir() {
            paths.push(dir.join(CONFIG_FILE_NAME));
        }
        if let Ok(cur) = std::env::current_dir() {
            paths.push(cur.join(CONFIG_FILE_NAME));
        }
        paths
    }

    /// Load configuration. Precedence: explicit path > `PHONECOM_SDK_CONFIG` > user config dir >
    /// working directory > defaults, then environment overrides on top.
    ///
    /// # Errors
    /// An explicitly named file that is missing or invalid is an error; discovered files that fail
    /// to parse are skipped with a warning.
    pub fn load(explicit: Option<&Path>) -> Result<Self, SdkError> {
        let mut cfg = match explicit {
            Some(p) => Self::from_file(p)?,
            None => Self::discover(),
        };
        cfg.apply_env_overrides(|k| std::env::var(k).ok())?;
        Ok(cfg)
    }

    fn discover() -> Self {
        for p in Self::search_paths(None) {
            if !p.exists() {
                continue;
            }
            match Self::from_file(&p) {
                Ok(cfg) => {
                    log::debug!("loaded config from {}", p.display());
                    return cfg;
                }
                Err(e) => log::warn!("ignoring config {}: {e}", p.display()),
            }
        }
        Self::default()
    }

    /// Apply `PHONECOM_SDK_*` overrides read through `lookup`.
    ///
    /// # Errors
    /// Returns `Config` when a numeric override does not parse or the result is invalid.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), SdkError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let parse = |key: &str| -> Result<Option<u64>, SdkError> {
            lookup(key)
                .map(|s| {
                    s.trim()
                        .parse::<u64>()
                        .map_err(|e| SdkError::Config(format!("{key}: {e}")))
                })
                .transpose()
        };
        if let Some(v) = parse("PHONECOM_SDK_PAGE_SIZE")? {
            self.query.page_size = v;
        }
        if let Some(v) = parse("PHONECOM_SDK_CHUNK_SIZE")? {
            self.query.chunk_size = v;
        }
        if let Some(v) = parse("PHONECOM_SDK_PER_PAGE")? {
            self.query.per_page = v;
        }
        if let Some(level) = lookup("PHONECOM_SDK_LOG_LEVEL") {
            self.log.level = level;
        }
        if let Some(dir) = lookup("PHONECOM_SDK_LOG_DIR") {
            self.log.dir = Some(PathBuf::from(dir));
        }
        self.query.validate()
    }
}
