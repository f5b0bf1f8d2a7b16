//! Configuration for resource loading.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (RESLOAD_CONTENT_ROOT, RESLOAD_LOAD_TIMEOUT_SECS, RESLOAD_BASE_URL)
//! 2. Config file (.resload/config.yaml)
//! 3. Defaults (./data/resources, `.json`, `default` wrapper, no timeout)
//!
//! Config file discovery:
//! - Searches current directory and parents for .resload/config.yaml
//! - Falls back to the user config directory (e.g. ~/.config/resload/config.yaml)
//! - Paths in a project config file are relative to the project root

pub mod paths;

use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::adapters::DEFAULT_WRAPPER_KEY;
use crate::domain::Category;

/// Directory holding a project config file
pub const CONFIG_DIR: &str = ".resload";

/// Config file name
pub const CONFIG_FILE: &str = "config.yaml";

/// Content root used when nothing else is configured
pub const DEFAULT_CONTENT_ROOT: &str = "data/resources";

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub loading: Option<LoadingConfig>,
    #[serde(default)]
    pub site: Option<SiteConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentConfig {
    /// Content root holding one folder per category
    pub root: Option<String>,
    /// Document suffix
    pub extension: Option<String>,
    /// Key a document may nest its record under
    pub wrapper_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoadingConfig {
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    pub base_url: Option<String>,
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Content root holding one folder per category
    pub content_root: PathBuf,
    /// Document suffix (without the dot)
    pub extension: String,
    /// Key a document may nest its record under
    pub wrapper_key: String,
    /// Deadline for one loader invocation
    pub load_timeout: Option<Duration>,
    /// Site base URL for route listings
    pub base_url: String,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

impl ResolvedConfig {
    /// Get the folder holding one category's documents
    pub fn category_dir(&self, category: Category) -> PathBuf {
        self.content_root.join(category.as_str())
    }
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    if let Ok(mut current) = std::env::current_dir() {
        loop {
            let config_path = current.join(paths::project_config_file());
            if config_path.exists() {
                return Some(config_path);
            }

            if !current.pop() {
                break;
            }
        }
    }

    let user_config = dirs::config_dir()?.join("resload").join(CONFIG_FILE);
    user_config.exists().then_some(user_config)
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to the config file's base directory
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
            .canonicalize()
            .unwrap_or_else(|_| base.join(path_str))
    }
}

/// Directory relative config paths are resolved against
fn config_base_dir(config_path: &Path) -> PathBuf {
    let dir = config_path.parent().unwrap_or(Path::new("."));

    // .resload/config.yaml -> project root
    if dir.file_name().is_some_and(|name| name == CONFIG_DIR) {
        dir.parent().unwrap_or(Path::new(".")).to_path_buf()
    } else {
        dir.to_path_buf()
    }
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let cwd = std::env::current_dir().context("Failed to determine current directory")?;
    resolve_config(find_config_file(), &cwd, |key| std::env::var(key).ok())
}

/// Layer env, config file and defaults
fn resolve_config(
    config_file: Option<PathBuf>,
    cwd: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ResolvedConfig> {
    let file = config_file.as_deref().map(load_config_file).transpose()?;
    let base_dir = config_file
        .as_deref()
        .map(config_base_dir)
        .unwrap_or_else(|| cwd.to_path_buf());

    let content = file.as_ref().map(|f| f.content.clone()).unwrap_or_default();

    // Resolve content root
    let content_root = if let Some(env_root) = env("RESLOAD_CONTENT_ROOT") {
        PathBuf::from(env_root)
    } else if let Some(ref root) = content.root {
        resolve_path(&base_dir, root)
    } else {
        cwd.join(DEFAULT_CONTENT_ROOT)
    };

    let extension = content
        .extension
        .map(|ext| ext.trim_start_matches('.').to_string())
        .unwrap_or_else(|| "json".to_string());

    let wrapper_key = content
        .wrapper_key
        .unwrap_or_else(|| DEFAULT_WRAPPER_KEY.to_string());

    // Loader deadline
    let timeout_seconds = match env("RESLOAD_LOAD_TIMEOUT_SECS") {
        Some(raw) => Some(
            raw.trim()
                .parse::<u64>()
                .with_context(|| format!("Invalid RESLOAD_LOAD_TIMEOUT_SECS: {}", raw))?,
        ),
        None => file
            .as_ref()
            .and_then(|f| f.loading.as_ref())
            .and_then(|l| l.timeout_seconds),
    };
    let load_timeout = timeout_seconds.filter(|s| *s > 0).map(Duration::from_secs);

    let base_url = env("RESLOAD_BASE_URL")
        .or_else(|| {
            file.as_ref()
                .and_then(|f| f.site.as_ref())
                .and_then(|s| s.base_url.clone())
        })
        .unwrap_or_default();

    Ok(ResolvedConfig {
        content_root,
        extension,
        wrapper_key,
        load_timeout,
        base_url,
        config_file,
    })
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| format!("{:#}", e)));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}
