use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "manabi-grammar.toml";
pub const DB_ENV_VAR: &str = "MANABI_GRAMMAR_DB";
pub const DEFAULT_ROOT: &str = ".";
pub const DEFAULT_OUTPUT: &str = "dist/manabi-grammar.sqlite";

/// Optional settings from `manabi-grammar.toml`.
///
/// ```toml
/// root = "~/src/manabi-grammar"
/// output = "dist/manabi-grammar.sqlite"
/// db = "~/.local/share/manabi/grammar.sqlite"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Source tree for `build`, `validate` and `stub`.
    #[serde(default)]
    pub root: Option<String>,
    /// Database written by `build`.
    #[serde(default)]
    pub output: Option<String>,
    /// Database read by `entry`; falls back to `output`.
    #[serde(default)]
    pub db: Option<String>,
}

impl Config {
    /// Load the config the CLI should use.
    ///
    /// An explicit path must exist. Otherwise `./manabi-grammar.toml` is
    /// tried, then `<config dir>/manabi-grammar/config.toml`; with neither
    /// present the defaults apply.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.is_file() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            return Self::load_from(path);
        }

        let local = PathBuf::from(CONFIG_FILE_NAME);
        if local.is_file() {
            return Self::load_from(&local);
        }

        match Self::user_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Missing file means default settings.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        Ok(config)
    }

    pub fn user_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("manabi-grammar").join("config.toml"))
    }

    pub fn source_root(&self, explicit: Option<&Path>) -> PathBuf {
        resolve(explicit, None, self.root.as_deref(), DEFAULT_ROOT)
    }

    pub fn output_path(&self, explicit: Option<&Path>) -> PathBuf {
        resolve(explicit, None, self.output.as_deref(), DEFAULT_OUTPUT)
    }

    /// Database path for `entry` commands:
    /// 1. `--db`
    /// 2. `MANABI_GRAMMAR_DB`
    /// 3. `db`, then `output` from the config file
    /// 4. the default build output
    pub fn database_path(&self, explicit: Option<&Path>) -> PathBuf {
        let env = std::env::var(DB_ENV_VAR).ok().filter(|v| !v.is_empty());
        self.database_path_with_env(explicit, env.as_deref())
    }

    fn database_path_with_env(&self, explicit: Option<&Path>, env: Option<&str>) -> PathBuf {
        let configured = self.db.as_deref().or(self.output.as_deref());
        resolve(explicit, env, configured, DEFAULT_OUTPUT)
    }
}

fn resolve(
    explicit: Option<&Path>,
    env: Option<&str>,
    configured: Option<&str>,
    default: &str,
) -> PathBuf {
    if let Some(path) = explicit {
        return expand_tilde(&path.to_string_lossy());
    }
    env.or(configured)
        .map(expand_tilde)
        .unwrap_or_else(|| PathBuf::from(default))
}

/// Expand tilde (~) in paths to the user's home directory
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}
