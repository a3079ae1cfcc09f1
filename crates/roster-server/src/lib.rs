//! Configuration and command implementations behind the `roster` binary.

pub mod import;

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Runtime configuration, layered from `roster.toml` and `ROSTER_*`
/// environment variables.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ServerConfig {
  pub host:            String,
  pub port:            u16,
  pub store_path:      PathBuf,
  /// Creator recorded by `roster import` when `--created-by` is not given.
  pub default_creator: Option<String>,
}

/// Read `path` (if it exists) under the `ROSTER_` environment, falling back to
/// built-in defaults for anything neither sets.
pub fn load_config(path: &Path) -> anyhow::Result<ServerConfig> {
  let settings = config::Config::builder()
    .set_default("host", "127.0.0.1")?
    .set_default("port", 8080)?
    .set_default("store_path", "~/.local/share/roster/roster.db")?
    .add_source(config::File::from(path).required(false))
    .add_source(config::Environment::with_prefix("ROSTER"))
    .build()
    .context("failed to read config file")?;

  let mut cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;
  cfg.store_path = expand_tilde(&cfg.store_path);
  Ok(cfg)
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
