//! Runtime settings, layered from defaults, an optional config file and
//! `PONTREN_*` environment variables.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Shape of the merged configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
  /// JSON file with the initial records. The built-in seed is used when
  /// unset.
  #[serde(default)]
  pub seed_path: Option<PathBuf>,
  /// Where log output goes; the terminal itself is owned by the UI.
  pub log_file:  PathBuf,
  /// Event poll interval in milliseconds.
  pub tick_ms:   u64,
}

impl Settings {
  /// Merge the sources. A config path given explicitly must exist.
  pub fn load(config: Option<&Path>) -> Result<Self> {
    let mut builder = config::Config::builder()
      .set_default("log_file", "pontren.log")
      .context("setting default log file")?
      .set_default("tick_ms", 50)
      .context("setting default tick")?;

    if let Some(path) = config {
      builder = builder.add_source(config::File::from(path).required(true));
    }

    builder
      .add_source(config::Environment::with_prefix("PONTREN").try_parsing(true))
      .build()
      .context("failed to read config")?
      .try_deserialize()
      .context("failed to parse config")
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults_apply_without_sources() {
    let settings = Settings::load(None).unwrap();
    assert_eq!(settings.log_file, PathBuf::from("pontren.log"));
    assert_eq!(settings.tick_ms, 50);
  }

  #[test]
  fn missing_explicit_config_is_an_error() {
    assert!(Settings::load(Some(Path::new("/definitely/not/here.toml"))).is_err());
  }
}
