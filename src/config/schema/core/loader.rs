use super::Config;
use crate::error::ConfigError;
use anyhow::{Context, Result};
use directories::UserDirs;
use std::fs;
use std::path::{Path, PathBuf};

impl Config {
    /// `~/.novibe/config.toml`
    pub fn default_path() -> Result<PathBuf> {
        let home = UserDirs::new()
            .map(|u| u.home_dir().to_path_buf())
            .context("Could not find home directory")?;
        Ok(home.join(".novibe").join("config.toml"))
    }

    /// Load from `path` (or the default location), apply environment
    /// overrides, then validate. A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::default_path()?,
        };

        let mut config = if config_path.exists() {
            let contents = fs::read_to_string(&config_path)
                .map_err(ConfigError::Io)
                .with_context(|| format!("Failed to read {}", config_path.display()))?;
            toml::from_str::<Config>(&contents)
                .map_err(|e| ConfigError::Load(e.to_string()))
                .context("Failed to parse config file")?
        } else if path.is_some() {
            anyhow::bail!("config file not found: {}", config_path.display());
        } else {
            tracing::debug!(
                path = %config_path.display(),
                "no config file, using defaults"
            );
            Self::default()
        };
        config.config_path = config_path;

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Expand `~` and `$VAR` in a configured path.
    pub fn expand_path(raw: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(raw).into_owned())
    }
}
