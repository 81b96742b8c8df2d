use crate::config::AppConfig;
use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use std::path::Path;

/// Default configuration file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config/Config.toml";

/// Prefix for environment overrides, e.g. `PAIRARB_ARBITRAGE__FEE_RATE`.
pub const ENV_PREFIX: &str = "PAIRARB_";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads configuration by layering defaults, `config/Config.toml` and environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be parsed or fails validation.
    pub fn load() -> Result<AppConfig> {
        Self::load_from(DEFAULT_CONFIG_PATH, None)
    }

    /// Loads configuration with a specific profile layered over the base file.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be parsed or fails validation.
    pub fn load_with_profile(profile: &str) -> Result<AppConfig> {
        Self::load_from(DEFAULT_CONFIG_PATH, Some(profile))
    }

    /// Loads configuration from an explicit file, with an optional profile.
    ///
    /// Missing files are skipped; defaults fill anything they leave unset.
    /// The profile file sits next to the base file as `Config.{profile}.toml`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be parsed or fails validation.
    pub fn load_from(path: impl AsRef<Path>, profile: Option<&str>) -> Result<AppConfig> {
        let path = path.as_ref();
        let mut figment = Figment::new()
            .merge(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(path));

        if let Some(profile) = profile {
            let profile_path = path.with_file_name(format!("Config.{profile}.toml"));
            figment = figment.merge(Toml::file(profile_path));
        }

        let config: AppConfig = figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .with_context(|| format!("failed to load configuration from {}", path.display()))?;

        config.arbitrage.validate()?;
        tracing::debug!(path = %path.display(), ?profile, "Configuration loaded");

        Ok(config)
    }
}
