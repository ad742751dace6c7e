use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use portfolio_advisor_core::models::settings::ClientSettings;

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "portfolio-advisor.toml";

/// Environment prefix; `ADVISOR__BASE_URL=...` sets `base_url`.
pub const ENV_PREFIX: &str = "ADVISOR";

/// Loads client settings from layered sources:
/// 1. built-in defaults (`ClientSettings::default`)
/// 2. the config file: `explicit` if given (must exist), otherwise
///    `portfolio-advisor.toml` if present
/// 3. `ADVISOR__*` environment variables
pub fn load_settings(explicit: Option<&Path>) -> Result<ClientSettings> {
    load_settings_with_env(explicit, None)
}

/// Same as [`load_settings`], with the environment supplied by the caller
/// instead of read from the process.
pub fn load_settings_with_env(
    explicit: Option<&Path>,
    env: Option<HashMap<String, String>>,
) -> Result<ClientSettings> {
    let file = match explicit {
        Some(path) => File::from(path.to_path_buf()).required(true),
        None => File::from(PathBuf::from(DEFAULT_CONFIG_FILE)).required(false),
    };

    let settings = Config::builder()
        .add_source(file)
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true)
                .source(env),
        )
        .build()
        .context("Failed to load configuration")?;

    let settings: ClientSettings = settings
        .try_deserialize()
        .context("Invalid configuration")?;

    Ok(settings)
}
