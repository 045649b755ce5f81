use crate::models::config::KilnConfig;
use config::{Config, Environment, File};
use std::borrow::Cow;
use std::path::{Path, PathBuf};

/// Looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "kiln.toml";

/// Custom error type for config loading.
#[kiln_derive::kiln_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads the layered tool configuration.
///
/// 1. **Base File**: `path` if given (then it must exist), otherwise `kiln.toml` in the working
///    directory when present.
/// 2. **Environment Overrides**: variables prefixed with `KILN__`, nested with double
///    underscores (e.g., `KILN__JPA__CONTAINER` maps to `jpa.container`).
///
/// Returns the configuration together with the file it was read from, if any.
///
/// # Errors
/// Returns [`ConfigError::Config`] if an explicit file is missing, a file or variable cannot be
/// parsed, or the values do not match [`KilnConfig`].
pub fn load_config(path: Option<&Path>) -> Result<(KilnConfig, Option<PathBuf>), ConfigError> {
    let (file, required) = path.map_or_else(
        || (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        |p| (p.to_path_buf(), true),
    );
    let source = (required || file.is_file()).then(|| file.clone());

    let config = Config::builder()
        .add_source(File::from(file.as_path()).required(required))
        .add_source(Environment::with_prefix("KILN").separator("__"))
        .build()
        .context(format!("Failed to build config from {}", file.display()))?
        .try_deserialize::<KilnConfig>()
        .context("Failed to deserialize config")?;

    Ok((config, source))
}
