use kiln_jpa::{ContainerKind, DatabaseType, Provider};
use serde::Deserialize;
use std::path::PathBuf;

/// Top-level tool configuration (`kiln.toml` plus `KILN__*` overrides).
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KilnConfig {
    pub jpa: JpaDefaults,
    pub properties: PropertiesSettings,
    pub log: LogSettings,
}

/// Fallbacks for `jpa setup` flags that were not given.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct JpaDefaults {
    pub unit_name: String,
    pub container: Option<ContainerKind>,
    pub provider: Provider,
    pub database: Option<DatabaseType>,
}

impl Default for JpaDefaults {
    fn default() -> Self {
        Self {
            unit_name: "kiln-persistence-unit".to_owned(),
            container: None,
            provider: Provider::Hibernate,
            database: None,
        }
    }
}

#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PropertiesSettings {
    /// Single comment line written at the top of every rewritten file.
    pub header: Option<String>,
}

/// Optional log file output; console logs always go to stderr.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    pub directory: Option<PathBuf>,
    pub json: bool,
    pub filter: Option<String>,
}
