//! Persistence-unit configuration for Java EE deployment targets.
//!
//! Each [`ContainerKind`] resolves to a [`Configurer`] that binds a [`PersistenceUnit`] to the
//! target's data source and transaction type. Specialized targets such as WebLogic wrap a more
//! general configurer in [`Specialized`]: the general configuration runs first, then keys
//! specific to the unit's provider are overwritten.
//!
//! ```rust
//! use kiln_jpa::{ContainerKind, DataSource, JpaError, PersistenceUnit, provider};
//!
//! # fn main() -> Result<(), JpaError> {
//! let unit = PersistenceUnit::new("shop").with_provider(provider::HIBERNATE);
//! let source = DataSource::new().with_jndi_name("jdbc/shop");
//!
//! let unit = ContainerKind::Weblogic12c.configurer().configure(unit, &source)?;
//!
//! assert_eq!(unit.jta_data_source(), Some("jdbc/shop"));
//! assert!(unit.property_value("hibernate.transaction.jta.platform").is_some());
//! # Ok(())
//! # }
//! ```

mod container;
mod datasource;
mod error;
pub mod provider;
mod unit;

pub use container::{
    ApplicationServer, Configurer, ContainerKind, CustomJdbc, CustomJta, CustomNonJta, JDBC_DRIVER,
    JDBC_PASSWORD, JDBC_URL, JDBC_USER, ProviderTuning, Specialized, WEBLOGIC_TUNINGS, resolve,
};
pub use datasource::{DataSource, DatabaseType};
pub use error::{JpaError, JpaErrorExt};
pub use provider::Provider;
pub use unit::{PersistenceUnit, TransactionType};

/// Builds a complete unit: container settings first, then the provider's defaults.
///
/// The provider's dialect follows the data source's database, or the container's bundled one.
///
/// # Errors
///
/// Propagates the configurer's [`JpaError`] when `source` lacks what `kind` needs.
pub fn setup_unit(
    kind: ContainerKind,
    provider: Provider,
    unit_name: impl Into<String>,
    source: &DataSource,
) -> Result<PersistenceUnit, JpaError> {
    let configurer = kind.configurer();
    let unit = PersistenceUnit::new(unit_name).with_provider(provider.class_name());
    let unit = configurer.configure(unit, source).context(kind.name())?;
    let database = source.database().or_else(|| configurer.default_database());

    tracing::info!(container = %kind, %provider, unit = unit.name(), "Persistence unit configured");
    Ok(provider.setup(unit, database))
}

pub(crate) fn normalize_name(name: &str) -> String {
    name.trim().to_ascii_uppercase().replace('-', "_")
}
