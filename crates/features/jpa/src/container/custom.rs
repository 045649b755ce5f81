use super::{Configurer, require_jndi};
use crate::datasource::DataSource;
use crate::error::JpaError;
use crate::unit::{PersistenceUnit, TransactionType};
use tracing::debug;

pub const JDBC_DRIVER: &str = "javax.persistence.jdbc.driver";
pub const JDBC_URL: &str = "javax.persistence.jdbc.url";
pub const JDBC_USER: &str = "javax.persistence.jdbc.user";
pub const JDBC_PASSWORD: &str = "javax.persistence.jdbc.password";

/// A caller-named JTA data source.
#[derive(Debug, Clone, Copy, Default)]
pub struct CustomJta;

impl Configurer for CustomJta {
    fn name(&self) -> &'static str {
        "Custom JTA"
    }

    fn configure(&self, mut unit: PersistenceUnit, source: &DataSource) -> Result<PersistenceUnit, JpaError> {
        let jndi = require_jndi(source, self.name())?;

        unit.set_transaction_type(TransactionType::Jta);
        unit.set_jta_data_source(jndi);
        unit.clear_non_jta_data_source();

        debug!(unit = unit.name(), jndi, "Bound unit to JTA data source");
        Ok(unit)
    }
}

/// A caller-named non-JTA data source with resource-local transactions.
#[derive(Debug, Clone, Copy, Default)]
pub struct CustomNonJta;

impl Configurer for CustomNonJta {
    fn name(&self) -> &'static str {
        "Custom non-JTA"
    }

    fn configure(&self, mut unit: PersistenceUnit, source: &DataSource) -> Result<PersistenceUnit, JpaError> {
        let jndi = require_jndi(source, self.name())?;

        unit.set_transaction_type(TransactionType::ResourceLocal);
        unit.set_non_jta_data_source(jndi);
        unit.clear_jta_data_source();

        debug!(unit = unit.name(), jndi, "Bound unit to non-JTA data source");
        Ok(unit)
    }
}

/// A direct JDBC connection described by `javax.persistence.jdbc.*` properties.
#[derive(Debug, Clone, Copy, Default)]
pub struct CustomJdbc;

impl Configurer for CustomJdbc {
    fn name(&self) -> &'static str {
        "Custom JDBC"
    }

    fn configure(&self, mut unit: PersistenceUnit, source: &DataSource) -> Result<PersistenceUnit, JpaError> {
        let url = source.url().ok_or_else(|| JpaError::MissingConnection {
            message: "a JDBC URL is required".into(),
            context: None,
        })?;
        let driver = source.effective_driver().ok_or_else(|| JpaError::MissingConnection {
            message: "no JDBC driver class and no database type to derive one from".into(),
            context: None,
        })?;

        unit.set_transaction_type(TransactionType::ResourceLocal);
        unit.clear_jta_data_source();
        unit.clear_non_jta_data_source();
        unit.property(JDBC_DRIVER, driver);
        unit.property(JDBC_URL, url);
        if let Some(user) = source.username() {
            unit.property(JDBC_USER, user);
        }
        if let Some(password) = source.password() {
            unit.property(JDBC_PASSWORD, password);
        }

        debug!(unit = unit.name(), url, driver, "Configured direct JDBC connection");
        Ok(unit)
    }
}
