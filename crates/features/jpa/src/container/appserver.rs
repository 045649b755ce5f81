use super::Configurer;
use crate::datasource::{DataSource, DatabaseType};
use crate::error::JpaError;
use crate::unit::{PersistenceUnit, TransactionType};
use tracing::{debug, warn};

/// An application server with a bundled default data source.
///
/// Always binds the unit to the server's own JTA data source; a caller-supplied JNDI name is
/// reported and ignored.
#[derive(Debug)]
pub struct ApplicationServer {
    name: &'static str,
    data_source: &'static str,
    database: DatabaseType,
}

impl ApplicationServer {
    #[must_use]
    pub const fn new(name: &'static str, data_source: &'static str, database: DatabaseType) -> Self {
        Self { name, data_source, database }
    }

    #[must_use]
    pub const fn data_source(&self) -> &'static str {
        self.data_source
    }
}

impl Configurer for ApplicationServer {
    fn name(&self) -> &'static str {
        self.name
    }

    fn configure(&self, mut unit: PersistenceUnit, source: &DataSource) -> Result<PersistenceUnit, JpaError> {
        if let Some(requested) = source.jndi_name().filter(|jndi| *jndi != self.data_source) {
            warn!(
                container = self.name,
                requested,
                default = self.data_source,
                "Ignoring custom data source; the container default is used"
            );
        }

        unit.set_transaction_type(TransactionType::Jta);
        unit.set_jta_data_source(self.data_source);
        unit.clear_non_jta_data_source();

        debug!(container = self.name, unit = unit.name(), "Bound unit to container data source");
        Ok(unit)
    }

    fn default_database(&self) -> Option<DatabaseType> {
        Some(self.database)
    }
}
