use crate::datasource::DatabaseType;
use crate::error::JpaError;
use crate::unit::PersistenceUnit;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Provider identity of Hibernate 3.x/4.x.
pub const HIBERNATE: &str = "org.hibernate.ejb.HibernatePersistence";
/// Provider identity of Hibernate 4.3 and later.
pub const HIBERNATE_JPA: &str = "org.hibernate.jpa.HibernatePersistenceProvider";
pub const ECLIPSELINK: &str = "org.eclipse.persistence.jpa.PersistenceProvider";
pub const OPENJPA: &str = "org.apache.openjpa.persistence.PersistenceProviderImpl";

/// A JPA implementation whose development defaults kiln knows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Provider {
    #[default]
    #[serde(rename = "HIBERNATE")]
    Hibernate,
    #[serde(rename = "ECLIPSELINK")]
    EclipseLink,
    #[serde(rename = "OPENJPA")]
    OpenJpa,
}

impl Provider {
    pub const ALL: [Self; 3] = [Self::Hibernate, Self::EclipseLink, Self::OpenJpa];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Hibernate => "HIBERNATE",
            Self::EclipseLink => "ECLIPSELINK",
            Self::OpenJpa => "OPENJPA",
        }
    }

    /// The identity written into the unit's `provider` element.
    #[must_use]
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Hibernate => HIBERNATE,
            Self::EclipseLink => ECLIPSELINK,
            Self::OpenJpa => OPENJPA,
        }
    }

    /// Adds this provider's development defaults to `unit`.
    ///
    /// Runs after the container configurer; a known `database` also selects the Hibernate
    /// dialect.
    #[must_use]
    pub fn setup(self, mut unit: PersistenceUnit, database: Option<DatabaseType>) -> PersistenceUnit {
        match self {
            Self::Hibernate => {
                unit.property("hibernate.hbm2ddl.auto", "create-drop");
                unit.property("hibernate.show_sql", "true");
                unit.property("hibernate.format_sql", "true");
                if let Some(database) = database {
                    unit.property("hibernate.dialect", database.hibernate_dialect());
                }
            }
            Self::EclipseLink => {
                unit.property("eclipselink.ddl-generation", "drop-and-create-tables");
                unit.property("eclipselink.logging.level", "FINE");
            }
            Self::OpenJpa => {
                unit.property("openjpa.jdbc.SynchronizeMappings", "buildSchema(ForeignKeys=true)");
            }
        }
        unit
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Provider {
    type Err = JpaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = crate::normalize_name(s);
        Self::ALL
            .into_iter()
            .find(|p| p.name() == wanted || p.class_name() == s.trim())
            .ok_or_else(|| JpaError::UnknownProvider {
                message: format!("'{s}'").into(),
                context: None,
            })
    }
}
