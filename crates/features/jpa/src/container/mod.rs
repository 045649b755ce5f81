//! Container kinds and the configurer each one resolves to.

mod appserver;
mod custom;
mod specialized;

pub use appserver::ApplicationServer;
pub use custom::{CustomJdbc, CustomJta, CustomNonJta, JDBC_DRIVER, JDBC_PASSWORD, JDBC_URL, JDBC_USER};
pub use specialized::{ProviderTuning, Specialized, WEBLOGIC_TUNINGS};

use crate::datasource::{DataSource, DatabaseType};
use crate::error::JpaError;
use crate::unit::PersistenceUnit;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Applies a deployment target's data-source and transaction settings to a persistence unit.
///
/// Implementations are stateless; the resolver hands out `'static` instances.
pub trait Configurer: fmt::Debug + Send + Sync {
    /// Human-readable name of the target.
    fn name(&self) -> &'static str;

    /// Configures `unit` and hands the same unit back.
    ///
    /// Implementations only set transaction settings and add or overwrite properties; the unit's
    /// name and provider identity pass through untouched.
    ///
    /// # Errors
    ///
    /// Returns [`JpaError::MissingDataSource`] or [`JpaError::MissingConnection`] when `source`
    /// lacks what the target needs.
    fn configure(&self, unit: PersistenceUnit, source: &DataSource) -> Result<PersistenceUnit, JpaError>;

    /// The database the target ships with, if any.
    fn default_database(&self) -> Option<DatabaseType> {
        None
    }
}

/// Every deployment target kiln can configure a persistence unit for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ContainerKind {
    #[serde(rename = "JBOSS_AS6")]
    JbossAs6,
    #[serde(rename = "JBOSS_AS7")]
    JbossAs7,
    #[serde(rename = "GLASSFISH_3")]
    Glassfish3,
    #[serde(rename = "CUSTOM_JDBC")]
    CustomJdbc,
    #[serde(rename = "CUSTOM_JTA")]
    CustomJta,
    #[serde(rename = "CUSTOM_NON_JTA")]
    CustomNonJta,
    #[serde(rename = "WEBLOGIC_12C")]
    Weblogic12c,
}

static JBOSS_AS6: ApplicationServer =
    ApplicationServer::new("JBoss AS 6", "java:/DefaultDS", DatabaseType::Hsqldb);
static JBOSS_AS7: ApplicationServer =
    ApplicationServer::new("JBoss AS 7", "java:jboss/datasources/ExampleDS", DatabaseType::H2);
static GLASSFISH_3: ApplicationServer =
    ApplicationServer::new("GlassFish 3", "jdbc/__default", DatabaseType::Derby);
static CUSTOM_JDBC: CustomJdbc = CustomJdbc;
static CUSTOM_JTA: CustomJta = CustomJta;
static CUSTOM_NON_JTA: CustomNonJta = CustomNonJta;
static WEBLOGIC_12C: Specialized<CustomJta> =
    Specialized::new("WebLogic 12c", CustomJta, WEBLOGIC_TUNINGS);

impl ContainerKind {
    pub const ALL: [Self; 7] = [
        Self::JbossAs6,
        Self::JbossAs7,
        Self::Glassfish3,
        Self::CustomJdbc,
        Self::CustomJta,
        Self::CustomNonJta,
        Self::Weblogic12c,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::JbossAs6 => "JBOSS_AS6",
            Self::JbossAs7 => "JBOSS_AS7",
            Self::Glassfish3 => "GLASSFISH_3",
            Self::CustomJdbc => "CUSTOM_JDBC",
            Self::CustomJta => "CUSTOM_JTA",
            Self::CustomNonJta => "CUSTOM_NON_JTA",
            Self::Weblogic12c => "WEBLOGIC_12C",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::JbossAs6 => "JBoss AS 6 default data source",
            Self::JbossAs7 => "JBoss AS 7 example data source",
            Self::Glassfish3 => "GlassFish 3 default data source",
            Self::CustomJdbc => "Direct JDBC connection, resource-local transactions",
            Self::CustomJta => "Caller-supplied JTA data source",
            Self::CustomNonJta => "Caller-supplied non-JTA data source",
            Self::Weblogic12c => "Caller-supplied JTA data source with WebLogic tuning",
        }
    }

    /// The configurer registered for this kind.
    #[must_use]
    pub fn configurer(self) -> &'static dyn Configurer {
        match self {
            Self::JbossAs6 => &JBOSS_AS6,
            Self::JbossAs7 => &JBOSS_AS7,
            Self::Glassfish3 => &GLASSFISH_3,
            Self::CustomJdbc => &CUSTOM_JDBC,
            Self::CustomJta => &CUSTOM_JTA,
            Self::CustomNonJta => &CUSTOM_NON_JTA,
            Self::Weblogic12c => &WEBLOGIC_12C,
        }
    }
}

/// Resolves `kind` to its configurer. Equivalent to [`ContainerKind::configurer`].
#[must_use]
pub fn resolve(kind: ContainerKind) -> &'static dyn Configurer {
    kind.configurer()
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ContainerKind {
    type Err = JpaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = crate::normalize_name(s);
        Self::ALL.into_iter().find(|kind| kind.name() == wanted).ok_or_else(|| {
            JpaError::UnknownContainer { message: format!("'{s}'").into(), context: None }
        })
    }
}

pub(crate) fn require_jndi<'a>(source: &'a DataSource, container: &str) -> Result<&'a str, JpaError> {
    source.jndi_name().ok_or_else(|| JpaError::MissingDataSource {
        message: format!("{container} needs a JNDI name").into(),
        context: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_resolves_to_a_distinct_configurer() {
        let names: std::collections::BTreeSet<_> =
            ContainerKind::ALL.iter().map(|kind| resolve(*kind).name()).collect();
        assert_eq!(names.len(), ContainerKind::ALL.len());
    }

    #[test]
    fn kinds_parse_leniently() {
        assert_eq!("weblogic-12c".parse::<ContainerKind>().unwrap(), ContainerKind::Weblogic12c);
        assert_eq!("jboss_as7".parse::<ContainerKind>().unwrap(), ContainerKind::JbossAs7);
        for kind in ContainerKind::ALL {
            assert_eq!(kind.to_string().parse::<ContainerKind>().unwrap(), kind);
        }
        assert!(matches!(
            "tomcat".parse::<ContainerKind>(),
            Err(JpaError::UnknownContainer { .. })
        ));
    }

    #[test]
    fn application_servers_report_default_database() {
        assert_eq!(resolve(ContainerKind::JbossAs7).default_database(), Some(DatabaseType::H2));
        assert_eq!(resolve(ContainerKind::Glassfish3).default_database(), Some(DatabaseType::Derby));
        assert_eq!(resolve(ContainerKind::CustomJta).default_database(), None);
    }
}
