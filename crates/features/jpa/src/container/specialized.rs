use super::Configurer;
use crate::datasource::{DataSource, DatabaseType};
use crate::error::JpaError;
use crate::provider::{ECLIPSELINK, HIBERNATE, HIBERNATE_JPA};
use crate::unit::PersistenceUnit;
use tracing::trace;

/// Properties a specialized container sets for units of particular providers.
#[derive(Debug, Clone, Copy)]
pub struct ProviderTuning {
    /// Provider identities this tuning applies to, compared exactly.
    pub providers: &'static [&'static str],
    pub properties: &'static [(&'static str, &'static str)],
}

impl ProviderTuning {
    #[must_use]
    pub fn applies_to(&self, provider: &str) -> bool {
        self.providers.iter().any(|p| *p == provider)
    }
}

pub const WEBLOGIC_TUNINGS: &[ProviderTuning] = &[
    ProviderTuning {
        providers: &[HIBERNATE],
        properties: &[(
            "hibernate.transaction.jta.platform",
            "org.hibernate.service.jta.platform.internal.WeblogicJtaPlatform",
        )],
    },
    ProviderTuning {
        providers: &[HIBERNATE_JPA],
        properties: &[(
            "hibernate.transaction.jta.platform",
            "org.hibernate.engine.transaction.jta.platform.internal.WeblogicJtaPlatform",
        )],
    },
    ProviderTuning { providers: &[ECLIPSELINK], properties: &[("eclipselink.target-server", "WebLogic")] },
];

/// A configurer refined from a more general one.
///
/// Delegates to `general` first, then overwrites the properties of every tuning whose provider
/// matches the unit's. A unit of any other provider comes back exactly as `general` left it.
/// `general` may itself be `Specialized`, so chains nest to any depth.
#[derive(Debug)]
pub struct Specialized<G> {
    name: &'static str,
    general: G,
    tunings: &'static [ProviderTuning],
}

impl<G: Configurer> Specialized<G> {
    #[must_use]
    pub const fn new(name: &'static str, general: G, tunings: &'static [ProviderTuning]) -> Self {
        Self { name, general, tunings }
    }

    #[must_use]
    pub const fn general(&self) -> &G {
        &self.general
    }
}

impl<G: Configurer> Configurer for Specialized<G> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn configure(&self, unit: PersistenceUnit, source: &DataSource) -> Result<PersistenceUnit, JpaError> {
        let mut unit = self.general.configure(unit, source)?;

        let matching: Vec<&ProviderTuning> = match unit.provider() {
            Some(provider) => self.tunings.iter().filter(|t| t.applies_to(provider)).collect(),
            None => Vec::new(),
        };
        for tuning in matching {
            for (key, value) in tuning.properties {
                trace!(container = self.name, key, value, "Applying provider tuning");
                unit.property(*key, *value);
            }
        }

        Ok(unit)
    }

    fn default_database(&self) -> Option<DatabaseType> {
        self.general.default_database()
    }
}
