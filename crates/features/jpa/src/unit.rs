use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// How the unit's entity managers take part in transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TransactionType {
    #[serde(rename = "JTA")]
    Jta,
    #[serde(rename = "RESOURCE_LOCAL")]
    ResourceLocal,
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Jta => "JTA",
            Self::ResourceLocal => "RESOURCE_LOCAL",
        })
    }
}

/// The persistence-unit document being configured.
///
/// `name` and `provider` form the unit's identity; they are fixed by whoever creates the unit
/// and are read-only to configurers, which may only set the transaction settings and add or
/// overwrite properties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct PersistenceUnit {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    transaction_type: Option<TransactionType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    jta_data_source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    non_jta_data_source: Option<String>,
    properties: BTreeMap<String, String>,
}

impl PersistenceUnit {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            provider: None,
            transaction_type: None,
            jta_data_source: None,
            non_jta_data_source: None,
            properties: BTreeMap::new(),
        }
    }

    /// Sets the provider identity (e.g. [`crate::provider::HIBERNATE`]).
    #[must_use]
    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn provider(&self) -> Option<&str> {
        self.provider.as_deref()
    }

    #[must_use]
    pub const fn transaction_type(&self) -> Option<TransactionType> {
        self.transaction_type
    }

    #[must_use]
    pub fn jta_data_source(&self) -> Option<&str> {
        self.jta_data_source.as_deref()
    }

    #[must_use]
    pub fn non_jta_data_source(&self) -> Option<&str> {
        self.non_jta_data_source.as_deref()
    }

    #[must_use]
    pub const fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }

    #[must_use]
    pub fn property_value(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    pub const fn set_transaction_type(&mut self, transaction_type: TransactionType) {
        self.transaction_type = Some(transaction_type);
    }

    pub fn set_jta_data_source(&mut self, jndi_name: impl Into<String>) {
        self.jta_data_source = Some(jndi_name.into());
    }

    pub fn clear_jta_data_source(&mut self) {
        self.jta_data_source = None;
    }

    pub fn set_non_jta_data_source(&mut self, jndi_name: impl Into<String>) {
        self.non_jta_data_source = Some(jndi_name.into());
    }

    pub fn clear_non_jta_data_source(&mut self) {
        self.non_jta_data_source = None;
    }

    /// Sets `key` to `value`, replacing any earlier value. Returns the replaced value.
    pub fn property(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.properties.insert(key.into(), value.into())
    }

    pub fn remove_property(&mut self, key: &str) -> Option<String> {
        self.properties.remove(key)
    }
}
