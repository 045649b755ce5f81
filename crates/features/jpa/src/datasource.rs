use crate::error::JpaError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The databases kiln knows JDBC drivers and dialects for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DatabaseType {
    #[serde(rename = "H2")]
    H2,
    #[serde(rename = "HSQLDB")]
    Hsqldb,
    #[serde(rename = "DERBY")]
    Derby,
    #[serde(rename = "MYSQL")]
    MySql,
    #[serde(rename = "POSTGRES")]
    Postgres,
    #[serde(rename = "ORACLE")]
    Oracle,
    #[serde(rename = "SQL_SERVER")]
    SqlServer,
    #[serde(rename = "DB2")]
    Db2,
}

impl DatabaseType {
    pub const ALL: [Self; 8] = [
        Self::H2,
        Self::Hsqldb,
        Self::Derby,
        Self::MySql,
        Self::Postgres,
        Self::Oracle,
        Self::SqlServer,
        Self::Db2,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::H2 => "H2",
            Self::Hsqldb => "HSQLDB",
            Self::Derby => "DERBY",
            Self::MySql => "MYSQL",
            Self::Postgres => "POSTGRES",
            Self::Oracle => "ORACLE",
            Self::SqlServer => "SQL_SERVER",
            Self::Db2 => "DB2",
        }
    }

    #[must_use]
    pub const fn driver_class(self) -> &'static str {
        match self {
            Self::H2 => "org.h2.Driver",
            Self::Hsqldb => "org.hsqldb.jdbcDriver",
            Self::Derby => "org.apache.derby.jdbc.EmbeddedDriver",
            Self::MySql => "com.mysql.jdbc.Driver",
            Self::Postgres => "org.postgresql.Driver",
            Self::Oracle => "oracle.jdbc.OracleDriver",
            Self::SqlServer => "com.microsoft.sqlserver.jdbc.SQLServerDriver",
            Self::Db2 => "com.ibm.db2.jcc.DB2Driver",
        }
    }

    #[must_use]
    pub const fn hibernate_dialect(self) -> &'static str {
        match self {
            Self::H2 => "org.hibernate.dialect.H2Dialect",
            Self::Hsqldb => "org.hibernate.dialect.HSQLDialect",
            Self::Derby => "org.hibernate.dialect.DerbyDialect",
            Self::MySql => "org.hibernate.dialect.MySQLDialect",
            Self::Postgres => "org.hibernate.dialect.PostgreSQLDialect",
            Self::Oracle => "org.hibernate.dialect.OracleDialect",
            Self::SqlServer => "org.hibernate.dialect.SQLServerDialect",
            Self::Db2 => "org.hibernate.dialect.DB2Dialect",
        }
    }
}

impl fmt::Display for DatabaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DatabaseType {
    type Err = JpaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = crate::normalize_name(s);
        Self::ALL.into_iter().find(|db| db.name() == wanted).ok_or_else(|| {
            JpaError::UnknownDatabase { message: format!("'{s}'").into(), context: None }
        })
    }
}

/// Connection details supplied by the caller, consumed by configurers.
///
/// Built with the `with_*` methods; blank strings count as absent.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct DataSource {
    jndi_name: Option<String>,
    database: Option<DatabaseType>,
    jdbc_driver: Option<String>,
    url: Option<String>,
    username: Option<String>,
    password: Option<String>,
}

fn present(value: impl Into<String>) -> Option<String> {
    let value = value.into();
    (!value.trim().is_empty()).then_some(value)
}

impl DataSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_jndi_name(mut self, jndi_name: impl Into<String>) -> Self {
        self.jndi_name = present(jndi_name);
        self
    }

    #[must_use]
    pub const fn with_database(mut self, database: DatabaseType) -> Self {
        self.database = Some(database);
        self
    }

    #[must_use]
    pub fn with_jdbc_driver(mut self, driver: impl Into<String>) -> Self {
        self.jdbc_driver = present(driver);
        self
    }

    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = present(url);
        self
    }

    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = present(username);
        self
    }

    #[must_use]
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = present(password);
        self
    }

    #[must_use]
    pub fn jndi_name(&self) -> Option<&str> {
        self.jndi_name.as_deref()
    }

    #[must_use]
    pub const fn database(&self) -> Option<DatabaseType> {
        self.database
    }

    #[must_use]
    pub fn jdbc_driver(&self) -> Option<&str> {
        self.jdbc_driver.as_deref()
    }

    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    #[must_use]
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    /// The explicit driver class, or the catalogue driver of the database type.
    #[must_use]
    pub fn effective_driver(&self) -> Option<&str> {
        self.jdbc_driver().or_else(|| self.database.map(DatabaseType::driver_class))
    }
}

impl fmt::Debug for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataSource")
            .field("jndi_name", &self.jndi_name)
            .field("database", &self.database)
            .field("jdbc_driver", &self.jdbc_driver)
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}
