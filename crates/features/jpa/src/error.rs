use std::borrow::Cow;

/// Error types specific to persistence-unit configuration.
#[kiln_derive::kiln_error]
pub enum JpaError {
    /// The container binds the unit to a JNDI data source, but none was supplied.
    #[error("Missing JNDI data source{}: {message}", format_context(.context))]
    MissingDataSource { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A direct JDBC connection lacks its URL or driver.
    #[error("Missing JDBC connection setting{}: {message}", format_context(.context))]
    MissingConnection { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Unknown container type{}: {message}", format_context(.context))]
    UnknownContainer { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Unknown persistence provider{}: {message}", format_context(.context))]
    UnknownProvider { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Unknown database type{}: {message}", format_context(.context))]
    UnknownDatabase { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal persistence error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
