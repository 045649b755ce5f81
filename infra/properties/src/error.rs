use std::borrow::Cow;

/// A specialized [`PropertiesError`] enum of this crate.
#[kiln_derive::kiln_error]
pub enum PropertiesError {
    /// The backing file could not be read or rewritten.
    #[error("Properties store unavailable{}: {source}", format_context(.context))]
    Unavailable { source: std::io::Error, context: Option<Cow<'static, str>> },

    /// The backing file holds content that cannot be decoded; nothing was loaded.
    #[error("Malformed properties at line {line}{}: {message}", format_context(.context))]
    Malformed { line: usize, message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal properties error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
