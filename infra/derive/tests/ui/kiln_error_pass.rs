use kiln_derive::kiln_error;
use std::borrow::Cow;

#[kiln_error]
pub enum StoreError {
    #[error("Store unavailable{}: {source}", format_context(.context))]
    Unavailable { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Malformed line {line}{}: {message}", format_context(.context))]
    Malformed { line: usize, message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn open() -> Result<(), StoreError> {
    let io: Result<(), std::io::Error> = Err(std::io::Error::other("disk"));
    io.context("Loading store")
}

fn main() {
    let err = open().unwrap_err();
    assert_eq!(err.to_string(), "Store unavailable (Loading store): disk");

    let err: StoreError = "boom".into();
    assert!(matches!(err, StoreError::Internal { .. }));

    let relabelled: Result<(), StoreError> = Err(StoreError::from(String::from("late")));
    let err = relabelled.context("retagged").unwrap_err();
    assert_eq!(err.to_string(), "Internal error (retagged): late");

    let converted: StoreError = std::io::Error::other("raw").into();
    assert!(matches!(converted, StoreError::Unavailable { context: None, .. }));
}
