#![allow(unreachable_pub)]

//! # Derive
//!
//! Procedural macros shared by the `kiln` crates.
//!
//! The only macro today is [`macro@kiln_error`], which turns a plain enum into a
//! `thiserror` error type with context propagation. Consumers add the crate as a regular
//! dependency together with `thiserror`:
//!
//! ```toml
//! [dependencies]
//! kiln-derive.workspace = true
//! thiserror.workspace = true
//! ```

mod error;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Turns an enum into a domain error type with context support.
///
/// # Generated Items
///
/// * `#[derive(Debug, thiserror::Error)]` (skipped for traits that are already derived).
/// * A `<Name>Ext<T>` trait with `.context(..)`, implemented for `Result<T, Name>` and for
///   `Result<T, Source>` of every variant that wraps a `source`.
/// * `From<Source>` for every variant that wraps a `source`.
/// * `From<&'static str>` and `From<String>` when an `Internal` variant is present.
/// * A private `format_context` helper to render the optional context in `#[error]`.
///
/// # Requirements
///
/// * Every variant uses named fields.
/// * A variant with a `source` field (or a field tagged `#[source]`/`#[from]`) must also have
///   `context: Option<Cow<'static, str>>`.
///
/// # Example
///
/// ```rust,ignore
/// use kiln_derive::kiln_error;
/// use std::borrow::Cow;
///
/// #[kiln_error]
/// pub enum StoreError {
///     #[error("Store unavailable{}: {source}", format_context(.context))]
///     Unavailable { source: std::io::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal store error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn read(path: &str) -> Result<String, StoreError> {
///     std::fs::read_to_string(path).context("Loading store")
/// }
/// ```
#[proc_macro_attribute]
pub fn kiln_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    error::expand(input).into()
}
