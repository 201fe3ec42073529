#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by the signup workspace.
//!
//! Every crate in the workspace declares its failure modes as a single enum
//! annotated with [`macro@signup_error`]. The macro keeps those enums uniform:
//! struct-like variants, an optional `context` string attached at the call site,
//! and `?`-friendly conversions from upstream errors.
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! signup-derive.workspace = true
//! thiserror.workspace = true
//! ```

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Turns a struct-variant enum into a workspace error type.
///
/// Generated alongside the enum:
///
/// * `#[derive(Debug, thiserror::Error)]`, skipped for derives already listed.
/// * `<Name>Ext`, adding `.context(..)` to `Result<T, Name>` and to
///   `Result<T, Source>` for every variant holding a `source` (or `#[source]`/`#[from]`) field.
/// * `From<Source>` for those variants, so `?` converts upstream errors.
/// * `From<&'static str>` / `From<String>` into the `Internal` variant, when one exists.
/// * `Name::context(&self)`, returning the attached context string.
///
/// Variants must use named fields. A variant with a source also needs
/// `context: Option<Cow<'static, str>>`. The macro emits a private
/// `format_context` helper for `#[error(..)]` strings, so each module holds at
/// most one annotated enum.
///
/// # Example
///
/// ```rust,ignore
/// use signup_derive::signup_error;
/// use std::borrow::Cow;
///
/// #[signup_error]
/// pub enum DirectoryError {
///     #[error("Username already taken{}: {message}", format_context(.context))]
///     DuplicateUsername { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
///
///     #[error("Storage failure{}: {source}", format_context(.context))]
///     Storage { source: std::io::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal directory error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn load() -> Result<String, DirectoryError> {
///     std::fs::read_to_string("users.json").context("Reading user snapshot")
/// }
/// ```
#[proc_macro_attribute]
pub fn signup_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}
