//! Wire sink and source capabilities
//!
//! Both client generations describe the same discriminated union of attribute
//! members, but with different Rust shapes. The encode and decode walks are
//! written once against these two small traits and instantiated per variant.

use std::collections::HashMap;

use dynadoc_core::SetKind;

/// Builds one wire attribute per member kind.
pub trait WireSink: Sized {
    /// Variant label used in logs
    const VARIANT: &'static str;

    /// The null marker
    fn null() -> Self;

    /// A boolean member
    fn boolean(value: bool) -> Self;

    /// A number member carrying decimal text
    fn number(text: String) -> Self;

    /// A binary member
    fn binary(bytes: Vec<u8>) -> Self;

    /// A string member
    fn string(text: String) -> Self;

    /// A list member
    fn list(items: Vec<Self>) -> Self;

    /// A map member
    fn map(entries: HashMap<String, Self>) -> Self;
}

/// Borrowed view of whichever member a wire attribute carries.
#[derive(Debug)]
pub enum WireView<'a, A> {
    /// Null marker
    Null,
    /// Boolean
    Bool(bool),
    /// Number text
    Number(&'a str),
    /// Raw bytes
    Binary(&'a [u8]),
    /// Text
    String(&'a str),
    /// List of attributes
    List(&'a [A]),
    /// Map of attributes
    Map(&'a HashMap<String, A>),
    /// One of the provider set kinds
    Set(SetKind),
    /// No member populated
    Empty,
}

/// Exposes the populated member of a wire attribute.
pub trait WireSource: Sized {
    /// Variant label used in logs
    const VARIANT: &'static str;

    /// The member this attribute carries
    fn view(&self) -> WireView<'_, Self>;
}
