//! Traits which, typically, may be imported without concern: `use greet::prelude::*`.

use crate::api::ConversionError;

/// Behaviour to convert a type to and from a single command line token.
///
/// Any type implementing `Convertible` may be used with [`Single`](crate::Single) and [`Multi`](crate::Multi).
// Needs to be imported in order to implement a custom `Convertible`.
pub trait Convertible: Sized {
    /// Parse a value out of the raw token text.
    /// The entire token must be consumed.
    fn from_token(token: &str) -> Result<Self, ConversionError>;

    /// Format the value back into token text (used to document defaults).
    fn to_token(&self) -> String;
}

/// Behaviour for multiple (0 to many) items T to be collected together.
// Needs to be imported in order to implement a custom `Collectable`.
pub trait Collectable<T> {
    /// Add a value to this `Collectable`.
    fn add(&mut self, item: T);
}
