//! Builder module for `greet`.
//! See the `greet` crate documentation for full details.
#![deny(missing_docs)]
mod api;
mod constant;
mod model;
mod parser;
#[allow(missing_docs)]
pub mod prelude;

pub use api::*;
pub use model::*;
pub use parser::{ConfigError, ErrorContext, GeneralParser, ParseError, ParseFailure, ParseOutcome};

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
