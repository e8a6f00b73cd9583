mod descriptor;
mod engine;
mod interface;
mod middleware;
mod printer;
mod registry;

pub(crate) use descriptor::*;
pub(crate) use engine::{Action, Parser, TokenPosition};
pub(crate) use interface::*;
pub(crate) use printer::{OptionParameter, Printer};
pub(crate) use registry::{OptionRegistry, Reserved, ReservedFlags};

pub use engine::ParseError;
pub use middleware::{GeneralParser, ParseFailure, ParseOutcome};
pub use printer::ErrorContext;
pub use registry::ConfigError;
