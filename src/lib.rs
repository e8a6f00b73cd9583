//! `greet` is a short/long flag command line parser for Rust.
//!
//! Each option is declared against a variable owned by the caller.
//! Parsing writes straight into those variables, converting each token into the variable's type.
//! `greet` focuses on options only; there are no positional arguments or sub-commands.
//!
//! # Usage
//! ```no_run
#![doc = include_str!("../demos/greet.rs")]
//! ```
//!
//! Options come in four kinds, chosen by the field used to declare them:
//! * [`Single`]: takes exactly one value, at most once (ex: `--name Neely`).
//! * [`Flag`]: takes no value, at most once; sets a `bool` (ex: `-g`).
//! * [`Counter`]: takes no value, any number of times; counts the uses (ex: `-ttt`).
//! * [`Multi`]: takes one value per use, any number of times; collects every value (ex: `-p a -p b`).
//!
//! Values convert via [`prelude::Convertible`], which covers the primitive numbers, `char`, `String`, and `PathBuf`.
//! Implement it for your own types to use them in [`Single`] or [`Multi`] options.
//!
//! ```
//! # use greet::{CommandLineParser, Multi, Parameter, Single};
//! # use std::path::PathBuf;
//! let mut mode: char = 'r';
//! let mut offsets: Vec<i64> = Vec::default();
//! let mut output: PathBuf = PathBuf::default();
//! let parser = CommandLineParser::new("program")
//!     .add(Parameter::option(Single::new(&mut mode), Some("mode"), None))
//!     .add(Parameter::option(Multi::new(&mut offsets), None, Some('o')))
//!     .add(Parameter::option(Single::new(&mut output), Some("output"), None))
//!     .build_parser()
//!     .unwrap();
//!
//! parser
//!     .parse_tokens(&["--mode=w", "-o0x10", "-o-7", "--output", "out/greeting.txt"])
//!     .unwrap();
//! assert_eq!(mode, 'w');
//! assert_eq!(offsets, vec![16, -7]);
//! assert_eq!(output, PathBuf::from("out/greeting.txt"));
//! ```
//!
//! ### Defaults
//! A [`Single`] keeps its variable's value when the option is never used.
//! [`Single::default`] writes the default into the variable at declaration time, and the help message shows it.
//!
//! ```
//! # use greet::{CommandLineParser, Parameter, Single};
//! let mut age: u32 = 0;
//! let parser = CommandLineParser::new("program")
//!     .add(Parameter::option(Single::new(&mut age).default(18), Some("age"), None))
//!     .build_parser()
//!     .unwrap();
//!
//! parser.parse_tokens(&[]).unwrap();
//! assert_eq!(age, 18);
//! ```
//!
//! ### Outcomes
//! [`GeneralParser::parse`] reads the process arguments, reports any help, version, or error message, and exits as needed.
//! [`GeneralParser::parse_tokens`] does neither: the help/version text or the failure is returned as a [`ParseOutcome`].
//!
//! ```
//! # use greet::{CommandLineParser, Parameter, ParseError, ParseOutcome, Single};
//! let mut name = String::default();
//! let parser = CommandLineParser::new("program")
//!     .add(Parameter::option(Single::new(&mut name), Some("name"), Some('n')).required())
//!     .build_parser()
//!     .unwrap();
//!
//! match parser.parse_tokens(&[]) {
//!     Err(ParseOutcome::Error(failure)) => {
//!         assert_eq!(
//!             failure.error(),
//!             &ParseError::MissingOption { missing: vec!["--name <NAME>".to_string()] },
//!         );
//!     }
//!     _ => panic!("expected a missing option"),
//! }
//! ```
//!
//! # Cli Semantics
//! `greet` classifies each token, from left to right, as follows.
//!
//! * A token shorter than 2 characters, or not starting with `-`, is an argument.
//! Arguments are only valid as the value of the preceding option.
//! For example, `-` alone is always rejected.
//! * `--` ends option parsing.
//! Every remaining token is handed to the ignored collection (see [`CommandLineParser::ignored`]), or dropped when there is none.
//! * `--NAME` is a long flag.
//! Its value is either the next token, or joined with the first `=` character.
//! For example, `--name=a=b` is equivalent to `--name a=b`.
//! * `-N` is a short flag.
//! Multiple short flags may be clustered into a single token: `-abc` is equivalent to `-a -b -c`.
//! The first value-taking flag in a cluster takes the rest of the token as its value, dropping a leading `=`.
//! For example, with value-taking `-p`, `-gp=x` is equivalent to `-g -p x`, and `-gpx` is too.
//! * A value taken from the next token must not start with `-`, unless the option allows hyphen values.
//! Then any next token is used, `--` included.
//! Inline values (`--name=-x`, `-n-x`) are always accepted.
//!
//! Once all tokens are consumed, every required option must have been used.
//! The help option takes precedence over the version option, and both stop the parse immediately.
//!
//! ### Reserved options
//! `-h/--help` and `-V/--version` are registered by default.
//! They may be renamed ([`CommandLineParser::help_flags`], [`CommandLineParser::version_flags`]) or removed ([`CommandLineParser::no_help`], [`CommandLineParser::no_version`]).
//!
//! # Features
//! * `tracing_debug`: Log the parser's configuration and token matching at `debug` level, via `tracing`.
pub use greet_builder::*;
