use std::env;

use crate::constant::ERROR_EXIT_CODE;
use crate::parser::interface::UserInterface;
use crate::parser::printer::Printer;
use crate::parser::{Action, ErrorContext, ParseError, Parser};

/// A failed parse, with everything needed to report it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFailure {
    error: ParseError,
    context: Option<ErrorContext>,
    usage: String,
    hint: Option<String>,
}

impl ParseFailure {
    fn new(
        error: ParseError,
        context: Option<ErrorContext>,
        usage: String,
        hint: Option<String>,
    ) -> Self {
        Self {
            error,
            context,
            usage,
            hint,
        }
    }

    /// The error that stopped the parse.
    pub fn error(&self) -> &ParseError {
        &self.error
    }

    /// The command line, pointing at the offending token.
    /// Absent when the error does not belong to a single token (ex: [`ParseError::MissingOption`]).
    pub fn context(&self) -> Option<&ErrorContext> {
        self.context.as_ref()
    }

    /// The usage line of the parser.
    pub fn usage(&self) -> &str {
        &self.usage
    }

    fn report(self, user_interface: &(impl UserInterface + ?Sized)) {
        let ParseFailure {
            error,
            context,
            usage,
            hint,
        } = self;
        user_interface.print_error(error);

        if let Some(context) = context {
            user_interface.print_error_context(context);
        }

        user_interface.print(String::default());
        user_interface.print(usage);

        if let Some(hint) = hint {
            user_interface.print(String::default());
            user_interface.print(hint);
        }
    }
}

impl std::fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "error: {}", self.error)?;

        if let Some(context) = &self.context {
            writeln!(f, "{context}")?;
        }

        write!(f, "\n{}", self.usage)?;

        if let Some(hint) = &self.hint {
            write!(f, "\n\n{hint}")?;
        }

        Ok(())
    }
}

/// The reason a parse did not complete normally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// The help option was used; holds the help message.
    Help(String),
    /// The version option was used; holds the version text.
    Version(String),
    /// The command line was invalid.
    Error(ParseFailure),
}

impl ParseOutcome {
    /// The process exit code for this outcome: `0` for help and version, `2` for errors.
    pub fn exit_code(&self) -> i32 {
        match self {
            ParseOutcome::Help(_) | ParseOutcome::Version(_) => 0,
            ParseOutcome::Error(_) => ERROR_EXIT_CODE,
        }
    }

    fn report(self, user_interface: &(impl UserInterface + ?Sized)) {
        match self {
            ParseOutcome::Help(message) | ParseOutcome::Version(message) => {
                user_interface.print(message)
            }
            ParseOutcome::Error(failure) => failure.report(user_interface),
        }
    }
}

/// The configured command line parser.
/// Built via `CommandLineParser::build`.
pub struct GeneralParser<'a> {
    parser: Parser<'a>,
    printer: Printer,
    user_interface: Box<dyn UserInterface>,
}

impl<'a> GeneralParser<'a> {
    pub(crate) fn new(
        parser: Parser<'a>,
        printer: Printer,
        user_interface: Box<dyn UserInterface>,
    ) -> Self {
        Self {
            parser,
            printer,
            user_interface,
        }
    }

    /// Run the command line parser against the input tokens.
    ///
    /// Tokens are processed left to right, and each option use is written to its bound variable right away.
    /// Nothing is printed and the process is never exited; the caller decides how to report the outcome.
    ///
    /// If the help option (`-h` or `--help`) is encountered, returns `Err(ParseOutcome::Help)` straight away, ignoring any later tokens.
    /// Likewise for the version option (`-V` or `--version`).
    ///
    /// If at any point the parser encounters an error (ex: an unknown flag, an un-convertible value, etc), returns `Err(ParseOutcome::Error)`.
    /// Variables written before the error keep their new values.
    ///
    /// ### Example
    /// ```
    /// # use greet_builder as greet;
    /// use greet::{CommandLineParser, ParseOutcome, Parameter, Single};
    ///
    /// let mut age: u32 = 0;
    /// let parser = CommandLineParser::new("program")
    ///     .add(Parameter::option(Single::new(&mut age), Some("age"), None))
    ///     .build();
    ///
    /// let outcome = parser.parse_tokens(vec!["--age", "abc"].as_slice()).unwrap_err();
    ///
    /// assert_eq!(outcome.exit_code(), 2);
    /// ```
    pub fn parse_tokens(self, tokens: &[&str]) -> Result<(), ParseOutcome> {
        let GeneralParser {
            parser, printer, ..
        } = self;
        Self::run(parser, &printer, tokens)
    }

    fn run(parser: Parser<'a>, printer: &Printer, tokens: &[&str]) -> Result<(), ParseOutcome> {
        match parser.consume(tokens) {
            Ok(Action::Complete { .. }) => Ok(()),
            Ok(Action::PrintHelp) => Err(ParseOutcome::Help(printer.help())),
            Ok(Action::PrintVersion) => Err(ParseOutcome::Version(printer.version())),
            Err((position, error)) => Err(ParseOutcome::Error(ParseFailure::new(
                error,
                position.map(|position| ErrorContext::new(position, tokens)),
                printer.usage(),
                printer.hint(),
            ))),
        }
    }

    /// Run the parser, reporting any outcome through the user interface.
    /// Returns the exit code on any outcome other than a completed parse.
    pub(crate) fn invoke(self, tokens: &[&str]) -> Result<(), i32> {
        let GeneralParser {
            parser,
            printer,
            user_interface,
        } = self;

        Self::run(parser, &printer, tokens).map_err(|outcome| {
            let exit_code = outcome.exit_code();
            outcome.report(&*user_interface);
            exit_code
        })
    }

    /// Run the command line parser against the Cli [`env::args`].
    ///
    /// The help message, version text, or error diagnostic is printed, and the process exits (via `std::process::exit`) with code `0` for help/version or `2` for errors.
    /// See [`GeneralParser::parse_tokens`] for the details of parsing.
    pub fn parse(self) {
        let command_input: Vec<String> = env::args().skip(1).collect();
        let tokens: Vec<&str> = command_input.iter().map(AsRef::as_ref).collect();

        if let Err(exit_code) = self.invoke(tokens.as_slice()) {
            std::process::exit(exit_code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Flag, Parameter, Single};
    use crate::parser::util::{channel_interface, InMemoryInterface};
    use crate::parser::{OptionCapture, OptionParameter, OptionRegistry, Reserved};
    use crate::test::assert_contains;

    fn general_parser<'a>(
        name: &'a mut String,
        greeted: &'a mut bool,
        user_interface: Box<dyn UserInterface>,
    ) -> GeneralParser<'a> {
        let mut parameters: Vec<OptionParameter> = Vec::default();
        let mut options: Vec<OptionCapture<'a>> = Vec::default();

        for parameter in [
            Parameter::option(Single::new(name), Some("name"), Some('n')).required(),
            Parameter::option(Flag::new(greeted), None, Some('g')),
        ] {
            let inner = parameter.consume();
            parameters.push(OptionParameter::from(&inner));
            options.push(OptionCapture::from(inner));
        }

        let reserved = Reserved::default();
        parameters.extend(reserved.parameters());
        let registry = OptionRegistry::new(options, &reserved, None, false).unwrap();
        let printer = Printer::new(
            "program",
            None,
            Some("program 1.2.3".to_string()),
            parameters,
            reserved.hint(),
            None,
        );
        GeneralParser::new(Parser::new(registry), printer, user_interface)
    }

    #[test]
    fn parse_tokens_complete() {
        let mut name: String = String::default();
        let mut greeted: bool = false;
        let parser = general_parser(&mut name, &mut greeted, Box::new(InMemoryInterface::default()));

        parser.parse_tokens(&["-gn", "abc"]).unwrap();

        assert_eq!(name, "abc");
        assert!(greeted);
    }

    #[test]
    fn parse_tokens_help() {
        let mut name: String = String::default();
        let mut greeted: bool = false;
        let parser = general_parser(&mut name, &mut greeted, Box::new(InMemoryInterface::default()));

        let outcome = parser.parse_tokens(&["-g", "--help", "--bogus"]).unwrap_err();

        assert_eq!(outcome.exit_code(), 0);
        assert_matches!(outcome, ParseOutcome::Help(message) => {
            assert_contains!(message, "Usage: program [OPTIONS] --name <NAME>");
        });
        assert!(greeted);
    }

    #[test]
    fn parse_tokens_version() {
        let mut name: String = String::default();
        let mut greeted: bool = false;
        let parser = general_parser(&mut name, &mut greeted, Box::new(InMemoryInterface::default()));

        let outcome = parser.parse_tokens(&["-V"]).unwrap_err();

        assert_eq!(outcome, ParseOutcome::Version("program 1.2.3".to_string()));
        assert_eq!(outcome.exit_code(), 0);
    }

    #[test]
    fn parse_tokens_error() {
        let mut name: String = String::default();
        let mut greeted: bool = false;
        let parser = general_parser(&mut name, &mut greeted, Box::new(InMemoryInterface::default()));

        let outcome = parser.parse_tokens(&["-n", "abc", "def"]).unwrap_err();

        assert_eq!(outcome.exit_code(), 2);
        assert_matches!(outcome, ParseOutcome::Error(failure) => {
            assert_eq!(failure.error(), &ParseError::UnexpectedArgument { argument: "def".to_string() });
            assert_eq!(failure.context().unwrap().to_string(), "-n abc def\n       ^");
            assert_eq!(failure.usage(), "Usage: program [OPTIONS] --name <NAME>");
            assert_eq!(
                failure.to_string(),
                r#"error: unexpected argument 'def' found
-n abc def
       ^

Usage: program [OPTIONS] --name <NAME>

For more information, try '--help'."#
            );
        });
    }

    #[test]
    fn parse_tokens_missing_option() {
        let mut name: String = String::default();
        let mut greeted: bool = false;
        let parser = general_parser(&mut name, &mut greeted, Box::new(InMemoryInterface::default()));

        let outcome = parser.parse_tokens(&[]).unwrap_err();

        assert_matches!(outcome, ParseOutcome::Error(failure) => {
            assert_eq!(failure.context(), None);
            assert_eq!(
                failure.to_string(),
                r#"error: the following required arguments were not provided:
  --name <NAME>

Usage: program [OPTIONS] --name <NAME>

For more information, try '--help'."#
            );
        });
    }

    #[test]
    fn invoke_complete() {
        let mut name: String = String::default();
        let mut greeted: bool = false;
        let (sender, receiver) = channel_interface();
        let parser = general_parser(&mut name, &mut greeted, Box::new(sender));

        let result = parser.invoke(&["--name", "abc"]);

        assert_eq!(result, Ok(()));
        assert_eq!(receiver.consume(), (None, None, None));
        assert_eq!(name, "abc");
    }

    #[test]
    fn invoke_help() {
        let mut name: String = String::default();
        let mut greeted: bool = false;
        let (sender, receiver) = channel_interface();
        let parser = general_parser(&mut name, &mut greeted, Box::new(sender));

        let result = parser.invoke(&["-h"]);

        assert_eq!(result, Err(0));
        let message = receiver.consume_message();
        assert_contains!(message, "Usage: program [OPTIONS] --name <NAME>");
        assert_contains!(message, "-h, --help");
        assert_contains!(message, "-V, --version");
    }

    #[test]
    fn invoke_version() {
        let mut name: String = String::default();
        let mut greeted: bool = false;
        let (sender, receiver) = channel_interface();
        let parser = general_parser(&mut name, &mut greeted, Box::new(sender));

        let result = parser.invoke(&["--version"]);

        assert_eq!(result, Err(0));
        assert_eq!(receiver.consume_message(), "program 1.2.3");
    }

    #[test]
    fn invoke_error() {
        let mut name: String = String::default();
        let mut greeted: bool = false;
        let (sender, receiver) = channel_interface();
        let parser = general_parser(&mut name, &mut greeted, Box::new(sender));

        let result = parser.invoke(&["-g", "-g"]);

        assert_eq!(result, Err(2));
        let (message, error, error_context) = receiver.consume();
        assert_eq!(
            message.unwrap(),
            "\nUsage: program [OPTIONS] --name <NAME>\n\nFor more information, try '--help'."
        );
        assert_eq!(
            error.unwrap(),
            "the argument '-g' cannot be used multiple times"
        );
        assert_eq!(error_context.unwrap().to_string(), "-g -g\n    ^");
    }

    #[test]
    fn report_in_memory() {
        let interface = InMemoryInterface::default();
        let failure = ParseFailure::new(
            ParseError::MissingValue {
                flag: "-n".to_string(),
                argname: "NAME".to_string(),
            },
            None,
            "Usage: program [OPTIONS]".to_string(),
            None,
        );

        ParseOutcome::Error(failure).report(&interface);

        let (message, error, error_context) = interface.consume();
        assert_eq!(message.unwrap(), "\nUsage: program [OPTIONS]");
        assert_eq!(
            error.unwrap(),
            "a value is required for '-n <NAME>' but none was supplied"
        );
        assert_eq!(error_context, None);
    }
}
