use crate::api::Parameter;
use crate::parser::{
    ConfigError, ConsoleInterface, GeneralParser, OptionCapture, OptionParameter, OptionRegistry,
    Parser, Printer, Reserved, ReservedFlags, UserInterface,
};

/// The base command line parser.
///
/// ### Example
/// ```
/// # use greet_builder as greet;
/// use greet::CommandLineParser;
///
/// let parser = CommandLineParser::new("program")
///     // Configure with CommandLineParser::add.
///     .build();
/// parser.parse_tokens(&[]).unwrap();
/// ```
pub struct CommandLineParser<'a> {
    program: String,
    about: Option<String>,
    version: Option<String>,
    option_parameters: Vec<OptionParameter>,
    option_captures: Vec<OptionCapture<'a>>,
    ignored: Option<&'a mut Vec<String>>,
    reserved: Reserved,
    allow_hyphen: bool,
    deferred_error: Option<ConfigError>,
}

impl<'a> CommandLineParser<'a> {
    /// Create a command line parser.
    ///
    /// ### Example
    /// ```
    /// # use greet_builder as greet;
    /// use greet::CommandLineParser;
    ///
    /// let parser = CommandLineParser::new("program")
    ///     .build();
    ///
    /// parser.parse_tokens(vec![].as_slice()).unwrap();
    /// ```
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            about: None,
            version: None,
            option_parameters: Vec::default(),
            option_captures: Vec::default(),
            ignored: None,
            reserved: Reserved::default(),
            allow_hyphen: false,
            deferred_error: None,
        }
    }

    /// Document the about message for this command line parser.
    /// If repeated, only the final message will apply.
    ///
    /// An about message documents the command line parser in full sentence/paragraph format.
    /// We recommend allowing `greet` to format this field (ex: it is not recommended to use line breaks `'\n'`).
    ///
    /// ### Example
    /// ```
    /// # use greet_builder as greet;
    /// use greet::CommandLineParser;
    ///
    /// let parser = CommandLineParser::new("program")
    ///     .about("--this will get discarded--")
    ///     .about("My program that does awesome stuff.  Check it out!")
    ///     .build();
    ///
    /// parser.parse_tokens(vec![].as_slice()).unwrap();
    /// ```
    pub fn about(mut self, description: impl Into<String>) -> Self {
        self.about.replace(description.into());
        self
    }

    /// Set the text printed by the version option.
    /// Without one, the program name is printed.
    ///
    /// ### Example
    /// ```
    /// # use greet_builder as greet;
    /// use greet::{CommandLineParser, ParseOutcome};
    ///
    /// let parser = CommandLineParser::new("program")
    ///     .version("program 1.0.0")
    ///     .build();
    ///
    /// let outcome = parser.parse_tokens(vec!["--version"].as_slice()).unwrap_err();
    ///
    /// assert_eq!(outcome, ParseOutcome::Version("program 1.0.0".to_string()));
    /// ```
    pub fn version(mut self, text: impl Into<String>) -> Self {
        self.version.replace(text.into());
        self
    }

    /// Add an option to the command line parser.
    ///
    /// The order of options is the order of their help rows, and of the required options in the usage line.
    /// It does not affect the command parser semantics.
    ///
    /// ### Example
    /// ```
    /// # use greet_builder as greet;
    /// use greet::{CommandLineParser, Parameter, Single};
    ///
    /// let mut a: u32 = 0;
    /// let mut b: u32 = 0;
    /// let parser = CommandLineParser::new("program")
    ///     .add(Parameter::option(Single::new(&mut a), Some("a"), None))
    ///     .add(Parameter::option(Single::new(&mut b), None, Some('b')))
    ///     .build();
    ///
    /// parser.parse_tokens(vec!["--a", "1", "-b2"].as_slice()).unwrap();
    ///
    /// assert_eq!(a, 1);
    /// assert_eq!(b, 2);
    /// ```
    pub fn add(mut self, parameter: Parameter<'a>) -> Self {
        let inner = parameter.consume();
        self.option_parameters.push(OptionParameter::from(&inner));
        self.option_captures.push(OptionCapture::from(inner));
        self
    }

    /// Collect the tokens following the end of options marker `--`.
    /// Without a collection, those tokens are discarded.
    ///
    /// ### Example
    /// ```
    /// # use greet_builder as greet;
    /// use greet::CommandLineParser;
    ///
    /// let mut rest: Vec<String> = Vec::default();
    /// let parser = CommandLineParser::new("program")
    ///     .ignored(&mut rest)
    ///     .build();
    ///
    /// parser.parse_tokens(vec!["--", "-a", "b"].as_slice()).unwrap();
    ///
    /// assert_eq!(rest, vec!["-a".to_string(), "b".to_string()]);
    /// ```
    pub fn ignored(mut self, collection: &'a mut Vec<String>) -> Self {
        if self.ignored.replace(collection).is_some() && self.deferred_error.is_none() {
            self.deferred_error.replace(ConfigError::InvalidOption(
                "the ignored arguments may only be collected once.".to_string(),
            ));
        }

        self
    }

    /// Accept values beginning with `-` for every value-taking option.
    ///
    /// ### Example
    /// ```
    /// # use greet_builder as greet;
    /// use greet::{CommandLineParser, Parameter, Single};
    ///
    /// let mut offset: i32 = 0;
    /// let parser = CommandLineParser::new("program")
    ///     .add(Parameter::option(Single::new(&mut offset), Some("offset"), None))
    ///     .allow_hyphen_values()
    ///     .build();
    ///
    /// parser.parse_tokens(vec!["--offset", "-5"].as_slice()).unwrap();
    ///
    /// assert_eq!(offset, -5);
    /// ```
    pub fn allow_hyphen_values(mut self) -> Self {
        self.allow_hyphen = true;
        self
    }

    /// Replace the flags of the help option (by default, `--help` and `-h`).
    /// At least one flag must be given.
    ///
    /// ### Example
    /// ```
    /// # use greet_builder as greet;
    /// use greet::{CommandLineParser, ParseOutcome};
    ///
    /// let parser = CommandLineParser::new("program")
    ///     .help_flags(Some("usage"), Some('?'))
    ///     .build();
    ///
    /// let outcome = parser.parse_tokens(vec!["-?"].as_slice()).unwrap_err();
    ///
    /// assert!(matches!(outcome, ParseOutcome::Help(_)));
    /// ```
    pub fn help_flags(mut self, long: Option<&str>, short: Option<char>) -> Self {
        self.reserved.help.replace(ReservedFlags::new(long, short));
        self
    }

    /// Replace the flags of the version option (by default, `--version` and `-V`).
    /// At least one flag must be given.
    ///
    /// ### Example
    /// ```
    /// # use greet_builder as greet;
    /// use greet::{CommandLineParser, ParseOutcome};
    ///
    /// let parser = CommandLineParser::new("program")
    ///     .version_flags(None, Some('v'))
    ///     .build();
    ///
    /// let outcome = parser.parse_tokens(vec!["-v"].as_slice()).unwrap_err();
    ///
    /// assert!(matches!(outcome, ParseOutcome::Version(_)));
    /// ```
    pub fn version_flags(mut self, long: Option<&str>, short: Option<char>) -> Self {
        self.reserved.version.replace(ReservedFlags::new(long, short));
        self
    }

    /// Do not register the help option, freeing up its flags.
    pub fn no_help(mut self) -> Self {
        self.reserved.help = None;
        self
    }

    /// Do not register the version option, freeing up its flags.
    pub fn no_version(mut self) -> Self {
        self.reserved.version = None;
        self
    }

    fn build_with_interface(
        self,
        user_interface: Box<dyn UserInterface>,
    ) -> Result<GeneralParser<'a>, ConfigError> {
        if let Some(error) = self.deferred_error {
            return Err(error);
        }

        let registry = OptionRegistry::new(
            self.option_captures,
            &self.reserved,
            self.ignored,
            self.allow_hyphen,
        )?;
        let mut option_parameters = self.option_parameters;
        option_parameters.extend(self.reserved.parameters());
        let printer = Printer::terminal(
            self.program,
            self.about,
            self.version,
            option_parameters,
            self.reserved.hint(),
        );
        Ok(GeneralParser::new(
            Parser::new(registry),
            printer,
            user_interface,
        ))
    }

    /// Build the command line parser as a Result.
    /// This finalizes the configuration and checks for errors (ex: a repeated flag).
    pub fn build_parser(self) -> Result<GeneralParser<'a>, ConfigError> {
        self.build_with_interface(Box::new(ConsoleInterface::default()))
    }

    /// Build the command line parser.
    /// This finalizes the configuration and checks for errors (ex: a repeated flag).
    /// If an error is encountered, exits with error code `1` (via [`std::process::exit`]).
    pub fn build(self) -> GeneralParser<'a> {
        match self.build_parser() {
            Ok(gp) => gp,
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(crate::constant::CONFIG_EXIT_CODE);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Counter, Flag, Multi, Single};
    use crate::parser::util::channel_interface;
    use crate::parser::{ParseError, ParseOutcome};
    use crate::test::assert_contains;
    use rand::Rng;
    use rstest::rstest;

    #[test]
    fn empty_build() {
        // Setup
        let clp = CommandLineParser::new("program");

        // Execute
        let parser = clp.build_parser().unwrap();

        // Verify
        parser.parse_tokens(&[]).unwrap();
    }

    #[rstest]
    #[case(vec![], false, 0, vec![])]
    #[case(vec!["-g"], true, 0, vec![])]
    #[case(vec!["-t", "-t"], false, 2, vec![])]
    #[case(vec!["-gtt", "--item", "1", "--item=3", "-i2"], true, 2, vec![1, 3, 2])]
    #[case(vec!["--item", "01", "-tgi", "0x1"], true, 1, vec![1, 1])]
    fn build(
        #[case] tokens: Vec<&str>,
        #[case] expected_greeted: bool,
        #[case] expected_times: usize,
        #[case] expected_items: Vec<u32>,
    ) {
        // Setup
        let mut greeted: bool = false;
        let mut times: usize = 0;
        let mut items: Vec<u32> = Vec::default();
        let clp = CommandLineParser::new("program")
            .about("abc def")
            .add(Parameter::option(Flag::new(&mut greeted), None, Some('g')))
            .add(Parameter::option(Counter::new(&mut times), None, Some('t')))
            .add(Parameter::option(Multi::new(&mut items), Some("item"), Some('i')));

        // Execute
        let parser = clp.build_parser().unwrap();

        // We testing that build sets up the right parser.
        // So the verification involves invoking the parser with the various permutations.
        parser.parse_tokens(tokens.as_slice()).unwrap();
        assert_eq!(greeted, expected_greeted);
        assert_eq!(times, expected_times);
        assert_eq!(items, expected_items);
    }

    #[test]
    fn build_counter_repetitions() {
        let mut rng = rand::thread_rng();
        let repetitions: usize = rng.gen_range(1..20);
        let split: usize = rng.gen_range(0..=repetitions);
        let cluster = format!("-{}", "t".repeat(split));
        let mut tokens: Vec<String> = vec!["-t".to_string(); repetitions - split];

        if split > 0 {
            tokens.push(cluster);
        }

        let mut times: usize = 0;
        let parser = CommandLineParser::new("program")
            .add(Parameter::option(Counter::new(&mut times), Some("times"), Some('t')))
            .build_parser()
            .unwrap();

        parser
            .parse_tokens(tokens.iter().map(AsRef::as_ref).collect::<Vec<&str>>().as_slice())
            .unwrap();

        assert_eq!(times, repetitions);
    }

    #[test]
    fn build_default() {
        let mut age: u32 = 0;
        let parser = CommandLineParser::new("program")
            .add(Parameter::option(Single::new(&mut age).default(18), Some("age"), None))
            .build_parser()
            .unwrap();

        parser.parse_tokens(&[]).unwrap();

        assert_eq!(age, 18);
    }

    #[test]
    fn build_ignored() {
        let mut greeted: bool = false;
        let mut rest: Vec<String> = Vec::default();
        let parser = CommandLineParser::new("program")
            .add(Parameter::option(Flag::new(&mut greeted), None, Some('g')))
            .ignored(&mut rest)
            .build_parser()
            .unwrap();

        parser.parse_tokens(&["-g", "--", "-g", "--", "x"]).unwrap();

        assert!(greeted);
        assert_eq!(rest, vec!["-g".to_string(), "--".to_string(), "x".to_string()]);
    }

    #[test]
    fn build_ignored_twice() {
        let mut a: Vec<String> = Vec::default();
        let mut b: Vec<String> = Vec::default();
        let result = CommandLineParser::new("program")
            .ignored(&mut a)
            .ignored(&mut b)
            .build_parser();

        assert_matches!(result.err(), Some(ConfigError::InvalidOption(message)) => {
            assert_contains!(message, "ignored");
        });
    }

    #[test]
    fn build_allow_hyphen_values() {
        let mut name: String = String::default();
        let mut greeted: bool = false;
        let parser = CommandLineParser::new("program")
            .add(Parameter::option(Single::new(&mut name), Some("name"), Some('n')))
            .add(Parameter::option(Flag::new(&mut greeted), None, Some('g')))
            .allow_hyphen_values()
            .build_parser()
            .unwrap();

        parser.parse_tokens(&["-n", "-g"]).unwrap();

        assert_eq!(name, "-g");
        assert!(!greeted);
    }

    #[rstest]
    #[case(vec!["--help"], true)]
    #[case(vec!["-h"], true)]
    #[case(vec!["--usage"], false)]
    #[case(vec!["-?"], false)]
    fn build_help_flags_default(#[case] tokens: Vec<&str>, #[case] help: bool) {
        let parser = CommandLineParser::new("program").build_parser().unwrap();

        let result = parser.parse_tokens(tokens.as_slice());

        if help {
            assert_matches!(result, Err(ParseOutcome::Help(_)));
        } else {
            assert_matches!(
                result,
                Err(ParseOutcome::Error(failure)) if matches!(failure.error(), ParseError::UnexpectedArgument { .. })
            );
        }
    }

    #[rstest]
    #[case(vec!["--usage"], true)]
    #[case(vec!["-?"], true)]
    #[case(vec!["--help"], false)]
    #[case(vec!["-h"], false)]
    fn build_help_flags(#[case] tokens: Vec<&str>, #[case] help: bool) {
        let parser = CommandLineParser::new("program")
            .help_flags(Some("usage"), Some('?'))
            .build_parser()
            .unwrap();

        let result = parser.parse_tokens(tokens.as_slice());

        if help {
            assert_matches!(result, Err(ParseOutcome::Help(message)) => {
                assert_contains!(message, "-?, --usage");
            });
        } else {
            assert_matches!(result, Err(ParseOutcome::Error(_)));
        }
    }

    #[test]
    fn build_help_flags_hint() {
        let parser = CommandLineParser::new("program")
            .help_flags(None, Some('?'))
            .build_parser()
            .unwrap();

        let result = parser.parse_tokens(&["abc"]);

        assert_matches!(result, Err(ParseOutcome::Error(failure)) => {
            assert_contains!(failure.to_string(), "For more information, try '-?'.");
        });
    }

    #[test]
    fn build_no_help_no_version() {
        let mut help: bool = false;
        let mut version: usize = 0;
        let parser = CommandLineParser::new("program")
            .no_help()
            .no_version()
            .add(Parameter::option(Flag::new(&mut help), Some("help"), Some('h')))
            .add(Parameter::option(Counter::new(&mut version), None, Some('V')))
            .build_parser()
            .unwrap();

        parser.parse_tokens(&["--help", "-VV"]).unwrap();

        assert!(help);
        assert_eq!(version, 2);
    }

    #[test]
    fn build_no_help_error() {
        let parser = CommandLineParser::new("program")
            .no_help()
            .build_parser()
            .unwrap();

        let result = parser.parse_tokens(&["abc"]);

        assert_matches!(result, Err(ParseOutcome::Error(failure)) => {
            assert_eq!(
                failure.to_string(),
                "error: unexpected argument 'abc' found\nabc\n^\n\nUsage: program [OPTIONS]"
            );
        });
    }

    #[test]
    fn build_version_flags() {
        let parser = CommandLineParser::new("program")
            .version_flags(Some("about"), None)
            .build_parser()
            .unwrap();

        let result = parser.parse_tokens(&["--about"]);

        assert_eq!(result, Err(ParseOutcome::Version("program".to_string())));
    }

    #[rstest]
    #[case(Some("help"), None, ConfigError::LongFlagAlreadyUsed("help".to_string()))]
    #[case(None, Some('h'), ConfigError::ShortFlagAlreadyUsed('h'))]
    #[case(Some("version"), None, ConfigError::LongFlagAlreadyUsed("version".to_string()))]
    #[case(None, Some('V'), ConfigError::ShortFlagAlreadyUsed('V'))]
    #[case(None, Some('-'), ConfigError::ShortFlagIsHyphen)]
    #[case(None, None, ConfigError::InvalidOption("an option must specify a short flag, a long flag, or both.".to_string()))]
    #[case(Some(""), None, ConfigError::InvalidOption("an option must specify a short flag, a long flag, or both.".to_string()))]
    fn build_invalid(
        #[case] long: Option<&str>,
        #[case] short: Option<char>,
        #[case] expected: ConfigError,
    ) {
        let mut flag: bool = false;
        let result = CommandLineParser::new("program")
            .add(Parameter::option(Flag::new(&mut flag), long, short))
            .build_parser();

        assert_eq!(result.err(), Some(expected));
    }

    #[test]
    fn build_invalid_required_flag() {
        let mut flag: bool = false;
        let result = CommandLineParser::new("program")
            .add(Parameter::option(Flag::new(&mut flag), Some("flag"), None).required())
            .build_parser();

        assert_matches!(result.err(), Some(ConfigError::InvalidOption(_)));
    }

    #[test]
    fn build_invalid_empty_help_flags() {
        let result = CommandLineParser::new("program")
            .help_flags(None, None)
            .build_parser();

        assert_matches!(result.err(), Some(ConfigError::InvalidOption(_)));
    }

    #[test]
    fn build_help_message() {
        let mut name: String = String::default();
        let mut places: Vec<String> = Vec::default();
        let (sender, receiver) = channel_interface();
        let parser = CommandLineParser::new("program")
            .about("abc def")
            .add(
                Parameter::option(Single::new(&mut name), Some("name"), Some('n'))
                    .help("The name.")
                    .required(),
            )
            .add(
                Parameter::option(Multi::new(&mut places), Some("place"), Some('p'))
                    .argname("CITY")
                    .help("A place."),
            )
            .build_with_interface(Box::new(sender))
            .unwrap();

        let result = parser.invoke(&["--help"]);

        assert_eq!(result, Err(0));
        let message = receiver.consume_message();
        assert_contains!(message, "abc def");
        assert_contains!(message, "Usage: program [OPTIONS] --name <NAME>");
        assert_contains!(message, "-n, --name <NAME>");
        assert_contains!(message, "The name.");
        assert_contains!(message, "[REQUIRED]");
        assert_contains!(message, "-p, --place <CITY>");
        assert_contains!(message, "A place.");
        assert_contains!(message, "-h, --help");
        assert_contains!(message, "Print help");
        assert_contains!(message, "-V, --version");
        assert_contains!(message, "Print version");
    }
}
