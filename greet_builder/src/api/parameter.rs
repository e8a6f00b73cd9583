use crate::api::capture::{Binding, Capturable};
use crate::parser::{OptionCapture, OptionConfig, OptionParameter};

pub(crate) struct ParameterInner<'a> {
    binding: Binding<'a>,
    long: Option<String>,
    short: Option<char>,
    help: Option<String>,
    argname: Option<String>,
    required: bool,
    allow_hyphen: bool,
    default: Option<String>,
}

impl<'a> std::fmt::Debug for ParameterInner<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let short = match &self.short {
            Some(s) => format!(" -{s},"),
            None => "".to_string(),
        };
        let long = match &self.long {
            Some(l) => format!(" --{l}"),
            None => "".to_string(),
        };
        let help = if let Some(d) = &self.help {
            format!(", {d}")
        } else {
            "".to_string()
        };

        write!(
            f,
            "Opt[{kind},{short}{long}{help}]",
            kind = self.binding.kind(),
        )
    }
}

impl<'a> From<&ParameterInner<'a>> for OptionConfig {
    fn from(value: &ParameterInner<'a>) -> Self {
        OptionConfig::new(
            value.long.clone(),
            value.short,
            value.argname.clone(),
            value.required,
            value.allow_hyphen,
        )
    }
}

impl<'a> From<ParameterInner<'a>> for OptionCapture<'a> {
    fn from(value: ParameterInner<'a>) -> Self {
        let config = OptionConfig::from(&value);
        let ParameterInner { binding, .. } = value;
        (config, binding)
    }
}

impl<'a> From<&ParameterInner<'a>> for OptionParameter {
    fn from(value: &ParameterInner<'a>) -> Self {
        OptionParameter::new(
            value.long.clone(),
            value.short,
            value.binding.kind(),
            value.help.clone(),
            value.argname.clone(),
            value.required,
            value.default.clone(),
        )
    }
}

/// An option for the command parser.
/// Used with [`CommandLineParser::add`](./struct.CommandLineParser.html#method.add).
pub struct Parameter<'a>(ParameterInner<'a>);

impl<'a> Parameter<'a> {
    /// Create an option parameter.
    ///
    /// An option must have at least one of a long flag (without its leading `--`) or a short flag.
    /// An empty long flag is treated as absent.
    ///
    /// ### Example
    /// ```
    /// # use greet_builder as greet;
    /// use greet::{Flag, Parameter, Single};
    ///
    /// let mut verbose: bool = false;
    /// let mut name: String = String::default();
    /// Parameter::option(Flag::new(&mut verbose), Some("verbose"), Some('v'));
    /// Parameter::option(Single::new(&mut name), Some("name"), None);
    /// ```
    pub fn option(field: impl Capturable<'a>, long: Option<&str>, short: Option<char>) -> Self {
        let default = field.default_token();
        Self(ParameterInner {
            binding: field.bind(),
            long: long.filter(|l| !l.is_empty()).map(String::from),
            short,
            help: None,
            argname: None,
            required: false,
            allow_hyphen: false,
            default,
        })
    }

    /// Document the help message for this option.
    /// If repeated, only the final message will apply to the option.
    ///
    /// A help message describes the option in full sentence/paragraph format.
    /// We recommend allowing `greet` to format this field (ex: it is not recommended to use line breaks `'\n'`).
    ///
    /// ### Example
    /// ```
    /// # use greet_builder as greet;
    /// use greet::{Parameter, Single};
    ///
    /// let mut name: String = String::default();
    /// Parameter::option(Single::new(&mut name), Some("name"), Some('n'))
    ///     .help("--this will get discarded--")
    ///     .help("The name to greet.  Description may include multiple sentences.");
    /// ```
    pub fn help(self, description: impl Into<String>) -> Self {
        let mut inner = self.0;
        inner.help.replace(description.into());
        Self(inner)
    }

    /// Document the value placeholder for this option (ex: `--name <WHO>`).
    /// Without one, the placeholder is the upper-cased long flag, or `VALUE` when there is no long flag.
    ///
    /// ### Example
    /// ```
    /// # use greet_builder as greet;
    /// use greet::{Parameter, Single};
    ///
    /// let mut name: String = String::default();
    /// Parameter::option(Single::new(&mut name), Some("name"), Some('n'))
    ///     .argname("WHO");
    /// ```
    pub fn argname(self, name: impl Into<String>) -> Self {
        let mut inner = self.0;
        inner.argname.replace(name.into());
        Self(inner)
    }

    /// Require this option to be used at least once.
    /// Only [`Single`](./struct.Single.html) options may be required.
    ///
    /// ### Example
    /// ```
    /// # use greet_builder as greet;
    /// use greet::{Parameter, Single};
    ///
    /// let mut name: String = String::default();
    /// Parameter::option(Single::new(&mut name), Some("name"), Some('n'))
    ///     .required();
    /// ```
    pub fn required(self) -> Self {
        let mut inner = self.0;
        inner.required = true;
        Self(inner)
    }

    /// Accept a value for this option even when the next token begins with `-`.
    /// Only value-taking options ([`Single`](./struct.Single.html) and [`Multi`](./struct.Multi.html)) may allow hyphens.
    ///
    /// ### Example
    /// ```
    /// # use greet_builder as greet;
    /// use greet::{CommandLineParser, Multi, Parameter};
    ///
    /// let mut places: Vec<String> = Vec::default();
    /// let parser = CommandLineParser::new("program")
    ///     .add(Parameter::option(Multi::new(&mut places), Some("place"), Some('p')).allow_hyphen())
    ///     .build();
    ///
    /// parser.parse_tokens(vec!["-p", "-chicago"].as_slice()).unwrap();
    ///
    /// assert_eq!(places, vec!["-chicago".to_string()]);
    /// ```
    pub fn allow_hyphen(self) -> Self {
        let mut inner = self.0;
        inner.allow_hyphen = true;
        Self(inner)
    }

    pub(crate) fn consume(self) -> ParameterInner<'a> {
        self.0
    }
}
