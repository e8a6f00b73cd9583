use crate::api::{Binding, ConversionError};
use crate::constant::DEFAULT_ARGNAME;
use crate::model::Kind;

/// The value placeholder for an option: explicit, else the upper-cased long flag, else `VALUE`.
pub(crate) fn placeholder(argname: &Option<String>, long: &Option<String>) -> String {
    match (argname, long) {
        (Some(argname), _) => argname.clone(),
        (None, Some(long)) => long.to_ascii_uppercase(),
        (None, None) => DEFAULT_ARGNAME.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct OptionConfig {
    long: Option<String>,
    short: Option<char>,
    argname: Option<String>,
    required: bool,
    allow_hyphen: bool,
}

impl OptionConfig {
    pub(crate) fn new(
        long: Option<String>,
        short: Option<char>,
        argname: Option<String>,
        required: bool,
        allow_hyphen: bool,
    ) -> Self {
        Self {
            long,
            short,
            argname,
            required,
            allow_hyphen,
        }
    }

    pub(crate) fn long(&self) -> Option<&str> {
        self.long.as_deref()
    }

    pub(crate) fn short(&self) -> Option<char> {
        self.short
    }

    pub(crate) fn required(&self) -> bool {
        self.required
    }

    pub(crate) fn allow_hyphen(&self) -> bool {
        self.allow_hyphen
    }

    pub(crate) fn argname(&self) -> String {
        placeholder(&self.argname, &self.long)
    }

    /// The flag used to refer to this option in messages: the long flag when present.
    pub(crate) fn display_flag(&self) -> String {
        match (&self.long, &self.short) {
            (Some(long), _) => format!("--{long}"),
            (None, Some(short)) => format!("-{short}"),
            (None, None) => unreachable!("internal error - option must have a long or short flag"),
        }
    }
}

pub(crate) type OptionCapture<'a> = (OptionConfig, Binding<'a>);

#[derive(Debug)]
pub(crate) struct OptionDescriptor<'a> {
    config: OptionConfig,
    binding: Binding<'a>,
    already_set: bool,
}

impl<'a> OptionDescriptor<'a> {
    pub(crate) fn new(config: OptionConfig, binding: Binding<'a>) -> Self {
        Self {
            config,
            binding,
            already_set: false,
        }
    }

    pub(crate) fn config(&self) -> &OptionConfig {
        &self.config
    }

    pub(crate) fn kind(&self) -> Kind {
        self.binding.kind()
    }

    pub(crate) fn needs_value(&self) -> bool {
        self.kind().needs_value()
    }

    pub(crate) fn already_set(&self) -> bool {
        self.already_set
    }

    /// The placeholder to show alongside the flag, for value-taking options only.
    pub(crate) fn value_argname(&self) -> Option<String> {
        if self.needs_value() {
            Some(self.config.argname())
        } else {
            None
        }
    }

    /// The usage form of this option (ex: `--name <NAME>`).
    pub(crate) fn usage(&self) -> String {
        match self.value_argname() {
            Some(argname) => format!("{} <{argname}>", self.config.display_flag()),
            None => self.config.display_flag(),
        }
    }

    /// Apply one use of the option.
    /// Value-taking kinds receive `Some(token)`, others receive `None`.
    pub(crate) fn set(&mut self, value: Option<&str>) -> Result<(), ConversionError> {
        match (&mut self.binding, value) {
            (Binding::Single(capturable), Some(token))
            | (Binding::Multi(capturable), Some(token)) => capturable.capture(token)?,
            (Binding::Flag(variable), None) => **variable = true,
            (Binding::Counter(variable), None) => **variable += 1,
            (Binding::Trigger, None) => {}
            _ => unreachable!("internal error - value presence must agree with the option kind"),
        }

        // Only reached once the use succeeded; a failed conversion leaves the option unset.
        if !self.kind().repeatable() {
            self.already_set = true;
        }

        Ok(())
    }
}
