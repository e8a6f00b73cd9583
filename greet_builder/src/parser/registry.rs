use std::collections::HashMap;
use thiserror::Error;

use crate::api::Binding;
use crate::constant::*;
use crate::model::Kind;
use crate::parser::{OptionCapture, OptionConfig, OptionDescriptor, OptionParameter};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// Error for an invalid parser configuration.
/// These are programming mistakes, surfaced when the parser is built.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The option is malformed.
    #[error("Config error: {0}")]
    InvalidOption(String),
    /// A flag contains a non-printable character.
    #[error("Config error: the flag '{0}' must consist of printable characters.")]
    NotPrintable(String),
    /// A short flag is `-`.
    #[error("Config error: the short flag cannot be '-'.")]
    ShortFlagIsHyphen,
    /// A short flag is registered twice.
    #[error("Config error: the flag '-{0}' is already used.")]
    ShortFlagAlreadyUsed(char),
    /// A long flag is registered twice.
    #[error("Config error: the flag '--{0}' is already used.")]
    LongFlagAlreadyUsed(String),
}

/// The flags of a built-in option; at least one must be present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ReservedFlags {
    long: Option<String>,
    short: Option<char>,
}

impl ReservedFlags {
    pub(crate) fn new(long: Option<&str>, short: Option<char>) -> Self {
        Self {
            long: long.filter(|l| !l.is_empty()).map(String::from),
            short,
        }
    }

    fn config(&self) -> OptionConfig {
        OptionConfig::new(self.long.clone(), self.short, None, false, false)
    }

    fn parameter(&self, help: &str) -> OptionParameter {
        OptionParameter::new(
            self.long.clone(),
            self.short,
            Kind::Flag,
            Some(help.to_string()),
            None,
            false,
            None,
        )
    }
}

/// The built-in help and version options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Reserved {
    pub(crate) help: Option<ReservedFlags>,
    pub(crate) version: Option<ReservedFlags>,
}

impl Default for Reserved {
    fn default() -> Self {
        Self {
            help: Some(ReservedFlags::new(Some(HELP_LONG), Some(HELP_SHORT))),
            version: Some(ReservedFlags::new(Some(VERSION_LONG), Some(VERSION_SHORT))),
        }
    }
}

impl Reserved {
    /// The closing line of an error report, pointing at the help option.
    pub(crate) fn hint(&self) -> Option<String> {
        let help = self.help.as_ref()?;
        let flag = match (&help.long, &help.short) {
            (Some(long), _) => format!("--{long}"),
            (None, Some(short)) => format!("-{short}"),
            (None, None) => return None,
        };

        Some(format!("For more information, try '{flag}'."))
    }

    /// The help rows for the built-in options, listed after the user's options.
    pub(crate) fn parameters(&self) -> Vec<OptionParameter> {
        let mut parameters = Vec::default();

        if let Some(help) = &self.help {
            parameters.push(help.parameter(HELP_MESSAGE));
        }

        if let Some(version) = &self.version {
            parameters.push(version.parameter(VERSION_MESSAGE));
        }

        parameters
    }
}

pub(crate) struct OptionRegistry<'a> {
    descriptors: Vec<OptionDescriptor<'a>>,
    flags: HashMap<String, usize>,
    required: Vec<usize>,
    help: Option<usize>,
    version: Option<usize>,
    ignored: Option<&'a mut Vec<String>>,
    allow_hyphen: bool,
}

impl<'a> std::fmt::Debug for OptionRegistry<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OptionRegistry")
            .field("descriptors", &self.descriptors)
            .field("required", &self.required)
            .field("help", &self.help)
            .field("version", &self.version)
            .field("ignored", &self.ignored.is_some())
            .field("allow_hyphen", &self.allow_hyphen)
            .finish()
    }
}

impl<'a> OptionRegistry<'a> {
    #[cfg(test)]
    pub(crate) fn empty() -> Self {
        Self::new(Vec::default(), &Reserved::default(), None, false)
            .expect("default reserved options must register")
    }

    pub(crate) fn new(
        options: Vec<OptionCapture<'a>>,
        reserved: &Reserved,
        ignored: Option<&'a mut Vec<String>>,
        allow_hyphen: bool,
    ) -> Result<Self, ConfigError> {
        let mut registry = Self {
            descriptors: Vec::default(),
            flags: HashMap::default(),
            required: Vec::default(),
            help: None,
            version: None,
            ignored,
            allow_hyphen,
        };

        if let Some(help) = &reserved.help {
            registry.help = Some(registry.register(help.config(), Binding::Trigger)?);
        }

        if let Some(version) = &reserved.version {
            registry.version = Some(registry.register(version.config(), Binding::Trigger)?);
        }

        for (config, binding) in options {
            registry.register(config, binding)?;
        }

        Ok(registry)
    }

    fn register(&mut self, config: OptionConfig, binding: Binding<'a>) -> Result<usize, ConfigError> {
        let kind = binding.kind();

        if config.short().is_none() && config.long().is_none() {
            return Err(ConfigError::InvalidOption(
                "an option must specify a short flag, a long flag, or both.".to_string(),
            ));
        }

        if config.required() && kind != Kind::Single {
            return Err(ConfigError::InvalidOption(format!(
                "the {kind} option '{}' cannot be required.",
                config.display_flag()
            )));
        }

        if config.allow_hyphen() && !kind.needs_value() {
            return Err(ConfigError::InvalidOption(format!(
                "the {kind} option '{}' takes no value, so cannot allow hyphen values.",
                config.display_flag()
            )));
        }

        let index = self.descriptors.len();

        if let Some(short) = config.short() {
            if !short.is_ascii_graphic() {
                return Err(ConfigError::NotPrintable(format!("-{short}")));
            }

            if short == '-' {
                return Err(ConfigError::ShortFlagIsHyphen);
            }

            if self.flags.insert(format!("-{short}"), index).is_some() {
                return Err(ConfigError::ShortFlagAlreadyUsed(short));
            }
        }

        if let Some(long) = config.long() {
            if !long.chars().all(|c| c.is_ascii_graphic()) {
                return Err(ConfigError::NotPrintable(format!("--{long}")));
            }

            if long.contains('=') {
                return Err(ConfigError::InvalidOption(format!(
                    "the flag '--{long}' cannot contain '='."
                )));
            }

            if self.flags.insert(format!("--{long}"), index).is_some() {
                return Err(ConfigError::LongFlagAlreadyUsed(long.to_string()));
            }
        }

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Registered option {index}: {config:?} as {kind}.");
        }

        if config.required() {
            self.required.push(index);
        }

        self.descriptors.push(OptionDescriptor::new(config, binding));
        Ok(index)
    }

    /// Find the option registered under the flag (ex: `-n` or `--name`).
    pub(crate) fn query(&self, flag: &str) -> Option<usize> {
        self.flags.get(flag).copied()
    }

    pub(crate) fn descriptor(&self, index: usize) -> &OptionDescriptor<'a> {
        &self.descriptors[index]
    }

    pub(crate) fn descriptor_mut(&mut self, index: usize) -> &mut OptionDescriptor<'a> {
        &mut self.descriptors[index]
    }

    /// Required options, in registration order.
    pub(crate) fn required(&self) -> impl Iterator<Item = &OptionDescriptor<'a>> {
        self.required.iter().map(|index| &self.descriptors[*index])
    }

    /// Whether the option may take a value that begins with `-`.
    pub(crate) fn allows_hyphen(&self, index: usize) -> bool {
        self.allow_hyphen || self.descriptors[index].config().allow_hyphen()
    }

    pub(crate) fn help_triggered(&self) -> bool {
        self.help
            .map(|index| self.descriptors[index].already_set())
            .unwrap_or(false)
    }

    pub(crate) fn version_triggered(&self) -> bool {
        self.version
            .map(|index| self.descriptors[index].already_set())
            .unwrap_or(false)
    }

    pub(crate) fn ignored_mut(&mut self) -> Option<&mut Vec<String>> {
        self.ignored.as_deref_mut()
    }
}
