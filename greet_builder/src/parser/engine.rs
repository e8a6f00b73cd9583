use thiserror::Error;

use crate::api::ConversionError;
use crate::parser::OptionRegistry;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

fn usage(flag: &str, argname: &Option<String>) -> String {
    match argname {
        Some(argname) => format!("{flag} <{argname}>"),
        None => flag.to_string(),
    }
}

fn listing(missing: &[String]) -> String {
    missing.iter().map(|usage| format!("\n  {usage}")).collect()
}

/// Error for a command line that does not match the parser configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A token that is neither a known option nor a value.
    #[error("unexpected argument '{argument}' found")]
    UnexpectedArgument {
        /// The offending token, or flag (without any `=value`).
        argument: String,
    },
    /// A value given inline to an option which takes none (ex: `--verbose=yes`).
    #[error("unexpected value '{value}' for '{flag}' found; no more were expected")]
    UnexpectedValue {
        /// The option's flag, as written.
        flag: String,
        /// The inline value.
        value: String,
    },
    /// A value-taking option without its value.
    #[error("a value is required for '{flag} <{argname}>' but none was supplied")]
    MissingValue {
        /// The option's flag, as written.
        flag: String,
        /// The option's value placeholder.
        argname: String,
    },
    /// A value that does not convert into the option's type.
    #[error("invalid value '{value}' for '{flag} <{argname}>': {reason}")]
    InvalidValue {
        /// The option's flag, as written.
        flag: String,
        /// The option's value placeholder.
        argname: String,
        /// The value, as written.
        value: String,
        /// Why the conversion failed.
        reason: ConversionError,
    },
    /// A second use of an option that may be used at most once.
    #[error("the argument '{}' cannot be used multiple times", usage(.flag, .argname))]
    MultipleUse {
        /// The option's flag, as written.
        flag: String,
        /// The option's value placeholder, for value-taking options.
        argname: Option<String>,
    },
    /// Required options which were never used.
    #[error("the following required arguments were not provided:{}", listing(.missing))]
    MissingOption {
        /// The usage of each missing option, in registration order.
        missing: Vec<String>,
    },
}

/// The classification of a single command line token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenClass {
    /// Anything not starting with `-`, and the lone `-`.
    Argument,
    /// Exactly `--`.
    EndOfOptions,
    /// `-` followed by at least one character.
    Short,
    /// `--` followed by at least one character.
    Long,
}

impl TokenClass {
    pub(crate) fn of(token: &str) -> Self {
        if token.len() < 2 || !token.starts_with('-') {
            TokenClass::Argument
        } else if token == "--" {
            TokenClass::EndOfOptions
        } else if token.starts_with("--") {
            TokenClass::Long
        } else {
            TokenClass::Short
        }
    }
}

/// Where in the command line a problem was found: the token index, and the byte offset within that token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TokenPosition {
    pub(crate) index: usize,
    pub(crate) offset: usize,
}

impl TokenPosition {
    pub(crate) fn new(index: usize, offset: usize) -> Self {
        Self { index, offset }
    }
}

type Failure = (Option<TokenPosition>, ParseError);

struct TokenCursor<'t> {
    tokens: &'t [&'t str],
    position: usize,
}

impl<'t> TokenCursor<'t> {
    fn new(tokens: &'t [&'t str]) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    fn next(&mut self) -> Option<(usize, &'t str)> {
        let item = self.peek()?;
        self.position += 1;
        Some(item)
    }

    fn peek(&self) -> Option<(usize, &'t str)> {
        self.tokens
            .get(self.position)
            .map(|token| (self.position, *token))
    }

    fn drain(&mut self) -> &'t [&'t str] {
        let remaining = &self.tokens[self.position..];
        self.position = self.tokens.len();
        remaining
    }

    fn consumed(&self) -> usize {
        self.position
    }
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Action {
    Complete { consumed: usize },
    PrintHelp,
    PrintVersion,
}

#[derive(Debug)]
pub(crate) struct Parser<'a> {
    registry: OptionRegistry<'a>,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(registry: OptionRegistry<'a>) -> Self {
        Self { registry }
    }

    /// Walk the tokens left to right, applying each option use to its bound variable.
    /// Stops at the first error; variables bound before that point keep their new values.
    pub(crate) fn consume(mut self, tokens: &[&str]) -> Result<Action, Failure> {
        let mut cursor = TokenCursor::new(tokens);

        while let Some((index, token)) = cursor.next() {
            let class = TokenClass::of(token);
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Token {index} '{token}' is {class:?}.");
            }

            match class {
                TokenClass::Argument => {
                    return Err((
                        Some(TokenPosition::new(index, 0)),
                        ParseError::UnexpectedArgument {
                            argument: token.to_string(),
                        },
                    ));
                }
                TokenClass::EndOfOptions => {
                    let remaining = cursor.drain();

                    if let Some(ignored) = self.registry.ignored_mut() {
                        ignored.extend(remaining.iter().map(|token| token.to_string()));
                    }

                    break;
                }
                TokenClass::Long => self.match_long(index, token, &mut cursor)?,
                TokenClass::Short => self.match_short(index, token, &mut cursor)?,
            }

            if self.registry.help_triggered() {
                return Ok(Action::PrintHelp);
            }

            if self.registry.version_triggered() {
                return Ok(Action::PrintVersion);
            }
        }

        let missing: Vec<String> = self
            .registry
            .required()
            .filter(|descriptor| !descriptor.already_set())
            .map(|descriptor| descriptor.usage())
            .collect();

        if !missing.is_empty() {
            return Err((None, ParseError::MissingOption { missing }));
        }

        Ok(Action::Complete {
            consumed: cursor.consumed(),
        })
    }

    fn match_long<'t>(
        &mut self,
        index: usize,
        token: &'t str,
        cursor: &mut TokenCursor<'t>,
    ) -> Result<(), Failure> {
        let (flag, inline) = match token.split_once('=') {
            Some((flag, value)) => (flag, Some(value)),
            None => (token, None),
        };
        let flag_position = TokenPosition::new(index, 0);
        let target = self.registry.query(flag).ok_or_else(|| {
            (
                Some(flag_position),
                ParseError::UnexpectedArgument {
                    argument: flag.to_string(),
                },
            )
        })?;

        match (self.registry.descriptor(target).needs_value(), inline) {
            (true, Some(value)) => self.apply(
                target,
                flag,
                flag_position,
                Some((value, TokenPosition::new(index, flag.len() + 1))),
            ),
            (true, None) => {
                let value = self.next_value(target, flag, flag_position, cursor)?;
                self.apply(target, flag, flag_position, Some(value))
            }
            (false, Some(value)) => Err((
                Some(TokenPosition::new(index, flag.len() + 1)),
                ParseError::UnexpectedValue {
                    flag: flag.to_string(),
                    value: value.to_string(),
                },
            )),
            (false, None) => self.apply(target, flag, flag_position, None),
        }
    }

    fn match_short<'t>(
        &mut self,
        index: usize,
        token: &'t str,
        cursor: &mut TokenCursor<'t>,
    ) -> Result<(), Failure> {
        // Skip the leading '-'.
        let mut offset = 1;

        while let Some(single) = token[offset..].chars().next() {
            let flag = format!("-{single}");
            let flag_position = TokenPosition::new(index, offset);
            offset += single.len_utf8();
            let target = self.registry.query(&flag).ok_or_else(|| {
                (
                    Some(flag_position),
                    ParseError::UnexpectedArgument {
                        argument: flag.clone(),
                    },
                )
            })?;

            if self.registry.descriptor(target).needs_value() {
                // The rest of the cluster is the value; only the last character may take the next token.
                let rest = &token[offset..];
                let value = if rest.is_empty() {
                    self.next_value(target, &flag, flag_position, cursor)?
                } else {
                    match rest.strip_prefix('=') {
                        Some(stripped) => (stripped, TokenPosition::new(index, offset + 1)),
                        None => (rest, TokenPosition::new(index, offset)),
                    }
                };

                return self.apply(target, &flag, flag_position, Some(value));
            }

            self.apply(target, &flag, flag_position, None)?;
        }

        Ok(())
    }

    fn next_value<'t>(
        &self,
        target: usize,
        flag: &str,
        flag_position: TokenPosition,
        cursor: &mut TokenCursor<'t>,
    ) -> Result<(&'t str, TokenPosition), Failure> {
        let allow_hyphen = self.registry.allows_hyphen(target);

        match cursor.peek() {
            Some((index, next)) if allow_hyphen || !next.starts_with('-') => {
                cursor.next();
                Ok((next, TokenPosition::new(index, 0)))
            }
            _ => Err((
                Some(flag_position),
                ParseError::MissingValue {
                    flag: flag.to_string(),
                    argname: self.registry.descriptor(target).config().argname(),
                },
            )),
        }
    }

    fn apply(
        &mut self,
        target: usize,
        flag: &str,
        flag_position: TokenPosition,
        value: Option<(&str, TokenPosition)>,
    ) -> Result<(), Failure> {
        let descriptor = self.registry.descriptor_mut(target);

        if descriptor.already_set() {
            return Err((
                Some(flag_position),
                ParseError::MultipleUse {
                    flag: flag.to_string(),
                    argname: descriptor.value_argname(),
                },
            ));
        }

        let (token, position) = match value {
            Some((token, position)) => (Some(token), position),
            None => (None, flag_position),
        };
        #[cfg(feature = "tracing_debug")]
        {
            debug!("Applying '{flag}' with {token:?}.");
        }

        descriptor.set(token).map_err(|reason| {
            (
                Some(position),
                ParseError::InvalidValue {
                    flag: flag.to_string(),
                    argname: descriptor.config().argname(),
                    value: token.unwrap_or_default().to_string(),
                    reason,
                },
            )
        })
    }
}
