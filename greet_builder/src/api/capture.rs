use crate::api::ConversionError;
use crate::model::Kind;

/// Behaviour to capture a value from a token, with the underlying type T erased.
///
/// We use this at the middle/top of the command line parser object graph so that fields of different types may all live in a single registry.
#[doc(hidden)]
pub trait AnonymousCapturable {
    /// Convert the token and store it into the bound variable.
    fn capture(&mut self, token: &str) -> Result<(), ConversionError>;
}

/// The binding between an option and the caller's variable.
///
/// The set of option kinds is closed, so the parser dispatches over this enum rather than over a trait object per kind.
/// Only value-taking kinds need to erase their element type.
#[doc(hidden)]
pub enum Binding<'a> {
    /// Bound to a single value.
    Single(Box<dyn AnonymousCapturable + 'a>),
    /// Bound to a boolean.
    Flag(&'a mut bool),
    /// Bound to a use count.
    Counter(&'a mut usize),
    /// Bound to a collection of values.
    Multi(Box<dyn AnonymousCapturable + 'a>),
    /// Bound to nothing; reserved help/version options only record that they were used.
    Trigger,
}

impl<'a> Binding<'a> {
    /// The option kind this binding implements.
    pub fn kind(&self) -> Kind {
        match self {
            Binding::Single(_) => Kind::Single,
            Binding::Flag(_) | Binding::Trigger => Kind::Flag,
            Binding::Counter(_) => Kind::Counter,
            Binding::Multi(_) => Kind::Multi,
        }
    }
}

impl<'a> std::fmt::Debug for Binding<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Binding::Trigger => write!(f, "Binding[Trigger]"),
            _ => write!(f, "Binding[{}]", self.kind()),
        }
    }
}

/// Behaviour of a typed field which may be bound to an option.
///
/// We use this at the bottom of the command line parser object graph so the compiler can maintain each field's type.
#[doc(hidden)]
pub trait Capturable<'a> {
    /// The textual form of the field's value before parsing, if the kind documents a default.
    fn default_token(&self) -> Option<String> {
        None
    }

    /// Release the field into its parser binding.
    fn bind(self) -> Binding<'a>;
}
