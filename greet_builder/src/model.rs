/// The kind of an option, which decides how its flag interacts with values and repetition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Takes precisely one value, may be used at most once.
    Single,
    /// Takes no value, may be used at most once.
    Flag,
    /// Takes no value, may be used any number of times.
    Counter,
    /// Takes precisely one value per use, may be used any number of times.
    Multi,
}

impl Kind {
    /// Whether a use of this kind of option must be followed by a value.
    pub fn needs_value(&self) -> bool {
        matches!(self, Kind::Single | Kind::Multi)
    }

    /// Whether this kind of option may be used more than once.
    pub fn repeatable(&self) -> bool {
        matches!(self, Kind::Counter | Kind::Multi)
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}
