pub(crate) const HELP_LONG: &str = "help";
pub(crate) const HELP_SHORT: char = 'h';
pub(crate) const HELP_MESSAGE: &str = "Print help";
pub(crate) const VERSION_LONG: &str = "version";
pub(crate) const VERSION_SHORT: char = 'V';
pub(crate) const VERSION_MESSAGE: &str = "Print version";
pub(crate) const DEFAULT_ARGNAME: &str = "VALUE";
pub(crate) const ERROR_EXIT_CODE: i32 = 2;
pub(crate) const CONFIG_EXIT_CODE: i32 = 1;
