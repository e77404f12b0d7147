use std::fmt;

/// Failure to read a duration threshold such as `100ms` or `2s`.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Error {
    Syntax(String),
    UnitNotSupported(String),
    NegativeValue(String),
}

impl ::std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::Syntax(ref value) => {
                write!(f, "'{}' is not a duration, expected e.g. 0.1, 100ms or 2s", value)
            }
            Error::UnitNotSupported(ref unit) => write!(f, "unit '{}' not supported", unit),
            Error::NegativeValue(ref value) => write!(f, "duration '{}' is negative", value),
        }
    }
}
