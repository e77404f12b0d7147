use config::ConfigError;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Every failure is fatal: the run stops and nothing partial is published.
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    Configuration(String),
    Discovery { path: PathBuf, source: io::Error },
    Report { path: PathBuf, source: io::Error },
    Xml { path: PathBuf, message: String },
    Data { path: PathBuf, message: String },
    Output { path: PathBuf, source: io::Error },
}

impl ::std::error::Error for Error {
    fn source(&self) -> Option<&(dyn ::std::error::Error + 'static)> {
        match *self {
            Error::Discovery { ref source, .. }
            | Error::Report { ref source, .. }
            | Error::Output { ref source, .. } => Some(source),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::Configuration(ref message) => write!(f, "configuration error: {}", message),
            Error::Discovery {
                ref path,
                ref source,
            } => write!(f, "cannot read source {}: {}", path.display(), source),
            Error::Report {
                ref path,
                ref source,
            } => write!(f, "cannot read report {}: {}", path.display(), source),
            Error::Xml {
                ref path,
                ref message,
            } => write!(f, "malformed XML in {}: {}", path.display(), message),
            Error::Data {
                ref path,
                ref message,
            } => write!(f, "invalid data in {}: {}", path.display(), message),
            Error::Output {
                ref path,
                ref source,
            } => write!(f, "cannot write {}: {}", path.display(), source),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Error::Configuration(err.to_string())
    }
}
