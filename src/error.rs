//! Errors raised while fetching and writing gitignore templates.

use std::error::Error as StdErr;
use std::fmt::{Display, Formatter, Result};
use std::path::PathBuf;

/// Everything that can stop a `gi` run. Each variant maps to one exit code.
#[derive(Debug)]
pub(crate) enum Error {
    /// The request could not be sent or the response could not be received.
    Network(minreq::Error),

    /// The service has no template for the requested subject(s).
    NotFound { subjects: Vec<String> },

    /// The service answered with a status other than 200 or 404.
    Fetch { status: i32, reason: String },

    /// A response body could not be read as expected.
    Read(minreq::Error),

    /// The gitignore file could not be opened or written.
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The interactive selection ended with nothing chosen.
    NoSelection,

    /// The user declined to touch an existing file.
    Cancelled,

    /// A prompt was needed but there is no terminal to show it on.
    NotATerminal,

    /// The list filter could not be compiled.
    Filter(regex::Error),

    /// The logger could not be installed.
    Logger(log::SetLoggerError),
}

impl Error {
    /// Process exit code for this error.
    pub(crate) fn exit_code(&self) -> u8 {
        match self {
            Error::Network(_) => 2,
            Error::Read(_) => 3,
            Error::Write { .. } => 4,
            Error::NotFound { .. } => 5,
            Error::Fetch { .. } => 6,
            Error::NoSelection
            | Error::Cancelled
            | Error::NotATerminal
            | Error::Filter(_)
            | Error::Logger(_) => 1,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            Error::Network(err) => write!(f, "Error fetching .gitignore data. [{}]", err),
            Error::NotFound { subjects } => write!(
                f,
                r#"No .gitignore template found for "{}""#,
                subjects.join(" ")
            ),
            Error::Fetch { status, reason } => {
                write!(f, "The gitignore service answered {} {}", status, reason)
            }
            Error::Read(err) => write!(f, "Error reading the service response. [{}]", err),
            Error::Write { path, source } => {
                write!(f, "Error writing {}. [{}]", path.display(), source)
            }
            Error::NoSelection => write!(f, "No templates were selected."),
            Error::Cancelled => write!(f, "Left the existing .gitignore file untouched."),
            Error::NotATerminal => write!(
                f,
                "Interactive input needs a terminal; pass subjects or --append/--overwrite."
            ),
            Error::Filter(err) => write!(f, "Invalid filter. [{}]", err),
            Error::Logger(err) => write!(f, "Could not set up logging. [{}]", err),
        }
    }
}

impl StdErr for Error {
    fn source(&self) -> Option<&(dyn StdErr + 'static)> {
        match self {
            Error::Network(err) | Error::Read(err) => Some(err),
            Error::Write { source, .. } => Some(source),
            Error::Filter(err) => Some(err),
            Error::Logger(err) => Some(err),
            _ => None,
        }
    }
}

impl From<regex::Error> for Error {
    fn from(err: regex::Error) -> Self {
        Error::Filter(err)
    }
}

impl From<log::SetLoggerError> for Error {
    fn from(err: log::SetLoggerError) -> Self {
        Error::Logger(err)
    }
}
