use std::io;
use std::path::PathBuf;

use crate::codes::attributes::Field;
use crate::codes::messages::Severity;
use crate::process::record::Tag;
use crate::structs::value::Value;

/// Logs a decoded makemkvcon message at its severity, or bails out with
/// `$err` when the severity reaches the decoder's fail level.
#[macro_export]
macro_rules! log_or_err {
    ($state:expr, $severity:expr, $err:expr $(,)?) => {{
        let severity: $crate::codes::messages::Severity = $severity;
        if severity >= $state.fail_level {
            return Err($err);
        } else {
            ::log::log!(target: "makemkvcon", severity.log_level(), "{}", $err);
        }
    }};
}

/// A single output line that could not be turned into a record.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LineError {
    #[error("Unknown record tag {0:?}")]
    UnknownTag(String),

    #[error("{tag} record is missing field {index}")]
    MissingField { tag: Tag, index: usize },

    #[error("Field {index} of {tag} record is not an integer: {value:?}")]
    InvalidInteger {
        tag: Tag,
        index: usize,
        value: String,
    },

    #[error("{tag} ordinal {ordinal} is out of range")]
    OrdinalOutOfRange { tag: Tag, ordinal: usize },
}

/// An attribute that does not end up in the report.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum TranslateError {
    #[error("Unknown or irrelevant attribute id {0}")]
    UnknownAttribute(u32),

    #[error("No 2-letter code for language {0:?}")]
    UnmappedLanguage(String),

    #[error("{entity} has no field {field}")]
    NoSuchField { entity: &'static str, field: Field },

    #[error("Invalid value for {entity} field {field}: {value}")]
    InvalidValue {
        entity: &'static str,
        field: Field,
        value: Value,
    },
}

/// Failure of a whole makemkvcon run.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{message} ({code})")]
    Fatal {
        code: u32,
        severity: Severity,
        message: String,
    },

    #[error("makemkvcon exited with non-zero return code {0}")]
    ExitStatus(i32),

    #[error("makemkvcon was terminated by a signal")]
    Terminated,

    #[error("Couldn't find makemkvcon. Make sure it is installed and in your PATH.")]
    BinaryNotFound,

    #[error("Couldn't find makemkvcon at {}", .0.display())]
    MissingBinary(PathBuf),

    #[error("Failed to start makemkvcon: {0}")]
    Spawn(#[source] io::Error),

    #[error("Failed to read makemkvcon output: {0}")]
    Io(#[from] io::Error),

    #[error("Decoding already stopped at a fatal message")]
    Finished,
}

impl Error {
    /// Message code of a fatal makemkvcon message.
    pub fn code(&self) -> Option<u32> {
        match self {
            Error::Fatal { code, .. } => Some(*code),
            _ => None,
        }
    }
}
