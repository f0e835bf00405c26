use std::fmt;
use thiserror::Error as ThisError;

///
/// Error
///
/// Structured error with a stable kind classification.
/// Carries the offending argument name and a rendering of the offending value
/// when the failure is argument-shaped.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub argument: Option<&'static str>,
    pub value: Option<String>,
    pub message: String,
}

impl Error {
    /// Construct an error with no argument context.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            argument: None,
            value: None,
            message: message.into(),
        }
    }

    /// A required argument was absent.
    pub fn missing_argument(argument: &'static str) -> Self {
        Self {
            kind: ErrorKind::MissingArgument,
            argument: Some(argument),
            value: None,
            message: format!("argument '{argument}' is required"),
        }
    }

    /// An argument was present but had the wrong shape.
    pub fn invalid_type(
        argument: &'static str,
        expected: &str,
        value: &impl fmt::Debug,
    ) -> Self {
        let rendered = format!("{value:?}");

        Self {
            kind: ErrorKind::InvalidType,
            argument: Some(argument),
            message: format!("argument '{argument}' must be {expected}, got {rendered}"),
            value: Some(rendered),
        }
    }

    pub fn argument_out_of_range(argument: &'static str, index: usize, len: usize) -> Self {
        Self {
            kind: ErrorKind::ArgumentOutOfRange,
            argument: Some(argument),
            value: Some(index.to_string()),
            message: format!("argument '{argument}' is out of range: {index} (len {len})"),
        }
    }

    pub fn duplicate_key(key: &impl fmt::Debug) -> Self {
        let rendered = format!("{key:?}");

        Self {
            kind: ErrorKind::DuplicateKey,
            argument: Some("key"),
            message: format!("an entry with key {rendered} already exists"),
            value: Some(rendered),
        }
    }

    pub fn key_not_found(key: &impl fmt::Debug) -> Self {
        let rendered = format!("{key:?}");

        Self {
            kind: ErrorKind::KeyNotFound,
            argument: Some("key"),
            message: format!("key not found: {rendered}"),
            value: Some(rendered),
        }
    }

    #[must_use]
    pub const fn is_argument_error(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::MissingArgument | ErrorKind::InvalidType | ErrorKind::ArgumentOutOfRange
        )
    }

    #[must_use]
    pub fn display_with_kind(&self) -> String {
        format!("{}: {}", self.kind, self.message)
    }
}

///
/// ErrorKind
/// Error taxonomy shared by the query layer and the containers.
///

#[remain::sorted]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorKind {
    ArgumentOutOfRange,
    DuplicateKey,
    InvalidType,
    KeyNotFound,
    MissingArgument,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::ArgumentOutOfRange => "argument_out_of_range",
            Self::DuplicateKey => "duplicate_key",
            Self::InvalidType => "invalid_type",
            Self::KeyNotFound => "key_not_found",
            Self::MissingArgument => "missing_argument",
        };
        write!(f, "{label}")
    }
}

///
/// TESTS
///
