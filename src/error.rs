use chrono::NaiveDate;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A field was assigned a value outside of its domain.
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },

    #[error("invalid window: {from} comes after {to}")]
    InvalidWindow { from: NaiveDate, to: NaiveDate },

    #[error("malformed recurrence: {0}")]
    Parse(#[from] ParseError),

    #[error("failed to write recurrence: {0}")]
    Write(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn out_of_range(field: &'static str, value: u32, min: u32, max: u32) -> Self {
        Error::OutOfRange {
            field,
            value,
            min,
            max,
        }
    }
}

/// Failure to read the exchange text, with the position it was detected at.
///
/// Lines and columns count from 1. Both are 0 when the rule was read from an
/// already parsed document rather than from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at line {line} column {column}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub line: usize,
    pub column: usize,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, line: usize, column: usize) -> Self {
        ParseError { kind, line, column }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseErrorKind {
    #[error("unexpected end of input")]
    UnexpectedEof,

    /// The text is not well-formed JSON.
    #[error("{0}")]
    Syntax(String),

    /// Well-formed JSON of the wrong shape, such as a negative hour.
    #[error("{0}")]
    InvalidValue(String),

    #[error("missing recurrence level")]
    MissingLevel,

    #[error("more than one recurrence level")]
    MultipleLevels,

    #[error("unknown recurrence level `{0}`")]
    UnknownLevel(String),

    #[error("missing `{0}` property")]
    MissingKey(&'static str),

    #[error("duplicate `{0}` property")]
    DuplicateKey(&'static str),

    #[error("unknown month `{0}`")]
    UnknownMonth(String),

    #[error("unknown weekday `{0}`")]
    UnknownWeekday(String),

    #[error("unknown ordinal `{0}`")]
    UnknownOrdinal(String),

    #[error("invalid day selector `{0}`")]
    InvalidDaySelector(String),

    #[error("{field} out of range: {value}")]
    OutOfRange { field: &'static str, value: u32 },
}
