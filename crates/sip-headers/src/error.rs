use thiserror::Error;

/// A type alias for handling `Result`s with `Error`
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing, decoding or converting SIP headers.
///
/// Rendering, comparing and cloning never fail; an unusable header is
/// reported through [`TypedHeader::is_valid`](crate::TypedHeader::is_valid)
/// instead of an error.
#[derive(Error, Debug)]
pub enum Error {
    /// Nothing to parse
    #[error("Empty input")]
    EmptyInput,

    /// The grammar could not build a syntax tree for the input
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// A JSON envelope decoded to a different header kind than requested
    #[error("Unexpected header type: got {actual}, expected {expected}")]
    UnexpectedHeaderType {
        /// Canonical name of the decoded header
        actual: String,
        /// Canonical name the caller asked for
        expected: String,
    },

    /// The JSON payload is not a `{name, value}` header envelope
    #[error("Not a header envelope: {0}")]
    NotHeaderEnvelope(String),

    /// JSON syntax or serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns `true` for the soft "not an envelope" condition that
    /// unmarshal call sites turn into an absent header.
    pub fn is_not_envelope(&self) -> bool {
        matches!(self, Error::NotHeaderEnvelope(_))
    }
}

impl From<nom::Err<nom::error::Error<&[u8]>>> for Error {
    fn from(err: nom::Err<nom::error::Error<&[u8]>>) -> Self {
        let detail = match err {
            nom::Err::Incomplete(_) => "incomplete input".to_string(),
            nom::Err::Error(e) | nom::Err::Failure(e) => format!(
                "{:?} at {:?}",
                e.code,
                String::from_utf8_lossy(&e.input[..e.input.len().min(32)])
            ),
        };
        Error::MalformedInput(detail)
    }
}
