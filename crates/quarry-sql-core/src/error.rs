//! Parser error type.

/// A parse failure: a human-readable message plus the zero-based character
/// offset into the original source where the failure occurred.
///
/// Both the lexer and the parser report through this one type. When several
/// grammar alternatives fail, the error of the furthest-advancing branch is
/// the one reported.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} at offset {offset}")]
pub struct ParseError {
    /// The error message.
    pub message: String,
    /// Zero-based character offset into the source text.
    pub offset: usize,
}

impl ParseError {
    /// Creates a new parse error.
    #[must_use]
    pub fn new(message: impl Into<String>, offset: usize) -> Self {
        Self {
            message: message.into(),
            offset,
        }
    }

    /// Creates a `"<text> expected"` error, the standard message for a
    /// missing keyword or delimiter.
    #[must_use]
    pub fn expected(text: &str, offset: usize) -> Self {
        Self::new(format!("{text} expected"), offset)
    }
}
