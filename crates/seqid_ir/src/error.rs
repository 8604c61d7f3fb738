//! Errors raised by identifier parsing and handle dereferencing.

/// Error produced by seq-id parsing or by misuse of an interned entry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SeqIdError {
    /// Text is not a recognized identifier syntax.
    #[error("cannot resolve seq-id '{input}': {reason}")]
    Parse { input: String, reason: &'static str },

    /// An entry was dereferenced through the wrong path for its family
    /// (plain value requested from a packed family, or the reverse).
    #[error("seq-id type error: {0}")]
    TypeError(&'static str),

    /// A value was requested from an empty handle.
    #[error("seq-id handle is empty")]
    EmptyHandle,
}

impl SeqIdError {
    pub(crate) fn parse(input: &str, reason: &'static str) -> Self {
        SeqIdError::Parse {
            input: input.to_owned(),
            reason,
        }
    }

    /// Whether this error came from parsing text.
    pub fn is_parse(&self) -> bool {
        matches!(self, SeqIdError::Parse { .. })
    }
}
