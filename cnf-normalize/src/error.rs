use std::io;

pub use cnf_stream::text::{LineColumn, SyntaxError};
use thiserror::Error;

/// A [`SyntaxError`], an [`OverflowError`][InnerNormalizeError::OverflowError] or an
/// [`io::Error`].
///
/// This is used via [`NormalizeError`], which wraps this in a [`Box`].
#[derive(Error, Debug)]
pub enum InnerNormalizeError {
    /// A syntax error containing a message and a source location.
    #[error(transparent)]
    SyntaxError(SyntaxError),
    /// A decimal number that does not fit into the supported integer type.
    #[error("{location}: {what} {digits} exceeds the supported maximum of {max}")]
    OverflowError {
        /// Start of the offending number.
        location: LineColumn,
        /// What the number was supposed to be.
        what: &'static str,
        /// The offending digits, possibly truncated.
        digits: String,
        /// The largest supported value.
        max: i32,
    },
    /// An IO error while reading the input or writing the output.
    #[error("IO error: {}", .0)]
    IoError(#[source] io::Error),
}

/// Boxed version of [`InnerNormalizeError`].
pub type NormalizeError = Box<InnerNormalizeError>;

impl From<io::Error> for NormalizeError {
    fn from(err: io::Error) -> Self {
        Box::new(InnerNormalizeError::IoError(err))
    }
}

impl From<SyntaxError> for NormalizeError {
    fn from(err: SyntaxError) -> Self {
        Box::new(InnerNormalizeError::SyntaxError(err))
    }
}

impl InnerNormalizeError {
    /// Returns the message of a syntax error, without its location.
    pub fn syntax_msg(&self) -> Option<&str> {
        match self {
            InnerNormalizeError::SyntaxError(err) => Some(&err.msg),
            _ => None,
        }
    }
}
