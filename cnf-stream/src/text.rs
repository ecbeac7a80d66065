//! Utilities for parsing text based formats one byte at a time.
use std::{fmt, io};

use num_traits::{CheckedAdd, CheckedMul, FromPrimitive, Zero};

use crate::{DeferredReader, Fallthrough, Parsed, Res};

/// Longest prefix of an overflowing number that is kept for error messages.
const MAX_QUOTED_DIGITS: usize = 60;

/// Parses a run of ASCII digits as a non-negative decimal number.
///
/// Falls through unless the cursor is on a digit. Otherwise consumes all following digits and
/// leaves the cursor on the first non-digit byte. The value is accumulated with checked
/// arithmetic, so every digit is rejected before it could push the value past `I`'s maximum. On
/// overflow the remaining digits are still consumed and the digits (truncated to a reasonable
/// length) are returned as the error.
#[inline]
pub fn ascii_digits<I>(input: &mut LineReader) -> Parsed<I, String>
where
    I: Zero + FromPrimitive + CheckedAdd + CheckedMul,
{
    if !matches!(input.peek(), Some(b'0'..=b'9')) {
        return Fallthrough;
    }

    let mut value = I::zero();
    let ten = I::from_u8(10);
    let mut quoted = Vec::new();

    while let Some(digit @ b'0'..=b'9') = input.peek() {
        let next = ten
            .as_ref()
            .and_then(|ten| value.checked_mul(ten))
            .zip(I::from_u8(digit - b'0'))
            .and_then(|(shifted, digit)| shifted.checked_add(&digit));
        match next {
            Some(next) => {
                value = next;
                quoted.push(digit);
                input.advance();
            }
            None => {
                quoted.push(digit);
                input.advance();
                return Res(Err(overflowing_digits(input, quoted)));
            }
        }
    }

    Res(Ok(value))
}

#[cold]
#[inline(never)]
fn overflowing_digits(input: &mut LineReader, mut quoted: Vec<u8>) -> String {
    while let Some(digit @ b'0'..=b'9') = input.peek() {
        if quoted.len() < MAX_QUOTED_DIGITS {
            quoted.push(digit);
        }
        input.advance();
    }
    if quoted.len() >= MAX_QUOTED_DIGITS {
        quoted.truncate(MAX_QUOTED_DIGITS - 3);
        quoted.extend_from_slice(b"...");
    }
    String::from_utf8_lossy(&quoted).into_owned()
}

/// Passes over horizontal white-space: spaces, tabs and carriage returns.
#[inline]
pub fn horizontal_whitespace(input: &mut LineReader) {
    while let Some(b' ' | b'\t' | b'\r') = input.peek() {
        input.advance();
    }
}

/// Passes over everything up to and including the next newline.
///
/// Returns `false` if the end of the input was reached before a newline was found.
#[inline]
pub fn rest_of_line(input: &mut LineReader) -> bool {
    loop {
        match input.next_byte() {
            Some(b'\n') => return true,
            Some(_) => continue,
            None => return false,
        }
    }
}

/// Passes over a fixed sequence of bytes for as long as the input matches it.
///
/// Returns whether the complete sequence was matched. On a mismatch the cursor is left on the
/// first byte that differs, so this does not backtrack.
#[inline]
pub fn fixed(input: &mut LineReader, fixed: &[u8]) -> bool {
    for &byte in fixed {
        if input.peek() != Some(byte) {
            return false;
        }
        input.advance();
    }
    true
}

/// Source location consisting of a line and column number.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug)]
pub struct LineColumn {
    /// The source line, starting at `1`.
    pub line: usize,
    /// The byte based source column, starting at `1`.
    pub column: usize,
}

impl fmt::Display for LineColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A syntax error with a message and the location where it was detected.
#[derive(Debug)]
pub struct SyntaxError {
    /// The source location of the error.
    pub location: LineColumn,
    /// The error message.
    pub msg: String,
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.msg)
    }
}

impl std::error::Error for SyntaxError {}

/// Wraps a [`DeferredReader`] to keep track of the current line and column.
///
/// All input should be consumed through the `LineReader`, which counts every newline it passes.
/// A mark can be set at the start of a token, so that errors detected after reading the whole
/// token can still point at its start.
pub struct LineReader<'a> {
    reader: DeferredReader<'a>,
    line: usize,
    line_start: usize,
    mark: LineColumn,
}

impl<'a> LineReader<'a> {
    /// Creates a `LineReader` assuming line 1 starts at the current position of the passed
    /// [`DeferredReader`].
    pub fn new(reader: DeferredReader<'a>) -> Self {
        Self {
            line: 1,
            line_start: reader.position(),
            mark: LineColumn { line: 1, column: 1 },
            reader,
        }
    }

    /// Returns a mutable reference to the wrapped [`DeferredReader`].
    ///
    /// Consuming input directly from the returned reader bypasses line counting.
    #[inline]
    pub fn reader(&mut self) -> &mut DeferredReader<'a> {
        &mut self.reader
    }

    /// Returns the byte under the cursor without consuming it.
    #[inline]
    pub fn peek(&mut self) -> Option<u8> {
        self.reader.peek()
    }

    /// Consumes the byte under the cursor, counting newlines.
    #[inline]
    pub fn advance(&mut self) {
        if self.reader.peek() == Some(b'\n') {
            self.reader.advance();
            self.line += 1;
            self.line_start = self.reader.position();
        } else {
            self.reader.advance();
        }
    }

    /// Consumes and returns the byte under the cursor, counting newlines.
    #[inline]
    pub fn next_byte(&mut self) -> Option<u8> {
        let byte = self.peek();
        self.advance();
        byte
    }

    /// Returns the location of the cursor.
    #[inline]
    pub fn location(&self) -> LineColumn {
        LineColumn {
            line: self.line,
            column: self.reader.position().wrapping_sub(self.line_start) + 1,
        }
    }

    /// Marks the current location, usually the start of a token.
    #[inline]
    pub fn set_mark(&mut self) {
        self.mark = self.location();
    }

    /// Generates a syntax error at the current location.
    ///
    /// If the reader encountered an IO error, that error is returned instead, as it is the actual
    /// reason the input did not continue as expected.
    #[inline]
    pub fn give_up<E>(&mut self, msg: impl Into<String>) -> E
    where
        E: From<io::Error> + From<SyntaxError>,
    {
        let location = self.location();
        self.give_up_at_cold(location, msg.into())
    }

    /// Generates a syntax error at the marked location.
    #[inline]
    pub fn give_up_at_mark<E>(&mut self, msg: impl Into<String>) -> E
    where
        E: From<io::Error> + From<SyntaxError>,
    {
        self.give_up_at_cold(self.mark, msg.into())
    }

    /// Generates an arbitrary error at the marked location, unless there is a pending IO error.
    #[cold]
    #[inline(never)]
    pub fn give_up_with<E>(&mut self, err: impl FnOnce(LineColumn) -> E) -> E
    where
        E: From<io::Error>,
    {
        if let Err(io_err) = self.reader.check_io_error() {
            return io_err.into();
        }
        err(self.mark)
    }

    #[cold]
    #[inline(never)]
    fn give_up_at_cold<E>(&mut self, location: LineColumn, msg: String) -> E
    where
        E: From<io::Error> + From<SyntaxError>,
    {
        if let Err(err) = self.reader.check_io_error() {
            return err.into();
        }
        SyntaxError { location, msg }.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    enum Error {
        Io(io::Error),
        Syntax(SyntaxError),
    }

    impl From<io::Error> for Error {
        fn from(err: io::Error) -> Self {
            Error::Io(err)
        }
    }

    impl From<SyntaxError> for Error {
        fn from(err: SyntaxError) -> Self {
            Error::Syntax(err)
        }
    }

    fn reader(text: &str) -> LineReader {
        LineReader::new(DeferredReader::from_read(text.as_bytes()))
    }

    #[test]
    fn digits() {
        let mut input = reader("1234 x");
        assert_eq!(ascii_digits::<i32>(&mut input), Res(Ok(1234)));
        assert_eq!(input.peek(), Some(b' '));
        assert_eq!(ascii_digits::<i32>(&mut input), Fallthrough);
        assert_eq!(input.peek(), Some(b' '));
    }

    #[test]
    fn digits_at_eof() {
        let mut input = reader("007");
        assert_eq!(ascii_digits::<i32>(&mut input), Res(Ok(7)));
        assert_eq!(input.peek(), None);
    }

    #[test]
    fn digits_boundary() {
        let max = i32::MAX.to_string();
        let mut input = reader(&max);
        assert_eq!(ascii_digits::<i32>(&mut input), Res(Ok(i32::MAX)));

        let above = (i32::MAX as i64 + 1).to_string();
        let mut input = reader(&above);
        assert_eq!(ascii_digits::<i32>(&mut input), Res(Err(above.clone())));
        assert_eq!(input.peek(), None);

        let mut input = reader("99999999999999999999 1");
        assert_eq!(
            ascii_digits::<i32>(&mut input),
            Res(Err("99999999999999999999".to_owned()))
        );
        assert_eq!(input.peek(), Some(b' '));
    }

    #[test]
    fn long_overflow_is_truncated() {
        let digits = "9".repeat(200);
        let mut input = reader(&digits);
        match ascii_digits::<i32>(&mut input) {
            Res(Err(quoted)) => {
                assert_eq!(quoted.len(), MAX_QUOTED_DIGITS);
                assert!(quoted.ends_with("..."));
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(input.peek(), None);
    }

    #[test]
    fn line_tracking() {
        let mut input = reader("c x\n\n  p");
        assert_eq!(input.location(), LineColumn { line: 1, column: 1 });
        assert!(rest_of_line(&mut input));
        assert_eq!(input.location(), LineColumn { line: 2, column: 1 });
        input.advance();
        horizontal_whitespace(&mut input);
        assert_eq!(input.location(), LineColumn { line: 3, column: 3 });
        input.set_mark();
        assert!(fixed(&mut input, b"p"));
        assert!(!rest_of_line(&mut input));

        let err: Error = input.give_up_at_mark("expected header");
        match err {
            Error::Syntax(err) => assert_eq!(err.to_string(), "3:3: expected header"),
            Error::Io(err) => panic!("unexpected {}", err),
        }
    }

    #[test]
    fn fixed_mismatch() {
        let mut input = reader("p cnx 1");
        assert!(!fixed(&mut input, b"p cnf "));
        assert_eq!(input.peek(), Some(b'x'));
    }
}
