use cnf_stream::{
    text::{self, LineReader},
    Fallthrough, Parsed, Res,
};

use crate::error::{InnerNormalizeError, NormalizeError};

/// Returns true for the bytes that may separate tokens: `" \t\r\n"`.
#[inline]
pub fn is_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\r' | b'\n')
}

/// Returns true when the next byte may follow a literal: whitespace, a comment or the EOF.
#[inline]
pub fn is_end_of_literal(input: &mut LineReader) -> bool {
    match input.peek() {
        Some(byte) => is_whitespace(byte) || byte == b'c',
        None => true,
    }
}

/// Passes over any whitespace, including newlines.
#[inline]
pub fn skip_whitespace(input: &mut LineReader) {
    while let Some(byte) = input.peek() {
        if !is_whitespace(byte) {
            break;
        }
        input.advance();
    }
}

/// Parses a comment from the `c` up to and including the next newline.
///
/// Returns whether the comment was terminated by a newline, `false` means it ran into the end of
/// the input.
#[inline]
pub fn comment(input: &mut LineReader) -> Parsed<bool, NormalizeError> {
    if input.peek() == Some(b'c') {
        input.set_mark();
        Res(Ok(text::rest_of_line(input)))
    } else {
        Fallthrough
    }
}

/// Succeeds at the end of the input, unless the input ended because of an IO error.
#[inline]
pub fn eof(input: &mut LineReader) -> bool {
    input.peek().is_none() && input.reader().io_error().is_none()
}

#[cold]
#[inline(never)]
pub fn overflow(input: &mut LineReader, what: &'static str, digits: String) -> NormalizeError {
    input.give_up_with(|location| {
        Box::new(InnerNormalizeError::OverflowError {
            location,
            what,
            digits,
            max: i32::MAX,
        })
    })
}

/// Parses a non-negative count, as used in the header.
#[inline]
pub fn count(input: &mut LineReader, what: &'static str) -> Parsed<i32, NormalizeError> {
    input.set_mark();
    text::ascii_digits(input).map_err(|digits| overflow(input, what, digits))
}

/// Parses a literal, an optional `-` followed by decimal digits, and checks it against the
/// variable count.
///
/// Falls through unless the next byte is a `-` or a digit. A zero (with or without `-`) is always
/// accepted as it terminates a clause instead of referring to a variable.
#[inline]
pub fn literal(input: &mut LineReader, var_count: i32) -> Parsed<i32, NormalizeError> {
    input.set_mark();
    let negative = match input.peek() {
        Some(b'-') => {
            input.advance();
            true
        }
        Some(b'0'..=b'9') => false,
        _ => return Fallthrough,
    };

    Res(magnitude(input, var_count).map(|value| if negative { -value } else { value }))
}

/// Parses the digits of a literal once its sign was consumed.
fn magnitude(input: &mut LineReader, var_count: i32) -> Result<i32, NormalizeError> {
    let magnitude = text::ascii_digits::<i32>(input)
        .map_err(|digits| overflow(input, "literal", digits))
        .or_give_up(|| input.give_up("invalid literal"))?;

    if magnitude > var_count {
        return Err(input.give_up_at_mark("literal exceeds declared variable count"));
    }

    if !is_end_of_literal(input) {
        return Err(input.give_up("expected separator after literal"));
    }

    Ok(magnitude)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use cnf_stream::DeferredReader;

    use super::*;

    fn reader(text: &str) -> LineReader {
        LineReader::new(DeferredReader::from_read(text.as_bytes()))
    }

    fn msg(err: NormalizeError) -> String {
        err.syntax_msg().unwrap_or_default().to_owned()
    }

    #[test]
    fn literals() -> Result<(), NormalizeError> {
        let mut input = reader("1 -2\t3c\n-0\r\n0");
        assert_eq!(literal(&mut input, 3).optional()?, Some(1));
        skip_whitespace(&mut input);
        assert_eq!(literal(&mut input, 3).optional()?, Some(-2));
        skip_whitespace(&mut input);
        assert_eq!(literal(&mut input, 3).optional()?, Some(3));
        assert_eq!(literal(&mut input, 3).optional()?, None);
        assert_eq!(comment(&mut input).optional()?, Some(true));
        assert_eq!(literal(&mut input, 3).optional()?, Some(0));
        skip_whitespace(&mut input);
        assert_eq!(literal(&mut input, 3).optional()?, Some(0));
        assert!(eof(&mut input));
        Ok(())
    }

    #[test]
    fn err_lone_dash() {
        let mut input = reader("- 1");
        let err = literal(&mut input, 3).or_give_up(|| unreachable!()).unwrap_err();
        assert_eq!(msg(err), "invalid literal");
    }

    #[test]
    fn err_literal_bound() {
        let mut input = reader("2 -4 0");
        assert_matches!(literal(&mut input, 3), Res(Ok(2)));
        skip_whitespace(&mut input);
        let err = literal(&mut input, 3).optional().unwrap_err();
        assert_eq!(err.to_string(), "1:3: literal exceeds declared variable count");
    }

    #[test]
    fn err_missing_separator() {
        let mut input = reader("12x");
        let err = literal(&mut input, 20).optional().unwrap_err();
        assert_eq!(err.to_string(), "1:3: expected separator after literal");
    }

    #[test]
    fn err_literal_overflow() {
        let mut input = reader("-2147483648 0");
        let err = literal(&mut input, i32::MAX).optional().unwrap_err();
        assert_matches!(
            *err,
            InnerNormalizeError::OverflowError { what: "literal", ref digits, .. } if digits == "2147483648"
        );
    }

    #[test]
    fn counts() {
        let mut input = reader("2147483647 2147483648");
        assert_matches!(count(&mut input, "variable count"), Res(Ok(i32::MAX)));
        input.advance();
        let err = count(&mut input, "clause count").optional().unwrap_err();
        assert_eq!(
            err.to_string(),
            "1:12: clause count 2147483648 exceeds the supported maximum of 2147483647"
        );
    }

    #[test]
    fn unterminated_comment() {
        let mut input = reader("c trailing");
        assert_matches!(comment(&mut input), Res(Ok(false)));
        assert!(eof(&mut input));
    }
}
