//! Parsing of the DIMACS CNF header and everything in front of it.
use cnf_stream::text::{self, LineReader};

use crate::{error::NormalizeError, token, Config};

/// Header data of a DIMACS CNF file.
///
/// Both counts are binding: every literal must refer to a variable up to `var_count` and the
/// body must contain exactly `clause_count` clauses.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Header {
    /// Upper bound on the variable indices used in the formula.
    pub var_count: i32,
    /// Number of clauses in the formula.
    pub clause_count: i32,
}

/// Parses the header, including any comments (and, if enabled, blank lines) in front of it.
///
/// Leaves the cursor right after the newline ending the header line.
pub(crate) fn parse_header(
    input: &mut LineReader,
    config: &Config,
) -> Result<Header, NormalizeError> {
    skip_preamble(input, config)?;

    if !text::fixed(input, b"p cnf ") {
        return Err(input.give_up("invalid header"));
    }

    let var_count = token::count(input, "variable count")
        .or_give_up(|| input.give_up("invalid number of variables"))?;

    if !text::fixed(input, b" ") {
        return Err(input.give_up("expected space after variables"));
    }

    let clause_count = token::count(input, "clause count")
        .or_give_up(|| input.give_up("invalid number of clauses"))?;

    end_of_header(input)?;

    tracing::debug!(var_count, clause_count, "parsed header");

    Ok(Header {
        var_count,
        clause_count,
    })
}

/// Skips comment lines and blank lines until the cursor is on the `p` starting the header.
fn skip_preamble(input: &mut LineReader, config: &Config) -> Result<(), NormalizeError> {
    loop {
        match input.peek() {
            Some(b'p') => return Ok(()),
            Some(b'c') => {
                if !text::rest_of_line(input) {
                    return Err(input.give_up("end-of-file in comment"));
                }
            }
            Some(b' ' | b'\t' | b'\r' | b'\n') if config.blank_lines_before_header => {
                text::horizontal_whitespace(input);
                if input.peek() != Some(b'\n') {
                    return Err(input.give_up("expected header"));
                }
                input.advance();
            }
            _ => return Err(input.give_up("expected header")),
        }
    }
}

/// Passes over trailing horizontal whitespace and the mandatory newline of the header line.
fn end_of_header(input: &mut LineReader) -> Result<(), NormalizeError> {
    text::horizontal_whitespace(input);
    if input.peek() == Some(b'\n') {
        input.advance();
        Ok(())
    } else {
        Err(input.give_up("expected newline after header"))
    }
}
