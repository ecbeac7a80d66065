//! Streaming validation of the clauses following the header.
use cnf_stream::text::LineReader;

use crate::{error::NormalizeError, token, Config, Header};

/// Receives the validated clauses of a formula, one literal at a time.
pub trait Sink {
    /// Called for every non-zero literal, in input order.
    fn literal(&mut self, lit: i32);

    /// Called for every terminating zero.
    fn end_clause(&mut self);
}

/// Number of clauses and literals passed to a [`Sink`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    /// Number of terminated clauses.
    pub clauses: u64,
    /// Number of non-zero literals.
    pub literals: u64,
}

/// Parses the body, passing every literal and clause end on to `sink` as soon as it is read.
///
/// Returns once the end of the input is reached with exactly the declared number of clauses.
pub(crate) fn parse_body(
    input: &mut LineReader,
    header: Header,
    config: &Config,
    sink: &mut impl Sink,
) -> Result<Stats, NormalizeError> {
    let mut parsed_clauses = 0;
    let mut open_clause = false;
    let mut literals = 0;

    loop {
        token::skip_whitespace(input);

        if let Some(terminated) = token::comment(input).optional()? {
            let complete = !open_clause && parsed_clauses == header.clause_count;
            if !terminated && !(complete && config.trailing_comment_at_eof) {
                return Err(input.give_up("end-of-file in comment"));
            }
            continue;
        }

        if let Some(lit) = token::literal(input, header.var_count).optional()? {
            if lit != 0 {
                open_clause = true;
                literals += 1;
                sink.literal(lit);
            } else if parsed_clauses == header.clause_count {
                return Err(input.give_up_at_mark("too many clauses"));
            } else {
                parsed_clauses += 1;
                open_clause = false;
                sink.end_clause();
            }
            continue;
        }

        if token::eof(input) {
            if open_clause {
                return Err(input.give_up("missing clause terminator"));
            }
            if parsed_clauses < header.clause_count {
                return Err(input.give_up("missing clause"));
            }
            break;
        }

        return Err(input.give_up("invalid literal"));
    }

    Ok(Stats {
        clauses: parsed_clauses as u64,
        literals,
    })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use cnf_stream::DeferredReader;

    use super::*;

    #[derive(Debug, PartialEq, Eq)]
    enum Event {
        Lit(i32),
        End,
    }

    impl Sink for Vec<Event> {
        fn literal(&mut self, lit: i32) {
            self.push(Event::Lit(lit));
        }

        fn end_clause(&mut self) {
            self.push(Event::End);
        }
    }

    use Event::{End, Lit};

    fn events(
        var_count: i32,
        clause_count: i32,
        body: &str,
        config: &Config,
    ) -> Result<Vec<Event>, NormalizeError> {
        let mut input = LineReader::new(DeferredReader::from_read(body.as_bytes()));
        let mut events = vec![];
        let header = Header {
            var_count,
            clause_count,
        };
        let stats = parse_body(&mut input, header, config, &mut events)?;
        assert_eq!(stats.clauses, clause_count as u64);
        assert_eq!(
            stats.literals,
            events.iter().filter(|event| **event != End).count() as u64
        );
        Ok(events)
    }

    fn err_msg(var_count: i32, clause_count: i32, body: &str, config: &Config) -> String {
        match events(var_count, clause_count, body, config) {
            Ok(events) => panic!("unexpected success {:?}", events),
            Err(err) => err.to_string(),
        }
    }

    #[test]
    fn clauses() -> Result<(), NormalizeError> {
        assert_eq!(
            events(3, 2, "1 -2 0\n3 0\n", &Config::default())?,
            vec![Lit(1), Lit(-2), End, Lit(3), End]
        );
        Ok(())
    }

    #[test]
    fn empty_body() -> Result<(), NormalizeError> {
        assert_eq!(events(0, 0, "", &Config::strict())?, vec![]);
        assert_eq!(events(5, 0, "\n\n  \n", &Config::strict())?, vec![]);
        Ok(())
    }

    #[test]
    fn empty_clause() -> Result<(), NormalizeError> {
        assert_eq!(
            events(1, 2, "0\n1 0", &Config::strict())?,
            vec![End, Lit(1), End]
        );
        Ok(())
    }

    #[test]
    fn free_form_layout() -> Result<(), NormalizeError> {
        assert_eq!(
            events(
                4,
                3,
                "  1\n\t2\r\n 0 3 0\n-4\n\n-0",
                &Config::strict()
            )?,
            vec![Lit(1), Lit(2), End, Lit(3), End, Lit(-4), End]
        );
        Ok(())
    }

    #[test]
    fn comments_between_literals() -> Result<(), NormalizeError> {
        assert_eq!(
            events(
                3,
                1,
                "c a\n1 c b 0\n2\nc c\n-3 0\nc d\n",
                &Config::strict()
            )?,
            vec![Lit(1), Lit(2), Lit(-3), End]
        );
        Ok(())
    }

    #[test]
    fn trailing_comment_at_eof() -> Result<(), NormalizeError> {
        assert_eq!(
            events(1, 1, "1 0\nc end", &Config::default())?,
            vec![Lit(1), End]
        );
        assert_eq!(
            err_msg(1, 1, "1 0\nc end", &Config::strict()),
            "2:6: end-of-file in comment"
        );
        Ok(())
    }

    #[test]
    fn err_comment_at_eof_in_open_clause() {
        assert_eq!(
            err_msg(1, 1, "1 c end", &Config::default()),
            "1:8: end-of-file in comment"
        );
        assert_eq!(
            err_msg(1, 2, "1 0\nc end", &Config::default()),
            "2:6: end-of-file in comment"
        );
    }

    #[test]
    fn err_missing_terminator() {
        assert_eq!(
            err_msg(3, 1, "1 -2", &Config::default()),
            "1:5: missing clause terminator"
        );
        assert_eq!(
            err_msg(3, 2, "1 0\n2\n", &Config::default()),
            "3:1: missing clause terminator"
        );
    }

    #[test]
    fn err_missing_clause() {
        assert_eq!(
            err_msg(1, 2, "1 0\n", &Config::default()),
            "2:1: missing clause"
        );
    }

    #[test]
    fn err_too_many_clauses() {
        assert_eq!(
            err_msg(2, 1, "1 0\n2 0\n", &Config::default()),
            "2:3: too many clauses"
        );
        assert_eq!(
            err_msg(2, 0, "0", &Config::default()),
            "1:1: too many clauses"
        );
    }

    #[test]
    fn err_invalid_literal() {
        assert_eq!(
            err_msg(2, 1, "1 x 0\n", &Config::default()),
            "1:3: invalid literal"
        );
        assert_eq!(
            err_msg(2, 1, "1 +2 0\n", &Config::default()),
            "1:3: invalid literal"
        );
        assert_eq!(
            err_msg(2, 1, "1 - 2 0\n", &Config::default()),
            "1:4: invalid literal"
        );
    }

    #[test]
    fn err_literal_bounds() {
        assert_eq!(
            err_msg(1, 1, "2 0\n", &Config::default()),
            "1:1: literal exceeds declared variable count"
        );
        assert_eq!(
            err_msg(0, 1, "-1 0\n", &Config::default()),
            "1:1: literal exceeds declared variable count"
        );
        let err = events(1, 1, "99999999999 0\n", &Config::default()).unwrap_err();
        assert_matches!(
            *err,
            crate::InnerNormalizeError::OverflowError { what: "literal", .. }
        );
    }

    #[test]
    fn err_glued_tokens() {
        assert_eq!(
            err_msg(2, 1, "1-2 0\n", &Config::default()),
            "1:2: expected separator after literal"
        );
        assert_eq!(
            err_msg(2, 1, "1 0x\n", &Config::default()),
            "1:4: expected separator after literal"
        );
    }
}
