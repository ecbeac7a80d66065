//! Rendering of validated formulas.
use std::io::Write;

use cnf_stream::{write, DeferredWriter};

use crate::{Header, Sink};

/// Layout of the normalized output.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// DIMACS CNF with a header line and one clause per line, each ending in `"0\n"`.
    #[default]
    Standard,
    /// All clauses on a single line without header, separated by a single space and without a
    /// final newline, as used by the GBD benchmark database.
    Gbd,
}

/// Writes a DIMACS CNF header.
pub fn write_header(writer: &mut DeferredWriter, header: Header) {
    let _ = writeln!(writer, "p cnf {} {}", header.var_count, header.clause_count);
}

/// A [`Sink`] writing each literal and clause end to a [`DeferredWriter`] as it arrives.
///
/// The header is not written by this, use [`write_header`] first in [`OutputMode::Standard`].
pub struct Writer<'w, 'a> {
    writer: &'w mut DeferredWriter<'a>,
    mode: OutputMode,
    in_clause: bool,
    any_clause: bool,
}

impl<'w, 'a> Writer<'w, 'a> {
    /// Creates a writer for a formula in the given layout.
    pub fn new(writer: &'w mut DeferredWriter<'a>, mode: OutputMode) -> Self {
        Self {
            writer,
            mode,
            in_clause: false,
            any_clause: false,
        }
    }

    #[inline]
    fn begin_clause(&mut self) {
        if !self.in_clause {
            if self.mode == OutputMode::Gbd && self.any_clause {
                self.writer.write_all_defer_err(b" ");
            }
            self.in_clause = true;
            self.any_clause = true;
        }
    }
}

impl Sink for Writer<'_, '_> {
    #[inline]
    fn literal(&mut self, lit: i32) {
        self.begin_clause();
        write::text::ascii_digits(self.writer, lit);
        self.writer.write_all_defer_err(b" ");
    }

    #[inline]
    fn end_clause(&mut self) {
        self.begin_clause();
        let terminator: &[u8] = match self.mode {
            OutputMode::Standard => b"0\n",
            OutputMode::Gbd => b"0",
        };
        self.writer.write_all_defer_err(terminator);
        self.in_clause = false;
    }
}
