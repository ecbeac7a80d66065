//! Driving the header parser, body parser and output writer over one input and one output.
use std::io::{Read, Write};

use cnf_stream::{text::LineReader, DeferredReader, DeferredWriter};

use crate::{
    body, header,
    output::{self, OutputMode},
    Header, NormalizeError, Sink, Stats,
};

/// Configuration for the normalizer.
///
/// The defaults accept what newer DIMACS writers produce, [`Config::strict`] restores the
/// stricter behavior of older versions of the tool.
#[derive(Clone, Debug)]
#[non_exhaustive]
pub struct Config {
    /// Skip lines containing only spaces, tabs and carriage returns before the header.
    /// (Default: `true`)
    pub blank_lines_before_header: bool,
    /// Accept a final comment that is not terminated by a newline, provided all clauses are
    /// complete. (Default: `true`)
    pub trailing_comment_at_eof: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            blank_lines_before_header: true,
            trailing_comment_at_eof: true,
        }
    }
}

impl Config {
    /// Returns a configuration rejecting blank lines before the header as well as a final
    /// comment without newline.
    pub fn strict() -> Self {
        Self {
            blank_lines_before_header: false,
            trailing_comment_at_eof: false,
        }
    }

    #[inline]
    /// Sets the [`blank_lines_before_header`][Self#structfield.blank_lines_before_header] field.
    pub fn blank_lines_before_header(mut self, value: bool) -> Self {
        self.blank_lines_before_header = value;
        self
    }

    #[inline]
    /// Sets the [`trailing_comment_at_eof`][Self#structfield.trailing_comment_at_eof] field.
    pub fn trailing_comment_at_eof(mut self, value: bool) -> Self {
        self.trailing_comment_at_eof = value;
        self
    }
}

/// Normalizer for a single DIMACS CNF input.
///
/// The header is parsed and validated on construction, the body is parsed, validated and
/// rewritten in a single pass by [`write`][Self::write].
pub struct Normalizer<'a> {
    reader: LineReader<'a>,
    header: Header,
    config: Config,
}

impl<'a> Normalizer<'a> {
    /// Creates a normalizer reading from a [`Read`] instance.
    pub fn from_read(read: impl Read + 'a, config: Config) -> Result<Self, NormalizeError> {
        Self::new(LineReader::new(DeferredReader::from_read(read)), config)
    }

    /// Creates a normalizer reading from a boxed [`Read`] instance.
    #[inline(never)]
    pub fn from_boxed_dyn_read(
        read: Box<dyn Read + 'a>,
        config: Config,
    ) -> Result<Self, NormalizeError> {
        Self::new(
            LineReader::new(DeferredReader::from_boxed_dyn_read(read)),
            config,
        )
    }

    /// Creates a normalizer reading from a [`LineReader`].
    pub fn new(mut reader: LineReader<'a>, config: Config) -> Result<Self, NormalizeError> {
        let header = header::parse_header(&mut reader, &config)?;
        Ok(Self {
            reader,
            header,
            config,
        })
    }

    /// Returns the DIMACS CNF header.
    pub fn header(&self) -> Header {
        self.header
    }

    /// Validates the remaining input, passing every literal and clause end on to `sink`.
    pub fn parse_into(mut self, sink: &mut impl Sink) -> Result<Stats, NormalizeError> {
        body::parse_body(&mut self.reader, self.header, &self.config, sink)
    }

    /// Validates the remaining input and writes the normalized formula.
    ///
    /// In [`OutputMode::Standard`] the header is written first. The writer is flushed at the end,
    /// so that write errors are reported.
    pub fn write(
        self,
        writer: &mut DeferredWriter,
        mode: OutputMode,
    ) -> Result<Stats, NormalizeError> {
        if mode == OutputMode::Standard {
            output::write_header(writer, self.header);
        }

        let stats = self.parse_into(&mut output::Writer::new(writer, mode))?;
        writer.flush()?;

        tracing::debug!(
            clauses = stats.clauses,
            literals = stats.literals,
            "normalized formula"
        );

        Ok(stats)
    }
}

/// Normalizes the DIMACS CNF formula read from `read`, writing the result to `write`.
pub fn normalize<'a>(
    read: impl Read + 'a,
    write: impl Write + 'a,
    config: Config,
    mode: OutputMode,
) -> Result<Stats, NormalizeError> {
    let normalizer = Normalizer::from_read(read, config)?;
    let mut writer = DeferredWriter::from_write(write);
    normalizer.write(&mut writer, mode)
}
