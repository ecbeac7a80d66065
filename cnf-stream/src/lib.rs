//! Streaming building blocks for single-pass text format rewriters.
//!
//! This crate provides just enough infrastructure to write a tokenizer that looks at one byte of
//! input at a time, validates as it goes and immediately emits output, without ever holding more
//! than a fixed amount of the input or output in memory.
//!
//! * [`DeferredReader`] is a buffered reader with a single byte of look-ahead. IO errors are not
//!   returned from each read. Instead the reader behaves as if the input ended and records the
//!   error. A parser then naturally fails with a syntax error, at which point (outside of the hot
//!   path) the recorded IO error is checked and reported instead.
//!
//! * [`text::LineReader`] wraps a [`DeferredReader`] and keeps track of the current line and
//!   column, so that syntax errors can point at the offending input.
//!
//! * [`DeferredWriter`] is the output side counterpart: writes always succeed and IO errors are
//!   reported on the next [`flush`][std::io::Write::flush].
//!
//! * [`Parsed`] is the return type of token parsers that can fall through when the input does not
//!   start with the token they expect, leaving the input untouched so another token can be tried.
//!
//! A token parser looks like this:
//! ```rust
//! # use cnf_stream::{text::LineReader, Parsed, Fallthrough, Res};
//! fn dash(input: &mut LineReader) -> Parsed<(), ()> {
//!     if input.peek() != Some(b'-') {
//!         return Fallthrough;
//!     }
//!     input.advance();
//!     Res(Ok(()))
//! }
//! ```

#![warn(missing_docs)]
mod deferred_reader;
mod deferred_writer;
mod parser;
pub mod text;
pub mod write;

pub use deferred_reader::DeferredReader;
pub use deferred_writer::DeferredWriter;
pub use parser::Parsed;

pub use Parsed::*;
