//! This crate validates DIMACS CNF files and rewrites them into a canonical form.
//!
//! The normalized output contains no comments and a minimal amount of white-space, so that tools
//! consuming it can rely on a predictable layout. Parsing, validation and rewriting all happen in a
//! single streaming pass that looks at one byte of input at a time, so memory usage does not
//! depend on the size of the formula.
//!
//! The validation is purely syntactic: the header must be well-formed, every literal must refer
//! to a declared variable, every clause must be terminated and the number of clauses must match
//! the header exactly.
//!
//! ```rust
//! # fn main() -> Result<(), cnf_normalize::NormalizeError> {
//! use cnf_normalize::{normalize, Config, OutputMode};
//!
//! let mut output = vec![];
//! normalize(
//!     "c example\np cnf 2 1\n 1   -2\n0\n".as_bytes(),
//!     &mut output,
//!     Config::default(),
//!     OutputMode::Standard,
//! )?;
//! assert_eq!(output, b"p cnf 2 1\n1 -2 0\n");
//! # Ok(())
//! # }
//! ```
//!
//! See [`Normalizer`] for finer control, e.g. to inspect the header before creating the output.

#![warn(missing_docs)]
mod body;
mod error;
mod header;
mod normalize;
pub mod output;
pub mod stream;
mod token;


pub use body::{Sink, Stats};
pub use error::{InnerNormalizeError, LineColumn, NormalizeError, SyntaxError};
pub use header::Header;
pub use normalize::{normalize, Config, Normalizer};
pub use output::OutputMode;
