//! Opening input and output streams by path.
//!
//! The path `-` stands for standard input or output. Paths ending in `.xz` are transparently
//! decompressed when reading and compressed when writing.
use std::{
    borrow::Cow,
    fs::File,
    io::{self, Read, Stdout, Write},
    path::Path,
};

use xz2::{read::XzDecoder, write::XzEncoder};

/// Path denoting standard input or output.
pub const STDIO: &str = "-";

/// File extension of XZ archives.
const XZ: &str = "xz";

/// Compression level used for XZ output, the `xz` default.
const XZ_LEVEL: u32 = 6;

fn is_stdio(path: &Path) -> bool {
    path.as_os_str() == STDIO
}

/// Returns the name to use for an input path in messages.
pub fn input_name(path: &Path) -> Cow<str> {
    if is_stdio(path) {
        Cow::Borrowed("<stdin>")
    } else {
        path.to_string_lossy()
    }
}

/// Returns the name to use for an output path in messages.
pub fn output_name(path: &Path) -> Cow<str> {
    if is_stdio(path) {
        Cow::Borrowed("<stdout>")
    } else {
        path.to_string_lossy()
    }
}

fn is_compressed(path: &Path) -> bool {
    path.extension().is_some_and(|extension| extension == XZ)
}

/// Opens a path for reading.
pub fn open_input(path: &Path) -> io::Result<Box<dyn Read>> {
    if is_stdio(path) {
        return Ok(Box::new(io::stdin().lock()));
    }
    let file = File::open(path)?;
    if is_compressed(path) {
        Ok(Box::new(XzDecoder::new_multi_decoder(file)))
    } else {
        Ok(Box::new(file))
    }
}

/// An output stream opened by [`open_output`].
///
/// Dropping an `Output` releases the underlying file, but only [`finish`][Self::finish] reports
/// errors that occur while flushing or completing a compressed stream.
pub enum Output {
    /// Standard output.
    Stdout(Stdout),
    /// An uncompressed file.
    File(File),
    /// A file receiving XZ compressed data.
    Xz(XzEncoder<File>),
}

/// Opens a path for writing, creating or truncating the file.
pub fn open_output(path: &Path) -> io::Result<Output> {
    if is_stdio(path) {
        return Ok(Output::Stdout(io::stdout()));
    }
    let file = File::create(path)?;
    if is_compressed(path) {
        Ok(Output::Xz(XzEncoder::new(file, XZ_LEVEL)))
    } else {
        Ok(Output::File(file))
    }
}

impl Output {
    /// Flushes all data and completes a compressed stream.
    pub fn finish(self) -> io::Result<()> {
        match self {
            Output::Stdout(mut stdout) => stdout.flush(),
            Output::File(mut file) => file.flush(),
            Output::Xz(encoder) => encoder.finish()?.flush(),
        }
    }
}

impl Write for Output {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout(stdout) => stdout.write(buf),
            Output::File(file) => file.write(buf),
            Output::Xz(encoder) => encoder.write(buf),
        }
    }

    #[inline]
    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        match self {
            Output::Stdout(stdout) => stdout.write_all(buf),
            Output::File(file) => file.write_all(buf),
            Output::Xz(encoder) => encoder.write_all(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout(stdout) => stdout.flush(),
            Output::File(file) => file.flush(),
            Output::Xz(encoder) => encoder.flush(),
        }
    }
}
