use std::io::{self, Write};

/// A buffered writer with deferred error checking.
///
/// This can be used like [`std::io::BufWriter`], but like [`DeferredReader`][crate::DeferredReader]
/// this performs deferred error checking. Every write succeeds. IO errors that occur while passing
/// data to the underlying [`Write`] instance are reported on the next call to
/// [`flush`][Write::flush] or [`check_io_error`][Self::check_io_error]. Any data written after an
/// IO error occured, before it is eventually reported, is discarded.
pub struct DeferredWriter<'a> {
    write: Box<dyn Write + 'a>,
    buf: Vec<u8>,
    io_error: Option<io::Error>,
    panicked: bool,
}

impl<'a> DeferredWriter<'a> {
    const DEFAULT_CHUNK_SIZE: usize = 16 << 10;

    /// Creates a [`DeferredWriter`] writing data to a [`Write`] instance.
    pub fn from_write(write: impl Write + 'a) -> Self {
        Self::from_boxed_dyn_write(Box::new(write))
    }

    /// Creates a [`DeferredWriter`] writing data to a boxed [`Write`] instance.
    #[inline(never)]
    pub fn from_boxed_dyn_write(write: Box<dyn Write + 'a>) -> Self {
        DeferredWriter {
            write,
            buf: Vec::with_capacity(Self::DEFAULT_CHUNK_SIZE),
            io_error: None,
            panicked: false,
        }
    }

    /// Passes the buffered data to the underlying [`Write`] instance, deferring IO errors.
    pub fn flush_defer_err(&mut self) {
        self.pass_through(0);
        if self.io_error.is_none() {
            self.panicked = true;
            if let Err(err) = self.write.flush() {
                self.io_error = Some(err);
            }
            self.panicked = false;
        }
    }

    /// Writes a slice of bytes, deferring IO errors.
    ///
    /// Both [`write`][Write::write] and [`write_all`][Write::write_all] call this method.
    #[inline]
    pub fn write_all_defer_err(&mut self, bytes: &[u8]) {
        if self.buf.len() + bytes.len() <= self.buf.capacity() {
            self.buf.extend_from_slice(bytes);
        } else {
            self.write_all_defer_err_cold(bytes);
        }
    }

    #[cold]
    #[inline(never)]
    fn write_all_defer_err_cold(&mut self, bytes: &[u8]) {
        self.pass_through(0);
        if bytes.len() < self.buf.capacity() {
            self.buf.extend_from_slice(bytes);
        } else if self.io_error.is_none() {
            self.panicked = true;
            if let Err(err) = self.write.write_all(bytes) {
                self.io_error = Some(err);
            }
            self.panicked = false;
        }
    }

    /// Returns the internal buffer after making sure it has room for `len` more bytes.
    ///
    /// Used to format data directly into the output buffer. Appending more than `len` bytes is
    /// allowed, but may grow the buffer.
    #[inline]
    pub fn reserve_defer_err(&mut self, len: usize) -> &mut Vec<u8> {
        if self.buf.len() + len > self.buf.capacity() {
            self.pass_through(len);
        }
        &mut self.buf
    }

    /// Hands all buffered data to the underlying writer and ensures room for `len` more bytes.
    #[cold]
    #[inline(never)]
    fn pass_through(&mut self, len: usize) {
        // Silently discard data if we errored before but haven't reported it yet
        if self.io_error.is_none() && !self.buf.is_empty() {
            self.panicked = true;
            if let Err(err) = self.write.write_all(&self.buf) {
                self.io_error = Some(err);
            }
            self.panicked = false;
        }
        self.buf.clear();
        self.buf.reserve(len);
    }

    /// Returns an encountered IO error as `Err(io_err)`.
    ///
    /// This resets the stored IO error and returns `Ok(())` if no IO error is stored.
    #[inline]
    pub fn check_io_error(&mut self) -> io::Result<()> {
        match self.io_error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl Write for DeferredWriter<'_> {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_all_defer_err(buf);
        Ok(buf.len())
    }

    #[inline]
    fn flush(&mut self) -> io::Result<()> {
        self.flush_defer_err();
        self.check_io_error()
    }

    #[inline]
    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.write_all_defer_err(buf);
        Ok(())
    }
}

impl Drop for DeferredWriter<'_> {
    fn drop(&mut self) {
        // Don't write again into a writer that panicked during a write.
        if !self.panicked {
            self.pass_through(0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn buffered_until_flush() -> io::Result<()> {
        let mut output = vec![];
        {
            let mut writer = DeferredWriter::from_write(&mut output);
            writer.write_all_defer_err(b"p cnf ");
            writer.reserve_defer_err(4).extend_from_slice(b"1 1\n");
            writer.flush()?;
        }
        assert_eq!(output, b"p cnf 1 1\n");
        Ok(())
    }

    #[test]
    fn large_writes_bypass_the_buffer() -> io::Result<()> {
        let mut output = vec![];
        let large = vec![b'1'; DeferredWriter::DEFAULT_CHUNK_SIZE * 3];
        {
            let mut writer = DeferredWriter::from_write(&mut output);
            writer.write_all_defer_err(b"0\n");
            writer.write_all_defer_err(&large);
            writer.write_all_defer_err(b"0\n");
        }
        assert_eq!(output.len(), large.len() + 4);
        assert_eq!(&output[..3], b"0\n1");
        assert_eq!(&output[output.len() - 3..], b"10\n");
        Ok(())
    }

    #[test]
    fn error_reported_on_flush() {
        let mut writer = DeferredWriter::from_write(Broken);
        writer.write_all_defer_err(b"1 -2 0\n");
        let err = writer.flush().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        assert!(writer.flush().is_ok());
    }
}
