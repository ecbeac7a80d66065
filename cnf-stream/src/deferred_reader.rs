use std::io::{self, Read};

/// A buffered reader with one byte of look-ahead and deferred error checking.
///
/// Like `std`'s [`BufReader`][std::io::BufReader], this coalesces many small reads into fewer
/// larger reads of the underlying data source. The difference is that a `DeferredReader` is
/// consumed one byte at a time via [`peek`][Self::peek] and [`advance`][Self::advance], and that
/// IO errors are not returned immediately. When a read fails, the reader acts as if the input
/// ended and stores the error, to be retrieved with [`check_io_error`][Self::check_io_error].
pub struct DeferredReader<'a> {
    read: Box<dyn Read + 'a>,
    buf: Vec<u8>,
    // `buf[pos..end]` holds the data that was read but not yet consumed.
    pos: usize,
    end: usize,
    complete: bool,
    io_error: Option<io::Error>,
    consumed: usize,
}

impl<'a> DeferredReader<'a> {
    const DEFAULT_CHUNK_SIZE: usize = 16 << 10;

    /// Creates a [`DeferredReader`] for the data of a [`Read`] instance.
    pub fn from_read(read: impl Read + 'a) -> Self {
        Self::from_boxed_dyn_read(Box::new(read))
    }

    /// Creates a [`DeferredReader`] for the data of a boxed [`Read`] instance.
    #[inline(never)]
    pub fn from_boxed_dyn_read(read: Box<dyn Read + 'a>) -> Self {
        DeferredReader {
            read,
            buf: vec![0; Self::DEFAULT_CHUNK_SIZE],
            pos: 0,
            end: 0,
            complete: false,
            io_error: None,
            consumed: 0,
        }
    }

    /// Sets the number of bytes that are requested from the underlying [`Read`] at once.
    ///
    /// Takes effect on the next refill. A size of `0` is treated as `1`.
    pub fn set_chunk_size(&mut self, size: usize) {
        let size = size.max(1);
        if self.buf.len() != size && self.pos == self.end {
            self.buf = vec![0; size];
            self.pos = 0;
            self.end = 0;
        }
    }

    /// Returns the byte under the cursor without consuming it.
    ///
    /// Returns `None` at the end of the input or when an IO error was encountered, use
    /// [`check_io_error`][Self::check_io_error] to distinguish the two.
    #[inline]
    pub fn peek(&mut self) -> Option<u8> {
        if self.pos < self.end {
            Some(self.buf[self.pos])
        } else {
            self.peek_cold()
        }
    }

    #[cold]
    #[inline(never)]
    fn peek_cold(&mut self) -> Option<u8> {
        if self.refill() {
            Some(self.buf[self.pos])
        } else {
            None
        }
    }

    /// Consumes the byte under the cursor.
    ///
    /// Does nothing at the end of the input.
    #[inline]
    pub fn advance(&mut self) {
        if self.pos < self.end {
            self.pos += 1;
            self.consumed = self.consumed.wrapping_add(1);
        }
    }

    /// Total number of bytes consumed so far.
    ///
    /// This wraps around every `usize::MAX` bytes.
    #[inline]
    pub fn position(&self) -> usize {
        self.consumed
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

    /// Returns a reference to an encountered IO error without resetting it.
    #[inline]
    pub fn io_error(&self) -> Option<&io::Error> {
        self.io_error.as_ref()
    }

    /// Reads the next chunk into the emptied buffer.
    ///
    /// Only called once all buffered data was consumed. Returns whether at least one byte is now
    /// available.
    fn refill(&mut self) -> bool {
        debug_assert_eq!(self.pos, self.end);
        if self.complete {
            return false;
        }
        self.pos = 0;
        self.end = 0;
        loop {
            match self.read.read(&mut self.buf) {
                Ok(0) => self.complete = true,
                Ok(n) => {
                    assert!(
                        n <= self.buf.len(),
                        "invariant of std::io::Read trait violated"
                    );
                    self.end = n;
                }
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => {
                    self.io_error = Some(err);
                    self.complete = true;
                }
            }
            break;
        }
        self.end != 0
    }
}
