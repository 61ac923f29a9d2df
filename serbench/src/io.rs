//! [`Reader`] and [`Writer`] implementations.
use {
    crate::error::{read_size_limit, write_size_limit, writer_trailing_bytes, Result},
    core::{mem::MaybeUninit, ptr},
};

/// In-memory reader over a borrowed byte slice.
///
/// Every read is bounds checked against the remaining input; a short read
/// fails with [`Error::ReadSizeLimit`](crate::Error::ReadSizeLimit) and
/// leaves the cursor where it was.
pub struct Reader<'a> {
    cursor: &'a [u8],
    start_len: usize,
}

impl<'a> Reader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            cursor: bytes,
            start_len: bytes.len(),
        }
    }

    /// Read exactly `N` bytes into a new array.
    #[inline(always)]
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let Some((chunk, rest)) = self.cursor.split_first_chunk::<N>() else {
            return Err(read_size_limit(N));
        };
        self.cursor = rest;
        Ok(*chunk)
    }

    #[inline(always)]
    pub fn read_byte(&mut self) -> Result<u8> {
        let Some((&byte, rest)) = self.cursor.split_first() else {
            return Err(read_size_limit(1));
        };
        self.cursor = rest;
        Ok(byte)
    }

    /// Error unless at least `len` bytes remain. Does not advance the cursor.
    #[inline]
    pub fn ensure(&self, len: usize) -> Result<()> {
        if self.cursor.len() < len {
            return Err(read_size_limit(len));
        }
        Ok(())
    }

    /// Number of unread bytes.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.cursor.len()
    }

    /// Number of bytes consumed since the reader was created.
    #[inline]
    pub fn position(&self) -> usize {
        self.start_len - self.cursor.len()
    }
}

/// In-memory writer over a possibly uninitialized destination buffer.
///
/// The writer never grows its buffer: writing past the end fails with
/// [`Error::WriteSizeLimit`](crate::Error::WriteSizeLimit) and nothing is written.
pub struct Writer<'a> {
    buffer: &'a mut [MaybeUninit<u8>],
    pos: usize,
}

impl<'a> Writer<'a> {
    pub fn new(buffer: &'a mut [MaybeUninit<u8>]) -> Self {
        Self { buffer, pos: 0 }
    }

    /// Write over an initialized byte slice.
    pub fn from_slice(buffer: &'a mut [u8]) -> Self {
        // SAFETY: `[u8]` and `[MaybeUninit<u8>]` share a layout, and the writer
        // only ever stores initialized bytes, so `buffer` stays initialized.
        let buffer = unsafe { &mut *(buffer as *mut [u8] as *mut [MaybeUninit<u8>]) };
        Self::new(buffer)
    }

    /// Write into the spare capacity of `buffer`, after its current length.
    ///
    /// The vector's length is not updated; callers set it from [`Writer::finish`].
    pub fn from_vec(buffer: &'a mut Vec<u8>) -> Self {
        Self::new(buffer.spare_capacity_mut())
    }

    /// Number of bytes still available in the buffer.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.pos
    }

    /// Get the number of bytes written to the buffer.
    #[inline]
    pub fn finish(self) -> usize {
        self.pos
    }

    /// Get the number of bytes written to the buffer, and error if there are trailing bytes.
    pub fn finish_disallow_trailing_bytes(self) -> Result<usize> {
        if self.pos != self.buffer.len() {
            return Err(writer_trailing_bytes(self.buffer.len() - self.pos));
        }
        Ok(self.pos)
    }

    /// Write exactly `src.len()` bytes from the given `src` into the internal buffer.
    #[inline]
    pub fn write_exact(&mut self, src: &[u8]) -> Result<()> {
        if self.remaining() < src.len() {
            return Err(write_size_limit(src.len()));
        }

        unsafe {
            // SAFETY:
            // - `src` is a shared borrow and cannot overlap the exclusively borrowed buffer.
            // - We just checked that we have enough capacity in the internal buffer.
            ptr::copy_nonoverlapping(
                src.as_ptr(),
                self.buffer.as_mut_ptr().add(self.pos).cast::<u8>(),
                src.len(),
            );
        }
        self.pos += src.len();
        Ok(())
    }
}
