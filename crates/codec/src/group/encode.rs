use std::io::Write;

use crate::{
    codec::U32Encoder,
    debug_log,
    format::{self, GROUP_LEN, MAX_GROUP_BYTES},
    utils::{CodecError, CodecResult},
};

/// Buffers values four at a time and writes each full group to `W`.
///
/// Call [`close`](Self::close) once done: a trailing partial group only
/// reaches the sink on close or an explicit [`flush`](Self::flush).
pub struct GroupVarintEncoder<W: Write> {
    w: W,
    index: usize,
    store: [u32; GROUP_LEN],
    temp: [u8; MAX_GROUP_BYTES],
    poisoned: bool,
}

impl<W: Write> GroupVarintEncoder<W> {
    pub fn new(w: W) -> Self {
        Self {
            w,
            index: 0,
            store: [0; GROUP_LEN],
            temp: [0; MAX_GROUP_BYTES],
            poisoned: false,
        }
    }

    /// Values buffered but not yet written.
    pub fn pending(&self) -> usize {
        self.index
    }

    pub fn get_ref(&self) -> &W {
        &self.w
    }

    /// Hand back the sink. Pending values are dropped, close first.
    pub fn into_inner(self) -> W {
        self.w
    }

    pub fn put(&mut self, x: u32) -> CodecResult<usize> {
        if self.poisoned {
            return Err(CodecError::Poisoned);
        }
        self.store[self.index] = x;
        self.index += 1;
        if self.index == GROUP_LEN {
            return self.flush();
        }
        Ok(0)
    }

    /// Write whatever is buffered as one (possibly partial) group.
    pub fn flush(&mut self) -> CodecResult<usize> {
        if self.poisoned {
            return Err(CodecError::Poisoned);
        }
        if self.index == 0 {
            return Ok(0);
        }

        // missing slots count as zero so they claim width 1 in the control byte
        self.store[self.index..].fill(0);

        let widths = self.store.map(format::minimal_width);
        let mut length = 1;
        for (&x, &width) in self.store.iter().zip(widths.iter()) {
            format::put_slot(x, width, &mut self.temp[length..]);
            length += width;
        }
        self.temp[0] = format::control_byte(widths);

        // each padding slot sits at the tail and is exactly one byte
        length -= GROUP_LEN - self.index;

        if let Err(e) = self.w.write_all(&self.temp[..length]) {
            self.poisoned = true;
            return Err(e.into());
        }

        debug_log!(
            "group flush: control={:#04x} count={} bytes={}",
            self.temp[0], self.index, length
        );

        self.index = 0;
        Ok(length)
    }

    pub fn close(&mut self) -> CodecResult<usize> {
        self.flush()
    }
}

impl<W: Write> U32Encoder for GroupVarintEncoder<W> {
    #[inline]
    fn put_u32(&mut self, x: u32) -> CodecResult<usize> {
        self.put(x)
    }

    #[inline]
    fn close(&mut self) -> CodecResult<usize> {
        GroupVarintEncoder::close(self)
    }
}
