//! base128.rs  –  unsigned LEB128, one value at a time
//!
//! 7 payload bits per byte, least significant group first, high bit set on
//! every byte but the last.

use std::io::Write;

use crate::{
    codec::{U32Decoder, U32Encoder, U64Decoder, U64Encoder},
    overflow_error,
    utils::{source::ByteSource, CodecError, CodecResult},
};

macro_rules! varuint {
    (
        $(#[$meta:meta])*
        $name:ident($ty:ty), max_len: $max:expr
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name(pub $ty);

        impl $name {
            pub const MAX_LEN: usize = $max;

            /// Encoded length in bytes.
            #[inline(always)]
            pub const fn encoded_len(self) -> usize {
                let bits = <$ty>::BITS - self.0.leading_zeros();
                if bits == 0 {
                    1
                } else {
                    bits.div_ceil(7) as usize
                }
            }

            /// Encode into a fixed buffer; returns (buffer, length_used).
            #[inline]
            pub fn encode(self) -> ([u8; $max], usize) {
                let mut buf = [0u8; $max];
                let mut v = self.0;
                let mut i = 0;
                loop {
                    let byte = (v & 0x7F) as u8;
                    v >>= 7;
                    buf[i] = if v == 0 { byte } else { byte | 0x80 };
                    i += 1;
                    if v == 0 {
                        break;
                    }
                }
                (buf, i)
            }

            /// Decode from `bytes`, returning the value and bytes consumed.
            pub fn decode(mut bytes: &[u8]) -> CodecResult<(Self, usize)> {
                let start = bytes.len();
                match Self::read_from(&mut bytes)? {
                    Some(v) => Ok((v, start - bytes.len())),
                    None => Err(CodecError::EndOfData),
                }
            }

            /// Pull one value from `r`. `None` when `r` is empty up front.
            pub fn read_from<R: ByteSource + ?Sized>(r: &mut R) -> CodecResult<Option<Self>> {
                let mut result: $ty = 0;
                let mut shift = 0u32;
                for i in 0..Self::MAX_LEN {
                    let b = match r.read_byte()? {
                        Some(b) => b,
                        None if i == 0 => return Ok(None),
                        None => return Err(CodecError::Truncated),
                    };
                    let low = (b & 0x7F) as $ty;
                    // last byte may only fill what is left of the type
                    let room = <$ty>::BITS - shift;
                    if room < 7 && (low >> room) != 0 {
                        return Err(overflow_error!(
                            "{} overflow: byte {} carries bits beyond {} bits",
                            stringify!($name), i, <$ty>::BITS
                        ));
                    }
                    result |= low << shift;
                    if (b & 0x80) == 0 {
                        return Ok(Some(Self(result)));
                    }
                    shift += 7;
                }
                Err(overflow_error!(
                    "{} overflow: continuation past {} bytes",
                    stringify!($name), Self::MAX_LEN
                ))
            }
        }

        impl From<$ty> for $name {
            fn from(v: $ty) -> Self {
                Self(v)
            }
        }

        impl From<$name> for $ty {
            fn from(v: $name) -> Self {
                v.0
            }
        }
    };
}

varuint!(
    /// 32-bit unsigned LEB128, at most 5 bytes.
    VarUInt32(u32), max_len: 5
);

varuint!(
    /// 64-bit unsigned LEB128, at most 10 bytes.
    VarUInt64(u64), max_len: 10
);

/// Writes each value straight to `W` as LEB128.
pub struct Base128Encoder<W: Write> {
    w: W,
}

impl<W: Write> Base128Encoder<W> {
    pub fn new(w: W) -> Self {
        Self { w }
    }

    pub fn get_ref(&self) -> &W {
        &self.w
    }

    pub fn into_inner(self) -> W {
        self.w
    }

    pub fn put_u32(&mut self, x: u32) -> CodecResult<usize> {
        let (buf, len) = VarUInt32(x).encode();
        self.w.write_all(&buf[..len])?;
        Ok(len)
    }

    pub fn put_u64(&mut self, x: u64) -> CodecResult<usize> {
        let (buf, len) = VarUInt64(x).encode();
        self.w.write_all(&buf[..len])?;
        Ok(len)
    }

    /// Nothing is ever buffered.
    pub fn close(&mut self) -> CodecResult<usize> {
        Ok(0)
    }
}

impl<W: Write> U32Encoder for Base128Encoder<W> {
    fn put_u32(&mut self, x: u32) -> CodecResult<usize> {
        Base128Encoder::put_u32(self, x)
    }

    fn close(&mut self) -> CodecResult<usize> {
        Base128Encoder::close(self)
    }
}

impl<W: Write> U64Encoder for Base128Encoder<W> {
    fn put_u64(&mut self, x: u64) -> CodecResult<usize> {
        Base128Encoder::put_u64(self, x)
    }

    fn close(&mut self) -> CodecResult<usize> {
        Base128Encoder::close(self)
    }
}

pub struct Base128Decoder<R: ByteSource> {
    r: R,
}

impl<R: ByteSource> Base128Decoder<R> {
    pub fn new(r: R) -> Self {
        Self { r }
    }

    pub fn into_inner(self) -> R {
        self.r
    }

    pub fn get_u32(&mut self) -> CodecResult<u32> {
        VarUInt32::read_from(&mut self.r)?
            .map(u32::from)
            .ok_or(CodecError::EndOfData)
    }

    pub fn get_u64(&mut self) -> CodecResult<u64> {
        VarUInt64::read_from(&mut self.r)?
            .map(u64::from)
            .ok_or(CodecError::EndOfData)
    }
}

impl<R: ByteSource> U32Decoder for Base128Decoder<R> {
    fn get_u32(&mut self) -> CodecResult<u32> {
        Base128Decoder::get_u32(self)
    }
}

impl<R: ByteSource> U64Decoder for Base128Decoder<R> {
    fn get_u64(&mut self) -> CodecResult<u64> {
        Base128Decoder::get_u64(self)
    }
}
