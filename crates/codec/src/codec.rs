//! Capability traits shared by every codec family.
//!
//! Callers that only need "write integers" or "read integers" take one of
//! these as a bound and stay agnostic of the wire format behind it.

use crate::utils::CodecResult;

pub trait U32Encoder {
    /// Queue or write `x`, returning how many bytes reached the sink.
    fn put_u32(&mut self, x: u32) -> CodecResult<usize>;

    /// Write out anything still pending. Calling it again is a no-op.
    fn close(&mut self) -> CodecResult<usize>;
}

pub trait U32Decoder {
    /// Next value, or `CodecError::EndOfData` once the input is exhausted.
    fn get_u32(&mut self) -> CodecResult<u32>;
}

pub trait U64Encoder {
    fn put_u64(&mut self, x: u64) -> CodecResult<usize>;

    fn close(&mut self) -> CodecResult<usize>;
}

pub trait U64Decoder {
    fn get_u64(&mut self) -> CodecResult<u64>;
}
