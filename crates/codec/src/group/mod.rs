//! Group varint: four `u32`s per group behind one control byte.

mod decode;
mod encode;

pub use decode::{DecoderState, GroupVarintDecoder};
pub use encode::GroupVarintEncoder;
