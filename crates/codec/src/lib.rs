pub mod utils;
pub mod format;
pub mod codec;
pub mod group;
pub mod base128;
pub mod runtime;

pub use codec::{
    U32Encoder,
    U32Decoder,
    U64Encoder,
    U64Decoder
};

pub use group::{
    GroupVarintEncoder,
    GroupVarintDecoder,
    DecoderState
};

pub use base128::{
    Base128Encoder,
    Base128Decoder,
    VarUInt32,
    VarUInt64
};

pub use utils::{
    CodecError,
    CodecResult,
    source::ByteSource
};

pub use runtime::{
    GroupVarint,
    Base128
};
