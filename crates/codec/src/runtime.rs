use crate::{
    base128::{Base128Decoder, Base128Encoder},
    codec::{U32Decoder, U32Encoder, U64Decoder, U64Encoder},
    group::{GroupVarintDecoder, GroupVarintEncoder},
    utils::{CodecError, CodecResult},
};

/// Push every value through `enc` and close it, returning total bytes written.
pub fn encode_u32s<E: U32Encoder + ?Sized>(enc: &mut E, values: &[u32]) -> CodecResult<usize> {
    let mut written = 0;
    for &x in values {
        written += enc.put_u32(x)?;
    }
    Ok(written + enc.close()?)
}

pub fn encode_u64s<E: U64Encoder + ?Sized>(enc: &mut E, values: &[u64]) -> CodecResult<usize> {
    let mut written = 0;
    for &x in values {
        written += enc.put_u64(x)?;
    }
    Ok(written + enc.close()?)
}

/// Drain `dec` until `EndOfData`.
pub fn decode_u32s<D: U32Decoder + ?Sized>(dec: &mut D) -> CodecResult<Vec<u32>> {
    let mut out = Vec::new();
    loop {
        match dec.get_u32() {
            Ok(x) => out.push(x),
            Err(CodecError::EndOfData) => return Ok(out),
            Err(e) => return Err(e),
        }
    }
}

pub fn decode_u64s<D: U64Decoder + ?Sized>(dec: &mut D) -> CodecResult<Vec<u64>> {
    let mut out = Vec::new();
    loop {
        match dec.get_u64() {
            Ok(x) => out.push(x),
            Err(CodecError::EndOfData) => return Ok(out),
            Err(e) => return Err(e),
        }
    }
}

pub struct GroupVarint;

impl GroupVarint {
    pub fn pack(values: &[u32]) -> CodecResult<Vec<u8>> {
        // worst case is 17 bytes per 4 values
        let mut enc = GroupVarintEncoder::new(Vec::with_capacity(values.len() * 17 / 4 + 1));
        encode_u32s(&mut enc, values)?;
        Ok(enc.into_inner())
    }

    pub fn unpack(buffer: &[u8]) -> CodecResult<Vec<u32>> {
        decode_u32s(&mut GroupVarintDecoder::new(buffer))
    }
}

pub struct Base128;

impl Base128 {
    pub fn pack_u32(values: &[u32]) -> CodecResult<Vec<u8>> {
        let mut enc = Base128Encoder::new(Vec::with_capacity(values.len()));
        encode_u32s(&mut enc, values)?;
        Ok(enc.into_inner())
    }

    pub fn pack_u64(values: &[u64]) -> CodecResult<Vec<u8>> {
        let mut enc = Base128Encoder::new(Vec::with_capacity(values.len()));
        encode_u64s(&mut enc, values)?;
        Ok(enc.into_inner())
    }

    pub fn unpack_u32(buffer: &[u8]) -> CodecResult<Vec<u32>> {
        decode_u32s(&mut Base128Decoder::new(buffer))
    }

    pub fn unpack_u64(buffer: &[u8]) -> CodecResult<Vec<u64>> {
        decode_u64s(&mut Base128Decoder::new(buffer))
    }
}

#[cfg(test)]
mod tests {
    use super::{decode_u32s, encode_u32s, Base128, GroupVarint};
    use crate::{
        base128::{Base128Decoder, Base128Encoder},
        codec::{U32Decoder, U32Encoder},
        group::{GroupVarintDecoder, GroupVarintEncoder},
    };

    const POSTINGS: &[u32] = &[3, 1, 4, 1, 5, 9, 2, 6, 5, 3, 5, 80_000, 0, u32::MAX];

    #[test]
    fn pack_unpack_group() {
        let wire = GroupVarint::pack(POSTINGS).unwrap();
        assert_eq!(GroupVarint::unpack(&wire).unwrap(), POSTINGS);
    }

    #[test]
    fn pack_unpack_base128() {
        let wire = Base128::pack_u32(POSTINGS).unwrap();
        assert_eq!(Base128::unpack_u32(&wire).unwrap(), POSTINGS);

        let wide = [0u64, 1 << 40, u64::MAX];
        let wire = Base128::pack_u64(&wide).unwrap();
        assert_eq!(Base128::unpack_u64(&wire).unwrap(), wide);
    }

    #[test]
    fn codecs_swap_behind_trait_objects() {
        let encoders: Vec<Box<dyn U32Encoder>> = vec![
            Box::new(GroupVarintEncoder::new(Vec::new())),
            Box::new(Base128Encoder::new(Vec::new())),
        ];
        for mut enc in encoders {
            let written = encode_u32s(enc.as_mut(), POSTINGS).unwrap();
            assert!(written > 0);
        }

        let group = GroupVarint::pack(POSTINGS).unwrap();
        let base = Base128::pack_u32(POSTINGS).unwrap();
        let mut decoders: Vec<Box<dyn U32Decoder + '_>> = vec![
            Box::new(GroupVarintDecoder::new(group.as_slice())),
            Box::new(Base128Decoder::new(base.as_slice())),
        ];
        for dec in decoders.iter_mut() {
            assert_eq!(decode_u32s(dec.as_mut()).unwrap(), POSTINGS);
        }
    }

    #[test]
    fn written_count_matches_wire_length() {
        let mut enc = GroupVarintEncoder::new(Vec::new());
        let written = encode_u32s(&mut enc, POSTINGS).unwrap();
        assert_eq!(written, enc.into_inner().len());
    }
}
