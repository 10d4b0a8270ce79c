use crate::{
    codec::U32Decoder,
    debug_log,
    format::{self, GROUP_LEN},
    utils::{source::ByteSource, CodecError, CodecResult},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecoderState {
    /// Nothing buffered, the next `get` reads a control byte.
    NeedGroup,
    /// Values from the last group are still waiting to be handed out.
    HasBuffered,
    /// Input ran out; every further `get` is `EndOfData`.
    Exhausted,
    /// A hard read error broke lockstep with the wire format.
    Poisoned,
}

/// Pulls groups from `R` on demand and hands their values out one by one.
///
/// There is no count on the wire. A group cut short by end-of-data is taken
/// as the final partial group: slots fully read before the cut are kept, the
/// rest are dropped, and the decoder reports `EndOfData` after them.
pub struct GroupVarintDecoder<R: ByteSource> {
    r: R,
    group: [u32; GROUP_LEN],
    pos: usize,
    capacity: usize,
    finished: bool,
    poisoned: bool,
}

impl<R: ByteSource> GroupVarintDecoder<R> {
    pub fn new(r: R) -> Self {
        Self {
            r,
            group: [0; GROUP_LEN],
            pos: GROUP_LEN,
            capacity: GROUP_LEN,
            finished: false,
            poisoned: false,
        }
    }

    pub fn state(&self) -> DecoderState {
        if self.poisoned {
            DecoderState::Poisoned
        } else if self.pos < self.capacity {
            DecoderState::HasBuffered
        } else if self.finished {
            DecoderState::Exhausted
        } else {
            DecoderState::NeedGroup
        }
    }

    pub fn get_ref(&self) -> &R {
        &self.r
    }

    pub fn into_inner(self) -> R {
        self.r
    }

    /// Read one byte, poisoning the decoder on anything but end-of-data.
    #[inline]
    fn next_byte(&mut self) -> CodecResult<Option<u8>> {
        self.r.read_byte().map_err(|e| {
            self.poisoned = true;
            CodecError::Io(e)
        })
    }

    fn read_group(&mut self) -> CodecResult<()> {
        let control = match self.next_byte()? {
            Some(b) => b,
            None => {
                debug_log!("group read: end of stream at group boundary");
                self.finished = true;
                self.capacity = 0;
                self.pos = 0;
                return Ok(());
            }
        };

        let mut capacity = GROUP_LEN;
        'slots: for slot in 0..GROUP_LEN {
            let mut x = 0u32;
            for _ in 0..format::slot_width(control, slot) {
                match self.next_byte()? {
                    Some(b) => x = (x << 8) | b as u32,
                    None => {
                        debug_log!(
                            "group read: partial group, control={:#04x} count={}",
                            control, slot
                        );
                        capacity = slot;
                        self.finished = true;
                        break 'slots;
                    }
                }
            }
            self.group[slot] = x;
        }

        debug_log!("group read: control={:#04x} count={}", control, capacity);

        self.capacity = capacity;
        self.pos = 0;
        Ok(())
    }

    pub fn get(&mut self) -> CodecResult<u32> {
        if self.poisoned {
            return Err(CodecError::Poisoned);
        }
        if self.pos == self.capacity {
            if self.finished {
                return Err(CodecError::EndOfData);
            }
            self.read_group()?;
            if self.capacity == 0 {
                return Err(CodecError::EndOfData);
            }
        }
        self.pos += 1;
        Ok(self.group[self.pos - 1])
    }
}

impl<R: ByteSource> U32Decoder for GroupVarintDecoder<R> {
    #[inline]
    fn get_u32(&mut self) -> CodecResult<u32> {
        self.get()
    }
}

/// Yields values until `EndOfData`; a hard error is yielded once, then the
/// iterator ends.
impl<R: ByteSource> Iterator for GroupVarintDecoder<R> {
    type Item = CodecResult<u32>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.poisoned {
            return None;
        }
        match self.get() {
            Err(CodecError::EndOfData) => None,
            other => Some(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DecoderState, GroupVarintDecoder};
    use crate::utils::CodecError;
    use std::io::{self, Read};

    fn decode(bytes: &[u8]) -> Vec<u32> {
        GroupVarintDecoder::new(bytes)
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
    }

    /// Serves `data`, then fails instead of reporting end-of-data.
    struct FailAfter<'a> {
        data: &'a [u8],
    }

    impl Read for FailAfter<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.data.is_empty() {
                return Err(io::Error::from(io::ErrorKind::ConnectionReset));
            }
            self.data.read(buf)
        }
    }

    #[test]
    fn full_group_mixed_widths() {
        assert_eq!(
            decode(&[0x18, 0x01, 0x01, 0x2C, 0x01, 0x11, 0x70, 0x00]),
            vec![1, 300, 70_000, 0]
        );
    }

    #[test]
    fn partial_group_from_end_of_data() {
        let mut dec = GroupVarintDecoder::new(&[0x00u8, 0x05, 0x06][..]);
        assert_eq!(dec.state(), DecoderState::NeedGroup);
        assert_eq!(dec.get().unwrap(), 5);
        assert_eq!(dec.state(), DecoderState::HasBuffered);
        assert_eq!(dec.get().unwrap(), 6);
        assert_eq!(dec.state(), DecoderState::Exhausted);
        assert!(dec.get().unwrap_err().is_end_of_data());
        assert!(dec.get().unwrap_err().is_end_of_data());
    }

    #[test]
    fn partial_slot_is_discarded() {
        // slot 1 declares two bytes but only one arrives
        assert_eq!(decode(&[0x10, 0x07, 0x01]), vec![7]);
    }

    #[test]
    fn empty_input_is_end_of_data() {
        let mut dec = GroupVarintDecoder::new(&b""[..]);
        assert!(matches!(dec.get(), Err(CodecError::EndOfData)));
        assert_eq!(dec.state(), DecoderState::Exhausted);
        assert!(matches!(dec.get(), Err(CodecError::EndOfData)));
    }

    #[test]
    fn lone_control_byte_is_end_of_data() {
        let mut dec = GroupVarintDecoder::new(&[0xFFu8][..]);
        assert!(matches!(dec.get(), Err(CodecError::EndOfData)));
        assert_eq!(dec.state(), DecoderState::Exhausted);
    }

    #[test]
    fn end_of_data_after_full_groups() {
        let mut dec = GroupVarintDecoder::new(&[0x00u8, 1, 2, 3, 4, 0x00, 5, 6, 7, 8][..]);
        for want in 1..=8 {
            assert_eq!(dec.get().unwrap(), want);
        }
        assert!(dec.get().unwrap_err().is_end_of_data());
    }

    #[test]
    fn read_failure_poisons_decoder() {
        let mut dec = GroupVarintDecoder::new(FailAfter { data: &[0x00, 1, 2, 3, 4] });
        for want in 1..=4 {
            assert_eq!(dec.get().unwrap(), want);
        }
        assert!(matches!(dec.get(), Err(CodecError::Io(_))));
        assert_eq!(dec.state(), DecoderState::Poisoned);
        assert!(matches!(dec.get(), Err(CodecError::Poisoned)));
    }

    #[test]
    fn iterator_stops_after_hard_error() {
        let mut dec = GroupVarintDecoder::new(FailAfter { data: &[0x00, 9] });
        assert!(matches!(dec.next(), Some(Err(CodecError::Io(_)))));
        assert!(dec.next().is_none());
    }
}
