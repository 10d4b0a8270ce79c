use std::io::{self, ErrorKind, Read};

/// Single-byte read access with a distinguishable end-of-data signal.
///
/// `Ok(None)` means the source is exhausted; every other failure is an
/// `Err`. Implemented for any [`Read`], so slices, cursors, files and
/// `BufReader`s all work as decoder inputs. Unbuffered OS handles should be
/// wrapped in a `BufReader` first, decoders pull one byte at a time.
pub trait ByteSource {
    fn read_byte(&mut self) -> io::Result<Option<u8>>;
}

impl<R: Read + ?Sized> ByteSource for R {
    #[inline]
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut byte = [0u8; 1];
        loop {
            match self.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}
