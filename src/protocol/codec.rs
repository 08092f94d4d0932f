//! Big-endian integers and a bounds-checked read cursor
//!
//! Every decoder in this crate walks its input through [`Reader`]. Reads
//! check the remaining length first and return `None` instead of slicing out
//! of range, so malformed peer input can never panic the parser.

/// Interpret a 1..=3 byte slice as a big-endian unsigned integer.
///
/// Width is the caller's responsibility; it is a programming error to pass
/// more than 4 bytes.
#[inline]
pub fn decode_uint(bytes: &[u8]) -> usize {
    debug_assert!(bytes.len() <= 4, "decode_uint called with {} bytes", bytes.len());
    bytes.iter().fold(0usize, |acc, &b| (acc << 8) | b as usize)
}

/// Encode the low 24 bits of `value` as a 3-byte big-endian length.
#[inline]
pub fn encode_u24(value: usize) -> [u8; 3] {
    let b = (value as u32).to_be_bytes();
    [b[1], b[2], b[3]]
}

/// Read cursor over a borrowed byte slice.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Current offset from the start of the buffer
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left after the cursor
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Take the next `n` bytes and advance past them.
    pub fn take(&mut self, n: usize) -> Option<&'a [u8]> {
        let end = self.pos.checked_add(n)?;
        if end > self.buf.len() {
            return None;
        }
        let out = &self.buf[self.pos..end];
        self.pos = end;
        Some(out)
    }

    pub fn take_array<const N: usize>(&mut self) -> Option<[u8; N]> {
        self.take(N)?.try_into().ok()
    }

    /// Everything after the cursor; the cursor moves to the end.
    pub fn rest(&mut self) -> &'a [u8] {
        let out = &self.buf[self.pos..];
        self.pos = self.buf.len();
        out
    }

    pub fn u8(&mut self) -> Option<u8> {
        self.take(1).map(|b| b[0])
    }

    pub fn u16(&mut self) -> Option<u16> {
        self.take_array::<2>().map(u16::from_be_bytes)
    }

    pub fn u24(&mut self) -> Option<usize> {
        self.take(3).map(decode_uint)
    }

    /// Read a 1-byte length prefix followed by that many bytes.
    pub fn vec8(&mut self) -> Option<&'a [u8]> {
        let len = self.u8()? as usize;
        self.take(len)
    }

    /// Read a 2-byte length prefix followed by that many bytes.
    pub fn vec16(&mut self) -> Option<&'a [u8]> {
        let len = self.u16()? as usize;
        self.take(len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_uint() {
        assert_eq!(decode_uint(&[0x2e]), 46);
        assert_eq!(decode_uint(&[0x01, 0x00]), 256);
        assert_eq!(decode_uint(&[0x00, 0x00, 0x4d]), 77);
        assert_eq!(decode_uint(&[0xff, 0xff, 0xff]), 0xff_ffff);
        assert_eq!(decode_uint(&[]), 0);
    }

    #[test]
    fn test_encode_u24() {
        assert_eq!(encode_u24(77), [0x00, 0x00, 0x4d]);
        assert_eq!(encode_u24(0x01_0203), [0x01, 0x02, 0x03]);
        assert_eq!(decode_uint(&encode_u24(0xab_cdef)), 0xab_cdef);
    }

    #[test]
    fn test_reader_sequential() {
        let data = [0x01, 0x00, 0x00, 0x05, 0xaa, 0xbb, 0x02, 0xcc, 0xdd];
        let mut r = Reader::new(&data);
        assert_eq!(r.u8(), Some(0x01));
        assert_eq!(r.u24(), Some(5));
        assert_eq!(r.u16(), Some(0xaabb));
        assert_eq!(r.vec8(), Some(&[0xcc, 0xdd][..]));
        assert!(r.is_empty());
        assert_eq!(r.position(), data.len());
    }

    #[test]
    fn test_reader_out_of_bounds_does_not_advance() {
        let data = [0x00, 0x05, 0x01, 0x02];
        let mut r = Reader::new(&data);
        assert_eq!(r.vec16(), None);
        // prefix consumed, body rejected
        assert_eq!(r.position(), 2);
        assert_eq!(r.take(3), None);
        assert_eq!(r.position(), 2);
        assert_eq!(r.take(2), Some(&[0x01, 0x02][..]));
        assert_eq!(r.u8(), None);
        assert_eq!(r.u16(), None);
        assert_eq!(r.u24(), None);
    }

    #[test]
    fn test_reader_huge_take() {
        let data = [0u8; 4];
        let mut r = Reader::new(&data);
        r.take(1).unwrap();
        assert_eq!(r.take(usize::MAX), None);
    }

    #[test]
    fn test_reader_rest() {
        let data = [1, 2, 3, 4];
        let mut r = Reader::new(&data);
        r.take(1).unwrap();
        assert_eq!(r.rest(), &[2, 3, 4]);
        assert!(r.is_empty());
        assert_eq!(r.rest(), &[] as &[u8]);
    }
}
