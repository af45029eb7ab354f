//! [`ByteCursor`] reads big-endian values out of a fixed byte buffer.

use alloc::vec::Vec;

use crate::error::{Error, ErrorKind, Result};

/// A bounds-checked reader over a borrowed byte slice.
///
/// The read offset only moves forward and never passes the end of the slice.
/// Callers on hot paths may check [`has_remaining()`][ByteCursor::has_remaining]
/// before reading, but every read also checks its own bounds and returns
/// [`ErrorKind::BufferUnderflow`] instead of reading past the end. A failed
/// read does not advance the offset.
#[derive(Debug, Clone, Copy)]
pub struct ByteCursor<'a> {
    slice: &'a [u8],
    byte_offset: usize,
}

impl<'a> ByteCursor<'a> {
    /// Instantiates a new cursor positioned at the start of `slice`.
    #[must_use]
    pub const fn new(slice: &'a [u8]) -> Self {
        ByteCursor {
            slice,
            byte_offset: 0,
        }
    }

    /// Returns true if at least `n` unread bytes remain.
    #[inline]
    #[must_use]
    pub fn has_remaining(&self, n: usize) -> bool {
        self.remaining() >= n
    }

    /// Number of unread bytes.
    #[inline]
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.slice.len() - self.byte_offset
    }

    /// Returns the position in the slice of the next unread byte.
    #[inline]
    #[must_use]
    pub fn byte_offset(&self) -> usize {
        self.byte_offset
    }

    /// The unread bytes.
    #[inline]
    #[must_use]
    pub fn as_remaining_slice(&self) -> &'a [u8] {
        &self.slice[self.byte_offset..]
    }

    #[inline]
    fn take<const N: usize>(&mut self) -> Result<[u8; N]> {
        let bytes = *self
            .as_remaining_slice()
            .first_chunk::<N>()
            .ok_or_else(|| self.underflow())?;
        self.byte_offset += N;
        Ok(bytes)
    }

    #[cold]
    fn underflow(&self) -> Error {
        Error::new(ErrorKind::BufferUnderflow, self.byte_offset)
    }

    /// Consumes and returns the next byte.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::BufferUnderflow`] if no bytes remain.
    #[inline]
    pub fn read_u8(&mut self) -> Result<u8> {
        self.take::<1>().map(|[b]| b)
    }

    /// Consumes two bytes as a big-endian `u16`.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::BufferUnderflow`] if fewer than 2 bytes remain.
    #[inline]
    pub fn read_u16(&mut self) -> Result<u16> {
        self.take().map(u16::from_be_bytes)
    }

    /// Consumes four bytes as a big-endian `u32`.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::BufferUnderflow`] if fewer than 4 bytes remain.
    #[inline]
    pub fn read_u32(&mut self) -> Result<u32> {
        self.take().map(u32::from_be_bytes)
    }

    /// Consumes eight bytes as a big-endian `u64`.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::BufferUnderflow`] if fewer than 8 bytes remain.
    #[inline]
    pub fn read_u64(&mut self) -> Result<u64> {
        self.take().map(u64::from_be_bytes)
    }

    /// Consumes a big-endian unsigned argument which is `width` bytes wide.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::BufferUnderflow`] if fewer than `width` bytes
    /// remain, or [`ErrorKind::InvalidHeader`] if `width` is not one of 1, 2,
    /// 4, or 8.
    pub fn read_uint(&mut self, width: usize) -> Result<u64> {
        match width {
            1 => self.read_u8().map(u64::from),
            2 => self.read_u16().map(u64::from),
            4 => self.read_u32().map(u64::from),
            8 => self.read_u64(),
            _ => Err(Error::new(ErrorKind::InvalidHeader, self.byte_offset)),
        }
    }

    /// Copies the next `len` bytes into a newly allocated buffer.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::BufferUnderflow`] if fewer than `len` bytes
    /// remain.
    pub fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
        let bytes = self
            .as_remaining_slice()
            .get(..len)
            .ok_or_else(|| self.underflow())?;
        self.byte_offset += len;
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use hex_literal::hex;

    #[test]
    fn test_read_widths() -> Result<()> {
        let input = hex!("01 02 03 04 05 06 07 08 09 0a 0b 0c 0d 0e 0f");
        let mut cursor = ByteCursor::new(&input);
        assert_eq!(cursor.read_u8()?, 0x01);
        assert_eq!(cursor.read_u16()?, 0x0203);
        assert_eq!(cursor.read_u32()?, 0x0405_0607);
        assert_eq!(cursor.read_u64()?, 0x0809_0a0b_0c0d_0e0f);
        assert_eq!(cursor.byte_offset(), 15);
        assert!(!cursor.has_remaining(1));
        assert!(cursor.has_remaining(0));
        Ok(())
    }

    #[test]
    fn test_read_uint() -> Result<()> {
        let input = hex!("ff 01 00 00 01 00 00 ff ff ff ff ff ff ff ff");
        let mut cursor = ByteCursor::new(&input);
        assert_eq!(cursor.read_uint(1)?, 255);
        assert_eq!(cursor.read_uint(2)?, 256);
        assert_eq!(cursor.read_uint(4)?, 65_536);
        assert_eq!(cursor.remaining(), 8);
        assert_eq!(cursor.read_uint(8)?, u64::MAX);
        Ok(())
    }

    #[test]
    fn test_read_uint_invalid_width() {
        let input = hex!("00 00 00");
        let mut cursor = ByteCursor::new(&input);
        let err = cursor.read_uint(3).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::InvalidHeader);
        assert_eq!(cursor.byte_offset(), 0);
    }

    #[test]
    fn test_underflow_does_not_advance() {
        let input = hex!("01 02 03");
        let mut cursor = ByteCursor::new(&input);
        cursor.read_u8().unwrap();
        let err = cursor.read_u32().unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::BufferUnderflow);
        assert_eq!(err.byte_offset(), 1);
        assert_eq!(cursor.byte_offset(), 1);
        assert_eq!(cursor.as_remaining_slice(), &[0x02, 0x03]);
    }

    #[test]
    fn test_read_bytes() -> Result<()> {
        let input = hex!("61 62 63 64");
        let mut cursor = ByteCursor::new(&input);
        assert!(cursor.read_bytes(0)?.is_empty());
        assert_eq!(cursor.read_bytes(3)?, b"abc");
        assert_eq!(
            cursor.read_bytes(2).unwrap_err().kind(),
            &ErrorKind::BufferUnderflow
        );
        assert_eq!(cursor.read_bytes(1)?, b"d");
        assert_eq!(cursor.remaining(), 0);
        Ok(())
    }
}
