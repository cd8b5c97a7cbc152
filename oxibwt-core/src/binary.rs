//! Binary stream I/O for transform framing.
//!
//! This module provides `BinaryReader` and `BinaryWriter`, which read and
//! write bits, bytes, and fixed-width integers over any `Read` / `Write`.
//!
//! # Bit Ordering
//!
//! Both types are MSB-first: the first bit written is the most significant
//! bit of the first byte, and multi-byte integers are big-endian. A `u32`
//! written with [`BinaryWriter::write_u32`] is therefore four plain
//! big-endian bytes when the stream is byte aligned.
//!
//! # Example
//!
//! ```
//! use oxibwt_core::binary::{BinaryReader, BinaryWriter};
//! use std::io::Cursor;
//!
//! let mut output = Vec::new();
//! {
//!     let mut writer = BinaryWriter::new(&mut output);
//!     writer.write_u32(3).unwrap();
//!     writer.write_bytes(b"ARD").unwrap();
//!     writer.flush().unwrap();
//! }
//! assert_eq!(output, [0, 0, 0, 3, b'A', b'R', b'D']);
//!
//! let mut reader = BinaryReader::new(Cursor::new(&output));
//! assert_eq!(reader.read_u32().unwrap(), 3);
//! assert_eq!(reader.read_to_end().unwrap(), b"ARD");
//! ```

use crate::error::{OxiBwtError, Result};
use std::io::{self, Read, Write};

/// A bit-level reader that wraps any `Read` implementation.
///
/// Bytes are pulled from the underlying reader only when the bit buffer
/// cannot satisfy a request.
#[derive(Debug)]
pub struct BinaryReader<R: Read> {
    /// Underlying reader.
    reader: R,
    /// Bit buffer; the next bit to read is bit `bits_in_buffer - 1`.
    buffer: u64,
    /// Number of valid bits in buffer.
    bits_in_buffer: u8,
    /// Total bits read (for error reporting).
    total_bits_read: u64,
}

impl<R: Read> BinaryReader<R> {
    /// Create a new `BinaryReader` wrapping the given reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: 0,
            bits_in_buffer: 0,
            total_bits_read: 0,
        }
    }

    /// Get the total number of bits read so far.
    pub fn bits_read(&self) -> u64 {
        self.total_bits_read
    }

    /// Try to make at least `count` bits available.
    ///
    /// Returns `false` if the underlying reader ran out first.
    fn fill(&mut self, count: u8) -> io::Result<bool> {
        debug_assert!(count <= 32, "Cannot fill more than 32 bits at once");

        while self.bits_in_buffer < count {
            let bytes_needed = (count - self.bits_in_buffer).div_ceil(8) as usize;
            let mut temp_buf = [0u8; 4];
            let n = match self.reader.read(&mut temp_buf[..bytes_needed]) {
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if n == 0 {
                return Ok(false);
            }
            for &byte in &temp_buf[..n] {
                self.buffer = (self.buffer << 8) | byte as u64;
                self.bits_in_buffer += 8;
            }
        }

        Ok(true)
    }

    /// Ensure at least `count` bits are available, or fail with EOF.
    #[inline]
    fn fill_buffer(&mut self, count: u8) -> Result<()> {
        if self.fill(count)? {
            Ok(())
        } else {
            let missing_bits = count - self.bits_in_buffer;
            Err(OxiBwtError::unexpected_eof(missing_bits.div_ceil(8) as usize))
        }
    }

    /// Read up to 32 bits from the stream, MSB-first.
    ///
    /// # Arguments
    ///
    /// * `count` - Number of bits to read (0-32)
    ///
    /// # Returns
    ///
    /// The bits read as a u32, with the first bit read in the most
    /// significant position of the result.
    #[inline]
    pub fn read_bits(&mut self, count: u8) -> Result<u32> {
        debug_assert!(count <= 32, "Cannot read more than 32 bits at once");

        if count == 0 {
            return Ok(0);
        }

        self.fill_buffer(count)?;

        let shift = self.bits_in_buffer - count;
        let mask = (1u64 << count) - 1;
        let result = ((self.buffer >> shift) & mask) as u32;

        self.bits_in_buffer = shift;
        self.buffer &= (1u64 << shift) - 1;
        self.total_bits_read += count as u64;

        Ok(result)
    }

    /// Read a single bit.
    pub fn read_bit(&mut self) -> Result<bool> {
        Ok(self.read_bits(1)? != 0)
    }

    /// Read 8 bits as a byte.
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_bits(8)? as u8)
    }

    /// Read a 32-bit big-endian unsigned integer.
    pub fn read_u32(&mut self) -> Result<u32> {
        self.read_bits(32)
    }

    /// Fill `buf` completely with bytes from the stream.
    pub fn read_bytes(&mut self, buf: &mut [u8]) -> Result<()> {
        if self.bits_in_buffer == 0 {
            self.reader.read_exact(buf).map_err(|e| {
                if e.kind() == io::ErrorKind::UnexpectedEof {
                    OxiBwtError::unexpected_eof(buf.len())
                } else {
                    e.into()
                }
            })?;
            self.total_bits_read += buf.len() as u64 * 8;
            return Ok(());
        }

        for byte in buf.iter_mut() {
            *byte = self.read_u8()?;
        }
        Ok(())
    }

    /// Read every remaining whole byte of the stream.
    ///
    /// If the reader is not byte aligned, bytes are assembled from the
    /// bit buffer and any trailing bits that do not form a full byte are
    /// discarded.
    pub fn read_to_end(&mut self) -> Result<Vec<u8>> {
        let mut out = Vec::new();

        if self.bits_in_buffer % 8 == 0 {
            while self.bits_in_buffer > 0 {
                out.push(self.read_u8()?);
            }
            let start = out.len();
            self.reader.read_to_end(&mut out)?;
            self.total_bits_read += (out.len() - start) as u64 * 8;
        } else {
            while self.fill(8)? {
                out.push(self.read_u8()?);
            }
            self.total_bits_read += self.bits_in_buffer as u64;
            self.buffer = 0;
            self.bits_in_buffer = 0;
        }

        Ok(out)
    }

    /// Check if the stream has no more bits.
    ///
    /// This may pull one byte from the underlying reader into the buffer.
    pub fn is_empty(&mut self) -> Result<bool> {
        Ok(!self.fill(1)?)
    }
}

/// A bit-level writer that wraps any `Write` implementation.
///
/// `BinaryWriter` accumulates bits and writes complete bytes to the
/// underlying writer. Call `flush()` when done to write any remaining
/// partial byte, padded with zero bits.
#[derive(Debug)]
pub struct BinaryWriter<W: Write> {
    /// Underlying writer.
    writer: W,
    /// Pending bits, held in the low `bits_in_buffer` bits.
    buffer: u64,
    /// Number of pending bits (always < 8 between calls).
    bits_in_buffer: u8,
    /// Total bits written.
    total_bits_written: u64,
}

impl<W: Write> BinaryWriter<W> {
    /// Create a new `BinaryWriter` wrapping the given writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            buffer: 0,
            bits_in_buffer: 0,
            total_bits_written: 0,
        }
    }

    /// Flush and return the underlying writer.
    pub fn into_inner(mut self) -> Result<W> {
        self.flush()?;
        Ok(self.writer)
    }

    /// Get the total number of bits written so far.
    pub fn bits_written(&self) -> u64 {
        self.total_bits_written
    }

    /// Write up to 32 bits to the stream, MSB-first.
    ///
    /// # Arguments
    ///
    /// * `value` - The bits to write, right-aligned
    /// * `count` - Number of bits to write (0-32)
    #[inline]
    pub fn write_bits(&mut self, value: u32, count: u8) -> Result<()> {
        debug_assert!(count <= 32, "Cannot write more than 32 bits at once");

        if count == 0 {
            return Ok(());
        }

        let mask = (1u64 << count) - 1;
        self.buffer = (self.buffer << count) | (value as u64 & mask);
        self.bits_in_buffer += count;
        self.total_bits_written += count as u64;

        let mut bytes = [0u8; 5];
        let mut len = 0;
        while self.bits_in_buffer >= 8 {
            self.bits_in_buffer -= 8;
            bytes[len] = (self.buffer >> self.bits_in_buffer) as u8;
            len += 1;
        }
        self.buffer &= (1u64 << self.bits_in_buffer) - 1;

        if len > 0 {
            self.writer.write_all(&bytes[..len])?;
        }
        Ok(())
    }

    /// Write a single bit.
    #[inline]
    pub fn write_bit(&mut self, bit: bool) -> Result<()> {
        self.write_bits(bit as u32, 1)
    }

    /// Write a byte as 8 bits.
    pub fn write_u8(&mut self, byte: u8) -> Result<()> {
        self.write_bits(byte as u32, 8)
    }

    /// Write a 32-bit unsigned integer, big-endian.
    pub fn write_u32(&mut self, value: u32) -> Result<()> {
        self.write_bits(value, 32)
    }

    /// Write a run of bytes.
    pub fn write_bytes(&mut self, buf: &[u8]) -> Result<()> {
        if self.bits_in_buffer == 0 {
            self.writer.write_all(buf)?;
            self.total_bits_written += buf.len() as u64 * 8;
            return Ok(());
        }

        for &byte in buf {
            self.write_u8(byte)?;
        }
        Ok(())
    }

    /// Pad to byte boundary with zeros.
    pub fn align_to_byte(&mut self) -> Result<()> {
        if self.bits_in_buffer > 0 {
            let padding = 8 - self.bits_in_buffer;
            self.write_bits(0, padding)?;
        }
        Ok(())
    }

    /// Write any partial byte and flush the underlying writer.
    pub fn flush(&mut self) -> Result<()> {
        self.align_to_byte()?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_reader_msb_first() {
        // 0b10110101 = 0xB5
        let mut reader = BinaryReader::new(Cursor::new(vec![0xB5]));

        let bits: Vec<bool> = (0..8).map(|_| reader.read_bit().unwrap()).collect();
        assert_eq!(bits, [true, false, true, true, false, true, false, true]);
        assert!(reader.is_empty().unwrap());
    }

    #[test]
    fn test_reader_crosses_bytes() {
        let mut reader = BinaryReader::new(Cursor::new(vec![0xAB, 0xCD]));

        assert_eq!(reader.read_bits(12).unwrap(), 0xABC);
        assert_eq!(reader.read_bits(4).unwrap(), 0xD);
        assert_eq!(reader.bits_read(), 16);
    }

    #[test]
    fn test_read_u32_big_endian() {
        let mut reader = BinaryReader::new(Cursor::new(vec![0x12, 0x34, 0x56, 0x78, 0x9A]));
        assert_eq!(reader.read_u32().unwrap(), 0x1234_5678);
        assert_eq!(reader.read_u8().unwrap(), 0x9A);
    }

    #[test]
    fn test_read_past_end() {
        let mut reader = BinaryReader::new(Cursor::new(vec![0x00, 0x01]));
        let err = reader.read_u32().unwrap_err();
        assert!(matches!(err, OxiBwtError::UnexpectedEof { expected: 2 }));
    }

    #[test]
    fn test_read_to_end_aligned() {
        let mut reader = BinaryReader::new(Cursor::new(b"\x00\x00\x00\x07hello".to_vec()));
        assert_eq!(reader.read_u32().unwrap(), 7);
        assert!(!reader.is_empty().unwrap());
        assert_eq!(reader.read_to_end().unwrap(), b"hello");
        assert!(reader.is_empty().unwrap());
    }

    #[test]
    fn test_read_to_end_unaligned() {
        let mut reader = BinaryReader::new(Cursor::new(vec![0xFF, 0x0F, 0xF0]));
        assert_eq!(reader.read_bits(4).unwrap(), 0xF);
        // Remaining 20 bits: 1111 0000 1111 1111 0000 -> two whole bytes
        assert_eq!(reader.read_to_end().unwrap(), vec![0xF0, 0xFF]);
        assert!(reader.is_empty().unwrap());
    }

    #[test]
    fn test_is_empty_reports_read_errors() {
        struct Broken;

        impl Read for Broken {
            fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
            }
        }

        let mut reader = BinaryReader::new(Broken);
        assert!(matches!(reader.is_empty(), Err(OxiBwtError::Io(_))));
    }

    #[test]
    fn test_read_bytes() {
        let mut reader = BinaryReader::new(Cursor::new(vec![0x12, 0x34, 0x56, 0x78]));

        let mut buf = [0u8; 2];
        reader.read_bytes(&mut buf).unwrap();
        assert_eq!(buf, [0x12, 0x34]);

        let mut buf = [0u8; 3];
        assert!(matches!(
            reader.read_bytes(&mut buf),
            Err(OxiBwtError::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn test_writer_msb_first() {
        let mut output = Vec::new();
        {
            let mut writer = BinaryWriter::new(&mut output);
            for bit in [true, false, true, true, false, true, false, true] {
                writer.write_bit(bit).unwrap();
            }
            writer.flush().unwrap();
        }
        assert_eq!(output, vec![0xB5]);
    }

    #[test]
    fn test_writer_pads_partial_byte() {
        let mut output = Vec::new();
        {
            let mut writer = BinaryWriter::new(&mut output);
            writer.write_bits(0b101, 3).unwrap();
            writer.flush().unwrap();
            assert_eq!(writer.bits_written(), 8);
        }
        assert_eq!(output, vec![0b1010_0000]);
    }

    #[test]
    fn test_write_u32_and_unaligned_bytes() {
        let mut writer = BinaryWriter::new(Vec::new());
        writer.write_u32(0xDEAD_BEEF).unwrap();
        writer.write_bits(0xA, 4).unwrap();
        writer.write_bytes(&[0xBC]).unwrap();
        let output = writer.into_inner().unwrap();
        assert_eq!(output, vec![0xDE, 0xAD, 0xBE, 0xEF, 0xAB, 0xC0]);
    }

    #[test]
    fn test_roundtrip() {
        let mut writer = BinaryWriter::new(Vec::new());
        writer.write_bits(0b101, 3).unwrap();
        writer.write_bits(0b1111, 4).unwrap();
        writer.write_u32(40_000).unwrap();
        writer.write_bit(true).unwrap();
        writer.write_u8(b'z').unwrap();
        let output = writer.into_inner().unwrap();

        let mut reader = BinaryReader::new(Cursor::new(&output));
        assert_eq!(reader.read_bits(3).unwrap(), 0b101);
        assert_eq!(reader.read_bits(4).unwrap(), 0b1111);
        assert_eq!(reader.read_u32().unwrap(), 40_000);
        assert!(reader.read_bit().unwrap());
        assert_eq!(reader.read_u8().unwrap(), b'z');
    }
}
