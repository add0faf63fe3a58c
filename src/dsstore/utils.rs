//! Low-level byte reading utilities

use byteorder::{BigEndian, ByteOrder};
use encoding_rs::UTF_16BE;

use super::types::error::{DsStoreError, Result};

/// A big-endian read position over an in-memory buffer.
///
/// The cursor is `Copy`: saving a position is just keeping a copy, and every
/// read that runs past the end of the buffer fails with
/// [`DsStoreError::CorruptTree`] instead of panicking.
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Creates a cursor already positioned at `pos`.
    pub fn at(data: &'a [u8], pos: usize) -> Result<Self> {
        let mut cursor = Self::new(data);
        cursor.seek(pos)?;
        Ok(cursor)
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Bytes left between the position and the end of the buffer.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn seek(&mut self, pos: usize) -> Result<()> {
        if pos > self.data.len() {
            return Err(DsStoreError::CorruptTree(format!(
                "seek to {:#x} past end of {}-byte buffer",
                pos,
                self.data.len()
            )));
        }
        self.pos = pos;
        Ok(())
    }

    /// Take the next `len` bytes and advance past them.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        if len > self.remaining() {
            return Err(DsStoreError::CorruptTree(format!(
                "read of {} bytes at {:#x} runs past end of {}-byte buffer",
                len,
                self.pos,
                self.data.len()
            )));
        }
        let bytes = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_bytes(1)?[0])
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(BigEndian::read_u32(self.read_bytes(4)?))
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(BigEndian::read_i32(self.read_bytes(4)?))
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        Ok(BigEndian::read_i64(self.read_bytes(8)?))
    }

    /// Read a fixed 4-byte code such as a field code or type tag.
    pub fn read_code(&mut self) -> Result<[u8; 4]> {
        let mut code = [0u8; 4];
        code.copy_from_slice(self.read_bytes(4)?);
        Ok(code)
    }

    /// Read `units` UTF-16BE code units (2 bytes each) as a string.
    ///
    /// Unpaired surrogates are replaced rather than rejected.
    pub fn read_utf16(&mut self, units: usize) -> Result<String> {
        let byte_len = units.checked_mul(2).ok_or_else(|| {
            DsStoreError::CorruptTree(format!("UTF-16 length {} overflows", units))
        })?;
        let bytes = self.read_bytes(byte_len)?;
        let (text, _) = UTF_16BE.decode_without_bom_handling(bytes);
        Ok(text.into_owned())
    }

    /// Read a big-endian `u32` length followed by that many UTF-16BE code units.
    pub fn read_prefixed_utf16(&mut self) -> Result<String> {
        let units = self.read_u32()? as usize;
        self.read_utf16(units)
    }

    /// Read a big-endian `u32` length followed by that many raw bytes.
    pub fn read_prefixed_bytes(&mut self) -> Result<&'a [u8]> {
        let len = self.read_u32()? as usize;
        self.read_bytes(len)
    }
}

/// Render a 4-byte code as text. Non-ASCII bytes are replaced.
pub fn code_to_string(code: &[u8]) -> String {
    String::from_utf8_lossy(code).into_owned()
}
