//! Utility functions for ELF decoding
//!
//! Every multi-byte field is read through these helpers, which check the
//! requested range against the buffer before touching it. Fields are always
//! decoded little-endian; the file's declared encoding is not consulted.

use crate::formats::elf::types::{ElfError, Result};
use std::borrow::Cow;

/// Bounds-checked field reads from a byte buffer
pub trait FieldRead {
    fn read_u8(&self, offset: usize) -> Result<u8>;
    fn read_u16(&self, offset: usize) -> Result<u16>;
    fn read_u32(&self, offset: usize) -> Result<u32>;
}

impl FieldRead for [u8] {
    fn read_u8(&self, offset: usize) -> Result<u8> {
        self.get(offset)
            .copied()
            .ok_or(ElfError::Truncated { offset, needed: 1 })
    }

    fn read_u16(&self, offset: usize) -> Result<u16> {
        let bytes: [u8; 2] = slice_at(self, offset, 2)?
            .try_into()
            .map_err(|_| ElfError::Truncated { offset, needed: 2 })?;
        Ok(u16::from_le_bytes(bytes))
    }

    fn read_u32(&self, offset: usize) -> Result<u32> {
        let bytes: [u8; 4] = slice_at(self, offset, 4)?
            .try_into()
            .map_err(|_| ElfError::Truncated { offset, needed: 4 })?;
        Ok(u32::from_le_bytes(bytes))
    }
}

/// Borrow `len` bytes at `offset`, failing instead of overrunning the buffer
pub fn slice_at(data: &[u8], offset: usize, len: usize) -> Result<&[u8]> {
    let end = offset
        .checked_add(len)
        .ok_or(ElfError::InvalidOffset { offset })?;
    data.get(offset..end)
        .ok_or(ElfError::Truncated { offset, needed: len })
}

/// Read a null-terminated string from data.
///
/// Only the offset is checked. Bytes that are not UTF-8 come back as
/// U+FFFD so a single odd name never fails a whole table.
pub fn read_cstring(data: &[u8], offset: usize) -> Result<Cow<'_, str>> {
    if offset >= data.len() {
        return Err(ElfError::InvalidOffset { offset });
    }

    let slice = &data[offset..];
    let end = memchr::memchr(0, slice).unwrap_or(slice.len());

    Ok(String::from_utf8_lossy(&slice[..end]))
}
