//! Fixed 64-byte archive header.
//!
//! Layout:
//! - [ 0,16)  filler (dashes)
//! - [16,32)  magic string
//! - [32,48)  ASCII `"{N} files"`, space-padded
//! - [48,64)  filler
//!
//! The count field is human-readable on purpose; the reader recovers N by
//! parsing its leading decimal digits.

use std::io::{Read, Write};

use crate::error::{SdfError, SdfResult};

pub const FILLER: &[u8; 16] = b"----------------";
pub const MAGIC: &[u8; 16] = b"SOULFU DATA FILE";

/// Total header length in bytes.
pub const HEADER_LEN: u64 = 64;
/// Width of the count field (and of every header row).
const FIELD_LEN: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub file_count: u32,
}

impl Header {
    pub fn new(file_count: u32) -> Self {
        Self { file_count }
    }

    pub fn write<W: Write>(&self, mut writer: W) -> SdfResult<()> {
        writer.write_all(FILLER)?;
        writer.write_all(MAGIC)?;

        let text = format!("{} files", self.file_count);
        if text.len() > FIELD_LEN {
            return Err(SdfError::TooManyEntries);
        }
        writer.write_all(text.as_bytes())?;
        for _ in text.len()..FIELD_LEN {
            writer.write_all(b" ")?;
        }

        writer.write_all(FILLER)?;
        Ok(())
    }

    /// Read and validate the 64-byte header from the start of an archive.
    ///
    /// The magic is checked before the count field is touched, so a
    /// mismatch aborts with no other work done.
    pub fn read<R: Read>(mut reader: R) -> SdfResult<Self> {
        let mut buf = [0u8; HEADER_LEN as usize];
        reader.read_exact(&mut buf)?;

        if &buf[16..32] != MAGIC {
            return Err(SdfError::BadMagic);
        }

        let field = &buf[32..48];
        let digits: &[u8] = match field.iter().position(|b| !b.is_ascii_digit()) {
            Some(end) => &field[..end],
            None => field,
        };
        if digits.is_empty() {
            return Err(SdfError::Format("count field has no digits".into()));
        }
        // Digits only, so from_utf8 cannot fail; parse can still overflow u32.
        let file_count = std::str::from_utf8(digits)
            .unwrap_or("")
            .parse::<u32>()
            .map_err(|_| SdfError::Format("count field out of range".into()))?;

        Ok(Self { file_count })
    }
}
