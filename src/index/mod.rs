//! Index entries: the 16-byte record codec and the directory scanner.
//!
//! One record per packed file, in directory-scan order.  Offsets are the
//! strict prefix sum of the sizes of the entries before it, so the payload
//! region is tiled exactly, with no gaps and no overlaps.
//!
//! Record layout (clear, before obfuscation):
//! - bytes 0–3: big-endian payload offset
//! - byte  4:   type tag (overwrites the top byte of the size word)
//! - bytes 5–7: big-endian 24-bit payload size
//! - bytes 8–15: filename stem, zero-padded to 8 bytes

use byteorder::{BigEndian, ByteOrder};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{SdfError, SdfResult};
use crate::filetype::FileType;

/// On-disk length of one index record.
pub const RECORD_LEN: usize = 16;
/// Maximum significant stem bytes; longer stems are truncated.
pub const STEM_LEN: usize = 8;
/// Largest payload a single record can describe (24-bit size field).
pub const MAX_FILE_SIZE: u64 = (1 << 24) - 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    /// Source path; only meaningful on the pack path, empty when decoded.
    pub path: PathBuf,
    /// Stem bytes as stored on disk (truncated, zero-padded).
    pub stem: [u8; STEM_LEN],
    pub file_type: FileType,
    /// Byte offset of this entry's payload within the payload region.
    pub offset: u32,
    /// Payload length in bytes.
    pub size: u32,
}

impl IndexEntry {
    /// Encode the clear (un-obfuscated) 16-byte record.
    pub fn encode(&self) -> [u8; RECORD_LEN] {
        let mut buf = [0u8; RECORD_LEN];
        BigEndian::write_u32(&mut buf[0..4], self.offset);
        BigEndian::write_u32(&mut buf[4..8], self.size);
        buf[4] = self.file_type.tag(); // overwrites the size word's top byte
        buf[8..16].copy_from_slice(&self.stem);
        buf
    }

    /// Decode a clear 16-byte record.
    ///
    /// Only the low 4 bits of the type byte carry the tag; a recovered tag
    /// of 0 cannot come from a well-formed archive and is rejected.
    pub fn decode(buf: &[u8; RECORD_LEN]) -> SdfResult<Self> {
        let tag = buf[4] & 0x0f;
        let file_type = FileType::from_tag(tag)
            .ok_or_else(|| SdfError::Format(format!("invalid type tag {tag} in index record")))?;

        let offset = BigEndian::read_u32(&buf[0..4]);
        let size = BigEndian::read_u24(&buf[5..8]);

        let mut stem = [0u8; STEM_LEN];
        stem.copy_from_slice(&buf[8..16]);

        Ok(Self {
            path: PathBuf::new(),
            stem,
            file_type,
            offset,
            size,
        })
    }

    /// Stem with the zero padding trimmed.
    pub fn stem_bytes(&self) -> &[u8] {
        let end = self
            .stem
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(STEM_LEN);
        &self.stem[..end]
    }

    /// Reconstructed filename: `stem.EXT`.
    pub fn file_name(&self) -> String {
        format!(
            "{}.{}",
            String::from_utf8_lossy(self.stem_bytes()),
            self.file_type.extension()
        )
    }
}

/// Split a filename at its first dot into stem and extension.
///
/// Dotfiles (empty stem) and extensionless names yield `None`; the caller
/// skips them the same way it skips unrecognised extensions.
fn split_filename(name: &str) -> Option<(&str, &str)> {
    match name.split_once('.') {
        Some(("", _)) => None,
        Some((stem, ext)) => Some((stem, ext)),
        None => None,
    }
}

/// Clamp a stem to its first 8 bytes and zero-pad.
fn stem_bytes_of(stem: &str) -> [u8; STEM_LEN] {
    let mut out = [0u8; STEM_LEN];
    let raw = stem.as_bytes();
    let take = raw.len().min(STEM_LEN);
    out[..take].copy_from_slice(&raw[..take]);
    out
}

/// Scan a source directory and build the ordered index.
///
/// Entries are taken in `read_dir` order.  Anything that is not a regular
/// file, has no recognised `stem.EXT` shape, or fails the registry lookup
/// is skipped silently and does not advance the payload offset.  Sizes come
/// from filesystem metadata; a file too large for the 24-bit size field, or
/// a payload region outgrowing the 32-bit offset field, aborts the scan.
pub fn scan_dir(dir: &Path) -> SdfResult<Vec<IndexEntry>> {
    let entries = fs::read_dir(dir).map_err(|_| SdfError::DirNotFound(dir.to_path_buf()))?;

    let mut index = Vec::new();
    let mut offset: u32 = 0;

    for entry in entries {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }

        let name = entry.file_name();
        let name = name.to_string_lossy();
        let Some((stem, ext)) = split_filename(&name) else {
            continue;
        };
        let Some(file_type) = FileType::from_extension(ext) else {
            continue;
        };

        let path = entry.path();
        let size = entry.metadata()?.len();
        if size > MAX_FILE_SIZE {
            return Err(SdfError::SizeOverflow(path, size));
        }
        let size = size as u32;

        let entry_offset = offset;
        offset = offset.checked_add(size).ok_or_else(|| {
            SdfError::SizeOverflow(path.clone(), u64::from(offset) + u64::from(size))
        })?;

        index.push(IndexEntry {
            path,
            stem: stem_bytes_of(stem),
            file_type,
            offset: entry_offset,
            size,
        });
    }

    Ok(index)
}
