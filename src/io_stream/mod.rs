//! Archive engine — writer and reader.
//!
//! # Writer
//! [`SdfWriter`] emits the archive in one forward pass: the 64-byte header,
//! one obfuscated 16-byte record per entry, a trailing filler row, then each
//! entry's payload in index order.  The index is built up front by
//! [`crate::index::scan_dir`], so nothing is ever patched in place.
//!
//! # Reader
//! [`SdfReader`] validates the header on open, then serves index records
//! and payloads by seeking: record `i` lives at `64 + 16·i`, payload bytes
//! at `64 + 16·N + 16 + offset`.  Entries are decoded one at a time and
//! never materialised as a whole table unless the caller asks for one.
//!
//! # EOL fold
//! When enabled, text-like payloads (TXT, SRC) have every LF rewritten to
//! NUL before obfuscation on write, and every NUL restored to LF after
//! de-obfuscation on read.  Text that genuinely contains NUL bytes does not
//! round-trip; that is a documented property of the format.

use std::io::{Read, Seek, SeekFrom, Write};

use crate::error::{SdfError, SdfResult};
use crate::header::{Header, FILLER, HEADER_LEN};
use crate::index::{IndexEntry, RECORD_LEN};
use crate::obfuscate;

// ── Writer ───────────────────────────────────────────────────────────────────

pub struct SdfWriter<W: Write> {
    writer: W,
    eol_fold: bool,
}

impl<W: Write> SdfWriter<W> {
    pub fn new(writer: W, eol_fold: bool) -> Self {
        Self { writer, eol_fold }
    }

    /// Write the header, the obfuscated index table, and the trailing
    /// filler row that separates the index from the payload region.
    pub fn write_index(&mut self, entries: &[IndexEntry]) -> SdfResult<()> {
        let count = u32::try_from(entries.len()).map_err(|_| SdfError::TooManyEntries)?;
        Header::new(count).write(&mut self.writer)?;

        for entry in entries {
            let mut record = entry.encode();
            obfuscate::mask_record(&mut record);
            self.writer.write_all(&record)?;
        }

        self.writer.write_all(FILLER)?;
        Ok(())
    }

    /// Write one entry's payload bytes.  Must be called once per entry, in
    /// index order, after [`write_index`](Self::write_index).
    ///
    /// `data` must be exactly `entry.size` bytes — a mismatch means the
    /// source file changed after the scan, which would desynchronise every
    /// later offset.
    pub fn write_payload(&mut self, entry: &IndexEntry, mut data: Vec<u8>) -> SdfResult<()> {
        if data.len() != entry.size as usize {
            return Err(SdfError::Format(format!(
                "{} is {} bytes but was indexed at {}",
                entry.file_name(),
                data.len(),
                entry.size
            )));
        }

        if self.eol_fold && entry.file_type.is_text() {
            for b in &mut data {
                if *b == b'\n' {
                    *b = 0;
                }
            }
        }
        obfuscate::mask_payload(&mut data);

        self.writer.write_all(&data)?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

// ── Reader ───────────────────────────────────────────────────────────────────

pub struct SdfReader<R: Read + Seek> {
    reader: R,
    header: Header,
    eol_fold: bool,
}

impl<R: Read + Seek> SdfReader<R> {
    /// Open an archive: validate the magic and recover the file count.
    /// Fails before any destination-side work can happen.
    pub fn new(mut reader: R, eol_fold: bool) -> SdfResult<Self> {
        reader.seek(SeekFrom::Start(0))?;
        let header = Header::read(&mut reader)?;
        Ok(Self {
            reader,
            header,
            eol_fold,
        })
    }

    pub fn file_count(&self) -> u32 {
        self.header.file_count
    }

    /// First byte of the payload region: header, index table, trailing
    /// filler row.
    fn payload_base(&self) -> u64 {
        HEADER_LEN + RECORD_LEN as u64 * (u64::from(self.header.file_count) + 1)
    }

    /// Read and decode index record `i`.
    pub fn read_entry(&mut self, i: u32) -> SdfResult<IndexEntry> {
        if i >= self.header.file_count {
            return Err(SdfError::Format(format!(
                "index record {i} out of range (archive has {})",
                self.header.file_count
            )));
        }

        self.reader
            .seek(SeekFrom::Start(HEADER_LEN + u64::from(i) * RECORD_LEN as u64))?;
        let mut record = [0u8; RECORD_LEN];
        self.reader.read_exact(&mut record)?;

        obfuscate::unmask_record(&mut record);
        IndexEntry::decode(&record)
    }

    /// Read, de-obfuscate, and (when enabled) EOL-restore one entry's
    /// payload.
    pub fn read_payload(&mut self, entry: &IndexEntry) -> SdfResult<Vec<u8>> {
        self.reader
            .seek(SeekFrom::Start(self.payload_base() + u64::from(entry.offset)))?;
        let mut data = vec![0u8; entry.size as usize];
        self.reader.read_exact(&mut data)?;

        obfuscate::unmask_payload(&mut data);
        if self.eol_fold && entry.file_type.is_text() {
            for b in &mut data {
                if *b == 0 {
                    *b = b'\n';
                }
            }
        }
        Ok(data)
    }

    /// Decode the whole index table in record order.
    pub fn read_index(&mut self) -> SdfResult<Vec<IndexEntry>> {
        (0..self.header.file_count)
            .map(|i| self.read_entry(i))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filetype::FileType;
    use crate::index::STEM_LEN;
    use std::io::Cursor;
    use std::path::PathBuf;

    fn entry(stem: &[u8], file_type: FileType, offset: u32, size: u32) -> IndexEntry {
        let mut padded = [0u8; STEM_LEN];
        padded[..stem.len()].copy_from_slice(stem);
        IndexEntry {
            path: PathBuf::new(),
            stem: padded,
            file_type,
            offset,
            size,
        }
    }

    fn write_archive(entries: &[(IndexEntry, Vec<u8>)], eol_fold: bool) -> Vec<u8> {
        let mut writer = SdfWriter::new(Cursor::new(Vec::new()), eol_fold);
        let index: Vec<IndexEntry> = entries.iter().map(|(e, _)| e.clone()).collect();
        writer.write_index(&index).unwrap();
        for (e, data) in entries {
            writer.write_payload(e, data.clone()).unwrap();
        }
        writer.into_inner().into_inner()
    }

    #[test]
    fn engine_round_trips_through_memory() {
        let entries = vec![
            (entry(b"hero", FileType::Rgb, 0, 5), vec![1, 2, 3, 4, 5]),
            (entry(b"readme", FileType::Txt, 5, 3), b"hi\n".to_vec()),
        ];
        let bytes = write_archive(&entries, false);
        assert_eq!(bytes.len(), 64 + 2 * 16 + 16 + 8);

        let mut reader = SdfReader::new(Cursor::new(bytes), false).unwrap();
        assert_eq!(reader.file_count(), 2);
        for (i, (e, data)) in entries.iter().enumerate() {
            let decoded = reader.read_entry(i as u32).unwrap();
            assert_eq!(decoded.file_name(), e.file_name());
            assert_eq!(decoded.offset, e.offset);
            assert_eq!(reader.read_payload(&decoded).unwrap(), *data);
        }
    }

    #[test]
    fn eol_fold_applies_only_to_text_types() {
        let entries = vec![
            (entry(b"notes", FileType::Txt, 0, 3), b"a\nb".to_vec()),
            (entry(b"pixels", FileType::Rgb, 3, 3), b"a\nb".to_vec()),
        ];
        let bytes = write_archive(&entries, true);

        // On disk the TXT payload's LF became NUL before the mask; the RGB
        // payload kept its LF.
        let payload = &bytes[64 + 2 * 16 + 16..];
        assert_eq!(payload[1], 0u8.wrapping_add(obfuscate::MASK_PAYLOAD));
        assert_eq!(payload[4], b'\n'.wrapping_add(obfuscate::MASK_PAYLOAD));

        let mut reader = SdfReader::new(Cursor::new(bytes), true).unwrap();
        let txt = reader.read_entry(0).unwrap();
        let rgb = reader.read_entry(1).unwrap();
        assert_eq!(reader.read_payload(&txt).unwrap(), b"a\nb");
        assert_eq!(reader.read_payload(&rgb).unwrap(), b"a\nb");
    }

    #[test]
    fn payload_length_mismatch_is_rejected() {
        let e = entry(b"hero", FileType::Rgb, 0, 5);
        let mut writer = SdfWriter::new(Cursor::new(Vec::new()), false);
        writer.write_index(std::slice::from_ref(&e)).unwrap();
        assert!(matches!(
            writer.write_payload(&e, vec![0; 4]),
            Err(SdfError::Format(_))
        ));
    }

    #[test]
    fn out_of_range_record_is_rejected() {
        let bytes = write_archive(&[], false);
        let mut reader = SdfReader::new(Cursor::new(bytes), false).unwrap();
        assert!(matches!(reader.read_entry(0), Err(SdfError::Format(_))));
    }
}
