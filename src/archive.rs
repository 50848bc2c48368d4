//! High-level pack/unpack operations — the primary embedding surface.
//!
//! ```no_run
//! use sdfpack::archive::{pack, unpack, Options};
//!
//! let opts = Options { eol_fold: true };
//! let packed = pack("sfd".as_ref(), "datafile.sdf".as_ref(), opts)?;
//! println!("{packed} files packed");
//!
//! let unpacked = unpack("datafile.sdf".as_ref(), "sfd_out".as_ref(), opts)?;
//! assert_eq!(packed, unpacked);
//! # Ok::<(), sdfpack::SdfError>(())
//! ```

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::{SdfError, SdfResult};
use crate::index::{scan_dir, IndexEntry};
use crate::io_stream::{SdfReader, SdfWriter};

/// Per-operation configuration, passed explicitly — never ambient state.
#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    /// Fold LF to NUL in text-like payloads on pack, and back on unpack.
    /// Lossy for text that already contains NUL bytes.
    pub eol_fold: bool,
}

/// Pack a source directory into an SDF archive.
///
/// Files with unrecognised extensions are skipped silently.  Returns the
/// number of files written to the archive.
pub fn pack(source_dir: &Path, dest_archive: &Path, options: Options) -> SdfResult<u32> {
    let entries = scan_dir(source_dir)?;

    let mut writer = SdfWriter::new(BufWriter::new(File::create(dest_archive)?), options.eol_fold);
    writer.write_index(&entries)?;
    for entry in &entries {
        let data = fs::read(&entry.path)?;
        writer.write_payload(entry, data)?;
    }
    writer.into_inner().flush()?;

    Ok(entries.len() as u32)
}

/// Unpack an SDF archive into a fresh destination directory.
///
/// The magic is validated before anything is created on disk; a destination
/// that already exists aborts untouched.  Each entry is fully written before
/// the next begins; files extracted before a mid-run failure are left in
/// place.  Returns the number of files extracted.
pub fn unpack(source_archive: &Path, dest_dir: &Path, options: Options) -> SdfResult<u32> {
    let file = open_archive(source_archive)?;
    let mut reader = SdfReader::new(BufReader::new(file), options.eol_fold)?;

    match fs::create_dir(dest_dir) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            return Err(SdfError::DestinationExists(dest_dir.to_path_buf()))
        }
        Err(e) => return Err(e.into()),
    }

    let count = reader.file_count();
    for i in 0..count {
        let entry = reader.read_entry(i)?;
        let data = reader.read_payload(&entry)?;
        File::create(dest_dir.join(entry.file_name()))?.write_all(&data)?;
    }

    Ok(count)
}

/// Decode an archive's index table without extracting anything.
pub fn list(archive: &Path) -> SdfResult<Vec<IndexEntry>> {
    let file = open_archive(archive)?;
    let mut reader = SdfReader::new(BufReader::new(file), false)?;
    reader.read_index()
}

fn open_archive(path: &Path) -> SdfResult<File> {
    File::open(path).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            SdfError::ArchiveNotFound(path.to_path_buf())
        } else {
            SdfError::Io(e)
        }
    })
}
