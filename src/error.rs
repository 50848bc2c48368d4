use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Every way a pack or unpack run can fail.
///
/// All variants are fatal to the current operation: there is no retry and no
/// rollback of output already written when a later entry fails.
#[derive(Error, Debug)]
pub enum SdfError {
    #[error("data directory not found: {}", .0.display())]
    DirNotFound(PathBuf),

    #[error("SDF not found: {}", .0.display())]
    ArchiveNotFound(PathBuf),

    #[error("invalid magic string")]
    BadMagic,

    #[error("bad archive: {0}")]
    Format(String),

    #[error("output folder exists: {}", .0.display())]
    DestinationExists(PathBuf),

    #[error("{}: {} bytes overflows the archive size fields", .0.display(), .1)]
    SizeOverflow(PathBuf, u64),

    #[error("too many files to record in the header count field")]
    TooManyEntries,

    #[error("io: {0}")]
    Io(#[from] io::Error),
}

impl SdfError {
    /// Process exit code for this condition (0 is success, 4 is reserved
    /// for argument errors, which clap reports itself).
    pub fn exit_code(&self) -> i32 {
        match self {
            SdfError::ArchiveNotFound(_) => 2,
            SdfError::DirNotFound(_) => 3,
            SdfError::BadMagic => 5,
            SdfError::DestinationExists(_) => 6,
            SdfError::SizeOverflow(_, _) => 7,
            SdfError::Format(_) | SdfError::TooManyEntries | SdfError::Io(_) => 1,
        }
    }
}

pub type SdfResult<T> = Result<T, SdfError>;
