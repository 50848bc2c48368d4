//! File type registry: frozen extension ↔ tag identities.
//!
//! Every file an SDF archive can carry is classified by a 3-character
//! extension code drawn from a closed set.  The numeric tag is what goes
//! into byte 4 of the on-disk index record; the extension string is what
//! filenames are reconstructed with on unpack.  Tags are permanent — a tag
//! is never reused or renumbered, because archives in the wild encode them.
//!
//! Tag 0 means "unrecognized" and is never written to disk: the scanner
//! drops such files before they reach the index.

/// Runtime discriminant for a recognised file type.
///
/// Discriminant values are the on-disk tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum FileType {
    Txt = 1,
    Jpg = 2,
    Ogg = 3,
    Rgb = 4,
    Raw = 5,
    Srf = 6,
    Mus = 7,
    Dat = 8,
    Src = 9,
    Run = 10,
    Pcx = 11,
    Lan = 12,
    Ddd = 13,
    Rdy = 14,
    Til = 15,
}

/// All recognised types in tag order.
pub const ALL_TYPES: [FileType; 15] = [
    FileType::Txt,
    FileType::Jpg,
    FileType::Ogg,
    FileType::Rgb,
    FileType::Raw,
    FileType::Srf,
    FileType::Mus,
    FileType::Dat,
    FileType::Src,
    FileType::Run,
    FileType::Pcx,
    FileType::Lan,
    FileType::Ddd,
    FileType::Rdy,
    FileType::Til,
];

impl FileType {
    /// On-disk type tag (1..=15).
    #[inline]
    pub fn tag(self) -> u8 {
        self as u8
    }

    /// The 3-character extension string this type reconstructs to.
    pub fn extension(self) -> &'static str {
        match self {
            FileType::Txt => "TXT",
            FileType::Jpg => "JPG",
            FileType::Ogg => "OGG",
            FileType::Rgb => "RGB",
            FileType::Raw => "RAW",
            FileType::Srf => "SRF",
            FileType::Mus => "MUS",
            FileType::Dat => "DAT",
            FileType::Src => "SRC",
            FileType::Run => "RUN",
            FileType::Pcx => "PCX",
            FileType::Lan => "LAN",
            FileType::Ddd => "DDD",
            FileType::Rdy => "RDY",
            FileType::Til => "TIL",
        }
    }

    /// Resolve an extension string to a type.
    ///
    /// Case-sensitive exact match; anything else is `None` (the scanner's
    /// silent-skip signal).
    pub fn from_extension(ext: &str) -> Option<Self> {
        ALL_TYPES.iter().copied().find(|t| t.extension() == ext)
    }

    /// Resolve an on-disk tag to a type.  `None` for 0 and out-of-range.
    pub fn from_tag(tag: u8) -> Option<Self> {
        ALL_TYPES.iter().copied().find(|t| t.tag() == tag)
    }

    /// Whether the EOL fold applies to this type.
    #[inline]
    pub fn is_text(self) -> bool {
        matches!(self, FileType::Txt | FileType::Src)
    }
}
