pub mod archive;
pub mod error;
pub mod filetype;
pub mod header;
pub mod index;
pub mod io_stream;
pub mod obfuscate;

pub use archive::{list, pack, unpack, Options};
pub use error::{SdfError, SdfResult};
pub use filetype::FileType;
pub use index::IndexEntry;
