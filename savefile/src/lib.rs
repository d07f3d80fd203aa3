//! Compressed database files made of ordered record lists.
//!
//! Each list becomes one section: a header with the record size, count and
//! a blake3 hash, followed by the records as they sit in memory. The whole
//! file is streamed through the nibble RLE codec in a single session.
//!
//! ```rust
//! use savefile::{DatabaseReader, DatabaseWriter};
//! use ordered_list::OrderedList;
//!
//! let mut entry_points = OrderedList::new();
//! for addr in [0x401000u32, 0x400000, 0x402000] {
//!     entry_points.insert(addr);
//! }
//!
//! let mut db = DatabaseWriter::new(Vec::new()).unwrap();
//! db.write_list(&entry_points).unwrap();
//! let bytes = db.finish().unwrap();
//!
//! let mut db = DatabaseReader::new(bytes.as_slice()).unwrap();
//! let loaded = db.read_list_natural::<u32>().unwrap();
//! assert_eq!(loaded.as_slice(), entry_points.as_slice());
//! ```

pub mod error;
pub mod file;
pub mod format;
pub mod reader;
pub mod writer;

pub use error::{Result, SaveError};
pub use file::{load_list_from_file, save_list_to_file};
pub use format::{FileHeader, SectionHeader};
pub use reader::DatabaseReader;
pub use writer::DatabaseWriter;
