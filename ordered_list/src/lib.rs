//! # ordered_list
//!
//! A sorted, chunk-grown array used to index records by key.
//!
//! ```rust
//! use ordered_list::OrderedList;
//!
//! let mut list = OrderedList::new();
//! for key in [5, 1, 3, 1] {
//!     list.insert(key);
//! }
//!
//! assert_eq!(list.as_slice(), &[1, 1, 3, 5]);
//! assert_eq!(list.locate(&1), Some(0));
//! assert_eq!(list.locate_next(&1).map(|i| list[i]), Some(3));
//! ```
//!
//! ## Walking the list
//!
//! Traversal state lives in a [`Cursor`] owned by the caller, so a search
//! can never move somebody else's position.
//!
//! ```rust
//! use ordered_list::OrderedList;
//!
//! let mut list = OrderedList::new();
//! list.insert(10);
//! list.insert(20);
//! list.insert(30);
//!
//! let at = list.locate(&20).unwrap();
//! let mut cursor = list.cursor_at(at);
//! assert_eq!(cursor.advance(), Some(&20));
//! assert_eq!(cursor.advance(), Some(&30));
//! assert_eq!(cursor.advance(), None);
//! assert_eq!(cursor.position(), 0);
//! ```

pub mod cursor;
pub mod list;
pub mod policy;
mod storage;

pub use cursor::Cursor;
pub use list::OrderedList;
pub use policy::{Comparator, Disposal, DropDisposal, NaturalOrder};
pub use storage::GROWTH_CHUNK;
