//! One-list database files.

use std::fs::File;
use std::path::Path;

use bytemuck::Pod;
use ordered_list::{Comparator, Disposal, OrderedList};

use crate::{DatabaseReader, DatabaseWriter, Result};

/// Saves `list` as a single-section database at `path`.
pub fn save_list_to_file<P, T, C, D>(path: P, list: &OrderedList<T, C, D>) -> Result<()>
where
    P: AsRef<Path>,
    T: Pod,
    C: Comparator<T>,
    D: Disposal<T>,
{
    let mut db = DatabaseWriter::new(File::create(path)?)?;
    db.write_list(list)?;
    db.finish()?.sync_all()?;
    Ok(())
}

/// Loads the first section of the database at `path` into a list.
pub fn load_list_from_file<P, T, C, D>(
    path: P,
    comparator: C,
    disposal: D,
) -> Result<OrderedList<T, C, D>>
where
    P: AsRef<Path>,
    T: Pod,
    C: Comparator<T>,
    D: Disposal<T>,
{
    let mut db = DatabaseReader::new(File::open(path)?)?;
    db.read_list(comparator, disposal)
}
