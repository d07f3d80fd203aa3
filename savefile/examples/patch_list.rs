//! Saves a list of memory patches plus a work queue to one database file
//! and loads them back.
//!
//! ```text
//! RUST_LOG=debug cargo run -p savefile --example patch_list
//! ```

use core::cmp::Ordering;
use std::fs::File;

use bytemuck_derive::{Pod, Zeroable};
use ordered_list::{DropDisposal, OrderedList};
use savefile::{DatabaseReader, DatabaseWriter, SaveError};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
struct Patch {
    uid: u32,
    start: u32,
    end: u32,
    value: u32,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Pod, Zeroable)]
struct Job {
    priority: u32,
    addr: u32,
}

fn by_uid(a: &Patch, b: &Patch) -> Ordering {
    a.uid.cmp(&b.uid)
}

fn main() -> Result<(), SaveError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut patches = OrderedList::with_comparator(by_uid);
    for (uid, start) in [(2u32, 0x0040_2000u32), (0, 0x0040_1000), (1, 0x0040_1800)] {
        patches.insert(Patch {
            uid,
            start,
            end: start + 0x40,
            value: 0x5A,
        });
    }

    let mut queue = OrderedList::new();
    for (priority, addr) in [(3, 0x0040_1000), (1, 0x0040_2000), (2, 0x0040_3000)] {
        queue.insert(Job { priority, addr });
    }

    let dir = std::env::temp_dir().join("savefile-demo");
    std::fs::create_dir_all(&dir)?;
    let path = dir.join("session.odb");

    let mut db = DatabaseWriter::new(File::create(&path)?)?;
    db.write_list(&patches)?;
    db.write_list(&queue)?;
    let stats = db.stats();
    db.finish()?.sync_all()?;
    info!(path = %path.display(), ratio = stats.ratio(), "database saved");

    let mut db = DatabaseReader::new(File::open(&path)?)?;
    let patches = db.read_list(by_uid, DropDisposal)?;
    let mut queue = db.read_list_natural::<Job>()?;

    let mut cursor = patches.cursor();
    while let Some(p) = cursor.advance() {
        println!("patch {:>3}: {:#010x}..{:#010x} = {:#04x}", p.uid, p.start, p.end, p.value);
    }
    while let Some(job) = queue.dequeue() {
        println!("job priority {} at {:#010x}", job.priority, job.addr);
    }

    Ok(())
}
