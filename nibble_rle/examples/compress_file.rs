//! Compresses a file with the nibble RLE codec and checks it decodes back.
//!
//! ```text
//! RUST_LOG=nibble_rle=debug cargo run -p nibble_rle --example compress_file -- input.bin
//! ```

use std::fs::File;
use std::io::{BufReader, Read};

use nibble_rle::{NibbleReader, NibbleWriter, RleError};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), RleError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: compress_file <input>");
        std::process::exit(2);
    };

    let mut data = Vec::new();
    File::open(&path)?.read_to_end(&mut data)?;

    let out_path = format!("{path}.nrle");
    let mut writer = NibbleWriter::new(File::create(&out_path)?);
    writer.write_bytes(&data)?;
    writer.finish()?;
    let stats = writer.stats();
    drop(writer.into_inner());

    println!(
        "{path}: {} -> {} bytes ({:.1}%)",
        data.len(),
        stats.bytes_written,
        stats.ratio() * 100.0
    );

    let mut reader = NibbleReader::new(BufReader::new(File::open(&out_path)?));
    let mut check = vec![0u8; data.len()];
    reader.read_bytes(&mut check)?;
    assert_eq!(check, data, "decoded output differs from input");
    println!("{out_path}: verified");

    Ok(())
}
