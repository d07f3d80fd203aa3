//! Property-based tests for the nibble RLE codec.

use proptest::prelude::*;
use std::io::{Seek, SeekFrom, Write};
use tempfile::NamedTempFile;

use nibble_rle::{CodecConfig, ESCAPE, MAX_RUN, NibbleReader, NibbleWriter, compress, decompress};

fn encode_with(data: &[u8], buffer_len: usize) -> Vec<u8> {
    let config = CodecConfig::with_buffer_len(buffer_len).unwrap();
    let mut w = NibbleWriter::with_config(Vec::new(), config);
    w.write_bytes(data).unwrap();
    w.finish().unwrap();
    w.into_inner()
}

fn decode_with(encoded: &[u8], len: usize, buffer_len: usize) -> Vec<u8> {
    let config = CodecConfig::with_buffer_len(buffer_len).unwrap();
    let mut r = NibbleReader::with_config(encoded, config);
    let mut out = vec![0u8; len];
    r.read_bytes(&mut out).unwrap();
    out
}

/// Byte strings built from runs, so long nibble runs actually show up.
fn runny_bytes() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec((any::<u8>(), 1usize..40), 0..20).prop_map(|runs| {
        runs.into_iter()
            .flat_map(|(b, n)| std::iter::repeat_n(b, n))
            .collect()
    })
}

/// Raw nibbles of an encoded stream.
fn nibbles_of(encoded: &[u8]) -> Vec<u8> {
    encoded.iter().flat_map(|b| [b >> 4, b & 0x0F]).collect()
}

proptest! {
    #[test]
    fn prop_roundtrip_random(data in prop::collection::vec(any::<u8>(), 0..2000)) {
        let packed = compress(&data).unwrap();
        prop_assert_eq!(decompress(&packed, data.len()).unwrap(), data);
    }
}

proptest! {
    #[test]
    fn prop_roundtrip_runs(data in runny_bytes(), buffer_len in 1usize..64) {
        let packed = encode_with(&data, buffer_len);
        prop_assert_eq!(decode_with(&packed, data.len(), buffer_len), data.clone());
        // block size never changes the encoding
        prop_assert_eq!(packed, compress(&data).unwrap());
    }
}

proptest! {
    #[test]
    fn prop_runs_never_exceed_limit(data in runny_bytes()) {
        let nibbles = nibbles_of(&compress(&data).unwrap());
        let mut i = 0;
        let mut logical = 0usize;
        while i < nibbles.len() {
            if nibbles[i] == ESCAPE {
                prop_assert!(i + 1 < nibbles.len());
                let count = nibbles[i + 1] as usize;
                if count == 0 {
                    logical += 1;
                    i += 2;
                } else {
                    prop_assert!(count + 1 <= MAX_RUN);
                    prop_assert!(i + 2 < nibbles.len());
                    logical += count + 1;
                    i += 3;
                }
            } else {
                logical += 1;
                i += 1;
            }
        }
        // at most one padding nibble on top of the real ones
        let expected = data.len() * 2;
        prop_assert!(logical == expected || logical == expected + 1);
    }
}

proptest! {
    #[test]
    fn prop_never_grows_past_escape_cost(data in prop::collection::vec(any::<u8>(), 1..500)) {
        // worst case every nibble is a literal escape: two nibbles each
        let packed = compress(&data).unwrap();
        prop_assert!(packed.len() <= data.len() * 2);
    }
}

#[test]
fn run_length_boundaries() {
    for run in [1usize, 2, 15, 16, 17, 31, 32, 33] {
        for nibble in [0x0u8, 0x7, 0xF] {
            // `run` copies of the nibble, padded out to whole bytes with 0x5
            let mut nibbles = vec![nibble; run];
            if nibbles.len() % 2 == 1 {
                nibbles.push(0x5);
            }
            let bytes: Vec<u8> = nibbles.chunks(2).map(|p| (p[0] << 4) | p[1]).collect();

            let packed = compress(&bytes).unwrap();
            assert_eq!(
                decompress(&packed, bytes.len()).unwrap(),
                bytes,
                "run of {run} x {nibble:#x}"
            );
        }
    }
}

#[test]
fn escape_heavy_bytes() {
    let data = [0x0F, 0xF0, 0xFF, 0x0F, 0xFF, 0xFF, 0xF1, 0x1F];
    let packed = compress(&data).unwrap();
    assert_eq!(decompress(&packed, data.len()).unwrap(), data);
}

#[test]
fn three_identical_bytes_scenario() {
    let packed = compress(&[0xAA, 0xAA, 0xAA]).unwrap();
    assert_eq!(nibbles_of(&packed)[..3], [0xF, 0x5, 0xA]);
    assert_eq!(decompress(&packed, 3).unwrap(), vec![0xAA; 3]);
}

#[test]
fn file_roundtrip() {
    // runs of 37 bytes whose two nibbles match: 0x00, 0x11, ..., 0xFF
    let data: Vec<u8> = (0..10_000u32).map(|i| (i / 37 % 16) as u8 * 0x11).collect();

    let mut file = NamedTempFile::new().unwrap();
    {
        let config = CodecConfig::with_buffer_len(512).unwrap();
        let mut w = NibbleWriter::with_config(file.as_file_mut(), config);
        w.write_bytes(&data).unwrap();
        w.finish().unwrap();
        assert!(w.stats().ratio() < 1.0);
    }
    file.flush().unwrap();
    file.as_file_mut().seek(SeekFrom::Start(0)).unwrap();

    let mut r = NibbleReader::new(file.as_file_mut());
    let mut out = vec![0u8; data.len()];
    r.read_bytes(&mut out).unwrap();
    assert_eq!(out, data);
}
