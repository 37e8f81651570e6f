//! Memory Store Tests.
//!
//! Little-endian access at every width, bounds checking relative to the base
//! address, bulk loading, and the five-words-per-row dump format.

use pretty_assertions::assert_eq;
use rvpipe_core::MemoryStore;
use rvpipe_core::common::{AccessSize, MemoryError};

#[test]
fn accesses_are_little_endian() {
    let mut mem = MemoryStore::new(0, 64);
    mem.set(0, AccessSize::Double, 0x0102_0304_0506_0708).unwrap();
    assert_eq!(mem.get(0, AccessSize::Byte), Ok(0x08));
    assert_eq!(mem.get(0, AccessSize::Half), Ok(0x0708));
    assert_eq!(mem.get(4, AccessSize::Word), Ok(0x0102_0304));
    assert_eq!(mem.get(7, AccessSize::Byte), Ok(0x01));
}

#[test]
fn narrow_write_truncates_value() {
    let mut mem = MemoryStore::new(0, 64);
    mem.set(8, AccessSize::Half, 0xFFFF_ABCD).unwrap();
    assert_eq!(mem.get(8, AccessSize::Double), Ok(0xABCD));
}

#[test]
fn access_straddling_the_end_is_rejected() {
    let mut mem = MemoryStore::new(0, 64);
    assert_eq!(
        mem.set(62, AccessSize::Word, 0xFFFF_FFFF),
        Err(MemoryError::OutOfBounds { addr: 62, size: 4 })
    );
    assert_eq!(mem.get(62, AccessSize::Half), Ok(0), "failed write changed nothing");
    assert!(mem.get(u64::MAX, AccessSize::Byte).is_err());
}

#[test]
fn addresses_are_relative_to_base() {
    let mut mem = MemoryStore::new(0x1000, 0x100);
    assert_eq!(mem.base(), 0x1000);
    assert_eq!(mem.size(), 0x100);
    assert!(mem.get(0x0FFC, AccessSize::Word).is_err(), "below base");
    assert!(mem.get(0x1100, AccessSize::Byte).is_err(), "past end");
    mem.set(0x10FC, AccessSize::Word, 0x1234_5678).unwrap();
    assert_eq!(mem.get(0x10FC, AccessSize::Word), Ok(0x1234_5678));
}

#[test]
fn byte_count_widths() {
    let mut mem = MemoryStore::new(0, 64);
    mem.set_bytes(16, 4, 0xCAFE_BABE).unwrap();
    assert_eq!(mem.get_bytes(16, 2), Ok(0xBABE));
    assert_eq!(mem.get_bytes(16, 3), Err(MemoryError::UnsupportedWidth(3)));
    assert_eq!(mem.set_bytes(16, 16, 0), Err(MemoryError::UnsupportedWidth(16)));
}

#[test]
fn load_places_image_or_nothing() {
    let mut mem = MemoryStore::new(0, 16);
    mem.load(4, &[0xAA, 0xBB]).unwrap();
    assert_eq!(mem.get(4, AccessSize::Half), Ok(0xBBAA));

    assert!(mem.load(8, &[1; 9]).is_err());
    assert_eq!(mem.get(8, AccessSize::Double), Ok(0), "oversized image not written");
}

#[test]
fn load_words_stores_instruction_stream() {
    let mut mem = MemoryStore::new(0, 16);
    mem.load_words(0, &[0x0050_0093, 0xFEED_FEED]).unwrap();
    assert_eq!(mem.get(0, AccessSize::Word), Ok(0x0050_0093));
    assert_eq!(mem.get(4, AccessSize::Word), Ok(0xFEED_FEED));
    assert!(mem.load_words(12, &[1, 2]).is_err());
}

#[test]
fn dump_prints_five_words_per_row() {
    let mut mem = MemoryStore::new(0, 64);
    mem.load_words(0, &[1, 2, 3, 4, 5, 6]).unwrap();
    assert_eq!(
        mem.dump(0, 0x18),
        "0x00000000: 0x01000000 0x02000000 0x03000000 0x04000000 0x05000000\n\
         0x00000014: 0x06000000\n"
    );
}

#[test]
fn dump_prints_bytes_in_address_order() {
    let mut mem = MemoryStore::new(0, 8);
    mem.load(0, &[0x01, 0x02, 0x03, 0x04]).unwrap();
    mem.set(4, AccessSize::Word, 0xDEAD_BEEF).unwrap();
    assert_eq!(mem.dump(0, 8), "0x00000000: 0x01020304 0xefbeadde\n");
}

#[test]
fn dump_ending_at_top_of_address_space_terminates() {
    let mem = MemoryStore::new(0, 64);
    assert_eq!(mem.dump(0xFFFF_FFFF_FFFF_FFF0, u64::MAX), "0xfffffffffffffff0:\n");
    assert_eq!(mem.dump(u64::MAX - 3, u64::MAX), "0xfffffffffffffffc:\n");
}

#[test]
fn dump_skips_words_outside_memory() {
    let mem = MemoryStore::new(0, 8);
    assert_eq!(mem.dump(0, 0x10), "0x00000000: 0x00000000 0x00000000\n");
    assert_eq!(mem.dump(0x100, 0x108), "0x00000100:\n");
}

#[test]
fn empty_dump_range_prints_nothing() {
    let mem = MemoryStore::new(0, 64);
    assert_eq!(mem.dump(0x20, 0x20), "");
}
