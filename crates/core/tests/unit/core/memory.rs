//! Memory Unit Tests.
//!
//! Little-endian byte assembly, sign extension, sparse-zero reads, and the
//! bounds check.

use rv32sim_core::common::constants::MEMORY_SIZE;
use rv32sim_core::common::SimError;
use rv32sim_core::core::memory::{check_bounds, DataStore};

const BASE: u32 = 0x1000_0000;

#[test]
fn word_round_trip_is_little_endian() {
    let mut mem = DataStore::new();
    mem.store(BASE, 0x1234_5678, 4).unwrap();
    assert_eq!(mem.load(BASE, 4, false).unwrap(), 0x1234_5678);
    // Byte order on the wire: LSB first.
    assert_eq!(mem.load(BASE, 1, false).unwrap(), 0x78);
    assert_eq!(mem.load(BASE + 1, 1, false).unwrap(), 0x56);
    assert_eq!(mem.load(BASE + 2, 1, false).unwrap(), 0x34);
    assert_eq!(mem.load(BASE + 3, 1, false).unwrap(), 0x12);
}

#[test]
fn byte_loads_sign_extend() {
    let mut mem = DataStore::new();
    for &(byte, expect) in &[
        (0x00u32, 0x0000_0000u32),
        (0x7F, 0x0000_007F),
        (0x80, 0xFFFF_FF80),
        (0xFF, 0xFFFF_FFFF),
    ] {
        mem.store(BASE, byte, 1).unwrap();
        assert_eq!(mem.load(BASE, 1, true).unwrap(), expect, "byte {:#x}", byte);
    }
}

#[test]
fn half_loads_sign_extend() {
    let mut mem = DataStore::new();
    mem.store(BASE, 0x8000, 2).unwrap();
    assert_eq!(mem.load(BASE, 2, true).unwrap(), 0xFFFF_8000);
    mem.store(BASE, 0x7FFF, 2).unwrap();
    assert_eq!(mem.load(BASE, 2, true).unwrap(), 0x0000_7FFF);
}

#[test]
fn absent_bytes_read_as_zero() {
    let mem = DataStore::new();
    assert_eq!(mem.load(BASE, 4, false).unwrap(), 0);
    assert_eq!(mem.load(0x7FFF_0000, 1, true).unwrap(), 0);
}

#[test]
fn partial_overwrites_keep_neighbors() {
    let mut mem = DataStore::new();
    mem.store(BASE, 0xAABB_CCDD, 4).unwrap();
    mem.store(BASE + 1, 0x11, 1).unwrap();
    assert_eq!(mem.load(BASE, 4, false).unwrap(), 0xAABB_11DD);
}

#[test]
fn misaligned_access_is_tolerated() {
    let mut mem = DataStore::new();
    mem.store(BASE + 1, 0xDEAD_BEEF, 4).unwrap();
    assert_eq!(mem.load(BASE + 1, 4, false).unwrap(), 0xDEAD_BEEF);
}

#[test]
fn out_of_range_access_is_a_memory_fault() {
    let mut mem = DataStore::new();
    let last = (MEMORY_SIZE - 1) as u32;

    assert!(mem.store(last, 0xFF, 1).is_ok());
    assert_eq!(
        mem.store(last, 0, 4),
        Err(SimError::MemoryFault { addr: last, size: 4 })
    );
    assert_eq!(
        mem.load(last, 2, false),
        Err(SimError::MemoryFault { addr: last, size: 2 })
    );
    assert!(check_bounds(0, 4).is_ok());
    assert!(check_bounds(0x8000_0000, 1).is_err());
}
