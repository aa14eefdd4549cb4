//! Register File Tests.

use rv32sim_core::core::regfile::RegisterFile;

#[test]
fn reset_values() {
    let rf = RegisterFile::new();
    assert_eq!(rf.read(0), 0);
    assert_eq!(rf.read(2), 0x7FFF_FFDC, "stack pointer");
    assert_eq!(rf.read(3), 0x1000_0000, "global pointer");
    assert_eq!(rf.read(10), 1);
    assert_eq!(rf.read(11), 0x7FFF_FFDC);
    for idx in [1, 4, 5, 9, 12, 31] {
        assert_eq!(rf.read(idx), 0);
    }
}

#[test]
fn x0_is_hardwired_to_zero() {
    let mut rf = RegisterFile::new();
    rf.write(0, 0xDEAD_BEEF);
    assert_eq!(rf.read(0), 0);
    assert_eq!(rf.snapshot()[0], 0);
}

#[test]
fn writes_are_visible_on_read() {
    let mut rf = RegisterFile::new();
    rf.write(7, 42);
    assert_eq!(rf.read(7), 42);
    rf.write(31, u32::MAX);
    assert_eq!(rf.read(31), u32::MAX);
}

#[test]
fn reset_clears_prior_writes() {
    let mut rf = RegisterFile::new();
    rf.write(7, 42);
    rf.reset();
    assert_eq!(rf.read(7), 0);
    assert_eq!(rf.read(2), 0x7FFF_FFDC);
}
