//! RAM tests.

use rv32sim_core::common::SimError;
use rv32sim_core::soc::{Device, Ram};

#[test]
fn peek_word_reads_little_endian() {
    let mut ram = Ram::new(64);
    ram.load(0, &[0x78, 0x56, 0x34, 0x12]).unwrap();
    assert_eq!(ram.peek_word(0), Some(0x1234_5678));
}

#[test]
fn peek_word_ignores_sub_word_offset_bits() {
    let mut ram = Ram::new(64);
    ram.load(4, &[1, 2, 3, 4]).unwrap();
    assert_eq!(ram.peek_word(5), ram.peek_word(4));
    assert_eq!(ram.peek_word(7), ram.peek_word(4));
}

#[test]
fn peek_word_past_end_is_none() {
    let ram = Ram::new(8);
    assert_eq!(ram.peek_word(8), None);
    assert_eq!(ram.peek_word(6), None, "partial word at the end is rejected");
}

#[test]
fn load_rejects_oversized_images() {
    let mut ram = Ram::new(16);
    let err = ram.load(8, &[0; 16]).unwrap_err();
    assert!(matches!(err, SimError::ImageTooLarge { .. }));
    // The failed load must not have written anything.
    assert_eq!(ram.peek_word(8), Some(0));
}

#[test]
fn strobed_write_updates_selected_lanes() {
    let mut ram = Ram::new(16);
    ram.write(0, 0xAABB_CCDD, 0b1111);
    ram.write(0, 0x0000_00EE, 0b0001);
    assert_eq!(ram.peek_word(0), Some(0xAABB_CCEE));
    ram.write(0, 0xFF00_0000, 0b1000);
    assert_eq!(ram.peek_word(0), Some(0xFFBB_CCEE));
}

#[test]
fn out_of_range_device_access_is_silent() {
    let mut ram = Ram::new(8);
    ram.write(0x100, 0xFFFF_FFFF, 0b1111);
    assert_eq!(ram.read(0x100), 0, "reads past the end return zero");
}

#[test]
fn clear_zero_fills() {
    let mut ram = Ram::new(16);
    ram.load(0, &[0xFF; 16]).unwrap();
    ram.clear();
    assert_eq!(ram.peek_word(0), Some(0));
    assert_eq!(ram.peek_word(12), Some(0));
}
