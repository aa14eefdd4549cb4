//! Image Loader Tests.

use std::io::Write;

use rv32sim_core::common::constants::DATA_SEGMENT_START;
use rv32sim_core::sim::loader::{load_image_file, parse_image_text};
use rv32sim_core::Simulator;

use crate::common::builder::InstructionBuilder;

#[test]
fn parses_address_value_pairs() {
    let image = parse_image_text("0: 00A00293\n4: 0x00000313\n").unwrap();
    assert_eq!(image, vec![(0, 0x00A0_0293), (4, 0x0000_0313)]);
}

#[test]
fn skips_comments_and_blank_lines() {
    let text = "# a program\n\n0: 00A00293  # addi t0, zero, 10\n\n";
    let image = parse_image_text(text).unwrap();
    assert_eq!(image.len(), 1);
}

#[test]
fn rejects_malformed_lines() {
    assert!(parse_image_text("not an image").is_err());
    assert!(parse_image_text("0 00A00293").is_err());
    assert!(parse_image_text("0: zzzz").is_err());
}

#[test]
fn splits_image_across_code_and_data() {
    let word = InstructionBuilder::new().addi(5, 0, 7).build();
    let image = vec![
        (0, word),
        (DATA_SEGMENT_START, 0xAB),
        (DATA_SEGMENT_START + 1, 0xFFFF_FFCD),
    ];

    let mut sim = Simulator::new();
    assert!(sim.load_image(&image));

    let text = sim.text_map();
    assert_eq!(text.get(&0).map(|(w, _)| *w), Some(word));
    assert_eq!(text.get(&0).map(|(_, d)| d.clone()), Some("addi t0, zero, 7".into()));

    let data = sim.data_map();
    assert_eq!(data.get(&DATA_SEGMENT_START), Some(&0xAB));
    // Only the low byte of a data value lands in the store.
    assert_eq!(data.get(&(DATA_SEGMENT_START + 1)), Some(&0xCD));
}

#[test]
fn rejects_an_image_with_undecodable_code() {
    let mut sim = Simulator::new();
    assert!(!sim.load_image(&vec![(0, 0xFFFF_FFFF)]));
    let logs = sim.logs();
    assert!(logs.contains_key(&404));
}

#[test]
fn loads_an_image_from_a_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "# two instructions").unwrap();
    writeln!(file, "0: {:08X}", InstructionBuilder::new().addi(5, 0, 7).build()).unwrap();
    writeln!(file, "4: {:08X}", InstructionBuilder::new().addi(6, 0, 3).build()).unwrap();

    let image = load_image_file(file.path()).unwrap();
    assert_eq!(image.len(), 2);

    let mut sim = Simulator::new();
    assert!(sim.load_image(&image));
    sim.run();
    assert_eq!(sim.registers()[5], 7);
    assert_eq!(sim.registers()[6], 3);
}

#[test]
fn missing_file_is_an_assembly_fault() {
    assert!(load_image_file(std::path::Path::new("/nonexistent/image.img")).is_err());
}
