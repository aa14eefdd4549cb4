//! Program Image Loading.
//!
//! The assembler-to-engine handoff is a sequence of (address, value) pairs.
//! Addresses at or above the data segment base populate the data store as
//! bytes (the low 8 bits of the value); every other address populates the
//! code store with the 32-bit word and its disassembly.
//!
//! This module also parses a plain-text image format for the CLI: one
//! `address: value` pair per line, both hexadecimal, `#` starting a comment.

use std::fs;
use std::path::Path;

use crate::common::constants::DATA_SEGMENT_START;
use crate::common::error::SimError;
use crate::core::Cpu;
use crate::isa::disasm::disassemble;

/// A prepared program image: (address, value) pairs.
pub type ProgramImage = Vec<(u32, u32)>;

/// Installs a prepared image into the machine's code and data stores.
pub fn install_image(cpu: &mut Cpu, image: &ProgramImage) -> Result<(), SimError> {
    for &(addr, value) in image {
        if addr >= DATA_SEGMENT_START {
            cpu.data.poke(addr, value as u8);
        } else {
            cpu.code.insert(addr, value, disassemble(value)?);
        }
    }
    Ok(())
}

/// Parses the text image format.
///
/// Each non-empty line is `address: value` with both fields hexadecimal
/// (an optional `0x` prefix is accepted); `#` starts a comment.
pub fn parse_image_text(text: &str) -> Result<ProgramImage, SimError> {
    let mut image = ProgramImage::new();

    for (line_no, raw_line) in text.lines().enumerate() {
        let line = raw_line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }

        let bad_line = || {
            SimError::AssemblyFault(format!(
                "image line {}: expected 'address: value', got '{}'",
                line_no + 1,
                line
            ))
        };

        let (addr_text, value_text) = line.split_once(':').ok_or_else(bad_line)?;
        let addr = parse_hex(addr_text.trim()).ok_or_else(bad_line)?;
        let value = parse_hex(value_text.trim()).ok_or_else(bad_line)?;
        image.push((addr, value));
    }
    Ok(image)
}

/// Reads and parses an image file from disk.
pub fn load_image_file(path: &Path) -> Result<ProgramImage, SimError> {
    let text = fs::read_to_string(path)
        .map_err(|e| SimError::AssemblyFault(format!("cannot read {}: {}", path.display(), e)))?;
    parse_image_text(&text)
}

fn parse_hex(field: &str) -> Option<u32> {
    let digits = field
        .strip_prefix("0x")
        .or_else(|| field.strip_prefix("0X"))
        .unwrap_or(field);
    u32::from_str_radix(digits, 16).ok()
}
