//! Instruction Disassembler.
//!
//! Converts a 32-bit instruction encoding into a human-readable mnemonic
//! string. Every word placed in the code store is paired with its
//! disassembly so the presentation layer can display source alongside state.

use crate::common::error::SimError;
use crate::isa::decode::decode;
use crate::isa::{Category, Mnemonic};

/// ABI register names for x0-x31.
const REG_NAMES: [&str; 32] = [
    "zero", "ra", "sp", "gp", "tp", "t0", "t1", "t2", "s0", "s1", "a0", "a1", "a2", "a3", "a4",
    "a5", "a6", "a7", "s2", "s3", "s4", "s5", "s6", "s7", "s8", "s9", "s10", "s11", "t3", "t4",
    "t5", "t6",
];

/// Returns the ABI name for an integer register index.
#[inline]
fn xreg(idx: usize) -> &'static str {
    REG_NAMES.get(idx).copied().unwrap_or("x??")
}

/// Disassembles a 32-bit instruction into a human-readable string.
///
/// Returns a decode fault for unrecognised encodings, mirroring the engine's
/// classification rules so an image cannot be loaded with undisplayable words.
pub fn disassemble(word: u32) -> Result<String, SimError> {
    let d = decode(word)?;
    let mn = d.mnemonic.name();

    let text = match d.category {
        Category::R => format!("{mn} {}, {}, {}", xreg(d.rd), xreg(d.rs1), xreg(d.rs2)),
        Category::I => {
            if d.mnemonic.is_load() {
                format!("{mn} {}, {}({})", xreg(d.rd), d.imm, xreg(d.rs1))
            } else if d.mnemonic == Mnemonic::Jalr {
                format!("{mn} {}, {}({})", xreg(d.rd), d.imm, xreg(d.rs1))
            } else {
                format!("{mn} {}, {}, {}", xreg(d.rd), xreg(d.rs1), d.imm)
            }
        }
        Category::S => format!("{mn} {}, {}({})", xreg(d.rs2), d.imm, xreg(d.rs1)),
        Category::SB => format!("{mn} {}, {}, {}", xreg(d.rs1), xreg(d.rs2), d.imm),
        Category::U => format!("{mn} {}, {:#x}", xreg(d.rd), (d.imm as u32) >> 12),
        Category::UJ => format!("{mn} {}, {}", xreg(d.rd), d.imm),
    };
    Ok(text)
}
