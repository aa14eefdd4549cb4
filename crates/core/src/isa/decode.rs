//! Instruction Decoder.
//!
//! Converts a raw 32-bit word into a structured `Decoded` value: the format
//! category, the mnemonic, the register fields, and the sign-extended
//! immediate for the word's format. A word that matches no encoding rule is
//! a decode fault.

use crate::common::constants::{
    FUNCT3_MASK, FUNCT3_SHIFT, FUNCT7_MASK, FUNCT7_SHIFT, OPCODE_MASK, RD_SHIFT, REG_MASK,
    RS1_SHIFT, RS2_SHIFT,
};
use crate::common::error::SimError;
use crate::isa::encoding::classify;
use crate::isa::{Category, Mnemonic};

/// Total width of an instruction in bits.
const INSTRUCTION_WIDTH: u32 = 32;

/// Number of meaningful bits in an S-format immediate.
const S_IMM_BITS: u32 = 12;

/// Number of meaningful bits in an SB-format immediate (13, low bit zero).
const SB_IMM_BITS: u32 = 13;

/// Number of meaningful bits in a UJ-format immediate (21, low bit zero).
const UJ_IMM_BITS: u32 = 21;

/// A fully decoded instruction word.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decoded {
    /// The raw 32-bit encoding.
    pub word: u32,
    /// Format category of the matched rule.
    pub category: Category,
    /// Mnemonic identity of the matched rule.
    pub mnemonic: Mnemonic,
    /// Opcode field (bits 6:0).
    pub opcode: u32,
    /// funct3 field (bits 14:12).
    pub funct3: u32,
    /// funct7 field (bits 31:25).
    pub funct7: u32,
    /// Destination register index (bits 11:7).
    pub rd: usize,
    /// First source register index (bits 19:15).
    pub rs1: usize,
    /// Second source register index (bits 24:20).
    pub rs2: usize,
    /// Sign-extended immediate for the format, zero for R.
    pub imm: i32,
}

/// Decodes a raw word, or raises a decode fault if it matches no rule.
pub fn decode(word: u32) -> Result<Decoded, SimError> {
    let rule = classify(word).ok_or(SimError::DecodeFault(word))?;

    let imm = match rule.category {
        Category::R => 0,
        Category::I => i_type_imm(word),
        Category::S => s_type_imm(word),
        Category::SB => sb_type_imm(word),
        Category::U => u_type_imm(word),
        Category::UJ => uj_type_imm(word),
    };

    Ok(Decoded {
        word,
        category: rule.category,
        mnemonic: rule.mnemonic,
        opcode: word & OPCODE_MASK,
        funct3: (word >> FUNCT3_SHIFT) & FUNCT3_MASK,
        funct7: (word >> FUNCT7_SHIFT) & FUNCT7_MASK,
        rd: ((word >> RD_SHIFT) & REG_MASK) as usize,
        rs1: ((word >> RS1_SHIFT) & REG_MASK) as usize,
        rs2: ((word >> RS2_SHIFT) & REG_MASK) as usize,
        imm,
    })
}

/// I format: `imm[11:0] | rs1 | funct3 | rd | opcode`.
fn i_type_imm(word: u32) -> i32 {
    (word as i32) >> 20
}

/// S format: `imm[11:5] | rs2 | rs1 | funct3 | imm[4:0] | opcode`.
fn s_type_imm(word: u32) -> i32 {
    let low = (word >> 7) & 0x1F;
    let high = (word >> 25) & 0x7F;
    sign_extend((high << 5) | low, S_IMM_BITS)
}

/// SB format: `imm[12] | imm[10:5] | rs2 | rs1 | funct3 | imm[4:1] | imm[11] | opcode`.
fn sb_type_imm(word: u32) -> i32 {
    let bit_11 = (word >> 7) & 1;
    let bits_4_1 = (word >> 8) & 0xF;
    let bits_10_5 = (word >> 25) & 0x3F;
    let bit_12 = (word >> 31) & 1;

    let combined = (bit_12 << 12) | (bit_11 << 11) | (bits_10_5 << 5) | (bits_4_1 << 1);
    sign_extend(combined, SB_IMM_BITS)
}

/// U format: `imm[31:12] | rd | opcode`; the value is already shifted.
fn u_type_imm(word: u32) -> i32 {
    (word & 0xFFFF_F000) as i32
}

/// UJ format: `imm[20] | imm[10:1] | imm[11] | imm[19:12] | rd | opcode`.
fn uj_type_imm(word: u32) -> i32 {
    let bits_19_12 = (word >> 12) & 0xFF;
    let bit_11 = (word >> 20) & 1;
    let bits_10_1 = (word >> 21) & 0x3FF;
    let bit_20 = (word >> 31) & 1;

    let combined = (bit_20 << 20) | (bits_19_12 << 12) | (bit_11 << 11) | (bits_10_1 << 1);
    sign_extend(combined, UJ_IMM_BITS)
}

/// Sign extends a value of `bits` width to a 32-bit signed integer.
fn sign_extend(val: u32, bits: u32) -> i32 {
    let shift = INSTRUCTION_WIDTH - bits;
    ((val as i32) << shift) >> shift
}
