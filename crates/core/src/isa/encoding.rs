//! Fixed Encoding Tables.
//!
//! One rule per mnemonic: the opcode, and the funct3/funct7 values the rule
//! requires. A rule with `funct3: None` matches on opcode alone (U and UJ
//! formats); `funct7: Some(_)` is required for R-format rules and for the
//! immediate shifts, whose funct3 alone is ambiguous (`srli` vs `srai`).

use crate::common::constants::{FUNCT3_MASK, FUNCT3_SHIFT, FUNCT7_MASK, FUNCT7_SHIFT, OPCODE_MASK};
use crate::isa::opcodes::*;
use crate::isa::{Category, Mnemonic};

/// A single encoding rule.
#[derive(Clone, Copy, Debug)]
pub struct EncodingRule {
    /// The mnemonic this rule identifies.
    pub mnemonic: Mnemonic,
    /// The format category of the mnemonic.
    pub category: Category,
    /// Required opcode value.
    pub opcode: u32,
    /// Required funct3 value, if the rule constrains it.
    pub funct3: Option<u32>,
    /// Required funct7 value, if the rule constrains it.
    pub funct7: Option<u32>,
}

const fn rule(
    mnemonic: Mnemonic,
    category: Category,
    opcode: u32,
    funct3: Option<u32>,
    funct7: Option<u32>,
) -> EncodingRule {
    EncodingRule {
        mnemonic,
        category,
        opcode,
        funct3,
        funct7,
    }
}

/// The complete rule set for the supported instruction set.
///
/// `ld` is present so the word classifies, but the executor rejects it.
pub const ENCODING_TABLE: &[EncodingRule] = &[
    // R format
    rule(Mnemonic::Add, Category::R, OP_REG, Some(0b000), Some(FUNCT7_BASE)),
    rule(Mnemonic::Sub, Category::R, OP_REG, Some(0b000), Some(FUNCT7_ALT)),
    rule(Mnemonic::Mul, Category::R, OP_REG, Some(0b000), Some(FUNCT7_M_EXT)),
    rule(Mnemonic::Sll, Category::R, OP_REG, Some(0b001), Some(FUNCT7_BASE)),
    rule(Mnemonic::Slt, Category::R, OP_REG, Some(0b010), Some(FUNCT7_BASE)),
    rule(Mnemonic::Xor, Category::R, OP_REG, Some(0b100), Some(FUNCT7_BASE)),
    rule(Mnemonic::Div, Category::R, OP_REG, Some(0b100), Some(FUNCT7_M_EXT)),
    rule(Mnemonic::Srl, Category::R, OP_REG, Some(0b101), Some(FUNCT7_BASE)),
    rule(Mnemonic::Sra, Category::R, OP_REG, Some(0b101), Some(FUNCT7_ALT)),
    rule(Mnemonic::Or, Category::R, OP_REG, Some(0b110), Some(FUNCT7_BASE)),
    rule(Mnemonic::Rem, Category::R, OP_REG, Some(0b110), Some(FUNCT7_M_EXT)),
    rule(Mnemonic::And, Category::R, OP_REG, Some(0b111), Some(FUNCT7_BASE)),
    // I format: immediate ALU
    rule(Mnemonic::Addi, Category::I, OP_IMM, Some(0b000), None),
    rule(Mnemonic::Slli, Category::I, OP_IMM, Some(0b001), Some(FUNCT7_BASE)),
    rule(Mnemonic::Slti, Category::I, OP_IMM, Some(0b010), None),
    rule(Mnemonic::Sltiu, Category::I, OP_IMM, Some(0b011), None),
    rule(Mnemonic::Xori, Category::I, OP_IMM, Some(0b100), None),
    rule(Mnemonic::Srli, Category::I, OP_IMM, Some(0b101), Some(FUNCT7_BASE)),
    rule(Mnemonic::Srai, Category::I, OP_IMM, Some(0b101), Some(FUNCT7_ALT)),
    rule(Mnemonic::Ori, Category::I, OP_IMM, Some(0b110), None),
    rule(Mnemonic::Andi, Category::I, OP_IMM, Some(0b111), None),
    // I format: loads
    rule(Mnemonic::Lb, Category::I, OP_LOAD, Some(0b000), None),
    rule(Mnemonic::Lh, Category::I, OP_LOAD, Some(0b001), None),
    rule(Mnemonic::Lw, Category::I, OP_LOAD, Some(0b010), None),
    rule(Mnemonic::Ld, Category::I, OP_LOAD, Some(0b011), None),
    // I format: jalr
    rule(Mnemonic::Jalr, Category::I, OP_JALR, Some(0b000), None),
    // S format
    rule(Mnemonic::Sb, Category::S, OP_STORE, Some(0b000), None),
    rule(Mnemonic::Sh, Category::S, OP_STORE, Some(0b001), None),
    rule(Mnemonic::Sw, Category::S, OP_STORE, Some(0b010), None),
    // SB format
    rule(Mnemonic::Beq, Category::SB, OP_BRANCH, Some(0b000), None),
    rule(Mnemonic::Bne, Category::SB, OP_BRANCH, Some(0b001), None),
    rule(Mnemonic::Blt, Category::SB, OP_BRANCH, Some(0b100), None),
    rule(Mnemonic::Bge, Category::SB, OP_BRANCH, Some(0b101), None),
    rule(Mnemonic::Bltu, Category::SB, OP_BRANCH, Some(0b110), None),
    rule(Mnemonic::Bgeu, Category::SB, OP_BRANCH, Some(0b111), None),
    // U format
    rule(Mnemonic::Lui, Category::U, OP_LUI, None, None),
    rule(Mnemonic::Auipc, Category::U, OP_AUIPC, None, None),
    // UJ format
    rule(Mnemonic::Jal, Category::UJ, OP_JAL, None, None),
];

/// Finds the encoding rule matching a raw instruction word.
///
/// Matching compares the word's opcode against every rule, then funct3 and
/// funct7 where the rule constrains them. Returns `None` when no rule
/// matches, which the caller reports as a decode fault.
pub fn classify(word: u32) -> Option<&'static EncodingRule> {
    let opcode = word & OPCODE_MASK;
    let funct3 = (word >> FUNCT3_SHIFT) & FUNCT3_MASK;
    let funct7 = (word >> FUNCT7_SHIFT) & FUNCT7_MASK;

    ENCODING_TABLE.iter().find(|rule| {
        rule.opcode == opcode
            && rule.funct3.map_or(true, |f3| f3 == funct3)
            && rule.funct7.map_or(true, |f7| f7 == funct7)
    })
}
