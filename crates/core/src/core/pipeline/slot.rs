//! Pipeline Stages and Instruction Slots.
//!
//! A slot is the unit of work that moves through the pipeline: the decoded
//! instruction plus the per-instruction state the stages accumulate. Each
//! stage holds at most one slot; a slot is moved to the next stage on a
//! successful advance and re-installed in place on a stall.

use crate::isa::decode::Decoded;
use crate::isa::{Category, Mnemonic};

/// The five pipeline stages, in program order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Instruction fetch.
    Fetch,
    /// Decode and operand read.
    Decode,
    /// ALU execution and branch resolution.
    Execute,
    /// Data memory access.
    Memory,
    /// Register file write-back.
    Writeback,
}

/// Number of pipeline stages.
pub const STAGE_COUNT: usize = 5;

/// Traversal order for one cycle: producers advance before consumers read.
pub const REVERSE_STAGE_ORDER: [Stage; STAGE_COUNT] = [
    Stage::Writeback,
    Stage::Memory,
    Stage::Execute,
    Stage::Decode,
    Stage::Fetch,
];

impl Stage {
    /// Index of this stage into per-stage arrays.
    pub fn index(self) -> usize {
        match self {
            Stage::Fetch => 0,
            Stage::Decode => 1,
            Stage::Execute => 2,
            Stage::Memory => 3,
            Stage::Writeback => 4,
        }
    }

    /// Display name of the stage.
    pub fn name(self) -> &'static str {
        match self {
            Stage::Fetch => "FETCH",
            Stage::Decode => "DECODE",
            Stage::Execute => "EXECUTE",
            Stage::Memory => "MEMORY",
            Stage::Writeback => "WRITEBACK",
        }
    }
}

/// One in-flight instruction and the state its stages have produced.
///
/// A freshly scheduled slot holds only the PC it will fetch from; the
/// decoded fields are placeholders until the FETCH stage runs.
#[derive(Clone, Debug)]
pub struct InstructionSlot {
    /// In-flight sequence number, unique per fetched slot.
    ///
    /// A tight predicted loop can re-fetch a PC while the older instance is
    /// still in flight, so the PC alone cannot identify a slot.
    pub seq: u64,
    /// Address the instruction was (or will be) fetched from.
    pub pc: u32,
    /// Raw 32-bit encoding, 0 until fetched.
    pub word: u32,
    /// Format category.
    pub category: Category,
    /// Mnemonic identity.
    pub mnemonic: Mnemonic,
    /// Opcode field.
    pub opcode: u32,
    /// funct3 field.
    pub funct3: u32,
    /// funct7 field.
    pub funct7: u32,
    /// Destination register index.
    pub rd: usize,
    /// First source register index.
    pub rs1: usize,
    /// Second source register index.
    pub rs2: usize,
    /// Sign-extended immediate.
    pub imm: i32,
    /// True for conditional branches (SB format).
    pub is_branch: bool,
    /// True for unconditional jumps (`jal`, `jalr`).
    pub is_jump: bool,
    /// Direction the predictor chose at fetch, with its target.
    pub predicted_taken: bool,
    /// Predicted redirect target, meaningful when `predicted_taken` is set.
    pub predicted_target: u32,
    /// Set when the slot was held in place this cycle.
    pub stalled: bool,
    /// Stage the slot currently occupies.
    pub stage: Stage,
    /// First operand (rs1 value, or 0 for U/UJ formats).
    pub ra: u32,
    /// Second operand (rs2 value for R, the immediate otherwise).
    pub rb: u32,
    /// Compare/store operand (rs2 value for S and SB formats).
    pub rm: u32,
    /// EXECUTE stage result.
    pub ry: u32,
    /// MEMORY stage result (the value written back).
    pub rz: u32,
}

impl InstructionSlot {
    /// Creates a slot scheduled to fetch from `pc` on its next turn.
    pub fn pending(pc: u32) -> Self {
        Self {
            seq: 0,
            pc,
            word: 0,
            category: Category::I,
            mnemonic: Mnemonic::Addi,
            opcode: 0,
            funct3: 0,
            funct7: 0,
            rd: 0,
            rs1: 0,
            rs2: 0,
            imm: 0,
            is_branch: false,
            is_jump: false,
            predicted_taken: false,
            predicted_target: 0,
            stalled: false,
            stage: Stage::Fetch,
            ra: 0,
            rb: 0,
            rm: 0,
            ry: 0,
            rz: 0,
        }
    }

    /// Fills the slot from a fetched and decoded word.
    pub fn fill(&mut self, pc: u32, decoded: &Decoded) {
        self.pc = pc;
        self.word = decoded.word;
        self.category = decoded.category;
        self.mnemonic = decoded.mnemonic;
        self.opcode = decoded.opcode;
        self.funct3 = decoded.funct3;
        self.funct7 = decoded.funct7;
        self.rd = decoded.rd;
        self.rs1 = decoded.rs1;
        self.rs2 = decoded.rs2;
        self.imm = decoded.imm;
        self.is_branch = decoded.category == Category::SB;
        self.is_jump = decoded.category == Category::UJ || decoded.mnemonic == Mnemonic::Jalr;
    }
}
