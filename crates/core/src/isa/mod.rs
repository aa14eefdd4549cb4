//! Instruction set definitions for the RV32IM subset this machine executes.
//!
//! This module covers the static side of the ISA:
//! 1. **Identities:** Instruction categories and mnemonics.
//! 2. **Encoding tables:** The (opcode, funct3, funct7) rule for each mnemonic.
//! 3. **Decoding:** Classification, field extraction, and immediate assembly.
//! 4. **Disassembly:** Textual form of a code word for display.

/// Mnemonic decoding from raw 32-bit words.
pub mod decode;
/// Human-readable rendering of code words.
pub mod disasm;
/// Fixed encoding rules for every supported mnemonic.
pub mod encoding;
/// Opcode and funct-field constants.
pub mod opcodes;

use std::fmt;

/// Instruction format category.
///
/// The category determines which fields of the word are meaningful, how the
/// immediate is assembled, and which operand registers are read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    /// Register-register operations.
    R,
    /// Register-immediate operations, loads, and `jalr`.
    I,
    /// Stores.
    S,
    /// Conditional branches.
    SB,
    /// Upper-immediate operations (`lui`, `auipc`).
    U,
    /// Unconditional jumps (`jal`).
    UJ,
}

impl Category {
    /// True when this format reads a register into the first operand.
    pub fn uses_rs1(self) -> bool {
        matches!(self, Category::R | Category::I | Category::S | Category::SB)
    }

    /// True when this format reads a register into the second operand.
    pub fn uses_rs2(self) -> bool {
        matches!(self, Category::R | Category::S | Category::SB)
    }

    /// True when this format writes a destination register at WRITEBACK.
    pub fn writes_rd(self) -> bool {
        matches!(self, Category::R | Category::I | Category::U | Category::UJ)
    }
}

/// Identity of a supported instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mnemonic {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    And,
    Or,
    Xor,
    Sll,
    Srl,
    Sra,
    Slt,
    Addi,
    Andi,
    Ori,
    Xori,
    Slti,
    Sltiu,
    Slli,
    Srli,
    Srai,
    Lb,
    Lh,
    Lw,
    Ld,
    Jalr,
    Sb,
    Sh,
    Sw,
    Beq,
    Bne,
    Blt,
    Bge,
    Bltu,
    Bgeu,
    Lui,
    Auipc,
    Jal,
}

impl Mnemonic {
    /// Assembly-source spelling of this mnemonic.
    pub fn name(self) -> &'static str {
        match self {
            Mnemonic::Add => "add",
            Mnemonic::Sub => "sub",
            Mnemonic::Mul => "mul",
            Mnemonic::Div => "div",
            Mnemonic::Rem => "rem",
            Mnemonic::And => "and",
            Mnemonic::Or => "or",
            Mnemonic::Xor => "xor",
            Mnemonic::Sll => "sll",
            Mnemonic::Srl => "srl",
            Mnemonic::Sra => "sra",
            Mnemonic::Slt => "slt",
            Mnemonic::Addi => "addi",
            Mnemonic::Andi => "andi",
            Mnemonic::Ori => "ori",
            Mnemonic::Xori => "xori",
            Mnemonic::Slti => "slti",
            Mnemonic::Sltiu => "sltiu",
            Mnemonic::Slli => "slli",
            Mnemonic::Srli => "srli",
            Mnemonic::Srai => "srai",
            Mnemonic::Lb => "lb",
            Mnemonic::Lh => "lh",
            Mnemonic::Lw => "lw",
            Mnemonic::Ld => "ld",
            Mnemonic::Jalr => "jalr",
            Mnemonic::Sb => "sb",
            Mnemonic::Sh => "sh",
            Mnemonic::Sw => "sw",
            Mnemonic::Beq => "beq",
            Mnemonic::Bne => "bne",
            Mnemonic::Blt => "blt",
            Mnemonic::Bge => "bge",
            Mnemonic::Bltu => "bltu",
            Mnemonic::Bgeu => "bgeu",
            Mnemonic::Lui => "lui",
            Mnemonic::Auipc => "auipc",
            Mnemonic::Jal => "jal",
        }
    }

    /// True for memory loads (`lb`, `lh`, `lw`, and the unsupported `ld`).
    pub fn is_load(self) -> bool {
        matches!(
            self,
            Mnemonic::Lb | Mnemonic::Lh | Mnemonic::Lw | Mnemonic::Ld
        )
    }

    /// True for memory stores.
    pub fn is_store(self) -> bool {
        matches!(self, Mnemonic::Sb | Mnemonic::Sh | Mnemonic::Sw)
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
