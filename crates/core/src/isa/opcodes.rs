//! Opcode and funct-field constants for the supported instruction set.

/// Opcode for register-register operations (R format).
pub const OP_REG: u32 = 0x33;

/// Opcode for register-immediate ALU operations.
pub const OP_IMM: u32 = 0x13;

/// Opcode for memory loads.
pub const OP_LOAD: u32 = 0x03;

/// Opcode for memory stores (S format).
pub const OP_STORE: u32 = 0x23;

/// Opcode for conditional branches (SB format).
pub const OP_BRANCH: u32 = 0x63;

/// Opcode for `lui`.
pub const OP_LUI: u32 = 0x37;

/// Opcode for `auipc`.
pub const OP_AUIPC: u32 = 0x17;

/// Opcode for `jal` (UJ format).
pub const OP_JAL: u32 = 0x6F;

/// Opcode for `jalr`.
pub const OP_JALR: u32 = 0x67;

/// funct7 value selecting the M-extension on the R opcode.
pub const FUNCT7_M_EXT: u32 = 0x01;

/// funct7 value selecting the alternate R/shift operation (sub, sra, srai).
pub const FUNCT7_ALT: u32 = 0x20;

/// Default funct7 value.
pub const FUNCT7_BASE: u32 = 0x00;
