//! Global Memory-Map and Encoding Constants.
//!
//! This module defines system-wide constants used across the simulator. It includes:
//! 1. **Memory layout:** Segment bases and the addressable memory size.
//! 2. **Architectural constants:** Register count and instruction width.
//! 3. **Encoding constants:** Opcode values and field masks/shifts for decoding.

/// Base address of the text (code) segment.
pub const TEXT_SEGMENT_START: u32 = 0x0000_0000;

/// Base address of the data segment.
///
/// Addresses at or above this value in a loaded image populate the data
/// store; addresses below it populate the code store.
pub const DATA_SEGMENT_START: u32 = 0x1000_0000;

/// Total addressable memory in bytes (2 GiB, logical and sparse).
///
/// Any access whose byte range ends past this limit raises a memory fault.
pub const MEMORY_SIZE: u64 = 0x8000_0000;

/// Size of one instruction in bytes.
pub const INSTRUCTION_SIZE: u32 = 4;

/// Number of integer registers in the architectural register file.
pub const NUM_REGISTERS: usize = 32;

/// Reset value of the stack pointer (x2).
pub const STACK_POINTER_INIT: u32 = 0x7FFF_FFDC;

/// Reset value of the global pointer (x3).
pub const GLOBAL_POINTER_INIT: u32 = 0x1000_0000;

/// Bit mask for extracting the opcode field from an instruction.
pub const OPCODE_MASK: u32 = 0x7F;

/// Bit position shift for the destination register (rd) field.
pub const RD_SHIFT: u32 = 7;

/// Bit position shift for the funct3 field.
pub const FUNCT3_SHIFT: u32 = 12;

/// Bit position shift for the first source register (rs1) field.
pub const RS1_SHIFT: u32 = 15;

/// Bit position shift for the second source register (rs2) field.
pub const RS2_SHIFT: u32 = 20;

/// Bit position shift for the funct7 field.
pub const FUNCT7_SHIFT: u32 = 25;

/// Bit mask for 5-bit register index fields.
pub const REG_MASK: u32 = 0x1F;

/// Bit mask for the 3-bit funct3 field.
pub const FUNCT3_MASK: u32 = 0x7;

/// Bit mask for the 7-bit funct7 field.
pub const FUNCT7_MASK: u32 = 0x7F;

/// Shift-amount mask applied to the second operand of shift instructions.
pub const SHAMT_MASK: u32 = 0x1F;
