//! CPU core: architectural state and the execution units.

/// ALU and branch-resolution semantics.
pub mod alu;
/// Dynamic branch prediction unit (PHT + BTB).
pub mod bpu;
/// The machine state owner.
pub mod cpu;
/// Sparse code and data stores.
pub mod memory;
/// The five-stage pipeline.
pub mod pipeline;
/// Integer register file.
pub mod regfile;

pub use cpu::Cpu;
