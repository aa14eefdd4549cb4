//! Simulator Fault Definitions.
//!
//! This module defines the error handling types for the simulator. It provides:
//! 1. **Fault Representation:** One variant per fault class the engine can raise.
//! 2. **Error Handling:** Integration with standard Rust error traits so faults
//!    can be reported through the log channel or surfaced to a caller.

use std::fmt;

use crate::isa::Mnemonic;

/// Faults raised by the execution engine.
///
/// A fault inside `step()` is fatal: it stops the simulation, is recorded as
/// a 404 log entry, and leaves all prior observable state intact.
#[derive(Clone, Debug, PartialEq)]
pub enum SimError {
    /// An instruction word matched no rule in the encoding tables.
    ///
    /// The associated value is the unclassifiable instruction encoding.
    DecodeFault(u32),

    /// A classified instruction that the executor cannot honor.
    ///
    /// The associated value is the offending mnemonic (e.g. `ld`, which is
    /// recognized but unsupported on this 32-bit machine).
    ExecuteFault(Mnemonic),

    /// A memory access fell outside the valid address range.
    ///
    /// The associated values are the base address and access width in bytes.
    MemoryFault { addr: u32, size: u32 },

    /// The external assembler collaborator rejected the source program.
    AssemblyFault(String),

    /// `run()` exceeded the configured maximum step count.
    ///
    /// The associated value is the step limit that was reached.
    StepLimit(u64),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::DecodeFault(word) => {
                write!(
                    f,
                    "instruction {:#010x} could not be classified: no encoding rule matches",
                    word
                )
            }
            SimError::ExecuteFault(mnemonic) => {
                write!(f, "{} instruction not supported", mnemonic)
            }
            SimError::MemoryFault { addr, size } => {
                write!(
                    f,
                    "memory access error: address {:#010x} with size {} is outside the valid range",
                    addr, size
                )
            }
            SimError::AssemblyFault(msg) => write!(f, "assembly failed: {}", msg),
            SimError::StepLimit(limit) => {
                write!(f, "exceeded maximum step count ({})", limit)
            }
        }
    }
}

impl std::error::Error for SimError {}
