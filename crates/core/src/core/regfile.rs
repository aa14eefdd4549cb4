//! Integer Register File.
//!
//! This module implements the architectural register file. It performs the following:
//! 1. **Storage:** Maintains 32 integer registers (`x0`-`x31`) of 32 bits.
//! 2. **Invariant Enforcement:** Ensures that register `x0` is hardwired to zero.
//! 3. **Reset State:** Installs the machine's defined reset values.

use crate::common::constants::{GLOBAL_POINTER_INIT, NUM_REGISTERS, STACK_POINTER_INIT};

/// Architectural integer register file.
///
/// Register `x0` is hardwired to zero and cannot be modified.
#[derive(Clone)]
pub struct RegisterFile {
    regs: [u32; NUM_REGISTERS],
}

impl RegisterFile {
    /// Creates a register file holding the machine's reset state.
    ///
    /// The stack pointer (x2), global pointer (x3), and the a0/a1 argument
    /// registers (x10, x11) carry non-zero reset values; everything else is 0.
    pub fn new() -> Self {
        let mut rf = Self {
            regs: [0; NUM_REGISTERS],
        };
        rf.reset();
        rf
    }

    /// Restores the machine's reset state.
    pub fn reset(&mut self) {
        self.regs = [0; NUM_REGISTERS];
        self.regs[2] = STACK_POINTER_INIT;
        self.regs[3] = GLOBAL_POINTER_INIT;
        self.regs[10] = 0x0000_0001;
        self.regs[11] = STACK_POINTER_INIT;
    }

    /// Reads a register value. Register `x0` always returns 0.
    pub fn read(&self, idx: usize) -> u32 {
        if idx == 0 { 0 } else { self.regs[idx] }
    }

    /// Writes a value to a register. Writes to `x0` are discarded.
    pub fn write(&mut self, idx: usize, val: u32) {
        if idx != 0 {
            self.regs[idx] = val;
        }
    }

    /// Returns a copy of all 32 registers for snapshotting.
    pub fn snapshot(&self) -> [u32; NUM_REGISTERS] {
        self.regs
    }

    /// Dumps the contents of all registers to stdout.
    ///
    /// Displays registers in pairs with hexadecimal formatting.
    pub fn dump(&self) {
        for i in (0..NUM_REGISTERS).step_by(2) {
            println!(
                "x{:<2}={:#010x} x{:<2}={:#010x}",
                i,
                self.regs[i],
                i + 1,
                self.regs[i + 1]
            );
        }
    }
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}
