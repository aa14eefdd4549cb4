//! Arithmetic-Logic and Branch-Resolution Unit.
//!
//! Functional semantics for every supported mnemonic. Given the resolved
//! operands, the unit produces the stage result `RY` and, for control-flow
//! instructions, the taken flag and target address. Memory operations only
//! compute their effective address here; the access itself is deferred to
//! the MEMORY stage.

use crate::common::constants::{INSTRUCTION_SIZE, SHAMT_MASK};
use crate::common::error::SimError;
use crate::isa::Mnemonic;

/// Result of executing one instruction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExecOutcome {
    /// Stage result: ALU value, effective address, link address, or the
    /// branch-taken flag for conditional branches.
    pub ry: u32,
    /// True when a branch or jump resolved taken.
    pub taken: bool,
    /// Redirect target, meaningful only when `taken` is set.
    pub target: u32,
}

impl ExecOutcome {
    fn value(ry: u32) -> Self {
        Self {
            ry,
            taken: false,
            target: 0,
        }
    }

    fn redirect(ry: u32, target: u32) -> Self {
        Self {
            ry,
            taken: true,
            target,
        }
    }
}

/// Executes one instruction.
///
/// # Arguments
///
/// * `mnemonic` - Identity of the instruction.
/// * `ra` - First operand (register rs1, or 0 for U/UJ formats).
/// * `rb` - Second operand (register rs2 for R, the immediate otherwise).
/// * `rm` - Compare/store operand (register rs2 for S and SB formats).
/// * `pc` - Address the instruction was fetched from.
///
/// # Returns
///
/// The stage result and control-flow resolution, or an execute fault for
/// mnemonics this machine recognizes but does not support.
pub fn execute(
    mnemonic: Mnemonic,
    ra: u32,
    rb: u32,
    rm: u32,
    pc: u32,
) -> Result<ExecOutcome, SimError> {
    let link = pc.wrapping_add(INSTRUCTION_SIZE);

    let outcome = match mnemonic {
        Mnemonic::Add | Mnemonic::Addi => ExecOutcome::value(ra.wrapping_add(rb)),
        Mnemonic::Sub => ExecOutcome::value(ra.wrapping_sub(rb)),
        Mnemonic::Mul => ExecOutcome::value(ra.wrapping_mul(rb)),
        Mnemonic::Div => {
            // Division by zero yields all-ones, mirroring the hardware
            // convention of not trapping.
            let ry = if rb == 0 {
                0xFFFF_FFFF
            } else {
                (ra as i32).wrapping_div(rb as i32) as u32
            };
            ExecOutcome::value(ry)
        }
        Mnemonic::Rem => {
            let ry = if rb == 0 {
                ra
            } else {
                (ra as i32).wrapping_rem(rb as i32) as u32
            };
            ExecOutcome::value(ry)
        }
        Mnemonic::And | Mnemonic::Andi => ExecOutcome::value(ra & rb),
        Mnemonic::Or | Mnemonic::Ori => ExecOutcome::value(ra | rb),
        Mnemonic::Xor | Mnemonic::Xori => ExecOutcome::value(ra ^ rb),
        Mnemonic::Sll | Mnemonic::Slli => ExecOutcome::value(ra << (rb & SHAMT_MASK)),
        Mnemonic::Srl | Mnemonic::Srli => ExecOutcome::value(ra >> (rb & SHAMT_MASK)),
        Mnemonic::Sra | Mnemonic::Srai => {
            ExecOutcome::value(((ra as i32) >> (rb & SHAMT_MASK)) as u32)
        }
        Mnemonic::Slt | Mnemonic::Slti => {
            ExecOutcome::value(((ra as i32) < (rb as i32)) as u32)
        }
        Mnemonic::Sltiu => ExecOutcome::value((ra < rb) as u32),
        Mnemonic::Lb | Mnemonic::Lh | Mnemonic::Lw => {
            ExecOutcome::value(ra.wrapping_add(rb))
        }
        Mnemonic::Ld => return Err(SimError::ExecuteFault(Mnemonic::Ld)),
        Mnemonic::Sb | Mnemonic::Sh | Mnemonic::Sw => {
            ExecOutcome::value(ra.wrapping_add(rb))
        }
        Mnemonic::Beq
        | Mnemonic::Bne
        | Mnemonic::Blt
        | Mnemonic::Bge
        | Mnemonic::Bltu
        | Mnemonic::Bgeu => {
            let taken = match mnemonic {
                Mnemonic::Beq => ra == rm,
                Mnemonic::Bne => ra != rm,
                Mnemonic::Blt => (ra as i32) < (rm as i32),
                Mnemonic::Bge => (ra as i32) >= (rm as i32),
                Mnemonic::Bltu => ra < rm,
                _ => ra >= rm,
            };
            if taken {
                ExecOutcome::redirect(taken as u32, pc.wrapping_add(rb))
            } else {
                ExecOutcome::value(taken as u32)
            }
        }
        Mnemonic::Lui => ExecOutcome::value(rb),
        Mnemonic::Auipc => ExecOutcome::value(pc.wrapping_add(rb)),
        Mnemonic::Jal => ExecOutcome::redirect(link, pc.wrapping_add(rb)),
        Mnemonic::Jalr => ExecOutcome::redirect(link, ra.wrapping_add(rb) & !1),
    };
    Ok(outcome)
}
