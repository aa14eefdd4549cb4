//! Data Hazard Detection and Operand Forwarding.
//!
//! This module implements the logic for maintaining pipeline consistency when
//! data dependencies exist between in-flight instructions. It provides:
//! 1. **RAW Detection:** Stall decisions when forwarding is disabled.
//! 2. **Load-Use Detection:** The one hazard forwarding cannot hide.
//! 3. **Operand Forwarding:** Bypassing the register file with results still
//!    in flight, younger producers shadowing older ones.
//!
//! All checks read the dependency snapshot captured at cycle start, never
//! the live table, so a producer advancing earlier in the same traversal
//! cannot change a consumer's hazard decision.

use crate::core::pipeline::deps::DependencyRecord;
use crate::core::pipeline::slot::{InstructionSlot, Stage};
use crate::isa::opcodes::OP_LOAD;
use crate::isa::Category;

/// True when the slot reads `rs1` as a register operand.
fn reads_rs1(slot: &InstructionSlot) -> bool {
    slot.category.uses_rs1() && slot.rs1 != 0
}

/// True when the slot reads `rs2` as a register operand.
fn reads_rs2(slot: &InstructionSlot) -> bool {
    slot.category.uses_rs2() && slot.rs2 != 0
}

/// Checks whether a read-after-write hazard requires a stall.
///
/// Used only when forwarding is disabled: the consumer must wait while any
/// other in-flight writer of one of its source registers has completed
/// EXECUTE or MEMORY but not yet written the register file.
pub fn needs_raw_stall(snapshot: &[DependencyRecord], slot: &InstructionSlot) -> bool {
    snapshot.iter().any(|dep| {
        dep.seq != slot.seq
            && matches!(dep.stage, Stage::Execute | Stage::Memory)
            && ((reads_rs1(slot) && dep.rd == slot.rs1)
                || (reads_rs2(slot) && dep.rd == slot.rs2))
    })
}

/// Checks whether a load-use hazard requires a single-cycle stall.
///
/// A load whose EXECUTE has completed has only computed its address; the
/// loaded value does not exist until its MEMORY stage finishes, so a
/// dependent instruction entering EXECUTE must wait one cycle even with
/// forwarding enabled.
pub fn needs_load_use_stall(snapshot: &[DependencyRecord], slot: &InstructionSlot) -> bool {
    snapshot.iter().any(|dep| {
        dep.seq != slot.seq
            && dep.stage == Stage::Execute
            && dep.opcode == OP_LOAD
            && ((reads_rs1(slot) && dep.rd == slot.rs1)
                || (reads_rs2(slot) && dep.rd == slot.rs2))
    })
}

/// Overrides the slot's operands with in-flight results.
///
/// Producers that completed EXECUTE are consulted before producers that
/// completed MEMORY, so the younger of two writers to the same register
/// wins, and an operand already satisfied is never overridden by a staler
/// source. A store or branch rs2 is forwarded into `RM`; every other rs2
/// consumer receives the value in `RB`.
///
/// # Returns
///
/// `true` when at least one operand was forwarded.
pub fn apply_forwarding(
    snapshot: &[DependencyRecord],
    slot: &mut InstructionSlot,
    trace: bool,
) -> bool {
    let mut forwarded = false;
    let mut rs1_satisfied = !reads_rs1(slot);
    let mut rs2_satisfied = !reads_rs2(slot);

    for stage in [Stage::Execute, Stage::Memory] {
        if rs1_satisfied && rs2_satisfied {
            break;
        }
        for dep in snapshot.iter().filter(|d| d.seq != slot.seq && d.stage == stage) {
            // An EXECUTE-complete load has no value to give; the load-use
            // stall keeps the consumer out of this path for one cycle.
            if stage == Stage::Execute && dep.opcode == OP_LOAD {
                continue;
            }

            if !rs1_satisfied && dep.rd == slot.rs1 {
                if trace {
                    eprintln!(
                        "[Forward] PC={:#x} rs1=x{} Val={:#x} Source={:?}",
                        slot.pc, slot.rs1, dep.value, stage
                    );
                }
                slot.ra = dep.value;
                rs1_satisfied = true;
                forwarded = true;
            }

            if !rs2_satisfied && dep.rd == slot.rs2 {
                if trace {
                    eprintln!(
                        "[Forward] PC={:#x} rs2=x{} Val={:#x} Source={:?}",
                        slot.pc, slot.rs2, dep.value, stage
                    );
                }
                if matches!(slot.category, Category::S | Category::SB) {
                    slot.rm = dep.value;
                } else {
                    slot.rb = dep.value;
                }
                rs2_satisfied = true;
                forwarded = true;
            }
        }
    }
    forwarded
}
