//! Pipeline Controller.
//!
//! Drives one simulated cycle. Stages are visited in reverse order
//! (WRITEBACK first, FETCH last) and moved into a freshly built next-cycle
//! pipeline, so a producer can never be consumed by the same cycle's
//! consumer and a stalled slot simply re-installs itself in place. Hazard
//! detection and forwarding read the dependency snapshot captured before
//! any stage runs.

use crate::common::constants::INSTRUCTION_SIZE;
use crate::common::error::SimError;
use crate::common::logs::LOG_TRACE;
use crate::core::alu;
use crate::core::cpu::Cpu;
use crate::core::memory::check_bounds;
use crate::core::pipeline::deps::DependencyRecord;
use crate::core::pipeline::hazards;
use crate::core::pipeline::slot::{InstructionSlot, Stage, REVERSE_STAGE_ORDER, STAGE_COUNT};
use crate::core::regfile::RegisterFile;
use crate::isa::decode::decode;
use crate::isa::{Category, Mnemonic};

/// Advances the machine by exactly one cycle.
///
/// A fatal fault aborts the cycle and leaves the caller to shut the machine
/// down; hazards and stalls are not faults and are reported as 300-level
/// traces.
pub fn advance_cycle(cpu: &mut Cpu) -> Result<(), SimError> {
    let snapshot = cpu.deps.snapshot();
    let mut next: [Option<InstructionSlot>; STAGE_COUNT] = Default::default();
    let mut work_done = false;
    let mut flush_younger = false;

    cpu.ui.is_stalled = false;
    cpu.ui.is_flushed = false;
    cpu.ui.is_data_forwarded = false;

    for stage in REVERSE_STAGE_ORDER {
        let Some(mut slot) = cpu.pipeline[stage.index()].take() else {
            continue;
        };
        work_done = true;

        // A misprediction resolved earlier in this traversal discards the
        // younger slots outright.
        if flush_younger && matches!(stage, Stage::Decode | Stage::Fetch) {
            continue;
        }

        let was_stalled = slot.stalled;
        slot.stalled = false;

        match stage {
            Stage::Writeback => run_writeback(cpu, &slot),
            Stage::Memory => {
                run_memory(cpu, &mut slot)?;
                slot.stage = Stage::Writeback;
                next[Stage::Writeback.index()] = Some(slot);
            }
            Stage::Execute => {
                if stall_at_execute(cpu, &snapshot, &mut slot, was_stalled) {
                    next[Stage::Execute.index()] = Some(slot);
                    continue;
                }
                flush_younger = run_execute(cpu, &mut slot)?;
                slot.stage = Stage::Memory;
                next[Stage::Memory.index()] = Some(slot);
            }
            Stage::Decode => {
                // Back-pressure: a stalled EXECUTE keeps its slot, so this
                // one cannot advance and waits untouched.
                if next[Stage::Execute.index()].is_some() {
                    next[Stage::Decode.index()] = Some(slot);
                    continue;
                }
                if stall_at_decode(cpu, &snapshot, &mut slot, was_stalled) {
                    next[Stage::Decode.index()] = Some(slot);
                    continue;
                }
                run_decode(cpu, &mut slot);
                slot.stage = Stage::Execute;
                next[Stage::Execute.index()] = Some(slot);
            }
            Stage::Fetch => {
                if next[Stage::Decode.index()].is_some() {
                    next[Stage::Fetch.index()] = Some(slot);
                    continue;
                }
                if run_fetch(cpu, &mut slot)? {
                    slot.stage = Stage::Decode;
                    next[Stage::Decode.index()] = Some(slot);
                }
            }
        }
    }

    // Schedule the next fetch. In non-pipelined mode a new instruction may
    // only enter once the previous one has fully drained.
    let next_is_empty = next.iter().all(|slot| slot.is_none());
    if next[Stage::Fetch.index()].is_none()
        && cpu.running
        && cpu.code.contains(cpu.pc)
        && (cpu.is_pipeline || next_is_empty)
    {
        next[Stage::Fetch.index()] = Some(cpu.schedule_fetch());
    }

    cpu.pipeline = next;

    if cpu.pipeline_is_empty() && !cpu.code.is_empty() && !cpu.code.contains(cpu.pc) {
        cpu.running = false;
        cpu.ui.is_program_terminated = true;
    }

    if work_done {
        cpu.stats.total_cycles += 1;
    }
    Ok(())
}

/// FETCH: read the word at PC, decode it, and consult the predictor.
///
/// Returns `false` when PC has run past the code image; the slot is then
/// discarded and the drain check decides termination.
fn run_fetch(cpu: &mut Cpu, slot: &mut InstructionSlot) -> Result<bool, SimError> {
    check_bounds(cpu.pc, INSTRUCTION_SIZE)?;

    let Some(word) = cpu.code.word_at(cpu.pc) else {
        return Ok(false);
    };

    let decoded = decode(word)?;
    slot.fill(cpu.pc, &decoded);
    cpu.stats.instructions_executed += 1;
    cpu.pc = cpu.pc.wrapping_add(INSTRUCTION_SIZE);

    if cpu.trace {
        eprintln!("IF  pc={:#x} inst={:#010x}", slot.pc, slot.word);
    }

    // Predicted-taken control flow with a known target redirects the next
    // fetch immediately; resolution at EXECUTE checks the guess.
    if cpu.is_pipeline && (slot.is_branch || slot.is_jump) && cpu.predictor.predict(slot.pc) {
        if let Some(target) = cpu.predictor.target(slot.pc) {
            slot.predicted_taken = true;
            slot.predicted_target = target;
            cpu.pc = target;
        }
    }
    Ok(true)
}

/// DECODE: read operands, register the writer, and classify the instruction.
fn run_decode(cpu: &mut Cpu, slot: &mut InstructionSlot) {
    read_operands(&cpu.regs, slot);
    cpu.instr_regs.ra = slot.ra;
    cpu.instr_regs.rb = slot.rb;
    cpu.instr_regs.rm = slot.rm;

    if slot.category.writes_rd() && slot.rd != 0 {
        cpu.deps.insert(slot.seq, slot.pc, slot.rd, slot.opcode);
    }
    cpu.stats.record_class(slot.category, slot.opcode);

    if cpu.trace {
        eprintln!("ID  pc={:#x} {:?}", slot.pc, slot.mnemonic);
    }
}

/// EXECUTE: resolve operands, run the ALU, and resolve control flow.
///
/// Returns `true` when a misprediction flush must discard the younger slots.
fn run_execute(cpu: &mut Cpu, slot: &mut InstructionSlot) -> Result<bool, SimError> {
    cpu.instr_regs.ra = slot.ra;
    cpu.instr_regs.rb = slot.rb;
    cpu.instr_regs.rm = slot.rm;

    let outcome = alu::execute(slot.mnemonic, slot.ra, slot.rb, slot.rm, slot.pc)?;
    slot.ry = outcome.ry;
    cpu.instr_regs.ry = slot.ry;
    cpu.deps.complete(slot.seq, Stage::Execute, slot.ry);

    if cpu.trace {
        eprintln!("EX  pc={:#x} ry={:#x}", slot.pc, slot.ry);
    }

    if !(slot.is_branch || slot.is_jump) {
        return Ok(false);
    }

    if !cpu.is_pipeline {
        if outcome.taken {
            cpu.pc = outcome.target;
        }
        return Ok(false);
    }

    let mispredicted = outcome.taken != slot.predicted_taken
        || (outcome.taken && slot.predicted_taken && outcome.target != slot.predicted_target);
    cpu.predictor.update(slot.pc, outcome.taken, outcome.target);

    if !mispredicted {
        return Ok(false);
    }

    // Wrong guess: kill the two younger slots and restart the fetch stream
    // from the resolved path.
    cpu.pc = if outcome.taken {
        outcome.target
    } else {
        slot.pc.wrapping_add(INSTRUCTION_SIZE)
    };
    cpu.stats.control_hazards += 1;
    cpu.stats.control_hazard_stalls += 2;
    cpu.stats.pipeline_flushes += 1;
    cpu.ui.is_flushed = true;
    cpu.logs.record(
        LOG_TRACE,
        format!(
            "pipeline flushed: mispredicted {} at {:#010x}",
            slot.mnemonic, slot.pc
        ),
    );
    Ok(true)
}

/// MEMORY: perform the deferred load or store; RZ defaults to RY.
fn run_memory(cpu: &mut Cpu, slot: &mut InstructionSlot) -> Result<(), SimError> {
    slot.rz = slot.ry;

    if slot.mnemonic.is_load() {
        let (size, signed) = load_shape(slot.mnemonic);
        slot.rz = cpu.data.load(slot.ry, size, signed)?;
    } else if slot.mnemonic.is_store() {
        cpu.data.store(slot.ry, slot.rm, store_width(slot.mnemonic))?;
    }

    cpu.instr_regs.rz = slot.rz;
    cpu.deps.complete(slot.seq, Stage::Memory, slot.rz);

    if cpu.trace {
        eprintln!("MEM pc={:#x} rz={:#x}", slot.pc, slot.rz);
    }
    Ok(())
}

/// WRITEBACK: commit RZ to the register file for the formats that write one.
fn run_writeback(cpu: &mut Cpu, slot: &InstructionSlot) {
    if slot.category.writes_rd() && slot.rd != 0 {
        cpu.regs.write(slot.rd, slot.rz);
    }
    cpu.deps.retire(slot.seq);

    if cpu.trace {
        eprintln!("WB  pc={:#x}", slot.pc);
    }
}

/// Stall decision for a slot attempting EXECUTE.
fn stall_at_execute(
    cpu: &mut Cpu,
    snapshot: &[DependencyRecord],
    slot: &mut InstructionSlot,
    was_stalled: bool,
) -> bool {
    if !cpu.is_pipeline {
        return false;
    }

    if cpu.is_forwarding {
        if hazards::needs_load_use_stall(snapshot, slot) {
            record_data_stall(cpu, slot, was_stalled, "load-use");
            return true;
        }
        // The operands read at DECODE predate any write-back that has
        // happened since (WRITEBACK runs first in the traversal). Re-read
        // the register file, then let still-in-flight producers override.
        read_operands(&cpu.regs, slot);
        if hazards::apply_forwarding(snapshot, slot, cpu.trace) {
            cpu.ui.is_data_forwarded = true;
        }
    } else {
        if hazards::needs_raw_stall(snapshot, slot) {
            record_data_stall(cpu, slot, was_stalled, "RAW");
            return true;
        }
        read_operands(&cpu.regs, slot);
    }
    false
}

/// Stall decision for a slot attempting to leave DECODE.
fn stall_at_decode(
    cpu: &mut Cpu,
    snapshot: &[DependencyRecord],
    slot: &mut InstructionSlot,
    was_stalled: bool,
) -> bool {
    if cpu.is_pipeline && !cpu.is_forwarding && hazards::needs_raw_stall(snapshot, slot) {
        record_data_stall(cpu, slot, was_stalled, "RAW");
        return true;
    }
    false
}

/// Marks a slot stalled in place and accounts for the bubble.
fn record_data_stall(cpu: &mut Cpu, slot: &mut InstructionSlot, was_stalled: bool, kind: &str) {
    if !was_stalled {
        cpu.stats.data_hazards += 1;
    }
    cpu.stats.data_hazard_stalls += 1;
    cpu.stats.stall_bubbles += 1;
    cpu.ui.is_stalled = true;
    slot.stalled = true;
    cpu.logs.record(
        LOG_TRACE,
        format!(
            "{} hazard: {:#010x} stalled in {}",
            kind,
            slot.pc,
            slot.stage.name()
        ),
    );
}

/// Reads the slot's operands from the register file per its format.
fn read_operands(regs: &RegisterFile, slot: &mut InstructionSlot) {
    slot.ra = if slot.category.uses_rs1() {
        regs.read(slot.rs1)
    } else {
        0
    };
    slot.rb = match slot.category {
        Category::R => regs.read(slot.rs2),
        _ => slot.imm as u32,
    };
    slot.rm = if matches!(slot.category, Category::S | Category::SB) {
        regs.read(slot.rs2)
    } else {
        0
    };
}

/// Access width and signedness of a load.
fn load_shape(mnemonic: Mnemonic) -> (u32, bool) {
    match mnemonic {
        Mnemonic::Lb => (1, true),
        Mnemonic::Lh => (2, true),
        _ => (4, false),
    }
}

/// Access width of a store.
fn store_width(mnemonic: Mnemonic) -> u32 {
    match mnemonic {
        Mnemonic::Sb => 1,
        Mnemonic::Sh => 2,
        _ => 4,
    }
}
