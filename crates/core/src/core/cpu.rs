//! CPU State.
//!
//! This module defines the single owner of all architectural and
//! microarchitectural state: register file, program counter, memory images,
//! the five pipeline slots, the dependency table, the branch predictor,
//! statistics, and the log channel. All mutation happens from the pipeline
//! controller, one cycle per call; the engine is strictly sequential.

use crate::common::constants::TEXT_SEGMENT_START;
use crate::common::logs::LogChannel;
use crate::config::Config;
use crate::core::bpu::BranchPredictor;
use crate::core::memory::{CodeStore, DataStore};
use crate::core::pipeline::deps::DependencyTable;
use crate::core::pipeline::slot::{InstructionSlot, Stage, STAGE_COUNT};
use crate::core::regfile::RegisterFile;
use crate::stats::SimStats;

/// Observable stage-transfer registers.
///
/// These mirror the most recent stage activity for display: the operands
/// resolved at DECODE/EXECUTE and the results of EXECUTE and MEMORY.
#[derive(Clone, Copy, Debug, Default)]
pub struct InstructionRegisters {
    /// First operand.
    pub ra: u32,
    /// Second operand.
    pub rb: u32,
    /// Compare/store operand.
    pub rm: u32,
    /// EXECUTE result.
    pub ry: u32,
    /// MEMORY result.
    pub rz: u32,
}

/// Per-cycle condition flags for the presentation layer.
#[derive(Clone, Copy, Debug, Default)]
pub struct UiResponse {
    /// A stall was inserted this cycle.
    pub is_stalled: bool,
    /// A misprediction flush occurred this cycle.
    pub is_flushed: bool,
    /// At least one operand was forwarded this cycle.
    pub is_data_forwarded: bool,
    /// The program has terminated (end of code or fatal fault).
    pub is_program_terminated: bool,
}

/// Complete machine state.
pub struct Cpu {
    /// Architectural integer registers.
    pub regs: RegisterFile,
    /// Program counter for the next fetch.
    pub pc: u32,
    /// Code image with disassembly, read-only during execution.
    pub code: CodeStore,
    /// Sparse byte-addressable data image.
    pub data: DataStore,
    /// One slot per stage, indexed by `Stage::index`.
    pub pipeline: [Option<InstructionSlot>; STAGE_COUNT],
    /// In-flight register writers.
    pub deps: DependencyTable,
    /// Dynamic branch predictor state.
    pub predictor: BranchPredictor,
    /// Observable stage-transfer registers.
    pub instr_regs: InstructionRegisters,
    /// Running statistics totals.
    pub stats: SimStats,
    /// Severity-coded log channel.
    pub logs: LogChannel,
    /// Per-cycle condition flags.
    pub ui: UiResponse,
    /// False once execution has drained or faulted.
    pub running: bool,
    /// Five-stage pipelined execution when set; one instruction in flight
    /// at a time otherwise.
    pub is_pipeline: bool,
    /// Operand forwarding at EXECUTE when set (pipelined mode only).
    pub is_forwarding: bool,
    /// Emit per-cycle trace lines to stderr.
    pub trace: bool,
    /// Next in-flight sequence number to hand out.
    next_seq: u64,
}

impl Cpu {
    /// Creates a machine in reset state with the given configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            regs: RegisterFile::new(),
            pc: TEXT_SEGMENT_START,
            code: CodeStore::new(),
            data: DataStore::new(),
            pipeline: Default::default(),
            deps: DependencyTable::new(),
            predictor: BranchPredictor::new(),
            instr_regs: InstructionRegisters::default(),
            stats: SimStats::default(),
            logs: LogChannel::new(),
            ui: UiResponse::default(),
            running: false,
            is_pipeline: config.pipeline,
            is_forwarding: config.forwarding,
            trace: config.trace,
            next_seq: 0,
        }
    }

    /// Creates a fetch slot for the current PC with a fresh sequence number.
    pub fn schedule_fetch(&mut self) -> InstructionSlot {
        let mut slot = InstructionSlot::pending(self.pc);
        slot.seq = self.next_seq;
        self.next_seq += 1;
        slot
    }

    /// Clears all state back to reset, preserving the execution-model flags.
    pub fn reset(&mut self) {
        self.regs.reset();
        self.pc = TEXT_SEGMENT_START;
        self.code.clear();
        self.data.clear();
        self.pipeline = Default::default();
        self.deps.clear();
        self.predictor.reset();
        self.instr_regs = InstructionRegisters::default();
        self.stats = SimStats::default();
        self.logs.clear();
        self.ui = UiResponse::default();
        self.running = false;
        self.next_seq = 0;
    }

    /// True when no stage holds a slot.
    pub fn pipeline_is_empty(&self) -> bool {
        self.pipeline.iter().all(|slot| slot.is_none())
    }

    /// Occupancy and PC of every stage, for display.
    pub fn active_stages(&self) -> [(Stage, bool, u32); STAGE_COUNT] {
        let mut stages = [
            (Stage::Fetch, false, 0),
            (Stage::Decode, false, 0),
            (Stage::Execute, false, 0),
            (Stage::Memory, false, 0),
            (Stage::Writeback, false, 0),
        ];
        for entry in stages.iter_mut() {
            if let Some(slot) = &self.pipeline[entry.0.index()] {
                entry.1 = true;
                entry.2 = slot.pc;
            }
        }
        stages
    }
}
