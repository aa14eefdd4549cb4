//! Simulator Façade.
//!
//! The single entry point the presentation layer talks to. It owns the CPU,
//! routes source text through the external assembler collaborator, steps or
//! runs the machine, and exposes every observable snapshot: PC, registers,
//! memory images, stage occupancy, stage-transfer registers, statistics,
//! logs, and the per-cycle condition flags.

use std::collections::{BTreeMap, HashMap};

use crate::common::constants::{NUM_REGISTERS, TEXT_SEGMENT_START};
use crate::common::error::SimError;
use crate::common::logs::{LOG_FATAL, LOG_SUCCESS, LOG_TRACE, LOG_WARNING};
use crate::config::Config;
use crate::core::cpu::{Cpu, InstructionRegisters, UiResponse};
use crate::core::pipeline::controller;
use crate::core::pipeline::slot::{Stage, STAGE_COUNT};
use crate::sim::loader::{install_image, ProgramImage};
use crate::stats::SimStats;

/// External assembler collaborator.
///
/// Lexing, parsing, label resolution, and machine-code emission live outside
/// the engine; the engine only consumes the resulting (address, value) image.
pub trait Assembler {
    /// Translates source text into a prepared program image.
    fn assemble(&self, source: &str) -> Result<ProgramImage, SimError>;
}

/// The simulator: machine state plus the assembler seam.
pub struct Simulator {
    cpu: Cpu,
    config: Config,
    assembler: Option<Box<dyn Assembler>>,
}

impl Simulator {
    /// Creates a simulator with the default configuration.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates a simulator with an explicit configuration.
    pub fn with_config(config: Config) -> Self {
        Self {
            cpu: Cpu::new(&config),
            config,
            assembler: None,
        }
    }

    /// Installs the external assembler collaborator.
    pub fn set_assembler(&mut self, assembler: Box<dyn Assembler>) {
        self.assembler = Some(assembler);
    }

    /// Selects the execution model.
    ///
    /// Safe only before `load_program` or after `reset`; changing the model
    /// mid-run leaves in-flight state inconsistent.
    pub fn set_environment(&mut self, pipeline: bool, forwarding: bool) {
        self.config.pipeline = pipeline;
        self.config.forwarding = forwarding;
        self.cpu.is_pipeline = pipeline;
        self.cpu.is_forwarding = forwarding;
    }

    /// Assembles source text via the collaborator and loads the result.
    ///
    /// Returns `false` (with a log entry) when no assembler is installed,
    /// the source fails to assemble, or the image is empty.
    pub fn load_program(&mut self, source: &str) -> bool {
        let Some(assembler) = self.assembler.as_ref() else {
            self.cpu
                .logs
                .record(LOG_FATAL, "no assembler collaborator installed");
            return false;
        };
        match assembler.assemble(source) {
            Ok(image) => self.load_image(&image),
            Err(e) => {
                self.cpu.logs.record(LOG_FATAL, e.to_string());
                false
            }
        }
    }

    /// Loads a prepared program image and seeds the first fetch.
    ///
    /// All machine state is reset; the pipeline/forwarding environment
    /// survives the reload.
    pub fn load_image(&mut self, image: &ProgramImage) -> bool {
        self.reset();

        if image.is_empty() {
            self.cpu.logs.record(LOG_TRACE, "empty program");
            return false;
        }
        if let Err(e) = install_image(&mut self.cpu, image) {
            self.cpu.logs.record(LOG_FATAL, e.to_string());
            self.cpu.code.clear();
            self.cpu.data.clear();
            return false;
        }

        self.cpu.pc = TEXT_SEGMENT_START;
        self.cpu.running = true;
        let first_fetch = self.cpu.schedule_fetch();
        self.cpu.pipeline[Stage::Fetch.index()] = Some(first_fetch);
        self.cpu
            .logs
            .record(LOG_SUCCESS, "program loaded successfully");
        true
    }

    /// Advances one cycle. Returns whether the program continues.
    pub fn step(&mut self) -> bool {
        if !self.cpu.running && self.cpu.pipeline_is_empty() {
            self.cpu
                .logs
                .record(LOG_FATAL, "cannot step - simulator is not running");
            return false;
        }

        if let Err(e) = controller::advance_cycle(&mut self.cpu) {
            self.cpu
                .logs
                .record(LOG_FATAL, format!("runtime error during step: {}", e));
            self.cpu.running = false;
            self.cpu.pipeline = Default::default();
            self.cpu.deps.clear();
            self.cpu.ui.is_program_terminated = true;
            return false;
        }

        if !self.cpu.running && self.cpu.pipeline_is_empty() {
            self.cpu.ui.is_program_terminated = true;
            return false;
        }
        true
    }

    /// Steps until termination or the configured step limit.
    pub fn run(&mut self) {
        if !self.cpu.running && self.cpu.pipeline_is_empty() {
            self.cpu
                .logs
                .record(LOG_FATAL, "cannot run - simulator is not running");
            return;
        }

        let mut steps: u64 = 0;
        while self.step() {
            steps += 1;
            if steps >= self.config.max_steps {
                self.cpu.logs.record(
                    LOG_WARNING,
                    format!(
                        "program execution halted: {}",
                        SimError::StepLimit(self.config.max_steps)
                    ),
                );
                break;
            }
        }

        self.cpu.logs.record(
            LOG_SUCCESS,
            format!(
                "simulation completed: {} clock cycles, {} steps",
                self.cpu.stats.total_cycles, steps
            ),
        );
    }

    /// Clears all machine state, preserving the execution environment.
    pub fn reset(&mut self) {
        self.cpu.reset();
    }

    /// True while the machine can still make progress.
    pub fn is_running(&self) -> bool {
        self.cpu.running
    }

    /// Current program counter.
    pub fn pc(&self) -> u32 {
        self.cpu.pc
    }

    /// Copy of all 32 registers.
    pub fn registers(&self) -> [u32; NUM_REGISTERS] {
        self.cpu.regs.snapshot()
    }

    /// Total stall bubbles inserted so far.
    pub fn stalls(&self) -> u64 {
        self.cpu.stats.stall_bubbles
    }

    /// Total cycles elapsed so far.
    pub fn cycles(&self) -> u64 {
        self.cpu.stats.total_cycles
    }

    /// Occupancy and PC per stage.
    pub fn active_stages(&self) -> [(Stage, bool, u32); STAGE_COUNT] {
        self.cpu.active_stages()
    }

    /// Copy of the populated data bytes.
    pub fn data_map(&self) -> HashMap<u32, u8> {
        self.cpu.data.snapshot()
    }

    /// Copy of the code image with disassembly.
    pub fn text_map(&self) -> BTreeMap<u32, (u32, String)> {
        self.cpu.code.snapshot()
    }

    /// Observable stage-transfer registers (RA/RB/RM/RY/RZ).
    pub fn instruction_registers(&self) -> InstructionRegisters {
        self.cpu.instr_regs
    }

    /// Running statistics totals.
    pub fn stats(&self) -> &SimStats {
        &self.cpu.stats
    }

    /// Per-cycle condition flags for the presentation layer.
    pub fn ui_response(&self) -> UiResponse {
        self.cpu.ui
    }

    /// Drains and returns all pending log messages.
    pub fn logs(&mut self) -> BTreeMap<u16, String> {
        self.cpu.logs.drain()
    }

    /// Direct access to the machine state, for tests and tooling.
    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new()
    }
}
