use std::collections::HashMap;

use rv32sim_core::common::constants::{INSTRUCTION_SIZE, NUM_REGISTERS, TEXT_SEGMENT_START};
use rv32sim_core::config::Config;
use rv32sim_core::sim::loader::ProgramImage;
use rv32sim_core::Simulator;

/// Safety bound for test runs; real scenarios finish in far fewer cycles.
pub const TEST_STEP_LIMIT: u64 = 10_000;

pub struct TestContext {
    pub sim: Simulator,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        Self {
            sim: Simulator::with_config(config),
        }
    }

    /// A context using the pipelined model with the given forwarding setting.
    pub fn pipelined(forwarding: bool) -> Self {
        Self::with_config(Config {
            pipeline: true,
            forwarding,
            ..Config::default()
        })
    }

    /// A context using the single-instruction (non-pipelined) model.
    pub fn non_pipelined() -> Self {
        Self::with_config(Config {
            pipeline: false,
            forwarding: false,
            ..Config::default()
        })
    }

    /// Loads a sequence of words as the code image starting at the text base.
    pub fn load_words(&mut self, words: &[u32]) -> bool {
        let image: ProgramImage = words
            .iter()
            .enumerate()
            .map(|(i, &word)| (TEXT_SEGMENT_START + (i as u32) * INSTRUCTION_SIZE, word))
            .collect();
        self.sim.load_image(&image)
    }

    /// Steps until the program terminates, panicking past the safety bound.
    pub fn run_to_completion(&mut self) {
        for _ in 0..TEST_STEP_LIMIT {
            if !self.sim.step() {
                return;
            }
        }
        panic!("program did not terminate within {} steps", TEST_STEP_LIMIT);
    }

    pub fn step(&mut self) -> bool {
        self.sim.step()
    }

    pub fn reg(&self, idx: usize) -> u32 {
        self.sim.registers()[idx]
    }

    pub fn registers(&self) -> [u32; NUM_REGISTERS] {
        self.sim.registers()
    }

    pub fn data_map(&self) -> HashMap<u32, u8> {
        self.sim.data_map()
    }
}

/// Loads `words`, runs to completion, and returns the finished context.
pub fn run_program(words: &[u32], pipeline: bool, forwarding: bool) -> TestContext {
    let mut ctx = TestContext::with_config(Config {
        pipeline,
        forwarding,
        ..Config::default()
    });
    assert!(ctx.load_words(words), "program image failed to load");
    ctx.run_to_completion();
    ctx
}
