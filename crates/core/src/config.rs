//! Simulator configuration.
//!
//! This module defines the structure that parameterizes a simulator
//! instance. Configuration is supplied as JSON (see the CLI's `--config`)
//! or built in code; `Config::default()` gives the standard environment:
//! pipelined execution with operand forwarding.

use serde::Deserialize;

/// Default configuration constants.
mod defaults {
    /// Safety bound on `run()`: the maximum number of `step()` calls.
    pub const MAX_STEPS: u64 = 1_000_000;

    /// Pipelined execution is the default model.
    pub const PIPELINE: bool = true;

    /// Operand forwarding is enabled by default.
    pub const FORWARDING: bool = true;
}

/// Simulator configuration.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct Config {
    /// Five-stage pipelined execution; single instruction in flight when false.
    pub pipeline: bool,
    /// Operand forwarding at EXECUTE (meaningful only when pipelined).
    pub forwarding: bool,
    /// Maximum `step()` calls a single `run()` may make.
    pub max_steps: u64,
    /// Emit per-cycle trace lines to stderr.
    pub trace: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pipeline: defaults::PIPELINE,
            forwarding: defaults::FORWARDING,
            max_steps: defaults::MAX_STEPS,
            trace: false,
        }
    }
}
