//! Five-stage in-order pipeline: slots, dependencies, hazards, and the
//! cycle controller.

/// The per-cycle advancement algorithm.
pub mod controller;
/// In-flight register dependency table.
pub mod deps;
/// Hazard detection and operand forwarding.
pub mod hazards;
/// Stage identities and instruction slots.
pub mod slot;

pub use slot::{InstructionSlot, Stage, STAGE_COUNT};
