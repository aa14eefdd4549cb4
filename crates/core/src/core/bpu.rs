//! Dynamic Branch Prediction Unit.
//!
//! This module implements the machine's branch predictor:
//! 1. **Pattern History Table:** A per-PC 2-bit saturating counter, initialized
//!    weakly not-taken on first sight.
//! 2. **Branch Target Buffer:** A PC to target map populated the first time a
//!    branch or jump resolves taken.
//! 3. **Accuracy Counters:** Total and correct direction predictions.

use std::collections::HashMap;

/// Counter value a PC starts at: weakly not-taken.
const PHT_DEFAULT: u8 = 0b01;

/// Counter value at or above which a branch predicts taken.
const PHT_TAKEN_THRESHOLD: u8 = 0b10;

/// Saturation ceiling of the 2-bit counter.
const PHT_MAX: u8 = 0b11;

/// Two-level dynamic branch predictor with a target buffer.
#[derive(Clone, Debug, Default)]
pub struct BranchPredictor {
    pht: HashMap<u32, u8>,
    btb: HashMap<u32, u32>,
    /// Total direction predictions scored by `update`.
    pub total_predictions: u64,
    /// Direction predictions that matched the actual outcome.
    pub correct_predictions: u64,
}

impl BranchPredictor {
    /// Creates an empty predictor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Predicts the direction of the control-flow instruction at `pc`.
    ///
    /// A PC never seen before uses the weakly not-taken default.
    pub fn predict(&self, pc: u32) -> bool {
        self.counter(pc) >= PHT_TAKEN_THRESHOLD
    }

    /// True when the target buffer holds an entry for `pc`.
    pub fn is_in_btb(&self, pc: u32) -> bool {
        self.btb.contains_key(&pc)
    }

    /// Looks up the buffered target for `pc`.
    pub fn target(&self, pc: u32) -> Option<u32> {
        self.btb.get(&pc).copied()
    }

    /// Trains the predictor with the resolved outcome of the instruction at `pc`.
    ///
    /// The saturating counter moves toward the actual direction, the target
    /// buffer records the target of a taken resolution, and the accuracy
    /// counters score the direction prediction that was in effect before
    /// this update.
    pub fn update(&mut self, pc: u32, taken: bool, target: u32) {
        let predicted = self.predict(pc);

        let counter = self.counter(pc);
        let trained = if taken {
            (counter + 1).min(PHT_MAX)
        } else {
            counter.saturating_sub(1)
        };
        self.pht.insert(pc, trained);

        if taken {
            self.btb.insert(pc, target);
        }

        self.total_predictions += 1;
        if predicted == taken {
            self.correct_predictions += 1;
        }
    }

    /// Removes all learned state.
    pub fn reset(&mut self) {
        self.pht.clear();
        self.btb.clear();
        self.total_predictions = 0;
        self.correct_predictions = 0;
    }

    fn counter(&self, pc: u32) -> u8 {
        self.pht.get(&pc).copied().unwrap_or(PHT_DEFAULT)
    }
}
