//! Problem generation for boards and drills.

use anyhow::{Context, Result};
use rand::Rng;
use tracing::debug;

use crate::core::problem::Problem;
use crate::core::training::{TrainingMode, TrainingProblem, training_problem};
use crate::core::types::Operation;
use crate::io::config::GeneratorConfig;

/// Supplies new problems to the app.
pub trait ProblemSource {
    /// Produce a board problem for `operation` laid out on `columns` columns.
    fn problem(&mut self, operation: Operation, columns: usize) -> Result<Problem>;

    /// Produce the next drill question for `mode`.
    fn training(&mut self, mode: TrainingMode) -> TrainingProblem;
}

/// Random problems within configured bounds.
pub struct RandomSource<R: Rng> {
    rng: R,
    bounds: GeneratorConfig,
}

impl<R: Rng> RandomSource<R> {
    pub fn new(rng: R, bounds: GeneratorConfig) -> Self {
        Self { rng, bounds }
    }
}

impl RandomSource<rand::rngs::ThreadRng> {
    pub fn from_thread_rng(bounds: GeneratorConfig) -> Self {
        Self::new(rand::thread_rng(), bounds)
    }
}

impl<R: Rng> ProblemSource for RandomSource<R> {
    fn problem(&mut self, operation: Operation, columns: usize) -> Result<Problem> {
        let bounds = &self.bounds;
        let operands = match operation {
            Operation::Addition => {
                let count = self.rng.gen_range(bounds.min_addends..=bounds.max_addends);
                (0..count)
                    .map(|_| self.rng.gen_range(bounds.operand_min..=bounds.operand_max))
                    .collect()
            }
            Operation::Subtraction => {
                let minuend = self.rng.gen_range(bounds.minuend_min..=bounds.operand_max);
                let subtrahend = self
                    .rng
                    .gen_range(bounds.operand_min..=minuend - bounds.min_difference);
                vec![minuend, subtrahend]
            }
        };
        debug!(operation = operation.label(), ?operands, "generated problem");
        Problem::with_columns(operation, operands, columns).context("generated problem")
    }

    fn training(&mut self, mode: TrainingMode) -> TrainingProblem {
        match mode {
            TrainingMode::Doubles => training_problem(mode, self.rng.gen_range(1..=10), 0),
            TrainingMode::Complements10 => training_problem(mode, self.rng.gen_range(1..=9), 0),
            TrainingMode::Bridge10 => {
                let start = self.rng.gen_range(5..=9);
                let end = self.rng.gen_range(11..=19);
                training_problem(mode, start, end)
            }
        }
    }
}
