//! Test-only helpers for building problems, filling boards and scripting sources.

use std::collections::VecDeque;

use crate::core::problem::Problem;
use crate::core::session::{Phase, ValidationSession, set_input};
use crate::core::training::{TrainingMode, TrainingProblem, training_problem};
use crate::core::types::{DEFAULT_COLUMNS, Operation, SlotKind};
use crate::core::validator::{BORROW_MARK, equal_addition_value};
use crate::generator::ProblemSource;

/// Addition on the default board. Panics on malformed operands.
pub fn addition(operands: &[u64]) -> Problem {
    addition_on(operands, DEFAULT_COLUMNS)
}

/// Addition on a board with `columns` columns.
pub fn addition_on(operands: &[u64], columns: usize) -> Problem {
    Problem::with_columns(Operation::Addition, operands.to_vec(), columns)
        .expect("valid addition")
}

/// Subtraction on the default board.
pub fn subtraction(minuend: u64, subtrahend: u64) -> Problem {
    subtraction_on(minuend, subtrahend, DEFAULT_COLUMNS)
}

/// Subtraction on a board with `columns` columns.
pub fn subtraction_on(minuend: u64, subtrahend: u64, columns: usize) -> Problem {
    Problem::with_columns(Operation::Subtraction, vec![minuend, subtrahend], columns)
        .expect("valid subtraction")
}

/// Apply a list of `(slot, column, text)` edits, panicking on rejection.
pub fn fill(session: &ValidationSession, edits: &[(SlotKind, usize, &str)]) -> ValidationSession {
    edits.iter().fold(session.clone(), |acc, (slot, column, raw)| {
        set_input(&acc, *slot, *column, raw).expect("edit accepted")
    })
}

/// Enter the correct digit and marks for the active column.
///
/// Returns the session unchanged unless it is awaiting input.
pub fn solve_column_inputs(session: &ValidationSession) -> ValidationSession {
    let Phase::AwaitingInput { column } = session.phase() else {
        return session.clone();
    };
    let expected = session.expectations()[column];
    let digit = expected.result_digit.to_string();
    let next = column + 1;
    let has_next = next < session.columns();
    let mut edits: Vec<(SlotKind, usize, String)> = vec![(SlotKind::Result, column, digit)];

    match session.problem().operation() {
        Operation::Addition => {
            if has_next {
                let carry = if expected.next_carry > 0 {
                    expected.next_carry.to_string()
                } else {
                    String::new()
                };
                edits.push((SlotKind::TopAux, next, carry));
            }
        }
        Operation::Subtraction => {
            let borrowed = expected.next_carry > 0;
            let mark = if borrowed { BORROW_MARK } else { "" };
            edits.push((SlotKind::TopAux, column, mark.to_string()));
            if has_next {
                let adjusted = if borrowed {
                    equal_addition_value(session.problem(), next).to_string()
                } else {
                    String::new()
                };
                edits.push((SlotKind::BottomAux, next, adjusted));
            }
        }
    }

    let borrowed: Vec<(SlotKind, usize, &str)> = edits
        .iter()
        .map(|(slot, column, raw)| (*slot, *column, raw.as_str()))
        .collect();
    fill(session, &borrowed)
}

/// Problem source that replays scripted operands and training problems in order.
///
/// Falls back to fixed problems when a script runs out.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    boards: VecDeque<Vec<u64>>,
    drills: VecDeque<(TrainingMode, u32, u32)>,
}

impl ScriptedSource {
    pub fn new(boards: Vec<Vec<u64>>) -> Self {
        Self {
            boards: boards.into(),
            drills: VecDeque::new(),
        }
    }

    /// Queue training problems as `(mode, a, b)` number pairs.
    pub fn with_drills(mut self, drills: Vec<(TrainingMode, u32, u32)>) -> Self {
        self.drills = drills.into();
        self
    }
}

impl ProblemSource for ScriptedSource {
    fn problem(&mut self, operation: Operation, columns: usize) -> anyhow::Result<Problem> {
        let operands = self.boards.pop_front().unwrap_or_else(|| match operation {
            Operation::Addition => vec![48, 37],
            Operation::Subtraction => vec![52, 48],
        });
        Ok(Problem::with_columns(operation, operands, columns)?)
    }

    fn training(&mut self, mode: TrainingMode) -> TrainingProblem {
        match self.drills.pop_front() {
            Some((scripted, a, b)) => training_problem(scripted, a, b),
            None => training_problem(mode, 7, 13),
        }
    }
}
