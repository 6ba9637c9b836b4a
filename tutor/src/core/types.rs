//! Shared deterministic types for the arithmetic core.
//!
//! These types define stable contracts between the solver, the step validator
//! and the presentation layer. They carry no I/O and serialize with stable
//! names so front ends can log or export them.

use serde::{Deserialize, Serialize};

/// Default number of columns on a board: five operand digits plus one for a
/// final carry.
pub const DEFAULT_COLUMNS: usize = 6;

/// Largest supported board. Ten to the eighteenth still fits in a `u64`.
pub const MAX_COLUMNS: usize = 18;

/// Arithmetic operation taught on a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Operation {
    Addition,
    Subtraction,
}

impl Operation {
    pub fn symbol(self) -> char {
        match self {
            Operation::Addition => '+',
            Operation::Subtraction => '-',
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Operation::Addition => "addition",
            Operation::Subtraction => "subtraction",
        }
    }
}

/// Expected values for one column, derived from the problem and carry chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnExpectation {
    /// Correct digit for the column (0–9).
    pub result_digit: u8,
    /// Carry (addition) or borrow (subtraction) passed to the next column.
    ///
    /// Addition with three or more addends can produce values above 1.
    pub next_carry: u32,
}

/// Input slot kinds on a board column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotKind {
    /// Main result digit under the line.
    Result,
    /// Bubble above the column: carry (addition) or borrow mark (subtraction).
    TopAux,
    /// Bubble below the subtrahend: equal-addition adjustment (subtraction).
    BottomAux,
}

impl SlotKind {
    /// Longest accepted text for the slot.
    pub fn max_len(self) -> usize {
        match self {
            SlotKind::Result => 1,
            SlotKind::TopAux | SlotKind::BottomAux => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SlotKind::Result => "result",
            SlotKind::TopAux => "top bubble",
            SlotKind::BottomAux => "bottom bubble",
        }
    }
}

/// Transient presentation status of the active column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Default,
    Error,
    Correct,
}

/// Result of a single `submit` on a board.
///
/// Every variant is an expected, recoverable, learner-facing result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    MissingResult,
    WrongResult,
    WrongCarry,
    SpuriousCarry,
    BorrowExpected,
    BorrowNotExpected,
    EqualAdditionMismatch,
    EqualAdditionSpurious,
    StepCorrect,
    ProblemComplete,
}
