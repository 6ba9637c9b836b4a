//! Immutable problem values and their validating constructor.

use std::fmt;

use serde::Serialize;

use crate::core::types::{DEFAULT_COLUMNS, MAX_COLUMNS, Operation};

/// Fewest addends the engine accepts. Generated problems use three or four.
pub const MIN_ADDENDS: usize = 2;
/// Most addends the engine accepts.
pub const MAX_ADDENDS: usize = 4;

/// An addition or subtraction laid out on a fixed number of columns.
///
/// Only constructed through [`Problem::new`] or [`Problem::with_columns`], so a
/// value of this type always satisfies the problem invariants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Problem {
    operation: Operation,
    operands: Vec<u64>,
    expected_result: u64,
    columns: usize,
}

/// A problem that violates the operand, result, or capacity rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedProblem {
    pub violations: Vec<String>,
}

impl fmt::Display for MalformedProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "malformed problem:\n- {}", self.violations.join("\n- "))
    }
}

impl std::error::Error for MalformedProblem {}

impl Problem {
    /// Build a problem on the default six-column board.
    pub fn new(operation: Operation, operands: Vec<u64>) -> Result<Self, MalformedProblem> {
        Self::with_columns(operation, operands, DEFAULT_COLUMNS)
    }

    /// Build a problem on a board with `columns` columns.
    pub fn with_columns(
        operation: Operation,
        operands: Vec<u64>,
        columns: usize,
    ) -> Result<Self, MalformedProblem> {
        let mut violations = Vec::new();
        check_shape(operation, &operands, columns, &mut violations);

        let expected_result = match arithmetic_result(operation, &operands) {
            Some(value) => value,
            None => {
                match (operation, operands.as_slice()) {
                    (Operation::Subtraction, [minuend, subtrahend]) => violations.push(format!(
                        "subtraction result is negative ({} - {})",
                        minuend, subtrahend
                    )),
                    (Operation::Addition, _) => violations.push("sum overflows u64".to_string()),
                    _ => {}
                }
                0
            }
        };

        if violations.is_empty() && !fits_columns(expected_result, columns) {
            violations.push(format!(
                "result {} does not fit in {} columns",
                expected_result, columns
            ));
        }

        if !violations.is_empty() {
            return Err(MalformedProblem { violations });
        }

        Ok(Self {
            operation,
            operands,
            expected_result,
            columns,
        })
    }

    /// Build a problem whose result was computed by an external generator.
    ///
    /// The supplied result must match the arithmetic result of the operands.
    pub fn with_expected_result(
        operation: Operation,
        operands: Vec<u64>,
        expected_result: u64,
        columns: usize,
    ) -> Result<Self, MalformedProblem> {
        let problem = Self::with_columns(operation, operands, columns)?;
        if problem.expected_result != expected_result {
            return Err(MalformedProblem {
                violations: vec![format!(
                    "expected result {} does not match computed result {}",
                    expected_result, problem.expected_result
                )],
            });
        }
        Ok(problem)
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn operands(&self) -> &[u64] {
        &self.operands
    }

    pub fn expected_result(&self) -> u64 {
        self.expected_result
    }

    /// Column capacity (K) of the board this problem is laid out on.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Digit of operand `index` at `column`, zero beyond its natural width.
    pub fn digit(&self, index: usize, column: usize) -> u8 {
        self.operands
            .get(index)
            .map_or(0, |value| digit_at(*value, column))
    }

    /// Top row digit for subtraction (the minuend).
    pub fn minuend_digit(&self, column: usize) -> u8 {
        self.digit(0, column)
    }

    /// Bottom row digit: the last operand (subtrahend for subtraction).
    pub fn bottom_digit(&self, column: usize) -> u8 {
        self.digit(self.operands.len().saturating_sub(1), column)
    }
}

/// Digit of `value` at `column` (0 is the units column).
pub fn digit_at(value: u64, column: usize) -> u8 {
    let Ok(exp) = u32::try_from(column) else {
        return 0;
    };
    match 10u64.checked_pow(exp) {
        Some(place) => ((value / place) % 10) as u8,
        None => 0,
    }
}

fn fits_columns(value: u64, columns: usize) -> bool {
    match u32::try_from(columns).ok().and_then(|c| 10u64.checked_pow(c)) {
        Some(limit) => value < limit,
        None => true,
    }
}

fn check_shape(operation: Operation, operands: &[u64], columns: usize, errors: &mut Vec<String>) {
    if columns == 0 || columns > MAX_COLUMNS {
        errors.push(format!(
            "columns must be between 1 and {} (got {})",
            MAX_COLUMNS, columns
        ));
    }

    match operation {
        Operation::Addition => {
            if !(MIN_ADDENDS..=MAX_ADDENDS).contains(&operands.len()) {
                errors.push(format!(
                    "addition needs {}-{} operands (got {})",
                    MIN_ADDENDS,
                    MAX_ADDENDS,
                    operands.len()
                ));
            }
        }
        Operation::Subtraction => {
            if operands.len() != 2 {
                errors.push(format!(
                    "subtraction needs exactly 2 operands (got {})",
                    operands.len()
                ));
            }
        }
    }

    if (1..=MAX_COLUMNS).contains(&columns) {
        for (index, operand) in operands.iter().enumerate() {
            if !fits_columns(*operand, columns) {
                errors.push(format!(
                    "operand[{}] = {} does not fit in {} columns",
                    index, operand, columns
                ));
            }
        }
    }
}

fn arithmetic_result(operation: Operation, operands: &[u64]) -> Option<u64> {
    match operation {
        Operation::Addition => operands
            .iter()
            .try_fold(0u64, |acc, value| acc.checked_add(*value)),
        Operation::Subtraction => match operands {
            [minuend, subtrahend] => minuend.checked_sub(*subtrahend),
            _ => None,
        },
    }
}
