//! Step validation: gate each column behind its digit and carry/borrow marks.
//!
//! Rules for the active column `c`:
//! - The result slot must hold the expected digit.
//! - Addition: the bubble above column `c + 1` holds the exact carry, or is
//!   blank when there is none.
//! - Subtraction: the bubble on column `c` holds `1` when the column borrows,
//!   and the bottom bubble of column `c + 1` holds that column's bottom digit
//!   plus one. Both are blank when there is no borrow.

use crate::core::pacing::Ticket;
use crate::core::problem::Problem;
use crate::core::session::{Phase, ValidationSession};
use crate::core::types::{Operation, Outcome, SlotKind, Status};

/// Marker the learner writes on a column that borrowed ten.
pub const BORROW_MARK: &str = "1";

/// Submit the active column.
///
/// Failures keep the column active and set [`Status::Error`]. A passing column
/// either settles (more columns remain) or completes the problem. Submitting
/// while settling or complete repeats the last success without changing state.
pub fn submit(session: &ValidationSession) -> (ValidationSession, Outcome) {
    let mut next = session.clone();
    let column = match session.phase {
        Phase::AwaitingInput { column } => column,
        Phase::Settling { .. } => return (next, Outcome::StepCorrect),
        Phase::Complete => return (next, Outcome::ProblemComplete),
    };

    let outcome = match check_column(session, column) {
        Err(failure) => {
            next.status = Status::Error;
            failure
        }
        Ok(()) => {
            next.status = Status::Correct;
            if column + 1 < session.columns() {
                next.phase = Phase::Settling {
                    column,
                    ticket: Ticket {
                        session: session.id,
                        step: column,
                    },
                };
                Outcome::StepCorrect
            } else {
                next.phase = Phase::Complete;
                Outcome::ProblemComplete
            }
        }
    };

    next.last_outcome = Some(outcome);
    (next, outcome)
}

/// Finish a settle delay: move to the next column if `ticket` is still current.
///
/// Returns `None` for a stale ticket (issued by another session, or already used).
pub fn settle(session: &ValidationSession, ticket: Ticket) -> Option<ValidationSession> {
    match session.phase {
        Phase::Settling {
            column,
            ticket: pending,
        } if pending == ticket => {
            let mut next = session.clone();
            next.phase = Phase::AwaitingInput { column: column + 1 };
            next.status = Status::Default;
            next.last_outcome = None;
            Some(next)
        }
        _ => None,
    }
}

/// Check every rule for `column` against the current inputs.
pub(crate) fn check_column(session: &ValidationSession, column: usize) -> Result<(), Outcome> {
    let expected = session.expectations[column];

    let Ok(result) = session.input(SlotKind::Result, column).parse::<u32>() else {
        return Err(Outcome::MissingResult);
    };
    if result != u32::from(expected.result_digit) {
        return Err(Outcome::WrongResult);
    }

    match session.problem.operation() {
        Operation::Addition => {
            let bubble = session.input(SlotKind::TopAux, column + 1);
            if expected.next_carry > 0 {
                if bubble.parse::<u32>().ok() != Some(expected.next_carry) {
                    return Err(Outcome::WrongCarry);
                }
            } else if !is_blank(bubble) {
                return Err(Outcome::SpuriousCarry);
            }
        }
        Operation::Subtraction => {
            let borrowed = expected.next_carry > 0;
            let mark = session.input(SlotKind::TopAux, column);
            if borrowed {
                if mark != BORROW_MARK {
                    return Err(Outcome::BorrowExpected);
                }
            } else if !is_blank(mark) {
                return Err(Outcome::BorrowNotExpected);
            }

            let next_column = column + 1;
            if next_column < session.columns() {
                let adjusted = session.input(SlotKind::BottomAux, next_column);
                if borrowed {
                    let wanted = equal_addition_value(&session.problem, next_column);
                    if adjusted != wanted.to_string() {
                        return Err(Outcome::EqualAdditionMismatch);
                    }
                } else if !is_blank(adjusted) {
                    return Err(Outcome::EqualAdditionSpurious);
                }
            }
        }
    }

    Ok(())
}

/// Bottom digit of `column` after the equal-addition adjustment.
pub fn equal_addition_value(problem: &Problem, column: usize) -> u32 {
    u32::from(problem.bottom_digit(column)) + 1
}

/// Learner-facing message for `outcome` on `column`.
pub fn describe(outcome: Outcome, problem: &Problem, column: usize) -> String {
    match outcome {
        Outcome::MissingResult => "The result is missing.".to_string(),
        Outcome::WrongResult => "That result is not right. Try again.".to_string(),
        Outcome::WrongCarry => {
            "Don't forget the carry! (Above the next column)".to_string()
        }
        Outcome::SpuriousCarry => "There is nothing to carry here.".to_string(),
        Outcome::BorrowExpected => format!(
            "The top digit is smaller, so write a 1 to turn it into 1{}.",
            problem.minuend_digit(column)
        ),
        Outcome::BorrowNotExpected => "No need to borrow here.".to_string(),
        Outcome::EqualAdditionMismatch => format!(
            "Now add 1 to the bottom digit of the next column ({} + 1).",
            problem.bottom_digit(column + 1)
        ),
        Outcome::EqualAdditionSpurious => {
            "Nothing carries over to the next column.".to_string()
        }
        Outcome::StepCorrect => "Well done!".to_string(),
        Outcome::ProblemComplete => "You solved it!".to_string(),
    }
}

/// Message for the current state of the session, if any.
pub fn feedback(session: &ValidationSession) -> Option<String> {
    match session.last_outcome {
        Some(outcome) => {
            let column = session.active_column().min(session.columns() - 1);
            Some(describe(outcome, &session.problem, column))
        }
        None if session.active_column() == 0 => Some("Start from the right!".to_string()),
        None => None,
    }
}

fn is_blank(text: &str) -> bool {
    text.is_empty() || text == "0"
}
