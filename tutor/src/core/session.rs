//! Per-problem validation session and the edit boundary.

use std::fmt;

use crate::core::pacing::{SessionId, Ticket};
use crate::core::problem::Problem;
use crate::core::solver::create_expectations;
use crate::core::types::{ColumnExpectation, Operation, Outcome, SlotKind, Status};

/// Where the step validator currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the learner to fill and submit `column`.
    AwaitingInput { column: usize },
    /// `column` passed; the advance to `column + 1` waits on `ticket`.
    Settling { column: usize, ticket: Ticket },
    /// Every column passed.
    Complete,
}

/// Inputs and progress for one problem on the board.
///
/// Sessions are values: every transition returns a new session and leaves the
/// previous one untouched. Expectations are computed once, when the session is
/// created, and never recomputed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationSession {
    pub(crate) id: SessionId,
    pub(crate) problem: Problem,
    pub(crate) expectations: Vec<ColumnExpectation>,
    pub(crate) phase: Phase,
    pub(crate) result_inputs: Vec<String>,
    pub(crate) top_aux: Vec<String>,
    pub(crate) bottom_aux: Vec<String>,
    pub(crate) status: Status,
    pub(crate) last_outcome: Option<Outcome>,
}

/// Rejected edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    ColumnOutOfRange { column: usize, columns: usize },
    NotDigits,
    TooLong { slot: SlotKind, max: usize },
    ReadOnly { slot: SlotKind, column: usize },
    Settling,
    Complete,
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::ColumnOutOfRange { column, columns } => {
                write!(f, "column {} is outside the board (0..{})", column, columns)
            }
            InputError::NotDigits => write!(f, "only digits are allowed"),
            InputError::TooLong { slot, max } => {
                write!(f, "the {} holds at most {} digit(s)", slot.label(), max)
            }
            InputError::ReadOnly { slot, column } => {
                write!(f, "the {} of column {} is not editable now", slot.label(), column)
            }
            InputError::Settling => write!(f, "wait for the next column"),
            InputError::Complete => write!(f, "the problem is already solved"),
        }
    }
}

impl std::error::Error for InputError {}

/// Start a session on `problem`: empty inputs, column 0 active.
pub fn create_session(problem: Problem) -> ValidationSession {
    let columns = problem.columns();
    let expectations = create_expectations(&problem);
    ValidationSession {
        id: SessionId::next(),
        problem,
        expectations,
        phase: Phase::AwaitingInput { column: 0 },
        result_inputs: vec![String::new(); columns],
        top_aux: vec![String::new(); columns],
        bottom_aux: vec![String::new(); columns],
        status: Status::Default,
        last_outcome: None,
    }
}

/// Write `raw` into a slot of the active column.
///
/// The empty string clears the slot. A successful edit resets the status to
/// [`Status::Default`] and never moves the active column.
pub fn set_input(
    session: &ValidationSession,
    slot: SlotKind,
    column: usize,
    raw: &str,
) -> Result<ValidationSession, InputError> {
    match session.phase {
        Phase::Complete => return Err(InputError::Complete),
        Phase::Settling { .. } => return Err(InputError::Settling),
        Phase::AwaitingInput { .. } => {}
    }

    let columns = session.columns();
    if column >= columns {
        return Err(InputError::ColumnOutOfRange { column, columns });
    }
    if !session.is_editable(slot, column) {
        return Err(InputError::ReadOnly { slot, column });
    }
    if !raw.chars().all(|ch| ch.is_ascii_digit()) {
        return Err(InputError::NotDigits);
    }
    if raw.len() > slot.max_len() {
        return Err(InputError::TooLong {
            slot,
            max: slot.max_len(),
        });
    }

    let mut next = session.clone();
    next.slots_mut(slot)[column] = raw.to_string();
    next.status = Status::Default;
    Ok(next)
}

impl ValidationSession {
    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    pub fn expectations(&self) -> &[ColumnExpectation] {
        &self.expectations
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn last_outcome(&self) -> Option<Outcome> {
        self.last_outcome
    }

    pub fn columns(&self) -> usize {
        self.problem.columns()
    }

    /// Index of the active column; equals the column count once complete.
    pub fn active_column(&self) -> usize {
        match self.phase {
            Phase::AwaitingInput { column } | Phase::Settling { column, .. } => column,
            Phase::Complete => self.columns(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Complete
    }

    /// Ticket of the pending advance, if the session is settling.
    pub fn pending_ticket(&self) -> Option<Ticket> {
        match self.phase {
            Phase::Settling { ticket, .. } => Some(ticket),
            _ => None,
        }
    }

    /// Text of a slot. Columns past the board read as empty.
    pub fn input(&self, slot: SlotKind, column: usize) -> &str {
        self.slots(slot).get(column).map_or("", String::as_str)
    }

    /// Status a column should be shown with. Locked columns are always correct.
    pub fn column_status(&self, column: usize) -> Status {
        let active = self.active_column();
        if column < active {
            Status::Correct
        } else if column == active {
            self.status
        } else {
            Status::Default
        }
    }

    /// Whether `slot` of `column` may be edited in the current phase.
    pub fn is_editable(&self, slot: SlotKind, column: usize) -> bool {
        let Phase::AwaitingInput { column: active } = self.phase else {
            return false;
        };
        match (slot, self.problem.operation()) {
            (SlotKind::Result, _) => column == active,
            (SlotKind::TopAux, Operation::Addition) => column == active + 1,
            (SlotKind::TopAux, Operation::Subtraction) => column == active,
            (SlotKind::BottomAux, Operation::Subtraction) => column == active + 1,
            (SlotKind::BottomAux, Operation::Addition) => false,
        }
    }

    fn slots(&self, slot: SlotKind) -> &[String] {
        match slot {
            SlotKind::Result => &self.result_inputs,
            SlotKind::TopAux => &self.top_aux,
            SlotKind::BottomAux => &self.bottom_aux,
        }
    }

    fn slots_mut(&mut self, slot: SlotKind) -> &mut Vec<String> {
        match slot {
            SlotKind::Result => &mut self.result_inputs,
            SlotKind::TopAux => &mut self.top_aux,
            SlotKind::BottomAux => &mut self.bottom_aux,
        }
    }
}
