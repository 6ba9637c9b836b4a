//! Session invariants checked by tests and debug tooling.

use crate::core::session::{Phase, ValidationSession};
use crate::core::validator::check_column;

/// Check structural invariants of a session:
/// - One expectation and one slot of each kind per column
/// - Active column within `0..=columns`
/// - Every column left of the active one still passes its validation rules
pub fn validate_session_invariants(session: &ValidationSession) -> Vec<String> {
    let mut errors = Vec::new();
    let columns = session.columns();

    if session.expectations.len() != columns {
        errors.push(format!(
            "expected {} expectations, found {}",
            columns,
            session.expectations.len()
        ));
    }
    for (name, slots) in [
        ("result", &session.result_inputs),
        ("top_aux", &session.top_aux),
        ("bottom_aux", &session.bottom_aux),
    ] {
        if slots.len() != columns {
            errors.push(format!(
                "{} slots: expected {}, found {}",
                name,
                columns,
                slots.len()
            ));
        }
    }
    if !errors.is_empty() {
        return errors;
    }

    let active = session.active_column();
    if let Phase::AwaitingInput { column } | Phase::Settling { column, .. } = session.phase
        && column >= columns
    {
        errors.push(format!("active column {} outside board of {}", column, columns));
        return errors;
    }

    for column in 0..active {
        if let Err(outcome) = check_column(session, column) {
            errors.push(format!(
                "column {}: locked inputs no longer validate ({:?})",
                column, outcome
            ));
        }
    }

    if let Phase::Settling { column, ticket } = session.phase {
        if ticket.session != session.id {
            errors.push("settle ticket issued by another session".to_string());
        }
        if let Err(outcome) = check_column(session, column) {
            errors.push(format!(
                "column {}: settling but inputs fail ({:?})",
                column, outcome
            ));
        }
    }

    errors
}
