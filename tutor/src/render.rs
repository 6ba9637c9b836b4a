//! Plain-text rendering of boards and drills.
//!
//! Columns print left to right from the most significant one down to the
//! units column, three characters per column.

use std::fmt::Write as _;

use crate::core::session::ValidationSession;
use crate::core::training::TrainingSession;
use crate::core::types::{Operation, SlotKind, Status};
use crate::core::validator::feedback;

const CELL: usize = 3;

/// Render a board: bubbles, operands, the line, results and the active marker.
pub fn render_board(session: &ValidationSession) -> String {
    let problem = session.problem();
    let columns = session.columns();
    let operands = problem.operands();
    let mut lines = Vec::new();

    lines.push(row("  ", columns, |column| {
        session.input(SlotKind::TopAux, column).to_string()
    }));
    for (index, &value) in operands.iter().enumerate() {
        let prefix = if index + 1 == operands.len() {
            format!("{} ", problem.operation().symbol())
        } else {
            "  ".to_string()
        };
        lines.push(row(&prefix, columns, |column| {
            if column < digit_count(value) {
                problem.digit(index, column).to_string()
            } else {
                String::new()
            }
        }));
    }
    if problem.operation() == Operation::Subtraction {
        lines.push(row("  ", columns, |column| {
            session.input(SlotKind::BottomAux, column).to_string()
        }));
    }
    lines.push(format!("  {}", "-".repeat(columns * CELL)));

    let active = session.active_column();
    lines.push(row("  ", columns, |column| {
        let text = session.input(SlotKind::Result, column);
        if text.is_empty() && column == active {
            "_".to_string()
        } else {
            text.to_string()
        }
    }));
    if !session.is_complete() {
        lines.push(row("  ", columns, |column| {
            if column == active {
                "^".to_string()
            } else {
                String::new()
            }
        }));
    }
    if let Some(message) = feedback(session) {
        lines.push(status_line(session.status(), &message));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Render a drill question with the typed answer.
pub fn render_training(session: &TrainingSession) -> String {
    let problem = session.problem();
    let mut out = String::new();
    let _ = writeln!(out, "{} (#{})", problem.mode.title(), session.answered() + 1);
    let _ = writeln!(out, "  {} {}_", problem.question_text, session.input());
    let message = match session.status() {
        Status::Correct => Some("Correct!"),
        Status::Error => Some("Try again!"),
        Status::Default => None,
    };
    if let Some(message) = message {
        let _ = writeln!(out, "{}", status_line(session.status(), message));
    }
    out
}

fn status_line(status: Status, message: &str) -> String {
    match status {
        Status::Default => message.to_string(),
        Status::Error => format!("x {message}"),
        Status::Correct => format!("ok {message}"),
    }
}

fn row(prefix: &str, columns: usize, cell: impl Fn(usize) -> String) -> String {
    let mut line = prefix.to_string();
    for column in (0..columns).rev() {
        let _ = write!(line, "{:>width$}", cell(column), width = CELL);
    }
    line.trim_end().to_string()
}

fn digit_count(value: u64) -> usize {
    value.checked_ilog10().map_or(1, |log| log as usize + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::session::create_session;
    use crate::core::training::{TrainingMode, training_problem};
    use crate::core::validator::submit;
    use crate::test_support::{addition_on, fill, subtraction_on};

    #[test]
    fn fresh_addition_board() {
        let session = create_session(addition_on(&[48, 37], 2));
        let rendered = render_board(&session);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(
            lines,
            vec![
                "",
                "    4  8",
                "+   3  7",
                "  ------",
                "       _",
                "       ^",
                "Start from the right!",
            ]
        );
    }

    /// Short operands leave their high columns blank.
    #[test]
    fn pads_short_operands() {
        let session = create_session(addition_on(&[5, 120], 4));
        let rendered = render_board(&session);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[1], "             5");
        assert_eq!(lines[2], "+      1  2  0");
    }

    #[test]
    fn subtraction_shows_bubbles_and_error() {
        let session = create_session(subtraction_on(52, 48, 2));
        let session = fill(
            &session,
            &[
                (SlotKind::Result, 0, "4"),
                (SlotKind::TopAux, 0, "1"),
                (SlotKind::BottomAux, 1, "4"),
            ],
        );
        let (session, _) = submit(&session);
        let rendered = render_board(&session);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "       1");
        assert_eq!(lines[1], "    5  2");
        assert_eq!(lines[2], "-   4  8");
        assert_eq!(lines[3], "    4");
        assert_eq!(lines[5], "       4");
        assert_eq!(
            lines[7],
            "x Now add 1 to the bottom digit of the next column (4 + 1)."
        );
    }

    #[test]
    fn complete_board_drops_marker() {
        let session = create_session(addition_on(&[4, 3], 1));
        let session = fill(&session, &[(SlotKind::Result, 0, "7")]);
        let (session, _) = submit(&session);
        let rendered = render_board(&session);
        assert!(!rendered.contains('^'));
        assert!(rendered.ends_with("ok You solved it!\n"));
    }

    #[test]
    fn training_shows_question_and_status() {
        let session = TrainingSession::new(training_problem(TrainingMode::Complements10, 7, 0));
        let session = session.set_answer("4").expect("digits");
        let (session, _) = session.submit_answer();
        assert_eq!(
            render_training(&session),
            "Friends of 10 (#1)\n  From 7 to 10 is... _\nx Try again!\n"
        );
    }
}
