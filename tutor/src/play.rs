//! Line-oriented terminal front end for `tutor menu`, `tutor play` and `tutor train`.
//!
//! Each line the learner types is one command. Delays between a correct step
//! and the next one are waited out in place, then the pending timer is fired
//! through the app like any other event.

use std::io::{BufRead, Write};
use std::thread;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::debug;

use crate::app::{App, Screen};
use crate::core::training::{TrainingMode, TrainingOutcome};
use crate::core::types::{Operation, Outcome, SlotKind};
use crate::generator::ProblemSource;
use crate::render::{render_board, render_training};

const BOARD_HELP: &str = "\
Commands (the active column is marked with ^):
  r <digit>   write the result digit
  c <n>       addition: carry written above the next column
  b <n>       subtraction: borrow mark on this column (1)
  e <n>       subtraction: bottom digit of the next column plus one
  s           check the column (an empty line works too)
  n           new problem
  q           back to the menu
Leave the value out to clear a bubble.";

const MENU: &str = "\
1) Addition
2) Subtraction
3) Doubles
4) Friends of 10
5) Crossing 10
q) Quit";

/// One parsed board command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardCommand {
    Result(String),
    Carry(String),
    Borrow(String),
    Adjust(String),
    Submit,
    Next,
    Menu,
    Help,
}

impl BoardCommand {
    /// Parse one input line. Returns `None` for unknown commands.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        let (head, value) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim().to_string()),
            None => (line, String::new()),
        };
        let command = match head {
            "" | "s" => BoardCommand::Submit,
            "r" => BoardCommand::Result(value),
            "c" => BoardCommand::Carry(value),
            "b" => BoardCommand::Borrow(value),
            "e" => BoardCommand::Adjust(value),
            "n" => BoardCommand::Next,
            "q" => BoardCommand::Menu,
            "h" | "?" => BoardCommand::Help,
            _ => return None,
        };
        Some(command)
    }

    /// Slot this command edits when `active` is the active column.
    ///
    /// Returns `None` for commands that edit nothing or do not apply to `operation`.
    pub fn target(&self, operation: Operation, active: usize) -> Option<(SlotKind, usize, &str)> {
        match (self, operation) {
            (BoardCommand::Result(value), _) => Some((SlotKind::Result, active, value)),
            (BoardCommand::Carry(value), Operation::Addition) => {
                Some((SlotKind::TopAux, active + 1, value))
            }
            (BoardCommand::Borrow(value), Operation::Subtraction) => {
                Some((SlotKind::TopAux, active, value))
            }
            (BoardCommand::Adjust(value), Operation::Subtraction) => {
                Some((SlotKind::BottomAux, active + 1, value))
            }
            _ => None,
        }
    }
}

/// Where an interactive run begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Start {
    Menu,
    Board(Operation),
    Training(TrainingMode),
}

/// Drive `app` from `input` until the learner quits from the menu or input ends.
pub fn run<S, R, W>(app: &mut App<S>, start: Start, mut input: R, mut out: W) -> Result<()>
where
    S: ProblemSource,
    R: BufRead,
    W: Write,
{
    match start {
        Start::Menu => {}
        Start::Board(operation) => app.start_board(operation)?,
        Start::Training(mode) => app.start_training(mode),
    }

    let mut line = String::new();
    loop {
        show(app, &mut out)?;
        write!(out, "> ")?;
        out.flush().context("flush output")?;

        line.clear();
        if input.read_line(&mut line).context("read input")? == 0 {
            writeln!(out)?;
            return Ok(());
        }
        let on_menu = matches!(app.screen(), Screen::Menu);
        let on_board = matches!(app.screen(), Screen::Board(_));
        let keep_going = if on_menu {
            menu_line(app, line.trim(), &mut out)?
        } else if on_board {
            board_line(app, &line, &mut out)?
        } else {
            training_line(app, line.trim(), &mut out)?
        };
        if !keep_going {
            return Ok(());
        }
    }
}

fn show<S: ProblemSource, W: Write>(app: &App<S>, out: &mut W) -> Result<()> {
    writeln!(out, "\nStreak: {}", app.streak())?;
    match app.screen() {
        Screen::Menu => writeln!(out, "{MENU}")?,
        Screen::Board(board) => {
            write!(out, "{}", render_board(&board.session))?;
            if board.session.is_complete() {
                writeln!(out, "n) new problem  q) menu")?;
            }
        }
        Screen::Training(training) => write!(out, "{}", render_training(&training.session))?,
    }
    Ok(())
}

fn menu_line<S: ProblemSource, W: Write>(
    app: &mut App<S>,
    line: &str,
    out: &mut W,
) -> Result<bool> {
    match line {
        "1" => app.start_board(Operation::Addition)?,
        "2" => app.start_board(Operation::Subtraction)?,
        "3" => app.start_training(TrainingMode::Doubles),
        "4" => app.start_training(TrainingMode::Complements10),
        "5" => app.start_training(TrainingMode::Bridge10),
        "q" => return Ok(false),
        other => writeln!(out, "Unknown choice: {other}")?,
    }
    Ok(true)
}

fn board_line<S: ProblemSource, W: Write>(
    app: &mut App<S>,
    line: &str,
    out: &mut W,
) -> Result<bool> {
    let Screen::Board(board) = app.screen() else {
        return Ok(true);
    };
    let operation = board.operation;
    let active = board.session.active_column();

    let Some(command) = BoardCommand::parse(line) else {
        writeln!(out, "Unknown command. Type h for help.")?;
        return Ok(true);
    };
    match &command {
        BoardCommand::Submit => {
            let outcome = app.board_submit(Instant::now());
            if outcome == Some(Outcome::StepCorrect) {
                writeln!(out, "ok Well done!")?;
                wait_pending(app);
            }
        }
        BoardCommand::Next => app.next_problem()?,
        BoardCommand::Menu => app.exit_to_menu(),
        BoardCommand::Help => writeln!(out, "{BOARD_HELP}")?,
        edit => match edit.target(operation, active) {
            Some((slot, column, value)) => {
                if let Err(err) = app.board_input(slot, column, value) {
                    writeln!(out, "x {err}")?;
                }
            }
            None => writeln!(out, "That bubble is not used in {}.", operation.label())?,
        },
    }
    Ok(true)
}

fn training_line<S: ProblemSource, W: Write>(
    app: &mut App<S>,
    line: &str,
    out: &mut W,
) -> Result<bool> {
    match line {
        "q" => app.exit_to_menu(),
        "n" => app.next_problem()?,
        "" => {}
        answer => {
            if !app.training_input(answer) {
                writeln!(out, "Type a number.")?;
                return Ok(true);
            }
            if app.training_submit(Instant::now()) == Some(TrainingOutcome::Correct) {
                writeln!(out, "ok Correct!")?;
                wait_pending(app);
            }
        }
    }
    Ok(true)
}

/// Sleep until the pending timer is due, then fire it.
fn wait_pending<S: ProblemSource>(app: &mut App<S>) {
    let Some(due) = app.pending_due() else {
        return;
    };
    let now = Instant::now();
    if due > now {
        thread::sleep(due - now);
    }
    let fired = app.fire_due(Instant::now());
    debug!(?fired, "pending timer fired");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::config::TutorConfig;
    use crate::test_support::ScriptedSource;

    fn instant_config(columns: usize) -> TutorConfig {
        TutorConfig {
            columns,
            settle_delay_ms: 0,
            training_advance_ms: 0,
            ..TutorConfig::default()
        }
    }

    fn run_script<S: ProblemSource>(app: &mut App<S>, start: Start, script: &str) -> String {
        let mut out = Vec::new();
        run(app, start, script.as_bytes(), &mut out).expect("run");
        String::from_utf8(out).expect("utf8")
    }

    #[test]
    fn parse_board_commands() {
        assert_eq!(BoardCommand::parse("r 5"), Some(BoardCommand::Result("5".into())));
        assert_eq!(BoardCommand::parse("  c   12 "), Some(BoardCommand::Carry("12".into())));
        assert_eq!(BoardCommand::parse("b"), Some(BoardCommand::Borrow(String::new())));
        assert_eq!(BoardCommand::parse(""), Some(BoardCommand::Submit));
        assert_eq!(BoardCommand::parse("s\n"), Some(BoardCommand::Submit));
        assert_eq!(BoardCommand::parse("q"), Some(BoardCommand::Menu));
        assert_eq!(BoardCommand::parse("x 1"), None);
    }

    /// Bubbles map to the slot each operation writes its marks in.
    #[test]
    fn command_targets_follow_operation() {
        let carry = BoardCommand::Carry("1".into());
        assert_eq!(
            carry.target(Operation::Addition, 2),
            Some((SlotKind::TopAux, 3, "1"))
        );
        assert_eq!(carry.target(Operation::Subtraction, 2), None);

        let borrow = BoardCommand::Borrow("1".into());
        assert_eq!(
            borrow.target(Operation::Subtraction, 2),
            Some((SlotKind::TopAux, 2, "1"))
        );
        let adjust = BoardCommand::Adjust("5".into());
        assert_eq!(
            adjust.target(Operation::Subtraction, 0),
            Some((SlotKind::BottomAux, 1, "5"))
        );
        assert_eq!(BoardCommand::Submit.target(Operation::Addition, 0), None);
    }

    #[test]
    fn plays_an_addition_from_the_menu() {
        let mut app = App::new(instant_config(2), ScriptedSource::new(vec![vec![48, 37]]));
        let output = run_script(&mut app, Start::Menu, "1\nr 5\nc 1\n\nr 8\ns\nq\nq\n");
        assert!(output.contains("ok Well done!"));
        assert!(output.contains("ok You solved it!"));
        assert!(output.contains("Streak: 1"));
        assert_eq!(app.streak(), 1);
        assert!(matches!(app.screen(), Screen::Menu));
    }

    #[test]
    fn reports_mistakes_and_rejected_edits() {
        let mut app = App::new(instant_config(2), ScriptedSource::new(vec![vec![52, 48]]));
        let script = "r 4\nc 1\nb 1\nr 12\n\nq\n";
        let output = run_script(&mut app, Start::Board(Operation::Subtraction), script);
        assert!(output.contains("That bubble is not used in subtraction."));
        assert!(output.contains("x the result holds at most 1 digit(s)"));
        assert!(output.contains("x Now add 1 to the bottom digit of the next column (4 + 1)."));
        assert_eq!(app.streak(), 0);
    }

    #[test]
    fn drills_advance_after_a_correct_answer() {
        let source = ScriptedSource::new(vec![]).with_drills(vec![
            (TrainingMode::Doubles, 6, 0),
            (TrainingMode::Doubles, 9, 0),
        ]);
        let mut app = App::new(instant_config(6), source);
        let output = run_script(&mut app, Start::Menu, "3\n11\n12\nq\nq\n");
        assert!(output.contains("x Try again!"));
        assert!(output.contains("ok Correct!"));
        assert!(output.contains("9 + 9 _"));
        assert_eq!(app.streak(), 1);
    }

    #[test]
    fn end_of_input_stops_the_loop() {
        let mut app = App::new(instant_config(6), ScriptedSource::default());
        let output = run_script(&mut app, Start::Training(TrainingMode::Bridge10), "");
        assert!(output.contains("From 7 to 13 is..."));
    }
}
