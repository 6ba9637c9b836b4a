//! Application state: which screen is showing, the streak, and pending timers.
//!
//! The app owns at most one pending delayed transition. Leaving or replacing a
//! screen drops it, and a timer that fires for a session that is no longer on
//! screen is ignored.

use std::time::Instant;

use anyhow::Result;
use tracing::{debug, info};

use crate::core::pacing::PendingAdvance;
use crate::core::session::{InputError, ValidationSession, create_session, set_input};
use crate::core::training::{TrainingMode, TrainingOutcome, TrainingSession};
use crate::core::types::{Operation, Outcome, SlotKind};
use crate::core::validator::{settle, submit};
use crate::generator::ProblemSource;
use crate::io::config::TutorConfig;

/// Board screen: one problem being worked column by column.
#[derive(Debug, Clone)]
pub struct BoardScreen {
    pub operation: Operation,
    pub session: ValidationSession,
}

/// Drill screen.
#[derive(Debug, Clone)]
pub struct TrainingScreen {
    pub session: TrainingSession,
}

/// Top-level screen.
#[derive(Debug, Clone)]
pub enum Screen {
    Menu,
    Board(BoardScreen),
    Training(TrainingScreen),
}

/// What `fire_due` did with the pending timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fired {
    /// No timer, or not due yet.
    Idle,
    /// The board moved to its next column.
    NextColumn,
    /// The drill moved to its next question.
    NextQuestion,
    /// The timer belonged to a session that is gone.
    Stale,
}

pub struct App<S: ProblemSource> {
    screen: Screen,
    streak: u32,
    config: TutorConfig,
    source: S,
    pending: Option<PendingAdvance>,
}

impl<S: ProblemSource> App<S> {
    pub fn new(config: TutorConfig, source: S) -> Self {
        Self {
            screen: Screen::Menu,
            streak: 0,
            config,
            source,
            pending: None,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Solved boards plus correct drill answers since the app started.
    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn config(&self) -> &TutorConfig {
        &self.config
    }

    /// Instant the pending timer becomes due, if one is scheduled.
    pub fn pending_due(&self) -> Option<Instant> {
        self.pending.map(|pending| pending.due)
    }

    /// Open a board with a fresh problem for `operation`.
    pub fn start_board(&mut self, operation: Operation) -> Result<()> {
        let problem = self.source.problem(operation, self.config.columns)?;
        let session = create_session(problem);
        info!(
            operation = operation.label(),
            session = session.id().get(),
            "board started"
        );
        self.replace_screen(Screen::Board(BoardScreen { operation, session }));
        Ok(())
    }

    /// Open a drill for `mode`.
    pub fn start_training(&mut self, mode: TrainingMode) {
        let session = TrainingSession::new(self.source.training(mode));
        info!(mode = mode.title(), session = session.id().get(), "training started");
        self.replace_screen(Screen::Training(TrainingScreen { session }));
    }

    /// Replace the current problem with a new one of the same kind.
    pub fn next_problem(&mut self) -> Result<()> {
        match &self.screen {
            Screen::Board(board) => self.start_board(board.operation),
            Screen::Training(training) => {
                self.start_training(training.session.mode());
                Ok(())
            }
            Screen::Menu => Ok(()),
        }
    }

    pub fn exit_to_menu(&mut self) {
        debug!("exit to menu");
        self.replace_screen(Screen::Menu);
    }

    /// Edit a slot on the board.
    pub fn board_input(
        &mut self,
        slot: SlotKind,
        column: usize,
        raw: &str,
    ) -> Result<(), InputError> {
        let Screen::Board(board) = &mut self.screen else {
            return Ok(());
        };
        board.session = set_input(&board.session, slot, column, raw)?;
        Ok(())
    }

    /// Submit the active board column.
    ///
    /// Returns `None` when no board is showing.
    pub fn board_submit(&mut self, now: Instant) -> Option<Outcome> {
        let Screen::Board(board) = &mut self.screen else {
            return None;
        };
        let was_complete = board.session.is_complete();
        let (session, outcome) = submit(&board.session);
        board.session = session;
        debug!(
            column = board.session.active_column(),
            ?outcome,
            "column submitted"
        );

        if let Some(ticket) = board.session.pending_ticket() {
            self.pending = Some(PendingAdvance::schedule(
                ticket,
                now,
                self.config.settle_delay(),
            ));
        }
        if !was_complete && board.session.is_complete() {
            self.streak += 1;
            info!(streak = self.streak, "problem solved");
        }
        Some(outcome)
    }

    /// Type an answer on the drill screen. Returns false when it was rejected.
    pub fn training_input(&mut self, raw: &str) -> bool {
        let Screen::Training(training) = &mut self.screen else {
            return false;
        };
        match training.session.set_answer(raw) {
            Some(session) => {
                training.session = session;
                true
            }
            None => false,
        }
    }

    /// Check the typed drill answer.
    pub fn training_submit(&mut self, now: Instant) -> Option<TrainingOutcome> {
        let Screen::Training(training) = &mut self.screen else {
            return None;
        };
        let had_pending = training.session.pending_ticket().is_some();
        let (session, outcome) = training.session.submit_answer();
        training.session = session;
        if !had_pending
            && let Some(ticket) = training.session.pending_ticket()
        {
            self.streak += 1;
            self.pending = Some(PendingAdvance::schedule(
                ticket,
                now,
                self.config.training_advance(),
            ));
        }
        debug!(?outcome, "training answer submitted");
        Some(outcome)
    }

    /// Run the pending timer if it is due at `now`.
    pub fn fire_due(&mut self, now: Instant) -> Fired {
        let Some(pending) = self.pending else {
            return Fired::Idle;
        };
        if !pending.is_due(now) {
            return Fired::Idle;
        }
        self.pending = None;
        let ticket = pending.ticket;

        match &mut self.screen {
            Screen::Board(board) => match settle(&board.session, ticket) {
                Some(session) => {
                    board.session = session;
                    Fired::NextColumn
                }
                None => stale(ticket.session.get()),
            },
            Screen::Training(training) => {
                let problem = self.source.training(training.session.mode());
                match training.session.advance(ticket, problem) {
                    Some(session) => {
                        training.session = session;
                        Fired::NextQuestion
                    }
                    None => stale(ticket.session.get()),
                }
            }
            Screen::Menu => stale(ticket.session.get()),
        }
    }

    fn replace_screen(&mut self, screen: Screen) {
        if let Some(pending) = self.pending.take() {
            debug!(session = pending.ticket.session.get(), "pending timer cancelled");
        }
        self.screen = screen;
    }
}

fn stale(session: u64) -> Fired {
    debug!(session, "ignoring timer for replaced session");
    Fired::Stale
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pacing::Ticket;
    use crate::test_support::{ScriptedSource, solve_column_inputs};
    use std::time::Duration;

    fn app(boards: Vec<Vec<u64>>) -> App<ScriptedSource> {
        let config = TutorConfig {
            columns: 6,
            ..TutorConfig::default()
        };
        App::new(config, ScriptedSource::new(boards))
    }

    fn board(app: &App<ScriptedSource>) -> &BoardScreen {
        match app.screen() {
            Screen::Board(board) => board,
            other => panic!("expected board, got {other:?}"),
        }
    }

    fn solve_active(app: &mut App<ScriptedSource>) {
        let Screen::Board(board) = &mut app.screen else {
            panic!("expected board");
        };
        board.session = solve_column_inputs(&board.session);
    }

    #[test]
    fn starts_on_menu() {
        let app = app(vec![]);
        assert!(matches!(app.screen(), Screen::Menu));
        assert_eq!(app.streak(), 0);
        assert_eq!(app.pending_due(), None);
    }

    /// Solving every column fires the streak exactly once.
    #[test]
    fn solving_a_board_counts_once() {
        let mut app = app(vec![vec![48, 37]]);
        app.start_board(Operation::Addition).expect("board");
        let mut now = Instant::now();

        loop {
            solve_active(&mut app);
            let outcome = app.board_submit(now).expect("board");
            if outcome == Outcome::ProblemComplete {
                break;
            }
            assert_eq!(outcome, Outcome::StepCorrect);
            assert_eq!(app.fire_due(now), Fired::Idle);
            now += Duration::from_millis(500);
            assert_eq!(app.fire_due(now), Fired::NextColumn);
        }

        assert_eq!(app.streak(), 1);
        assert_eq!(app.board_submit(now), Some(Outcome::ProblemComplete));
        assert_eq!(app.streak(), 1);
        assert!(board(&app).session.is_complete());
    }

    /// Leaving mid-delay cancels the advance.
    #[test]
    fn exit_cancels_pending_advance() {
        let mut app = app(vec![vec![48, 37]]);
        app.start_board(Operation::Addition).expect("board");
        solve_active(&mut app);
        let now = Instant::now();
        assert_eq!(app.board_submit(now), Some(Outcome::StepCorrect));
        assert!(app.pending_due().is_some());

        app.exit_to_menu();
        assert_eq!(app.pending_due(), None);
        assert_eq!(app.fire_due(now + Duration::from_secs(5)), Fired::Idle);
    }

    /// A ticket from a replaced session never advances the new one.
    #[test]
    fn stale_ticket_is_ignored_after_new_problem() {
        let mut app = app(vec![vec![48, 37], vec![41, 37]]);
        app.start_board(Operation::Addition).expect("board");
        solve_active(&mut app);
        let now = Instant::now();
        app.board_submit(now);
        let old_ticket = board(&app).session.pending_ticket().expect("ticket");

        app.next_problem().expect("next");
        assert_eq!(board(&app).session.problem().operands(), &[41, 37]);
        app.pending = Some(PendingAdvance::schedule(old_ticket, now, Duration::ZERO));
        assert_eq!(app.fire_due(now), Fired::Stale);
        assert_eq!(board(&app).session.active_column(), 0);
    }

    #[test]
    fn wrong_answers_keep_the_column() {
        let mut app = app(vec![vec![48, 37]]);
        app.start_board(Operation::Addition).expect("board");
        app.board_input(SlotKind::Result, 0, "4").expect("edit");
        assert_eq!(
            app.board_submit(Instant::now()),
            Some(Outcome::WrongResult)
        );
        assert_eq!(app.pending_due(), None);
        assert_eq!(board(&app).session.active_column(), 0);
        assert!(matches!(
            app.board_input(SlotKind::Result, 3, "1"),
            Err(InputError::ReadOnly { .. })
        ));
    }

    #[test]
    fn training_correct_answer_advances_after_delay() {
        let source = ScriptedSource::new(vec![]).with_drills(vec![
            (TrainingMode::Doubles, 6, 0),
            (TrainingMode::Doubles, 4, 0),
        ]);
        let mut app = App::new(TutorConfig::default(), source);
        app.start_training(TrainingMode::Doubles);

        assert!(app.training_input("11"));
        let now = Instant::now();
        assert_eq!(app.training_submit(now), Some(TrainingOutcome::Incorrect));
        assert_eq!(app.streak(), 0);

        assert!(app.training_input("12"));
        assert_eq!(app.training_submit(now), Some(TrainingOutcome::Correct));
        assert_eq!(app.streak(), 1);
        assert_eq!(app.training_submit(now), Some(TrainingOutcome::Correct));
        assert_eq!(app.streak(), 1);

        assert_eq!(app.fire_due(now + Duration::from_millis(999)), Fired::Idle);
        assert_eq!(app.fire_due(now + Duration::from_secs(1)), Fired::NextQuestion);
        let Screen::Training(training) = app.screen() else {
            panic!("expected training");
        };
        assert_eq!(training.session.problem().question_text, "4 + 4");
    }

    #[test]
    fn timer_on_menu_is_stale() {
        let mut app = app(vec![]);
        let now = Instant::now();
        let ticket = Ticket {
            session: crate::core::pacing::SessionId::next(),
            step: 0,
        };
        app.pending = Some(PendingAdvance::schedule(ticket, now, Duration::ZERO));
        assert_eq!(app.fire_due(now), Fired::Stale);
    }
}
