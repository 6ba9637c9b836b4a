//! Mental-arithmetic drills: doubles, complements of ten, bridging ten.
//!
//! A drill asks one question at a time. A correct answer schedules an
//! automatic advance to the next question; a wrong one clears the input.

use crate::core::pacing::{SessionId, Ticket};
use crate::core::types::Status;

/// Drill flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrainingMode {
    /// `n + n` for `n` in 1..=10.
    Doubles,
    /// "From n to 10": `10 - n` for `n` in 1..=9.
    Complements10,
    /// "From a to b" across ten: `b - a`, `a` in 5..=9, `b` in 11..=19.
    Bridge10,
}

impl TrainingMode {
    pub fn title(self) -> &'static str {
        match self {
            TrainingMode::Doubles => "Doubles",
            TrainingMode::Complements10 => "Friends of 10",
            TrainingMode::Bridge10 => "Crossing 10",
        }
    }
}

/// One drill question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingProblem {
    pub mode: TrainingMode,
    pub question_text: String,
    pub expected_result: u32,
}

/// Build the question for `mode` from its numbers.
///
/// Doubles and complements use `a` only; bridging goes from `a` up to `b`.
pub fn training_problem(mode: TrainingMode, a: u32, b: u32) -> TrainingProblem {
    let (question_text, expected_result) = match mode {
        TrainingMode::Doubles => (format!("{a} + {a}"), a + a),
        TrainingMode::Complements10 => (format!("From {a} to 10 is..."), 10u32.saturating_sub(a)),
        TrainingMode::Bridge10 => (format!("From {a} to {b} is..."), b.saturating_sub(a)),
    };
    TrainingProblem {
        mode,
        question_text,
        expected_result,
    }
}

/// Result of answering a drill question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainingOutcome {
    /// Nothing typed; ignored.
    Empty,
    Correct,
    Incorrect,
}

/// State of one drill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingSession {
    id: SessionId,
    mode: TrainingMode,
    problem: TrainingProblem,
    answered: usize,
    input: String,
    status: Status,
    pending: Option<Ticket>,
}

impl TrainingSession {
    pub fn new(problem: TrainingProblem) -> Self {
        Self {
            id: SessionId::next(),
            mode: problem.mode,
            problem,
            answered: 0,
            input: String::new(),
            status: Status::Default,
            pending: None,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn mode(&self) -> TrainingMode {
        self.mode
    }

    pub fn problem(&self) -> &TrainingProblem {
        &self.problem
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Number of questions answered correctly so far.
    pub fn answered(&self) -> usize {
        self.answered
    }

    pub fn pending_ticket(&self) -> Option<Ticket> {
        self.pending
    }

    /// Replace the typed answer. Only digits are accepted; edits are ignored
    /// while an advance is pending.
    pub fn set_answer(&self, raw: &str) -> Option<Self> {
        if self.pending.is_some() || !raw.chars().all(|ch| ch.is_ascii_digit()) {
            return None;
        }
        let mut next = self.clone();
        next.input = raw.to_string();
        next.status = Status::Default;
        Some(next)
    }

    /// Check the typed answer.
    pub fn submit_answer(&self) -> (Self, TrainingOutcome) {
        let mut next = self.clone();
        if self.pending.is_some() {
            return (next, TrainingOutcome::Correct);
        }
        if self.input.is_empty() {
            return (next, TrainingOutcome::Empty);
        }
        if self.input.parse::<u32>().ok() == Some(self.problem.expected_result) {
            next.status = Status::Correct;
            next.pending = Some(Ticket {
                session: self.id,
                step: self.answered,
            });
            (next, TrainingOutcome::Correct)
        } else {
            next.status = Status::Error;
            next.input.clear();
            (next, TrainingOutcome::Incorrect)
        }
    }

    /// Move on to `problem` if `ticket` is the pending advance of this session.
    pub fn advance(&self, ticket: Ticket, problem: TrainingProblem) -> Option<Self> {
        if self.pending != Some(ticket) {
            return None;
        }
        Some(Self {
            id: self.id,
            mode: self.mode,
            problem,
            answered: self.answered + 1,
            input: String::new(),
            status: Status::Default,
            pending: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn questions_match_their_mode() {
        let doubles = training_problem(TrainingMode::Doubles, 6, 0);
        assert_eq!(doubles.question_text, "6 + 6");
        assert_eq!(doubles.expected_result, 12);

        let friends = training_problem(TrainingMode::Complements10, 7, 0);
        assert_eq!(friends.question_text, "From 7 to 10 is...");
        assert_eq!(friends.expected_result, 3);

        let bridge = training_problem(TrainingMode::Bridge10, 7, 13);
        assert_eq!(bridge.question_text, "From 7 to 13 is...");
        assert_eq!(bridge.expected_result, 6);
    }

    #[test]
    fn empty_answer_is_ignored() {
        let session = TrainingSession::new(training_problem(TrainingMode::Doubles, 3, 0));
        let (next, outcome) = session.submit_answer();
        assert_eq!(outcome, TrainingOutcome::Empty);
        assert_eq!(next, session);
    }

    /// A wrong answer clears the input so the learner types again.
    #[test]
    fn wrong_answer_clears_input() {
        let session = TrainingSession::new(training_problem(TrainingMode::Doubles, 3, 0));
        let session = session.set_answer("7").expect("digits");
        let (session, outcome) = session.submit_answer();
        assert_eq!(outcome, TrainingOutcome::Incorrect);
        assert_eq!(session.status(), Status::Error);
        assert_eq!(session.input(), "");
    }

    #[test]
    fn correct_answer_waits_for_advance() {
        let session = TrainingSession::new(training_problem(TrainingMode::Bridge10, 8, 15));
        let session = session.set_answer("7").expect("digits");
        let (session, outcome) = session.submit_answer();
        assert_eq!(outcome, TrainingOutcome::Correct);
        assert_eq!(session.status(), Status::Correct);
        assert!(session.set_answer("1").is_none());

        let ticket = session.pending_ticket().expect("ticket");
        let next_problem = training_problem(TrainingMode::Bridge10, 5, 12);
        let advanced = session.advance(ticket, next_problem.clone()).expect("advance");
        assert_eq!(advanced.problem(), &next_problem);
        assert_eq!(advanced.answered(), 1);
        assert_eq!(advanced.pending_ticket(), None);
        assert!(advanced.advance(ticket, next_problem).is_none());
    }

    /// Answers too long for any drill result still count as wrong.
    #[test]
    fn oversized_answer_is_incorrect() {
        let session = TrainingSession::new(training_problem(TrainingMode::Doubles, 3, 0));
        let session = session.set_answer("99999999999").expect("digits");
        let (session, outcome) = session.submit_answer();
        assert_eq!(outcome, TrainingOutcome::Incorrect);
        assert_eq!(session.status(), Status::Error);
        assert_eq!(session.input(), "");
    }

    #[test]
    fn set_answer_rejects_non_digits() {
        let session = TrainingSession::new(training_problem(TrainingMode::Doubles, 3, 0));
        assert!(session.set_answer("six").is_none());
        assert!(session.set_answer("").is_some());
    }
}
