//! Deterministic, pure logic for the arithmetic tutor.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! values and return deterministic outputs suitable for tests.

pub mod invariants;
pub mod pacing;
pub mod problem;
pub mod session;
pub mod solver;
pub mod training;
pub mod types;
pub mod validator;
