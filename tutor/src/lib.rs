//! Column arithmetic tutor.
//!
//! Learners work additions and subtractions column by column on a board, writing
//! each result digit together with the carry or borrow marks that belong to it.
//! Each column is checked before the next one opens.
//!
//! - **[`core`]**: Pure logic. Problems, the column solver, the step validator
//!   and the mental-arithmetic drills. No I/O.
//! - **[`io`]**: Config loading and writing.
//!
//! [`app`] ties core sessions to screens and delayed transitions; [`play`] drives
//! it from a terminal and [`render`] draws boards as text.

pub mod app;
pub mod core;
pub mod exit_codes;
pub mod generator;
pub mod io;
pub mod logging;
pub mod play;
pub mod render;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
