//! I/O helpers for tutor commands.

pub mod config;
