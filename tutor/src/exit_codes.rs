//! Exit codes for tutor CLI commands.

/// Command succeeded.
pub const OK: i32 = 0;
/// Malformed problem, invalid config, or any other error.
pub const INVALID: i32 = 1;
