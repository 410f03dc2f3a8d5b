//! Process exit codes for the `umdlint` binary
//!
//! CI jobs rely on these to tell a dirty document apart from a broken invocation.

/// No findings, or every finding fixed
pub const SUCCESS: i32 = 0;

/// At least one finding remains after the run
pub const VIOLATIONS_FOUND: i32 = 1;

/// Configuration error, unreadable input, or internal error
pub const TOOL_ERROR: i32 = 2;

/// Exit code for a completed run
pub fn for_findings(remaining: usize) -> i32 {
    if remaining == 0 { SUCCESS } else { VIOLATIONS_FOUND }
}
