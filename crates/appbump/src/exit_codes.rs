//! Exit codes for the CLI

use appbump_core::AppBumpError;

/// General error
pub const ERROR: i32 = 1;

/// Exit code for an error returned by a command
pub fn for_error(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<AppBumpError>()
        .map(AppBumpError::exit_code)
        .unwrap_or(ERROR)
}
