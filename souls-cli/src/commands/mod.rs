pub mod agents;
pub mod generate;
pub mod migrate;
pub mod validate;

use std::process::ExitCode;

/// Exit status for a command whose only failure mode is "something is wrong".
pub(crate) fn exit_status(failed: bool) -> ExitCode {
    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
