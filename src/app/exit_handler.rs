//! Exit code logic for the krawl process.
//!
//! Single responsibility: map run results to the process exit outcome.

use krawl_core::RunOutcome;

use crate::ProcessExit;

/// Maps a crawl report outcome to the process exit outcome.
pub(crate) fn determine_exit_outcome(outcome: RunOutcome) -> ProcessExit {
    match outcome {
        RunOutcome::Success => ProcessExit::Success,
        RunOutcome::Partial => ProcessExit::Partial,
        RunOutcome::Failure => ProcessExit::Failure,
    }
}

/// Exit outcome of `validate manifest`.
pub(crate) fn determine_validation_outcome(valid: bool) -> ProcessExit {
    if valid {
        ProcessExit::Success
    } else {
        ProcessExit::Invalid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_outcome_follows_run_outcome() {
        assert_eq!(determine_exit_outcome(RunOutcome::Success), ProcessExit::Success);
        assert_eq!(determine_exit_outcome(RunOutcome::Partial), ProcessExit::Partial);
        assert_eq!(determine_exit_outcome(RunOutcome::Failure), ProcessExit::Failure);
    }

    #[test]
    fn test_invalid_manifest_exits_with_one() {
        assert_eq!(determine_validation_outcome(true), ProcessExit::Success);
        assert_eq!(determine_validation_outcome(false).code(), 1);
        assert_eq!(ProcessExit::Partial.code(), 1);
        assert_eq!(ProcessExit::Failure.code(), 2);
    }
}
