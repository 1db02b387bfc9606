use serde::Serialize;

use crate::api::types::MatchedTrial;

/// Progress of the one-shot matched-trials fetch.
///
/// A failed attempt is retried on the next poll cycle; a retained list
/// is never fetched again for this session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum TrialsFetch {
    /// Matching has not completed yet, or no fetch has been attempted.
    #[default]
    NotAttempted,
    /// The last attempt failed; the next cycle retries.
    Failed,
    /// The list was fetched and retained; never fetched again.
    Retained,
}

/// Observable state for one tracked session.
///
/// Mutated only by the tracker's poll loop; readers take snapshots or
/// subscribe to change notifications. Fields never regress while
/// polling, except `error`, which the next successful cycle clears.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TrackedSession {
    pub session_id: String,
    /// Raw backend phase string; empty until the first successful poll.
    pub phase: String,
    pub matching_complete: bool,
    pub report_generated: bool,
    /// Populated at most once per tracked session.
    pub matched_trials: Vec<MatchedTrial>,
    pub polling: bool,
    /// Message from the most recent failed cycle, if any.
    pub error: Option<String>,
    pub trials_fetch: TrialsFetch,
}
