pub mod state;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::api::session::SessionApi;
use self::state::{TrackedSession, TrialsFetch};

/// Delay between poll cycles.
const POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Tracks one backend session through its processing pipeline.
///
/// The backend drives every phase transition; this type only observes.
/// `start_tracking` discards prior state and runs a poll loop in an
/// owned task: one immediate cycle, then one every [`POLL_INTERVAL`],
/// strictly sequential. A cycle's fetch settles before the next is
/// scheduled, so a stale response can never overwrite a newer one.
///
/// Each successful cycle overwrites phase and completion flags from the
/// response, fetches the matched-trials list exactly once after matching
/// completes (retrying only if that fetch failed), and stops permanently
/// once `report_generated` is observed. Failed cycles record an error
/// message and change nothing else; the next cycle retries.
///
/// State changes are published through a watch channel: [`subscribe`]
/// for notifications, [`current`] for a snapshot. `stop_tracking` is
/// idempotent, safe during an in-flight fetch (the completion is
/// discarded), and keeps the last known state for re-display; only
/// `start_tracking` resets it. Callers own the lifecycle: whoever starts
/// tracking must stop it when no longer interested.
///
/// [`subscribe`]: SessionTracker::subscribe
/// [`current`]: SessionTracker::current
pub struct SessionTracker<A: SessionApi + 'static> {
    api: Arc<A>,
    updates: watch::Sender<TrackedSession>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl<A: SessionApi + 'static> SessionTracker<A> {
    pub fn new(api: Arc<A>) -> Self {
        let (updates, _) = watch::channel(TrackedSession::default());
        Self {
            api,
            updates,
            task: Mutex::new(None),
        }
    }

    /// Subscribe to state-change notifications. Every mutation made by
    /// the poll loop notifies all receivers.
    pub fn subscribe(&self) -> watch::Receiver<TrackedSession> {
        self.updates.subscribe()
    }

    /// Snapshot of the current tracked state.
    pub fn current(&self) -> TrackedSession {
        self.updates.borrow().clone()
    }

    /// Start (or restart) tracking a session.
    ///
    /// Any prior tracking by this instance is cancelled and its retained
    /// state (phase, trials, error) discarded. Polls once immediately,
    /// then on the fixed interval until stopped or terminal. Must be
    /// called from within a tokio runtime.
    ///
    /// Precondition: the session exists on the backend, normally because
    /// an upload for it just succeeded. Tracking an unknown session is
    /// not an error here; every cycle simply records the backend's 404.
    pub fn start_tracking(&self, session_id: &str) {
        self.cancel_task();
        info!("Tracking session {}", session_id);

        self.updates.send_replace(TrackedSession {
            session_id: session_id.to_string(),
            polling: true,
            ..TrackedSession::default()
        });

        let api = Arc::clone(&self.api);
        let updates = self.updates.clone();
        let session_id = session_id.to_string();
        let handle = tokio::spawn(async move {
            loop {
                let terminal = poll_cycle(api.as_ref(), &updates, &session_id).await;
                if terminal {
                    break;
                }
                tokio::time::sleep(POLL_INTERVAL).await;
            }
        });
        *self.task.lock().unwrap() = Some(handle);
    }

    /// Stop polling.
    ///
    /// Idempotent; a no-op when nothing is being tracked. Cancels the
    /// poll loop even mid-fetch: a completion arriving after stop is
    /// discarded and can never resurrect polling. Retained phase, trials
    /// and error survive for re-display until the next `start_tracking`.
    pub fn stop_tracking(&self) {
        self.cancel_task();
        self.updates.send_if_modified(|s| {
            if s.polling {
                s.polling = false;
                true
            } else {
                false
            }
        });
    }

    fn cancel_task(&self) {
        if let Some(handle) = self.task.lock().unwrap().take() {
            handle.abort();
        }
    }
}

impl<A: SessionApi + 'static> Drop for SessionTracker<A> {
    fn drop(&mut self) {
        self.cancel_task();
    }
}

/// One fetch-and-apply cycle. Returns true once the terminal state is
/// reached and polling must end.
async fn poll_cycle<A: SessionApi>(
    api: &A,
    updates: &watch::Sender<TrackedSession>,
    session_id: &str,
) -> bool {
    let remote = match api.fetch_session_state(session_id).await {
        Ok(remote) => remote,
        Err(e) => {
            // Transient failure: record it, keep everything else, retry
            // on the next scheduled cycle.
            warn!("Poll failed for session {}: {}", session_id, e);
            updates.send_modify(|s| s.error = Some(e.to_string()));
            return false;
        }
    };

    updates.send_modify(|s| {
        s.phase = remote.phase.clone();
        s.matching_complete = remote.matching_complete;
        s.report_generated = remote.report_generated;
        s.error = None;
    });

    // One-shot side effect: fetch the matched trials after matching
    // completes, at most once successfully per tracked session.
    let needs_trials =
        remote.matching_complete && updates.borrow().trials_fetch != TrialsFetch::Retained;
    if needs_trials {
        match api.fetch_matched_trials(session_id).await {
            Ok(trials) => {
                info!(
                    "Retained {} matched trials for session {}",
                    trials.len(),
                    session_id
                );
                updates.send_modify(|s| {
                    s.matched_trials = trials;
                    s.trials_fetch = TrialsFetch::Retained;
                });
            }
            Err(e) => {
                warn!(
                    "Matched-trials fetch failed for session {}: {}",
                    session_id, e
                );
                updates.send_modify(|s| {
                    s.error = Some(e.to_string());
                    s.trials_fetch = TrialsFetch::Failed;
                });
            }
        }
    }

    if remote.report_generated {
        info!("Session {} reached terminal state, polling stopped", session_id);
        updates.send_modify(|s| s.polling = false);
        return true;
    }
    false
}
