pub mod api;
pub mod config;
mod error;
pub mod health;
pub mod history;
pub mod payload;
pub mod tracker;

pub use api::types::{
    MatchedTrial, SessionPhase, SessionState, TrialLocation, UploadPayload, UploadResponse,
};
pub use api::ApiClient;
pub use config::{BackendConfig, Preferences};
pub use error::ApiError;
pub use health::types::HealthSnapshot;
pub use history::{UploadHistory, UploadRecord};
pub use tracker::state::TrackedSession;
pub use tracker::SessionTracker;

/// Install the global tracing subscriber, honoring `RUST_LOG` and
/// defaulting to `info`.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}
