//! FakeBuster core: pure analysis-request state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod verdict;
mod view_model;

pub use effect::{Effect, Notification};
pub use msg::{AnalysisOutcome, Msg};
pub use state::{AnalysisResult, AppState, Generation, LifecycleStatus, MatchItem};
pub use update::update;
pub use verdict::VerdictBucket;
pub use view_model::{
    format_score, AppViewModel, MatchRowView, ResultView, LABEL_ANALYZING, LABEL_SUBMIT,
    NO_MATCHES_TEXT,
};
