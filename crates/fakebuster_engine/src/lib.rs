//! FakeBuster engine: backend client and effect execution.
mod classify;
mod controller;
mod engine;
mod settings;
mod types;
mod wire;

pub use classify::{Classifier, ReqwestClassifier};
pub use controller::{AnalysisController, Notifier, SubmitError};
pub use engine::{ChannelEventSink, EngineHandle, EventSink};
pub use settings::{
    ClientSettings, ConfigError, DEFAULT_BACKEND_URL, ENV_BACKEND_URL, ENV_REQUEST_TIMEOUT_SECS,
    ENV_TOP_K,
};
pub use types::{ClassifyError, EngineEvent, FailureKind};
pub use wire::{decode_check_response, decode_related_news, RelatedArticle, RelatedNews};
