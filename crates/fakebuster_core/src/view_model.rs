use crate::{LifecycleStatus, VerdictBucket};

pub const LABEL_SUBMIT: &str = "Check Fake News";
pub const LABEL_ANALYZING: &str = "Analyzing...";
pub const NO_MATCHES_TEXT: &str = "No close matches found.";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub article: String,
    pub status: LifecycleStatus,
    pub submit_enabled: bool,
    pub submit_label: &'static str,
    pub result: Option<ResultView>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    pub verdict: String,
    pub bucket: VerdictBucket,
    pub detected_language: String,
    pub confidence: String,
    pub matches: Vec<MatchRowView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRowView {
    pub source: String,
    pub headline: String,
    pub url: Option<String>,
    pub score_text: String,
}

/// Two decimal places, the way match scores are shown.
pub fn format_score(score: f64) -> String {
    format!("{score:.2}")
}
