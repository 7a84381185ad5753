use crate::view_model::{AppViewModel, MatchRowView, ResultView};
use crate::{format_score, VerdictBucket};

/// Monotonic counter identifying one submission.
pub type Generation = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecycleStatus {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchItem {
    pub source: String,
    pub headline: String,
    pub url: Option<String>,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    pub verdict: String,
    pub detected_language: String,
    /// Shown verbatim; the backend may send a number or a string.
    pub confidence: String,
    /// Server order, possibly empty.
    pub matches: Vec<MatchItem>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    article: String,
    status: LifecycleStatus,
    result: Option<AnalysisResult>,
    generation: Generation,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn article(&self) -> &str {
        &self.article
    }

    pub fn status(&self) -> LifecycleStatus {
        self.status
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    /// Generation of the most recent submission; 0 before the first one.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn view(&self) -> AppViewModel {
        let submitting = self.status == LifecycleStatus::Submitting;
        AppViewModel {
            article: self.article.clone(),
            status: self.status,
            submit_enabled: !submitting,
            submit_label: if submitting {
                crate::LABEL_ANALYZING
            } else {
                crate::LABEL_SUBMIT
            },
            result: self.result.as_ref().map(result_view),
            dirty: self.dirty,
        }
    }

    /// Returns whether a render is pending and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn set_article(&mut self, text: String) {
        if self.article != text {
            self.article = text;
            self.dirty = true;
        }
    }

    pub(crate) fn has_submittable_article(&self) -> bool {
        !self.article.trim().is_empty()
    }

    /// Starts a new submission and returns its generation.
    pub(crate) fn begin_submission(&mut self) -> Generation {
        self.generation += 1;
        self.status = LifecycleStatus::Submitting;
        self.result = None;
        self.dirty = true;
        self.generation
    }

    /// Whether a completion for `generation` would still be applied.
    pub fn is_current(&self, generation: Generation) -> bool {
        self.status == LifecycleStatus::Submitting && self.generation == generation
    }

    pub(crate) fn apply_success(&mut self, result: AnalysisResult) {
        self.result = Some(result);
        self.status = LifecycleStatus::Succeeded;
        self.dirty = true;
    }

    pub(crate) fn apply_failure(&mut self) {
        self.result = None;
        self.status = LifecycleStatus::Failed;
        self.dirty = true;
    }

    pub(crate) fn clear(&mut self) {
        // Retire the in-flight request so its response is dropped on arrival.
        if self.status == LifecycleStatus::Submitting {
            self.generation += 1;
        }
        let changed = !self.article.is_empty()
            || self.result.is_some()
            || self.status != LifecycleStatus::Idle;
        self.article.clear();
        self.result = None;
        self.status = LifecycleStatus::Idle;
        if changed {
            self.dirty = true;
        }
    }
}

fn result_view(result: &AnalysisResult) -> ResultView {
    ResultView {
        verdict: result.verdict.clone(),
        bucket: VerdictBucket::from_verdict(&result.verdict),
        detected_language: result.detected_language.clone(),
        confidence: result.confidence.clone(),
        matches: result
            .matches
            .iter()
            .map(|m| MatchRowView {
                source: m.source.clone(),
                headline: m.headline.clone(),
                url: m.url.clone(),
                score_text: format_score(m.score),
            })
            .collect(),
    }
}
