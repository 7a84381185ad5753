use std::sync::Arc;

use fakebuster_core::{
    update, AnalysisOutcome, AppState, AppViewModel, Effect, Generation, Msg, Notification,
};
use fakebuster_logging::{fb_debug, fb_warn};

use crate::{ClassifyError, Classifier};

/// Delivers user-facing notifications (alerts, toasts, status lines).
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("article text is empty")]
    EmptyInput,
    #[error("classification failed: {0}")]
    Backend(#[from] ClassifyError),
}

/// Drives one analysis session directly against a [`Classifier`].
///
/// Every state change goes through [`fakebuster_core::update`]; the only
/// suspension point is the backend call inside [`AnalysisController::submit`].
pub struct AnalysisController<C> {
    state: AppState,
    classifier: C,
    notifier: Arc<dyn Notifier>,
}

impl<C: Classifier> AnalysisController<C> {
    pub fn new(classifier: C, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            state: AppState::new(),
            classifier,
            notifier,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn view(&self) -> AppViewModel {
        self.state.view()
    }

    pub fn set_article_text(&mut self, text: impl Into<String>) {
        self.dispatch(Msg::ArticleChanged(text.into()));
    }

    pub fn clear(&mut self) {
        self.dispatch(Msg::ClearClicked);
    }

    /// Sends the current article for classification and waits for the verdict.
    ///
    /// Blank input fails with [`SubmitError::EmptyInput`] without touching the
    /// backend. Backend failures leave the controller in `Failed` and are
    /// returned as [`SubmitError::Backend`]; either way a notification has
    /// already been delivered.
    pub async fn submit(&mut self) -> Result<(), SubmitError> {
        let Some((generation, article)) = self.dispatch(Msg::SubmitClicked) else {
            return Err(SubmitError::EmptyInput);
        };

        let (outcome, error) = match self.classifier.classify(&article).await {
            Ok(result) => (AnalysisOutcome::Succeeded(result), None),
            Err(err) => {
                fb_warn!("classification {} failed: {}", generation, err);
                (
                    AnalysisOutcome::Failed {
                        reason: err.to_string(),
                    },
                    Some(err),
                )
            }
        };
        self.dispatch(Msg::AnalysisCompleted {
            generation,
            outcome,
        });

        match error {
            Some(err) => Err(SubmitError::Backend(err)),
            None => Ok(()),
        }
    }

    /// Applies `msg` and runs its effects; returns the classify request, if any.
    fn dispatch(&mut self, msg: Msg) -> Option<(Generation, String)> {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        state.consume_dirty();
        self.state = state;

        let mut request = None;
        for effect in effects {
            match effect {
                Effect::Notify(notification) => {
                    fb_debug!("notify {:?}", notification);
                    self.notifier.notify(notification);
                }
                Effect::Classify {
                    generation,
                    article,
                } => request = Some((generation, article)),
            }
        }
        request
    }
}
