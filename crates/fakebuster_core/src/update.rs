use crate::{AnalysisOutcome, AppState, Effect, Msg, Notification};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::ArticleChanged(text) => {
            state.set_article(text);
            Vec::new()
        }
        Msg::SubmitClicked => {
            if !state.has_submittable_article() {
                return (state, vec![Effect::Notify(Notification::EmptyInput)]);
            }
            // A submission while another is in flight supersedes it; the older
            // response is dropped by the generation check below.
            let generation = state.begin_submission();
            vec![Effect::Classify {
                generation,
                article: state.article().to_owned(),
            }]
        }
        Msg::ClearClicked => {
            state.clear();
            Vec::new()
        }
        Msg::AnalysisCompleted {
            generation,
            outcome,
        } => {
            if !state.is_current(generation) {
                return (state, Vec::new());
            }
            match outcome {
                AnalysisOutcome::Succeeded(result) => {
                    state.apply_success(result);
                    Vec::new()
                }
                AnalysisOutcome::Failed { .. } => {
                    state.apply_failure();
                    vec![Effect::Notify(Notification::BackendUnavailable)]
                }
            }
        }
    };

    (state, effects)
}
