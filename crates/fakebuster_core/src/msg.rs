#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User edited the article text box.
    ArticleChanged(String),
    /// User asked for the current article to be checked.
    SubmitClicked,
    /// User clicked Clear.
    ClearClicked,
    /// Backend call for `generation` resolved.
    AnalysisCompleted {
        generation: crate::Generation,
        outcome: AnalysisOutcome,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    Succeeded(crate::AnalysisResult),
    /// The reason is for logs only; the user sees a generic notification.
    Failed { reason: String },
}
