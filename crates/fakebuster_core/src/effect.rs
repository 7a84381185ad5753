use crate::Generation;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send the article to the classification backend.
    Classify {
        generation: Generation,
        article: String,
    },
    /// Show a one-off message to the user.
    Notify(Notification),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    EmptyInput,
    BackendUnavailable,
}

impl Notification {
    pub fn message(self) -> &'static str {
        match self {
            Notification::EmptyInput => "Please enter an article.",
            Notification::BackendUnavailable => {
                "Error contacting backend. Make sure backend is running and API keys are configured."
            }
        }
    }
}
