use thiserror::Error;

#[derive(Error, Debug)]
pub enum VocadexError {
    #[error("HTTP error: {0}")]
    Reqwest(Box<reqwest::Error>),

    #[error("{message}")]
    Backend { message: String, details: Option<String>, hint: Option<String> },

    #[error("Storage bucket \"{0}\" does not exist. Create it in the backend dashboard before uploading audio.")]
    BucketNotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("Backend is not configured. Set the base URL and anon key in settings.json or via VOCADEX_BACKEND_URL / VOCADEX_ANON_KEY.")]
    NotConfigured,

    #[error("{0}")]
    Custom(String),
}

impl VocadexError {
    pub fn backend(message: impl Into<String>) -> Self {
        VocadexError::Backend { message: message.into(), details: None, hint: None }
    }

    /// Full user-facing text, including whatever diagnostic fields the
    /// backend attached to the failure.
    pub fn user_text(&self) -> String {
        match self {
            VocadexError::Backend { message, details, hint } => {
                let mut text = message.clone();
                if let Some(details) = details {
                    text.push_str(&format!("\nDetails: {}", details));
                }
                if let Some(hint) = hint {
                    text.push_str(&format!("\nHint: {}", hint));
                }
                text
            }
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for VocadexError {
    fn from(error: reqwest::Error) -> Self {
        VocadexError::Reqwest(Box::new(error))
    }
}
