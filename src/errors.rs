use reqwest::StatusCode;

/// Failure of a single API call.
///
/// `status` is `None` when no usable response came back: the request never
/// completed or the body was not JSON.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{}", .message.as_deref().unwrap_or("request rejected"))]
    Rejected {
        status: StatusCode,
        message: Option<String>,
    },

    #[error("{0}")]
    Transport(String),

    #[error("no active session")]
    MissingSession,
}

impl ApiError {
    pub fn rejected(status: StatusCode, message: Option<String>) -> Self {
        Self::Rejected { status, message }
    }

    pub fn transport(err: impl std::error::Error) -> Self {
        Self::Transport(err.to_string())
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }

    /// Server-supplied error text, or `fallback` when the server sent none.
    pub fn message_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self {
            Self::Rejected {
                message: Some(message),
                ..
            } => message,
            _ => fallback,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self::transport(err)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::transport(err)
    }
}
