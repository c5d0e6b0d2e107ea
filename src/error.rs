use reqwest::StatusCode;

pub type Result<T> = std::result::Result<T, SearchError>;

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The submit endpoint answered with a non-success status.
    #[error("Search error: response {}, \"{}\"", .status.as_u16(), .body)]
    Submission { status: StatusCode, body: String },

    /// The results endpoint answered with a non-success status.
    #[error("Search results error: response {}, \"{}\"", .status.as_u16(), .body)]
    Results { status: StatusCode, body: String },

    #[error("Malformed {context} response: {source}")]
    Parse {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Malformed {context} response: missing field `{field}`")]
    MissingField {
        context: &'static str,
        field: &'static str,
    },

    #[error("Search result references unknown identifier {0}")]
    UnknownIdentifier(String),

    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl SearchError {
    pub fn submission(status: StatusCode, body: &str) -> Self {
        SearchError::Submission {
            status,
            body: body.trim().to_string(),
        }
    }

    pub fn results(status: StatusCode, body: &str) -> Self {
        SearchError::Results {
            status,
            body: body.trim().to_string(),
        }
    }

    /// HTTP status carried by the error, if the service produced one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            SearchError::Submission { status, .. } | SearchError::Results { status, .. } => {
                Some(*status)
            }
            SearchError::Transport(e) => e.status(),
            _ => None,
        }
    }
}
