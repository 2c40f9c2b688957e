use reqwest::{StatusCode, blocking::Response};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("record is missing required field {0:?}")]
    MissingField(&'static str),
}

/// A failed round trip to the API.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{status} - {body}")]
    Status { status: StatusCode, body: String },
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
    #[error("unable to decode response {body:?}: {source}")]
    Decode {
        body: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    pub(crate) fn from_response(resp: Response) -> Self {
        let status = resp.status();
        let body = resp
            .text()
            .unwrap_or_else(|e| format!("unable to read response body: {e}"));

        Self::Status { status, body }
    }

    /// The HTTP status the server answered with, if it answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status(),
            ApiError::Decode { .. } => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error(transparent)]
    Rejected(#[from] ApiError),
    #[error("token not found in response")]
    MissingToken,
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("authentication failed: {0}")]
    Authentication(#[from] AuthError),
    #[error("API request failed: {0}")]
    Request(#[from] ApiError),
}

#[derive(Error, Debug)]
pub enum ClientBuilderError {
    #[error("missing field: {0}")]
    MissingField(String),
    #[error("base URL {0:?} cannot carry a path")]
    CannotBeABase(String),
    #[error(transparent)]
    UrlParse(#[from] url::ParseError),
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),
}
