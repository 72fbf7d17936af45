//! Error type for Github Client

use reqwest::StatusCode;
use serde::Deserialize;
use std::{borrow::Cow, fmt};
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum Error {
    /// The request never produced a response: timeout, refused connection, ...
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid base url: {0}")]
    Url(#[from] url::ParseError),

    #[error("`{0}`")]
    Message(Cow<'static, str>),

    #[error("unexpected status `{status}`: {error}")]
    UnexpectedStatus {
        status: StatusCode,
        error: GithubClientError,
        body: String,
    },
}

impl Error {
    pub(super) fn unexpected_status(status: StatusCode, body: String) -> Self {
        let error = serde_json::from_str(&body).unwrap_or_default();
        Error::UnexpectedStatus {
            status,
            error,
            body,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Reqwest(e) if e.is_timeout())
    }

    /// Status code of the response, if one was received
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::UnexpectedStatus { status, .. } => Some(*status),
            Error::Reqwest(e) => e.status(),
            _ => None,
        }
    }
}

impl From<&'static str> for Error {
    fn from(error: &'static str) -> Self {
        Error::Message(error.into())
    }
}

impl From<String> for Error {
    fn from(error: String) -> Self {
        Error::Message(error.into())
    }
}

// Github Error Responses
// https://docs.github.com/en/rest/overview/resources-in-the-rest-api#client-errors
#[derive(Debug, Default, Deserialize)]
pub struct GithubClientError {
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Vec<GithubClientErrorType>,
    pub documentation_url: Option<String>,
}

impl fmt::Display for GithubClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message.as_deref().unwrap_or("no message"))?;
        for error in &self.errors {
            match error {
                GithubClientErrorType::Message(message) => write!(f, "; {}", message)?,
                GithubClientErrorType::Code {
                    resource,
                    field,
                    code,
                } => write!(f, "; {}.{} {}", resource, field, code)?,
            }
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum GithubClientErrorType {
    Message(String),
    Code {
        resource: String,
        field: String,
        code: String,
    },
}
