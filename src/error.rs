use crate::repository::RepositoryState;
use std::{borrow::Cow, io};
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Io error: {0}")]
    Io(#[from] io::Error),

    #[error("github error: {0}")]
    Github(#[from] github::client::Error),

    #[error("toml parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Malformed configuration, caught before any request is sent
    #[error("invalid configuration: {0}")]
    Validation(Cow<'static, str>),

    #[error("`{operation}` needs the client to be {required:?} but it is {actual:?}")]
    InvalidState {
        operation: &'static str,
        required: RepositoryState,
        actual: RepositoryState,
    },

    #[error("branch `{0}` not found")]
    RefNotFound(String),

    /// A batch stopped at `failed`; everything in `completed` was applied
    #[error("`{failed}` failed after {} succeeded: {source}", .completed.len())]
    Batch {
        completed: Vec<String>,
        failed: String,
        source: Box<Error>,
    },

    /// Provisioning ran to the end but these steps failed
    #[error("provisioning incomplete, failed steps: {}", .0.join(", "))]
    Incomplete(Vec<&'static str>),

    #[error("environment variable `{0}` is not set")]
    MissingEnv(&'static str),

    #[error("`{0}`")]
    Message(Cow<'static, str>),
}

impl Error {
    pub(crate) fn validation<S: Into<Cow<'static, str>>>(message: S) -> Self {
        Error::Validation(message.into())
    }

    /// Status of a response the API answered with but that was not the
    /// expected one
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Github(e) => e.status().map(|s| s.as_u16()),
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
