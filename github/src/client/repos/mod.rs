use crate::{
    client::{Client, Response, Result},
    Repository,
};
use reqwest::StatusCode;
use serde::Serialize;

mod branches;
mod collaborators;
mod pages;

pub use collaborators::Permission;

/// Request payload for creating a repository owned by the authenticated user
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CreateRepositoryRequest {
    pub name: String,
    pub description: Option<String>,
    pub homepage: String,
    pub private: bool,
    pub is_template: bool,
    /// Create an initial commit with an empty README
    pub auto_init: bool,
}

/// Request payload for updating a repository. Unset fields are left as is.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct UpdateRepositoryRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private: Option<bool>,
}

/// `RepositoryClient` handles communication with the Repository related methods of the GitHub API.
///
/// GitHub API docs: https://docs.github.com/en/rest/repos
pub struct RepositoryClient<'a> {
    inner: &'a Client,
}

impl<'a> RepositoryClient<'a> {
    pub(super) fn new(client: &'a Client) -> Self {
        Self { inner: client }
    }

    /// Create a repository for the authenticated user. The created repository
    /// is returned when the response body describes one.
    ///
    /// GitHub API docs: https://docs.github.com/en/rest/repos/repos#create-a-repository-for-the-authenticated-user
    pub async fn create_for_authenticated_user(
        &self,
        request: &CreateRepositoryRequest,
    ) -> Result<Response<Option<Repository>>> {
        let response = self.inner.post("user/repos").json(request).send().await?;

        self.inner.maybe_json(response, StatusCode::CREATED).await
    }

    /// Get a repository
    ///
    /// GitHub API docs: https://docs.github.com/en/rest/repos/repos#get-a-repository
    pub async fn get(&self, owner: &str, repo: &str) -> Result<Response<Option<Repository>>> {
        let url = format!("repos/{}/{}", owner, repo);
        let response = self.inner.get(&url).send().await?;

        self.inner.maybe_json(response, StatusCode::OK).await
    }

    /// Update a repository
    ///
    /// GitHub API docs: https://docs.github.com/en/rest/repos/repos#update-a-repository
    pub async fn update(
        &self,
        owner: &str,
        repo: &str,
        request: &UpdateRepositoryRequest,
    ) -> Result<Response<Option<Repository>>> {
        let url = format!("repos/{}/{}", owner, repo);
        let response = self.inner.patch(&url).json(request).send().await?;

        self.inner.maybe_json(response, StatusCode::OK).await
    }

    /// Delete a repository
    ///
    /// GitHub API docs: https://docs.github.com/en/rest/repos/repos#delete-a-repository
    pub async fn delete(&self, owner: &str, repo: &str) -> Result<Response<()>> {
        let url = format!("repos/{}/{}", owner, repo);
        let response = self.inner.delete(&url).send().await?;

        self.inner.empty(response, StatusCode::NO_CONTENT).await
    }
}
