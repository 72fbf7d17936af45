use super::RepositoryClient;
use crate::client::{Response, Result};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

/// Permission granted to a collaborator
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    Pull,
    Triage,
    Push,
    Maintain,
    Admin,
}

// Implementation from the collaborators endpoint
// https://docs.github.com/en/rest/collaborators/collaborators
impl RepositoryClient<'_> {
    /// Add a user as a collaborator. Github answers `201` when an invitation
    /// is created; the user only gains access once it is accepted.
    ///
    /// GitHub API docs: https://docs.github.com/en/rest/collaborators/collaborators#add-a-repository-collaborator
    pub async fn add_collaborator(
        &self,
        owner: &str,
        repo: &str,
        user: &str,
        permission: Option<Permission>,
    ) -> Result<Response<()>> {
        #[derive(Debug, Serialize)]
        struct AddCollaboratorRequest {
            #[serde(skip_serializing_if = "Option::is_none")]
            permission: Option<Permission>,
        }

        let request = AddCollaboratorRequest { permission };
        let url = format!("repos/{}/{}/collaborators/{}", owner, repo, user);
        let response = self.inner.put(&url).json(&request).send().await?;

        self.inner.empty(response, StatusCode::CREATED).await
    }
}
