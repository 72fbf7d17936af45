use crate::{
    client::{Client, Response, Result},
    Oid, Reference,
};
use reqwest::StatusCode;
use serde::Serialize;

/// `GitClient` handles communication with the git related methods of the GitHub API.
///
/// GitHub API docs: https://docs.github.com/en/rest/git
pub struct GitClient<'a> {
    inner: &'a Client,
}

impl<'a> GitClient<'a> {
    pub(super) fn new(client: &'a Client) -> Self {
        Self { inner: client }
    }

    /// List all references in a repository
    ///
    /// GitHub API docs: https://docs.github.com/en/rest/git/refs#list-matching-references
    pub async fn list_refs(&self, owner: &str, repo: &str) -> Result<Response<Vec<Reference>>> {
        let url = format!("repos/{}/{}/git/refs", owner, repo);
        let response = self.inner.get(&url).send().await?;

        self.inner.json(response, StatusCode::OK).await
    }

    /// Create a Ref. `ref_name` must be fully qualified, eg. `refs/heads/main`
    ///
    /// GitHub API docs: https://docs.github.com/en/rest/git/refs#create-a-reference
    pub async fn create_ref(
        &self,
        owner: &str,
        repo: &str,
        ref_name: &str,
        sha: &Oid,
    ) -> Result<Response<Option<Reference>>> {
        #[derive(Debug, Serialize)]
        struct CreateRefRequest<'a> {
            #[serde(rename = "ref")]
            ref_name: &'a str,
            sha: &'a Oid,
        }

        let request = CreateRefRequest { ref_name, sha };
        let url = format!("repos/{}/{}/git/refs", owner, repo);
        let response = self.inner.post(&url).json(&request).send().await?;

        self.inner.maybe_json(response, StatusCode::CREATED).await
    }
}
