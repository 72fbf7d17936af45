use super::RepositoryClient;
use crate::{
    client::{Response, Result},
    PagesRequest,
};
use reqwest::StatusCode;

// Implementation for the pages endpoint
// https://docs.github.com/en/rest/pages/pages
impl RepositoryClient<'_> {
    /// Enable a Pages site
    ///
    /// GitHub API docs: https://docs.github.com/en/rest/pages/pages#create-a-github-pages-site
    pub async fn create_pages_site(
        &self,
        owner: &str,
        repo: &str,
        request: &PagesRequest,
    ) -> Result<Response<()>> {
        let url = format!("repos/{}/{}/pages", owner, repo);
        let response = self.inner.post(&url).json(request).send().await?;

        self.inner.empty(response, StatusCode::CREATED).await
    }

    /// Update information about a Pages site
    ///
    /// GitHub API docs: https://docs.github.com/en/rest/pages/pages#update-information-about-a-github-pages-site
    pub async fn update_pages_site(
        &self,
        owner: &str,
        repo: &str,
        request: &PagesRequest,
    ) -> Result<Response<()>> {
        let url = format!("repos/{}/{}/pages", owner, repo);
        let response = self.inner.put(&url).json(request).send().await?;

        self.inner.empty(response, StatusCode::NO_CONTENT).await
    }

    /// Disable a Pages site
    ///
    /// GitHub API docs: https://docs.github.com/en/rest/pages/pages#delete-a-github-pages-site
    pub async fn delete_pages_site(&self, owner: &str, repo: &str) -> Result<Response<()>> {
        let url = format!("repos/{}/{}/pages", owner, repo);
        let response = self.inner.delete(&url).send().await?;

        self.inner.empty(response, StatusCode::NO_CONTENT).await
    }
}
