use super::RepositoryClient;
use crate::{
    client::{Response, Result},
    BranchProtectionRules,
};
use reqwest::StatusCode;

// Implementation for the branch protection endpoint
// https://docs.github.com/en/rest/branches/branch-protection
impl RepositoryClient<'_> {
    /// Replace the protection rules of a branch
    ///
    /// GitHub API docs: https://docs.github.com/en/rest/branches/branch-protection#update-branch-protection
    pub async fn update_branch_protection(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
        rules: &BranchProtectionRules,
    ) -> Result<Response<()>> {
        let url = format!("repos/{}/{}/branches/{}/protection", owner, repo, branch);
        let response = self.inner.put(&url).json(rules).send().await?;

        self.inner.empty(response, StatusCode::OK).await
    }
}
