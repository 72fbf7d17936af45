use crate::{
    client::{Client, Response, Result},
    User,
};
use reqwest::StatusCode;

/// `UserClient` handles communication with the user related methods of the GitHub API.
///
/// GitHub API docs: https://docs.github.com/en/rest/users/users
pub struct UserClient<'a> {
    inner: &'a Client,
}

impl<'a> UserClient<'a> {
    pub(super) fn new(client: &'a Client) -> Self {
        Self { inner: client }
    }

    /// Get the user the API token belongs to
    ///
    /// GitHub API docs: https://docs.github.com/en/rest/users/users#get-the-authenticated-user
    pub async fn get_authenticated(&self) -> Result<Response<User>> {
        let response = self.inner.get("user").send().await?;

        self.inner.json(response, StatusCode::OK).await
    }
}
