use log::debug;
use reqwest::{header, Client as ReqwestClient, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

mod error;
mod git;
mod repos;
mod users;

#[cfg(test)]
mod test;

pub use error::{Error, GithubClientError, Result};
pub use git::GitClient;
pub use repos::{CreateRepositoryRequest, Permission, RepositoryClient, UpdateRepositoryRequest};
pub use users::UserClient;

// Constants
const DEFAULT_BASE_URL: &str = "https://api.github.com/";
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const HEADER_API_VERSION: &str = "X-GitHub-Api-Version";

// https://docs.github.com/en/rest/overview/media-types
const MEDIA_TYPE_JSON: &str = "application/vnd.github+json";

#[derive(Debug)]
pub struct ClientBuilder {
    base_url: Option<String>,
    user_agent: Option<String>,
    github_api_token: Option<String>,
    api_version: Option<String>,
    timeout: Option<Duration>,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self {
            base_url: None,
            user_agent: None,
            github_api_token: None,
            api_version: None,
            timeout: None,
        }
    }

    pub fn base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn github_api_token<S: Into<String>>(mut self, github_api_token: S) -> Self {
        self.github_api_token = Some(github_api_token.into());
        self
    }

    /// Value of the `X-GitHub-Api-Version` header, eg. `2022-11-28`
    pub fn api_version<S: Into<String>>(mut self, api_version: S) -> Self {
        self.api_version = Some(api_version.into());
        self
    }

    /// Upper bound on each request, from connect until the body is read
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<Client> {
        let mut base_url = self.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Url::parse(&base_url)?;

        let user_agent = self.user_agent.unwrap_or_else(|| USER_AGENT.to_owned());
        let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT);

        let mut headers = header::HeaderMap::new();
        headers.insert(header::ACCEPT, header::HeaderValue::from_static(MEDIA_TYPE_JSON));

        if let Some(token) = &self.github_api_token {
            let mut value = header::HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| e.to_string())?;
            value.set_sensitive(true);
            headers.insert(header::AUTHORIZATION, value);
        }

        if let Some(version) = &self.api_version {
            headers.insert(
                HEADER_API_VERSION,
                header::HeaderValue::from_str(version).map_err(|e| e.to_string())?,
            );
        }

        let client = ReqwestClient::builder()
            .user_agent(&user_agent)
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Client {
            base_url,
            user_agent,
            client,
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A response from Github along with its status
#[derive(Debug)]
pub struct Response<T> {
    status: StatusCode,
    inner: T,
}

impl<T> Response<T> {
    pub fn new(status: StatusCode, inner: T) -> Self {
        Self { status, inner }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }

    pub fn into_inner(self) -> T {
        self.inner
    }
}

#[derive(Debug)]
pub struct Client {
    /// Base URL to use for API requests. Defaults to the public GitHub API,
    /// but can be overridden for use with GitHub Enterprise. Always
    /// terminated with a trailing slash.
    base_url: String,

    /// User agent string sent when communicating with GitHub APIs
    #[allow(unused)]
    user_agent: String,

    /// Client used to make http requests
    client: ReqwestClient,
}

impl Client {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get(&self, url: &str) -> RequestBuilder {
        self.request(Method::GET, url)
    }

    fn post(&self, url: &str) -> RequestBuilder {
        self.request(Method::POST, url)
    }

    fn put(&self, url: &str) -> RequestBuilder {
        self.request(Method::PUT, url)
    }

    fn patch(&self, url: &str) -> RequestBuilder {
        self.request(Method::PATCH, url)
    }

    fn delete(&self, url: &str) -> RequestBuilder {
        self.request(Method::DELETE, url)
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, url);
        debug!("Github Request: {} {}", method, url);
        self.client.request(method, &url)
    }

    // Every endpoint documents exactly one success status; anything else is
    // reported with the body Github sent back so it can be logged.
    async fn expect_status(
        &self,
        response: reqwest::Response,
        expected: StatusCode,
    ) -> Result<Response<String>> {
        debug!("Github Response: {:#?}", response);

        let status = response.status();
        let body = response.text().await?;

        if status != expected {
            return Err(Error::unexpected_status(status, body));
        }

        Ok(Response::new(status, body))
    }

    async fn json<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
        expected: StatusCode,
    ) -> Result<Response<T>> {
        let response = self.expect_status(response, expected).await?;

        match serde_json::from_str(response.inner()) {
            Ok(t) => Ok(Response::new(response.status(), t)),
            Err(e) => {
                debug!("Error deserializing: {}\nContent: {}", e, response.inner());
                Err(e.into())
            }
        }
    }

    // For endpoints where the status alone decides success: a body that does
    // not decode into `T` is logged and dropped.
    async fn maybe_json<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
        expected: StatusCode,
    ) -> Result<Response<Option<T>>> {
        let response = self.expect_status(response, expected).await?;

        let inner = match serde_json::from_str(response.inner()) {
            Ok(t) => Some(t),
            Err(e) => {
                debug!("Ignoring response body: {}\nContent: {}", e, response.inner());
                None
            }
        };
        Ok(Response::new(response.status(), inner))
    }

    async fn empty(
        &self,
        response: reqwest::Response,
        expected: StatusCode,
    ) -> Result<Response<()>> {
        let response = self.expect_status(response, expected).await?;
        Ok(Response::new(response.status(), ()))
    }

    pub fn users(&self) -> UserClient {
        UserClient::new(self)
    }

    pub fn repos(&self) -> RepositoryClient {
        RepositoryClient::new(self)
    }

    pub fn git(&self) -> GitClient {
        GitClient::new(self)
    }
}
