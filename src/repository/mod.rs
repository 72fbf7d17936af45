//! A client bound to one account and one repository
//!
//! The client moves through [`RepositoryState`]s as the account is resolved
//! and the repository is created or found. Operations that need a later state
//! fail with [`Error::InvalidState`] without touching the network. Every
//! request outcome, including requests that never got a response, is logged
//! and returned as a `Result`.

use crate::{config::RepositoryConfig, ApiConfig, Error, Result};
use github::{
    branch_ref,
    client::{self, UpdateRepositoryRequest},
    BranchProtectionRules, Client, PagesRequest, PagesSource, Repository,
};
use log::{error, info};


/// Branch new branches are cut from unless told otherwise
pub const DEFAULT_SOURCE_BRANCH: &str = "main";

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum RepositoryState {
    /// The token's account could not be resolved
    Unauthenticated,
    /// The account is known, the repository may or may not exist
    Authenticated,
    /// The repository was created or found by this client
    RepositoryPresent,
}

/// Homepage of the Pages site for `repo`. A repository named
/// `<account>.github.io` is served from the root of the account's domain.
pub fn homepage_url(account: &str, repo: &str) -> String {
    // logins are case-insensitive
    if repo.eq_ignore_ascii_case(&format!("{}.github.io", account)) {
        format!("https://{}.github.io", account)
    } else {
        format!("https://{}.github.io/{}", account, repo)
    }
}

fn log_failure(action: &str, error: &client::Error) {
    match error {
        client::Error::UnexpectedStatus { status, body, .. } => {
            error!("Failed to {}. Status: {} Error: {}", action, status, body)
        }
        e if e.is_timeout() => error!("Failed to {}. Request timed out!", action),
        e => error!("Failed to {}. Error: {}", action, e),
    }
}

fn report<T>(action: &str, result: client::Result<T>) -> Result<T> {
    result.map_err(|e| {
        log_failure(action, &e);
        Error::from(e)
    })
}

#[derive(Debug)]
pub struct PersonalRepository {
    client: Client,
    config: RepositoryConfig,
    /// Login of the token's account, resolved once
    username: Option<String>,
    state: RepositoryState,
}

impl PersonalRepository {
    /// Build a client from `api` and resolve the account it belongs to
    pub async fn connect(api: &ApiConfig, config: RepositoryConfig) -> Result<Self> {
        let client = api.client_builder().build()?;
        Self::with_client(client, config).await
    }

    /// Resolve the account `client` is authenticated as. Failing to do so is
    /// logged and leaves the repository `Unauthenticated`.
    pub async fn with_client(client: Client, config: RepositoryConfig) -> Result<Self> {
        config.validate()?;

        let username = match client.users().get_authenticated().await {
            Ok(response) => {
                let user = response.into_inner();
                info!("Authenticated as {}", user.login);
                Some(user.login)
            }
            Err(e) => {
                log_failure("get username", &e);
                None
            }
        };

        let state = if username.is_some() {
            RepositoryState::Authenticated
        } else {
            RepositoryState::Unauthenticated
        };

        Ok(Self {
            client,
            config,
            username,
            state,
        })
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn state(&self) -> RepositoryState {
        self.state
    }

    pub fn config(&self) -> &RepositoryConfig {
        &self.config
    }

    // Returns the account login when `operation` is allowed in the current state
    fn require(&self, operation: &'static str, required: RepositoryState) -> Result<&str> {
        match &self.username {
            Some(username) if self.state >= required => Ok(username.as_str()),
            _ => {
                let e = Error::InvalidState {
                    operation,
                    required,
                    actual: self.state,
                };
                error!("{}", e);
                Err(e)
            }
        }
    }

    /// Create the repository. The expected status alone means success; the
    /// created repository is returned when the response describes it.
    pub async fn create(&mut self) -> Result<Option<Repository>> {
        self.require("create", RepositoryState::Authenticated)?;

        let request = self.config.to_create_request();
        let result = self
            .client
            .repos()
            .create_for_authenticated_user(&request)
            .await;
        let repository = report("create repository", result)?.into_inner();

        info!("Repository {} created successfully!", self.name());
        self.state = RepositoryState::RepositoryPresent;
        Ok(repository)
    }

    /// Bind to a repository that already exists under the account
    pub async fn open_existing(&mut self) -> Result<Option<Repository>> {
        let owner = self.require("open_existing", RepositoryState::Authenticated)?;

        let result = self.client.repos().get(owner, self.name()).await;
        let repository = report("find repository", result)?.into_inner();

        info!("Using existing repository {}/{}", owner, self.name());
        self.state = RepositoryState::RepositoryPresent;
        Ok(repository)
    }

    pub async fn delete(&mut self) -> Result<()> {
        let owner = self.require("delete", RepositoryState::RepositoryPresent)?;

        let result = self.client.repos().delete(owner, self.name()).await;
        report("delete repository", result)?;

        info!("Repository deleted successfully!");
        self.state = RepositoryState::Authenticated;
        Ok(())
    }

    /// Invite `user` to collaborate on the repository
    pub async fn add_collaborator(&self, user: &str) -> Result<()> {
        let owner = self.require("add_collaborator", RepositoryState::RepositoryPresent)?;

        let result = self
            .client
            .repos()
            .add_collaborator(owner, self.name(), user, None)
            .await;
        report("add collaborator", result)?;

        info!("Collaborator {} added successfully!", user);
        Ok(())
    }

    /// Adds collaborators in order, stopping at the first failure. Those
    /// added before it stay added and are listed in the returned error.
    pub async fn add_collaborators<I, S>(&self, users: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut completed = Vec::new();
        for user in users {
            let user = user.as_ref();
            if let Err(e) = self.add_collaborator(user).await {
                error!("Failed to add collaborators!");
                return Err(Error::Batch {
                    completed,
                    failed: user.to_owned(),
                    source: Box::new(e),
                });
            }
            completed.push(user.to_owned());
        }
        Ok(())
    }

    /// Create `branch` pointing at the current head of `from`
    pub async fn add_branch(&self, branch: &str, from: &str) -> Result<()> {
        let owner = self.require("add_branch", RepositoryState::RepositoryPresent)?;
        let git = self.client.git();

        let refs = report("list branches", git.list_refs(owner, self.name()).await)?;
        let source = match refs.into_inner().into_iter().find(|r| r.is_branch(from)) {
            Some(source) => source,
            None => {
                let e = Error::RefNotFound(from.to_owned());
                error!("Failed to add branch. Error: {}", e);
                return Err(e);
            }
        };

        let result = git
            .create_ref(owner, self.name(), &branch_ref(branch), &source.object.sha)
            .await;
        report("add branch", result)?;

        info!("Branch {} added successfully!", branch);
        Ok(())
    }

    /// Creates `(branch, from)` pairs in order, stopping at the first
    /// failure. Branches created before it are kept.
    pub async fn add_branches<I, B, F>(&self, branches: I) -> Result<()>
    where
        I: IntoIterator<Item = (B, F)>,
        B: AsRef<str>,
        F: AsRef<str>,
    {
        let mut completed = Vec::new();
        for (branch, from) in branches {
            let branch = branch.as_ref();
            if let Err(e) = self.add_branch(branch, from.as_ref()).await {
                error!("Failed to add branches!");
                return Err(Error::Batch {
                    completed,
                    failed: branch.to_owned(),
                    source: Box::new(e),
                });
            }
            completed.push(branch.to_owned());
        }
        Ok(())
    }

    pub async fn set_branch_protection_rules(
        &self,
        branch: &str,
        rules: &BranchProtectionRules,
    ) -> Result<()> {
        let owner = self.require(
            "set_branch_protection_rules",
            RepositoryState::RepositoryPresent,
        )?;

        let result = self
            .client
            .repos()
            .update_branch_protection(owner, self.name(), branch, rules)
            .await;
        report("set branch protection rules", result)?;

        info!("Branch protection rules set successfully!");
        Ok(())
    }

    /// Publish a Pages site from `path` on `branch`
    pub async fn configure_github_pages(
        &self,
        path: &str,
        branch: &str,
        cname: Option<&str>,
    ) -> Result<()> {
        let owner = self.require("configure_github_pages", RepositoryState::RepositoryPresent)?;

        let request = pages_request(path, branch, cname);
        let result = self
            .client
            .repos()
            .create_pages_site(owner, self.name(), &request)
            .await;
        report("configure GitHub Pages", result)?;

        info!("GitHub Pages configured successfully!");
        Ok(())
    }

    pub async fn update_github_pages(
        &self,
        path: &str,
        branch: &str,
        cname: Option<&str>,
    ) -> Result<()> {
        let owner = self.require("update_github_pages", RepositoryState::RepositoryPresent)?;

        let request = pages_request(path, branch, cname);
        let result = self
            .client
            .repos()
            .update_pages_site(owner, self.name(), &request)
            .await;
        report("update GitHub Pages", result)?;

        info!("GitHub Pages updated successfully!");
        Ok(())
    }

    pub async fn delete_github_pages(&self) -> Result<()> {
        let owner = self.require("delete_github_pages", RepositoryState::RepositoryPresent)?;

        let result = self
            .client
            .repos()
            .delete_pages_site(owner, self.name())
            .await;
        report("delete GitHub Pages", result)?;

        info!("GitHub Pages deleted successfully!");
        Ok(())
    }

    /// Point the repository homepage at its Pages site, see [`homepage_url`].
    /// Returns the homepage that was set.
    pub async fn update_homepage(&self) -> Result<String> {
        let owner = self.require("update_homepage", RepositoryState::RepositoryPresent)?;

        let homepage = homepage_url(owner, self.name());
        let request = UpdateRepositoryRequest {
            homepage: Some(homepage.clone()),
            ..Default::default()
        };
        let result = self
            .client
            .repos()
            .update(owner, self.name(), &request)
            .await;
        report("add homepage", result)?;

        info!("Homepage {} added successfully!", homepage);
        Ok(homepage)
    }
}

fn pages_request(path: &str, branch: &str, cname: Option<&str>) -> PagesRequest {
    let request = PagesRequest::new(PagesSource::new(branch, path));
    match cname {
        Some(cname) => request.cname(cname),
        None => request,
    }
}
