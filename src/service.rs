//! Provisioning a repository end to end from the command line

use crate::{
    parse_bool_flag, ApiConfig, BranchSpec, Config, Error, PersonalRepository, RepositoryConfig,
    Result, Visibility,
};
use github::BranchProtectionRules;
use log::{info, warn};
use std::{
    fs::OpenOptions,
    io::Write,
    path::{Path, PathBuf},
};
use structopt::StructOpt;

/// Branch the Pages site is published from
pub const PAGES_BRANCH: &str = "gh-pages";

#[derive(Debug, StructOpt)]
#[structopt(name = "create-repo")]
/// Create a personal GitHub repository, optionally with a Pages site
pub struct CreateOptions {
    #[structopt(long)]
    /// name of the repository to create
    name: String,

    #[structopt(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    /// token of the account the repository is created under
    token: String,

    #[structopt(long, default_value = "main")]
    /// branch the Pages branch is cut from, and the one protected
    branch: String,

    #[structopt(long, default_value = "/")]
    /// directory of the Pages branch the site is served from
    source: String,

    #[structopt(long)]
    /// protect `--branch` with the rules from the config file
    protection: bool,

    #[structopt(long, default_value = "False")]
    /// "true" to publish a Pages site
    pages: String,

    #[structopt(long, default_value = "A GitHub repository")]
    description: String,

    #[structopt(long, default_value = "public")]
    /// "private" to create a private repository
    private: String,

    #[structopt(long, default_value = "2022-11-28")]
    api_version: String,

    #[structopt(short, long, parse(from_os_str))]
    /// config file with collaborators, extra branches and protection rules
    config: Option<PathBuf>,

    #[structopt(long, env = "GITHUB_ENV", parse(from_os_str))]
    /// file the resolved account name is appended to
    github_env: Option<PathBuf>,
}

impl CreateOptions {
    /// Validate the options and settle every free-form flag
    pub fn into_plan(self) -> Result<Plan> {
        let api = ApiConfig::new(self.token, &self.api_version)?;
        let config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };

        let repository = RepositoryConfig {
            name: self.name,
            ..config.repository
        }
        .description(self.description)
        .visibility(Visibility::from_flag(&self.private));
        repository.validate()?;

        let protection = if self.protection {
            Some(config.protection.unwrap_or_default())
        } else {
            None
        };

        Ok(Plan {
            api,
            repository,
            source_branch: self.branch,
            pages_path: self.source,
            pages: parse_bool_flag(&self.pages),
            protection,
            collaborators: config.collaborators,
            branches: config.branches,
            github_env: self.github_env,
        })
    }
}

/// Everything `run_create` does, decided up front
#[derive(Debug)]
pub struct Plan {
    pub api: ApiConfig,
    pub repository: RepositoryConfig,
    pub source_branch: String,
    pub pages_path: String,
    pub pages: bool,
    pub protection: Option<BranchProtectionRules>,
    pub collaborators: Vec<String>,
    pub branches: Vec<BranchSpec>,
    pub github_env: Option<PathBuf>,
}

/// Append `github-username=<login>` to the pipeline output file
pub fn write_github_env(path: Option<&Path>, username: &str) -> Result<()> {
    let path = path.ok_or(Error::MissingEnv("GITHUB_ENV"))?;
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "github-username={}", username)?;

    info!("Wrote github-username to {}", path.display());
    Ok(())
}

/// Runs every step of `plan` against `repo`, carrying on past failures.
/// The account name is written out even when a step failed; the failed steps
/// are then returned as [`Error::Incomplete`].
pub async fn run_create(mut repo: PersonalRepository, plan: &Plan) -> Result<String> {
    let username = repo
        .username()
        .map(ToOwned::to_owned)
        .ok_or("could not resolve the account the token belongs to")?;
    let mut failed = Vec::new();

    // a repository left behind by an earlier run is used as is
    if repo.create().await.is_err() {
        warn!("Looking for an existing repository {}", repo.name());
        if repo.open_existing().await.is_err() {
            failed.push("create repository");
        }
    }

    if !plan.collaborators.is_empty() && repo.add_collaborators(&plan.collaborators).await.is_err()
    {
        failed.push("add collaborators");
    }

    if !plan.branches.is_empty() {
        let branches = plan.branches.iter().map(|b| (&b.name, &b.from));
        if repo.add_branches(branches).await.is_err() {
            failed.push("add branches");
        }
    }

    if let Some(rules) = &plan.protection {
        if repo
            .set_branch_protection_rules(&plan.source_branch, rules)
            .await
            .is_err()
        {
            failed.push("protect branch");
        }
    }

    if plan.pages {
        if repo
            .add_branch(PAGES_BRANCH, &plan.source_branch)
            .await
            .is_err()
        {
            failed.push("add pages branch");
        }

        if repo
            .configure_github_pages(&plan.pages_path, PAGES_BRANCH, None)
            .await
            .is_err()
        {
            failed.push("configure pages");
        }

        if let Err(e) = repo.update_homepage().await {
            warn!("Continuing without a homepage: {}", e);
        }
    }

    write_github_env(plan.github_env.as_deref(), &username)?;

    if failed.is_empty() {
        Ok(username)
    } else {
        Err(Error::Incomplete(failed))
    }
}

pub async fn run(options: CreateOptions) -> Result<()> {
    let plan = options.into_plan()?;
    let repo = PersonalRepository::connect(&plan.api, plan.repository.clone()).await?;

    let username = run_create(repo, &plan).await?;
    info!("Repository {}/{} is ready", username, plan.repository.name);
    Ok(())
}
