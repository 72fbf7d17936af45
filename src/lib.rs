mod config;
mod error;
mod repository;
pub mod service;

#[cfg(test)]
mod mock_github;

pub use config::{
    parse_bool_flag, ApiConfig, ApiVersion, BranchSpec, Config, RepositoryConfig, Visibility,
    DEFAULT_API_VERSION, DEFAULT_REPOSITORY_NAME,
};
pub use error::{Error, Result};
pub use repository::{homepage_url, PersonalRepository, RepositoryState, DEFAULT_SOURCE_BRANCH};
pub use service::{run_create, write_github_env, CreateOptions, Plan, PAGES_BRANCH};
