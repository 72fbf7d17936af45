use crate::{Error, Result};
use github::{client::CreateRepositoryRequest, BranchProtectionRules};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use std::{fmt, fs, path::Path};

pub const DEFAULT_API_VERSION: &str = "2022-11-28";
pub const DEFAULT_REPOSITORY_NAME: &str = "projectopia";

lazy_static! {
    static ref API_VERSION_RE: Result<Regex, regex::Error> =
        Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$");
    static ref REPOSITORY_NAME_RE: Result<Regex, regex::Error> =
        Regex::new(r"^[A-Za-z0-9_.-]+$");
}

fn is_match(re: &Result<Regex, regex::Error>, text: &str) -> Result<bool> {
    match re {
        Ok(re) => Ok(re.is_match(text)),
        Err(e) => Err(format!("bad pattern: {}", e).into()),
    }
}

/// Case-insensitive `"true"`; anything else is false
pub fn parse_bool_flag(flag: &str) -> bool {
    flag.trim().eq_ignore_ascii_case("true")
}

/// Date-shaped REST API version sent with every request, eg. `2022-11-28`.
/// Only the shape is checked, not whether such a release exists.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiVersion(String);

impl ApiVersion {
    pub fn parse(version: &str) -> Result<Self> {
        if is_match(&API_VERSION_RE, version)? {
            Ok(ApiVersion(version.to_owned()))
        } else {
            Err(Error::validation(format!(
                "api version `{}` is not of the form YYYY-MM-DD",
                version
            )))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ApiVersion {
    fn default() -> Self {
        ApiVersion(DEFAULT_API_VERSION.to_owned())
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Credentials and API version, fixed for the life of a client
#[derive(Clone)]
pub struct ApiConfig {
    token: String,
    version: ApiVersion,
}

impl ApiConfig {
    pub fn new<S: Into<String>>(token: S, version: &str) -> Result<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(Error::validation("api token is empty"));
        }

        Ok(Self {
            token,
            version: ApiVersion::parse(version)?,
        })
    }

    pub fn version(&self) -> &ApiVersion {
        &self.version
    }

    /// A client builder carrying these credentials; base url and timeout
    /// are left at their defaults.
    pub fn client_builder(&self) -> github::client::ClientBuilder {
        github::Client::builder()
            .github_api_token(self.token.as_str())
            .api_version(self.version.as_str())
    }
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("token", &"<redacted>")
            .field("version", &self.version)
            .finish()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "bool")]
pub enum Visibility {
    Public,
    Private,
}

impl Visibility {
    /// `"private"` in any case means private, anything else public
    pub fn from_flag(flag: &str) -> Self {
        if flag.trim().eq_ignore_ascii_case("private") {
            Visibility::Private
        } else {
            Visibility::Public
        }
    }

    pub fn is_private(self) -> bool {
        self == Visibility::Private
    }
}

impl From<bool> for Visibility {
    fn from(private: bool) -> Self {
        if private {
            Visibility::Private
        } else {
            Visibility::Public
        }
    }
}

impl Default for Visibility {
    fn default() -> Self {
        Visibility::Public
    }
}

/// Attributes of the repository a client is bound to
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RepositoryConfig {
    pub name: String,
    pub description: Option<String>,
    pub homepage: String,
    #[serde(rename = "private")]
    pub visibility: Visibility,
    pub is_template: bool,
    /// Create an initial commit so branches can be made right away
    pub auto_init: bool,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_REPOSITORY_NAME.to_owned(),
            description: None,
            homepage: String::new(),
            visibility: Visibility::Public,
            is_template: false,
            auto_init: true,
        }
    }
}

impl RepositoryConfig {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !is_match(&REPOSITORY_NAME_RE, &self.name)? {
            return Err(Error::validation(format!(
                "repository name `{}` may only contain letters, digits, `-`, `_` and `.`",
                self.name
            )));
        }
        Ok(())
    }

    pub fn to_create_request(&self) -> CreateRepositoryRequest {
        CreateRepositoryRequest {
            name: self.name.clone(),
            description: self.description.clone(),
            homepage: self.homepage.clone(),
            private: self.visibility.is_private(),
            is_template: self.is_template,
            auto_init: self.auto_init,
        }
    }
}

/// A branch to create and the existing branch it starts from
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BranchSpec {
    pub name: String,
    #[serde(default = "default_source_branch")]
    pub from: String,
}

fn default_source_branch() -> String {
    crate::DEFAULT_SOURCE_BRANCH.to_owned()
}

/// Optional settings file for what the command line does not cover
///
/// ```toml
/// collaborators = ["hubot"]
///
/// [repository]
/// is_template = true
///
/// [[branches]]
/// name = "develop"
/// from = "main"
///
/// [protection]
/// enforce_admins = true
/// required_linear_history = true
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub repository: RepositoryConfig,
    /// Rules applied to the source branch when protection is requested
    pub protection: Option<BranchProtectionRules>,
    #[serde(default)]
    pub collaborators: Vec<String>,
    #[serde(default)]
    pub branches: Vec<BranchSpec>,
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.repository.validate()?;
        Ok(config)
    }
}
