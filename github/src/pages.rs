use serde::{Deserialize, Serialize};

/// Where a Pages site is built from: a branch and a directory within it
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PagesSource {
    pub branch: String,
    pub path: String,
}

impl PagesSource {
    /// The path is made absolute (`docs` -> `/docs`) since the API only
    /// accepts paths rooted at the top of the branch.
    pub fn new<B: Into<String>, P: AsRef<str>>(branch: B, path: P) -> Self {
        let path = path.as_ref().trim_matches('/');
        Self {
            branch: branch.into(),
            path: format!("/{}", path),
        }
    }
}

/// Request payload used to create or update a Pages site
///
/// GitHub API docs: https://docs.github.com/en/rest/pages/pages
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PagesRequest {
    pub source: PagesSource,
    /// Custom domain for the site
    #[serde(default)]
    pub cname: Option<String>,
}

impl PagesRequest {
    pub fn new(source: PagesSource) -> Self {
        Self {
            source,
            cname: None,
        }
    }

    pub fn cname<S: Into<String>>(mut self, cname: S) -> Self {
        self.cname = Some(cname.into());
        self
    }
}
