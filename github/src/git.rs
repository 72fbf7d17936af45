use super::{NodeId, Oid};
use serde::Deserialize;

const BRANCH_REF_PREFIX: &str = "refs/heads/";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GitObjectType {
    Commit,
    Tree,
    Blob,
    Tag,
}

#[derive(Clone, Debug, Deserialize)]
pub struct GitObject {
    pub sha: Oid,
    #[serde(rename = "type")]
    pub object_type: GitObjectType,
    pub url: String,
}

/// A git reference as returned by the git refs endpoints
///
/// GitHub API docs: https://docs.github.com/en/rest/git/refs
#[derive(Clone, Debug, Deserialize)]
pub struct Reference {
    #[serde(rename = "ref")]
    pub ref_name: String,
    pub node_id: NodeId,
    pub url: String,
    pub object: GitObject,
}

impl Reference {
    /// The branch name if this reference points into `refs/heads/`
    pub fn branch_name(&self) -> Option<&str> {
        self.ref_name.strip_prefix(BRANCH_REF_PREFIX)
    }

    pub fn is_branch(&self, branch: &str) -> bool {
        self.branch_name() == Some(branch)
    }
}

/// Fully qualified ref name for a branch, eg. `main` -> `refs/heads/main`
pub fn branch_ref(branch: &str) -> String {
    format!("{}{}", BRANCH_REF_PREFIX, branch)
}
