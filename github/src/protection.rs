//! Branch protection rule set
//!
//! GitHub API docs: https://docs.github.com/en/rest/branches/branch-protection#update-branch-protection
//!
//! The four nested rules are always sent. A `None` rule is sent as `null`,
//! which the API reads as "no such rule".

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RequiredStatusChecks {
    /// Require branches to be up to date before merging
    #[serde(default)]
    pub strict: bool,
    /// Status checks that must pass before merging
    #[serde(default)]
    pub contexts: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RequiredPullRequestReviews {
    #[serde(default)]
    pub dismiss_stale_reviews: bool,
    #[serde(default)]
    pub require_code_owner_reviews: bool,
    /// Between 0 and 6
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_approving_review_count: Option<u8>,
    #[serde(default)]
    pub require_last_push_approval: bool,
}

/// Who may push to the protected branch
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BranchRestrictions {
    #[serde(default)]
    pub users: Vec<String>,
    #[serde(default)]
    pub teams: Vec<String>,
    #[serde(default)]
    pub apps: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BranchProtectionRules {
    pub required_status_checks: Option<RequiredStatusChecks>,
    pub enforce_admins: Option<bool>,
    pub required_pull_request_reviews: Option<RequiredPullRequestReviews>,
    pub restrictions: Option<BranchRestrictions>,
    #[serde(default)]
    pub required_linear_history: bool,
    #[serde(default)]
    pub allow_force_pushes: bool,
    #[serde(default)]
    pub allow_deletions: bool,
    #[serde(default)]
    pub block_creations: bool,
    #[serde(default)]
    pub required_conversation_resolution: bool,
    #[serde(default)]
    pub lock_branch: bool,
    #[serde(default)]
    pub allow_fork_syncing: bool,
}
