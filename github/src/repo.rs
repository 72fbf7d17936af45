use super::{DateTime, NodeId, User};
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub node_id: NodeId,
    pub name: String,
    pub full_name: String,
    pub private: bool,
    pub owner: User,
    pub html_url: String,
    pub description: Option<String>,
    pub fork: bool,
    pub url: String,
    pub git_refs_url: String,
    pub collaborators_url: String,
    pub clone_url: String,
    pub ssh_url: String,
    pub homepage: Option<String>,
    pub size: u64,
    pub default_branch: String,
    #[serde(default)]
    pub is_template: bool,
    pub has_pages: bool,
    pub archived: bool,
    pub disabled: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
    pub pushed_at: Option<DateTime>,
}
