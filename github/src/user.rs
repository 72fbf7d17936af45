use super::NodeId;
use serde::Deserialize;

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub enum UserType {
    Bot,
    Organization,
    User,
}

#[derive(Clone, Debug, Deserialize)]
pub struct User {
    pub login: String,
    pub id: u64,
    pub node_id: NodeId,
    pub avatar_url: String,
    pub url: String,
    pub html_url: String,
    pub repos_url: String,
    #[serde(rename = "type")]
    pub user_type: UserType,
    pub site_admin: bool,
    /// Only present when fetching the authenticated user
    #[serde(default)]
    pub name: Option<String>,
}

#[cfg(test)]
mod test {
    use super::{User, UserType};

    #[test]
    fn authenticated_user() {
        const USER_JSON: &str = r#"
            {
                "login": "octocat",
                "id": 1,
                "node_id": "MDQ6VXNlcjE=",
                "avatar_url": "https://github.com/images/error/octocat_happy.gif",
                "gravatar_id": "",
                "url": "https://api.github.com/users/octocat",
                "html_url": "https://github.com/octocat",
                "repos_url": "https://api.github.com/users/octocat/repos",
                "type": "User",
                "site_admin": false,
                "name": "monalisa octocat",
                "public_repos": 2,
                "private_gists": 81,
                "two_factor_authentication": true
            }
        "#;

        let user: User = serde_json::from_str(USER_JSON).unwrap();
        assert_eq!(user.login, "octocat");
        assert_eq!(user.user_type, UserType::User);
        assert_eq!(user.name.as_deref(), Some("monalisa octocat"));
    }

    #[test]
    fn org() {
        const ORGANIZATION_JSON: &str = r#"
            {
                "login": "Octocoders",
                "id": 38302899,
                "node_id": "MDEyOk9yZ2FuaXphdGlvbjM4MzAyODk5",
                "avatar_url": "https://avatars1.githubusercontent.com/u/38302899?v=4",
                "url": "https://api.github.com/users/Octocoders",
                "html_url": "https://github.com/Octocoders",
                "repos_url": "https://api.github.com/users/Octocoders/repos",
                "type": "Organization",
                "site_admin": false
            }
        "#;

        let user: User = serde_json::from_str(ORGANIZATION_JSON).unwrap();
        assert_eq!(user.user_type, UserType::Organization);
        assert!(user.name.is_none());
    }
}
