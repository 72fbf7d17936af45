//! An in-process stand-in for the Github REST API
//!
//! Routes are keyed by request line (`"POST /user/repos"`) and answer with a
//! scripted status and body. Unknown routes answer `404`. Every request is
//! recorded along with its JSON body.

use hyper::{
    body,
    service::{make_service_fn, service_fn},
    Body, Request, Response, Server,
};
use serde_json::Value;
use std::{
    collections::HashMap,
    convert::Infallible,
    net::SocketAddr,
    sync::{Arc, Mutex},
    time::Duration,
};

pub const USER_JSON: &str = r#"
    {
        "login": "octocat",
        "id": 1,
        "node_id": "MDQ6VXNlcjE=",
        "avatar_url": "https://github.com/images/error/octocat_happy.gif",
        "url": "https://api.github.com/users/octocat",
        "html_url": "https://github.com/octocat",
        "repos_url": "https://api.github.com/users/octocat/repos",
        "type": "User",
        "site_admin": false
    }
"#;

pub const REPO_JSON: &str = include_str!("../github/test-input/repo.json");

pub const MAIN_SHA: &str = "aa218f56b14c9653891f9e74264a383fa43fefbd";

pub const REFS_JSON: &str = r#"
    [
        {
            "ref": "refs/heads/develop",
            "node_id": "MDM6UmVmcmVmcy9oZWFkcy9kZXZlbG9w",
            "url": "https://api.github.com/repos/octocat/Hello-World/git/refs/heads/develop",
            "object": {
                "type": "commit",
                "sha": "612077ae6dffb4d2fbd8ce0cccaa58893b07b5ac",
                "url": "https://api.github.com/repos/octocat/Hello-World/git/commits/612077ae6dffb4d2fbd8ce0cccaa58893b07b5ac"
            }
        },
        {
            "ref": "refs/heads/main",
            "node_id": "MDM6UmVmcmVmcy9oZWFkcy9tYWlu",
            "url": "https://api.github.com/repos/octocat/Hello-World/git/refs/heads/main",
            "object": {
                "type": "commit",
                "sha": "aa218f56b14c9653891f9e74264a383fa43fefbd",
                "url": "https://api.github.com/repos/octocat/Hello-World/git/commits/aa218f56b14c9653891f9e74264a383fa43fefbd"
            }
        }
    ]
"#;

pub const REF_JSON: &str = r#"
    {
        "ref": "refs/heads/gh-pages",
        "node_id": "MDM6UmVmcmVmcy9oZWFkcy9naC1wYWdlcw==",
        "url": "https://api.github.com/repos/octocat/Hello-World/git/refs/heads/gh-pages",
        "object": {
            "type": "commit",
            "sha": "aa218f56b14c9653891f9e74264a383fa43fefbd",
            "url": "https://api.github.com/repos/octocat/Hello-World/git/commits/aa218f56b14c9653891f9e74264a383fa43fefbd"
        }
    }
"#;

// Longer than the client timeout used by `MockGithub::start`
const STALL: Duration = Duration::from_secs(2);
const CLIENT_TIMEOUT: Duration = Duration::from_millis(250);

#[derive(Clone)]
struct Route {
    status: u16,
    body: String,
    stall: bool,
}

#[derive(Clone, Debug)]
pub struct Recorded {
    pub line: String,
    pub body: Value,
}

#[derive(Clone, Default)]
pub struct MockGithub {
    routes: Arc<Mutex<HashMap<String, Route>>>,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl MockGithub {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fake where the token belongs to `octocat`
    pub fn authenticated() -> Self {
        let github = Self::new();
        github.route("GET /user", 200, USER_JSON);
        github
    }

    pub fn route<S: Into<String>>(&self, line: &str, status: u16, body: S) -> &Self {
        self.routes.lock().unwrap().insert(
            line.to_owned(),
            Route {
                status,
                body: body.into(),
                stall: false,
            },
        );
        self
    }

    /// Never answer `line` before the client gives up
    pub fn stall(&self, line: &str) -> &Self {
        self.routes.lock().unwrap().insert(
            line.to_owned(),
            Route {
                status: 200,
                body: String::new(),
                stall: true,
            },
        );
        self
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn count(&self, line: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.line == line)
            .count()
    }

    pub fn lines(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.line).collect()
    }

    async fn handle(self, request: Request<Body>) -> Result<Response<Body>, Infallible> {
        let line = format!("{} {}", request.method(), request.uri().path());
        let bytes = body::to_bytes(request.into_body())
            .await
            .unwrap_or_default();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        self.requests.lock().unwrap().push(Recorded {
            line: line.clone(),
            body,
        });

        let route = self.routes.lock().unwrap().get(&line).cloned();
        let route = route.unwrap_or_else(|| Route {
            status: 404,
            body: r#"{"message":"Not Found"}"#.to_owned(),
            stall: false,
        });

        if route.stall {
            tokio::time::sleep(STALL).await;
        }

        Ok(Response::builder()
            .status(route.status)
            .header("content-type", "application/json")
            .body(Body::from(route.body))
            .unwrap())
    }

    /// Serve on an ephemeral port and return a client pointed at it
    pub async fn start(&self) -> github::Client {
        let github = self.clone();
        let make_service = make_service_fn(move |_| {
            let github = github.clone();
            async move {
                Ok::<_, Infallible>(service_fn(move |request| github.clone().handle(request)))
            }
        });

        let addr: SocketAddr = ([127, 0, 0, 1], 0).into();
        let server = Server::bind(&addr).serve(make_service);
        let addr = server.local_addr();
        tokio::spawn(server);

        github::Client::builder()
            .base_url(format!("http://{}/", addr))
            .github_api_token("t0ken")
            .api_version("2022-11-28")
            .timeout(CLIENT_TIMEOUT)
            .build()
            .unwrap()
    }
}
