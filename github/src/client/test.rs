use super::{Client, CreateRepositoryRequest, Error};
use hyper::{
    header::HeaderMap,
    service::{make_service_fn, service_fn},
    Body, Request, Response, Server,
};
use reqwest::StatusCode;
use std::{
    convert::Infallible,
    net::SocketAddr,
    sync::{Arc, Mutex},
    time::Duration,
};

const USER_JSON: &str = r#"
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

// Answers every request with the same status and body after `delay`,
// remembering the request line and headers it saw.
#[derive(Clone)]
struct Canned {
    status: u16,
    body: &'static str,
    delay: Duration,
    seen: Arc<Mutex<Vec<(String, HeaderMap)>>>,
}

impl Canned {
    fn new(status: u16, body: &'static str) -> Self {
        Self {
            status,
            body,
            delay: Duration::from_millis(0),
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    async fn start(&self) -> SocketAddr {
        let canned = self.clone();
        let make_service = make_service_fn(move |_| {
            let canned = canned.clone();
            async move {
                Ok::<_, Infallible>(service_fn(move |request: Request<Body>| {
                    let canned = canned.clone();
                    async move {
                        canned.seen.lock().unwrap().push((
                            format!("{} {}", request.method(), request.uri().path()),
                            request.headers().clone(),
                        ));
                        tokio::time::sleep(canned.delay).await;
                        Ok::<_, Infallible>(
                            Response::builder()
                                .status(canned.status)
                                .body(Body::from(canned.body))
                                .unwrap(),
                        )
                    }
                }))
            }
        });

        let addr: SocketAddr = ([127, 0, 0, 1], 0).into();
        let server = Server::bind(&addr).serve(make_service);
        let addr = server.local_addr();
        tokio::spawn(server);
        addr
    }
}

fn client(addr: SocketAddr) -> Client {
    let _ = env_logger::builder().is_test(true).try_init();

    Client::builder()
        // no trailing slash on purpose
        .base_url(format!("http://{}", addr))
        .github_api_token("t0ken")
        .api_version("2022-11-28")
        .timeout(Duration::from_millis(200))
        .build()
        .unwrap()
}

#[tokio::test]
async fn sends_auth_accept_and_version_headers() {
    let canned = Canned::new(200, USER_JSON);
    let addr = canned.start().await;

    let user = client(addr)
        .users()
        .get_authenticated()
        .await
        .unwrap()
        .into_inner();
    assert_eq!(user.login, "octocat");

    let seen = canned.seen.lock().unwrap();
    let (line, headers) = &seen[0];
    assert_eq!(line, "GET /user");
    assert_eq!(headers["authorization"], "Bearer t0ken");
    assert_eq!(headers["accept"], "application/vnd.github+json");
    assert_eq!(headers["x-github-api-version"], "2022-11-28");
}

#[tokio::test]
async fn unexpected_status_keeps_body() {
    let canned = Canned::new(422, r#"{"message":"Repository creation failed."}"#);
    let addr = canned.start().await;

    let request = CreateRepositoryRequest {
        name: "Hello-World".to_owned(),
        ..Default::default()
    };
    let error = client(addr)
        .repos()
        .create_for_authenticated_user(&request)
        .await
        .unwrap_err();

    assert_eq!(error.status(), Some(StatusCode::UNPROCESSABLE_ENTITY));
    match error {
        Error::UnexpectedStatus { error, .. } => {
            assert_eq!(error.message.as_deref(), Some("Repository creation failed."))
        }
        e => panic!("unexpected error: {}", e),
    }
}

#[tokio::test]
async fn success_status_must_match_endpoint() {
    // deleting a repository answers 204, a 200 is not what was asked for
    let canned = Canned::new(200, "");
    let addr = canned.start().await;

    let error = client(addr)
        .repos()
        .delete("octocat", "Hello-World")
        .await
        .unwrap_err();
    assert_eq!(error.status(), Some(StatusCode::OK));
    assert_eq!(canned.seen.lock().unwrap()[0].0, "DELETE /repos/octocat/Hello-World");
}

#[tokio::test]
async fn expected_status_with_short_body_succeeds() {
    let canned = Canned::new(201, r#"{"name":"Hello-World"}"#);
    let addr = canned.start().await;

    let request = CreateRepositoryRequest {
        name: "Hello-World".to_owned(),
        ..Default::default()
    };
    let response = client(addr)
        .repos()
        .create_for_authenticated_user(&request)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    assert!(response.into_inner().is_none());
}

#[tokio::test]
async fn empty_protection_response_succeeds() {
    let canned = Canned::new(200, "");
    let addr = canned.start().await;

    client(addr)
        .repos()
        .update_branch_protection("octocat", "Hello-World", "main", &Default::default())
        .await
        .unwrap();
    assert_eq!(
        canned.seen.lock().unwrap()[0].0,
        "PUT /repos/octocat/Hello-World/branches/main/protection"
    );
}

#[tokio::test]
async fn slow_responses_time_out() {
    let mut canned = Canned::new(200, USER_JSON);
    canned.delay = Duration::from_secs(2);
    let addr = canned.start().await;

    let error = client(addr).users().get_authenticated().await.unwrap_err();
    assert!(error.is_timeout());
    assert_eq!(error.status(), None);
}

#[test]
fn rejects_invalid_base_url() {
    let error = Client::builder().base_url("not a url").build().unwrap_err();
    assert!(matches!(error, Error::Url(_)));
}
