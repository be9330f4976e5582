use std::net::SocketAddr;

use configs::{AppConfig, DatabaseConfig};
use reqwest::StatusCode as HttpStatusCode;
use serde_json::json;
use tokio::net::TcpListener;

use server::startup::{build_app, build_state};

struct TestApp {
    base_url: String,
}

impl TestApp {
    fn url(&self, path: &str) -> String { format!("{}{}", self.base_url, path) }
}

/// Full stack over an in-memory SQLite database: config -> migrations -> router -> listener.
async fn start_server() -> anyhow::Result<TestApp> {
    let cfg = AppConfig { database: DatabaseConfig::sqlite_memory(), ..AppConfig::default() };
    let state = build_state(&cfg).await?;
    let app = build_app(state);

    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url })
}

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = client().get(app.url("/health")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_person_lifecycle() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    // create -> I1
    let res = c.post(app.url("/person/")).json(&json!({"email": "a@x.com"})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let i1 = res.text().await?;
    assert_eq!(i1.len(), 32);

    // same email again -> conflict
    let res = c.post(app.url("/person/")).json(&json!({"email": "a@x.com"})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::CONFLICT);

    // lookup by email -> I1
    let res = c.get(app.url("/person/email:a@x.com")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body, json!({"id": i1, "email": "a@x.com"}));

    // delete -> OK
    let res = c.delete(app.url(&format!("/person/{i1}"))).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.text().await?, "OK");

    // gone
    let res = c.get(app.url(&format!("/person/{i1}"))).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_update_rules() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let a = c.post(app.url("/person/")).json(&json!({"email": "a@x.com"})).send().await?.text().await?;
    let b = c.post(app.url("/person/")).json(&json!({"email": "b@x.com"})).send().await?.text().await?;

    // onto another record's email -> conflict, b unchanged
    let res = c.put(app.url(&format!("/person/{b}"))).json(&json!({"email": "a@x.com"})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::CONFLICT);
    let body = c.get(app.url(&format!("/person/{b}"))).send().await?.json::<serde_json::Value>().await?;
    assert_eq!(body["email"], "b@x.com");

    // own email -> fine
    let res = c.put(app.url(&format!("/person/{a}"))).json(&json!({"email": "a@x.com"})).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.text().await?, a);

    // unknown id -> not found
    let res = c
        .put(app.url("/person/0123456789abcdef0123456789abcdef"))
        .json(&json!({"email": "z@x.com"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let res = c.get(app.url("/person/email:z@x.com")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn e2e_malformed_input_is_bad_request() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = client();

    let res = c.get(app.url("/person/xyz")).send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);

    let res = c
        .post(app.url("/person/"))
        .header("content-type", "application/json")
        .body("{broken")
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["error"], "Bad Request");
    Ok(())
}
