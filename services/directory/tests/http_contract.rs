use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use directory::{build_router, AppState, Directory, UserStore};
use reqwest::StatusCode;
use serde_json::{json, Value};

async fn spawn_server(users_file: &Path) -> SocketAddr {
    let directory = Directory::open(UserStore::new(users_file)).expect("open directory");
    let app = build_router(AppState::new(directory));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    addr
}

fn users_url(addr: SocketAddr) -> String {
    format!("http://{addr}/users")
}

fn read_file(path: &Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).expect("read store")).expect("store json")
}

async fn list(client: &reqwest::Client, addr: SocketAddr) -> Value {
    let res = client.get(users_url(addr)).send().await.expect("list");
    assert_eq!(res.status(), StatusCode::OK);
    res.json().await.expect("list body")
}

struct Fixture {
    _dir: tempfile::TempDir,
    file: PathBuf,
    addr: SocketAddr,
    client: reqwest::Client,
}

async fn fixture(seed: Option<&str>) -> Fixture {
    let dir = tempfile::tempdir().expect("tempdir");
    let file = dir.path().join("users.json");
    if let Some(seed) = seed {
        std::fs::write(&file, seed).expect("seed store");
    }
    let addr = spawn_server(&file).await;
    Fixture {
        _dir: dir,
        file,
        addr,
        client: reqwest::Client::new(),
    }
}

#[tokio::test]
async fn list_without_store_is_empty() {
    let fx = fixture(None).await;
    assert_eq!(list(&fx.client, fx.addr).await, json!([]));
    assert!(!fx.file.exists());
}

#[tokio::test]
async fn list_returns_seeded_store_verbatim() {
    let seed = json!([
        {"id": "1", "name": "A", "email": "a@x.com"},
        {"id": "2", "name": "B", "email": "b@x.com", "role": "admin"},
        {"name": "no id at all"}
    ]);
    let fx = fixture(Some(&serde_json::to_string_pretty(&seed).expect("seed"))).await;
    assert_eq!(list(&fx.client, fx.addr).await, seed);
}

#[tokio::test]
async fn create_then_list_returns_the_record() {
    let fx = fixture(None).await;
    let user = json!({"id": "1", "name": "A", "email": "a@x.com"});

    let res = fx
        .client
        .post(users_url(fx.addr))
        .json(&user)
        .send()
        .await
        .expect("create");
    assert_eq!(res.status(), StatusCode::CREATED);
    assert_eq!(res.json::<Value>().await.expect("body"), user);

    assert_eq!(list(&fx.client, fx.addr).await, json!([user]));
    assert_eq!(read_file(&fx.file), json!([user]));
    let text = std::fs::read_to_string(&fx.file).expect("read");
    assert!(text.contains("\n  {\n    \"id\": \"1\""), "pretty printed: {text}");
}

#[tokio::test]
async fn create_accepts_arbitrary_objects() {
    let fx = fixture(None).await;
    let odd = json!({"nickname": "zed", "id": 42});
    let res = fx
        .client
        .post(users_url(fx.addr))
        .json(&odd)
        .send()
        .await
        .expect("create");
    assert_eq!(res.status(), StatusCode::CREATED);
    assert_eq!(read_file(&fx.file), json!([odd]));
}

#[tokio::test]
async fn create_rejects_non_object_bodies() {
    let fx = fixture(None).await;
    let res = fx
        .client
        .post(users_url(fx.addr))
        .json(&json!(["not", "an", "object"]))
        .send()
        .await
        .expect("create");
    assert!(res.status().is_client_error());
    assert_eq!(list(&fx.client, fx.addr).await, json!([]));
}

#[tokio::test]
async fn update_unknown_id_is_not_found() {
    let seed = json!([{"id": "1", "name": "A", "email": "a@x.com"}]);
    let fx = fixture(Some(&seed.to_string())).await;

    let res = fx
        .client
        .put(format!("{}/missing", users_url(fx.addr)))
        .json(&json!({"id": "missing", "name": "X", "email": "x@x.com"}))
        .send()
        .await
        .expect("update");
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.text().await.expect("body"), "User not found");
    assert_eq!(list(&fx.client, fx.addr).await, seed);
    // no write happened, so the seed text is untouched
    assert_eq!(std::fs::read_to_string(&fx.file).expect("read"), seed.to_string());
}

#[tokio::test]
async fn update_with_new_id_keeps_position_and_renames() {
    let seed = json!([
        {"id": "1", "name": "A", "email": "a@x.com"},
        {"id": "2", "name": "B", "email": "b@x.com"},
        {"id": "3", "name": "C", "email": "c@x.com"}
    ]);
    let fx = fixture(Some(&seed.to_string())).await;
    let replacement = json!({"id": "20", "name": "Bee", "email": "bee@x.com"});

    let res = fx
        .client
        .put(format!("{}/2", users_url(fx.addr)))
        .json(&replacement)
        .send()
        .await
        .expect("update");
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await.expect("body"), replacement);

    let listed = list(&fx.client, fx.addr).await;
    assert_eq!(listed[1], replacement);
    assert_eq!(read_file(&fx.file), listed);

    let again = fx
        .client
        .put(format!("{}/2", users_url(fx.addr)))
        .json(&json!({"id": "2", "name": "B", "email": "b@x.com"}))
        .send()
        .await
        .expect("update old id");
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_removes_all_matches_and_is_idempotent() {
    let seed = json!([
        {"id": "1", "name": "A", "email": "a@x.com"},
        {"id": "2", "name": "B", "email": "b@x.com"},
        {"id": "1", "name": "A again", "email": "a2@x.com"}
    ]);
    let fx = fixture(Some(&seed.to_string())).await;

    let res = fx
        .client
        .delete(format!("{}/1", users_url(fx.addr)))
        .send()
        .await
        .expect("delete");
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    assert!(res.bytes().await.expect("body").is_empty());

    let expected = json!([{"id": "2", "name": "B", "email": "b@x.com"}]);
    assert_eq!(list(&fx.client, fx.addr).await, expected);
    assert_eq!(read_file(&fx.file), expected);

    let res = fx
        .client
        .delete(format!("{}/nobody", users_url(fx.addr)))
        .send()
        .await
        .expect("delete missing");
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    assert_eq!(list(&fx.client, fx.addr).await, expected);
}

#[tokio::test]
async fn storage_failure_is_a_server_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let data = dir.path().join("data");
    std::fs::create_dir(&data).expect("mkdir");
    let addr = spawn_server(&data.join("users.json")).await;
    let client = reqwest::Client::new();
    std::fs::remove_dir_all(&data).expect("remove data dir");

    let res = client
        .post(users_url(addr))
        .json(&json!({"id": "1", "name": "A", "email": "a@x.com"}))
        .send()
        .await
        .expect("create");
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(list(&client, addr).await, json!([]));
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let fx = fixture(None).await;
    let res = fx
        .client
        .request(reqwest::Method::OPTIONS, format!("{}/1", users_url(fx.addr)))
        .header("Origin", "http://localhost:5173")
        .header("Access-Control-Request-Method", "PUT")
        .header("Access-Control-Request-Headers", "content-type")
        .send()
        .await
        .expect("preflight");
    assert!(res.status().is_success());
    assert_eq!(
        res.headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}

#[tokio::test]
async fn health_reports_ok() {
    let fx = fixture(None).await;
    let res = fx
        .client
        .get(format!("http://{}/health", fx.addr))
        .send()
        .await
        .expect("health");
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await.expect("body"), json!({"status": "ok"}));
}

#[tokio::test]
async fn concurrent_creates_are_all_persisted() {
    let fx = fixture(None).await;
    let mut tasks = Vec::new();
    for n in 0..16 {
        let client = fx.client.clone();
        let url = users_url(fx.addr);
        tasks.push(tokio::spawn(async move {
            client
                .post(url)
                .json(&json!({"id": n.to_string(), "name": format!("user {n}"), "email": ""}))
                .send()
                .await
                .expect("create")
                .status()
        }));
    }
    for task in tasks {
        assert_eq!(task.await.expect("join"), StatusCode::CREATED);
    }

    let listed = list(&fx.client, fx.addr).await;
    assert_eq!(listed.as_array().map(Vec::len), Some(16));
    assert_eq!(read_file(&fx.file), listed);
}
