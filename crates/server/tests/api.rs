use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use http_body_util::BodyExt;
use migration::MigratorTrait;
use sea_orm::{ConnectOptions, Database};
use serde_json::{Value, json};
use tower::ServiceExt;

use server::types::{transaction::TransactionView, wallet::WalletView};

async fn app() -> Router {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1);
    let db = Database::connect(options).await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = engine::Engine::builder()
        .database(db)
        .build()
        .await
        .unwrap();
    server::router(Arc::new(engine))
}

async fn call(router: &Router, method: Method, path: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().method(method).uri(path);
    let req = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let resp = router.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let body = resp
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec();
    (status, body)
}

async fn create_wallet(router: &Router) -> WalletView {
    let (status, body) = call(router, Method::POST, "/api/v1/wallet", None).await;
    assert_eq!(status, StatusCode::CREATED);
    serde_json::from_slice(&body).unwrap()
}

fn error_message(body: &[u8]) -> String {
    let json: Value = serde_json::from_slice(body).unwrap();
    json["error"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_endpoint_returns_ok() {
    let router = app().await;
    let (status, body) = call(&router, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn create_wallet_returns_201_with_starting_balance() {
    let router = app().await;
    let wallet = create_wallet(&router).await;

    assert_eq!(wallet.id.len(), 32);
    assert_eq!(wallet.balance, 100.0);

    let (status, body) = call(&router, Method::GET, &format!("/api/v1/wallet/{}", wallet.id), None).await;
    assert_eq!(status, StatusCode::OK);
    let fetched: WalletView = serde_json::from_slice(&body).unwrap();
    assert_eq!(fetched, wallet);
}

#[tokio::test]
async fn send_moves_money_and_lists_history() {
    let router = app().await;
    let a = create_wallet(&router).await;
    let b = create_wallet(&router).await;

    let (status, body) = call(
        &router,
        Method::POST,
        &format!("/api/v1/wallet/{}/send", a.id),
        Some(json!({ "to": b.id, "amount": 30.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let sent: TransactionView = serde_json::from_slice(&body).unwrap();
    assert_eq!(sent.amount, 30.0);

    let (_, body) = call(&router, Method::GET, &format!("/api/v1/wallet/{}", a.id), None).await;
    let a_after: WalletView = serde_json::from_slice(&body).unwrap();
    assert_eq!(a_after.balance, 70.0);
    let (_, body) = call(&router, Method::GET, &format!("/api/v1/wallet/{}", b.id), None).await;
    let b_after: WalletView = serde_json::from_slice(&body).unwrap();
    assert_eq!(b_after.balance, 130.0);

    let (status, body) = call(
        &router,
        Method::GET,
        &format!("/api/v1/wallet/{}/history", a.id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let history: Vec<TransactionView> = serde_json::from_slice(&body).unwrap();
    assert_eq!(history, vec![sent]);
    assert_eq!(history[0].from, a.id);
    assert_eq!(history[0].to, b.id);

    let raw: Value = serde_json::from_slice(&body).unwrap();
    let record = raw[0].as_object().unwrap();
    for key in ["time", "from", "to", "amount"] {
        assert!(record.contains_key(key), "missing {key}");
    }
}

#[tokio::test]
async fn send_with_insufficient_funds_is_400() {
    let router = app().await;
    let a = create_wallet(&router).await;
    let b = create_wallet(&router).await;

    let (status, body) = call(
        &router,
        Method::POST,
        &format!("/api/v1/wallet/{}/send", a.id),
        Some(json!({ "to": b.id, "amount": 200.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error_message(&body).contains("Insufficient funds"));

    let (_, body) = call(&router, Method::GET, &format!("/api/v1/wallet/{}", a.id), None).await;
    let a_after: WalletView = serde_json::from_slice(&body).unwrap();
    assert_eq!(a_after.balance, 100.0);
}

#[tokio::test]
async fn send_rejects_bad_bodies_and_amounts() {
    let router = app().await;
    let a = create_wallet(&router).await;
    let b = create_wallet(&router).await;
    let path = format!("/api/v1/wallet/{}/send", a.id);

    for body in [
        json!({ "to": b.id }),
        json!({ "to": b.id, "amount": "ten" }),
        json!({ "to": b.id, "amount": 0 }),
        json!({ "to": b.id, "amount": -1.5 }),
        json!({ "to": b.id, "amount": 1.005 }),
        json!({ "to": a.id, "amount": 1 }),
        json!({ "to": "", "amount": 1 }),
    ] {
        let (status, _) = call(&router, Method::POST, &path, Some(body.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body {body}");
    }

    let req = Request::builder()
        .method(Method::POST)
        .uri(&path)
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let resp = router.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let (_, body) = call(&router, Method::GET, &format!("/api/v1/wallet/{}/history", a.id), None).await;
    let history: Vec<TransactionView> = serde_json::from_slice(&body).unwrap();
    assert!(history.is_empty());
}

#[tokio::test]
async fn unknown_wallets_are_404() {
    let router = app().await;
    let a = create_wallet(&router).await;
    let missing = "ffffffffffffffffffffffffffffffff";

    let (status, _) = call(&router, Method::GET, &format!("/api/v1/wallet/{missing}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call(
        &router,
        Method::GET,
        &format!("/api/v1/wallet/{missing}/history"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call(
        &router,
        Method::POST,
        &format!("/api/v1/wallet/{}/send", a.id),
        Some(json!({ "to": missing, "amount": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn blank_wallet_id_is_400() {
    let router = app().await;
    let (status, body) = call(&router, Method::GET, "/api/v1/wallet/%20", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error_message(&body).contains("must not be empty"));
}

#[tokio::test]
async fn wrong_methods_are_405() {
    let router = app().await;
    let a = create_wallet(&router).await;

    let (status, _) = call(&router, Method::GET, &format!("/api/v1/wallet/{}/send", a.id), None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);

    let (status, _) = call(&router, Method::GET, "/api/v1/wallet", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);

    let (status, _) = call(&router, Method::DELETE, &format!("/api/v1/wallet/{}", a.id), None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn spawned_server_answers_over_tcp() {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1);
    let db = Database::connect(options).await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = engine::Engine::builder()
        .database(db)
        .build()
        .await
        .unwrap();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = server::spawn_with_listener(engine, listener).unwrap();

    let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
    stream
        .write_all(b"GET /health HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
        .await
        .unwrap();
    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();

    assert!(response.starts_with("HTTP/1.1 200"), "{response}");
    assert!(response.contains(r#"{"status":"ok"}"#));
}
