//! ApiClient against a local stub of the storefront API.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use rocketshoes_commerce::ProductId;
use rocketshoes_data::{
    ApiClient, ApiConfig, BackoffStrategy, FetchError, FetchPolicy, ProductCatalog, RetryPolicy,
    StockLookup, TimeoutConfig,
};
use serde_json::{json, Value};

async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

async fn product(Path(id): Path<i64>) -> Result<Json<Value>, StatusCode> {
    match id {
        1 => Ok(Json(json!({
            "id": 1,
            "title": "Tênis de Caminhada Leve Confortável",
            "price": 179.9,
            "image": "https://example.com/tenis1.jpg"
        }))),
        2 => Ok(Json(json!({ "id": 99, "title": "wrong record" }))),
        _ => Err(StatusCode::NOT_FOUND),
    }
}

async fn stock(Path(id): Path<i64>) -> Result<Json<Value>, StatusCode> {
    match id {
        1 => Ok(Json(json!({ "id": 1, "amount": 3 }))),
        3 => Ok(Json(json!({ "amount": 0 }))),
        4 => Ok(Json(json!({ "id": 4, "quantity": 2 }))),
        _ => Err(StatusCode::NOT_FOUND),
    }
}

fn storefront() -> Router {
    Router::new()
        .route("/products/{id}", get(product))
        .route("/stock/{id}", get(stock))
}

#[tokio::test]
async fn test_fetch_product_keeps_attributes() {
    let base = spawn(storefront()).await;
    let client = ApiClient::new(base).unwrap();

    let product = client.product(ProductId::new(1)).await.unwrap();
    assert_eq!(product.id, ProductId::new(1));
    assert_eq!(product.title(), Some("Tênis de Caminhada Leve Confortável"));
    assert_eq!(product.attribute("price"), Some(&json!(179.9)));
}

#[tokio::test]
async fn test_fetch_product_not_found() {
    let base = spawn(storefront()).await;
    let client = ApiClient::new(base).unwrap();

    let err = client.product(ProductId::new(42)).await.unwrap_err();
    assert!(matches!(err, FetchError::Http { status, .. } if status == StatusCode::NOT_FOUND));
}

#[tokio::test]
async fn test_fetch_product_with_mismatched_id() {
    let base = spawn(storefront()).await;
    let client = ApiClient::new(base).unwrap();

    let err = client.product(ProductId::new(2)).await.unwrap_err();
    assert!(matches!(err, FetchError::Deserialization(_)));
}

#[tokio::test]
async fn test_fetch_stock() {
    let base = spawn(storefront()).await;
    let client = ApiClient::new(base).unwrap();

    let record = client.stock(ProductId::new(1)).await.unwrap();
    assert_eq!(record.product_id, ProductId::new(1));
    assert_eq!(record.amount, 3);

    let empty = client.stock(ProductId::new(3)).await.unwrap();
    assert_eq!(empty.product_id, ProductId::new(3));
    assert_eq!(empty.amount, 0);
}

#[tokio::test]
async fn test_fetch_stock_without_amount() {
    let base = spawn(storefront()).await;
    let client = ApiClient::new(base).unwrap();

    let err = client.stock(ProductId::new(4)).await.unwrap_err();
    assert!(matches!(err, FetchError::Deserialization(_)));
}

#[tokio::test]
async fn test_connection_refused() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ApiClient::new(format!("http://{addr}")).unwrap();
    let err = client.stock(ProductId::new(1)).await.unwrap_err();
    assert!(matches!(err, FetchError::Connection(_) | FetchError::Request(_)));
}

#[tokio::test]
async fn test_timeout() {
    let router = Router::new().route(
        "/stock/{id}",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(2)).await;
            Json(json!({ "amount": 1 }))
        }),
    );
    let base = spawn(router).await;
    let config = ApiConfig {
        base_url: base,
        timeout_ms: Some(100),
        max_retries: 0,
    };
    let client = ApiClient::from_config(&config).unwrap();

    let err = client.stock(ProductId::new(1)).await.unwrap_err();
    assert!(matches!(err, FetchError::Timeout(_)));
}

#[tokio::test]
async fn test_retries_server_errors_when_configured() {
    let hits = Arc::new(AtomicUsize::new(0));
    let router = Router::new()
        .route(
            "/stock/{id}",
            get(|State(hits): State<Arc<AtomicUsize>>| async move {
                if hits.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err(StatusCode::SERVICE_UNAVAILABLE)
                } else {
                    Ok(Json(json!({ "amount": 5 })))
                }
            }),
        )
        .with_state(hits.clone());
    let base = spawn(router).await;

    let retrying = FetchPolicy::new(
        TimeoutConfig::default(),
        RetryPolicy::new(1).with_backoff(BackoffStrategy::None),
    );
    let client = ApiClient::with_policies(base, FetchPolicy::default(), retrying).unwrap();

    let record = client.stock(ProductId::new(1)).await.unwrap();
    assert_eq!(record.amount, 5);
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_default_policy_does_not_retry() {
    let hits = Arc::new(AtomicUsize::new(0));
    let router = Router::new()
        .route(
            "/stock/{id}",
            get(|State(hits): State<Arc<AtomicUsize>>| async move {
                hits.fetch_add(1, Ordering::SeqCst);
                StatusCode::INTERNAL_SERVER_ERROR
            }),
        )
        .with_state(hits.clone());
    let base = spawn(router).await;
    let client = ApiClient::new(base).unwrap();

    assert!(client.stock(ProductId::new(1)).await.is_err());
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}
