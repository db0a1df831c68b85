use std::sync::Arc;

use chrono::Utc;
use reqwest::StatusCode;
use serde_json::json;

use ventra_api::app::{router_with, services::AppServices};
use ventra_api::config::Config;
use ventra_store::{InMemorySaleStore, SaleStore};

struct TestServer {
    base_url: String,
    store: Arc<InMemorySaleStore>,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    /// Build the production router around an in-memory store and bind it
    /// to an ephemeral port.
    async fn spawn() -> Self {
        let store = Arc::new(InMemorySaleStore::new());
        let services = Arc::new(AppServices::new(store.clone(), &Config::default()));
        let app = router_with(services);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{addr}");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            store,
            handle,
        }
    }

    async fn create_sale(&self, client: &reqwest::Client, body: serde_json::Value) -> serde_json::Value {
        let res = client
            .post(format!("{}/sales", self.base_url))
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::CREATED, "create_sale failed");
        res.json().await.unwrap()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn sale_body(date: &str, product: &str, category: &str, price: f64) -> serde_json::Value {
    json!({
        "date": date,
        "productName": product,
        "category": category,
        "price": price,
    })
}

#[tokio::test]
async fn health_reports_store_status_and_timestamp() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/health", srv.base_url))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "connected");
    assert!(body["timestamp"].as_str().is_some());
}

#[tokio::test]
async fn list_sales_starts_empty() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/sales", srv.base_url))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn create_then_get_round_trips_with_default_cost() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let created = srv
        .create_sale(&client, sale_body("2024-03-01", "Cours Rust", "Formation", 149.9))
        .await;

    let id = created["id"].as_str().unwrap();
    assert_eq!(created["date"], "2024-03-01");
    assert_eq!(created["productName"], "Cours Rust");
    assert_eq!(created["category"], "Formation");
    assert_eq!(created["price"], 149.9);
    assert_eq!(created["cost"], 0.0);

    let res = client
        .get(format!("{}/sales/{id}", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let fetched: serde_json::Value = res.json().await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn create_accepts_numeric_strings() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let created = srv
        .create_sale(
            &client,
            json!({
                "date": "2024-03-01",
                "productName": "Ebook Marketing",
                "category": "Ebook",
                "price": "19.90",
                "cost": "2",
            }),
        )
        .await;

    assert_eq!(created["price"], 19.9);
    assert_eq!(created["cost"], 2.0);
}

#[tokio::test]
async fn create_with_missing_date_is_rejected_and_not_persisted() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/sales", srv.base_url))
        .json(&json!({
            "productName": "Cours Rust",
            "category": "Formation",
            "price": 149.0,
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "validation_error");

    // Nothing reached the store.
    assert!(srv.store.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn create_with_unknown_category_is_rejected() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/sales", srv.base_url))
        .json(&sale_body("2024-03-01", "Sticker pack", "Merch", 5.0))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(srv.store.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_with_unknown_id_is_404_and_leaves_store_unchanged() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    srv.create_sale(&client, sale_body("2024-03-01", "Cours Rust", "Formation", 149.0))
        .await;

    let res = client
        .delete(format!(
            "{}/sales/00000000-0000-7000-8000-000000000000",
            srv.base_url
        ))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "not_found");
    assert_eq!(srv.store.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn delete_removes_the_record_permanently() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let created = srv
        .create_sale(&client, sale_body("2024-03-01", "Cours Rust", "Formation", 149.0))
        .await;
    let id = created["id"].as_str().unwrap();

    let res = client
        .delete(format!("{}/sales/{id}", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert!(body["message"].as_str().is_some());

    let res = client
        .get(format!("{}/sales/{id}", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert!(srv.store.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn malformed_id_is_400_not_404() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    for method in ["get", "delete"] {
        let url = format!("{}/sales/not-a-uuid", srv.base_url);
        let res = match method {
            "get" => client.get(&url).send().await.unwrap(),
            _ => client.delete(&url).send().await.unwrap(),
        };
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "{method}");
        let body: serde_json::Value = res.json().await.unwrap();
        assert_eq!(body["error"], "invalid_id", "{method}");
    }
}

#[tokio::test]
async fn list_is_ordered_by_date_descending() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    for (date, name) in [
        ("2024-03-02", "middle"),
        ("2024-03-10", "newest"),
        ("2024-02-20", "oldest"),
    ] {
        srv.create_sale(&client, sale_body(date, name, "Service", 10.0))
            .await;
    }

    let res = client
        .get(format!("{}/sales", srv.base_url))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["productName"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["newest", "middle", "oldest"]);
}

#[tokio::test]
async fn metrics_on_an_empty_store_are_all_zero() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let dashboard: serde_json::Value = client
        .get(format!("{}/metrics/dashboard", srv.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(dashboard["revenue"], 0.0);
    assert_eq!(dashboard["cost"], 0.0);
    assert_eq!(dashboard["profit"], 0.0);
    // Zero baseline: the growth convention reports 100.
    assert_eq!(dashboard["growthRate"], 100.0);

    let categories: serde_json::Value = client
        .get(format!("{}/metrics/categories", srv.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(categories["breakdown"], json!({}));

    let series: serde_json::Value = client
        .get(format!("{}/metrics/series", srv.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(series["points"], json!([]));

    let forecast: serde_json::Value = client
        .get(format!("{}/metrics/forecast", srv.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(forecast["points"], json!([]));
    assert_eq!(forecast["confidence"], 60);
}

#[tokio::test]
async fn category_breakdown_sums_to_total_revenue() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    for (category, price) in [
        ("Formation", 100.0),
        ("Formation", 50.0),
        ("Ebook", 19.0),
        ("Coaching", 80.0),
    ] {
        srv.create_sale(&client, sale_body("2024-03-01", "item", category, price))
            .await;
    }

    let categories: serde_json::Value = client
        .get(format!("{}/metrics/categories", srv.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let breakdown = categories["breakdown"].as_object().unwrap();
    assert_eq!(breakdown["Formation"], 150.0);
    let sum: f64 = breakdown.values().map(|v| v.as_f64().unwrap()).sum();

    let dashboard: serde_json::Value = client
        .get(format!("{}/metrics/dashboard", srv.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(sum, dashboard["revenue"].as_f64().unwrap());
}

#[tokio::test]
async fn series_is_ascending_regardless_of_creation_order() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    srv.create_sale(&client, sale_body("2024-03-02", "b", "Service", 10.0))
        .await;
    srv.create_sale(&client, sale_body("2024-03-01", "a", "Service", 5.0))
        .await;

    let series: serde_json::Value = client
        .get(format!("{}/metrics/series", srv.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let dates: Vec<&str> = series["points"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["date"].as_str().unwrap())
        .collect();
    assert_eq!(dates, ["2024-03-01", "2024-03-02"]);
}

#[tokio::test]
async fn forecast_points_stay_within_variance_bounds() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    // Ten distinct dates at 100 each: the daily average is exactly 100,
    // so every forecast point must fall in [85, 115).
    for day in 1..=10 {
        srv.create_sale(
            &client,
            sale_body(&format!("2024-03-{day:02}"), "item", "Formation", 100.0),
        )
        .await;
    }

    let forecast: serde_json::Value = client
        .get(format!("{}/metrics/forecast", srv.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let points = forecast["points"].as_array().unwrap();
    assert_eq!(points.len(), 30);
    for p in points {
        let value = p["value"].as_f64().unwrap();
        assert!((85.0..115.0).contains(&value), "out of bounds: {value}");
    }
    assert_eq!(points[0]["date"], "2024-03-11");
}

#[tokio::test]
async fn goal_progress_is_clamped_over_the_goal() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    // Default goal is 5000; record twice that in the current month.
    let today = Utc::now().date_naive();
    let date = today.format("%Y-%m-%d").to_string();
    srv.create_sale(&client, sale_body(&date, "big deal", "Service", 10_000.0))
        .await;

    let goal: serde_json::Value = client
        .get(format!("{}/metrics/goal", srv.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(goal["goal"], 5000.0);
    assert_eq!(goal["percent"], 100.0);
    assert_eq!(goal["remaining"], 0.0);
    assert_eq!(goal["isOverGoal"], true);
}

#[tokio::test]
async fn api_is_cors_open() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/sales", srv.base_url))
        .header("Origin", "http://example.com")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}
