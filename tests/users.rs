//! Integration tests for `POST /api/users`.
//!
//! These tests use the mock text provider and require MongoDB to be running.
//! Run with: cargo test --test users

use mongodb::bson::doc;
use numerology_service::config::NumerologyConfig;
use numerology_service::services::providers::mock::MockTextProvider;
use numerology_service::services::providers::TextProvider;
use numerology_service::services::NumerologyDb;
use numerology_service::startup::Application;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// Spawn the application on a random port with a mock text provider.
/// Returns the port and a handle to the test database.
async fn spawn_app(provider_enabled: bool) -> (u16, NumerologyDb) {
    std::env::set_var("APP__PORT", "0"); // Random port
    std::env::set_var("MONGODB_URI", "mongodb://localhost:27017");
    std::env::set_var("MONGODB_DATABASE", "numerology_test_db");
    std::env::set_var("GOOGLE_API_KEY", "test-api-key");
    std::env::set_var("GENAI_TEXT_MODEL", "gemini-1.5-flash");

    let config = NumerologyConfig::load().expect("Failed to load config");
    let provider: Arc<dyn TextProvider> = Arc::new(MockTextProvider::new(provider_enabled));
    let app = Application::build_with_provider(config, provider)
        .await
        .expect("Failed to build application");

    let port = app.port();
    let db = app.db().clone();

    tokio::spawn(async move {
        let _ = app.run_until_stopped().await;
    });

    // Wait for server to start
    tokio::time::sleep(Duration::from_millis(100)).await;

    (port, db)
}

/// Count stored records for one email. Tests use unique emails so counts
/// are isolated from concurrently running tests.
async fn count_records(db: &NumerologyDb, email: &str) -> u64 {
    db.users()
        .count_documents(doc! { "email": email }, None)
        .await
        .expect("Failed to count users")
}

fn unique_email() -> String {
    format!("{}@example.com", Uuid::new_v4())
}

#[tokio::test]
async fn valid_input_persists_one_record_and_returns_prediction() {
    if std::env::var("SKIP_MONGO_TESTS").is_ok() {
        eprintln!("Skipping test: SKIP_MONGO_TESTS is set");
        return;
    }

    let (port, db) = spawn_app(true).await;
    let client = Client::new();
    let email = unique_email();

    let response = client
        .post(format!("http://localhost:{}/api/users", port))
        .json(&serde_json::json!({
            "name": "Ada",
            "dob": "1990-01-01",
            "email": email
        }))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    let prediction = body["prediction"].as_str().expect("prediction missing");
    assert!(!prediction.is_empty());
    // The prompt embeds the name and the ISO rendering of the date of birth,
    // and the mock echoes the prompt back.
    assert!(prediction.contains("Ada"));
    assert!(prediction.contains("1990-01-01"));

    assert_eq!(count_records(&db, &email).await, 1);

    let stored = db
        .users()
        .find_one(doc! { "email": &email }, None)
        .await
        .expect("Failed to query user")
        .expect("User not stored");
    assert_eq!(stored.name, "Ada");
    assert_eq!(stored.dob.to_string(), "1990-01-01");
}

#[tokio::test]
async fn invalid_dob_returns_400_and_stores_nothing() {
    if std::env::var("SKIP_MONGO_TESTS").is_ok() {
        eprintln!("Skipping test: SKIP_MONGO_TESTS is set");
        return;
    }

    let (port, db) = spawn_app(true).await;
    let client = Client::new();
    let email = unique_email();

    let response = client
        .post(format!("http://localhost:{}/api/users", port))
        .json(&serde_json::json!({
            "name": "Ada",
            "dob": "not-a-date",
            "email": email
        }))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 400);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    let error = body["error"].as_str().expect("error missing");
    assert!(!error.is_empty());

    assert_eq!(count_records(&db, &email).await, 0);
}

#[tokio::test]
async fn failing_provider_returns_400_but_record_is_persisted() {
    if std::env::var("SKIP_MONGO_TESTS").is_ok() {
        eprintln!("Skipping test: SKIP_MONGO_TESTS is set");
        return;
    }

    // Provider disabled: every generate call fails.
    let (port, db) = spawn_app(false).await;
    let client = Client::new();
    let email = unique_email();

    let response = client
        .post(format!("http://localhost:{}/api/users", port))
        .json(&serde_json::json!({
            "name": "Ada",
            "dob": "1990-01-01",
            "email": email
        }))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status().as_u16(), 400);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    let error = body["error"].as_str().expect("error missing");
    assert!(!error.is_empty());

    // Write-before-generate ordering: the record stays persisted.
    assert_eq!(count_records(&db, &email).await, 1);
}

#[tokio::test]
async fn identical_requests_create_distinct_records() {
    if std::env::var("SKIP_MONGO_TESTS").is_ok() {
        eprintln!("Skipping test: SKIP_MONGO_TESTS is set");
        return;
    }

    let (port, db) = spawn_app(true).await;
    let client = Client::new();
    let email = unique_email();
    let payload = serde_json::json!({
        "name": "Grace",
        "dob": "1906-12-09",
        "email": email
    });

    for _ in 0..2 {
        let response = client
            .post(format!("http://localhost:{}/api/users", port))
            .json(&payload)
            .timeout(Duration::from_secs(5))
            .send()
            .await
            .expect("Failed to send request");
        assert!(response.status().is_success());
    }

    assert_eq!(count_records(&db, &email).await, 2);
}
