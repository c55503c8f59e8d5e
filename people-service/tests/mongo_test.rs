mod common;

use common::TestApp;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

#[tokio::test]
#[ignore = "Requires MongoDB at MONGODB_URI (default mongodb://localhost:27017)"]
async fn person_lifecycle_against_mongodb() {
    let app = TestApp::spawn().await;
    let client = Client::new();
    let people_url = format!("{}/people", app.address);

    let created = client
        .post(&people_url)
        .json(&json!({"name": "Ann", "age": 30, "address": "1 Main St"}))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(created.status(), StatusCode::CREATED);
    let created: Value = created.json().await.expect("Failed to parse JSON");
    let id = created["id"].as_str().expect("id assigned").to_string();
    let person_url = format!("{}/{}", people_url, id);

    let fetched: Value = client
        .get(&person_url)
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse JSON");
    assert_eq!(fetched, created);

    let updated = client
        .put(&person_url)
        .json(&json!({"name": "Ann B", "age": 31, "address": "2 High St"}))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(updated.status(), StatusCode::OK);

    let fetched: Value = client
        .get(&person_url)
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse JSON");
    assert_eq!(fetched["id"], id.as_str());
    assert_eq!(fetched["name"], "Ann B");
    assert_eq!(fetched["age"], 31);

    for _ in 0..2 {
        let deleted = client
            .delete(&person_url)
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(deleted.status(), StatusCode::NO_CONTENT);
    }

    let gone = client
        .get(&person_url)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(gone.status(), StatusCode::INTERNAL_SERVER_ERROR);

    app.cleanup().await;
}

#[tokio::test]
#[ignore = "Requires MongoDB at MONGODB_URI (default mongodb://localhost:27017)"]
async fn list_returns_every_inserted_person() {
    let app = TestApp::spawn().await;
    let client = Client::new();
    let people_url = format!("{}/people", app.address);

    let empty: Value = client
        .get(&people_url)
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse JSON");
    assert_eq!(empty, json!([]));

    for i in 0..3 {
        client
            .post(&people_url)
            .json(&json!({"name": format!("Person {}", i), "age": 20 + i, "address": "Somewhere"}))
            .send()
            .await
            .expect("Failed to execute request");
    }

    let listed: Value = client
        .get(&people_url)
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse JSON");
    assert_eq!(listed.as_array().map(Vec::len), Some(3));

    app.cleanup().await;
}

#[tokio::test]
#[ignore = "Requires MongoDB at MONGODB_URI (default mongodb://localhost:27017)"]
async fn health_check_pings_mongodb() {
    let app = TestApp::spawn().await;

    let response = Client::new()
        .get(format!("{}/health", app.address))
        .send()
        .await
        .expect("Failed to execute request");
    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "ok");

    app.cleanup().await;
}
