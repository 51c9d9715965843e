mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{create_customer, get, json_request, multipart_request, spawn_app};

#[tokio::test]
async fn create_get_search_and_list_customers() {
    let t = spawn_app().await;
    let token = t.admin_token().await;
    let id = create_customer(&t, &token, "Lakshmi", "+919000000001").await;
    create_customer(&t, &token, "Meena", "+919000000002").await;

    let (status, body) = t.send(get(&format!("/api/customer/{id}"), Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Lakshmi");
    assert_eq!(body["district"], "Madurai");

    let (status, body) = t.send(get("/api/customer/search?query=lak&type=name", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(1));

    let (status, _) = t.send(get("/api/customer/search?query=lak&type=city", Some(&token))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = t.send(get("/api/customer/all?page=1&per_page=1", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);
    assert_eq!(body["items"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn duplicate_phone_is_a_conflict() {
    let t = spawn_app().await;
    let token = t.admin_token().await;
    create_customer(&t, &token, "Lakshmi", "+919000000001").await;

    let req = json_request(
        "POST",
        "/api/customer",
        Some(&token),
        json!({"name": "Other", "phoneNumber": "+919000000001", "maritalStatus": "Single", "gender": "Female", "customerSince": "2024-01-01"}),
    );
    let (status, body) = t.send(req).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["message"].as_str().unwrap_or_default().contains("Phone number"));
}

#[tokio::test]
async fn customer_accepts_multipart_form() {
    let t = spawn_app().await;
    let token = t.admin_token().await;
    let parts: Vec<common::Part<'_>> = vec![
        ("name", None, None, "Priya".as_bytes()),
        ("phonenumber", None, None, "+919111111111".as_bytes()),
        ("maritalstatus", None, None, "Single".as_bytes()),
        ("gender", None, None, "Female".as_bytes()),
        ("customerSince", None, None, "2024-06-01".as_bytes()),
    ];
    let (status, body) = t.send(multipart_request("POST", "/api/customer", &token, &parts)).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert!(body["id"].is_string());
}

#[tokio::test]
async fn invalid_phone_is_bad_request() {
    let t = spawn_app().await;
    let token = t.admin_token().await;
    let req = json_request(
        "POST",
        "/api/customer",
        Some(&token),
        json!({"name": "Bad", "phoneNumber": "98765", "maritalStatus": "Single", "gender": "Female", "customerSince": "2024-01-01"}),
    );
    let (status, _) = t.send(req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn measurements_are_wrapped_in_an_envelope() {
    let t = spawn_app().await;
    let token = t.admin_token().await;
    let customer = create_customer(&t, &token, "Lakshmi", "+919000000001").await;

    let req = json_request(
        "POST",
        "/api/measurements",
        Some(&token),
        json!({"customerId": customer, "serviceType": "Blouse", "measurements": {"chest": 34.5, "waist": 30.0}}),
    );
    let (status, body) = t.send(req).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["message"], "Measurement created successfully");

    let (status, body) = t.send(get(&format!("/api/measurements/customer/{customer}"), Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));
}
