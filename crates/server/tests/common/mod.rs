#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use serde_json::{json, Value};
use tower::Service;

use service::auth::{repository::mock::MockAuthRepository, AuthConfig, AuthService};
use service::customer::{repository::mock::MockCustomerRepository, CustomerService};
use service::files::{repository::mock::MockBlobRepository, FileStore};
use service::measurement::{repository::mock::MockMeasurementRepository, MeasurementService};
use service::order::{repository::mock::MockOrderRepository, OrderService};
use service::staff::domain::CreateStaffInput;
use service::staff::{repository::mock::MockStaffRepository, StaffService};

use server::routes::auth::ServerState;

pub const ADMIN_USER: &str = "owner";
pub const ADMIN_PIN: &str = "123456";
pub const BOUNDARY: &str = "XTAILORBOUNDARY";

pub struct TestApp {
    pub app: Router,
    pub state: ServerState,
}

/// Router over in-memory repositories with one bootstrapped ADMIN.
pub async fn spawn_app() -> TestApp {
    let staff_repo = Arc::new(MockStaffRepository::default());
    let customer_repo = Arc::new(MockCustomerRepository::default());
    let measurement_repo = Arc::new(MockMeasurementRepository::default());
    let order_repo = Arc::new(MockOrderRepository::default());
    let files = FileStore::new(Arc::new(MockBlobRepository::default()), 1024 * 1024);

    let state = ServerState {
        auth: AuthService::new(
            Arc::new(MockAuthRepository::new(staff_repo.clone())),
            AuthConfig { jwt_secret: "test-secret".into(), token_ttl_hours: 1 },
        ),
        staff: StaffService::new(staff_repo.clone(), files.clone()),
        customers: CustomerService::new(customer_repo.clone(), measurement_repo.clone(), order_repo.clone()),
        measurements: MeasurementService::new(measurement_repo.clone(), customer_repo.clone()),
        orders: OrderService::new(order_repo, customer_repo, staff_repo, measurement_repo, files.clone()),
        files,
        max_request_bytes: 8 * 1024 * 1024,
    };
    state.staff.bootstrap_admin(ADMIN_USER, ADMIN_PIN).await.unwrap();

    TestApp { app: server::startup::app(state.clone()), state }
}

impl TestApp {
    pub async fn raw(&self, req: Request<Body>) -> Response {
        self.app.clone().call(req).await.unwrap()
    }

    pub async fn send(&self, req: Request<Body>) -> (StatusCode, Value) {
        let resp = self.raw(req).await;
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap_or(Value::Null) };
        (status, body)
    }

    pub async fn login(&self, username: &str, pin: &str) -> String {
        let req = Request::builder()
            .method("POST")
            .uri("/api/auth/login")
            .header("content-type", "application/json")
            .body(Body::from(json!({"username": username, "securitypin": pin}).to_string()))
            .unwrap();
        let (status, body) = self.send(req).await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        body["token"].as_str().unwrap().to_string()
    }

    pub async fn admin_token(&self) -> String {
        self.login(ADMIN_USER, ADMIN_PIN).await
    }

    /// Create a staff account directly through the service and return its id.
    pub async fn add_staff(&self, username: &str, role: &str, phone: &str) -> uuid::Uuid {
        let input = CreateStaffInput {
            name: username.to_uppercase(),
            username: username.into(),
            phone_number: phone.into(),
            alternate_phone_number: None,
            email: format!("{username}@example.com"),
            date_of_birth: Some("1990-05-01".into()),
            sex: "Female".into(),
            marital_status: "Single".into(),
            role: role.into(),
            security_pin: ADMIN_PIN.into(),
            joined_date: "2024-01-15".into(),
            document_type: "Aadhaar".into(),
            address: None,
        };
        self.state.staff.create(input, None, None).await.unwrap().id
    }
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut b = Request::builder().method(method).uri(uri).header("content-type", "application/json");
    if let Some(t) = token {
        b = b.header("authorization", format!("Bearer {t}"));
    }
    b.body(Body::from(body.to_string())).unwrap()
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut b = Request::builder().method("GET").uri(uri);
    if let Some(t) = token {
        b = b.header("authorization", format!("Bearer {t}"));
    }
    b.body(Body::empty()).unwrap()
}

/// A multipart part: `(name, file_name, content_type, bytes)`.
pub type Part<'a> = (&'a str, Option<&'a str>, Option<&'a str>, &'a [u8]);

pub fn multipart_request(method: &str, uri: &str, token: &str, parts: &[Part<'_>]) -> Request<Body> {
    let mut body = Vec::new();
    for (name, file_name, content_type, data) in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match file_name {
            Some(f) => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{name}\"; filename=\"{f}\"\r\n").as_bytes(),
            ),
            None => body.extend_from_slice(format!("Content-Disposition: form-data; name=\"{name}\"\r\n").as_bytes()),
        }
        if let Some(ct) = content_type {
            body.extend_from_slice(format!("Content-Type: {ct}\r\n").as_bytes());
        }
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .header("content-type", format!("multipart/form-data; boundary={BOUNDARY}"))
        .body(Body::from(body))
        .unwrap()
}

pub async fn create_customer(t: &TestApp, token: &str, name: &str, phone: &str) -> String {
    let req = json_request(
        "POST",
        "/api/customer",
        Some(token),
        json!({
            "name": name,
            "phoneNumber": phone,
            "maritalStatus": "Married",
            "gender": "Female",
            "customerSince": "2023-03-01",
            "district": "Madurai",
        }),
    );
    let (status, body) = t.send(req).await;
    assert_eq!(status, StatusCode::OK, "customer create failed: {body}");
    body["id"].as_str().unwrap().to_string()
}
