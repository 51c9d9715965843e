mod common;

use axum::http::StatusCode;

use common::{get, multipart_request, spawn_app, Part, TestApp, ADMIN_PIN};

const PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0, 0, 0, 1];
const JPEG: &[u8] = &[0xff, 0xd8, 0xff, 0xe0, 0, 0x10];

fn staff_form<'a>(username: &'a str, phone: &'a str, email: &'a str) -> Vec<Part<'a>> {
    vec![
        ("name", None, None, "Meena Kumari".as_bytes()),
        ("username", None, None, username.as_bytes()),
        ("phonenumber", None, None, phone.as_bytes()),
        ("alternatephonenumber", None, None, "+919811100000".as_bytes()),
        ("email", None, None, email.as_bytes()),
        ("dateofbirth", None, None, "1991-02-03".as_bytes()),
        ("sex", None, None, "Female".as_bytes()),
        ("maritalstatus", None, None, "Married".as_bytes()),
        ("role", None, None, "TAILOR".as_bytes()),
        ("securitypin", None, None, "246810".as_bytes()),
        ("joineddate", None, None, "2022-06-01".as_bytes()),
        ("documentType", None, None, "Aadhaar".as_bytes()),
        ("address", None, None, "12 Market Road".as_bytes()),
    ]
}

async fn create_with_photo(t: &TestApp, token: &str) -> String {
    let mut parts = staff_form("Meena", "+919800000001", "meena@example.com");
    parts.push(("photo", Some("face.png"), Some("image/png"), PNG));
    let (status, body) = t.send(multipart_request("POST", "/api/admin/staff", token, &parts)).await;
    assert_eq!(status, StatusCode::OK, "staff create failed: {body}");
    assert_eq!(body["message"], "Staff added successfully");
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn admin_creates_staff_from_a_multipart_form() {
    let t = spawn_app().await;
    let admin = t.admin_token().await;
    let id = create_with_photo(&t, &admin).await;

    let (status, staff) = t.send(get(&format!("/api/staff/{id}"), Some(&admin))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(staff["username"], "meena");
    assert_eq!(staff["phone_number"], "+919800000001");
    assert_eq!(staff["alternate_phone_number"], "+919811100000");
    assert_eq!(staff["marital_status"], "Married");
    assert_eq!(staff["document_type"], "Aadhaar");
    assert_eq!(staff["role"], "TAILOR");
    assert!(staff.get("security_pin_hash").is_none());
    assert_eq!(staff["photo"]["url"], format!("/api/staff/{id}/photo"));
    assert_eq!(staff["photo"]["content_type"], "image/png");
    assert!(staff["document_photo"].is_null());

    let resp = t.raw(get(&format!("/api/staff/{id}/photo"), Some(&admin))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()["content-type"], "image/png");
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], PNG);

    let (status, _) = t.send(get(&format!("/api/staff/{id}/document"), Some(&admin))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // the new account can sign in with the submitted pin
    t.login("meena", "246810").await;
}

#[tokio::test]
async fn staff_form_is_validated_and_admin_only() {
    let t = spawn_app().await;
    let admin = t.admin_token().await;
    t.add_staff("mala", "MANAGER", "+919876500003").await;
    let manager = t.login("mala", ADMIN_PIN).await;

    let parts = staff_form("meena", "+919800000001", "meena@example.com");
    let (status, _) = t.send(multipart_request("POST", "/api/admin/staff", &manager, &parts)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let mut parts = staff_form("meena", "+919800000001", "meena@example.com");
    parts.push(("photo", Some("face.gif"), Some("image/gif"), "GIF89a".as_bytes()));
    let (status, _) = t.send(multipart_request("POST", "/api/admin/staff", &admin, &parts)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    create_with_photo(&t, &admin).await;
    let parts = staff_form("other", "+919800000001", "other@example.com");
    let (status, body) = t.send(multipart_request("POST", "/api/admin/staff", &admin, &parts)).await;
    assert_eq!(status, StatusCode::CONFLICT, "{body}");
}

#[tokio::test]
async fn admin_updates_staff_fields_and_document() {
    let t = spawn_app().await;
    let admin = t.admin_token().await;
    let id = create_with_photo(&t, &admin).await;

    let parts: Vec<Part<'_>> = vec![
        ("name", None, None, "Meena Devi".as_bytes()),
        ("maritalstatus", None, None, "Widowed".as_bytes()),
        ("documentType", None, None, "PAN".as_bytes()),
        ("documentphoto", Some("pan.jpg"), Some("image/jpeg"), JPEG),
    ];
    let (status, body) = t.send(multipart_request("PUT", &format!("/api/admin/staff/{id}"), &admin, &parts)).await;
    assert_eq!(status, StatusCode::OK, "staff update failed: {body}");
    assert_eq!(body["message"], "Staff updated successfully");

    let (_, staff) = t.send(get(&format!("/api/staff/{id}"), Some(&admin))).await;
    assert_eq!(staff["name"], "Meena Devi");
    assert_eq!(staff["marital_status"], "Widowed");
    assert_eq!(staff["document_type"], "PAN");
    assert_eq!(staff["phone_number"], "+919800000001");
    assert_eq!(staff["document_photo"]["url"], format!("/api/staff/{id}/document"));
    assert_eq!(staff["photo"]["content_type"], "image/png");

    let resp = t.raw(get(&format!("/api/staff/{id}/document"), Some(&admin))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()["content-type"], "image/jpeg");

    let (status, _) = t.send(multipart_request("PUT", &format!("/api/admin/staff/{}", uuid::Uuid::new_v4()), &admin, &parts)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
