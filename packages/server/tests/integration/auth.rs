use crate::common::{ADMIN_PASSWORD, DRAFT, TestApp, routes};
use serde_json::json;

#[tokio::test]
async fn configured_password_is_accepted() {
    let app = TestApp::spawn().await;
    let res = app.post(routes::LOGIN, &json!({ "password": ADMIN_PASSWORD })).await;

    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["valid"], true);
}

#[tokio::test]
async fn built_in_password_is_accepted() {
    let app = TestApp::spawn().await;
    let res = app.post(routes::LOGIN, &json!({ "password": "hackathon2024" })).await;

    assert_eq!(res.status, 200, "{}", res.text);
}

#[tokio::test]
async fn wrong_password_is_rejected() {
    let app = TestApp::spawn().await;
    let res = app.post(routes::LOGIN, &json!({ "password": "letmein" })).await;

    assert_eq!(res.status, 401);
    assert_eq!(res.body["code"], "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn malformed_login_body_is_a_validation_error() {
    let app = TestApp::spawn().await;
    let res = app.post(routes::LOGIN, &json!({ "pass": 1 })).await;

    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn admin_routes_reject_missing_password() {
    let app = TestApp::spawn().await;
    let res = app.get(&routes::data(DRAFT)).await;

    assert_eq!(res.status, 401);
    assert_eq!(res.body["code"], "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn admin_routes_reject_wrong_password() {
    let app = TestApp::spawn().await;
    let res = app
        .client
        .get(format!("http://{}{}", app.addr, routes::EXPORT_ALL))
        .header("X-Admin-Password", "nope")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status().as_u16(), 401);
}
