mod common;

use common::{TestApp, signup_body};
use http::{Method, StatusCode};
use serde_json::json;

#[tokio::test]
async fn test_signup_then_duplicate_email() {
    let app = TestApp::new().await;

    let (status, body) = app
        .call(Method::POST, "/users/signup", None, Some(signup_body("a@b.com", "5551234")))
        .await;
    assert_eq!(status, StatusCode::OK);
    let user_id = body["user_id"].as_str().unwrap();
    assert_eq!(user_id.len(), 32);
    assert!(body.get("password").is_none());
    assert!(body["token"].is_string());
    assert!(body["refresh_token"].is_string());

    let (status, body) = app
        .call(Method::POST, "/users/signup", None, Some(signup_body("a@b.com", "5559999")))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 8002);

    let ctx = app.state.request_context();
    assert_eq!(app.state.users.count_by(&ctx, "email", "a@b.com").await.unwrap(), 1);

    let stored = app.state.users.find_by_email(&ctx, "a@b.com").await.unwrap().unwrap();
    assert_ne!(stored.password, "Secret123");
}

#[tokio::test]
async fn test_signup_validation_error() {
    let app = TestApp::new().await;
    let mut body = signup_body("broken", "5551234");
    body["first_name"] = json!("A");

    let (status, body) = app.call(Method::POST, "/users/signup", None, Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 2);
}

#[tokio::test]
async fn test_signup_missing_password_is_json_validation_error() {
    let app = TestApp::new().await;
    let mut body = signup_body("a@b.com", "5551234");
    body.as_object_mut().unwrap().remove("password");

    let (status, body) = app.call(Method::POST, "/users/signup", None, Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 2);
    assert!(body["message"].as_str().unwrap().contains("password"), "{body}");
}

#[tokio::test]
async fn test_signup_without_names_is_rejected() {
    let app = TestApp::new().await;
    let body = json!({
        "email": "a@b.com",
        "phone": "5551234",
        "password": "Secret123",
    });

    let (status, body) = app.call(Method::POST, "/users/signup", None, Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 2);
}

#[tokio::test]
async fn test_login_with_wrong_field_type_is_json_validation_error() {
    let app = TestApp::new().await;

    let (status, body) = app
        .call(Method::PATCH, "/users/login", None, Some(json!({"email": 5})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 2);
    assert_eq!(body["details"]["reason"], "invalid_field");
}

#[tokio::test]
async fn test_create_table_without_body_is_json_validation_error() {
    let app = TestApp::new().await;
    let token = app.signed_up_token("a@b.com", "5551234").await;

    let (status, body) = app.call(Method::POST, "/tables", Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 2);
    assert_eq!(body["details"]["reason"], "missing_content_type");
}

#[tokio::test]
async fn test_protected_route_requires_bearer() {
    let app = TestApp::new().await;

    let (status, body) = app.call(Method::GET, "/tables", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1001);

    let (status, body) = app.call(Method::GET, "/tables", Some("not-a-jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1004);

    let (status, _) = app.call(Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_login_rotates_stored_tokens() {
    let app = TestApp::new().await;
    app.signed_up_token("a@b.com", "5551234").await;

    let (status, body) = app
        .call(
            Method::PATCH,
            "/users/login",
            None,
            Some(json!({"email": "a@b.com", "password": "Secret123"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap().to_string();
    let user_id = body["user_id"].as_str().unwrap().to_string();

    let ctx = app.state.request_context();
    let stored = app.state.users.find_by_business_id(&ctx, &user_id).await.unwrap().unwrap();
    assert_eq!(stored.token.as_deref(), Some(token.as_str()));

    let claims = app.state.jwt_service().verify_access_token(&token).unwrap();
    assert_eq!(claims.sub, user_id);

    let (status, body) = app
        .call(Method::GET, &format!("/users/{user_id}"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "a@b.com");
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = TestApp::new().await;
    app.signed_up_token("a@b.com", "5551234").await;

    let (status, body) = app
        .call(
            Method::PATCH,
            "/users/login",
            None,
            Some(json!({"email": "a@b.com", "password": "wrong-password"})),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "login or password is incorrect");
}

#[tokio::test]
async fn test_unknown_user_is_not_found() {
    let app = TestApp::new().await;
    let token = app.signed_up_token("a@b.com", "5551234").await;

    let (status, body) = app.call(Method::GET, "/users/nobody", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 8001);
}
