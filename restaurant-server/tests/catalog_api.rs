mod common;

use std::collections::BTreeSet;

use common::TestApp;
use http::{Method, StatusCode};
use serde_json::json;

#[tokio::test]
async fn test_table_pagination() {
    let app = TestApp::new().await;
    let token = app.signed_up_token("a@b.com", "5551234").await;

    for n in 1..=5 {
        let (status, _) = app
            .call(
                Method::POST,
                "/tables",
                Some(&token),
                Some(json!({"table_number": n, "capacity": 2})),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    let mut seen = BTreeSet::new();
    for page in 1..=3 {
        let (status, body) = app
            .call(
                Method::GET,
                &format!("/tables?recordPerPage=2&page={page}"),
                Some(&token),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_count"], 5);
        let items = body["items"].as_array().unwrap();
        assert_eq!(items.len(), if page == 3 { 1 } else { 2 });
        for t in items {
            seen.insert(t["table_number"].as_i64().unwrap());
        }
    }
    assert_eq!(seen, (1..=5).collect());

    // malformed values fall back to defaults
    let (status, body) = app
        .call(Method::GET, "/tables?recordPerPage=abc&page=-1", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_table_listing_past_the_end_is_empty() {
    let app = TestApp::new().await;
    let token = app.signed_up_token("a@b.com", "5551234").await;
    for n in 1..=2 {
        let (status, _) = app
            .call(
                Method::POST,
                "/tables",
                Some(&token),
                Some(json!({"table_number": n, "capacity": 4})),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    for query in [
        "startIndex=2",
        "startIndex=4294967295",
        "startIndex=4294967296",
        "recordPerPage=4294967295&page=4294967295",
        "recordPerPage=10&page=2",
    ] {
        let (status, body) = app
            .call(Method::GET, &format!("/tables?{query}"), Some(&token), None)
            .await;
        assert_eq!(status, StatusCode::OK, "{query}: {body}");
        assert_eq!(body["total_count"], 2, "{query}");
        assert_eq!(body["items"], json!([]), "{query}");
    }

    let (status, body) = app
        .call(Method::GET, "/tables?startIndex=1", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_count"], 2);
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_food_creates_menu_for_new_category() {
    let app = TestApp::new().await;
    let token = app.signed_up_token("a@b.com", "5551234").await;

    let (status, food) = app
        .call(
            Method::POST,
            "/foods",
            Some(&token),
            Some(json!({"name": "Gelato", "price": 4.0, "category": "desserts"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{food}");
    let menu_id = food["menu_id"].as_str().unwrap();

    let (status, menu) = app
        .call(Method::GET, &format!("/menus/{menu_id}"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(menu["category"], "desserts");
}

#[tokio::test]
async fn test_menu_update_and_delete() {
    let app = TestApp::new().await;
    let token = app.signed_up_token("a@b.com", "5551234").await;

    let (_, menu) = app
        .call(
            Method::POST,
            "/menus",
            Some(&token),
            Some(json!({"name": "Dinner", "category": "mains"})),
        )
        .await;
    let menu_id = menu["menu_id"].as_str().unwrap();

    let (status, body) = app
        .call(
            Method::PATCH,
            &format!("/menus/{menu_id}"),
            Some(&token),
            Some(json!({"start_date": 1})),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "kindly retype the time");

    let (status, body) = app
        .call(
            Method::PATCH,
            &format!("/menus/{menu_id}"),
            Some(&token),
            Some(json!({"name": "Supper"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["matched_count"], 1);

    let (status, _) = app
        .call(Method::DELETE, &format!("/menus/{menu_id}"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = app
        .call(Method::GET, &format!("/menus/{menu_id}"), Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
