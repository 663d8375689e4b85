use axum::http::{HeaderValue, StatusCode, header};
use axum_test::TestServer;
use serde_json::{Value, json};

use sweetshop_shop::domain::repository::SweetRepository;
use sweetshop_testing::auth::MockAuth;

use crate::helpers::{TEST_JWT_SECRET, test_server, test_sweet};

fn bearer(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("Bearer {token}")).unwrap()
}

async fn sign_up_and_login(server: &TestServer, path: &str, email: &str) -> String {
    let response = server
        .post(path)
        .json(&json!({ "email": email, "password": "password123" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);

    let response = server
        .post("/api/auth/login")
        .json(&json!({ "email": email, "password": "password123" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    response.json::<Value>()["token"]
        .as_str()
        .unwrap()
        .to_owned()
}

// ── Health ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_report_health() {
    let (server, _) = test_server().await;
    let response = server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["status"], "ok");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn should_tag_responses_with_request_id() {
    let (server, _) = test_server().await;
    let response = server.get("/health").await;
    assert!(response.headers().get("x-request-id").is_some());
}

#[tokio::test]
async fn should_allow_cross_origin_requests() {
    let (server, _) = test_server().await;
    let response = server
        .get("/health")
        .add_header(header::ORIGIN, HeaderValue::from_static("http://localhost:5173"))
        .await;
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN),
        Some(&HeaderValue::from_static("*"))
    );
}

// ── Auth ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_register_user_without_exposing_password() {
    let (server, _) = test_server().await;
    let response = server
        .post("/api/auth/register")
        .json(&json!({ "email": "user@test.com", "password": "password123" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body = response.json::<Value>();
    assert_eq!(body["user"]["email"], "user@test.com");
    assert_eq!(body["user"]["role"], "USER");
    assert!(body["user"]["_id"].is_string());
    assert!(body["user"].get("password").is_none());
    assert!(body["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn should_register_admin() {
    let (server, _) = test_server().await;
    let response = server
        .post("/api/auth/register-admin")
        .json(&json!({ "email": "admin@test.com", "password": "password123" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    assert_eq!(response.json::<Value>()["user"]["role"], "ADMIN");
}

#[tokio::test]
async fn should_reject_duplicate_registration() {
    let (server, _) = test_server().await;
    let body = json!({ "email": "dupe@test.com", "password": "password123" });
    server.post("/api/auth/register").json(&body).await;

    let response = server
        .post("/api/auth/register")
        .json(&json!({ "email": "dupe@test.com", "password": "different1" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["message"], "Email already registered");
}

#[tokio::test]
async fn should_report_missing_credentials() {
    let (server, _) = test_server().await;
    let response = server
        .post("/api/auth/register")
        .json(&json!({ "email": "user@test.com" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json::<Value>()["message"],
        "Email and password are required"
    );
}

#[tokio::test]
async fn should_reject_unknown_body_fields() {
    let (server, _) = test_server().await;
    let response = server
        .post("/api/auth/register")
        .json(&json!({ "email": "user@test.com", "password": "password123", "role": "ADMIN" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "INVALID_BODY");
}

#[tokio::test]
async fn should_login_and_redact_user() {
    let (server, _) = test_server().await;
    server
        .post("/api/auth/register")
        .json(&json!({ "email": "user@test.com", "password": "password123" }))
        .await;

    let response = server
        .post("/api/auth/login")
        .json(&json!({ "email": "user@test.com", "password": "password123" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert!(body["token"].is_string());
    assert_eq!(body["user"]["email"], "user@test.com");
    assert!(body["user"].get("password").is_none());
    assert!(body["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn should_reject_bad_login_with_401() {
    let (server, _) = test_server().await;
    server
        .post("/api/auth/register")
        .json(&json!({ "email": "user@test.com", "password": "password123" }))
        .await;

    for body in [
        json!({ "email": "user@test.com", "password": "wrongpassword" }),
        json!({ "email": "ghost@test.com", "password": "password123" }),
    ] {
        let response = server.post("/api/auth/login").json(&body).await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.json::<Value>()["message"], "Invalid credentials");
    }
}

// ── Access control ───────────────────────────────────────────────────────────

#[tokio::test]
async fn should_require_token_for_catalog() {
    let (server, _) = test_server().await;
    let response = server.get("/api/sweets").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>()["message"], "Authentication required");
}

#[tokio::test]
async fn should_reject_forged_token() {
    let (server, _) = test_server().await;
    let response = server
        .get("/api/sweets")
        .add_header(header::AUTHORIZATION, MockAuth::user().bearer("some-other-secret"))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>()["message"], "Invalid token");
}

#[tokio::test]
async fn should_forbid_non_admin_mutations() {
    let (server, state) = test_server().await;
    let sweet = test_sweet("Guarded", "Test", 1.0, 1);
    state.sweet_repo().create(&sweet).await.unwrap();
    let user = MockAuth::user().bearer(TEST_JWT_SECRET);
    let id = sweet.id.to_string();

    let responses = [
        server
            .post("/api/sweets")
            .add_header(header::AUTHORIZATION, user.clone())
            .json(&json!({ "name": "X", "category": "Y", "price": 1, "quantity": 1 }))
            .await,
        server
            .put(&format!("/api/sweets/{id}"))
            .add_header(header::AUTHORIZATION, user.clone())
            .json(&json!({ "price": 2 }))
            .await,
        server
            .delete(&format!("/api/sweets/{id}"))
            .add_header(header::AUTHORIZATION, user.clone())
            .await,
        server
            .post(&format!("/api/sweets/{id}/restock"))
            .add_header(header::AUTHORIZATION, user.clone())
            .json(&json!({ "quantity": 5 }))
            .await,
    ];
    for response in responses {
        assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(response.json::<Value>()["message"], "Access denied");
    }
}

#[tokio::test]
async fn should_answer_anonymous_admin_calls_with_401() {
    let (server, _) = test_server().await;
    let response = server
        .post("/api/sweets")
        .json(&json!({ "name": "X", "category": "Y", "price": 1, "quantity": 1 }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

// ── Catalog ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_purchase_created_sweet_end_to_end() {
    let (server, _) = test_server().await;
    let admin = sign_up_and_login(&server, "/api/auth/register-admin", "admin@test.com").await;
    let user = sign_up_and_login(&server, "/api/auth/register", "user@test.com").await;

    let response = server
        .post("/api/sweets")
        .add_header(header::AUTHORIZATION, bearer(&admin))
        .json(&json!({
            "name": "Chocolate Bar",
            "category": "Chocolate",
            "price": 2.5,
            "quantity": 50,
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let created = response.json::<Value>()["sweet"].clone();
    assert_eq!(created["name"], "Chocolate Bar");
    assert_eq!(created["category"], "Chocolate");
    assert_eq!(created["price"], 2.5);
    assert_eq!(created["quantity"], 50);
    let id = created["_id"].as_str().unwrap().to_owned();

    let response = server
        .post(&format!("/api/sweets/{id}/purchase"))
        .add_header(header::AUTHORIZATION, bearer(&user))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["message"], "Purchase successful");

    let sweets = server
        .get("/api/sweets")
        .add_header(header::AUTHORIZATION, bearer(&user))
        .await
        .json::<Value>();
    assert_eq!(sweets.as_array().unwrap().len(), 1);
    assert_eq!(sweets[0]["quantity"], 49);
}

#[tokio::test]
async fn should_list_in_insertion_order() {
    let (server, state) = test_server().await;
    for name in ["First", "Second", "Third"] {
        state
            .sweet_repo()
            .create(&test_sweet(name, "Test", 1.0, 1))
            .await
            .unwrap();
    }

    let sweets = server
        .get("/api/sweets")
        .add_header(header::AUTHORIZATION, MockAuth::user().bearer(TEST_JWT_SECRET))
        .await
        .json::<Value>();
    let names: Vec<&str> = sweets
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["First", "Second", "Third"]);
}

#[tokio::test]
async fn should_search_by_query_string() {
    let (server, state) = test_server().await;
    for sweet in [
        test_sweet("SearchTarget", "Test", 10.0, 10),
        test_sweet("OtherSweet", "Test", 20.0, 10),
        test_sweet("100%_Literal", "Test", 5.0, 10),
    ] {
        state.sweet_repo().create(&sweet).await.unwrap();
    }
    let user = MockAuth::user().bearer(TEST_JWT_SECRET);

    let sweets = server
        .get("/api/sweets/search?name=target&maxPrice=15")
        .add_header(header::AUTHORIZATION, user.clone())
        .await
        .json::<Value>();
    assert_eq!(sweets.as_array().unwrap().len(), 1);
    assert_eq!(sweets[0]["name"], "SearchTarget");

    // `%` and `_` match literally, not as wildcards.
    let sweets = server
        .get("/api/sweets/search?name=0%25_L")
        .add_header(header::AUTHORIZATION, user.clone())
        .await
        .json::<Value>();
    assert_eq!(sweets.as_array().unwrap().len(), 1);
    assert_eq!(sweets[0]["name"], "100%_Literal");

    let sweets = server
        .get("/api/sweets/search?minPrice=5&maxPrice=10&category=")
        .add_header(header::AUTHORIZATION, user.clone())
        .await
        .json::<Value>();
    assert_eq!(sweets.as_array().unwrap().len(), 2);

    let response = server
        .get("/api/sweets/search?minPrice=cheap")
        .add_header(header::AUTHORIZATION, user)
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["message"], "Invalid price filter");
}

#[tokio::test]
async fn should_update_and_delete_as_admin() {
    let (server, state) = test_server().await;
    let sweet = test_sweet("Update Test", "Test", 5.0, 10);
    state.sweet_repo().create(&sweet).await.unwrap();
    let admin = MockAuth::admin().bearer(TEST_JWT_SECRET);
    let path = format!("/api/sweets/{}", sweet.id);

    let response = server
        .put(&path)
        .add_header(header::AUTHORIZATION, admin.clone())
        .json(&json!({ "price": -1 }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["message"], "Price must be non-negative");
    let stored = state.sweet_repo().find_by_id(sweet.id).await.unwrap().unwrap();
    assert_eq!(stored.price, 5.0);

    let response = server
        .put(&path)
        .add_header(header::AUTHORIZATION, admin.clone())
        .json(&json!({ "price": 7.25, "name": "Updated" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["sweet"]["price"], 7.25);
    assert_eq!(body["sweet"]["name"], "Updated");
    assert_eq!(body["sweet"]["quantity"], 10);

    let response = server
        .delete(&path)
        .add_header(header::AUTHORIZATION, admin.clone())
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["message"], "Sweet deleted");

    let response = server
        .delete(&path)
        .add_header(header::AUTHORIZATION, admin)
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["message"], "Sweet not found");
}

#[tokio::test]
async fn should_treat_malformed_id_as_not_found() {
    let (server, _) = test_server().await;
    let response = server
        .put("/api/sweets/507f1f77bcf86cd799439011")
        .add_header(header::AUTHORIZATION, MockAuth::admin().bearer(TEST_JWT_SECRET))
        .json(&json!({ "price": 1 }))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn should_reject_unreadable_body_before_checking_id() {
    let (server, _) = test_server().await;
    let response = server
        .put("/api/sweets/507f1f77bcf86cd799439011")
        .add_header(header::AUTHORIZATION, MockAuth::admin().bearer(TEST_JWT_SECRET))
        .json(&json!({ "price": "cheap" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "INVALID_BODY");
}

// ── Inventory ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_reject_purchase_when_out_of_stock() {
    let (server, state) = test_server().await;
    let sweet = test_sweet("Sold Out", "Test", 1.0, 0);
    state.sweet_repo().create(&sweet).await.unwrap();

    let response = server
        .post(&format!("/api/sweets/{}/purchase", sweet.id))
        .add_header(header::AUTHORIZATION, MockAuth::user().bearer(TEST_JWT_SECRET))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["message"], "Out of stock");
}

#[tokio::test]
async fn should_restock_as_admin() {
    let (server, state) = test_server().await;
    let sweet = test_sweet("Restock Test", "Test", 1.0, 10);
    state.sweet_repo().create(&sweet).await.unwrap();
    let admin = MockAuth::admin().bearer(TEST_JWT_SECRET);
    let path = format!("/api/sweets/{}/restock", sweet.id);

    let response = server
        .post(&path)
        .add_header(header::AUTHORIZATION, admin.clone())
        .json(&json!({ "quantity": 5 }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["message"], "Restock successful");

    let response = server
        .post(&path)
        .add_header(header::AUTHORIZATION, admin.clone())
        .json(&json!({ "quantity": -20 }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let response = server
        .post(&path)
        .add_header(header::AUTHORIZATION, admin)
        .json(&json!({ "quantity": "5" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "INVALID_BODY");

    let stored = state.sweet_repo().find_by_id(sweet.id).await.unwrap().unwrap();
    assert_eq!(stored.quantity, 15);
}

#[tokio::test]
async fn should_reject_restock_overflow_and_keep_catalog_readable() {
    let (server, state) = test_server().await;
    let sweet = test_sweet("Restock Test", "Test", 1.0, 10);
    state.sweet_repo().create(&sweet).await.unwrap();
    let admin = MockAuth::admin().bearer(TEST_JWT_SECRET);

    let response = server
        .post(&format!("/api/sweets/{}/restock", sweet.id))
        .add_header(header::AUTHORIZATION, admin.clone())
        .json(&json!({ "quantity": i32::MAX }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "STOCK_OVERFLOW");

    let response = server
        .get("/api/sweets")
        .add_header(header::AUTHORIZATION, admin)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()[0]["quantity"], 10);
}
