mod common;

use chrono::Duration;
use chrono::Utc;
use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_health() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/health")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_register_login_and_me() {
    let app = TestApp::spawn().await;

    let response = app.register("alice@example.com", "correcthorse").await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["principal_id"], 1);
    assert_eq!(body["expires_in"], 24 * 3600);
    assert_eq!(body["principal"]["id"], 1);
    assert_eq!(body["principal"]["email"], "alice@example.com");
    assert_eq!(body["principal"]["role"], "CUSTOMER");
    assert!(body["principal"]["created_at"].is_string());
    assert!(body["principal"].get("password_hash").is_none());
    let registered_at = body["principal"]["created_at"].clone();
    let registration_token = body["token"].as_str().unwrap().to_string();

    let response = app.login("alice@example.com", "correcthorse").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["principal_id"], 1);
    assert_eq!(body["display_identity"], "alice@example.com");
    assert!(body["principal"].get("password_hash").is_none());
    let login_token = body["token"].as_str().unwrap().to_string();

    for token in [&registration_token, &login_token] {
        let response = app
            .get_authenticated("/api/auth/me", token)
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body["principal_id"], 1);
        assert_eq!(body["email"], "alice@example.com");
        assert_eq!(body["role"], "CUSTOMER");
        assert_eq!(body["created_at"], registered_at);
        assert!(body.get("password_hash").is_none());
    }
}

#[tokio::test]
async fn test_me_for_unknown_principal() {
    let app = TestApp::spawn().await;

    // Validly signed, but nothing was ever stored under this id
    let token = app
        .authenticator
        .issue_token(99, "ghost@example.com", "CUSTOMER", Utc::now())
        .unwrap()
        .access_token;

    let response = app
        .get_authenticated("/api/auth/me", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "error": "principal not found" }));
}

#[tokio::test]
async fn test_register_with_role() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/register")
        .json(&json!({
            "email": "bob@example.com",
            "password": "correcthorse",
            "role": "COURIER"
        }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["principal"]["role"], "COURIER");

    let response = app
        .get_authenticated("/api/auth/me", body["token"].as_str().unwrap())
        .send()
        .await
        .expect("Failed to execute request");
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["role"], "COURIER");
}

#[tokio::test]
async fn test_register_duplicate_identity_ignores_case_and_whitespace() {
    let app = TestApp::spawn().await;

    let response = app.register("alice@example.com", "correcthorse").await;
    assert_eq!(response.status(), StatusCode::CREATED);

    for variant in ["alice@example.com", "  Alice@Example.COM  ", "ALICE@EXAMPLE.COM"] {
        let response = app.register(variant, "anotherpassword").await;
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body, json!({ "error": "identity already registered" }));
    }

    // The first registration still owns the identity
    let response = app.login("alice@example.com", "correcthorse").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["principal_id"], 1);

    let response = app.login("alice@example.com", "anotherpassword").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_concurrent_registration_has_single_winner() {
    let app = std::sync::Arc::new(TestApp::spawn().await);

    let handles: Vec<_> = (0..10)
        .map(|_| {
            let app = std::sync::Arc::clone(&app);
            tokio::spawn(async move {
                app.register("race@example.com", "correcthorse")
                    .await
                    .status()
            })
        })
        .collect();

    let mut statuses = Vec::new();
    for handle in handles {
        statuses.push(handle.await.expect("Task panicked"));
    }

    assert_eq!(
        statuses.iter().filter(|s| **s == StatusCode::CREATED).count(),
        1
    );
    assert_eq!(
        statuses.iter().filter(|s| **s == StatusCode::CONFLICT).count(),
        9
    );
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::spawn().await;
    app.register("alice@example.com", "correcthorse").await;

    let wrong_password = app.login("alice@example.com", "wrongpassword").await;
    let unknown_identity = app.login("nobody@example.com", "correcthorse").await;
    let malformed_identity = app.login("not-an-email", "correcthorse").await;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_identity.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(malformed_identity.status(), StatusCode::UNAUTHORIZED);

    let wrong_password = wrong_password.text().await.unwrap();
    let unknown_identity = unknown_identity.text().await.unwrap();
    let malformed_identity = malformed_identity.text().await.unwrap();

    assert_eq!(wrong_password, r#"{"error":"invalid credentials"}"#);
    assert_eq!(wrong_password, unknown_identity);
    assert_eq!(wrong_password, malformed_identity);
}

#[tokio::test]
async fn test_register_validation() {
    let app = TestApp::spawn().await;

    let short_password = app.register("alice@example.com", "short").await;
    assert_eq!(short_password.status(), StatusCode::BAD_REQUEST);

    let long_password = app.register("alice@example.com", &"x".repeat(129)).await;
    assert_eq!(long_password.status(), StatusCode::BAD_REQUEST);

    let bad_email = app.register("not-an-email", "correcthorse").await;
    assert_eq!(bad_email.status(), StatusCode::BAD_REQUEST);

    let bad_role = app
        .post("/api/auth/register")
        .json(&json!({
            "email": "alice@example.com",
            "password": "correcthorse",
            "role": "ADMIN"
        }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(bad_role.status(), StatusCode::BAD_REQUEST);

    // None of the rejected attempts consumed the identity
    let response = app.register("alice@example.com", "correcthorse").await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_malformed_bodies_are_rejected() {
    let app = TestApp::spawn().await;

    let not_json = app
        .post("/api/auth/register")
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(not_json.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = not_json.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "error": "invalid request" }));

    let missing_field = app
        .post("/api/auth/login")
        .json(&json!({ "email": "alice@example.com" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(missing_field.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = missing_field.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "error": "invalid request" }));
}

#[tokio::test]
async fn test_protected_routes_require_valid_token() {
    let app = TestApp::spawn().await;
    app.register("alice@example.com", "correcthorse").await;

    let expired = app
        .authenticator
        .issue_token(
            1,
            "alice@example.com",
            "CUSTOMER",
            Utc::now() - Duration::hours(25),
        )
        .unwrap()
        .access_token;

    let foreign = auth::Authenticator::new(b"some-other-secret-that-is-32-bytes-long")
        .issue_token(1, "alice@example.com", "CUSTOMER", Utc::now())
        .unwrap()
        .access_token;

    let requests = vec![
        app.get("/api/auth/me"),
        app.get("/api/auth/me").header("authorization", "Basic dXNlcjpwYXNz"),
        app.get("/api/auth/me").header("authorization", "Bearer "),
        app.get_authenticated("/api/auth/me", "not.a.token"),
        app.get_authenticated("/api/auth/me", &expired),
        app.get_authenticated("/api/auth/me", &foreign),
        app.get("/api/profile"),
        app.put_authenticated("/api/profile", &expired)
            .json(&json!({ "first_name": "Mallory" })),
    ];

    for request in requests {
        let response = request.send().await.expect("Failed to execute request");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body, json!({ "error": "unauthorized" }));
    }
}

#[tokio::test]
async fn test_profile_created_at_registration() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/auth/register")
        .json(&json!({
            "email": "alice@example.com",
            "password": "correcthorse",
            "profile": { "first_name": "Alice", "last_name": "Liddell" }
        }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::CREATED);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    let token = body["token"].as_str().unwrap();

    let response = app
        .get_authenticated("/api/profile", token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["principal_id"], 1);
    assert_eq!(body["first_name"], "Alice");
    assert_eq!(body["last_name"], "Liddell");
    assert!(body["phone"].is_null());
}

#[tokio::test]
async fn test_update_profile() {
    let app = TestApp::spawn().await;
    let token = app.register_token("alice@example.com", "correcthorse").await;

    let response = app
        .put_authenticated("/api/profile", &token)
        .json(&json!({
            "first_name": "Alice",
            "phone": "+1 555 0100",
            "date_of_birth": "1990-05-17"
        }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["first_name"], "Alice");
    assert_eq!(body["date_of_birth"], "1990-05-17");

    // Partial update keeps earlier fields
    let response = app
        .put_authenticated("/api/profile", &token)
        .json(&json!({ "address": "1 Rabbit Hole" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["first_name"], "Alice");
    assert_eq!(body["phone"], "+1 555 0100");
    assert_eq!(body["address"], "1 Rabbit Hole");
}

#[tokio::test]
async fn test_update_profile_validation() {
    let app = TestApp::spawn().await;
    let token = app.register_token("alice@example.com", "correcthorse").await;

    let bad_date = app
        .put_authenticated("/api/profile", &token)
        .json(&json!({ "date_of_birth": "17/05/1990" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(bad_date.status(), StatusCode::BAD_REQUEST);

    let long_phone = app
        .put_authenticated("/api/profile", &token)
        .json(&json!({ "phone": "1".repeat(21) }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(long_phone.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_profile_of_unknown_principal() {
    let app = TestApp::spawn().await;

    // Well-signed token whose principal was never registered
    let token = app
        .authenticator
        .issue_token(999, "ghost@example.com", "CUSTOMER", Utc::now())
        .unwrap()
        .access_token;

    let response = app
        .get_authenticated("/api/profile", &token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({ "error": "profile not found" }));
}
