//! HTTP-level integration tests for login, logout and token enforcement.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_test_user, get, get_auth, post_json, TEST_PASSWORD};
use serde_json::json;
use sqlx::PgPool;
use reqdesk_api::auth::jwt::validate_token;
use reqdesk_db::repositories::UserRepo;

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_success(pool: PgPool) {
    let user = create_test_user(&pool, "ana").await;
    let app = common::build_test_app(pool.clone());

    let response = post_json(
        app,
        "/api/login",
        json!({ "username": "ana", "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["user"]["id"], user.id);
    assert_eq!(json["user"]["username"], "ana");
    assert_eq!(json["user"]["nombre_completo"], "ana (test)");
    assert_eq!(json["user"]["rol"], "user");
    assert_eq!(json["expires_in"], 480 * 60);
    assert!(json["user"].get("password_hash").is_none(), "hash must never leave the server");

    let claims = validate_token(json["token"].as_str().unwrap(), &common::test_config().jwt)
        .expect("issued token should validate");
    assert_eq!(claims.sub, user.id);
    assert_eq!(claims.username, "ana");

    let stored = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert!(stored.last_login_at.is_some());
}

/// Unknown user and wrong password are indistinguishable.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_failures_are_generic(pool: PgPool) {
    create_test_user(&pool, "ana").await;

    let wrong_password = post_json(
        common::build_test_app(pool.clone()),
        "/api/login",
        json!({ "username": "ana", "password": "incorrect" }),
    )
    .await;
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    let wrong_password = body_json(wrong_password).await;

    let unknown_user = post_json(
        common::build_test_app(pool),
        "/api/login",
        json!({ "username": "nobody", "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);
    let unknown_user = body_json(unknown_user).await;

    assert_eq!(wrong_password, unknown_user);
    assert_eq!(wrong_password["error"], "Invalid username or password");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_inactive_user(pool: PgPool) {
    let user = create_test_user(&pool, "gone").await;
    UserRepo::deactivate(&pool, user.id).await.unwrap();

    let response = post_json(
        common::build_test_app(pool),
        "/api/login",
        json!({ "username": "gone", "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid username or password");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_missing_fields(pool: PgPool) {
    for body in [
        json!({}),
        json!({ "username": "ana" }),
        json!({ "password": TEST_PASSWORD }),
        json!({ "username": "   ", "password": TEST_PASSWORD }),
    ] {
        let response = post_json(common::build_test_app(pool.clone()), "/api/login", body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["code"], "BAD_REQUEST");
    }
}

// ---------------------------------------------------------------------------
// Logout and token enforcement
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_logout_acknowledges(pool: PgPool) {
    let response = post_json(common::build_test_app(pool), "/api/logout", json!({})).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["message"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_protected_routes_require_token(pool: PgPool) {
    for uri in [
        "/api/aprobaciones",
        "/api/requisiciones/todas",
        "/api/mindmap/nodes",
    ] {
        let response = get(common::build_test_app(pool.clone()), uri).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
    }

    let response = get_auth(
        common::build_test_app(pool),
        "/api/aprobaciones",
        "not-a-valid-token",
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_token_grants_access(pool: PgPool) {
    let token = common::login_token(&pool).await;
    let response = get_auth(common::build_test_app(pool), "/api/aprobaciones", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
}
