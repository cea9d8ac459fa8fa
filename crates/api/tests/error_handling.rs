//! Tests for `AppError` → HTTP response mapping.
//!
//! Each case converts an error the handlers actually return into a response
//! and checks the status, the `code` and the message. Database violations
//! are produced against a real schema so the mapping is exercised with the
//! driver's own error values.

mod common;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use sqlx::PgPool;
use reqdesk_api::error::AppError;
use reqdesk_core::error::CoreError;
use reqdesk_db::models::mindmap::CreateNode;
use reqdesk_db::repositories::MindMapNodeRepo;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

// ---------------------------------------------------------------------------
// Domain errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn not_found_error_returns_404() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "Approval",
        id: 42,
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Approval with id 42 not found");
}

#[tokio::test]
async fn validation_error_returns_400() {
    let err = AppError::Core(CoreError::Validation("entregado_por must not be empty".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "entregado_por must not be empty");
}

#[tokio::test]
async fn delivery_conflict_returns_409() {
    let err = AppError::Core(CoreError::Conflict(
        "Approval 7 is 'Rechazado' and cannot be marked as delivered".into(),
    ));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "CONFLICT");
    assert!(json["error"].as_str().unwrap().contains("Rechazado"));
}

#[tokio::test]
async fn login_failure_returns_401() {
    let err = AppError::Core(CoreError::Unauthorized("Invalid username or password".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "UNAUTHORIZED");
    assert_eq!(json["error"], "Invalid username or password");
}

#[tokio::test]
async fn missing_login_fields_return_400() {
    let err = AppError::BadRequest("username and password are required".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(json["error"], "username and password are required");
}

#[tokio::test]
async fn internal_error_returns_500_and_sanitizes_message() {
    let err = AppError::InternalError("Token generation error: secret key rejected".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert!(!json.to_string().contains("secret"));
    assert_eq!(json["error"], "An internal error occurred");
}

// ---------------------------------------------------------------------------
// Database errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn row_not_found_returns_404() {
    let (status, json) = error_to_response(AppError::Database(sqlx::Error::RowNotFound)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
}

#[tokio::test]
async fn pool_timeout_returns_500() {
    let (status, json) = error_to_response(AppError::Database(sqlx::Error::PoolTimedOut)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn foreign_key_violation_returns_invalid_reference(pool: PgPool) {
    let err = MindMapNodeRepo::create(
        &pool,
        &CreateNode {
            parent_id: Some(987_654),
            title: "Orphan".to_string(),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();

    let (status, json) = error_to_response(AppError::Database(err)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "INVALID_REFERENCE");
    assert!(json["error"].as_str().unwrap().contains("mindmap_nodes_parent_id_fkey"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unique_violation_returns_409(pool: PgPool) {
    common::create_test_user(&pool, "ana").await;
    let err = reqdesk_db::repositories::UserRepo::create(
        &pool,
        &reqdesk_db::models::user::CreateUser {
            username: "ana".to_string(),
            password_hash: "x".to_string(),
            nombre_completo: "Ana".to_string(),
            rol: None,
        },
    )
    .await
    .unwrap_err();

    let (status, json) = error_to_response(AppError::Database(err)).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "CONFLICT");
    assert!(json["error"].as_str().unwrap().contains("uq_users_username"));
}
