mod common;

use axum::http::{Method, StatusCode};
use common::{
    PASSWORD, create_account, create_catalog, login, login_token, parent_profile, send,
    setup_test_app, student_profile, teacher_profile,
};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "./migrations")]
async fn test_me_returns_teacher_subjects(pool: PgPool) {
    let catalog = create_catalog(&pool).await;
    create_account(&pool, "t1", teacher_profile(vec![catalog.subject_id]), true).await;
    let app = setup_test_app(pool);
    let token = login_token(&app, "t1").await;

    let response = send(&app, Method::GET, "/api/me", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["account"]["role"], "teacher");
    assert_eq!(response.body["profile"]["role"], "teacher");
    assert_eq!(response.body["profile"]["surname"], "Smith");
    assert_eq!(
        response.body["profile"]["subject_ids"],
        json!([catalog.subject_id])
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_own_profile(pool: PgPool) {
    create_account(&pool, "p1", parent_profile(), true).await;
    let app = setup_test_app(pool);
    let token = login_token(&app, "p1").await;

    let response = send(
        &app,
        Method::PUT,
        "/api/me/profile",
        Some(json!({
            "role": "parent",
            "name": "Patricia",
            "surname": "Doe",
            "email": "pat@home.test"
        })),
        Some(&token),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK, "{}", response.body);
    assert_eq!(response.body["name"], "Patricia");
    assert_eq!(response.body["email"], "pat@home.test");
    assert_eq!(response.body["phone"], serde_json::Value::Null);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_profile_role_mismatch(pool: PgPool) {
    create_account(&pool, "p1", parent_profile(), true).await;
    let app = setup_test_app(pool);
    let token = login_token(&app, "p1").await;

    let response = send(
        &app,
        Method::PUT,
        "/api/me/profile",
        Some(json!({
            "role": "teacher",
            "name": "Tess",
            "surname": "Smith"
        })),
        Some(&token),
    )
    .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["kind"], "validation_error");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_student_update_keeps_references(pool: PgPool) {
    let catalog = create_catalog(&pool).await;
    let parent = create_account(&pool, "p1", parent_profile(), true).await;
    create_account(&pool, "s1", student_profile(parent.id, &catalog), true).await;
    let app = setup_test_app(pool);
    let token = login_token(&app, "s1").await;

    let response = send(
        &app,
        Method::PUT,
        "/api/me/profile",
        Some(json!({
            "role": "student",
            "name": "Samuel",
            "surname": "Doe"
        })),
        Some(&token),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK, "{}", response.body);
    assert_eq!(response.body["name"], "Samuel");
    assert_eq!(response.body["parent_id"], parent.id.to_string());
    assert_eq!(response.body["class_id"], catalog.class_id.to_string());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_teacher_subjects_replaced(pool: PgPool) {
    let catalog = create_catalog(&pool).await;
    create_account(&pool, "t1", teacher_profile(vec![catalog.subject_id]), true).await;
    let app = setup_test_app(pool);
    let token = login_token(&app, "t1").await;

    let response = send(
        &app,
        Method::PUT,
        "/api/me/profile",
        Some(json!({
            "role": "teacher",
            "name": "Tess",
            "surname": "Smith",
            "subject_ids": []
        })),
        Some(&token),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK, "{}", response.body);
    assert_eq!(response.body["subject_ids"], json!([]));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_change_password(pool: PgPool) {
    create_account(&pool, "p1", parent_profile(), true).await;
    let app = setup_test_app(pool);
    let token = login_token(&app, "p1").await;

    let wrong = send(
        &app,
        Method::POST,
        "/api/me/password",
        Some(json!({ "current_password": "not-it", "new_password": "newpassword456" })),
        Some(&token),
    )
    .await;
    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.body["kind"], "invalid_credentials");

    let changed = send(
        &app,
        Method::POST,
        "/api/me/password",
        Some(json!({ "current_password": PASSWORD, "new_password": "newpassword456" })),
        Some(&token),
    )
    .await;
    assert_eq!(changed.status, StatusCode::OK);

    assert_eq!(
        login(&app, "p1", PASSWORD).await.status,
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(
        login(&app, "p1", "newpassword456").await.status,
        StatusCode::OK
    );
}
