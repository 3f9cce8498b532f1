#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use schoolhub::router::init_router;
use schoolhub::state::AppState;
use schoolhub_config::{CookieConfig, CorsConfig, JwtConfig};
use schoolhub_core::hash_password;
use schoolhub_db::provisioning::{NewAccount, insert_account_with_profile};
use schoolhub_models::{
    Account, AccountId, ClassId, GradeId, NewAdminProfile, NewParentProfile, NewProfile,
    NewStudentProfile, NewTeacherProfile, SubjectId,
};
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "test-secret-key";
pub const PASSWORD: &str = "password123";

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: TEST_SECRET.to_string(),
        token_expiry: 3600,
    }
}

pub fn test_state(pool: PgPool) -> AppState {
    AppState {
        db: pool,
        jwt_config: test_jwt_config(),
        cookie_config: CookieConfig::default(),
        cors_config: CorsConfig {
            allowed_origins: vec!["http://localhost:5173".to_string()],
        },
    }
}

pub fn setup_test_app(pool: PgPool) -> Router {
    init_router(test_state(pool))
}

pub struct TestCatalog {
    pub grade_id: GradeId,
    pub class_id: ClassId,
    pub subject_id: SubjectId,
}

pub async fn create_catalog(pool: &PgPool) -> TestCatalog {
    let grade_id: GradeId =
        sqlx::query_scalar("INSERT INTO grades (level) VALUES (1) RETURNING id")
            .fetch_one(pool)
            .await
            .unwrap();

    let class_id: ClassId =
        sqlx::query_scalar("INSERT INTO classes (name, grade_id) VALUES ('1A', $1) RETURNING id")
            .bind(grade_id)
            .fetch_one(pool)
            .await
            .unwrap();

    let subject_id: SubjectId =
        sqlx::query_scalar("INSERT INTO subjects (name) VALUES ('Mathematics') RETURNING id")
            .fetch_one(pool)
            .await
            .unwrap();

    TestCatalog {
        grade_id,
        class_id,
        subject_id,
    }
}

pub fn admin_profile(name: &str) -> NewProfile {
    NewProfile::Admin(NewAdminProfile {
        name: name.to_string(),
        email: Some(format!("{}@school.test", name.to_lowercase())),
    })
}

pub fn teacher_profile(subject_ids: Vec<SubjectId>) -> NewProfile {
    NewProfile::Teacher(NewTeacherProfile {
        name: "Tess".to_string(),
        surname: "Smith".to_string(),
        email: Some("tess@school.test".to_string()),
        phone: Some("555-0100".to_string()),
        address: None,
        subject_ids,
    })
}

pub fn parent_profile() -> NewProfile {
    NewProfile::Parent(NewParentProfile {
        name: "Pat".to_string(),
        surname: "Doe".to_string(),
        email: None,
        phone: Some("555-0101".to_string()),
        address: Some("1 School Road".to_string()),
    })
}

pub fn student_profile(parent_id: AccountId, catalog: &TestCatalog) -> NewProfile {
    NewProfile::Student(NewStudentProfile {
        name: "Sam".to_string(),
        surname: "Doe".to_string(),
        email: None,
        phone: None,
        address: None,
        parent_id,
        class_id: catalog.class_id,
        grade_id: catalog.grade_id,
    })
}

/// Inserts an account and profile directly, bypassing the API.
pub async fn create_account(
    pool: &PgPool,
    username: &str,
    profile: NewProfile,
    is_active: bool,
) -> Account {
    create_account_with(pool, username, profile, is_active, false).await
}

pub async fn create_super_admin(pool: &PgPool, username: &str) -> Account {
    create_account_with(pool, username, admin_profile("Root"), true, true).await
}

async fn create_account_with(
    pool: &PgPool,
    username: &str,
    profile: NewProfile,
    is_active: bool,
    is_super_admin: bool,
) -> Account {
    let hash = hash_password(PASSWORD).unwrap();
    let mut tx = pool.begin().await.unwrap();
    let account = insert_account_with_profile(
        &mut *tx,
        NewAccount {
            username,
            password_hash: &hash,
            profile: &profile,
            is_active,
            is_super_admin,
        },
    )
    .await
    .unwrap();
    tx.commit().await.unwrap();
    account
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

/// Sends one request. `token` is sent as the `token` cookie.
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
    token: Option<&str>,
) -> TestResponse {
    let mut request = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        request = request.header(header::COOKIE, format!("token={}", token));
    }

    let body = match body {
        Some(json) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(serde_json::to_vec(&json).unwrap())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    TestResponse {
        status,
        headers,
        body,
    }
}

pub async fn login(app: &Router, username: &str, password: &str) -> TestResponse {
    send(
        app,
        Method::POST,
        "/api/auth/login",
        Some(serde_json::json!({ "username": username, "password": password })),
        None,
    )
    .await
}

/// Logs in and returns the token, panicking if login fails.
pub async fn login_token(app: &Router, username: &str) -> String {
    let response = login(app, username, PASSWORD).await;
    assert_eq!(response.status, StatusCode::OK, "login failed: {}", response.body);
    response.body["access_token"].as_str().unwrap().to_string()
}

/// The raw `Set-Cookie` header for the token cookie, if any.
pub fn token_set_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("token="))
        .map(str::to_string)
}

pub async fn account_exists(pool: &PgPool, username: &str) -> bool {
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM accounts WHERE username = $1)")
        .bind(username)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn count_rows(pool: &PgPool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(pool)
        .await
        .unwrap()
}
