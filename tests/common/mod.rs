//! Test helpers and utilities for integration testing.
//!
//! Builds the real application router against a migrated in-memory SQLite
//! database and provides seed/login helpers shared by the endpoint tests.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use chrono::{DateTime, Utc};
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};
use sea_orm_migration::MigratorTrait;
use tower::util::ServiceExt;

use bloxshop::endpoints::create_app;
use bloxshop::migrations::Migrator;
use bloxshop::models::{category, code_product, product, redemption_code, user};
use bloxshop::services::notify::ClaimNotifier;
use bloxshop::services::security::hash_password;
use bloxshop::state::AppState;

/// Create an in-memory SQLite database for testing.
///
/// A single pool connection keeps every checkout on the same in-memory
/// database; the concurrency tests rely on that.
pub async fn create_test_db() -> DatabaseConnection {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).sqlx_logging(false);

    let db = Database::connect(opts)
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run test migrations");

    db
}

/// Build the full application (router + layers) over a database
pub fn build_test_app(db: DatabaseConnection) -> Router {
    create_app(AppState::new(db, ClaimNotifier::disabled()))
}

/// Create an admin user and return the model
pub async fn create_test_admin(
    db: &DatabaseConnection,
    username: &str,
    password: &str,
) -> user::Model {
    let hashed = hash_password(password).unwrap();
    let now = Utc::now();

    let new_user = user::ActiveModel {
        username: Set(username.to_string()),
        hashed_password: Set(hashed),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    new_user.insert(db).await.unwrap()
}

/// Create a category
pub async fn create_test_category(db: &DatabaseConnection, name: &str) -> category::Model {
    let new_category = category::ActiveModel {
        name: Set(name.to_string()),
        slug: Set(name.to_lowercase().replace(' ', "-")),
        sort_order: Set(0),
        created_at: Set(Utc::now()),
        ..Default::default()
    };
    new_category.insert(db).await.unwrap()
}

/// Create a product with euro prices given in whole cents
pub async fn create_test_product(
    db: &DatabaseConnection,
    name: &str,
    price_cents: i64,
    discounted_cents: Option<i64>,
) -> product::Model {
    let now = Utc::now();
    let new_product = product::ActiveModel {
        name: Set(name.to_string()),
        description: Set(format!("{} description", name)),
        details: Set(None),
        price: Set(Decimal::new(price_cents, 2)),
        discounted_price: Set(discounted_cents.map(|c| Decimal::new(c, 2))),
        category_id: Set(None),
        image_url: Set(None),
        sort_order: Set(0),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    new_product.insert(db).await.unwrap()
}

/// Options for seeding a redemption code in a specific state
#[derive(Default)]
pub struct CodeSeed {
    pub is_active: Option<bool>,
    pub scheduled_start: Option<DateTime<Utc>>,
    pub claimed_at: Option<DateTime<Utc>>,
    pub claimed_by_username: Option<String>,
    pub is_test_code: bool,
}

/// Create a redemption code bound to the given products
pub async fn create_test_code(
    db: &DatabaseConnection,
    code: &str,
    product_ids: &[i64],
    seed: CodeSeed,
) -> redemption_code::Model {
    let new_code = redemption_code::ActiveModel {
        code: Set(code.to_string()),
        is_active: Set(seed.is_active.unwrap_or(true)),
        scheduled_start: Set(seed.scheduled_start),
        claimed_at: Set(seed.claimed_at),
        claimed_by_username: Set(seed.claimed_by_username),
        is_test_code: Set(seed.is_test_code),
        created_by: Set("admin".to_string()),
        created_at: Set(Utc::now()),
        ..Default::default()
    };
    let created = new_code.insert(db).await.unwrap();

    for product_id in product_ids {
        let link = code_product::ActiveModel {
            code_id: Set(created.id),
            product_id: Set(*product_id),
        };
        link.insert(db).await.unwrap();
    }

    created
}

/// POST /auth/login and return (status, Set-Cookie session value)
pub async fn do_login(app: Router, username: &str, password: &str) -> (StatusCode, Option<String>) {
    let body = serde_json::json!({
        "username": username,
        "password": password
    })
    .to_string();

    let request = Request::builder()
        .uri("/auth/login")
        .method("POST")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();

    let cookie = response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .find_map(|v| {
            let s = v.to_str().ok()?;
            if s.starts_with("bloxshop_session=") {
                Some(s.split(';').next().unwrap().to_string())
            } else {
                None
            }
        });

    (status, cookie)
}

/// Create an admin, log in, and return the session cookie
pub async fn login_as_admin(app: Router, db: &DatabaseConnection) -> String {
    create_test_admin(db, "admin", "correct horse battery").await;
    let (status, cookie) = do_login(app, "admin", "correct horse battery").await;
    assert_eq!(status, StatusCode::OK);
    cookie.expect("login did not set a session cookie")
}

/// Send a request and return (status, parsed JSON body)
pub async fn send_json(
    app: Router,
    method: &str,
    uri: &str,
    cookie: Option<&str>,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().uri(uri).method(method);
    if let Some(cookie) = cookie {
        builder = builder.header("Cookie", cookie);
    }

    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };

    (status, json)
}
