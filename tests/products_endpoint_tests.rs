//! Catalog endpoint tests
//!
//! Covers:
//! - `GET /api/products` — public listing (active only, display order)
//! - `GET /api/products/{id}` — public detail
//! - `POST/PATCH/DELETE /api/admin/products` — admin catalog management
//! - category CRUD and the product/category embed

use axum::http::StatusCode;

mod common;
use common::{
    build_test_app, create_test_code, create_test_db, create_test_product, login_as_admin,
    send_json, CodeSeed,
};

#[tokio::test]
async fn test_public_listing_hides_inactive_products() {
    let db = create_test_db().await;
    create_test_product(&db, "Visible", 1000, None).await;
    let hidden = create_test_product(&db, "Hidden", 2000, None).await;

    let app = build_test_app(db.clone());
    let cookie = login_as_admin(app.clone(), &db).await;
    let (status, _) = send_json(
        app.clone(),
        "PATCH",
        &format!("/api/admin/products/{}", hidden.id),
        Some(&cookie),
        Some(serde_json::json!({ "is_active": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, json) = send_json(app.clone(), "GET", "/api/products", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let products = json.as_array().unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0]["name"], "Visible");

    // The admin listing still shows both
    let (_, json) = send_json(app, "GET", "/api/admin/products", Some(&cookie), None).await;
    assert_eq!(json.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_public_detail_of_inactive_product_is_404() {
    let db = create_test_db().await;
    let p = create_test_product(&db, "Sword", 1000, None).await;
    let app = build_test_app(db.clone());
    let cookie = login_as_admin(app.clone(), &db).await;

    send_json(
        app.clone(),
        "PATCH",
        &format!("/api/admin/products/{}", p.id),
        Some(&cookie),
        Some(serde_json::json!({ "is_active": false })),
    )
    .await;

    let (status, _) = send_json(
        app,
        "GET",
        &format!("/api/products/{}", p.id),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_product_with_category() {
    let db = create_test_db().await;
    let app = build_test_app(db.clone());
    let cookie = login_as_admin(app.clone(), &db).await;

    let (status, category) = send_json(
        app.clone(),
        "POST",
        "/api/admin/categories",
        Some(&cookie),
        Some(serde_json::json!({ "name": "Game Passes" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(category["slug"], "game-passes");

    let (status, json) = send_json(
        app.clone(),
        "POST",
        "/api/admin/products",
        Some(&cookie),
        Some(serde_json::json!({
            "name": "VIP Pass",
            "description": "Lifetime VIP access",
            "price": "25.00",
            "discounted_price": "19.99",
            "category_id": category["id"]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "VIP Pass");
    assert_eq!(json["category"]["slug"], "game-passes");

    // Public detail returns the same product
    let (status, json) = send_json(
        app,
        "GET",
        &format!("/api/products/{}", json["id"]),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "VIP Pass");
}

#[tokio::test]
async fn test_create_product_validation() {
    let db = create_test_db().await;
    let app = build_test_app(db.clone());
    let cookie = login_as_admin(app.clone(), &db).await;

    let (status, _) = send_json(
        app.clone(),
        "POST",
        "/api/admin/products",
        Some(&cookie),
        Some(serde_json::json!({
            "name": "",
            "description": "no name",
            "price": "10.00"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send_json(
        app,
        "POST",
        "/api/admin/products",
        Some(&cookie),
        Some(serde_json::json!({
            "name": "Orphan",
            "description": "bad category",
            "price": "10.00",
            "category_id": 4242
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_product_discount_lifecycle() {
    let db = create_test_db().await;
    let p = create_test_product(&db, "Sword", 2000, None).await;
    let app = build_test_app(db.clone());
    let cookie = login_as_admin(app.clone(), &db).await;
    let uri = format!("/api/admin/products/{}", p.id);

    let (status, json) = send_json(
        app.clone(),
        "PATCH",
        &uri,
        Some(&cookie),
        Some(serde_json::json!({ "discounted_price": "15.00" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let discounted: rust_decimal::Decimal = json["discounted_price"]
        .as_str()
        .unwrap()
        .parse()
        .unwrap();
    assert_eq!(discounted, rust_decimal::Decimal::new(1500, 2));

    let (status, json) = send_json(
        app,
        "PATCH",
        &uri,
        Some(&cookie),
        Some(serde_json::json!({ "clear_discount": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["discounted_price"].is_null());
}

#[tokio::test]
async fn test_delete_product_blocked_by_unclaimed_code() {
    let db = create_test_db().await;
    let p = create_test_product(&db, "Sword", 1000, None).await;
    create_test_code(&db, "AB12-CD34-EF56", &[p.id], CodeSeed::default()).await;
    let app = build_test_app(db.clone());
    let cookie = login_as_admin(app.clone(), &db).await;

    let (status, json) = send_json(
        app,
        "DELETE",
        &format!("/api/admin/products/{}", p.id),
        Some(&cookie),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["detail"]
        .as_str()
        .unwrap()
        .contains("AB12-CD34-EF56"));
}

#[tokio::test]
async fn test_delete_product_allowed_after_claim() {
    let db = create_test_db().await;
    let p = create_test_product(&db, "Sword", 1000, None).await;
    create_test_code(
        &db,
        "AB12-CD34-EF56",
        &[p.id],
        CodeSeed {
            claimed_at: Some(chrono::Utc::now()),
            claimed_by_username: Some("PlayerOne".to_string()),
            ..Default::default()
        },
    )
    .await;
    let app = build_test_app(db.clone());
    let cookie = login_as_admin(app.clone(), &db).await;

    let (status, _) = send_json(
        app,
        "DELETE",
        &format!("/api/admin/products/{}", p.id),
        Some(&cookie),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_category_crud() {
    let db = create_test_db().await;
    let app = build_test_app(db.clone());
    let cookie = login_as_admin(app.clone(), &db).await;

    let (status, created) = send_json(
        app.clone(),
        "POST",
        "/api/admin/categories",
        Some(&cookie),
        Some(serde_json::json!({ "name": "Bundles" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Duplicate name is a conflict
    let (status, _) = send_json(
        app.clone(),
        "POST",
        "/api/admin/categories",
        Some(&cookie),
        Some(serde_json::json!({ "name": "Bundles" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, json) = send_json(
        app.clone(),
        "PATCH",
        &format!("/api/admin/categories/{}", created["id"]),
        Some(&cookie),
        Some(serde_json::json!({ "name": "Mega Bundles" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "Mega Bundles");

    let (status, _) = send_json(
        app.clone(),
        "DELETE",
        &format!("/api/admin/categories/{}", created["id"]),
        Some(&cookie),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, json) = send_json(app, "GET", "/api/categories", None, None).await;
    assert_eq!(json.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_deleting_category_keeps_products() {
    let db = create_test_db().await;
    let app = build_test_app(db.clone());
    let cookie = login_as_admin(app.clone(), &db).await;

    let (_, category) = send_json(
        app.clone(),
        "POST",
        "/api/admin/categories",
        Some(&cookie),
        Some(serde_json::json!({ "name": "Doomed" })),
    )
    .await;
    let (_, product) = send_json(
        app.clone(),
        "POST",
        "/api/admin/products",
        Some(&cookie),
        Some(serde_json::json!({
            "name": "Survivor",
            "description": "outlives its category",
            "price": "5.00",
            "category_id": category["id"]
        })),
    )
    .await;

    send_json(
        app.clone(),
        "DELETE",
        &format!("/api/admin/categories/{}", category["id"]),
        Some(&cookie),
        None,
    )
    .await;

    let (status, json) = send_json(
        app,
        "GET",
        &format!("/api/products/{}", product["id"]),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["category"].is_null());
}
