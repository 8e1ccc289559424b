//! Claim ledger and statistics endpoint tests
//!
//! Covers:
//! - `GET /api/admin/claims` — pagination and the test-claim filter
//! - `GET /api/admin/claims/stats` — aggregates excluding test claims

use axum::http::StatusCode;
use rust_decimal::Decimal;

mod common;
use common::{
    build_test_app, create_test_code, create_test_db, create_test_product, login_as_admin,
    send_json, CodeSeed,
};

/// Claim a seeded code through the public endpoint
async fn claim_ok(app: axum::Router, code: &str, username: &str) {
    let (status, _) = send_json(
        app,
        "POST",
        "/api/claim",
        None,
        Some(serde_json::json!({ "code": code, "roblox_username": username })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

async fn seed_claims(db: &sea_orm::DatabaseConnection, app: axum::Router) {
    let p1 = create_test_product(db, "Sword", 1000, None).await;
    let p2 = create_test_product(db, "Shield", 2000, Some(1500)).await;

    create_test_code(db, "AAAA-AAAA-AAAA", &[p1.id], CodeSeed::default()).await;
    create_test_code(db, "BBBB-BBBB-BBBB", &[p1.id, p2.id], CodeSeed::default()).await;
    create_test_code(
        db,
        "CCCC-CCCC-CCCC",
        &[p2.id],
        CodeSeed {
            is_test_code: true,
            ..Default::default()
        },
    )
    .await;

    claim_ok(app.clone(), "AAAA-AAAA-AAAA", "PlayerOne").await;
    claim_ok(app.clone(), "BBBB-BBBB-BBBB", "PlayerTwo").await;
    claim_ok(app, "CCCC-CCCC-CCCC", "Tester").await;
}

#[tokio::test]
async fn test_ledger_listing_excludes_test_claims_by_default() {
    let db = create_test_db().await;
    let app = build_test_app(db.clone());
    seed_claims(&db, app.clone()).await;
    let cookie = login_as_admin(app.clone(), &db).await;

    let (status, json) = send_json(app.clone(), "GET", "/api/admin/claims", Some(&cookie), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total"], 2);
    let records = json["records"].as_array().unwrap();
    assert!(records.iter().all(|r| r["is_test_claim"] == false));

    let (_, json) = send_json(
        app,
        "GET",
        "/api/admin/claims?include_test=true",
        Some(&cookie),
        None,
    )
    .await;
    assert_eq!(json["total"], 3);
}

#[tokio::test]
async fn test_ledger_pagination() {
    let db = create_test_db().await;
    let app = build_test_app(db.clone());
    seed_claims(&db, app.clone()).await;
    let cookie = login_as_admin(app.clone(), &db).await;

    let (status, json) = send_json(
        app,
        "GET",
        "/api/admin/claims?page=1&per_page=1",
        Some(&cookie),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["records"].as_array().unwrap().len(), 1);
    assert_eq!(json["total"], 2);
    assert_eq!(json["total_pages"], 2);
}

#[tokio::test]
async fn test_stats_exclude_test_claims() {
    let db = create_test_db().await;
    let app = build_test_app(db.clone());
    seed_claims(&db, app.clone()).await;
    let cookie = login_as_admin(app.clone(), &db).await;

    let (status, json) = send_json(
        app,
        "GET",
        "/api/admin/claims/stats",
        Some(&cookie),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(json["total_claims"], 2);
    assert_eq!(json["claims_today"], 2);
    assert_eq!(json["claims_this_week"], 2);

    // Sword (10.00) + Sword+Shield (10.00 + 15.00); the 15.00 test claim of
    // the Shield code is excluded
    let revenue: Decimal = json["total_revenue"].as_str().unwrap().parse().unwrap();
    assert_eq!(revenue, Decimal::new(3500, 2));
    let discount: Decimal = json["total_discount"].as_str().unwrap().parse().unwrap();
    assert_eq!(discount, Decimal::new(500, 2));

    assert_eq!(json["recent_claims"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_stats_empty_ledger() {
    let db = create_test_db().await;
    let app = build_test_app(db.clone());
    let cookie = login_as_admin(app.clone(), &db).await;

    let (status, json) = send_json(
        app,
        "GET",
        "/api/admin/claims/stats",
        Some(&cookie),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total_claims"], 0);
    let revenue: Decimal = json["total_revenue"].as_str().unwrap().parse().unwrap();
    assert_eq!(revenue, Decimal::ZERO);
}
