//! Admin API tests: sessions, catalog management and review moderation.
//!
//! Tests marked `#[ignore]` need `DATABASE_URL`.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use axum::http::StatusCode;
use serde_json::{Value, json};
use sqlx::PgPool;
use tower::ServiceExt;

use alqotari_admin::services::AdminAuthService;
use alqotari_core::{NewReview, Rating};
use alqotari_integration_tests::{
    admin_app, body_json, json_request, lazy_pool, migrate, request, sample_seed,
    session_cookie, storefront_app,
};
use alqotari_storefront::db::{CategoryRepository, ProductRepository, ReviewRepository};

const EMAIL: &str = "owner@alqotari.store";
const PASSWORD: &str = "shemagh-and-thobe-2026";

// ============================================================================
// Without a database
// ============================================================================

#[tokio::test]
async fn test_health_needs_no_login() {
    let response = admin_app(lazy_pool())
        .oneshot(request("GET", "/health"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_management_routes_require_login() {
    let app = admin_app(lazy_pool());
    for (method, uri) in [
        ("GET", "/api/auth/me"),
        ("GET", "/api/products"),
        ("GET", "/api/categories"),
        ("GET", "/api/banners"),
        ("GET", "/api/settings"),
        ("GET", "/api/reviews"),
        ("GET", "/api/size-types"),
        ("DELETE", "/api/products/5b1f6f32-8d6e-4f0c-9f7a-2f9e3c1d7a10"),
        ("POST", "/api/reviews/5b1f6f32-8d6e-4f0c-9f7a-2f9e3c1d7a10/approve"),
    ] {
        let response = app.clone().oneshot(request(method, uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{method} {uri}");
        let body = body_json(response).await;
        assert_eq!(body["error"], "Unauthorized: login required");
    }
}

#[tokio::test]
async fn test_forged_session_cookie_is_ignored() {
    let response = admin_app(lazy_pool())
        .oneshot(json_request(
            "GET",
            "/api/auth/me",
            &Value::Null,
            Some("alq_admin_session=forged-session-id"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_rejects_incomplete_body() {
    let response = admin_app(lazy_pool())
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            &json!({ "email": EMAIL }),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// ============================================================================
// With a database
// ============================================================================

async fn setup(pool: &PgPool) {
    migrate(pool).await;
    sample_seed().apply(pool, false).await.unwrap();
    AdminAuthService::new(pool)
        .create_admin(EMAIL, "المالك", PASSWORD)
        .await
        .unwrap();
}

async fn login(pool: &PgPool) -> String {
    let response = admin_app(pool.clone())
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            &json!({ "email": "Owner@Alqotari.Store", "password": PASSWORD }),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    session_cookie(&response).expect("login sets a session cookie")
}

async fn call(
    pool: &PgPool,
    method: &str,
    uri: &str,
    body: &Value,
    cookie: &str,
) -> (StatusCode, Value) {
    let response = admin_app(pool.clone())
        .oneshot(json_request(method, uri, body, Some(cookie)))
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

#[sqlx::test(migrations = false)]
#[ignore = "Requires DATABASE_URL"]
async fn test_login_and_logout(pool: PgPool) {
    setup(&pool).await;

    let response = admin_app(pool.clone())
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            &json!({ "email": EMAIL, "password": "not-the-password" }),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(session_cookie(&response).is_none());

    let cookie = login(&pool).await;
    let (status, body) = call(&pool, "GET", "/api/auth/me", &Value::Null, &cookie).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], EMAIL);
    assert_eq!(body["name"], "المالك");

    let (status, _) = call(&pool, "POST", "/api/auth/logout", &Value::Null, &cookie).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = call(&pool, "GET", "/api/auth/me", &Value::Null, &cookie).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = false)]
#[ignore = "Requires DATABASE_URL"]
async fn test_product_management_reaches_storefront(pool: PgPool) {
    setup(&pool).await;
    let cookie = login(&pool).await;

    let (status, body) = call(
        &pool,
        "POST",
        "/api/products",
        &json!({ "name": "", "price": 100, "category": " " }),
        &cookie,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Bad request: missing required fields: name, category");

    let (status, created) = call(
        &pool,
        "POST",
        "/api/products",
        &json!({
            "name": "كوفية صوف",
            "price": 5000,
            "category": "kufi",
            "sizes": { "type": "kufi", "availableSizes": ["L", "XL"] },
        }),
        &cookie,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["inStock"], true);
    assert_eq!(created["isVisible"], true);

    let response = storefront_app(pool.clone())
        .oneshot(request("GET", "/api/products?category=kufi&size=XL"))
        .await
        .unwrap();
    let listing = body_json(response).await;
    assert_eq!(listing["total"], 2);

    let id = created["id"].as_str().unwrap();
    let (status, updated) = call(
        &pool,
        "PUT",
        &format!("/api/products/{id}"),
        &json!({ "name": "كوفية صوف", "price": 5000, "category": "kufi", "isVisible": false }),
        &cookie,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["isVisible"], false);

    let (status, all) = call(&pool, "GET", "/api/products", &Value::Null, &cookie).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 12);

    let uri = format!("/api/products/{id}");
    let (status, _) = call(&pool, "DELETE", &uri, &Value::Null, &cookie).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = call(&pool, "DELETE", &uri, &Value::Null, &cookie).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = false)]
#[ignore = "Requires DATABASE_URL"]
async fn test_deleting_category_keeps_products(pool: PgPool) {
    setup(&pool).await;
    let cookie = login(&pool).await;

    let (_, categories) = call(&pool, "GET", "/api/categories", &Value::Null, &cookie).await;
    let thobes = categories
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["slug"] == "thobes")
        .unwrap()["id"]
        .as_str()
        .unwrap()
        .to_string();

    let uri = format!("/api/categories/{thobes}");
    let (status, _) = call(&pool, "DELETE", &uri, &Value::Null, &cookie).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let products = ProductRepository::new(&pool).list().await.unwrap();
    assert_eq!(products.iter().filter(|p| p.category == "thobes").count(), 2);
}

#[sqlx::test(migrations = false)]
#[ignore = "Requires DATABASE_URL"]
async fn test_deleting_one_of_two_same_slug_categories(pool: PgPool) {
    setup(&pool).await;
    let cookie = login(&pool).await;
    let categories = CategoryRepository::new(&pool);

    let (status, duplicate) = call(
        &pool,
        "POST",
        "/api/categories",
        &json!({ "name": "أثواب رجالية", "slug": "thobes" }),
        &cookie,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let original = categories.get_by_slug("thobes").await.unwrap().unwrap();
    let uri = format!("/api/categories/{}", original.id);
    let (status, _) = call(&pool, "DELETE", &uri, &Value::Null, &cookie).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(categories.orphaned_products("thobes").await.unwrap(), None);

    let uri = format!("/api/categories/{}", duplicate["id"].as_str().unwrap());
    let (status, _) = call(&pool, "DELETE", &uri, &Value::Null, &cookie).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(categories.orphaned_products("thobes").await.unwrap(), Some(2));
}

#[sqlx::test(migrations = false)]
#[ignore = "Requires DATABASE_URL"]
async fn test_review_moderation(pool: PgPool) {
    setup(&pool).await;
    let cookie = login(&pool).await;

    let product = ProductRepository::new(&pool).list().await.unwrap().remove(0);
    let review = ReviewRepository::new(&pool)
        .create(NewReview {
            product_id: product.id,
            customer_name: "فاطمة".to_string(),
            rating: Rating::new(4).unwrap(),
            comment: None,
        })
        .await
        .unwrap();

    let (_, reviews) = call(&pool, "GET", "/api/reviews", &Value::Null, &cookie).await;
    assert_eq!(reviews[0]["isApproved"], false);

    let uri = format!("/api/reviews/{}", review.id);
    let (status, _) = call(&pool, "POST", &format!("{uri}/approve"), &Value::Null, &cookie).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let summary = ReviewRepository::new(&pool)
        .rating_summary(product.id)
        .await
        .unwrap();
    assert_eq!(summary.count, 1);

    let (status, _) = call(&pool, "DELETE", &uri, &Value::Null, &cookie).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, body) = call(&pool, "DELETE", &uri, &Value::Null, &cookie).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not found: review");
}

#[sqlx::test(migrations = false)]
#[ignore = "Requires DATABASE_URL"]
async fn test_settings_require_store_name(pool: PgPool) {
    setup(&pool).await;
    let cookie = login(&pool).await;

    let (status, mut settings) = call(&pool, "GET", "/api/settings", &Value::Null, &cookie).await;
    assert_eq!(status, StatusCode::OK);

    settings["storeName"] = json!("   ");
    let (status, _) = call(&pool, "PUT", "/api/settings", &settings, &cookie).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    settings["storeName"] = json!("القوطاري");
    settings["whatsappNumber"] = json!("+967 777 123 456");
    let (status, _) = call(&pool, "PUT", "/api/settings", &settings, &cookie).await;
    assert_eq!(status, StatusCode::OK);

    let response = storefront_app(pool.clone())
        .oneshot(request("GET", "/api/settings"))
        .await
        .unwrap();
    let public = body_json(response).await;
    assert_eq!(public["storeName"], "القوطاري");
}
