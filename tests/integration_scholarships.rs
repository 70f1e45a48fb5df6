mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{Duration, Utc};
use common::{create_test_scholarship, create_test_user, generate_unique_email, setup_test_app, token_for};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

async fn get(app: axum::Router, uri: &str, token: Option<&str>) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder()
        .method("GET")
        .uri(uri)
        .header("x-forwarded-for", "127.0.0.1");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }

    let response = app.oneshot(builder.body(Body::empty()).unwrap()).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

#[sqlx::test(migrations = "./migrations")]
async fn test_unpublished_detail_hidden_except_from_admin(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let user = create_test_user(&mut tx, &generate_unique_email(), "testpass123", "user").await;
    let admin = create_test_user(&mut tx, &generate_unique_email(), "testpass123", "admin").await;
    let scholarship = create_test_scholarship(
        &mut tx,
        "Draft Award",
        false,
        Utc::now() + Duration::days(30),
        &[],
    )
    .await;
    tx.commit().await.unwrap();

    let uri = format!("/api/scholarships/{}", scholarship.id);

    let (status, body) = get(setup_test_app(pool.clone()), &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "Scholarship not found");

    let (status, _) = get(setup_test_app(pool.clone()), &uri, Some(&token_for(&user))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = get(setup_test_app(pool.clone()), &uri, Some(&token_for(&admin))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["scholarship"]["title"], "Draft Award");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_search_matches_tag_terms(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    // Neither title nor description mentions the tags; only the tag leg of
    // the text-search column can match these queries.
    let tagged = create_test_scholarship(
        &mut tx,
        "Future Leaders Fund",
        true,
        Utc::now() + Duration::days(30),
        &["Engineering", "STEM"],
    )
    .await;
    create_test_scholarship(
        &mut tx,
        "Arts Fellowship",
        true,
        Utc::now() + Duration::days(30),
        &["Music"],
    )
    .await;
    tx.commit().await.unwrap();

    // Stemmed, lowercased query term against a capitalized tag.
    let (status, body) = get(
        setup_test_app(pool.clone()),
        "/api/scholarships?search=engineering",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let results = body["data"]["scholarships"].as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["id"], tagged.id.to_string());

    // Same through the unified search endpoint.
    let (status, body) = get(setup_test_app(pool.clone()), "/api/search?q=stem", None).await;
    assert_eq!(status, StatusCode::OK);
    let results = body["data"]["results"]["scholarships"].as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["id"], tagged.id.to_string());
}
