mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{Duration, Utc};
use common::{create_test_scholarship, create_test_user, generate_unique_email, setup_test_app, token_for};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

async fn send(
    app: axum::Router,
    method: &str,
    uri: &str,
    token: &str,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .header("x-forwarded-for", "127.0.0.1")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

#[sqlx::test(migrations = "./migrations")]
async fn test_add_favorite_twice_keeps_single_entry(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let user = create_test_user(&mut tx, &generate_unique_email(), "testpass123", "user").await;
    let scholarship = create_test_scholarship(
        &mut tx,
        "Merit Award",
        true,
        Utc::now() + Duration::days(30),
        &[],
    )
    .await;
    tx.commit().await.unwrap();

    let token = token_for(&user);
    let uri = format!("/api/favorites/scholarships/{}", scholarship.id);

    let (status, body) = send(setup_test_app(pool.clone()), "POST", &uri, &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Scholarship added to favorites");
    assert_eq!(body["data"]["favorites"]["scholarships"].as_array().unwrap().len(), 1);

    let (status, body) = send(setup_test_app(pool.clone()), "POST", &uri, &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Scholarship is already in favorites");
    assert_eq!(body["data"]["favorites"]["scholarships"].as_array().unwrap().len(), 1);

    let (ids,): (Vec<Uuid>,) =
        sqlx::query_as("SELECT favorite_scholarships FROM users WHERE id = $1")
            .bind(user.id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(ids, vec![scholarship.id]);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_remove_non_favorite_is_404(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let user = create_test_user(&mut tx, &generate_unique_email(), "testpass123", "user").await;
    let scholarship = create_test_scholarship(
        &mut tx,
        "Merit Award",
        true,
        Utc::now() + Duration::days(30),
        &[],
    )
    .await;
    tx.commit().await.unwrap();

    let token = token_for(&user);
    let uri = format!("/api/favorites/scholarships/{}", scholarship.id);

    let (status, body) = send(setup_test_app(pool), "DELETE", &uri, &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "Scholarship is not in favorites");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_add_unpublished_scholarship_is_404(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let user = create_test_user(&mut tx, &generate_unique_email(), "testpass123", "user").await;
    let scholarship = create_test_scholarship(
        &mut tx,
        "Draft Award",
        false,
        Utc::now() + Duration::days(30),
        &[],
    )
    .await;
    tx.commit().await.unwrap();

    let token = token_for(&user);
    let uri = format!("/api/favorites/scholarships/{}", scholarship.id);

    let (status, body) = send(setup_test_app(pool), "POST", &uri, &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "Scholarship is not available");
}
