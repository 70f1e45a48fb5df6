use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};
use scholarhub::config::jwt::JwtConfig;
use scholarhub::modules::auth::model::Claims;
use scholarhub::modules::users::model::UserRole;
use scholarhub::utils::jwt::{create_token, verify_token};
use uuid::Uuid;

fn get_test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test_secret_key_for_testing_purposes".to_string(),
        token_expiry: 3600,
    }
}

#[test]
fn test_create_token_success() {
    let jwt_config = get_test_jwt_config();
    let user_id = Uuid::new_v4();

    let result = create_token(user_id, "test@example.com", UserRole::User, &jwt_config);

    assert!(result.is_ok());
    assert!(!result.unwrap().is_empty());
}

#[test]
fn test_verify_token_round_trips_claims() {
    let jwt_config = get_test_jwt_config();
    let user_id = Uuid::new_v4();
    let email = "test@example.com";

    let token = create_token(user_id, email, UserRole::User, &jwt_config).unwrap();
    let claims = verify_token(&token, &jwt_config).unwrap();

    assert_eq!(claims.sub, user_id.to_string());
    assert_eq!(claims.email, email);
    assert_eq!(claims.role, "user");
}

#[test]
fn test_token_contains_admin_role() {
    let jwt_config = get_test_jwt_config();
    let user_id = Uuid::new_v4();

    let token = create_token(user_id, "admin@example.com", UserRole::Admin, &jwt_config).unwrap();
    let claims = verify_token(&token, &jwt_config).unwrap();

    assert_eq!(claims.role, "admin");
}

#[test]
fn test_verify_token_garbage() {
    let jwt_config = get_test_jwt_config();

    assert!(verify_token("invalid.token.here", &jwt_config).is_err());
    assert!(verify_token("", &jwt_config).is_err());
}

#[test]
fn test_verify_token_wrong_secret() {
    let jwt_config = get_test_jwt_config();
    let token = create_token(
        Uuid::new_v4(),
        "test@example.com",
        UserRole::User,
        &jwt_config,
    )
    .unwrap();

    let wrong_config = JwtConfig {
        secret: "different_secret_key".to_string(),
        token_expiry: 3600,
    };

    let err = verify_token(&token, &wrong_config).unwrap_err();
    assert_eq!(err.error.to_string(), "Invalid token. Please login again.");
}

#[test]
fn test_expired_token_fails_distinctly_from_tampered() {
    let jwt_config = get_test_jwt_config();
    let now = Utc::now().timestamp() as usize;

    // Well past the decoder's clock-skew leeway.
    let expired_claims = Claims {
        sub: Uuid::new_v4().to_string(),
        email: "test@example.com".to_string(),
        role: "user".to_string(),
        iat: now - 7200,
        exp: now - 3600,
    };
    let expired_token = encode(
        &Header::default(),
        &expired_claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .unwrap();

    let expired_err = verify_token(&expired_token, &jwt_config).unwrap_err();
    assert_eq!(
        expired_err.error.to_string(),
        "Token has expired. Please login again."
    );

    // Same token with a flipped signature byte fails as invalid, not expired.
    let valid_token = create_token(
        Uuid::new_v4(),
        "test@example.com",
        UserRole::User,
        &jwt_config,
    )
    .unwrap();
    let mut tampered = valid_token.clone();
    tampered.pop();
    tampered.push(if valid_token.ends_with('A') { 'B' } else { 'A' });

    let tampered_err = verify_token(&tampered, &jwt_config).unwrap_err();
    assert_eq!(
        tampered_err.error.to_string(),
        "Invalid token. Please login again."
    );
}
