use folio::folio_auth::{
    AuthError, Role, create_access_token, create_access_token_at, verify_token, verify_token_at,
};
use folio::folio_config::JwtConfig;
use uuid::Uuid;

const T0: i64 = 1_700_000_000;

fn get_test_jwt_config() -> JwtConfig {
    JwtConfig::new("test_secret_key_for_testing_purposes_32b").with_expiry(3600)
}

#[test]
fn test_create_access_token_success() {
    let token = create_access_token(
        &Uuid::new_v4().to_string(),
        Role::User,
        &get_test_jwt_config(),
    )
    .unwrap();

    assert!(!token.is_empty());
    assert_eq!(token.split('.').count(), 3);
}

#[test]
fn test_verify_token_returns_identity_and_role() {
    let jwt_config = get_test_jwt_config();
    let user_id = Uuid::new_v4().to_string();

    for role in Role::ALL {
        let token = create_access_token(&user_id, role, &jwt_config).unwrap();
        let claims = verify_token(&token, &jwt_config).unwrap();

        assert_eq!(claims.user.id, user_id);
        assert_eq!(claims.user.role, role);
    }
}

#[test]
fn test_token_expiry_is_issue_time_plus_lifetime() {
    let jwt_config = get_test_jwt_config();
    let token = create_access_token_at("u1", Role::Admin, &jwt_config, T0).unwrap();
    let claims = verify_token_at(&token, &jwt_config, T0).unwrap();

    assert_eq!(claims.iat, T0);
    assert_eq!(claims.exp, T0 + 3600);
}

#[test]
fn test_token_valid_until_last_second() {
    let jwt_config = get_test_jwt_config();
    let token = create_access_token_at("u1", Role::User, &jwt_config, T0).unwrap();

    assert!(verify_token_at(&token, &jwt_config, T0 + 3599).is_ok());
    assert_eq!(
        verify_token_at(&token, &jwt_config, T0 + 3600).unwrap_err(),
        AuthError::ExpiredToken
    );
    assert_eq!(
        verify_token_at(&token, &jwt_config, T0 + 7200).unwrap_err(),
        AuthError::ExpiredToken
    );
}

#[test]
fn test_verify_token_wrong_secret() {
    let token = create_access_token("u1", Role::User, &get_test_jwt_config()).unwrap();
    let other = JwtConfig::new("another_secret_key_for_testing_purposes");

    assert_eq!(
        verify_token(&token, &other).unwrap_err(),
        AuthError::InvalidToken
    );
}

#[test]
fn test_verify_token_malformed() {
    let jwt_config = get_test_jwt_config();

    for token in ["", "garbage", "a.b.c", "eyJhbGciOiJIUzI1NiJ9.e30."] {
        assert_eq!(
            verify_token(token, &jwt_config).unwrap_err(),
            AuthError::InvalidToken,
            "token {:?} should be invalid",
            token
        );
    }
}

#[test]
fn test_different_users_get_different_tokens() {
    let jwt_config = get_test_jwt_config();
    let first = create_access_token_at("u1", Role::User, &jwt_config, T0).unwrap();
    let second = create_access_token_at("u2", Role::User, &jwt_config, T0).unwrap();

    assert_ne!(first, second);
}

#[test]
fn test_short_lifetime_config() {
    let jwt_config = get_test_jwt_config().with_expiry(1);
    let token = create_access_token_at("u1", Role::User, &jwt_config, T0).unwrap();

    assert!(verify_token_at(&token, &jwt_config, T0).is_ok());
    assert_eq!(
        verify_token_at(&token, &jwt_config, T0 + 1).unwrap_err(),
        AuthError::ExpiredToken
    );
}
