use folio::folio_auth::{
    AuthError, AuthenticatedUser, RequiredRoles, Role, authorize_at, check_roles,
    create_access_token_at, extract_bearer,
};
use folio::folio_config::JwtConfig;

const T0: i64 = 1_700_000_000;

fn jwt_config() -> JwtConfig {
    JwtConfig::new("test_secret_key_for_testing_purposes_32b")
}

fn header_for(user_id: &str, role: Role) -> String {
    let token = create_access_token_at(user_id, role, &jwt_config(), T0).unwrap();
    format!("Bearer {}", token)
}

#[test]
fn test_admin_token_passes_admin_and_user_gate() {
    let header = header_for("u1", Role::Admin);
    let user = authorize_at(
        Some(&header),
        &RequiredRoles::from([Role::Admin, Role::User]),
        &jwt_config(),
        T0 + 10,
    )
    .unwrap();

    assert_eq!(user.id, "u1");
    assert_eq!(user.role, Role::Admin);
}

#[test]
fn test_user_token_rejected_by_admin_gate() {
    let header = header_for("u2", Role::User);
    let result = authorize_at(
        Some(&header),
        &RequiredRoles::from(Role::Admin),
        &jwt_config(),
        T0 + 10,
    );

    assert_eq!(result.unwrap_err(), AuthError::Forbidden);
}

#[test]
fn test_empty_role_set_admits_any_authenticated_user() {
    for role in Role::ALL {
        let header = header_for("u3", role);
        assert!(authorize_at(Some(&header), &RequiredRoles::any(), &jwt_config(), T0).is_ok());
    }
}

#[test]
fn test_missing_header_is_no_token() {
    let result = authorize_at(None, &RequiredRoles::any(), &jwt_config(), T0);
    assert_eq!(result.unwrap_err(), AuthError::NoToken);
}

#[test]
fn test_bearer_without_token_is_no_token() {
    assert_eq!(extract_bearer(Some("Bearer")).unwrap_err(), AuthError::NoToken);
    assert_eq!(extract_bearer(Some("Bearer   ")).unwrap_err(), AuthError::NoToken);
    assert_eq!(extract_bearer(Some("")).unwrap_err(), AuthError::NoToken);
}

#[test]
fn test_other_scheme_is_invalid_token() {
    assert_eq!(
        extract_bearer(Some("Basic dXNlcjpwYXNz")).unwrap_err(),
        AuthError::InvalidToken
    );
    assert_eq!(extract_bearer(Some("bearer abc")).unwrap(), "abc");
}

#[test]
fn test_expired_token_checked_before_roles() {
    let header = header_for("u4", Role::User);
    let result = authorize_at(
        Some(&header),
        &RequiredRoles::from(Role::Admin),
        &jwt_config(),
        T0 + 3600,
    );

    assert_eq!(result.unwrap_err(), AuthError::ExpiredToken);
}

#[test]
fn test_tampered_token_is_invalid() {
    let header = header_for("u5", Role::User);
    let tampered = format!("{}x", header);
    let result = authorize_at(Some(&tampered), &RequiredRoles::any(), &jwt_config(), T0);

    assert_eq!(result.unwrap_err(), AuthError::InvalidToken);
}

#[test]
fn test_check_roles_on_known_user() {
    let user = AuthenticatedUser {
        id: "u6".to_string(),
        role: Role::User,
    };

    assert!(check_roles(&user, &RequiredRoles::from(Role::User)).is_ok());
    assert_eq!(
        check_roles(&user, &RequiredRoles::from(Role::Admin)).unwrap_err(),
        AuthError::Forbidden
    );
}

#[test]
fn test_error_status_and_codes() {
    use axum::http::StatusCode;

    let cases = [
        (AuthError::NoToken, StatusCode::UNAUTHORIZED, "no_token"),
        (AuthError::InvalidToken, StatusCode::UNAUTHORIZED, "invalid_token"),
        (AuthError::ExpiredToken, StatusCode::UNAUTHORIZED, "token_expired"),
        (AuthError::Forbidden, StatusCode::FORBIDDEN, "forbidden"),
    ];

    for (error, status, code) in cases {
        assert_eq!(error.status(), status);
        assert_eq!(error.code(), code);
    }
}
