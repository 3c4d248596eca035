// tests/support/mocks/security.rs
use async_trait::async_trait;
use ticket_audit::{
    application::{
        ApplicationResult, dto::AuthenticatedUser, error::ApplicationError,
        ports::security::Authenticator,
    },
    domain::user::{Role, UserId},
};

/// テスト用トークン定数（タイポ防止とIDE補完のため）
pub const TEST_TOKEN: &str = "test-token";
pub const NO_AUDIT_TOKEN: &str = "no-audit";

#[derive(Clone, Debug, Default)]
pub struct DummyAuthenticator;

#[async_trait]
impl Authenticator for DummyAuthenticator {
    async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        match token {
            TEST_TOKEN => Ok(admin_user()),
            NO_AUDIT_TOKEN => Ok(regular_user()),
            _ => Err(ApplicationError::unauthorized("invalid token")),
        }
    }
}

pub fn admin_user() -> AuthenticatedUser {
    AuthenticatedUser::with_role(UserId(1), "tester", Role::Admin)
}

pub fn regular_user() -> AuthenticatedUser {
    AuthenticatedUser::with_role(UserId(2), "noaudit", Role::User)
}
