// src/infrastructure/security/api_key.rs
use crate::application::{
    dto::AuthenticatedUser,
    error::{ApplicationError, ApplicationResult},
    ports::security::Authenticator,
};
use async_trait::async_trait;
use sha2::{Digest, Sha256};

/// Static bearer keys mapped to principals. Only digests are kept in memory.
#[derive(Clone, Default)]
pub struct ApiKeyAuthenticator {
    keys: Vec<([u8; 32], AuthenticatedUser)>,
}

impl ApiKeyAuthenticator {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_key(mut self, token: &str, user: AuthenticatedUser) -> Self {
        self.keys.push((digest(token), user));
        self
    }
}

fn digest(token: &str) -> [u8; 32] {
    Sha256::digest(token.as_bytes()).into()
}

// Compares every byte so timing does not reveal the matching prefix.
fn digests_equal(a: &[u8; 32], b: &[u8; 32]) -> bool {
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[async_trait]
impl Authenticator for ApiKeyAuthenticator {
    async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        let presented = digest(token);
        self.keys
            .iter()
            .find(|(known, _)| digests_equal(known, &presented))
            .map(|(_, user)| user.clone())
            .ok_or_else(|| ApplicationError::unauthorized("invalid token"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::{Role, UserId};

    #[tokio::test]
    async fn resolves_known_key_and_rejects_others() {
        let admin = AuthenticatedUser::with_role(UserId(1), "admin", Role::Admin);
        let auth = ApiKeyAuthenticator::new().with_key("correct-horse-battery", admin);

        let user = auth.authenticate("correct-horse-battery").await.unwrap();
        assert_eq!(user.username, "admin");
        assert!(user.has_capability("audit", "read"));

        let err = auth.authenticate("wrong").await.unwrap_err();
        assert!(matches!(err, ApplicationError::Unauthorized(_)));
    }
}
