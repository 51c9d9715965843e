use std::sync::Arc;

use argon2::{Argon2, password_hash::{PasswordHasher, PasswordVerifier, SaltString}, PasswordHash};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header as JwtHeader, Validation};
use rand::rngs::OsRng;
use tracing::{debug, info, instrument};

use super::domain::{AuthIdentity, AuthSession, Claims, LoginInput};
use super::errors::AuthError;
use super::repository::AuthRepository;

pub const MIN_PIN_LEN: usize = 6;

/// Auth service configuration
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
}

impl From<&configs::AuthConfig> for AuthConfig {
    fn from(c: &configs::AuthConfig) -> Self {
        Self { jwt_secret: c.jwt_secret.clone(), token_ttl_hours: c.token_ttl_hours }
    }
}

/// Hash a security pin with argon2 after checking its length.
pub fn hash_pin(pin: &str) -> Result<String, AuthError> {
    if pin.chars().count() < MIN_PIN_LEN {
        return Err(AuthError::Validation(format!("security pin must be at least {MIN_PIN_LEN} characters")));
    }
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(pin.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AuthError::HashError(e.to_string()))
}

pub fn verify_pin(pin: &str, hash: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(hash).map_err(|e| AuthError::HashError(e.to_string()))?;
    Ok(Argon2::default().verify_password(pin.as_bytes(), &parsed).is_ok())
}

/// Auth business service independent of web framework
#[derive(Clone)]
pub struct AuthService {
    repo: Arc<dyn AuthRepository>,
    cfg: AuthConfig,
}

impl AuthService {
    pub fn new(repo: Arc<dyn AuthRepository>, cfg: AuthConfig) -> Self { Self { repo, cfg } }

    /// Authenticate a staff member and issue a token.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::auth::{AuthConfig, AuthService, domain::LoginInput, repository::mock::MockAuthRepository};
    /// use service::files::{FileStore, repository::mock::MockBlobRepository};
    /// use service::staff::{StaffService, repository::mock::MockStaffRepository};
    ///
    /// let staff_repo = Arc::new(MockStaffRepository::default());
    /// let files = FileStore::new(Arc::new(MockBlobRepository::default()), 1024);
    /// let staff = StaffService::new(staff_repo.clone(), files);
    /// tokio_test::block_on(staff.bootstrap_admin("owner", "123456")).unwrap();
    ///
    /// let svc = AuthService::new(
    ///     Arc::new(MockAuthRepository::new(staff_repo)),
    ///     AuthConfig { jwt_secret: "secret".into(), token_ttl_hours: 12 },
    /// );
    /// let input = LoginInput { username: "Owner".into(), security_pin: "123456".into() };
    /// let session = tokio_test::block_on(svc.login(input)).unwrap();
    /// assert_eq!(session.staff.username, "owner");
    /// assert!(svc.verify_token(&session.token).is_ok());
    /// ```
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        let username = input.username.trim().to_lowercase();
        if username.is_empty() || input.security_pin.is_empty() {
            return Err(AuthError::Validation("username and security pin are required".into()));
        }

        let creds = self.repo
            .find_credentials(&username)
            .await?
            .ok_or(AuthError::InvalidUsername)?;

        if !verify_pin(&input.security_pin, &creds.pin_hash)? {
            debug!(staff_id = %creds.identity.id, "pin_mismatch");
            return Err(AuthError::InvalidPin);
        }

        let token = self.issue_token(&creds.identity)?;
        info!(staff_id = %creds.identity.id, role = %creds.identity.role, "staff_logged_in");
        Ok(AuthSession { staff: creds.identity, token })
    }

    /// Sign an HS256 token for `who`, valid for `token_ttl_hours`.
    pub fn issue_token(&self, who: &AuthIdentity) -> Result<String, AuthError> {
        let exp = (chrono::Utc::now() + chrono::Duration::hours(self.cfg.token_ttl_hours)).timestamp() as usize;
        let claims = Claims { sub: who.username.clone(), uid: who.id, role: who.role, exp };
        encode(&JwtHeader::default(), &claims, &EncodingKey::from_secret(self.cfg.jwt_secret.as_bytes()))
            .map_err(|e| AuthError::TokenError(e.to_string()))
    }

    /// Decode and check signature and expiry.
    pub fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &DecodingKey::from_secret(self.cfg.jwt_secret.as_bytes()), &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| AuthError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::repository::mock::MockAuthRepository;
    use crate::files::{repository::mock::MockBlobRepository, FileStore};
    use crate::staff::{repository::mock::MockStaffRepository, StaffService};
    use models::staff::StaffRole;

    async fn setup() -> AuthService {
        let staff_repo = Arc::new(MockStaffRepository::default());
        let staff = StaffService::new(staff_repo.clone(), FileStore::new(Arc::new(MockBlobRepository::default()), 1024));
        staff.bootstrap_admin("owner", "654321").await.unwrap();
        AuthService::new(
            Arc::new(MockAuthRepository::new(staff_repo)),
            AuthConfig { jwt_secret: "unit-secret".into(), token_ttl_hours: 1 },
        )
    }

    #[test]
    fn short_pin_is_rejected() {
        assert!(matches!(hash_pin("12345"), Err(AuthError::Validation(_))));
        let h = hash_pin("123456").unwrap();
        assert!(verify_pin("123456", &h).unwrap());
        assert!(!verify_pin("123457", &h).unwrap());
    }

    #[tokio::test]
    async fn unknown_username_and_wrong_pin_are_distinct() {
        let svc = setup().await;
        let err = svc.login(LoginInput { username: "ghost".into(), security_pin: "654321".into() }).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidUsername));
        let err = svc.login(LoginInput { username: "owner".into(), security_pin: "000000".into() }).await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidPin));
    }

    #[tokio::test]
    async fn token_round_trips_claims() {
        let svc = setup().await;
        let session = svc.login(LoginInput { username: "OWNER".into(), security_pin: "654321".into() }).await.unwrap();
        let claims = svc.verify_token(&session.token).unwrap();
        assert_eq!(claims.sub, "owner");
        assert_eq!(claims.role, StaffRole::Admin);
        assert_eq!(claims.uid, session.staff.id);
    }

    #[tokio::test]
    async fn token_signed_with_other_secret_is_rejected() {
        let svc = setup().await;
        let other = AuthService::new(
            Arc::new(MockAuthRepository::default()),
            AuthConfig { jwt_secret: "other".into(), token_ttl_hours: 1 },
        );
        let who = AuthIdentity { id: uuid::Uuid::new_v4(), username: "x".into(), role: StaffRole::Tailor };
        let token = other.issue_token(&who).unwrap();
        assert!(matches!(svc.verify_token(&token), Err(AuthError::Unauthorized)));
    }

    #[tokio::test]
    async fn expired_token_is_rejected() {
        let svc = AuthService::new(
            Arc::new(MockAuthRepository::default()),
            AuthConfig { jwt_secret: "s".into(), token_ttl_hours: -1 },
        );
        let who = AuthIdentity { id: uuid::Uuid::new_v4(), username: "x".into(), role: StaffRole::Tailor };
        let token = svc.issue_token(&who).unwrap();
        assert!(svc.verify_token(&token).is_err());
    }
}
