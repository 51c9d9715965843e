use async_trait::async_trait;

use super::domain::StaffCredentials;
use super::errors::AuthError;

/// Repository abstraction for auth-related persistence.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    /// `username` is already lower-cased.
    async fn find_credentials(&self, username: &str) -> Result<Option<StaffCredentials>, AuthError>;
}

/// In-memory mock reading accounts from the staff mock repository
pub mod mock {
    use super::*;
    use std::sync::Arc;

    use crate::auth::domain::AuthIdentity;
    use crate::staff::repository::{mock::MockStaffRepository, StaffRepository};

    #[derive(Default)]
    pub struct MockAuthRepository {
        staff: Arc<MockStaffRepository>,
    }

    impl MockAuthRepository {
        pub fn new(staff: Arc<MockStaffRepository>) -> Self { Self { staff } }
    }

    #[async_trait]
    impl AuthRepository for MockAuthRepository {
        async fn find_credentials(&self, username: &str) -> Result<Option<StaffCredentials>, AuthError> {
            let found = self
                .staff
                .find_by_username(username)
                .await
                .map_err(|e| AuthError::Repository(e.to_string()))?;
            Ok(found.and_then(|s| {
                let role = s.role()?;
                Some(StaffCredentials {
                    identity: AuthIdentity { id: s.id, username: s.username, role },
                    pin_hash: s.security_pin_hash,
                })
            }))
        }
    }
}
