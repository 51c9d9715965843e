use async_trait::async_trait;
use uuid::Uuid;

use models::staff::{Model as Staff, StaffRole};

use crate::errors::ServiceError;

#[async_trait]
pub trait StaffRepository: Send + Sync {
    async fn insert(&self, staff: Staff) -> Result<Staff, ServiceError>;
    async fn update(&self, staff: Staff) -> Result<Staff, ServiceError>;
    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError>;
    async fn get(&self, id: Uuid) -> Result<Option<Staff>, ServiceError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<Staff>, ServiceError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Staff>, ServiceError>;
    /// Matches either the primary or the alternate number.
    async fn find_by_phone(&self, phone: &str) -> Result<Option<Staff>, ServiceError>;
    async fn list(&self, role: Option<StaffRole>) -> Result<Vec<Staff>, ServiceError>;
    async fn count(&self) -> Result<u64, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockStaffRepository {
        rows: Mutex<HashMap<Uuid, Staff>>,
    }

    impl MockStaffRepository {
        fn find(&self, pred: impl Fn(&Staff) -> bool) -> Option<Staff> {
            self.rows.lock().unwrap().values().find(|s| pred(s)).cloned()
        }
    }

    #[async_trait]
    impl StaffRepository for MockStaffRepository {
        async fn insert(&self, staff: Staff) -> Result<Staff, ServiceError> {
            let mut rows = self.rows.lock().unwrap();
            if rows.values().any(|s| s.username == staff.username) {
                return Err(ServiceError::conflict("Username already exists"));
            }
            rows.insert(staff.id, staff.clone());
            Ok(staff)
        }

        async fn update(&self, staff: Staff) -> Result<Staff, ServiceError> {
            let mut rows = self.rows.lock().unwrap();
            if !rows.contains_key(&staff.id) {
                return Err(ServiceError::not_found("staff"));
            }
            rows.insert(staff.id, staff.clone());
            Ok(staff)
        }

        async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
            Ok(self.rows.lock().unwrap().remove(&id).is_some())
        }

        async fn get(&self, id: Uuid) -> Result<Option<Staff>, ServiceError> {
            Ok(self.rows.lock().unwrap().get(&id).cloned())
        }

        async fn find_by_username(&self, username: &str) -> Result<Option<Staff>, ServiceError> {
            let username = username.to_lowercase();
            Ok(self.find(|s| s.username == username))
        }

        async fn find_by_email(&self, email: &str) -> Result<Option<Staff>, ServiceError> {
            Ok(self.find(|s| s.email == email))
        }

        async fn find_by_phone(&self, phone: &str) -> Result<Option<Staff>, ServiceError> {
            Ok(self.find(|s| s.phone_number == phone || s.alternate_phone_number.as_deref() == Some(phone)))
        }

        async fn list(&self, role: Option<StaffRole>) -> Result<Vec<Staff>, ServiceError> {
            let mut all: Vec<Staff> = self
                .rows
                .lock()
                .unwrap()
                .values()
                .filter(|s| role.map_or(true, |r| s.role == r.as_str()))
                .cloned()
                .collect();
            all.sort_by(|a, b| a.name.cmp(&b.name));
            Ok(all)
        }

        async fn count(&self) -> Result<u64, ServiceError> {
            Ok(self.rows.lock().unwrap().len() as u64)
        }
    }
}
