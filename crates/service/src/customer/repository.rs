use async_trait::async_trait;
use uuid::Uuid;

use models::customer::Model as Customer;

use crate::customer::domain::SearchField;
use crate::errors::ServiceError;
use crate::pagination::{Page, Pagination};

#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn insert(&self, customer: Customer) -> Result<Customer, ServiceError>;
    async fn update(&self, customer: Customer) -> Result<Customer, ServiceError>;
    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError>;
    async fn get(&self, id: Uuid) -> Result<Option<Customer>, ServiceError>;
    async fn find_by_name(&self, name: &str) -> Result<Option<Customer>, ServiceError>;
    /// Matches either the primary or the alternate number.
    async fn find_by_phone(&self, phone: &str) -> Result<Option<Customer>, ServiceError>;
    /// Newest first.
    async fn list(&self, page: Pagination) -> Result<Page<Customer>, ServiceError>;
    /// Case-insensitive substring match.
    async fn search(&self, query: &str, field: SearchField) -> Result<Vec<Customer>, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockCustomerRepository {
        rows: Mutex<HashMap<Uuid, Customer>>,
    }

    impl MockCustomerRepository {
        fn find(&self, pred: impl Fn(&Customer) -> bool) -> Option<Customer> {
            self.rows.lock().unwrap().values().find(|c| pred(c)).cloned()
        }

        fn newest_first(&self, pred: impl Fn(&Customer) -> bool) -> Vec<Customer> {
            let mut all: Vec<Customer> = self.rows.lock().unwrap().values().filter(|c| pred(c)).cloned().collect();
            all.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.name.cmp(&b.name)));
            all
        }
    }

    fn contains_ci(haystack: &str, needle: &str) -> bool {
        haystack.to_lowercase().contains(needle)
    }

    #[async_trait]
    impl CustomerRepository for MockCustomerRepository {
        async fn insert(&self, customer: Customer) -> Result<Customer, ServiceError> {
            self.rows.lock().unwrap().insert(customer.id, customer.clone());
            Ok(customer)
        }

        async fn update(&self, customer: Customer) -> Result<Customer, ServiceError> {
            let mut rows = self.rows.lock().unwrap();
            if !rows.contains_key(&customer.id) {
                return Err(ServiceError::not_found("customer"));
            }
            rows.insert(customer.id, customer.clone());
            Ok(customer)
        }

        async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
            Ok(self.rows.lock().unwrap().remove(&id).is_some())
        }

        async fn get(&self, id: Uuid) -> Result<Option<Customer>, ServiceError> {
            Ok(self.rows.lock().unwrap().get(&id).cloned())
        }

        async fn find_by_name(&self, name: &str) -> Result<Option<Customer>, ServiceError> {
            Ok(self.find(|c| c.name == name))
        }

        async fn find_by_phone(&self, phone: &str) -> Result<Option<Customer>, ServiceError> {
            Ok(self.find(|c| c.phone_number == phone || c.alternate_phone_number.as_deref() == Some(phone)))
        }

        async fn list(&self, page: Pagination) -> Result<Page<Customer>, ServiceError> {
            Ok(Page::from_vec(self.newest_first(|_| true), page))
        }

        async fn search(&self, query: &str, field: SearchField) -> Result<Vec<Customer>, ServiceError> {
            let q = query.to_lowercase();
            Ok(self.newest_first(|c| {
                let by_name = contains_ci(&c.name, &q);
                let by_phone = contains_ci(&c.phone_number, &q)
                    || c.alternate_phone_number.as_deref().is_some_and(|a| contains_ci(a, &q));
                match field {
                    SearchField::Name => by_name,
                    SearchField::Phone => by_phone,
                    SearchField::Any => by_name || by_phone,
                }
            }))
        }
    }
}
