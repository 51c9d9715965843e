use std::sync::Arc;

use chrono::Utc;
use tracing::{info, instrument};
use uuid::Uuid;

use models::customer::{Address, Model as Customer};
use models::validation::{optional_phone, parse_date, required, validate_email, validate_phone};

use crate::customer::domain::{CustomerInput, SearchField};
use crate::customer::repository::CustomerRepository;
use crate::errors::ServiceError;
use crate::measurement::repository::MeasurementRepository;
use crate::order::repository::OrderRepository;
use crate::pagination::{Page, Pagination};

#[derive(Clone)]
pub struct CustomerService {
    repo: Arc<dyn CustomerRepository>,
    measurements: Arc<dyn MeasurementRepository>,
    orders: Arc<dyn OrderRepository>,
}

fn trimmed(v: &Option<String>) -> Option<String> {
    v.as_deref().map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
}

fn address_of(input: &CustomerInput) -> Address {
    Address {
        town_or_village: trimmed(&input.town_or_village),
        district: trimmed(&input.district),
        state: trimmed(&input.state),
    }
}

impl CustomerService {
    pub fn new(
        repo: Arc<dyn CustomerRepository>,
        measurements: Arc<dyn MeasurementRepository>,
        orders: Arc<dyn OrderRepository>,
    ) -> Self {
        Self { repo, measurements, orders }
    }

    async fn ensure_name_free(&self, name: &str) -> Result<(), ServiceError> {
        if self.repo.find_by_name(name).await?.is_some() {
            return Err(ServiceError::conflict("Customer name already exists"));
        }
        Ok(())
    }

    async fn ensure_phone_free(&self, phone: &str, label: &str, except: Option<Uuid>) -> Result<(), ServiceError> {
        match self.repo.find_by_phone(phone).await? {
            Some(other) if Some(other.id) != except => Err(ServiceError::conflict(format!("{label} already exists"))),
            _ => Ok(()),
        }
    }

    #[instrument(skip(self, input), fields(name = ?input.name))]
    pub async fn create(&self, input: CustomerInput) -> Result<Customer, ServiceError> {
        let name = required("name", input.name.as_deref().unwrap_or_default())?;
        let phone = validate_phone("phone number", &required("phonenumber", input.phone_number.as_deref().unwrap_or_default())?)?;
        let alternate = optional_phone("alternate phone number", input.alternate_phone_number.as_deref())?;
        let email = match trimmed(&input.email) {
            Some(e) => Some(validate_email(&e)?),
            None => None,
        };
        let marital_status = required("maritalstatus", input.marital_status.as_deref().unwrap_or_default())?;
        let gender = required("gender", input.gender.as_deref().unwrap_or_default())?;
        let customer_since = parse_date(
            "customerSince",
            &required("customerSince", input.customer_since.as_deref().unwrap_or_default())?,
        )?;
        if alternate.as_deref() == Some(phone.as_str()) {
            return Err(ServiceError::validation("alternate phone number must differ from phone number"));
        }

        self.ensure_name_free(&name).await?;
        self.ensure_phone_free(&phone, "Phone number", None).await?;
        if let Some(alt) = &alternate {
            self.ensure_phone_free(alt, "Alternate phone number", None).await?;
        }

        let now = Utc::now().into();
        let mut row = Customer {
            id: Uuid::new_v4(),
            name,
            phone_number: phone,
            alternate_phone_number: alternate,
            email,
            marital_status,
            gender,
            town_or_village: None,
            district: None,
            state: None,
            customer_since,
            created_at: now,
            updated_at: now,
        };
        if input.has_address() {
            row.set_address(address_of(&input));
        }
        let saved = self.repo.insert(row).await?;
        info!(customer_id = %saved.id, "customer_created");
        Ok(saved)
    }

    #[instrument(skip(self, input), fields(customer_id = %id))]
    pub async fn update(&self, id: Uuid, input: CustomerInput) -> Result<Customer, ServiceError> {
        let mut row = self.get(id).await?;

        if let Some(name) = &input.name {
            let name = required("name", name)?;
            if name != row.name {
                self.ensure_name_free(&name).await?;
                row.name = name;
            }
        }
        if let Some(phone) = &input.phone_number {
            let phone = validate_phone("phone number", phone)?;
            if phone != row.phone_number {
                self.ensure_phone_free(&phone, "Phone number", Some(id)).await?;
                row.phone_number = phone;
            }
        }
        if let Some(raw) = &input.alternate_phone_number {
            let alternate = optional_phone("alternate phone number", Some(raw))?;
            if alternate != row.alternate_phone_number {
                if let Some(alt) = &alternate {
                    self.ensure_phone_free(alt, "Alternate phone number", Some(id)).await?;
                }
                row.alternate_phone_number = alternate;
            }
        }
        if row.alternate_phone_number.as_deref() == Some(row.phone_number.as_str()) {
            return Err(ServiceError::validation("alternate phone number must differ from phone number"));
        }
        if let Some(email) = &input.email {
            row.email = match email.trim() {
                "" => None,
                e => Some(validate_email(e)?),
            };
        }
        if let Some(ms) = &input.marital_status {
            row.marital_status = required("maritalstatus", ms)?;
        }
        if let Some(g) = &input.gender {
            row.gender = required("gender", g)?;
        }
        if let Some(since) = &input.customer_since {
            row.customer_since = parse_date("customerSince", since)?;
        }
        if input.has_address() {
            row.set_address(address_of(&input));
        }

        row.updated_at = Utc::now().into();
        let saved = self.repo.update(row).await?;
        info!(customer_id = %saved.id, "customer_updated");
        Ok(saved)
    }

    /// Removes the customer and their measurements; refused while orders exist.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        self.get(id).await?;
        let orders = self.orders.count_by_customer(id).await?;
        if orders > 0 {
            return Err(ServiceError::conflict(format!("customer has {orders} order(s) and cannot be deleted")));
        }
        let removed = self.measurements.delete_by_customer(id).await?;
        if !self.repo.delete(id).await? {
            return Err(ServiceError::not_found("customer"));
        }
        info!(customer_id = %id, measurements_removed = removed, "customer_deleted");
        Ok(())
    }

    pub async fn get(&self, id: Uuid) -> Result<Customer, ServiceError> {
        self.repo.get(id).await?.ok_or_else(|| ServiceError::not_found("customer"))
    }

    pub async fn list(&self, page: Pagination) -> Result<Page<Customer>, ServiceError> {
        self.repo.list(page).await
    }

    #[instrument(skip(self))]
    pub async fn search(&self, query: &str, kind: Option<&str>) -> Result<Vec<Customer>, ServiceError> {
        let field = SearchField::parse(kind)?;
        let query = query.trim();
        if query.is_empty() {
            return Err(ServiceError::validation("search query is required"));
        }
        self.repo.search(query, field).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::customer::repository::mock::MockCustomerRepository;
    use crate::measurement::repository::mock::MockMeasurementRepository;
    use crate::order::repository::mock::MockOrderRepository;

    struct Fixture {
        svc: CustomerService,
        measurements: Arc<MockMeasurementRepository>,
        orders: Arc<MockOrderRepository>,
    }

    fn fixture() -> Fixture {
        let measurements = Arc::new(MockMeasurementRepository::default());
        let orders = Arc::new(MockOrderRepository::default());
        let svc = CustomerService::new(Arc::new(MockCustomerRepository::default()), measurements.clone(), orders.clone());
        Fixture { svc, measurements, orders }
    }

    fn input(name: &str, phone: &str) -> CustomerInput {
        CustomerInput {
            name: Some(name.into()),
            phone_number: Some(phone.into()),
            marital_status: Some("Married".into()),
            gender: Some("Female".into()),
            customer_since: Some("2023-06-01".into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_sets_address_only_when_given() {
        let f = fixture();
        let a = f.svc.create(input("Kavya", "+919111111111")).await.unwrap();
        assert_eq!(a.address(), None);
        let b = f
            .svc
            .create(CustomerInput { district: Some("Erode".into()), ..input("Divya", "+919111111112") })
            .await
            .unwrap();
        assert_eq!(b.address().unwrap().district.as_deref(), Some("Erode"));
    }

    #[tokio::test]
    async fn create_enforces_uniqueness_and_formats() {
        let f = fixture();
        f.svc.create(input("Kavya", "+919111111111")).await.unwrap();
        assert!(matches!(f.svc.create(input("Kavya", "+919111111112")).await, Err(ServiceError::Conflict(_))));
        assert!(matches!(f.svc.create(input("Other", "+919111111111")).await, Err(ServiceError::Conflict(_))));
        let bad_email = CustomerInput { email: Some("nope".into()), ..input("X", "+919111111113") };
        assert!(f.svc.create(bad_email).await.is_err());
        let bad_date = CustomerInput { customer_since: Some("01-01-2023".into()), ..input("Y", "+919111111114") };
        assert!(f.svc.create(bad_date).await.is_err());
        let missing = CustomerInput { gender: None, ..input("Z", "+919111111115") };
        assert!(matches!(f.svc.create(missing).await, Err(ServiceError::Model(_))));
    }

    #[tokio::test]
    async fn update_clears_alternate_and_rechecks_changed_name() {
        let f = fixture();
        f.svc.create(input("Kavya", "+919111111111")).await.unwrap();
        let b = f
            .svc
            .create(CustomerInput { alternate_phone_number: Some("+919222222222".into()), ..input("Divya", "+919111111112") })
            .await
            .unwrap();
        let cleared = f
            .svc
            .update(b.id, CustomerInput { alternate_phone_number: Some(String::new()), ..Default::default() })
            .await
            .unwrap();
        assert_eq!(cleared.alternate_phone_number, None);
        let err = f
            .svc
            .update(b.id, CustomerInput { name: Some("Kavya".into()), ..Default::default() })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
        let same = f
            .svc
            .update(b.id, CustomerInput { name: Some("Divya".into()), phone_number: Some("+919111111112".into()), ..Default::default() })
            .await;
        assert!(same.is_ok());
    }

    #[tokio::test]
    async fn search_matches_substrings_case_insensitively() {
        let f = fixture();
        f.svc.create(input("Kavya Raman", "+919111111111")).await.unwrap();
        f.svc.create(input("Divya", "+919333333333")).await.unwrap();
        assert_eq!(f.svc.search("RAMAN", Some("name")).await.unwrap().len(), 1);
        assert_eq!(f.svc.search("3333", Some("phonenumber")).await.unwrap().len(), 1);
        assert_eq!(f.svc.search("vya", None).await.unwrap().len(), 2);
        assert!(matches!(f.svc.search("x", Some("email")).await, Err(ServiceError::Validation(_))));
    }

    #[tokio::test]
    async fn list_is_paginated() {
        let f = fixture();
        for i in 0..3 {
            f.svc.create(input(&format!("C{i}"), &format!("+91911111111{i}"))).await.unwrap();
        }
        let page = f.svc.list(Pagination { page: 2, per_page: 2 }).await.unwrap();
        assert_eq!(page.total, 3);
        assert_eq!(page.items.len(), 1);
    }

    #[tokio::test]
    async fn delete_cascades_measurements_and_blocks_on_orders() {
        let f = fixture();
        let c = f.svc.create(input("Kavya", "+919111111111")).await.unwrap();
        f.measurements.seed(c.id, "Blouse");
        f.svc.delete(c.id).await.unwrap();
        assert_eq!(f.measurements.count_for(c.id), 0);
        assert!(matches!(f.svc.get(c.id).await, Err(ServiceError::NotFound(_))));

        let d = f.svc.create(input("Divya", "+919111111112")).await.unwrap();
        f.orders.seed_for_customer(d.id);
        assert!(matches!(f.svc.delete(d.id).await, Err(ServiceError::Conflict(_))));
    }
}
