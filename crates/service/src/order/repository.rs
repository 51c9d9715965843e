use async_trait::async_trait;
use uuid::Uuid;

use models::order::{Model as Order, OrderStatus};

use crate::errors::ServiceError;
use crate::pagination::{Page, Pagination};

pub const STALE_ORDER: &str = "order was changed by another request";

#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn insert(&self, order: Order) -> Result<Order, ServiceError>;
    /// Write `order` only if the stored row still carries `order.version`; the saved
    /// row has the version bumped. `Conflict` when another write landed first.
    async fn update(&self, order: Order) -> Result<Order, ServiceError>;
    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError>;
    async fn get(&self, id: Uuid) -> Result<Option<Order>, ServiceError>;
    /// Newest first, optionally restricted to one order status.
    async fn list(&self, page: Pagination, status: Option<OrderStatus>) -> Result<Page<Order>, ServiceError>;
    async fn list_by_customer(&self, customer_id: Uuid) -> Result<Vec<Order>, ServiceError>;
    /// Orders with at least one item whose cutting master or tailor is `staff_id`.
    async fn list_assigned(&self, staff_id: Uuid) -> Result<Vec<Order>, ServiceError>;
    async fn count_by_customer(&self, customer_id: Uuid) -> Result<u64, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    use chrono::Utc;
    use models::order::{ImageIds, OrderItems};

    #[derive(Default)]
    pub struct MockOrderRepository {
        rows: Mutex<HashMap<Uuid, Order>>,
    }

    impl MockOrderRepository {
        /// Insert an empty pending order for `customer_id`.
        pub fn seed_for_customer(&self, customer_id: Uuid) -> Order {
            let now = Utc::now();
            let id = Uuid::new_v4();
            let order = Order {
                id,
                order_number: models::order::order_number(now.date_naive(), id),
                customer_id,
                customer_name: "seeded".into(),
                staff_id: Uuid::new_v4(),
                staff_name: "seeded".into(),
                measurement_id: None,
                order_date: now.date_naive(),
                due_date: now.date_naive(),
                items: OrderItems::default(),
                status: OrderStatus::Pending.as_str().into(),
                total_price: 0.0,
                image_ids: ImageIds::default(),
                notes: None,
                version: 0,
                created_at: now.into(),
                updated_at: now.into(),
            };
            self.rows.lock().unwrap().insert(id, order.clone());
            order
        }

        fn newest_first(&self, pred: impl Fn(&Order) -> bool) -> Vec<Order> {
            let mut all: Vec<Order> = self.rows.lock().unwrap().values().filter(|o| pred(o)).cloned().collect();
            all.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.order_number.cmp(&b.order_number)));
            all
        }
    }

    #[async_trait]
    impl OrderRepository for MockOrderRepository {
        async fn insert(&self, order: Order) -> Result<Order, ServiceError> {
            let mut rows = self.rows.lock().unwrap();
            if rows.values().any(|o| o.order_number == order.order_number) {
                return Err(ServiceError::conflict("Order number already exists"));
            }
            rows.insert(order.id, order.clone());
            Ok(order)
        }

        async fn update(&self, order: Order) -> Result<Order, ServiceError> {
            let mut rows = self.rows.lock().unwrap();
            let stored = rows.get(&order.id).ok_or_else(|| ServiceError::not_found("order"))?;
            if stored.version != order.version {
                return Err(ServiceError::conflict(STALE_ORDER));
            }
            let saved = Order { version: order.version + 1, ..order };
            rows.insert(saved.id, saved.clone());
            Ok(saved)
        }

        async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
            Ok(self.rows.lock().unwrap().remove(&id).is_some())
        }

        async fn get(&self, id: Uuid) -> Result<Option<Order>, ServiceError> {
            Ok(self.rows.lock().unwrap().get(&id).cloned())
        }

        async fn list(&self, page: Pagination, status: Option<OrderStatus>) -> Result<Page<Order>, ServiceError> {
            let all = self.newest_first(|o| status.map_or(true, |s| o.status == s.as_str()));
            Ok(Page::from_vec(all, page))
        }

        async fn list_by_customer(&self, customer_id: Uuid) -> Result<Vec<Order>, ServiceError> {
            Ok(self.newest_first(|o| o.customer_id == customer_id))
        }

        async fn list_assigned(&self, staff_id: Uuid) -> Result<Vec<Order>, ServiceError> {
            Ok(self.newest_first(|o| o.is_assigned_to(staff_id)))
        }

        async fn count_by_customer(&self, customer_id: Uuid) -> Result<u64, ServiceError> {
            Ok(self.rows.lock().unwrap().values().filter(|o| o.customer_id == customer_id).count() as u64)
        }
    }
}
