use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use models::order::{self as order_model, ImageIds, ItemStatus, Model as Order, OrderItem, OrderItems, OrderStatus};

use crate::auth::domain::AuthIdentity;
use crate::customer::repository::CustomerRepository;
use crate::errors::ServiceError;
use crate::files::{FileStore, FileUpload};
use crate::measurement::repository::MeasurementRepository;
use crate::order::customization::validate_item;
use crate::order::domain::{AssignStaffInput, CreateOrderInput, OrderItemInput, UpdateOrderInput};
use crate::order::repository::OrderRepository;
use crate::order::workflow::{self, AssignmentSlot};
use crate::pagination::{Page, Pagination};
use crate::staff::repository::StaffRepository;

pub const MAX_ITEMS: usize = 4;
pub const MAX_IMAGES: usize = 5;
/// Read-modify-write attempts on one order before a concurrent-write conflict is returned.
pub const WRITE_ATTEMPTS: usize = 3;

/// Result of a status change, for callers that record transitions.
#[derive(Clone, Debug)]
pub struct ItemTransition {
    pub order: Order,
    pub from: ItemStatus,
    pub to: ItemStatus,
}

#[derive(Clone)]
pub struct OrderService {
    repo: Arc<dyn OrderRepository>,
    customers: Arc<dyn CustomerRepository>,
    staff: Arc<dyn StaffRepository>,
    measurements: Arc<dyn MeasurementRepository>,
    files: FileStore,
}

fn check_dates(order_date: NaiveDate, due_date: NaiveDate) -> Result<(), ServiceError> {
    if order_date > Utc::now().date_naive() {
        return Err(ServiceError::validation("order date cannot be in the future"));
    }
    if due_date < order_date {
        return Err(ServiceError::validation("due date cannot be before order date"));
    }
    Ok(())
}

fn build_item(input: OrderItemInput) -> Result<OrderItem, ServiceError> {
    let sub_service = input.sub_service.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
    validate_item(input.service_type.trim(), sub_service.as_deref(), &input.customization)?;
    if let Some(p) = input.price {
        if !p.is_finite() || p < 0.0 {
            return Err(ServiceError::validation(format!("invalid item price: {p}")));
        }
    }
    Ok(OrderItem {
        item_id: Uuid::new_v4(),
        service_type: input.service_type.trim().to_string(),
        sub_service,
        customization: input.customization,
        status: ItemStatus::Pending,
        cutting_master_id: None,
        tailor_id: None,
        cutting_completed_at: None,
        stitching_completed_at: None,
        additional_work_completed_at: None,
        ironing_completed_at: None,
        quality_check_completed_at: None,
        price: input.price,
        cloth_image_id: None,
        notes: input.notes.filter(|n| !n.trim().is_empty()),
    })
}

fn refresh_status(order: &mut Order) {
    order.status = workflow::aggregate(&order.items.0).as_str().to_string();
    order.updated_at = Utc::now().into();
}

fn item_mut(order: &mut Order, item_id: Uuid) -> Result<&mut OrderItem, ServiceError> {
    order.item_mut(item_id).ok_or_else(|| ServiceError::not_found("order item"))
}

impl OrderService {
    pub fn new(
        repo: Arc<dyn OrderRepository>,
        customers: Arc<dyn CustomerRepository>,
        staff: Arc<dyn StaffRepository>,
        measurements: Arc<dyn MeasurementRepository>,
        files: FileStore,
    ) -> Self {
        Self { repo, customers, staff, measurements, files }
    }

    async fn ensure_measurement(&self, customer_id: Uuid, measurement_id: Uuid) -> Result<(), ServiceError> {
        let m = self
            .measurements
            .get(measurement_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("measurement"))?;
        if m.customer_id != customer_id {
            return Err(ServiceError::validation("measurement does not belong to the order's customer"));
        }
        Ok(())
    }

    #[instrument(skip(self, input, images), fields(staff_id = %actor.id, customer_id = %input.customer_id, images = images.len()))]
    pub async fn create(
        &self,
        actor: &AuthIdentity,
        input: CreateOrderInput,
        images: Vec<FileUpload>,
    ) -> Result<Order, ServiceError> {
        check_dates(input.order_date, input.due_date)?;
        if input.items.is_empty() || input.items.len() > MAX_ITEMS {
            return Err(ServiceError::validation(format!("an order needs 1 to {MAX_ITEMS} items")));
        }
        if images.len() > MAX_IMAGES {
            return Err(ServiceError::validation(format!("at most {MAX_IMAGES} images per order")));
        }
        for img in &images {
            self.files.validate(img)?;
        }
        let items = input.items.into_iter().map(build_item).collect::<Result<Vec<_>, _>>()?;

        let customer = self
            .customers
            .get(input.customer_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("customer"))?;
        let creator = self.staff.get(actor.id).await?.ok_or_else(|| ServiceError::not_found("staff"))?;
        if let Some(mid) = input.measurement_id {
            self.ensure_measurement(customer.id, mid).await?;
        }

        let id = Uuid::new_v4();
        let mut image_ids = Vec::with_capacity(images.len());
        for img in images {
            match self.files.store(img, Some(id)).await {
                Ok(fid) => image_ids.push(fid),
                Err(e) => {
                    self.files.delete_quietly(image_ids).await;
                    return Err(e);
                }
            }
        }

        let now = Utc::now().into();
        let total_price = items.iter().filter_map(|i| i.price).sum();
        let row = Order {
            id,
            order_number: order_model::order_number(input.order_date, id),
            customer_id: customer.id,
            customer_name: customer.name,
            staff_id: creator.id,
            staff_name: creator.name,
            measurement_id: input.measurement_id,
            order_date: input.order_date,
            due_date: input.due_date,
            items: OrderItems(items),
            status: OrderStatus::Pending.as_str().to_string(),
            total_price,
            image_ids: ImageIds(image_ids.clone()),
            notes: input.notes.filter(|n| !n.trim().is_empty()),
            version: 0,
            created_at: now,
            updated_at: now,
        };
        match self.repo.insert(row).await {
            Ok(saved) => {
                info!(order_id = %saved.id, order_number = %saved.order_number, "order_created");
                Ok(saved)
            }
            Err(e) => {
                warn!(error = %e, "order_insert_failed");
                self.files.delete_quietly(image_ids).await;
                Err(e)
            }
        }
    }

    pub async fn get(&self, id: Uuid) -> Result<Order, ServiceError> {
        self.repo.get(id).await?.ok_or_else(|| ServiceError::not_found("order"))
    }

    /// `status` is parsed leniently (`in progress`, `IN_PROGRESS`, ...).
    pub async fn list(&self, page: Pagination, status: Option<&str>) -> Result<Page<Order>, ServiceError> {
        let status = match status.map(str::trim).filter(|s| !s.is_empty()) {
            Some(s) => Some(s.parse::<OrderStatus>()?),
            None => None,
        };
        self.repo.list(page, status).await
    }

    pub async fn list_by_customer(&self, customer_id: Uuid) -> Result<Vec<Order>, ServiceError> {
        if self.customers.get(customer_id).await?.is_none() {
            return Err(ServiceError::not_found("customer"));
        }
        self.repo.list_by_customer(customer_id).await
    }

    pub async fn list_assigned(&self, staff_id: Uuid) -> Result<Vec<Order>, ServiceError> {
        self.repo.list_assigned(staff_id).await
    }

    /// Re-read the order and re-apply `apply` when another write bumps its version first.
    async fn modify<T>(
        &self,
        order_id: Uuid,
        mut apply: impl FnMut(&mut Order) -> Result<T, ServiceError>,
    ) -> Result<(Order, T), ServiceError> {
        let mut attempt = 1;
        loop {
            let mut order = self.get(order_id).await?;
            let out = apply(&mut order)?;
            order.updated_at = Utc::now().into();
            match self.repo.update(order).await {
                Ok(saved) => return Ok((saved, out)),
                Err(ServiceError::Conflict(msg)) if attempt < WRITE_ATTEMPTS => {
                    warn!(%order_id, attempt, %msg, "order_write_conflict_retrying");
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    #[instrument(skip(self, actor), fields(actor = %actor.id))]
    pub async fn update_item_status(
        &self,
        order_id: Uuid,
        item_id: Uuid,
        status: &str,
        actor: &AuthIdentity,
    ) -> Result<ItemTransition, ServiceError> {
        let to: ItemStatus = status.parse()?;
        let (order, from) = self
            .modify(order_id, |order| {
                let from = workflow::advance(item_mut(order, item_id)?, to, actor, Utc::now().into())?;
                refresh_status(order);
                Ok(from)
            })
            .await?;
        info!(%order_id, %item_id, %from, %to, order_status = %order.status, "item_status_changed");
        Ok(ItemTransition { order, from, to })
    }

    #[instrument(skip(self, input))]
    pub async fn assign_item_staff(
        &self,
        order_id: Uuid,
        item_id: Uuid,
        input: AssignStaffInput,
    ) -> Result<Order, ServiceError> {
        if input.cutting_master_id.is_none() && input.tailor_id.is_none() {
            return Err(ServiceError::validation("provide a cutting master or a tailor to assign"));
        }
        let slots = [
            (AssignmentSlot::CuttingMaster, input.cutting_master_id),
            (AssignmentSlot::Tailor, input.tailor_id),
        ];
        let mut picks = Vec::with_capacity(slots.len());
        for (slot, staff_id) in slots {
            let Some(staff_id) = staff_id else { continue };
            let staff = self.staff.get(staff_id).await?.ok_or_else(|| ServiceError::not_found("staff"))?;
            picks.push((slot, staff_id, staff.role()));
        }
        let (order, ()) = self
            .modify(order_id, |order| {
                let item = item_mut(order, item_id)?;
                for &(slot, staff_id, role) in &picks {
                    workflow::assign(item, slot, staff_id, role)?;
                }
                Ok(())
            })
            .await?;
        info!(%order_id, %item_id, "item_staff_assigned");
        Ok(order)
    }

    /// Store `image` as the item's cloth image, dropping the one it replaces.
    #[instrument(skip(self, image))]
    pub async fn set_item_cloth_image(
        &self,
        order_id: Uuid,
        item_id: Uuid,
        image: FileUpload,
    ) -> Result<Order, ServiceError> {
        let mut current = self.get(order_id).await?;
        item_mut(&mut current, item_id)?;
        let file_id = self.files.store(image, Some(order_id)).await?;
        let written = self
            .modify(order_id, |order| Ok(item_mut(order, item_id)?.cloth_image_id.replace(file_id)))
            .await;
        match written {
            Ok((saved, previous)) => {
                self.files.delete_quietly(previous).await;
                Ok(saved)
            }
            Err(e) => {
                self.files.delete_quietly([file_id]).await;
                Err(e)
            }
        }
    }

    #[instrument(skip(self, input))]
    pub async fn update(&self, id: Uuid, input: UpdateOrderInput) -> Result<Order, ServiceError> {
        let current = self.get(id).await?;
        if let Some(mid) = input.measurement_id {
            self.ensure_measurement(current.customer_id, mid).await?;
        }
        let notes = input.notes.map(|n| n.trim().to_string());
        let (saved, ()) = self
            .modify(id, |order| {
                if let Some(due) = input.due_date {
                    if due < order.order_date {
                        return Err(ServiceError::validation("due date cannot be before order date"));
                    }
                    order.due_date = due;
                }
                if let Some(n) = &notes {
                    order.notes = Some(n.clone()).filter(|n| !n.is_empty());
                }
                if let Some(mid) = input.measurement_id {
                    order.measurement_id = Some(mid);
                }
                Ok(())
            })
            .await?;
        info!(order_id = %id, "order_updated");
        Ok(saved)
    }

    /// Deletes the order with its reference images and cloth images.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        let order = self.get(id).await?;
        if !self.repo.delete(id).await? {
            return Err(ServiceError::not_found("order"));
        }
        let files = order.image_ids.0.iter().copied().chain(order.items.0.iter().filter_map(|i| i.cloth_image_id));
        self.files.delete_quietly(files.collect::<Vec<_>>()).await;
        info!(order_id = %id, "order_deleted");
        Ok(())
    }
}
