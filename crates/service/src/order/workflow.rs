//! Item status state machine, order status aggregation and assignment guards.

use chrono::{DateTime, FixedOffset};
use uuid::Uuid;

use models::order::{ItemStatus, OrderItem, OrderStatus};
use models::staff::StaffRole;

use crate::auth::domain::AuthIdentity;
use crate::errors::ServiceError;

/// One step forward, or Stitching straight to Ironing.
pub fn is_allowed(from: ItemStatus, to: ItemStatus) -> bool {
    from.next() == Some(to) || (from == ItemStatus::Stitching && to == ItemStatus::Ironing)
}

/// Whether `actor` may move `item` out of its current status into `to`.
pub fn may_advance(item: &OrderItem, to: ItemStatus, actor: &AuthIdentity) -> bool {
    if actor.role.is_supervisor() {
        return true;
    }
    if to == ItemStatus::Completed {
        return false;
    }
    match item.status {
        ItemStatus::Pending | ItemStatus::Cutting => item.cutting_master_id == Some(actor.id),
        ItemStatus::Stitching | ItemStatus::AdditionalWork | ItemStatus::Ironing => item.tailor_id == Some(actor.id),
        ItemStatus::QualityCheck | ItemStatus::Completed => false,
    }
}

/// Validate and apply a transition, stamping the completion time of the stage being left.
pub fn advance(
    item: &mut OrderItem,
    to: ItemStatus,
    actor: &AuthIdentity,
    now: DateTime<FixedOffset>,
) -> Result<ItemStatus, ServiceError> {
    let from = item.status;
    if from == ItemStatus::Completed {
        return Err(ServiceError::validation("item is already completed"));
    }
    if !is_allowed(from, to) {
        return Err(ServiceError::validation(format!("cannot move item from {from} to {to}")));
    }
    if !may_advance(item, to, actor) {
        return Err(ServiceError::forbidden(format!("not allowed to move item from {from} to {to}")));
    }
    if to == ItemStatus::Cutting && item.cutting_master_id.is_none() {
        return Err(ServiceError::validation("assign a cutting master before cutting"));
    }
    if to == ItemStatus::Stitching && item.tailor_id.is_none() {
        return Err(ServiceError::validation("assign a tailor before stitching"));
    }
    if let Some(slot) = item.completed_at_mut(from) {
        *slot = Some(now);
    }
    item.status = to;
    Ok(from)
}

/// All Pending is Pending, all Completed is Completed, anything else is in progress.
pub fn aggregate<'a>(items: impl IntoIterator<Item = &'a OrderItem>) -> OrderStatus {
    let mut any = false;
    let mut all_pending = true;
    let mut all_completed = true;
    for i in items {
        any = true;
        all_pending &= i.status == ItemStatus::Pending;
        all_completed &= i.status == ItemStatus::Completed;
    }
    match (any, all_pending, all_completed) {
        (false, _, _) | (true, true, _) => OrderStatus::Pending,
        (true, _, true) => OrderStatus::Completed,
        _ => OrderStatus::InProgress,
    }
}

/// Role a staff member must hold for each assignment slot.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AssignmentSlot {
    CuttingMaster,
    Tailor,
}

impl AssignmentSlot {
    pub fn required_role(&self) -> StaffRole {
        match self {
            AssignmentSlot::CuttingMaster => StaffRole::CuttingMaster,
            AssignmentSlot::Tailor => StaffRole::Tailor,
        }
    }

    fn open_while(&self, status: ItemStatus) -> bool {
        match self {
            AssignmentSlot::CuttingMaster => matches!(status, ItemStatus::Pending | ItemStatus::Cutting),
            AssignmentSlot::Tailor => status < ItemStatus::AdditionalWork,
        }
    }
}

/// Put `staff_id` (holding `role`) into `slot` of `item`.
pub fn assign(item: &mut OrderItem, slot: AssignmentSlot, staff_id: Uuid, role: Option<StaffRole>) -> Result<(), ServiceError> {
    if item.status == ItemStatus::Completed {
        return Err(ServiceError::validation("completed items cannot be reassigned"));
    }
    let required = slot.required_role();
    if role != Some(required) {
        return Err(ServiceError::validation(format!("staff {staff_id} does not hold role {required}")));
    }
    if !slot.open_while(item.status) {
        return Err(ServiceError::validation(format!(
            "cannot assign {} while item is {}",
            required.as_str().to_lowercase().replace('_', " "),
            item.status
        )));
    }
    match slot {
        AssignmentSlot::CuttingMaster => item.cutting_master_id = Some(staff_id),
        AssignmentSlot::Tailor => item.tailor_id = Some(staff_id),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use models::order::Customization;

    fn item(status: ItemStatus) -> OrderItem {
        OrderItem {
            item_id: Uuid::new_v4(),
            service_type: "Aari".into(),
            sub_service: None,
            customization: Customization { kind: "Basic".into(), details: Default::default() },
            status,
            cutting_master_id: None,
            tailor_id: None,
            cutting_completed_at: None,
            stitching_completed_at: None,
            additional_work_completed_at: None,
            ironing_completed_at: None,
            quality_check_completed_at: None,
            price: None,
            cloth_image_id: None,
            notes: None,
        }
    }

    fn who(role: StaffRole) -> AuthIdentity {
        AuthIdentity { id: Uuid::new_v4(), username: "u".into(), role }
    }

    #[test]
    fn only_single_steps_and_the_additional_work_skip_are_allowed() {
        use ItemStatus::*;
        assert!(is_allowed(Pending, Cutting));
        assert!(is_allowed(Stitching, AdditionalWork));
        assert!(is_allowed(Stitching, Ironing));
        assert!(!is_allowed(Pending, Stitching));
        assert!(!is_allowed(Ironing, Stitching));
        assert!(!is_allowed(Cutting, Cutting));
        assert!(!is_allowed(Completed, Pending));
    }

    #[test]
    fn supervisor_walks_full_workflow_with_stamps() {
        let admin = who(StaffRole::Admin);
        let mut it = item(ItemStatus::Pending);
        it.cutting_master_id = Some(Uuid::new_v4());
        it.tailor_id = Some(Uuid::new_v4());
        let now = Utc::now().fixed_offset();
        for to in [ItemStatus::Cutting, ItemStatus::Stitching, ItemStatus::Ironing, ItemStatus::QualityCheck, ItemStatus::Completed] {
            advance(&mut it, to, &admin, now).unwrap();
        }
        assert_eq!(it.status, ItemStatus::Completed);
        assert!(it.cutting_completed_at.is_some());
        assert!(it.stitching_completed_at.is_some());
        assert!(it.additional_work_completed_at.is_none());
        assert!(it.ironing_completed_at.is_some());
        assert!(it.quality_check_completed_at.is_some());
        assert!(matches!(advance(&mut it, ItemStatus::Completed, &admin, now), Err(ServiceError::Validation(_))));
    }

    #[test]
    fn stage_prerequisites_are_enforced() {
        let admin = who(StaffRole::Manager);
        let now = Utc::now().fixed_offset();
        let mut it = item(ItemStatus::Pending);
        assert!(matches!(advance(&mut it, ItemStatus::Cutting, &admin, now), Err(ServiceError::Validation(_))));
        it.cutting_master_id = Some(Uuid::new_v4());
        advance(&mut it, ItemStatus::Cutting, &admin, now).unwrap();
        assert!(matches!(advance(&mut it, ItemStatus::Stitching, &admin, now), Err(ServiceError::Validation(_))));
        assert_eq!(it.status, ItemStatus::Cutting);
    }

    #[test]
    fn assigned_staff_move_only_their_stages() {
        let now = Utc::now().fixed_offset();
        let cm = who(StaffRole::CuttingMaster);
        let tailor = who(StaffRole::Tailor);
        let mut it = item(ItemStatus::Pending);
        it.cutting_master_id = Some(cm.id);
        it.tailor_id = Some(tailor.id);

        assert!(matches!(advance(&mut it, ItemStatus::Cutting, &tailor, now), Err(ServiceError::Forbidden(_))));
        advance(&mut it, ItemStatus::Cutting, &cm, now).unwrap();
        advance(&mut it, ItemStatus::Stitching, &cm, now).unwrap();
        assert!(matches!(advance(&mut it, ItemStatus::AdditionalWork, &cm, now), Err(ServiceError::Forbidden(_))));
        advance(&mut it, ItemStatus::AdditionalWork, &tailor, now).unwrap();
        advance(&mut it, ItemStatus::Ironing, &tailor, now).unwrap();
        advance(&mut it, ItemStatus::QualityCheck, &tailor, now).unwrap();
        assert!(matches!(advance(&mut it, ItemStatus::Completed, &tailor, now), Err(ServiceError::Forbidden(_))));
        advance(&mut it, ItemStatus::Completed, &who(StaffRole::Admin), now).unwrap();
    }

    #[test]
    fn unassigned_staff_are_forbidden() {
        let now = Utc::now().fixed_offset();
        let mut it = item(ItemStatus::Pending);
        it.cutting_master_id = Some(Uuid::new_v4());
        assert!(matches!(
            advance(&mut it, ItemStatus::Cutting, &who(StaffRole::CuttingMaster), now),
            Err(ServiceError::Forbidden(_))
        ));
        assert!(matches!(
            advance(&mut it, ItemStatus::Cutting, &who(StaffRole::Assistant), now),
            Err(ServiceError::Forbidden(_))
        ));
    }

    #[test]
    fn aggregation_rules() {
        let p = item(ItemStatus::Pending);
        let c = item(ItemStatus::Completed);
        let s = item(ItemStatus::Stitching);
        assert_eq!(aggregate([&p, &p]), OrderStatus::Pending);
        assert_eq!(aggregate([&c, &c]), OrderStatus::Completed);
        assert_eq!(aggregate([&p, &c]), OrderStatus::InProgress);
        assert_eq!(aggregate([&s]), OrderStatus::InProgress);
        assert_eq!(aggregate(std::iter::empty()), OrderStatus::Pending);
    }

    #[test]
    fn assignment_windows_and_roles() {
        let sid = Uuid::new_v4();
        let mut it = item(ItemStatus::Cutting);
        assign(&mut it, AssignmentSlot::CuttingMaster, sid, Some(StaffRole::CuttingMaster)).unwrap();
        assert!(assign(&mut it, AssignmentSlot::Tailor, sid, Some(StaffRole::CuttingMaster)).is_err());

        let mut stitching = item(ItemStatus::Stitching);
        assert!(assign(&mut stitching, AssignmentSlot::CuttingMaster, sid, Some(StaffRole::CuttingMaster)).is_err());
        assign(&mut stitching, AssignmentSlot::Tailor, sid, Some(StaffRole::Tailor)).unwrap();

        let mut ironing = item(ItemStatus::Ironing);
        assert!(assign(&mut ironing, AssignmentSlot::Tailor, sid, Some(StaffRole::Tailor)).is_err());
        let mut done = item(ItemStatus::Completed);
        assert!(assign(&mut done, AssignmentSlot::Tailor, sid, Some(StaffRole::Tailor)).is_err());
    }
}
