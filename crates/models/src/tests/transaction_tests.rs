use anyhow::Result;
use chrono::{NaiveDate, Utc};
use sea_orm::{ActiveModelTrait, EntityTrait, TransactionTrait};
use uuid::Uuid;

use crate::customer;
use super::{db_tests_enabled, setup_test_db};

/// Rolled back inserts leave nothing behind
#[tokio::test]
async fn test_transaction_rollback() -> Result<()> {
    if !db_tests_enabled() {
        return Ok(());
    }
    let db = setup_test_db().await?;

    let now = Utc::now().into();
    let id = Uuid::new_v4();
    let txn = db.begin().await?;
    customer::ActiveModel::from(customer::Model {
        id,
        name: format!("Rollback {id}"),
        phone_number: format!("+91{}", &id.as_u128().to_string()[..10]),
        alternate_phone_number: None,
        email: None,
        marital_status: "Single".into(),
        gender: "Male".into(),
        town_or_village: None,
        district: None,
        state: None,
        customer_since: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        created_at: now,
        updated_at: now,
    })
    .insert(&txn)
    .await?;
    txn.rollback().await?;

    assert!(customer::Entity::find_by_id(id).one(&db).await?.is_none());
    Ok(())
}
