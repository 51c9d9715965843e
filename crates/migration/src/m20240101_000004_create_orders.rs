//! Create `orders` table.
//!
//! Items and image ids stay embedded as JSONB so an order is read and written
//! as one row. Customer deletion is restricted while orders reference it.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Orders::Table)
                    .if_not_exists()
                    .col(uuid(Orders::Id).primary_key())
                    .col(string_len(Orders::OrderNumber, 32).unique_key().not_null())
                    .col(uuid(Orders::CustomerId).not_null())
                    .col(string_len(Orders::CustomerName, 128).not_null())
                    .col(uuid(Orders::StaffId).not_null())
                    .col(string_len(Orders::StaffName, 128).not_null())
                    .col(uuid_null(Orders::MeasurementId))
                    .col(date(Orders::OrderDate).not_null())
                    .col(date(Orders::DueDate).not_null())
                    .col(json_binary(Orders::Items).not_null())
                    .col(string_len(Orders::Status, 16).not_null())
                    .col(double(Orders::TotalPrice).not_null())
                    .col(json_binary(Orders::ImageIds).not_null())
                    .col(text_null(Orders::Notes))
                    .col(integer(Orders::Version).not_null().default(0))
                    .col(timestamp_with_time_zone(Orders::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Orders::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_orders_customer")
                            .from(Orders::Table, Orders::CustomerId)
                            .to(Customer::Table, Customer::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Orders::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Orders {
    Table,
    Id,
    OrderNumber,
    CustomerId,
    CustomerName,
    StaffId,
    StaffName,
    MeasurementId,
    OrderDate,
    DueDate,
    Items,
    Status,
    TotalPrice,
    ImageIds,
    Notes,
    Version,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Customer { Table, Id }
