//! Create `customer` table. The address is flattened into three nullable columns.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Customer::Table)
                    .if_not_exists()
                    .col(uuid(Customer::Id).primary_key())
                    .col(string_len(Customer::Name, 128).unique_key().not_null())
                    .col(string_len(Customer::PhoneNumber, 16).unique_key().not_null())
                    .col(string_len_null(Customer::AlternatePhoneNumber, 16))
                    .col(string_len_null(Customer::Email, 255))
                    .col(string_len(Customer::MaritalStatus, 32).not_null())
                    .col(string_len(Customer::Gender, 16).not_null())
                    .col(string_len_null(Customer::TownOrVillage, 128))
                    .col(string_len_null(Customer::District, 128))
                    .col(string_len_null(Customer::State, 128))
                    .col(date(Customer::CustomerSince).not_null())
                    .col(timestamp_with_time_zone(Customer::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Customer::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Customer::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Customer {
    Table,
    Id,
    Name,
    PhoneNumber,
    AlternatePhoneNumber,
    Email,
    MaritalStatus,
    Gender,
    TownOrVillage,
    District,
    State,
    CustomerSince,
    CreatedAt,
    UpdatedAt,
}
