//! Create `measurement` table with FK to `customer`.
//! Values are a JSONB object of name to number.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Measurement::Table)
                    .if_not_exists()
                    .col(uuid(Measurement::Id).primary_key())
                    .col(uuid(Measurement::CustomerId).not_null())
                    .col(string_len(Measurement::ServiceType, 32).not_null())
                    .col(json_binary(Measurement::Values).not_null())
                    .col(timestamp_with_time_zone(Measurement::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Measurement::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_measurement_customer")
                            .from(Measurement::Table, Measurement::CustomerId)
                            .to(Customer::Table, Customer::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Measurement::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Measurement { Table, Id, CustomerId, ServiceType, Values, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum Customer { Table, Id }
