use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Staff: list filter by role
        manager
            .create_index(
                Index::create()
                    .name("idx_staff_role")
                    .table(Staff::Table)
                    .col(Staff::Role)
                    .to_owned(),
            )
            .await?;

        // Measurement: lookups by customer
        manager
            .create_index(
                Index::create()
                    .name("idx_measurement_customer")
                    .table(Measurement::Table)
                    .col(Measurement::CustomerId)
                    .to_owned(),
            )
            .await?;

        // Orders: by customer, by status, newest first
        manager
            .create_index(
                Index::create()
                    .name("idx_orders_customer")
                    .table(Orders::Table)
                    .col(Orders::CustomerId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_orders_status")
                    .table(Orders::Table)
                    .col(Orders::Status)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_orders_created_at")
                    .table(Orders::Table)
                    .col(Orders::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // StoredFile: by owner
        manager
            .create_index(
                Index::create()
                    .name("idx_stored_file_owner")
                    .table(StoredFile::Table)
                    .col(StoredFile::OwnerId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_stored_file_owner").table(StoredFile::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_orders_created_at").table(Orders::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_orders_status").table(Orders::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_orders_customer").table(Orders::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_measurement_customer").table(Measurement::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_staff_role").table(Staff::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Staff { Table, Role }

#[derive(DeriveIden)]
enum Measurement { Table, CustomerId }

#[derive(DeriveIden)]
enum Orders { Table, CustomerId, Status, CreatedAt }

#[derive(DeriveIden)]
enum StoredFile { Table, OwnerId }
