//! Create `staff` table.
//!
//! Usernames are stored lower-case, so a plain unique key is enough.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Staff::Table)
                    .if_not_exists()
                    .col(uuid(Staff::Id).primary_key())
                    .col(string_len(Staff::Name, 128).not_null())
                    .col(string_len(Staff::Username, 64).unique_key().not_null())
                    .col(string_len(Staff::PhoneNumber, 16).unique_key().not_null())
                    .col(string_len_null(Staff::AlternatePhoneNumber, 16))
                    .col(string_len(Staff::Email, 255).unique_key().not_null())
                    .col(date_null(Staff::DateOfBirth))
                    .col(integer_null(Staff::Age))
                    .col(string_len(Staff::Sex, 16).not_null())
                    .col(string_len(Staff::MaritalStatus, 32).not_null())
                    .col(date(Staff::JoinedDate).not_null())
                    .col(text_null(Staff::Address))
                    .col(string_len(Staff::Role, 32).not_null())
                    .col(string_len(Staff::SecurityPinHash, 255).not_null())
                    .col(string_len(Staff::DocumentType, 64).not_null())
                    .col(uuid_null(Staff::PhotoId))
                    .col(uuid_null(Staff::DocumentPhotoId))
                    .col(timestamp_with_time_zone(Staff::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Staff::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Staff::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Staff {
    Table,
    Id,
    Name,
    Username,
    PhoneNumber,
    AlternatePhoneNumber,
    Email,
    DateOfBirth,
    Age,
    Sex,
    MaritalStatus,
    JoinedDate,
    Address,
    Role,
    SecurityPinHash,
    DocumentType,
    PhotoId,
    DocumentPhotoId,
    CreatedAt,
    UpdatedAt,
}
