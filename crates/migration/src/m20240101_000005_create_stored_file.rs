//! Create `stored_file` table holding uploaded photos, documents and cloth images.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(StoredFile::Table)
                    .if_not_exists()
                    .col(uuid(StoredFile::Id).primary_key())
                    .col(uuid_null(StoredFile::OwnerId))
                    .col(string_len_null(StoredFile::FileName, 255))
                    .col(string_len(StoredFile::ContentType, 128).not_null())
                    .col(big_integer(StoredFile::SizeBytes).not_null())
                    .col(binary(StoredFile::Data).not_null())
                    .col(timestamp_with_time_zone(StoredFile::CreatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(StoredFile::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum StoredFile { Table, Id, OwnerId, FileName, ContentType, SizeBytes, Data, CreatedAt }
