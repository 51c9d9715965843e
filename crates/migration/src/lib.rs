//! Migrator registering table migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_staff;
mod m20240101_000002_create_customer;
mod m20240101_000003_create_measurement;
mod m20240101_000004_create_orders;
mod m20240101_000005_create_stored_file;
mod m20240101_000006_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_staff::Migration),
            Box::new(m20240101_000002_create_customer::Migration),
            Box::new(m20240101_000003_create_measurement::Migration),
            Box::new(m20240101_000004_create_orders::Migration),
            Box::new(m20240101_000005_create_stored_file::Migration),
            // Indexes should always be applied last
            Box::new(m20240101_000006_add_indexes::Migration),
        ]
    }
}
