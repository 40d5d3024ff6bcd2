//! Migrator registering entity-specific migrations in dependency order.
//! Reference data is seeded after its tables exist; indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240301_000001_create_seller;
mod m20240301_000002_create_reference_tables;
mod m20240301_000003_create_product;
pub mod m20240301_000004_seed_reference_data;
mod m20240301_000005_add_indexes;

pub use m20240301_000004_seed_reference_data as seed;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240301_000001_create_seller::Migration),
            Box::new(m20240301_000002_create_reference_tables::Migration),
            Box::new(m20240301_000003_create_product::Migration),
            Box::new(m20240301_000004_seed_reference_data::Migration),
            // Indexes should always be applied last
            Box::new(m20240301_000005_add_indexes::Migration),
        ]
    }
}
