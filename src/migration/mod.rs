//! SeaORM database migrations.

pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_base_orders;
mod m20250301_000002_create_living_orders;
mod m20250301_000003_create_memoriam_orders;
mod m20250301_000004_create_order_mediums;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_base_orders::Migration),
            Box::new(m20250301_000002_create_living_orders::Migration),
            Box::new(m20250301_000003_create_memoriam_orders::Migration),
            Box::new(m20250301_000004_create_order_mediums::Migration),
        ]
    }
}
