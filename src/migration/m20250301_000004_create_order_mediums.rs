//! Migration: Create order_mediums selection table.
//!
//! One row per selected medium; adding a medium is a data change, not a
//! schema change.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TABLE order_mediums (
                    order_id UUID NOT NULL REFERENCES base_orders(id) ON DELETE CASCADE,
                    medium VARCHAR(40) NOT NULL
                        CHECK (medium IN (
                            'acrylic', 'charcoal', 'ink', 'pencil', 'oil_paint',
                            'pastel', 'digital', 'digital_tattoo_stencil',
                            'synthetic_skin', 'watercolor'
                        )),
                    PRIMARY KEY (order_id, medium)
                );
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TABLE IF EXISTS order_mediums CASCADE;")
            .await?;

        Ok(())
    }
}
