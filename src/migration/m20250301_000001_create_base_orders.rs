//! Migration: Create base_orders table.

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
                CREATE TABLE base_orders (
                    id UUID PRIMARY KEY, -- UUIDv7 for time-ordered sorting
                    order_type VARCHAR(20) NOT NULL
                        CHECK (order_type IN ('Living', 'Memoriam')),
                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                );

                -- Index for staff dashboards listing recent orders by type
                CREATE INDEX idx_base_orders_type_created ON base_orders(order_type, created_at DESC);
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TABLE IF EXISTS base_orders CASCADE;")
            .await?;

        Ok(())
    }
}
