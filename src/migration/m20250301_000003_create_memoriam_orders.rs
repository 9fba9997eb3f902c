//! Migration: Create memoriam_orders detail table.

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
                CREATE TABLE memoriam_orders (
                    id UUID PRIMARY KEY REFERENCES base_orders(id) ON DELETE CASCADE,

                    -- Customer contact
                    first_name VARCHAR(200) NOT NULL,
                    last_name VARCHAR(200) NOT NULL,
                    email VARCHAR(320) NOT NULL,
                    phone VARCHAR(50),
                    street_address VARCHAR(500),
                    street_address2 VARCHAR(500),
                    city VARCHAR(200),
                    state VARCHAR(100),
                    postal_code VARCHAR(20),

                    -- Artwork disposition (single enum, exclusivity by construction)
                    disposition VARCHAR(20) NOT NULL
                        CHECK (disposition IN ('as_is', 'altered')),
                    alteration_notes TEXT,
                    inspiration_notes TEXT,

                    -- Pricing in cents, set by staff
                    total_price BIGINT,

                    -- Funeral home contact
                    funeral_home_name VARCHAR(300),
                    funeral_home_rep VARCHAR(200),

                    -- Reference photograph retention policy
                    photograph_disposition VARCHAR(30)
                        CHECK (photograph_disposition IN ('DELETE_AFTER_ORDER', 'RETAIN_1_YEAR')),

                    -- Active signed document keys in the order-forms bucket
                    intake_form_path VARCHAR(500),
                    consent_form_path VARCHAR(500)
                );

                -- Index for staff lookup by customer email
                CREATE INDEX idx_memoriam_orders_email ON memoriam_orders(email);
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TABLE IF EXISTS memoriam_orders CASCADE;")
            .await?;

        Ok(())
    }
}
