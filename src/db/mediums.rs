//! Database queries for order medium selections.

use std::collections::BTreeSet;

use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::entity::order_medium;
use crate::error::{AppError, AppResult};
use crate::models::Medium;

use super::DbPool;

impl DbPool {
    /// Insert one selection row per medium.
    pub async fn insert_order_mediums(
        &self,
        order_id: Uuid,
        mediums: &BTreeSet<Medium>,
    ) -> AppResult<()> {
        for medium in mediums {
            let model = order_medium::ActiveModel {
                order_id: Set(order_id),
                medium: Set(medium.as_str().to_string()),
            };

            model.insert(self.connection()).await.map_err(|e| {
                AppError::Database(format!("Failed to insert medium selection: {}", e))
            })?;
        }

        Ok(())
    }

    /// Delete all medium selection rows for an order.
    pub async fn delete_order_mediums(&self, order_id: Uuid) -> AppResult<()> {
        order_medium::Entity::delete_many()
            .filter(order_medium::Column::OrderId.eq(order_id))
            .exec(self.connection())
            .await
            .map_err(|e| {
                AppError::Database(format!("Failed to delete medium selections: {}", e))
            })?;

        Ok(())
    }

    /// Get the selected mediums for an order as a set.
    pub async fn get_order_mediums(&self, order_id: Uuid) -> AppResult<BTreeSet<Medium>> {
        let rows = order_medium::Entity::find()
            .filter(order_medium::Column::OrderId.eq(order_id))
            .all(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get medium selections: {}", e)))?;

        let mut mediums = BTreeSet::new();
        for row in rows {
            let medium = Medium::parse(&row.medium).ok_or_else(|| {
                AppError::Database(format!(
                    "Order {} has unknown medium '{}'",
                    order_id, row.medium
                ))
            })?;
            mediums.insert(medium);
        }

        Ok(mediums)
    }
}
