//! Database queries for base orders and their type-specific detail rows.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, Set,
    sea_query::Expr,
};
use uuid::Uuid;

use crate::entity::{base_order, living_order, memoriam_order};
use crate::error::{AppError, AppResult};
use crate::models::{
    FormKind, LivingFormData, LivingOrderPatch, MemoriamFormData, MemoriamOrderPatch, OrderType,
};

use super::DbPool;

impl DbPool {
    /// Insert the base order row.
    pub async fn insert_base_order(&self, id: Uuid, order_type: OrderType) -> AppResult<()> {
        let model = base_order::ActiveModel {
            id: Set(id),
            order_type: Set(order_type.as_str().to_string()),
            created_at: Set(Utc::now()),
        };

        model
            .insert(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to insert base order: {}", e)))?;

        Ok(())
    }

    /// Delete the base order row. Dependent rows cascade at the schema level.
    pub async fn delete_base_order(&self, id: Uuid) -> AppResult<()> {
        base_order::Entity::delete_by_id(id)
            .exec(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to delete base order: {}", e)))?;

        Ok(())
    }

    /// Look up the order type for an identifier.
    pub async fn get_order_type(&self, id: Uuid) -> AppResult<Option<OrderType>> {
        let result = base_order::Entity::find_by_id(id)
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get base order: {}", e)))?;

        match result {
            Some(order) => {
                let order_type = OrderType::parse(&order.order_type).ok_or_else(|| {
                    AppError::Database(format!(
                        "Base order {} has unknown order_type '{}'",
                        id, order.order_type
                    ))
                })?;
                Ok(Some(order_type))
            }
            None => Ok(None),
        }
    }

    /// Get a base order row by ID.
    pub async fn get_base_order(&self, id: Uuid) -> AppResult<Option<base_order::Model>> {
        let result = base_order::Entity::find_by_id(id)
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get base order: {}", e)))?;

        Ok(result)
    }

    /// Insert the living detail row for a validated submission.
    pub async fn insert_living_detail(&self, id: Uuid, form: &LivingFormData) -> AppResult<()> {
        let model = living_order::ActiveModel {
            id: Set(id),
            first_name: Set(form.first_name.clone()),
            last_name: Set(form.last_name.clone()),
            email: Set(form.email.clone()),
            phone: Set(form.phone.clone()),
            street_address: Set(form.street_address.clone()),
            street_address2: Set(form.street_address2.clone()),
            city: Set(form.city.clone()),
            state: Set(form.state.clone()),
            postal_code: Set(form.postal_code.clone()),
            disposition: Set(form.disposition.as_str().to_string()),
            alteration_notes: Set(form.alteration_notes.clone()),
            inspiration_notes: Set(form.inspiration_notes.clone()),
            total_price: Set(None),
            intake_form_path: Set(None),
            consent_form_path: Set(None),
        };

        model
            .insert(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to insert living order: {}", e)))?;

        Ok(())
    }

    /// Insert the memoriam detail row for a validated submission.
    pub async fn insert_memoriam_detail(&self, id: Uuid, form: &MemoriamFormData) -> AppResult<()> {
        let model = memoriam_order::ActiveModel {
            id: Set(id),
            first_name: Set(form.base.first_name.clone()),
            last_name: Set(form.base.last_name.clone()),
            email: Set(form.base.email.clone()),
            phone: Set(form.base.phone.clone()),
            street_address: Set(form.base.street_address.clone()),
            street_address2: Set(form.base.street_address2.clone()),
            city: Set(form.base.city.clone()),
            state: Set(form.base.state.clone()),
            postal_code: Set(form.base.postal_code.clone()),
            disposition: Set(form.base.disposition.as_str().to_string()),
            alteration_notes: Set(form.base.alteration_notes.clone()),
            inspiration_notes: Set(form.base.inspiration_notes.clone()),
            total_price: Set(None),
            funeral_home_name: Set(form.funeral_home_name.clone()),
            funeral_home_rep: Set(form.funeral_home_rep.clone()),
            photograph_disposition: Set(form
                .photograph_disposition
                .map(|d| d.as_str().to_string())),
            intake_form_path: Set(None),
            consent_form_path: Set(None),
        };

        model
            .insert(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to insert memoriam order: {}", e)))?;

        Ok(())
    }

    /// Delete a living detail row.
    pub async fn delete_living_detail(&self, id: Uuid) -> AppResult<()> {
        living_order::Entity::delete_by_id(id)
            .exec(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to delete living order: {}", e)))?;

        Ok(())
    }

    /// Delete a memoriam detail row.
    pub async fn delete_memoriam_detail(&self, id: Uuid) -> AppResult<()> {
        memoriam_order::Entity::delete_by_id(id)
            .exec(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to delete memoriam order: {}", e)))?;

        Ok(())
    }

    /// Get a living order detail row by ID.
    pub async fn get_living_order(&self, id: Uuid) -> AppResult<Option<living_order::Model>> {
        let result = living_order::Entity::find_by_id(id)
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get living order: {}", e)))?;

        Ok(result)
    }

    /// Get a memoriam order detail row by ID.
    pub async fn get_memoriam_order(&self, id: Uuid) -> AppResult<Option<memoriam_order::Model>> {
        let result = memoriam_order::Entity::find_by_id(id)
            .one(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to get memoriam order: {}", e)))?;

        Ok(result)
    }

    /// Apply a staff patch to a living order. Absent fields are untouched;
    /// last write wins, no version check.
    pub async fn update_living_order(
        &self,
        id: Uuid,
        patch: &LivingOrderPatch,
    ) -> AppResult<Option<living_order::Model>> {
        let Some(existing) = self.get_living_order(id).await? else {
            return Ok(None);
        };

        let mut active = existing.into_active_model();
        apply_living_patch(&mut active, patch);

        let updated = active
            .update(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to update living order: {}", e)))?;

        Ok(Some(updated))
    }

    /// Apply a staff patch to a memoriam order.
    pub async fn update_memoriam_order(
        &self,
        id: Uuid,
        patch: &MemoriamOrderPatch,
    ) -> AppResult<Option<memoriam_order::Model>> {
        let Some(existing) = self.get_memoriam_order(id).await? else {
            return Ok(None);
        };

        let mut active = existing.into_active_model();
        apply_memoriam_patch(&mut active, patch);

        let updated = active
            .update(self.connection())
            .await
            .map_err(|e| AppError::Database(format!("Failed to update memoriam order: {}", e)))?;

        Ok(Some(updated))
    }

    /// Read the active document key for a form category.
    pub async fn get_form_path(
        &self,
        id: Uuid,
        order_type: OrderType,
        kind: FormKind,
    ) -> AppResult<Option<String>> {
        match order_type {
            OrderType::Living => {
                let order = self
                    .get_living_order(id)
                    .await?
                    .ok_or_else(|| AppError::NotFound("Order".to_string()))?;
                Ok(match kind {
                    FormKind::Intake => order.intake_form_path,
                    FormKind::Consent => order.consent_form_path,
                })
            }
            OrderType::Memoriam => {
                let order = self
                    .get_memoriam_order(id)
                    .await?
                    .ok_or_else(|| AppError::NotFound("Order".to_string()))?;
                Ok(match kind {
                    FormKind::Intake => order.intake_form_path,
                    FormKind::Consent => order.consent_form_path,
                })
            }
        }
    }

    /// Set or clear the active document key for a form category.
    pub async fn update_form_path(
        &self,
        id: Uuid,
        order_type: OrderType,
        kind: FormKind,
        path: Option<&str>,
    ) -> AppResult<()> {
        let value = Expr::value(path.map(str::to_string));

        match order_type {
            OrderType::Living => {
                let column = match kind {
                    FormKind::Intake => living_order::Column::IntakeFormPath,
                    FormKind::Consent => living_order::Column::ConsentFormPath,
                };
                living_order::Entity::update_many()
                    .col_expr(column, value)
                    .filter(living_order::Column::Id.eq(id))
                    .exec(self.connection())
                    .await
            }
            OrderType::Memoriam => {
                let column = match kind {
                    FormKind::Intake => memoriam_order::Column::IntakeFormPath,
                    FormKind::Consent => memoriam_order::Column::ConsentFormPath,
                };
                memoriam_order::Entity::update_many()
                    .col_expr(column, value)
                    .filter(memoriam_order::Column::Id.eq(id))
                    .exec(self.connection())
                    .await
            }
        }
        .map_err(|e| AppError::Database(format!("Failed to update form path: {}", e)))?;

        Ok(())
    }
}

fn apply_living_patch(active: &mut living_order::ActiveModel, patch: &LivingOrderPatch) {
    if let Some(ref v) = patch.first_name {
        active.first_name = Set(v.clone());
    }
    if let Some(ref v) = patch.last_name {
        active.last_name = Set(v.clone());
    }
    if let Some(ref v) = patch.email {
        active.email = Set(v.clone());
    }
    if let Some(ref v) = patch.phone {
        active.phone = Set(Some(v.clone()));
    }
    if let Some(ref v) = patch.street_address {
        active.street_address = Set(Some(v.clone()));
    }
    if let Some(ref v) = patch.street_address2 {
        active.street_address2 = Set(Some(v.clone()));
    }
    if let Some(ref v) = patch.city {
        active.city = Set(Some(v.clone()));
    }
    if let Some(ref v) = patch.state {
        active.state = Set(Some(v.clone()));
    }
    if let Some(ref v) = patch.postal_code {
        active.postal_code = Set(Some(v.clone()));
    }
    if let Some(v) = patch.disposition {
        active.disposition = Set(v.as_str().to_string());
    }
    if let Some(ref v) = patch.alteration_notes {
        active.alteration_notes = Set(Some(v.clone()));
    }
    if let Some(ref v) = patch.inspiration_notes {
        active.inspiration_notes = Set(Some(v.clone()));
    }
    if let Some(v) = patch.total_price {
        active.total_price = Set(Some(v));
    }
}

fn apply_memoriam_patch(active: &mut memoriam_order::ActiveModel, patch: &MemoriamOrderPatch) {
    let base = &patch.base;
    if let Some(ref v) = base.first_name {
        active.first_name = Set(v.clone());
    }
    if let Some(ref v) = base.last_name {
        active.last_name = Set(v.clone());
    }
    if let Some(ref v) = base.email {
        active.email = Set(v.clone());
    }
    if let Some(ref v) = base.phone {
        active.phone = Set(Some(v.clone()));
    }
    if let Some(ref v) = base.street_address {
        active.street_address = Set(Some(v.clone()));
    }
    if let Some(ref v) = base.street_address2 {
        active.street_address2 = Set(Some(v.clone()));
    }
    if let Some(ref v) = base.city {
        active.city = Set(Some(v.clone()));
    }
    if let Some(ref v) = base.state {
        active.state = Set(Some(v.clone()));
    }
    if let Some(ref v) = base.postal_code {
        active.postal_code = Set(Some(v.clone()));
    }
    if let Some(v) = base.disposition {
        active.disposition = Set(v.as_str().to_string());
    }
    if let Some(ref v) = base.alteration_notes {
        active.alteration_notes = Set(Some(v.clone()));
    }
    if let Some(ref v) = base.inspiration_notes {
        active.inspiration_notes = Set(Some(v.clone()));
    }
    if let Some(v) = base.total_price {
        active.total_price = Set(Some(v));
    }
    if let Some(ref v) = patch.funeral_home_name {
        active.funeral_home_name = Set(Some(v.clone()));
    }
    if let Some(ref v) = patch.funeral_home_rep {
        active.funeral_home_rep = Set(Some(v.clone()));
    }
    if let Some(v) = patch.photograph_disposition {
        active.photograph_disposition = Set(Some(v.as_str().to_string()));
    }
}
