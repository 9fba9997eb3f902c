//! Database module providing connection management, migrations, and queries.
//!
//! Query methods live in `impl DbPool` blocks in the per-table modules.

pub mod mediums;
pub mod orders;

use std::collections::BTreeSet;

use async_trait::async_trait;
use sea_orm::{Database, DatabaseConnection};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::migration::{Migrator, MigratorTrait};
use crate::models::{FormKind, Medium, OrderForm, OrderType};

/// Database connection pool wrapper around SeaORM's connection.
#[derive(Clone)]
pub struct DbPool {
    conn: DatabaseConnection,
}

impl DbPool {
    /// Connect to the database.
    pub async fn connect(database_url: &str) -> AppResult<Self> {
        let conn = Database::connect(database_url)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to database: {}", e)))?;

        Ok(DbPool { conn })
    }

    /// Run pending migrations.
    pub async fn migrate(&self) -> AppResult<()> {
        Migrator::up(&self.conn, None)
            .await
            .map_err(|e| AppError::Database(format!("Failed to run migrations: {}", e)))?;

        Ok(())
    }

    /// Get access to the connection for executing queries.
    pub fn connection(&self) -> &DatabaseConnection {
        &self.conn
    }

    /// Wrap an existing connection, e.g. a mock backend in tests.
    #[cfg(test)]
    pub(crate) fn from_connection(conn: DatabaseConnection) -> Self {
        DbPool { conn }
    }
}

/// Relational store handle used by the submission pipeline and the
/// attachment manager.
///
/// The pipeline and attachment services take this as an explicit parameter
/// rather than reaching for a process-wide client, which also lets tests
/// substitute a store that fails on demand.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Insert the base order row carrying the generated identifier.
    async fn insert_base_order(&self, id: Uuid, order_type: OrderType) -> AppResult<()>;

    /// Delete the base order row (compensation; cascades to dependents).
    async fn delete_base_order(&self, id: Uuid) -> AppResult<()>;

    /// Insert the type-specific detail row for a validated submission.
    async fn insert_detail(&self, id: Uuid, form: &OrderForm) -> AppResult<()>;

    /// Delete the detail row (compensation).
    async fn delete_detail(&self, id: Uuid, order_type: OrderType) -> AppResult<()>;

    /// Insert the medium selection rows.
    async fn insert_mediums(&self, id: Uuid, mediums: &BTreeSet<Medium>) -> AppResult<()>;

    /// Delete the medium selection rows (compensation).
    async fn delete_mediums(&self, id: Uuid) -> AppResult<()>;

    /// Look up which detail table owns the order, or None if it does not exist.
    async fn order_type(&self, id: Uuid) -> AppResult<Option<OrderType>>;

    /// Read the active document key for a form category.
    async fn form_path(
        &self,
        id: Uuid,
        order_type: OrderType,
        kind: FormKind,
    ) -> AppResult<Option<String>>;

    /// Set or clear the active document key for a form category.
    async fn set_form_path(
        &self,
        id: Uuid,
        order_type: OrderType,
        kind: FormKind,
        path: Option<&str>,
    ) -> AppResult<()>;
}

#[async_trait]
impl OrderStore for DbPool {
    async fn insert_base_order(&self, id: Uuid, order_type: OrderType) -> AppResult<()> {
        DbPool::insert_base_order(self, id, order_type).await
    }

    async fn delete_base_order(&self, id: Uuid) -> AppResult<()> {
        DbPool::delete_base_order(self, id).await
    }

    async fn insert_detail(&self, id: Uuid, form: &OrderForm) -> AppResult<()> {
        match form {
            OrderForm::Living(data) => self.insert_living_detail(id, data).await,
            OrderForm::Memoriam(data) => self.insert_memoriam_detail(id, data).await,
        }
    }

    async fn delete_detail(&self, id: Uuid, order_type: OrderType) -> AppResult<()> {
        match order_type {
            OrderType::Living => self.delete_living_detail(id).await,
            OrderType::Memoriam => self.delete_memoriam_detail(id).await,
        }
    }

    async fn insert_mediums(&self, id: Uuid, mediums: &BTreeSet<Medium>) -> AppResult<()> {
        self.insert_order_mediums(id, mediums).await
    }

    async fn delete_mediums(&self, id: Uuid) -> AppResult<()> {
        self.delete_order_mediums(id).await
    }

    async fn order_type(&self, id: Uuid) -> AppResult<Option<OrderType>> {
        self.get_order_type(id).await
    }

    async fn form_path(
        &self,
        id: Uuid,
        order_type: OrderType,
        kind: FormKind,
    ) -> AppResult<Option<String>> {
        self.get_form_path(id, order_type, kind).await
    }

    async fn set_form_path(
        &self,
        id: Uuid,
        order_type: OrderType,
        kind: FormKind,
        path: Option<&str>,
    ) -> AppResult<()> {
        self.update_form_path(id, order_type, kind, path).await
    }
}
