//! Base order entity for SeaORM.
//!
//! Owns the server-generated identifier every other order record hangs off.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "base_orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// 'Living' or 'Memoriam'; selects the detail table.
    pub order_type: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::living_order::Entity")]
    LivingOrder,
    #[sea_orm(has_one = "super::memoriam_order::Entity")]
    MemoriamOrder,
    #[sea_orm(has_many = "super::order_medium::Entity")]
    OrderMediums,
}

impl Related<super::living_order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LivingOrder.def()
    }
}

impl Related<super::memoriam_order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MemoriamOrder.def()
    }
}

impl Related<super::order_medium::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderMediums.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
