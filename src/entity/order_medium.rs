//! Order medium selection entity for SeaORM.
//!
//! One row per selected medium; membership in this table is the selection.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "order_mediums")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub order_id: Uuid,
    /// Stored medium name, e.g. 'ink' or 'digital_tattoo_stencil'.
    #[sea_orm(primary_key, auto_increment = false)]
    pub medium: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::base_order::Entity",
        from = "Column::OrderId",
        to = "super::base_order::Column::Id",
        on_delete = "Cascade"
    )]
    BaseOrder,
}

impl Related<super::base_order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BaseOrder.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
