//! Memoriam order detail entity for SeaORM.
//!
//! Same shape as a living order plus funeral-home contact and the
//! photograph retention policy.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "memoriam_orders")]
pub struct Model {
    /// Shares the base order's identifier.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    // Customer contact
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub street_address: Option<String>,
    pub street_address2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,

    // Artwork disposition: 'as_is' or 'altered'
    pub disposition: String,
    pub alteration_notes: Option<String>,
    pub inspiration_notes: Option<String>,

    // Pricing in cents, set by staff
    pub total_price: Option<i64>,

    // Funeral home contact
    pub funeral_home_name: Option<String>,
    pub funeral_home_rep: Option<String>,

    // 'DELETE_AFTER_ORDER' or 'RETAIN_1_YEAR'
    pub photograph_disposition: Option<String>,

    // Active signed document keys in the order-forms bucket
    pub intake_form_path: Option<String>,
    pub consent_form_path: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::base_order::Entity",
        from = "Column::Id",
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
