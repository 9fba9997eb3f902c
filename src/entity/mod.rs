//! SeaORM entity definitions for PostgreSQL database.

pub mod base_order;
pub mod living_order;
pub mod memoriam_order;
pub mod order_medium;
