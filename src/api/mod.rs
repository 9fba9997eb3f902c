//! API endpoint modules.

pub mod attachments;
pub mod health;
pub mod openapi;
pub mod orders;

pub use attachments::configure_routes as configure_attachment_routes;
pub use health::configure_routes as configure_health_routes;
pub use openapi::ApiDoc;
pub use orders::configure_routes as configure_order_routes;
