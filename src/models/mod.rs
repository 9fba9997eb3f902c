//! Domain models for the order intake server.

pub mod forms;
pub mod medium;
pub mod order;

// Re-export commonly used types
pub use forms::{LivingFormData, MemoriamFormData, OrderForm};
pub use medium::Medium;
pub use order::{
    Disposition, FormKind, LivingOrder, LivingOrderPatch, MemoriamOrder, MemoriamOrderPatch,
    OrderType, PhotographDisposition,
};
