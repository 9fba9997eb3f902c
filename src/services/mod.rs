//! Business services: submission pipeline, attachment manager, storage, and
//! outbound notifications.

pub mod attachments;
pub mod notify;
pub mod storage;
pub mod submission;

pub use attachments::{FileUploadStatus, UploadStatus, UploadedFile};
pub use notify::EmailNotifier;
pub use storage::{Bucket, ObjectStore, Storage};
pub use submission::submit_order;
