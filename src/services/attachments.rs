//! Attachment manager for order photographs and signed documents.
//!
//! Attachments are never transactionally linked to an order: an order can
//! legitimately exist with zero, some, or all of its intended attachments,
//! and attachment failures never roll anything back. Photograph batches
//! report a status per file; document uploads additionally maintain the
//! active-path reference on the order's detail row.

use chrono::Utc;
use serde::Serialize;
use tracing::warn;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::db::OrderStore;
use crate::error::AppResult;
use crate::models::{FormKind, OrderType};
use crate::services::storage::{Bucket, ObjectStore, Storage};

/// One file received from a multipart upload.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

/// Terminal outcome of one file in a batch upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UploadStatus {
    Success,
    Error,
}

/// Per-file upload result reported back to the caller.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FileUploadStatus {
    pub file_name: String,
    pub status: UploadStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Upload a batch of photographs, one at a time.
///
/// Each file's outcome is independent: a failure is recorded in that file's
/// status and the remaining files are still attempted. Never touches the
/// order rows.
pub async fn upload_photographs<O: ObjectStore + ?Sized>(
    objects: &O,
    order_id: Uuid,
    files: Vec<UploadedFile>,
) -> Vec<FileUploadStatus> {
    let mut statuses = Vec::with_capacity(files.len());

    for file in files {
        let key = Storage::photograph_key(&order_id.to_string(), &file.file_name);
        let result = objects
            .upload(
                Bucket::OrderImages,
                &key,
                file.data,
                file.content_type.as_deref(),
            )
            .await;

        statuses.push(match result {
            Ok(()) => FileUploadStatus {
                file_name: file.file_name,
                status: UploadStatus::Success,
                error: None,
            },
            Err(e) => {
                warn!("Photograph upload failed for '{}': {}", key, e);
                FileUploadStatus {
                    file_name: file.file_name,
                    status: UploadStatus::Error,
                    error: Some(e.to_string()),
                }
            }
        });
    }

    statuses
}

/// Delete a single photograph object.
pub async fn delete_photograph<O: ObjectStore + ?Sized>(
    objects: &O,
    order_id: Uuid,
    file_name: &str,
) -> AppResult<()> {
    let key = Storage::photograph_key(&order_id.to_string(), file_name);
    objects.remove(Bucket::OrderImages, &[key]).await
}

/// List the photograph object names under an order's namespace.
pub async fn list_photographs<O: ObjectStore + ?Sized>(
    objects: &O,
    order_id: Uuid,
) -> AppResult<Vec<String>> {
    objects
        .list(Bucket::OrderImages, &format!("{}/", order_id))
        .await
}

/// Upload a signed intake/consent document and point the order's detail row
/// at it.
///
/// The object write and the path-reference update are two independent calls:
/// if the update fails the new blob is orphaned with no reference, and the
/// error is surfaced. After a successful replacement the superseded blob is
/// deleted best-effort.
pub async fn upload_form<O, S>(
    objects: &O,
    orders: &S,
    order_id: Uuid,
    order_type: OrderType,
    kind: FormKind,
    file: UploadedFile,
) -> AppResult<String>
where
    O: ObjectStore + ?Sized,
    S: OrderStore + ?Sized,
{
    let previous = orders.form_path(order_id, order_type, kind).await?;

    let key = Storage::form_key(
        &order_id.to_string(),
        kind.as_str(),
        Utc::now().timestamp_millis(),
    );

    objects
        .upload(
            Bucket::OrderForms,
            &key,
            file.data,
            file.content_type.as_deref(),
        )
        .await?;

    orders
        .set_form_path(order_id, order_type, kind, Some(&key))
        .await?;

    if let Some(superseded) = previous
        && let Err(e) = objects
            .remove(Bucket::OrderForms, std::slice::from_ref(&superseded))
            .await
    {
        warn!(
            "Failed to remove superseded {} form '{}': {}",
            kind.as_str(),
            superseded,
            e
        );
    }

    Ok(key)
}

/// Delete the active intake/consent document for an order.
///
/// The path reference is nulled even when the object removal fails, so a
/// half-deleted document never stays visible to staff; the removal error is
/// still surfaced afterwards.
pub async fn delete_form<O, S>(
    objects: &O,
    orders: &S,
    order_id: Uuid,
    order_type: OrderType,
    kind: FormKind,
) -> AppResult<()>
where
    O: ObjectStore + ?Sized,
    S: OrderStore + ?Sized,
{
    let Some(path) = orders.form_path(order_id, order_type, kind).await? else {
        return Ok(());
    };

    let removed = objects
        .remove(Bucket::OrderForms, std::slice::from_ref(&path))
        .await;
    if let Err(ref e) = removed {
        warn!(
            "Failed to remove {} form object '{}', clearing reference anyway: {}",
            kind.as_str(),
            path,
            e
        );
    }

    let cleared = orders.set_form_path(order_id, order_type, kind, None).await;

    removed?;
    cleared
}
