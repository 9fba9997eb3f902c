//! Attachment API handlers: order photographs and signed documents.

use actix_multipart::Multipart;
use actix_web::{HttpResponse, web};
use futures_util::StreamExt;
use serde::Serialize;
use tracing::info;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::StaffAuth;
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::FormKind;
use crate::services::storage::{Bucket, ObjectStore};
use crate::services::{FileUploadStatus, Storage, UploadedFile, attachments};

/// One photograph listing entry.
#[derive(Debug, Serialize, ToSchema)]
pub struct PhotographEntry {
    pub file_name: String,
    pub url: String,
}

/// Photograph listing response.
#[derive(Debug, Serialize, ToSchema)]
pub struct PhotographListResponse {
    pub images: Vec<PhotographEntry>,
}

/// Batch photograph upload response.
#[derive(Debug, Serialize, ToSchema)]
pub struct PhotographUploadResponse {
    pub files: Vec<FileUploadStatus>,
}

/// Document upload response.
#[derive(Debug, Serialize, ToSchema)]
pub struct FormUploadResponse {
    pub path: String,
    pub url: String,
}

/// Most files accepted in one multipart batch.
const MAX_BATCH_FILES: usize = 20;

/// Cumulative batch cap, as a multiple of the per-file limit. The whole
/// batch is buffered before any storage call, so this bounds memory per
/// request.
const MAX_BATCH_SIZE_FACTOR: usize = 4;

/// Collect the files of a multipart payload into memory.
///
/// Rejects path-traversal names, files over the configured per-file size
/// limit, and batches over the file-count or cumulative-size caps before
/// anything reaches storage.
async fn collect_files(mut payload: Multipart, max_file_size: usize) -> AppResult<Vec<UploadedFile>> {
    let max_batch_size = max_file_size.saturating_mul(MAX_BATCH_SIZE_FACTOR);
    let mut total_bytes: usize = 0;
    let mut files = Vec::new();

    while let Some(item) = payload.next().await {
        let mut field =
            item.map_err(|e| AppError::Validation(format!("Multipart error: {}", e)))?;

        let content_disposition = field
            .content_disposition()
            .ok_or_else(|| AppError::Validation("Missing content disposition".to_string()))?;

        let file_name = match content_disposition.get_filename() {
            Some(name) => name.to_string(),
            None => continue, // non-file form field
        };

        if file_name.is_empty()
            || file_name.contains("..")
            || file_name.contains('/')
            || file_name.contains('\\')
        {
            return Err(AppError::Validation(format!(
                "Invalid file name: {}",
                file_name
            )));
        }

        if files.len() >= MAX_BATCH_FILES {
            return Err(AppError::Validation(format!(
                "Too many files in upload (limit {})",
                MAX_BATCH_FILES
            )));
        }

        // Multipart parts without a Content-Type header fall back to the
        // extension-derived type.
        let content_type = field
            .content_type()
            .map(|mime| mime.to_string())
            .unwrap_or_else(|| {
                let ext = file_name.rsplit('.').next().unwrap_or("");
                Storage::content_type_for_extension(ext).to_string()
            });

        let mut data: Vec<u8> = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|e| AppError::Validation(format!("Read error: {}", e)))?;
            if data.len() + chunk.len() > max_file_size {
                return Err(AppError::Validation(format!(
                    "File '{}' exceeds the {} byte upload limit",
                    file_name, max_file_size
                )));
            }
            if total_bytes + data.len() + chunk.len() > max_batch_size {
                return Err(AppError::Validation(format!(
                    "Upload batch exceeds the {} byte limit",
                    max_batch_size
                )));
            }
            data.extend_from_slice(&chunk);
        }

        total_bytes += data.len();
        files.push(UploadedFile {
            file_name,
            content_type: Some(content_type),
            data,
        });
    }

    Ok(files)
}

/// Resolve the order type for an identifier, or fail with 404.
async fn require_order(pool: &DbPool, id: Uuid) -> AppResult<crate::models::OrderType> {
    pool.get_order_type(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Order".to_string()))
}

/// Upload a batch of photographs for an order.
///
/// Files are uploaded one at a time; each file succeeds or fails on its own
/// and a failure never rolls back the order or the other files. Called by the
/// public submission flow right after a 201, so it carries no staff auth.
#[utoipa::path(
    post,
    path = "/api/orders/{id}/images",
    tag = "Attachments",
    params(("id" = Uuid, Path, description = "Order identifier")),
    responses(
        (status = 200, description = "Per-file upload statuses", body = PhotographUploadResponse),
        (status = 404, description = "Order not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn upload_photographs(
    pool: web::Data<DbPool>,
    storage: web::Data<Storage>,
    max_upload_size: web::Data<usize>,
    path: web::Path<Uuid>,
    payload: Multipart,
) -> AppResult<HttpResponse> {
    let order_id = path.into_inner();
    require_order(&pool, order_id).await?;

    let files = collect_files(payload, **max_upload_size).await?;
    if files.is_empty() {
        return Err(AppError::Validation("No files in upload".to_string()));
    }

    let count = files.len();
    let statuses = attachments::upload_photographs(storage.get_ref(), order_id, files).await;

    info!(
        "Photograph batch for order {}: {}/{} succeeded",
        order_id,
        statuses
            .iter()
            .filter(|s| s.status == attachments::UploadStatus::Success)
            .count(),
        count
    );

    Ok(HttpResponse::Ok().json(PhotographUploadResponse { files: statuses }))
}

/// List the photographs attached to an order.
#[utoipa::path(
    get,
    path = "/api/orders/{id}/images",
    tag = "Attachments",
    params(("id" = Uuid, Path, description = "Order identifier")),
    responses(
        (status = 200, description = "Photograph names and public URLs", body = PhotographListResponse),
        (status = 404, description = "Order not found", body = crate::error::ErrorResponse),
    ),
    security(("staff_key" = []))
)]
pub async fn list_photographs(
    _auth: StaffAuth,
    pool: web::Data<DbPool>,
    storage: web::Data<Storage>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let order_id = path.into_inner();
    require_order(&pool, order_id).await?;

    let names = attachments::list_photographs(storage.get_ref(), order_id).await?;
    let images = names
        .into_iter()
        .map(|file_name| {
            let key = Storage::photograph_key(&order_id.to_string(), &file_name);
            let url = storage.public_url(Bucket::OrderImages, &key);
            PhotographEntry { file_name, url }
        })
        .collect();

    Ok(HttpResponse::Ok().json(PhotographListResponse { images }))
}

/// Delete one photograph from an order.
#[utoipa::path(
    delete,
    path = "/api/orders/{id}/images/{file_name}",
    tag = "Attachments",
    params(
        ("id" = Uuid, Path, description = "Order identifier"),
        ("file_name" = String, Path, description = "Photograph name"),
    ),
    responses(
        (status = 204, description = "Photograph deleted"),
        (status = 404, description = "Order not found", body = crate::error::ErrorResponse),
    ),
    security(("staff_key" = []))
)]
pub async fn delete_photograph(
    _auth: StaffAuth,
    pool: web::Data<DbPool>,
    storage: web::Data<Storage>,
    path: web::Path<(Uuid, String)>,
) -> AppResult<HttpResponse> {
    let (order_id, file_name) = path.into_inner();
    require_order(&pool, order_id).await?;

    if file_name.contains("..") || file_name.contains('/') {
        return Err(AppError::Validation(format!(
            "Invalid file name: {}",
            file_name
        )));
    }

    attachments::delete_photograph(storage.get_ref(), order_id, &file_name).await?;
    info!("Deleted photograph '{}' from order {}", file_name, order_id);

    Ok(HttpResponse::NoContent().finish())
}

/// Upload a signed intake/consent document, replacing the active one.
#[utoipa::path(
    post,
    path = "/api/orders/{id}/forms/{kind}",
    tag = "Attachments",
    params(
        ("id" = Uuid, Path, description = "Order identifier"),
        ("kind" = String, Path, description = "Document kind: intake or consent"),
    ),
    responses(
        (status = 200, description = "Stored document path and URL", body = FormUploadResponse),
        (status = 404, description = "Order not found", body = crate::error::ErrorResponse),
    ),
    security(("staff_key" = []))
)]
pub async fn upload_form(
    _auth: StaffAuth,
    pool: web::Data<DbPool>,
    storage: web::Data<Storage>,
    max_upload_size: web::Data<usize>,
    path: web::Path<(Uuid, String)>,
    payload: Multipart,
) -> AppResult<HttpResponse> {
    let (order_id, kind_str) = path.into_inner();
    let kind = FormKind::parse(&kind_str)
        .ok_or_else(|| AppError::Validation(format!("Unknown form kind: {}", kind_str)))?;
    let order_type = require_order(&pool, order_id).await?;

    let mut files = collect_files(payload, **max_upload_size).await?;
    let file = files
        .pop()
        .ok_or_else(|| AppError::Validation("No file in upload".to_string()))?;
    if !files.is_empty() {
        return Err(AppError::Validation(
            "Exactly one document per upload".to_string(),
        ));
    }

    let key = attachments::upload_form(
        storage.get_ref(),
        pool.get_ref(),
        order_id,
        order_type,
        kind,
        file,
    )
    .await?;

    info!("Uploaded {} form for order {}", kind.as_str(), order_id);

    let url = storage.public_url(Bucket::OrderForms, &key);
    Ok(HttpResponse::Ok().json(FormUploadResponse { path: key, url }))
}

/// Delete the active intake/consent document for an order.
///
/// The path reference on the order is nulled even when the object removal
/// fails.
#[utoipa::path(
    delete,
    path = "/api/orders/{id}/forms/{kind}",
    tag = "Attachments",
    params(
        ("id" = Uuid, Path, description = "Order identifier"),
        ("kind" = String, Path, description = "Document kind: intake or consent"),
    ),
    responses(
        (status = 204, description = "Document deleted"),
        (status = 404, description = "Order not found", body = crate::error::ErrorResponse),
    ),
    security(("staff_key" = []))
)]
pub async fn delete_form(
    _auth: StaffAuth,
    pool: web::Data<DbPool>,
    storage: web::Data<Storage>,
    path: web::Path<(Uuid, String)>,
) -> AppResult<HttpResponse> {
    let (order_id, kind_str) = path.into_inner();
    let kind = FormKind::parse(&kind_str)
        .ok_or_else(|| AppError::Validation(format!("Unknown form kind: {}", kind_str)))?;
    let order_type = require_order(&pool, order_id).await?;

    attachments::delete_form(storage.get_ref(), pool.get_ref(), order_id, order_type, kind)
        .await?;

    info!("Deleted {} form for order {}", kind.as_str(), order_id);

    Ok(HttpResponse::NoContent().finish())
}

/// Configure attachment routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/orders/{id}/images")
            .route(web::post().to(upload_photographs))
            .route(web::get().to(list_photographs)),
    )
    .service(
        web::resource("/orders/{id}/images/{file_name}")
            .route(web::delete().to(delete_photograph)),
    )
    .service(
        web::resource("/orders/{id}/forms/{kind}")
            .route(web::post().to(upload_form))
            .route(web::delete().to(delete_form)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::error::PayloadError;
    use actix_web::http::header::{self, HeaderMap};
    use actix_web::web::Bytes;
    use futures_util::stream;

    const BOUNDARY: &str = "f0e31c1194f34dba8bb1cd6c4b6f1a3e";

    /// Build a Multipart from in-memory parts: (file name, content type, data).
    fn multipart(parts: Vec<(&str, Option<&str>, Vec<u8>)>) -> Multipart {
        let mut body: Vec<u8> = Vec::new();
        for (name, content_type, data) in parts {
            body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
            body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\n",
                    name
                )
                .as_bytes(),
            );
            if let Some(ct) = content_type {
                body.extend_from_slice(format!("Content-Type: {}\r\n", ct).as_bytes());
            }
            body.extend_from_slice(b"\r\n");
            body.extend_from_slice(&data);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY)
                .parse()
                .unwrap(),
        );
        Multipart::new(
            &headers,
            stream::iter(vec![Ok::<_, PayloadError>(Bytes::from(body))]),
        )
    }

    #[actix_web::test]
    async fn test_collect_files_reads_named_parts() {
        let payload = multipart(vec![
            ("a.png", Some("image/png"), vec![1u8; 8]),
            ("b.pdf", Some("application/pdf"), vec![2u8; 4]),
        ]);

        let files = collect_files(payload, 1024).await.unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].file_name, "a.png");
        assert_eq!(files[0].content_type.as_deref(), Some("image/png"));
        assert_eq!(files[0].data.len(), 8);
        assert_eq!(files[1].file_name, "b.pdf");
    }

    #[actix_web::test]
    async fn test_collect_files_defaults_content_type_from_extension() {
        let payload = multipart(vec![("photo.png", None, vec![1u8; 8])]);

        let files = collect_files(payload, 1024).await.unwrap();
        assert_eq!(files[0].content_type.as_deref(), Some("image/png"));
    }

    #[actix_web::test]
    async fn test_collect_files_rejects_path_traversal() {
        let payload = multipart(vec![("../escape.png", Some("image/png"), vec![1u8; 8])]);

        let err = collect_files(payload, 1024).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[actix_web::test]
    async fn test_collect_files_rejects_oversized_file() {
        let payload = multipart(vec![("big.png", Some("image/png"), vec![1u8; 64])]);

        let err = collect_files(payload, 32).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(ref msg) if msg.contains("big.png")));
    }

    #[actix_web::test]
    async fn test_collect_files_rejects_too_many_files() {
        let parts = (0..=MAX_BATCH_FILES)
            .map(|i| (format!("f{}.png", i), vec![1u8; 2]))
            .collect::<Vec<_>>();
        let payload = multipart(
            parts
                .iter()
                .map(|(name, data)| (name.as_str(), Some("image/png"), data.clone()))
                .collect(),
        );

        let err = collect_files(payload, 1024).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(ref msg) if msg.contains("Too many files")));
    }

    #[actix_web::test]
    async fn test_collect_files_rejects_oversized_batch() {
        // Per-file limit 10, batch limit 40: five 9-byte files fit the
        // per-file cap but blow the cumulative cap on the fifth.
        let payload = multipart(
            (0..5)
                .map(|i| {
                    (
                        ["a.png", "b.png", "c.png", "d.png", "e.png"][i],
                        Some("image/png"),
                        vec![1u8; 9],
                    )
                })
                .collect(),
        );

        let err = collect_files(payload, 10).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(ref msg) if msg.contains("batch")));
    }
}
