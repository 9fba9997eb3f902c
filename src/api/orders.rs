//! Order submission and staff order administration handlers.

use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::StaffAuth;
use crate::db::DbPool;
use crate::entity::{living_order, memoriam_order};
use crate::error::{AppError, AppResult};
use crate::models::{
    Disposition, LivingFormData, LivingOrder, LivingOrderPatch, MemoriamFormData, MemoriamOrder,
    MemoriamOrderPatch, OrderForm, PhotographDisposition,
};
use crate::services::{EmailNotifier, submit_order};

/// Living order submission body.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitLivingRequest {
    pub form_data: LivingFormData,
}

/// Memoriam order submission body.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitMemoriamRequest {
    pub form_data: MemoriamFormData,
}

/// Submission outcome reported to the public client.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Lookup/update response wrapping the order record.
#[derive(Debug, Serialize, ToSchema)]
pub struct LivingOrderResponse {
    pub order: LivingOrder,
}

/// Lookup/update response wrapping the order record.
#[derive(Debug, Serialize, ToSchema)]
pub struct MemoriamOrderResponse {
    pub order: MemoriamOrder,
}

/// Error body for order lookups.
#[derive(Debug, Serialize, ToSchema)]
pub struct OrderNotFoundResponse {
    pub error: String,
}

fn order_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(OrderNotFoundResponse {
        error: "Order not found".to_string(),
    })
}

/// Run the submission pipeline and shape the result for the public client.
///
/// The pipeline never throws past this boundary: a reported failure becomes
/// `400 {success: false, error}`, and database detail stays in the logs.
async fn handle_submission(
    pool: &DbPool,
    notifier: &EmailNotifier,
    form: OrderForm,
) -> HttpResponse {
    let order_type = form.order_type();

    match submit_order(pool, &form).await {
        Ok(order_id) => {
            // Fire-and-observe: notification failures never affect the response.
            notifier.order_received(order_id, order_type).await;

            HttpResponse::Created().json(SubmissionResponse {
                success: true,
                order_id: Some(order_id),
                error: None,
            })
        }
        Err(err) => {
            let message = match &err {
                AppError::Validation(msg) => msg.clone(),
                other => {
                    error!("{} submission pipeline failed: {}", order_type, other);
                    "Failed to submit order".to_string()
                }
            };

            HttpResponse::BadRequest().json(SubmissionResponse {
                success: false,
                order_id: None,
                error: Some(message),
            })
        }
    }
}

/// Submit a living order.
#[utoipa::path(
    post,
    path = "/api/living-form",
    tag = "Orders",
    request_body = SubmitLivingRequest,
    responses(
        (status = 201, description = "Order created", body = SubmissionResponse),
        (status = 400, description = "Submission failed", body = SubmissionResponse),
    )
)]
pub async fn submit_living_order(
    pool: web::Data<DbPool>,
    notifier: web::Data<EmailNotifier>,
    body: web::Json<SubmitLivingRequest>,
) -> HttpResponse {
    let form = OrderForm::Living(body.into_inner().form_data);
    handle_submission(&pool, &notifier, form).await
}

/// Submit a memoriam order.
#[utoipa::path(
    post,
    path = "/api/memoriam-form",
    tag = "Orders",
    request_body = SubmitMemoriamRequest,
    responses(
        (status = 201, description = "Order created", body = SubmissionResponse),
        (status = 400, description = "Submission failed", body = SubmissionResponse),
    )
)]
pub async fn submit_memoriam_order(
    pool: web::Data<DbPool>,
    notifier: web::Data<EmailNotifier>,
    body: web::Json<SubmitMemoriamRequest>,
) -> HttpResponse {
    let form = OrderForm::Memoriam(body.into_inner().form_data);
    handle_submission(&pool, &notifier, form).await
}

/// Get a living order.
#[utoipa::path(
    get,
    path = "/api/living-order/{id}",
    tag = "Orders",
    params(("id" = Uuid, Path, description = "Order identifier")),
    responses(
        (status = 200, description = "Order record", body = LivingOrderResponse),
        (status = 404, description = "Order not found", body = OrderNotFoundResponse),
    ),
    security(("staff_key" = []))
)]
pub async fn get_living_order(
    _auth: StaffAuth,
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let Some(detail) = pool.get_living_order(id).await? else {
        return Ok(order_not_found());
    };

    let order = living_order_view(&pool, detail).await?;
    Ok(HttpResponse::Ok().json(LivingOrderResponse { order }))
}

/// Get a memoriam order.
#[utoipa::path(
    get,
    path = "/api/memoriam-order/{id}",
    tag = "Orders",
    params(("id" = Uuid, Path, description = "Order identifier")),
    responses(
        (status = 200, description = "Order record", body = MemoriamOrderResponse),
        (status = 404, description = "Order not found", body = OrderNotFoundResponse),
    ),
    security(("staff_key" = []))
)]
pub async fn get_memoriam_order(
    _auth: StaffAuth,
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let Some(detail) = pool.get_memoriam_order(id).await? else {
        return Ok(order_not_found());
    };

    let order = memoriam_order_view(&pool, detail).await?;
    Ok(HttpResponse::Ok().json(MemoriamOrderResponse { order }))
}

/// Update a living order. Absent fields are untouched; last write wins.
#[utoipa::path(
    put,
    path = "/api/living-order/{id}",
    tag = "Orders",
    params(("id" = Uuid, Path, description = "Order identifier")),
    request_body = LivingOrderPatch,
    responses(
        (status = 200, description = "Updated order record", body = LivingOrderResponse),
        (status = 404, description = "Order not found", body = OrderNotFoundResponse),
    ),
    security(("staff_key" = []))
)]
pub async fn update_living_order(
    _auth: StaffAuth,
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    body: web::Json<LivingOrderPatch>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let patch = body.into_inner();

    let Some(detail) = pool.update_living_order(id, &patch).await? else {
        return Ok(order_not_found());
    };

    let order = living_order_view(&pool, detail).await?;
    Ok(HttpResponse::Ok().json(LivingOrderResponse { order }))
}

/// Update a memoriam order. Absent fields are untouched; last write wins.
#[utoipa::path(
    put,
    path = "/api/memoriam-order/{id}",
    tag = "Orders",
    params(("id" = Uuid, Path, description = "Order identifier")),
    request_body = MemoriamOrderPatch,
    responses(
        (status = 200, description = "Updated order record", body = MemoriamOrderResponse),
        (status = 404, description = "Order not found", body = OrderNotFoundResponse),
    ),
    security(("staff_key" = []))
)]
pub async fn update_memoriam_order(
    _auth: StaffAuth,
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
    body: web::Json<MemoriamOrderPatch>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let patch = body.into_inner();

    let Some(detail) = pool.update_memoriam_order(id, &patch).await? else {
        return Ok(order_not_found());
    };

    let order = memoriam_order_view(&pool, detail).await?;
    Ok(HttpResponse::Ok().json(MemoriamOrderResponse { order }))
}

/// Join a living detail row with its medium selection and creation time.
async fn living_order_view(pool: &DbPool, detail: living_order::Model) -> AppResult<LivingOrder> {
    let mediums = pool.get_order_mediums(detail.id).await?;
    let base = pool
        .get_base_order(detail.id)
        .await?
        .ok_or_else(|| AppError::Database(format!("Living order {} has no base row", detail.id)))?;

    let disposition = Disposition::parse(&detail.disposition).ok_or_else(|| {
        AppError::Database(format!(
            "Order {} has unknown disposition '{}'",
            detail.id, detail.disposition
        ))
    })?;

    Ok(LivingOrder {
        id: detail.id,
        first_name: detail.first_name,
        last_name: detail.last_name,
        email: detail.email,
        phone: detail.phone,
        street_address: detail.street_address,
        street_address2: detail.street_address2,
        city: detail.city,
        state: detail.state,
        postal_code: detail.postal_code,
        disposition,
        alteration_notes: detail.alteration_notes,
        inspiration_notes: detail.inspiration_notes,
        total_price: detail.total_price,
        intake_form_path: detail.intake_form_path,
        consent_form_path: detail.consent_form_path,
        mediums,
        created_at: base.created_at,
    })
}

/// Join a memoriam detail row with its medium selection and creation time.
async fn memoriam_order_view(
    pool: &DbPool,
    detail: memoriam_order::Model,
) -> AppResult<MemoriamOrder> {
    let mediums = pool.get_order_mediums(detail.id).await?;
    let base = pool.get_base_order(detail.id).await?.ok_or_else(|| {
        AppError::Database(format!("Memoriam order {} has no base row", detail.id))
    })?;

    let disposition = Disposition::parse(&detail.disposition).ok_or_else(|| {
        AppError::Database(format!(
            "Order {} has unknown disposition '{}'",
            detail.id, detail.disposition
        ))
    })?;

    let photograph_disposition = match detail.photograph_disposition {
        Some(ref value) => Some(PhotographDisposition::parse(value).ok_or_else(|| {
            AppError::Database(format!(
                "Order {} has unknown photograph_disposition '{}'",
                detail.id, value
            ))
        })?),
        None => None,
    };

    Ok(MemoriamOrder {
        id: detail.id,
        first_name: detail.first_name,
        last_name: detail.last_name,
        email: detail.email,
        phone: detail.phone,
        street_address: detail.street_address,
        street_address2: detail.street_address2,
        city: detail.city,
        state: detail.state,
        postal_code: detail.postal_code,
        disposition,
        alteration_notes: detail.alteration_notes,
        inspiration_notes: detail.inspiration_notes,
        total_price: detail.total_price,
        funeral_home_name: detail.funeral_home_name,
        funeral_home_rep: detail.funeral_home_rep,
        photograph_disposition,
        intake_form_path: detail.intake_form_path,
        consent_form_path: detail.consent_form_path,
        mediums,
        created_at: base.created_at,
    })
}

/// Configure order routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/living-form").route(web::post().to(submit_living_order)))
        .service(web::resource("/memoriam-form").route(web::post().to(submit_memoriam_order)))
        .service(
            web::resource("/living-order/{id}")
                .route(web::get().to(get_living_order))
                .route(web::put().to(update_living_order)),
        )
        .service(
            web::resource("/memoriam-order/{id}")
                .route(web::get().to(get_memoriam_order))
                .route(web::put().to(update_memoriam_order)),
        );
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use serde_json::json;

    use crate::auth::StaffKey;
    use crate::entity::{base_order, order_medium};

    fn base_row(id: Uuid) -> base_order::Model {
        base_order::Model {
            id,
            order_type: "Living".to_string(),
            created_at: Utc::now(),
        }
    }

    fn living_row(id: Uuid) -> living_order::Model {
        living_order::Model {
            id,
            first_name: "Dana".to_string(),
            last_name: "Tinner".to_string(),
            email: "dana@example.com".to_string(),
            phone: None,
            street_address: None,
            street_address2: None,
            city: None,
            state: None,
            postal_code: None,
            disposition: "as_is".to_string(),
            alteration_notes: None,
            inspiration_notes: None,
            total_price: None,
            intake_form_path: None,
            consent_form_path: None,
        }
    }

    fn medium_row(id: Uuid) -> order_medium::Model {
        order_medium::Model {
            order_id: id,
            medium: "ink".to_string(),
        }
    }

    macro_rules! order_app {
        ($pool:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($pool))
                    .app_data(web::Data::new(EmailNotifier::new(
                        None,
                        "orders@example.com".to_string(),
                    )))
                    .app_data(web::Data::new(StaffKey::new(Some(
                        "test-staff-key".to_string(),
                    ))))
                    .service(web::scope("/api").configure(configure_routes)),
            )
        };
    }

    #[actix_web::test]
    async fn test_submit_then_lookup_round_trip() {
        let id = Uuid::now_v7();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            // Submission: base insert, detail insert, medium insert
            .append_query_results([vec![base_row(id)]])
            .append_query_results([vec![living_row(id)]])
            .append_query_results([vec![medium_row(id)]])
            // Lookup: detail, mediums, base
            .append_query_results([vec![living_row(id)]])
            .append_query_results([vec![medium_row(id)]])
            .append_query_results([vec![base_row(id)]])
            .into_connection();
        let app = order_app!(crate::db::DbPool::from_connection(db)).await;

        let req = test::TestRequest::post()
            .uri("/api/living-form")
            .set_json(json!({
                "formData": {
                    "firstName": "Dana",
                    "lastName": "Tinner",
                    "email": "dana@example.com",
                    "disposition": "as_is",
                    "mediums": ["ink"]
                }
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], true);
        assert!(body["orderId"].is_string());

        let req = test::TestRequest::get()
            .uri(&format!("/api/living-order/{}", id))
            .insert_header(("X-Staff-Key", "test-staff-key"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["order"]["first_name"], "Dana");
        assert_eq!(body["order"]["email"], "dana@example.com");
        assert_eq!(body["order"]["disposition"], "as_is");
        assert_eq!(body["order"]["mediums"][0], "ink");
    }

    #[actix_web::test]
    async fn test_invalid_submission_returns_400() {
        // No mocked results: a rejected payload must not reach the store.
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let app = order_app!(crate::db::DbPool::from_connection(db)).await;

        let req = test::TestRequest::post()
            .uri("/api/living-form")
            .set_json(json!({
                "formData": {
                    "firstName": "Dana",
                    "lastName": "Tinner",
                    "email": "dana@example.com",
                    "disposition": "as_is",
                    "mediums": []
                }
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().contains("medium"));
    }

    #[actix_web::test]
    async fn test_lookup_requires_staff_key() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let app = order_app!(crate::db::DbPool::from_connection(db)).await;

        let req = test::TestRequest::get()
            .uri(&format!("/api/living-order/{}", Uuid::now_v7()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_lookup_unknown_order_returns_404() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<living_order::Model>::new()])
            .into_connection();
        let app = order_app!(crate::db::DbPool::from_connection(db)).await;

        let req = test::TestRequest::get()
            .uri(&format!("/api/living-order/{}", Uuid::now_v7()))
            .insert_header(("X-Staff-Key", "test-staff-key"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Order not found");
    }
}
