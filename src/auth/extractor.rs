//! Actix-web extractor for staff key authentication.

use actix_web::dev::Payload;
use actix_web::http::StatusCode;
use actix_web::{FromRequest, HttpRequest, HttpResponse, ResponseError, web};
use secrecy::{ExposeSecret, SecretString};
use std::future::{Ready, ready};

use super::StaffKey;
use crate::config::STAFF_KEY_HEADER;
use crate::error::ErrorResponse;

/// Extract a secret header value, wrapping it in SecretString immediately.
fn extract_secret_header(req: &HttpRequest, header_name: &str) -> Option<SecretString> {
    req.headers()
        .get(header_name)
        .and_then(|v| v.to_str().ok())
        .map(|s| SecretString::from(s.to_string()))
}

/// Authentication error for the extractor.
#[derive(Debug)]
pub struct AuthError {
    message: String,
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl ResponseError for AuthError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::UNAUTHORIZED).json(ErrorResponse {
            error: "UNAUTHORIZED".to_string(),
            message: self.message.clone(),
        })
    }
}

/// Extractor that requires a valid staff key.
///
/// Use this in handlers for order administration:
/// ```ignore
/// async fn staff_handler(_auth: StaffAuth) -> impl Responder {
///     // request carried a valid X-Staff-Key header
/// }
/// ```
pub struct StaffAuth;

impl FromRequest for StaffAuth {
    type Error = AuthError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let staff_key = match req.app_data::<web::Data<StaffKey>>() {
            Some(key) => key,
            None => {
                return ready(Err(AuthError {
                    message: "Internal configuration error".to_string(),
                }));
            }
        };

        let provided = match extract_secret_header(req, STAFF_KEY_HEADER) {
            Some(secret) => secret,
            None => {
                return ready(Err(AuthError {
                    message: format!("Missing {} header", STAFF_KEY_HEADER),
                }));
            }
        };

        if staff_key.verify(provided.expose_secret()) {
            ready(Ok(StaffAuth))
        } else {
            ready(Err(AuthError {
                message: "Invalid staff key".to_string(),
            }))
        }
    }
}
