//! Outbound email notification collaborator.
//!
//! Fire-and-observe: a notification failure is logged and never reflected in
//! the submission response.

use serde::Serialize;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::models::OrderType;

/// Payload posted to the notification endpoint.
#[derive(Debug, Serialize)]
struct NotifyRequest<'a> {
    email: &'a str,
    subject: String,
    message: String,
}

/// Client for the order-received email collaborator.
#[derive(Clone)]
pub struct EmailNotifier {
    client: reqwest::Client,
    endpoint: Option<String>,
    recipient: String,
}

impl EmailNotifier {
    /// Create a notifier. With no endpoint configured, notifications are
    /// skipped (useful in development and tests).
    pub fn new(endpoint: Option<String>, recipient: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
            recipient,
        }
    }

    /// Notify staff that a new order arrived. Errors are logged, not returned.
    pub async fn order_received(&self, order_id: Uuid, order_type: OrderType) {
        let Some(ref endpoint) = self.endpoint else {
            debug!("Notification endpoint not configured, skipping order-received email");
            return;
        };

        let body = NotifyRequest {
            email: &self.recipient,
            subject: "Tattoo Memorials Order Received".to_string(),
            message: format!(
                "New {} order received.\n\nOrder ID: {}\n\nReview it in the staff panel.",
                order_type, order_id
            ),
        };

        match self.client.post(endpoint).json(&body).send().await {
            Ok(response) if response.status().is_success() => {
                debug!("Order-received notification sent for {}", order_id);
            }
            Ok(response) => {
                warn!(
                    "Order-received notification for {} returned status {}",
                    order_id,
                    response.status()
                );
            }
            Err(e) => {
                warn!(
                    "Failed to send order-received notification for {}: {}",
                    order_id, e
                );
            }
        }
    }
}
