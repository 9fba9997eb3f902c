//! Core order enumerations and staff-facing order records.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::Medium;

/// Order type discriminator: which detail table owns the order's fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum OrderType {
    Living,
    Memoriam,
}

impl OrderType {
    /// Get order type as stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Living => "Living",
            Self::Memoriam => "Memoriam",
        }
    }

    /// Parse a stored order type.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Living" => Some(Self::Living),
            "Memoriam" => Some(Self::Memoriam),
            _ => None,
        }
    }
}

impl std::fmt::Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether the artwork reproduces the reference as-is or with alterations.
///
/// A single enum rather than two mutually-exclusive booleans, so the
/// exclusivity holds by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Disposition {
    AsIs,
    Altered,
}

impl Disposition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AsIs => "as_is",
            Self::Altered => "altered",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "as_is" => Some(Self::AsIs),
            "altered" => Some(Self::Altered),
            _ => None,
        }
    }
}

/// Retention policy for reference photographs on memoriam orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum PhotographDisposition {
    #[serde(rename = "DELETE_AFTER_ORDER")]
    DeleteAfterOrder,
    #[serde(rename = "RETAIN_1_YEAR")]
    RetainOneYear,
}

impl PhotographDisposition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DeleteAfterOrder => "DELETE_AFTER_ORDER",
            Self::RetainOneYear => "RETAIN_1_YEAR",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "DELETE_AFTER_ORDER" => Some(Self::DeleteAfterOrder),
            "RETAIN_1_YEAR" => Some(Self::RetainOneYear),
            _ => None,
        }
    }
}

/// Category of signed document attached to an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FormKind {
    Intake,
    Consent,
}

impl FormKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Intake => "intake",
            Self::Consent => "consent",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "intake" => Some(Self::Intake),
            "consent" => Some(Self::Consent),
            _ => None,
        }
    }
}

/// Staff-facing view of a living order, joined with its medium selection.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LivingOrder {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub street_address: Option<String>,
    pub street_address2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub disposition: Disposition,
    pub alteration_notes: Option<String>,
    pub inspiration_notes: Option<String>,
    pub total_price: Option<i64>,
    pub intake_form_path: Option<String>,
    pub consent_form_path: Option<String>,
    pub mediums: BTreeSet<Medium>,
    pub created_at: DateTime<Utc>,
}

/// Staff-facing view of a memoriam order, joined with its medium selection.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MemoriamOrder {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub street_address: Option<String>,
    pub street_address2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub disposition: Disposition,
    pub alteration_notes: Option<String>,
    pub inspiration_notes: Option<String>,
    pub total_price: Option<i64>,
    pub funeral_home_name: Option<String>,
    pub funeral_home_rep: Option<String>,
    pub photograph_disposition: Option<PhotographDisposition>,
    pub intake_form_path: Option<String>,
    pub consent_form_path: Option<String>,
    pub mediums: BTreeSet<Medium>,
    pub created_at: DateTime<Utc>,
}

/// Partial update applied to a living order by staff.
///
/// Absent fields are left untouched; last write wins.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LivingOrderPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub street_address: Option<String>,
    pub street_address2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub disposition: Option<Disposition>,
    pub alteration_notes: Option<String>,
    pub inspiration_notes: Option<String>,
    pub total_price: Option<i64>,
}

/// Partial update applied to a memoriam order by staff.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemoriamOrderPatch {
    #[serde(flatten)]
    pub base: LivingOrderPatch,
    pub funeral_home_name: Option<String>,
    pub funeral_home_rep: Option<String>,
    pub photograph_disposition: Option<PhotographDisposition>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_type_round_trip() {
        assert_eq!(OrderType::parse("Living"), Some(OrderType::Living));
        assert_eq!(OrderType::parse("Memoriam"), Some(OrderType::Memoriam));
        assert_eq!(OrderType::parse("living"), None);
        assert_eq!(OrderType::Living.as_str(), "Living");
    }

    #[test]
    fn test_disposition_round_trip() {
        assert_eq!(Disposition::parse("as_is"), Some(Disposition::AsIs));
        assert_eq!(Disposition::parse("altered"), Some(Disposition::Altered));
        assert_eq!(Disposition::parse("both"), None);
    }

    #[test]
    fn test_photograph_disposition_round_trip() {
        assert_eq!(
            PhotographDisposition::parse("DELETE_AFTER_ORDER"),
            Some(PhotographDisposition::DeleteAfterOrder)
        );
        assert_eq!(
            PhotographDisposition::parse("RETAIN_1_YEAR"),
            Some(PhotographDisposition::RetainOneYear)
        );
        assert_eq!(PhotographDisposition::parse("KEEP_FOREVER"), None);
    }

    #[test]
    fn test_patch_deserializes_camel_case() {
        // Patch bodies use the same camelCase convention as the submission
        // payloads; a mis-cased key must not silently no-op the update.
        let json = r#"{
            "firstName": "Ada",
            "alterationNotes": "Soften the linework",
            "totalPrice": 25000,
            "funeralHomeName": "Evergreen",
            "photographDisposition": "RETAIN_1_YEAR"
        }"#;
        let patch: MemoriamOrderPatch = serde_json::from_str(json).unwrap();
        assert_eq!(patch.base.first_name.as_deref(), Some("Ada"));
        assert_eq!(
            patch.base.alteration_notes.as_deref(),
            Some("Soften the linework")
        );
        assert_eq!(patch.base.total_price, Some(25000));
        assert_eq!(patch.funeral_home_name.as_deref(), Some("Evergreen"));
        assert_eq!(
            patch.photograph_disposition,
            Some(PhotographDisposition::RetainOneYear)
        );
        // Untouched fields stay None.
        assert!(patch.base.email.is_none());
        assert!(patch.funeral_home_rep.is_none());
    }

    #[test]
    fn test_form_kind_parse() {
        assert_eq!(FormKind::parse("intake"), Some(FormKind::Intake));
        assert_eq!(FormKind::parse("consent"), Some(FormKind::Consent));
        assert_eq!(FormKind::parse("waiver"), None);
    }
}
