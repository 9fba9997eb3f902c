//! Public order submission payloads.
//!
//! Payloads are validated before any persistence attempt; a rejected payload
//! never reaches the submission pipeline.

use std::collections::BTreeSet;

use serde::Deserialize;
use utoipa::ToSchema;

use super::{Disposition, Medium, OrderType, PhotographDisposition};
use crate::error::{AppError, AppResult};

/// Fields shared by living and memoriam order submissions.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LivingFormData {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub street_address: Option<String>,
    #[serde(default)]
    pub street_address2: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    pub disposition: Disposition,
    #[serde(default)]
    pub alteration_notes: Option<String>,
    #[serde(default)]
    pub inspiration_notes: Option<String>,
    /// Selected artistic mediums (at least one required).
    #[serde(default)]
    pub mediums: BTreeSet<Medium>,
}

/// Memoriam order submission: the living fields plus funeral-home contact
/// and the photograph retention policy.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemoriamFormData {
    #[serde(flatten)]
    pub base: LivingFormData,
    #[serde(default)]
    pub funeral_home_name: Option<String>,
    #[serde(default)]
    pub funeral_home_rep: Option<String>,
    #[serde(default)]
    pub photograph_disposition: Option<PhotographDisposition>,
}

/// A validated order submission of either type.
#[derive(Debug, Clone)]
pub enum OrderForm {
    Living(LivingFormData),
    Memoriam(MemoriamFormData),
}

impl OrderForm {
    /// Order type discriminator for this submission.
    pub fn order_type(&self) -> OrderType {
        match self {
            Self::Living(_) => OrderType::Living,
            Self::Memoriam(_) => OrderType::Memoriam,
        }
    }

    /// The shared contact/disposition fields.
    pub fn base(&self) -> &LivingFormData {
        match self {
            Self::Living(form) => form,
            Self::Memoriam(form) => &form.base,
        }
    }

    /// Selected mediums for this submission.
    pub fn mediums(&self) -> &BTreeSet<Medium> {
        &self.base().mediums
    }

    /// Validate the payload before any persistence attempt.
    pub fn validate(&self) -> AppResult<()> {
        self.base().validate()
    }
}

impl LivingFormData {
    /// Check required contact fields, email shape, medium selection, and
    /// that altered orders carry alteration notes.
    pub fn validate(&self) -> AppResult<()> {
        if self.first_name.trim().is_empty() {
            return Err(AppError::Validation("firstName is required".to_string()));
        }
        if self.last_name.trim().is_empty() {
            return Err(AppError::Validation("lastName is required".to_string()));
        }
        if !is_plausible_email(&self.email) {
            return Err(AppError::Validation(format!(
                "email '{}' is not a valid address",
                self.email
            )));
        }
        if self.mediums.is_empty() {
            return Err(AppError::Validation(
                "at least one medium must be selected".to_string(),
            ));
        }
        if self.disposition == Disposition::Altered
            && self
                .alteration_notes
                .as_deref()
                .map(str::trim)
                .unwrap_or("")
                .is_empty()
        {
            return Err(AppError::Validation(
                "alterationNotes are required for altered orders".to_string(),
            ));
        }
        Ok(())
    }
}

/// Minimal structural email check: one '@' with a non-empty local part and a
/// dotted domain. Deliverability is not our problem here.
fn is_plausible_email(email: &str) -> bool {
    let email = email.trim();
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.contains(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> LivingFormData {
        LivingFormData {
            first_name: "Dana".to_string(),
            last_name: "Tinner".to_string(),
            email: "dana@example.com".to_string(),
            phone: Some("612-555-0123".to_string()),
            street_address: Some("100 Main St".to_string()),
            street_address2: None,
            city: Some("Minneapolis".to_string()),
            state: Some("MN".to_string()),
            postal_code: Some("55401".to_string()),
            disposition: Disposition::AsIs,
            alteration_notes: None,
            inspiration_notes: None,
            mediums: BTreeSet::from([Medium::Ink, Medium::Watercolor]),
        }
    }

    #[test]
    fn test_valid_form_passes() {
        assert!(valid_form().validate().is_ok());
    }

    #[test]
    fn test_missing_name_rejected() {
        let mut form = valid_form();
        form.first_name = "  ".to_string();
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_bad_email_rejected() {
        for email in ["", "no-at-sign", "@nodomain", "a@b", "a b@c.com", "a@.com"] {
            let mut form = valid_form();
            form.email = email.to_string();
            assert!(form.validate().is_err(), "accepted bad email: {}", email);
        }
    }

    #[test]
    fn test_empty_medium_selection_rejected() {
        let mut form = valid_form();
        form.mediums.clear();
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_altered_requires_notes() {
        let mut form = valid_form();
        form.disposition = Disposition::Altered;
        form.alteration_notes = None;
        assert!(form.validate().is_err());

        form.alteration_notes = Some("Remove the background figure".to_string());
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_form_data_deserializes_camel_case() {
        let json = r#"{
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@example.com",
            "disposition": "altered",
            "alterationNotes": "Soften the linework",
            "mediums": ["ink", "digital_tattoo_stencil"],
            "funeralHomeName": "Evergreen",
            "photographDisposition": "RETAIN_1_YEAR"
        }"#;
        let form: MemoriamFormData = serde_json::from_str(json).unwrap();
        assert_eq!(form.base.first_name, "Ada");
        assert_eq!(form.base.disposition, Disposition::Altered);
        assert!(form.base.mediums.contains(&Medium::DigitalTattooStencil));
        assert_eq!(form.funeral_home_name.as_deref(), Some("Evergreen"));
        assert_eq!(
            form.photograph_disposition,
            Some(PhotographDisposition::RetainOneYear)
        );
        assert!(OrderForm::Memoriam(form).validate().is_ok());
    }
}
