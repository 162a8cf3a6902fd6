use serde::Deserialize;
use serde_json::{json, Value};
use validator::{Validate, ValidationError};

use crate::shared::constants::{is_valid_barangay, is_valid_category};
use crate::shared::validation::TIME_REGEX;

fn validate_store_hours(value: &str) -> Result<(), ValidationError> {
    // Blank means "not provided"; the payload builder drops it
    if value.trim().is_empty() || TIME_REGEX.is_match(value.trim()) {
        Ok(())
    } else {
        Err(ValidationError::new("store_hours")
            .with_message("Hours must use 24-hour HH:MM format".into()))
    }
}

fn validate_category(value: &str) -> Result<(), ValidationError> {
    if is_valid_category(value) {
        Ok(())
    } else {
        Err(ValidationError::new("category").with_message("Unknown category".into()))
    }
}

fn validate_barangay(value: &str) -> Result<(), ValidationError> {
    if is_valid_barangay(value) {
        Ok(())
    } else {
        Err(ValidationError::new("barangay").with_message("Unknown barangay".into()))
    }
}

/// Create/edit form for a business listing.
#[derive(Debug, Deserialize, Validate)]
pub struct BusinessForm {
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,

    #[validate(length(min = 1, max = 2000, message = "Description is required"))]
    pub description: String,

    #[validate(custom(function = validate_category))]
    pub category: String,

    #[validate(custom(function = validate_barangay))]
    pub barangay: String,

    #[validate(length(min = 1, max = 200, message = "Location is required"))]
    pub location: String,

    #[serde(default)]
    pub contact_info: Option<String>,
    #[serde(default)]
    #[validate(custom(function = validate_store_hours))]
    pub open_time: Option<String>,
    #[serde(default)]
    #[validate(custom(function = validate_store_hours))]
    pub close_time: Option<String>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
}

impl BusinessForm {
    /// The request body the backend expects; empty optional fields
    /// are omitted rather than sent as empty strings.
    pub fn to_payload(&self) -> Value {
        let mut object = serde_json::Map::new();
        object.insert("name".to_string(), json!(self.name.trim()));
        object.insert("description".to_string(), json!(self.description.trim()));
        object.insert("category".to_string(), json!(self.category));
        object.insert("barangay".to_string(), json!(self.barangay));
        object.insert("location".to_string(), json!(self.location.trim()));
        if let Some(contact) = non_empty(self.contact_info.as_deref()) {
            object.insert("contactInfo".to_string(), json!(contact));
        }
        if let Some(open) = non_empty(self.open_time.as_deref()) {
            object.insert("openTime".to_string(), json!(open));
        }
        if let Some(close) = non_empty(self.close_time.as_deref()) {
            object.insert("closeTime".to_string(), json!(close));
        }
        if let Some(lat) = self.lat {
            object.insert("lat".to_string(), json!(lat));
        }
        if let Some(lng) = self.lng {
            object.insert("lng".to_string(), json!(lng));
        }
        Value::Object(object)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> BusinessForm {
        BusinessForm {
            name: "Kape Coffee House".to_string(),
            description: "Single-origin brews".to_string(),
            category: "food-dining".to_string(),
            barangay: "Poblacion".to_string(),
            location: "Rizal St.".to_string(),
            contact_info: Some("  ".to_string()),
            open_time: Some("09:00".to_string()),
            close_time: None,
            lat: None,
            lng: None,
        }
    }

    #[test]
    fn test_valid_form_passes_validation() {
        assert!(valid_form().validate().is_ok());
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let mut form = valid_form();
        form.category = "crypto".to_string();
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_malformed_store_hours_are_rejected() {
        let mut form = valid_form();
        form.open_time = Some("9am".to_string());
        assert!(form.validate().is_err());

        form.open_time = Some("".to_string());
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_payload_omits_blank_optionals() {
        let payload = valid_form().to_payload();
        assert_eq!(payload["openTime"], "09:00");
        assert!(payload.get("contactInfo").is_none());
        assert!(payload.get("closeTime").is_none());
    }
}
