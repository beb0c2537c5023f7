//! Push form state: a value holder per field plus pure validators.

use crate::catalog::AlertSource;
use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum FormField {
    Source,
    Payload,
}

/// State of the push-alert form, alive while the form is open.
#[derive(Clone, Debug, Default)]
pub struct PushForm {
    pub source: Option<AlertSource>,
    pub payload: String,
    field_errors: BTreeMap<FormField, String>,
    banner: Option<String>,
    submitting: bool,
}

impl PushForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selecting a source seeds the payload with its example and clears
    /// any stale source error.
    pub fn select_source(&mut self, source: AlertSource) {
        self.payload = source.alert_example.clone();
        self.source = Some(source);
        self.field_errors.remove(&FormField::Source);
    }

    pub fn set_payload(&mut self, text: impl Into<String>) {
        self.payload = text.into();
    }

    pub fn field_error(&self, field: FormField) -> Option<&str> {
        self.field_errors.get(&field).map(String::as_str)
    }

    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    pub fn set_banner(&mut self, message: impl Into<String>) {
        self.banner = Some(message.into());
    }

    pub fn clear_banner(&mut self) {
        self.banner = None;
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub(crate) fn set_submitting(&mut self, submitting: bool) {
        self.submitting = submitting;
    }

    /// Re-run all field validators. Returns true when the form can be
    /// submitted.
    pub fn validate(&mut self) -> bool {
        self.field_errors.clear();
        if self.source.is_none() {
            self.field_errors
                .insert(FormField::Source, "Alert source is required".into());
        }
        if let Err(message) = validate_payload(&self.payload) {
            self.field_errors.insert(FormField::Payload, message);
        }
        self.field_errors.is_empty()
    }
}

pub fn validate_payload(text: &str) -> Result<(), String> {
    if text.trim().is_empty() {
        return Err("Alert payload is required".into());
    }
    serde_json::from_str::<serde_json::Value>(text)
        .map(|_| ())
        .map_err(|_| "Invalid JSON format".into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> AlertSource {
        AlertSource {
            name: "Datadog".into(),
            source_type: "datadog".into(),
            alert_example: "{\n  \"title\": \"cpu\"\n}".into(),
        }
    }

    #[test]
    fn selecting_a_source_seeds_the_payload() {
        let mut form = PushForm::new();
        form.validate();
        assert!(form.field_error(FormField::Source).is_some());

        form.select_source(source());
        assert_eq!(form.payload, source().alert_example);
        assert!(form.field_error(FormField::Source).is_none());
    }

    #[test]
    fn missing_source_is_reported() {
        let mut form = PushForm::new();
        form.set_payload("{}");
        assert!(!form.validate());
        assert_eq!(
            form.field_error(FormField::Source),
            Some("Alert source is required")
        );
        assert!(form.field_error(FormField::Payload).is_none());
    }

    #[test]
    fn empty_payload_is_reported() {
        let mut form = PushForm::new();
        form.select_source(source());
        form.set_payload("   ");
        assert!(!form.validate());
        assert_eq!(
            form.field_error(FormField::Payload),
            Some("Alert payload is required")
        );
    }

    #[test]
    fn malformed_payload_is_reported() {
        let mut form = PushForm::new();
        form.select_source(source());
        form.set_payload("{invalid");
        assert!(!form.validate());
        assert_eq!(
            form.field_error(FormField::Payload),
            Some("Invalid JSON format")
        );
    }

    #[test]
    fn valid_form_passes() {
        let mut form = PushForm::new();
        form.select_source(source());
        assert!(form.validate());
    }
}
