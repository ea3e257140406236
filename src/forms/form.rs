//! Form container
//!
//! Holds an ordered set of uniquely named fields and routes input events to
//! them. Fields validate independently; the form is submittable only when
//! every field is valid.

use im::OrdMap;
use itertools::Itertools;
use log::debug;

use crate::{
    error::{ServiceError, ServiceResult},
    forms::field::{Field, FieldState},
    functional::validator::RuleCode,
};

/// Snapshot of every field's state, keyed by field name.
pub type FormState = OrdMap<String, FieldState>;

/// A field that blocked submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub code: RuleCode,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct Form {
    fields: Vec<Field>,
}

impl Form {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field. Names must be unique within the form.
    pub fn register(&mut self, field: Field) -> ServiceResult<()> {
        if self.fields.iter().any(|existing| existing.name() == field.name()) {
            return Err(ServiceError::conflict(format!(
                "Field {} is already registered",
                field.name()
            )));
        }
        self.fields.push(field);
        Ok(())
    }

    pub fn with_field(mut self, field: Field) -> ServiceResult<Self> {
        self.register(field)?;
        Ok(self)
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name() == name)
    }

    fn field_mut(&mut self, name: &str) -> ServiceResult<&mut Field> {
        self.fields
            .iter_mut()
            .find(|field| field.name() == name)
            .ok_or_else(|| ServiceError::bad_request(format!("Unknown field {}", name)))
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.field(name).map(Field::value)
    }

    pub fn change(&mut self, name: &str, value: impl Into<String>) -> ServiceResult<()> {
        self.field_mut(name)?.change(value);
        Ok(())
    }

    pub fn blur(&mut self, name: &str) -> ServiceResult<()> {
        self.field_mut(name)?.blur();
        Ok(())
    }

    /// Marks every field touched, as a submit attempt does.
    pub fn touch_all(&mut self) {
        self.fields.iter_mut().for_each(Field::blur);
    }

    pub fn is_valid(&self) -> bool {
        self.fields.iter().all(Field::is_valid)
    }

    /// Current errors in field declaration order.
    pub fn errors(&self) -> Vec<FieldError> {
        self.fields
            .iter()
            .filter_map(|field| {
                field.state().error.as_ref().map(|error| FieldError {
                    field: field.name().to_string(),
                    code: error.code,
                    message: error.message.clone(),
                })
            })
            .collect()
    }

    pub fn state(&self) -> FormState {
        self.fields
            .iter()
            .map(|field| (field.name().to_string(), field.state().clone()))
            .collect()
    }

    pub fn reset(&mut self) {
        self.fields.iter_mut().for_each(Field::reset);
    }

    /// Touches all fields and reports what blocks submission, if anything.
    pub fn check_submittable(&mut self) -> Result<(), Vec<FieldError>> {
        self.touch_all();
        let errors = self.errors();
        if errors.is_empty() {
            Ok(())
        } else {
            debug!(
                "Submission blocked by {}",
                errors.iter().map(|error| error.field.as_str()).join(", ")
            );
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::messages::Messages, functional::validation_rules};

    fn form() -> Form {
        let messages = Messages::default();
        Form::new()
            .with_field(Field::new("name", validation_rules::required(&messages)))
            .and_then(|form| {
                form.with_field(Field::new("email", validation_rules::validate_email(&messages)))
            })
            .unwrap()
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let mut form = form();
        let err = form
            .register(Field::new("name", validation_rules::required(&Messages::default())))
            .unwrap_err();
        assert!(matches!(err, ServiceError::Conflict { .. }));
    }

    #[test]
    fn test_unknown_field_is_bad_request() {
        let mut form = form();
        assert!(matches!(
            form.change("nope", "x"),
            Err(ServiceError::BadRequest { .. })
        ));
    }

    #[test]
    fn test_check_submittable_touches_everything() {
        let mut form = form();
        form.change("name", "Ира").unwrap();

        let errors = form.check_submittable().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "email");
        assert!(form.state().values().all(|state| state.touched));

        form.change("email", "ira@example.com").unwrap();
        assert!(form.check_submittable().is_ok());
    }

    #[test]
    fn test_state_snapshot_keyed_by_name() {
        let mut form = form();
        form.change("name", "Ира").unwrap();
        let state = form.state();
        assert_eq!(state.len(), 2);
        assert_eq!(state.get("name").map(|s| s.value.as_str()), Some("Ира"));
    }

    #[test]
    fn test_reset() {
        let mut form = form();
        form.change("name", "Ира").unwrap();
        form.touch_all();
        form.reset();
        assert!(form.state().values().all(|state| !state.touched && state.value.is_empty()));
    }
}
