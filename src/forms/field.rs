use crate::functional::validator::{ValidationError, Validator};

/// Transient state of one form field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldState {
    pub value: String,
    pub touched: bool,
    pub error: Option<ValidationError>,
}

impl FieldState {
    /// The message to render under the input: only once the field has been
    /// touched and while it is invalid.
    pub fn visible_error(&self) -> Option<&str> {
        match (&self.error, self.touched) {
            (Some(error), true) => Some(error.message.as_str()),
            _ => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }
}

/// A named input bound to its validator.
#[derive(Clone)]
pub struct Field {
    name: &'static str,
    placeholder: String,
    validator: Validator<str>,
    state: FieldState,
}

impl std::fmt::Debug for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("rules", &self.validator.len())
            .field("state", &self.state)
            .finish()
    }
}

impl Field {
    /// Creates an untouched, empty field. The empty value is validated right
    /// away so the form knows whether it may be submitted.
    pub fn new(name: &'static str, validator: Validator<str>) -> Self {
        let mut field = Self {
            name,
            placeholder: String::new(),
            validator,
            state: FieldState::default(),
        };
        field.revalidate();
        field
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn value(&self) -> &str {
        &self.state.value
    }

    pub fn state(&self) -> &FieldState {
        &self.state
    }

    pub fn is_valid(&self) -> bool {
        self.state.is_valid()
    }

    pub fn visible_error(&self) -> Option<&str> {
        self.state.visible_error()
    }

    /// Replaces the value and re-runs the validator.
    pub fn change(&mut self, value: impl Into<String>) {
        self.state.value = value.into();
        self.revalidate();
    }

    /// Marks the field touched; from now on its error is visible.
    pub fn blur(&mut self) {
        self.state.touched = true;
        self.revalidate();
    }

    pub fn reset(&mut self) {
        self.state = FieldState::default();
        self.revalidate();
    }

    fn revalidate(&mut self) {
        self.state.error = self.validator.validate(&self.state.value).err();
    }
}
