//! Functional validation combinator
//!
//! A `Validator<T>` is an ordered chain of rules evaluated left to right
//! against the same value. The first failing rule wins; the chain passes only
//! when every rule passes.

use std::sync::Arc;

use derive_more::Display;

pub type ValidationResult = Result<(), ValidationError>;

type Rule<T> = Arc<dyn Fn(&T) -> ValidationResult + Send + Sync>;

/// Machine-readable identifier of the rule that rejected a value.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleCode {
    #[display(fmt = "REQUIRED")]
    Required,
    #[display(fmt = "NOT_A_NUMBER")]
    NotANumber,
    #[display(fmt = "NOT_WHOLE_NUMBER")]
    NotWholeNumber,
    #[display(fmt = "TOO_SMALL")]
    TooSmall,
    #[display(fmt = "TOO_SHORT")]
    TooShort,
    #[display(fmt = "INVALID_PHONE")]
    InvalidPhone,
    #[display(fmt = "INVALID_EMAIL")]
    InvalidEmail,
    #[display(fmt = "MISSING_CAPITAL")]
    MissingCapital,
    #[display(fmt = "MISSING_SYMBOL")]
    MissingSymbol,
    #[display(fmt = "UNKNOWN_TABLE")]
    UnknownTable,
    #[display(fmt = "TIME_SLOT_PASSED")]
    TimeSlotPassed,
    #[display(fmt = "CUSTOM")]
    Custom,
}

/// Validation failure with the message shown next to the field.
#[derive(Debug, Display, Clone, PartialEq, Eq)]
#[display(fmt = "{}", message)]
pub struct ValidationError {
    pub code: RuleCode,
    pub message: String,
}

impl ValidationError {
    pub fn new(code: RuleCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

pub struct Validator<T: ?Sized> {
    rules: Vec<Rule<T>>,
}

impl<T: ?Sized> Clone for Validator<T> {
    fn clone(&self) -> Self {
        Self {
            rules: self.rules.clone(),
        }
    }
}

impl<T: ?Sized> Validator<T> {
    /// Create a new empty validator
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Create a validator from a single rule
    pub fn from_fn<F>(rule: F) -> Self
    where
        F: Fn(&T) -> ValidationResult + Send + Sync + 'static,
    {
        Self::new().rule(rule)
    }

    /// Add a validation rule
    pub fn rule<F>(mut self, rule: F) -> Self
    where
        F: Fn(&T) -> ValidationResult + Send + Sync + 'static,
    {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Append every rule of `other` after this validator's rules
    pub fn and(mut self, other: Validator<T>) -> Self {
        self.rules.extend(other.rules);
        self
    }

    /// Run the rules in order, returning the first failure
    pub fn validate(&self, input: &T) -> ValidationResult {
        self.rules.iter().try_for_each(|rule| rule(input))
    }

    pub fn is_valid(&self, input: &T) -> bool {
        self.validate(input).is_ok()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Apply validation only when a condition is met
    pub fn when<F>(self, condition: F) -> Validator<T>
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
        T: 'static,
    {
        Validator::new().rule(move |input: &T| {
            if condition(input) {
                self.validate(input)
            } else {
                Ok(())
            }
        })
    }
}

impl Validator<str> {
    /// Validate the output of `normalize` instead of the raw input.
    pub fn normalized<F>(self, normalize: F) -> Validator<str>
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        Validator::new().rule(move |input: &str| self.validate(&normalize(input)))
    }
}

impl<T: ?Sized> Default for Validator<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Chain validators into one that reports the first failure in declaration
/// order.
pub fn compose_validators<T, I>(validators: I) -> Validator<T>
where
    T: ?Sized,
    I: IntoIterator<Item = Validator<T>>,
{
    validators
        .into_iter()
        .fold(Validator::new(), |acc, next| acc.and(next))
}
