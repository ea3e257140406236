//! Composable Validation Rules
//!
//! Factories for the field validators used by the booking and login forms.
//! Each factory captures its message from the catalog up front and returns a
//! pure `Validator<str>`; the input is the raw text of the field.

use chrono::{Local, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    config::messages::Messages,
    constants,
    functional::{
        time_slots::filter_passed_time_at,
        validator::{RuleCode, ValidationError, Validator},
    },
    models::booking::TableId,
};

/// Cached regex patterns for validation
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());
static PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\+380\s?)?(\d{2,3}\s?)?\d{3}\s?\d{2}\s?\d{2}$").unwrap());

fn reject(code: RuleCode, message: &str) -> Result<(), ValidationError> {
    Err(ValidationError::new(code, message))
}

/// Parses a finite number, ignoring surrounding whitespace.
pub fn parse_number(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|number| number.is_finite())
}

/// Fails with `message` when the value is empty.
pub fn required_with(message: impl Into<String>) -> Validator<str> {
    let message = message.into();
    Validator::from_fn(move |value: &str| {
        if value.is_empty() {
            reject(RuleCode::Required, &message)
        } else {
            Ok(())
        }
    })
}

/// Required-field check with the booking form's message.
pub fn required(messages: &Messages) -> Validator<str> {
    required_with(messages.required.clone())
}

pub fn must_be_number(messages: &Messages) -> Validator<str> {
    let message = messages.must_be_number.clone();
    Validator::from_fn(move |value: &str| match parse_number(value) {
        Some(_) => Ok(()),
        None => reject(RuleCode::NotANumber, &message),
    })
}

pub fn must_be_whole_number(messages: &Messages) -> Validator<str> {
    let message = messages.must_be_whole_number.clone();
    Validator::from_fn(move |value: &str| match parse_number(value) {
        Some(number) if number.fract() == 0.0 => Ok(()),
        _ => reject(RuleCode::NotWholeNumber, &message),
    })
}

/// Fails when the value is below `min` or is not a number at all.
pub fn min_value(messages: &Messages, min: f64) -> Validator<str> {
    let message = Messages::render(&messages.min_value, "min", min);
    Validator::from_fn(move |value: &str| match parse_number(value) {
        Some(number) if number >= min => Ok(()),
        _ => reject(RuleCode::TooSmall, &message),
    })
}

/// Booking-form length rule: at least `threshold` characters.
pub fn min_length(messages: &Messages, threshold: usize) -> Validator<str> {
    let message = Messages::render(&messages.min_length, "threshold", threshold);
    Validator::from_fn(move |value: &str| {
        if value.chars().count() >= threshold {
            Ok(())
        } else {
            reject(RuleCode::TooShort, &message)
        }
    })
}

/// Password length rule: strictly more than `threshold` characters.
pub fn password_min_length(messages: &Messages, threshold: usize) -> Validator<str> {
    let message = Messages::render(&messages.password_min_length, "threshold", threshold);
    Validator::from_fn(move |value: &str| {
        if value.chars().count() > threshold {
            Ok(())
        } else {
            reject(RuleCode::TooShort, &message)
        }
    })
}

/// Ukrainian mobile number, with or without the `+380` prefix and spaces.
pub fn validate_phone_number(messages: &Messages) -> Validator<str> {
    let required_message = messages.required.clone();
    let format_message = messages.invalid_phone.clone();
    Validator::from_fn(move |value: &str| {
        if value.is_empty() {
            return reject(RuleCode::Required, &required_message);
        }
        let compact: String = value.chars().filter(|c| !c.is_whitespace()).collect();
        if PHONE_REGEX.is_match(&compact) {
            Ok(())
        } else {
            reject(RuleCode::InvalidPhone, &format_message)
        }
    })
}

pub fn validate_email(messages: &Messages) -> Validator<str> {
    let message = messages.invalid_email.clone();
    Validator::from_fn(move |value: &str| {
        if EMAIL_REGEX.is_match(value) {
            Ok(())
        } else {
            reject(RuleCode::InvalidEmail, &message)
        }
    })
}

/// Passes when lower-casing the value changes it.
pub fn has_capital(messages: &Messages) -> Validator<str> {
    let message = messages.has_capital.clone();
    Validator::from_fn(move |value: &str| {
        if value != value.to_lowercase() {
            Ok(())
        } else {
            reject(RuleCode::MissingCapital, &message)
        }
    })
}

pub fn has_symbol(messages: &Messages) -> Validator<str> {
    let message = messages.has_symbol.clone();
    Validator::from_fn(move |value: &str| {
        if value.contains(&constants::PASSWORD_SYMBOLS[..]) {
            Ok(())
        } else {
            reject(RuleCode::MissingSymbol, &message)
        }
    })
}

/// The value must name one of the tables `1..=table_count`.
pub fn one_of_tables(messages: &Messages, table_count: u8) -> Validator<str> {
    let message = messages.unknown_table.clone();
    Validator::from_fn(move |value: &str| match TableId::parse(value, table_count) {
        Some(_) => Ok(()),
        None => reject(RuleCode::UnknownTable, &message),
    })
}

/// The value, in the picker's display format, must be a slot that has not
/// passed yet. "Now" is read on every call.
pub fn future_slot(messages: &Messages) -> Validator<str> {
    let message = messages.past_time_slot.clone();
    Validator::from_fn(move |value: &str| {
        let now = Local::now().naive_local();
        match NaiveDateTime::parse_from_str(value, constants::FIELD_DATE_FORMAT) {
            Ok(candidate) if filter_passed_time_at(candidate, now) => Ok(()),
            _ => reject(RuleCode::TimeSlotPassed, &message),
        }
    })
}
