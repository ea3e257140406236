use std::env;

use log::{info, warn};

use crate::{
    config::messages::Messages,
    constants,
    error::ServiceResult,
};

/// Runtime settings for the booking front-end.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingConfig {
    /// Key read from the session store to decide whether a user is logged in.
    pub session_key: String,
    pub table_count: u8,
    pub locale: String,
    pub login_route: String,
    pub slot_interval_minutes: u32,
    pub opening_hour: u32,
    pub messages: Messages,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            session_key: constants::DEFAULT_SESSION_KEY.to_string(),
            table_count: constants::DEFAULT_TABLE_COUNT,
            locale: constants::DEFAULT_LOCALE.to_string(),
            login_route: constants::ROUTE_LOGIN_PAGE.to_string(),
            slot_interval_minutes: constants::DEFAULT_SLOT_INTERVAL_MINUTES,
            opening_hour: constants::DEFAULT_OPENING_HOUR,
            messages: Messages::default(),
        }
    }
}

impl BookingConfig {
    /// Loads `.env` (if present) and builds the configuration from the
    /// process environment.
    pub fn from_env() -> ServiceResult<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup. Unparseable
    /// numeric values fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> ServiceResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let messages = match lookup("BOOKING_MESSAGES_PATH") {
            Some(path) => {
                info!("Loading message catalog from {}", path);
                Messages::from_file(path)?
            }
            None => defaults.messages,
        };

        let table_count = parse_or(&lookup, "BOOKING_TABLE_COUNT", defaults.table_count);
        let table_count = if table_count == 0 {
            warn!("BOOKING_TABLE_COUNT must be positive, using default");
            constants::DEFAULT_TABLE_COUNT
        } else {
            table_count
        };

        let opening_hour = parse_or(&lookup, "BOOKING_OPENING_HOUR", defaults.opening_hour);
        let opening_hour = if opening_hour > 23 {
            warn!("BOOKING_OPENING_HOUR out of range, using default");
            constants::DEFAULT_OPENING_HOUR
        } else {
            opening_hour
        };

        let slot_interval_minutes = parse_or(
            &lookup,
            "BOOKING_SLOT_INTERVAL_MINUTES",
            defaults.slot_interval_minutes,
        )
        .max(1);

        Ok(Self {
            session_key: lookup("BOOKING_SESSION_KEY").unwrap_or(defaults.session_key),
            table_count,
            locale: lookup("BOOKING_LOCALE").unwrap_or(defaults.locale),
            login_route: lookup("BOOKING_LOGIN_ROUTE").unwrap_or(defaults.login_route),
            slot_interval_minutes,
            opening_hour,
            messages,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    lookup(key)
        .and_then(|raw| {
            raw.trim().parse().ok().or_else(|| {
                warn!("Ignoring unparseable value for {}: {:?}", key, raw);
                None
            })
        })
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_environment_empty() {
        let config = BookingConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, BookingConfig::default());
        assert_eq!(config.session_key, "email");
        assert_eq!(config.table_count, 10);
    }

    #[test]
    fn test_overrides_and_bad_numbers() {
        let config = BookingConfig::from_lookup(lookup_from(&[
            ("BOOKING_SESSION_KEY", "token"),
            ("BOOKING_TABLE_COUNT", "twelve"),
            ("BOOKING_OPENING_HOUR", "30"),
            ("BOOKING_SLOT_INTERVAL_MINUTES", "15"),
        ]))
        .unwrap();
        assert_eq!(config.session_key, "token");
        assert_eq!(config.table_count, 10);
        assert_eq!(config.opening_hour, 9);
        assert_eq!(config.slot_interval_minutes, 15);
    }

    #[test]
    fn test_messages_loaded_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "invalid_email": "Invalid email" }}"#).unwrap();
        let path = file.path().to_string_lossy().to_string();

        let config =
            BookingConfig::from_lookup(lookup_from(&[("BOOKING_MESSAGES_PATH", path.as_str())])).unwrap();
        assert_eq!(config.messages.invalid_email, "Invalid email");
        assert_eq!(config.messages.required, "Обязательное поле");
    }

    #[test]
    fn test_missing_messages_file_is_error() {
        let result = BookingConfig::from_lookup(lookup_from(&[(
            "BOOKING_MESSAGES_PATH",
            "/nonexistent/messages.json",
        )]));
        assert!(result.is_err());
    }
}
