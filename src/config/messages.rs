//! User-facing string catalog
//!
//! Every message a validator or dialog can show lives here so that the
//! validation logic never hard-codes a locale. The default catalog is Russian;
//! a JSON file may override any subset of keys.

use std::{fs, path::Path};

use serde_derive::{Deserialize, Serialize};

use crate::error::{ServiceError, ServiceResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub required: String,
    pub login_required: String,
    pub must_be_number: String,
    pub must_be_whole_number: String,
    /// Template, `{min}` is substituted.
    pub min_value: String,
    /// Template, `{threshold}` is substituted.
    pub min_length: String,
    /// Template, `{threshold}` is substituted.
    pub password_min_length: String,
    pub invalid_phone: String,
    pub invalid_email: String,
    pub has_capital: String,
    pub has_symbol: String,
    pub unknown_table: String,
    pub past_time_slot: String,

    pub confirm_prefix: String,
    pub confirm_link: String,
    pub confirm_suffix: String,

    pub order_title: String,
    pub order_submit: String,
    pub login_submit: String,

    pub placeholder_username: String,
    pub placeholder_phone: String,
    pub placeholder_table: String,
    pub placeholder_guests: String,
    pub placeholder_date_time: String,
    pub placeholder_email: String,
    pub placeholder_password: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            required: "Обязательное поле".to_string(),
            login_required: "обязательное к заполнению".to_string(),
            must_be_number: "Это должно быть число".to_string(),
            must_be_whole_number: "Должно быть целое число".to_string(),
            min_value: "Должно быть больше {min}".to_string(),
            min_length: "Должно быть больше {threshold} символов".to_string(),
            password_min_length: "Количество символов должна быть больше {threshold}".to_string(),
            invalid_phone: "Некорректный формат телефона".to_string(),
            invalid_email: "Некорректный email".to_string(),
            has_capital: "Должна быть заглавная буква".to_string(),
            has_symbol: "Должен быть символ".to_string(),
            unknown_table: "Выберите столик из списка".to_string(),
            past_time_slot: "Выберите время в будущем".to_string(),
            confirm_prefix: "Для того чтобы забронировать столик вам нужно".to_string(),
            confirm_link: "войти".to_string(),
            confirm_suffix: "в аккаунт".to_string(),
            order_title: "ЗАБРОНИРОВАТЬ СТОЛИК".to_string(),
            order_submit: "Забронировать".to_string(),
            login_submit: "Войти".to_string(),
            placeholder_username: "Имя".to_string(),
            placeholder_phone: "Телефон".to_string(),
            placeholder_table: "Столик".to_string(),
            placeholder_guests: "Количество гостей".to_string(),
            placeholder_date_time: "Дата/Время".to_string(),
            placeholder_email: "Email".to_string(),
            placeholder_password: "password".to_string(),
        }
    }
}

impl Messages {
    /// Parses a catalog from JSON. Keys missing from the document keep their
    /// default value.
    pub fn from_json(json: &str) -> ServiceResult<Self> {
        serde_json::from_str(json).map_err(|err| {
            ServiceError::bad_request(format!("Invalid message catalog: {}", err))
        })
    }

    pub fn from_file(path: impl AsRef<Path>) -> ServiceResult<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|err| {
            ServiceError::internal_server_error(format!(
                "Failed to read message catalog {}: {}",
                path.display(),
                err
            ))
        })?;
        Self::from_json(&contents)
    }

    /// Substitutes the `{name}` placeholder in `template`.
    pub fn render(template: &str, name: &str, value: impl std::fmt::Display) -> String {
        template.replace(&format!("{{{}}}", name), &value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_substitutes_named_params() {
        let rendered = Messages::render("Должно быть больше {min}", "min", 1);
        assert_eq!(rendered, "Должно быть больше 1");
    }

    #[test]
    fn test_render_leaves_unknown_placeholders() {
        let rendered = Messages::render("{a} and {b}", "a", "x");
        assert_eq!(rendered, "x and {b}");
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let messages = Messages::from_json(r#"{ "required": "Required field" }"#).unwrap();
        assert_eq!(messages.required, "Required field");
        assert_eq!(messages.invalid_email, Messages::default().invalid_email);
    }

    #[test]
    fn test_invalid_json_is_bad_request() {
        let err = Messages::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ServiceError::BadRequest { .. }));
    }
}
