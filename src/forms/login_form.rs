use log::warn;

use crate::{
    config::messages::Messages,
    constants,
    error::ServiceResult,
    forms::{
        field::Field,
        form::{FieldError, Form, FormState},
    },
    functional::{validation_rules, validator::compose_validators},
    services::auth::{Authenticator, Credentials},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Blocked(Vec<FieldError>),
    Authenticated(Credentials),
    Rejected(String),
}

/// Email and password form of the login page.
#[derive(Debug, Clone)]
pub struct LoginForm {
    form: Form,
    submit_label: String,
}

impl LoginForm {
    pub fn new(messages: &Messages) -> ServiceResult<Self> {
        let email = Field::new(
            constants::FIELD_EMAIL,
            compose_validators(vec![
                validation_rules::required_with(messages.login_required.clone()),
                validation_rules::validate_email(messages),
            ]),
        )
        .with_placeholder(messages.placeholder_email.clone());

        let password = Field::new(
            constants::FIELD_PASSWORD,
            compose_validators(vec![
                validation_rules::required_with(messages.login_required.clone()),
                validation_rules::password_min_length(messages, constants::PASSWORD_MIN_LENGTH),
                validation_rules::has_capital(messages),
                validation_rules::has_symbol(messages),
            ]),
        )
        .with_placeholder(messages.placeholder_password.clone());

        let form = Form::new().with_field(email)?.with_field(password)?;
        Ok(Self {
            form,
            submit_label: messages.login_submit.clone(),
        })
    }

    pub fn submit_label(&self) -> &str {
        &self.submit_label
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.form.field(name)
    }

    pub fn state(&self) -> FormState {
        self.form.state()
    }

    pub fn is_valid(&self) -> bool {
        self.form.is_valid()
    }

    pub fn change(&mut self, name: &str, value: &str) -> ServiceResult<()> {
        self.form.change(name, value)
    }

    pub fn blur(&mut self, name: &str) -> ServiceResult<()> {
        self.form.blur(name)
    }

    pub fn reset(&mut self) {
        self.form.reset();
    }

    /// Validates both fields and, if they pass, hands the credentials to
    /// `authenticator`.
    pub fn submit<A>(&mut self, authenticator: &A) -> LoginOutcome
    where
        A: Authenticator + ?Sized,
    {
        if let Err(errors) = self.form.check_submittable() {
            return LoginOutcome::Blocked(errors);
        }

        let credentials = Credentials {
            email: self.form.value(constants::FIELD_EMAIL).unwrap_or_default().to_string(),
            password: self
                .form
                .value(constants::FIELD_PASSWORD)
                .unwrap_or_default()
                .to_string(),
        };

        match authenticator.authenticate(&credentials) {
            Ok(()) => LoginOutcome::Authenticated(credentials),
            Err(err) => {
                warn!("Login rejected for {}: {}", credentials.email, err);
                LoginOutcome::Rejected(err.message().to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::ServiceError,
        services::auth::DiagnosticAuthenticator,
    };

    struct RejectAll;

    impl Authenticator for RejectAll {
        fn authenticate(&self, _: &Credentials) -> ServiceResult<()> {
            Err(ServiceError::unauthorized("Неверный логин или пароль"))
        }
    }

    fn password_error(form: &mut LoginForm, value: &str) -> Option<String> {
        form.change(constants::FIELD_PASSWORD, value).unwrap();
        form.field(constants::FIELD_PASSWORD)
            .and_then(|field| field.state().error.clone())
            .map(|error| error.message)
    }

    #[test]
    fn test_password_rules_in_order() {
        let mut form = LoginForm::new(&Messages::default()).unwrap();
        assert_eq!(
            password_error(&mut form, ""),
            Some("обязательное к заполнению".to_string())
        );
        assert_eq!(
            password_error(&mut form, "abcdef"),
            Some("Количество символов должна быть больше 6".to_string())
        );
        assert_eq!(
            password_error(&mut form, "abcdefg"),
            Some("Должна быть заглавная буква".to_string())
        );
        assert_eq!(
            password_error(&mut form, "Abcdefg"),
            Some("Должен быть символ".to_string())
        );
        assert_eq!(password_error(&mut form, "Abcdefg!"), None);
    }

    #[test]
    fn test_placeholders_and_label() {
        let form = LoginForm::new(&Messages::default()).unwrap();
        assert_eq!(form.submit_label(), "Войти");
        assert_eq!(
            form.field(constants::FIELD_EMAIL).unwrap().placeholder(),
            "Email"
        );
    }

    #[test]
    fn test_email_required_before_format() {
        let mut form = LoginForm::new(&Messages::default()).unwrap();
        form.blur(constants::FIELD_EMAIL).unwrap();
        assert_eq!(
            form.field(constants::FIELD_EMAIL).unwrap().visible_error(),
            Some("обязательное к заполнению")
        );
        form.change(constants::FIELD_EMAIL, "a@b").unwrap();
        assert_eq!(
            form.field(constants::FIELD_EMAIL).unwrap().visible_error(),
            Some("Некорректный email")
        );
    }

    #[test]
    fn test_submit_blocked_when_invalid() {
        let mut form = LoginForm::new(&Messages::default()).unwrap();
        form.change(constants::FIELD_EMAIL, "a@b.co").unwrap();
        match form.submit(&DiagnosticAuthenticator) {
            LoginOutcome::Blocked(errors) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].field, "password");
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_submit_valid_credentials() {
        let mut form = LoginForm::new(&Messages::default()).unwrap();
        form.change(constants::FIELD_EMAIL, "a@b.co").unwrap();
        form.change(constants::FIELD_PASSWORD, "Secret1!").unwrap();

        match form.submit(&DiagnosticAuthenticator) {
            LoginOutcome::Authenticated(credentials) => assert_eq!(credentials.email, "a@b.co"),
            other => panic!("unexpected outcome {:?}", other),
        }
        assert_eq!(
            form.submit(&RejectAll),
            LoginOutcome::Rejected("Неверный логин или пароль".to_string())
        );
    }
}
