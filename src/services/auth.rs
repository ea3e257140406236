//! Authentication boundary for the login form
//!
//! The login page currently has no backend; `DiagnosticAuthenticator` only
//! records the attempt in the log and accepts it.

use std::fmt;

use crate::error::ServiceResult;

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

pub trait Authenticator {
    fn authenticate(&self, credentials: &Credentials) -> ServiceResult<()>;
}

impl<T: Authenticator + ?Sized> Authenticator for &T {
    fn authenticate(&self, credentials: &Credentials) -> ServiceResult<()> {
        (**self).authenticate(credentials)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DiagnosticAuthenticator;

impl Authenticator for DiagnosticAuthenticator {
    fn authenticate(&self, credentials: &Credentials) -> ServiceResult<()> {
        tracing::info!(
            target: "booking::login",
            email = %credentials.email,
            password_len = credentials.password.chars().count(),
            "Login submitted"
        );
        Ok(())
    }
}
