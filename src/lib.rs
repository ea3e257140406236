//! Restaurant table booking front-end: the order modal and the login page,
//! reduced to their form state, validators and submit flow.

pub mod components;
pub mod config;
pub mod constants;
pub mod error;
pub mod forms;
pub mod functional;
pub mod models;
pub mod services;
pub mod utils;

pub use components::order_modal::{ConfirmDialog, OrderModal};
pub use config::{BookingConfig, Messages};
pub use error::{ServiceError, ServiceResult, StoreError};
pub use forms::{
    login_form::{LoginForm, LoginOutcome},
    order_form::{OrderForm, OrderStatus, SubmitOutcome},
};
pub use models::booking::{AddTable, BookingRequest, TableId};
pub use services::{
    auth::{Authenticator, Credentials, DiagnosticAuthenticator},
    dispatch::{BookingDispatcher, BookingLog},
    session_gate::{InMemorySessionStore, SessionGate, SessionStore},
};
