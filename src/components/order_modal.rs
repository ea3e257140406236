//! Order modal
//!
//! Owns the modal's visibility, a fresh `OrderForm` for every opening and the
//! "please log in" confirmation dialog. Closing the modal drops the form, so
//! nothing typed survives into the next opening.

use log::debug;

use crate::{
    config::app::BookingConfig,
    error::{ServiceError, ServiceResult},
    forms::order_form::{OrderForm, SubmitOutcome},
    services::{
        dispatch::BookingDispatcher,
        navigation::{Link, Navigator, Route},
        session_gate::{SessionGate, SessionStore},
    },
};

/// Dialog shown when an anonymous user tries to book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmDialog {
    pub prefix: String,
    pub link: Link,
    pub suffix: String,
}

impl ConfirmDialog {
    pub fn login_required(config: &BookingConfig, navigator: &Navigator) -> Self {
        let messages = &config.messages;
        Self {
            prefix: messages.confirm_prefix.clone(),
            link: navigator.link(Route::LoginPage, messages.confirm_link.clone()),
            suffix: messages.confirm_suffix.clone(),
        }
    }

    /// Plain-text rendering of the dialog body.
    pub fn text(&self) -> String {
        format!("{} {} {}", self.prefix, self.link.text, self.suffix)
    }
}

#[derive(Debug)]
pub struct OrderModal {
    config: BookingConfig,
    navigator: Navigator,
    form: Option<OrderForm>,
    confirm_dialog: Option<ConfirmDialog>,
}

impl OrderModal {
    pub fn new(config: BookingConfig) -> Self {
        let navigator = Navigator::new(config.login_route.clone());
        Self {
            config,
            navigator,
            form: None,
            confirm_dialog: None,
        }
    }

    pub fn title(&self) -> &str {
        &self.config.messages.order_title
    }

    pub fn submit_label(&self) -> &str {
        &self.config.messages.order_submit
    }

    pub fn is_visible(&self) -> bool {
        self.form.is_some()
    }

    /// Opens the modal with an empty form. Reopening an open modal starts over.
    pub fn open(&mut self) -> ServiceResult<()> {
        self.form = Some(OrderForm::new(&self.config)?);
        self.confirm_dialog = None;
        debug!("Order modal opened");
        Ok(())
    }

    pub fn close(&mut self) {
        self.form = None;
        self.confirm_dialog = None;
        debug!("Order modal closed");
    }

    pub fn form(&self) -> Option<&OrderForm> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> ServiceResult<&mut OrderForm> {
        self.form
            .as_mut()
            .ok_or_else(|| ServiceError::bad_request("Order modal is closed"))
    }

    pub fn confirm_dialog(&self) -> Option<&ConfirmDialog> {
        self.confirm_dialog.as_ref()
    }

    pub fn close_confirm_dialog(&mut self) {
        self.confirm_dialog = None;
    }

    /// Submits the current form. A missing session opens the confirmation
    /// dialog; a dispatched booking closes the modal.
    pub fn submit<S, D>(&mut self, gate: &SessionGate<S>, dispatcher: &D) -> ServiceResult<SubmitOutcome>
    where
        S: SessionStore,
        D: BookingDispatcher + ?Sized,
    {
        let outcome = self.form_mut()?.submit(gate, dispatcher)?;
        match &outcome {
            SubmitOutcome::LoginRequired => {
                self.confirm_dialog =
                    Some(ConfirmDialog::login_required(&self.config, &self.navigator));
            }
            SubmitOutcome::Dispatched(_) => self.close(),
            SubmitOutcome::Blocked(_) => {}
        }
        Ok(outcome)
    }
}
