//! Table booking form
//!
//! Five independently validated fields. A submit attempt either stays in
//! `Editing` (some field is invalid) or builds a `BookingRequest` and lets the
//! session gate decide between dispatching it and asking the user to log in.

use chrono::NaiveDateTime;
use log::{info, warn};

use crate::{
    config::app::BookingConfig,
    constants,
    error::{ServiceError, ServiceResult},
    forms::{
        field::Field,
        form::{FieldError, Form, FormState},
        phone_mask::PhoneMask,
    },
    functional::{
        time_slots::TimePickerProps,
        validation_rules::{self, parse_number},
        validator::compose_validators,
    },
    models::booking::{AddTable, BookingRequest, TableId},
    services::{
        dispatch::BookingDispatcher,
        session_gate::{GateDecision, SessionGate, SessionStore},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Editing,
    Submitting,
    SubmittedAuthenticated,
    SubmittedUnauthenticated,
}

impl OrderStatus {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            OrderStatus::SubmittedAuthenticated | OrderStatus::SubmittedUnauthenticated
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; the form stays editable.
    Blocked(Vec<FieldError>),
    /// No session: the booking was discarded and the user must log in.
    LoginRequired,
    /// The booking was handed to the dispatcher.
    Dispatched(AddTable),
}

#[derive(Debug, Clone)]
pub struct OrderForm {
    form: Form,
    status: OrderStatus,
    picker: TimePickerProps,
    phone_mask: PhoneMask,
    table_count: u8,
}

impl OrderForm {
    pub fn new(config: &BookingConfig) -> ServiceResult<Self> {
        let messages = &config.messages;

        let username = Field::new(
            constants::FIELD_USERNAME,
            validation_rules::required(messages),
        )
        .with_placeholder(messages.placeholder_username.clone());

        let phone_mask = PhoneMask::default();
        let unmask = phone_mask.clone();
        let phone_number = Field::new(
            constants::FIELD_PHONE_NUMBER,
            compose_validators(vec![
                validation_rules::required(messages),
                validation_rules::min_length(messages, constants::ORDER_MIN_LENGTH),
                validation_rules::validate_phone_number(messages),
            ])
            .normalized(move |value| unmask.unmasked(value)),
        )
        .with_placeholder(messages.placeholder_phone.clone());

        let table = Field::new(
            constants::FIELD_TABLE,
            compose_validators(vec![
                validation_rules::required(messages),
                validation_rules::one_of_tables(messages, config.table_count),
            ]),
        )
        .with_placeholder(messages.placeholder_table.clone());

        let guests = Field::new(
            constants::FIELD_GUESTS,
            compose_validators(vec![
                validation_rules::required(messages),
                validation_rules::min_value(messages, constants::MIN_GUESTS),
                validation_rules::must_be_number(messages),
                validation_rules::must_be_whole_number(messages),
            ]),
        )
        .with_placeholder(messages.placeholder_guests.clone());

        let date_time = Field::new(
            constants::FIELD_DATE_TIME,
            compose_validators(vec![
                validation_rules::required(messages),
                validation_rules::future_slot(messages),
            ]),
        )
        .with_placeholder(messages.placeholder_date_time.clone());

        let form = Form::new()
            .with_field(username)?
            .with_field(phone_number)?
            .with_field(table)?
            .with_field(guests)?
            .with_field(date_time)?;

        Ok(Self {
            form,
            status: OrderStatus::Editing,
            picker: TimePickerProps::from_config(config),
            phone_mask,
            table_count: config.table_count,
        })
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.form.field(name)
    }

    pub fn fields(&self) -> &[Field] {
        self.form.fields()
    }

    pub fn state(&self) -> FormState {
        self.form.state()
    }

    pub fn is_valid(&self) -> bool {
        self.form.is_valid()
    }

    pub fn picker(&self) -> &TimePickerProps {
        &self.picker
    }

    /// Options of the table select.
    pub fn tables(&self) -> Vec<TableId> {
        TableId::all(self.table_count).collect()
    }

    fn ensure_editing(&self) -> ServiceResult<()> {
        if self.status == OrderStatus::Editing {
            Ok(())
        } else {
            Err(ServiceError::conflict(format!(
                "Order form is no longer editable ({:?})",
                self.status
            )))
        }
    }

    /// Text input for any field. The phone number is run through its mask
    /// first.
    pub fn change(&mut self, name: &str, value: &str) -> ServiceResult<()> {
        self.ensure_editing()?;
        if name == constants::FIELD_PHONE_NUMBER {
            let masked = self.phone_mask.apply(value);
            self.form.change(name, masked)
        } else {
            self.form.change(name, value)
        }
    }

    pub fn blur(&mut self, name: &str) -> ServiceResult<()> {
        self.ensure_editing()?;
        self.form.blur(name)
    }

    /// Picker selection; `None` clears the field. The field keeps the full
    /// year, see [`display_date_time`](Self::display_date_time) for the
    /// picker text.
    pub fn select_date_time(&mut self, value: Option<NaiveDateTime>) -> ServiceResult<()> {
        self.ensure_editing()?;
        let text = value
            .map(|date_time| self.picker.field_value(date_time))
            .unwrap_or_default();
        self.form.change(constants::FIELD_DATE_TIME, text)
    }

    /// The selected slot as the picker renders it.
    pub fn display_date_time(&self) -> Option<String> {
        self.form
            .value(constants::FIELD_DATE_TIME)
            .and_then(|value| self.picker.display_field_value(value))
    }

    fn booking_request(&self) -> ServiceResult<BookingRequest> {
        let value = |name: &str| self.form.value(name).unwrap_or_default();

        let table = TableId::parse(value(constants::FIELD_TABLE), self.table_count)
            .ok_or_else(|| ServiceError::bad_request("Unknown table"))?;
        let guests = parse_number(value(constants::FIELD_GUESTS))
            .filter(|guests| guests.fract() == 0.0 && *guests >= 1.0 && *guests <= f64::from(u32::MAX))
            .map(|guests| guests as u32)
            .ok_or_else(|| ServiceError::bad_request("Invalid number of guests"))?;
        let date_time = self
            .picker
            .parse_field_value(value(constants::FIELD_DATE_TIME))
            .ok_or_else(|| ServiceError::bad_request("Invalid date"))?;

        BookingRequest::new(
            value(constants::FIELD_USERNAME),
            value(constants::FIELD_PHONE_NUMBER),
            table,
            guests,
            date_time,
        )
    }

    /// Runs the submit flow. Errors are reserved for misuse (submitting a
    /// finished form) and for values that passed validation but still do not
    /// form a booking.
    pub fn submit<S, D>(&mut self, gate: &SessionGate<S>, dispatcher: &D) -> ServiceResult<SubmitOutcome>
    where
        S: SessionStore,
        D: BookingDispatcher + ?Sized,
    {
        self.ensure_editing()?;

        if let Err(errors) = self.form.check_submittable() {
            return Ok(SubmitOutcome::Blocked(errors));
        }

        self.status = OrderStatus::Submitting;
        let request = match self.booking_request() {
            Ok(request) => request,
            Err(err) => {
                warn!("Validated order could not be turned into a booking: {}", err);
                self.status = OrderStatus::Editing;
                return Err(err);
            }
        };
        let action = AddTable::from(&request);

        match gate.decide() {
            GateDecision::RequireLogin => {
                info!("Booking for table {} needs a login first", request.table());
                self.status = OrderStatus::SubmittedUnauthenticated;
                Ok(SubmitOutcome::LoginRequired)
            }
            GateDecision::Dispatch => {
                info!("Dispatching booking for table {} at {}", action.table, action.data);
                dispatcher.dispatch(action.clone());
                self.status = OrderStatus::SubmittedAuthenticated;
                Ok(SubmitOutcome::Dispatched(action))
            }
        }
    }
}
