//! Booking Models
//!
//! `BookingRequest` is the validated reservation; `AddTable` is the record
//! handed to the dispatcher.

use chrono::NaiveDateTime;
use derive_more::Display;
use serde_derive::{Deserialize, Serialize};

use crate::{
    constants,
    error::{ServiceError, ServiceResult},
};

/// Identifier of one of the restaurant's tables, numbered from 1.
#[derive(
    Debug, Display, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TableId(u8);

impl TableId {
    /// Parses `value` as a table number in `1..=table_count`.
    pub fn parse(value: &str, table_count: u8) -> Option<Self> {
        value
            .trim()
            .parse::<u8>()
            .ok()
            .filter(|number| (1..=table_count).contains(number))
            .map(TableId)
    }

    pub fn all(table_count: u8) -> impl Iterator<Item = TableId> {
        (1..=table_count).map(TableId)
    }

    pub fn number(self) -> u8 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRequest {
    username: String,
    phone_number: String,
    table: TableId,
    guests: u32,
    date_time: NaiveDateTime,
}

impl BookingRequest {
    pub fn new(
        username: impl Into<String>,
        phone_number: impl Into<String>,
        table: TableId,
        guests: u32,
        date_time: NaiveDateTime,
    ) -> ServiceResult<Self> {
        let username = username.into();
        let phone_number = phone_number.into();

        if username.is_empty() {
            return Err(ServiceError::bad_request("username is required"));
        }
        if phone_number.is_empty() {
            return Err(ServiceError::bad_request("phone number is required"));
        }
        if guests == 0 {
            return Err(ServiceError::bad_request("guests must be positive"));
        }

        Ok(Self {
            username,
            phone_number,
            table,
            guests,
            date_time,
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }

    pub fn table(&self) -> TableId {
        self.table
    }

    pub fn guests(&self) -> u32 {
        self.guests
    }

    pub fn date_time(&self) -> NaiveDateTime {
        self.date_time
    }

    /// `MM/DD/YY HH:mm`
    pub fn formatted_date_time(&self) -> String {
        self.date_time
            .format(constants::SUBMIT_DATE_FORMAT)
            .to_string()
    }
}

/// Record dispatched to the store when an authenticated user books a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddTable {
    pub username: String,
    pub phone_number: String,
    pub table: TableId,
    pub guests: u32,
    pub data: String,
}

impl From<&BookingRequest> for AddTable {
    fn from(request: &BookingRequest) -> Self {
        Self {
            username: request.username.clone(),
            phone_number: request.phone_number.clone(),
            table: request.table,
            guests: request.guests,
            data: request.formatted_date_time(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn evening() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 12, 31)
            .unwrap()
            .and_hms_opt(19, 5, 0)
            .unwrap()
    }

    #[test]
    fn test_table_id_parse() {
        assert_eq!(TableId::parse("3", 10).map(TableId::number), Some(3));
        assert_eq!(TableId::parse(" 10 ", 10).map(TableId::number), Some(10));
        assert!(TableId::parse("0", 10).is_none());
        assert!(TableId::parse("11", 10).is_none());
        assert!(TableId::parse("", 10).is_none());
        assert_eq!(TableId::all(10).count(), 10);
    }

    #[test]
    fn test_formatted_date_time() {
        let table = TableId::parse("2", 10).unwrap();
        let request = BookingRequest::new("Анна", "+380 99 999 99 99", table, 4, evening()).unwrap();
        assert_eq!(request.formatted_date_time(), "12/31/26 19:05");
    }

    #[test]
    fn test_rejects_zero_guests() {
        let table = TableId::parse("2", 10).unwrap();
        assert!(BookingRequest::new("Анна", "+380 99 999 99 99", table, 0, evening()).is_err());
        assert!(BookingRequest::new("", "+380 99 999 99 99", table, 1, evening()).is_err());
    }

    #[test]
    fn test_add_table_json_shape() {
        let table = TableId::parse("7", 10).unwrap();
        let request = BookingRequest::new("Анна", "+380 99 999 99 99", table, 2, evening()).unwrap();
        let json = serde_json::to_value(AddTable::from(&request)).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "username": "Анна",
                "phoneNumber": "+380 99 999 99 99",
                "table": 7,
                "guests": 2,
                "data": "12/31/26 19:05",
            })
        );
    }
}
