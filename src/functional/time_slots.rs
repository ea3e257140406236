//! Booking time slots
//!
//! Timestamps are local wall-clock times (`NaiveDateTime`), which is what the
//! date/time picker shows and what the order form submits.

use chrono::{Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};

use crate::{config::app::BookingConfig, constants};

/// Whether `candidate` can still be picked. Reads the clock on every call.
pub fn filter_passed_time(candidate: NaiveDateTime) -> bool {
    filter_passed_time_at(candidate, Local::now().naive_local())
}

/// Whether `candidate` is strictly after `now`.
pub fn filter_passed_time_at(candidate: NaiveDateTime, now: NaiveDateTime) -> bool {
    now < candidate
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSlot {
    pub time: NaiveDateTime,
    pub selectable: bool,
}

/// Props handed to the date/time picker widget.
#[derive(Debug, Clone)]
pub struct TimePickerProps {
    pub locale: String,
    pub display_format: &'static str,
    pub interval_minutes: u32,
    pub opening_hour: u32,
    pub clearable: bool,
    pub filter_time: fn(NaiveDateTime) -> bool,
}

impl TimePickerProps {
    pub fn from_config(config: &BookingConfig) -> Self {
        Self {
            locale: config.locale.clone(),
            display_format: constants::DISPLAY_DATE_FORMAT,
            interval_minutes: config.slot_interval_minutes.max(1),
            opening_hour: config.opening_hour,
            clearable: true,
            filter_time: filter_passed_time,
        }
    }

    pub fn format(&self, value: NaiveDateTime) -> String {
        value.format(self.display_format).to_string()
    }

    pub fn parse(&self, value: &str) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(value, self.display_format).ok()
    }

    /// Text stored in the date field for a selection. Unlike the display
    /// format it keeps the full year.
    pub fn field_value(&self, value: NaiveDateTime) -> String {
        value.format(constants::FIELD_DATE_FORMAT).to_string()
    }

    pub fn parse_field_value(&self, value: &str) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(value, constants::FIELD_DATE_FORMAT).ok()
    }

    /// What the picker shows for a stored field value.
    pub fn display_field_value(&self, value: &str) -> Option<String> {
        self.parse_field_value(value).map(|date_time| self.format(date_time))
    }

    /// The picker's initial selection: today at the opening hour, on the hour.
    pub fn default_selection(&self, now: NaiveDateTime) -> NaiveDateTime {
        let opening = NaiveTime::from_hms_opt(self.opening_hour, 0, 0).unwrap_or(NaiveTime::MIN);
        now.date().and_time(opening)
    }

    /// Every slot of `day` at the configured interval, flagged against the
    /// live clock.
    pub fn time_slots(&self, day: NaiveDate) -> Vec<TimeSlot> {
        let filter = self.filter_time;
        self.slots(day)
            .map(|time| TimeSlot {
                time,
                selectable: filter(time),
            })
            .collect()
    }

    /// Same as [`time_slots`](Self::time_slots) with an explicit "now".
    pub fn time_slots_at(&self, day: NaiveDate, now: NaiveDateTime) -> Vec<TimeSlot> {
        self.slots(day)
            .map(|time| TimeSlot {
                time,
                selectable: filter_passed_time_at(time, now),
            })
            .collect()
    }

    fn slots(&self, day: NaiveDate) -> impl Iterator<Item = NaiveDateTime> {
        let step = Duration::minutes(i64::from(self.interval_minutes.max(1)));
        itertools::iterate(day.and_time(NaiveTime::MIN), move |time| *time + step)
            .take_while(move |time| time.date() == day)
    }
}
