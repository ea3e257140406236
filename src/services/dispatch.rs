//! Outbound booking dispatch
//!
//! Fire-and-forget: nothing is returned to the order form.

use std::sync::{PoisonError, RwLock};

use log::{info, warn};

use crate::models::booking::AddTable;

pub trait BookingDispatcher {
    fn dispatch(&self, action: AddTable);
}

impl<F> BookingDispatcher for F
where
    F: Fn(AddTable),
{
    fn dispatch(&self, action: AddTable) {
        self(action)
    }
}

/// Keeps every dispatched booking in memory.
#[derive(Debug, Default)]
pub struct BookingLog {
    entries: RwLock<Vec<AddTable>>,
}

impl BookingLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<AddTable> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl BookingDispatcher for BookingLog {
    fn dispatch(&self, action: AddTable) {
        info!(
            "Table {} booked for {} guests at {}",
            action.table, action.guests, action.data
        );
        self.entries
            .write()
            .unwrap_or_else(|poisoned| {
                warn!("Booking log lock was poisoned, recovering");
                poisoned.into_inner()
            })
            .push(action);
    }
}
