//! Day marking for the event calendar.
//!
//! Markings are applied in a fixed order: today, then the selected day, then
//! every event day. A later pass overwrites an earlier one, so a day that is
//! both today and an event day shows as an event.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::types::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DayMarking {
    /// Filled green dot
    Today,
    /// Green outline
    Selected,
    /// Filled blue dot
    Event,
}

pub fn mark_dates(
    today: NaiveDate,
    selected: Option<NaiveDate>,
    events: &[Event],
) -> BTreeMap<NaiveDate, DayMarking> {
    let mut marks = BTreeMap::new();
    marks.insert(today, DayMarking::Today);

    if let Some(day) = selected.filter(|d| *d != today) {
        marks.insert(day, DayMarking::Selected);
    }

    for event in events {
        marks.insert(event.date, DayMarking::Event);
    }

    marks
}

pub fn event_on(events: &[Event], date: NaiveDate) -> Option<&Event> {
    events.iter().find(|e| e.date == date)
}
