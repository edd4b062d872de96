//! Event calendar.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use nasugview_shared::calendar::{event_on, mark_dates, DayMarking};
use nasugview_shared::fixtures::events;
use nasugview_shared::Event;

pub struct CalendarScreen {
    today: NaiveDate,
    selected: NaiveDate,
    events: Vec<Event>,
}

impl CalendarScreen {
    /// Opens on `initial` when the route carried a date, otherwise on today.
    pub fn new(today: NaiveDate, initial: Option<NaiveDate>) -> Self {
        Self::with_events(today, initial, events())
    }

    pub fn with_events(today: NaiveDate, initial: Option<NaiveDate>, events: Vec<Event>) -> Self {
        Self {
            today,
            selected: initial.unwrap_or(today),
            events,
        }
    }

    pub fn select(&mut self, date: NaiveDate) {
        self.selected = date;
    }

    pub fn selected(&self) -> NaiveDate {
        self.selected
    }

    pub fn markings(&self) -> BTreeMap<NaiveDate, DayMarking> {
        mark_dates(self.today, Some(self.selected), &self.events)
    }

    pub fn marking_for(&self, date: NaiveDate) -> Option<DayMarking> {
        self.markings().get(&date).copied()
    }

    /// The event card under the calendar.
    pub fn selected_event(&self) -> Option<&Event> {
        event_on(&self.events, self.selected)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_opens_on_today_or_route_date() {
        let today = day(2025, 6, 20);
        assert_eq!(CalendarScreen::new(today, None).selected(), today);
        assert_eq!(
            CalendarScreen::new(today, Some(day(2025, 7, 5))).selected(),
            day(2025, 7, 5)
        );
    }

    #[test]
    fn test_today_with_event_shows_event() {
        let today = day(2025, 6, 22);
        let screen = CalendarScreen::new(today, None);
        assert_eq!(screen.marking_for(today), Some(DayMarking::Event));
        assert_eq!(screen.selected_event().map(|e| e.name), Some("Fun Run"));
    }

    #[test]
    fn test_selection_and_plain_days() {
        let today = day(2025, 6, 20);
        let mut screen = CalendarScreen::new(today, None);
        screen.select(day(2025, 6, 25));

        assert_eq!(screen.marking_for(today), Some(DayMarking::Today));
        assert_eq!(screen.marking_for(day(2025, 6, 25)), Some(DayMarking::Selected));
        assert_eq!(screen.marking_for(day(2025, 6, 30)), Some(DayMarking::Event));
        assert_eq!(screen.marking_for(day(2025, 6, 26)), None);
        assert!(screen.selected_event().is_none());
    }
}
