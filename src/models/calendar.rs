//! Slot calendar: maps global slot indices to days and labels.
//!
//! # Time Model
//! A tournament day is split into the configured slot templates
//! (e.g. `["Morning", "Evening"]`). Slot index `i` falls on
//! `calendar_day = i / slots_per_day` at position `i % slots_per_day`.
//!
//! Labels are date-qualified when a start date is known
//! (`"2026-03-01 - Morning"`), otherwise synthetic (`"Day 1 - Morning"`).
//!
//! # Precedence
//! A slot is blacked out when either its date string or its full label
//! appears in the blackout set (see [`Constraints::is_blacked_out`]).
//!
//! [`Constraints::is_blacked_out`]: super::Constraints::is_blacked_out

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Template used when no slot labels are configured for the packer.
pub const DEFAULT_SLOT: &str = "Default Slot";

/// Template used by bracket previews when no slot labels are configured.
pub const DEFAULT_ROUND_SLOT: &str = "Morning";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// One concrete slot of the calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    /// Global slot index.
    pub index: usize,
    /// Calendar day offset from the start.
    pub day: usize,
    /// Position within the day.
    pub slot_in_day: usize,
    /// ISO date of the slot's day, if a start date is configured.
    pub date: Option<String>,
    /// Human-readable label.
    pub label: String,
}

/// Slot template plus optional start date.
#[derive(Debug, Clone)]
pub struct SlotCalendar {
    templates: Vec<String>,
    start: Option<NaiveDate>,
}

impl SlotCalendar {
    /// Creates a calendar. An empty template list becomes `["Default Slot"]`.
    pub fn new(time_slots: &[String], start: Option<NaiveDate>) -> Self {
        let templates = if time_slots.is_empty() {
            vec![DEFAULT_SLOT.to_string()]
        } else {
            time_slots.to_vec()
        };
        Self { templates, start }
    }

    /// Number of slots per calendar day (at least 1).
    #[inline]
    pub fn slots_per_day(&self) -> usize {
        self.templates.len().max(1)
    }

    /// Start date, if any.
    pub fn start(&self) -> Option<NaiveDate> {
        self.start
    }

    /// Calendar day of a slot index.
    #[inline]
    pub fn day_of(&self, slot_index: usize) -> usize {
        slot_index / self.slots_per_day()
    }

    /// Template label for a position within the day.
    ///
    /// Positions past the template length reuse the first entry.
    pub fn template(&self, slot_in_day: usize) -> &str {
        self.templates
            .get(slot_in_day)
            .or_else(|| self.templates.first())
            .map(String::as_str)
            .unwrap_or(DEFAULT_SLOT)
    }

    /// ISO date string for a calendar day.
    pub fn date_string(&self, day: usize) -> Option<String> {
        date_after(self.start, day)
    }

    /// Label for the given day and template position.
    pub fn label_for(&self, day: usize, slot_in_day: usize) -> String {
        let template = self.template(slot_in_day);
        match self.date_string(day) {
            Some(date) => format!("{date} - {template}"),
            None => format!("Day {} - {template}", day + 1),
        }
    }

    /// Resolves a global slot index.
    pub fn slot(&self, index: usize) -> Slot {
        let day = self.day_of(index);
        let slot_in_day = index % self.slots_per_day();
        Slot {
            index,
            day,
            slot_in_day,
            date: self.date_string(day),
            label: self.label_for(day, slot_in_day),
        }
    }
}

/// Parses a `YYYY-MM-DD` start date.
///
/// Unparsable input yields `None` so callers fall back to synthetic labels.
pub fn parse_start_date(raw: Option<&str>) -> Option<NaiveDate> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    match NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(e) => {
            tracing::debug!("ignoring unparsable start_date {raw:?}: {e}");
            None
        }
    }
}

/// ISO date `day` days after `start`.
pub fn date_after(start: Option<NaiveDate>, day: usize) -> Option<String> {
    start
        .and_then(|s| s.checked_add_days(Days::new(day as u64)))
        .map(|d| d.format(DATE_FORMAT).to_string())
}

/// Template lookup used by bracket previews and round scheduling:
/// `time_slots[index]` when in range, else the first entry, else `"Morning"`.
pub fn round_template(time_slots: &[String], index: usize) -> &str {
    time_slots
        .get(index)
        .or_else(|| time_slots.first())
        .map(String::as_str)
        .unwrap_or(DEFAULT_ROUND_SLOT)
}
