//! Date of birth assembled from separately edited day, month and year fields.
//!
//! Each field is checked only against its own bound. The parts are kept as
//! entered and only resolved to a calendar date when the lookup is issued, so
//! the order in which fields are filled in never changes the outcome. A
//! combination that does not exist on the calendar (31 April) rolls over into
//! the following month on resolution.

use std::{fmt, ops::RangeInclusive};

use chrono::{Datelike, Days, Local, NaiveDate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatePart {
    Day,
    Month,
    Year,
}

impl DatePart {
    pub const ALL: [DatePart; 3] = [DatePart::Day, DatePart::Month, DatePart::Year];

    pub fn bounds(self) -> RangeInclusive<i32> {
        match self {
            Self::Day => 1..=31,
            Self::Month => 1..=12,
            Self::Year => 1900..=2100,
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Self::Day => "DD",
            Self::Month => "MM",
            Self::Year => "YYYY",
        }
    }
}

impl fmt::Display for DatePart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Day => "day",
            Self::Month => "month",
            Self::Year => "year",
        };
        f.write_str(name)
    }
}

/// Unnormalised field values; each is within its own bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateParts {
    pub day: u32,
    pub month: u32,
    pub year: i32,
}

impl DateParts {
    fn from_date(date: NaiveDate) -> Self {
        Self {
            day: date.day(),
            month: date.month(),
            year: date.year(),
        }
    }

    pub fn get(&self, part: DatePart) -> i32 {
        match part {
            DatePart::Day => self.day as i32,
            DatePart::Month => self.month as i32,
            DatePart::Year => self.year,
        }
    }

    /// Calendar date for these parts, rolling an overlong day into the next month.
    pub fn resolve(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)?
            .checked_add_days(Days::new(u64::from(self.day.saturating_sub(1))))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DobBuilder {
    parts: Option<DateParts>,
}

impl DobBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one field edit. Returns `false` and leaves everything untouched
    /// when `raw` is not an integer or falls outside the field's bound.
    ///
    /// The first accepted edit seeds the other two fields from `today`.
    pub fn set_part(&mut self, part: DatePart, raw: &str, today: NaiveDate) -> bool {
        let Ok(value) = raw.trim().parse::<i32>() else {
            return false;
        };
        if !part.bounds().contains(&value) {
            return false;
        }

        let mut parts = self.parts.unwrap_or_else(|| DateParts::from_date(today));
        match part {
            DatePart::Day => parts.day = value as u32,
            DatePart::Month => parts.month = value as u32,
            DatePart::Year => parts.year = value,
        }
        self.parts = Some(parts);
        true
    }

    /// Same as [`DobBuilder::set_part`] seeded from the local calendar date.
    pub fn set_part_now(&mut self, part: DatePart, raw: &str) -> bool {
        self.set_part(part, raw, local_today())
    }

    pub fn is_present(&self) -> bool {
        self.parts.is_some()
    }

    pub fn parts(&self) -> Option<DateParts> {
        self.parts
    }

    pub fn field(&self, part: DatePart) -> Option<i32> {
        self.parts.map(|p| p.get(part))
    }

    pub fn resolve(&self) -> Option<NaiveDate> {
        self.parts.and_then(|p| p.resolve())
    }
}

pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn empty_until_first_accepted_edit() {
        let mut dob = DobBuilder::new();
        assert!(!dob.is_present());
        assert!(!dob.set_part(DatePart::Day, "abc", date(2026, 10, 17)));
        assert!(!dob.is_present());
        assert_eq!(dob.resolve(), None);
    }

    #[test]
    fn first_edit_seeds_remaining_fields_from_today() {
        let mut dob = DobBuilder::new();
        assert!(dob.set_part(DatePart::Year, "2005", date(2026, 10, 17)));
        assert_eq!(
            dob.parts(),
            Some(DateParts {
                day: 17,
                month: 10,
                year: 2005
            })
        );
    }

    #[test]
    fn out_of_range_edit_keeps_previous_value() {
        let today = date(2026, 10, 17);
        let mut dob = DobBuilder::new();
        assert!(dob.set_part(DatePart::Day, "15", today));
        for raw in ["32", "0", "-4", "", "3.5"] {
            assert!(!dob.set_part(DatePart::Day, raw, today), "accepted {raw:?}");
        }
        assert_eq!(dob.field(DatePart::Day), Some(15));

        assert!(!dob.set_part(DatePart::Month, "13", today));
        assert!(!dob.set_part(DatePart::Year, "1899", today));
        assert!(!dob.set_part(DatePart::Year, "2101", today));
        assert_eq!(dob.resolve(), Some(date(2026, 10, 15)));
    }

    #[test]
    fn edits_touch_only_their_field() {
        let today = date(2026, 10, 17);
        let mut dob = DobBuilder::new();
        dob.set_part(DatePart::Day, "15", today);
        dob.set_part(DatePart::Month, "6", today);
        dob.set_part(DatePart::Year, "2005", today);
        dob.set_part(DatePart::Month, "7", today);
        assert_eq!(dob.resolve(), Some(date(2005, 7, 15)));
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let mut dob = DobBuilder::new();
        assert!(dob.set_part(DatePart::Month, " 06 ", date(2026, 10, 17)));
        assert_eq!(dob.field(DatePart::Month), Some(6));
    }

    #[test]
    fn calendar_invalid_day_rolls_into_next_month() {
        let today = date(2026, 10, 17);
        let mut dob = DobBuilder::new();
        dob.set_part(DatePart::Year, "2023", today);
        dob.set_part(DatePart::Month, "4", today);
        dob.set_part(DatePart::Day, "31", today);
        assert_eq!(dob.field(DatePart::Day), Some(31));
        assert_eq!(dob.resolve(), Some(date(2023, 5, 1)));

        dob.set_part(DatePart::Month, "2", today);
        dob.set_part(DatePart::Day, "29", today);
        assert_eq!(dob.resolve(), Some(date(2023, 3, 1)));
        dob.set_part(DatePart::Year, "2024", today);
        assert_eq!(dob.resolve(), Some(date(2024, 2, 29)));
    }
}
