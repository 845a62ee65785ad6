//! Per-slot metadata shown in save/load menus.

use chrono::{Datelike, Timelike};

/// Creation stamp and cached play-time string of one slot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlotInfo {
    /// `MM-DD-YYYY`
    pub date_created: String,
    /// 12-hour clock, minutes zero-padded, e.g. `9:05AM`
    pub time_created: String,
    /// Last value produced by [`crate::format_time_played`] for this slot.
    pub time_played: String,
}

impl SlotInfo {
    /// Metadata stamped with the given wall-clock time.
    pub fn created_at<T: Datelike + Timelike>(now: &T) -> Self {
        Self {
            date_created: format_date(now),
            time_created: format_time(now),
            time_played: String::new(),
        }
    }
}

fn format_date<T: Datelike>(date: &T) -> String {
    format!("{:02}-{:02}-{:04}", date.month(), date.day(), date.year())
}

fn format_time<T: Timelike>(time: &T) -> String {
    let (pm, hour) = time.hour12();
    let suffix = if pm { "PM" } else { "AM" };
    format!("{}:{:02}{}", hour, time.minute(), suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 7)
            .and_then(|d| d.and_hms_opt(h, m, 0))
            .unwrap()
    }

    #[test]
    fn test_date_is_month_day_year() {
        assert_eq!(SlotInfo::created_at(&at(9, 5)).date_created, "03-07-2024");
    }

    #[test]
    fn test_time_uses_twelve_hour_clock() {
        assert_eq!(SlotInfo::created_at(&at(9, 5)).time_created, "9:05AM");
        assert_eq!(SlotInfo::created_at(&at(0, 30)).time_created, "12:30AM");
        assert_eq!(SlotInfo::created_at(&at(11, 59)).time_created, "11:59AM");
        assert_eq!(SlotInfo::created_at(&at(12, 0)).time_created, "12:00PM");
        assert_eq!(SlotInfo::created_at(&at(23, 10)).time_created, "11:10PM");
    }

    #[test]
    fn test_time_played_starts_empty() {
        assert!(SlotInfo::created_at(&at(1, 0)).time_played.is_empty());
    }
}
