//! Per-user review schedule and notification preferences.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::calendar::week_start;
use crate::domain::foundation::ValidationError;

const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// When the user reviews, and how they want to be nudged.
///
/// `review_time` is interpreted in UTC; `timezone` is stored for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewSettings {
    /// 0 = Sunday.
    pub review_day: u8,
    #[serde(with = "hh_mm")]
    pub review_time: NaiveTime,
    pub timezone: String,
    pub push_enabled: bool,
    pub email_reminders: bool,
    pub escalation_enabled: bool,
}

impl Default for ReviewSettings {
    fn default() -> Self {
        Self {
            review_day: 0,
            review_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap_or(NaiveTime::MIN),
            timezone: "UTC".to_string(),
            push_enabled: true,
            email_reminders: true,
            escalation_enabled: true,
        }
    }
}

impl ReviewSettings {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.review_day > 6 {
            return Err(ValidationError::out_of_range(
                "review_day",
                0,
                6,
                i32::from(self.review_day),
            ));
        }
        if self.timezone.trim().is_empty() {
            return Err(ValidationError::empty_field("timezone"));
        }
        Ok(())
    }

    pub fn day_name(&self) -> &'static str {
        DAY_NAMES[usize::from(self.review_day % 7)]
    }

    /// `"Sunday, 5pm"`, or `"Monday, 9:30am"` when minutes are set.
    pub fn next_review_label(&self) -> String {
        let (pm, hour) = self.review_time.hour12();
        let suffix = if pm { "pm" } else { "am" };
        match self.review_time.minute() {
            0 => format!("{}, {}{}", self.day_name(), hour, suffix),
            m => format!("{}, {}:{:02}{}", self.day_name(), hour, m, suffix),
        }
    }

    /// Scheduled review instant in the Sunday-anchored week containing `date`.
    pub fn scheduled_at(&self, date: NaiveDate) -> DateTime<Utc> {
        let day = week_start(date) + Duration::days(i64::from(self.review_day % 7));
        day.and_time(self.review_time).and_utc()
    }
}

mod hh_mm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&time.format("%H:%M").to_string())
    }

    /// Accepts `HH:MM` and `HH:MM:SS`.
    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveTime::parse_from_str(&raw, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M:%S"))
            .map_err(serde::de::Error::custom)
    }
}
