//! UTC instants.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A point in time. Serializes as RFC 3339.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    pub fn now() -> Self {
        Self(Utc::now())
    }

    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// UTC calendar day; week and streak math keys off this.
    pub fn date(&self) -> NaiveDate {
        self.0.date_naive()
    }

    pub fn plus_secs(&self, secs: i64) -> Self {
        Self(self.0 + Duration::seconds(secs))
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn late_evening_stays_on_the_utc_day() {
        let ts = Timestamp::from(Utc.with_ymd_and_hms(2024, 12, 28, 23, 59, 0).unwrap());
        assert_eq!(ts.date(), NaiveDate::from_ymd_opt(2024, 12, 28).unwrap());
        assert_eq!(
            ts.plus_secs(60).date(),
            NaiveDate::from_ymd_opt(2024, 12, 29).unwrap()
        );
    }

    #[test]
    fn orders_chronologically() {
        let start = Timestamp::now();
        assert!(start < start.plus_secs(1));
        assert_eq!(start.plus_secs(0), start);
    }

    #[test]
    fn serializes_as_rfc3339() {
        let ts: Timestamp = serde_json::from_str("\"2024-01-15T10:30:00Z\"").unwrap();
        assert_eq!(ts.date(), NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(
            serde_json::to_string(&ts).unwrap(),
            "\"2024-01-15T10:30:00Z\""
        );
    }
}
