//! Calendar periods that insights are aggregated over.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Timeframe {
    #[default]
    Monthly,
    Quarterly,
    Yearly,
}

/// An inclusive date range with a display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Period {
    pub timeframe: Timeframe,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub label: String,
}

impl Period {
    /// The period of the given kind that contains `anchor`.
    pub fn containing(timeframe: Timeframe, anchor: NaiveDate) -> Self {
        let year = anchor.year();
        let (start, next_start, label) = match timeframe {
            Timeframe::Monthly => {
                let start = first_of(year, anchor.month());
                let next = add_months(start, 1);
                (start, next, start.format("%B %Y").to_string())
            }
            Timeframe::Quarterly => {
                let quarter = (anchor.month() - 1) / 3;
                let start = first_of(year, quarter * 3 + 1);
                let next = add_months(start, 3);
                (start, next, format!("Q{} {}", quarter + 1, year))
            }
            Timeframe::Yearly => {
                let start = first_of(year, 1);
                let next = first_of(year + 1, 1);
                (start, next, year.to_string())
            }
        };
        Self {
            timeframe,
            start,
            end: next_start - Duration::days(1),
            label,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn previous(&self) -> Self {
        Self::containing(self.timeframe, self.start - Duration::days(1))
    }

    pub fn next(&self) -> Self {
        Self::containing(self.timeframe, self.end + Duration::days(1))
    }
}

fn first_of(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MIN)
}

fn add_months(first: NaiveDate, months: u32) -> NaiveDate {
    let zero_based = first.month0() + months;
    first_of(first.year() + (zero_based / 12) as i32, zero_based % 12 + 1)
}
