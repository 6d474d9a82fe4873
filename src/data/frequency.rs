//! Calendar frequencies used to resample price series.
//!
//! A [`Frequency`] assigns every timestamp to a bucket labelled by the end of
//! its calendar period, at midnight UTC. Weekly buckets end on an anchor
//! weekday (Sunday unless a `W-<DAY>` code says otherwise).

use crate::error::{LabelError, Result};
use chrono::{DateTime, Datelike, Days, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Frequency {
    Daily,
    /// Weeks ending on the given weekday.
    Weekly(Weekday),
    Monthly,
    Quarterly,
    Annual,
}

impl Frequency {
    pub fn code(&self) -> String {
        match self {
            Self::Daily => "D".to_string(),
            Self::Weekly(Weekday::Sun) => "W".to_string(),
            Self::Weekly(anchor) => format!("W-{}", weekday_code(*anchor)),
            Self::Monthly => "M".to_string(),
            Self::Quarterly => "Q".to_string(),
            Self::Annual => "A".to_string(),
        }
    }

    /// Label of the bucket containing `ts`: the last calendar day of its
    /// period, at midnight UTC.
    pub fn bucket_end(&self, ts: DateTime<Utc>) -> Result<DateTime<Utc>> {
        let date = ts.date_naive();
        let end = match self {
            Self::Daily => Some(date),
            Self::Weekly(anchor) => {
                let ahead = (anchor.num_days_from_monday() + 7
                    - date.weekday().num_days_from_monday())
                    % 7;
                date.checked_add_days(Days::new(u64::from(ahead)))
            }
            Self::Monthly => last_day_of_month(date.year(), date.month()),
            Self::Quarterly => {
                let quarter_end = (date.month() - 1) / 3 * 3 + 3;
                last_day_of_month(date.year(), quarter_end)
            }
            Self::Annual => NaiveDate::from_ymd_opt(date.year(), 12, 31),
        };

        end.and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
            .ok_or_else(|| {
                LabelError::Computation(format!(
                    "Bucket end for {} at frequency {} is out of range",
                    ts,
                    self.code()
                ))
            })
    }
}

fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
}

fn weekday_code(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "MON",
        Weekday::Tue => "TUE",
        Weekday::Wed => "WED",
        Weekday::Thu => "THU",
        Weekday::Fri => "FRI",
        Weekday::Sat => "SAT",
        Weekday::Sun => "SUN",
    }
}

fn parse_weekday(code: &str) -> Option<Weekday> {
    match code {
        "MON" => Some(Weekday::Mon),
        "TUE" => Some(Weekday::Tue),
        "WED" => Some(Weekday::Wed),
        "THU" => Some(Weekday::Thu),
        "FRI" => Some(Weekday::Fri),
        "SAT" => Some(Weekday::Sat),
        "SUN" => Some(Weekday::Sun),
        _ => None,
    }
}

impl FromStr for Frequency {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self> {
        let code = s.trim().to_ascii_uppercase();
        let freq = match code.as_str() {
            "D" | "DAILY" => Self::Daily,
            "W" | "WEEKLY" => Self::Weekly(Weekday::Sun),
            "M" | "ME" | "MONTHLY" => Self::Monthly,
            "Q" | "QE" | "QUARTERLY" => Self::Quarterly,
            "A" | "Y" | "YE" | "ANNUAL" | "YEARLY" => Self::Annual,
            other => match other.strip_prefix("W-").and_then(parse_weekday) {
                Some(anchor) => Self::Weekly(anchor),
                None => return Err(LabelError::UnsupportedFrequency(s.to_string())),
            },
        };
        Ok(freq)
    }
}

impl TryFrom<String> for Frequency {
    type Error = LabelError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Frequency> for String {
    fn from(freq: Frequency) -> Self {
        freq.code()
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code())
    }
}
