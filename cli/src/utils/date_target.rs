use std::fmt;
use std::str::FromStr;

use chrono::{Days, Local, NaiveDate};

/// Human-friendly day or day-range for the creation-date filter
#[derive(Debug, Clone, PartialEq)]
pub enum DateTarget {
    Today,
    Yesterday,
    LastWeek,
    LastMonth,
    Specific(NaiveDate),
}

impl DateTarget {
    /// Convert to an inclusive (start, end) calendar-day range
    pub fn to_range(&self) -> (NaiveDate, NaiveDate) {
        let today = Local::now().date_naive();

        match self {
            DateTarget::Today => (today, today),
            DateTarget::Yesterday => {
                let yesterday = today.pred_opt().unwrap_or(today);
                (yesterday, yesterday)
            }
            DateTarget::LastWeek => {
                // Last week = 7 days ago to yesterday (inclusive)
                let end = today.pred_opt().unwrap_or(today);
                let start = today.checked_sub_days(Days::new(7)).unwrap_or(today);
                (start, end)
            }
            DateTarget::LastMonth => {
                // Last month = 30 days ago to yesterday (inclusive)
                let end = today.pred_opt().unwrap_or(today);
                let start = today.checked_sub_days(Days::new(30)).unwrap_or(today);
                (start, end)
            }
            DateTarget::Specific(date) => (*date, *date),
        }
    }
}

impl FromStr for DateTarget {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "today" => Ok(Self::Today),
            "yesterday" => Ok(Self::Yesterday),
            "last week" => Ok(Self::LastWeek),
            "last month" => Ok(Self::LastMonth),
            _ => match NaiveDate::parse_from_str(s, "%Y-%m-%d") {
                Ok(dt) => Ok(Self::Specific(dt)),
                Err(e) => anyhow::bail!("Invalid date target: {}", e),
            },
        }
    }
}

impl fmt::Display for DateTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateTarget::Today => write!(f, "today"),
            DateTarget::Yesterday => write!(f, "yesterday"),
            DateTarget::LastWeek => write!(f, "last week"),
            DateTarget::LastMonth => write!(f, "last month"),
            DateTarget::Specific(dt) => write!(f, "{}", dt),
        }
    }
}
