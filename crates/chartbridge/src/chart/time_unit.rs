use chartbridge_core::{Error, Result};

use serde::Serialize;
use std::fmt;

/// Vega-Lite time units, without the `utc` prefix.
const UNITS: &[&str] = &[
    "year",
    "quarter",
    "month",
    "week",
    "day",
    "dayofyear",
    "date",
    "hours",
    "minutes",
    "seconds",
    "milliseconds",
    "yearquarter",
    "yearquartermonth",
    "yearmonth",
    "yearmonthdate",
    "yearmonthdatehours",
    "yearmonthdatehoursminutes",
    "yearmonthdatehoursminutesseconds",
    "yearweek",
    "yearweekday",
    "yearweekdayhours",
    "yearweekdayhoursminutes",
    "yearweekdayhoursminutesseconds",
    "yeardayofyear",
    "quartermonth",
    "monthdate",
    "monthdatehours",
    "monthdatehoursminutes",
    "monthdatehoursminutesseconds",
    "weekday",
    "weekdayhours",
    "weekdayhoursminutes",
    "weekdayhoursminutesseconds",
    "dayhours",
    "dayhoursminutes",
    "dayhoursminutesseconds",
    "hoursminutes",
    "hoursminutesseconds",
    "minutesseconds",
    "secondsmilliseconds",
];

/// A validated time-unit truncation for a temporal channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TimeUnit(String);

impl TimeUnit {
    pub fn parse(channel: &str, s: &str) -> Result<Self> {
        let unit = s.strip_prefix("utc").unwrap_or(s);

        if !UNITS.contains(&unit) {
            return Err(Error::encoding(format!(
                "unknown time unit `{s}` on channel `{channel}`"
            )));
        }

        Ok(TimeUnit(s.to_string()))
    }

    pub fn is_utc(&self) -> bool {
        self.0.starts_with("utc")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
