use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use thiserror::Error;

/// Date format users type into the slash command.
pub const INPUT_FORMAT: &str = "%d.%m.%Y";
/// Date format used in chart page URLs.
pub const CHART_FORMAT: &str = "%Y-%m-%d";
/// Date format used for playlist names.
pub const PLAYLIST_FORMAT: &str = "%d %m %Y";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("bad date {0:?}, expected day.month.year")]
pub struct BadDate(pub String);

/// Calendar day of a chart, parsed from `day.month.year`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ChartDate(NaiveDate);

impl ChartDate {
    pub fn parse(input: &str) -> Result<Self, BadDate> {
        NaiveDate::parse_from_str(input.trim(), INPUT_FORMAT)
            .map(Self)
            .map_err(|_| BadDate(input.to_string()))
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// `year-month-day`, the last path segment of the chart page.
    pub fn chart_path(&self) -> String {
        self.0.format(CHART_FORMAT).to_string()
    }

    /// `day month year`, e.g. `14 06 2024`.
    pub fn playlist_name(&self) -> String {
        self.0.format(PLAYLIST_FORMAT).to_string()
    }
}

impl FromStr for ChartDate {
    type Err = BadDate;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ChartDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(INPUT_FORMAT))
    }
}
