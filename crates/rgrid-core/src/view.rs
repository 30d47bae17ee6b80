//! Calendar view names used as drilldown targets.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Calendar views a date label can drill down into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Month,
    Week,
    WorkWeek,
    Day,
    Agenda,
}

impl View {
    /// String form used in config files and on the command line.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Month => "month",
            Self::Week => "week",
            Self::WorkWeek => "work_week",
            Self::Day => "day",
            Self::Agenda => "agenda",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for View {
    type Err = UnknownView;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "month" => Ok(Self::Month),
            "week" => Ok(Self::Week),
            "work_week" | "work-week" => Ok(Self::WorkWeek),
            "day" => Ok(Self::Day),
            "agenda" => Ok(Self::Agenda),
            _ => Err(UnknownView(s.to_string())),
        }
    }
}

impl Serialize for View {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for View {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Error type for unknown view names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown view: {0}")]
pub struct UnknownView(String);
