use chrono::{FixedOffset, NaiveDate, NaiveTime};
use thiserror::Error;

use crate::scoring::SeasonCalendar;

pub const SEASON_ANCHOR_VAR: &str = "PICKEM_SEASON_ANCHOR";
pub const DEADLINE_VAR: &str = "PICKEM_DEADLINE";
pub const UTC_OFFSET_VAR: &str = "PICKEM_UTC_OFFSET";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{var} must be a MM-DD date, got '{value}'")]
    InvalidAnchor { var: &'static str, value: String },

    #[error("{var} must be an HH:MM time, got '{value}'")]
    InvalidDeadline { var: &'static str, value: String },

    #[error("{var} must be an offset like -04:00, got '{value}'")]
    InvalidOffset { var: &'static str, value: String },
}

/// League settings read from the environment. Unset variables keep the defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LeagueConfig {
    pub calendar: SeasonCalendar,
}

impl LeagueConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut calendar = SeasonCalendar::default();

        if let Some(value) = lookup(SEASON_ANCHOR_VAR) {
            let (month, day) =
                parse_anchor(value.trim()).ok_or_else(|| ConfigError::InvalidAnchor {
                    var: SEASON_ANCHOR_VAR,
                    value: value.clone(),
                })?;
            calendar.anchor_month = month;
            calendar.anchor_day = day;
        }

        if let Some(value) = lookup(DEADLINE_VAR) {
            calendar.deadline_time = NaiveTime::parse_from_str(value.trim(), "%H:%M")
                .map_err(|_| ConfigError::InvalidDeadline {
                    var: DEADLINE_VAR,
                    value: value.clone(),
                })?;
        }

        if let Some(value) = lookup(UTC_OFFSET_VAR) {
            calendar.utc_offset =
                parse_offset(value.trim()).ok_or_else(|| ConfigError::InvalidOffset {
                    var: UTC_OFFSET_VAR,
                    value: value.clone(),
                })?;
        }

        Ok(Self { calendar })
    }
}

fn parse_anchor(value: &str) -> Option<(u32, u32)> {
    let (month, day) = value.split_once('-')?;
    let month: u32 = month.parse().ok()?;
    let day: u32 = day.parse().ok()?;
    // leap year so Feb 29 passes; the season year decides later whether the date exists
    NaiveDate::from_ymd_opt(2000, month, day)?;
    Some((month, day))
}

fn parse_offset(value: &str) -> Option<FixedOffset> {
    let sign = match value.chars().next()? {
        '+' => 1,
        '-' => -1,
        _ => return None,
    };
    let (hours, minutes) = value[1..].split_once(':')?;
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if !(0..60).contains(&minutes) {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}
