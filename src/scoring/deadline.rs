use chrono::{
    DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone,
};
use tracing::warn;

/// Accepted layouts for submission timestamps that carry no offset
const LOCAL_TIMESTAMP_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Weekly pick deadline: Thursday night kickoff of each season week.
///
/// Week 1 starts on the anchor date of the season year; each later week starts seven
/// days after the previous one. The deadline is the first Thursday on or after the week
/// start, at `deadline_time` in the league's UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeasonCalendar {
    pub anchor_month: u32,
    pub anchor_day: u32,
    pub deadline_time: NaiveTime,
    pub utc_offset: FixedOffset,
}

impl Default for SeasonCalendar {
    fn default() -> Self {
        Self {
            anchor_month: 9,
            anchor_day: 5,
            deadline_time: NaiveTime::from_hms_opt(20, 15, 0).expect("20:15 is a valid time"),
            utc_offset: FixedOffset::west_opt(4 * 3600).expect("UTC-04:00 is a valid offset"),
        }
    }
}

impl SeasonCalendar {
    pub fn week_start(&self, week: u32, year: i32) -> Option<NaiveDate> {
        let anchor = NaiveDate::from_ymd_opt(year, self.anchor_month, self.anchor_day)?;
        anchor.checked_add_signed(Duration::weeks(i64::from(week.saturating_sub(1))))
    }

    pub fn deadline(&self, week: u32, year: i32) -> Option<DateTime<FixedOffset>> {
        let start = self.week_start(week, year)?;
        let days_to_thursday =
            (3 - i64::from(start.weekday().num_days_from_monday())).rem_euclid(7);
        let thursday = start.checked_add_signed(Duration::days(days_to_thursday))?;

        self.utc_offset
            .from_local_datetime(&thursday.and_time(self.deadline_time))
            .single()
    }

    /// Parses an ISO-8601 timestamp; offset-less values are read as league-local time
    pub fn parse_submission(&self, raw: &str) -> Option<DateTime<FixedOffset>> {
        let raw = raw.trim();
        if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
            return Some(instant);
        }

        LOCAL_TIMESTAMP_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
            .and_then(|local| self.utc_offset.from_local_datetime(&local).single())
    }

    /// True iff the submission is strictly after the week's deadline. Missing or
    /// unreadable timestamps count as on time.
    pub fn is_late(&self, submission_time: Option<&str>, week: u32, year: i32) -> bool {
        let Some(raw) = submission_time else {
            return false;
        };

        let Some(submitted) = self.parse_submission(raw) else {
            warn!(
                submission_time = raw,
                week,
                year,
                "Unreadable submission time, treating as on time"
            );
            return false;
        };

        match self.deadline(week, year) {
            Some(deadline) => submitted > deadline,
            None => false,
        }
    }
}
