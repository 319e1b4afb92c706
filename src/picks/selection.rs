use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PickParseError {
    #[error("empty selection")]
    Empty,

    #[error("missing team name in '{0}'")]
    MissingTeam(String),

    #[error("invalid line in '{0}'")]
    InvalidLine(String),

    #[error("unrecognized selection format: '{0}'")]
    UnknownFormat(String),
}

/// Which side of a posted total a selection takes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TotalSide {
    Over,
    Under,
}

impl TotalSide {
    fn marker(&self) -> char {
        match self {
            TotalSide::Over => 'o',
            TotalSide::Under => 'u',
        }
    }
}

/// A team taken against a signed point spread, e.g. `Chiefs (-3.0)`
#[derive(Debug, Clone, PartialEq)]
pub struct SpreadPick {
    pub team: String,
    pub line: f64,
}

/// A game's combined score taken over or under a posted line, e.g. `Chiefs vs Bills o47.5`
#[derive(Debug, Clone, PartialEq)]
pub struct TotalPick {
    pub team_a: String,
    pub team_b: String,
    pub side: TotalSide,
    pub line: f64,
}

impl TotalPick {
    /// True when this pick refers to the game between `home` and `away`, in either order
    pub fn involves(&self, home: &str, away: &str) -> bool {
        (self.team_a == home && self.team_b == away) || (self.team_a == away && self.team_b == home)
    }
}

/// A parsed pick value. Anything that fails to parse is kept verbatim as `Unparsed`
/// so one bad record never blocks ingestion of the rest of a week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PickSelection {
    Spread(SpreadPick),
    Total(TotalPick),
    Unparsed(String),
}

impl PickSelection {
    pub fn parse(raw: &str) -> Result<Self, PickParseError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(PickParseError::Empty);
        }

        if raw.ends_with(')') {
            parse_spread(raw).map(PickSelection::Spread)
        } else if raw.contains(" vs ") {
            parse_total(raw).map(PickSelection::Total)
        } else {
            Err(PickParseError::UnknownFormat(raw.to_string()))
        }
    }

    pub fn as_spread(&self) -> Option<&SpreadPick> {
        match self {
            PickSelection::Spread(spread) => Some(spread),
            _ => None,
        }
    }

    pub fn as_total(&self) -> Option<&TotalPick> {
        match self {
            PickSelection::Total(total) => Some(total),
            _ => None,
        }
    }
}

fn parse_spread(raw: &str) -> Result<SpreadPick, PickParseError> {
    let open = raw
        .rfind(" (")
        .ok_or_else(|| PickParseError::UnknownFormat(raw.to_string()))?;

    let team = raw[..open].trim();
    if team.is_empty() {
        return Err(PickParseError::MissingTeam(raw.to_string()));
    }

    let line_str = &raw[open + 2..raw.len() - 1];
    let line = parse_line(line_str).ok_or_else(|| PickParseError::InvalidLine(raw.to_string()))?;

    Ok(SpreadPick {
        team: team.to_string(),
        line,
    })
}

fn parse_total(raw: &str) -> Result<TotalPick, PickParseError> {
    let split = raw
        .rfind(' ')
        .ok_or_else(|| PickParseError::UnknownFormat(raw.to_string()))?;
    let (teams, suffix) = (&raw[..split], raw[split + 1..].trim());

    let side = match suffix.chars().next() {
        Some('o') => TotalSide::Over,
        Some('u') => TotalSide::Under,
        _ => return Err(PickParseError::UnknownFormat(raw.to_string())),
    };
    let line =
        parse_line(&suffix[1..]).ok_or_else(|| PickParseError::InvalidLine(raw.to_string()))?;

    let (team_a, team_b) = teams
        .split_once(" vs ")
        .map(|(a, b)| (a.trim(), b.trim()))
        .ok_or_else(|| PickParseError::UnknownFormat(raw.to_string()))?;
    if team_a.is_empty() || team_b.is_empty() {
        return Err(PickParseError::MissingTeam(raw.to_string()));
    }

    Ok(TotalPick {
        team_a: team_a.to_string(),
        team_b: team_b.to_string(),
        side,
        line,
    })
}

fn parse_line(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|line| line.is_finite())
}

impl From<String> for PickSelection {
    fn from(raw: String) -> Self {
        PickSelection::parse(&raw).unwrap_or(PickSelection::Unparsed(raw))
    }
}

impl From<PickSelection> for String {
    fn from(selection: PickSelection) -> Self {
        selection.to_string()
    }
}

impl fmt::Display for PickSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PickSelection::Spread(spread) => write!(f, "{} ({:+.1})", spread.team, spread.line),
            PickSelection::Total(total) => write!(
                f,
                "{} vs {} {}{:.1}",
                total.team_a,
                total.team_b,
                total.side.marker(),
                total.line
            ),
            PickSelection::Unparsed(raw) => write!(f, "{}", raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Chiefs (-3.0)", "Chiefs", -3.0)]
    #[case("Bills (+7.0)", "Bills", 7.0)]
    #[case("San Francisco 49ers (-6.5)", "San Francisco 49ers", -6.5)]
    #[case("Jets (0)", "Jets", 0.0)]
    fn parses_spread_selections(#[case] raw: &str, #[case] team: &str, #[case] line: f64) {
        let selection = PickSelection::parse(raw).unwrap();
        let spread = selection.as_spread().expect("spread selection");
        assert_eq!(spread.team, team);
        assert_eq!(spread.line, line);
    }

    #[rstest]
    #[case("Chiefs vs Bills o47.5", TotalSide::Over, 47.5)]
    #[case("Chiefs vs Bills u51", TotalSide::Under, 51.0)]
    fn parses_total_selections(#[case] raw: &str, #[case] side: TotalSide, #[case] line: f64) {
        let selection = PickSelection::parse(raw).unwrap();
        let total = selection.as_total().expect("total selection");
        assert_eq!(total.team_a, "Chiefs");
        assert_eq!(total.team_b, "Bills");
        assert_eq!(total.side, side);
        assert_eq!(total.line, line);
    }

    #[rstest]
    #[case("")]
    #[case("Chiefs")]
    #[case("Chiefs (abc)")]
    #[case(" (-3.0)")]
    #[case("Chiefs vs Bills x47.5")]
    #[case("Chiefs vs Bills o")]
    #[case("Chiefs vs  o47.5")]
    fn rejects_malformed_selections(#[case] raw: &str) {
        assert!(PickSelection::parse(raw).is_err());
    }

    #[test]
    fn malformed_strings_are_kept_as_unparsed() {
        let selection = PickSelection::from("Chiefs minus three".to_string());
        assert_eq!(
            selection,
            PickSelection::Unparsed("Chiefs minus three".to_string())
        );
        assert_eq!(selection.to_string(), "Chiefs minus three");
    }

    #[test]
    fn display_renders_canonical_form() {
        let spread = PickSelection::parse("Bills (+7)").unwrap();
        assert_eq!(spread.to_string(), "Bills (+7.0)");

        let total = PickSelection::parse("Chiefs vs Bills u47.5").unwrap();
        assert_eq!(total.to_string(), "Chiefs vs Bills u47.5");
    }

    #[test]
    fn total_matches_game_in_either_order() {
        let selection = PickSelection::parse("Chiefs vs Bills o47.5").unwrap();
        let total = selection.as_total().unwrap();
        assert!(total.involves("Chiefs", "Bills"));
        assert!(total.involves("Bills", "Chiefs"));
        assert!(!total.involves("Chiefs", "Jets"));
    }

    #[test]
    fn serde_uses_string_form() {
        let selection: PickSelection = serde_json::from_str("\"Chiefs (-3.0)\"").unwrap();
        assert!(selection.as_spread().is_some());

        let json = serde_json::to_string(&selection).unwrap();
        assert_eq!(json, "\"Chiefs (-3.0)\"");
    }
}
