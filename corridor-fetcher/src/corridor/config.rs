//! Corridor configuration.
//!
//! Everything that encodes knowledge about the physical Bad Vöslau ↔ Wien
//! Hauptbahnhof corridor lives here as data: search queries, station name
//! predicates, fallback stations, destination keywords and the line
//! allow-list. The filtering and resolution logic never mentions a station
//! by name.

use std::fmt;

use regex::Regex;

use crate::domain::Station;

/// Error returned when a line pattern is not a valid regular expression.
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid line pattern {pattern:?}: {message}")]
pub struct InvalidLinePattern {
    pattern: String,
    message: String,
}

/// Which of the two corridor pipelines a configuration belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Bad Vöslau → Wien Hauptbahnhof.
    Outbound,
    /// Wien Hauptbahnhof → Bad Vöslau.
    Inbound,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Outbound => f.write_str("outbound"),
            Direction::Inbound => f.write_str("inbound"),
        }
    }
}

/// What to do when no search candidate satisfies the name predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackPolicy {
    /// Take the first usable candidate; fail if there is none.
    FirstCandidate,
    /// Use this station whenever the search yields no match.
    Fixed(Station),
}

/// How to find a direction's departure station.
#[derive(Debug, Clone)]
pub struct StationQuery {
    /// Free-text search query.
    pub query: String,

    /// How many candidates to ask the search for.
    pub results: u8,

    /// Lowercase substrings, any of which identifies the wanted station.
    pub name_matches: Vec<String>,

    /// Policy when nothing matches.
    pub fallback: FallbackPolicy,
}

/// A single entry of a line allow-list.
#[derive(Debug, Clone)]
pub enum LinePattern {
    /// Line name contains this substring.
    Contains(String),
    /// Line name matches this regular expression.
    Regex(Regex),
}

impl LinePattern {
    /// Compile a regex pattern.
    pub fn regex(pattern: &str) -> Result<Self, InvalidLinePattern> {
        Regex::new(pattern)
            .map(LinePattern::Regex)
            .map_err(|e| InvalidLinePattern {
                pattern: pattern.to_string(),
                message: e.to_string(),
            })
    }

    /// Substring pattern.
    pub fn contains(substring: impl Into<String>) -> Self {
        LinePattern::Contains(substring.into())
    }

    /// Whether a line name satisfies this pattern.
    pub fn matches(&self, line_name: &str) -> bool {
        match self {
            LinePattern::Contains(substring) => line_name.contains(substring.as_str()),
            LinePattern::Regex(regex) => regex.is_match(line_name),
        }
    }
}

/// Restriction on which lines a direction accepts.
#[derive(Debug, Clone)]
pub enum LineRestriction {
    /// Every line is accepted.
    Any,
    /// Only lines matching one of the patterns.
    AllowList(Vec<LinePattern>),
}

impl LineRestriction {
    /// Whether a (possibly missing) line name is accepted.
    pub fn accepts(&self, line_name: Option<&str>) -> bool {
        match self {
            LineRestriction::Any => true,
            LineRestriction::AllowList(patterns) => {
                line_name.is_some_and(|name| patterns.iter().any(|p| p.matches(name)))
            }
        }
    }
}

/// Keep/drop rules for one direction's departures.
#[derive(Debug, Clone)]
pub struct DepartureFilter {
    /// Required `line.mode` value.
    pub required_mode: String,

    /// Lowercase keywords matched against destination name and direction.
    pub keywords: Vec<String>,

    /// Line name restriction.
    pub lines: LineRestriction,
}

/// Full configuration of one corridor direction.
#[derive(Debug, Clone)]
pub struct DirectionConfig {
    /// Which pipeline this is.
    pub direction: Direction,

    /// Target label written into every output record.
    pub label: String,

    /// Departure station lookup.
    pub station: StationQuery,

    /// Departure filter.
    pub filter: DepartureFilter,
}

/// Both directions of the corridor.
#[derive(Debug, Clone)]
pub struct CorridorConfig {
    pub outbound: DirectionConfig,
    pub inbound: DirectionConfig,
}

/// Mode value HAFAS uses for rail services.
const TRAIN_MODE: &str = "train";

/// Vienna stations a Bad Vöslau departure can be heading to.
const VIENNA_KEYWORDS: &[&str] = &[
    "wien hbf",
    "wien hauptbahnhof",
    "wien meidling",
    "wien praterstern",
    "wien floridsdorf",
    "wien mitte",
    "wien westbahnhof",
    "vienna",
];

/// Destinations south of Vienna whose trains pass Bad Vöslau.
const HUB_KEYWORDS: &[&str] = &["wiener neustadt", "baden", "bad vöslau", "leobersdorf"];

/// Line codes serving Bad Vöslau from Wien Hbf.
const INBOUND_LINE_PATTERNS: &[&str] = &[r"^REX\s?3\b", r"^R\s?3\b"];

fn lowercase_all(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_lowercase()).collect()
}

impl CorridorConfig {
    /// The Bad Vöslau ↔ Wien Hauptbahnhof corridor.
    pub fn bad_voeslau_wien() -> Result<Self, InvalidLinePattern> {
        let inbound_lines = INBOUND_LINE_PATTERNS
            .iter()
            .map(|p| LinePattern::regex(p))
            .collect::<Result<Vec<_>, _>>()?;

        let outbound = DirectionConfig {
            direction: Direction::Outbound,
            label: "Wien Hauptbahnhof".to_string(),
            station: StationQuery {
                query: "Bad Vöslau".to_string(),
                results: 5,
                name_matches: lowercase_all(&["bad vöslau"]),
                fallback: FallbackPolicy::FirstCandidate,
            },
            filter: DepartureFilter {
                required_mode: TRAIN_MODE.to_string(),
                keywords: lowercase_all(VIENNA_KEYWORDS),
                lines: LineRestriction::Any,
            },
        };

        let inbound = DirectionConfig {
            direction: Direction::Inbound,
            label: "Bad Vöslau".to_string(),
            station: StationQuery {
                query: "Wien Hauptbahnhof".to_string(),
                results: 5,
                name_matches: lowercase_all(&["wien hbf", "wien hauptbahnhof"]),
                fallback: FallbackPolicy::Fixed(Station::new("1291501", "Wien Hauptbahnhof")),
            },
            filter: DepartureFilter {
                required_mode: TRAIN_MODE.to_string(),
                keywords: lowercase_all(HUB_KEYWORDS),
                lines: LineRestriction::AllowList(inbound_lines),
            },
        };

        Ok(Self { outbound, inbound })
    }

    /// Configuration for a direction.
    pub fn direction(&self, direction: Direction) -> &DirectionConfig {
        match direction {
            Direction::Outbound => &self.outbound,
            Direction::Inbound => &self.inbound,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corridor() -> CorridorConfig {
        CorridorConfig::bad_voeslau_wien().unwrap()
    }

    #[test]
    fn default_corridor_builds() {
        let config = corridor();
        assert_eq!(config.outbound.direction, Direction::Outbound);
        assert_eq!(config.inbound.direction, Direction::Inbound);
        assert_eq!(config.outbound.label, "Wien Hauptbahnhof");
        assert_eq!(config.inbound.label, "Bad Vöslau");
    }

    #[test]
    fn outbound_uses_first_candidate_fallback() {
        let config = corridor();
        assert_eq!(config.outbound.station.fallback, FallbackPolicy::FirstCandidate);
        assert!(matches!(config.outbound.filter.lines, LineRestriction::Any));
    }

    #[test]
    fn inbound_uses_fixed_fallback() {
        let config = corridor();
        assert_eq!(
            config.inbound.station.fallback,
            FallbackPolicy::Fixed(Station::new("1291501", "Wien Hauptbahnhof"))
        );
    }

    #[test]
    fn keywords_are_lowercase() {
        let config = corridor();
        for keyword in config
            .outbound
            .filter
            .keywords
            .iter()
            .chain(&config.inbound.filter.keywords)
        {
            assert_eq!(keyword, &keyword.to_lowercase());
        }
    }

    #[test]
    fn direction_lookup() {
        let config = corridor();
        assert_eq!(config.direction(Direction::Inbound).label, "Bad Vöslau");
        assert_eq!(Direction::Outbound.to_string(), "outbound");
    }

    #[test]
    fn inbound_allow_list() {
        let config = corridor();
        let lines = &config.inbound.filter.lines;
        assert!(lines.accepts(Some("REX 3")));
        assert!(lines.accepts(Some("REX3")));
        assert!(lines.accepts(Some("R 3")));
        assert!(!lines.accepts(Some("REX 30")));
        assert!(!lines.accepts(Some("S 1")));
        assert!(!lines.accepts(Some("RJX 860")));
        assert!(!lines.accepts(None));
    }

    #[test]
    fn contains_pattern() {
        let pattern = LinePattern::contains("CJX");
        assert!(pattern.matches("CJX 9"));
        assert!(!pattern.matches("REX 3"));
    }

    #[test]
    fn invalid_regex_is_rejected() {
        let err = LinePattern::regex("^REX(").unwrap_err();
        assert!(err.to_string().contains("^REX("));
    }

    #[test]
    fn any_accepts_missing_line() {
        assert!(LineRestriction::Any.accepts(None));
    }
}
