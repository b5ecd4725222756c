//! Resolved station type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A station resolved against the timetable source.
///
/// # Examples
///
/// ```
/// use corridor_fetcher::domain::Station;
///
/// let hbf = Station::new("1291501", "Wien Hauptbahnhof");
/// assert_eq!(hbf.to_string(), "Wien Hauptbahnhof (1291501)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Station {
    /// HAFAS station id.
    pub id: String,
    /// Human-readable name as returned by the search.
    pub name: String,
}

impl Station {
    /// Create a new station from its id and name.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}
