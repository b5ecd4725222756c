//! Departure filtering.
//!
//! A departure is kept or dropped; nothing is ranked. Upstream order is
//! preserved.

use crate::hafas::RawDeparture;

use super::config::DepartureFilter;

impl DepartureFilter {
    /// Whether a departure belongs to this direction.
    ///
    /// Depends only on destination name, direction text, line name and
    /// line mode.
    pub fn keeps(&self, departure: &RawDeparture) -> bool {
        if departure.line_mode() != Some(self.required_mode.as_str()) {
            return false;
        }

        self.mentions_keyword(departure) && self.lines.accepts(departure.line_name())
    }

    /// Whether the destination name or direction text contains a keyword.
    fn mentions_keyword(&self, departure: &RawDeparture) -> bool {
        let destination = departure.destination_name().map(str::to_lowercase);
        let direction = departure.direction.as_deref().map(str::to_lowercase);

        [destination, direction].iter().flatten().any(|text| {
            self.keywords
                .iter()
                .any(|keyword| text.contains(keyword.as_str()))
        })
    }

    /// Keep matching departures, in their original order.
    pub fn apply(&self, departures: Vec<RawDeparture>) -> Vec<RawDeparture> {
        departures.into_iter().filter(|d| self.keeps(d)).collect()
    }
}
