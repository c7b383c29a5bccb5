//! Record types for scraped election odds.

use std::fmt;

/// Party named by a market's leader indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Party {
    Republican,
    Democrat,
}

impl Party {
    /// Interpret the leader indicator's label.
    ///
    /// Only the exact label "Republican" maps to [`Party::Republican`];
    /// anything else is treated as the Democratic side.
    pub fn from_label(label: &str) -> Self {
        if label.trim() == "Republican" {
            Party::Republican
        } else {
            Party::Democrat
        }
    }
}

/// Odds for one race (a state or a congressional district)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RaceOdds {
    pub title: String,
    /// "<number>%" or None when extraction failed
    pub republican_pct: Option<String>,
    /// "<number>%" or None when extraction failed
    pub democrat_pct: Option<String>,
}

impl RaceOdds {
    pub fn new(
        title: impl Into<String>,
        republican_pct: Option<String>,
        democrat_pct: Option<String>,
    ) -> Self {
        Self {
            title: title.into(),
            republican_pct,
            democrat_pct,
        }
    }

    /// True when both figures were extracted
    pub fn is_complete(&self) -> bool {
        self.republican_pct.is_some() && self.democrat_pct.is_some()
    }
}

/// Progress line printed once per scraped race
impl fmt::Display for RaceOdds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Title: {}, Republican Votes: {}, Democratic Votes: {}",
            self.title,
            self.republican_pct.as_deref().unwrap_or("None"),
            self.democrat_pct.as_deref().unwrap_or("None"),
        )
    }
}
