//! Inclusive observation time windows

use crate::ValidationError;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Inclusive `[start, end]` range of observation times; either side may be open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "WindowRepr", into = "WindowRepr")]
pub struct TimeWindow {
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
}

impl TimeWindow {
    /// A window admitting every observation
    pub const fn unbounded() -> Self {
        Self {
            start: None,
            end: None,
        }
    }

    /// Create a window, rejecting `start > end`
    pub fn new(
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<Self, ValidationError> {
        if let (Some(s), Some(e)) = (start, end)
            && s > e
        {
            return Err(ValidationError::InvalidWindow { start: s, end: e });
        }
        Ok(Self { start, end })
    }

    pub const fn since(start: DateTime<Utc>) -> Self {
        Self {
            start: Some(start),
            end: None,
        }
    }

    pub const fn until(end: DateTime<Utc>) -> Self {
        Self {
            start: None,
            end: Some(end),
        }
    }

    pub const fn start(&self) -> Option<DateTime<Utc>> {
        self.start
    }

    pub const fn end(&self) -> Option<DateTime<Utc>> {
        self.end
    }

    pub const fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Check if `at` falls inside the window; both bounds are inclusive
    pub fn contains(&self, at: &DateTime<Utc>) -> bool {
        self.start.is_none_or(|s| s <= *at) && self.end.is_none_or(|e| *at <= e)
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = |t: Option<DateTime<Utc>>| {
            t.map(|t| t.to_rfc3339_opts(SecondsFormat::AutoSi, true))
                .unwrap_or_else(|| "..".to_string())
        };
        write!(f, "[{}, {}]", side(self.start), side(self.end))
    }
}

#[derive(Serialize, Deserialize)]
struct WindowRepr {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    start: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    end: Option<DateTime<Utc>>,
}

impl TryFrom<WindowRepr> for TimeWindow {
    type Error = ValidationError;

    fn try_from(repr: WindowRepr) -> Result<Self, Self::Error> {
        Self::new(repr.start, repr.end)
    }
}

impl From<TimeWindow> for WindowRepr {
    fn from(window: TimeWindow) -> Self {
        Self {
            start: window.start,
            end: window.end,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let window = TimeWindow::new(Some(day(2)), Some(day(4))).unwrap();
        assert!(!window.contains(&day(1)));
        assert!(window.contains(&day(2)));
        assert!(window.contains(&day(4)));
        assert!(!window.contains(&day(5)));
    }

    #[test]
    fn test_open_sides() {
        assert!(TimeWindow::since(day(3)).contains(&day(30)));
        assert!(!TimeWindow::until(day(3)).contains(&day(4)));
        assert!(TimeWindow::unbounded().contains(&day(1)));
        assert!(TimeWindow::default().is_unbounded());
    }

    #[test]
    fn test_reversed_window_rejected() {
        let err = TimeWindow::new(Some(day(5)), Some(day(1))).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidWindow { .. }));

        let json = serde_json::json!({"start": "2024-01-05T00:00:00Z", "end": "2024-01-01T00:00:00Z"});
        assert!(serde_json::from_value::<TimeWindow>(json).is_err());
    }
}
