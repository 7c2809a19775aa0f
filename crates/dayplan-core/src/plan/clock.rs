//! Wall-clock time as minutes since midnight.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Minutes since midnight (always in `0..1440`).
///
/// Parsed from an `HH:MM` string with hours 0-23 and minutes 0-59.
/// A single-digit hour ("7:30") is accepted; the minute part must be
/// two digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    pub const MINUTES_PER_DAY: i64 = 1440;

    /// Build from a raw minute count. Values outside `0..1440` are rejected.
    pub fn from_minutes(minutes: i64) -> Result<Self, ValidationError> {
        if (0..Self::MINUTES_PER_DAY).contains(&minutes) {
            Ok(Self(minutes as u16))
        } else {
            Err(ValidationError::InvalidValue {
                field: "minutes".to_string(),
                message: format!("{minutes} is outside 0..1440"),
            })
        }
    }

    /// Minutes since midnight as a signed value for interval arithmetic.
    pub fn minutes(self) -> i64 {
        i64::from(self.0)
    }

    pub fn hour(self) -> u16 {
        self.0 / 60
    }

    pub fn minute(self) -> u16 {
        self.0 % 60
    }
}

impl FromStr for TimeOfDay {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidTimeFormat {
            input: s.to_string(),
        };

        let (hours_part, minutes_part) = s.split_once(':').ok_or_else(invalid)?;

        let digits = |part: &str, max_len: usize| {
            (!part.is_empty()
                && part.len() <= max_len
                && part.bytes().all(|b| b.is_ascii_digit()))
            .then(|| part.parse::<u16>().ok())
            .flatten()
        };

        let hours = digits(hours_part, 2).ok_or_else(invalid)?;
        let minutes = match minutes_part.len() {
            2 => digits(minutes_part, 2).ok_or_else(invalid)?,
            _ => return Err(invalid()),
        };

        if hours > 23 || minutes > 59 {
            return Err(invalid());
        }

        Ok(Self(hours * 60 + minutes))
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// Parse an `HH:MM` string into minutes since midnight.
pub fn to_minutes(time: &str) -> Result<i64, ValidationError> {
    time.parse::<TimeOfDay>().map(TimeOfDay::minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_times() {
        assert_eq!(to_minutes("00:00").unwrap(), 0);
        assert_eq!(to_minutes("05:00").unwrap(), 300);
        assert_eq!(to_minutes("23:59").unwrap(), 1439);
        assert_eq!(to_minutes("7:30").unwrap(), 450);
    }

    #[test]
    fn rejects_malformed_times() {
        for input in ["", "12", "24:00", "12:60", "12:5", "ab:cd", "12:34:56", "-1:00", " 12:00"] {
            let err = to_minutes(input).unwrap_err();
            assert!(
                matches!(err, ValidationError::InvalidTimeFormat { .. }),
                "expected InvalidTimeFormat for {input:?}, got {err:?}"
            );
        }
    }

    #[test]
    fn displays_zero_padded() {
        let t: TimeOfDay = "7:05".parse().unwrap();
        assert_eq!(t.to_string(), "07:05");
    }

    #[test]
    fn from_minutes_bounds() {
        assert!(TimeOfDay::from_minutes(0).is_ok());
        assert!(TimeOfDay::from_minutes(1439).is_ok());
        assert!(TimeOfDay::from_minutes(1440).is_err());
        assert!(TimeOfDay::from_minutes(-1).is_err());
    }
}
