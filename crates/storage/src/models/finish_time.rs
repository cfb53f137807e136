use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A race finish time. Parsed from `H:MM:SS`, always rendered as `HH:MM:SS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FinishTime {
    hours: u64,
    minutes: u8,
    seconds: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid finish time '{0}': expected HH:MM:SS")]
pub struct FinishTimeError(pub String);

impl FinishTime {
    pub fn new(hours: u64, minutes: u8, seconds: u8) -> Result<Self, FinishTimeError> {
        if minutes >= 60 || seconds >= 60 {
            return Err(FinishTimeError(format!(
                "{}:{:02}:{:02}",
                hours, minutes, seconds
            )));
        }
        Ok(Self {
            hours,
            minutes,
            seconds,
        })
    }

    /// Parses exactly three colon-separated non-negative integers, with
    /// minutes and seconds below 60. Surrounding whitespace is ignored.
    pub fn parse(raw: &str) -> Result<Self, FinishTimeError> {
        let invalid = || FinishTimeError(raw.to_string());

        let parts: Vec<&str> = raw.trim().split(':').collect();
        let [hours, minutes, seconds] = parts.as_slice() else {
            return Err(invalid());
        };

        let hours: u64 = parse_part(hours).ok_or_else(invalid)?;
        let minutes: u8 = parse_part(minutes).ok_or_else(invalid)?;
        let seconds: u8 = parse_part(seconds).ok_or_else(invalid)?;

        Self::new(hours, minutes, seconds).map_err(|_| invalid())
    }

    pub fn is_valid(raw: &str) -> bool {
        Self::parse(raw).is_ok()
    }

    /// Saturates at `u64::MAX` for absurd hour counts.
    pub fn total_seconds(&self) -> u64 {
        self.hours
            .saturating_mul(3600)
            .saturating_add(u64::from(self.minutes) * 60 + u64::from(self.seconds))
    }
}

// Digits only, with an optional leading '+'; a sign of '-' never parses.
fn parse_part<T: FromStr>(part: &str) -> Option<T> {
    let part = part.trim();
    let digits = part.strip_prefix('+').unwrap_or(part);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

impl fmt::Display for FinishTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

impl FromStr for FinishTime {
    type Err = FinishTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for FinishTime {
    type Error = FinishTimeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<FinishTime> for String {
    fn from(time: FinishTime) -> Self {
        time.to_string()
    }
}

impl PartialOrd for FinishTime {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FinishTime {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.hours, self.minutes, self.seconds).cmp(&(other.hours, other.minutes, other.seconds))
    }
}
