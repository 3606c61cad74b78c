use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Starting label of a one-hour bookable window, e.g. `09:00`.
///
/// Labels are ordered chronologically and serialize as their `HH:MM` string
/// form, which is also how the stored appointment-time field begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotLabel {
    hour: u8,
    minute: u8,
}

impl SlotLabel {
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self { hour, minute })
        } else {
            None
        }
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }
}

impl fmt::Display for SlotLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid slot label: {0:?}")]
pub struct ParseSlotLabelError(String);

impl FromStr for SlotLabel {
    type Err = ParseSlotLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseSlotLabelError(s.to_string());
        let (h, m) = s.split_once(':').ok_or_else(err)?;
        if h.len() != 2 || m.len() != 2 {
            return Err(err());
        }
        let hour: u8 = h.parse().map_err(|_| err())?;
        let minute: u8 = m.parse().map_err(|_| err())?;
        SlotLabel::new(hour, minute).ok_or_else(err)
    }
}

impl Serialize for SlotLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SlotLabel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// The fixed, ordered list of slots ever offered.
///
/// Defined once at application start (optionally from the `SLOT_CATALOG`
/// environment variable) and never derived from booking data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotCatalog {
    labels: Vec<SlotLabel>,
}

impl SlotCatalog {
    pub fn new(labels: Vec<SlotLabel>) -> Self {
        Self { labels }
    }

    /// Morning pickup slots. The dealership takes no same-day appointments
    /// after noon, so the standard catalog ends at 11:00.
    pub fn standard() -> Self {
        let labels = (8..=11).map(|hour| SlotLabel { hour, minute: 0 }).collect();
        Self { labels }
    }

    /// Parses a comma-separated list of `HH:MM` labels.
    pub fn parse(raw: &str) -> Result<Self, ParseSlotLabelError> {
        let labels = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(SlotLabel::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { labels })
    }

    pub fn contains(&self, label: &SlotLabel) -> bool {
        self.labels.contains(label)
    }

    pub fn labels(&self) -> &[SlotLabel] {
        &self.labels
    }

    pub fn iter(&self) -> impl Iterator<Item = &SlotLabel> {
        self.labels.iter()
    }
}
