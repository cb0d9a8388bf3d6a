//! `StartInterval`: run the job every N units.

use crate::options::OptionKey;
use crate::tree::{Node, Pair};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Second,
    Minute,
    Hour,
    Day,
    Week,
}

impl Unit {
    /// Seconds per unit.
    ///
    /// `Week` is 345600 (four days). Existing generated plists carry this
    /// value, so it is kept as is rather than changed to 604800.
    pub fn magnification(self) -> i64 {
        match self {
            Unit::Second => 1,
            Unit::Minute => 60,
            Unit::Hour => 3600,
            Unit::Day => 86400,
            Unit::Week => 345600,
        }
    }
}

/// Interval in seconds, built fluently:
/// `StartInterval::new().every(10).minute()`.
///
/// Nothing is stored until a unit is picked; each unit call replaces the
/// previous value.
#[derive(Debug, Clone, PartialEq)]
pub struct StartInterval {
    base: f64,
    magnification: i64,
    value: Option<i64>,
}

impl Default for StartInterval {
    fn default() -> Self {
        Self {
            base: 1.0,
            magnification: 1,
            value: None,
        }
    }
}

impl StartInterval {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn every(mut self, base: impl Into<f64>) -> Self {
        self.base = base.into();
        self
    }

    pub fn unit(mut self, unit: Unit) -> Self {
        self.magnification = unit.magnification();
        // Truncates toward zero.
        self.value = Some((self.base * self.magnification as f64) as i64);
        self
    }

    pub fn second(self) -> Self {
        self.unit(Unit::Second)
    }

    pub fn minute(self) -> Self {
        self.unit(Unit::Minute)
    }

    pub fn hour(self) -> Self {
        self.unit(Unit::Hour)
    }

    pub fn day(self) -> Self {
        self.unit(Unit::Day)
    }

    pub fn week(self) -> Self {
        self.unit(Unit::Week)
    }

    /// Stored interval in seconds, if a unit has been picked.
    pub fn seconds(&self) -> Option<i64> {
        self.value
    }

    pub fn serialize(&self) -> String {
        Pair::from(self.clone()).serialize()
    }
}

impl From<StartInterval> for Pair {
    fn from(interval: StartInterval) -> Self {
        Pair::new(
            OptionKey::StartInterval.as_str(),
            interval.value.map(Node::integer),
        )
    }
}
