//! Miscellaneous utility structs and functions.

use std::fmt::Debug;

use cgmath::num_traits::Float;
use serde::{Deserialize, Serialize};

/// An interval on the real number line.
#[derive(Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval<T> {
    pub min: T,
    pub max: T,
}

impl<T> Interval<T> {
    /// Creates a new interval.
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }
}

impl<T: std::cmp::PartialOrd> Interval<T> {
    /// Returns true if this interval contains the value.
    pub fn contains(&self, value: T) -> bool {
        value >= self.min && value <= self.max
    }
}

impl<T: std::ops::Sub<T, Output = T> + Copy> Interval<T> {
    /// Gets the magnitude of the interval.
    pub fn length(&self) -> T {
        self.max - self.min
    }
}

impl<T: Float> Interval<T> {
    /// Creates an interval containing only the given value.
    pub fn point(value: T) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    /// Returns the centre/mid-point of the interval.
    pub fn midpoint(&self) -> T {
        T::from(0.5).unwrap() * (self.min + self.max)
    }

    /// Returns the smallest interval containing both this interval and the value.
    pub fn extend(&self, value: T) -> Self {
        Self {
            min: T::min(self.min, value),
            max: T::max(self.max, value),
        }
    }
}

impl<T: Debug> Debug for Interval<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Interval({:?}, {:?})", &self.min, &self.max)
    }
}

/// Shortens a vehicle ID to the part before its first `.`,
/// which for flow-generated vehicles is the name of the flow.
pub fn short_id(id: &str) -> &str {
    id.split('.').next().unwrap_or(id)
}

#[cfg(test)]
mod test {
    use super::{short_id, Interval};

    #[test]
    fn extend_interval() {
        let interval = Interval::point(3.0).extend(-1.0).extend(2.0);
        assert_eq!(interval, Interval::new(-1.0, 3.0));
        assert_eq!(interval.length(), 4.0);
        assert_eq!(interval.midpoint(), 1.0);
        assert!(interval.contains(0.0));
        assert!(!interval.contains(3.5));
    }

    #[test]
    fn short_ids() {
        assert_eq!(short_id("flow_north.12"), "flow_north");
        assert_eq!(short_id("veh7"), "veh7");
        assert_eq!(short_id(".5"), "");
        assert_eq!(short_id(""), "");
    }
}
