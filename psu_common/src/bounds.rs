//! Numeric range helpers.
//!
//! Shared by the drivers (channel and voltage gates) and by the panel state
//! machines (knob travel, indicator bands, program-voltage rescaling).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which edge of a range a value was pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// Value reached or passed the lower edge.
    Lower,
    /// Value reached or passed the upper edge.
    Upper,
}

/// Result of [`saturate`]: the bounded value and the edge it was pinned to, if any.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Saturated {
    /// Value inside `[lo, hi]`.
    pub value: f64,
    /// Edge reached, `None` when the value lies strictly inside the range.
    pub edge: Option<Bound>,
}

/// Pin `value` into `[lo, hi]`.
///
/// Reaching an edge exactly counts as hitting it, so callers can snap
/// dependent quantities to their extremes on equality as well as overshoot.
/// A NaN input is treated as an undershoot.
pub fn saturate(value: f64, lo: f64, hi: f64) -> Saturated {
    if value >= hi {
        Saturated {
            value: hi,
            edge: Some(Bound::Upper),
        }
    } else if value > lo {
        Saturated { value, edge: None }
    } else {
        Saturated {
            value: lo,
            edge: Some(Bound::Lower),
        }
    }
}

/// `true` iff `value` lies strictly between `lower` and `upper`.
///
/// Both edges are excluded.
#[inline]
pub fn in_open_band(value: f64, lower: f64, upper: f64) -> bool {
    value > lower && value < upper
}

/// Linear rescale of `value` from `[0, from_full]` onto `[0, to_full]`.
///
/// Monotonic non-decreasing in `value` for positive `from_full` and non-negative `to_full`.
#[inline]
pub fn rescale(value: f64, from_full: f64, to_full: f64) -> f64 {
    (to_full * value) / from_full
}

/// Closed voltage interval `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VoltageRange {
    /// Lowest representable voltage.
    pub min: f64,
    /// Highest representable voltage.
    pub max: f64,
}

impl VoltageRange {
    /// Create a new range. `min` must be below `max`.
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Inclusive containment check. NaN is never contained.
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Width of the range.
    #[inline]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

impl fmt::Display for VoltageRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}] V", self.min, self.max)
    }
}
