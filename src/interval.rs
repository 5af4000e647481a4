/*

    Responsible for creating a struct that represents
    half-open integer ranges [a, b) along one grid axis,
    with functionality to check emptiness, containment and
    intersect ranges.

    See also associated constant EMPTY: [0, 0)

    @author: Bartu
    @date: Sept 2025

*/

use std::ops::Range;

use crate::numeric::{Int};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub min: Int,
    pub max: Int,
}

impl Interval {

    pub const EMPTY: Self = Self {
        min: 0,
        max: 0,
    };

    pub fn new(min: Int, max: Int) -> Self {
        Self {
            min,
            max,
        }
    }

    /// [min + margin, max - margin)
    pub fn new_with_margin(min: Int, max: Int, margin: Int) -> Self {
        Self {
            min: min + margin,
            max: max - margin,
        }
    }

    /// True if there is at least one integer to draw from
    pub fn validate(&self) -> bool {
        self.max > self.min
    }

    pub fn is_empty(&self) -> bool {
        !self.validate()
    }

    pub fn contains_interval(&self, other: &Interval) -> bool {
        other.is_empty() || (self.min <= other.min && other.max <= self.max)
    }

    /// Overlap of the two ranges. Disjoint ranges collapse
    /// to an empty range sitting at the larger minimum.
    pub fn intersect(&self, other: &Interval) -> Interval {
        let min = self.min.max(other.min);
        let max = self.max.min(other.max).max(min);
        Interval::new(min, max)
    }

    /// Index range for slicing. Only valid in mask-local
    /// coordinates, where both ends are non-negative.
    pub fn to_range(&self) -> Range<usize> {
        debug_assert!(
            self.min >= 0 && self.max >= self.min,
            "interval [{}, {}) is not a valid index range", self.min, self.max
        );
        self.min as usize..self.max as usize
    }
}
