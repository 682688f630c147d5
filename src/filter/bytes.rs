// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Byte-string filters.
//!
//! Byte strings are ordered lexicographically with shorter-is-smaller on a
//! common prefix, which is exactly `Ord` on `[u8]`, so comparisons below
//! use plain slice ordering.

use std::cmp::Ordering;

use hashbrown::HashSet;

use crate::error::Result;
use crate::plan_err;

/// Lexicographic range over variable-length byte strings.
///
/// Endpoints are optional (`None` means unbounded on that side) and carry
/// their own exclusivity flag. A range whose endpoints are equal and both
/// inclusive degenerates to a single-value filter with a cheaper probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BytesRange {
    lower: Option<Vec<u8>>,
    lower_exclusive: bool,
    upper: Option<Vec<u8>>,
    upper_exclusive: bool,
    single_value: bool,
    null_allowed: bool,
}

impl BytesRange {
    pub fn try_new(
        lower: Option<Vec<u8>>,
        lower_exclusive: bool,
        upper: Option<Vec<u8>>,
        upper_exclusive: bool,
        null_allowed: bool,
    ) -> Result<Self> {
        if let (Some(lo), Some(hi)) = (&lower, &upper) {
            if lo > hi {
                return plan_err!(
                    "BytesRange requires lower <= upper, got [{lo:?}, {hi:?}]"
                );
            }
        }
        let single_value = !lower_exclusive
            && !upper_exclusive
            && lower.is_some()
            && lower == upper;
        Ok(Self {
            lower,
            lower_exclusive,
            upper,
            upper_exclusive,
            single_value,
            null_allowed,
        })
    }

    pub fn lower(&self) -> Option<&[u8]> {
        self.lower.as_deref()
    }

    pub fn upper(&self) -> Option<&[u8]> {
        self.upper.as_deref()
    }

    pub fn lower_exclusive(&self) -> bool {
        self.lower_exclusive
    }

    pub fn upper_exclusive(&self) -> bool {
        self.upper_exclusive
    }

    pub fn is_single_value(&self) -> bool {
        self.single_value
    }

    pub fn null_allowed(&self) -> bool {
        self.null_allowed
    }

    pub fn test_bytes(&self, value: &[u8]) -> bool {
        if self.single_value {
            return self.lower.as_deref() == Some(value);
        }
        if let Some(lo) = self.lower.as_deref() {
            let ord = value.cmp(lo);
            if ord == Ordering::Less || (self.lower_exclusive && ord == Ordering::Equal)
            {
                return false;
            }
        }
        if let Some(hi) = self.upper.as_deref() {
            let ord = value.cmp(hi);
            if ord == Ordering::Greater
                || (self.upper_exclusive && ord == Ordering::Equal)
            {
                return false;
            }
        }
        true
    }

    pub fn test_length(&self, length: usize) -> bool {
        match (self.single_value, &self.lower) {
            (true, Some(lo)) => lo.len() == length,
            _ => true,
        }
    }

    /// Could a page with byte-string statistics `(min, max, has_null)`
    /// contain an accepted value? A missing page bound leaves that side
    /// unprunable.
    pub fn test_bytes_range(
        &self,
        min: Option<&[u8]>,
        max: Option<&[u8]>,
        has_null: bool,
    ) -> bool {
        if has_null && self.null_allowed {
            return true;
        }
        if let (Some(min), Some(max)) = (min, max) {
            if min == max {
                return self.test_bytes(min);
            }
        }
        // Page entirely above the acceptance region.
        if let (Some(hi), Some(min)) = (self.upper.as_deref(), min) {
            let ord = min.cmp(hi);
            if ord == Ordering::Greater
                || (self.upper_exclusive && ord == Ordering::Equal)
            {
                return false;
            }
        }
        // Page entirely below it.
        if let (Some(lo), Some(max)) = (self.lower.as_deref(), max) {
            let ord = max.cmp(lo);
            if ord == Ordering::Less || (self.lower_exclusive && ord == Ordering::Equal)
            {
                return false;
            }
        }
        true
    }

    /// Intersects two ranges into the filter for their conjunction, or
    /// `None` when the intersection is empty.
    pub(crate) fn intersect(&self, other: &Self, null_allowed: bool) -> Option<Self> {
        let (lower, lower_exclusive) = match (&self.lower, &other.lower) {
            (None, None) => (None, false),
            (Some(_), None) => (self.lower.clone(), self.lower_exclusive),
            (None, Some(_)) => (other.lower.clone(), other.lower_exclusive),
            (Some(a), Some(b)) => match a.cmp(b) {
                Ordering::Greater => (self.lower.clone(), self.lower_exclusive),
                Ordering::Less => (other.lower.clone(), other.lower_exclusive),
                Ordering::Equal => (
                    self.lower.clone(),
                    self.lower_exclusive || other.lower_exclusive,
                ),
            },
        };
        let (upper, upper_exclusive) = match (&self.upper, &other.upper) {
            (None, None) => (None, false),
            (Some(_), None) => (self.upper.clone(), self.upper_exclusive),
            (None, Some(_)) => (other.upper.clone(), other.upper_exclusive),
            (Some(a), Some(b)) => match a.cmp(b) {
                Ordering::Less => (self.upper.clone(), self.upper_exclusive),
                Ordering::Greater => (other.upper.clone(), other.upper_exclusive),
                Ordering::Equal => (
                    self.upper.clone(),
                    self.upper_exclusive || other.upper_exclusive,
                ),
            },
        };
        if let (Some(lo), Some(hi)) = (&lower, &upper) {
            if lo > hi || (lo == hi && (lower_exclusive || upper_exclusive)) {
                return None;
            }
        }
        let single_value = !lower_exclusive
            && !upper_exclusive
            && lower.is_some()
            && lower == upper;
        Some(Self {
            lower,
            lower_exclusive,
            upper,
            upper_exclusive,
            single_value,
            null_allowed,
        })
    }

    pub(crate) fn clone_with(&self, null_allowed: bool) -> Self {
        Self {
            null_allowed,
            ..self.clone()
        }
    }
}

/// Explicit set of byte strings with cached bounds.
///
/// The member lengths are cached as well so readers of length-prefixed
/// encodings can reject values before materializing them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BytesValues {
    values: HashSet<Vec<u8>>,
    lengths: HashSet<usize>,
    lower: Vec<u8>,
    upper: Vec<u8>,
    null_allowed: bool,
}

impl BytesValues {
    pub fn try_new(values: Vec<Vec<u8>>, null_allowed: bool) -> Result<Self> {
        let Some(first) = values.first() else {
            return plan_err!("BytesValues requires at least one value");
        };
        let mut lower = first.clone();
        let mut upper = first.clone();
        let mut lengths = HashSet::with_capacity(values.len());
        for value in &values {
            if value < &lower {
                lower = value.clone();
            }
            if value > &upper {
                upper = value.clone();
            }
            lengths.insert(value.len());
        }
        Ok(Self {
            values: values.into_iter().collect(),
            lengths,
            lower,
            upper,
            null_allowed,
        })
    }

    pub fn lower(&self) -> &[u8] {
        &self.lower
    }

    pub fn upper(&self) -> &[u8] {
        &self.upper
    }

    pub fn null_allowed(&self) -> bool {
        self.null_allowed
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Member values, in no particular order.
    pub fn values(&self) -> impl Iterator<Item = &[u8]> {
        self.values.iter().map(|v| v.as_slice())
    }

    pub fn test_bytes(&self, value: &[u8]) -> bool {
        self.values.contains(value)
    }

    pub fn test_length(&self, length: usize) -> bool {
        self.lengths.contains(&length)
    }

    pub fn test_bytes_range(
        &self,
        min: Option<&[u8]>,
        max: Option<&[u8]>,
        has_null: bool,
    ) -> bool {
        if has_null && self.null_allowed {
            return true;
        }
        if let (Some(min), Some(max)) = (min, max) {
            if min == max {
                return self.test_bytes(min);
            }
        }
        if let Some(min) = min {
            if min > self.upper.as_slice() {
                return false;
            }
        }
        if let Some(max) = max {
            if max < self.lower.as_slice() {
                return false;
            }
        }
        true
    }

    pub(crate) fn clone_with(&self, null_allowed: bool) -> Self {
        Self {
            null_allowed,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(
        lower: Option<&[u8]>,
        lower_exclusive: bool,
        upper: Option<&[u8]>,
        upper_exclusive: bool,
    ) -> BytesRange {
        BytesRange::try_new(
            lower.map(|v| v.to_vec()),
            lower_exclusive,
            upper.map(|v| v.to_vec()),
            upper_exclusive,
            false,
        )
        .unwrap()
    }

    #[test]
    fn shorter_is_smaller() {
        // "abc" < "abcd" < "abd" under prefix ordering.
        let filter = range(Some(b"abc"), false, Some(b"abd"), false);
        assert!(filter.test_bytes(b"abcd"));
        assert!(filter.test_bytes(b"abc"));
        assert!(filter.test_bytes(b"abd"));
        assert!(!filter.test_bytes(b"abb"));
        assert!(!filter.test_bytes(b"abde"));
        assert!(!filter.test_bytes(b"ab"));
    }

    #[test]
    fn exclusive_bounds() {
        let filter = range(Some(b"a"), true, Some(b"c"), true);
        assert!(!filter.test_bytes(b"a"));
        assert!(filter.test_bytes(b"aa"));
        assert!(filter.test_bytes(b"b"));
        assert!(!filter.test_bytes(b"c"));
        assert!(filter.lower_exclusive());
        assert!(filter.upper_exclusive());

        let filter = range(Some(b"a"), false, Some(b"c"), false);
        assert!(!filter.lower_exclusive());
        assert!(!filter.upper_exclusive());
        assert_eq!(filter.lower(), Some(b"a".as_slice()));
        assert_eq!(filter.upper(), Some(b"c".as_slice()));
    }

    #[test]
    fn unbounded_sides() {
        let filter = range(None, false, Some(b"m"), false);
        assert!(filter.test_bytes(b""));
        assert!(filter.test_bytes(b"a"));
        assert!(filter.test_bytes(b"m"));
        assert!(!filter.test_bytes(b"n"));

        let filter = range(Some(b"m"), false, None, false);
        assert!(!filter.test_bytes(b"a"));
        assert!(filter.test_bytes(b"zzz"));
    }

    #[test]
    fn single_value() {
        let filter = range(Some(b"apple"), false, Some(b"apple"), false);
        assert!(filter.is_single_value());
        assert!(filter.test_bytes(b"apple"));
        assert!(!filter.test_bytes(b"apples"));
        assert!(filter.test_length(5));
        assert!(!filter.test_length(6));

        // A proper range does not constrain lengths.
        let filter = range(Some(b"a"), false, Some(b"b"), false);
        assert!(filter.test_length(100));
    }

    #[test]
    fn constructor_validation() {
        assert!(BytesRange::try_new(
            Some(b"b".to_vec()),
            false,
            Some(b"a".to_vec()),
            false,
            false
        )
        .is_err());
    }

    #[test]
    fn range_stats() {
        let filter = range(Some(b"d"), false, Some(b"f"), false);
        assert!(filter.test_bytes_range(Some(b"a"), Some(b"d"), false));
        assert!(!filter.test_bytes_range(Some(b"a"), Some(b"c"), false));
        assert!(!filter.test_bytes_range(Some(b"g"), Some(b"z"), false));
        assert!(filter.test_bytes_range(Some(b"e"), Some(b"z"), false));
        // A page bounded on one side only cannot be pruned by the missing
        // bound.
        assert!(filter.test_bytes_range(None, Some(b"z"), false));
        assert!(filter.test_bytes_range(Some(b"a"), None, false));
        assert!(!filter.test_bytes_range(Some(b"g"), None, false));
        // A page whose min equals an inclusive upper bound still matches.
        assert!(filter.test_bytes_range(Some(b"f"), Some(b"z"), false));
        // ... but not an exclusive one.
        let filter = range(Some(b"d"), false, Some(b"f"), true);
        assert!(!filter.test_bytes_range(Some(b"f"), Some(b"z"), false));
        // Degenerate pages use scalar semantics.
        assert!(!filter.test_bytes_range(Some(b"f"), Some(b"f"), false));
        assert!(filter.test_bytes_range(Some(b"e"), Some(b"e"), false));
    }

    #[test]
    fn values_membership() {
        let filter = BytesValues::try_new(
            vec![b"apple".to_vec(), b"fig".to_vec(), b"pear".to_vec()],
            false,
        )
        .unwrap();
        assert!(filter.test_bytes(b"apple"));
        assert!(filter.test_bytes(b"fig"));
        assert!(!filter.test_bytes(b"grape"));
        assert!(filter.test_length(3));
        assert!(filter.test_length(4));
        assert!(filter.test_length(5));
        assert!(!filter.test_length(6));
        assert_eq!(filter.lower(), b"apple");
        assert_eq!(filter.upper(), b"pear");

        assert!(BytesValues::try_new(vec![], false).is_err());
    }

    #[test]
    fn values_stats() {
        let filter = BytesValues::try_new(
            vec![b"apple".to_vec(), b"pear".to_vec()],
            false,
        )
        .unwrap();
        assert!(filter.test_bytes_range(Some(b"a"), Some(b"b"), false));
        assert!(!filter.test_bytes_range(Some(b"q"), Some(b"z"), false));
        assert!(!filter.test_bytes_range(Some(b"a"), Some(b"abc"), false));
        assert!(filter.test_bytes_range(Some(b"pear"), Some(b"pear"), false));
        assert!(!filter.test_bytes_range(Some(b"fig"), Some(b"fig"), false));
        assert!(filter.test_bytes_range(None, None, false));
    }

    #[test]
    fn range_intersection() {
        let a = range(Some(b"b"), false, Some(b"f"), false);
        let b = range(Some(b"d"), true, None, false);
        let merged = a.intersect(&b, false).unwrap();
        assert!(!merged.test_bytes(b"d"));
        assert!(merged.test_bytes(b"dd"));
        assert!(merged.test_bytes(b"f"));
        assert!(!merged.test_bytes(b"g"));

        let c = range(Some(b"x"), false, Some(b"z"), false);
        assert!(a.intersect(&c, false).is_none());

        // Equal endpoints collapse to a single value when both inclusive.
        let d = range(Some(b"f"), false, Some(b"z"), false);
        let merged = a.intersect(&d, false).unwrap();
        assert!(merged.is_single_value());
        assert!(merged.test_bytes(b"f"));

        // ... and to nothing when either side is exclusive there.
        let e = range(Some(b"f"), true, Some(b"z"), false);
        assert!(a.intersect(&e, false).is_none());
    }
}
