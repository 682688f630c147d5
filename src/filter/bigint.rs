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

//! 64-bit integer filters.
//!
//! Integer membership is represented three ways depending on the shape of
//! the value set, selected by [`create_bigint_values`]:
//!
//! - a contiguous set collapses to a [`BigintRange`] (2 comparisons per
//!   probe),
//! - a dense set becomes a [`BigintValuesUsingBitmask`] (bound check plus
//!   one bit fetch),
//! - a sparse set becomes a [`BigintValuesUsingHashTable`] (expected O(1)
//!   open-address probe).
//!
//! Disjunctions of intervals use [`BigintMultiRange`], which binary
//! searches its sorted lower bounds.

use arrow_buffer::{BooleanBuffer, BooleanBufferBuilder};
use log::trace;

use crate::error::Result;
use crate::filter::{null_or_false, Filter};
use crate::plan_err;

/// Marks an empty slot in [`BigintValuesUsingHashTable`]. The marker is an
/// ordinary value; a set that actually contains it records that in a
/// separate flag rather than in the table.
const EMPTY_MARKER: i64 = 0x6b5c_18fd_8a1e_4c37;

/// Odd 64-bit multiplier spreading probe start positions across the table.
const M: u64 = 0xc6a4_a793_5bd1_e995;

/// Closed interval `[lower, upper]` over 64-bit integers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BigintRange {
    lower: i64,
    upper: i64,
    null_allowed: bool,
}

impl BigintRange {
    pub fn try_new(lower: i64, upper: i64, null_allowed: bool) -> Result<Self> {
        if lower > upper {
            return plan_err!(
                "BigintRange requires lower <= upper, got [{lower}, {upper}]"
            );
        }
        Ok(Self {
            lower,
            upper,
            null_allowed,
        })
    }

    pub fn lower(&self) -> i64 {
        self.lower
    }

    pub fn upper(&self) -> i64 {
        self.upper
    }

    pub fn null_allowed(&self) -> bool {
        self.null_allowed
    }

    pub fn is_single_value(&self) -> bool {
        self.lower == self.upper
    }

    pub fn test_int64(&self, value: i64) -> bool {
        self.lower <= value && value <= self.upper
    }

    pub fn test_int64_range(&self, min: i64, max: i64, has_null: bool) -> bool {
        if has_null && self.null_allowed {
            return true;
        }
        if min == max {
            return self.test_int64(min);
        }
        !(min > self.upper || max < self.lower)
    }

    pub(crate) fn clone_with(&self, null_allowed: bool) -> Self {
        Self {
            lower: self.lower,
            upper: self.upper,
            null_allowed,
        }
    }
}

/// Dense integer set: one bit per value in `[min, max]`.
#[derive(Debug, Clone, PartialEq)]
pub struct BigintValuesUsingBitmask {
    min: i64,
    max: i64,
    bitmask: BooleanBuffer,
    null_allowed: bool,
}

impl BigintValuesUsingBitmask {
    /// Creates a dense set over `[min, max]`. Values are trusted to lie
    /// within the given bounds.
    pub fn try_new(
        min: i64,
        max: i64,
        values: &[i64],
        null_allowed: bool,
    ) -> Result<Self> {
        if min >= max {
            return plan_err!(
                "BigintValuesUsingBitmask requires min < max, got [{min}, {max}]"
            );
        }
        if values.len() < 2 {
            return plan_err!(
                "BigintValuesUsingBitmask requires at least 2 values, got {}",
                values.len()
            );
        }
        let Some(width) = max.checked_sub(min) else {
            return plan_err!("bitmask width overflows for bounds [{min}, {max}]");
        };
        let len = width as usize + 1;
        let mut builder = BooleanBufferBuilder::new(len);
        builder.append_n(len, false);
        for &value in values {
            builder.set_bit((value - min) as usize, true);
        }
        Ok(Self {
            min,
            max,
            bitmask: builder.finish(),
            null_allowed,
        })
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }

    pub fn null_allowed(&self) -> bool {
        self.null_allowed
    }

    pub fn test_int64(&self, value: i64) -> bool {
        if value < self.min || value > self.max {
            return false;
        }
        self.bitmask.value((value - self.min) as usize)
    }

    pub fn test_int64_range(&self, min: i64, max: i64, has_null: bool) -> bool {
        if has_null && self.null_allowed {
            return true;
        }
        if min == max {
            return self.test_int64(min);
        }
        !(min > self.max || max < self.min)
    }

    /// Members in ascending order.
    pub fn values(&self) -> impl Iterator<Item = i64> + '_ {
        self.bitmask.set_indices().map(|i| self.min + i as i64)
    }

    pub(crate) fn value_count(&self) -> usize {
        self.bitmask.count_set_bits()
    }

    pub(crate) fn clone_with(&self, null_allowed: bool) -> Self {
        Self {
            min: self.min,
            max: self.max,
            bitmask: self.bitmask.clone(),
            null_allowed,
        }
    }
}

/// Sparse integer set: open addressing with linear probing.
///
/// The table size is the largest power of two not exceeding three times
/// the value count, so probes stay short without the bitmask's
/// proportional-to-range footprint. Empty slots hold [`EMPTY_MARKER`];
/// membership of the marker value itself lives in `contains_empty_marker`.
#[derive(Debug, Clone, PartialEq)]
pub struct BigintValuesUsingHashTable {
    min: i64,
    max: i64,
    table: Vec<i64>,
    contains_empty_marker: bool,
    null_allowed: bool,
}

impl BigintValuesUsingHashTable {
    pub fn try_new(
        min: i64,
        max: i64,
        values: &[i64],
        null_allowed: bool,
    ) -> Result<Self> {
        if min >= max {
            return plan_err!(
                "BigintValuesUsingHashTable requires min < max, got [{min}, {max}]"
            );
        }
        if values.len() < 2 {
            return plan_err!(
                "BigintValuesUsingHashTable requires at least 2 values, got {}",
                values.len()
            );
        }
        let size = 1usize << (values.len() * 3).ilog2();
        let mut table = vec![EMPTY_MARKER; size];
        let mut contains_empty_marker = false;
        for &value in values {
            if value == EMPTY_MARKER {
                contains_empty_marker = true;
                continue;
            }
            let start = Self::start_slot(value, size);
            for i in start..start + size {
                let slot = i & (size - 1);
                if table[slot] == EMPTY_MARKER {
                    table[slot] = value;
                    break;
                }
            }
        }
        Ok(Self {
            min,
            max,
            table,
            contains_empty_marker,
            null_allowed,
        })
    }

    fn start_slot(value: i64, size: usize) -> usize {
        ((value as u64).wrapping_mul(M) as usize) & (size - 1)
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }

    pub fn null_allowed(&self) -> bool {
        self.null_allowed
    }

    pub fn test_int64(&self, value: i64) -> bool {
        if self.contains_empty_marker && value == EMPTY_MARKER {
            return true;
        }
        if value < self.min || value > self.max {
            return false;
        }
        let size = self.table.len();
        let start = Self::start_slot(value, size);
        for i in start..start + size {
            let entry = self.table[i & (size - 1)];
            if entry == EMPTY_MARKER {
                return false;
            }
            if entry == value {
                return true;
            }
        }
        false
    }

    pub fn test_int64_range(&self, min: i64, max: i64, has_null: bool) -> bool {
        if has_null && self.null_allowed {
            return true;
        }
        if min == max {
            return self.test_int64(min);
        }
        !(min > self.max || max < self.min)
    }

    /// Members in table order, with the marker value (if a member) last.
    pub fn values(&self) -> impl Iterator<Item = i64> + '_ {
        self.table
            .iter()
            .copied()
            .filter(|&v| v != EMPTY_MARKER)
            .chain(self.contains_empty_marker.then_some(EMPTY_MARKER))
    }

    pub(crate) fn value_count(&self) -> usize {
        self.table.iter().filter(|&&v| v != EMPTY_MARKER).count()
            + self.contains_empty_marker as usize
    }

    pub(crate) fn clone_with(&self, null_allowed: bool) -> Self {
        Self {
            min: self.min,
            max: self.max,
            table: self.table.clone(),
            contains_empty_marker: self.contains_empty_marker,
            null_allowed,
        }
    }
}

/// Ordered disjunction of non-overlapping [`BigintRange`]s.
#[derive(Debug, Clone, PartialEq)]
pub struct BigintMultiRange {
    ranges: Vec<BigintRange>,
    // Cached `ranges[i].lower()` so probes binary search a flat slice.
    lower_bounds: Vec<i64>,
    null_allowed: bool,
}

impl BigintMultiRange {
    /// Creates a disjunction of at least 2 ranges, sorted by lower bound.
    /// Consecutive ranges may touch (`next.lower == prev.upper`) but not
    /// overlap.
    pub fn try_new(ranges: Vec<BigintRange>, null_allowed: bool) -> Result<Self> {
        if ranges.len() < 2 {
            return plan_err!(
                "BigintMultiRange requires at least 2 ranges, got {}",
                ranges.len()
            );
        }
        let lower_bounds: Vec<i64> = ranges.iter().map(|r| r.lower()).collect();
        for i in 1..ranges.len() {
            if lower_bounds[i] < ranges[i - 1].upper() {
                return plan_err!(
                    "BigintMultiRange ranges must be sorted and must not overlap: \
                     [{}, {}] is followed by [{}, {}]",
                    ranges[i - 1].lower(),
                    ranges[i - 1].upper(),
                    ranges[i].lower(),
                    ranges[i].upper()
                );
            }
        }
        Ok(Self {
            ranges,
            lower_bounds,
            null_allowed,
        })
    }

    pub fn ranges(&self) -> &[BigintRange] {
        &self.ranges
    }

    pub fn null_allowed(&self) -> bool {
        self.null_allowed
    }

    pub fn test_int64(&self, value: i64) -> bool {
        match self.lower_bounds.binary_search(&value) {
            // The hit is the inclusive lower bound of some range.
            Ok(_) => true,
            // Below the first range.
            Err(0) => false,
            Err(insert) => self.ranges[insert - 1].test_int64(value),
        }
    }

    pub fn test_int64_range(&self, min: i64, max: i64, has_null: bool) -> bool {
        if has_null && self.null_allowed {
            return true;
        }
        self.ranges
            .iter()
            .any(|r| r.test_int64_range(min, max, has_null))
    }

    pub(crate) fn clone_with(&self, null_allowed: bool) -> Self {
        Self {
            ranges: self.ranges.clone(),
            lower_bounds: self.lower_bounds.clone(),
            null_allowed,
        }
    }
}

/// Builds the most compact filter accepting exactly `values` (plus null if
/// `null_allowed`).
///
/// A contiguous set collapses to a [`BigintRange`]. A set whose span is
/// small in absolute terms (under 2048 values of width) or costs at most 4
/// machine words of mask per member becomes a bitmask; anything sparser
/// becomes a hash table.
pub fn create_bigint_values(values: &[i64], null_allowed: bool) -> Result<Filter> {
    if values.is_empty() {
        return Ok(null_or_false(null_allowed));
    }
    if values.len() == 1 {
        return Ok(BigintRange::try_new(values[0], values[0], null_allowed)?.into());
    }

    let mut min = values[0];
    let mut max = values[0];
    for &value in &values[1..] {
        if value > max {
            max = value;
        } else if value < min {
            min = value;
        }
    }

    if let Some(range) = max.checked_sub(min) {
        if range as u64 + 1 == values.len() as u64 {
            trace!("{} contiguous values collapse to a range", values.len());
            return Ok(BigintRange::try_new(min, max, null_allowed)?.into());
        }
        if range < 32 * 64 || range < (values.len() as i64).saturating_mul(4 * 64) {
            trace!("{} values over span {} use a bitmask", values.len(), range);
            return Ok(
                BigintValuesUsingBitmask::try_new(min, max, values, null_allowed)?
                    .into(),
            );
        }
    }
    trace!("{} values use a hash table", values.len());
    Ok(BigintValuesUsingHashTable::try_new(min, max, values, null_allowed)?.into())
}
