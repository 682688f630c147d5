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

//! Filter intersection.
//!
//! [`Filter::merge_with`] combines two filters on the same column into a
//! single filter accepting exactly the (value, null) inputs both accept,
//! collapsed to the most compact representation. Dispatch is canonical:
//! the side with the larger [`FilterKind`] always forwards to the smaller,
//! so each unordered pair is handled once.
//!
//! Integer value sets are merged by walking the smaller set's materialized
//! values and re-running the survivors through [`create_bigint_values`],
//! which re-picks the representation. Range lists go through
//! [`combine_bigint_ranges`] for the same reason: a merge never returns a
//! single-child multi-range or a contiguous bitmask.

use crate::error::Result;
use crate::filter::{
    create_bigint_values, null_or_false, BigintMultiRange, BigintRange, BoolValue,
    BytesValues, Filter, MultiRange,
};
use crate::not_impl_err;

impl Filter {
    /// Returns a filter equivalent to the conjunction of `self` and
    /// `other`.
    ///
    /// The result's null bit is always the conjunction of both null bits.
    /// Pairs over incompatible value domains (for example a boolean filter
    /// against an integer range) have no defined conjunction and report
    /// [`FilterError::NotImplemented`](crate::FilterError::NotImplemented).
    pub fn merge_with(&self, other: &Filter) -> Result<Filter> {
        if self.kind() > other.kind() {
            return other.merge_with(self);
        }
        let both_null_allowed = self.test_null() && other.test_null();
        match (self, other) {
            (Filter::AlwaysFalse, _) => Ok(Filter::AlwaysFalse),
            (Filter::AlwaysTrue, _) => Ok(other.clone_with(Some(both_null_allowed))),
            (Filter::IsNull, _) => Ok(null_or_false(other.test_null())),
            (Filter::IsNotNull, _) => Ok(other.clone_with(Some(false))),

            (Filter::BoolValue(a), Filter::BoolValue(b)) => {
                if a.value() == b.value() {
                    Ok(BoolValue::new(a.value(), both_null_allowed).into())
                } else {
                    Ok(null_or_false(both_null_allowed))
                }
            }

            (Filter::BigintRange(a), Filter::BigintRange(b)) => {
                let lower = a.lower().max(b.lower());
                let upper = a.upper().min(b.upper());
                if lower <= upper {
                    Ok(BigintRange::try_new(lower, upper, both_null_allowed)?.into())
                } else {
                    Ok(null_or_false(both_null_allowed))
                }
            }
            (Filter::BigintRange(_), Filter::BigintValuesUsingHashTable(b)) => {
                merge_int_values(b.values(), self, both_null_allowed)
            }
            (Filter::BigintRange(_), Filter::BigintValuesUsingBitmask(b)) => {
                merge_int_values(b.values(), self, both_null_allowed)
            }
            (Filter::BigintRange(a), Filter::BigintMultiRange(b)) => {
                let clipped = clip_to_ranges(a, b, both_null_allowed)?;
                combine_bigint_ranges(clipped, both_null_allowed)
            }

            (
                Filter::BigintValuesUsingHashTable(a),
                Filter::BigintValuesUsingHashTable(b),
            ) => {
                if a.value_count() <= b.value_count() {
                    merge_int_values(a.values(), other, both_null_allowed)
                } else {
                    merge_int_values(b.values(), self, both_null_allowed)
                }
            }
            (
                Filter::BigintValuesUsingHashTable(a),
                Filter::BigintValuesUsingBitmask(b),
            ) => {
                if a.value_count() <= b.value_count() {
                    merge_int_values(a.values(), other, both_null_allowed)
                } else {
                    merge_int_values(b.values(), self, both_null_allowed)
                }
            }
            (Filter::BigintValuesUsingHashTable(a), Filter::BigintMultiRange(_)) => {
                merge_int_values(a.values(), other, both_null_allowed)
            }
            (
                Filter::BigintValuesUsingBitmask(a),
                Filter::BigintValuesUsingBitmask(b),
            ) => {
                if a.value_count() <= b.value_count() {
                    merge_int_values(a.values(), other, both_null_allowed)
                } else {
                    merge_int_values(b.values(), self, both_null_allowed)
                }
            }
            (Filter::BigintValuesUsingBitmask(a), Filter::BigintMultiRange(_)) => {
                merge_int_values(a.values(), other, both_null_allowed)
            }

            (Filter::BigintMultiRange(a), Filter::BigintMultiRange(b)) => {
                let mut clipped = Vec::new();
                for child in a.ranges() {
                    clipped.extend(clip_to_ranges(child, b, both_null_allowed)?);
                }
                combine_bigint_ranges(clipped, both_null_allowed)
            }

            (Filter::DoubleRange(a), Filter::DoubleRange(b)) => {
                Ok(match a.intersect(b, both_null_allowed) {
                    Some(merged) => Filter::DoubleRange(merged),
                    None => null_or_false(both_null_allowed),
                })
            }
            (Filter::FloatRange(a), Filter::FloatRange(b)) => {
                Ok(match a.intersect(b, both_null_allowed) {
                    Some(merged) => Filter::FloatRange(merged),
                    None => null_or_false(both_null_allowed),
                })
            }

            (Filter::BytesRange(a), Filter::BytesRange(b)) => {
                Ok(match a.intersect(b, both_null_allowed) {
                    Some(merged) => Filter::BytesRange(merged),
                    None => null_or_false(both_null_allowed),
                })
            }
            (Filter::BytesRange(a), Filter::BytesValues(b)) => {
                let kept: Vec<Vec<u8>> = b
                    .values()
                    .filter(|v| a.test_bytes(v))
                    .map(|v| v.to_vec())
                    .collect();
                combine_bytes_values(kept, both_null_allowed)
            }
            (Filter::BytesValues(a), Filter::BytesValues(b)) => {
                let (walk, probe) = if a.len() <= b.len() { (a, b) } else { (b, a) };
                let kept: Vec<Vec<u8>> = walk
                    .values()
                    .filter(|v| probe.test_bytes(v))
                    .map(|v| v.to_vec())
                    .collect();
                combine_bytes_values(kept, both_null_allowed)
            }

            (
                Filter::DoubleRange(_)
                | Filter::FloatRange(_)
                | Filter::BytesRange(_)
                | Filter::BytesValues(_),
                Filter::MultiRange(b),
            ) => merge_multi_with_scalar(b, self, both_null_allowed),
            (Filter::MultiRange(a), Filter::MultiRange(b)) => {
                let mut merged = Vec::new();
                for child in a.filters() {
                    for other_child in b.filters() {
                        match child.merge_with(other_child)? {
                            Filter::AlwaysFalse | Filter::IsNull => {}
                            survivor => merged.push(survivor),
                        }
                    }
                }
                collapse_disjunction(
                    merged,
                    both_null_allowed,
                    a.nan_allowed() && b.nan_allowed(),
                )
            }

            _ => not_impl_err!(
                "merge between {} and {} filters",
                self.kind(),
                other.kind()
            ),
        }
    }
}

/// Keeps the walked values the probe filter accepts and re-picks the most
/// compact representation for the survivors.
fn merge_int_values(
    values: impl Iterator<Item = i64>,
    probe: &Filter,
    null_allowed: bool,
) -> Result<Filter> {
    let kept: Vec<i64> = values.filter(|&v| probe.test_int64(v)).collect();
    create_bigint_values(&kept, null_allowed)
}

/// Clips `range` against each child of `ranges`, keeping the non-empty
/// intersections. The output inherits the children's order, so it stays
/// sorted and non-overlapping.
fn clip_to_ranges(
    range: &BigintRange,
    ranges: &BigintMultiRange,
    null_allowed: bool,
) -> Result<Vec<BigintRange>> {
    let mut clipped = Vec::new();
    for child in ranges.ranges() {
        let lower = range.lower().max(child.lower());
        let upper = range.upper().min(child.upper());
        if lower <= upper {
            clipped.push(BigintRange::try_new(lower, upper, null_allowed)?);
        }
    }
    Ok(clipped)
}

/// Packs surviving ranges into the most compact filter.
fn combine_bigint_ranges(
    ranges: Vec<BigintRange>,
    null_allowed: bool,
) -> Result<Filter> {
    let mut ranges = ranges;
    match ranges.len() {
        0 => Ok(null_or_false(null_allowed)),
        1 => {
            let only = ranges.swap_remove(0);
            Ok(BigintRange::try_new(only.lower(), only.upper(), null_allowed)?.into())
        }
        _ => Ok(BigintMultiRange::try_new(ranges, null_allowed)?.into()),
    }
}

fn combine_bytes_values(values: Vec<Vec<u8>>, null_allowed: bool) -> Result<Filter> {
    if values.is_empty() {
        Ok(null_or_false(null_allowed))
    } else {
        Ok(BytesValues::try_new(values, null_allowed)?.into())
    }
}

/// Merges each child of the disjunction with a scalar range filter.
fn merge_multi_with_scalar(
    multi: &MultiRange,
    scalar: &Filter,
    null_allowed: bool,
) -> Result<Filter> {
    let scalar_nan_allowed = match scalar {
        Filter::DoubleRange(f) => f.nan_allowed(),
        Filter::FloatRange(f) => f.nan_allowed(),
        // Byte-string filters never see NaN probes; they do not restrict
        // the policy.
        _ => true,
    };
    let mut merged = Vec::new();
    for child in multi.filters() {
        match child.merge_with(scalar)? {
            Filter::AlwaysFalse | Filter::IsNull => {}
            survivor => merged.push(survivor),
        }
    }
    collapse_disjunction(
        merged,
        null_allowed,
        multi.nan_allowed() && scalar_nan_allowed,
    )
}

/// Collapses a disjunction's surviving children: none is null-or-false, a
/// single survivor stands alone, more stay a [`MultiRange`].
fn collapse_disjunction(
    merged: Vec<Filter>,
    null_allowed: bool,
    nan_allowed: bool,
) -> Result<Filter> {
    let mut merged = merged;
    match merged.len() {
        0 => Ok(null_or_false(null_allowed)),
        1 => {
            let only = merged.swap_remove(0);
            Ok(only.clone_with(Some(null_allowed)))
        }
        _ => Ok(MultiRange::new(merged, null_allowed, nan_allowed).into()),
    }
}
