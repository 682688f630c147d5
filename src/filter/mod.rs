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

//! Scalar column filters.
//!
//! A [`Filter`] is a predicate on a single scalar column, evaluated during
//! scans to keep or drop individual values (`test_*`) and to prune whole
//! pages from `(min, max, has_null)` statistics (`test_*_range`). Filters
//! are immutable after construction; combining two filters on the same
//! column produces a new filter via [`Filter::merge_with`].

pub mod bigint;
pub mod boolean;
pub mod bytes;
pub mod floating;
mod merge;
pub mod multi;

use std::fmt::{Display, Formatter};

pub use bigint::{
    create_bigint_values, BigintMultiRange, BigintRange, BigintValuesUsingBitmask,
    BigintValuesUsingHashTable,
};
pub use boolean::BoolValue;
pub use bytes::{BytesRange, BytesValues};
pub use floating::{DoubleRange, FloatRange, FloatValue, FloatingPointRange};
pub use multi::MultiRange;

/// Discriminator for the closed set of filter shapes.
///
/// The derived ordering is the canonical dispatch order used by
/// [`Filter::merge_with`]: a merge between two kinds is always evaluated
/// with the smaller kind on the left, so each unordered pair is handled
/// exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FilterKind {
    AlwaysFalse,
    AlwaysTrue,
    IsNull,
    IsNotNull,
    BoolValue,
    BigintRange,
    BigintValuesUsingHashTable,
    BigintValuesUsingBitmask,
    DoubleRange,
    FloatRange,
    BytesRange,
    BytesValues,
    BigintMultiRange,
    MultiRange,
}

impl FilterKind {
    /// Returns the fixed diagnostic name of this kind.
    pub fn name(&self) -> &'static str {
        match self {
            FilterKind::AlwaysFalse => "AlwaysFalse",
            FilterKind::AlwaysTrue => "AlwaysTrue",
            FilterKind::IsNull => "IsNull",
            FilterKind::IsNotNull => "IsNotNull",
            FilterKind::BoolValue => "BoolValue",
            FilterKind::BigintRange => "BigintRange",
            FilterKind::BigintValuesUsingHashTable => "BigintValuesUsingHashTable",
            FilterKind::BigintValuesUsingBitmask => "BigintValuesUsingBitmask",
            FilterKind::DoubleRange => "DoubleRange",
            FilterKind::FloatRange => "FloatRange",
            FilterKind::BytesRange => "BytesRange",
            FilterKind::BytesValues => "BytesValues",
            FilterKind::BigintMultiRange => "BigintMultiRange",
            FilterKind::MultiRange => "MultiRange",
        }
    }
}

impl Display for FilterKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A predicate on a single scalar column.
///
/// Each variant accepts some subset of (value, null) inputs:
///
/// - [`Filter::AlwaysTrue`] / [`Filter::AlwaysFalse`]: constants.
/// - [`Filter::IsNull`] / [`Filter::IsNotNull`]: null existence tests.
/// - [`Filter::BoolValue`]: a single boolean value.
/// - [`Filter::BigintRange`]: a closed `[lower, upper]` interval over
///   64-bit integers.
/// - [`Filter::BigintValuesUsingBitmask`] /
///   [`Filter::BigintValuesUsingHashTable`]: explicit integer sets, dense
///   and sparse respectively. Use [`create_bigint_values`] to pick the
///   most compact representation for a given value list.
/// - [`Filter::BigintMultiRange`]: ordered, non-overlapping integer
///   ranges.
/// - [`Filter::DoubleRange`] / [`Filter::FloatRange`]: floating point
///   ranges with open/closed endpoints and an explicit NaN policy.
/// - [`Filter::BytesRange`] / [`Filter::BytesValues`]: lexicographic
///   range and explicit set over variable-length byte strings.
/// - [`Filter::MultiRange`]: disjunction of heterogeneous filters on the
///   same column.
///
/// Probes for a type a variant does not apply to return false; for
/// example `BigintRange` rejects every `test_bytes` probe.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Accepts every value and null.
    AlwaysTrue,
    /// Accepts nothing, not even null.
    AlwaysFalse,
    /// Accepts only null.
    IsNull,
    /// Accepts every non-null value.
    IsNotNull,
    BoolValue(BoolValue),
    BigintRange(BigintRange),
    BigintValuesUsingBitmask(BigintValuesUsingBitmask),
    BigintValuesUsingHashTable(BigintValuesUsingHashTable),
    BigintMultiRange(BigintMultiRange),
    DoubleRange(DoubleRange),
    FloatRange(FloatRange),
    BytesRange(BytesRange),
    BytesValues(BytesValues),
    MultiRange(MultiRange),
}

/// The compact filter accepting either only null or nothing at all.
pub(crate) fn null_or_false(null_allowed: bool) -> Filter {
    if null_allowed {
        Filter::IsNull
    } else {
        Filter::AlwaysFalse
    }
}

impl Filter {
    /// Returns the kind tag of this filter.
    pub fn kind(&self) -> FilterKind {
        match self {
            Filter::AlwaysTrue => FilterKind::AlwaysTrue,
            Filter::AlwaysFalse => FilterKind::AlwaysFalse,
            Filter::IsNull => FilterKind::IsNull,
            Filter::IsNotNull => FilterKind::IsNotNull,
            Filter::BoolValue(_) => FilterKind::BoolValue,
            Filter::BigintRange(_) => FilterKind::BigintRange,
            Filter::BigintValuesUsingBitmask(_) => FilterKind::BigintValuesUsingBitmask,
            Filter::BigintValuesUsingHashTable(_) => {
                FilterKind::BigintValuesUsingHashTable
            }
            Filter::BigintMultiRange(_) => FilterKind::BigintMultiRange,
            Filter::DoubleRange(_) => FilterKind::DoubleRange,
            Filter::FloatRange(_) => FilterKind::FloatRange,
            Filter::BytesRange(_) => FilterKind::BytesRange,
            Filter::BytesValues(_) => FilterKind::BytesValues,
            Filter::MultiRange(_) => FilterKind::MultiRange,
        }
    }

    /// Whether the filter returns the same result for the same input.
    ///
    /// Every variant in the current closed family is deterministic; the
    /// accessor keeps the interface stable for future nondeterministic
    /// extensions.
    pub fn is_deterministic(&self) -> bool {
        true
    }

    /// Whether a null input satisfies this filter.
    pub fn test_null(&self) -> bool {
        match self {
            Filter::AlwaysTrue => true,
            Filter::AlwaysFalse => false,
            Filter::IsNull => true,
            Filter::IsNotNull => false,
            Filter::BoolValue(f) => f.null_allowed(),
            Filter::BigintRange(f) => f.null_allowed(),
            Filter::BigintValuesUsingBitmask(f) => f.null_allowed(),
            Filter::BigintValuesUsingHashTable(f) => f.null_allowed(),
            Filter::BigintMultiRange(f) => f.null_allowed(),
            Filter::DoubleRange(f) => f.null_allowed(),
            Filter::FloatRange(f) => f.null_allowed(),
            Filter::BytesRange(f) => f.null_allowed(),
            Filter::BytesValues(f) => f.null_allowed(),
            Filter::MultiRange(f) => f.null_allowed(),
        }
    }

    /// Tests a boolean value.
    pub fn test_bool(&self, value: bool) -> bool {
        match self {
            Filter::AlwaysTrue | Filter::IsNotNull => true,
            Filter::BoolValue(f) => f.test_bool(value),
            Filter::MultiRange(f) => f.filters().iter().any(|c| c.test_bool(value)),
            _ => false,
        }
    }

    /// Tests a 64-bit integer value.
    pub fn test_int64(&self, value: i64) -> bool {
        match self {
            Filter::AlwaysTrue | Filter::IsNotNull => true,
            Filter::BigintRange(f) => f.test_int64(value),
            Filter::BigintValuesUsingBitmask(f) => f.test_int64(value),
            Filter::BigintValuesUsingHashTable(f) => f.test_int64(value),
            Filter::BigintMultiRange(f) => f.test_int64(value),
            Filter::MultiRange(f) => f.filters().iter().any(|c| c.test_int64(value)),
            _ => false,
        }
    }

    /// Tests a 64-bit floating point value.
    pub fn test_double(&self, value: f64) -> bool {
        match self {
            Filter::AlwaysTrue | Filter::IsNotNull => true,
            Filter::DoubleRange(f) => f.test(value),
            Filter::FloatRange(f) => f.test(value as f32),
            Filter::MultiRange(f) => f.test_double(value),
            _ => false,
        }
    }

    /// Tests a 32-bit floating point value.
    pub fn test_float(&self, value: f32) -> bool {
        match self {
            Filter::AlwaysTrue | Filter::IsNotNull => true,
            Filter::FloatRange(f) => f.test(value),
            Filter::DoubleRange(f) => f.test(value as f64),
            Filter::MultiRange(f) => f.test_float(value),
            _ => false,
        }
    }

    /// Tests a byte-string value.
    pub fn test_bytes(&self, value: &[u8]) -> bool {
        match self {
            Filter::AlwaysTrue | Filter::IsNotNull => true,
            Filter::BytesRange(f) => f.test_bytes(value),
            Filter::BytesValues(f) => f.test_bytes(value),
            Filter::MultiRange(f) => f.filters().iter().any(|c| c.test_bytes(value)),
            _ => false,
        }
    }

    /// Tests a byte-string length without looking at the content.
    ///
    /// Lets readers of length-prefixed encodings reject values before
    /// materializing them.
    pub fn test_length(&self, length: usize) -> bool {
        match self {
            Filter::AlwaysTrue | Filter::IsNotNull => true,
            Filter::BytesRange(f) => f.test_length(length),
            Filter::BytesValues(f) => f.test_length(length),
            Filter::MultiRange(f) => f.filters().iter().any(|c| c.test_length(length)),
            _ => false,
        }
    }

    /// Could any value in a page with statistics `(min, max, has_null)`
    /// satisfy this filter?
    ///
    /// May return false positives; never returns a false negative.
    pub fn test_int64_range(&self, min: i64, max: i64, has_null: bool) -> bool {
        match self {
            Filter::AlwaysTrue | Filter::IsNotNull => true,
            Filter::IsNull => has_null,
            Filter::BigintRange(f) => f.test_int64_range(min, max, has_null),
            Filter::BigintValuesUsingBitmask(f) => {
                f.test_int64_range(min, max, has_null)
            }
            Filter::BigintValuesUsingHashTable(f) => {
                f.test_int64_range(min, max, has_null)
            }
            Filter::BigintMultiRange(f) => f.test_int64_range(min, max, has_null),
            Filter::MultiRange(f) => {
                (has_null && f.null_allowed())
                    || f.filters()
                        .iter()
                        .any(|c| c.test_int64_range(min, max, has_null))
            }
            _ => false,
        }
    }

    /// `test_int64_range` for 64-bit floating point statistics.
    pub fn test_double_range(&self, min: f64, max: f64, has_null: bool) -> bool {
        match self {
            Filter::AlwaysTrue | Filter::IsNotNull => true,
            Filter::IsNull => has_null,
            Filter::DoubleRange(f) => f.test_range(min, max, has_null),
            Filter::FloatRange(f) => f.test_range(min as f32, max as f32, has_null),
            Filter::MultiRange(f) => {
                (has_null && f.null_allowed())
                    || f.filters()
                        .iter()
                        .any(|c| c.test_double_range(min, max, has_null))
            }
            _ => false,
        }
    }

    /// `test_int64_range` for 32-bit floating point statistics.
    pub fn test_float_range(&self, min: f32, max: f32, has_null: bool) -> bool {
        match self {
            Filter::AlwaysTrue | Filter::IsNotNull => true,
            Filter::IsNull => has_null,
            Filter::FloatRange(f) => f.test_range(min, max, has_null),
            Filter::DoubleRange(f) => f.test_range(min as f64, max as f64, has_null),
            Filter::MultiRange(f) => {
                (has_null && f.null_allowed())
                    || f.filters()
                        .iter()
                        .any(|c| c.test_float_range(min, max, has_null))
            }
            _ => false,
        }
    }

    /// `test_int64_range` for byte-string statistics. A missing page bound
    /// means the page is unbounded on that side and cannot be pruned by it.
    pub fn test_bytes_range(
        &self,
        min: Option<&[u8]>,
        max: Option<&[u8]>,
        has_null: bool,
    ) -> bool {
        match self {
            Filter::AlwaysTrue | Filter::IsNotNull => true,
            Filter::IsNull => has_null,
            Filter::BytesRange(f) => f.test_bytes_range(min, max, has_null),
            Filter::BytesValues(f) => f.test_bytes_range(min, max, has_null),
            Filter::MultiRange(f) => f.test_bytes_range(min, max, has_null),
            _ => false,
        }
    }

    /// Deep copy, optionally replacing the null bit.
    ///
    /// The constant and null-existence variants have intrinsic null
    /// semantics and ignore the override.
    pub fn clone_with(&self, null_allowed: Option<bool>) -> Filter {
        let Some(null_allowed) = null_allowed else {
            return self.clone();
        };
        match self {
            Filter::AlwaysTrue
            | Filter::AlwaysFalse
            | Filter::IsNull
            | Filter::IsNotNull => self.clone(),
            Filter::BoolValue(f) => f.clone_with(null_allowed).into(),
            Filter::BigintRange(f) => f.clone_with(null_allowed).into(),
            Filter::BigintValuesUsingBitmask(f) => f.clone_with(null_allowed).into(),
            Filter::BigintValuesUsingHashTable(f) => f.clone_with(null_allowed).into(),
            Filter::BigintMultiRange(f) => f.clone_with(null_allowed).into(),
            Filter::DoubleRange(f) => f.clone_with(null_allowed).into(),
            Filter::FloatRange(f) => f.clone_with(null_allowed).into(),
            Filter::BytesRange(f) => f.clone_with(null_allowed).into(),
            Filter::BytesValues(f) => f.clone_with(null_allowed).into(),
            Filter::MultiRange(f) => f.clone_with(null_allowed).into(),
        }
    }
}

impl Display for Filter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Filter({}, {}, {})",
            self.kind(),
            if self.is_deterministic() {
                "deterministic"
            } else {
                "nondeterministic"
            },
            if self.test_null() {
                "null allowed"
            } else {
                "null not allowed"
            }
        )
    }
}

impl From<BoolValue> for Filter {
    fn from(f: BoolValue) -> Self {
        Filter::BoolValue(f)
    }
}

impl From<BigintRange> for Filter {
    fn from(f: BigintRange) -> Self {
        Filter::BigintRange(f)
    }
}

impl From<BigintValuesUsingBitmask> for Filter {
    fn from(f: BigintValuesUsingBitmask) -> Self {
        Filter::BigintValuesUsingBitmask(f)
    }
}

impl From<BigintValuesUsingHashTable> for Filter {
    fn from(f: BigintValuesUsingHashTable) -> Self {
        Filter::BigintValuesUsingHashTable(f)
    }
}

impl From<BigintMultiRange> for Filter {
    fn from(f: BigintMultiRange) -> Self {
        Filter::BigintMultiRange(f)
    }
}

impl From<DoubleRange> for Filter {
    fn from(f: DoubleRange) -> Self {
        Filter::DoubleRange(f)
    }
}

impl From<FloatRange> for Filter {
    fn from(f: FloatRange) -> Self {
        Filter::FloatRange(f)
    }
}

impl From<BytesRange> for Filter {
    fn from(f: BytesRange) -> Self {
        Filter::BytesRange(f)
    }
}

impl From<BytesValues> for Filter {
    fn from(f: BytesValues) -> Self {
        Filter::BytesValues(f)
    }
}

impl From<MultiRange> for Filter {
    fn from(f: MultiRange) -> Self {
        Filter::MultiRange(f)
    }
}
