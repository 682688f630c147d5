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

//! Floating point range filters.
//!
//! [`DoubleRange`] and [`FloatRange`] share one generic implementation.
//! Endpoints are optional (`None` means unbounded on that side) and carry
//! their own exclusivity flag. NaN never participates in the ordering: a
//! NaN probe is answered by the filter's `nan_allowed` policy alone, and
//! NaN endpoints are rejected at construction.

use crate::error::Result;
use crate::plan_err;

mod private {
    pub trait Sealed {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

/// Scalar types [`FloatingPointRange`] ranges over.
pub trait FloatValue:
    Copy + PartialEq + PartialOrd + std::fmt::Debug + private::Sealed
{
    fn is_nan(self) -> bool;
}

impl FloatValue for f32 {
    fn is_nan(self) -> bool {
        f32::is_nan(self)
    }
}

impl FloatValue for f64 {
    fn is_nan(self) -> bool {
        f64::is_nan(self)
    }
}

/// Numeric range with open/closed ends and an explicit NaN policy.
#[derive(Debug, Clone, PartialEq)]
pub struct FloatingPointRange<T: FloatValue> {
    lower: Option<T>,
    lower_exclusive: bool,
    upper: Option<T>,
    upper_exclusive: bool,
    nan_allowed: bool,
    null_allowed: bool,
}

/// Range over 64-bit floating point values.
pub type DoubleRange = FloatingPointRange<f64>;

/// Range over 32-bit floating point values.
pub type FloatRange = FloatingPointRange<f32>;

impl<T: FloatValue> FloatingPointRange<T> {
    pub fn try_new(
        lower: Option<T>,
        lower_exclusive: bool,
        upper: Option<T>,
        upper_exclusive: bool,
        nan_allowed: bool,
        null_allowed: bool,
    ) -> Result<Self> {
        if lower.is_some_and(|v| v.is_nan()) || upper.is_some_and(|v| v.is_nan()) {
            return plan_err!("floating point range endpoints must not be NaN");
        }
        if let (Some(lo), Some(hi)) = (lower, upper) {
            if lo > hi {
                return plan_err!(
                    "floating point range requires lower <= upper, got [{lo:?}, {hi:?}]"
                );
            }
        }
        Ok(Self {
            lower,
            lower_exclusive,
            upper,
            upper_exclusive,
            nan_allowed,
            null_allowed,
        })
    }

    pub fn lower(&self) -> Option<T> {
        self.lower
    }

    pub fn upper(&self) -> Option<T> {
        self.upper
    }

    pub fn lower_exclusive(&self) -> bool {
        self.lower_exclusive
    }

    pub fn upper_exclusive(&self) -> bool {
        self.upper_exclusive
    }

    pub fn lower_unbounded(&self) -> bool {
        self.lower.is_none()
    }

    pub fn upper_unbounded(&self) -> bool {
        self.upper.is_none()
    }

    pub fn nan_allowed(&self) -> bool {
        self.nan_allowed
    }

    pub fn null_allowed(&self) -> bool {
        self.null_allowed
    }

    pub fn test(&self, value: T) -> bool {
        if value.is_nan() {
            return self.nan_allowed;
        }
        if let Some(lo) = self.lower {
            if value < lo || (self.lower_exclusive && value == lo) {
                return false;
            }
        }
        if let Some(hi) = self.upper {
            if value > hi || (self.upper_exclusive && value == hi) {
                return false;
            }
        }
        true
    }

    pub fn test_range(&self, min: T, max: T, has_null: bool) -> bool {
        if has_null && self.null_allowed {
            return true;
        }
        if min == max {
            return self.test(min);
        }
        // Page entirely below the acceptance region.
        if let Some(lo) = self.lower {
            if max < lo || (self.lower_exclusive && max == lo) {
                return false;
            }
        }
        // Page entirely above it.
        if let Some(hi) = self.upper {
            if min > hi || (self.upper_exclusive && min == hi) {
                return false;
            }
        }
        true
    }

    /// Intersects two ranges into the filter for their conjunction, or
    /// `None` when no floating point value (NaN included) satisfies both.
    pub(crate) fn intersect(&self, other: &Self, null_allowed: bool) -> Option<Self> {
        let nan_allowed = self.nan_allowed && other.nan_allowed;

        let (lower, lower_exclusive) = tighter(
            self.lower,
            self.lower_exclusive,
            other.lower,
            other.lower_exclusive,
            |a, b| a > b,
        );
        let (upper, upper_exclusive) = tighter(
            self.upper,
            self.upper_exclusive,
            other.upper,
            other.upper_exclusive,
            |a, b| a < b,
        );

        if let (Some(lo), Some(hi)) = (lower, upper) {
            if lo > hi || (lo == hi && (lower_exclusive || upper_exclusive)) {
                if !nan_allowed {
                    return None;
                }
                // The value interval is empty but both sides accept NaN, so
                // the conjunction accepts exactly NaN.
                return Some(Self {
                    lower: Some(lo),
                    lower_exclusive: true,
                    upper: Some(lo),
                    upper_exclusive: true,
                    nan_allowed: true,
                    null_allowed,
                });
            }
        }
        Some(Self {
            lower,
            lower_exclusive,
            upper,
            upper_exclusive,
            nan_allowed,
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

/// Picks the tighter of two optional endpoints. `wins` decides strict
/// preference; at equal endpoints exclusivity is the stricter choice.
fn tighter<T: FloatValue>(
    a: Option<T>,
    a_exclusive: bool,
    b: Option<T>,
    b_exclusive: bool,
    wins: impl Fn(T, T) -> bool,
) -> (Option<T>, bool) {
    match (a, b) {
        (None, None) => (None, false),
        (Some(_), None) => (a, a_exclusive),
        (None, Some(_)) => (b, b_exclusive),
        (Some(va), Some(vb)) => {
            if wins(va, vb) {
                (a, a_exclusive)
            } else if wins(vb, va) {
                (b, b_exclusive)
            } else {
                (a, a_exclusive || b_exclusive)
            }
        }
    }
}
