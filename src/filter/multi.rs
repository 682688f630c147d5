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

//! Disjunction of heterogeneous filters on one column.

use crate::filter::Filter;

/// Any-true disjunction of child filters on the same column, used for
/// predicates such as `col IN (...)` that mix range shapes.
///
/// The NaN policy lives on the disjunction itself and is consulted before
/// any child: a NaN probe returns `nan_allowed` no matter what the
/// children would say.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiRange {
    filters: Vec<Filter>,
    null_allowed: bool,
    nan_allowed: bool,
}

impl MultiRange {
    pub fn new(filters: Vec<Filter>, null_allowed: bool, nan_allowed: bool) -> Self {
        Self {
            filters,
            null_allowed,
            nan_allowed,
        }
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn null_allowed(&self) -> bool {
        self.null_allowed
    }

    pub fn nan_allowed(&self) -> bool {
        self.nan_allowed
    }

    pub fn test_double(&self, value: f64) -> bool {
        if value.is_nan() {
            return self.nan_allowed;
        }
        self.filters.iter().any(|f| f.test_double(value))
    }

    pub fn test_float(&self, value: f32) -> bool {
        if value.is_nan() {
            return self.nan_allowed;
        }
        self.filters.iter().any(|f| f.test_float(value))
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
        self.filters
            .iter()
            .any(|f| f.test_bytes_range(min, max, has_null))
    }

    pub(crate) fn clone_with(&self, null_allowed: bool) -> Self {
        Self {
            filters: self.filters.clone(),
            null_allowed,
            nan_allowed: self.nan_allowed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{BytesRange, FloatRange};

    fn sample() -> MultiRange {
        let low = FloatRange::try_new(Some(0.0), false, Some(1.0), false, false, false)
            .unwrap();
        let high = FloatRange::try_new(Some(5.0), false, Some(6.0), false, false, false)
            .unwrap();
        MultiRange::new(vec![low.into(), high.into()], false, false)
    }

    #[test]
    fn any_true_over_children() {
        let filter = sample();
        assert!(filter.test_float(0.5));
        assert!(filter.test_float(5.5));
        assert!(!filter.test_float(3.0));
        assert!(!filter.test_float(-1.0));
    }

    #[test]
    fn nan_short_circuits_children() {
        // Children that would accept NaN are never consulted.
        let nan_child =
            FloatRange::try_new(Some(0.0), false, Some(1.0), false, true, false)
                .unwrap();
        let filter = MultiRange::new(vec![nan_child.into()], false, false);
        assert!(!filter.test_float(f32::NAN));

        let filter = sample();
        let filter = MultiRange::new(filter.filters().to_vec(), false, true);
        assert!(filter.test_float(f32::NAN));
    }

    #[test]
    fn heterogeneous_children() {
        let bytes = BytesRange::try_new(
            Some(b"a".to_vec()),
            false,
            Some(b"c".to_vec()),
            false,
            false,
        )
        .unwrap();
        let floats =
            FloatRange::try_new(Some(0.0), false, Some(1.0), false, false, false)
                .unwrap();
        let filter = MultiRange::new(vec![bytes.into(), floats.into()], true, false);

        assert!(Filter::from(filter.clone()).test_bytes(b"b"));
        assert!(!Filter::from(filter.clone()).test_bytes(b"d"));
        assert!(Filter::from(filter.clone()).test_float(0.5));
        assert!(filter.test_bytes_range(Some(b"b"), Some(b"d"), false));
        assert!(!filter.test_bytes_range(Some(b"d"), Some(b"e"), false));
        assert!(filter.test_bytes_range(Some(b"d"), Some(b"e"), true));
    }
}
