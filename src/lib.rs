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

//! Scalar column filters for predicate pushdown in columnar scans.
//!
//! Predicates compiled from `WHERE` clauses are lowered to [`Filter`]
//! values, shipped to readers, and evaluated per value
//! ([`Filter::test_int64`], [`Filter::test_bytes`], ...) and per page of
//! `(min, max, has_null)` statistics ([`Filter::test_int64_range`], ...)
//! to keep or drop rows and to skip whole pages. When two predicates apply
//! to the same column under `AND`, [`Filter::merge_with`] composes them
//! into one filter.
//!
//! Filters are plain immutable values: no I/O, no locks, freely shareable
//! across threads once constructed.
//!
//! # Example
//!
//! ```
//! use scan_filter::{create_bigint_values, BigintRange, Filter};
//!
//! # fn main() -> scan_filter::Result<()> {
//! // col IN (2, 3, 5, 7) AND col BETWEEN 3 AND 10
//! let in_list = create_bigint_values(&[2, 3, 5, 7], false)?;
//! let between: Filter = BigintRange::try_new(3, 10, false)?.into();
//! let merged = in_list.merge_with(&between)?;
//!
//! assert!(merged.test_int64(5));
//! assert!(!merged.test_int64(2));
//! // Pages that cannot contain 3, 5 or 7 are pruned.
//! assert!(!merged.test_int64_range(100, 200, false));
//! # Ok(())
//! # }
//! ```

mod error;
pub mod filter;

pub use error::{FilterError, Result};
pub use filter::{
    create_bigint_values, BigintMultiRange, BigintRange, BigintValuesUsingBitmask,
    BigintValuesUsingHashTable, BoolValue, BytesRange, BytesValues, DoubleRange,
    Filter, FilterKind, FloatRange, FloatValue, FloatingPointRange, MultiRange,
};
