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

//! Error types for filter construction and composition.
//!
//! Two classes of errors can be raised:
//!
//! 1. [`FilterError::Plan`]: invalid arguments handed to a filter
//!    constructor, such as a range with `lower > upper`. These indicate a
//!    mistake in the code that lowers predicates to filters.
//!
//! 2. [`FilterError::NotImplemented`]: a [`merge_with`] pair whose
//!    semantics are not defined. Planners must not emit such pairs.
//!
//! [`FilterError::Internal`] exists for invariants the compiler cannot
//! check; reaching it is a bug in this crate.
//!
//! [`merge_with`]: crate::Filter::merge_with

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::result;

/// Result type for operations that could result in a [`FilterError`].
pub type Result<T, E = FilterError> = result::Result<T, E>;

/// Error raised while constructing or combining filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// Error caused by invalid constructor arguments.
    ///
    /// The caller (typically the predicate-lowering layer) supplied
    /// arguments that violate a documented precondition, for example a
    /// `BigintRange` with `lower > upper` or a multi-range with
    /// overlapping children.
    Plan(String),
    /// Error due to a broken invariant inside this crate.
    ///
    /// This error should not happen in normal usage. It results from
    /// something that wasn't expected by the implementation and is most
    /// likely a bug.
    Internal(String),
    /// A merge pair without defined semantics was requested.
    NotImplemented(String),
}

impl Display for FilterError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            FilterError::Plan(desc) => {
                write!(f, "Error during planning: {desc}")
            }
            FilterError::Internal(desc) => {
                write!(f, "Internal error: {desc}. This is a bug in scan-filter")
            }
            FilterError::NotImplemented(desc) => {
                write!(f, "This feature is not implemented: {desc}")
            }
        }
    }
}

impl Error for FilterError {}

/// Macro wraps `Err(FilterError::Plan)`, supporting `format!` placeholders.
///
/// Example: `plan_err!("range [{lower}, {upper}] is inverted")`
#[macro_export]
macro_rules! plan_err {
    ($($args:expr),*) => {
        Err($crate::FilterError::Plan(format!($($args),*)))
    };
}

/// Macro wraps `Err(FilterError::Internal)`, supporting `format!` placeholders.
#[macro_export]
macro_rules! internal_err {
    ($($args:expr),*) => {
        Err($crate::FilterError::Internal(format!($($args),*)))
    };
}

/// Macro wraps `Err(FilterError::NotImplemented)`, supporting `format!`
/// placeholders.
#[macro_export]
macro_rules! not_impl_err {
    ($($args:expr),*) => {
        Err($crate::FilterError::NotImplemented(format!($($args),*)))
    };
}
