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

//! Boolean value filter.

/// Accepts a single boolean value, and optionally null.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoolValue {
    value: bool,
    null_allowed: bool,
}

impl BoolValue {
    pub fn new(value: bool, null_allowed: bool) -> Self {
        Self {
            value,
            null_allowed,
        }
    }

    pub fn value(&self) -> bool {
        self.value
    }

    pub fn null_allowed(&self) -> bool {
        self.null_allowed
    }

    pub fn test_bool(&self, value: bool) -> bool {
        self.value == value
    }

    pub(crate) fn clone_with(&self, null_allowed: bool) -> Self {
        Self {
            value: self.value,
            null_allowed,
        }
    }
}
