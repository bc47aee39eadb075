// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fmt::Display;
use std::fmt::Formatter;

use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;
use crate::error::Fallible;

/// Stable identifier for a collection, used to key persisted UI state and
/// progress records. Derived from the collection's name rather than its
/// path, so records survive renaming the file within a directory.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CollectionKey {
    #[serde(skip)]
    inner: blake3::Hash,
}

impl CollectionKey {
    pub fn from_name(name: &str) -> Self {
        Self {
            inner: blake3::hash(name.as_bytes()),
        }
    }

    pub fn to_hex(self) -> String {
        self.inner.to_hex().to_string()
    }

    pub fn from_hex(s: &str) -> Fallible<Self> {
        let inner = blake3::Hash::from_hex(s)
            .map_err(|_| ErrorReport::new("invalid collection key in state database"))?;
        Ok(Self { inner })
    }
}

impl Display for CollectionKey {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl TryFrom<String> for CollectionKey {
    type Error = ErrorReport;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        CollectionKey::from_hex(&value)
    }
}

impl From<CollectionKey> for String {
    fn from(key: CollectionKey) -> String {
        key.to_hex()
    }
}
