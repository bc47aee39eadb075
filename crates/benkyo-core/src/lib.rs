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

//! benkyo-core: Core library for the benkyo study collection tool.
//!
//! This library provides I/O-free types and algorithms for:
//! - Parsing JSON collection files (flat and grouped layouts)
//! - Deriving deterministic, seed-reproducible collection views
//! - Study-progress filtering (learned/focus tags keyed by study key)
//! - Consolidating collections into the grouped layout

pub mod collection;
pub mod config;
pub mod error;
pub mod organize;
pub mod progress;
pub mod rng;
pub mod types;
pub mod view;

// Re-exports for convenience
pub use collection::{Category, Collection, parse_collection};
pub use config::StudyConfig;
pub use error::{ErrorReport, Fallible, fail};
pub use organize::group_collection;
pub use progress::{AdapterKind, ProgressAdapter, is_visible};
pub use rng::{Mulberry32, permute};
pub use types::collection_key::CollectionKey;
pub use types::entry::Entry;
pub use types::state::{CollectionState, FilterFlags};
pub use view::{View, compose_view};
