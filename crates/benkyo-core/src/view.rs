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

//! The derived collection view: the ordered, filtered entry list a front
//! end renders. Recomputed from persisted state on every render pass and
//! never stored, so the ordering survives reloads through the seed alone.

use serde::Serialize;

use crate::progress::ProgressAdapter;
use crate::progress::is_visible;
use crate::rng::permute;
use crate::types::entry::Entry;
use crate::types::state::CollectionState;

/// The view over a collection's entries. `indices[i]` is the original array
/// position of `entries[i]`, so a renderer can map a visible row back to the
/// underlying entry for writes.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct View {
    pub entries: Vec<Entry>,
    pub indices: Vec<usize>,
    pub is_shuffled: bool,
    pub order_seed: Option<u32>,
}

/// Compose the view for one render pass.
///
/// The filter runs first and the permutation is applied to the kept subset,
/// so toggling a filter under a fixed seed reorders only the surviving
/// entries. Without an adapter the filter cannot apply and every entry is
/// kept. Pure: identical inputs always produce an identical view.
pub fn compose_view(
    original: &[Entry],
    state: &CollectionState,
    adapter: Option<&ProgressAdapter>,
) -> View {
    let flags = state.filter_flags();
    let kept: Vec<usize> = match adapter {
        Some(adapter) if !flags.is_empty() => (0..original.len())
            .filter(|&i| is_visible(&original[i], adapter, flags))
            .collect(),
        _ => (0..original.len()).collect(),
    };
    match state.order_seed() {
        Some(seed) if !kept.is_empty() => {
            let perm = permute(kept.len(), seed);
            let indices: Vec<usize> = perm.iter().map(|&i| kept[i]).collect();
            let entries = indices.iter().map(|&i| original[i].clone()).collect();
            View {
                entries,
                indices,
                is_shuffled: true,
                order_seed: Some(seed),
            }
        }
        _ => {
            let entries = kept.iter().map(|&i| original[i].clone()).collect();
            View {
                entries,
                indices: kept,
                is_shuffled: false,
                order_seed: None,
            }
        }
    }
}
