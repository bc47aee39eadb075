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

use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use benkyo_core::error::Fallible;

use crate::library::Library;

/// Set (or clear) the persisted order seed for a collection. The derived
/// ordering itself is never stored; the seed alone reproduces it.
pub fn shuffle_collection(
    directory: Option<String>,
    collection: &str,
    seed: Option<u32>,
    clear: bool,
) -> Fallible<()> {
    let library = Library::open(directory)?;
    let loaded = library.find(collection)?;
    let key = loaded.collection.key();
    let mut state = library.db.get_state(key)?;
    if clear {
        state.clear_seed();
        library.db.set_state(key, &state)?;
        log::debug!("Cleared seed for {key}");
        println!("Cleared shuffle for '{}'.", loaded.collection.name);
        return Ok(());
    }
    let seed = seed.unwrap_or_else(fresh_seed);
    state.set_seed(seed);
    library.db.set_state(key, &state)?;
    log::debug!("Set seed {seed} for {key}");
    println!("Shuffled '{}' under seed {}.", loaded.collection.name, seed);
    Ok(())
}

/// A fresh seed from the clock, masked to 32 bits.
fn fresh_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos() as u32
}
