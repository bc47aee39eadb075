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

use std::fs;
use std::path::PathBuf;

use benkyo_core::Category;
use benkyo_core::collection::FlatCollectionFile;
use benkyo_core::error::Fallible;
use benkyo_core::error::fail;

use crate::library::load_collections;

/// Merge every collection in a directory (optionally restricted to one
/// category) into a single flat collection, written to a file or stdout.
pub fn aggregate_collections(
    directory: Option<String>,
    name: String,
    category: Option<String>,
    output: Option<String>,
) -> Fallible<()> {
    let directory = PathBuf::from(directory.unwrap_or_else(|| ".".to_string()));
    if !directory.is_dir() {
        return fail("directory does not exist.");
    }
    let category_filter: Option<Category> = category.map(Category::from);
    let mut entries = Vec::new();
    let mut categories: Vec<Category> = Vec::new();
    let mut included = 0;
    for loaded in load_collections(&directory)? {
        if let Some(wanted) = &category_filter {
            if &loaded.collection.category != wanted {
                continue;
            }
        }
        if !categories.contains(&loaded.collection.category) {
            categories.push(loaded.collection.category.clone());
        }
        entries.extend(loaded.collection.entries);
        included += 1;
    }
    if included == 0 {
        return fail("no collections to aggregate.");
    }
    // A mix of categories has no single study-key derivation.
    let category = match categories.as_slice() {
        [only] => only.clone(),
        _ => Category::Other("mixed".to_string()),
    };
    let merged = FlatCollectionFile {
        name,
        category,
        entries,
    };
    let json = serde_json::to_string_pretty(&merged)?;
    match output {
        Some(path) => {
            fs::write(&path, json + "\n")?;
            println!(
                "Aggregated {} collections ({} entries) into {}.",
                included,
                merged.entries.len(),
                path
            );
        }
        None => println!("{json}"),
    }
    Ok(())
}
