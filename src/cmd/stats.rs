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

use clap::ValueEnum;
use serde::Serialize;

use benkyo_core::compose_view;
use benkyo_core::error::Fallible;

use crate::library::Library;

#[derive(ValueEnum, Clone, Copy, PartialEq)]
pub enum StatsFormat {
    Text,
    Json,
}

impl Display for StatsFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StatsFormat::Text => write!(f, "text"),
            StatsFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Serialize)]
struct CollectionStats {
    name: String,
    category: String,
    entries: usize,
    learned: usize,
    focus: usize,
    /// Entries visible under the collection's persisted filter and shuffle
    /// state.
    visible: usize,
}

pub fn print_stats(directory: Option<String>, format: StatsFormat) -> Fallible<()> {
    let library = Library::open(directory)?;
    let mut rows = Vec::new();
    for loaded in &library.collections {
        let collection = &loaded.collection;
        let state = library.db.get_state(collection.key())?;
        let adapter = library.adapter(collection)?;
        let visible = compose_view(&collection.entries, &state, adapter.as_ref())
            .entries
            .len();
        // Learned/focus are counted over entries, not over raw tag rows, so
        // stale tags for removed entries don't inflate the numbers.
        let (learned, focus) = match &adapter {
            Some(adapter) => {
                let learned = collection
                    .entries
                    .iter()
                    .filter(|e| adapter.is_learned(&adapter.study_key(e)))
                    .count();
                let focus = collection
                    .entries
                    .iter()
                    .filter(|e| adapter.is_focus(&adapter.study_key(e)))
                    .count();
                (learned, focus)
            }
            None => (0, 0),
        };
        rows.push(CollectionStats {
            name: collection.name.clone(),
            category: collection.category.to_string(),
            entries: collection.entries.len(),
            learned,
            focus,
            visible,
        });
    }
    match format {
        StatsFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
        StatsFormat::Text => {
            for row in rows {
                println!(
                    "{} ({}): {} entries, {} learned, {} focus, {} visible",
                    row.name, row.category, row.entries, row.learned, row.focus, row.visible
                );
            }
        }
    }
    Ok(())
}
