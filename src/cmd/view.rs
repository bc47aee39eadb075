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
use std::iter::zip;

use clap::ValueEnum;

use benkyo_core::Entry;
use benkyo_core::ProgressAdapter;
use benkyo_core::compose_view;
use benkyo_core::error::Fallible;

use crate::library::Library;

#[derive(ValueEnum, Clone, Copy, PartialEq)]
pub enum ViewFormat {
    /// One line per visible entry.
    Text,
    /// The full view tuple as JSON.
    Json,
}

impl Display for ViewFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewFormat::Text => write!(f, "text"),
            ViewFormat::Json => write!(f, "json"),
        }
    }
}

pub fn print_view(
    directory: Option<String>,
    collection: &str,
    format: ViewFormat,
) -> Fallible<()> {
    let library = Library::open(directory)?;
    let loaded = library.find(collection)?;
    let state = library.db.get_state(loaded.collection.key())?;
    let adapter = library.adapter(&loaded.collection)?;
    let view = compose_view(&loaded.collection.entries, &state, adapter.as_ref());
    match format {
        ViewFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
        ViewFormat::Text => {
            for (entry, index) in zip(&view.entries, &view.indices) {
                println!("{:>4}  {}", index, entry_label(entry, adapter.as_ref())?);
            }
            let order = if view.is_shuffled {
                // order_seed is always present when is_shuffled is set.
                format!("shuffled (seed {})", view.order_seed.unwrap_or_default())
            } else {
                "natural order".to_string()
            };
            println!(
                "{} of {} entries, {}.",
                view.entries.len(),
                loaded.collection.entries.len(),
                order
            );
        }
    }
    Ok(())
}

/// A one-line label for an entry: its study key when it has one, otherwise
/// the compact JSON of its fields.
fn entry_label(entry: &Entry, adapter: Option<&ProgressAdapter>) -> Fallible<String> {
    if let Some(adapter) = adapter {
        let key = adapter.study_key(entry);
        if !key.is_empty() {
            return Ok(key);
        }
    }
    Ok(serde_json::to_string(entry)?)
}
