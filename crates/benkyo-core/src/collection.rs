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

//! Collection files and their two on-disk layouts.
//!
//! A collection is a named set of study entries sharing a schema, stored as
//! one JSON file. The flat layout lists entries directly; the grouped layout
//! (written by `reorganize`) nests entries under shared per-group defaults.
//! Loading folds the defaults back into each entry, so the rest of the
//! system only ever sees the flat form.

use std::fmt::Display;
use std::fmt::Formatter;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use crate::error::Fallible;
use crate::types::collection_key::CollectionKey;
use crate::types::entry::Entry;

/// The declared category of a collection. The category decides how study
/// keys are derived for progress tracking; collections with an unrecognized
/// category have no study keys and cannot be filtered.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Vocabulary,
    Grammar,
    Other(String),
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        match value.as_str() {
            "vocabulary" | "vocab" | "kanji" => Category::Vocabulary,
            "grammar" => Category::Grammar,
            _ => Category::Other(value),
        }
    }
}

impl From<Category> for String {
    fn from(category: Category) -> String {
        match category {
            Category::Vocabulary => "vocabulary".to_string(),
            Category::Grammar => "grammar".to_string(),
            Category::Other(s) => s,
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", String::from(self.clone()))
    }
}

/// A collection loaded into memory: every entry in file order, with group
/// defaults already folded in.
#[derive(Clone, Debug, PartialEq)]
pub struct Collection {
    pub name: String,
    pub category: Category,
    pub entries: Vec<Entry>,
}

impl Collection {
    /// The key under which this collection's state and progress are stored.
    pub fn key(&self) -> CollectionKey {
        CollectionKey::from_name(&self.name)
    }
}

/// The flat layout: entries listed directly.
#[derive(Debug, Serialize, Deserialize)]
pub struct FlatCollectionFile {
    pub name: String,
    pub category: Category,
    pub entries: Vec<Entry>,
}

/// One group in the grouped layout. Fields in `defaults` apply to every
/// entry of the group; an entry's own field wins on collision.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntryGroup {
    #[serde(default)]
    pub defaults: Map<String, Value>,
    pub entries: Vec<Entry>,
}

/// The grouped layout, as written by `reorganize`.
#[derive(Debug, Serialize, Deserialize)]
pub struct GroupedCollectionFile {
    pub name: String,
    pub category: Category,
    pub groups: Vec<EntryGroup>,
}

impl GroupedCollectionFile {
    /// Expand every group back into flat entries, in group order.
    pub fn flatten(&self) -> Vec<Entry> {
        let mut entries = Vec::new();
        for group in &self.groups {
            for entry in &group.entries {
                entries.push(merge_defaults(&group.defaults, entry));
            }
        }
        entries
    }
}

/// Either on-disk layout. Grouped files are recognized by their `groups`
/// field.
#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CollectionFile {
    Grouped(GroupedCollectionFile),
    Flat(FlatCollectionFile),
}

/// Parse a collection file's JSON content.
pub fn parse_collection(text: &str) -> Fallible<Collection> {
    let file: CollectionFile = serde_json::from_str(text)?;
    Ok(match file {
        CollectionFile::Flat(flat) => Collection {
            name: flat.name,
            category: flat.category,
            entries: flat.entries,
        },
        CollectionFile::Grouped(grouped) => {
            let entries = grouped.flatten();
            Collection {
                name: grouped.name,
                category: grouped.category,
                entries,
            }
        }
    })
}

fn merge_defaults(defaults: &Map<String, Value>, entry: &Entry) -> Entry {
    let mut fields = defaults.clone();
    for (name, value) in entry.fields() {
        fields.insert(name.clone(), value.clone());
    }
    Entry::from_fields(fields)
}
