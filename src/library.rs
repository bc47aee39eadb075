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

//! Loading a collection directory: configuration, the state database, and
//! every collection file in it.

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use walkdir::WalkDir;

use benkyo_core::AdapterKind;
use benkyo_core::Collection;
use benkyo_core::ProgressAdapter;
use benkyo_core::StudyConfig;
use benkyo_core::error::ErrorReport;
use benkyo_core::error::Fallible;
use benkyo_core::error::fail;
use benkyo_core::parse_collection;

use crate::db::DEFAULT_DB_FILE;
use crate::db::Database;

/// Name of the optional directory-level config file.
pub const CONFIG_FILE: &str = "benkyo.toml";

/// Name of the generated collection index.
pub const INDEX_FILE: &str = "index.json";

/// A collection directory opened for use: its configuration, its state
/// database, and every collection in it.
pub struct Library {
    pub config: StudyConfig,
    pub db: Database,
    pub collections: Vec<LoadedCollection>,
}

pub struct LoadedCollection {
    /// File name relative to the directory.
    pub file: String,
    pub collection: Collection,
}

impl Library {
    pub fn open(directory: Option<String>) -> Fallible<Self> {
        let directory = PathBuf::from(directory.unwrap_or_else(|| ".".to_string()));
        if !directory.is_dir() {
            return fail("directory does not exist.");
        }
        let config = load_config(&directory)?;
        let db_file = config.database.clone().unwrap_or(DEFAULT_DB_FILE.to_string());
        let db = Database::open(&directory.join(db_file))?;
        let collections = load_collections(&directory)?;
        log::debug!(
            "Opened {} with {} collections",
            directory.display(),
            collections.len()
        );
        Ok(Self {
            config,
            db,
            collections,
        })
    }

    /// Find a collection by its name or its file name.
    pub fn find(&self, needle: &str) -> Fallible<&LoadedCollection> {
        self.collections
            .iter()
            .find(|c| c.collection.name == needle || c.file == needle)
            .ok_or_else(|| ErrorReport::new(format!("no collection named '{needle}'.")))
    }

    /// The resolved progress adapter for a collection, with persisted tag
    /// sets loaded. `None` when the category has no study keys.
    pub fn adapter(&self, collection: &Collection) -> Fallible<Option<ProgressAdapter>> {
        let Some(kind) = AdapterKind::for_category(&collection.category) else {
            return Ok(None);
        };
        let mut adapter = ProgressAdapter::new(kind);
        if let Some(fields) = self.config.key_fields(&collection.category) {
            adapter.override_key_fields(fields.to_vec());
        }
        let key = collection.key();
        adapter.load(self.db.learned_keys(key)?, self.db.focus_keys(key)?);
        Ok(Some(adapter))
    }
}

fn load_config(directory: &Path) -> Fallible<StudyConfig> {
    let path = directory.join(CONFIG_FILE);
    if !path.is_file() {
        return Ok(StudyConfig::default());
    }
    StudyConfig::parse(&fs::read_to_string(path)?)
}

/// The collection files in a directory: top-level `*.json`, minus the index
/// and dotfiles, in file-name order.
pub fn collection_files(directory: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(directory)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            let name = match path.file_name().and_then(|n| n.to_str()) {
                Some(name) => name,
                None => return false,
            };
            name.ends_with(".json") && name != INDEX_FILE && !name.starts_with('.')
        })
        .collect();
    files.sort();
    files
}

/// Load every collection in a directory, in file-name order.
pub fn load_collections(directory: &Path) -> Fallible<Vec<LoadedCollection>> {
    let mut collections = Vec::new();
    for path in collection_files(directory) {
        let file = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        let text = fs::read_to_string(&path)?;
        let collection = parse_collection(&text)
            .map_err(|e| ErrorReport::new(format!("failed to load {}: {}", file, e.message())))?;
        log::debug!("Loaded {} ({} entries)", file, collection.entries.len());
        collections.push(LoadedCollection { file, collection });
    }
    Ok(collections)
}
