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

use serde::Serialize;

use benkyo_core::error::Fallible;
use benkyo_core::error::fail;

use crate::library::INDEX_FILE;
use crate::library::load_collections;

#[derive(Serialize)]
struct IndexFile {
    collections: Vec<IndexRow>,
}

#[derive(Serialize)]
struct IndexRow {
    file: String,
    name: String,
    category: String,
    count: usize,
}

/// Rebuild `index.json` for a collection directory. The index is derived
/// data; it is always regenerated from scratch, never merged.
pub fn rebuild_index(directory: Option<String>) -> Fallible<()> {
    let directory = PathBuf::from(directory.unwrap_or_else(|| ".".to_string()));
    if !directory.is_dir() {
        return fail("directory does not exist.");
    }
    let rows: Vec<IndexRow> = load_collections(&directory)?
        .into_iter()
        .map(|loaded| IndexRow {
            file: loaded.file,
            name: loaded.collection.name,
            category: loaded.collection.category.to_string(),
            count: loaded.collection.entries.len(),
        })
        .collect();
    let count = rows.len();
    let index = IndexFile { collections: rows };
    let json = serde_json::to_string_pretty(&index)?;
    fs::write(directory.join(INDEX_FILE), json + "\n")?;
    println!("Indexed {count} collections.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_rebuild_index() -> Fallible<()> {
        let dir = tempdir()?;
        fs::write(
            dir.path().join("b.json"),
            r#"{"name": "B", "category": "grammar", "entries": [{"pattern": "〜ば"}]}"#,
        )?;
        fs::write(
            dir.path().join("a.json"),
            r#"{"name": "A", "category": "kanji", "entries": [{"kanji": "日"}, {"kanji": "月"}]}"#,
        )?;
        rebuild_index(Some(dir.path().display().to_string()))?;

        let index: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join(INDEX_FILE))?)?;
        let rows = index["collections"].as_array().unwrap();
        assert_eq!(rows.len(), 2);
        // Rows are in file-name order.
        assert_eq!(rows[0]["file"], "a.json");
        assert_eq!(rows[0]["count"], 2);
        assert_eq!(rows[0]["category"], "vocabulary");
        assert_eq!(rows[1]["name"], "B");
        Ok(())
    }

    #[test]
    fn test_rebuild_excludes_existing_index() -> Fallible<()> {
        let dir = tempdir()?;
        fs::write(
            dir.path().join("a.json"),
            r#"{"name": "A", "category": "kanji", "entries": [{"kanji": "日"}]}"#,
        )?;
        // Rebuilding twice must not try to index the index itself.
        rebuild_index(Some(dir.path().display().to_string()))?;
        rebuild_index(Some(dir.path().display().to_string()))?;
        let index: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join(INDEX_FILE))?)?;
        assert_eq!(index["collections"].as_array().unwrap().len(), 1);
        Ok(())
    }
}
