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

use benkyo_core::error::Fallible;

use crate::library::Library;

pub fn mark_learned(
    directory: Option<String>,
    collection: &str,
    study_key: &str,
    remove: bool,
) -> Fallible<()> {
    let library = Library::open(directory)?;
    let loaded = library.find(collection)?;
    let now = chrono::Local::now().naive_local();
    library
        .db
        .set_learned(loaded.collection.key(), study_key, !remove, now)?;
    if remove {
        println!("Removed learned tag from '{study_key}'.");
    } else {
        println!("Marked '{study_key}' as learned.");
    }
    Ok(())
}

pub fn mark_focus(
    directory: Option<String>,
    collection: &str,
    study_key: &str,
    remove: bool,
) -> Fallible<()> {
    let library = Library::open(directory)?;
    let loaded = library.find(collection)?;
    let now = chrono::Local::now().naive_local();
    library
        .db
        .set_focus(loaded.collection.key(), study_key, !remove, now)?;
    if remove {
        println!("Removed focus tag from '{study_key}'.");
    } else {
        println!("Marked '{study_key}' as focus.");
    }
    Ok(())
}

pub fn clear_learned(directory: Option<String>, collection: &str) -> Fallible<()> {
    let library = Library::open(directory)?;
    let loaded = library.find(collection)?;
    let cleared = library.db.clear_learned(loaded.collection.key())?;
    println!(
        "Cleared {} learned tags from '{}'.",
        cleared, loaded.collection.name
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    fn setup(dir: &std::path::Path) -> Option<String> {
        fs::write(
            dir.join("kanji.json"),
            r#"{"name": "Kanji", "category": "kanji", "entries": [{"kanji": "日"}, {"kanji": "月"}]}"#,
        )
        .unwrap();
        Some(dir.display().to_string())
    }

    #[test]
    fn test_mark_and_remove() -> Fallible<()> {
        let dir = tempdir()?;
        let directory = setup(dir.path());
        mark_learned(directory.clone(), "Kanji", "日", false)?;
        mark_focus(directory.clone(), "Kanji", "月", false)?;
        let library = Library::open(directory.clone())?;
        let loaded = library.find("Kanji")?;
        let adapter = library.adapter(&loaded.collection)?.unwrap();
        assert!(adapter.is_learned("日"));
        assert!(adapter.is_focus("月"));
        mark_learned(directory.clone(), "Kanji", "日", true)?;
        let library = Library::open(directory)?;
        let adapter = library.adapter(&loaded.collection)?.unwrap();
        assert!(!adapter.is_learned("日"));
        Ok(())
    }

    #[test]
    fn test_clear_learned() -> Fallible<()> {
        let dir = tempdir()?;
        let directory = setup(dir.path());
        mark_learned(directory.clone(), "Kanji", "日", false)?;
        mark_learned(directory.clone(), "Kanji", "月", false)?;
        clear_learned(directory.clone(), "Kanji")?;
        let library = Library::open(directory)?;
        let loaded = library.find("Kanji")?;
        let adapter = library.adapter(&loaded.collection)?.unwrap();
        assert!(!adapter.is_learned("日"));
        assert!(!adapter.is_learned("月"));
        Ok(())
    }
}
