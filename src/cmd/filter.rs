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

use clap::ValueEnum;

use benkyo_core::FilterFlags;
use benkyo_core::error::Fallible;

use crate::library::Library;

/// The three filter states offered by the UI. The underlying predicate
/// tolerates both flags at once, but the command surface keeps them
/// exclusive.
#[derive(ValueEnum, Clone, Copy, PartialEq)]
pub enum FilterChoice {
    /// Show every entry.
    None,
    /// Hide entries already tagged learned.
    SkipLearned,
    /// Show only entries tagged focus.
    FocusOnly,
}

impl From<FilterChoice> for FilterFlags {
    fn from(choice: FilterChoice) -> Self {
        match choice {
            FilterChoice::None => FilterFlags::default(),
            FilterChoice::SkipLearned => FilterFlags {
                skip_learned: true,
                focus_only: false,
            },
            FilterChoice::FocusOnly => FilterFlags {
                skip_learned: false,
                focus_only: true,
            },
        }
    }
}

pub fn set_filter(
    directory: Option<String>,
    collection: &str,
    choice: FilterChoice,
) -> Fallible<()> {
    let library = Library::open(directory)?;
    let loaded = library.find(collection)?;
    let key = loaded.collection.key();
    let mut state = library.db.get_state(key)?;
    state.set_filter(choice.into());
    library.db.set_state(key, &state)?;
    log::debug!("Set filter '{}' for {key}", state.study_filter());
    match choice {
        FilterChoice::None => println!("Cleared filter for '{}'.", loaded.collection.name),
        FilterChoice::SkipLearned => {
            println!("'{}' now hides learned entries.", loaded.collection.name)
        }
        FilterChoice::FocusOnly => {
            println!("'{}' now shows only focus entries.", loaded.collection.name)
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_filter_persists() -> Fallible<()> {
        let dir = tempdir()?;
        fs::write(
            dir.path().join("kanji.json"),
            r#"{"name": "Kanji", "category": "kanji", "entries": [{"kanji": "日"}]}"#,
        )?;
        let directory = Some(dir.path().display().to_string());
        set_filter(directory.clone(), "Kanji", FilterChoice::SkipLearned)?;
        let library = Library::open(directory.clone())?;
        let state = library.db.get_state(library.find("Kanji")?.collection.key())?;
        assert!(state.filter_flags().skip_learned);
        // Switching to none clears the stored token string.
        set_filter(directory.clone(), "Kanji", FilterChoice::None)?;
        let library = Library::open(directory)?;
        let state = library.db.get_state(library.find("Kanji")?.collection.key())?;
        assert_eq!(state.study_filter(), "");
        Ok(())
    }
}
