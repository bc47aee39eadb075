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

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::collection::Category;
use crate::error::Fallible;

/// Optional directory-level settings, read from `benkyo.toml` next to the
/// collection files.
#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct StudyConfig {
    /// Override for the state-database file name.
    pub database: Option<String>,
    /// Per-category study-key field overrides, e.g.
    /// `keys = { vocabulary = ["kanji", "kana"], grammar = ["pattern"] }`.
    pub keys: BTreeMap<String, Vec<String>>,
}

impl StudyConfig {
    pub fn parse(text: &str) -> Fallible<Self> {
        Ok(toml::from_str(text)?)
    }

    /// The configured key-field override for a category, if any.
    pub fn key_fields(&self, category: &Category) -> Option<&[String]> {
        let name = String::from(category.clone());
        self.keys.get(&name).map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config() -> Fallible<()> {
        let config = StudyConfig::parse("")?;
        assert_eq!(config, StudyConfig::default());
        assert_eq!(config.key_fields(&Category::Vocabulary), None);
        Ok(())
    }

    #[test]
    fn test_full_config() -> Fallible<()> {
        let text = r#"
            database = "state.db"

            [keys]
            vocabulary = ["word", "reading"]
            grammar = ["pattern"]
        "#;
        let config = StudyConfig::parse(text)?;
        assert_eq!(config.database.as_deref(), Some("state.db"));
        assert_eq!(
            config.key_fields(&Category::Vocabulary),
            Some(&["word".to_string(), "reading".to_string()][..])
        );
        assert_eq!(
            config.key_fields(&Category::Grammar),
            Some(&["pattern".to_string()][..])
        );
        Ok(())
    }

    #[test]
    fn test_malformed_config() {
        assert!(StudyConfig::parse("database = [").is_err());
    }
}
