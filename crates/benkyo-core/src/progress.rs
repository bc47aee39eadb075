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

//! Study-progress tracking: which entries are learned, which are focused.
//!
//! Progress is keyed by a *study key* derived from an entry's identifying
//! field, not by position, so records survive reordering and re-editing of
//! the collection file.

use std::collections::HashSet;

use crate::collection::Category;
use crate::types::entry::Entry;
use crate::types::state::FilterFlags;

/// Which study-key derivation a collection uses. An explicit variant tag
/// rather than a trait object: the caller selects the variant from the
/// collection's category, and the view engine is written once against the
/// adapter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdapterKind {
    /// Key on the `kanji` field, falling back to `kana`.
    Vocabulary,
    /// Key on the `pattern` field.
    Grammar,
}

impl AdapterKind {
    /// The adapter variant for a category, if it has one. Collections
    /// without a recognized category have no study keys and are
    /// unfilterable.
    pub fn for_category(category: &Category) -> Option<Self> {
        match category {
            Category::Vocabulary => Some(AdapterKind::Vocabulary),
            Category::Grammar => Some(AdapterKind::Grammar),
            Category::Other(_) => None,
        }
    }

    fn default_key_fields(&self) -> &'static [&'static str] {
        match self {
            AdapterKind::Vocabulary => &["kanji", "kana"],
            AdapterKind::Grammar => &["pattern"],
        }
    }
}

/// Correlates entries with learned/focus progress records through a derived
/// study key.
#[derive(Clone, Debug)]
pub struct ProgressAdapter {
    kind: AdapterKind,
    key_fields: Vec<String>,
    learned: HashSet<String>,
    focus: HashSet<String>,
}

impl ProgressAdapter {
    pub fn new(kind: AdapterKind) -> Self {
        Self {
            kind,
            key_fields: kind
                .default_key_fields()
                .iter()
                .map(|s| s.to_string())
                .collect(),
            learned: HashSet::new(),
            focus: HashSet::new(),
        }
    }

    pub fn kind(&self) -> AdapterKind {
        self.kind
    }

    /// Replace the key derivation fields (directory configuration hook).
    pub fn override_key_fields(&mut self, fields: Vec<String>) {
        if !fields.is_empty() {
            self.key_fields = fields;
        }
    }

    /// Load persisted tag sets, replacing any in-memory tags.
    pub fn load(&mut self, learned: HashSet<String>, focus: HashSet<String>) {
        self.learned = learned;
        self.focus = focus;
    }

    /// The study key for an entry: the first key field holding a non-empty
    /// string. Empty when no key field applies; such entries cannot be
    /// filtered.
    pub fn study_key(&self, entry: &Entry) -> String {
        for field in &self.key_fields {
            if let Some(text) = entry.text(field) {
                return text.to_string();
            }
        }
        String::new()
    }

    pub fn is_learned(&self, key: &str) -> bool {
        self.learned.contains(key)
    }

    pub fn is_focus(&self, key: &str) -> bool {
        self.focus.contains(key)
    }

    pub fn mark_learned(&mut self, key: &str, on: bool) {
        if on {
            self.learned.insert(key.to_string());
        } else {
            self.learned.remove(key);
        }
    }

    pub fn mark_focus(&mut self, key: &str, on: bool) {
        if on {
            self.focus.insert(key.to_string());
        } else {
            self.focus.remove(key);
        }
    }

    /// Drop every learned tag.
    pub fn clear_learned(&mut self) {
        self.learned.clear();
    }

    pub fn learned_count(&self) -> usize {
        self.learned.len()
    }

    pub fn focus_count(&self) -> usize {
        self.focus.len()
    }
}

/// Visibility of one entry under the active study filter.
///
/// Rules apply in order and short-circuit: entries without a study key are
/// never filtered out; `skip_learned` hides learned keys; `focus_only`
/// hides keys not tagged focus. Both flags may be set at once, in which
/// case both exclusions apply.
pub fn is_visible(entry: &Entry, adapter: &ProgressAdapter, flags: FilterFlags) -> bool {
    let key = adapter.study_key(entry);
    if key.is_empty() {
        return true;
    }
    if flags.skip_learned && adapter.is_learned(&key) {
        return false;
    }
    if flags.focus_only && !adapter.is_focus(&key) {
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use serde_json::Value;
    use serde_json::json;

    use super::*;

    fn entry(value: Value) -> Entry {
        match value {
            Value::Object(fields) => Entry::from_fields(fields),
            _ => panic!("test entries must be JSON objects"),
        }
    }

    fn vocabulary_adapter() -> ProgressAdapter {
        let mut adapter = ProgressAdapter::new(AdapterKind::Vocabulary);
        adapter.mark_learned("日", true);
        adapter.mark_focus("月", true);
        adapter
    }

    #[test]
    fn test_study_key_with_fallback() {
        let adapter = ProgressAdapter::new(AdapterKind::Vocabulary);
        assert_eq!(adapter.study_key(&entry(json!({"kanji": "日"}))), "日");
        assert_eq!(adapter.study_key(&entry(json!({"kana": "ひ"}))), "ひ");
        assert_eq!(
            adapter.study_key(&entry(json!({"kanji": "", "kana": "ひ"}))),
            "ひ"
        );
        assert_eq!(adapter.study_key(&entry(json!({"meaning": "sun"}))), "");
    }

    #[test]
    fn test_grammar_key() {
        let adapter = ProgressAdapter::new(AdapterKind::Grammar);
        assert_eq!(
            adapter.study_key(&entry(json!({"pattern": "〜ながら"}))),
            "〜ながら"
        );
        assert_eq!(adapter.study_key(&entry(json!({"kanji": "日"}))), "");
    }

    #[test]
    fn test_adapter_for_category() {
        use crate::collection::Category;
        assert_eq!(
            AdapterKind::for_category(&Category::Vocabulary),
            Some(AdapterKind::Vocabulary)
        );
        assert_eq!(
            AdapterKind::for_category(&Category::Grammar),
            Some(AdapterKind::Grammar)
        );
        assert_eq!(
            AdapterKind::for_category(&Category::Other("trivia".to_string())),
            None
        );
    }

    #[test]
    fn test_override_key_fields() {
        let mut adapter = ProgressAdapter::new(AdapterKind::Vocabulary);
        adapter.override_key_fields(vec!["word".to_string()]);
        assert_eq!(adapter.study_key(&entry(json!({"word": "犬"}))), "犬");
        assert_eq!(adapter.study_key(&entry(json!({"kanji": "日"}))), "");
        // An empty override is ignored.
        adapter.override_key_fields(vec![]);
        assert_eq!(adapter.study_key(&entry(json!({"word": "犬"}))), "犬");
    }

    #[test]
    fn test_no_filter_shows_everything() {
        let adapter = vocabulary_adapter();
        let flags = FilterFlags::default();
        assert!(is_visible(&entry(json!({"kanji": "日"})), &adapter, flags));
        assert!(is_visible(&entry(json!({"kanji": "月"})), &adapter, flags));
    }

    #[test]
    fn test_skip_learned_hides_learned() {
        let adapter = vocabulary_adapter();
        let flags = FilterFlags {
            skip_learned: true,
            focus_only: false,
        };
        assert!(!is_visible(&entry(json!({"kanji": "日"})), &adapter, flags));
        assert!(is_visible(&entry(json!({"kanji": "月"})), &adapter, flags));
    }

    #[test]
    fn test_focus_only_hides_unfocused() {
        let adapter = vocabulary_adapter();
        let flags = FilterFlags {
            skip_learned: false,
            focus_only: true,
        };
        assert!(is_visible(&entry(json!({"kanji": "月"})), &adapter, flags));
        assert!(!is_visible(&entry(json!({"kanji": "火"})), &adapter, flags));
    }

    #[test]
    fn test_both_flags_apply_both_rules() {
        let mut adapter = vocabulary_adapter();
        // 日 is learned and focused: skip_learned still hides it.
        adapter.mark_focus("日", true);
        let flags = FilterFlags {
            skip_learned: true,
            focus_only: true,
        };
        assert!(!is_visible(&entry(json!({"kanji": "日"})), &adapter, flags));
        assert!(is_visible(&entry(json!({"kanji": "月"})), &adapter, flags));
        assert!(!is_visible(&entry(json!({"kanji": "火"})), &adapter, flags));
    }

    /// Exclusion under skip_learned alone implies exclusion when focus_only
    /// is added on top.
    #[test]
    fn test_filter_monotonicity() {
        let adapter = vocabulary_adapter();
        let skip_only = FilterFlags {
            skip_learned: true,
            focus_only: false,
        };
        let both = FilterFlags {
            skip_learned: true,
            focus_only: true,
        };
        let learned = entry(json!({"kanji": "日"}));
        assert!(!is_visible(&learned, &adapter, skip_only));
        assert!(!is_visible(&learned, &adapter, both));
    }

    #[test]
    fn test_keyless_entry_always_passes() {
        let adapter = vocabulary_adapter();
        let keyless = Entry::default();
        let flags = FilterFlags {
            skip_learned: true,
            focus_only: true,
        };
        assert!(is_visible(&keyless, &adapter, flags));
    }

    #[test]
    fn test_mark_and_unmark() {
        let mut adapter = ProgressAdapter::new(AdapterKind::Vocabulary);
        adapter.mark_learned("日", true);
        assert!(adapter.is_learned("日"));
        adapter.mark_learned("日", false);
        assert!(!adapter.is_learned("日"));
    }

    #[test]
    fn test_clear_learned() {
        let mut adapter = vocabulary_adapter();
        adapter.mark_learned("月", true);
        assert_eq!(adapter.learned_count(), 2);
        adapter.clear_learned();
        assert_eq!(adapter.learned_count(), 0);
        // Focus tags are untouched.
        assert!(adapter.is_focus("月"));
    }
}
