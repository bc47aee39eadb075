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

use serde::Deserialize;
use serde::Serialize;

/// The boolean form of the study filter, parsed from the persisted token
/// string. Both flags may be set at once; the visibility predicate then
/// applies both exclusion rules.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FilterFlags {
    /// Hide entries whose study key is tagged learned.
    pub skip_learned: bool,
    /// Show only entries whose study key is tagged focus.
    pub focus_only: bool,
}

impl FilterFlags {
    /// Parse the persisted filter string. Tokens are separated by commas,
    /// pipes, or whitespace; unknown tokens are ignored.
    pub fn parse(s: &str) -> Self {
        let mut flags = FilterFlags::default();
        for token in s.split(|c: char| c == ',' || c == '|' || c.is_whitespace()) {
            match token {
                "skipLearned" => flags.skip_learned = true,
                "focusOnly" => flags.focus_only = true,
                _ => {}
            }
        }
        flags
    }

    /// The token string stored in the state database.
    pub fn encode(&self) -> String {
        match (self.skip_learned, self.focus_only) {
            (false, false) => String::new(),
            (true, false) => "skipLearned".to_string(),
            (false, true) => "focusOnly".to_string(),
            (true, true) => "skipLearned,focusOnly".to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.skip_learned && !self.focus_only
    }
}

/// Per-collection UI state, persisted across sessions. The derived view is
/// recomputed from this on every render pass and never stored.
///
/// Fields are private so that `is_shuffled` cannot drift from the seed:
/// every writer goes through `set_seed`/`clear_seed`, which keep the
/// invariant `is_shuffled == order_seed.is_some()`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CollectionState {
    order_seed: Option<u32>,
    is_shuffled: bool,
    study_filter: String,
}

impl CollectionState {
    /// Default state for a collection opened for the first time: natural
    /// order, no filter.
    pub fn new() -> Self {
        Self {
            order_seed: None,
            is_shuffled: false,
            study_filter: String::new(),
        }
    }

    /// Restore persisted state. `is_shuffled` is recomputed from the seed,
    /// since the two columns can drift if an external writer edited one.
    pub fn restore(order_seed: Option<u32>, study_filter: impl Into<String>) -> Self {
        Self {
            order_seed,
            is_shuffled: order_seed.is_some(),
            study_filter: study_filter.into(),
        }
    }

    pub fn order_seed(&self) -> Option<u32> {
        self.order_seed
    }

    pub fn is_shuffled(&self) -> bool {
        self.is_shuffled
    }

    pub fn study_filter(&self) -> &str {
        &self.study_filter
    }

    pub fn filter_flags(&self) -> FilterFlags {
        FilterFlags::parse(&self.study_filter)
    }

    /// Enable shuffling under the given seed.
    pub fn set_seed(&mut self, seed: u32) {
        self.order_seed = Some(seed);
        self.is_shuffled = true;
    }

    /// Return to natural (file) order.
    pub fn clear_seed(&mut self) {
        self.order_seed = None;
        self.is_shuffled = false;
    }

    pub fn set_filter(&mut self, flags: FilterFlags) {
        self.study_filter = flags.encode();
    }
}

impl Default for CollectionState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_filter_tokens() {
        assert_eq!(FilterFlags::parse(""), FilterFlags::default());
        assert!(FilterFlags::parse("skipLearned").skip_learned);
        assert!(FilterFlags::parse("focusOnly").focus_only);
        let both = FilterFlags::parse("skipLearned,focusOnly");
        assert!(both.skip_learned && both.focus_only);
        // Pipe and whitespace delimiters are accepted too.
        let piped = FilterFlags::parse("skipLearned|focusOnly");
        assert!(piped.skip_learned && piped.focus_only);
        let spaced = FilterFlags::parse("  focusOnly  skipLearned ");
        assert!(spaced.skip_learned && spaced.focus_only);
    }

    #[test]
    fn test_unknown_tokens_are_ignored() {
        let flags = FilterFlags::parse("skipLearned,herpDerp");
        assert!(flags.skip_learned);
        assert!(!flags.focus_only);
    }

    #[test]
    fn test_encode_roundtrip() {
        let variants = [
            FilterFlags::default(),
            FilterFlags {
                skip_learned: true,
                focus_only: false,
            },
            FilterFlags {
                skip_learned: false,
                focus_only: true,
            },
            FilterFlags {
                skip_learned: true,
                focus_only: true,
            },
        ];
        for flags in variants {
            assert_eq!(FilterFlags::parse(&flags.encode()), flags);
        }
    }

    #[test]
    fn test_shuffle_invariant() {
        let mut state = CollectionState::new();
        assert!(!state.is_shuffled());
        assert_eq!(state.order_seed(), None);
        state.set_seed(12345);
        assert!(state.is_shuffled());
        assert_eq!(state.order_seed(), Some(12345));
        state.clear_seed();
        assert!(!state.is_shuffled());
        assert_eq!(state.order_seed(), None);
    }

    #[test]
    fn test_restore_resyncs_shuffle_flag() {
        let state = CollectionState::restore(Some(7), "");
        assert!(state.is_shuffled());
        let state = CollectionState::restore(None, "skipLearned");
        assert!(!state.is_shuffled());
        assert!(state.filter_flags().skip_learned);
    }
}
