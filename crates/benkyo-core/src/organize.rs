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

//! Consolidation of flat collections into the grouped layout.
//!
//! Entries are grouped by a composite key over caller-named fields, and
//! fields holding one common value across a whole group are lifted into that
//! group's `defaults`. Flattening the result reproduces the original
//! entries field-for-field, grouping order aside.

use std::collections::HashMap;

use serde_json::Map;
use serde_json::Value;

use crate::collection::Collection;
use crate::collection::EntryGroup;
use crate::collection::GroupedCollectionFile;
use crate::error::Fallible;
use crate::error::fail;
use crate::types::entry::Entry;

/// Group a collection's entries by a composite key over `key_fields`.
///
/// Groups appear in first-seen order; entries keep their relative order
/// within a group. Entries missing a key field group under a null value for
/// that field.
pub fn group_collection(
    collection: &Collection,
    key_fields: &[String],
) -> Fallible<GroupedCollectionFile> {
    if key_fields.is_empty() {
        return fail("at least one grouping field is required.");
    }

    // Buckets in first-seen order. The composite key is the JSON encoding of
    // the key field values, which is stable and hashable where Value is not.
    let mut order: Vec<String> = Vec::new();
    let mut buckets: HashMap<String, Vec<&Entry>> = HashMap::new();
    for entry in &collection.entries {
        let key_values: Vec<&Value> = key_fields
            .iter()
            .map(|field| entry.get(field).unwrap_or(&Value::Null))
            .collect();
        let key = serde_json::to_string(&key_values)?;
        if !buckets.contains_key(&key) {
            order.push(key.clone());
        }
        buckets.entry(key).or_default().push(entry);
    }

    let mut groups = Vec::new();
    for key in order {
        let members = &buckets[&key];
        let defaults = liftable_fields(members, key_fields);
        let entries = members
            .iter()
            .map(|entry| strip_fields(entry, &defaults))
            .collect();
        groups.push(EntryGroup { defaults, entries });
    }

    Ok(GroupedCollectionFile {
        name: collection.name.clone(),
        category: collection.category.clone(),
        groups,
    })
}

/// Fields shared with a single common value by every member of a group.
///
/// Singleton groups only lift their key fields; lifting everything would
/// leave an empty entry object behind and erase the distinction between
/// entry and defaults.
fn liftable_fields(members: &[&Entry], key_fields: &[String]) -> Map<String, Value> {
    let first = members[0];
    let mut defaults = Map::new();
    for (name, value) in first.fields() {
        let is_key_field = key_fields.iter().any(|f| f == name);
        if members.len() == 1 && !is_key_field {
            continue;
        }
        let common = members
            .iter()
            .all(|member| member.get(name) == Some(value));
        if common {
            defaults.insert(name.clone(), value.clone());
        }
    }
    defaults
}

fn strip_fields(entry: &Entry, defaults: &Map<String, Value>) -> Entry {
    let mut fields = Map::new();
    for (name, value) in entry.fields() {
        if defaults.get(name) != Some(value) {
            fields.insert(name.clone(), value.clone());
        }
    }
    Entry::from_fields(fields)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::collection::Category;

    fn entry(value: Value) -> Entry {
        match value {
            Value::Object(fields) => Entry::from_fields(fields),
            _ => panic!("test entries must be JSON objects"),
        }
    }

    fn lessons() -> Collection {
        Collection {
            name: "Grammar N4".to_string(),
            category: Category::Grammar,
            entries: vec![
                entry(json!({"pattern": "〜たことがある", "lesson": 3, "level": "N4"})),
                entry(json!({"pattern": "〜ながら", "lesson": 3, "level": "N4"})),
                entry(json!({"pattern": "〜ば", "lesson": 4, "level": "N4"})),
            ],
        }
    }

    #[test]
    fn test_groups_by_composite_key() -> Fallible<()> {
        let grouped = group_collection(&lessons(), &["lesson".to_string()])?;
        assert_eq!(grouped.groups.len(), 2);
        assert_eq!(grouped.groups[0].entries.len(), 2);
        assert_eq!(grouped.groups[1].entries.len(), 1);
        Ok(())
    }

    #[test]
    fn test_lifts_common_fields() -> Fallible<()> {
        let grouped = group_collection(&lessons(), &["lesson".to_string()])?;
        let first = &grouped.groups[0];
        // lesson (the key) and level (common) are lifted; pattern stays.
        assert_eq!(first.defaults.get("lesson"), Some(&json!(3)));
        assert_eq!(first.defaults.get("level"), Some(&json!("N4")));
        assert_eq!(first.entries[0].get("lesson"), None);
        assert_eq!(first.entries[0].text("pattern"), Some("〜たことがある"));
        Ok(())
    }

    #[test]
    fn test_singleton_group_lifts_only_key_fields() -> Fallible<()> {
        let grouped = group_collection(&lessons(), &["lesson".to_string()])?;
        let singleton = &grouped.groups[1];
        assert_eq!(singleton.defaults.get("lesson"), Some(&json!(4)));
        // Non-key fields stay on the entry.
        assert_eq!(singleton.entries[0].text("level"), Some("N4"));
        assert_eq!(singleton.entries[0].text("pattern"), Some("〜ば"));
        Ok(())
    }

    #[test]
    fn test_flatten_roundtrips() -> Fallible<()> {
        let collection = lessons();
        let grouped = group_collection(&collection, &["lesson".to_string()])?;
        let flattened = grouped.flatten();
        // Grouping by a single pre-sorted field preserves entry order here.
        assert_eq!(flattened, collection.entries);
        Ok(())
    }

    #[test]
    fn test_missing_key_field_groups_under_null() -> Fallible<()> {
        let collection = Collection {
            name: "Mixed".to_string(),
            category: Category::Other("trivia".to_string()),
            entries: vec![
                entry(json!({"question": "a", "topic": "maps"})),
                entry(json!({"question": "b"})),
                entry(json!({"question": "c"})),
            ],
        };
        let grouped = group_collection(&collection, &["topic".to_string()])?;
        assert_eq!(grouped.groups.len(), 2);
        // The null-topic group holds both keyless entries.
        assert_eq!(grouped.groups[1].entries.len(), 2);
        Ok(())
    }

    #[test]
    fn test_composite_key_over_two_fields() -> Fallible<()> {
        let collection = Collection {
            name: "Vocab".to_string(),
            category: Category::Vocabulary,
            entries: vec![
                entry(json!({"kanji": "一", "lesson": 1, "level": "N5"})),
                entry(json!({"kanji": "二", "lesson": 1, "level": "N5"})),
                entry(json!({"kanji": "三", "lesson": 1, "level": "N4"})),
            ],
        };
        let grouped = group_collection(
            &collection,
            &["lesson".to_string(), "level".to_string()],
        )?;
        // Same lesson but different level lands in a different group.
        assert_eq!(grouped.groups.len(), 2);
        Ok(())
    }

    #[test]
    fn test_empty_key_fields_rejected() {
        assert!(group_collection(&lessons(), &[]).is_err());
    }
}
