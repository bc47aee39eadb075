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

use benkyo_core::Entry;
use benkyo_core::error::Fallible;
use benkyo_core::error::fail;
use benkyo_core::group_collection;
use benkyo_core::parse_collection;

/// Consolidate a collection file: group its entries by a composite key and
/// lift per-group common fields into shared defaults. The input file is
/// rewritten in place unless an output path is given.
pub fn reorganize_collection(
    file: &str,
    by: &[String],
    output: Option<String>,
) -> Fallible<()> {
    let text = fs::read_to_string(file)?;
    let collection = parse_collection(&text)?;
    let grouped = group_collection(&collection, by)?;

    // Refuse to write anything that would not load back identically.
    if !roundtrips(&collection.entries, &grouped.flatten()) {
        return fail("reorganized file would not round-trip; refusing to write.");
    }

    let out = output.unwrap_or_else(|| file.to_string());
    let json = serde_json::to_string_pretty(&grouped)?;
    fs::write(&out, json + "\n")?;
    log::debug!("Reorganized {} into {} groups", file, grouped.groups.len());
    println!(
        "Wrote {} groups ({} entries) to {}.",
        grouped.groups.len(),
        collection.entries.len(),
        out
    );
    Ok(())
}

/// Entry-set equality up to reordering: grouping may reorder entries, but
/// every entry must survive field-for-field.
fn roundtrips(before: &[Entry], after: &[Entry]) -> bool {
    if before.len() != after.len() {
        return false;
    }
    let encode = |entries: &[Entry]| -> Vec<String> {
        let mut encoded: Vec<String> = entries
            .iter()
            .map(|e| serde_json::to_string(e).unwrap_or_default())
            .collect();
        encoded.sort();
        encoded
    };
    encode(before) == encode(after)
}
