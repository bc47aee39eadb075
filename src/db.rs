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

//! SQLite-backed store for per-collection UI state and study progress.

use std::collections::HashSet;
use std::path::Path;

use chrono::NaiveDateTime;
use rusqlite::Connection;
use rusqlite::params;

use benkyo_core::CollectionKey;
use benkyo_core::CollectionState;
use benkyo_core::error::ErrorReport;
use benkyo_core::error::Fallible;

/// Default state-database file name, relative to the collection directory.
pub const DEFAULT_DB_FILE: &str = ".benkyo.db";

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS collection_state (
    collection_key TEXT PRIMARY KEY,
    order_seed INTEGER,
    is_shuffled INTEGER NOT NULL DEFAULT 0,
    study_filter TEXT NOT NULL DEFAULT ''
);
CREATE TABLE IF NOT EXISTS progress (
    collection_key TEXT NOT NULL,
    study_key TEXT NOT NULL,
    learned INTEGER NOT NULL DEFAULT 0,
    focus INTEGER NOT NULL DEFAULT 0,
    updated_at TEXT NOT NULL,
    PRIMARY KEY (collection_key, study_key)
);
";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

fn db_err(e: rusqlite::Error) -> ErrorReport {
    ErrorReport::new(format!("database error: {e}"))
}

pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn open(path: &Path) -> Fallible<Self> {
        let conn = Connection::open(path).map_err(db_err)?;
        conn.execute_batch(SCHEMA).map_err(db_err)?;
        Ok(Self { conn })
    }

    /// The persisted state for a collection, or the defaults if it has never
    /// been opened before.
    pub fn get_state(&self, key: CollectionKey) -> Fallible<CollectionState> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT order_seed, study_filter FROM collection_state WHERE collection_key = ?1",
            )
            .map_err(db_err)?;
        let mut rows = stmt.query(params![key.to_hex()]).map_err(db_err)?;
        match rows.next().map_err(db_err)? {
            Some(row) => {
                let order_seed: Option<u32> = row.get(0).map_err(db_err)?;
                let study_filter: String = row.get(1).map_err(db_err)?;
                Ok(CollectionState::restore(order_seed, study_filter))
            }
            None => Ok(CollectionState::new()),
        }
    }

    pub fn set_state(&self, key: CollectionKey, state: &CollectionState) -> Fallible<()> {
        self.conn
            .execute(
                "INSERT INTO collection_state (collection_key, order_seed, is_shuffled, study_filter)
                 VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(collection_key) DO UPDATE
                 SET order_seed = ?2, is_shuffled = ?3, study_filter = ?4",
                params![
                    key.to_hex(),
                    state.order_seed(),
                    state.is_shuffled(),
                    state.study_filter()
                ],
            )
            .map_err(db_err)?;
        Ok(())
    }

    pub fn learned_keys(&self, key: CollectionKey) -> Fallible<HashSet<String>> {
        self.tagged_keys(key, "learned")
    }

    pub fn focus_keys(&self, key: CollectionKey) -> Fallible<HashSet<String>> {
        self.tagged_keys(key, "focus")
    }

    fn tagged_keys(&self, key: CollectionKey, tag: &str) -> Fallible<HashSet<String>> {
        let sql =
            format!("SELECT study_key FROM progress WHERE collection_key = ?1 AND {tag} = 1");
        let mut stmt = self.conn.prepare(&sql).map_err(db_err)?;
        let mut rows = stmt.query(params![key.to_hex()]).map_err(db_err)?;
        let mut keys = HashSet::new();
        while let Some(row) = rows.next().map_err(db_err)? {
            keys.insert(row.get(0).map_err(db_err)?);
        }
        Ok(keys)
    }

    pub fn set_learned(
        &self,
        key: CollectionKey,
        study_key: &str,
        on: bool,
        at: NaiveDateTime,
    ) -> Fallible<()> {
        self.set_tag(key, study_key, "learned", on, at)
    }

    pub fn set_focus(
        &self,
        key: CollectionKey,
        study_key: &str,
        on: bool,
        at: NaiveDateTime,
    ) -> Fallible<()> {
        self.set_tag(key, study_key, "focus", on, at)
    }

    fn set_tag(
        &self,
        key: CollectionKey,
        study_key: &str,
        tag: &str,
        on: bool,
        at: NaiveDateTime,
    ) -> Fallible<()> {
        let sql = format!(
            "INSERT INTO progress (collection_key, study_key, {tag}, updated_at)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(collection_key, study_key) DO UPDATE
             SET {tag} = ?3, updated_at = ?4"
        );
        let at = at.format(TIMESTAMP_FORMAT).to_string();
        self.conn
            .execute(&sql, params![key.to_hex(), study_key, on, at])
            .map_err(db_err)?;
        Ok(())
    }

    /// Remove the learned tag from every key in a collection. Returns the
    /// number of tags removed.
    pub fn clear_learned(&self, key: CollectionKey) -> Fallible<usize> {
        let changed = self
            .conn
            .execute(
                "UPDATE progress SET learned = 0 WHERE collection_key = ?1 AND learned = 1",
                params![key.to_hex()],
            )
            .map_err(db_err)?;
        Ok(changed)
    }
}
