/*
 * Copyright 2021 Constantin A. <emoji.builder@c1710.de>
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 *
 */
//! The reverse lookup from aliases to canonical sequences.

use std::collections::HashMap;
use std::collections::hash_map;

use crate::tables::emoji_tables::{EmojiTable, EmojiTableKey};
use crate::tables::errors::{BuildReport, Diagnostic};

/// What happened when an alias was proposed for an emoji
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The alias was not mapped before
    Inserted,
    /// The alias already mapped to the same emoji
    Unchanged,
    /// The alias mapped to a less specific emoji, which is returned
    Replaced(EmojiTableKey),
    /// The alias maps to an emoji that is at least as specific, which is returned
    Rejected(EmojiTableKey),
}

/// Maps every alias to exactly one canonical sequence
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasMap(HashMap<String, EmojiTableKey>);

impl AliasMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inverts an [EmojiTable].
    ///
    /// Afterwards, every emoji's literal rendering is added as an alias of itself, unless
    /// `exclude_keycap_literals` is set and it's a lone digit, `#` or `*`.
    /// All collisions are reported.
    pub fn from_table(table: &EmojiTable, exclude_keycap_literals: bool, report: &mut BuildReport) -> Self {
        let mut map = Self(HashMap::with_capacity(table.len() * 3));
        for (key, aliases) in table {
            for alias in aliases {
                map.insert_reported(alias, key, report);
            }
        }
        for (key, _) in table {
            if exclude_keycap_literals && key.is_keycap_base() {
                trace!("Not registering the literal form of {}", key);
                continue;
            }
            map.insert_reported(&key.render(), key, report);
        }
        map
    }

    /// Proposes `key` for `alias`.
    ///
    /// If the alias already maps to another emoji, the one with the longer canonical key
    /// (i.e. the more specific one) wins; on a tie the existing mapping is kept.
    /// # Examples
    /// ```
    /// use emoji_markup::tables::alias_map::{AliasMap, Resolution};
    ///
    /// let grinning = "1F600".parse().unwrap();
    /// let couple = "1F468 200D 1F469".parse().unwrap();
    ///
    /// let mut map = AliasMap::new();
    /// assert_eq!(map.resolve("x", &grinning), Resolution::Inserted);
    /// assert_eq!(map.resolve("x", &grinning), Resolution::Unchanged);
    /// assert_eq!(map.resolve("x", &couple), Resolution::Replaced(grinning.clone()));
    /// assert_eq!(map.resolve("x", &grinning), Resolution::Rejected(couple.clone()));
    /// assert_eq!(map.get("x"), Some(&couple));
    /// ```
    pub fn resolve(&mut self, alias: &str, key: &EmojiTableKey) -> Resolution {
        match self.0.get_mut(alias) {
            None => {
                self.0.insert(alias.to_owned(), key.clone());
                Resolution::Inserted
            }
            Some(existing) if *existing == *key => Resolution::Unchanged,
            Some(existing) => if key.key_len() > existing.key_len() {
                Resolution::Replaced(std::mem::replace(existing, key.clone()))
            } else {
                Resolution::Rejected(existing.clone())
            }
        }
    }

    fn insert_reported(&mut self, alias: &str, key: &EmojiTableKey, report: &mut BuildReport) {
        match resolve_alias(self, alias, key) {
            Resolution::Inserted | Resolution::Unchanged => {}
            Resolution::Replaced(previous) => report.push(Diagnostic::AliasCollision {
                alias: alias.to_owned(),
                kept: key.to_string(),
                discarded: previous.to_string()
            }),
            Resolution::Rejected(existing) => report.push(Diagnostic::AliasCollision {
                alias: alias.to_owned(),
                kept: existing.to_string(),
                discarded: key.to_string()
            }),
        }
    }

    pub fn get(&self, alias: &str) -> Option<&EmojiTableKey> {
        self.0.get(alias)
    }

    pub fn contains_alias(&self, alias: &str) -> bool {
        self.0.contains_key(alias)
    }

    pub fn aliases(&self) -> hash_map::Keys<String, EmojiTableKey> {
        self.0.keys()
    }

    pub fn iter(&self) -> hash_map::Iter<String, EmojiTableKey> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Free-standing form of [AliasMap::resolve]
pub fn resolve_alias(map: &mut AliasMap, alias: &str, key: &EmojiTableKey) -> Resolution {
    map.resolve(alias, key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(raw: &str) -> EmojiTableKey {
        raw.parse().unwrap()
    }

    #[test]
    fn longer_key_wins() {
        let mut map = AliasMap::new();
        map.resolve("x", &key("1F600"));
        assert_eq!(map.resolve("x", &key("1F468 200D 1F469")), Resolution::Replaced(key("1F600")));
        assert_eq!(map.get("x"), Some(&key("1F468 200D 1F469")));
    }

    #[test]
    fn free_resolution() {
        let mut map = AliasMap::new();
        assert_eq!(resolve_alias(&mut map, ":D", &key("1F603")), Resolution::Inserted);
        assert_eq!(resolve_alias(&mut map, ":D", &key("1F603")), Resolution::Unchanged);
        assert_eq!(resolve_alias(&mut map, ":D", &key("1F600")), Resolution::Rejected(key("1F603")));
        assert_eq!(resolve_alias(&mut map, ":D", &key("1F468 200D 1F469")), Resolution::Replaced(key("1F603")));
        assert_eq!(map.get(":D"), Some(&key("1F468 200D 1F469")));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn shorter_key_is_rejected() {
        let mut map = AliasMap::new();
        map.resolve("x", &key("1F468 200D 1F469"));
        assert_eq!(map.resolve("x", &key("1F600")), Resolution::Rejected(key("1F468 200D 1F469")));
        assert_eq!(map.get("x"), Some(&key("1F468 200D 1F469")));
    }

    #[test]
    fn ties_keep_the_existing_mapping() {
        let mut map = AliasMap::new();
        map.resolve("x", &key("1F600"));
        assert_eq!(map.resolve("x", &key("1F601")), Resolution::Rejected(key("1F600")));
    }

    #[test]
    fn collisions_are_reported() {
        let mut table = EmojiTable::new();
        let single = key("1F46A");
        let family = key("1F468 200D 1F469 200D 1F466");
        table.register(single.clone());
        table.register(family.clone());
        table.add_alias(&single, ":family:");
        table.add_alias(&family, ":family:");

        let mut report = BuildReport::new();
        let map = AliasMap::from_table(&table, true, &mut report);

        assert_eq!(map.get(":family:"), Some(&family));
        assert_eq!(report.collisions().count(), 1);
        assert_eq!(report.diagnostics()[0], Diagnostic::AliasCollision {
            alias: String::from(":family:"),
            kept: family.to_string(),
            discarded: single.to_string()
        });
    }

    #[test]
    fn literals_are_registered() {
        let mut table = EmojiTable::new();
        table.register(key("1F600"));
        table.register(key("0031"));
        table.register(key("0031 200D 20E3"));

        let mut report = BuildReport::new();
        let map = AliasMap::from_table(&table, true, &mut report);
        assert_eq!(map.get("😀"), Some(&key("1F600")));
        assert_eq!(map.get("1"), None);
        assert_eq!(map.get("1\u{200d}\u{20e3}"), Some(&key("0031 200D 20E3")));

        let map = AliasMap::from_table(&table, false, &mut report);
        assert_eq!(map.get("1"), Some(&key("0031")));
        assert!(report.is_empty());
    }
}
