/*
 * Copyright 2019 Constantin A. <emoji.builder@c1710.de>
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
 */
//! A module that merges the [Unicode® emoji test data][unicode] with several shortcode datasets
//! into one table of canonical emoji sequences and their aliases.
//!
//! [unicode]: https://unicode.org/Public/emoji/13.0/emoji-test.txt

use std::collections::{BTreeMap, BTreeSet};
use std::collections::btree_map;
use std::io::BufRead;
use std::str::FromStr;

use crate::emojis::emoji_status::EmojiStatus;
use crate::emojis::sequence::CodepointSequence;
use crate::tables::errors::{BuildReport, Diagnostic, Feed};
use crate::tables::feeds::{EmojioneFeed, GithubFeed, github_sequence};
use crate::tables::regexes::match_line;

/// A canonical codepoint sequence
pub type EmojiTableKey = CodepointSequence;
/// The aliases (shortcodes, ASCII smileys, …) of an emoji
pub type EmojiTableEntry = BTreeSet<String>;

/// Canonical emoji sequences mapped to their aliases.
///
/// Every key is normalized (see [CodepointSequence::normalize]) against the keys that were
/// already present when it was inserted, so the order of expansion matters:
/// the canonical list has to come first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmojiTable {
    table: BTreeMap<EmojiTableKey, EmojiTableEntry>
}

impl EmojiTable {
    /// Creates a new, empty emoji table
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalizes a sequence against the keys of this table
    pub fn normalize(&self, sequence: &CodepointSequence) -> EmojiTableKey {
        sequence.normalize(|candidate| self.table.contains_key(candidate))
    }

    /// Registers an emoji without aliases if it's not in the table yet.
    /// Returns whether it was newly inserted.
    pub fn register(&mut self, key: EmojiTableKey) -> bool {
        match self.table.entry(key) {
            btree_map::Entry::Vacant(entry) => {
                entry.insert(EmojiTableEntry::new());
                true
            }
            btree_map::Entry::Occupied(_) => false
        }
    }

    /// Adds an alias to an emoji that's already in the table.
    /// Returns `false` if the emoji is unknown.
    pub fn add_alias(&mut self, key: &EmojiTableKey, alias: &str) -> bool {
        match self.table.get_mut(key) {
            Some(aliases) => {
                aliases.insert(alias.to_owned());
                true
            }
            None => false
        }
    }

    /// Reads an `emoji-test.txt`-like file and registers every emoji that's graded
    /// `fully-qualified` or `keyboard`.
    ///
    /// Lines that don't follow the syntax are reported and skipped; only failing to read
    /// from `reader` is an error.
    /// # Examples
    /// ```
    /// use emoji_markup::tables::emoji_tables::EmojiTable;
    /// use emoji_markup::tables::errors::BuildReport;
    /// use emoji_markup::emojis::sequence::CodepointSequence;
    ///
    /// let data = "\
    /// 263A FE0F ; fully-qualified # ☺️ E0.6 smiling face
    /// 263A      ; unqualified     # ☺ E0.6 smiling face
    /// 1F468 1F469 1F466 ; fully-qualified # 👪 family
    /// ";
    ///
    /// let mut table = EmojiTable::new();
    /// let mut report = BuildReport::new();
    /// table.expand_canonical(data.as_bytes(), &mut report).unwrap();
    ///
    /// assert_eq!(table.len(), 2);
    /// assert!(table.contains_key(&"263A".parse().unwrap()));
    /// assert!(table.contains_key(&"1F468 200D 1F469 200D 1F466".parse().unwrap()));
    /// assert!(report.is_empty());
    /// ```
    pub fn expand_canonical<I: BufRead>(&mut self, reader: I, report: &mut BuildReport) -> Result<(), std::io::Error> {
        for line in reader.lines() {
            let line = line?;
            let line = line.trim();
            if line.starts_with('#') || line.is_empty() {
                continue;
            }
            let entry = match match_line(line) {
                Some(entry) => entry,
                None => {
                    report.push(Diagnostic::MalformedLine(line.to_owned()));
                    continue;
                }
            };
            match EmojiStatus::from_str(entry.status) {
                Ok(status) if status.is_ingested() => {}
                Ok(status) => {
                    trace!("Skipping {} ({})", entry.sequence, status);
                    continue;
                }
                Err(status) => {
                    debug!("Skipping {} with unknown status {}", entry.sequence, status);
                    continue;
                }
            }
            let description = entry.comment.unwrap_or(entry.sequence);
            if let Some(key) = self.parse_key(Feed::Canonical, description, entry.sequence, report) {
                self.register(key);
            }
        }
        Ok(())
    }

    /// Adds the names of the GitHub emoji set as `:name:` to the emojis the image file names
    /// refer to.
    ///
    /// This feed never creates new emojis: entries that aren't codepoints
    /// (i.e. custom images like `:octocat:`) or that refer to unknown sequences are reported.
    pub fn expand_github(&mut self, feed: &GithubFeed, report: &mut BuildReport) {
        for (name, url) in feed {
            let alias = format!(":{}:", name);
            let raw = github_sequence(url);
            if let Some(key) = self.parse_key(Feed::Github, &alias, raw, report) {
                if !self.add_alias(&key, &alias) {
                    report.push(Diagnostic::UnknownSequence {
                        feed: Feed::Github,
                        entry: alias,
                        key: key.to_string()
                    });
                }
            }
        }
    }

    /// Adds the shortcodes and ASCII aliases of the EmojiOne set.
    /// Sequences that are not in the table yet get added.
    pub fn expand_emojione(&mut self, feed: &EmojioneFeed, report: &mut BuildReport) {
        for (feed_key, entry) in feed {
            let raw = entry.raw_sequence(feed_key);
            if let Some(key) = self.parse_key(Feed::Emojione, feed_key, raw, report) {
                if self.register(key.clone()) {
                    debug!("New emoji from {}: {} ({})", Feed::Emojione, key, entry.shortname);
                }
                for alias in entry.all_aliases() {
                    self.add_alias(&key, alias);
                }
            }
        }
    }

    /// Parses and normalizes a textual sequence, reporting it if that fails
    fn parse_key(&self, feed: Feed, entry: &str, raw: &str, report: &mut BuildReport) -> Option<EmojiTableKey> {
        let parsed = CodepointSequence::from_hex(raw)
            .map(|sequence| self.normalize(&sequence));
        match parsed {
            Ok(key) if !key.is_empty() => Some(key),
            Ok(_) => {
                // There were only variant selectors in it
                report.push(Diagnostic::UnknownSequence {
                    feed,
                    entry: entry.to_owned(),
                    key: raw.to_owned()
                });
                None
            }
            Err(error) => {
                report.push(Diagnostic::UnparseableSequence {
                    feed,
                    entry: entry.to_owned(),
                    raw: raw.to_owned(),
                    error
                });
                None
            }
        }
    }

    /// Returns the aliases for a given key
    pub fn get(&self, key: &EmojiTableKey) -> Option<&EmojiTableEntry> {
        self.table.get(key)
    }

    pub fn contains_key(&self, key: &EmojiTableKey) -> bool {
        self.table.contains_key(key)
    }

    /// Iterates over all emojis in the order of their codepoints
    pub fn iter(&self) -> btree_map::Iter<EmojiTableKey, EmojiTableEntry> {
        self.table.iter()
    }

    /// Returns the size of the table
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Checks whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

impl<'a> IntoIterator for &'a EmojiTable {
    type Item = (&'a EmojiTableKey, &'a EmojiTableEntry);
    type IntoIter = btree_map::Iter<'a, EmojiTableKey, EmojiTableEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.table.iter()
    }
}

impl AsRef<BTreeMap<EmojiTableKey, EmojiTableEntry>> for EmojiTable {
    fn as_ref(&self) -> &BTreeMap<EmojiTableKey, EmojiTableEntry> {
        &self.table
    }
}
