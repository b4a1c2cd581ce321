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
//! The JSON shortcode feeds.

use std::collections::BTreeMap;
use std::io::Read;

use serde::Deserialize;

/// Shortcode name (without colons) → URL or path of an image whose file name encodes the
/// codepoints, like `https://github.githubassets.com/images/icons/emoji/unicode/1f600.png?v8`.
pub type GithubFeed = BTreeMap<String, String>;

/// Internal key → record, as in EmojiOne's `emoji.json`
pub type EmojioneFeed = BTreeMap<String, EmojioneEntry>;

pub fn read_github_feed<R: Read>(reader: R) -> Result<GithubFeed, serde_json::Error> {
    serde_json::from_reader(reader)
}

pub fn read_emojione_feed<R: Read>(reader: R) -> Result<EmojioneFeed, serde_json::Error> {
    serde_json::from_reader(reader)
}

/// Extracts the hyphen separated codepoints from the file name of an image URL
/// # Examples
/// ```
/// use emoji_markup::tables::feeds::github_sequence;
///
/// let url = "https://github.githubassets.com/images/icons/emoji/unicode/1f468-200d-1f469.png?v8";
/// assert_eq!(github_sequence(url), "1f468-200d-1f469");
/// assert_eq!(github_sequence("octocat.png"), "octocat");
/// ```
pub fn github_sequence(url: &str) -> &str {
    let url = url.split('?').next().unwrap_or(url);
    let file_name = url.rsplit('/').next().unwrap_or(url);
    file_name.split('.').next().unwrap_or(file_name)
}

/// A single record of the EmojiOne feed.
///
/// Both the 2.x (`unicode`, `aliases`, …) and the 3.x (`code_points`, `shortname_alternates`, …)
/// layouts are understood.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
pub struct EmojioneEntry {
    #[serde(default)]
    pub shortname: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub aliases_ascii: Vec<String>,
    #[serde(default)]
    pub shortname_alternates: Vec<String>,
    #[serde(default)]
    pub ascii: Vec<String>,
    #[serde(default)]
    pub code_points: Option<CodePoints>,
    #[serde(default)]
    pub unicode_alternates: Option<String>,
    #[serde(default)]
    pub unicode: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
pub struct CodePoints {
    #[serde(default)]
    pub base: Option<String>,
    #[serde(default)]
    pub fully_qualified: Option<String>,
}

impl EmojioneEntry {
    /// The textual codepoints of this entry.
    ///
    /// The fully qualified sequence is preferred, then the alternate sequence, then the plain
    /// one and finally the key of the entry itself.
    pub fn raw_sequence<'a>(&'a self, key: &'a str) -> &'a str {
        let fully_qualified = self.code_points.as_ref()
            .and_then(|code_points| code_points.fully_qualified.as_deref());
        vec![fully_qualified, self.unicode_alternates.as_deref(), self.unicode.as_deref()]
            .into_iter()
            .flatten()
            .find(|raw| !raw.trim().is_empty())
            .unwrap_or(key)
    }

    /// All the shortcodes and ASCII forms of this entry
    pub fn all_aliases(&self) -> impl Iterator<Item=&str> {
        std::iter::once(&self.shortname)
            .chain(self.aliases.iter())
            .chain(self.aliases_ascii.iter())
            .chain(self.shortname_alternates.iter())
            .chain(self.ascii.iter())
            .map(|alias| alias.trim())
            .filter(|alias| !alias.is_empty())
    }
}
