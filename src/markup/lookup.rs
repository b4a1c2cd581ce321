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
//! The complete lookup: a table built from the feeds together with the pattern that finds its
//! aliases in text.

use std::fs::File;
use std::io::{BufRead, BufReader, Read, Write};
use std::path::Path;

use itertools::Itertools;

use crate::configs::config::FeedConfig;
use crate::markup::matcher::{DEFAULT_SIZE_LIMIT, Matcher, RawMatch};
use crate::markup::record::{EmojiListing, EmojiMarkup, EmojiMatch, ListingEntry, Match};
use crate::tables::alias_map::AliasMap;
use crate::tables::emoji_tables::EmojiTable;
use crate::tables::errors::{BuildReport, MatchError, TableError};
use crate::tables::feeds::{read_emojione_feed, read_github_feed};

/// The token that is replaced by a listing of all emojis
pub const DEFAULT_LISTING_TOKEN: &str = ":ALL_UNICODE_EMOJI:";

/// Settings for [EmojiLookup::build]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    /// `None` (or an empty token) disables the listing
    pub listing_token: Option<String>,
    /// The maximum size of the compiled pattern in bytes
    pub regex_size_limit: usize,
    /// Don't register `#`, `*` and the digits as aliases of themselves
    pub exclude_keycap_literals: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        BuildOptions {
            listing_token: Some(String::from(DEFAULT_LISTING_TOKEN)),
            regex_size_limit: DEFAULT_SIZE_LIMIT,
            exclude_keycap_literals: true,
        }
    }
}

/// An immutable emoji table that can find and replace aliases in text.
///
/// It is `Send + Sync`, so one instance can serve any number of threads.
#[derive(Debug, Clone)]
pub struct EmojiLookup {
    table: EmojiTable,
    aliases: AliasMap,
    report: BuildReport,
    matcher: Matcher,
    listing_token: Option<String>,
    listing: EmojiListing,
}

impl EmojiLookup {
    /// Builds the lookup from the canonical list, the GitHub set and the EmojiOne set
    /// (in this order).
    ///
    /// Problems with single entries only end up in the [BuildReport];
    /// unreadable or corrupt feeds are an error.
    pub fn build<C, G, E>(canonical: C, github: G, emojione: E, options: &BuildOptions) -> Result<Self, TableError>
        where C: BufRead, G: Read, E: Read {
        let mut table = EmojiTable::new();
        let mut report = BuildReport::new();

        table.expand_canonical(canonical, &mut report)?;
        let github = read_github_feed(github)?;
        let emojione = read_emojione_feed(emojione)?;
        table.expand_github(&github, &mut report);
        table.expand_emojione(&emojione, &mut report);

        Self::from_parts(table, report, options)
    }

    /// Builds the lookup from the files a [FeedConfig] points to
    pub fn from_config(config: &FeedConfig) -> Result<Self, TableError> {
        let (canonical, github, emojione) = config.paths();
        let errors: Vec<TableError> = vec![canonical, github, emojione].into_iter()
            .filter(|path| !path.is_file())
            .map(|path| TableError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Feed not found: {}", path.display()))))
            .collect();
        if !errors.is_empty() {
            return Err(TableError::from(errors));
        }
        Self::build(
            BufReader::new(File::open(canonical)?),
            BufReader::new(File::open(github)?),
            BufReader::new(File::open(emojione)?),
            &config.build_options()
        )
    }

    /// Inverts an already expanded table and compiles the pattern
    pub fn from_parts(table: EmojiTable, mut report: BuildReport, options: &BuildOptions) -> Result<Self, TableError> {
        let aliases = AliasMap::from_table(&table, options.exclude_keycap_literals, &mut report);
        let listing_token = options.listing_token.clone()
            .filter(|token| !token.is_empty());
        if let Some(token) = &listing_token {
            if aliases.contains_alias(token) {
                warn!("The listing token {} is also an alias and will only produce the listing", token);
            }
        }

        let matcher = Matcher::new(
            aliases.aliases()
                .map(String::as_str)
                .chain(listing_token.as_deref()),
            options.regex_size_limit
        )?;
        let listing = build_listing(&table, &aliases);
        info!("Built a table of {} with {} diagnostics", listing.summary(), report.len());

        Ok(EmojiLookup {
            table,
            aliases,
            report,
            matcher,
            listing_token,
            listing,
        })
    }

    /// Finds the first alias in `text`
    pub fn find(&self, text: &str) -> Result<Option<Match>, MatchError> {
        self.find_at(text, 0)
    }

    /// Finds the first alias that starts at or after the byte offset `start`
    pub fn find_at(&self, text: &str, start: usize) -> Result<Option<Match>, MatchError> {
        self.matcher.find_at(text, start)
            .map(|found| self.to_match(found))
            .transpose()
    }

    /// Iterates over all non-overlapping matches
    pub fn find_iter<'a>(&'a self, text: &'a str) -> impl Iterator<Item=Result<Match, MatchError>> + 'a {
        self.matcher.find_iter(text)
            .map(move |found| self.to_match(found))
    }

    /// Replaces every match by its HTML rendering; the text in between is kept as it is
    pub fn replace_all(&self, text: &str) -> Result<String, MatchError> {
        let mut replaced = String::with_capacity(text.len());
        let mut last = 0;
        for found in self.find_iter(text) {
            let found = found?;
            replaced.push_str(&text[last..found.start()]);
            replaced.push_str(&found.markup.to_html());
            last = found.end();
        }
        replaced.push_str(&text[last..]);
        Ok(replaced)
    }

    fn to_match(&self, found: RawMatch) -> Result<Match, MatchError> {
        let markup = if self.listing_token.as_deref() == Some(found.alias) {
            EmojiMarkup::Listing(self.listing.clone())
        } else {
            let key = self.aliases.get(found.alias)
                .ok_or_else(|| MatchError::UnknownAlias(found.alias.to_owned()))?;
            EmojiMarkup::Emoji(EmojiMatch {
                title: found.alias.to_owned(),
                code: key.to_string(),
                unicode: key.render(),
                selector: found.selector,
            })
        };
        Ok(Match {
            range: found.range,
            markup,
        })
    }

    /// Saves all aliases with their emoji as `alias,code,unicode`, ordered by alias.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut writer = csv::Writer::from_writer(writer);
        writer.write_record(&["alias", "code", "unicode"])?;
        for (alias, key) in self.aliases.iter().sorted_by(|a, b| a.0.cmp(b.0)) {
            let code = key.to_string();
            let unicode = key.render();
            writer.write_record(&[alias.as_str(), code.as_str(), unicode.as_str()])?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Saves the aliases to a CSV file.
    /// **Warning**: Any existing file with that name will be overwritten.
    pub fn write_csv_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), csv::Error> {
        self.write_csv(File::create(path)?)
    }

    pub fn table(&self) -> &EmojiTable {
        &self.table
    }

    pub fn aliases(&self) -> &AliasMap {
        &self.aliases
    }

    /// Everything that was odd about the feeds
    pub fn report(&self) -> &BuildReport {
        &self.report
    }

    pub fn listing_token(&self) -> Option<&str> {
        self.listing_token.as_deref()
    }

    pub fn listing(&self) -> &EmojiListing {
        &self.listing
    }
}

fn build_listing(table: &EmojiTable, aliases: &AliasMap) -> EmojiListing {
    let entries = table.iter()
        .map(|(key, entry_aliases)| ListingEntry {
            title: entry_aliases.iter().join(" "),
            code: key.to_string(),
            unicode: key.render(),
        })
        .collect();
    EmojiListing {
        emoji_count: table.len(),
        alias_count: aliases.len(),
        entries,
    }
}

