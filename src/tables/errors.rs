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
//! Diagnostics and errors of the table builder.

use std::fmt::{Display, Formatter};

use crate::emojis::sequence::SequenceError;

/// The three feeds a table is built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feed {
    /// The canonical list of emojis (`emoji-test.txt`)
    Canonical,
    /// Shortcodes mapped to image files (GitHub's emoji API)
    Github,
    /// Shortcodes and ASCII aliases mapped to codepoints (EmojiOne)
    Emojione,
}

impl Display for Feed {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Feed::Canonical => "canonical list",
            Feed::Github => "github set",
            Feed::Emojione => "emojione set",
        })
    }
}

/// Something that was wrong with the source data but did not prevent building the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A line in the canonical list that doesn't follow its syntax
    MalformedLine(String),
    /// An entry whose codepoints couldn't be parsed
    UnparseableSequence {
        feed: Feed,
        entry: String,
        raw: String,
        error: SequenceError,
    },
    /// An entry that refers to a sequence which isn't in the canonical list
    UnknownSequence {
        feed: Feed,
        entry: String,
        key: String,
    },
    /// An alias that was proposed for two different emojis; `discarded` lost.
    AliasCollision {
        alias: String,
        kept: String,
        discarded: String,
    },
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::MalformedLine(line) =>
                write!(f, "Malformed line in the canonical list: {}", line),
            Diagnostic::UnparseableSequence { feed, entry, raw, error } =>
                write!(f, "Unparseable unicode in {}: {} ({:?}: {})", feed, entry, raw, error),
            Diagnostic::UnknownSequence { feed, entry, key } =>
                write!(f, "Unknown unicode in {}: {} {}", feed, key, entry),
            Diagnostic::AliasCollision { alias, kept, discarded } =>
                write!(f, "Mapping already exists for {} with {}, discarded value {}", alias, kept, discarded),
        }
    }
}

/// All diagnostics that were collected while building a table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    diagnostics: Vec<Diagnostic>
}

impl BuildReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Logs the diagnostic and keeps it for later inspection
    pub fn push(&mut self, diagnostic: Diagnostic) {
        match &diagnostic {
            // The github set contains lots of custom images (e.g. :octocat:), so these are expected
            Diagnostic::UnknownSequence { .. } => info!("{}", diagnostic),
            Diagnostic::UnparseableSequence { feed: Feed::Github, .. } => info!("{}", diagnostic),
            _ => warn!("{}", diagnostic)
        }
        self.diagnostics.push(diagnostic);
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Only the alias collisions
    pub fn collisions(&self) -> impl Iterator<Item=&Diagnostic> {
        self.diagnostics.iter()
            .filter(|diagnostic| matches!(diagnostic, Diagnostic::AliasCollision { .. }))
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// A fatal error while building a table, i.e. a feed that is missing or corrupt
#[derive(Debug)]
pub enum TableError {
    /// Wrapper for [std::io::Error]
    Io(std::io::Error),
    /// Wrapper for [serde_json::Error] (a corrupt JSON feed)
    Serde(serde_json::Error),
    /// The matching pattern couldn't be compiled (usually because it grew too large)
    Pattern(regex::Error),
    /// Wrapper for multiple errors
    Multiple(Vec<TableError>),
    #[cfg(feature = "online")]
    /// Wrapper for [reqwest::Error]
    Reqwest(reqwest::Error),
}

impl Display for TableError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TableError::Io(error) => write!(f, "Couldn't read a feed: {}", error),
            TableError::Serde(error) => write!(f, "Corrupt feed: {}", error),
            TableError::Pattern(error) => write!(f, "Couldn't build the matching pattern: {}", error),
            TableError::Multiple(errors) => {
                for error in errors {
                    writeln!(f, "{}", error)?;
                }
                Ok(())
            }
            #[cfg(feature = "online")]
            TableError::Reqwest(error) => write!(f, "Couldn't fetch a feed: {}", error),
        }
    }
}

impl std::error::Error for TableError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TableError::Io(error) => Some(error),
            TableError::Serde(error) => Some(error),
            TableError::Pattern(error) => Some(error),
            TableError::Multiple(_) => None,
            #[cfg(feature = "online")]
            TableError::Reqwest(error) => Some(error),
        }
    }
}

impl From<std::io::Error> for TableError {
    fn from(err: std::io::Error) -> Self {
        TableError::Io(err)
    }
}

impl From<serde_json::Error> for TableError {
    fn from(err: serde_json::Error) -> Self {
        TableError::Serde(err)
    }
}

impl From<regex::Error> for TableError {
    fn from(err: regex::Error) -> Self {
        TableError::Pattern(err)
    }
}

impl From<Vec<TableError>> for TableError {
    fn from(errors: Vec<TableError>) -> Self {
        Self::Multiple(errors)
    }
}

#[cfg(feature = "online")]
impl From<reqwest::Error> for TableError {
    fn from(err: reqwest::Error) -> Self {
        TableError::Reqwest(err)
    }
}

/// An internal invariant was violated while matching
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    /// The pattern matched an alias that is not in the alias map.
    /// As the pattern is built from the alias map, this is a bug.
    UnknownAlias(String),
}

impl Display for MatchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchError::UnknownAlias(alias) => write!(f, "Matched an alias without mapping: {}", alias),
        }
    }
}

impl std::error::Error for MatchError {}
