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
//! Finds standalone aliases in free text.
//!
//! An alias only counts if it's preceded by whitespace (or the start of the text) and followed by
//! an optional variant selector, an optional `.`, `…` or `,` and then whitespace
//! (or the end of the text).

use std::ops::Range;

use itertools::Itertools;
use regex::{Regex, RegexBuilder};

/// The default limit for the compiled pattern (64 MiB)
pub const DEFAULT_SIZE_LIMIT: usize = 64 << 20;

/// An alias that was found, without any lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMatch<'t> {
    pub alias: &'t str,
    pub selector: Option<char>,
    /// Covers the alias and the selector
    pub range: Range<usize>,
}

/// A compiled alternation of aliases
#[derive(Debug, Clone)]
pub struct Matcher {
    regex: Option<Regex>
}

impl Matcher {
    /// Compiles a pattern for the given aliases.
    ///
    /// Longer aliases are tried first, so `a.` wins over `a` followed by a full stop.
    pub fn new<'a, I>(aliases: I, size_limit: usize) -> Result<Self, regex::Error>
        where I: IntoIterator<Item=&'a str> {
        let alternatives = aliases.into_iter()
            .filter(|alias| !alias.is_empty())
            .sorted_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)))
            .dedup()
            .map(regex::escape)
            .join("|");
        if alternatives.is_empty() {
            return Ok(Self { regex: None });
        }
        let pattern = format!(
            r"(?:^|\s)(?P<emoji>{})(?P<selector>[\x{{FE0E}}\x{{FE0F}}])?(?:[.…,])?(?:\s|$)",
            alternatives
        );
        debug!("Compiling a pattern of {} bytes", pattern.len());
        let regex = RegexBuilder::new(&pattern)
            .size_limit(size_limit)
            .build()?;
        Ok(Self { regex: Some(regex) })
    }

    /// Finds the first alias that starts at or after `start`.
    ///
    /// The whitespace in front of the alias may lie before `start`.
    /// Returns `None` if `start` is not on a character boundary.
    pub fn find_at<'t>(&self, text: &'t str, start: usize) -> Option<RawMatch<'t>> {
        let regex = self.regex.as_ref()?;
        if start > text.len() || !text.is_char_boundary(start) {
            return None;
        }
        // One character early, so that it can be the leading whitespace
        let mut from = text[..start].char_indices()
            .last()
            .map_or(0, |(index, _)| index);
        loop {
            let captures = regex.captures_at(text, from)?;
            let emoji = captures.name("emoji")?;
            if emoji.start() >= start {
                let selector = captures.name("selector");
                let end = selector.map_or(emoji.end(), |selector| selector.end());
                return Some(RawMatch {
                    alias: emoji.as_str(),
                    selector: selector.and_then(|selector| selector.as_str().chars().next()),
                    range: emoji.start()..end,
                });
            }
            // Started before `start`, retry behind its first character
            let skipped = captures.get(0)?.start();
            from = skipped + text[skipped..].chars().next().map_or(1, char::len_utf8);
        }
    }

    /// Iterates over all aliases in `text`.
    ///
    /// Trailing whitespace isn't consumed, so it can be the leading whitespace of the next match.
    pub fn find_iter<'m, 't>(&'m self, text: &'t str) -> impl Iterator<Item=RawMatch<'t>> + 'm
        where 't: 'm {
        let mut position = 0;
        std::iter::from_fn(move || {
            let found = self.find_at(text, position)?;
            position = found.range.end;
            Some(found)
        })
    }

    /// Whether there are no aliases at all
    pub fn is_empty(&self) -> bool {
        self.regex.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aliases(matcher: &Matcher, text: &str) -> Vec<String> {
        matcher.find_iter(text)
            .map(|found| found.alias.to_owned())
            .collect()
    }

    #[test]
    fn only_standalone_aliases() {
        let matcher = Matcher::new(vec![":)", ":smile:"], DEFAULT_SIZE_LIMIT).unwrap();
        assert_eq!(aliases(&matcher, "hi :)"), vec![":)"]);
        assert_eq!(aliases(&matcher, "hi:)"), Vec::<String>::new());
        assert_eq!(aliases(&matcher, ":smile:s"), Vec::<String>::new());
        assert_eq!(aliases(&matcher, ":smile:, :)…"), vec![":smile:", ":)"]);
    }

    #[test]
    fn adjacent_matches_share_whitespace() {
        let matcher = Matcher::new(vec![":)"], DEFAULT_SIZE_LIMIT).unwrap();
        let found: Vec<_> = matcher.find_iter(":) :) :)").map(|found| found.range).collect();
        assert_eq!(found, vec![0..2, 3..5, 6..8]);
    }

    #[test]
    fn longer_alias_takes_precedence() {
        let matcher = Matcher::new(vec!["a", "a."], DEFAULT_SIZE_LIMIT).unwrap();
        let found = matcher.find_at("x a. y", 0).unwrap();
        assert_eq!(found.alias, "a.");
        assert_eq!(found.range, 2..4);

        let found = matcher.find_at("x a, y", 0).unwrap();
        assert_eq!(found.alias, "a");
        assert_eq!(found.range, 2..3);
    }

    #[test]
    fn find_at_an_alias() {
        let matcher = Matcher::new(vec![":D", ":)"], DEFAULT_SIZE_LIMIT).unwrap();
        assert_eq!(matcher.find_at("x :D :)", 5).map(|found| found.range), Some(5..7));
        assert_eq!(matcher.find_at("x :D :)", 4).map(|found| found.range), Some(5..7));
        assert_eq!(matcher.find_at("x :D :)", 2).map(|found| found.range), Some(2..4));
        assert_eq!(matcher.find_at("x :D :)", 3).map(|found| found.range), Some(5..7));
        // The match at the very beginning is skipped
        assert_eq!(matcher.find_at(":D :)", 1).map(|found| found.range), Some(3..5));
        assert_eq!(matcher.find_at("é :)", 1), None);
        assert_eq!(matcher.find_at(":)", 3), None);
    }

    #[test]
    fn selector_is_part_of_the_match() {
        let matcher = Matcher::new(vec!["<3"], DEFAULT_SIZE_LIMIT).unwrap();
        let found = matcher.find_at("I <3\u{fe0f}.", 0).unwrap();
        assert_eq!(found.selector, Some('\u{fe0f}'));
        assert_eq!(found.range, 2..(4 + '\u{fe0f}'.len_utf8()));
    }

    #[test]
    fn metacharacters_are_escaped() {
        let matcher = Matcher::new(vec!["*-)", "(y)"], DEFAULT_SIZE_LIMIT).unwrap();
        assert_eq!(aliases(&matcher, "(y) *-)"), vec!["(y)", "*-)"]);
        assert_eq!(aliases(&matcher, "y"), Vec::<String>::new());
    }

    #[test]
    fn empty_matcher() {
        let matcher = Matcher::new(Vec::new(), DEFAULT_SIZE_LIMIT).unwrap();
        assert!(matcher.is_empty());
        assert_eq!(matcher.find_at("anything", 0), None);
    }

    #[test]
    fn size_limit_is_enforced() {
        assert!(Matcher::new(vec![":smile:"], 16).is_err());
    }
}
