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


use std::convert::TryFrom;

use regex::{Captures, Regex};

/// One parsed line of an `emoji-test.txt`-like file
#[derive(Debug)]
pub struct EmojiTest<'a> {
    pub sequence: &'a str,
    pub status: &'a str,
    /// Everything after the `#`, usually the emoji itself, its version and its name
    pub comment: Option<&'a str>
}

impl<'a> From<Captures<'a>> for EmojiTest<'a> {
    fn from(captures: Captures<'a>) -> Self {
        // Both groups are mandatory in the regex, so they're always captured
        let sequence = captures.name("sequence").map_or("", |match_| match_.as_str());
        let status = captures.name("status").map_or("", |match_| match_.as_str());
        let comment = captures.name("comment").map(|match_| match_.as_str().trim());

        Self {
            sequence,
            status,
            comment
        }
    }
}

const EMOJI_SEQUENCE_SPACE_REGEX: &str = r"(?P<sequence>([A-F0-9a-f]{1,8})(\s+([A-F0-9a-f]{1,8}))*)";
// Unknown statuses are matched here and sorted out later
const EMOJI_STATUS_REGEX: &str = r"(?P<status>[a-z][a-z-]*)";
const EMOJI_COMMENT_REGEX: &str = r"(#\s*(?P<comment>.*))?";

/// The syntax of these files is:
/// `Codepoint ; Status # Emoji "E"Version Emoji name`
///
/// Older versions do not include the version and use other statuses (like `keyboard`),
/// which is why everything after the status is optional.
pub fn test_regex() -> &'static Regex {
    lazy_static! {
            static ref EMOJI_TEST_REGEX: Regex = Regex::new(&format!(r"(?i)^{}\s*;\s*{}\s*{}$",
                                               EMOJI_SEQUENCE_SPACE_REGEX,
                                               EMOJI_STATUS_REGEX,
                                               EMOJI_COMMENT_REGEX)
            ).unwrap();
    };
    &*EMOJI_TEST_REGEX
}

impl<'a> TryFrom<&'a str> for EmojiTest<'a> {
    type Error = ();

    fn try_from(value: &'a str) -> Result<Self, Self::Error> {
        let captures = test_regex().captures(value).ok_or(())?;
        Ok(Self::from(captures))
    }
}

/// Parses a single (already trimmed) line, returning `None` for lines that don't follow the syntax
pub fn match_line(line: &str) -> Option<EmojiTest> {
    let entry = EmojiTest::try_from(line).ok();
    trace!("Parsed:  {:?}", entry);
    entry
}
