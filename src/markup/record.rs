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
//! The records a match produces and their rendering as markup.

use std::ops::Range;

use itertools::Itertools;

use crate::emojis::sequence::{EMOJI_PRESENTATION, TEXT_PRESENTATION};

/// A single emoji that was found in a text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmojiMatch {
    /// The alias as it appeared in the text
    pub title: String,
    /// The canonical key
    pub code: String,
    /// The literal emoji
    pub unicode: String,
    /// A variant selector that directly followed the alias
    pub selector: Option<char>,
}

impl EmojiMatch {
    /// The literal emoji with the variant selector it was written with
    pub fn content(&self) -> String {
        let mut content = self.unicode.clone();
        content.extend(self.selector);
        content
    }

    /// `<span class="emoji" title="…" data-unicode="…">…</span>`
    pub fn to_html(&self) -> String {
        format!(r#"<span class="emoji" title="{}" data-unicode="{}">{}</span>"#,
                escape_html(&self.title),
                escape_html(&self.code),
                escape_html(&self.content()))
    }
}

/// One emoji in an [EmojiListing]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    /// All aliases, joined by spaces
    pub title: String,
    pub code: String,
    pub unicode: String,
}

impl ListingEntry {
    /// The emoji followed by `U+FE0E`
    pub fn text_presentation(&self) -> String {
        with_selector(&self.unicode, TEXT_PRESENTATION)
    }

    /// The emoji followed by `U+FE0F`
    pub fn emoji_presentation(&self) -> String {
        with_selector(&self.unicode, EMOJI_PRESENTATION)
    }

    /// The three presentations, separated by spaces
    pub fn content(&self) -> String {
        vec![self.unicode.clone(), self.text_presentation(), self.emoji_presentation()]
            .iter()
            .join(" ")
    }

    pub fn to_html(&self) -> String {
        format!(r#"<li class="emoji" title="{}" data-unicode="{}">{}</li>"#,
                escape_html(&self.title),
                escape_html(&self.code),
                escape_html(&self.content()))
    }
}

fn with_selector(unicode: &str, selector: u32) -> String {
    let mut presentation = unicode.to_owned();
    presentation.extend(char::from_u32(selector));
    presentation
}

/// A reference listing of the whole table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmojiListing {
    /// The number of canonical emojis
    pub emoji_count: usize,
    /// The number of aliases they can be written with
    pub alias_count: usize,
    pub entries: Vec<ListingEntry>,
}

impl EmojiListing {
    pub fn summary(&self) -> String {
        format!("{} emojis with {} mappings", self.emoji_count, self.alias_count)
    }

    /// `<ul class="emojilist">` with the summary as the first item
    pub fn to_html(&self) -> String {
        let items = self.entries.iter()
            .map(ListingEntry::to_html)
            .join("");
        format!(r#"<ul class="emojilist"><li>{}</li>{}</ul>"#, escape_html(&self.summary()), items)
    }
}

/// What a match is replaced with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmojiMarkup {
    Emoji(EmojiMatch),
    /// The listing token was found
    Listing(EmojiListing),
}

impl EmojiMarkup {
    pub fn to_html(&self) -> String {
        match self {
            EmojiMarkup::Emoji(emoji) => emoji.to_html(),
            EmojiMarkup::Listing(listing) => listing.to_html(),
        }
    }
}

/// A match with the byte range of the text it replaces.
///
/// The range covers the alias and a variant selector directly after it, but neither the
/// preceding whitespace nor trailing punctuation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub range: Range<usize>,
    pub markup: EmojiMarkup,
}

impl Match {
    pub fn start(&self) -> usize {
        self.range.start
    }

    pub fn end(&self) -> usize {
        self.range.end
    }
}

/// Escapes text for both element content and (double quoted) attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for character in text.chars() {
        match character {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other)
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emoji_html() {
        let heart = EmojiMatch {
            title: String::from("<3"),
            code: String::from("2764"),
            unicode: String::from("\u{2764}"),
            selector: Some('\u{fe0f}'),
        };
        assert_eq!(heart.content(), "\u{2764}\u{fe0f}");
        assert_eq!(heart.to_html(),
                   "<span class=\"emoji\" title=\"&lt;3\" data-unicode=\"2764\">\u{2764}\u{fe0f}</span>");
    }

    #[test]
    fn listing_html() {
        let listing = EmojiListing {
            emoji_count: 1,
            alias_count: 2,
            entries: vec![ListingEntry {
                title: String::from(":grinning: 😀"),
                code: String::from("1F600"),
                unicode: String::from("😀"),
            }],
        };
        assert_eq!(listing.entries[0].content(), "😀 😀\u{fe0e} 😀\u{fe0f}");
        assert_eq!(listing.to_html(),
                   "<ul class=\"emojilist\"><li>1 emojis with 2 mappings</li>\
                   <li class=\"emoji\" title=\":grinning: 😀\" data-unicode=\"1F600\">😀 😀\u{fe0e} 😀\u{fe0f}</li></ul>");
    }
}
