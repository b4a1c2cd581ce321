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
 */
//! Codepoint sequences and the normalization rules used to give every emoji exactly one
//! canonical key.

use std::fmt::{Display, Formatter};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use itertools::Itertools;
use regex::Regex;

/// `U+200D ZERO WIDTH JOINER`
pub const ZWJ: u32 = 0x200d;
/// `U+FE0E VARIATION SELECTOR-15`, requests text presentation
pub const TEXT_PRESENTATION: u32 = 0xfe0e;
/// `U+FE0F VARIATION SELECTOR-16`, requests emoji presentation
pub const EMOJI_PRESENTATION: u32 = 0xfe0f;

/// A sequence of Unicode® codepoints that represents one emoji.
///
/// Its [Display] implementation is the canonical key, i.e. the codepoints in upper case
/// hexadecimal (at least 4 digits) joined by single spaces.
/// # Examples
/// ```
/// use emoji_markup::emojis::sequence::CodepointSequence;
///
/// let family = CodepointSequence::from_hex("1f468-200d-1f469").unwrap();
/// assert_eq!(family.to_string(), "1F468 200D 1F469");
///
/// let keycap = CodepointSequence::from_hex("23 fe0f 20e3").unwrap();
/// assert_eq!(keycap.to_string(), "0023 FE0F 20E3");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CodepointSequence(Vec<u32>);

impl CodepointSequence {
    const KEYCAP_DIGITS: RangeInclusive<u32> = 0x30..=0x39;
    const NUMBER_SIGN: u32 = 0x23;
    const ASTERISK: u32 = 0x2a;

    /// Parses hexadecimal codepoints that are separated by whitespace, dashes (`-`) or
    /// underscores (`_`).
    ///
    /// Unlike the lenient parsing used for file names, every segment has to be a valid
    /// codepoint here, so that custom images like `octocat` are not mistaken for emojis.
    /// # Examples
    /// ```
    /// use emoji_markup::emojis::sequence::{CodepointSequence, SequenceError};
    ///
    /// assert!(CodepointSequence::from_hex("1F3F3 FE0F 200D 1F308").is_ok());
    /// assert_eq!(
    ///     CodepointSequence::from_hex("octocat"),
    ///     Err(SequenceError::NotHex(String::from("octocat")))
    /// );
    /// assert_eq!(CodepointSequence::from_hex(" "), Err(SequenceError::Empty));
    /// ```
    pub fn from_hex(raw: &str) -> Result<Self, SequenceError> {
        lazy_static! {
            static ref DELIMITERS: Regex = Regex::new(r"[\s_-]+").unwrap();
            static ref HEX_CODEPOINT: Regex = Regex::new(r"^[a-fA-F0-9]{1,8}$").unwrap();
        }

        let codepoints = DELIMITERS.split(raw.trim())
            .filter(|segment| !segment.is_empty())
            .map(|segment| if HEX_CODEPOINT.is_match(segment) {
                u32::from_str_radix(segment, 16)
                    .map_err(|_| SequenceError::NotHex(segment.to_owned()))
                    .and_then(|codepoint| match char::from_u32(codepoint) {
                        Some(_) => Ok(codepoint),
                        None => Err(SequenceError::InvalidCodepoint(codepoint))
                    })
            } else {
                Err(SequenceError::NotHex(segment.to_owned()))
            })
            .collect::<Result<Vec<u32>, SequenceError>>()?;

        if codepoints.is_empty() {
            Err(SequenceError::Empty)
        } else {
            Ok(Self(codepoints))
        }
    }

    /// Takes the codepoints of a literal string as they are.
    pub fn from_chars(literal: &str) -> Self {
        Self(literal.chars().map(|character| character as u32).collect())
    }

    /// Removes both presentation selectors (`U+FE0E` and `U+FE0F`).
    pub fn strip_variant_selectors(&self) -> Self {
        Self(self.0.iter()
            .filter(|codepoint| !is_variant_selector(**codepoint))
            .copied()
            .collect())
    }

    /// Brings this sequence into its canonical form.
    ///
    /// Variant selectors are removed. If more than one codepoint remains, the sequence contains
    /// no `U+200D` and `is_known` does not recognize the stripped sequence, all codepoints get
    /// joined by `U+200D` instead.
    /// Some datasets write compound emojis (e.g. families) without joiners, this makes them
    /// match the joined form.
    /// # Examples
    /// ```
    /// use emoji_markup::emojis::sequence::CodepointSequence;
    ///
    /// let couple = CodepointSequence::from_hex("1f469 fe0f 1f468").unwrap();
    ///
    /// let joined = couple.normalize(|_| false);
    /// assert_eq!(joined.to_string(), "1F469 200D 1F468");
    ///
    /// // Already registered sequences are left alone
    /// let kept = couple.normalize(|candidate| candidate.to_string() == "1F469 1F468");
    /// assert_eq!(kept.to_string(), "1F469 1F468");
    /// ```
    pub fn normalize<F>(&self, is_known: F) -> Self
        where F: Fn(&CodepointSequence) -> bool {
        let stripped = self.strip_variant_selectors();
        if stripped.len() > 1 && !stripped.contains_zwj() && !is_known(&stripped) {
            Self(Itertools::intersperse(stripped.0.into_iter(), ZWJ).collect())
        } else {
            stripped
        }
    }

    /// Renders the sequence as the literal characters it consists of.
    pub fn render(&self) -> String {
        self.0.iter()
            .filter_map(|codepoint| char::from_u32(*codepoint))
            .collect()
    }

    /// The length of the canonical key, which is used to decide which of two sequences is more
    /// specific.
    pub fn key_len(&self) -> usize {
        self.0.iter()
            .map(|codepoint| format!("{:04X}", codepoint).len())
            .sum::<usize>()
            + self.0.len().saturating_sub(1)
    }

    /// Whether this is a lone `#`, `*` or digit, i.e. the base of a keycap sequence.
    pub fn is_keycap_base(&self) -> bool {
        match self.0.as_slice() {
            [codepoint] => *codepoint == Self::NUMBER_SIGN
                || *codepoint == Self::ASTERISK
                || Self::KEYCAP_DIGITS.contains(codepoint),
            _ => false
        }
    }

    pub fn contains_zwj(&self) -> bool {
        self.0.contains(&ZWJ)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }
}

/// Whether the codepoint is one of the two presentation selectors.
pub fn is_variant_selector(codepoint: u32) -> bool {
    codepoint == TEXT_PRESENTATION || codepoint == EMOJI_PRESENTATION
}

impl Display for CodepointSequence {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.iter()
            .map(|codepoint| format!("{:04X}", codepoint))
            .join(" "))
    }
}

impl FromStr for CodepointSequence {
    type Err = SequenceError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::from_hex(raw)
    }
}

impl From<Vec<u32>> for CodepointSequence {
    fn from(sequence: Vec<u32>) -> Self {
        Self(sequence)
    }
}

impl From<CodepointSequence> for Vec<u32> {
    fn from(sequence: CodepointSequence) -> Self {
        sequence.0
    }
}

impl AsRef<[u32]> for CodepointSequence {
    fn as_ref(&self) -> &[u32] {
        &self.0
    }
}

/// An error that occurs while parsing a textual codepoint sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequenceError {
    /// Nothing but delimiters (or nothing at all) was given
    Empty,
    /// A segment is not a hexadecimal number (of at most 8 digits)
    NotHex(String),
    /// The number is not a Unicode® scalar value (e.g. a surrogate)
    InvalidCodepoint(u32),
}

impl Display for SequenceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SequenceError::Empty => write!(f, "empty codepoint sequence"),
            SequenceError::NotHex(segment) => write!(f, "not a hexadecimal codepoint: {}", segment),
            SequenceError::InvalidCodepoint(codepoint) => write!(f, "invalid codepoint: {:X}", codepoint),
        }
    }
}

impl std::error::Error for SequenceError {}
