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
//! Builds a lookup from emoji aliases (shortcodes, ASCII smileys and the emojis themselves) to
//! canonical unicode sequences and replaces these aliases in text with markup.

#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;

/// A helper module to detect changed feeds based on their SHA256 hashes
pub mod changes;
/// Loading the configuration file
pub mod configs;
/// Codepoint sequences and their qualification status
pub mod emojis;
/// Finding aliases in text and turning them into markup
pub mod markup;
/// A lookup that can be reloaded at runtime
pub mod shared;
/// Building the emoji table and its inverse from the feeds
pub mod tables;

pub use markup::lookup::{BuildOptions, EmojiLookup};
pub use markup::record::{EmojiMarkup, Match};

#[cfg(test)]
mod tests;
