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
//! Fetches the canonical list and the GitHub set from the web.

use std::collections::HashMap;
use std::io::{Cursor, Read};
use std::sync::RwLock;

use crate::markup::lookup::{BuildOptions, EmojiLookup};
use crate::tables::errors::TableError;

pub const EMOJI_TEST: &str = "emoji-test.txt";
/// GitHub's emoji API, which returns the shortcode → image URL map
pub const GITHUB_EMOJIS: &str = "https://api.github.com/emojis";

/// Fetches the canonical list for the given emoji version and the GitHub set and builds a lookup
/// with the EmojiOne set from `emojione`.
pub fn load_online_lookup<R: Read>(version: (u32, u32), emojione: R, options: &BuildOptions) -> Result<EmojiLookup, TableError> {
    // The GitHub API rejects requests without a user agent
    let client = reqwest::blocking::Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()?;
    let canonical = get_online(&client, &build_url(version, EMOJI_TEST))?;
    let github = get_online(&client, GITHUB_EMOJIS)?;
    EmojiLookup::build(canonical, github, emojione, options)
}

/// A simple helper function to build the URLs for the different files.
#[inline]
fn build_url(version: (u32, u32), file: &'static str) -> String {
    format!("https://unicode.org/Public/emoji/{}.{}/{}", version.0, version.1, file)
}

/// Downloads a file or returns it from the cache
pub fn get_online(client: &reqwest::blocking::Client, url: &str) -> Result<Cursor<bytes::Bytes>, reqwest::Error> {
    if let Ok(cache) = (&*FEED_CACHE as &FeedCache).read() {
        if let Some(cached) = cache.get(url) {
            debug!("Using the cached version of {}", url);
            return Ok(Cursor::new(cached.clone()));
        }
    }
    info!("Downloading {}", url);
    let bytes = client.get(url).send()?
        .error_for_status()?
        .bytes()?;

    if let Ok(mut cache) = (&*FEED_CACHE as &FeedCache).write() {
        // Another thread might have been faster
        cache.entry(String::from(url)).or_insert_with(|| bytes.clone());
    }

    Ok(Cursor::new(bytes))
}

type FeedCache = RwLock<HashMap<String, bytes::Bytes>>;

lazy_static! {
    static ref FEED_CACHE: FeedCache = RwLock::new(HashMap::with_capacity(8));
}
