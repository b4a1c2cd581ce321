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
 *
 */
//! A simple hash-based implementation to track changes of the feed files.
//!
//! It is used by [crate::shared::SharedLookup] to only rebuild the lookup if one of its feeds
//! actually changed.

use std::fs;
use std::io;
use std::path::Path;

use digest::generic_array::GenericArray;
use sha2::{Digest, Sha256};

use crate::configs::config::FeedConfig;

/// A SHA-256 digest
pub type FeedHash = GenericArray<u8, <Sha256 as Digest>::OutputSize>;

/// The hashes of the three feeds of a [FeedConfig]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedHashes {
    canonical: FeedHash,
    github: FeedHash,
    emojione: FeedHash,
}

impl FeedHashes {
    /// Hashes all feeds the configuration points to
    pub fn from_config(config: &FeedConfig) -> io::Result<Self> {
        let (canonical, github, emojione) = config.paths();
        Ok(FeedHashes {
            canonical: hash_file(canonical)?,
            github: hash_file(github)?,
            emojione: hash_file(emojione)?,
        })
    }

    /// Whether any of the feeds differ between both
    pub fn changed(&self, other: &FeedHashes) -> bool {
        self != other
    }

    /// The hex encoded digests of the canonical list, the GitHub set and the EmojiOne set
    pub fn to_hex(&self) -> (String, String, String) {
        (hex::encode(&self.canonical), hex::encode(&self.github), hex::encode(&self.emojione))
    }
}

/// Computes the hash value of a single file.
pub fn hash_file(path: &Path) -> io::Result<FeedHash> {
    let mut hasher = Sha256::new();
    let mut file = fs::File::open(path)?;
    io::copy(&mut file, &mut hasher)?;
    Ok(hasher.result())
}

/// Computes the hash value of anything that can be read
pub fn hash_reader<R: io::Read>(mut reader: R) -> io::Result<FeedHash> {
    let mut hasher = Sha256::new();
    io::copy(&mut reader, &mut hasher)?;
    Ok(hasher.result())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn feed_hashes_as_hex() {
        let config = FeedConfig::new(
            PathBuf::from("test_files/feeds/emoji-test.txt"),
            PathBuf::from("test_files/feeds/github.json"),
            PathBuf::from("test_files/feeds/emojione.json"),
        );
        let hashes = FeedHashes::from_config(&config).unwrap();
        let (canonical, github, emojione) = hashes.to_hex();
        assert_eq!(canonical, hex::encode(hash_file(&config.canonical).unwrap()));
        assert_eq!(github.len(), 64);
        assert_ne!(github, emojione);
        assert!(!hashes.changed(&FeedHashes::from_config(&config).unwrap()));
    }

    #[test]
    fn known_digest() {
        let hash = hash_reader("abc".as_bytes()).unwrap();
        assert_eq!(hex::encode(&hash), "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad");
    }
}
