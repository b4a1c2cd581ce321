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
//! A lookup that can be replaced while other threads are using it.

use std::sync::{Arc, Mutex, PoisonError, RwLock};

use crate::changes::FeedHashes;
use crate::configs::config::FeedConfig;
use crate::markup::lookup::EmojiLookup;
use crate::tables::errors::TableError;

/// Holds the current [EmojiLookup] for a [FeedConfig].
///
/// Readers get an `Arc` to a complete lookup; a reload builds a new one and swaps it in,
/// so nobody ever sees a half-built table.
#[derive(Debug)]
pub struct SharedLookup {
    config: FeedConfig,
    current: RwLock<Arc<EmojiLookup>>,
    hashes: Mutex<FeedHashes>,
}

impl SharedLookup {
    pub fn load(config: FeedConfig) -> Result<Self, TableError> {
        let hashes = FeedHashes::from_config(&config)?;
        let lookup = EmojiLookup::from_config(&config)?;
        Ok(SharedLookup {
            config,
            current: RwLock::new(Arc::new(lookup)),
            hashes: Mutex::new(hashes),
        })
    }

    /// The lookup that is currently in use
    pub fn current(&self) -> Arc<EmojiLookup> {
        let current = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&current)
    }

    /// Rebuilds the lookup unconditionally.
    /// If that fails, the previous lookup stays in place.
    pub fn reload(&self) -> Result<Arc<EmojiLookup>, TableError> {
        let mut hashes = self.hashes.lock().unwrap_or_else(PoisonError::into_inner);
        let new_hashes = FeedHashes::from_config(&self.config)?;
        let lookup = self.swap(EmojiLookup::from_config(&self.config)?);
        *hashes = new_hashes;
        Ok(lookup)
    }

    /// Rebuilds the lookup if the content of any feed changed.
    /// Returns the new lookup if it was rebuilt.
    pub fn reload_if_changed(&self) -> Result<Option<Arc<EmojiLookup>>, TableError> {
        let mut hashes = self.hashes.lock().unwrap_or_else(PoisonError::into_inner);
        let new_hashes = FeedHashes::from_config(&self.config)?;
        if !hashes.changed(&new_hashes) {
            debug!("Feeds unchanged, keeping the current lookup");
            return Ok(None);
        }
        info!("Feeds changed, rebuilding the lookup");
        let (canonical, github, emojione) = new_hashes.to_hex();
        debug!("New feed hashes: canonical list {}, github set {}, emojione set {}", canonical, github, emojione);
        let lookup = self.swap(EmojiLookup::from_config(&self.config)?);
        *hashes = new_hashes;
        Ok(Some(lookup))
    }

    fn swap(&self, lookup: EmojiLookup) -> Arc<EmojiLookup> {
        let lookup = Arc::new(lookup);
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *current = Arc::clone(&lookup);
        lookup
    }

    pub fn config(&self) -> &FeedConfig {
        &self.config
    }
}
