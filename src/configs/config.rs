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
//! Where the feeds are and how the lookup is built from them.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::configs::deserialize::DeserializerFunction;
use crate::configs::loading_error::LoadingError;
use crate::markup::lookup::{BuildOptions, DEFAULT_LISTING_TOKEN};
use crate::markup::matcher::DEFAULT_SIZE_LIMIT;

/// The configuration file, either JSON or YAML.
///
/// ```yaml
/// canonical: feeds/emoji-test.txt
/// github: feeds/github.json
/// emojione: feeds/emojione.json
/// listing_token: ":ALL_UNICODE_EMOJI:"   # null disables the listing
/// regex_size_limit: 67108864
/// exclude_keycap_literals: true
/// ```
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FeedConfig {
    pub canonical: PathBuf,
    pub github: PathBuf,
    pub emojione: PathBuf,
    #[serde(default = "default_listing_token")]
    pub listing_token: Option<String>,
    #[serde(default = "default_size_limit")]
    pub regex_size_limit: usize,
    #[serde(default = "default_exclude_keycap_literals")]
    pub exclude_keycap_literals: bool,
}

fn default_listing_token() -> Option<String> {
    Some(String::from(DEFAULT_LISTING_TOKEN))
}

fn default_size_limit() -> usize {
    DEFAULT_SIZE_LIMIT
}

fn default_exclude_keycap_literals() -> bool {
    true
}

impl FeedConfig {
    /// A configuration with the default settings
    pub fn new(canonical: PathBuf, github: PathBuf, emojione: PathBuf) -> Self {
        let options = BuildOptions::default();
        FeedConfig {
            canonical,
            github,
            emojione,
            listing_token: options.listing_token,
            regex_size_limit: options.regex_size_limit,
            exclude_keycap_literals: options.exclude_keycap_literals,
        }
    }

    /// Loads a configuration file.
    ///
    /// The format is chosen by the extension (JSON if there's none) and relative feed paths
    /// are resolved against the directory of the file.
    pub fn from_file(file: &Path) -> Result<Self, LoadingError> {
        let reader = BufReader::new(File::open(file)?);
        let deserializer = DeserializerFunction::for_file(file).unwrap_or_default();
        let mut config: FeedConfig = deserializer.deserialize(reader)?;
        if let Some(parent) = file.parent() {
            config.relate_paths(parent);
        }
        debug!("Loaded {:?}", config);
        Ok(config)
    }

    /// Reads a JSON configuration; paths are kept as they are
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, LoadingError> {
        let config = DeserializerFunction::default().deserialize(reader)?;
        Ok(config)
    }

    fn relate_paths(&mut self, base_dir: &Path) {
        for path in vec![&mut self.canonical, &mut self.github, &mut self.emojione] {
            let related = relate_path(base_dir, path);
            *path = related;
        }
    }

    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            listing_token: self.listing_token.clone(),
            regex_size_limit: self.regex_size_limit,
            exclude_keycap_literals: self.exclude_keycap_literals,
        }
    }

    /// The canonical list, the GitHub set and the EmojiOne set
    pub fn paths(&self) -> (&Path, &Path, &Path) {
        (&self.canonical, &self.github, &self.emojione)
    }
}

fn relate_path(base_dir: &Path, target_path: &Path) -> PathBuf {
    // has_root instead of is_absolute, as \file would otherwise be treated like .\file on Windows
    if !target_path.has_root() {
        base_dir.join(target_path)
    } else {
        target_path.to_path_buf()
    }
}
