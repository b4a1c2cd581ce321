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

use std::fs::File;
use std::io::BufReader;

use crate::markup::lookup::{BuildOptions, EmojiLookup};

mod lookup_test;

pub const CANONICAL_FILE: &str = "test_files/feeds/emoji-test.txt";
pub const GITHUB_FILE: &str = "test_files/feeds/github.json";
pub const EMOJIONE_FILE: &str = "test_files/feeds/emojione.json";
pub const YAML_CONFIG: &str = "test_files/feeds.yaml";
pub const JSON_CONFIG: &str = "test_files/feeds.json";

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Builds the lookup from the test feeds
pub fn test_lookup(options: &BuildOptions) -> EmojiLookup {
    init_logger();
    EmojiLookup::build(
        BufReader::new(File::open(CANONICAL_FILE).unwrap()),
        File::open(GITHUB_FILE).unwrap(),
        File::open(EMOJIONE_FILE).unwrap(),
        options
    ).unwrap()
}
