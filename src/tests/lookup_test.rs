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

use std::fs;

use crate::emojis::sequence::CodepointSequence;
use crate::markup::lookup::BuildOptions;
use crate::markup::record::{EmojiMarkup, EmojiMatch, Match};
use crate::tables::errors::Diagnostic;
use crate::tests::test_lookup;

fn key(raw: &str) -> CodepointSequence {
    raw.parse().unwrap()
}

fn emoji(found: Option<Match>) -> (std::ops::Range<usize>, EmojiMatch) {
    match found {
        Some(Match { range, markup: EmojiMarkup::Emoji(emoji) }) => (range, emoji),
        other => panic!("Expected an emoji, got {:?}", other)
    }
}

#[test]
fn test_table_from_feeds() {
    let lookup = test_lookup(&BuildOptions::default());

    assert_eq!(lookup.table().len(), 13);
    assert_eq!(lookup.aliases().len(), 43);

    // New emojis from the EmojiOne set
    assert!(lookup.table().contains_key(&key("1F46A")));
    assert!(lookup.table().contains_key(&key("0031")));
    assert!(lookup.table().contains_key(&key("0023")));
    // Components are skipped
    assert!(!lookup.table().contains_key(&key("1F3FB")));

    for (alias, emoji) in lookup.aliases().iter() {
        assert!(lookup.table().contains_key(emoji), "{} maps to the unknown {}", alias, emoji);
    }
}

#[test]
fn test_normalized_keys() {
    let lookup = test_lookup(&BuildOptions::default());
    let aliases = lookup.aliases();

    assert_eq!(aliases.get(":relaxed:"), Some(&key("263A")));
    assert_eq!(aliases.get(":heart:"), Some(&key("2764")));
    assert_eq!(aliases.get("<3"), Some(&key("2764")));
    assert_eq!(aliases.get(":de:"), Some(&key("1F1E9 200D 1F1EA")));
    assert_eq!(aliases.get(":one:"), Some(&key("0031 200D 20E3")));
    assert_eq!(aliases.get(":wave_tone1:"), Some(&key("1F44B 200D 1F3FB")));
    assert_eq!(aliases.get(":family_man_woman_boy:"), Some(&key("1F468 200D 1F469 200D 1F466")));

    for (emoji, _) in lookup.table() {
        let rendered = CodepointSequence::from_chars(&emoji.render());
        assert_eq!(&lookup.table().normalize(&rendered), emoji);
    }
}

#[test]
fn test_diagnostics() {
    let lookup = test_lookup(&BuildOptions::default());
    let report = lookup.report();

    assert_eq!(report.len(), 5);
    assert!(report.diagnostics().contains(&Diagnostic::MalformedLine(String::from("this line is broken"))));
    assert!(report.diagnostics().iter().any(|diagnostic| matches!(diagnostic,
        Diagnostic::UnparseableSequence { entry, .. } if entry == ":octocat:")));
    assert!(report.diagnostics().iter().any(|diagnostic| matches!(diagnostic,
        Diagnostic::UnknownSequence { key, .. } if key == "1F9FF")));
    assert!(report.diagnostics().iter().any(|diagnostic| matches!(diagnostic,
        Diagnostic::UnparseableSequence { raw, .. } if raw == "zz-top")));

    // Custom images and unknown emojis don't create anything
    assert!(!lookup.aliases().contains_alias(":octocat:"));
    assert!(!lookup.aliases().contains_alias(":nazar_amulet:"));
    assert!(!lookup.aliases().contains_alias(":broken:"));
}

#[test]
fn test_collision() {
    let lookup = test_lookup(&BuildOptions::default());

    assert_eq!(lookup.aliases().get(":family:"), Some(&key("1F468 200D 1F469 200D 1F466")));
    assert_eq!(lookup.aliases().get(":family_single:"), Some(&key("1F46A")));

    let collisions: Vec<_> = lookup.report().collisions().collect();
    assert_eq!(collisions, vec![&Diagnostic::AliasCollision {
        alias: String::from(":family:"),
        kept: String::from("1F468 200D 1F469 200D 1F466"),
        discarded: String::from("1F46A"),
    }]);
}

#[test]
fn test_keycap_literals() {
    let lookup = test_lookup(&BuildOptions::default());
    assert!(!lookup.aliases().contains_alias("1"));
    assert!(!lookup.aliases().contains_alias("#"));
    assert_eq!(lookup.aliases().get(":digit_one:"), Some(&key("0031")));
    assert_eq!(lookup.find("I have 1 cat").unwrap(), None);

    let lookup = test_lookup(&BuildOptions {
        exclude_keycap_literals: false,
        ..BuildOptions::default()
    });
    assert_eq!(lookup.aliases().len(), 45);
    assert_eq!(lookup.aliases().get("1"), Some(&key("0031")));
    assert_eq!(lookup.aliases().get("#"), Some(&key("0023")));
}

#[test]
fn test_boundaries() {
    let lookup = test_lookup(&BuildOptions::default());

    let (range, smile) = emoji(lookup.find("hello :) world").unwrap());
    assert_eq!(range, 6..8);
    assert_eq!(smile.title, ":)");
    assert_eq!(smile.code, "1F642");
    assert_eq!(smile.unicode, "🙂");
    assert_eq!(smile.selector, None);

    assert_eq!(lookup.find("hello:)world").unwrap(), None);
    assert_eq!(lookup.find("hello :)world").unwrap(), None);
    assert_eq!(lookup.find(":grinning:s").unwrap(), None);
}

#[test]
fn test_trailing_punctuation() {
    let lookup = test_lookup(&BuildOptions::default());

    let (range, _) = emoji(lookup.find(":) .").unwrap());
    assert_eq!(range, 0..2);
    let (range, _) = emoji(lookup.find(":).").unwrap());
    assert_eq!(range, 0..2);
    let (range, wink) = emoji(lookup.find("see you ;)…").unwrap());
    assert_eq!(range, 8..10);
    assert_eq!(wink.code, "1F609");
    assert_eq!(lookup.find(":).,").unwrap(), None);
}

#[test]
fn test_selector() {
    let lookup = test_lookup(&BuildOptions::default());

    let (range, heart) = emoji(lookup.find("I <3\u{fe0f} you").unwrap());
    assert_eq!(range, 2..7);
    assert_eq!(heart.selector, Some('\u{fe0f}'));
    assert_eq!(heart.content(), "\u{2764}\u{fe0f}");

    let (range, relaxed) = emoji(lookup.find("\u{263a}\u{fe0e}").unwrap());
    assert_eq!(range, 0..6);
    assert_eq!(relaxed.code, "263A");
    assert_eq!(relaxed.selector, Some('\u{fe0e}'));
}

#[test]
fn test_literal_emoji() {
    let lookup = test_lookup(&BuildOptions::default());
    let (_, grinning) = emoji(lookup.find("look 😀").unwrap());
    assert_eq!(grinning.title, "😀");
    assert_eq!(grinning.code, "1F600");
}

#[test]
fn test_find_iter() {
    let lookup = test_lookup(&BuildOptions::default());
    let titles: Vec<String> = lookup.find_iter(";) ;) <3, :family:")
        .map(|found| match found.unwrap().markup {
            EmojiMarkup::Emoji(emoji) => emoji.title,
            EmojiMarkup::Listing(_) => String::from("listing")
        })
        .collect();
    assert_eq!(titles, vec![";)", ";)", "<3", ":family:"]);

    assert_eq!(lookup.find_at("x :D :)", 4).unwrap().map(|found| found.range), Some(5..7));
    assert_eq!(lookup.find_at("x :D :)", 5).unwrap().map(|found| found.range), Some(5..7));
    assert_eq!(lookup.find_at("x :D :)", 6).unwrap(), None);
}

#[test]
fn test_listing() {
    let lookup = test_lookup(&BuildOptions::default());

    let listing = match lookup.find("Everything: :ALL_UNICODE_EMOJI:").unwrap() {
        Some(Match { range, markup: EmojiMarkup::Listing(listing) }) => {
            assert_eq!(range, 12..31);
            listing
        }
        other => panic!("Expected the listing, got {:?}", other)
    };
    assert_eq!(listing.emoji_count, lookup.table().len());
    assert_eq!(listing.alias_count, lookup.aliases().len());
    assert_eq!(listing.entries.len(), 13);
    assert_eq!(listing.summary(), "13 emojis with 43 mappings");

    let smiley = listing.entries.iter()
        .find(|entry| entry.code == "1F603")
        .unwrap();
    assert_eq!(smiley.title, ":-D :D :smiley: =D");
    assert_eq!(smiley.emoji_presentation(), "😃\u{fe0f}");

    let disabled = test_lookup(&BuildOptions {
        listing_token: None,
        ..BuildOptions::default()
    });
    assert_eq!(disabled.find(":ALL_UNICODE_EMOJI:").unwrap(), None);
}

#[test]
fn test_replace_all() {
    let lookup = test_lookup(&BuildOptions::default());
    assert_eq!(
        lookup.replace_all("Hi :) and :D.").unwrap(),
        "Hi <span class=\"emoji\" title=\":)\" data-unicode=\"1F642\">🙂</span> \
        and <span class=\"emoji\" title=\":D\" data-unicode=\"1F603\">😃</span>."
    );
    assert_eq!(
        lookup.replace_all("I <3 <b>you</b>").unwrap(),
        "I <span class=\"emoji\" title=\"&lt;3\" data-unicode=\"2764\">\u{2764}</span> <b>you</b>"
    );
    assert_eq!(lookup.replace_all("nothing here").unwrap(), "nothing here");
}

#[test]
fn test_csv_export() {
    let lookup = test_lookup(&BuildOptions::default());

    let mut buffer = Vec::new();
    lookup.write_csv(&mut buffer).unwrap();
    let csv = String::from_utf8(buffer).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 44);
    assert_eq!(lines[0], "alias,code,unicode");
    assert!(lines.contains(&":family:,1F468 200D 1F469 200D 1F466,\u{1f468}\u{200d}\u{1f469}\u{200d}\u{1f466}"));

    let file = tempfile::NamedTempFile::new().unwrap();
    lookup.write_csv_to_path(file.path()).unwrap();
    assert_eq!(fs::read_to_string(file.path()).unwrap(), csv);
}
