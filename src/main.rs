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
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::exit;

use clap::{App, Arg, ArgMatches};
use env_logger::Env;
use log::{error, info, warn};
use rayon::prelude::*;

use emoji_markup::configs::config::FeedConfig;
use emoji_markup::EmojiLookup;

fn main() {
    let matches = app().get_matches();

    let level = match matches.occurrences_of("verbose") {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace"
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    let config = match feed_config(&matches) {
        Some(config) => config,
        None => {
            error!("Either --config or all of --canonical, --github and --emojione are required");
            exit(2);
        }
    };

    let lookup = match EmojiLookup::from_config(&config) {
        Ok(lookup) => lookup,
        Err(err) => {
            error!("{}", err);
            exit(1);
        }
    };
    info!("{} diagnostics, {} of them alias collisions",
          lookup.report().len(),
          lookup.report().collisions().count());

    if let Some(export) = matches.value_of("export") {
        if let Err(err) = lookup.write_csv_to_path(export) {
            error!("Couldn't export the aliases to {}: {}", export, err);
            exit(1);
        }
        info!("Exported {} aliases to {}", lookup.aliases().len(), export);
    }

    let inputs: Vec<PathBuf> = matches.values_of("inputs")
        .map(|inputs| inputs.map(PathBuf::from).collect())
        .unwrap_or_default();
    let output_dir = matches.value_of("output_dir").map(PathBuf::from);

    if inputs.is_empty() {
        if matches.is_present("export") {
            return;
        }
        let mut text = String::new();
        if let Err(err) = io::stdin().read_to_string(&mut text) {
            error!("Couldn't read from stdin: {}", err);
            exit(1);
        }
        match lookup.replace_all(&text) {
            Ok(replaced) => print!("{}", replaced),
            Err(err) => {
                error!("{}", err);
                exit(1);
            }
        }
        return;
    }

    let results: Vec<Result<String, String>> = inputs.par_iter()
        .map(|input| process_file(&lookup, input, output_dir.as_deref()))
        .collect();

    let mut failed = false;
    for result in results {
        match result {
            Ok(replaced) => print!("{}", replaced),
            Err(err) => {
                error!("{}", err);
                failed = true;
            }
        }
    }
    if failed {
        exit(1);
    }
}

/// Replaces the aliases in one file.
/// Returns the result if it should go to stdout, or an empty string if it was written to `output_dir`.
fn process_file(lookup: &EmojiLookup, input: &Path, output_dir: Option<&Path>) -> Result<String, String> {
    let text = fs::read_to_string(input)
        .map_err(|err| format!("Couldn't read {}: {}", input.display(), err))?;
    let replaced = lookup.replace_all(&text)
        .map_err(|err| format!("{}: {}", input.display(), err))?;
    match output_dir {
        Some(output_dir) => {
            let file_name = match input.file_name() {
                Some(file_name) => file_name,
                None => return Err(format!("{} is not a file", input.display()))
            };
            let output = output_dir.join(file_name);
            fs::write(&output, replaced)
                .map_err(|err| format!("Couldn't write {}: {}", output.display(), err))?;
            info!("{} -> {}", input.display(), output.display());
            Ok(String::new())
        }
        None => Ok(replaced)
    }
}

/// Loads the configuration file if there is one and applies the command line overrides
fn feed_config(matches: &ArgMatches) -> Option<FeedConfig> {
    let mut config = match matches.value_of("config") {
        Some(file) => match FeedConfig::from_file(Path::new(file)) {
            Ok(config) => config,
            Err(err) => {
                error!("{}: {}", file, err);
                exit(1);
            }
        },
        None => FeedConfig::new(
            PathBuf::from(matches.value_of("canonical")?),
            PathBuf::from(matches.value_of("github")?),
            PathBuf::from(matches.value_of("emojione")?),
        )
    };
    if let Some(canonical) = matches.value_of("canonical") {
        config.canonical = PathBuf::from(canonical);
    }
    if let Some(github) = matches.value_of("github") {
        config.github = PathBuf::from(github);
    }
    if let Some(emojione) = matches.value_of("emojione") {
        config.emojione = PathBuf::from(emojione);
    }
    if let Some(listing_token) = matches.value_of("listing_token") {
        if listing_token.is_empty() {
            warn!("Empty listing token, the listing is disabled");
        }
        config.listing_token = Some(String::from(listing_token));
    }
    Some(config)
}

fn app<'a, 'b>() -> App<'a, 'b> {
    App::new("emoji_markup")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Constantin A. <emoji.builder@c1710.de>")
        .about("Replaces emoji shortcodes, ASCII smileys and emojis in text with HTML markup")
        .arg(Arg::with_name("config")
            .short("c")
            .long("config")
            .value_name("FILE")
            .help("A JSON or YAML file that specifies the feeds")
            .takes_value(true)
            .required(false))
        .arg(Arg::with_name("canonical")
            .long("canonical")
            .value_name("FILE")
            .help("The emoji-test.txt file")
            .takes_value(true)
            .required(false))
        .arg(Arg::with_name("github")
            .long("github")
            .value_name("FILE")
            .help("The JSON file of GitHub's emoji API")
            .takes_value(true)
            .required(false))
        .arg(Arg::with_name("emojione")
            .long("emojione")
            .value_name("FILE")
            .help("The emoji.json file of EmojiOne")
            .takes_value(true)
            .required(false))
        .arg(Arg::with_name("listing_token")
            .short("l")
            .long("listing-token")
            .value_name("TOKEN")
            .help("The token that gets replaced by a listing of all emojis")
            .long_help("The token that gets replaced by a listing of all emojis. \
            An empty token disables the listing")
            .takes_value(true)
            .required(false))
        .arg(Arg::with_name("export")
            .short("e")
            .long("export")
            .value_name("CSV")
            .help("Write all aliases with their emoji to a CSV file")
            .takes_value(true)
            .required(false))
        .arg(Arg::with_name("output_dir")
            .short("o")
            .long("output-dir")
            .value_name("DIR")
            .help("Write the results into this directory instead of stdout")
            .takes_value(true)
            .required(false))
        .arg(Arg::with_name("verbose")
            .short("v")
            .long("verbose")
            .help("Log more (can be used multiple times)")
            .multiple(true)
            .takes_value(false))
        .arg(Arg::with_name("inputs")
            .value_name("FILE")
            .help("The text files to process (stdin if none are given)")
            .multiple(true)
            .required(false))
}
