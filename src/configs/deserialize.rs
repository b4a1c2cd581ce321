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
//! Picks a serde format by file extension.

use std::fmt::{Debug, Display, Formatter};
use std::io::Read;
use std::path::Path;

use serde::de::DeserializeOwned;

/// The format that's used for files without (or with an unknown) extension
pub const DEFAULT_EXTENSION: &str = "json";

/// A format independent deserialization error
#[derive(Clone)]
pub struct SerdeError {
    debug: String,
    display: String
}

impl std::error::Error for SerdeError {}

impl Debug for SerdeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(&self.debug, f)
    }
}

impl Display for SerdeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.display, f)
    }
}

impl<E> From<E> for SerdeError
    where E: serde::de::Error {
    fn from(error: E) -> Self {
        Self {
            debug: format!("{:?}", error),
            display: format!("{}", error)
        }
    }
}

pub struct DeserializerFunction<R, T> {
    extension: &'static str,
    function: fn(R) -> Result<T, SerdeError>
}

impl<R, T> Debug for DeserializerFunction<R, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple(&format!("Deserialize {}", self.extension))
            .field(&core::any::type_name::<R>())
            .field(&core::any::type_name::<T>())
            .finish()
    }
}

macro_rules! new_deserializer {
    ($deserialize_function: path, $new_deserialize_function: ident) => {
        fn $new_deserialize_function(arg: R) -> Result<T, SerdeError> {
            $deserialize_function(arg).map_err(SerdeError::from)
        }
    };
}

macro_rules! deserializer_for_extensions {
    ($matching_extension:expr, $($extension:literal $(| $pattern:pat)? => $function:path),+$(,)?) => {
        match $matching_extension {
            $(
                $extension $(| $pattern)* => Some(Self::new($extension, $function)),
            )*
            _ => None
        }
    };
}

impl<R, T> DeserializerFunction<R, T>
    where R: Read, T: DeserializeOwned {
    pub fn deserialize(&self, reader: R) -> Result<T, SerdeError> {
        (self.function)(reader)
    }

    pub fn new(extension: &'static str, function: fn(R) -> Result<T, SerdeError>) -> Self {
        Self {
            extension,
            function
        }
    }

    pub fn extension(&self) -> &'static str {
        self.extension
    }

    pub fn for_file(file: &Path) -> Option<Self> {
        file.extension()
            .and_then(|extension| Self::for_extension(extension.to_string_lossy().as_ref()))
    }

    // serde_json and serde_yaml return different error types, so each one needs its own wrapper
    new_deserializer!(serde_json::from_reader, from_reader_json);
    new_deserializer!(serde_yaml::from_reader, from_reader_yaml);

    pub fn for_extension(extension: &str) -> Option<Self> {
        let extension = extension.to_lowercase();
        deserializer_for_extensions!(extension.as_str(),
            "json" => Self::from_reader_json,
            "yaml" | "yml" => Self::from_reader_yaml,
        )
    }
}

impl<R, T> Default for DeserializerFunction<R, T>
    where R: Read, T: DeserializeOwned {
    fn default() -> Self {
        Self::new(DEFAULT_EXTENSION, Self::from_reader_json)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn chooses_by_extension() {
        type Function = DeserializerFunction<&'static [u8], HashMap<String, u32>>;
        assert_eq!(Function::for_file(&PathBuf::from("feeds.YML")).unwrap().extension(), "yaml");
        assert_eq!(Function::for_file(&PathBuf::from("feeds.json")).unwrap().extension(), "json");
        assert!(Function::for_file(&PathBuf::from("feeds.toml")).is_none());
        assert!(Function::for_file(&PathBuf::from("feeds")).is_none());

        let yaml = Function::for_extension("yaml").unwrap();
        let parsed = yaml.deserialize(&b"a: 1\nb: 2\n"[..]).unwrap();
        assert_eq!(parsed["b"], 2);

        let json = Function::default();
        assert!(json.deserialize(&b"a: 1"[..]).is_err());
    }
}
