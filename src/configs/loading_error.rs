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

use std::fmt::{Display, Formatter};

use crate::configs::deserialize::SerdeError;

/// A configuration file couldn't be loaded
#[derive(Debug)]
pub enum LoadingError {
    Io(std::io::Error),
    Serde(SerdeError)
}

impl Display for LoadingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadingError::Io(error) => write!(f, "Couldn't read the configuration: {}", error),
            LoadingError::Serde(error) => write!(f, "Invalid configuration: {}", error)
        }
    }
}

impl std::error::Error for LoadingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadingError::Io(error) => Some(error),
            LoadingError::Serde(error) => Some(error)
        }
    }
}

impl From<std::io::Error> for LoadingError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error)
    }
}

impl From<SerdeError> for LoadingError {
    fn from(error: SerdeError) -> Self {
        Self::Serde(error)
    }
}
