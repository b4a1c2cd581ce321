use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// The status (or grade) of an emoji according to `emoji-test.txt`
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum EmojiStatus {
    /// Skin tones, hair styles and other parts that are only used inside sequences
    Component,
    /// It is a regular, RGI emoji
    FullyQualified,
    /// An RGI emoji with some of its variant selectors missing
    MinimallyQualified,
    /// Not actually displayed as an emoji/not RGI
    Unqualified,
    /// The name early versions of `emoji-test.txt` used for anything not fully qualified
    NonFullyQualified,
    /// Plain keyboard characters (e.g. digits) listed in early versions of `emoji-test.txt`
    Keyboard,
}

impl EmojiStatus {
    /// Whether entries of this status make it into the canonical table
    pub fn is_ingested(&self) -> bool {
        matches!(self, Self::FullyQualified | Self::Keyboard)
    }
}

impl Default for EmojiStatus {
    fn default() -> Self {
        Self::Unqualified
    }
}

impl Display for EmojiStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let status = match self {
            Self::Component => "component",
            Self::FullyQualified => "fully-qualified",
            Self::MinimallyQualified => "minimally-qualified",
            Self::Unqualified => "unqualified",
            Self::NonFullyQualified => "non-fully-qualified",
            Self::Keyboard => "keyboard",
        };
        f.write_str(status)
    }
}

impl FromStr for EmojiStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "component" => Ok(Self::Component),
            "fully-qualified" => Ok(Self::FullyQualified),
            "minimally-qualified" => Ok(Self::MinimallyQualified),
            "unqualified" => Ok(Self::Unqualified),
            "non-fully-qualified" => Ok(Self::NonFullyQualified),
            "keyboard" => Ok(Self::Keyboard),
            other => Err(other.to_string())
        }
    }
}
