//! App Container identifiers and names.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PodError;

/// Lower-case alphanumeric segments joined by one of `separators`.
fn is_valid(s: &str, separators: &[char]) -> bool {
    !s.is_empty()
        && s.split(|c| separators.contains(&c)).all(|segment| {
            !segment.is_empty()
                && segment
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        })
}

macro_rules! string_name {
    ($(#[$meta:meta])* $ty:ident, $what:literal, $separators:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $ty(String);

        impl $ty {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl FromStr for $ty {
            type Err = PodError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                if is_valid(s, $separators) {
                    Ok(Self(s.to_string()))
                } else {
                    Err(PodError::InvalidReference(format!(
                        concat!("invalid ", $what, ": {:?}"),
                        s
                    )))
                }
            }
        }

        impl TryFrom<String> for $ty {
            type Error = PodError;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                s.parse()
            }
        }

        impl From<$ty> for String {
            fn from(value: $ty) -> Self {
                value.0
            }
        }

        impl AsRef<str> for $ty {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_name!(
    /// Hierarchical identifier used for image names and label keys,
    /// e.g. `example.com/web-server`.
    AcIdentifier,
    "identifier",
    &['-', '.', '_', '~', '/']
);

string_name!(
    /// Name of an app within a pod, e.g. `nginx-proxy`.
    AcName,
    "app name",
    &['-']
);
