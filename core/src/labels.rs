//! Image labels used to select a variant of an image.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{PodError, Result};
use crate::name::AcIdentifier;

/// Label key for the operating system.
pub const LABEL_OS: &str = "os";

/// Label key for the CPU architecture.
pub const LABEL_ARCH: &str = "arch";

/// Label key for the image version.
pub const LABEL_VERSION: &str = "version";

/// Known operating systems and the architectures valid for each.
const VALID_OS_ARCH: &[(&str, &[&str])] = &[
    (
        "linux",
        &[
            "amd64", "i386", "aarch64", "aarch64_be", "armv6l", "armv7l", "armv7b", "ppc64",
            "ppc64le", "s390x",
        ],
    ),
    ("freebsd", &["amd64", "i386", "arm", "aarch64"]),
    ("darwin", &["x86_64", "i386", "aarch64"]),
];

/// An ordered set of label key/value pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Labels(BTreeMap<AcIdentifier, String>);

impl Labels {
    /// Build a label set, rejecting duplicate keys and invalid os/arch pairs.
    pub fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (AcIdentifier, String)>,
    {
        let mut map = BTreeMap::new();
        for (key, value) in pairs {
            if map.contains_key(&key) {
                return Err(PodError::InvalidReference(format!(
                    "duplicate label: {key}"
                )));
            }
            map.insert(key, value);
        }
        let labels = Self(map);
        labels.validate()?;
        Ok(labels)
    }

    /// Check the os/arch labels against the known platforms.
    pub fn validate(&self) -> Result<()> {
        let Some(os) = self.get(LABEL_OS) else {
            return Ok(());
        };
        let archs = VALID_OS_ARCH
            .iter()
            .find(|(known, _)| *known == os)
            .map(|(_, archs)| *archs)
            .ok_or_else(|| PodError::InvalidReference(format!("bad os {os:?}")))?;

        match self.get(LABEL_ARCH) {
            Some(arch) if !archs.contains(&arch) => Err(PodError::InvalidReference(format!(
                "bad arch {arch:?} for os {os:?} (valid: {})",
                archs.join(", ")
            ))),
            _ => Ok(()),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k.as_str() == key)
            .map(|(_, v)| v.as_str())
    }

    /// True when every label in `requested` is present here with the same value.
    pub fn satisfies(&self, requested: &Labels) -> bool {
        requested
            .iter()
            .all(|(key, value)| self.0.get(key).is_some_and(|v| v == value))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AcIdentifier, &String)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for Labels {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let pairs: Vec<String> = self.iter().map(|(k, v)| format!("{k}={v}")).collect();
        f.write_str(&pairs.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(k: &str, v: &str) -> (AcIdentifier, String) {
        (k.parse().unwrap(), v.to_string())
    }

    #[test]
    fn test_from_pairs() {
        let labels = Labels::from_pairs([pair("os", "linux"), pair("arch", "amd64")]).unwrap();
        assert_eq!(labels.get("os"), Some("linux"));
        assert_eq!(labels.get("arch"), Some("amd64"));
        assert_eq!(labels.len(), 2);
    }

    #[test]
    fn test_duplicate_rejected() {
        let err = Labels::from_pairs([pair("os", "linux"), pair("os", "freebsd")]).unwrap_err();
        assert!(err.to_string().contains("duplicate label"));
    }

    #[test]
    fn test_bad_os_rejected() {
        assert!(Labels::from_pairs([pair("os", "plan9")]).is_err());
    }

    #[test]
    fn test_bad_arch_for_os_rejected() {
        let err = Labels::from_pairs([pair("os", "freebsd"), pair("arch", "s390x")]).unwrap_err();
        assert!(err.to_string().contains("bad arch"));
    }

    #[test]
    fn test_arch_without_os_accepted() {
        assert!(Labels::from_pairs([pair("arch", "anything")]).is_ok());
    }

    #[test]
    fn test_satisfies() {
        let image = Labels::from_pairs([
            pair("os", "linux"),
            pair("arch", "amd64"),
            pair("version", "1.0"),
        ])
        .unwrap();
        let wanted = Labels::from_pairs([pair("os", "linux"), pair("arch", "amd64")]).unwrap();
        assert!(image.satisfies(&wanted));
        assert!(image.satisfies(&Labels::default()));
        assert!(!wanted.satisfies(&image));
    }

    #[test]
    fn test_display() {
        let labels = Labels::from_pairs([pair("os", "linux"), pair("arch", "amd64")]).unwrap();
        assert_eq!(labels.to_string(), "arch=amd64,os=linux");
    }
}
