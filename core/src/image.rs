//! Image records as held by the store.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::hash::ContentHash;
use crate::labels::Labels;
use crate::name::AcIdentifier;

/// Manifest fields of an image relevant to resolution and display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageManifest {
    /// Image name, e.g. `example.com/nginx`
    pub name: AcIdentifier,
    /// Variant labels (os, arch, version, ...)
    #[serde(default)]
    pub labels: Labels,
    /// Free-form annotations
    #[serde(default)]
    pub annotations: BTreeMap<String, String>,
}

/// An immutable, content-addressed image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    /// Content hash of the image archive
    pub hash: ContentHash,
    pub manifest: ImageManifest,
    /// Unpacked size on disk
    #[serde(default)]
    pub size_bytes: u64,
    /// Import timestamp
    pub imported_at: DateTime<Utc>,
}
