//! Store contract consumed by command handlers, and a JSON-backed
//! read-only implementation.
//!
//! The state root holds `images.json` (a list of [`Image`]) and
//! `pods.json` (a list of [`Pod`]). File order is enumeration order.

use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::error::{PodError, Result};
use crate::hash::ContentHash;
use crate::image::Image;
use crate::labels::Labels;
use crate::name::AcIdentifier;
use crate::pod::Pod;

/// Images file name inside the state root.
pub const IMAGES_FILE: &str = "images.json";

/// Pods file name inside the state root.
pub const PODS_FILE: &str = "pods.json";

/// Read access to images and pods.
///
/// Lookups by hash ignore `name` and `labels`. Lookups by name match
/// images whose labels satisfy every requested label.
pub trait Store {
    /// All known images, in a stable enumeration order.
    fn images(&self) -> Result<Vec<Image>>;

    /// Find an image, possibly resolving it from remote sources.
    fn get_image(
        &self,
        hash: Option<&ContentHash>,
        name: Option<&AcIdentifier>,
        labels: &Labels,
    ) -> Result<Image>;

    /// Find an image in local storage only.
    fn get_local_image(
        &self,
        hash: Option<&ContentHash>,
        name: Option<&AcIdentifier>,
        labels: &Labels,
    ) -> Result<Image>;

    fn get_pod(&self, id: Uuid) -> Result<Pod>;

    /// All known pods.
    fn pods(&self) -> Result<Vec<Pod>>;

    /// Directory the records were read from, if any.
    fn location(&self) -> Option<&Path> {
        None
    }
}

/// Store backed by JSON files under a state root.
pub struct StateStore {
    root: PathBuf,
    images: Vec<Image>,
    pods: Vec<Pod>,
}

impl StateStore {
    /// Load state from `root`. Missing files are treated as empty.
    pub fn load(root: &Path) -> Result<Self> {
        let images = read_list(&root.join(IMAGES_FILE))?;
        let pods = read_list(&root.join(PODS_FILE))?;
        tracing::debug!(
            root = %root.display(),
            images = images.len(),
            pods = pods.len(),
            "Loaded state"
        );
        Ok(Self {
            root: root.to_path_buf(),
            images,
            pods,
        })
    }

    /// Build an in-memory store from records.
    pub fn from_parts(images: Vec<Image>, pods: Vec<Pod>) -> Self {
        Self {
            root: PathBuf::new(),
            images,
            pods,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn find_image(
        &self,
        hash: Option<&ContentHash>,
        name: Option<&AcIdentifier>,
        labels: &Labels,
    ) -> Result<Image> {
        let found = match (hash, name) {
            (Some(hash), _) => self.images.iter().find(|img| &img.hash == hash),
            (None, Some(name)) => self
                .images
                .iter()
                .find(|img| &img.manifest.name == name && img.manifest.labels.satisfies(labels)),
            (None, None) => None,
        };

        found.cloned().ok_or_else(|| match (hash, name) {
            (Some(hash), _) => PodError::NotFound(format!("image {hash}")),
            (None, Some(name)) if labels.is_empty() => PodError::NotFound(format!("image {name}")),
            (None, Some(name)) => PodError::NotFound(format!("image {name},{labels}")),
            (None, None) => PodError::NotFound("image".to_string()),
        })
    }
}

impl Store for StateStore {
    fn images(&self) -> Result<Vec<Image>> {
        Ok(self.images.clone())
    }

    fn get_image(
        &self,
        hash: Option<&ContentHash>,
        name: Option<&AcIdentifier>,
        labels: &Labels,
    ) -> Result<Image> {
        tracing::debug!("No remote image source configured, using local images");
        self.find_image(hash, name, labels)
    }

    fn get_local_image(
        &self,
        hash: Option<&ContentHash>,
        name: Option<&AcIdentifier>,
        labels: &Labels,
    ) -> Result<Image> {
        self.find_image(hash, name, labels)
    }

    fn get_pod(&self, id: Uuid) -> Result<Pod> {
        self.pods
            .iter()
            .find(|pod| pod.uuid == id)
            .cloned()
            .ok_or_else(|| PodError::NotFound(format!("pod {id}")))
    }

    fn pods(&self) -> Result<Vec<Pod>> {
        Ok(self.pods.clone())
    }

    fn location(&self) -> Option<&Path> {
        if self.root.as_os_str().is_empty() {
            None
        } else {
            Some(&self.root)
        }
    }
}

fn read_list<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let data = std::fs::read_to_string(path)?;
    serde_json::from_str(&data).map_err(|e| {
        PodError::SerializationError(format!("{}: {}", path.display(), e))
    })
}
