//! Pod records and their app manifests.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::hash::ContentHash;
use crate::name::{AcIdentifier, AcName};

/// Image an app was created from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuntimeImage {
    #[serde(default)]
    pub name: Option<AcIdentifier>,
    pub id: ContentHash,
}

/// One app within a pod manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuntimeApp {
    pub name: AcName,
    pub image: RuntimeImage,
    #[serde(default)]
    pub environment: BTreeMap<String, String>,
    #[serde(default)]
    pub annotations: BTreeMap<String, String>,
}

/// Ordered list of apps in a pod.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppList(Vec<RuntimeApp>);

impl AppList {
    pub fn new(apps: Vec<RuntimeApp>) -> Self {
        Self(apps)
    }

    /// Find the app with this name. A name listed more than once does
    /// not identify a single app and yields `None`.
    pub fn get(&self, name: &AcName) -> Option<&RuntimeApp> {
        let mut matches = self.0.iter().filter(|app| &app.name == name);
        match (matches.next(), matches.next()) {
            (Some(app), None) => Some(app),
            _ => None,
        }
    }

    /// The app of a single-app pod.
    pub fn only(&self) -> Option<&RuntimeApp> {
        match self.0.as_slice() {
            [app] => Some(app),
            _ => None,
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RuntimeApp> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a AppList {
    type Item = &'a RuntimeApp;
    type IntoIter = std::slice::Iter<'a, RuntimeApp>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PodManifest {
    pub apps: AppList,
    #[serde(default)]
    pub annotations: BTreeMap<String, String>,
}

/// A group of one or more apps, identified by UUID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pod {
    pub uuid: Uuid,
    pub manifest: PodManifest,
    pub created_at: DateTime<Utc>,
}
