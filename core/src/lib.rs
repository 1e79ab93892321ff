//! A3S Pod Core - Foundational Types and Abstractions
//!
//! Image and pod records, App Container names and labels, errors,
//! configuration and the store contract shared by the A3S Pod tools.

pub mod config;
pub mod error;
pub mod hash;
pub mod image;
pub mod labels;
pub mod name;
pub mod pod;
pub mod store;

// Re-export commonly used types
pub use config::{LogLevel, PodConfig};
pub use error::{ErrorKind, PodError, Result, ResultExt};
pub use hash::{ContentHash, FULL_HASH_LEN};
pub use image::{Image, ImageManifest};
pub use labels::Labels;
pub use name::{AcIdentifier, AcName};
pub use pod::{AppList, Pod, PodManifest, RuntimeApp, RuntimeImage};
pub use store::{StateStore, Store};

/// A3S Pod version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
