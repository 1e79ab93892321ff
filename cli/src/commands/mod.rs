//! Subcommand definitions.
//!
//! Each module registers one command, built from the combinators in
//! [`crate::wrap`].

mod app;
mod app_env;
mod app_image;
mod app_inspect;
mod help;
mod image;
mod image_inspect;
mod images;
mod info;
mod pod;
mod pod_inspect;
mod pods;
mod version;

use std::collections::BTreeMap;

use a3s_pod_core::{PodError, Result};
use serde::Serialize;

use crate::registry::Registry;

/// Binary name used in usage lines.
pub const APP_NAME: &str = "a3s-pod";

/// Build the registry with every command.
pub fn registry() -> Registry {
    let mut registry = Registry::new(APP_NAME);
    help::register(&mut registry);
    version::register(&mut registry);
    info::register(&mut registry);
    images::register(&mut registry);
    image::register(&mut registry);
    image_inspect::register(&mut registry);
    pods::register(&mut registry);
    pod::register(&mut registry);
    pod_inspect::register(&mut registry);
    app::register(&mut registry);
    app_inspect::register(&mut registry);
    app_env::register(&mut registry);
    app_image::register(&mut registry);
    registry
}

/// Lines for a key/value map: every `key=value` when `keys` is empty,
/// otherwise the value of each requested key.
pub(crate) fn select_entries(
    entries: &BTreeMap<String, String>,
    keys: &[String],
    what: &str,
) -> Result<Vec<String>> {
    if keys.is_empty() {
        return Ok(entries.iter().map(|(k, v)| format!("{k}={v}")).collect());
    }
    keys.iter()
        .map(|key| {
            entries
                .get(key)
                .cloned()
                .ok_or_else(|| PodError::NotFound(format!("{what} {key}")))
        })
        .collect()
}

pub(crate) fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries() -> BTreeMap<String, String> {
        BTreeMap::from([
            ("owner".to_string(), "ops".to_string()),
            ("tier".to_string(), "web".to_string()),
        ])
    }

    #[test]
    fn test_select_all_entries() {
        let lines = select_entries(&entries(), &[], "annotation").unwrap();
        assert_eq!(lines, vec!["owner=ops", "tier=web"]);
    }

    #[test]
    fn test_select_named_entries() {
        let lines = select_entries(&entries(), &["tier".to_string()], "annotation").unwrap();
        assert_eq!(lines, vec!["web"]);
    }

    #[test]
    fn test_select_missing_entry() {
        let err = select_entries(&entries(), &["zone".to_string()], "annotation").unwrap_err();
        assert_eq!(err.to_string(), "Not found: annotation zone");
    }

    #[test]
    fn test_registry_has_every_command() {
        let registry = registry();
        let names: Vec<&str> = registry.commands().map(|c| c.name()).collect();
        assert_eq!(
            names,
            vec![
                "app",
                "app-env",
                "app-image",
                "app-inspect",
                "help",
                "image",
                "image-inspect",
                "images",
                "info",
                "pod",
                "pod-inspect",
                "pods",
                "version",
            ]
        );
        assert!(registry.commands().all(|c| !c.synopsis.is_empty()));
    }
}
