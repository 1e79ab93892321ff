//! `a3s-pod image` command — show labels of a local image.

use std::collections::BTreeMap;

use a3s_pod_core::{Image, Result};

use crate::registry::{Context, Registry};
use crate::wrap::wrap_image;

pub(super) fn register(registry: &mut Registry) {
    registry.register(
        "image IMAGE [LABEL...]",
        "Show labels of a local image, or the values of the named labels",
        wrap_image(execute, true),
        None,
    );
}

fn execute(_ctx: &Context<'_>, image: &Image, labels: &[String]) -> Result<()> {
    let entries: BTreeMap<String, String> = image
        .manifest
        .labels
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect();
    let lines = super::select_entries(&entries, labels, &format!("label on image {}", image.hash))?;
    super::print_lines(&lines);
    Ok(())
}
