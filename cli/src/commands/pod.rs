//! `a3s-pod pod` command — show pod annotations.

use a3s_pod_core::{Pod, Result};

use crate::registry::{Context, Registry};
use crate::wrap::wrap_pod;

pub(super) fn register(registry: &mut Registry) {
    registry.register(
        "pod POD [ANNOTATION...]",
        "Show pod annotations, or the values of the named annotations",
        wrap_pod(execute),
        None,
    );
}

fn execute(_ctx: &Context<'_>, pod: &Pod, keys: &[String]) -> Result<()> {
    let what = format!("annotation on pod {}", pod.uuid);
    let lines = super::select_entries(&pod.manifest.annotations, keys, &what)?;
    super::print_lines(&lines);
    Ok(())
}
