//! `a3s-pod pod-inspect` command — display pod information as JSON.

use a3s_pod_core::{Pod, Result};

use crate::registry::{Context, Registry};
use crate::wrap::wrap_pod0;

pub(super) fn register(registry: &mut Registry) {
    registry.register(
        "pod-inspect POD",
        "Display detailed pod information as JSON",
        wrap_pod0(execute),
        None,
    );
}

fn execute(_ctx: &Context<'_>, pod: &Pod) -> Result<()> {
    super::print_json(pod)
}
