//! `a3s-pod info` command — show host platform and store summary.

use a3s_pod_core::{Result, Store};

use crate::registry::{Context, Registry};
use crate::resolve::{host_arch, host_os};
use crate::wrap::wrap_err;

pub(super) fn register(registry: &mut Registry) {
    registry.register(
        "info",
        "Show host platform and store summary",
        wrap_err(execute),
        None,
    );
}

fn execute(ctx: &Context<'_>) -> Result<()> {
    super::print_lines(&summary(ctx.store)?);
    Ok(())
}

fn summary(store: &dyn Store) -> Result<Vec<String>> {
    let root = store
        .location()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "(in memory)".to_string());

    Ok(vec![
        format!("Version:  {}", a3s_pod_core::VERSION),
        format!("Root:     {root}"),
        format!("Platform: os={},arch={}", host_os(), host_arch()),
        format!("Images:   {}", store.images()?.len()),
        format!("Pods:     {}", store.pods()?.len()),
    ])
}
