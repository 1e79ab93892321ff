//! `a3s-pod version` command.

use crate::registry::Registry;
use crate::wrap::wrap;

pub(super) fn register(registry: &mut Registry) {
    registry.register(
        "version",
        "Show version information",
        wrap(|ctx| println!("{} {}", ctx.app_name, a3s_pod_core::VERSION)),
        None,
    );
}
