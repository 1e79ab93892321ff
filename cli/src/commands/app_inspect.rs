//! `a3s-pod app-inspect` command — display app information as JSON.

use a3s_pod_core::{AcName, Pod, PodError, Result, RuntimeApp};

use crate::registry::{Context, Registry};
use crate::wrap::wrap_app0;

pub(super) fn register(registry: &mut Registry) {
    registry.register(
        "app-inspect POD[:APP]",
        "Display app information as JSON; without an app, show every app",
        wrap_app0(execute),
        None,
    );
}

fn execute(_ctx: &Context<'_>, pod: &Pod, app: Option<&AcName>) -> Result<()> {
    match app {
        Some(name) => super::print_json(find_app(pod, name)?),
        None => super::print_json(&pod.manifest.apps),
    }
}

fn find_app<'a>(pod: &'a Pod, name: &AcName) -> Result<&'a RuntimeApp> {
    pod.manifest.apps.get(name).ok_or_else(|| PodError::NoSuchApp {
        pod: pod.uuid,
        app: name.to_string(),
    })
}
