//! `a3s-pod app-env` command — show an app's environment.

use a3s_pod_core::{AcName, Pod, PodError, Result};

use crate::registry::{Context, Registry};
use crate::wrap::wrap_must_app;

pub(super) fn register(registry: &mut Registry) {
    registry.register(
        "app-env POD[:APP] [VAR...]",
        "Show the environment of an app, or the values of the named variables",
        wrap_must_app(execute),
        None,
    );
}

fn execute(_ctx: &Context<'_>, pod: &Pod, name: &AcName, vars: &[String]) -> Result<()> {
    let app = pod.manifest.apps.get(name).ok_or_else(|| PodError::NoSuchApp {
        pod: pod.uuid,
        app: name.to_string(),
    })?;
    let lines = super::select_entries(&app.environment, vars, &format!("variable in app {name}"))?;
    super::print_lines(&lines);
    Ok(())
}
