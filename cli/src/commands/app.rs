//! `a3s-pod app` command — show app annotations.

use a3s_pod_core::{AcName, Pod, PodError, Result};

use crate::registry::{Context, Registry};
use crate::wrap::wrap_app;

pub(super) fn register(registry: &mut Registry) {
    registry.register(
        "app POD[:APP] [ANNOTATION...]",
        "Show app annotations; without an app, show those of every app",
        wrap_app(execute),
        None,
    );
}

fn execute(_ctx: &Context<'_>, pod: &Pod, app: Option<&AcName>, keys: &[String]) -> Result<()> {
    super::print_lines(&annotation_lines(pod, app, keys)?);
    Ok(())
}

fn annotation_lines(pod: &Pod, app: Option<&AcName>, keys: &[String]) -> Result<Vec<String>> {
    let apps: Vec<_> = match app {
        Some(name) => {
            let app = pod.manifest.apps.get(name).ok_or_else(|| PodError::NoSuchApp {
                pod: pod.uuid,
                app: name.to_string(),
            })?;
            vec![app]
        }
        None => pod.manifest.apps.iter().collect(),
    };

    let prefixed = app.is_none();
    let mut lines = Vec::new();
    for app in apps {
        let what = format!("annotation on app {}", app.name);
        for line in super::select_entries(&app.annotations, keys, &what)? {
            if prefixed {
                lines.push(format!("{}: {}", app.name, line));
            } else {
                lines.push(line);
            }
        }
    }
    Ok(lines)
}
