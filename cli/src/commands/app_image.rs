//! `a3s-pod app-image` command — show the image an app runs.

use a3s_pod_core::{AcName, Labels, Pod, PodError, Result, ResultExt};

use crate::output;
use crate::registry::{Context, Registry};
use crate::wrap::wrap_must_app0;

pub(super) fn register(registry: &mut Registry) {
    registry.register(
        "app-image POD[:APP]",
        "Show the image an app was created from",
        wrap_must_app0(execute),
        None,
    );
}

fn execute(ctx: &Context<'_>, pod: &Pod, name: &AcName) -> Result<()> {
    let app = pod.manifest.apps.get(name).ok_or_else(|| PodError::NoSuchApp {
        pod: pod.uuid,
        app: name.to_string(),
    })?;
    let image = ctx
        .store
        .get_local_image(Some(&app.image.id), None, &Labels::default())
        .with_context(|| format!("image of app {name}"))?;

    println!("Hash:   {}", image.hash);
    println!("Name:   {}", image.manifest.name);
    println!("Labels: {}", image.manifest.labels);
    println!("Size:   {}", output::format_bytes(image.size_bytes));
    Ok(())
}
