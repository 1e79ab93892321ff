//! `a3s-pod pods` command.

use a3s_pod_core::{Pod, Result};
use clap::{Arg, ArgAction};

use crate::output;
use crate::registry::{Context, Registry};
use crate::wrap::wrap_err;

pub(super) fn register(registry: &mut Registry) {
    registry.register("pods", "List pods", wrap_err(execute), Some(flags));
}

fn flags(cmd: clap::Command) -> clap::Command {
    cmd.arg(
        Arg::new("quiet")
            .short('q')
            .long("quiet")
            .action(ArgAction::SetTrue)
            .help("Only show pod UUIDs"),
    )
}

fn execute(ctx: &Context<'_>) -> Result<()> {
    let pods = ctx.store.pods()?;

    if ctx.flag("quiet") {
        for pod in &pods {
            println!("{}", pod.uuid);
        }
        return Ok(());
    }

    let mut table = output::new_table(&["UUID", "APPS", "CREATED"]);
    for pod in &pods {
        table.add_row(&[pod.uuid.to_string(), app_names(pod), output::format_ago(&pod.created_at)]);
    }
    println!("{table}");
    Ok(())
}

/// Comma-separated app names of a pod.
fn app_names(pod: &Pod) -> String {
    pod.manifest
        .apps
        .iter()
        .map(|app| app.name.as_str())
        .collect::<Vec<_>>()
        .join(",")
}
