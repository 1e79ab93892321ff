//! `a3s-pod help` command.

use a3s_pod_core::{PodError, Result};

use crate::registry::{Context, Registry};

pub(super) fn register(registry: &mut Registry) {
    registry.register(
        "help [COMMAND]",
        "Show available commands, or help for one command",
        Box::new(|ctx: &Context<'_>, args: &[String]| execute(ctx, args)),
        None,
    );
}

fn execute(ctx: &Context<'_>, args: &[String]) -> Result<()> {
    let mut stderr = std::io::stderr().lock();
    match args {
        [] => ctx.registry.write_overview(&mut stderr)?,
        [name] => ctx
            .registry
            .get(name)
            .ok_or_else(|| PodError::UnknownCommand(name.clone()))?
            .help(ctx.app_name, &mut stderr)?,
        _ => return Err(PodError::Usage),
    }
    Ok(())
}
