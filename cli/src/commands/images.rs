//! `a3s-pod images` command.

use a3s_pod_core::labels::LABEL_OS;
use a3s_pod_core::{Image, Result};
use clap::{Arg, ArgAction};

use crate::output;
use crate::registry::{Context, Registry};
use crate::wrap::wrap_err;

pub(super) fn register(registry: &mut Registry) {
    registry.register("images", "List images", wrap_err(execute), Some(flags));
}

fn flags(cmd: clap::Command) -> clap::Command {
    cmd.arg(
        Arg::new("quiet")
            .short('q')
            .long("quiet")
            .action(ArgAction::SetTrue)
            .help("Only show image hashes"),
    )
    .arg(
        Arg::new("os")
            .long("os")
            .help("Only show images for this operating system"),
    )
}

fn execute(ctx: &Context<'_>) -> Result<()> {
    let images: Vec<Image> = ctx
        .store
        .images()?
        .into_iter()
        .filter(|image| matches_os(image, ctx.value("os")))
        .collect();

    if ctx.flag("quiet") {
        for image in &images {
            println!("{}", image.hash);
        }
        return Ok(());
    }

    let mut table = output::new_table(&["HASH", "NAME", "LABELS", "SIZE", "IMPORTED"]);
    for row in images.iter().map(ImageRow::from_image) {
        table.add_row(&[&row.hash, &row.name, &row.labels, &row.size, &row.imported]);
    }
    println!("{table}");
    Ok(())
}

fn matches_os(image: &Image, os: Option<&str>) -> bool {
    os.map_or(true, |os| image.manifest.labels.get(LABEL_OS) == Some(os))
}

/// Pre-computed display fields for a single image row.
struct ImageRow {
    hash: String,
    name: String,
    labels: String,
    size: String,
    imported: String,
}

impl ImageRow {
    fn from_image(image: &Image) -> Self {
        Self {
            hash: output::short_hash(&image.hash),
            name: image.manifest.name.to_string(),
            labels: image.manifest.labels.to_string(),
            size: output::format_bytes(image.size_bytes),
            imported: output::format_ago(&image.imported_at),
        }
    }
}
