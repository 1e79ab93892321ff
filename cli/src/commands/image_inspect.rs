//! `a3s-pod image-inspect` command — display image metadata as JSON.

use a3s_pod_core::{Image, Result};

use crate::output;
use crate::registry::{Context, Registry};
use crate::wrap::wrap_image0;

pub(super) fn register(registry: &mut Registry) {
    registry.register(
        "image-inspect IMAGE",
        "Display detailed image information as JSON",
        wrap_image0(execute, false),
        None,
    );
}

fn execute(_ctx: &Context<'_>, image: &Image) -> Result<()> {
    super::print_json(&inspect(image))
}

fn inspect(image: &Image) -> serde_json::Value {
    serde_json::json!({
        "Hash": image.hash.to_string(),
        "Name": image.manifest.name.to_string(),
        "Labels": image.manifest.labels,
        "Annotations": image.manifest.annotations,
        "Size": image.size_bytes,
        "SizeHuman": output::format_bytes(image.size_bytes),
        "ImportedAt": image.imported_at.to_rfc3339(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::tests::{full_hash, make_image};

    #[test]
    fn test_inspect_fields() {
        let image = make_image(&full_hash("cd"), "redis", &[("os", "linux")]);
        let value = inspect(&image);
        assert_eq!(value["Hash"], full_hash("cd"));
        assert_eq!(value["Name"], "redis");
        assert_eq!(value["Labels"]["os"], "linux");
        assert_eq!(value["Size"], 4096);
    }
}
