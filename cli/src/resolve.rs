//! Resolution of user-supplied references to images, pods and apps.
//!
//! Image references are either a content hash (`sha512-<hex>`, full or a
//! prefix) or an app discovery string `name[:version][,label=value]...`.
//! Pod references are UUIDs, optionally followed by `:app`.

use a3s_pod_core::labels::{LABEL_ARCH, LABEL_OS, LABEL_VERSION};
use a3s_pod_core::{
    AcIdentifier, AcName, ContentHash, Image, Labels, Pod, PodError, Result, Store, FULL_HASH_LEN,
};
use uuid::Uuid;

/// Host operating system, as used in the `os` label.
pub fn host_os() -> &'static str {
    match std::env::consts::OS {
        "macos" => "darwin",
        os => os,
    }
}

/// Host CPU architecture, as used in the `arch` label.
pub fn host_arch() -> &'static str {
    match (std::env::consts::OS, std::env::consts::ARCH) {
        ("macos", arch) => arch,
        (_, "x86_64") => "amd64",
        (_, "x86") => "i386",
        ("linux", "arm") => "armv7l",
        ("linux", "powerpc64") if cfg!(target_endian = "little") => "ppc64le",
        ("linux", "powerpc64") => "ppc64",
        (_, arch) => arch,
    }
}

/// Parse an app discovery string into an image name and labels.
///
/// Missing or empty `os` and `arch` labels default to the host platform.
pub fn parse_image_name(text: &str) -> Result<(AcIdentifier, Labels)> {
    let (head, label_text) = match text.split_once(',') {
        Some((head, rest)) => (head, Some(rest)),
        None => (text, None),
    };

    if text.matches(':').count() > 1 {
        return Err(PodError::InvalidReference(format!(
            "there can be only one colon: {text:?}"
        )));
    }
    if label_text.is_some_and(|labels| labels.contains(':')) {
        return Err(PodError::InvalidReference(format!(
            "colon should be before the first comma: {text:?}"
        )));
    }

    let (name, version) = match head.split_once(':') {
        Some((name, version)) => (name, Some(version)),
        None => (head, None),
    };
    let name: AcIdentifier = name.parse()?;

    let mut pairs: Vec<(AcIdentifier, String)> = Vec::new();
    if let Some(version) = version {
        pairs.push((LABEL_VERSION.parse()?, version.to_string()));
    }
    for item in label_text.into_iter().flat_map(|labels| labels.split(',')) {
        let (key, value) = item.split_once('=').ok_or_else(|| {
            PodError::InvalidReference(format!("label {item:?} is not key=value"))
        })?;
        if key == "name" {
            return Err(PodError::InvalidReference(format!(
                "image name given twice in {text:?}"
            )));
        }
        pairs.push((key.parse()?, value.to_string()));
    }

    for (key, default) in [(LABEL_OS, host_os()), (LABEL_ARCH, host_arch())] {
        match pairs.iter_mut().find(|(k, _)| k.as_str() == key) {
            Some((_, value)) if value.is_empty() => *value = default.to_string(),
            Some(_) => {}
            None => pairs.push((key.parse()?, default.to_string())),
        }
    }

    let labels = Labels::from_pairs(pairs)?;
    Ok((name, labels))
}

/// Resolve an image reference.
///
/// A hash shorter than the full length matches the first image in store
/// enumeration order whose hash starts with it, ignoring case.
pub fn get_image(store: &dyn Store, text: &str, local_only: bool) -> Result<Image> {
    if let Ok(hash) = text.parse::<ContentHash>() {
        if text.len() < FULL_HASH_LEN {
            return find_by_prefix(store, text);
        }
        return store.get_image(Some(&hash), None, &Labels::default());
    }

    let (name, labels) = parse_image_name(text)?;
    if local_only {
        store.get_local_image(None, Some(&name), &labels)
    } else {
        store.get_image(None, Some(&name), &labels)
    }
}

fn find_by_prefix(store: &dyn Store, text: &str) -> Result<Image> {
    let prefix = text.to_lowercase();
    let mut matches = store
        .images()?
        .into_iter()
        .filter(|image| image.hash.to_string().starts_with(&prefix));

    let image = matches
        .next()
        .ok_or_else(|| PodError::NotFound(format!("image {text}")))?;

    // TODO: report ambiguous prefixes instead of taking the first match.
    let others = matches.count();
    if others > 0 {
        tracing::debug!(
            prefix = %prefix,
            matches = others + 1,
            chosen = %image.hash,
            "Hash prefix matches several images, using the first"
        );
    }
    Ok(image)
}

/// Resolve a pod reference. Only UUIDs are accepted.
pub fn get_pod(store: &dyn Store, text: &str) -> Result<Pod> {
    match Uuid::parse_str(text) {
        Ok(id) => store.get_pod(id),
        // Pod names are not resolvable yet.
        Err(_) => Err(PodError::Usage),
    }
}

/// Split `pod[:app]` on the first colon.
pub fn split_app_ref(text: &str) -> (&str, Option<&str>) {
    match text.split_once(':') {
        Some((pod, app)) => (pod, Some(app)),
        None => (text, None),
    }
}

/// Resolve `pod[:app]` to a pod and the selected app.
///
/// Without an app name, a single-app pod selects its app and any other
/// pod selects none.
pub fn get_app(store: &dyn Store, text: &str) -> Result<(Pod, Option<AcName>)> {
    let (pod_ref, app_ref) = split_app_ref(text);
    let pod = get_pod(store, pod_ref)?;

    let app = match app_ref {
        None => pod.manifest.apps.only().map(|app| app.name.clone()),
        Some(app_ref) => {
            let name: AcName = app_ref.parse()?;
            if pod.manifest.apps.get(&name).is_none() {
                return Err(PodError::NoSuchApp {
                    pod: pod.uuid,
                    app: name.to_string(),
                });
            }
            Some(name)
        }
    };
    Ok((pod, app))
}
