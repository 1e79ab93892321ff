//! Argument-binding combinators.
//!
//! Each function adapts a handler over resolved entities into a generic
//! [`Handler`] over positional strings. The `*0` variants additionally
//! require that nothing follows the entity reference.
//!
//! Wrong argument counts and unresolvable pod names yield the usage
//! sentinel. Resolution and store failures carry context naming the
//! reference. Errors from the wrapped handler pass through unchanged.

use a3s_pod_core::{AcName, Image, Pod, PodError, Result, ResultExt};

use crate::registry::{Context, Handler};
use crate::resolve;

/// Ignore arguments and call `f`.
pub fn wrap<F>(f: F) -> Handler
where
    F: Fn(&Context<'_>) + 'static,
{
    Box::new(move |ctx: &Context<'_>, _args: &[String]| {
        f(ctx);
        Ok(())
    })
}

/// Ignore arguments and call the fallible `f`.
pub fn wrap_err<F>(f: F) -> Handler
where
    F: Fn(&Context<'_>) -> Result<()> + 'static,
{
    Box::new(move |ctx: &Context<'_>, _args: &[String]| f(ctx))
}

/// `IMAGE [ARGS...]`
pub fn wrap_image<F>(f: F, local_only: bool) -> Handler
where
    F: Fn(&Context<'_>, &Image, &[String]) -> Result<()> + 'static,
{
    Box::new(move |ctx: &Context<'_>, args: &[String]| {
        let (reference, rest) = args.split_first().ok_or(PodError::Usage)?;
        let image = resolve::get_image(ctx.store, reference, local_only)
            .with_context(|| format!("resolving image {reference:?}"))?;
        f(ctx, &image, rest)
    })
}

/// `IMAGE`
pub fn wrap_image0<F>(f: F, local_only: bool) -> Handler
where
    F: Fn(&Context<'_>, &Image) -> Result<()> + 'static,
{
    exactly_one(wrap_image(move |ctx, image, _rest| f(ctx, image), local_only))
}

/// `POD [ARGS...]`
pub fn wrap_pod<F>(f: F) -> Handler
where
    F: Fn(&Context<'_>, &Pod, &[String]) -> Result<()> + 'static,
{
    Box::new(move |ctx: &Context<'_>, args: &[String]| {
        let (reference, rest) = args.split_first().ok_or(PodError::Usage)?;
        let pod = resolve::get_pod(ctx.store, reference)
            .with_context(|| format!("resolving pod {reference:?}"))?;
        f(ctx, &pod, rest)
    })
}

/// `POD`
pub fn wrap_pod0<F>(f: F) -> Handler
where
    F: Fn(&Context<'_>, &Pod) -> Result<()> + 'static,
{
    exactly_one(wrap_pod(move |ctx, pod, _rest| f(ctx, pod)))
}

/// `POD[:APP] [ARGS...]`
///
/// Without `:APP`, a single-app pod selects its app; otherwise `None`
/// is passed and the handler decides.
pub fn wrap_app<F>(f: F) -> Handler
where
    F: Fn(&Context<'_>, &Pod, Option<&AcName>, &[String]) -> Result<()> + 'static,
{
    Box::new(move |ctx: &Context<'_>, args: &[String]| {
        let (reference, rest) = args.split_first().ok_or(PodError::Usage)?;
        let (pod, app) = resolve::get_app(ctx.store, reference)
            .with_context(|| format!("resolving app {reference:?}"))?;
        f(ctx, &pod, app.as_ref(), rest)
    })
}

/// `POD[:APP]`
pub fn wrap_app0<F>(f: F) -> Handler
where
    F: Fn(&Context<'_>, &Pod, Option<&AcName>) -> Result<()> + 'static,
{
    exactly_one(wrap_app(move |ctx, pod, app, _rest| f(ctx, pod, app)))
}

/// `POD[:APP] [ARGS...]`, where the app must be determined.
pub fn wrap_must_app<F>(f: F) -> Handler
where
    F: Fn(&Context<'_>, &Pod, &AcName, &[String]) -> Result<()> + 'static,
{
    wrap_app(move |ctx, pod, app, rest| match app {
        Some(app) => f(ctx, pod, app, rest),
        None => Err(PodError::AmbiguousApp(pod.uuid)),
    })
}

/// `POD[:APP]`, where the app must be determined.
pub fn wrap_must_app0<F>(f: F) -> Handler
where
    F: Fn(&Context<'_>, &Pod, &AcName) -> Result<()> + 'static,
{
    exactly_one(wrap_must_app(move |ctx, pod, app, _rest| f(ctx, pod, app)))
}

/// Reject anything but a single positional before resolving it.
fn exactly_one(inner: Handler) -> Handler {
    Box::new(move |ctx: &Context<'_>, args: &[String]| {
        if args.len() != 1 {
            return Err(PodError::Usage);
        }
        inner(ctx, args)
    })
}
