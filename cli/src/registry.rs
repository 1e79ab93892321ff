//! Command registration and dispatch.
//!
//! A [`Registry`] is built once at startup and then only read. Each
//! [`Command`] owns its usage text, synopsis, optional flag schema and a
//! [`Handler`] obtained from the combinators in [`crate::wrap`].

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;
use std::io::Write;

use a3s_pod_core::{ErrorKind, PodError, Result, Store};
use clap::{Arg, ArgAction, ArgMatches};

/// Argument id collecting the positionals left after flag parsing.
const POSITIONAL: &str = "args";

/// Generic command handler over positional arguments.
pub type Handler = Box<dyn Fn(&Context<'_>, &[String]) -> Result<()>>;

/// Adds flag definitions to a command's schema.
pub type FlagConfigurator = fn(clap::Command) -> clap::Command;

/// Everything a handler can reach while it runs.
pub struct Context<'a> {
    pub app_name: &'a str,
    pub registry: &'a Registry,
    pub store: &'a dyn Store,
    flags: ArgMatches,
}

impl<'a> Context<'a> {
    /// Context with no parsed flags.
    pub fn new(registry: &'a Registry, store: &'a dyn Store) -> Self {
        Self {
            app_name: registry.app_name(),
            registry,
            store,
            flags: ArgMatches::default(),
        }
    }

    /// Value of a boolean flag; false when unset or not defined.
    pub fn flag(&self, id: &str) -> bool {
        matches!(self.flags.try_get_one::<bool>(id), Ok(Some(true)))
    }

    /// Value of a string option.
    pub fn value(&self, id: &str) -> Option<&str> {
        self.flags
            .try_get_one::<String>(id)
            .ok()
            .flatten()
            .map(String::as_str)
    }
}

/// A named subcommand.
pub struct Command {
    pub usage: String,
    pub synopsis: String,
    handler: Handler,
    flags: Option<clap::Command>,
}

impl Command {
    /// Leading token of the usage text.
    pub fn name(&self) -> &str {
        command_name(&self.usage)
    }

    pub fn has_flags(&self) -> bool {
        self.flags.is_some()
    }

    /// Write synopsis, usage line and flag descriptions.
    pub fn help(&self, app_name: &str, out: &mut dyn Write) -> std::io::Result<()> {
        writeln!(out, "{}\n\nUsage: {} {}", self.synopsis, app_name, self.usage)?;
        let Some(schema) = &self.flags else {
            return Ok(());
        };

        writeln!(out, "Options:")?;
        for arg in schema.get_arguments() {
            if arg.is_positional() || arg.get_id().as_str() == "help" {
                continue;
            }
            writeln!(out, "{}", flag_line(arg))?;

            let mut description = arg.get_help().map(|h| h.to_string()).unwrap_or_default();
            let has_default = !matches!(
                arg.get_action(),
                ArgAction::SetTrue | ArgAction::SetFalse | ArgAction::Count
            );
            let defaults: Vec<String> = arg
                .get_default_values()
                .iter()
                .map(|v| v.to_string_lossy().into_owned())
                .collect();
            if has_default && !defaults.is_empty() {
                description.push_str(&format!(" (default {:?})", defaults.join(",")));
            }
            writeln!(out, "    \t{description}")?;
        }
        Ok(())
    }

    /// Parse flags, then call the handler with the remaining positionals.
    ///
    /// A malformed flag set terminates the process. A usage sentinel from
    /// the handler is rewritten against this command's usage text.
    pub fn run(&self, registry: &Registry, store: &dyn Store, args: &[String]) -> Result<()> {
        let (flags, positional) = match &self.flags {
            Some(schema) => {
                let argv = std::iter::once(self.name().to_string()).chain(args.iter().cloned());
                let matches = schema
                    .clone()
                    .try_get_matches_from(argv)
                    .unwrap_or_else(|e| e.exit());
                let positional: Vec<String> = matches
                    .get_many::<String>(POSITIONAL)
                    .map(|values| values.cloned().collect())
                    .unwrap_or_default();
                (matches, positional)
            }
            None => (ArgMatches::default(), args.to_vec()),
        };

        tracing::debug!(command = self.name(), args = ?positional, "Running command");

        let ctx = Context {
            app_name: registry.app_name(),
            registry,
            store,
            flags,
        };
        match (self.handler)(&ctx, &positional) {
            Err(err) if err.is_usage_sentinel() => Err(PodError::InvalidUsage {
                usage: format!("{} {}", registry.app_name(), self.usage),
            }),
            other => other,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.synopsis.is_empty() {
            write!(f, "{}", self.usage)
        } else {
            write!(f, "{} -- {}", self.usage, self.synopsis)
        }
    }
}

/// The set of commands known to the tool.
pub struct Registry {
    app_name: String,
    commands: BTreeMap<String, Command>,
}

impl Registry {
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            commands: BTreeMap::new(),
        }
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Register a command under the leading token of `usage`.
    ///
    /// A later registration under the same name replaces the earlier one.
    pub fn register(
        &mut self,
        usage: impl Into<String>,
        synopsis: impl Into<String>,
        handler: Handler,
        flags: Option<FlagConfigurator>,
    ) -> &mut Command {
        let usage = usage.into();
        let synopsis = synopsis.into();
        let name = command_name(&usage).to_string();

        let flags = flags.map(|configure| {
            let schema = clap::Command::new(name.clone())
                .about(synopsis.clone())
                .override_usage(format!("{} {}", self.app_name, usage))
                .disable_version_flag(true)
                .arg(
                    Arg::new(POSITIONAL)
                        .num_args(0..)
                        .trailing_var_arg(true)
                        .hide(true),
                );
            configure(schema)
        });

        let command = Command {
            usage,
            synopsis,
            handler,
            flags,
        };
        match self.commands.entry(name) {
            Entry::Occupied(mut entry) => {
                tracing::debug!(command = entry.key().as_str(), "Replacing registered command");
                entry.insert(command);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(command),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Command> {
        self.commands.get(name)
    }

    /// Commands sorted by name.
    pub fn commands(&self) -> impl Iterator<Item = &Command> {
        self.commands.values()
    }

    /// Run the named command against `store`.
    pub fn run(&self, name: &str, args: &[String], store: &dyn Store) -> Result<()> {
        let command = self
            .get(name)
            .ok_or_else(|| PodError::UnknownCommand(name.to_string()))?;
        command.run(self, store, args)
    }

    /// Write the tool usage line and the command list.
    pub fn write_overview(&self, out: &mut dyn Write) -> std::io::Result<()> {
        writeln!(out, "Usage: {} COMMAND [ARGS...]\n\nCommands:", self.app_name)?;
        for command in self.commands() {
            writeln!(out, "  {command}")?;
        }
        Ok(())
    }
}

/// Exit status for a command result: 2 for usage errors, 1 otherwise.
pub fn exit_code(err: &PodError) -> i32 {
    match err.kind() {
        ErrorKind::Usage => 2,
        _ => 1,
    }
}

fn command_name(usage: &str) -> &str {
    usage
        .find(char::is_whitespace)
        .map_or(usage, |end| &usage[..end])
}

fn flag_line(arg: &Arg) -> String {
    let mut line = String::from("  ");
    if let Some(short) = arg.get_short() {
        line.push('-');
        line.push(short);
        if arg.get_long().is_some() {
            line.push_str(", ");
        }
    }
    if let Some(long) = arg.get_long() {
        line.push_str("--");
        line.push_str(long);
    }
    if arg.get_action().takes_values() {
        line.push_str(&format!(" <{}>", arg.get_id().as_str().to_uppercase()));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use a3s_pod_core::StateStore;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn ok_handler() -> Handler {
        Box::new(|_ctx: &Context<'_>, _args: &[String]| Ok(()))
    }

    fn usage_handler() -> Handler {
        Box::new(|_ctx: &Context<'_>, _args: &[String]| Err(PodError::Usage))
    }

    fn recording_handler(seen: Rc<RefCell<Vec<String>>>) -> Handler {
        Box::new(move |_ctx: &Context<'_>, args: &[String]| {
            seen.borrow_mut().extend(args.iter().cloned());
            Ok(())
        })
    }

    fn quiet_flags(cmd: clap::Command) -> clap::Command {
        cmd.arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .help("Only show identifiers"),
        )
        .arg(
            Arg::new("os")
                .long("os")
                .default_value("linux")
                .help("Filter by operating system"),
        )
    }

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_name_from_usage() {
        let mut registry = Registry::new("a3s-pod");
        let cmd = registry.register("image-inspect IMAGE", "Inspect", ok_handler(), None);
        assert_eq!(cmd.name(), "image-inspect");
        assert!(registry.get("image-inspect").is_some());
        assert!(registry.get("image-inspect IMAGE").is_none());
    }

    #[test]
    fn test_name_without_args() {
        assert_eq!(command_name("images"), "images");
        assert_eq!(command_name("pod\tPOD"), "pod");
    }

    #[test]
    fn test_last_registration_wins() {
        let mut registry = Registry::new("a3s-pod");
        registry.register("info", "first", ok_handler(), None);
        registry.register("info VERBOSE", "second", ok_handler(), None);
        assert_eq!(registry.commands().count(), 1);
        assert_eq!(registry.get("info").unwrap().synopsis, "second");
    }

    #[test]
    fn test_register_returns_stored_command() {
        let mut registry = Registry::new("a3s-pod");
        registry
            .register("info", "", ok_handler(), None)
            .synopsis = "Show info".to_string();
        assert_eq!(registry.get("info").unwrap().synopsis, "Show info");
    }

    #[test]
    fn test_describe_with_and_without_synopsis() {
        let mut registry = Registry::new("a3s-pod");
        registry.register("pods", "List pods", ok_handler(), None);
        registry.register("version", "", ok_handler(), None);
        assert_eq!(registry.get("pods").unwrap().to_string(), "pods -- List pods");
        assert_eq!(registry.get("version").unwrap().to_string(), "version");
    }

    #[test]
    fn test_help_without_flags() {
        let mut registry = Registry::new("a3s-pod");
        let cmd = registry.register("pod POD", "Show pod annotations", ok_handler(), None);
        let mut out = Vec::new();
        cmd.help("a3s-pod", &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "Show pod annotations\n\nUsage: a3s-pod pod POD\n");
        assert!(!text.contains("Options:"));
    }

    #[test]
    fn test_help_with_flags() {
        let mut registry = Registry::new("a3s-pod");
        let cmd = registry.register("images", "List images", ok_handler(), Some(quiet_flags));
        let mut out = Vec::new();
        cmd.help("a3s-pod", &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Usage: a3s-pod images"));
        assert!(text.contains("Options:"));
        assert!(text.contains("-q, --quiet"));
        assert!(text.contains("Only show identifiers"));
        assert!(text.contains("--os <OS>"));
        assert!(text.contains("(default \"linux\")"));
        assert!(!text.contains("<ARGS>"));
    }

    #[test]
    fn test_run_passes_args_without_flags() {
        let store = StateStore::from_parts(vec![], vec![]);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut registry = Registry::new("a3s-pod");
        registry.register("echo ARGS...", "", recording_handler(seen.clone()), None);

        registry
            .run("echo", &args(&["a", "--not-a-flag", "b"]), &store)
            .unwrap();
        assert_eq!(*seen.borrow(), args(&["a", "--not-a-flag", "b"]));
    }

    #[test]
    fn test_run_parses_flags_and_leaves_positionals() {
        let store = StateStore::from_parts(vec![], vec![]);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let flagged = Rc::new(RefCell::new(None));
        let mut registry = Registry::new("a3s-pod");
        let record = seen.clone();
        let record_flags = flagged.clone();
        registry.register(
            "images [PATTERN...]",
            "List images",
            Box::new(move |ctx: &Context<'_>, args: &[String]| {
                record.borrow_mut().extend(args.iter().cloned());
                *record_flags.borrow_mut() =
                    Some((ctx.flag("quiet"), ctx.value("os").map(str::to_string)));
                Ok(())
            }),
            Some(quiet_flags),
        );

        registry
            .run("images", &args(&["-q", "--os", "freebsd", "web", "-x"]), &store)
            .unwrap();
        assert_eq!(*seen.borrow(), args(&["web", "-x"]));
        assert_eq!(
            *flagged.borrow(),
            Some((true, Some("freebsd".to_string())))
        );
    }

    #[test]
    fn test_run_flag_defaults() {
        let store = StateStore::from_parts(vec![], vec![]);
        let flagged = Rc::new(RefCell::new(None));
        let record_flags = flagged.clone();
        let mut registry = Registry::new("a3s-pod");
        registry.register(
            "images",
            "",
            Box::new(move |ctx: &Context<'_>, _args: &[String]| {
                *record_flags.borrow_mut() =
                    Some((ctx.flag("quiet"), ctx.value("os").map(str::to_string)));
                Ok(())
            }),
            Some(quiet_flags),
        );

        registry.run("images", &[], &store).unwrap();
        assert_eq!(*flagged.borrow(), Some((false, Some("linux".to_string()))));
    }

    #[test]
    fn test_run_rewrites_usage_with_own_usage() {
        let store = StateStore::from_parts(vec![], vec![]);
        let mut registry = Registry::new("a3s-pod");
        registry.register("pod POD", "", usage_handler(), None);
        registry.register("image IMAGE", "", usage_handler(), None);

        let err = registry.run("pod", &[], &store).unwrap_err();
        assert_eq!(err.to_string(), "Usage: a3s-pod pod POD");
        assert!(!err.to_string().contains("IMAGE"));
        assert_eq!(err.kind(), ErrorKind::Usage);
        assert_eq!(exit_code(&err), 2);
    }

    #[test]
    fn test_run_passes_other_errors_unchanged() {
        let store = StateStore::from_parts(vec![], vec![]);
        let mut registry = Registry::new("a3s-pod");
        registry.register(
            "fail",
            "",
            Box::new(|_ctx: &Context<'_>, _args: &[String]| Err(PodError::NotFound("pod x".into()))),
            None,
        );

        let err = registry.run("fail", &[], &store).unwrap_err();
        assert!(matches!(err, PodError::NotFound(_)));
        assert_eq!(exit_code(&err), 1);
    }

    #[test]
    fn test_run_unknown_command() {
        let store = StateStore::from_parts(vec![], vec![]);
        let registry = Registry::new("a3s-pod");
        let err = registry.run("nope", &[], &store).unwrap_err();
        assert!(matches!(err, PodError::UnknownCommand(_)));
        assert_eq!(err.kind(), ErrorKind::Usage);
    }

    #[test]
    fn test_context_flag_without_schema() {
        let store = StateStore::from_parts(vec![], vec![]);
        let registry = Registry::new("a3s-pod");
        let ctx = Context::new(&registry, &store);
        assert!(!ctx.flag("quiet"));
        assert_eq!(ctx.value("os"), None);
        assert_eq!(ctx.app_name, "a3s-pod");
    }

    #[test]
    fn test_overview_lists_sorted_commands() {
        let mut registry = Registry::new("a3s-pod");
        registry.register("pods", "List pods", ok_handler(), None);
        registry.register("images", "List images", ok_handler(), None);
        let mut out = Vec::new();
        registry.write_overview(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let images = text.find("images -- List images").unwrap();
        let pods = text.find("pods -- List pods").unwrap();
        assert!(images < pods);
        assert!(text.starts_with("Usage: a3s-pod COMMAND"));
    }
}
