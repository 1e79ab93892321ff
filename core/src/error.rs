use thiserror::Error;
use uuid::Uuid;

/// Broad classification of a [`PodError`].
///
/// Callers decide exit codes and formatting from the kind, never from
/// the concrete variant or its message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller supplied the wrong shape of arguments.
    Usage,
    /// The referenced image, pod or app does not exist.
    NotFound,
    /// A reference string is malformed.
    Resolution,
    /// A single app was required but the pod has several.
    Ambiguity,
    /// Anything else surfaced by the store or a handler.
    Domain,
}

/// A3S Pod error types
#[derive(Error, Debug)]
pub enum PodError {
    /// Wrong argument shape. Carries no message; the command that owns
    /// the handler turns it into [`PodError::InvalidUsage`].
    #[error("Invalid usage")]
    Usage,

    /// Usage error rendered against a command's usage text
    #[error("Usage: {usage}")]
    InvalidUsage { usage: String },

    /// No command registered under this name
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    /// Image or pod not found in the store
    #[error("Not found: {0}")]
    NotFound(String),

    /// Pod manifest has no app with the requested name
    #[error("Pod {pod} has no app {app}")]
    NoSuchApp { pod: Uuid, app: String },

    /// Malformed hash, name or label string
    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    /// No app name given for a pod with several apps
    #[error("No app name provided, and pod {0} has multiple apps")]
    AmbiguousApp(Uuid),

    /// Error with attached trace context
    #[error("{context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<PodError>,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl PodError {
    /// Classify this error, looking through any context wrappers.
    pub fn kind(&self) -> ErrorKind {
        match self.root() {
            PodError::Usage | PodError::InvalidUsage { .. } | PodError::UnknownCommand(_) => {
                ErrorKind::Usage
            }
            PodError::NotFound(_) | PodError::NoSuchApp { .. } => ErrorKind::NotFound,
            PodError::InvalidReference(_) => ErrorKind::Resolution,
            PodError::AmbiguousApp(_) => ErrorKind::Ambiguity,
            _ => ErrorKind::Domain,
        }
    }

    /// True for the bare usage sentinel, even when wrapped in context.
    pub fn is_usage_sentinel(&self) -> bool {
        matches!(self.root(), PodError::Usage)
    }

    /// The innermost error beneath all context wrappers.
    pub fn root(&self) -> &PodError {
        let mut err = self;
        while let PodError::Context { source, .. } = err {
            err = source;
        }
        err
    }

    /// Context entries from outermost to innermost.
    pub fn trace(&self) -> Vec<&str> {
        let mut frames = Vec::new();
        let mut err = self;
        while let PodError::Context { context, source } = err {
            frames.push(context.as_str());
            err = source;
        }
        frames
    }
}

impl From<serde_json::Error> for PodError {
    fn from(err: serde_json::Error) -> Self {
        PodError::SerializationError(err.to_string())
    }
}

impl From<serde_yaml::Error> for PodError {
    fn from(err: serde_yaml::Error) -> Self {
        PodError::SerializationError(err.to_string())
    }
}

/// Result type alias for A3S Pod operations
pub type Result<T> = std::result::Result<T, PodError>;

/// Attach trace context to an error result.
///
/// The usage sentinel is left bare: its message comes from the command
/// that reports it.
pub trait ResultExt<T> {
    fn context<C: Into<String>>(self, context: C) -> Result<T>;

    fn with_context<C: Into<String>, F: FnOnce() -> C>(self, f: F) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context<C: Into<String>>(self, context: C) -> Result<T> {
        self.with_context(|| context)
    }

    fn with_context<C: Into<String>, F: FnOnce() -> C>(self, f: F) -> Result<T> {
        self.map_err(|err| match err {
            PodError::Usage => PodError::Usage,
            other => PodError::Context {
                context: f().into(),
                source: Box::new(other),
            },
        })
    }
}
