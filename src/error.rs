use std::path::PathBuf;

/// Every failure the core can surface to a caller.
///
/// These are returned, never printed: rendering is the CLI layer's job.
/// Nothing in here is retried automatically.
#[derive(Debug, thiserror::Error)]
pub enum VeerError {
    /// The registry file exists but could not be parsed.
    #[error("registry file '{path}' is corrupt: {reason}")]
    CorruptRegistry { path: PathBuf, reason: String },

    /// The path handed to `track path` does not exist or is unreadable.
    #[error("source path '{0}' does not exist or is not readable")]
    SourceNotFound(PathBuf),

    /// A previously tracked target vanished before it could be resolved.
    #[error("target '{0}' no longer exists")]
    TargetMissing(PathBuf),

    /// A command entry with a blank command line.
    #[error("command line is empty")]
    EmptyCommand,

    /// A derived tag collides with an existing tag for a different source.
    #[error("derived tag '{tag}' already exists in app '{app}' for a different source path")]
    AmbiguousTag { app: String, tag: String },

    /// The operation requires an explicit tag.
    #[error("app '{0}' requires an explicit tag (app@tag)")]
    MissingTag(String),

    /// `use` without a tag, but nothing was ever selected.
    #[error("app '{0}' has no active tag")]
    NoActiveTag(String),

    /// The tag is not tracked under this application.
    #[error("tag '{tag}' does not exist in app '{app}'")]
    UnknownTag { app: String, tag: String },

    /// The application is not tracked at all.
    #[error("app '{0}' is not tracked")]
    UnknownApplication(String),

    /// Writing the launch entry into the personal bin directory failed.
    #[error("failed to install launch entry '{path}': {source}")]
    InstallFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = VeerError> = std::result::Result<T, E>;
