use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use crate::error::{Result, VeerError};
use crate::tag::fingerprint_file;

/// A trackable target: either a concrete file on disk or a shell command.
///
/// Serialized with a `kind` discriminator so the registry document stays
/// readable when new variants or fields appear.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Entry {
    Path(PathEntry),
    Command(CommandEntry),
}

/// A tracked file. `managed_copy_path` is set when the user asked for the
/// binary to be copied into managed storage; the copy then becomes the
/// launch target instead of the original source.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PathEntry {
    pub source_path: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub managed_copy_path: Option<PathBuf>,
    /// Hex sha256 of the file contents at track time.
    pub fingerprint: String,
}

/// A tracked shell command, materialized as a wrapper script on `use`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CommandEntry {
    pub command: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_directory: Option<PathBuf>,
}

/// What a launch entry should point at, resolved from an [`Entry`].
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedTarget {
    /// Install a symlink to this executable.
    Binary(PathBuf),
    /// Install a generated wrapper script; a symlink cannot carry a command
    /// line or a working directory.
    Wrapper {
        command: String,
        working_directory: Option<PathBuf>,
    },
}

impl PathEntry {
    /// Builds a path entry for `source_path`, fingerprinting its contents.
    ///
    /// # Errors
    /// [`VeerError::SourceNotFound`] if the path does not exist or cannot
    /// be read.
    pub fn new<P: AsRef<Path>>(source_path: P) -> Result<PathEntry> {
        let source_path = source_path.as_ref();
        let fingerprint = fingerprint_file(source_path)?;
        Ok(PathEntry {
            source_path: source_path.to_path_buf(),
            managed_copy_path: None,
            fingerprint,
        })
    }

    /// The path the launch entry should link to: the managed copy when one
    /// was made, the original source otherwise.
    pub fn launch_path(&self) -> &Path {
        self.managed_copy_path.as_deref().unwrap_or(&self.source_path)
    }
}

impl CommandEntry {
    /// Builds a command entry. Pure construction, no filesystem access.
    ///
    /// # Errors
    /// [`VeerError::EmptyCommand`] if the command line is blank.
    pub fn new(command: &str, working_directory: Option<PathBuf>) -> Result<CommandEntry> {
        if command.trim().is_empty() {
            return Err(VeerError::EmptyCommand);
        }
        Ok(CommandEntry {
            command: command.to_string(),
            working_directory,
        })
    }
}

impl Entry {
    /// Resolves this entry to the concrete thing the launch entry must
    /// point at.
    ///
    /// # Errors
    /// [`VeerError::TargetMissing`] if a path entry's launch path no longer
    /// exists (including a managed copy deleted externally).
    pub fn resolve_target(&self) -> Result<ResolvedTarget> {
        match self {
            Entry::Path(path_entry) => {
                let target = path_entry.launch_path();
                if !target.exists() {
                    return Err(VeerError::TargetMissing(target.to_path_buf()));
                }
                Ok(ResolvedTarget::Binary(target.to_path_buf()))
            }
            Entry::Command(command_entry) => Ok(ResolvedTarget::Wrapper {
                command: command_entry.command.clone(),
                working_directory: command_entry.working_directory.clone(),
            }),
        }
    }

    /// One-line description of the target, for listings.
    pub fn target_summary(&self) -> String {
        match self {
            Entry::Path(path_entry) => path_entry.launch_path().display().to_string(),
            Entry::Command(command_entry) => match &command_entry.working_directory {
                Some(dir) => format!("{} at {}", command_entry.command, dir.display()),
                None => command_entry.command.clone(),
            },
        }
    }
}
