use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use crate::entry::Entry;
use crate::error::{Result, VeerError};

/// One tracked application: its tagged entries and the tag the launch
/// entry currently points at, if any.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Application {
    #[serde(default)]
    pub entries: BTreeMap<String, Entry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_tag: Option<String>,
}

impl Application {
    /// The entry named by `active_tag`, if one is set.
    pub fn active_entry(&self) -> Option<&Entry> {
        self.active_tag.as_ref().and_then(|tag| self.entries.get(tag))
    }
}

/// The full persisted mapping of application name to [`Application`].
///
/// Lifecycle: loaded at the start of a command, mutated in memory, written
/// back atomically at the end of a successful command. On failure the
/// in-memory state is dropped and the file on disk is untouched.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Registry {
    #[serde(default)]
    pub applications: BTreeMap<String, Application>,
}

impl Registry {
    /// Loads the registry from `path`.
    ///
    /// A missing file yields an empty registry; a file that cannot be
    /// parsed yields [`VeerError::CorruptRegistry`]. Unknown fields in the
    /// document are ignored, so older builds can read newer files.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Registry> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Registry::default());
        }
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| VeerError::CorruptRegistry {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Atomically replaces the registry file at `path`: the document is
    /// written to a temp file in the same directory and renamed over the
    /// target, so a crash mid-write never leaves a half-written file.
    ///
    /// Concurrent external writers are not detected; last writer wins.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(dir)?;
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.persist(path).map_err(|e| VeerError::Io(e.error))?;
        Ok(())
    }

    pub fn application(&self, app_name: &str) -> Result<&Application> {
        self.applications
            .get(app_name)
            .ok_or_else(|| VeerError::UnknownApplication(app_name.to_string()))
    }

    pub fn application_mut(&mut self, app_name: &str) -> Result<&mut Application> {
        self.applications
            .get_mut(app_name)
            .ok_or_else(|| VeerError::UnknownApplication(app_name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::{CommandEntry, PathEntry};
    use tempfile::tempdir;

    fn sample_registry() -> Registry {
        let mut registry = Registry::default();
        let mut app = Application::default();
        app.entries.insert(
            "3.8".to_string(),
            Entry::Path(PathEntry {
                source_path: "/bin/python3.8".into(),
                managed_copy_path: None,
                fingerprint: "cafe".to_string(),
            }),
        );
        app.entries.insert(
            "latest".to_string(),
            Entry::Command(CommandEntry {
                command: "python3 -X dev".to_string(),
                working_directory: Some("/srv".into()),
            }),
        );
        app.active_tag = Some("3.8".to_string());
        registry.applications.insert("python".to_string(), app);
        registry
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempdir().unwrap();
        let registry = Registry::load(dir.path().join("registry.toml")).unwrap();
        assert!(registry.applications.is_empty());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config").join("registry.toml");
        let registry = sample_registry();
        registry.save(&path).unwrap();
        assert_eq!(Registry::load(&path).unwrap(), registry);
    }

    #[test]
    fn test_save_replaces_previous_contents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("registry.toml");
        sample_registry().save(&path).unwrap();
        Registry::default().save(&path).unwrap();
        assert!(Registry::load(&path).unwrap().applications.is_empty());
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("registry.toml");
        std::fs::write(&path, "applications = \"not a table\"").unwrap();
        let err = Registry::load(&path).unwrap_err();
        assert!(matches!(err, VeerError::CorruptRegistry { .. }));
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("registry.toml");
        let doc = r#"
future_field = "ignored"

[applications.python]
active_tag = "3.8"

[applications.python.entries."3.8"]
kind = "path"
source_path = "/bin/python3.8"
fingerprint = "cafe"
shiny_new_field = true
"#;
        std::fs::write(&path, doc).unwrap();
        let registry = Registry::load(&path).unwrap();
        let app = registry.application("python").unwrap();
        assert_eq!(app.active_tag.as_deref(), Some("3.8"));
        assert!(app.entries.contains_key("3.8"));
    }
}
