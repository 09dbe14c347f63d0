use std::path::{Path, PathBuf};
use anyhow::{Result, anyhow};
use directories::{BaseDirs, ProjectDirs};

/// Filesystem locations the engine operates on.
///
/// Resolved once per invocation and passed explicitly into every operation,
/// so tests can point the whole tool at a temp directory.
#[derive(Debug, Clone)]
pub struct Layout {
    /// The persisted registry document.
    pub registry_file: PathBuf,
    /// Root of managed storage; copies live at `<root>/<app>/<app>_<tag>`.
    pub managed_root: PathBuf,
    /// The user's personal binary directory, one launch entry per app.
    pub bin_dir: PathBuf,
}

impl Layout {
    /// Resolves the per-user layout from the platform directories, honoring
    /// the `VEER_CONFIG_FILE`, `VEER_DATA_DIR` and `VEER_BIN_DIR` overrides.
    pub fn from_system() -> Result<Layout> {
        let proj_dirs = ProjectDirs::from("sh", "veer", "veer")
            .ok_or_else(|| anyhow!("could not determine project directories"))?;

        let registry_file = match std::env::var_os("VEER_CONFIG_FILE") {
            Some(path) => PathBuf::from(path),
            None => proj_dirs.config_dir().join("registry.toml"),
        };
        let managed_root = match std::env::var_os("VEER_DATA_DIR") {
            Some(path) => PathBuf::from(path).join("versions"),
            None => proj_dirs.data_dir().join("versions"),
        };
        let bin_dir = match std::env::var_os("VEER_BIN_DIR") {
            Some(path) => PathBuf::from(path),
            None => default_bin_dir()?,
        };

        Ok(Layout { registry_file, managed_root, bin_dir })
    }

    /// A layout entirely contained under `root`. Used by tests.
    pub fn rooted<P: AsRef<Path>>(root: P) -> Layout {
        let root = root.as_ref();
        Layout {
            registry_file: root.join("config").join("registry.toml"),
            managed_root: root.join("versions"),
            bin_dir: root.join("bin"),
        }
    }

    /// Managed storage directory for one application.
    pub fn managed_dir(&self, app_name: &str) -> PathBuf {
        self.managed_root.join(app_name)
    }

    /// The launch entry path for one application.
    pub fn launch_entry(&self, app_name: &str) -> PathBuf {
        self.bin_dir.join(app_name)
    }
}

fn default_bin_dir() -> Result<PathBuf> {
    let base = BaseDirs::new().ok_or_else(|| anyhow!("could not determine home directory"))?;
    if let Some(exe_dir) = base.executable_dir() {
        return Ok(exe_dir.to_path_buf());
    }
    Ok(base.home_dir().join(".local").join("bin"))
}
