use std::path::{Path, PathBuf};
use crate::entry::{CommandEntry, Entry, PathEntry, ResolvedTarget};
use crate::error::{Result, VeerError};
use crate::paths::Layout;
use crate::registry::Registry;
use crate::tag::short_tag;

/// Tracks a file under `app_name`, deriving a tag from its content
/// fingerprint when none is given. With `copy`, the file is first copied
/// into managed storage and the copy becomes the launch target.
///
/// Tracking never changes which tag is active, but overwriting the active
/// tag reinstalls the launch entry so it cannot point at a target the
/// overwrite invalidated.
///
/// Returns the tag the entry was stored under.
pub fn track_path(
    registry: &mut Registry,
    layout: &Layout,
    app_name: &str,
    tag: Option<&str>,
    source_path: &Path,
    copy: bool,
) -> Result<String> {
    let mut path_entry = PathEntry::new(source_path)?;

    let tag = match tag {
        Some(tag) => tag.to_string(),
        None => derived_tag_for(registry, app_name, &path_entry)?,
    };

    if copy {
        let managed_dir = layout.managed_dir(app_name);
        std::fs::create_dir_all(&managed_dir)?;
        let copy_path = managed_dir.join(format!("{app_name}_{tag}"));
        std::fs::copy(&path_entry.source_path, &copy_path)?;
        make_executable(&copy_path)?;
        path_entry.managed_copy_path = Some(copy_path);
    }

    insert_entry(registry, layout, app_name, tag, Entry::Path(path_entry))
}

/// Tracks a shell command under `app_name`. Command entries have no content
/// to fingerprint, so an explicit tag is required.
pub fn track_command(
    registry: &mut Registry,
    layout: &Layout,
    app_name: &str,
    tag: Option<&str>,
    command: &str,
    working_directory: Option<PathBuf>,
) -> Result<String> {
    let tag = tag.ok_or_else(|| VeerError::MissingTag(app_name.to_string()))?;
    let command_entry = CommandEntry::new(command, working_directory)?;
    insert_entry(registry, layout, app_name, tag.to_string(), Entry::Command(command_entry))
}

/// Points the launch entry for `app_name` at `tag` (or at the current
/// active tag when `tag` is `None`), then records the new active tag.
///
/// All-or-nothing: if resolution or the install fails, `active_tag` and
/// the entry on disk are left exactly as they were.
pub fn use_tag(
    registry: &mut Registry,
    layout: &Layout,
    app_name: &str,
    tag: Option<&str>,
) -> Result<String> {
    let app = registry.application_mut(app_name)?;
    let tag = match tag {
        Some(tag) => {
            if !app.entries.contains_key(tag) {
                return Err(VeerError::UnknownTag {
                    app: app_name.to_string(),
                    tag: tag.to_string(),
                });
            }
            tag.to_string()
        }
        None => app
            .active_tag
            .clone()
            .ok_or_else(|| VeerError::NoActiveTag(app_name.to_string()))?,
    };

    let entry = app.entries.get(&tag).ok_or_else(|| VeerError::UnknownTag {
        app: app_name.to_string(),
        tag: tag.clone(),
    })?;
    let target = entry.resolve_target()?;
    install_launch_entry(layout, app_name, &target)?;
    app.active_tag = Some(tag.clone());
    Ok(tag)
}

/// Removes a tag from `app_name`. If it was the active tag the launch
/// entry is removed first; removing the last tag drops the application.
pub fn untrack(
    registry: &mut Registry,
    layout: &Layout,
    app_name: &str,
    tag: &str,
) -> Result<()> {
    let app = registry.application_mut(app_name)?;
    if !app.entries.contains_key(tag) {
        return Err(VeerError::UnknownTag {
            app: app_name.to_string(),
            tag: tag.to_string(),
        });
    }

    if app.active_tag.as_deref() == Some(tag) {
        remove_launch_entry(layout, app_name)?;
        app.active_tag = None;
    }
    app.entries.remove(tag);
    if app.entries.is_empty() {
        registry.applications.remove(app_name);
    }
    Ok(())
}

/// Clears the active tag for `app_name` and removes its launch entry.
pub fn unlink(registry: &mut Registry, layout: &Layout, app_name: &str) -> Result<()> {
    let app = registry.application_mut(app_name)?;
    remove_launch_entry(layout, app_name)?;
    app.active_tag = None;
    Ok(())
}

/// The on-disk path of the installed launch entry for `app_name`.
pub fn installed_entry_path(layout: &Layout, app_name: &str) -> PathBuf {
    #[cfg(windows)]
    {
        layout.launch_entry(app_name).with_extension("bat")
    }
    #[cfg(not(windows))]
    {
        layout.launch_entry(app_name)
    }
}

/// Atomically (re)installs the launch entry for `app_name`: the artifact is
/// built at a temporary name inside the bin directory and renamed over the
/// final name, so readers see either the old or the new target, never a
/// half-written one. Creates the bin directory if needed.
pub fn install_launch_entry(
    layout: &Layout,
    app_name: &str,
    target: &ResolvedTarget,
) -> Result<()> {
    match target {
        ResolvedTarget::Binary(path) => {
            install_artifact(&layout.bin_dir, app_name, |tmp| place_link(path, tmp))
        }
        ResolvedTarget::Wrapper { command, working_directory } => {
            let script = wrapper_script(command, working_directory.as_deref());
            install_artifact(&layout.bin_dir, app_name, |tmp| place_script(&script, tmp))
        }
    }
}

fn derived_tag_for(registry: &Registry, app_name: &str, path_entry: &PathEntry) -> Result<String> {
    let derived = short_tag(&path_entry.fingerprint);
    if let Some(app) = registry.applications.get(app_name) {
        match app.entries.get(&derived) {
            Some(Entry::Path(existing)) if existing.source_path == path_entry.source_path => {}
            Some(_) => {
                return Err(VeerError::AmbiguousTag {
                    app: app_name.to_string(),
                    tag: derived,
                });
            }
            None => {}
        }
    }
    Ok(derived)
}

fn insert_entry(
    registry: &mut Registry,
    layout: &Layout,
    app_name: &str,
    tag: String,
    entry: Entry,
) -> Result<String> {
    let app = registry.applications.entry(app_name.to_string()).or_default();
    let overwrites_active = app.active_tag.as_deref() == Some(tag.as_str());
    app.entries.insert(tag.clone(), entry);

    if overwrites_active {
        // the overwrite may have changed the target kind entirely
        let target = app.entries[&tag].resolve_target()?;
        install_launch_entry(layout, app_name, &target)?;
    }
    Ok(tag)
}

fn install_artifact(
    bin_dir: &Path,
    name: &str,
    build: impl FnOnce(&Path) -> std::io::Result<()>,
) -> Result<()> {
    #[cfg(windows)]
    let final_path = bin_dir.join(name).with_extension("bat");
    #[cfg(not(windows))]
    let final_path = bin_dir.join(name);

    std::fs::create_dir_all(bin_dir).map_err(|e| VeerError::InstallFailed {
        path: final_path.clone(),
        source: e,
    })?;

    let tmp_path = bin_dir.join(format!(".{name}.tmp"));
    // exists() follows symlinks, symlink_metadata does not
    if std::fs::symlink_metadata(&tmp_path).is_ok() {
        std::fs::remove_file(&tmp_path).map_err(|e| VeerError::InstallFailed {
            path: final_path.clone(),
            source: e,
        })?;
    }
    build(&tmp_path).map_err(|e| VeerError::InstallFailed {
        path: final_path.clone(),
        source: e,
    })?;
    std::fs::rename(&tmp_path, &final_path).map_err(|e| VeerError::InstallFailed {
        path: final_path,
        source: e,
    })?;
    Ok(())
}

fn remove_launch_entry(layout: &Layout, app_name: &str) -> Result<()> {
    let path = installed_entry_path(layout, app_name);
    if std::fs::symlink_metadata(&path).is_ok() {
        std::fs::remove_file(&path)?;
    }
    Ok(())
}

#[cfg(unix)]
fn place_link(target: &Path, link_path: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(target, link_path)
}

#[cfg(windows)]
fn place_link(target: &Path, link_path: &Path) -> std::io::Result<()> {
    let script = format!("@echo off\r\ncall \"{}\" %*\r\n", target.display());
    std::fs::write(link_path, script)
}

fn place_script(script: &str, path: &Path) -> std::io::Result<()> {
    std::fs::write(path, script)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))?;
    }
    Ok(())
}

#[cfg(unix)]
fn wrapper_script(command: &str, working_directory: Option<&Path>) -> String {
    let mut script = String::from("#!/bin/sh\n");
    if let Some(dir) = working_directory {
        script.push_str(&format!("cd \"{}\" || exit 1\n", dir.display()));
    }
    script.push_str(&format!("exec {command} \"$@\"\n"));
    script
}

#[cfg(windows)]
fn wrapper_script(command: &str, working_directory: Option<&Path>) -> String {
    let mut script = String::from("@echo off\r\n");
    if let Some(dir) = working_directory {
        script.push_str(&format!("cd /d \"{}\"\r\n", dir.display()));
    }
    script.push_str(&format!("{command} %*\r\n"));
    script
}

fn make_executable(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))?;
    }
    #[cfg(not(unix))]
    {
        let _ = path;
    }
    Ok(())
}
