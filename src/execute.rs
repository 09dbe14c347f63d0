use std::path::{Path, PathBuf};
use anyhow::{Result, bail};
use colored::Colorize;
use regex::Regex;
use veer::paths::Layout;
use veer::query::list;
use veer::registry::Registry;
use veer::switch::{
    installed_entry_path, track_command, track_path, unlink, untrack, use_tag,
};
use crate::cli::{CLI, TrackKind, VeerCommand};

pub fn execute(cli: CLI) -> Result<()> {
    let layout = Layout::from_system()?;
    match cli.command {
        VeerCommand::Track { kind } => match kind {
            TrackKind::Path { app_spec, path, copy } => {
                execute_track_path(&layout, &app_spec, &path, copy)
            }
            TrackKind::Command { app_spec, command, working_directory } => {
                execute_track_command(&layout, &app_spec, &command, working_directory)
            }
        },
        VeerCommand::Use { app_spec } => execute_use(&layout, &app_spec),
        VeerCommand::List { name, all } => execute_list(&layout, name.as_deref(), all),
        VeerCommand::Untrack { app_spec } => execute_untrack(&layout, &app_spec),
        VeerCommand::Unlink { name } => execute_unlink(&layout, &name),
        VeerCommand::Which { name } => execute_which(&layout, &name),
        VeerCommand::Config { json } => execute_config(&layout, json),
    }
}

/// Splits `<app>[@<tag>]` into its parts. App names must not contain `@`.
fn parse_app_spec(spec: &str) -> Result<(String, Option<String>)> {
    let re = Regex::new(r"^(?P<app>[^@\s]+)(?:@(?P<tag>\S+))?$")?;
    let Some(caps) = re.captures(spec) else {
        bail!("app must be given as <app>[@<tag>], e.g. 'python@3.8' or 'python'");
    };
    let app = caps["app"].to_string();
    let tag = caps.name("tag").map(|m| m.as_str().to_string());
    Ok((app, tag))
}

pub fn execute_track_path(layout: &Layout, app_spec: &str, path: &Path, copy: bool) -> Result<()> {
    let (app_name, tag) = parse_app_spec(app_spec)?;
    let mut registry = Registry::load(&layout.registry_file)?;
    let tag = track_path(&mut registry, layout, &app_name, tag.as_deref(), path, copy)?;
    registry.save(&layout.registry_file)?;
    println!(
        "tracked {}@{} -> {}",
        app_name.yellow().bold(),
        tag.blue().bold(),
        path.display().to_string().green()
    );
    Ok(())
}

pub fn execute_track_command(
    layout: &Layout,
    app_spec: &str,
    command: &str,
    working_directory: Option<PathBuf>,
) -> Result<()> {
    let (app_name, tag) = parse_app_spec(app_spec)?;
    let mut registry = Registry::load(&layout.registry_file)?;
    let tag = track_command(
        &mut registry,
        layout,
        &app_name,
        tag.as_deref(),
        command,
        working_directory,
    )?;
    registry.save(&layout.registry_file)?;
    println!(
        "tracked {}@{} -> {}",
        app_name.yellow().bold(),
        tag.blue().bold(),
        command.magenta()
    );
    Ok(())
}

pub fn execute_use(layout: &Layout, app_spec: &str) -> Result<()> {
    let (app_name, tag) = parse_app_spec(app_spec)?;
    let mut registry = Registry::load(&layout.registry_file)?;
    let tag = use_tag(&mut registry, layout, &app_name, tag.as_deref())?;
    registry.save(&layout.registry_file)?;
    println!("using {}@{}", app_name.yellow().bold(), tag.blue().bold());
    Ok(())
}

pub fn execute_list(layout: &Layout, name: Option<&str>, all: bool) -> Result<()> {
    let registry = Registry::load(&layout.registry_file)?;
    if registry.applications.is_empty() {
        println!("No applications tracked. Use `veer track` to start.");
        return Ok(());
    }
    let rows = list(&registry, name, all)?;

    let mut current_app: Option<String> = None;
    for row in rows {
        if current_app.as_deref() != Some(&row.app_name) {
            println!("{}", row.app_name.yellow().bold());
            current_app = Some(row.app_name.clone());
        }
        let marker = if row.is_active { "*" } else { " " };
        println!(
            "  {} {} - {}",
            marker.magenta().bold(),
            row.tag.blue().bold(),
            row.target_summary.green()
        );
    }
    Ok(())
}

pub fn execute_untrack(layout: &Layout, app_spec: &str) -> Result<()> {
    let (app_name, tag) = parse_app_spec(app_spec)?;
    let Some(tag) = tag else {
        bail!("untrack needs an explicit tag: <app>@<tag>");
    };
    let mut registry = Registry::load(&layout.registry_file)?;
    untrack(&mut registry, layout, &app_name, &tag)?;
    registry.save(&layout.registry_file)?;
    println!("untracked {}@{}", app_name.yellow().bold(), tag.blue().bold());
    Ok(())
}

pub fn execute_unlink(layout: &Layout, name: &str) -> Result<()> {
    let mut registry = Registry::load(&layout.registry_file)?;
    unlink(&mut registry, layout, name)?;
    registry.save(&layout.registry_file)?;
    println!("unlinked {}", name.yellow().bold());
    Ok(())
}

pub fn execute_which(layout: &Layout, name: &str) -> Result<()> {
    let registry = Registry::load(&layout.registry_file)?;
    let app = registry.application(name)?;
    let entry_path = installed_entry_path(layout, name);
    if entry_path.exists() || entry_path.is_symlink() {
        println!("launch entry: {}", entry_path.display().to_string().green());
    } else {
        println!("no launch entry installed for {}", name.yellow().bold());
    }
    match app.active_entry() {
        Some(entry) => {
            println!("resolves to:  {}", entry.target_summary().green());
        }
        None => {
            println!("no active tag");
        }
    }
    Ok(())
}

pub fn execute_config(layout: &Layout, json: bool) -> Result<()> {
    let registry = Registry::load(&layout.registry_file)?;
    let rendered = if json {
        serde_json::to_string_pretty(&registry)?
    } else {
        toml::to_string_pretty(&registry)?
    };
    println!("{rendered}");
    Ok(())
}
