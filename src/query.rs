use crate::error::{Result, VeerError};
use crate::registry::Registry;
use crate::util::natural_cmp;

/// One row of a listing: `(app, tag, target, active?)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ListRow {
    pub app_name: String,
    pub tag: String,
    pub target_summary: String,
    pub is_active: bool,
}

/// Read-only projection of the registry for listing.
///
/// Rows are ordered by application name, then by natural tag order, so
/// `2.7` comes before `3.8` and `10.0` after `9.0`. With `all` unset only
/// the active tag of each application is included.
///
/// # Errors
/// [`VeerError::UnknownApplication`] when `app_name` is given but not
/// tracked.
pub fn list(registry: &Registry, app_name: Option<&str>, all: bool) -> Result<Vec<ListRow>> {
    if let Some(app_name) = app_name {
        if !registry.applications.contains_key(app_name) {
            return Err(VeerError::UnknownApplication(app_name.to_string()));
        }
    }

    let mut rows = Vec::new();
    for (name, app) in &registry.applications {
        if app_name.is_some_and(|wanted| wanted != name) {
            continue;
        }
        let mut tags: Vec<&String> = app.entries.keys().collect();
        tags.sort_by(|a, b| natural_cmp(a, b));

        for tag in tags {
            let is_active = app.active_tag.as_deref() == Some(tag.as_str());
            if !all && !is_active {
                continue;
            }
            rows.push(ListRow {
                app_name: name.clone(),
                tag: tag.clone(),
                target_summary: app.entries[tag].target_summary(),
                is_active,
            });
        }
    }
    Ok(rows)
}
