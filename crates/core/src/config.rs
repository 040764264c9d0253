//! Project root discovery.
//!
//! The project root is resolved once by the caller and then passed explicitly into
//! [`crate::settings::load_settings`]. Nothing in this module reads environment variables;
//! overrides such as `XRH_ROOT` are resolved by the binary at startup.

use crate::constants::{CONFIG_DIR_NAME, GIT_DIR_NAME, PROFILE_EXTENSION};
use crate::{SettingsError, SettingsResult};
use std::path::{Path, PathBuf};

/// Location the root walk starts from when the caller supplies none.
///
/// This is the manifest directory of the `xrh-core` crate, i.e. the location of the resolver
/// itself in a source checkout.
pub fn default_search_start() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// Returns true if `candidate` looks like a project root.
fn is_project_root(candidate: &Path) -> bool {
    candidate.join(GIT_DIR_NAME).exists() || candidate.join(CONFIG_DIR_NAME).is_dir()
}

/// Walk upward from `start` until a directory holding `.git` or `config/` is found.
///
/// `start` itself is probed first, then each ancestor from most to least specific. If the
/// matching entry is not a directory, its parent is returned instead. When no ancestor
/// qualifies, the current working directory is returned.
///
/// # Errors
///
/// Returns [`SettingsError::CurrentDir`] only if the working directory cannot be read.
pub fn resolve_project_root(start: &Path) -> SettingsResult<PathBuf> {
    let start = match start.canonicalize() {
        Ok(start) => start,
        Err(_) if start.is_absolute() => start.to_path_buf(),
        // A relative start that does not exist yet is anchored at the working directory.
        Err(_) => std::env::current_dir()
            .map_err(SettingsError::CurrentDir)?
            .join(start),
    };

    for candidate in start.ancestors() {
        if !is_project_root(candidate) {
            continue;
        }

        let root = if candidate.is_dir() {
            candidate
        } else {
            candidate.parent().unwrap_or(candidate)
        };
        tracing::debug!("project root resolved: {}", root.display());
        return Ok(root.to_path_buf());
    }

    let cwd = std::env::current_dir().map_err(SettingsError::CurrentDir)?;
    tracing::warn!(
        "no project root above {}, falling back to {}",
        start.display(),
        cwd.display()
    );
    Ok(cwd)
}

/// Resolve the project root, preferring an explicit override.
///
/// An override is used verbatim. Otherwise the walk starts from [`default_search_start`].
pub fn locate_project_root(override_root: Option<PathBuf>) -> SettingsResult<PathBuf> {
    match override_root {
        Some(root) => {
            tracing::debug!("project root overridden: {}", root.display());
            Ok(root)
        }
        None => resolve_project_root(&default_search_start()),
    }
}

/// Profile directory: `<root>/config`
pub fn config_dir(root: &Path) -> PathBuf {
    root.join(CONFIG_DIR_NAME)
}

/// Profile file: `<root>/config/<profile>.yaml`
pub fn profile_path(root: &Path, profile: &str) -> PathBuf {
    config_dir(root).join(format!("{profile}.{PROFILE_EXTENSION}"))
}
