use anyhow::{Context, Result};
use authz::RoleRegistry;
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Load the role registry from `path`, or fall back to the built-in table.
pub fn load(path: Option<&Path>) -> Result<RoleRegistry> {
    let Some(path) = path else {
        debug!("No role table configured, using built-in table");
        return Ok(RoleRegistry::builtin());
    };

    let path = resolve_path(path, &env::current_dir().context("Failed to get current directory")?);
    authz::load_registry(&path)
        .with_context(|| format!("Failed to load role table from {}", path.display()))
}

/// Relative paths are taken relative to `base_dir`.
fn resolve_path(path: &Path, base_dir: &Path) -> PathBuf {
    if path.is_relative() {
        base_dir.join(path)
    } else {
        path.to_path_buf()
    }
}
