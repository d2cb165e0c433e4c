use std::path::{Path, PathBuf};

use anyhow::Context;
use veneer_config::PROJECT_DIR;

/// Pick the directory whose `.veneer/` holds config and stored overrides.
///
/// An explicit `--project` wins; it may name the project directory or its
/// `.veneer` directory. Otherwise the nearest ancestor of `cwd` that has a
/// `.veneer` directory is used, falling back to `cwd` itself.
pub fn resolve_project_root(explicit: Option<&Path>, cwd: &Path) -> anyhow::Result<PathBuf> {
    let Some(explicit) = explicit else {
        return Ok(find_project_root(cwd).unwrap_or_else(|| cwd.to_path_buf()));
    };

    let explicit = if explicit.is_relative() {
        cwd.join(explicit)
    } else {
        explicit.to_path_buf()
    };

    if explicit.file_name().is_some_and(|name| name == PROJECT_DIR) {
        return explicit
            .parent()
            .map(Path::to_path_buf)
            .context("invalid --project path: '.veneer' directory has no parent");
    }

    anyhow::ensure!(
        explicit.is_dir(),
        "invalid --project '{}': directory does not exist",
        explicit.display()
    );
    Ok(explicit)
}

/// Nearest ancestor of `start` (itself included) with a `.veneer` directory.
fn find_project_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(PROJECT_DIR).is_dir())
        .map(Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use tempfile::TempDir;

    use super::resolve_project_root;

    fn project() -> TempDir {
        let temp = TempDir::new().expect("tempdir should create");
        std::fs::create_dir(temp.path().join(".veneer")).expect(".veneer should create");
        std::fs::create_dir_all(temp.path().join("models/tower")).expect("nested dirs should create");
        temp
    }

    #[test]
    fn walks_up_to_nearest_marker() {
        let temp = project();
        let cwd = temp.path().join("models/tower");

        let root = resolve_project_root(None, &cwd).unwrap();
        assert_eq!(root, temp.path());
    }

    #[test]
    fn falls_back_to_cwd_without_marker() {
        let temp = TempDir::new().expect("tempdir should create");
        std::fs::create_dir_all(temp.path().join("a/b")).expect("nested dirs should create");
        let cwd = temp.path().join("a/b");

        assert_eq!(resolve_project_root(None, &cwd).unwrap(), cwd);
    }

    #[test]
    fn marker_file_is_not_a_project() {
        let temp = TempDir::new().expect("tempdir should create");
        std::fs::write(temp.path().join(".veneer"), "").expect("marker file should write");

        let root = resolve_project_root(None, temp.path()).unwrap();
        assert_eq!(root, temp.path());
        let nested = temp.path().join("scenes");
        std::fs::create_dir(&nested).expect("scenes should create");
        assert_eq!(resolve_project_root(None, &nested).unwrap(), nested);
    }

    #[test]
    fn explicit_veneer_dir_resolves_to_parent() {
        let temp = project();
        let marker = temp.path().join(".veneer");
        let root = resolve_project_root(Some(marker.as_path()), Path::new("/")).unwrap();
        assert_eq!(root, temp.path());
    }

    #[test]
    fn explicit_relative_path_is_joined_to_cwd() {
        let temp = project();
        let root = resolve_project_root(Some(Path::new("models")), temp.path()).unwrap();
        assert_eq!(root, temp.path().join("models"));
    }

    #[test]
    fn explicit_missing_directory_is_an_error() {
        let temp = TempDir::new().expect("tempdir should create");
        let missing = temp.path().join("nope");
        let err = resolve_project_root(Some(missing.as_path()), temp.path()).unwrap_err();
        assert!(err.to_string().contains("directory does not exist"), "{err}");
    }
}
