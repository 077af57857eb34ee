use anyhow::{anyhow, bail, ensure, Context};
use derive_builder::Builder;
use directories::ProjectDirs;
use std::path::{Component, Path, PathBuf};

use crate::trace;

/// Relative location of the bundled template inside an installation prefix.
pub const TEMPLATE_SUBDIR: &str = "templates/default";

#[derive(Builder, Debug, Clone)]
pub struct CometDirs {
    cwd: PathBuf,
    template_dir: PathBuf,
}

impl CometDirs {
    /// Create a new [`CometDirs`] builder
    #[must_use]
    pub fn builder() -> CometDirsBuilder {
        CometDirsBuilder::create_empty()
    }

    /// Resolves the directories for this invocation: the current working
    /// directory and the bundled template, optionally overridden.
    ///
    /// # Errors
    ///
    /// Returns an [`Err`] if the current directory is unavailable or no
    /// template directory can be found.
    pub fn default_paths(template_override: Option<&Path>) -> anyhow::Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current dir")?;
        let template_dir = match template_override {
            Some(dir) => {
                let dir = if dir.is_absolute() {
                    dir.to_path_buf()
                } else {
                    cwd.join(dir)
                };
                ensure!(
                    dir.is_dir(),
                    anyhow!("Template path {} is not a directory", dir.display())
                );
                dir
            }
            None => Self::find_template_dir(&Self::template_candidates())?,
        };

        Ok(Self { cwd, template_dir })
    }

    /// Every place a bundled template may live, in lookup order.
    #[must_use]
    pub fn template_candidates() -> Vec<PathBuf> {
        let mut candidates = Vec::new();

        if let Some(exe_dir) = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
        {
            candidates.push(exe_dir.join(TEMPLATE_SUBDIR));
            candidates.push(
                exe_dir
                    .join("..")
                    .join("share")
                    .join(env!("CARGO_PKG_NAME"))
                    .join(TEMPLATE_SUBDIR),
            );
        }

        if let Some(project) = ProjectDirs::from("", "", env!("CARGO_PKG_NAME")) {
            candidates.push(project.data_dir().join(TEMPLATE_SUBDIR));
        }

        candidates.push(Path::new(env!("CARGO_MANIFEST_DIR")).join(TEMPLATE_SUBDIR));
        candidates
    }

    /// Returns the first candidate that is a directory.
    ///
    /// # Errors
    ///
    /// Returns an [`Err`] listing every searched path if none exists.
    pub fn find_template_dir(candidates: &[PathBuf]) -> anyhow::Result<PathBuf> {
        for candidate in candidates {
            trace!("Looking for template at {}", candidate.display());
            if candidate.is_dir() {
                return Ok(candidate.clone());
            }
        }

        bail!(
            "Could not find the bundled template. Searched:\n{}",
            candidates
                .iter()
                .map(|c| format!("    {}", c.display()))
                .collect::<Vec<_>>()
                .join("\n")
        )
    }

    /// Resolves a project directory name against the working directory.
    /// `.` and `..` are folded lexically so the path does not need to exist.
    #[must_use]
    pub fn resolve_project_path(&self, name: &str) -> PathBuf {
        let joined = self.cwd.join(name);
        let mut resolved = PathBuf::new();

        for component in joined.components() {
            match component {
                Component::CurDir => {}
                Component::ParentDir => {
                    resolved.pop();
                }
                other => resolved.push(other),
            }
        }

        resolved
    }

    /// Removes whatever lives at `path`: file, symlink or directory tree.
    ///
    /// # Errors
    ///
    /// Returns an [`Err`] if the path can not be inspected or removed.
    pub fn remove_path(path: &Path) -> anyhow::Result<()> {
        let file_type = path
            .symlink_metadata()
            .with_context(|| format!("Failed to inspect {}", path.display()))?
            .file_type();

        if file_type.is_symlink() {
            // https://stackoverflow.com/questions/76351822/creating-and-removing-symlinks

            #[cfg(target_os = "windows")]
            std::fs::remove_dir(path)
                .or_else(|_| std::fs::remove_file(path))
                .with_context(|| format!("Failed to remove {}", path.display()))?;

            #[cfg(not(target_os = "windows"))]
            std::fs::remove_file(path)
                .with_context(|| format!("Failed to remove {}", path.display()))?;
        } else if file_type.is_dir() {
            fs_extra::dir::remove(path)
                .map_err(|e| anyhow!("{e}"))
                .with_context(|| format!("Failed to remove {}", path.display()))?;
        } else {
            std::fs::remove_file(path)
                .with_context(|| format!("Failed to remove {}", path.display()))?;
        }

        Ok(())
    }

    /// Returns the working directory of this [`CometDirs`].
    #[must_use]
    pub fn cwd(&self) -> &Path {
        self.cwd.as_path()
    }

    /// Returns the template directory of this [`CometDirs`].
    #[must_use]
    pub fn template_dir(&self) -> &Path {
        self.template_dir.as_path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dirs(cwd: &Path) -> CometDirs {
        CometDirs::builder()
            .cwd(cwd.to_path_buf())
            .template_dir(cwd.join("template"))
            .build()
            .unwrap()
    }

    #[test]
    fn resolves_relative_names_against_cwd() {
        let dirs = dirs(Path::new("/work/space"));

        assert_eq!(dirs.resolve_project_path("demo"), Path::new("/work/space/demo"));
        assert_eq!(
            dirs.resolve_project_path("./nested/../app"),
            Path::new("/work/space/app")
        );
        assert_eq!(dirs.resolve_project_path("../sibling"), Path::new("/work/sibling"));
    }

    #[cfg(unix)]
    #[test]
    fn keeps_absolute_names() {
        let dirs = dirs(Path::new("/work/space"));

        assert_eq!(dirs.resolve_project_path("/tmp/app"), Path::new("/tmp/app"));
    }

    #[test]
    fn finds_first_existing_template() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing");
        let present = tmp.path().join("present");
        std::fs::create_dir(&present).unwrap();

        let found = CometDirs::find_template_dir(&[missing.clone(), present.clone()]).unwrap();
        assert_eq!(found, present);

        let err = CometDirs::find_template_dir(&[missing]).unwrap_err();
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn bundled_template_is_a_candidate() {
        let candidates = CometDirs::template_candidates();

        assert!(candidates
            .iter()
            .any(|c| c.ends_with(TEMPLATE_SUBDIR) && c.is_dir()));
    }

    #[test]
    fn removes_files_and_trees() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("file.txt");
        let tree = tmp.path().join("tree");
        std::fs::write(&file, "x").unwrap();
        std::fs::create_dir_all(tree.join("a/b")).unwrap();
        std::fs::write(tree.join("a/b/c.txt"), "y").unwrap();

        CometDirs::remove_path(&file).unwrap();
        CometDirs::remove_path(&tree).unwrap();

        assert!(!file.exists());
        assert!(!tree.exists());
    }
}
