use anyhow::{anyhow, ensure, Context, Result};
use serde_json::Value;
use std::{
    fs,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

use crate::{directory::ensure_dir, indicator::Indicator, trace};

/// Relative path of the manifest whose `name` is rewritten per project.
pub const MANIFEST: &str = "package.json";

/// The bundled starter tree. It is only ever read.
#[derive(Debug, Clone)]
pub struct Template {
    root: PathBuf,
}

/// What [`Template::copy_to`] did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyReport {
    pub files: usize,
    pub manifest_rewritten: bool,
}

impl Template {
    /// # Errors
    ///
    /// Returns an [`Err`] if `root` is not a directory.
    pub fn open(root: &Path) -> Result<Self> {
        ensure!(
            root.is_dir(),
            anyhow!("Template path {} is not a directory", root.display())
        );

        Ok(Template {
            root: root.to_path_buf(),
        })
    }

    /// Every file in the template, hidden ones included, as sorted paths
    /// relative to the root. Directories are implied by the files they hold.
    ///
    /// # Errors
    ///
    /// Returns an [`Err`] if any entry can not be read.
    pub fn files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(&self.root)
            .min_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry
                .with_context(|| format!("Failed to read template {}", self.root.display()))?;

            if entry.file_type().is_file() {
                let relative = entry
                    .path()
                    .strip_prefix(&self.root)
                    .context("Template entry outside of template root")?;
                files.push(relative.to_path_buf());
            }
        }

        Ok(files)
    }

    /// Mirrors the template into `dest`. The root manifest gets its `name`
    /// set to `project_name`; everything else is copied byte for byte. The
    /// first failure aborts the copy.
    ///
    /// # Errors
    ///
    /// Returns an [`Err`] naming the file that could not be read, parsed or
    /// written.
    pub fn copy_to(&self, dest: &Path, project_name: &str) -> Result<CopyReport> {
        let indicator = Indicator::start("Setting up project files...");

        match self.copy_files(dest, project_name) {
            Ok(report) => {
                indicator.succeed("Project files set up successfully.");
                Ok(report)
            }
            Err(e) => {
                indicator.fail("Failed to copy template files.");
                Err(e)
            }
        }
    }

    fn copy_files(&self, dest: &Path, project_name: &str) -> Result<CopyReport> {
        let mut report = CopyReport::default();

        for file in self.files()? {
            let source = self.root.join(&file);
            let target = dest.join(&file);

            if let Some(parent) = target.parent() {
                ensure_dir(parent)?;
            }

            if file == Path::new(MANIFEST) {
                let contents = fs::read(&source)
                    .with_context(|| format!("Failed to read {}", source.display()))?;
                let rewritten = rewrite_manifest(&contents, project_name)
                    .with_context(|| format!("Invalid manifest {}", source.display()))?;
                fs::write(&target, rewritten)
                    .with_context(|| format!("Failed to write {}", target.display()))?;
                report.manifest_rewritten = true;
            } else {
                fs::copy(&source, &target).with_context(|| {
                    format!(
                        "Failed to copy {} to {}",
                        source.display(),
                        target.display()
                    )
                })?;
            }

            trace!("Wrote {}", target.display());
            report.files += 1;
        }

        Ok(report)
    }
}

/// Sets the top level `name` of a JSON manifest, keeping key order, and
/// pretty prints it with two space indentation.
///
/// # Errors
///
/// Returns an [`Err`] if `contents` is not a JSON object.
pub fn rewrite_manifest(contents: &[u8], project_name: &str) -> Result<String> {
    let mut manifest: Value = serde_json::from_slice(contents)?;

    let object = manifest
        .as_object_mut()
        .ok_or_else(|| anyhow!("Manifest is not a JSON object"))?;
    object.insert("name".to_string(), Value::String(project_name.to_string()));

    Ok(serde_json::to_string_pretty(&manifest)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(root: &Path, rel: &str, contents: &[u8]) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    fn sample() -> tempfile::TempDir {
        let tmp = tempfile::tempdir().unwrap();
        write(
            tmp.path(),
            "package.json",
            br#"{"name":"template","version":"0.1.0","private":true}"#,
        );
        write(tmp.path(), ".gitignore", b"node_modules\n");
        write(tmp.path(), ".env.local", b"DATABASE_URL=\n");
        write(tmp.path(), "src/app/page.tsx", b"export default function Page() {}\n");
        write(tmp.path(), "public/logo.bin", &[0, 159, 146, 150, 255]);
        write(
            tmp.path(),
            "packages/ui/package.json",
            br#"{"name":"ui"}"#,
        );
        tmp
    }

    #[test]
    fn lists_hidden_and_nested_files() {
        let tmp = sample();
        let template = Template::open(tmp.path()).unwrap();

        let files = template.files().unwrap();

        assert_eq!(
            files,
            [
                ".env.local",
                ".gitignore",
                "package.json",
                "packages/ui/package.json",
                "public/logo.bin",
                "src/app/page.tsx",
            ]
            .iter()
            .map(PathBuf::from)
            .collect::<Vec<_>>()
        );
    }

    #[test]
    fn copies_tree_and_renames_manifest() {
        let tmp = sample();
        let dest = tempfile::tempdir().unwrap();
        let template = Template::open(tmp.path()).unwrap();

        let report = template.copy_to(dest.path(), "demo").unwrap();

        assert_eq!(
            report,
            CopyReport {
                files: 6,
                manifest_rewritten: true
            }
        );

        for file in template.files().unwrap() {
            assert!(dest.path().join(&file).is_file(), "{} missing", file.display());
            if file != Path::new(MANIFEST) {
                assert_eq!(
                    fs::read(tmp.path().join(&file)).unwrap(),
                    fs::read(dest.path().join(&file)).unwrap()
                );
            }
        }

        let manifest: Value =
            serde_json::from_slice(&fs::read(dest.path().join(MANIFEST)).unwrap()).unwrap();
        assert_eq!(manifest["name"], "demo");
        assert_eq!(manifest["version"], "0.1.0");
    }

    #[test]
    fn nested_manifests_are_copied_verbatim() {
        let tmp = sample();
        let dest = tempfile::tempdir().unwrap();

        Template::open(tmp.path())
            .unwrap()
            .copy_to(dest.path(), "demo")
            .unwrap();

        assert_eq!(
            fs::read_to_string(dest.path().join("packages/ui/package.json")).unwrap(),
            r#"{"name":"ui"}"#
        );
    }

    #[test]
    fn manifest_keeps_key_order_and_indentation() {
        let out = rewrite_manifest(
            br#"{"version":"1.0.0","name":"old","scripts":{"dev":"next dev"}}"#,
            "fresh",
        )
        .unwrap();

        assert_eq!(
            out,
            "{\n  \"version\": \"1.0.0\",\n  \"name\": \"fresh\",\n  \"scripts\": {\n    \"dev\": \"next dev\"\n  }\n}"
        );
    }

    #[test]
    fn manifest_without_name_gains_one() {
        let out = rewrite_manifest(br#"{"private":true}"#, "fresh").unwrap();

        assert_eq!(out, "{\n  \"private\": true,\n  \"name\": \"fresh\"\n}");
    }

    #[test]
    fn invalid_manifest_aborts_copy() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "package.json", b"[1, 2]");
        let dest = tempfile::tempdir().unwrap();

        let err = Template::open(tmp.path())
            .unwrap()
            .copy_to(dest.path(), "demo")
            .unwrap_err();

        assert!(format!("{err:#}").contains("not a JSON object"));
        assert!(!dest.path().join(MANIFEST).exists());
    }

    #[test]
    fn missing_root_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();

        assert!(Template::open(&tmp.path().join("nope")).is_err());
    }
}
