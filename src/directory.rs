use anyhow::{anyhow, Context, Result};
use std::path::Path;

use crate::{
    config::CometDirs,
    prompt::{confirm_overwrite, Answer, Prompter},
    scaffold::ProjectOptions,
    trace,
};

/// Whether `path` is a directory without a single entry, hidden ones included.
///
/// # Errors
///
/// Returns an [`Err`] if the directory can not be read.
pub fn is_empty_dir(path: &Path) -> Result<bool> {
    Ok(path
        .read_dir()
        .with_context(|| format!("Failed to read directory {}", path.display()))?
        .next()
        .is_none())
}

/// Makes `path` an empty directory, removing whatever was there.
///
/// # Errors
///
/// Returns an [`Err`] if the old contents can not be removed or the
/// directory can not be recreated.
pub fn empty_dir(path: &Path) -> Result<()> {
    if path.symlink_metadata().is_ok() {
        CometDirs::remove_path(path)?;
    }

    ensure_dir(path)
}

/// Creates `path` and its parents; existing directories are left alone.
///
/// # Errors
///
/// Returns an [`Err`] on any IO error, including `path` being a file.
pub fn ensure_dir(path: &Path) -> Result<()> {
    fs_extra::dir::create_all(path, false)
        .map_err(|e| anyhow!("{e}"))
        .with_context(|| format!("Failed to create directory {}", path.display()))
}

/// Gets the target directory ready for the template.
///
/// An existing empty directory is reused as is. Anything else already at
/// `path` is wiped, after confirmation unless prompts are skipped; declining
/// leaves it untouched and yields [`Answer::Cancelled`].
///
/// # Errors
///
/// Returns an [`Err`] if the prompt fails or any IO error occurs.
pub fn prepare_directory(
    path: &Path,
    project_name: &str,
    options: &ProjectOptions,
    prompter: &mut dyn Prompter,
) -> Result<Answer<()>> {
    let occupied = match (path.metadata(), path.symlink_metadata()) {
        (Ok(meta), _) if meta.is_dir() => !is_empty_dir(path)?,
        (_, Err(_)) => false,
        _ => true,
    };

    if occupied {
        trace!("{} exists and is not empty", path.display());

        if confirm_overwrite(project_name, options, prompter)?.is_cancelled() {
            return Ok(Answer::Cancelled);
        }

        empty_dir(path)?;
    }

    ensure_dir(path)?;

    Ok(Answer::Confirmed(()))
}
