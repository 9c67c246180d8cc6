//! Helper script provisioning.
//!
//! A script is written once, lazily, and never touched again: an existing
//! file at the target path is returned as-is so manual edits survive.

use std::io::Write;
use std::path::{Path, PathBuf};

use orgocr_core::{expand_home, OcrError};
use tokio::fs;
use tracing::{debug, info};

/// Make sure `target_dir/script_name` exists and is executable.
///
/// Returns the absolute path of the script. The directory is created with its
/// parents, the contents are staged in a uniquely named sibling temp file and
/// renamed into place, so concurrent first runs never share a staging file.
pub async fn ensure_script_installed(
    script_name: &str,
    target_dir: &Path,
    contents: &str,
) -> Result<PathBuf, OcrError> {
    let dir = expand_home(target_dir);
    let path = dir.join(script_name);

    let provision_err = |source: std::io::Error| OcrError::Provision {
        path: path.clone(),
        source,
    };

    if fs::try_exists(&path).await.map_err(provision_err)? {
        debug!(path = %path.display(), "Helper script already installed");
        return Ok(path);
    }

    fs::create_dir_all(&dir).await.map_err(provision_err)?;

    let staged_dir = dir.clone();
    let target = path.clone();
    let contents = contents.to_owned();
    tokio::task::spawn_blocking(move || stage_and_persist(&staged_dir, &target, &contents))
        .await
        .map_err(|e| provision_err(std::io::Error::other(e)))?
        .map_err(provision_err)?;

    info!(path = %path.display(), "Installed helper script");
    Ok(path)
}

/// Write `contents` to a fresh temp file in `dir`, make it executable and
/// rename it to `target`. The temp file is removed if any step fails.
fn stage_and_persist(dir: &Path, target: &Path, contents: &str) -> std::io::Result<()> {
    let mut staged = tempfile::Builder::new()
        .prefix(".orgocr-script-")
        .tempfile_in(dir)?;
    staged.write_all(contents.as_bytes())?;
    staged.as_file().sync_all()?;
    make_executable(staged.path())?;
    staged.persist(target).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(unix)]
fn make_executable(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> std::io::Result<()> {
    Ok(())
}
