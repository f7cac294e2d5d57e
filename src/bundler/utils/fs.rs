//! File system utilities for bundling and scaffolding.
//!
//! Provides directory creation, file writes, and the copy-if-newer
//! synchronization used to populate bundles. Every I/O failure is reported
//! with the path that caused it.

use crate::bundler::error::{Error, ErrorExt, Result};
use std::{
    io,
    path::{Path, PathBuf},
    time::SystemTime,
};
use tokio::fs;

/// Creates all of the directories of the specified path, erasing it first if specified.
///
/// Succeeds without changes when the directory already exists and `erase` is false.
pub async fn create_dir_all(path: &Path, erase: bool) -> Result<()> {
    if erase {
        remove_dir_all(path).await?;
    }
    fs::create_dir_all(path)
        .await
        .fs_context("creating directory", path)
}

/// Removes the directory and its contents if it exists.
pub async fn remove_dir_all(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_dir_all(path)
            .await
            .fs_context("removing directory", path)
    } else {
        Ok(())
    }
}

/// Writes `contents` to `path`, replacing any existing file.
///
/// The parent directory must already exist.
pub async fn write_file(path: &Path, contents: impl AsRef<[u8]>) -> Result<()> {
    fs::write(path, contents)
        .await
        .fs_context("writing file", path)
}

/// Copies a regular file from one path to another, creating any parent
/// directories of the destination path as necessary.
///
/// Fails if the source path is a directory or doesn't exist.
pub async fn copy_file(from: &Path, to: &Path) -> Result<()> {
    if !from.exists() {
        return Err(Error::Fs {
            context: "copying file",
            path: from.to_path_buf(),
            error: io::Error::new(io::ErrorKind::NotFound, "source does not exist"),
        });
    }
    if !from.is_file() {
        return Err(Error::GenericError(format!("{from:?} is not a file")));
    }
    if let Some(dest_dir) = to.parent() {
        fs::create_dir_all(dest_dir)
            .await
            .fs_context("creating directory", dest_dir)?;
    }
    fs::copy(from, to).await.fs_context("copying file", from)?;
    Ok(())
}

/// Marks a file as executable (0o755) on Unix. No-op elsewhere.
pub async fn set_executable(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
            .await
            .fs_context("setting executable permissions", path)?;
    }
    #[cfg(not(unix))]
    let _ = path;
    Ok(())
}

/// Synchronizes `from` into `to`, copying only entries whose destination is
/// missing or older than the source.
///
/// `from` may be a single file (then `to` names the destination file) or a
/// directory tree (then `to` names the destination directory). Symlinks are
/// recreated rather than followed. Returns the destination paths that were
/// written, in traversal order, so callers can report them.
///
/// Fails if `from` does not exist.
pub async fn copy_if_newer(from: &Path, to: &Path) -> Result<Vec<PathBuf>> {
    let source_meta = fs::metadata(from)
        .await
        .fs_context("reading metadata", from)?;

    let mut copied = Vec::new();

    if !source_meta.is_dir() {
        if sync_entry(from, to, &source_meta).await? {
            copied.push(to.to_path_buf());
        }
        return Ok(copied);
    }

    for entry in walkdir::WalkDir::new(from).follow_links(false) {
        let entry = entry?;
        let rel_path = entry.path().strip_prefix(from)?;
        let dest_path = to.join(rel_path);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&dest_path)
                .await
                .fs_context("creating directory", &dest_path)?;
            continue;
        }

        let meta = entry.metadata()?;
        if sync_entry(entry.path(), &dest_path, &meta).await? {
            copied.push(dest_path);
        }
    }

    Ok(copied)
}

/// Copies a single non-directory entry if the destination is stale.
///
/// Returns whether anything was written.
async fn sync_entry(src: &Path, dest: &Path, src_meta: &std::fs::Metadata) -> Result<bool> {
    if src_meta.file_type().is_symlink() {
        if fs::symlink_metadata(dest).await.is_ok() {
            return Ok(false);
        }
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)
                .await
                .fs_context("creating directory", parent)?;
        }
        let target = fs::read_link(src).await.fs_context("reading symlink", src)?;
        symlink(&target, dest).fs_context("creating symlink", dest)?;
        return Ok(true);
    }

    if !is_stale(dest, modified(src_meta)).await {
        return Ok(false);
    }

    copy_file(src, dest).await?;
    Ok(true)
}

/// A destination is stale when it is missing or strictly older than the source.
async fn is_stale(dest: &Path, source_time: Option<SystemTime>) -> bool {
    let Ok(dest_meta) = fs::metadata(dest).await else {
        return true;
    };
    match (source_time, modified(&dest_meta)) {
        (Some(src), Some(dst)) => dst < src,
        _ => true,
    }
}

fn modified(meta: &std::fs::Metadata) -> Option<SystemTime> {
    meta.modified().ok()
}

#[cfg(unix)]
fn symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn symlink(target: &Path, link: &Path) -> io::Result<()> {
    if target.is_dir() {
        std::os::windows::fs::symlink_dir(target, link)
    } else {
        std::os::windows::fs::symlink_file(target, link)
    }
}
