//! Compressed tarball of an install directory.

use crate::bundler::error::{Error, ErrorExt, Result};
use flate2::{Compression, write::GzEncoder};
use std::{
    ffi::OsString,
    fs::File,
    io::{self, BufReader, Write},
    path::{Path, PathBuf},
};

/// `<base>` with `suffix` appended verbatim (no extension replacement).
fn with_suffix(base: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = base.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

/// Archives `install_dir` into `<output_base>.tar.gz`.
///
/// # Process
///
/// 1. Writes every top-level entry of `install_dir` into `<output_base>.tar`,
///    with paths relative to `install_dir`
/// 2. Compresses it into `<output_base>.tar.gz`, replacing any existing file
/// 3. Removes the intermediate `.tar`
///
/// Returns the path of the compressed archive.
pub async fn package_tarball(install_dir: &Path, output_base: &Path) -> Result<PathBuf> {
    let tar_path = with_suffix(output_base, ".tar");
    let gz_path = with_suffix(output_base, ".tar.gz");

    log::info!(
        "Archiving {} into {}",
        install_dir.display(),
        gz_path.display()
    );

    if let Some(parent) = output_base.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .fs_context("creating output directory", parent)?;
    }

    let install_dir = install_dir.to_path_buf();
    let tar_for_task = tar_path.clone();
    let gz_for_task = gz_path.clone();

    tokio::task::spawn_blocking(move || -> Result<()> {
        write_tar(&install_dir, &tar_for_task)?;
        gzip(&tar_for_task, &gz_for_task)
    })
    .await
    .map_err(|e| Error::GenericError(format!("Join error: {}", e)))??;

    tokio::fs::remove_file(&tar_path)
        .await
        .fs_context("removing intermediate tar", &tar_path)?;

    Ok(gz_path)
}

fn write_tar(install_dir: &Path, tar_path: &Path) -> Result<()> {
    let mut entries = std::fs::read_dir(install_dir)
        .fs_context("reading install directory", install_dir)?
        .collect::<io::Result<Vec<_>>>()
        .fs_context("reading install directory", install_dir)?;
    entries.sort_by_key(|e| e.file_name());

    let file = File::create(tar_path).fs_context("creating tar file", tar_path)?;
    let mut tar = tar::Builder::new(file);
    tar.follow_symlinks(false);

    for entry in entries {
        let path = entry.path();
        let name = entry.file_name();
        if entry.file_type()?.is_dir() {
            tar.append_dir_all(&name, &path)
                .fs_context("archiving directory", &path)?;
        } else {
            tar.append_path_with_name(&path, &name)
                .fs_context("archiving file", &path)?;
        }
    }

    let file = tar.into_inner().fs_context("finishing tar file", tar_path)?;
    file.sync_all().fs_context("flushing tar file", tar_path)?;
    Ok(())
}

fn gzip(src: &Path, dest: &Path) -> Result<()> {
    let input = File::open(src).fs_context("opening tar file", src)?;
    let output = File::create(dest).fs_context("creating tar.gz file", dest)?;

    let mut encoder = GzEncoder::new(output, Compression::default());
    io::copy(&mut BufReader::new(input), &mut encoder).fs_context("compressing tar file", dest)?;
    let mut finished = encoder.finish().fs_context("compressing tar file", dest)?;
    finished.flush().fs_context("flushing tar.gz file", dest)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffix_is_appended_not_substituted() {
        assert_eq!(
            with_suffix(Path::new("/b/My.Game"), ".tar.gz"),
            Path::new("/b/My.Game.tar.gz")
        );
    }

    #[tokio::test]
    async fn missing_install_dir_fails_without_artifact() {
        let tmp = tempfile::tempdir().unwrap();
        let base = tmp.path().join("Demo");
        let err = package_tarball(&tmp.path().join("install"), &base)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Fs { .. }));
        assert!(!tmp.path().join("Demo.tar.gz").exists());
    }
}
