//! macOS DMG disk image creator.
//!
//! Wraps a staging directory in a compressed, HFS+-formatted disk image using
//! the native `hdiutil` tool.

use crate::bundler::{
    error::Result,
    utils::{
        fs,
        shell::{CommandRunner, ShellCommand},
    },
};
use std::path::Path;

/// Builds the `hdiutil create` invocation for `source_dir`.
///
/// - `-fs HFS+`: volume filesystem
/// - `-format UDZO`: compressed read-only (zlib)
/// - `-ov`: overwrite an existing image
pub fn hdiutil_create(source_dir: &Path, output_path: &Path, volume_name: &str) -> ShellCommand {
    ShellCommand::new("hdiutil")
        .args(["create", "-fs", "HFS+", "-format", "UDZO", "-ov", "-srcfolder"])
        .path_arg(source_dir)
        .arg("-volname")
        .arg(volume_name)
        .path_arg(output_path)
}

/// Packages `source_dir` as a disk image at `output_path` labeled `volume_name`.
///
/// Runs a single blocking `hdiutil` command. On success the image exists;
/// on failure nothing at `output_path` should be considered usable.
pub async fn package_disk_image<R: CommandRunner>(
    runner: &R,
    source_dir: &Path,
    output_path: &Path,
    volume_name: &str,
) -> Result<()> {
    log::info!("Creating DMG {} from {}", output_path.display(), source_dir.display());

    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent, false).await?;
    }

    runner
        .run(&hdiutil_create(source_dir, output_path, volume_name))
        .await?;

    if !output_path.is_file() {
        crate::bail!(
            "hdiutil reported success but {} was not created",
            output_path.display()
        );
    }

    log::info!("✓ Created DMG: {}", output_path.display());
    Ok(())
}
