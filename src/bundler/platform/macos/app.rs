//! macOS application bundle (.app) creation.

use super::plist;
use crate::{
    bundler::{
        error::{Context, Error, Result},
        library::LibraryRegistry,
        settings::BuildState,
        utils::fs,
    },
    cli::OutputManager,
};
use std::path::{Path, PathBuf};

/// Paths inside an application bundle.
///
/// ```
/// use appdeploy::bundler::BundleLayout;
///
/// let layout = BundleLayout::new("/tmp/deploy/Demo.app");
/// assert!(layout.macos.ends_with("Demo.app/Contents/MacOS"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BundleLayout {
    /// `<Name>.app`
    pub root: PathBuf,
    /// `Contents/`
    pub contents: PathBuf,
    /// `Contents/Frameworks/`
    pub frameworks: PathBuf,
    /// `Contents/Resources/`
    pub resources: PathBuf,
    /// `Contents/MacOS/`
    pub macos: PathBuf,
}

impl BundleLayout {
    /// Describes the bundle rooted at `bundle_dir`.
    pub fn new(bundle_dir: impl Into<PathBuf>) -> Self {
        let root = bundle_dir.into();
        let contents = root.join("Contents");
        Self {
            frameworks: contents.join("Frameworks"),
            resources: contents.join("Resources"),
            macos: contents.join("MacOS"),
            contents,
            root,
        }
    }

    /// `Contents/Info.plist`
    pub fn info_plist(&self) -> PathBuf {
        self.contents.join("Info.plist")
    }

    /// `Contents/PkgInfo`
    pub fn pkg_info(&self) -> PathBuf {
        self.contents.join("PkgInfo")
    }

    /// Directories in creation order, parents first.
    pub fn directories(&self) -> [&Path; 5] {
        [
            &self.root,
            &self.contents,
            &self.frameworks,
            &self.resources,
            &self.macos,
        ]
    }
}

/// Builds the application bundle at `bundle_dir`.
///
/// # Process
///
/// 1. Creates the bundle skeleton (`Contents/{Frameworks,Resources,MacOS}`)
/// 2. Writes `Info.plist` and `PkgInfo`
/// 3. Copies the binary from `src_dir` into `Contents/MacOS/`
/// 4. Synchronizes `data-files/` into `Contents/Resources/`
/// 5. Synchronizes every deployable framework into `Contents/Frameworks/`
///
/// Each step needs the directories made by the first, so any failure stops
/// the build and leaves whatever was already written in place.
pub async fn build_bundle(
    temp_dir: &Path,
    bundle_dir: &Path,
    src_dir: &Path,
    state: &BuildState,
    registry: &LibraryRegistry,
    output: &OutputManager,
) -> Result<BundleLayout> {
    // Validate before touching the filesystem.
    let info_plist = plist::render_info_plist(state.project_name())?;
    let pkg_info = plist::render_pkg_info(state.binary_name())?;

    log::info!(
        "Bundling {} at {} (staging in {})",
        state.project_name(),
        bundle_dir.display(),
        temp_dir.display()
    );

    let layout = BundleLayout::new(bundle_dir);
    for dir in layout.directories() {
        fs::create_dir_all(dir, false).await?;
        output.verbose(&format!("mkdir {}", dir.display()));
    }

    output.section("Writing Info.plist and PkgInfo");
    fs::write_file(&layout.info_plist(), info_plist).await?;
    fs::write_file(&layout.pkg_info(), pkg_info).await?;

    output.section("Copying executable");
    copy_binary(&layout, src_dir, state.binary_name()).await?;

    output.section("Copying data files");
    copy_data_files(&layout, &state.data_files_dir(), output).await?;

    copy_frameworks(&layout, state, registry, output).await?;

    Ok(layout)
}

async fn copy_binary(layout: &BundleLayout, src_dir: &Path, binary_name: &str) -> Result<()> {
    let src = src_dir.join(binary_name);
    let dst = layout.macos.join(binary_name);

    fs::copy_file(&src, &dst)
        .await
        .with_context(|| format!("failed to copy {} to .app bundle", binary_name))?;
    fs::set_executable(&dst).await
}

async fn copy_data_files(
    layout: &BundleLayout,
    data_dir: &Path,
    output: &OutputManager,
) -> Result<()> {
    if !data_dir.is_dir() {
        log::debug!("No data files at {}", data_dir.display());
        return Ok(());
    }

    let copied = fs::copy_if_newer(data_dir, &layout.resources)
        .await
        .context("failed to copy data files")?;
    report_copies(&copied, output);
    output.verbose("Done copying data files");
    Ok(())
}

async fn copy_frameworks(
    layout: &BundleLayout,
    state: &BuildState,
    registry: &LibraryRegistry,
    output: &OutputManager,
) -> Result<()> {
    for lib in registry.deployable_frameworks(state.lib_list()) {
        output.println(&format!("Copying {} Framework", lib.name));

        let dir_name = lib.framework_dir_name();
        let src = state.frameworks_dir().join(&dir_name);
        if !src.exists() {
            return Err(Error::FrameworkNotFound {
                name: lib.name.clone(),
                path: src,
            });
        }

        let copied = fs::copy_if_newer(&src, &layout.frameworks.join(&dir_name))
            .await
            .with_context(|| format!("failed to copy framework {}", lib.name))?;
        report_copies(&copied, output);
    }
    Ok(())
}

fn report_copies(copied: &[PathBuf], output: &OutputManager) {
    for path in copied {
        output.verbose(&format!("copied {}", path.display()));
    }
    if !output.is_verbose() && !copied.is_empty() {
        output.indent(&format!("{} file(s) updated", copied.len()));
    }
}
