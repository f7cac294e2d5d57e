//! Build description consumed by the packagers and the scaffolder.
//!
//! A [`BuildState`] is produced by the build step (or loaded from
//! `deploy.toml`) and stays read-only while a deployment runs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Directory, relative to the project root, whose contents become bundle resources.
pub const DATA_FILES_DIR: &str = "data-files";

/// Default location of system-installed frameworks.
pub const SYSTEM_FRAMEWORKS_DIR: &str = "/Library/Frameworks";

/// Kind of artifact the build produces.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BinaryType {
    /// A runnable program.
    #[default]
    Executable,
    /// A static library archive.
    StaticLibrary,
    /// A shared library.
    DynamicLibrary,
}

impl BinaryType {
    /// Whether this target is a library of either flavor.
    pub fn is_library(&self) -> bool {
        matches!(self, BinaryType::StaticLibrary | BinaryType::DynamicLibrary)
    }

    /// Short name used in `deploy.toml` and CLI output.
    pub fn short_name(&self) -> &'static str {
        match self {
            BinaryType::Executable => "executable",
            BinaryType::StaticLibrary => "static-library",
            BinaryType::DynamicLibrary => "dynamic-library",
        }
    }
}

impl fmt::Display for BinaryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

/// Authoritative description of one build to package.
///
/// Construct with [`BuildStateBuilder`].
#[derive(Clone, Debug)]
pub struct BuildState {
    project_name: String,
    binary_name: String,
    binary_type: BinaryType,

    /// Project root; `data-files/` lives here.
    root_dir: PathBuf,

    /// Where the compiled binary sits.
    binary_dir: PathBuf,

    /// Where final artifacts are written.
    build_dir: PathBuf,

    /// Populated install tree archived on non-macOS hosts.
    install_dir: PathBuf,

    /// Scratch space; `deploy/` beneath it is recreated on every run.
    temp_dir: PathBuf,

    /// Where deployable frameworks are read from.
    frameworks_dir: PathBuf,

    libraries: Vec<String>,
}

impl BuildState {
    /// Human-readable project name; also the bundle and volume name.
    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    /// Filename of the compiled executable.
    pub fn binary_name(&self) -> &str {
        &self.binary_name
    }

    /// Library or executable target.
    pub fn binary_type(&self) -> BinaryType {
        self.binary_type
    }

    /// Project root directory.
    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// Directory holding the compiled binary.
    pub fn binary_dir(&self) -> &Path {
        &self.binary_dir
    }

    /// Directory receiving deployable archives.
    pub fn build_dir(&self) -> &Path {
        &self.build_dir
    }

    /// Install tree archived on non-macOS hosts.
    pub fn install_dir(&self) -> &Path {
        &self.install_dir
    }

    /// Scratch directory.
    pub fn temp_dir(&self) -> &Path {
        &self.temp_dir
    }

    /// Source directory for deployable frameworks.
    pub fn frameworks_dir(&self) -> &Path {
        &self.frameworks_dir
    }

    /// Data files copied into bundle resources.
    pub fn data_files_dir(&self) -> PathBuf {
        self.root_dir.join(DATA_FILES_DIR)
    }

    /// Library names referenced by the build, in declaration order.
    pub fn lib_list(&self) -> &[String] {
        &self.libraries
    }
}

/// Builder for constructing [`BuildState`].
///
/// Directories default relative to the project root: `build/` for artifacts
/// and the binary, `build/install/` for the install tree and `build/tmp/`
/// for scratch space.
///
/// ```
/// use appdeploy::bundler::BuildStateBuilder;
///
/// let state = BuildStateBuilder::new("Demo")
///     .root_dir("/work/demo")
///     .libraries(vec!["SDL".into(), "OpenGL".into()])
///     .build();
///
/// assert_eq!(state.binary_name(), "demo");
/// assert_eq!(state.build_dir(), std::path::Path::new("/work/demo/build"));
/// ```
#[derive(Debug, Default)]
pub struct BuildStateBuilder {
    project_name: String,
    binary_name: Option<String>,
    binary_type: BinaryType,
    root_dir: Option<PathBuf>,
    binary_dir: Option<PathBuf>,
    build_dir: Option<PathBuf>,
    install_dir: Option<PathBuf>,
    temp_dir: Option<PathBuf>,
    frameworks_dir: Option<PathBuf>,
    libraries: Vec<String>,
}

impl BuildStateBuilder {
    /// Starts a builder for `project_name`.
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            ..Default::default()
        }
    }

    /// Sets the executable filename. Default: lowercase project name.
    pub fn binary_name(mut self, name: impl Into<String>) -> Self {
        self.binary_name = Some(name.into());
        self
    }

    /// Sets the target kind. Default: [`BinaryType::Executable`].
    pub fn binary_type(mut self, binary_type: BinaryType) -> Self {
        self.binary_type = binary_type;
        self
    }

    /// Sets the project root. Default: current directory.
    pub fn root_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.root_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the directory holding the binary. Default: the build directory.
    pub fn binary_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.binary_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the artifact directory. Default: `<root>/build`.
    pub fn build_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.build_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the install tree. Default: `<build>/install`.
    pub fn install_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.install_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the scratch directory. Default: `<build>/tmp`.
    pub fn temp_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.temp_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the framework source directory. Default: `/Library/Frameworks`.
    pub fn frameworks_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.frameworks_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the referenced library names.
    pub fn libraries(mut self, libraries: Vec<String>) -> Self {
        self.libraries = libraries;
        self
    }

    /// Builds the state, filling in defaults.
    ///
    /// Relative directories are resolved against the project root.
    pub fn build(self) -> BuildState {
        let root_dir = self.root_dir.unwrap_or_else(|| PathBuf::from("."));
        let under_root = |p: PathBuf| if p.is_absolute() { p } else { root_dir.join(p) };

        let build_dir = under_root(self.build_dir.unwrap_or_else(|| PathBuf::from("build")));
        let binary_dir = self
            .binary_dir
            .map(&under_root)
            .unwrap_or_else(|| build_dir.clone());
        let install_dir = self
            .install_dir
            .map(&under_root)
            .unwrap_or_else(|| build_dir.join("install"));
        let temp_dir = self
            .temp_dir
            .map(&under_root)
            .unwrap_or_else(|| build_dir.join("tmp"));
        let frameworks_dir = self
            .frameworks_dir
            .map(&under_root)
            .unwrap_or_else(|| PathBuf::from(SYSTEM_FRAMEWORKS_DIR));
        let binary_name = self
            .binary_name
            .unwrap_or_else(|| self.project_name.to_lowercase());

        BuildState {
            project_name: self.project_name,
            binary_name,
            binary_type: self.binary_type,
            binary_dir,
            build_dir,
            install_dir,
            temp_dir,
            frameworks_dir,
            libraries: self.libraries,
            root_dir,
        }
    }
}
