//! Project description loaded from `deploy.toml`.
//!
//! ```toml
//! [project]
//! name = "Starfield"
//! binary = "starfield"          # default: lowercase name
//! type = "executable"           # or static-library, dynamic-library
//! libraries = ["G3D", "SDL", "OpenGL"]
//!
//! [paths]                       # all optional, relative to the project root
//! build = "build"
//! install = "build/install"
//! frameworks = "/Library/Frameworks"
//!
//! [[library]]                   # extends or overrides the built-in table
//! name = "Ogg"
//! type = "framework"
//! deploy = true
//! ```

use crate::bundler::{BinaryType, BuildState, BuildStateBuilder, LibraryDescriptor, LibraryRegistry};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name looked up in the project directory.
pub const CONFIG_FILE: &str = "deploy.toml";

/// Parsed `deploy.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// `[project]`
    pub project: ProjectSection,

    /// `[paths]`
    #[serde(default, skip_serializing_if = "PathsSection::is_empty")]
    pub paths: PathsSection,

    /// `[[library]]`
    #[serde(default, rename = "library", skip_serializing_if = "Vec::is_empty")]
    pub libraries: Vec<LibraryDescriptor>,
}

/// `[project]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectSection {
    /// Human-facing project name
    pub name: String,

    /// Executable file name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binary: Option<String>,

    /// Target kind
    #[serde(default, rename = "type")]
    pub binary_type: BinaryType,

    /// Libraries the build links against
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub libraries: Vec<String>,
}

/// `[paths]` table. Relative entries resolve against the project root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PathsSection {
    /// Artifact directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build: Option<PathBuf>,

    /// Directory holding the built binary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binary: Option<PathBuf>,

    /// Install tree archived on Unix
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub install: Option<PathBuf>,

    /// Scratch directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temp: Option<PathBuf>,

    /// Where deployable frameworks are copied from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frameworks: Option<PathBuf>,
}

impl PathsSection {
    fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

impl ProjectConfig {
    /// Minimal configuration for a new project.
    pub fn new(name: impl Into<String>, binary_type: BinaryType) -> Self {
        Self {
            project: ProjectSection {
                name: name.into(),
                binary: None,
                binary_type,
                libraries: Vec::new(),
            },
            paths: PathsSection::default(),
            libraries: Vec::new(),
        }
    }

    /// Reads and validates the configuration at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        log::debug!("Loading project configuration from {}", path.display());

        let content = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        Self::parse(&content, path)
    }

    /// Parses and validates `content`; `path` is only used in errors.
    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the packagers cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.project.name.trim().is_empty() {
            return Err(ConfigError::Invalid {
                reason: "project name must not be empty".to_string(),
            });
        }
        if self.project.name.contains(['/', '\\']) {
            return Err(ConfigError::Invalid {
                reason: format!(
                    "project name '{}' must not contain path separators",
                    self.project.name
                ),
            });
        }
        if let Some(binary) = &self.project.binary
            && binary.trim().is_empty()
        {
            return Err(ConfigError::Invalid {
                reason: "binary name must not be empty".to_string(),
            });
        }
        if let Some(lib) = self.libraries.iter().find(|l| l.name.trim().is_empty()) {
            return Err(ConfigError::Invalid {
                reason: format!("[[library]] entry of type {:?} has no name", lib.kind),
            });
        }
        Ok(())
    }

    /// Build description rooted at `root`.
    pub fn build_state(&self, root: &Path) -> BuildState {
        let mut builder = BuildStateBuilder::new(&self.project.name)
            .root_dir(root)
            .binary_type(self.project.binary_type)
            .libraries(self.project.libraries.clone());

        if let Some(binary) = &self.project.binary {
            builder = builder.binary_name(binary);
        }
        if let Some(dir) = &self.paths.build {
            builder = builder.build_dir(dir);
        }
        if let Some(dir) = &self.paths.binary {
            builder = builder.binary_dir(dir);
        }
        if let Some(dir) = &self.paths.install {
            builder = builder.install_dir(dir);
        }
        if let Some(dir) = &self.paths.temp {
            builder = builder.temp_dir(dir);
        }
        if let Some(dir) = &self.paths.frameworks {
            builder = builder.frameworks_dir(dir);
        }

        builder.build()
    }

    /// Built-in library table with this project's `[[library]]` entries applied.
    pub fn registry(&self) -> LibraryRegistry {
        let mut registry = LibraryRegistry::builtin();
        registry.extend(self.libraries.iter().cloned());
        registry
    }

    /// Serializes back to `deploy.toml` text.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(self)
    }
}

/// `<project_dir>/deploy.toml`, unless `explicit` names another file.
///
/// A relative `explicit` path is taken relative to `project_dir`.
pub fn config_path(project_dir: &Path, explicit: Option<&Path>) -> PathBuf {
    match explicit {
        Some(path) if path.is_absolute() => path.to_path_buf(),
        Some(path) => project_dir.join(path),
        None => project_dir.join(CONFIG_FILE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::LibraryKind;

    const FULL: &str = r#"
[project]
name = "Starfield"
binary = "starfield-bin"
type = "executable"
libraries = ["G3D", "SDL", "Ogg"]

[paths]
build = "out"
frameworks = "vendor/Frameworks"

[[library]]
name = "Ogg"
type = "framework"
deploy = true
release_framework = "Ogg"
"#;

    #[test]
    fn full_config_maps_onto_build_state() {
        let config = ProjectConfig::parse(FULL, Path::new("deploy.toml")).unwrap();
        let state = config.build_state(Path::new("/p"));

        assert_eq!(state.project_name(), "Starfield");
        assert_eq!(state.binary_name(), "starfield-bin");
        assert_eq!(state.build_dir(), Path::new("/p/out"));
        assert_eq!(state.install_dir(), Path::new("/p/out/install"));
        assert_eq!(state.frameworks_dir(), Path::new("/p/vendor/Frameworks"));
        assert_eq!(state.lib_list(), ["G3D", "SDL", "Ogg"]);
    }

    #[test]
    fn library_entries_extend_builtin_table() {
        let config = ProjectConfig::parse(FULL, Path::new("deploy.toml")).unwrap();
        let registry = config.registry();

        let ogg = registry.get("Ogg").unwrap();
        assert_eq!(ogg.kind, LibraryKind::Framework);
        assert!(ogg.deploy);
        assert!(registry.get("SDL").is_some());
    }

    #[test]
    fn minimal_config_uses_defaults() {
        let config =
            ProjectConfig::parse("[project]\nname = \"Demo\"\n", Path::new("deploy.toml")).unwrap();
        let state = config.build_state(Path::new("/p"));

        assert_eq!(state.binary_name(), "demo");
        assert_eq!(state.binary_type(), BinaryType::Executable);
        assert_eq!(state.binary_dir(), Path::new("/p/build"));
        assert!(state.lib_list().is_empty());
    }

    #[test]
    fn unknown_type_is_a_parse_error() {
        let err = ProjectConfig::parse(
            "[project]\nname = \"Demo\"\ntype = \"plugin\"\n",
            Path::new("deploy.toml"),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn blank_name_is_rejected() {
        let err = ProjectConfig::parse("[project]\nname = \"  \"\n", Path::new("deploy.toml"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn written_config_parses_back() {
        let config = ProjectConfig::new("Widgets", BinaryType::StaticLibrary);
        let text = config.to_toml_string().unwrap();

        assert!(text.contains("type = \"static-library\""));
        assert!(!text.contains("[paths]"));
        assert_eq!(ProjectConfig::parse(&text, Path::new("x")).unwrap(), config);
    }

    #[test]
    fn missing_file_is_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let err = ProjectConfig::load(&tmp.path().join(CONFIG_FILE)).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { .. }));
    }

    #[test]
    fn explicit_config_path_is_relative_to_project() {
        let dir = Path::new("/p");
        assert_eq!(config_path(dir, None), Path::new("/p/deploy.toml"));
        assert_eq!(
            config_path(dir, Some(Path::new("ci/deploy.toml"))),
            Path::new("/p/ci/deploy.toml")
        );
        assert_eq!(
            config_path(dir, Some(Path::new("/etc/deploy.toml"))),
            Path::new("/etc/deploy.toml")
        );
    }
}
