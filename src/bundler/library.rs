//! Library registry consulted when populating a bundle's `Frameworks/`.
//!
//! The registry maps library names (as listed by [`BuildState::lib_list`])
//! to a [`LibraryDescriptor`]. Only descriptors of kind
//! [`LibraryKind::Framework`] with `deploy` set are copied into bundles.
//!
//! [`BuildState::lib_list`]: crate::bundler::BuildState::lib_list

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How a library is linked.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LibraryKind {
    /// Static archive linked into the binary.
    Static,
    /// Shared object resolved at runtime.
    Dynamic,
    /// macOS framework bundle.
    Framework,
}

/// Metadata for one library known to the build.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct LibraryDescriptor {
    /// Name as it appears in the build's library list.
    pub name: String,
    /// Linkage kind.
    #[serde(rename = "type")]
    pub kind: LibraryKind,
    /// Whether the library ships inside deployed bundles.
    #[serde(default)]
    pub deploy: bool,
    /// Framework directory name, without the `.framework` extension.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_framework: Option<String>,
}

impl LibraryDescriptor {
    /// Creates a descriptor that is not deployed.
    pub fn new(name: impl Into<String>, kind: LibraryKind) -> Self {
        Self {
            name: name.into(),
            kind,
            deploy: false,
            release_framework: None,
        }
    }

    /// Creates a deployable framework shipped as `<framework>.framework`.
    pub fn framework(name: impl Into<String>, framework: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: LibraryKind::Framework,
            deploy: true,
            release_framework: Some(framework.into()),
        }
    }

    /// Whether this library must be copied into a bundle.
    pub fn is_deployable_framework(&self) -> bool {
        self.kind == LibraryKind::Framework && self.deploy
    }

    /// Framework directory name (`<release_framework>.framework`).
    ///
    /// Falls back to the library name when no release framework is recorded.
    pub fn framework_dir_name(&self) -> String {
        format!(
            "{}.framework",
            self.release_framework.as_deref().unwrap_or(&self.name)
        )
    }
}

/// Read-only name to descriptor table.
#[derive(Clone, Debug, Default)]
pub struct LibraryRegistry {
    entries: HashMap<String, LibraryDescriptor>,
}

impl LibraryRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with the libraries common to native desktop projects.
    ///
    /// Operating-system frameworks are registered but never deployed; SDL
    /// is the one framework that ships with applications.
    pub fn builtin() -> Self {
        use LibraryKind::*;

        let mut registry = Self::new();
        for name in [
            "OpenGL",
            "Cocoa",
            "Carbon",
            "AppKit",
            "CoreFoundation",
            "IOKit",
        ] {
            registry.insert(LibraryDescriptor {
                name: name.to_string(),
                kind: Framework,
                deploy: false,
                release_framework: Some(name.to_string()),
            });
        }
        registry.insert(LibraryDescriptor::framework("SDL", "SDL"));
        for name in ["G3D", "GLG3D", "zlib", "png", "jpeg", "zip"] {
            registry.insert(LibraryDescriptor::new(name, Static));
        }
        for name in ["pthread", "GL", "GLU", "X11"] {
            registry.insert(LibraryDescriptor::new(name, Dynamic));
        }
        registry
    }

    /// Adds or replaces a descriptor.
    pub fn insert(&mut self, descriptor: LibraryDescriptor) {
        self.entries.insert(descriptor.name.clone(), descriptor);
    }

    /// Adds or replaces several descriptors.
    pub fn extend(&mut self, descriptors: impl IntoIterator<Item = LibraryDescriptor>) {
        for descriptor in descriptors {
            self.insert(descriptor);
        }
    }

    /// Looks up a library by name.
    pub fn get(&self, name: &str) -> Option<&LibraryDescriptor> {
        self.entries.get(name)
    }

    /// Number of registered libraries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Deployable frameworks among `names`, in the order given.
    ///
    /// Unregistered names, non-frameworks, and frameworks not marked for
    /// deployment are skipped.
    pub fn deployable_frameworks<'a>(
        &'a self,
        names: &'a [String],
    ) -> impl Iterator<Item = &'a LibraryDescriptor> + 'a {
        names.iter().filter_map(move |name| match self.get(name) {
            Some(lib) if lib.is_deployable_framework() => Some(lib),
            Some(lib) => {
                log::debug!("Skipping {} ({:?}, deploy = {})", name, lib.kind, lib.deploy);
                None
            }
            None => {
                log::debug!("Skipping {}: not in library registry", name);
                None
            }
        })
    }
}
