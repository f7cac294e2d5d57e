//! Platform-specific packaging implementations.
//!
//! | Host | Artifact | Module |
//! |------|----------|--------|
//! | macOS | `.app` bundle wrapped in a `.dmg` | [`macos`] |
//! | other Unix | `.tar.gz` of the install tree | [`unix`] |
//!
//! The host is identified once as a [`Platform`] value and handed to the
//! [`Deployer`](crate::bundler::Deployer), so both branches can be driven
//! from any host in tests.

pub mod macos;
pub mod unix;

use std::fmt;

/// Host operating system family, as far as packaging is concerned.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Platform {
    /// macOS: bundles and disk images.
    MacOs,
    /// Any other Unix-like system: compressed tarballs.
    Unix,
}

impl Platform {
    /// Identifies the platform this process is running on.
    pub fn current() -> Self {
        Self::from_os_name(std::env::consts::OS)
    }

    /// Maps an OS name as reported by `std::env::consts::OS` (or `uname -s`).
    pub fn from_os_name(os: &str) -> Self {
        if os.eq_ignore_ascii_case("macos") || os.eq_ignore_ascii_case("darwin") {
            Platform::MacOs
        } else {
            Platform::Unix
        }
    }

    /// The single artifact kind this platform produces.
    pub fn package_type(&self) -> PackageType {
        match self {
            Platform::MacOs => PackageType::Dmg,
            Platform::Unix => PackageType::TarGz,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::MacOs => write!(f, "macOS"),
            Platform::Unix => write!(f, "Unix"),
        }
    }
}

/// Distributable artifact formats.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum PackageType {
    /// Compressed HFS+ disk image containing an application bundle.
    Dmg,
    /// Gzip-compressed tar archive of the install directory.
    TarGz,
}

impl PackageType {
    /// Short name used in CLI output.
    pub fn short_name(&self) -> &'static str {
        match self {
            PackageType::Dmg => "dmg",
            PackageType::TarGz => "tar.gz",
        }
    }

    /// File extension of the artifact, without the leading dot.
    pub fn extension(&self) -> &'static str {
        self.short_name()
    }
}

impl fmt::Display for PackageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn darwin_and_macos_map_to_macos() {
        assert_eq!(Platform::from_os_name("Darwin"), Platform::MacOs);
        assert_eq!(Platform::from_os_name("macos"), Platform::MacOs);
        assert_eq!(Platform::from_os_name("linux"), Platform::Unix);
        assert_eq!(Platform::from_os_name("freebsd"), Platform::Unix);
    }

    #[test]
    fn current_matches_build_target() {
        let expected = if cfg!(target_os = "macos") {
            Platform::MacOs
        } else {
            Platform::Unix
        };
        assert_eq!(Platform::current(), expected);
    }

    #[test]
    fn package_type_follows_platform() {
        assert_eq!(Platform::MacOs.package_type(), PackageType::Dmg);
        assert_eq!(Platform::Unix.package_type().extension(), "tar.gz");
    }
}
