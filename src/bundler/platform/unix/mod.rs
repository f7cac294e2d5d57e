//! Packaging for Unix hosts other than macOS.
//!
//! The install tree is archived as `<build>/<Name>.tar.gz` via [`tarball`].

pub mod tarball;
