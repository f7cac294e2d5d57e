//! macOS packaging: `.app` bundles wrapped in `.dmg` disk images.
//!
//! - **Application Bundle (.app)**: via [`app`]
//! - **Disk Image (.dmg)**: via [`dmg`], using the built-in `hdiutil`
//! - **Bundle metadata**: `Info.plist` and `PkgInfo` via [`plist`]
//!
//! # Output Location
//!
//! The bundle is staged at `<temp>/deploy/<Name>.app` and the image is
//! written to `<build>/<Name>.dmg`.
//!
//! These modules build on every host; only running `hdiutil` needs macOS.

pub mod app;
pub mod dmg;
pub mod plist;
