//! Filesystem and process helpers shared by the packagers and the scaffolder.

pub mod fs;
pub mod shell;
