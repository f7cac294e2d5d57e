//! Starter tree for a new native project.
//!
//! ```text
//! <root>/
//!     build/  source/  doc-files/  journal/
//!     mainpage.dox
//!     journal/journal.dox
//!     data-files/ + source/main.cpp            (executables)
//!     include/<Name>/<Name>.h                  (libraries)
//! ```
//!
//! Existing directories are kept; files are overwritten.

mod templates;

pub use templates::{JOURNAL_DATE_FORMAT, include_guard};

use crate::{
    bundler::{BuildState, DATA_FILES_DIR, Error, Result, utils::fs},
    cli::OutputManager,
};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use templates::StarterTemplates;

/// Directories created for every project type.
pub const COMMON_DIRS: [&str; 4] = ["build", "source", "doc-files", "journal"];

/// Writes the starter tree for `state` under `root`.
///
/// `today` is stamped into the development journal; callers capture it once
/// so repeated runs on the same day produce identical files.
///
/// Returns the files written, in creation order.
pub async fn generate_starter_files(
    root: &Path,
    state: &BuildState,
    today: NaiveDate,
    output: &OutputManager,
) -> Result<Vec<PathBuf>> {
    let name = state.project_name();
    if name.is_empty() {
        return Err(Error::EmptyName {
            field: "project name",
        });
    }

    let starter = StarterTemplates::new()?;
    let mut written = Vec::new();

    output.section(&format!("Creating {} project {}", state.binary_type(), name));

    for dir in COMMON_DIRS {
        mkdir(&root.join(dir), output).await?;
    }

    write(&root.join("mainpage.dox"), starter.mainpage(name)?, output, &mut written).await?;
    write(
        &root.join("journal").join("journal.dox"),
        starter.journal(today)?,
        output,
        &mut written,
    )
    .await?;

    if state.binary_type().is_library() {
        let include_dir = root.join("include").join(name);
        mkdir(&include_dir, output).await?;
        write(
            &include_dir.join(format!("{}.h", name)),
            starter.library_header(name)?,
            output,
            &mut written,
        )
        .await?;
    } else {
        mkdir(&root.join(DATA_FILES_DIR), output).await?;
        write(
            &root.join("source").join("main.cpp"),
            templates::MAIN_CPP,
            output,
            &mut written,
        )
        .await?;
    }

    log::debug!("Wrote {} starter files under {}", written.len(), root.display());
    Ok(written)
}

async fn mkdir(path: &Path, output: &OutputManager) -> Result<()> {
    output.verbose(&format!("mkdir {}", path.display()));
    fs::create_dir_all(path, false).await
}

async fn write(
    path: &Path,
    contents: impl AsRef<[u8]>,
    output: &OutputManager,
    written: &mut Vec<PathBuf>,
) -> Result<()> {
    output.verbose(&format!("write {}", path.display()));
    fs::write_file(path, contents).await?;
    written.push(path.to_path_buf());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::{BinaryType, BuildStateBuilder};
    use crate::cli::Verbosity;

    fn quiet() -> OutputManager {
        OutputManager::new(Verbosity::Quiet)
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
    }

    #[tokio::test]
    async fn executable_gets_main_and_data_files() {
        let tmp = tempfile::tempdir().unwrap();
        let state = BuildStateBuilder::new("Hello").root_dir(tmp.path()).build();

        let written = generate_starter_files(tmp.path(), &state, date(), &quiet())
            .await
            .unwrap();

        assert_eq!(written.len(), 3);
        assert!(tmp.path().join(DATA_FILES_DIR).is_dir());
        assert!(!tmp.path().join("include").exists());

        let main = std::fs::read_to_string(tmp.path().join("source/main.cpp")).unwrap();
        assert!(main.contains(r#"printf("Hello World!\n");"#));
        assert!(main.contains("return 0;"));
    }

    #[tokio::test]
    async fn library_gets_header_only() {
        let tmp = tempfile::tempdir().unwrap();
        let state = BuildStateBuilder::new("Widgets")
            .binary_type(BinaryType::DynamicLibrary)
            .root_dir(tmp.path())
            .build();

        generate_starter_files(tmp.path(), &state, date(), &quiet())
            .await
            .unwrap();

        let header =
            std::fs::read_to_string(tmp.path().join("include/Widgets/Widgets.h")).unwrap();
        assert_eq!(header.matches("WIDGETS_H").count(), 2);
        assert!(!tmp.path().join("source/main.cpp").exists());
        assert!(!tmp.path().join(DATA_FILES_DIR).exists());
        for dir in COMMON_DIRS {
            assert!(tmp.path().join(dir).is_dir(), "{dir} missing");
        }
    }

    #[tokio::test]
    async fn empty_name_is_rejected_before_writing() {
        let tmp = tempfile::tempdir().unwrap();
        let state = BuildStateBuilder::new("").root_dir(tmp.path()).build();

        let err = generate_starter_files(tmp.path(), &state, date(), &quiet())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::EmptyName { .. }));
        assert!(!tmp.path().join("build").exists());
    }
}
