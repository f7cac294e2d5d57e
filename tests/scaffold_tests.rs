use appdeploy::bundler::{BinaryType, BuildStateBuilder};
use appdeploy::cli::{OutputManager, Verbosity};
use appdeploy::scaffold::{JOURNAL_DATE_FORMAT, generate_starter_files};
use chrono::NaiveDate;
use std::fs;

fn quiet() -> OutputManager {
    OutputManager::new(Verbosity::Quiet)
}

#[tokio::test]
async fn journal_is_stamped_with_the_given_date() {
    let tmp = tempfile::tempdir().unwrap();
    let state = BuildStateBuilder::new("Starfield").root_dir(tmp.path()).build();
    let today = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();

    generate_starter_files(tmp.path(), &state, today, &quiet())
        .await
        .unwrap();

    let journal = fs::read_to_string(tmp.path().join("journal/journal.dox")).unwrap();
    let heading = today.format(JOURNAL_DATE_FORMAT).to_string();
    assert_eq!(heading, "Sun Dec 31, 2023");
    assert!(journal.contains(&format!("<h2>{heading}: Project started</h2>")));

    let mainpage = fs::read_to_string(tmp.path().join("mainpage.dox")).unwrap();
    assert!(mainpage.contains("\\mainpage"));
    assert!(mainpage.contains("\\link Journal Development Journal \\endlink"));
}

#[tokio::test]
async fn rerunning_overwrites_files_and_keeps_directories() {
    let tmp = tempfile::tempdir().unwrap();
    let state = BuildStateBuilder::new("Starfield").root_dir(tmp.path()).build();
    let today = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();

    generate_starter_files(tmp.path(), &state, today, &quiet())
        .await
        .unwrap();
    fs::write(tmp.path().join("source/main.cpp"), "edited").unwrap();
    fs::write(tmp.path().join("source/other.cpp"), "kept").unwrap();

    generate_starter_files(tmp.path(), &state, today, &quiet())
        .await
        .unwrap();

    let main = fs::read_to_string(tmp.path().join("source/main.cpp")).unwrap();
    assert!(main.contains("Hello World!"));
    assert_eq!(
        fs::read_to_string(tmp.path().join("source/other.cpp")).unwrap(),
        "kept"
    );
}

#[tokio::test]
async fn static_and_dynamic_libraries_share_the_layout() {
    for binary_type in [BinaryType::StaticLibrary, BinaryType::DynamicLibrary] {
        let tmp = tempfile::tempdir().unwrap();
        let state = BuildStateBuilder::new("G3D")
            .binary_type(binary_type)
            .root_dir(tmp.path())
            .build();

        let written = generate_starter_files(
            tmp.path(),
            &state,
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            &quiet(),
        )
        .await
        .unwrap();

        assert_eq!(written.len(), 3);
        let header = fs::read_to_string(tmp.path().join("include/G3D/G3D.h")).unwrap();
        assert_eq!(header.matches("G3D_H").count(), 2);
        assert!(!tmp.path().join("data-files").exists());
    }
}
