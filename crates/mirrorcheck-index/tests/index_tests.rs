use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use mirrorcheck_index::{
    ConsistencyChecker, DispatchError, IndexLayout, IndexerConfig, NaiveChecker, Outcome, dispatch,
};
use tempfile::TempDir;

/// The worked example: a sector containing one file and one
/// subdirectory with one file yields a four-line index, parent lines
/// first.
#[test]
fn test_end_to_end_through_dispatcher() {
    let sector = TempDir::new().unwrap();
    fs::write(sector.path().join("a.txt"), "a").unwrap();
    fs::create_dir(sector.path().join("sub")).unwrap();
    fs::write(sector.path().join("sub/b.txt"), "b").unwrap();

    let cfg = TempDir::new().unwrap();
    let checker = NaiveChecker::new(IndexerConfig::new(cfg.path()));

    let args = vec![
        "lib1".to_string(),
        "s1".to_string(),
        sector.path().display().to_string(),
    ];
    let Outcome::Indexed(report) = dispatch("indexSector", &args, &checker).unwrap();

    let layout = IndexLayout::new(cfg.path());
    assert_eq!(
        report.index_path,
        layout.index_dir("lib1", "s1", sector.path()).join("index")
    );

    let content = fs::read_to_string(&report.index_path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 4);

    let expected: BTreeSet<String> = [
        sector.path().to_path_buf(),
        sector.path().join("a.txt"),
        sector.path().join("sub"),
        sector.path().join("sub/b.txt"),
    ]
    .iter()
    .map(|p| p.display().to_string())
    .collect();
    let actual: BTreeSet<String> = lines.iter().map(|l| l.to_string()).collect();
    assert_eq!(actual, expected);

    // the sector root comes first; sub precedes sub/b.txt
    assert_eq!(Path::new(lines[0]), sector.path());
    let sub = lines
        .iter()
        .position(|l| Path::new(l) == sector.path().join("sub"))
        .unwrap();
    let b = lines
        .iter()
        .position(|l| Path::new(l) == sector.path().join("sub/b.txt"))
        .unwrap();
    assert!(sub < b);
}

#[test]
fn test_full_rewrite_on_each_run() {
    let sector = TempDir::new().unwrap();
    fs::write(sector.path().join("old.txt"), "old").unwrap();

    let cfg = TempDir::new().unwrap();
    let checker = NaiveChecker::new(IndexerConfig::new(cfg.path()));

    let first = checker
        .index_sector("lib1", "s1", sector.path())
        .unwrap();
    assert_eq!(first.files, 1);

    fs::remove_file(sector.path().join("old.txt")).unwrap();
    fs::write(sector.path().join("new.txt"), "new").unwrap();

    let second = checker
        .index_sector("lib1", "s1", sector.path())
        .unwrap();
    let content = fs::read_to_string(&second.index_path).unwrap();
    assert!(content.contains("new.txt"));
    assert!(!content.contains("old.txt"));
}

#[test]
fn test_dispatch_failures_do_not_panic() {
    let cfg = TempDir::new().unwrap();
    let checker = NaiveChecker::new(IndexerConfig::new(cfg.path()));

    let err = dispatch("bogusCommand", &[], &checker).unwrap_err();
    assert!(matches!(err, DispatchError::UnknownCommand(_)));

    let err = dispatch("indexSector", &["onlyone".to_string()], &checker).unwrap_err();
    assert!(matches!(err, DispatchError::BadArity { .. }));
}
