// Fix-mode file handling: in-place rewrite with .orig backups

use ccheck::{backup_path, check_file, fix_file};
use std::fs;

const UGLY: &str = "int f(void)\n{\n  return 0;\n}\n";
const FIXED: &str = "int f(void)\n{\n\treturn 0;\n}\n";

#[test]
fn test_fix_file_rewrites_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("module.c");
    fs::write(&path, UGLY).unwrap();

    fix_file(&path).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), FIXED);
}

#[test]
fn test_fix_file_keeps_backup() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("module.c");
    fs::write(&path, UGLY).unwrap();

    fix_file(&path).unwrap();

    let backup = backup_path(&path);
    assert!(backup.exists());
    assert_eq!(fs::read_to_string(&backup).unwrap(), UGLY);
}

#[test]
fn test_existing_backup_is_not_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("module.c");
    fs::write(&path, UGLY).unwrap();

    fix_file(&path).unwrap();

    // A second fix of new content must not clobber the first backup
    fs::write(&path, "int  x;\n").unwrap();
    fix_file(&path).unwrap();

    let backup = backup_path(&path);
    assert_eq!(fs::read_to_string(&backup).unwrap(), UGLY);
}

#[test]
fn test_check_file_reports_with_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("module.c");
    fs::write(&path, "int x = 1;  \n").unwrap();

    let diags = check_file(&path).unwrap();
    assert_eq!(diags.len(), 1);
    assert!(diags[0].ends_with(":1:12: Whitespace at end of line"));
    assert!(diags[0].contains("module.c"));
}

#[test]
fn test_check_file_clean() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("module.c");
    fs::write(&path, FIXED).unwrap();

    let diags = check_file(&path).unwrap();
    assert!(diags.is_empty());
}

#[test]
fn test_parse_error_propagates() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("module.c");
    fs::write(&path, "int f(\n").unwrap();

    assert!(check_file(&path).is_err());
    assert!(fix_file(&path).is_err());
    // A failed fix must leave the file untouched
    assert_eq!(fs::read_to_string(&path).unwrap(), "int f(\n");
}
