use std::fs;
use std::path::PathBuf;

use submission_move::config::{load_config_from_xml_path, parse_config_xml};
use submission_move::{LogLevel, OnError};
use tempfile::tempdir;

#[test]
fn reads_roots_and_policies_from_file() {
    let td = tempdir().unwrap();
    let path = td.path().join("config.xml");
    fs::write(
        &path,
        r#"<config>
  <source_root>/srv/staging</source_root>
  <target_root>/srv/final</target_root>
  <log_level>quiet</log_level>
  <on_error>fail-fast</on_error>
  <parallel>yes</parallel>
</config>"#,
    )
    .unwrap();

    let cfg = load_config_from_xml_path(&path).unwrap();

    assert_eq!(cfg.source_root, Some(PathBuf::from("/srv/staging")));
    assert_eq!(cfg.target_root, Some(PathBuf::from("/srv/final")));
    assert_eq!(cfg.log_level, LogLevel::Quiet);
    assert_eq!(cfg.on_error, OnError::Abort);
    assert!(cfg.parallel);
    assert_eq!(cfg.log_file, None);
}

#[test]
fn malformed_xml_names_the_file() {
    let td = tempdir().unwrap();
    let path = td.path().join("broken.xml");
    fs::write(&path, "<config><source_root>/x</target_root>").unwrap();

    let err = load_config_from_xml_path(&path).unwrap_err();
    assert!(format!("{err:#}").contains("broken.xml"), "{err:#}");
}

#[test]
fn missing_file_is_an_error() {
    let td = tempdir().unwrap();
    assert!(load_config_from_xml_path(&td.path().join("absent.xml")).is_err());
}

#[test]
fn whitespace_only_values_are_unset() {
    let cfg = parse_config_xml(
        "<config>\n  <target_root>\n  </target_root>\n  <parallel> </parallel>\n</config>",
    )
    .unwrap();
    assert_eq!(cfg.target_root, None);
    assert!(!cfg.parallel);
}
