#![cfg(unix)]

use std::path::{Path, PathBuf};

use submission_move::{MoveError, relative_to_root, resolve_target_path};

#[test]
fn direct_child_lands_directly_under_target() {
    let dest = resolve_target_path(
        Path::new("/tmp/source"),
        Path::new("/tmp/target"),
        Path::new("/tmp/source/file.tmp"),
    )
    .unwrap();
    assert_eq!(dest, PathBuf::from("/tmp/target/file.tmp"));
}

#[test]
fn nested_file_keeps_intermediate_directories() {
    let dest = resolve_target_path(
        Path::new("/tmp/source"),
        Path::new("/tmp/target"),
        Path::new("/tmp/source/sub/subfile.tmp"),
    )
    .unwrap();
    assert_eq!(dest, PathBuf::from("/tmp/target/sub/subfile.tmp"));

    let deep = resolve_target_path(
        Path::new("/srv/in"),
        Path::new("/srv/out"),
        Path::new("/srv/in/a/b/c/d/e.bin"),
    )
    .unwrap();
    assert_eq!(deep, PathBuf::from("/srv/out/a/b/c/d/e.bin"));
}

#[test]
fn relative_part_is_preserved_exactly() {
    let rel = relative_to_root(Path::new("/data/stage"), Path::new("/data/stage/x/y.txt")).unwrap();
    assert_eq!(rel, PathBuf::from("x/y.txt"));

    let dest = resolve_target_path(
        Path::new("/data/stage"),
        Path::new("/archive/2024"),
        Path::new("/data/stage/x/y.txt"),
    )
    .unwrap();
    assert_eq!(dest.strip_prefix("/archive/2024").unwrap(), rel);
}

#[test]
fn same_inputs_same_output() {
    let a = resolve_target_path(Path::new("/s"), Path::new("/t"), Path::new("/s/q/r")).unwrap();
    let b = resolve_target_path(Path::new("/s"), Path::new("/t"), Path::new("/s/q/r")).unwrap();
    assert_eq!(a, b);
}

#[test]
fn subject_outside_root_is_invalid_argument() {
    for subject in ["/tmp/elsewhere/file.tmp", "/tmp/source2/file.tmp", "/tmp/source/../x"] {
        let err = resolve_target_path(
            Path::new("/tmp/source"),
            Path::new("/tmp/target"),
            Path::new(subject),
        )
        .unwrap_err();
        assert!(
            matches!(err, MoveError::InvalidArgument { .. }),
            "{subject}: {err:?}"
        );
    }
}

#[test]
fn relative_inputs_are_invalid_argument() {
    let err =
        resolve_target_path(Path::new("source"), Path::new("/t"), Path::new("source/a")).unwrap_err();
    assert!(matches!(err, MoveError::InvalidArgument { .. }), "{err:?}");

    let err =
        resolve_target_path(Path::new("/s"), Path::new("target"), Path::new("/s/a")).unwrap_err();
    assert!(matches!(err, MoveError::InvalidArgument { .. }), "{err:?}");
}

#[test]
fn root_itself_resolves_to_target_root() {
    let dest =
        resolve_target_path(Path::new("/tmp/source"), Path::new("/tmp/target"), Path::new("/tmp/source"))
            .unwrap();
    assert_eq!(dest, PathBuf::from("/tmp/target"));
}
