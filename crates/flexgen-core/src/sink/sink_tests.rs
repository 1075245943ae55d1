#![allow(non_snake_case)]

use super::*;
use crate::config::OutputMode;
use std::fs;

fn class(target: TargetKind, package: &str, name: &str) -> GeneratedClass {
    GeneratedClass {
        target,
        package: package.to_string(),
        class_name: name.to_string(),
        source: format!("// {name}\n"),
    }
}

#[test]
fn GeneratedClass___relative_path___maps_package_to_directories() {
    let java = class(TargetKind::ServerBuilders, "com.example.xml", "PersonBuilder");
    let as3 = class(TargetKind::ClientEntities, "", "Person");

    assert_eq!(
        java.relative_path(),
        PathBuf::from("com/example/xml/PersonBuilder.java")
    );
    assert_eq!(as3.relative_path(), PathBuf::from("Person.as"));
}

#[test]
fn MemorySink___write___keys_by_relative_path() {
    let mut sink = MemorySink::new();

    sink.write(&class(TargetKind::ClientBuilders, "a.b", "PersonBuilder"))
        .unwrap();

    assert_eq!(sink.get("a/b/PersonBuilder.as"), Some("// PersonBuilder\n"));
}

#[test]
fn ConsoleSink___write___prefixes_source_with_path() {
    let mut sink = ConsoleSink::new(Vec::new());

    sink.write(&class(TargetKind::ServerBuilders, "a", "X")).unwrap();

    let printed = String::from_utf8(sink.into_inner()).unwrap();
    assert_eq!(printed, "// a/X.java\n// X\n\n");
}

#[test]
fn FileSink___write___creates_directories_per_target_root() {
    let dir = tempfile::tempdir().unwrap();
    let flex = dir.path().join("flex");
    let java = dir.path().join("java");
    let mut sink = FileSink::new(&flex, &java);

    sink.write(&class(TargetKind::ClientEntities, "com.model", "Person"))
        .unwrap();
    sink.write(&class(TargetKind::ServerBuilders, "com.xml", "PersonBuilder"))
        .unwrap();

    assert_eq!(
        fs::read_to_string(flex.join("com/model/Person.as")).unwrap(),
        "// Person\n"
    );
    assert_eq!(
        fs::read_to_string(java.join("com/xml/PersonBuilder.java")).unwrap(),
        "// PersonBuilder\n"
    );
}

#[test]
fn FileSink___write_into_a_file_path___fails_with_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "not a directory").unwrap();
    let mut sink = FileSink::new(&blocker, &blocker);

    let result = sink.write(&class(TargetKind::ClientEntities, "a", "X"));

    assert!(result.is_err());
}

#[test]
fn FileSink___from_config___requires_both_roots() {
    let mut output = OutputConfig {
        mode: OutputMode::File,
        flex_dir: Some(PathBuf::from("/flex")),
        java_dir: None,
    };

    assert!(matches!(
        FileSink::from_config(&output),
        Err(GeneratorError::Config(ref m)) if m.contains("java_dir")
    ));

    output.java_dir = Some(PathBuf::from("/java"));
    let sink = FileSink::from_config(&output).unwrap();
    assert_eq!(
        sink.path_for(&class(TargetKind::ServerBuilders, "a", "B")),
        PathBuf::from("/java/a/B.java")
    );
}
