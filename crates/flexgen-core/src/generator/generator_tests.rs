#![allow(non_snake_case)]

use super::*;
use crate::model::EntitySchema;
use crate::sink::{GeneratedClass, MemorySink};
use std::fs;
use std::io;

fn entity(toml: &str) -> EntityDef {
    let schema: EntitySchema = toml::from_str(toml).unwrap();
    EntityDef::from_schema(schema).unwrap()
}

fn person() -> EntityDef {
    entity(
        r#"
        name = "com.example.Person"

        [[property]]
        name = "id"
        type = "int"
        node = "@id"

        [[property]]
        name = "name"
        type = "String"
        "#,
    )
}

/// Sink failing for every Java class and recording everything it sees
#[derive(Default)]
struct FlakySink {
    seen: Vec<PathBuf>,
    stored: MemorySink,
}

impl OutputSink for FlakySink {
    fn write(&mut self, class: &GeneratedClass) -> std::io::Result<()> {
        self.seen.push(class.relative_path());
        if class.target == TargetKind::ServerBuilders {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"));
        }
        self.stored.write(class)
    }
}

// ============================================================================
// Session
// ============================================================================

#[test]
fn Session___class_name_for___applies_prefix_suffix_and_builder_suffix() {
    let config = GeneratorConfig {
        class_prefix: Some("Fx".to_string()),
        class_suffix: Some("VO".to_string()),
        ..GeneratorConfig::default()
    };
    let generator = Generator::new(config).unwrap();
    let session = generator.session();
    let person = person();

    assert_eq!(session.class_name_for(TargetKind::ClientEntities, &person), "FxPersonVO");
    assert_eq!(
        session.class_name_for(TargetKind::ClientBuilders, &person),
        "FxPersonVOBuilder"
    );
    assert_eq!(session.class_name_for(TargetKind::ServerBuilders, &person), "PersonBuilder");
}

// ============================================================================
// Registration
// ============================================================================

#[test]
fn Generator___new___rejects_invalid_config() {
    let config = GeneratorConfig {
        builder_suffix: String::new(),
        ..GeneratorConfig::default()
    };

    let result = Generator::new(config);

    assert!(matches!(result, Err(GeneratorError::Config(_))));
}

#[test]
fn Generator___add_class___skips_transient_entities() {
    let mut generator = Generator::new(GeneratorConfig::default()).unwrap();
    let hidden = entity(
        r#"
        name = "com.example.Hidden"
        transient = true
        "#,
    );

    assert!(generator.add_class(person()));
    assert!(!generator.add_class(hidden));
    assert_eq!(
        generator.session().entities().keys().collect::<Vec<_>>(),
        vec!["com.example.Person"]
    );
}

#[test]
fn Generator___add_schema_file___registers_every_entity() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("entities.toml");
    fs::write(
        &path,
        r#"
        [[entity]]
        name = "com.example.A"

        [[entity]]
        name = "com.example.B"
        "#,
    )
    .unwrap();
    let mut generator = Generator::new(GeneratorConfig::default()).unwrap();

    let added = generator.add_schema_file(&path).unwrap();

    assert_eq!(added, 2);
    assert!(generator.session().entity("com.example.B").is_some());
}

#[test]
fn Generator___add_package___scans_classpath() {
    let dir = tempfile::tempdir().unwrap();
    let package = dir.path().join("com").join("example");
    fs::create_dir_all(&package).unwrap();
    fs::write(package.join("Person.toml"), "name = \"com.example.Person\"\n").unwrap();
    fs::write(package.join("README.md"), "not a descriptor").unwrap();
    let classpath = Classpath::new(dir.path());
    let mut generator = Generator::new(GeneratorConfig::default()).unwrap();

    let added = generator.add_package(&classpath, "com.example").unwrap();

    assert_eq!(added, 1);
    assert!(matches!(
        generator.add_package(&classpath, "com.missing"),
        Err(GeneratorError::PackageNotFound(ref p)) if p == "com/missing"
    ));
}

// ============================================================================
// Generation
// ============================================================================

#[test]
fn Generator___generate___emits_three_classes_per_entity() {
    let mut generator = Generator::with_default_handlers(GeneratorConfig::default()).unwrap();
    generator.add_class(person());
    let mut sink = MemorySink::new();

    let report = generator.generate(&mut sink).unwrap();

    assert!(report.is_success());
    assert_eq!(report.classes, 1);
    assert_eq!(
        sink.files().keys().cloned().collect::<Vec<_>>(),
        vec![
            PathBuf::from("com/example/Person.as"),
            PathBuf::from("com/example/PersonBuilder.as"),
            PathBuf::from("com/example/PersonBuilder.java"),
        ]
    );
}

#[test]
fn Generator___generate___visits_entities_in_name_order() {
    let mut generator = Generator::with_default_handlers(GeneratorConfig::default()).unwrap();
    generator.add_class(entity("name = \"com.example.Zed\""));
    generator.add_class(entity("name = \"com.example.Alpha\""));
    let mut sink = FlakySink::default();

    generator.generate(&mut sink).unwrap();

    let order: Vec<_> = sink.seen.iter().map(|p| p.display().to_string()).collect();
    assert_eq!(
        order,
        vec![
            "com/example/Alpha.as",
            "com/example/AlphaBuilder.as",
            "com/example/AlphaBuilder.java",
            "com/example/Zed.as",
            "com/example/ZedBuilder.as",
            "com/example/ZedBuilder.java",
        ]
    );
}

#[test]
fn Generator___generate_with_failing_sink___records_failure_and_continues() {
    let mut generator = Generator::with_default_handlers(GeneratorConfig::default()).unwrap();
    generator.add_class(person());
    generator.add_class(entity("name = \"com.example.Team\""));
    let mut sink = FlakySink::default();

    let report = generator.generate(&mut sink).unwrap();

    assert!(!report.is_success());
    assert_eq!(report.classes, 2);
    assert_eq!(report.written.len(), 4);
    assert_eq!(report.failed.len(), 2);
    assert!(report.failed[0].1.contains("read-only"));
    assert_eq!(sink.stored.files().len(), 4);
}

#[test]
fn Generator___generate_with_bad_package___aborts() {
    let mut generator = Generator::with_default_handlers(GeneratorConfig::default()).unwrap();
    generator.add_class(entity(
        r#"
        name = "com.Person"
        package = { client_entities = "../../model" }
        "#,
    ));
    let mut sink = MemorySink::new();

    let result = generator.generate(&mut sink);

    assert!(matches!(result, Err(GeneratorError::InvalidPackage { .. })));
}

#[test]
fn Generator___generate_twice___is_idempotent() {
    let mut generator = Generator::with_default_handlers(GeneratorConfig::default()).unwrap();
    generator.add_class(person());
    let mut first = MemorySink::new();
    let mut second = MemorySink::new();

    generator.generate(&mut first).unwrap();
    generator.generate(&mut second).unwrap();

    assert_eq!(first.files(), second.files());
}

#[test]
fn Generator___generate_after_mid_class_error___reports_the_same_error() {
    let mut generator = Generator::with_default_handlers(GeneratorConfig::default()).unwrap();
    generator.add_class(entity(
        r#"
        name = "com.example.Stats"

        [[property]]
        name = "daily"
        type = "int[]"
        node = "@daily"
        "#,
    ));
    let mut sink = MemorySink::new();

    let first = generator.generate(&mut sink);
    let second = generator.generate(&mut sink);

    assert!(matches!(first, Err(GeneratorError::ComplexAttribute { .. })));
    assert!(matches!(second, Err(GeneratorError::ComplexAttribute { .. })));
    assert!(sink.files().is_empty());
}
