//! Integration tests for the flexgen binary.
//!
//! Runs the built executable against descriptors in a temporary directory.

#![allow(non_snake_case)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const PERSON: &str = r#"
name = "com.example.Person"

[[property]]
name = "id"
type = "int"
node = "@id"

[[property]]
name = "contacts"
type = "Person[]"
"#;

fn flexgen(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_flexgen"))
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .unwrap()
}

fn write_descriptor(dir: &TempDir, relative: &str, content: &str) -> PathBuf {
    let path = dir.path().join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    path
}

// =============================================================================
// generate
// =============================================================================

mod generate {
    use super::*;

    #[test]
    fn generate___console_mode___prints_every_class() {
        let temp = TempDir::new().unwrap();
        write_descriptor(&temp, "person.toml", PERSON);

        let output = flexgen(temp.path(), &["generate", "person.toml"]);

        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("// com/example/Person.as"));
        assert!(stdout.contains("// com/example/PersonBuilder.as"));
        assert!(stdout.contains("// com/example/PersonBuilder.java"));
        assert!(stdout.contains("public class PersonBuilder"));
    }

    #[test]
    fn generate___file_mode___writes_both_roots() {
        let temp = TempDir::new().unwrap();
        write_descriptor(&temp, "person.toml", PERSON);

        let output = flexgen(
            temp.path(),
            &[
                "generate",
                "person.toml",
                "--output",
                "file",
                "--flex-dir",
                "flex",
                "--java-dir",
                "java",
            ],
        );

        assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
        assert!(temp.path().join("flex/com/example/Person.as").is_file());
        assert!(temp.path().join("java/com/example/PersonBuilder.java").is_file());
        assert!(output.stdout.is_empty());
    }

    #[test]
    fn generate___default_config_file___is_picked_up() {
        let temp = TempDir::new().unwrap();
        write_descriptor(&temp, "person.toml", PERSON);
        fs::write(
            temp.path().join("flexgen.toml"),
            "class_prefix = \"Fx\"\n\n[output]\nmode = \"file\"\nflex_dir = \"flex\"\njava_dir = \"java\"\n",
        )
        .unwrap();

        let output = flexgen(temp.path(), &["generate", "person.toml"]);

        assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
        assert!(temp.path().join("flex/com/example/FxPerson.as").is_file());
    }

    #[test]
    fn generate___classpath_package___scans_descriptors() {
        let temp = TempDir::new().unwrap();
        write_descriptor(&temp, "model/com/example/Person.toml", PERSON);

        let output = flexgen(
            temp.path(),
            &["generate", "--classpath", "model", "--package", "com.example"],
        );

        assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
        assert!(String::from_utf8_lossy(&output.stdout).contains("// com/example/Person.as"));
    }

    #[test]
    fn generate___package_without_classpath___is_rejected() {
        let temp = TempDir::new().unwrap();

        let output = flexgen(temp.path(), &["generate", "--package", "com.example"]);

        assert!(!output.status.success());
    }

    #[test]
    fn generate___missing_descriptor___fails_with_path() {
        let temp = TempDir::new().unwrap();

        let output = flexgen(temp.path(), &["generate", "absent.toml"]);

        assert!(!output.status.success());
        assert!(String::from_utf8_lossy(&output.stderr).contains("absent.toml"));
    }
}

// =============================================================================
// check
// =============================================================================

mod check {
    use super::*;

    #[test]
    fn check___valid_descriptor___writes_nothing() {
        let temp = TempDir::new().unwrap();
        write_descriptor(&temp, "person.toml", PERSON);

        let output = flexgen(temp.path(), &["check", "person.toml"]);

        assert!(output.status.success());
        assert!(String::from_utf8_lossy(&output.stdout).contains("Entities: 1"));
        assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 1);
    }

    #[test]
    fn check___complex_attribute___fails() {
        let temp = TempDir::new().unwrap();
        write_descriptor(
            &temp,
            "person.toml",
            &PERSON.replace("type = \"Person[]\"", "type = \"Person\"\nnode = \"@contacts\""),
        );

        let output = flexgen(temp.path(), &["check", "person.toml"]);

        assert!(!output.status.success());
        assert!(String::from_utf8_lossy(&output.stderr).contains("complex type"));
    }

    #[test]
    fn check___unknown_log_level___is_rejected() {
        let temp = TempDir::new().unwrap();
        write_descriptor(&temp, "person.toml", PERSON);

        let output = flexgen(temp.path(), &["--log-level", "loud", "check", "person.toml"]);

        assert!(!output.status.success());
    }
}
