//! Entity descriptor files and classpath scanning

use crate::error::{GeneratorError, GeneratorResult};
use crate::model::EntitySchema;
use crate::naming::qualify;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Extension of entity descriptor files
pub const DESCRIPTOR_EXTENSION: &str = "toml";

/// Contents of one descriptor file
///
/// A file holds either a single entity (top-level `name`) or several
/// `[[entity]]` tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaFile {
    pub entities: Vec<EntitySchema>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ManyEntities {
    entity: Vec<EntitySchema>,
}

impl SchemaFile {
    /// Parse descriptor text
    pub fn from_str(content: &str) -> GeneratorResult<Self> {
        let table: toml::Table = toml::from_str(content)?;
        let value = toml::Value::Table(table);

        let entities = if value.get("entity").is_some() {
            value.try_into::<ManyEntities>()?.entity
        } else {
            vec![value.try_into::<EntitySchema>()?]
        };

        Ok(Self { entities })
    }

    /// Load a descriptor file
    pub fn from_file(path: impl AsRef<Path>) -> GeneratorResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content).map_err(|e| match e {
            GeneratorError::Schema(msg) => {
                GeneratorError::Schema(format!("{}: {msg}", path.display()))
            }
            other => other,
        })
    }
}

/// Directory tree of entity descriptors laid out by package
///
/// `com.example.Person` lives in `<root>/com/example/Person.toml`.
#[derive(Debug, Clone)]
pub struct Classpath {
    root: PathBuf,
}

impl Classpath {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory of a dotted package
    pub fn package_dir(&self, package: &str) -> PathBuf {
        package
            .split('.')
            .filter(|seg| !seg.is_empty())
            .fold(self.root.clone(), |dir, seg| dir.join(seg))
    }

    /// Load every entity descriptor directly inside a package.
    ///
    /// Non-descriptor entries are ignored. A descriptor that cannot be read
    /// or does not define the class its file name promises is logged and
    /// skipped. Results are sorted by file name.
    pub fn scan(&self, package: &str) -> GeneratorResult<Vec<EntitySchema>> {
        let dir = self.package_dir(package);
        if !dir.is_dir() {
            return Err(GeneratorError::PackageNotFound(package.replace('.', "/")));
        }

        let mut files = Vec::new();
        for entry in std::fs::read_dir(&dir)? {
            let path = entry?.path();
            let is_descriptor = path.is_file()
                && path.extension().and_then(|e| e.to_str()) == Some(DESCRIPTOR_EXTENSION);
            if is_descriptor {
                files.push(path);
            }
        }
        files.sort();

        let mut found = Vec::new();
        for path in files {
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let expected = qualify(package, stem);

            let file = match SchemaFile::from_file(&path) {
                Ok(file) => file,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Skipping unreadable entity descriptor");
                    continue;
                }
            };

            match file.entities.into_iter().find(|e| e.name == expected) {
                Some(entity) => {
                    debug!(class = %expected, "Found entity descriptor");
                    found.push(entity);
                }
                None => {
                    warn!(path = %path.display(), class = %expected, "Descriptor does not define its class");
                }
            }
        }

        Ok(found)
    }
}
