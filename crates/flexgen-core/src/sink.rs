//! Output sinks for generated classes

use crate::config::{OutputConfig, TargetKind};
use crate::error::{GeneratorError, GeneratorResult};
use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Source text of one generated class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedClass {
    pub target: TargetKind,
    pub package: String,
    pub class_name: String,
    pub source: String,
}

impl GeneratedClass {
    /// File extension, including the dot
    pub fn extension(&self) -> &'static str {
        self.target.extension()
    }

    /// `com/example/PersonBuilder.java`
    pub fn relative_path(&self) -> PathBuf {
        let mut path: PathBuf = self
            .package
            .split('.')
            .filter(|segment| !segment.is_empty())
            .collect();
        path.push(format!("{}{}", self.class_name, self.extension()));
        path
    }
}

/// Destination of generated classes
pub trait OutputSink {
    fn write(&mut self, class: &GeneratedClass) -> io::Result<()>;
}

/// Keeps every class in memory, keyed by relative path
#[derive(Debug, Default)]
pub struct MemorySink {
    files: BTreeMap<PathBuf, String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files(&self) -> &BTreeMap<PathBuf, String> {
        &self.files
    }

    pub fn get(&self, path: impl AsRef<Path>) -> Option<&str> {
        self.files.get(path.as_ref()).map(String::as_str)
    }

    pub fn into_files(self) -> BTreeMap<PathBuf, String> {
        self.files
    }
}

impl OutputSink for MemorySink {
    fn write(&mut self, class: &GeneratedClass) -> io::Result<()> {
        self.files.insert(class.relative_path(), class.source.clone());
        Ok(())
    }
}

/// Prints every class to a writer, stdout by default
pub struct ConsoleSink<W: Write = io::Stdout> {
    out: W,
}

impl ConsoleSink {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> OutputSink for ConsoleSink<W> {
    fn write(&mut self, class: &GeneratedClass) -> io::Result<()> {
        writeln!(self.out, "// {}", class.relative_path().display())?;
        self.out.write_all(class.source.as_bytes())?;
        writeln!(self.out)?;
        self.out.flush()
    }
}

/// One file per class under a root directory per target
#[derive(Debug, Clone)]
pub struct FileSink {
    flex_dir: PathBuf,
    java_dir: PathBuf,
}

impl FileSink {
    pub fn new(flex_dir: impl Into<PathBuf>, java_dir: impl Into<PathBuf>) -> Self {
        Self {
            flex_dir: flex_dir.into(),
            java_dir: java_dir.into(),
        }
    }

    /// Sink from the output section of the configuration
    pub fn from_config(output: &OutputConfig) -> GeneratorResult<Self> {
        let root = |kind: TargetKind, field: &str| {
            output
                .root_for(kind)
                .map(Path::to_path_buf)
                .ok_or_else(|| GeneratorError::Config(format!("output.{field} is not set")))
        };
        Ok(Self {
            flex_dir: root(TargetKind::ClientEntities, "flex_dir")?,
            java_dir: root(TargetKind::ServerBuilders, "java_dir")?,
        })
    }

    /// Absolute destination of a class
    pub fn path_for(&self, class: &GeneratedClass) -> PathBuf {
        let root = if class.target.is_client() {
            &self.flex_dir
        } else {
            &self.java_dir
        };
        root.join(class.relative_path())
    }
}

impl OutputSink for FileSink {
    fn write(&mut self, class: &GeneratedClass) -> io::Result<()> {
        let path = self.path_for(class);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, &class.source)?;
        debug!(path = %path.display(), "Wrote generated class");
        Ok(())
    }
}

#[cfg(test)]
#[path = "sink/sink_tests.rs"]
mod sink_tests;
