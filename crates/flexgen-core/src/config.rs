//! Generator configuration types

use crate::error::{GeneratorError, GeneratorResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Kind of class a handler produces
///
/// Each kind has its own package slot in [`PackageConfig`] and in the
/// entity-level package marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    /// Client model classes (AS3)
    ClientEntities,
    /// Client XML builders (AS3 + E4X)
    ClientBuilders,
    /// Server XML builders (Java + dom4j)
    ServerBuilders,
}

impl TargetKind {
    /// File extension of the generated source, including the dot
    pub fn extension(&self) -> &'static str {
        match self {
            TargetKind::ServerBuilders => ".java",
            TargetKind::ClientEntities | TargetKind::ClientBuilders => ".as",
        }
    }

    /// Whether the output belongs under the Flex (client) source root
    pub fn is_client(&self) -> bool {
        !matches!(self, TargetKind::ServerBuilders)
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetKind::ClientEntities => write!(f, "client_entities"),
            TargetKind::ClientBuilders => write!(f, "client_builders"),
            TargetKind::ServerBuilders => write!(f, "server_builders"),
        }
    }
}

/// Where generated classes are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Print every class to stdout
    #[default]
    Console,
    /// One file per class under the configured roots
    File,
}

/// Default package declarations per target kind
///
/// Declarations use the relative syntax understood by
/// [`resolve_package`](crate::metadata::resolve_package).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageConfig {
    #[serde(default = "default_package")]
    pub client_entities: String,

    #[serde(default = "default_package")]
    pub client_builders: String,

    #[serde(default = "default_package")]
    pub server_builders: String,
}

fn default_package() -> String {
    ".".to_string()
}

impl Default for PackageConfig {
    fn default() -> Self {
        Self {
            client_entities: default_package(),
            client_builders: default_package(),
            server_builders: default_package(),
        }
    }
}

impl PackageConfig {
    /// Declaration for one target kind
    pub fn get(&self, kind: TargetKind) -> &str {
        match kind {
            TargetKind::ClientEntities => &self.client_entities,
            TargetKind::ClientBuilders => &self.client_builders,
            TargetKind::ServerBuilders => &self.server_builders,
        }
    }

    /// Replace the declaration for one target kind
    pub fn set(&mut self, kind: TargetKind, declaration: impl Into<String>) {
        let slot = match kind {
            TargetKind::ClientEntities => &mut self.client_entities,
            TargetKind::ClientBuilders => &mut self.client_builders,
            TargetKind::ServerBuilders => &mut self.server_builders,
        };
        *slot = declaration.into();
    }
}

/// Output destination settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub mode: OutputMode,

    /// Root directory for AS3 models and builders
    #[serde(default)]
    pub flex_dir: Option<PathBuf>,

    /// Root directory for Java builders
    #[serde(default)]
    pub java_dir: Option<PathBuf>,
}

impl OutputConfig {
    /// Root directory for a target kind, if configured
    pub fn root_for(&self, kind: TargetKind) -> Option<&Path> {
        if kind.is_client() {
            self.flex_dir.as_deref()
        } else {
            self.java_dir.as_deref()
        }
    }
}

/// Generation session configuration
///
/// Loaded from `flexgen.toml`; every field has a default so an empty file
/// is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// One level of indentation in generated code
    #[serde(default = "default_indentation")]
    pub indentation: String,

    /// Prefix model backing fields with `_`
    #[serde(default = "default_true")]
    pub using_underscore: bool,

    /// Put opening braces on their own line
    #[serde(default)]
    pub new_line_before_curly_brace: bool,

    /// Prefix for client model class names
    #[serde(default)]
    pub class_prefix: Option<String>,

    /// Suffix for client model class names
    #[serde(default)]
    pub class_suffix: Option<String>,

    /// Suffix appended to builder class names
    #[serde(default = "default_builder_suffix")]
    pub builder_suffix: String,

    /// Locale of the method-name and documentation catalog
    #[serde(default = "default_locale")]
    pub locale: String,

    #[serde(default)]
    pub packages: PackageConfig,

    #[serde(default)]
    pub output: OutputConfig,

    /// Extra catalog file overriding built-in entries
    #[serde(default)]
    pub documentation: Option<PathBuf>,
}

fn default_indentation() -> String {
    "    ".to_string()
}

fn default_true() -> bool {
    true
}

fn default_builder_suffix() -> String {
    "Builder".to_string()
}

fn default_locale() -> String {
    "en".to_string()
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            indentation: default_indentation(),
            using_underscore: true,
            new_line_before_curly_brace: false,
            class_prefix: None,
            class_suffix: None,
            builder_suffix: default_builder_suffix(),
            locale: default_locale(),
            packages: PackageConfig::default(),
            output: OutputConfig::default(),
            documentation: None,
        }
    }
}

impl GeneratorConfig {
    /// Create a configuration with every default
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from TOML text
    pub fn from_str(content: &str) -> GeneratorResult<Self> {
        toml::from_str(content).map_err(|e| GeneratorError::Config(e.to_string()))
    }

    /// Load a configuration file
    pub fn from_file(path: impl AsRef<Path>) -> GeneratorResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_str(&content)
    }

    /// Validate the configuration
    pub fn validate(&self) -> GeneratorResult<()> {
        if self.builder_suffix.is_empty() {
            return Err(GeneratorError::Config(
                "builder_suffix must not be empty".to_string(),
            ));
        }

        if self.indentation.is_empty() {
            return Err(GeneratorError::Config(
                "indentation must not be empty".to_string(),
            ));
        }

        if self.output.mode == OutputMode::File {
            if self.output.flex_dir.is_none() {
                return Err(GeneratorError::Config(
                    "output.flex_dir is required in file mode".to_string(),
                ));
            }
            if self.output.java_dir.is_none() {
                return Err(GeneratorError::Config(
                    "output.java_dir is required in file mode".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// `count` levels of indentation
    pub fn indent(&self, count: usize) -> String {
        self.indentation.repeat(count)
    }

    /// Opening brace following a declaration at `level`
    pub fn open_brace(&self, level: usize) -> String {
        if self.new_line_before_curly_brace {
            format!("\n{}{{\n", self.indent(level))
        } else {
            " {\n".to_string()
        }
    }

    /// Client model class name for an entity simple name
    pub fn model_class_name(&self, simple: &str) -> String {
        format!(
            "{}{}{}",
            self.class_prefix.as_deref().unwrap_or_default(),
            simple,
            self.class_suffix.as_deref().unwrap_or_default()
        )
    }
}
