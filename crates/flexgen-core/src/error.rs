//! Error types for the generation pipeline

use thiserror::Error;

/// Result type alias for generator operations
pub type GeneratorResult<T> = Result<T, GeneratorError>;

/// Error type for generator operations
///
/// Configuration errors abort the whole session. I/O errors raised by an
/// output sink are caught per class by the driver and only surface through
/// the [`GenerationReport`](crate::GenerationReport).
#[derive(Error, Debug)]
pub enum GeneratorError {
    /// A package declaration could not be resolved for an entity
    #[error("invalid package declaration '{declaration}' for {entity}: {reason}")]
    InvalidPackage {
        entity: String,
        declaration: String,
        reason: String,
    },

    /// A list/set/map marker does not name its element type
    #[error("missing element type on {entity}.{property}: {marker} marker requires one")]
    MissingElementType {
        entity: String,
        property: String,
        marker: &'static str,
    },

    /// A class-level node marker uses the attribute sigil
    #[error("a class cannot be an attribute node ({0})")]
    AttributeClassNode(String),

    /// An entity-typed property is bound to an XML attribute
    #[error("a complex type cannot be used as XML attribute ({entity}.{property})")]
    ComplexAttribute { entity: String, property: String },

    /// A default-value marker does not parse as the property type
    #[error("invalid default value '{value}' for {entity}.{property}: {reason}")]
    InvalidDefault {
        entity: String,
        property: String,
        value: String,
        reason: String,
    },

    /// The message catalog has no method name for a writer
    #[error("method '{0}' missing in message catalog")]
    MissingMethodName(String),

    /// A package scan resolved to nothing
    #[error("the package '{0}' cannot be found")]
    PackageNotFound(String),

    /// A handler received a callback out of order
    #[error("invalid emission phase: expected {expected}, got {actual}")]
    InvalidState { expected: String, actual: String },

    /// Context helpers kept requesting new helpers
    #[error("context helper expansion did not settle after {0} waves")]
    HelperExpansionLimit(usize),

    /// Malformed entity schema or catalog file
    #[error("schema error: {0}")]
    Schema(String),

    /// Invalid generator configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error while reading inputs or writing outputs
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for GeneratorError {
    fn from(err: toml::de::Error) -> Self {
        GeneratorError::Schema(err.to_string())
    }
}
