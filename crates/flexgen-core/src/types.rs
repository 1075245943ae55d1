//! Java type model used by entity descriptors.
//!
//! # Type Mappings
//!
//! | Java | Wrapper | AS3 |
//! |------|---------|-----|
//! | `int` / `Integer` | `Integer` | `int` |
//! | `short` / `Short` | `Short` | `int` |
//! | `long`, `float`, `double` (boxed or not) | boxed name | `Number` |
//! | `boolean` / `Boolean` | `Boolean` | `Boolean` |
//! | `String` | `String` | `String` |
//! | `X[]`, `java.util.List`, `java.util.Set` | `X[]` | `Array` |
//! | `java.util.Map` | `Map` | `Dictionary` |

use crate::conversion::ScalarKind;
use crate::error::{GeneratorError, GeneratorResult};
use crate::naming::{qualify, simple_name};
use std::fmt;

/// Java primitive types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Primitive {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
}

impl Primitive {
    const ALL: [Primitive; 8] = [
        Primitive::Boolean,
        Primitive::Byte,
        Primitive::Char,
        Primitive::Short,
        Primitive::Int,
        Primitive::Long,
        Primitive::Float,
        Primitive::Double,
    ];

    /// Java keyword for the primitive
    pub fn name(&self) -> &'static str {
        match self {
            Primitive::Boolean => "boolean",
            Primitive::Byte => "byte",
            Primitive::Char => "char",
            Primitive::Short => "short",
            Primitive::Int => "int",
            Primitive::Long => "long",
            Primitive::Float => "float",
            Primitive::Double => "double",
        }
    }

    /// Simple name of the `java.lang` wrapper class
    pub fn wrapper(&self) -> &'static str {
        match self {
            Primitive::Boolean => "Boolean",
            Primitive::Byte => "Byte",
            Primitive::Char => "Character",
            Primitive::Short => "Short",
            Primitive::Int => "Integer",
            Primitive::Long => "Long",
            Primitive::Float => "Float",
            Primitive::Double => "Double",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }
}

/// `java.util` and `java.util.concurrent` types assignable to `java.util.Map`
const MAP_TYPES: &[&str] = &[
    "java.util.Map",
    "java.util.HashMap",
    "java.util.TreeMap",
    "java.util.LinkedHashMap",
    "java.util.SortedMap",
    "java.util.NavigableMap",
    "java.util.Hashtable",
    "java.util.WeakHashMap",
    "java.util.IdentityHashMap",
    "java.util.Properties",
    "java.util.concurrent.ConcurrentMap",
    "java.util.concurrent.ConcurrentHashMap",
];

/// `java.util` and `java.util.concurrent` types assignable to `java.util.Collection`
const COLLECTION_TYPES: &[&str] = &[
    "java.util.Collection",
    "java.util.List",
    "java.util.ArrayList",
    "java.util.LinkedList",
    "java.util.Vector",
    "java.util.Stack",
    "java.util.Set",
    "java.util.HashSet",
    "java.util.LinkedHashSet",
    "java.util.TreeSet",
    "java.util.SortedSet",
    "java.util.NavigableSet",
    "java.util.Queue",
    "java.util.Deque",
    "java.util.ArrayDeque",
    "java.util.PriorityQueue",
    "java.util.concurrent.CopyOnWriteArrayList",
    "java.util.concurrent.CopyOnWriteArraySet",
];

/// `java.lang` types that never need an import
const LANG_TYPES: &[&str] = &[
    "java.lang.Object",
    "java.lang.String",
    "java.lang.Boolean",
    "java.lang.Byte",
    "java.lang.Character",
    "java.lang.Short",
    "java.lang.Integer",
    "java.lang.Long",
    "java.lang.Float",
    "java.lang.Double",
    "java.lang.Number",
];

/// Extra `java.util` names resolvable by simple name
const UTIL_TYPES: &[&str] = &["java.util.Date", "java.util.Locale", "java.util.UUID"];

/// Resolve a well-known simple name to its qualified name
fn well_known(simple: &str) -> Option<&'static str> {
    LANG_TYPES
        .iter()
        .chain(MAP_TYPES)
        .chain(COLLECTION_TYPES)
        .chain(UTIL_TYPES)
        .copied()
        .find(|q| simple_name(q) == simple)
}

/// A Java static type
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum JavaType {
    Primitive(Primitive),
    /// Reference type by qualified name
    Class(String),
    Array(Box<JavaType>),
}

impl JavaType {
    /// Parse a type reference as written in an entity descriptor.
    ///
    /// Accepts primitives, `X[]` arrays, qualified names, well-known
    /// `java.lang`/`java.util` simple names, and other simple names which
    /// resolve against `context_package`.
    pub fn parse(text: &str, context_package: &str) -> GeneratorResult<Self> {
        let text = text.trim();
        if text.is_empty() {
            return Err(GeneratorError::Schema("empty type name".to_string()));
        }

        if let Some(component) = text.strip_suffix("[]") {
            return Ok(JavaType::Array(Box::new(Self::parse(
                component,
                context_package,
            )?)));
        }

        let valid = text
            .split('.')
            .all(|seg| !seg.is_empty() && seg.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '$'));
        if !valid {
            return Err(GeneratorError::Schema(format!("invalid type name '{text}'")));
        }

        if let Some(p) = Primitive::from_name(text) {
            return Ok(JavaType::Primitive(p));
        }

        if text.contains('.') {
            return Ok(JavaType::Class(text.to_string()));
        }

        match well_known(text) {
            Some(qualified) => Ok(JavaType::Class(qualified.to_string())),
            None => Ok(JavaType::Class(qualify(context_package, text))),
        }
    }

    /// Shorthand for a class type
    pub fn class(qualified: impl Into<String>) -> Self {
        JavaType::Class(qualified.into())
    }

    /// Fully qualified name (`int`, `java.lang.String`, `com.a.B[]`)
    pub fn qualified_name(&self) -> String {
        match self {
            JavaType::Primitive(p) => p.name().to_string(),
            JavaType::Class(name) => name.clone(),
            JavaType::Array(component) => format!("{}[]", component.qualified_name()),
        }
    }

    /// Simple name (`int`, `String`, `B[]`)
    pub fn simple_name(&self) -> String {
        match self {
            JavaType::Primitive(p) => p.name().to_string(),
            JavaType::Class(name) => simple_name(name).to_string(),
            JavaType::Array(component) => format!("{}[]", component.simple_name()),
        }
    }

    /// Simple name with primitives replaced by their wrapper
    pub fn wrapper_name(&self) -> String {
        match self {
            JavaType::Primitive(p) => p.wrapper().to_string(),
            other => other.simple_name(),
        }
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, JavaType::Primitive(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, JavaType::Array(_))
    }

    /// Array component type
    pub fn component(&self) -> Option<&JavaType> {
        match self {
            JavaType::Array(component) => Some(component),
            _ => None,
        }
    }

    /// Whether the type is assignable to `java.util.Map`
    pub fn is_map(&self) -> bool {
        matches!(self, JavaType::Class(name) if MAP_TYPES.contains(&name.as_str()))
    }

    /// Whether the type is assignable to `java.util.Collection`
    pub fn is_collection(&self) -> bool {
        matches!(self, JavaType::Class(name) if COLLECTION_TYPES.contains(&name.as_str()))
    }

    /// Qualified name to import when referenced from generated Java, if any
    pub fn import_name(&self) -> Option<String> {
        match self {
            JavaType::Primitive(_) => None,
            JavaType::Class(name) if LANG_TYPES.contains(&name.as_str()) => None,
            JavaType::Class(name) => Some(name.clone()),
            JavaType::Array(component) => component.import_name(),
        }
    }

    /// AS3 type name for a non-entity type
    pub fn as3_name(&self) -> String {
        if self.is_array() || self.is_collection() {
            return "Array".to_string();
        }
        if self.is_map() {
            return "Dictionary".to_string();
        }
        match ScalarKind::of(self) {
            Some(kind) => kind.as3_name().to_string(),
            None => self.simple_name(),
        }
    }
}

impl fmt::Display for JavaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified_name())
    }
}
