//! Entity descriptors and their markers
//!
//! The `*Schema` and `*Marker` types mirror the TOML entity files one to
//! one. [`EntityDef`] is the introspected form the generator works with:
//! types parsed, accessor names derived, the synthetic `class` property
//! dropped and duplicate properties removed.

use crate::config::TargetKind;
use crate::error::{GeneratorError, GeneratorResult};
use crate::naming::{accessor_name, package_of, simple_name};
use crate::types::{JavaType, Primitive};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Name of the synthetic bean property every Java object exposes
pub const CLASS_PROPERTY: &str = "class";

/// One entity as written in a descriptor file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EntitySchema {
    /// Qualified class name
    pub name: String,

    /// Class-level node marker
    #[serde(default)]
    pub node: Option<String>,

    /// Class-level transience; transient classes are never generated
    #[serde(default)]
    pub transient: bool,

    /// Class-level bindable marker, applied to every property
    #[serde(default)]
    pub bindable: Option<BindableMarker>,

    /// Package-override marker
    #[serde(default)]
    pub package: Option<PackageMarker>,

    #[serde(default, rename = "property")]
    pub properties: Vec<PropertySchema>,
}

/// One bean property as written in a descriptor file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PropertySchema {
    pub name: String,

    #[serde(rename = "type")]
    pub ty: String,

    /// Whether the bean has a setter
    #[serde(default = "default_true")]
    pub setter: bool,

    #[serde(default)]
    pub node: Option<String>,

    #[serde(default)]
    pub lazy: Option<LazyMarker>,

    #[serde(default)]
    pub list: Option<CollectionMarker>,

    #[serde(default)]
    pub set: Option<CollectionMarker>,

    #[serde(default)]
    pub map: Option<MapMarker>,

    #[serde(default)]
    pub transient: Option<TransientMode>,

    #[serde(default)]
    pub bindable: Option<BindableMarker>,

    #[serde(default)]
    pub default: Option<String>,
}

fn default_true() -> bool {
    true
}

/// Bindable marker with an optional event name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BindableMarker {
    #[serde(default)]
    pub event: String,
}

/// Package-override marker; empty slots fall back to the configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackageMarker {
    #[serde(default)]
    pub client_entities: String,

    #[serde(default)]
    pub client_builders: String,

    #[serde(default)]
    pub server_builders: String,
}

impl PackageMarker {
    pub fn get(&self, kind: TargetKind) -> &str {
        match kind {
            TargetKind::ClientEntities => &self.client_entities,
            TargetKind::ClientBuilders => &self.client_builders,
            TargetKind::ServerBuilders => &self.server_builders,
        }
    }
}

/// Laziness marker; every axis left out defaults to `true` (excluded)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LazyMarker {
    #[serde(default = "default_true")]
    pub server_read: bool,

    #[serde(default = "default_true")]
    pub server_write: bool,

    #[serde(default = "default_true")]
    pub client_read: bool,

    #[serde(default = "default_true")]
    pub client_write: bool,
}

impl Default for LazyMarker {
    fn default() -> Self {
        Self {
            server_read: true,
            server_write: true,
            client_read: true,
            client_write: true,
        }
    }
}

/// List or set marker
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CollectionMarker {
    #[serde(default)]
    pub element: Option<String>,

    #[serde(default)]
    pub implementation: Option<String>,
}

/// Map marker
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MapMarker {
    #[serde(default)]
    pub key: Option<String>,

    #[serde(default)]
    pub entry: Option<String>,

    #[serde(default)]
    pub implementation: Option<String>,
}

/// Scope of a transience marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransientMode {
    /// Hidden from every handler
    Public,
    /// Hidden from the attribute/element split only
    Internal,
}

/// An introspected bean property: name, type, accessors and markers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeanProperty {
    pub name: String,
    pub ty: JavaType,
    pub getter: String,
    pub setter: Option<String>,
    pub schema: PropertySchema,
}

/// An entity registered for generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityDef {
    pub schema: EntitySchema,
    pub properties: Vec<BeanProperty>,
}

impl EntityDef {
    /// Introspect a descriptor.
    ///
    /// Property order is kept; the synthetic `class` property is dropped and
    /// a repeated property name keeps its first occurrence.
    pub fn from_schema(schema: EntitySchema) -> GeneratorResult<Self> {
        let well_formed = matches!(
            JavaType::parse(&schema.name, ""),
            Ok(JavaType::Class(ref qualified)) if *qualified == schema.name
        );
        if !well_formed {
            return Err(GeneratorError::Schema(format!(
                "invalid entity name '{}'",
                schema.name
            )));
        }

        let package = package_of(&schema.name).to_string();
        let mut seen = HashSet::new();
        let mut properties = Vec::with_capacity(schema.properties.len());

        for prop in &schema.properties {
            if prop.name == CLASS_PROPERTY || !seen.insert(prop.name.clone()) {
                continue;
            }
            if prop.name.is_empty() {
                return Err(GeneratorError::Schema(format!(
                    "unnamed property in {}",
                    schema.name
                )));
            }

            let ty = JavaType::parse(&prop.ty, &package)?;
            let getter_prefix = if ty == JavaType::Primitive(Primitive::Boolean) {
                "is"
            } else {
                "get"
            };

            properties.push(BeanProperty {
                name: prop.name.clone(),
                getter: accessor_name(getter_prefix, &prop.name),
                setter: prop.setter.then(|| accessor_name("set", &prop.name)),
                ty,
                schema: prop.clone(),
            });
        }

        Ok(Self { schema, properties })
    }

    /// Qualified class name
    pub fn qualified_name(&self) -> &str {
        &self.schema.name
    }

    pub fn simple_name(&self) -> &str {
        simple_name(&self.schema.name)
    }

    pub fn package(&self) -> &str {
        package_of(&self.schema.name)
    }

    /// Type of this entity
    pub fn java_type(&self) -> JavaType {
        JavaType::class(self.schema.name.clone())
    }

    pub fn is_transient(&self) -> bool {
        self.schema.transient
    }
}
