//! Metadata resolution
//!
//! Turns introspected bean properties and their markers into
//! [`PropertyDescriptor`]s. This is the only place markers are read; every
//! writer works from the resolved descriptor.

use crate::config::{GeneratorConfig, TargetKind};
use crate::conversion::ScalarKind;
use crate::error::{GeneratorError, GeneratorResult};
use crate::model::{BeanProperty, EntityDef, LazyMarker, TransientMode};
use crate::types::JavaType;
use std::collections::BTreeMap;
use std::fmt;

/// Sigil marking a node name as an XML attribute
pub const ATTRIBUTE_SIGIL: char = '@';

/// Name of synthetic single-value descriptors
pub const SYNTHETIC_PROPERTY: &str = "type";

const DEFAULT_LIST_IMPL: &str = "java.util.ArrayList";
const DEFAULT_SET_IMPL: &str = "java.util.HashSet";
const DEFAULT_MAP_IMPL: &str = "java.util.HashMap";

/// Emission direction, one per laziness axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Server builder reading XML (`getInstance`)
    ServerRead,
    /// Server builder writing XML (`getElement`)
    ServerWrite,
    /// Client builder reading XML
    ClientRead,
    /// Client builder writing XML
    ClientWrite,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::ServerRead,
        Direction::ServerWrite,
        Direction::ClientRead,
        Direction::ClientWrite,
    ];
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::ServerRead => write!(f, "server_read"),
            Direction::ServerWrite => write!(f, "server_write"),
            Direction::ClientRead => write!(f, "client_read"),
            Direction::ClientWrite => write!(f, "client_write"),
        }
    }
}

/// Where a property lives in the XML
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodePlacement {
    Attribute,
    Element,
    /// Trimmed text of a child element
    Text,
}

/// Resolved node name and placement of a property
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeBinding {
    pub placement: NodePlacement,
    pub name: String,
}

impl NodeBinding {
    /// Resolve a node marker: `@x` binds attribute `x`, any other value
    /// binds element `value`, no marker binds element `property`.
    pub fn resolve(property: &str, marker: Option<&str>) -> Self {
        match marker {
            Some(value) => match value.strip_prefix(ATTRIBUTE_SIGIL) {
                Some(name) => Self {
                    placement: NodePlacement::Attribute,
                    name: name.to_string(),
                },
                None => Self {
                    placement: NodePlacement::Element,
                    name: value.to_string(),
                },
            },
            None => Self {
                placement: NodePlacement::Element,
                name: property.to_string(),
            },
        }
    }

    pub fn is_attribute(&self) -> bool {
        self.placement == NodePlacement::Attribute
    }

    /// E4X path segment (`@id` or `name`)
    pub fn e4x_path(&self) -> String {
        if self.is_attribute() {
            format!("{ATTRIBUTE_SIGIL}{}", self.name)
        } else {
            self.name.clone()
        }
    }
}

/// List or set flavour of a collection property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    List,
    Set,
}

impl CollectionKind {
    /// Marker name in descriptor files
    pub fn marker(&self) -> &'static str {
        match self {
            CollectionKind::List => "list",
            CollectionKind::Set => "set",
        }
    }
}

/// Structural category of a property
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Category {
    Basic,
    Entity,
    Array {
        element: JavaType,
    },
    Collection {
        kind: CollectionKind,
        element: JavaType,
        implementation: JavaType,
    },
    Map {
        key: JavaType,
        entry: JavaType,
        implementation: JavaType,
    },
}

impl Category {
    /// Element type of arrays and collections
    pub fn element(&self) -> Option<&JavaType> {
        match self {
            Category::Array { element } | Category::Collection { element, .. } => Some(element),
            _ => None,
        }
    }
}

/// Where a transience check is made
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Handing a property to the handlers at all
    Handlers,
    /// Splitting properties into attribute and element lists
    Marshalling,
}

/// A fully resolved bean property
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDescriptor {
    pub name: String,
    pub ty: JavaType,
    pub getter: String,
    pub setter: Option<String>,
    pub category: Category,
    pub node: NodeBinding,
    pub transient: Option<TransientMode>,
    pub lazy: Option<LazyMarker>,
    /// Bindable event; `Some("")` binds without a named event
    pub bindable: Option<String>,
    pub default: Option<String>,
    /// Stand-in for an element, key or entry value
    pub synthetic: bool,
}

impl PropertyDescriptor {
    /// Whether the property is skipped when emitting in `direction`.
    ///
    /// `true` on an axis means the property is excluded from that pass.
    pub fn is_lazy(&self, direction: Direction) -> bool {
        let Some(lazy) = self.lazy else {
            return false;
        };
        match direction {
            Direction::ServerRead => lazy.server_read,
            Direction::ServerWrite => lazy.server_write,
            Direction::ClientRead => lazy.client_read,
            Direction::ClientWrite => lazy.client_write,
        }
    }

    pub fn is_transient(&self, visibility: Visibility) -> bool {
        match (self.transient, visibility) {
            (Some(TransientMode::Public), _) => true,
            (Some(TransientMode::Internal), Visibility::Marshalling) => !self.synthetic,
            _ => false,
        }
    }

    pub fn is_read_only(&self) -> bool {
        self.setter.is_none()
    }

    pub fn is_entity(&self) -> bool {
        self.category == Category::Entity
    }
}

/// Marker reader for one generation session
#[derive(Debug, Clone, Copy)]
pub struct Metadata<'a> {
    entities: &'a BTreeMap<String, EntityDef>,
}

impl<'a> Metadata<'a> {
    pub fn new(entities: &'a BTreeMap<String, EntityDef>) -> Self {
        Self { entities }
    }

    /// Whether `ty` is registered for generation
    pub fn is_entity(&self, ty: &JavaType) -> bool {
        matches!(ty, JavaType::Class(name) if self.entities.contains_key(name))
    }

    /// Registered entity for a type
    pub fn entity(&self, ty: &JavaType) -> Option<&'a EntityDef> {
        match ty {
            JavaType::Class(name) => self.entities.get(name),
            _ => None,
        }
    }

    /// Resolve every property of an entity, in introspection order.
    ///
    /// PUBLIC-transient properties are dropped before their markers are read.
    pub fn describe(&self, entity: &EntityDef) -> GeneratorResult<Vec<PropertyDescriptor>> {
        entity
            .properties
            .iter()
            .filter(|prop| prop.schema.transient != Some(TransientMode::Public))
            .map(|prop| self.describe_property(entity, prop))
            .collect()
    }

    fn describe_property(
        &self,
        entity: &EntityDef,
        prop: &BeanProperty,
    ) -> GeneratorResult<PropertyDescriptor> {
        let schema = &prop.schema;
        let category = self.classify(entity, prop)?;

        if let Some(value) = &schema.default {
            validate_default(entity, prop, value)?;
        }

        let bindable = schema
            .bindable
            .as_ref()
            .or(entity.schema.bindable.as_ref())
            .map(|b| b.event.clone());

        Ok(PropertyDescriptor {
            name: prop.name.clone(),
            ty: prop.ty.clone(),
            getter: prop.getter.clone(),
            setter: prop.setter.clone(),
            category,
            node: NodeBinding::resolve(&prop.name, schema.node.as_deref()),
            transient: schema.transient,
            lazy: schema.lazy,
            bindable,
            default: schema.default.clone(),
            synthetic: false,
        })
    }

    /// Structural category of a property
    pub fn classify(&self, entity: &EntityDef, prop: &BeanProperty) -> GeneratorResult<Category> {
        let schema = &prop.schema;
        let package = entity.package();
        let missing = |marker: &'static str| GeneratorError::MissingElementType {
            entity: entity.qualified_name().to_string(),
            property: prop.name.clone(),
            marker,
        };

        if let Some(component) = prop.ty.component() {
            return Ok(Category::Array {
                element: component.clone(),
            });
        }

        if prop.ty.is_map() {
            if let Some(map) = &schema.map {
                let (Some(key), Some(entry)) = (&map.key, &map.entry) else {
                    return Err(missing("map"));
                };
                return Ok(Category::Map {
                    key: JavaType::parse(key, package)?,
                    entry: JavaType::parse(entry, package)?,
                    implementation: JavaType::parse(
                        map.implementation.as_deref().unwrap_or(DEFAULT_MAP_IMPL),
                        package,
                    )?,
                });
            }
            return Ok(Category::Basic);
        }

        if prop.ty.is_collection() {
            let marker = match (&schema.list, &schema.set) {
                (Some(list), _) => Some((CollectionKind::List, list, DEFAULT_LIST_IMPL)),
                (None, Some(set)) => Some((CollectionKind::Set, set, DEFAULT_SET_IMPL)),
                (None, None) => None,
            };
            if let Some((kind, marker, default_impl)) = marker {
                let Some(element) = &marker.element else {
                    return Err(missing(kind.marker()));
                };
                return Ok(Category::Collection {
                    kind,
                    element: JavaType::parse(element, package)?,
                    implementation: JavaType::parse(
                        marker.implementation.as_deref().unwrap_or(default_impl),
                        package,
                    )?,
                });
            }
            return Ok(Category::Basic);
        }

        if self.is_entity(&prop.ty) {
            return Ok(Category::Entity);
        }

        Ok(Category::Basic)
    }

    /// Single-value descriptor standing in for an element, key or entry
    pub fn synthetic(&self, ty: &JavaType) -> PropertyDescriptor {
        let category = if let Some(component) = ty.component() {
            Category::Array {
                element: component.clone(),
            }
        } else if self.is_entity(ty) {
            Category::Entity
        } else {
            Category::Basic
        };

        PropertyDescriptor {
            name: SYNTHETIC_PROPERTY.to_string(),
            ty: ty.clone(),
            getter: "getType".to_string(),
            setter: Some("setType".to_string()),
            category,
            node: NodeBinding::resolve(SYNTHETIC_PROPERTY, None),
            transient: Some(TransientMode::Internal),
            lazy: None,
            bindable: None,
            default: None,
            synthetic: true,
        }
    }
}

fn validate_default(entity: &EntityDef, prop: &BeanProperty, value: &str) -> GeneratorResult<()> {
    if value == "new" {
        return Ok(());
    }
    match ScalarKind::of(&prop.ty) {
        Some(ScalarKind::String) | None => Ok(()),
        Some(kind) => kind
            .parse_literal(value)
            .map(|_| ())
            .map_err(|reason| GeneratorError::InvalidDefault {
                entity: entity.qualified_name().to_string(),
                property: prop.name.clone(),
                value: value.to_string(),
                reason,
            }),
    }
}

/// Root element name of an entity; the attribute sigil is rejected
pub fn class_node_name(entity: &EntityDef) -> GeneratorResult<String> {
    match entity.schema.node.as_deref() {
        Some(value) if value.starts_with(ATTRIBUTE_SIGIL) => Err(
            GeneratorError::AttributeClassNode(entity.qualified_name().to_string()),
        ),
        Some(value) => Ok(value.to_string()),
        None => Ok(entity.simple_name().to_string()),
    }
}

/// Resolve a package declaration against the entity's own package.
///
/// - `/x.y` is used verbatim without the leading `/`
/// - `.` is the entity's package
/// - each leading `../` walks up one segment; a bare `../` is the parent
/// - anything else is appended to what remains
pub fn resolve_package(entity_package: &str, declaration: &str) -> Result<String, String> {
    if declaration.is_empty() {
        return Err("a package declaration cannot be empty".to_string());
    }

    if let Some(rooted) = declaration.strip_prefix('/') {
        return Ok(rooted.to_string());
    }

    if declaration == "." {
        return Ok(entity_package.to_string());
    }

    let mut segments: Vec<&str> = entity_package
        .split('.')
        .filter(|s| !s.is_empty())
        .collect();
    let mut rest = declaration.strip_prefix("./").unwrap_or(declaration);

    while let Some(stripped) = rest.strip_prefix("../") {
        if segments.pop().is_none() {
            return Err(format!("'{declaration}' walks above the root package"));
        }
        rest = stripped;
    }

    let mut package = segments.join(".");
    let rest = rest.trim_end_matches('/').replace('/', ".");
    if !rest.is_empty() {
        if !package.is_empty() {
            package.push('.');
        }
        package.push_str(&rest);
    }
    Ok(package)
}

/// Package of the class generated for `entity` by a handler of `kind`.
///
/// A non-empty slot of the entity's package marker wins over the
/// configured default for that kind.
pub fn package_for(
    entity: &EntityDef,
    kind: TargetKind,
    config: &GeneratorConfig,
) -> GeneratorResult<String> {
    let declaration = entity
        .schema
        .package
        .as_ref()
        .map(|marker| marker.get(kind))
        .filter(|decl| !decl.is_empty())
        .unwrap_or_else(|| config.packages.get(kind));

    resolve_package(entity.package(), declaration).map_err(|reason| {
        GeneratorError::InvalidPackage {
            entity: entity.qualified_name().to_string(),
            declaration: declaration.to_string(),
            reason,
        }
    })
}
