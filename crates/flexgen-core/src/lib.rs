//! flexgen-core - Entity-driven generation of Flex models and XML builders
//!
//! Each entity descriptor produces three classes:
//! - an AS3 model class with bindable accessors ([`As3Model`])
//! - an AS3 builder reading and writing E4X XML ([`As3BuilderSpec`])
//! - a Java builder reading and writing dom4j elements ([`Dom4jBuilderSpec`])
//!
//! A [`Generator`] drives every [`GeneratorHandler`] through the same
//! property iteration and hands the results to an [`OutputSink`].

mod catalog;
mod class_writer;
mod config;
mod conversion;
mod emit;
mod error;
mod generator;
mod handlers;
mod metadata;
mod model;
mod naming;
mod orchestrator;
mod schema;
mod sink;
mod types;
mod writer;

pub use catalog::{BASE_LOCALE, Catalog, format_message};
pub use class_writer::{ClassWriter, ENTRY_ELEMENT, MAP_KEY_ATTRIBUTE};
pub use config::{GeneratorConfig, OutputConfig, OutputMode, PackageConfig, TargetKind};
pub use conversion::{ScalarKind, ScalarValue};
pub use emit::{ClassFrame, EmitState, Emitter, MAX_HELPER_WAVES};
pub use error::{GeneratorError, GeneratorResult};
pub use generator::{GenerationReport, Generator, Session};
pub use handlers::{As3BuilderSpec, As3Model, Dom4jBuilderSpec};
pub use metadata::{
    Category, CollectionKind, Direction, Metadata, NodeBinding, NodePlacement, PropertyDescriptor,
    Visibility, class_node_name, package_for, resolve_package,
};
pub use model::{
    BeanProperty, BindableMarker, CollectionMarker, EntityDef, EntitySchema, LazyMarker,
    MapMarker, PackageMarker, PropertySchema, TransientMode,
};
pub use naming::{accessor_name, capitalize};
pub use orchestrator::{BuilderHandler, BuilderSpec, EmissionPhase, GeneratorHandler};
pub use schema::{Classpath, DESCRIPTOR_EXTENSION, SchemaFile};
pub use sink::{ConsoleSink, FileSink, GeneratedClass, MemorySink, OutputSink};
pub use types::{JavaType, Primitive};
pub use writer::{
    ContextHelper, HelperId, MethodRegistry, MethodWriter, PropertyRegistry, PropertyWriter,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        EntityDef, EntitySchema, GenerationReport, Generator, GeneratorConfig, GeneratorError,
        GeneratorHandler, GeneratorResult, MemorySink, OutputSink, TargetKind,
    };
}
