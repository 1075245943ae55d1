//! Generation driver
//!
//! A [`Generator`] owns one session: the configuration, the message
//! catalog, the registered entities and the active handlers. Each entity is
//! run through every handler before the next entity starts.

use crate::catalog::Catalog;
use crate::config::{GeneratorConfig, TargetKind};
use crate::error::{GeneratorError, GeneratorResult};
use crate::handlers::{As3BuilderSpec, As3Model, Dom4jBuilderSpec};
use crate::metadata::{self, Metadata, PropertyDescriptor};
use crate::model::EntityDef;
use crate::orchestrator::{BuilderHandler, GeneratorHandler};
use crate::schema::{Classpath, SchemaFile};
use crate::sink::OutputSink;
use crate::types::JavaType;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// Read-only state shared by every handler during generation
#[derive(Debug, Clone)]
pub struct Session {
    config: GeneratorConfig,
    catalog: Catalog,
    entities: BTreeMap<String, EntityDef>,
}

impl Session {
    pub fn new(config: GeneratorConfig, catalog: Catalog) -> Self {
        Self {
            config,
            catalog,
            entities: BTreeMap::new(),
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Registered entities by qualified name
    pub fn entities(&self) -> &BTreeMap<String, EntityDef> {
        &self.entities
    }

    pub fn metadata(&self) -> Metadata<'_> {
        Metadata::new(&self.entities)
    }

    pub fn is_entity(&self, ty: &JavaType) -> bool {
        self.metadata().is_entity(ty)
    }

    pub fn entity(&self, qualified: &str) -> Option<&EntityDef> {
        self.entities.get(qualified)
    }

    /// Resolved descriptors of an entity's properties
    pub fn describe(&self, entity: &EntityDef) -> GeneratorResult<Vec<PropertyDescriptor>> {
        self.metadata().describe(entity)
    }

    pub fn package_for(&self, entity: &EntityDef, kind: TargetKind) -> GeneratorResult<String> {
        metadata::package_for(entity, kind, &self.config)
    }

    pub fn class_node_name(&self, entity: &EntityDef) -> GeneratorResult<String> {
        metadata::class_node_name(entity)
    }

    /// Client model class name of an entity
    pub fn model_class_name(&self, entity: &EntityDef) -> String {
        self.config.model_class_name(entity.simple_name())
    }

    /// Name of the class generated for `entity` by a handler of `kind`
    pub fn class_name_for(&self, kind: TargetKind, entity: &EntityDef) -> String {
        match kind {
            TargetKind::ClientEntities => self.model_class_name(entity),
            TargetKind::ClientBuilders => {
                format!("{}{}", self.model_class_name(entity), self.config.builder_suffix)
            }
            TargetKind::ServerBuilders => {
                format!("{}{}", entity.simple_name(), self.config.builder_suffix)
            }
        }
    }

    fn insert(&mut self, entity: EntityDef) -> bool {
        if entity.is_transient() {
            debug!(class = %entity.qualified_name(), "Transient class skipped");
            return false;
        }
        debug!(class = %entity.qualified_name(), "Class registered");
        self.entities
            .insert(entity.qualified_name().to_string(), entity);
        true
    }
}

/// Outcome of one [`Generator::generate`] run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Entities processed
    pub classes: usize,
    /// Relative paths written successfully
    pub written: Vec<PathBuf>,
    /// Relative paths whose output failed, with the error
    pub failed: Vec<(PathBuf, String)>,
}

impl GenerationReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Generation session entry point
pub struct Generator {
    session: Session,
    handlers: Vec<Box<dyn GeneratorHandler>>,
}

impl std::fmt::Debug for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Generator")
            .field("session", &self.session)
            .field(
                "handlers",
                &self.handlers.iter().map(|h| h.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl Generator {
    /// Generator without handlers
    pub fn new(config: GeneratorConfig) -> GeneratorResult<Self> {
        config.validate()?;
        let catalog = Catalog::load(&config.locale, config.documentation.as_deref())?;
        Ok(Self {
            session: Session::new(config, catalog),
            handlers: Vec::new(),
        })
    }

    /// Generator with the client model, client builder and server builder
    pub fn with_default_handlers(config: GeneratorConfig) -> GeneratorResult<Self> {
        let mut generator = Self::new(config)?;
        generator.add_handler(Box::new(As3Model::new()));
        generator.add_handler(Box::new(BuilderHandler::new(As3BuilderSpec::new())));
        generator.add_handler(Box::new(BuilderHandler::new(Dom4jBuilderSpec::new())));
        Ok(generator)
    }

    pub fn add_handler(&mut self, handler: Box<dyn GeneratorHandler>) {
        debug!(handler = handler.name(), "Handler added");
        self.handlers.push(handler);
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Register one entity; transient classes are skipped.
    ///
    /// Returns whether the entity was registered.
    pub fn add_class(&mut self, entity: EntityDef) -> bool {
        self.session.insert(entity)
    }

    /// Register every entity of a descriptor file
    pub fn add_schema_file(&mut self, path: impl AsRef<Path>) -> GeneratorResult<usize> {
        let file = SchemaFile::from_file(path)?;
        self.add_schemas(file.entities)
    }

    /// Register every entity described in a classpath package
    pub fn add_package(&mut self, classpath: &Classpath, package: &str) -> GeneratorResult<usize> {
        let schemas = classpath.scan(package)?;
        let added = self.add_schemas(schemas)?;
        info!(package, added, "Package scanned");
        Ok(added)
    }

    fn add_schemas(
        &mut self,
        schemas: impl IntoIterator<Item = crate::model::EntitySchema>,
    ) -> GeneratorResult<usize> {
        let mut added = 0;
        for schema in schemas {
            if self.add_class(EntityDef::from_schema(schema)?) {
                added += 1;
            }
        }
        Ok(added)
    }

    /// Run every handler over every entity and hand the results to `sink`.
    ///
    /// Configuration errors abort the run and return every handler to
    /// [`EmissionPhase::Idle`](crate::orchestrator::EmissionPhase::Idle), so
    /// the generator can run again. A class the sink fails to write is
    /// logged and recorded in the report, and generation continues.
    pub fn generate(&mut self, sink: &mut dyn OutputSink) -> GeneratorResult<GenerationReport> {
        let mut report = GenerationReport::default();

        for entity in self.session.entities.values() {
            debug!(class = %entity.qualified_name(), "Generating");
            if let Err(err) =
                generate_class(&self.session, &mut self.handlers, entity, sink, &mut report)
            {
                error!(class = %entity.qualified_name(), error = %err, "Generation aborted");
                for handler in self.handlers.iter_mut() {
                    handler.reset();
                }
                return Err(err);
            }
            report.classes += 1;
        }

        info!(
            classes = report.classes,
            written = report.written.len(),
            failed = report.failed.len(),
            "Generation finished"
        );
        Ok(report)
    }
}

/// Drive every handler through one entity
fn generate_class(
    session: &Session,
    handlers: &mut [Box<dyn GeneratorHandler>],
    entity: &EntityDef,
    sink: &mut dyn OutputSink,
    report: &mut GenerationReport,
) -> GeneratorResult<()> {
    let props = session.describe(entity)?;

    for handler in handlers.iter_mut() {
        handler.class_begin(session, entity)?;
    }
    for prop in &props {
        for handler in handlers.iter_mut() {
            handler.property(session, prop)?;
        }
    }
    for handler in handlers.iter_mut() {
        let class = handler.class_end(session)?;
        let path = class.relative_path();
        match sink.write(&class) {
            Ok(()) => report.written.push(path),
            Err(e) => {
                let err = GeneratorError::from(e);
                error!(path = %path.display(), handler = handler.name(), error = %err, "Failed to write class");
                report.failed.push((path, err.to_string()));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "generator/generator_tests.rs"]
mod generator_tests;
