//! Client model: AS3 classes with bindable accessors
//!
//! Unlike the builders this handler does not buffer. Imports are known
//! from the entity alone, so the header is written when the class begins
//! and each property is written as it arrives.

use crate::class_writer::ClassWriter;
use crate::config::{GeneratorConfig, TargetKind};
use crate::error::{GeneratorError, GeneratorResult};
use crate::generator::Session;
use crate::metadata::{PropertyDescriptor, Visibility};
use crate::model::EntityDef;
use crate::naming::qualify;
use crate::orchestrator::{EmissionPhase, GeneratorHandler};
use crate::sink::GeneratedClass;
use crate::types::JavaType;
use std::collections::BTreeSet;
use tracing::debug;

const SUPERCLASS: &str = "EventDispatcher";
const EVENT: &str = "flash.events.Event";
const EVENT_DISPATCHER: &str = "flash.events.EventDispatcher";
const DICTIONARY: &str = "flash.utils.Dictionary";

#[derive(Debug)]
struct OpenClass {
    package: String,
    class_name: String,
    source: String,
}

/// Handler writing one model class per entity
#[derive(Debug, Default)]
pub struct As3Model {
    phase: EmissionPhase,
    class: Option<OpenClass>,
}

impl As3Model {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> EmissionPhase {
        self.phase
    }

    fn open_class(&mut self) -> GeneratorResult<&mut OpenClass> {
        let phase = self.phase;
        self.class.as_mut().ok_or_else(|| GeneratorError::InvalidState {
            expected: "an open class".to_string(),
            actual: phase.to_string(),
        })
    }
}

/// AS3 type of a model property
fn model_type(session: &Session, ty: &JavaType) -> String {
    match session.metadata().entity(ty) {
        Some(entity) => session.model_class_name(entity),
        None => ty.as3_name(),
    }
}

/// Imports of the model class of `entity` living in `package`
fn model_imports(
    session: &Session,
    entity: &EntityDef,
    package: &str,
) -> GeneratorResult<BTreeSet<String>> {
    let mut imports = BTreeSet::from([EVENT.to_string(), EVENT_DISPATCHER.to_string()]);

    for prop in &entity.properties {
        if prop.schema.transient.is_some() {
            continue;
        }
        if prop.ty.is_map() {
            imports.insert(DICTIONARY.to_string());
        }
        if let Some(other) = session.metadata().entity(&prop.ty) {
            let other_package = session.package_for(other, TargetKind::ClientEntities)?;
            if !other_package.is_empty() && other_package != package {
                imports.insert(qualify(&other_package, &session.model_class_name(other)));
            }
        }
    }
    Ok(imports)
}

/// Field reference inside accessors
fn field(config: &GeneratorConfig, name: &str) -> String {
    if config.using_underscore {
        format!("_{name}")
    } else {
        format!("this.{name}")
    }
}

/// Field declaration, bindable metadata and accessors of one property
fn property_source(config: &GeneratorConfig, prop: &PropertyDescriptor, ty: &str) -> String {
    let i2 = config.indent(2);
    let i3 = config.indent(3);
    let field = field(config, &prop.name);
    let mut out = String::from("\n");

    let declared = if config.using_underscore {
        format!("_{}", prop.name)
    } else {
        prop.name.clone()
    };
    out.push_str(&format!("{i2}private var {declared}:{ty}"));
    match prop.default.as_deref() {
        Some("new") => out.push_str(&format!(" = new {ty}()")),
        Some(value) if ty == "String" => out.push_str(&format!(" = \"{value}\"")),
        Some(value) => out.push_str(&format!(" = {value}")),
        None => {}
    }
    out.push_str(";\n\n");

    if let Some(event) = &prop.bindable {
        if event.is_empty() {
            out.push_str(&format!("{i2}[Bindable()]\n"));
        } else {
            out.push_str(&format!("{i2}[Bindable(event=\"{event}\")]\n"));
        }
    }

    out.push_str(&format!("{i2}public function get {}():{ty}", prop.name));
    out.push_str(&config.open_brace(2));
    out.push_str(&format!("{i3}return {field};\n"));
    out.push_str(&format!("{i2}}}\n"));

    if !prop.is_read_only() {
        out.push('\n');
        out.push_str(&format!(
            "{i2}public function set {}(value:{ty}):void",
            prop.name
        ));
        out.push_str(&config.open_brace(2));
        out.push_str(&format!("{i3}{field} = value;\n"));
        if let Some(event) = prop.bindable.as_deref().filter(|e| !e.is_empty()) {
            out.push_str(&format!("{i3}dispatchEvent(new Event(\"{event}\"));\n"));
        }
        out.push_str(&format!("{i2}}}\n"));
    }
    out
}

impl GeneratorHandler for As3Model {
    fn target(&self) -> TargetKind {
        TargetKind::ClientEntities
    }

    fn name(&self) -> &'static str {
        "as3-model"
    }

    fn class_begin(&mut self, session: &Session, entity: &EntityDef) -> GeneratorResult<()> {
        self.phase.advance(EmissionPhase::Begun)?;

        let config = session.config();
        let style = ClassWriter::As3;
        let package = session.package_for(entity, TargetKind::ClientEntities)?;
        let class_name = session.class_name_for(TargetKind::ClientEntities, entity);
        let imports = model_imports(session, entity, &package)?;

        let mut source = style.package_declaration(config, &package, &imports);
        let doc = session
            .catalog()
            .class_doc("as3_model", &[&class_name, entity.qualified_name()]);
        if let Some(doc) = doc {
            source.push_str(&ClassWriter::doc_comment(config, &doc, style.class_level()));
        }
        source.push_str(&style.class_declaration(config, &class_name, Some(SUPERCLASS), &[]));

        debug!(handler = self.name(), class = %qualify(&package, &class_name), "Class begin");
        self.class = Some(OpenClass {
            package,
            class_name,
            source,
        });
        Ok(())
    }

    fn property(&mut self, session: &Session, prop: &PropertyDescriptor) -> GeneratorResult<()> {
        self.phase.advance(EmissionPhase::Properties)?;
        if prop.is_transient(Visibility::Marshalling) {
            return Ok(());
        }

        let ty = model_type(session, &prop.ty);
        let text = property_source(session.config(), prop, &ty);
        self.open_class()?.source.push_str(&text);
        Ok(())
    }

    fn class_end(&mut self, session: &Session) -> GeneratorResult<GeneratedClass> {
        self.phase.advance(EmissionPhase::Ended)?;
        let phase = self.phase;
        let OpenClass {
            package,
            class_name,
            mut source,
        } = self.class.take().ok_or_else(|| GeneratorError::InvalidState {
            expected: "an open class".to_string(),
            actual: phase.to_string(),
        })?;

        source.push_str(&ClassWriter::As3.class_terminator(session.config()));
        Ok(GeneratedClass {
            target: TargetKind::ClientEntities,
            package,
            class_name,
            source,
        })
    }

    fn reset(&mut self) {
        if self.phase.has_open_class() {
            debug!(handler = self.name(), phase = %self.phase, "Open class discarded");
        }
        self.phase = EmissionPhase::Idle;
        self.class = None;
    }
}

#[cfg(test)]
#[path = "as3_model/as3_model_tests.rs"]
mod as3_model_tests;
