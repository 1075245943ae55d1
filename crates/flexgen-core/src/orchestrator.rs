//! Class emission orchestrator
//!
//! Every handler is driven through BEGIN, PROPERTIES and END once per
//! entity. [`BuilderHandler`] is the buffering implementation shared by the
//! XML builders: properties are only split into attribute and element lists
//! while they arrive, and the whole class is rendered at END once the body
//! has revealed which imports it needs.

use crate::class_writer::ClassWriter;
use crate::config::TargetKind;
use crate::emit::{ClassFrame, EmitState, Emitter};
use crate::error::{GeneratorError, GeneratorResult};
use crate::generator::Session;
use crate::metadata::{Category, PropertyDescriptor, Visibility};
use crate::model::EntityDef;
use crate::sink::GeneratedClass;
use crate::writer::MethodRegistry;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Emission phase of one handler
///
/// ```text
/// Idle → Begun → Properties* → Ended
///          ↑  └──────────────────┘↑ (class without properties)
///          └──────────────────────┘ (next class)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmissionPhase {
    /// No class started yet
    #[default]
    Idle,
    /// A class frame is open
    Begun,
    /// Receiving properties
    Properties,
    /// The class has been rendered
    Ended,
}

impl EmissionPhase {
    /// Check if this phase can move to `target`
    pub fn can_transition_to(&self, target: EmissionPhase) -> bool {
        use EmissionPhase::*;
        matches!(
            (self, target),
            (Idle, Begun)
                | (Begun, Properties)
                | (Properties, Properties)
                // Classes without properties
                | (Begun, Ended)
                | (Properties, Ended)
                // Next class
                | (Ended, Begun)
        )
    }

    /// Whether a class frame is open
    pub fn has_open_class(&self) -> bool {
        matches!(self, EmissionPhase::Begun | EmissionPhase::Properties)
    }

    /// Move to `target` or fail with [`GeneratorError::InvalidState`]
    pub fn advance(&mut self, target: EmissionPhase) -> GeneratorResult<()> {
        if !self.can_transition_to(target) {
            return Err(GeneratorError::InvalidState {
                expected: format!("a phase leading to {target}"),
                actual: self.to_string(),
            });
        }
        *self = target;
        Ok(())
    }
}

impl std::fmt::Display for EmissionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmissionPhase::Idle => write!(f, "Idle"),
            EmissionPhase::Begun => write!(f, "Begun"),
            EmissionPhase::Properties => write!(f, "Properties"),
            EmissionPhase::Ended => write!(f, "Ended"),
        }
    }
}

/// One target-output generator driven in lockstep with the others
pub trait GeneratorHandler {
    /// Kind of class produced
    fn target(&self) -> TargetKind;

    /// Name used in logs
    fn name(&self) -> &'static str;

    fn class_begin(&mut self, session: &Session, entity: &EntityDef) -> GeneratorResult<()>;

    fn property(&mut self, session: &Session, prop: &PropertyDescriptor) -> GeneratorResult<()>;

    fn class_end(&mut self, session: &Session) -> GeneratorResult<GeneratedClass>;

    /// Discard any open class and return to [`EmissionPhase::Idle`]
    fn reset(&mut self);
}

/// Writer set and class shape of a buffering XML builder
pub trait BuilderSpec: Sized + 'static {
    fn name(&self) -> &'static str;

    fn target(&self) -> TargetKind;

    /// Primary access style
    fn class_writer(&self) -> ClassWriter;

    /// Catalog key of the class documentation
    fn class_doc_key(&self) -> &'static str;

    /// Default methods of every generated class
    fn methods(&self) -> &MethodRegistry<Self>;

    fn superclass(&self) -> Option<&'static str> {
        None
    }

    /// Imports every generated class carries
    fn base_imports(&self) -> &'static [&'static str] {
        &[]
    }
}

/// Buffering handler running a [`BuilderSpec`]
#[derive(Debug)]
pub struct BuilderHandler<S> {
    spec: S,
    phase: EmissionPhase,
    frame: Option<ClassFrame>,
}

impl<S: BuilderSpec> BuilderHandler<S> {
    pub fn new(spec: S) -> Self {
        Self {
            spec,
            phase: EmissionPhase::Idle,
            frame: None,
        }
    }

    pub fn spec(&self) -> &S {
        &self.spec
    }

    pub fn phase(&self) -> EmissionPhase {
        self.phase
    }

    /// Attribute and element lists of the open class
    #[cfg(test)]
    pub(crate) fn frame(&self) -> Option<&ClassFrame> {
        self.frame.as_ref()
    }

    fn open_frame(&mut self) -> GeneratorResult<&mut ClassFrame> {
        self.frame.as_mut().ok_or_else(|| GeneratorError::InvalidState {
            expected: "an open class frame".to_string(),
            actual: self.phase.to_string(),
        })
    }
}

impl<S: BuilderSpec> GeneratorHandler for BuilderHandler<S> {
    fn target(&self) -> TargetKind {
        self.spec.target()
    }

    fn name(&self) -> &'static str {
        self.spec.name()
    }

    fn class_begin(&mut self, session: &Session, entity: &EntityDef) -> GeneratorResult<()> {
        self.phase.advance(EmissionPhase::Begun)?;

        let kind = self.spec.target();
        let mut frame = ClassFrame::new(
            entity.clone(),
            session.package_for(entity, kind)?,
            session.class_name_for(kind, entity),
            session.class_node_name(entity)?,
        );
        frame.superclass = self.spec.superclass().map(str::to_string);

        debug!(handler = self.spec.name(), class = %frame.qualified_class_name(), "Class begin");
        self.frame = Some(frame);
        Ok(())
    }

    fn property(&mut self, _session: &Session, prop: &PropertyDescriptor) -> GeneratorResult<()> {
        self.phase.advance(EmissionPhase::Properties)?;
        let frame = self.open_frame()?;

        if prop.is_transient(Visibility::Marshalling) {
            return Ok(());
        }

        if prop.node.is_attribute() {
            if prop.category != Category::Basic {
                return Err(GeneratorError::ComplexAttribute {
                    entity: frame.entity.qualified_name().to_string(),
                    property: prop.name.clone(),
                });
            }
            frame.attributes.push(prop.clone());
        } else {
            frame.elements.push(prop.clone());
        }
        Ok(())
    }

    fn class_end(&mut self, session: &Session) -> GeneratorResult<GeneratedClass> {
        self.phase.advance(EmissionPhase::Ended)?;
        let frame = self.frame.take().ok_or_else(|| GeneratorError::InvalidState {
            expected: "an open class frame".to_string(),
            actual: EmissionPhase::Ended.to_string(),
        })?;

        let style = self.spec.class_writer();
        let mut state = EmitState::new();
        let mut body = String::new();
        {
            let mut em = Emitter::new(
                session,
                &self.spec,
                &frame,
                &mut state,
                &mut body,
                style,
                self.spec.target(),
            );
            for import in self.spec.base_imports() {
                em.import(*import);
            }
            for writer in self.spec.methods().iter() {
                if (writer.accepts_class)(&em) {
                    (writer.emit)(&mut em)?;
                }
            }
            let helpers = em.drain_helpers()?;
            debug!(handler = self.spec.name(), class = %frame.class_name, helpers, "Body emitted");
        }

        let config = session.config();
        let mut source = style.package_declaration(config, &frame.package, state.imports());
        let doc = session.catalog().class_doc(
            self.spec.class_doc_key(),
            &[&frame.class_name, frame.entity.qualified_name()],
        );
        if let Some(doc) = doc {
            source.push_str(&ClassWriter::doc_comment(config, &doc, style.class_level()));
        }
        source.push_str(&style.class_declaration(
            config,
            &frame.class_name,
            frame.superclass.as_deref(),
            &frame.interfaces,
        ));
        source.push_str(&body);
        source.push_str(&style.class_terminator(config));

        Ok(GeneratedClass {
            target: self.spec.target(),
            package: frame.package,
            class_name: frame.class_name,
            source,
        })
    }

    fn reset(&mut self) {
        if self.phase.has_open_class() {
            debug!(handler = self.spec.name(), phase = %self.phase, "Open class discarded");
        }
        self.phase = EmissionPhase::Idle;
        self.frame = None;
    }
}
