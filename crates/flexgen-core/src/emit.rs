//! Emission context handed to every writer
//!
//! An [`Emitter`] is the explicit replacement for a "current generator"
//! global: it carries the session, the handler's writer set, the class
//! frame being emitted, the per-class import and helper state, and the
//! output buffer. Writers receive it by reference and never look anything
//! up elsewhere.

use crate::class_writer::ClassWriter;
use crate::config::{GeneratorConfig, TargetKind};
use crate::error::{GeneratorError, GeneratorResult};
use crate::generator::Session;
use crate::metadata::{Direction, NodePlacement, PropertyDescriptor, Visibility};
use crate::model::EntityDef;
use crate::naming::{package_of, qualify};
use crate::types::JavaType;
use crate::writer::{ContextHelper, HelperId, PropertyRegistry};
use std::collections::{BTreeSet, HashSet};
use tracing::{debug, trace, warn};

/// Upper bound on context-helper expansion waves per class
pub const MAX_HELPER_WAVES: usize = 64;

/// One class being generated by one handler
#[derive(Debug, Clone)]
pub struct ClassFrame {
    pub entity: EntityDef,
    pub package: String,
    pub class_name: String,
    /// Root element name of the entity
    pub node: String,
    pub superclass: Option<String>,
    pub interfaces: Vec<String>,
    pub attributes: Vec<PropertyDescriptor>,
    pub elements: Vec<PropertyDescriptor>,
}

impl ClassFrame {
    pub fn new(entity: EntityDef, package: String, class_name: String, node: String) -> Self {
        Self {
            entity,
            package,
            class_name,
            node,
            superclass: None,
            interfaces: Vec::new(),
            attributes: Vec::new(),
            elements: Vec::new(),
        }
    }

    pub fn qualified_class_name(&self) -> String {
        qualify(&self.package, &self.class_name)
    }
}

/// Per-class import set and context-helper bookkeeping
pub struct EmitState<H> {
    imports: BTreeSet<String>,
    queue: Vec<ContextHelper<H>>,
    seen: HashSet<HelperId>,
}

impl<H> Default for EmitState<H> {
    fn default() -> Self {
        Self {
            imports: BTreeSet::new(),
            queue: Vec::new(),
            seen: HashSet::new(),
        }
    }
}

impl<H> EmitState<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Imports in emission order
    pub fn imports(&self) -> &BTreeSet<String> {
        &self.imports
    }
}

pub struct Emitter<'a, H> {
    session: &'a Session,
    spec: &'a H,
    class: &'a ClassFrame,
    state: &'a mut EmitState<H>,
    out: &'a mut String,
    style: ClassWriter,
    target: TargetKind,
}

impl<'a, H> Emitter<'a, H> {
    pub fn new(
        session: &'a Session,
        spec: &'a H,
        class: &'a ClassFrame,
        state: &'a mut EmitState<H>,
        out: &'a mut String,
        style: ClassWriter,
        target: TargetKind,
    ) -> Self {
        Self {
            session,
            spec,
            class,
            state,
            out,
            style,
            target,
        }
    }

    pub fn session(&self) -> &'a Session {
        self.session
    }

    pub fn config(&self) -> &'a GeneratorConfig {
        self.session.config()
    }

    /// Writer set of the running handler
    pub fn spec(&self) -> &'a H {
        self.spec
    }

    pub fn class(&self) -> &'a ClassFrame {
        self.class
    }

    pub fn style(&self) -> ClassWriter {
        self.style
    }

    pub fn target(&self) -> TargetKind {
        self.target
    }

    pub fn write(&mut self, text: &str) {
        self.out.push_str(text);
    }

    /// Indented line terminated by a newline
    pub fn line(&mut self, level: usize, text: &str) {
        let indent = self.indent(level);
        self.out.push_str(&indent);
        self.out.push_str(text);
        self.out.push('\n');
    }

    pub fn indent(&self, level: usize) -> String {
        self.config().indent(level)
    }

    /// Opening brace of a block declared at `level`
    pub fn open_brace(&mut self, level: usize) {
        let brace = self.config().open_brace(level);
        self.out.push_str(&brace);
    }

    /// Block header at `level` followed by its opening brace
    pub fn open_block(&mut self, level: usize, header: &str) {
        let indent = self.indent(level);
        self.out.push_str(&indent);
        self.out.push_str(header);
        self.open_brace(level);
    }

    /// Closing brace of a block declared at `level`
    pub fn close_brace(&mut self, level: usize) {
        self.line(level, "}");
    }

    /// Record an import; same-package and default-package names are dropped
    pub fn import(&mut self, qualified: impl Into<String>) {
        let qualified = qualified.into();
        let package = package_of(&qualified);
        if package.is_empty() || package == self.class.package {
            return;
        }
        trace!(import = %qualified, "Import added");
        self.state.imports.insert(qualified);
    }

    /// Record the Java import a type needs, if any
    pub fn import_type(&mut self, ty: &JavaType) {
        if let Some(name) = ty.import_name() {
            self.import(name);
        }
    }

    /// Method name from the catalog
    pub fn method_name(&self, key: &str, args: &[&str]) -> GeneratorResult<String> {
        self.session.catalog().method_name(key, args)
    }

    /// Start a method: blank separator line and documentation.
    ///
    /// Returns the method name. `name_args` fill the name template and
    /// `doc_args` the documentation template.
    pub fn begin_method(
        &mut self,
        key: &str,
        name_args: &[&str],
        doc_args: &[&str],
    ) -> GeneratorResult<String> {
        let name = self.method_name(key, name_args)?;
        self.out.push('\n');
        if let Some(doc) = self.session.catalog().method_doc(key, doc_args) {
            let comment = ClassWriter::doc_comment(self.config(), &doc, self.style.method_level());
            self.out.push_str(&comment);
        }
        debug!(class = %self.class.class_name, method = %name, "Emitting method");
        Ok(name)
    }

    /// Queue a context helper unless an equal one was already requested.
    ///
    /// Returns whether the helper was queued.
    pub fn request_helper(&mut self, helper: ContextHelper<H>) -> bool {
        if !self.state.seen.insert(helper.id.clone()) {
            trace!(helper = %helper.id, "Context helper already requested");
            return false;
        }
        debug!(helper = %helper.id, "Context helper requested");
        self.state.queue.push(helper);
        true
    }

    /// Emit queued helpers in waves until no new helper is requested.
    ///
    /// Returns the number of helpers emitted.
    pub fn drain_helpers(&mut self) -> GeneratorResult<usize> {
        let mut waves = 0;
        let mut emitted = 0;

        while !self.state.queue.is_empty() {
            if waves == MAX_HELPER_WAVES {
                return Err(GeneratorError::HelperExpansionLimit(MAX_HELPER_WAVES));
            }
            waves += 1;

            let wave = std::mem::take(&mut self.state.queue);
            for helper in wave {
                (helper.emit)(self, &helper.types)?;
                emitted += 1;
            }
        }

        Ok(emitted)
    }

    /// Run `f` with another access style
    pub fn with_style<T>(
        &mut self,
        style: ClassWriter,
        f: impl FnOnce(&mut Self) -> GeneratorResult<T>,
    ) -> GeneratorResult<T> {
        let previous = std::mem::replace(&mut self.style, style);
        let result = f(self);
        self.style = previous;
        result
    }

    /// Run `f` against a scratch buffer and return what it wrote
    pub fn capture(
        &mut self,
        f: impl FnOnce(&mut Self) -> GeneratorResult<()>,
    ) -> GeneratorResult<String> {
        let saved = std::mem::take(&mut *self.out);
        let result = f(self);
        let captured = std::mem::replace(&mut *self.out, saved);
        result.map(|()| captured)
    }

    /// Write the access statement or expression for `prop` in the current style
    pub fn write_access(
        &mut self,
        var: &str,
        prop: &PropertyDescriptor,
        prefix: &str,
        suffix: &str,
        placement: Option<NodePlacement>,
    ) {
        let access = self
            .style
            .property_access(self.config(), var, prop, prefix, suffix, placement);
        match access {
            Some(text) => self.out.push_str(&text),
            None => trace!(property = %prop.name, "No access for read-only property"),
        }
    }

    /// Emit every property of `props` readable or writable in `direction`
    pub fn write_properties(
        &mut self,
        registry: &PropertyRegistry<H>,
        var: &str,
        props: &[PropertyDescriptor],
        direction: Direction,
    ) -> GeneratorResult<()> {
        for prop in props {
            self.write_property(registry, var, prop, direction)?;
        }
        Ok(())
    }

    /// Dispatch one property to the first accepting writer
    pub fn write_property(
        &mut self,
        registry: &PropertyRegistry<H>,
        var: &str,
        prop: &PropertyDescriptor,
        direction: Direction,
    ) -> GeneratorResult<()> {
        if prop.is_lazy(direction) {
            trace!(property = %prop.name, %direction, "Lazy property skipped");
            return Ok(());
        }
        if prop.is_transient(Visibility::Marshalling) {
            return Ok(());
        }

        match registry.dispatch(self, prop) {
            Some(writer) => {
                trace!(property = %prop.name, writer = writer.name, "Writer selected");
                (writer.emit)(self, var, prop)
            }
            None => {
                warn!(
                    class = %self.class.entity.qualified_name(),
                    property = %prop.name,
                    ty = %prop.ty,
                    "No writer accepts property"
                );
                Ok(())
            }
        }
    }

    /// Expression reading a single value of type `ty` from `var`.
    ///
    /// Dispatches a synthetic descriptor through `registry` in `style`.
    pub fn expression(
        &mut self,
        registry: &PropertyRegistry<H>,
        style: ClassWriter,
        var: &str,
        ty: &JavaType,
    ) -> GeneratorResult<String> {
        let proxy = self.session.metadata().synthetic(ty);
        self.with_style(style, |em| {
            em.capture(|em| em.write_property(registry, var, &proxy, Direction::ServerRead))
        })
    }

    /// Class name of the entity `ty` for a target, imported when needed
    pub fn class_ref(&mut self, kind: TargetKind, ty: &JavaType) -> GeneratorResult<String> {
        let Some(entity) = self.session.metadata().entity(ty) else {
            return Ok(ty.simple_name());
        };
        let name = self.session.class_name_for(kind, entity);
        let package = self.session.package_for(entity, kind)?;
        self.import(qualify(&package, &name));
        Ok(name)
    }

    /// Builder class of the entity `ty` for the running handler
    pub fn builder_ref(&mut self, ty: &JavaType) -> GeneratorResult<String> {
        self.class_ref(self.target, ty)
    }

    /// Java simple name of `ty`, imported when needed
    pub fn java_ref(&mut self, ty: &JavaType) -> String {
        self.import_type(ty);
        ty.simple_name()
    }

    /// Whether `ty` is an entity of this session
    pub fn is_entity(&self, ty: &JavaType) -> bool {
        self.session.metadata().is_entity(ty)
    }
}
