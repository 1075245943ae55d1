//! Writer registries
//!
//! A writer is a plain record of priority, predicate and emit function.
//! Registries keep writers sorted by descending priority with ties in
//! registration order.
//!
//! - [`PropertyRegistry`]: the first accepting writer emits, the rest are
//!   never consulted. Priorities therefore rank writers by specificity.
//! - [`MethodRegistry`]: every accepting writer emits one whole method.
//! - [`ContextHelper`]: a method requested while emitting, identified by
//!   [`HelperId`] so equal requests collapse to one method.

use crate::emit::Emitter;
use crate::error::GeneratorResult;
use crate::metadata::PropertyDescriptor;
use crate::types::JavaType;
use std::cmp::Reverse;
use std::fmt;

/// Predicate of a property writer
pub type AcceptFn<H> = fn(&Emitter<'_, H>, &PropertyDescriptor) -> bool;

/// Emit function of a property writer; the `&str` is the receiver variable
pub type EmitFn<H> = fn(&mut Emitter<'_, H>, &str, &PropertyDescriptor) -> GeneratorResult<()>;

/// Emits the code reading or writing one property
pub struct PropertyWriter<H> {
    pub name: &'static str,
    pub priority: i32,
    pub accepts: AcceptFn<H>,
    pub emit: EmitFn<H>,
}

impl<H> PropertyWriter<H> {
    pub fn new(name: &'static str, priority: i32, accepts: AcceptFn<H>, emit: EmitFn<H>) -> Self {
        Self {
            name,
            priority,
            accepts,
            emit,
        }
    }
}

impl<H> fmt::Debug for PropertyWriter<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyWriter")
            .field("name", &self.name)
            .field("priority", &self.priority)
            .finish()
    }
}

/// Priority-ordered property writers
pub struct PropertyRegistry<H> {
    writers: Vec<PropertyWriter<H>>,
}

impl<H> Default for PropertyRegistry<H> {
    fn default() -> Self {
        Self {
            writers: Vec::new(),
        }
    }
}

impl<H> PropertyRegistry<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a writer, keeping the descending priority order
    pub fn register(&mut self, writer: PropertyWriter<H>) {
        self.writers.push(writer);
        self.writers.sort_by_key(|w| Reverse(w.priority));
    }

    /// Builder-style [`register`](Self::register)
    pub fn with(mut self, writer: PropertyWriter<H>) -> Self {
        self.register(writer);
        self
    }

    /// First writer accepting `prop`
    pub fn dispatch(&self, em: &Emitter<'_, H>, prop: &PropertyDescriptor) -> Option<&PropertyWriter<H>> {
        self.writers.iter().find(|w| (w.accepts)(em, prop))
    }

    /// Writer names in dispatch order
    pub fn names(&self) -> Vec<&'static str> {
        self.writers.iter().map(|w| w.name).collect()
    }

    pub fn len(&self) -> usize {
        self.writers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.writers.is_empty()
    }
}

/// Predicate deciding whether a class needs a method
pub type AcceptClassFn<H> = fn(&Emitter<'_, H>) -> bool;

/// Emit function of a whole method
pub type MethodFn<H> = fn(&mut Emitter<'_, H>) -> GeneratorResult<()>;

/// Emits one method of every generated class
pub struct MethodWriter<H> {
    /// Catalog key of the method
    pub key: &'static str,
    pub priority: i32,
    pub accepts_class: AcceptClassFn<H>,
    pub emit: MethodFn<H>,
}

fn every_class<H>(_: &Emitter<'_, H>) -> bool {
    true
}

impl<H> MethodWriter<H> {
    /// Writer with priority 0 accepting every class
    pub fn new(key: &'static str, emit: MethodFn<H>) -> Self {
        Self {
            key,
            priority: 0,
            accepts_class: every_class::<H>,
            emit,
        }
    }

    pub fn with_accepts_class(mut self, accepts_class: AcceptClassFn<H>) -> Self {
        self.accepts_class = accepts_class;
        self
    }
}

impl<H> fmt::Debug for MethodWriter<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodWriter")
            .field("key", &self.key)
            .field("priority", &self.priority)
            .finish()
    }
}

/// Priority-ordered method writers
pub struct MethodRegistry<H> {
    writers: Vec<MethodWriter<H>>,
}

impl<H> Default for MethodRegistry<H> {
    fn default() -> Self {
        Self {
            writers: Vec::new(),
        }
    }
}

impl<H> MethodRegistry<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, writer: MethodWriter<H>) {
        self.writers.push(writer);
        self.writers.sort_by_key(|w| Reverse(w.priority));
    }

    pub fn with(mut self, writer: MethodWriter<H>) -> Self {
        self.register(writer);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &MethodWriter<H>> {
        self.writers.iter()
    }

    /// Method keys in emission order
    pub fn keys(&self) -> Vec<&'static str> {
        self.writers.iter().map(|w| w.key).collect()
    }

    pub fn len(&self) -> usize {
        self.writers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.writers.is_empty()
    }
}

/// Identity of a context helper: helper kind and the type it serves
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HelperId {
    pub kind: &'static str,
    pub type_name: String,
}

impl HelperId {
    pub fn new(kind: &'static str, type_name: impl Into<String>) -> Self {
        Self {
            kind,
            type_name: type_name.into(),
        }
    }
}

impl fmt::Display for HelperId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.type_name.is_empty() {
            f.write_str(self.kind)
        } else {
            write!(f, "{}<{}>", self.kind, self.type_name)
        }
    }
}

/// Emit function of a context helper, given the types it was requested for
pub type HelperFn<H> = fn(&mut Emitter<'_, H>, &[JavaType]) -> GeneratorResult<()>;

/// A method requested on demand while emitting a class
pub struct ContextHelper<H> {
    pub id: HelperId,
    pub types: Vec<JavaType>,
    pub emit: HelperFn<H>,
}

impl<H> ContextHelper<H> {
    pub fn new(id: HelperId, types: Vec<JavaType>, emit: HelperFn<H>) -> Self {
        Self { id, types, emit }
    }
}

impl<H> fmt::Debug for ContextHelper<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextHelper")
            .field("id", &self.id)
            .field("types", &self.types)
            .finish()
    }
}
