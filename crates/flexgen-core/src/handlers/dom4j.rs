//! Server XML builder: Java with dom4j
//!
//! Every generated class has `getInstance(Element)` and `getElement(bean)`
//! plus the entity collection, array and map helpers. Helpers for basic
//! element, key and entry types are requested per property and emitted
//! once per type.

use crate::class_writer::{ClassWriter, ENTRY_ELEMENT, MAP_KEY_ATTRIBUTE};
use crate::config::TargetKind;
use crate::conversion::ScalarKind;
use crate::emit::Emitter;
use crate::error::{GeneratorError, GeneratorResult};
use crate::metadata::{Category, Direction, NodePlacement, PropertyDescriptor};
use crate::naming::capitalize;
use crate::orchestrator::BuilderSpec;
use crate::types::JavaType;
use crate::writer::{ContextHelper, HelperId, MethodRegistry, MethodWriter, PropertyRegistry, PropertyWriter};

const GET_INSTANCE: &str = "dom4j.get_instance";
const GET_ELEMENT: &str = "dom4j.get_element";
const GET_ENTITY_COLLECTION: &str = "dom4j.get_entity_collection";
const GET_ENTITY_ARRAY_ELEMENT: &str = "dom4j.get_entity_array_element";
const GET_ENTITY_COLLECTION_ELEMENT: &str = "dom4j.get_entity_collection_element";
const GET_ENTITY_MAP_ELEMENT: &str = "dom4j.get_entity_map_element";
const GET_ARRAY: &str = "dom4j.get_array";
const GET_COLLECTION: &str = "dom4j.get_collection";
const GET_MAP: &str = "dom4j.get_map";
const GET_ARRAY_ELEMENT: &str = "dom4j.get_array_element";
const GET_COLLECTION_ELEMENT: &str = "dom4j.get_collection_element";
const GET_MAP_ELEMENT: &str = "dom4j.get_map_element";

const DOM4J_ELEMENT: &str = "org.dom4j.Element";
const DOM4J_HELPER: &str = "org.dom4j.DocumentHelper";

type Em<'a> = Emitter<'a, Dom4jBuilderSpec>;

/// Writer set of the Java/dom4j builder
pub struct Dom4jBuilderSpec {
    readers: PropertyRegistry<Self>,
    elements: PropertyRegistry<Self>,
    methods: MethodRegistry<Self>,
}

impl Default for Dom4jBuilderSpec {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Dom4jBuilderSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dom4jBuilderSpec")
            .field("readers", &self.readers.names())
            .field("elements", &self.elements.names())
            .field("methods", &self.methods.keys())
            .finish()
    }
}

impl Dom4jBuilderSpec {
    pub fn new() -> Self {
        let readers = PropertyRegistry::new()
            .with(PropertyWriter::new("scalar", 0, accepts_scalar, read_scalar))
            .with(PropertyWriter::new("entity", 5, accepts_entity, read_entity))
            .with(PropertyWriter::new("array", 5, accepts_array, read_array))
            .with(PropertyWriter::new("collection", 5, accepts_collection, read_collection))
            .with(PropertyWriter::new("map", 5, accepts_map, read_map));

        let elements = PropertyRegistry::new()
            .with(PropertyWriter::new("array", 3, accepts_array, write_array))
            .with(PropertyWriter::new("collection", 3, accepts_collection, write_collection))
            .with(PropertyWriter::new("entity", 1, accepts_entity, write_entity))
            .with(PropertyWriter::new("map", 1, accepts_map, write_map))
            .with(PropertyWriter::new("simple", 0, is_primary, write_simple));

        let methods = MethodRegistry::new()
            .with(MethodWriter::new(GET_INSTANCE, emit_get_instance))
            .with(MethodWriter::new(GET_ELEMENT, emit_get_element))
            .with(MethodWriter::new(GET_ENTITY_COLLECTION, emit_get_entity_collection))
            .with(MethodWriter::new(GET_ENTITY_ARRAY_ELEMENT, emit_get_entity_array_element))
            .with(MethodWriter::new(
                GET_ENTITY_COLLECTION_ELEMENT,
                emit_get_entity_collection_element,
            ))
            .with(MethodWriter::new(GET_ENTITY_MAP_ELEMENT, emit_get_entity_map_element));

        Self {
            readers,
            elements,
            methods,
        }
    }

    /// Writers used by `getInstance`
    pub fn readers(&self) -> &PropertyRegistry<Self> {
        &self.readers
    }

    /// Writers used by `getElement`
    pub fn elements(&self) -> &PropertyRegistry<Self> {
        &self.elements
    }
}

impl BuilderSpec for Dom4jBuilderSpec {
    fn name(&self) -> &'static str {
        "dom4j"
    }

    fn target(&self) -> TargetKind {
        TargetKind::ServerBuilders
    }

    fn class_writer(&self) -> ClassWriter {
        ClassWriter::Dom4j
    }

    fn class_doc_key(&self) -> &'static str {
        "dom4j_builder"
    }

    fn methods(&self) -> &MethodRegistry<Self> {
        &self.methods
    }

    fn base_imports(&self) -> &'static [&'static str] {
        &[DOM4J_ELEMENT]
    }
}

// ============================================================================
// Predicates
// ============================================================================

fn is_primary(em: &Em<'_>, _: &PropertyDescriptor) -> bool {
    em.style().is_primary()
}

fn accepts_scalar(_: &Em<'_>, prop: &PropertyDescriptor) -> bool {
    prop.category == Category::Basic && ScalarKind::of(&prop.ty).is_some()
}

fn accepts_entity(em: &Em<'_>, prop: &PropertyDescriptor) -> bool {
    em.style().is_primary() && prop.is_entity()
}

fn accepts_array(em: &Em<'_>, prop: &PropertyDescriptor) -> bool {
    em.style().is_primary()
        && matches!(&prop.category, Category::Array { element } if !element.is_array())
}

fn accepts_collection(em: &Em<'_>, prop: &PropertyDescriptor) -> bool {
    em.style().is_primary() && matches!(prop.category, Category::Collection { .. })
}

fn accepts_map(em: &Em<'_>, prop: &PropertyDescriptor) -> bool {
    em.style().is_primary() && matches!(prop.category, Category::Map { .. })
}

// ============================================================================
// Readers (getInstance)
// ============================================================================

fn read_scalar(em: &mut Em<'_>, var: &str, prop: &PropertyDescriptor) -> GeneratorResult<()> {
    if let Some(kind) = ScalarKind::of(&prop.ty) {
        let (prefix, suffix) = kind.java_parse();
        em.write_access(var, prop, prefix, suffix, None);
    }
    Ok(())
}

fn read_entity(em: &mut Em<'_>, var: &str, prop: &PropertyDescriptor) -> GeneratorResult<()> {
    let builder = em.builder_ref(&prop.ty)?;
    let method = em.method_name(GET_INSTANCE, &[])?;
    em.write_access(
        var,
        prop,
        &format!("{builder}.{method}("),
        ")",
        Some(NodePlacement::Element),
    );
    Ok(())
}

fn read_array(em: &mut Em<'_>, var: &str, prop: &PropertyDescriptor) -> GeneratorResult<()> {
    let Category::Array { element } = &prop.category else {
        return Ok(());
    };
    let simple = capitalize(&element.simple_name());
    let name = em.method_name(GET_ARRAY, &[&simple])?;
    em.request_helper(ContextHelper::new(
        HelperId::new(GET_ARRAY, element.simple_name()),
        vec![element.clone()],
        emit_get_array,
    ));
    em.write_access(var, prop, &format!("{name}("), ")", Some(NodePlacement::Element));
    Ok(())
}

fn read_collection(em: &mut Em<'_>, var: &str, prop: &PropertyDescriptor) -> GeneratorResult<()> {
    let Category::Collection {
        element,
        implementation,
        ..
    } = &prop.category
    else {
        return Ok(());
    };
    let implementation = em.java_ref(implementation);
    em.import_type(element);
    let wrapper = element.wrapper_name();

    let call = if em.is_entity(element) {
        let builder = em.builder_ref(element)?;
        format!("{builder}.{}", em.method_name(GET_ENTITY_COLLECTION, &[])?)
    } else {
        let name = em.method_name(GET_COLLECTION, &[&capitalize(&wrapper)])?;
        em.request_helper(ContextHelper::new(
            HelperId::new(GET_COLLECTION, wrapper.clone()),
            vec![element.clone()],
            emit_get_collection,
        ));
        name
    };

    let prefix = format!("{call}(\n{}new {implementation}<{wrapper}>(), ", em.indent(4));
    em.write_access(var, prop, &prefix, ")", Some(NodePlacement::Element));
    Ok(())
}

fn read_map(em: &mut Em<'_>, var: &str, prop: &PropertyDescriptor) -> GeneratorResult<()> {
    let Category::Map {
        key,
        entry,
        implementation,
    } = &prop.category
    else {
        return Ok(());
    };
    if em.is_entity(key) {
        return Err(GeneratorError::ComplexAttribute {
            entity: em.class().entity.qualified_name().to_string(),
            property: prop.name.clone(),
        });
    }

    let implementation = em.java_ref(implementation);
    em.import_type(key);
    em.import_type(entry);
    let (key_name, entry_name) = (key.wrapper_name(), entry.wrapper_name());
    let types = format!("{}{}", capitalize(&key_name), capitalize(&entry_name));
    let name = em.method_name(GET_MAP, &[&types])?;
    em.request_helper(ContextHelper::new(
        HelperId::new(GET_MAP, types),
        vec![key.clone(), entry.clone()],
        emit_get_map,
    ));

    let prefix = format!(
        "{name}(\n{}new {implementation}<{key_name}, {entry_name}>(), ",
        em.indent(4)
    );
    em.write_access(var, prop, &prefix, ")", Some(NodePlacement::Element));
    Ok(())
}

/// Expression reading one element, key or entry value from `var`
fn value_expression(
    em: &mut Em<'_>,
    style: ClassWriter,
    var: &str,
    ty: &JavaType,
) -> GeneratorResult<String> {
    if em.is_entity(ty) {
        let builder = em.builder_ref(ty)?;
        let method = em.method_name(GET_INSTANCE, &[])?;
        return Ok(format!("{builder}.{method}({var})"));
    }
    let spec = em.spec();
    em.expression(&spec.readers, style, var, ty)
}

// ============================================================================
// Element writers (getElement)
// ============================================================================

fn write_nested(em: &mut Em<'_>, call: &str, prop: &PropertyDescriptor) {
    em.line(2, &format!("nested = {call};"));
    em.open_block(2, "if(nested != null)");
    em.line(3, &format!("nested.setName(\"{}\");", prop.node.name));
    em.line(3, "el.add(nested);");
    em.close_brace(2);
}

fn write_simple(em: &mut Em<'_>, var: &str, prop: &PropertyDescriptor) -> GeneratorResult<()> {
    em.line(2, &format!("str = String.valueOf({var}.{}());", prop.getter));
    em.line(
        2,
        &format!(
            "el.addElement(\"{}\").setText((str == null) ? \"\" : str);",
            prop.node.name
        ),
    );
    Ok(())
}

fn write_entity(em: &mut Em<'_>, var: &str, prop: &PropertyDescriptor) -> GeneratorResult<()> {
    let builder = em.builder_ref(&prop.ty)?;
    let method = em.method_name(GET_ELEMENT, &[])?;
    write_nested(em, &format!("{builder}.{method}({var}.{}())", prop.getter), prop);
    Ok(())
}

fn write_array(em: &mut Em<'_>, var: &str, prop: &PropertyDescriptor) -> GeneratorResult<()> {
    let Category::Array { element } = &prop.category else {
        return Ok(());
    };
    let call = if em.is_entity(element) {
        let builder = em.builder_ref(element)?;
        format!("{builder}.{}", em.method_name(GET_ENTITY_ARRAY_ELEMENT, &[])?)
    } else {
        let simple = capitalize(&element.simple_name());
        let name = em.method_name(GET_ARRAY_ELEMENT, &[&simple])?;
        em.request_helper(ContextHelper::new(
            HelperId::new(GET_ARRAY_ELEMENT, element.simple_name()),
            vec![element.clone()],
            emit_get_array_element,
        ));
        name
    };
    write_nested(em, &format!("{call}({var}.{}())", prop.getter), prop);
    Ok(())
}

fn write_collection(em: &mut Em<'_>, var: &str, prop: &PropertyDescriptor) -> GeneratorResult<()> {
    let Category::Collection { element, .. } = &prop.category else {
        return Ok(());
    };
    let call = if em.is_entity(element) {
        let builder = em.builder_ref(element)?;
        format!(
            "{builder}.{}",
            em.method_name(GET_ENTITY_COLLECTION_ELEMENT, &[])?
        )
    } else {
        let name = em.method_name(GET_COLLECTION_ELEMENT, &[])?;
        em.request_helper(ContextHelper::new(
            HelperId::new(GET_COLLECTION_ELEMENT, ""),
            Vec::new(),
            emit_get_collection_element,
        ));
        name
    };
    write_nested(em, &format!("{call}({var}.{}())", prop.getter), prop);
    Ok(())
}

fn write_map(em: &mut Em<'_>, var: &str, prop: &PropertyDescriptor) -> GeneratorResult<()> {
    let Category::Map { entry, .. } = &prop.category else {
        return Ok(());
    };
    let call = if em.is_entity(entry) {
        let builder = em.builder_ref(entry)?;
        format!(
            "{builder}.\n{}{}",
            em.indent(4),
            em.method_name(GET_ENTITY_MAP_ELEMENT, &[])?
        )
    } else {
        let name = em.method_name(GET_MAP_ELEMENT, &[])?;
        em.request_helper(ContextHelper::new(
            HelperId::new(GET_MAP_ELEMENT, ""),
            Vec::new(),
            emit_get_map_element,
        ));
        name
    };
    write_nested(em, &format!("{call}({var}.{}())", prop.getter), prop);
    Ok(())
}

// ============================================================================
// Default methods
// ============================================================================

fn entity_name(em: &mut Em<'_>) -> String {
    let ty = em.class().entity.java_type();
    em.java_ref(&ty)
}

fn emit_get_instance(em: &mut Em<'_>) -> GeneratorResult<()> {
    let spec = em.spec();
    let frame = em.class();
    let bean = entity_name(em);
    let name = em.begin_method(GET_INSTANCE, &[], &[&bean])?;

    em.open_block(1, &format!("public static {bean} {name}(Element el)"));
    em.line(2, "if(el == null) return null;");
    em.line(2, &format!("final {bean} o = new {bean}();"));
    em.write_properties(&spec.readers, "o", &frame.attributes, Direction::ServerRead)?;
    em.write_properties(&spec.readers, "o", &frame.elements, Direction::ServerRead)?;
    em.line(2, "return o;");
    em.close_brace(1);
    Ok(())
}

fn emit_get_element(em: &mut Em<'_>) -> GeneratorResult<()> {
    let spec = em.spec();
    let frame = em.class();
    let bean = entity_name(em);
    let name = em.begin_method(GET_ELEMENT, &[], &[&bean])?;
    em.import(DOM4J_HELPER);

    em.open_block(1, &format!("public static Element {name}({bean} o)"));
    em.line(2, "if(o == null) return null;");
    em.line(
        2,
        &format!("final Element el = DocumentHelper.createElement(\"{}\");", frame.node),
    );
    em.line(2, "String str = null;");
    em.line(2, "Element nested = null;");

    for attr in &frame.attributes {
        if attr.is_lazy(Direction::ServerWrite) {
            continue;
        }
        em.line(2, &format!("str = String.valueOf(o.{}());", attr.getter));
        em.line(
            2,
            &format!(
                "el.addAttribute(\"{}\", ((str == null) ? \"\" : str));",
                attr.node.name
            ),
        );
    }
    em.write_properties(&spec.elements, "o", &frame.elements, Direction::ServerWrite)?;

    em.line(2, "return el;");
    em.close_brace(1);
    Ok(())
}

fn emit_get_entity_collection(em: &mut Em<'_>) -> GeneratorResult<()> {
    let bean = entity_name(em);
    let get_instance = em.method_name(GET_INSTANCE, &[])?;
    let name = em.begin_method(GET_ENTITY_COLLECTION, &[], &[&bean])?;
    em.import("java.util.Collection");

    let header = format!(
        "public static <T extends Collection<{bean}>>\n{}T {name}(T coll, Element els)",
        em.indent(3)
    );
    em.open_block(1, &header);
    em.line(2, "if(els == null) return null;");
    em.open_block(2, "for(Object obj : els.elements())");
    em.line(3, &format!("coll.add({get_instance}((Element)obj));"));
    em.close_brace(2);
    em.line(2, "return coll;");
    em.close_brace(1);
    Ok(())
}

/// Shared shape of the `Element get...(X source)` serializers
fn emit_element_loop(
    em: &mut Em<'_>,
    key: &str,
    name_args: &[&str],
    doc: &str,
    parameter: &str,
    loop_header: &str,
    loop_body: &[String],
) -> GeneratorResult<()> {
    let name = em.begin_method(key, name_args, &[doc])?;
    em.import(DOM4J_HELPER);
    let node = em.class().node.clone();
    let source = parameter.rsplit(' ').next().unwrap_or(parameter).to_string();

    em.open_block(1, &format!("public static Element {name}({parameter})"));
    em.line(2, &format!("if({source} == null) return null;"));
    em.line(
        2,
        &format!("final Element el = DocumentHelper.createElement(\"{node}\");"),
    );
    em.open_block(2, loop_header);
    for line in loop_body {
        em.line(3, line);
    }
    em.close_brace(2);
    em.line(2, "return el;");
    em.close_brace(1);
    Ok(())
}

fn emit_get_entity_array_element(em: &mut Em<'_>) -> GeneratorResult<()> {
    let bean = entity_name(em);
    let get_element = em.method_name(GET_ELEMENT, &[])?;
    emit_element_loop(
        em,
        GET_ENTITY_ARRAY_ELEMENT,
        &[],
        &bean,
        &format!("{bean}[] arr"),
        &format!("for({bean} obj : arr)"),
        &[format!("el.add({get_element}(obj));")],
    )
}

fn emit_get_entity_collection_element(em: &mut Em<'_>) -> GeneratorResult<()> {
    let bean = entity_name(em);
    let get_element = em.method_name(GET_ELEMENT, &[])?;
    em.import("java.util.Collection");
    emit_element_loop(
        em,
        GET_ENTITY_COLLECTION_ELEMENT,
        &[],
        &bean,
        &format!("Collection<{bean}> coll"),
        &format!("for({bean} obj : coll)"),
        &[format!("el.add({get_element}(obj));")],
    )
}

fn emit_get_entity_map_element(em: &mut Em<'_>) -> GeneratorResult<()> {
    let bean = entity_name(em);
    let get_element = em.method_name(GET_ELEMENT, &[])?;
    em.import("java.util.Map");
    emit_element_loop(
        em,
        GET_ENTITY_MAP_ELEMENT,
        &[],
        &bean,
        &format!("Map<?, {bean}> map"),
        "for(Object key : map.keySet())",
        &[
            format!("final Element ell = {get_element}(map.get(key));"),
            format!("ell.addAttribute(\"{MAP_KEY_ATTRIBUTE}\", String.valueOf(key));"),
            "el.add(ell);".to_string(),
        ],
    )
}

// ============================================================================
// Context helpers
// ============================================================================

fn emit_get_array(em: &mut Em<'_>, types: &[JavaType]) -> GeneratorResult<()> {
    let [element] = types else {
        return Ok(());
    };
    let simple = capitalize(&element.simple_name());
    let item = em.java_ref(element);
    let value = value_expression(em, ClassWriter::Dom4jText, "e", element)?;
    let name = em.begin_method(GET_ARRAY, &[&simple], &[&item])?;
    em.import("java.util.List");

    em.open_block(1, &format!("public static {item}[] {name}(Element el)"));
    em.line(2, "if(el == null) return null;");
    em.line(2, "final List els = el.elements();");
    em.line(2, "final int size = els.size();");
    em.line(2, &format!("final {item}[] items = new {item}[size];"));
    em.open_block(2, "for(int i=0; i<size; i++)");
    em.line(3, "final Element e = (Element)els.get(i);");
    em.line(3, &format!("items[i] = {value};"));
    em.close_brace(2);
    em.line(2, "return items;");
    em.close_brace(1);
    Ok(())
}

fn emit_get_collection(em: &mut Em<'_>, types: &[JavaType]) -> GeneratorResult<()> {
    let [element] = types else {
        return Ok(());
    };
    em.import_type(element);
    let wrapper = element.wrapper_name();
    let value = value_expression(em, ClassWriter::Dom4jText, "el", element)?;
    let name = em.begin_method(GET_COLLECTION, &[&capitalize(&wrapper)], &[&wrapper])?;
    em.import("java.util.Collection");

    let header = format!(
        "public static <T extends Collection<{wrapper}>>\n{}T {name}(T coll, Element els)",
        em.indent(3)
    );
    em.open_block(1, &header);
    em.line(2, "if(els == null) return null;");
    em.open_block(2, "for(Object obj : els.elements())");
    em.line(3, "final Element el = (Element)obj;");
    em.line(3, &format!("coll.add({value});"));
    em.close_brace(2);
    em.line(2, "return coll;");
    em.close_brace(1);
    Ok(())
}

fn emit_get_map(em: &mut Em<'_>, types: &[JavaType]) -> GeneratorResult<()> {
    let [key, entry] = types else {
        return Ok(());
    };
    em.import_type(key);
    em.import_type(entry);
    let (key_name, entry_name) = (key.wrapper_name(), entry.wrapper_name());
    let joined = format!("{}{}", capitalize(&key_name), capitalize(&entry_name));

    let key_value = value_expression(em, ClassWriter::Dom4jKey, "el", key)?;
    let entry_value = value_expression(em, ClassWriter::Dom4jText, "el", entry)?;
    let entry_value = if em.is_entity(entry) {
        format!("\n{}{entry_value}", em.indent(5))
    } else {
        entry_value
    };

    let name = em.begin_method(GET_MAP, &[&joined], &[&joined, &key_name, &entry_name])?;
    em.import("java.util.Map");

    let header = format!(
        "public static <T extends Map<{key_name}, {entry_name}>>\n{}T {name}(T map, Element els)",
        em.indent(3)
    );
    em.open_block(1, &header);
    em.line(2, "if(els == null) return null;");
    em.open_block(2, "for(Object obj : els.elements())");
    em.line(3, "final Element el = (Element)obj;");
    em.line(3, &format!("map.put({key_value}, {entry_value});"));
    em.close_brace(2);
    em.line(2, "return map;");
    em.close_brace(1);
    Ok(())
}

fn emit_get_array_element(em: &mut Em<'_>, types: &[JavaType]) -> GeneratorResult<()> {
    let [element] = types else {
        return Ok(());
    };
    let simple = capitalize(&element.simple_name());
    let item = em.java_ref(element);
    let indent = em.indent(5);
    emit_element_loop(
        em,
        GET_ARRAY_ELEMENT,
        &[&simple],
        &item,
        &format!("{item}[] arr"),
        &format!("for({item} obj : arr)"),
        &[format!(
            "el.addElement(\"{ENTRY_ELEMENT}\").\n{indent}setText(String.valueOf(obj));"
        )],
    )
}

fn emit_get_collection_element(em: &mut Em<'_>, _: &[JavaType]) -> GeneratorResult<()> {
    em.import("java.util.Collection");
    let indent = em.indent(5);
    emit_element_loop(
        em,
        GET_COLLECTION_ELEMENT,
        &[],
        "",
        "Collection<?> coll",
        "for(Object obj : coll)",
        &[format!(
            "el.addElement(\"{ENTRY_ELEMENT}\").\n{indent}setText(String.valueOf(obj));"
        )],
    )
}

fn emit_get_map_element(em: &mut Em<'_>, _: &[JavaType]) -> GeneratorResult<()> {
    em.import("java.util.Map");
    let indent = em.indent(5);
    emit_element_loop(
        em,
        GET_MAP_ELEMENT,
        &[],
        "",
        "Map<?, ?> map",
        "for(Object key : map.keySet())",
        &[format!(
            "el.addElement(\"{ENTRY_ELEMENT}\").\n{indent}addAttribute(\"{MAP_KEY_ATTRIBUTE}\", String.valueOf(key)).\n{indent}setText(String.valueOf(map.get(key)));"
        )],
    )
}

#[cfg(test)]
#[path = "dom4j/dom4j_tests.rs"]
mod dom4j_tests;
