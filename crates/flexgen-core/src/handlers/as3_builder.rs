//! Client XML builder: AS3 with E4X literals
//!
//! `getInstance(nod:XML)` reads a model from a node and `getXML(o)` writes
//! it back as an XML literal. Basic arrays, maps and strings go through
//! helpers requested per type.

use crate::class_writer::{ClassWriter, ENTRY_ELEMENT, MAP_KEY_ATTRIBUTE};
use crate::config::TargetKind;
use crate::conversion::ScalarKind;
use crate::emit::Emitter;
use crate::error::GeneratorResult;
use crate::metadata::{Category, Direction, NodePlacement, PropertyDescriptor};
use crate::naming::capitalize;
use crate::orchestrator::BuilderSpec;
use crate::types::JavaType;
use crate::writer::{ContextHelper, HelperId, MethodRegistry, MethodWriter, PropertyRegistry, PropertyWriter};

const GET_INSTANCE: &str = "as3.get_instance";
const GET_XML: &str = "as3.get_xml";
const GET_BASIC_XML: &str = "as3.get_basic_xml";
const GET_STRING: &str = "as3.get_string";
const GET_BASIC_ARRAY: &str = "as3.get_basic_array";
const GET_BASIC_MAP: &str = "as3.get_basic_map";
const GET_ENTITY_ARRAY: &str = "as3.get_entity_array";
const GET_ENTITY_MAP: &str = "as3.get_entity_map";
const GET_ENTITY_XML_LIST: &str = "as3.get_entity_xml_list";
const GET_BASIC_XML_LIST: &str = "as3.get_basic_xml_list";
const GET_BASIC_MAP_XML: &str = "as3.get_basic_map_xml";
const GET_ENTITY_MAP_XML: &str = "as3.get_entity_map_xml";

const DICTIONARY: &str = "flash.utils.Dictionary";

/// Indentation level of the expressions inside the `getXML` literal
const LITERAL_LEVEL: usize = 4;

type Em<'a> = Emitter<'a, As3BuilderSpec>;

/// Writer set of the AS3/E4X builder
pub struct As3BuilderSpec {
    readers: PropertyRegistry<Self>,
    elements: PropertyRegistry<Self>,
    methods: MethodRegistry<Self>,
}

impl Default for As3BuilderSpec {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for As3BuilderSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("As3BuilderSpec")
            .field("readers", &self.readers.names())
            .field("elements", &self.elements.names())
            .field("methods", &self.methods.keys())
            .finish()
    }
}

impl As3BuilderSpec {
    pub fn new() -> Self {
        let readers = PropertyRegistry::new()
            .with(PropertyWriter::new("int", 0, accepts_int, read_int))
            .with(PropertyWriter::new("number", 0, accepts_number, read_number))
            .with(PropertyWriter::new("boolean", 0, accepts_boolean, read_boolean))
            .with(PropertyWriter::new("string", 1, accepts_string, read_string))
            .with(PropertyWriter::new("entity", 1, accepts_entity, read_entity))
            .with(PropertyWriter::new("basic_array", 1, accepts_basic_array, read_basic_array))
            .with(PropertyWriter::new("entity_array", 2, accepts_entity_array, read_entity_array))
            .with(PropertyWriter::new("basic_map", 2, accepts_basic_map, read_basic_map))
            .with(PropertyWriter::new("entity_map", 3, accepts_entity_map, read_entity_map));

        let elements = PropertyRegistry::new()
            .with(PropertyWriter::new("entity_map", 3, accepts_entity_map, write_entity_map))
            .with(PropertyWriter::new("basic_map", 2, accepts_basic_map, write_basic_map))
            .with(PropertyWriter::new("array", 1, accepts_array, write_array))
            .with(PropertyWriter::new("entity", 1, accepts_entity, write_entity))
            .with(PropertyWriter::new("basic", -1, accepts_any, write_basic));

        let methods = MethodRegistry::new()
            .with(MethodWriter::new(GET_INSTANCE, emit_get_instance))
            .with(MethodWriter::new(GET_XML, emit_get_xml))
            .with(MethodWriter::new(GET_BASIC_XML, emit_get_basic_xml))
            .with(MethodWriter::new(GET_ENTITY_ARRAY, emit_get_entity_array))
            .with(MethodWriter::new(GET_ENTITY_XML_LIST, emit_get_entity_xml_list))
            .with(MethodWriter::new(GET_BASIC_XML_LIST, emit_get_basic_xml_list))
            .with(MethodWriter::new(GET_ENTITY_MAP, emit_get_entity_map))
            .with(MethodWriter::new(GET_ENTITY_MAP_XML, emit_get_entity_map_xml));

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

    /// Writers used inside the `getXML` literal
    pub fn elements(&self) -> &PropertyRegistry<Self> {
        &self.elements
    }
}

impl BuilderSpec for As3BuilderSpec {
    fn name(&self) -> &'static str {
        "as3-builder"
    }

    fn target(&self) -> TargetKind {
        TargetKind::ClientBuilders
    }

    fn class_writer(&self) -> ClassWriter {
        ClassWriter::As3
    }

    fn class_doc_key(&self) -> &'static str {
        "as3_builder"
    }

    fn methods(&self) -> &MethodRegistry<Self> {
        &self.methods
    }

    fn base_imports(&self) -> &'static [&'static str] {
        &[DICTIONARY]
    }
}

// ============================================================================
// Predicates
// ============================================================================

fn scalar_as3_name(prop: &PropertyDescriptor) -> Option<&'static str> {
    if prop.category != Category::Basic {
        return None;
    }
    ScalarKind::of(&prop.ty).map(|kind| kind.as3_name())
}

fn accepts_int(_: &Em<'_>, prop: &PropertyDescriptor) -> bool {
    scalar_as3_name(prop) == Some("int")
}

fn accepts_number(_: &Em<'_>, prop: &PropertyDescriptor) -> bool {
    scalar_as3_name(prop) == Some("Number")
}

fn accepts_boolean(_: &Em<'_>, prop: &PropertyDescriptor) -> bool {
    scalar_as3_name(prop) == Some("Boolean")
}

fn accepts_string(_: &Em<'_>, prop: &PropertyDescriptor) -> bool {
    scalar_as3_name(prop) == Some("String")
}

fn accepts_any(_: &Em<'_>, _: &PropertyDescriptor) -> bool {
    true
}

fn accepts_entity(_: &Em<'_>, prop: &PropertyDescriptor) -> bool {
    prop.is_entity()
}

/// Element type of an array or collection read in the primary style
fn sequence_element<'p>(em: &Em<'_>, prop: &'p PropertyDescriptor) -> Option<&'p JavaType> {
    if !em.style().is_primary() {
        return None;
    }
    prop.category.element()
}

fn accepts_array(em: &Em<'_>, prop: &PropertyDescriptor) -> bool {
    sequence_element(em, prop).is_some()
}

fn accepts_basic_array(em: &Em<'_>, prop: &PropertyDescriptor) -> bool {
    sequence_element(em, prop).is_some_and(|element| !em.is_entity(element))
}

fn accepts_entity_array(em: &Em<'_>, prop: &PropertyDescriptor) -> bool {
    sequence_element(em, prop).is_some_and(|element| em.is_entity(element))
}

fn map_entry<'p>(em: &Em<'_>, prop: &'p PropertyDescriptor) -> Option<&'p JavaType> {
    match &prop.category {
        Category::Map { entry, .. } if em.style().is_primary() => Some(entry),
        _ => None,
    }
}

fn accepts_basic_map(em: &Em<'_>, prop: &PropertyDescriptor) -> bool {
    map_entry(em, prop).is_some_and(|entry| !em.is_entity(entry))
}

fn accepts_entity_map(em: &Em<'_>, prop: &PropertyDescriptor) -> bool {
    map_entry(em, prop).is_some_and(|entry| em.is_entity(entry))
}

// ============================================================================
// Readers (getInstance)
// ============================================================================

/// Closing of a call reading a child element: the first match in the
/// primary style, the node itself inside helpers
fn node_suffix(em: &Em<'_>) -> &'static str {
    if em.style().is_primary() { "[0])" } else { ")" }
}

fn read_int(em: &mut Em<'_>, var: &str, prop: &PropertyDescriptor) -> GeneratorResult<()> {
    em.write_access(var, prop, "int(", ")", None);
    Ok(())
}

fn read_number(em: &mut Em<'_>, var: &str, prop: &PropertyDescriptor) -> GeneratorResult<()> {
    em.write_access(var, prop, "Number(", ")", None);
    Ok(())
}

fn read_boolean(em: &mut Em<'_>, var: &str, prop: &PropertyDescriptor) -> GeneratorResult<()> {
    em.write_access(var, prop, "(", " == \"true\")", None);
    Ok(())
}

fn read_string(em: &mut Em<'_>, var: &str, prop: &PropertyDescriptor) -> GeneratorResult<()> {
    let name = em.method_name(GET_STRING, &[])?;
    em.request_helper(ContextHelper::new(
        HelperId::new(GET_STRING, ""),
        Vec::new(),
        emit_get_string,
    ));
    let suffix = if prop.node.is_attribute() { ")" } else { node_suffix(em) };
    em.write_access(var, prop, &format!("{name}("), suffix, None);
    Ok(())
}

fn read_entity(em: &mut Em<'_>, var: &str, prop: &PropertyDescriptor) -> GeneratorResult<()> {
    let builder = em.builder_ref(&prop.ty)?;
    let method = em.method_name(GET_INSTANCE, &[])?;
    let suffix = node_suffix(em);
    em.write_access(
        var,
        prop,
        &format!("{builder}.{method}("),
        suffix,
        Some(NodePlacement::Element),
    );
    Ok(())
}

fn read_basic_array(em: &mut Em<'_>, var: &str, prop: &PropertyDescriptor) -> GeneratorResult<()> {
    let Some(element) = prop.category.element() else {
        return Ok(());
    };
    let type_name = capitalize(&element.as3_name());
    let name = em.method_name(GET_BASIC_ARRAY, &[&type_name])?;
    em.request_helper(ContextHelper::new(
        HelperId::new(GET_BASIC_ARRAY, type_name),
        vec![element.clone()],
        emit_get_basic_array,
    ));
    em.write_access(var, prop, &format!("{name}("), "[0])", Some(NodePlacement::Element));
    Ok(())
}

fn read_entity_array(em: &mut Em<'_>, var: &str, prop: &PropertyDescriptor) -> GeneratorResult<()> {
    let Some(element) = prop.category.element() else {
        return Ok(());
    };
    let builder = em.builder_ref(element)?;
    let method = em.method_name(GET_ENTITY_ARRAY, &[])?;
    em.write_access(
        var,
        prop,
        &format!("{builder}.{method}("),
        "[0])",
        Some(NodePlacement::Element),
    );
    Ok(())
}

fn read_basic_map(em: &mut Em<'_>, var: &str, prop: &PropertyDescriptor) -> GeneratorResult<()> {
    let Category::Map { entry, .. } = &prop.category else {
        return Ok(());
    };
    let type_name = capitalize(&entry.as3_name());
    let name = em.method_name(GET_BASIC_MAP, &[&type_name])?;
    em.request_helper(ContextHelper::new(
        HelperId::new(GET_BASIC_MAP, type_name),
        vec![entry.clone()],
        emit_get_basic_map,
    ));
    em.write_access(var, prop, &format!("{name}("), "[0])", Some(NodePlacement::Element));
    Ok(())
}

fn read_entity_map(em: &mut Em<'_>, var: &str, prop: &PropertyDescriptor) -> GeneratorResult<()> {
    let Category::Map { entry, .. } = &prop.category else {
        return Ok(());
    };
    let builder = em.builder_ref(entry)?;
    let method = em.method_name(GET_ENTITY_MAP, &[])?;
    em.write_access(
        var,
        prop,
        &format!("{builder}.{method}("),
        "[0])",
        Some(NodePlacement::Element),
    );
    Ok(())
}

// ============================================================================
// XML literal writers (getXML)
// ============================================================================

/// `{call(o.x, "node")}` on its own line inside the literal
fn write_literal_call(em: &mut Em<'_>, call: &str, var: &str, prop: &PropertyDescriptor) {
    em.line(
        LITERAL_LEVEL,
        &format!("{{{call}({var}.{}, \"{}\")}}", prop.name, prop.node.name),
    );
}

fn write_entity_map(em: &mut Em<'_>, var: &str, prop: &PropertyDescriptor) -> GeneratorResult<()> {
    let Category::Map { entry, .. } = &prop.category else {
        return Ok(());
    };
    let builder = em.builder_ref(entry)?;
    let method = em.method_name(GET_ENTITY_MAP_XML, &[])?;
    write_literal_call(em, &format!("{builder}.{method}"), var, prop);
    Ok(())
}

fn write_basic_map(em: &mut Em<'_>, var: &str, prop: &PropertyDescriptor) -> GeneratorResult<()> {
    let name = em.method_name(GET_BASIC_MAP_XML, &[])?;
    em.request_helper(ContextHelper::new(
        HelperId::new(GET_BASIC_MAP_XML, ""),
        Vec::new(),
        emit_get_basic_map_xml,
    ));
    write_literal_call(em, &name, var, prop);
    Ok(())
}

fn write_array(em: &mut Em<'_>, var: &str, prop: &PropertyDescriptor) -> GeneratorResult<()> {
    let Some(element) = prop.category.element() else {
        return Ok(());
    };
    let call = if em.is_entity(element) {
        let builder = em.builder_ref(element)?;
        format!("{builder}.{}", em.method_name(GET_ENTITY_XML_LIST, &[])?)
    } else {
        em.method_name(GET_BASIC_XML_LIST, &[])?
    };
    write_literal_call(em, &call, var, prop);
    Ok(())
}

fn write_entity(em: &mut Em<'_>, var: &str, prop: &PropertyDescriptor) -> GeneratorResult<()> {
    let builder = em.builder_ref(&prop.ty)?;
    let method = em.method_name(GET_XML, &[])?;
    write_literal_call(em, &format!("{builder}.{method}"), var, prop);
    Ok(())
}

fn write_basic(em: &mut Em<'_>, var: &str, prop: &PropertyDescriptor) -> GeneratorResult<()> {
    let name = em.method_name(GET_BASIC_XML, &[])?;
    write_literal_call(em, &name, var, prop);
    Ok(())
}

// ============================================================================
// Default methods
// ============================================================================

/// Model class of the entity being built
fn model_name(em: &mut Em<'_>) -> GeneratorResult<String> {
    let ty = em.class().entity.java_type();
    em.class_ref(TargetKind::ClientEntities, &ty)
}

fn emit_get_instance(em: &mut Em<'_>) -> GeneratorResult<()> {
    let spec = em.spec();
    let frame = em.class();
    let model = model_name(em)?;
    let name = em.begin_method(GET_INSTANCE, &[], &[&model])?;

    em.open_block(2, &format!("public static function {name}(nod:XML):{model}"));
    em.line(3, "if(nod == null) return null;");
    em.line(3, &format!("var o:{model} = new {model}();"));
    em.write_properties(&spec.readers, "o", &frame.attributes, Direction::ClientRead)?;
    em.write_properties(&spec.readers, "o", &frame.elements, Direction::ClientRead)?;
    em.line(3, "return o;");
    em.close_brace(2);
    Ok(())
}

fn emit_get_xml(em: &mut Em<'_>) -> GeneratorResult<()> {
    let spec = em.spec();
    let frame = em.class();
    let model = model_name(em)?;
    let name = em.begin_method(GET_XML, &[], &[&model])?;

    em.open_block(
        2,
        &format!("public static function {name}(o:{model}, name:String=null):XML"),
    );
    em.line(3, "if(o == null) return new XML(\"\");");

    let mut open = format!("var el:XML = <{}", frame.node);
    for attr in &frame.attributes {
        if attr.is_lazy(Direction::ClientWrite) {
            continue;
        }
        open.push_str(&format!(" {}={{o.{}}}", attr.node.name, attr.name));
    }

    let body = em.capture(|em| {
        em.write_properties(&spec.elements, "o", &frame.elements, Direction::ClientWrite)
    })?;
    if body.is_empty() {
        open.push_str("/>;");
        em.line(3, &open);
    } else {
        open.push('>');
        em.line(3, &open);
        em.write(&body);
        em.line(3, &format!("</{}>;", frame.node));
    }

    em.line(3, "if(name != null) el.setName(name);");
    em.line(3, "return el;");
    em.close_brace(2);
    Ok(())
}

fn emit_get_basic_xml(em: &mut Em<'_>) -> GeneratorResult<()> {
    let name = em.begin_method(GET_BASIC_XML, &[], &[])?;
    em.open_block(2, &format!("public static function {name}(value:*, name:String):XML"));
    em.line(3, "if(value == null) return new XML(\"\");");
    em.line(3, "return <{name}>{value}</{name}>;");
    em.close_brace(2);
    Ok(())
}

/// Loop over the children of `nod` into a new collection
fn emit_children_loop(
    em: &mut Em<'_>,
    name: &str,
    return_type: &str,
    collection: &str,
    statement: &str,
) {
    em.open_block(2, &format!("public static function {name}(nod:XML):{return_type}"));
    em.line(3, "if(nod == null) return null;");
    em.line(
        3,
        &format!("var {collection}:{return_type} = new {return_type}();"),
    );
    em.open_block(3, "for each(var n:XML in nod.children())");
    em.line(4, statement);
    em.close_brace(3);
    em.line(3, &format!("return {collection};"));
    em.close_brace(2);
}

fn emit_get_entity_array(em: &mut Em<'_>) -> GeneratorResult<()> {
    let model = model_name(em)?;
    let get_instance = em.method_name(GET_INSTANCE, &[])?;
    let name = em.begin_method(GET_ENTITY_ARRAY, &[], &[&model])?;
    emit_children_loop(
        em,
        &name,
        "Array",
        "items",
        &format!("items.push({get_instance}(n));"),
    );
    Ok(())
}

fn emit_get_entity_map(em: &mut Em<'_>) -> GeneratorResult<()> {
    let model = model_name(em)?;
    let get_instance = em.method_name(GET_INSTANCE, &[])?;
    let name = em.begin_method(GET_ENTITY_MAP, &[], &[&model])?;
    emit_children_loop(
        em,
        &name,
        "Dictionary",
        "map",
        &format!("map[String(n.@{MAP_KEY_ATTRIBUTE})] = {get_instance}(n);"),
    );
    Ok(())
}

/// Wrap every item of `items` into a `<{name}/>` node
fn emit_list_xml(
    em: &mut Em<'_>,
    name: &str,
    parameter: &str,
    loop_header: &str,
    statements: &[String],
) {
    let source = parameter.split(':').next().unwrap_or(parameter).to_string();
    em.open_block(
        2,
        &format!("public static function {name}({parameter}, name:String):XML"),
    );
    em.line(3, &format!("if({source} == null) return new XML(\"\");"));
    em.line(3, "var nod:XML = <{name} />;");
    em.open_block(3, loop_header);
    for statement in statements {
        em.line(4, statement);
    }
    em.close_brace(3);
    em.line(3, "return nod;");
    em.close_brace(2);
}

fn emit_get_entity_xml_list(em: &mut Em<'_>) -> GeneratorResult<()> {
    let model = model_name(em)?;
    let get_xml = em.method_name(GET_XML, &[])?;
    let name = em.begin_method(GET_ENTITY_XML_LIST, &[], &[&model])?;
    emit_list_xml(
        em,
        &name,
        "items:Array",
        &format!("for each(var i:{model} in items)"),
        &[format!("nod.appendChild({get_xml}(i));")],
    );
    Ok(())
}

fn emit_get_basic_xml_list(em: &mut Em<'_>) -> GeneratorResult<()> {
    let name = em.begin_method(GET_BASIC_XML_LIST, &[], &[])?;
    emit_list_xml(
        em,
        &name,
        "items:Array",
        "for each(var i:* in items)",
        &[format!("nod.appendChild(<{ENTRY_ELEMENT}>{{i}}</{ENTRY_ELEMENT}>);")],
    );
    Ok(())
}

fn emit_get_entity_map_xml(em: &mut Em<'_>) -> GeneratorResult<()> {
    let model = model_name(em)?;
    let get_xml = em.method_name(GET_XML, &[])?;
    let name = em.begin_method(GET_ENTITY_MAP_XML, &[], &[&model])?;
    emit_list_xml(
        em,
        &name,
        "map:Dictionary",
        "for(var key:* in map)",
        &[
            format!("var el:XML = {get_xml}(map[key]);"),
            format!("el.@{MAP_KEY_ATTRIBUTE} = key;"),
            "nod.appendChild(el);".to_string(),
        ],
    );
    Ok(())
}

// ============================================================================
// Context helpers
// ============================================================================

/// Expression reading one value of type `ty` from the node `n`
fn value_expression(em: &mut Em<'_>, ty: &JavaType) -> GeneratorResult<String> {
    let spec = em.spec();
    em.expression(&spec.readers, ClassWriter::As3Text, "n", ty)
}

fn emit_get_string(em: &mut Em<'_>, _: &[JavaType]) -> GeneratorResult<()> {
    let name = em.begin_method(GET_STRING, &[], &[])?;
    em.open_block(2, &format!("public static function {name}(nod:XML):String"));
    em.line(3, "if(nod == null) return null;");
    em.line(3, "return nod.toString();");
    em.close_brace(2);
    Ok(())
}

fn emit_get_basic_array(em: &mut Em<'_>, types: &[JavaType]) -> GeneratorResult<()> {
    let [element] = types else {
        return Ok(());
    };
    let type_name = capitalize(&element.as3_name());
    let value = value_expression(em, element)?;
    let name = em.begin_method(GET_BASIC_ARRAY, &[&type_name], &[&type_name])?;
    emit_children_loop(em, &name, "Array", "items", &format!("items.push({value});"));
    Ok(())
}

fn emit_get_basic_map(em: &mut Em<'_>, types: &[JavaType]) -> GeneratorResult<()> {
    let [entry] = types else {
        return Ok(());
    };
    let type_name = capitalize(&entry.as3_name());
    let value = value_expression(em, entry)?;
    let name = em.begin_method(GET_BASIC_MAP, &[&type_name], &[&type_name])?;
    emit_children_loop(
        em,
        &name,
        "Dictionary",
        "map",
        &format!("map[String(n.@{MAP_KEY_ATTRIBUTE})] = {value};"),
    );
    Ok(())
}

fn emit_get_basic_map_xml(em: &mut Em<'_>, _: &[JavaType]) -> GeneratorResult<()> {
    let name = em.begin_method(GET_BASIC_MAP_XML, &[], &[])?;
    emit_list_xml(
        em,
        &name,
        "map:Dictionary",
        "for(var key:* in map)",
        &[format!(
            "nod.appendChild(<{ENTRY_ELEMENT} {MAP_KEY_ATTRIBUTE}={{key}}>{{map[key]}}</{ENTRY_ELEMENT}>);"
        )],
    );
    Ok(())
}
