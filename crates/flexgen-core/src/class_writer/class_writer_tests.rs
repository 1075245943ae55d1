#![allow(non_snake_case)]

use super::*;
use crate::metadata::{Category, NodeBinding};
use crate::types::{JavaType, Primitive};
use test_case::test_case;

fn prop(name: &str, node: Option<&str>, setter: bool) -> PropertyDescriptor {
    PropertyDescriptor {
        name: name.to_string(),
        ty: JavaType::Primitive(Primitive::Int),
        getter: format!("get{name}"),
        setter: setter.then(|| "setId".to_string()),
        category: Category::Basic,
        node: NodeBinding::resolve(name, node),
        transient: None,
        lazy: None,
        bindable: None,
        default: None,
        synthetic: false,
    }
}

fn imports(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test_case(Some("@id"), None, "el.attributeValue(\"id\")")]
#[test_case(None, None, "el.elementTextTrim(\"id\")")]
#[test_case(None, Some(NodePlacement::Element), "el.element(\"id\")")]
#[test_case(Some("@id"), Some(NodePlacement::Element), "el.attributeValue(\"id\")")]
fn Dom4j___property_access___follows_node_placement(
    node: Option<&str>,
    placement: Option<NodePlacement>,
    read: &str,
) {
    let config = GeneratorConfig::default();

    let access = ClassWriter::Dom4j
        .property_access(&config, "o", &prop("id", node, true), "P(", ")", placement)
        .unwrap();

    assert_eq!(access, format!("        o.setId(P({read}));\n"));
}

#[test]
fn primary_styles___skip_read_only_properties() {
    let config = GeneratorConfig::default();
    let read_only = prop("id", None, false);

    assert_eq!(
        ClassWriter::Dom4j.property_access(&config, "o", &read_only, "", "", None),
        None
    );
    assert_eq!(
        ClassWriter::As3.property_access(&config, "o", &read_only, "", "", None),
        None
    );
}

#[test]
fn expression_styles___ignore_node_structure() {
    let config = GeneratorConfig::default();
    let p = prop("id", Some("@id"), false);

    assert_eq!(
        ClassWriter::Dom4jText.property_access(&config, "e", &p, "X(", ")", None),
        Some("X(e.getTextTrim())".to_string())
    );
    assert_eq!(
        ClassWriter::Dom4jKey.property_access(&config, "e", &p, "", "", None),
        Some("e.attributeValue(\"KEY\")".to_string())
    );
    assert_eq!(
        ClassWriter::As3Text.property_access(&config, "n", &p, "int(", ")", None),
        Some("int(n)".to_string())
    );
}

#[test]
fn As3___property_access___assigns_from_e4x_path() {
    let config = GeneratorConfig::default();

    let access = ClassWriter::As3
        .property_access(&config, "o", &prop("id", Some("@id"), true), "int(", ")", None)
        .unwrap();

    assert_eq!(access, "            o.id = int(nod.@id);\n");
}

#[test]
fn Dom4j___package_declaration___lists_imports_after_package() {
    let config = GeneratorConfig::default();

    let out = ClassWriter::Dom4j.package_declaration(
        &config,
        "com.example",
        &imports(&["org.dom4j.Element", "java.util.List"]),
    );

    assert_eq!(
        out,
        "package com.example;\n\nimport java.util.List;\nimport org.dom4j.Element;\n\n"
    );
}

#[test]
fn Dom4j___default_package___has_no_package_statement() {
    let config = GeneratorConfig::default();

    assert_eq!(
        ClassWriter::Dom4j.package_declaration(&config, "", &BTreeSet::new()),
        ""
    );
}

#[test]
fn As3___package_declaration___opens_package_block() {
    let config = GeneratorConfig::default();

    let out =
        ClassWriter::As3.package_declaration(&config, "com.model", &imports(&["flash.events.Event"]));

    assert_eq!(out, "package com.model {\n\n    import flash.events.Event;\n\n");
}

#[test]
fn class_declaration___renders_extends_and_implements() {
    let config = GeneratorConfig::default();

    let java = ClassWriter::Dom4j.class_declaration(
        &config,
        "PersonBuilder",
        Some("Base"),
        &["A".to_string(), "B".to_string()],
    );
    let as3 = ClassWriter::As3.class_declaration(&config, "Person", Some("EventDispatcher"), &[]);

    assert_eq!(java, "public class PersonBuilder extends Base implements A, B {\n");
    assert_eq!(as3, "    public class Person extends EventDispatcher {\n");
}

#[test]
fn class_declaration___honours_brace_on_new_line() {
    let config = GeneratorConfig {
        new_line_before_curly_brace: true,
        ..GeneratorConfig::default()
    };

    let as3 = ClassWriter::As3.class_declaration(&config, "Person", None, &[]);

    assert_eq!(as3, "    public class Person\n    {\n");
}

#[test]
fn class_terminator___closes_package_for_as3() {
    let config = GeneratorConfig::default();

    assert_eq!(ClassWriter::Dom4j.class_terminator(&config), "}\n");
    assert_eq!(ClassWriter::As3.class_terminator(&config), "    }\n}\n");
}

#[test]
fn doc_comment___prefixes_every_line() {
    let config = GeneratorConfig::default();

    let doc = ClassWriter::doc_comment(&config, "First line.\n\nThird.", 1);

    assert_eq!(
        doc,
        "    /**\n     * First line.\n     *\n     * Third.\n     */\n"
    );
}

#[test_case(ClassWriter::Dom4j, 0, 2)]
#[test_case(ClassWriter::Dom4jText, 0, 2)]
#[test_case(ClassWriter::As3, 1, 3)]
#[test_case(ClassWriter::As3Text, 1, 3)]
fn levels___follow_target_nesting(style: ClassWriter, class: usize, body: usize) {
    assert_eq!(style.class_level(), class);
    assert_eq!(style.method_level(), class + 1);
    assert_eq!(style.body_level(), body);
}
