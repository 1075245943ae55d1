#![allow(non_snake_case)]

use super::*;
use crate::config::GeneratorConfig;
use crate::error::GeneratorError;
use crate::generator::Generator;
use crate::model::EntityDef;
use crate::orchestrator::BuilderHandler;
use crate::schema::SchemaFile;
use crate::sink::MemorySink;

const PERSON: &str = r#"
name = "com.example.Person"

[[property]]
name = "id"
type = "int"
node = "@id"

[[property]]
name = "name"
type = "String"

[[property]]
name = "contacts"
type = "Person[]"
"#;

const CATALOG: &str = r#"
[[entity]]
name = "com.example.Catalog"

[[entity.property]]
name = "tags"
type = "List"
list = { element = "String" }

[[entity.property]]
name = "scores"
type = "Map"
map = { key = "String", entry = "int" }

[[entity.property]]
name = "counts"
type = "int[]"

[[entity.property]]
name = "totals"
type = "int[]"

[[entity.property]]
name = "active"
type = "boolean"
node = "@active"
"#;

fn generate_with(config: GeneratorConfig, descriptors: &[&str]) -> Result<MemorySink, GeneratorError> {
    let mut generator = Generator::new(config)?;
    generator.add_handler(Box::new(BuilderHandler::new(Dom4jBuilderSpec::new())));
    for text in descriptors {
        for schema in SchemaFile::from_str(text)?.entities {
            generator.add_class(EntityDef::from_schema(schema)?);
        }
    }
    let mut sink = MemorySink::new();
    generator.generate(&mut sink)?;
    Ok(sink)
}

fn builder_source(descriptors: &[&str], path: &str) -> String {
    let sink = generate_with(GeneratorConfig::default(), descriptors).unwrap();
    sink.get(path).unwrap().to_string()
}

#[test]
fn Dom4jBuilderSpec___registries___are_priority_ordered() {
    let spec = Dom4jBuilderSpec::new();

    assert_eq!(
        spec.readers().names(),
        vec!["entity", "array", "collection", "map", "scalar"]
    );
    assert_eq!(
        spec.elements().names(),
        vec!["array", "collection", "entity", "map", "simple"]
    );
    assert_eq!(spec.methods().len(), 6);
}

#[test]
fn Dom4jBuilder___get_instance___reads_attributes_text_and_arrays() {
    let source = builder_source(&[PERSON], "com/example/PersonBuilder.java");

    let expected = "
    /**
     * Builds a Person from a dom4j element.
     */
    public static Person getInstance(Element el) {
        if(el == null) return null;
        final Person o = new Person();
        o.setId(Integer.parseInt(el.attributeValue(\"id\")));
        o.setName(el.elementTextTrim(\"name\"));
        o.setContacts(getPersonArray(el.element(\"contacts\")));
        return o;
    }
";
    assert!(source.contains(expected), "{source}");
}

#[test]
fn Dom4jBuilder___get_element___writes_attributes_text_and_nested_elements() {
    let source = builder_source(&[PERSON], "com/example/PersonBuilder.java");

    let expected = "
    public static Element getElement(Person o) {
        if(o == null) return null;
        final Element el = DocumentHelper.createElement(\"Person\");
        String str = null;
        Element nested = null;
        str = String.valueOf(o.getId());
        el.addAttribute(\"id\", ((str == null) ? \"\" : str));
        str = String.valueOf(o.getName());
        el.addElement(\"name\").setText((str == null) ? \"\" : str);
        nested = PersonBuilder.getEntityArrayElement(o.getContacts());
        if(nested != null) {
            nested.setName(\"contacts\");
            el.add(nested);
        }
        return el;
    }
";
    assert!(source.contains(expected), "{source}");
}

#[test]
fn Dom4jBuilder___entity_array_helper___recurses_into_get_instance() {
    let source = builder_source(&[PERSON], "com/example/PersonBuilder.java");

    assert!(source.contains("    public static Person[] getPersonArray(Element el) {\n"));
    assert!(source.contains("            items[i] = PersonBuilder.getInstance(e);\n"));
}

#[test]
fn Dom4jBuilder___header___has_sorted_imports_and_class_doc() {
    let source = builder_source(&[PERSON], "com/example/PersonBuilder.java");

    assert!(source.starts_with(
        "package com.example;\n\
         \n\
         import java.util.Collection;\n\
         import java.util.List;\n\
         import java.util.Map;\n\
         import org.dom4j.DocumentHelper;\n\
         import org.dom4j.Element;\n\
         \n\
         /**\n \
         * PersonBuilder reads and writes com.example.Person instances as dom4j elements.\n \
         */\n\
         public class PersonBuilder {\n"
    ));
    assert!(source.ends_with("    }\n}\n"));
}

#[test]
fn Dom4jBuilder___basic_collection___uses_typed_helper_with_implementation() {
    let source = builder_source(&[CATALOG], "com/example/CatalogBuilder.java");

    assert!(source.contains(
        "        o.setTags(getStringCollection(\n                new ArrayList<String>(), el.element(\"tags\")));\n"
    ));
    assert!(source.contains("            coll.add(el.getTextTrim());\n"));
    assert!(source.contains("import java.util.ArrayList;\n"));
}

#[test]
fn Dom4jBuilder___basic_map___reads_key_attribute_and_entry_text() {
    let source = builder_source(&[CATALOG], "com/example/CatalogBuilder.java");

    assert!(source.contains(
        "        o.setScores(getStringIntegerMap(\n                new HashMap<String, Integer>(), el.element(\"scores\")));\n"
    ));
    assert!(source.contains(
        "            map.put(el.attributeValue(\"KEY\"), Integer.parseInt(el.getTextTrim()));\n"
    ));
    assert!(source.contains("        nested = getMapElement(o.getScores());\n"));
}

#[test]
fn Dom4jBuilder___boolean_attribute___parses_strictly() {
    let source = builder_source(&[CATALOG], "com/example/CatalogBuilder.java");

    assert!(source.contains(
        "        o.setActive(\"true\".equals(el.attributeValue(\"active\")));\n"
    ));
    assert!(source.contains("        str = String.valueOf(o.isActive());\n"));
}

#[test]
fn Dom4jBuilder___same_element_type___emits_one_helper() {
    let source = builder_source(&[CATALOG], "com/example/CatalogBuilder.java");

    assert_eq!(source.matches("public static int[] getIntArray(").count(), 1);
    assert_eq!(source.matches("public static Element getIntArrayElement(").count(), 1);
    assert!(source.contains("        o.setCounts(getIntArray(el.element(\"counts\")));\n"));
    assert!(source.contains("        o.setTotals(getIntArray(el.element(\"totals\")));\n"));
    assert!(source.contains("            items[i] = Integer.parseInt(e.getTextTrim());\n"));
}

#[test]
fn Dom4jBuilder___entity_map_key___fails_with_complex_attribute() {
    let keyed = r#"
        name = "com.example.Index"

        [[property]]
        name = "byPerson"
        type = "Map"
        map = { key = "Person", entry = "String" }
    "#;

    let result = generate_with(GeneratorConfig::default(), &[PERSON, keyed]);

    assert!(matches!(
        result,
        Err(GeneratorError::ComplexAttribute { ref property, .. }) if property == "byPerson"
    ));
}

#[test]
fn Dom4jBuilder___server_package___imports_entity_and_builders() {
    let config = GeneratorConfig::from_str("[packages]\nserver_builders = \"xml\"\n").unwrap();

    let sink = generate_with(config, &[PERSON]).unwrap();
    let source = sink.get("com/example/xml/PersonBuilder.java").unwrap();

    assert!(source.starts_with("package com.example.xml;\n"));
    assert!(source.contains("import com.example.Person;\n"));
    assert!(!source.contains("import com.example.xml.PersonBuilder;"));
}

#[test]
fn Dom4jBuilder___brace_on_new_line___moves_every_opening_brace() {
    let config = GeneratorConfig {
        new_line_before_curly_brace: true,
        ..GeneratorConfig::default()
    };

    let sink = generate_with(config, &[PERSON]).unwrap();
    let source = sink.get("com/example/PersonBuilder.java").unwrap();

    assert!(source.contains("public class PersonBuilder\n{\n"));
    assert!(source.contains("    public static Person getInstance(Element el)\n    {\n"));
    assert!(!source.contains(") {\n"));
}
