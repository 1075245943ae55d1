#![allow(non_snake_case)]

use super::*;
use crate::generator::Generator;
use crate::schema::SchemaFile;
use crate::sink::MemorySink;

const PERSON: &str = r#"
name = "com.example.Person"

[[property]]
name = "id"
type = "int"
node = "@id"
default = "7"

[[property]]
name = "name"
type = "String"
default = "anon"
bindable = { event = "nameChanged" }

[[property]]
name = "ready"
type = "boolean"
setter = false
bindable = {}

[[property]]
name = "labels"
type = "Map"
map = { key = "String", entry = "String" }
default = "new"

[[property]]
name = "friend"
type = "Person"

[[property]]
name = "secret"
type = "String"
transient = "public"

[[property]]
name = "note"
type = "String"
transient = "internal"
"#;

const TEAM: &str = r#"
name = "com.example.team.Team"

[[property]]
name = "lead"
type = "com.example.Person"
"#;

fn generate_with(config: GeneratorConfig, descriptors: &[&str]) -> MemorySink {
    let mut generator = Generator::new(config).unwrap();
    generator.add_handler(Box::new(As3Model::new()));
    for text in descriptors {
        for schema in SchemaFile::from_str(text).unwrap().entities {
            generator.add_class(EntityDef::from_schema(schema).unwrap());
        }
    }
    let mut sink = MemorySink::new();
    generator.generate(&mut sink).unwrap();
    sink
}

fn model_source(config: GeneratorConfig, path: &str) -> String {
    let sink = generate_with(config, &[PERSON, TEAM]);
    sink.get(path).unwrap().to_string()
}

#[test]
fn As3Model___header___imports_events_and_dictionary() {
    let source = model_source(GeneratorConfig::default(), "com/example/Person.as");

    assert!(source.starts_with(
        "package com.example {\n\
         \n    \
         import flash.events.Event;\n    \
         import flash.events.EventDispatcher;\n    \
         import flash.utils.Dictionary;\n\
         \n    \
         /**\n     \
         * Person is the client model of com.example.Person.\n     \
         */\n    \
         public class Person extends EventDispatcher {\n"
    ));
    assert!(source.ends_with("        }\n    }\n}\n"));
}

#[test]
fn As3Model___plain_property___gets_field_getter_and_setter() {
    let source = model_source(GeneratorConfig::default(), "com/example/Person.as");

    let expected = "
        private var _id:int = 7;

        public function get id():int {
            return _id;
        }

        public function set id(value:int):void {
            _id = value;
        }
";
    assert!(source.contains(expected), "{source}");
}

#[test]
fn As3Model___bindable_event___dispatches_from_setter() {
    let source = model_source(GeneratorConfig::default(), "com/example/Person.as");

    let expected = "
        private var _name:String = \"anon\";

        [Bindable(event=\"nameChanged\")]
        public function get name():String {
            return _name;
        }

        public function set name(value:String):void {
            _name = value;
            dispatchEvent(new Event(\"nameChanged\"));
        }
";
    assert!(source.contains(expected), "{source}");
}

#[test]
fn As3Model___read_only_property___has_no_setter() {
    let source = model_source(GeneratorConfig::default(), "com/example/Person.as");

    assert!(source.contains("        [Bindable()]\n        public function get ready():Boolean {\n"));
    assert!(!source.contains("public function set ready("));
}

#[test]
fn As3Model___new_default___constructs_the_type() {
    let source = model_source(GeneratorConfig::default(), "com/example/Person.as");

    assert!(source.contains("        private var _labels:Dictionary = new Dictionary();\n"));
}

#[test]
fn As3Model___transient_properties___skipped_in_either_scope() {
    let source = model_source(GeneratorConfig::default(), "com/example/Person.as");

    assert!(!source.contains("secret"));
    assert!(!source.contains("note"));
}

#[test]
fn As3Model___entity_property___uses_model_class() {
    let source = model_source(GeneratorConfig::default(), "com/example/Person.as");

    assert!(source.contains("        public function get friend():Person {\n"));
}

#[test]
fn As3Model___entity_in_other_package___is_imported() {
    let source = model_source(GeneratorConfig::default(), "com/example/team/Team.as");

    assert!(source.contains("    import com.example.Person;\n"));
    assert!(source.contains("        private var _lead:Person;\n"));
    assert!(!source.contains("Dictionary"));
}

#[test]
fn As3Model___without_underscore___accesses_through_this() {
    let config = GeneratorConfig {
        using_underscore: false,
        ..GeneratorConfig::default()
    };

    let source = model_source(config, "com/example/Person.as");

    assert!(source.contains("        private var id:int = 7;\n"));
    assert!(source.contains("            return this.id;\n"));
    assert!(source.contains("            this.id = value;\n"));
}

#[test]
fn As3Model___prefix_and_suffix___rename_class_and_references() {
    let config = GeneratorConfig {
        class_prefix: Some("Fx".to_string()),
        class_suffix: Some("VO".to_string()),
        ..GeneratorConfig::default()
    };

    let sink = generate_with(config, &[PERSON, TEAM]);
    let team = sink.get("com/example/team/FxTeamVO.as").unwrap();

    assert!(team.contains("    import com.example.FxPersonVO;\n"));
    assert!(team.contains("        public function get lead():FxPersonVO {\n"));
}

#[test]
fn As3Model___property_without_open_class___fails() {
    let mut generator = Generator::new(GeneratorConfig::default()).unwrap();
    for text in [PERSON, TEAM] {
        for schema in SchemaFile::from_str(text).unwrap().entities {
            generator.add_class(EntityDef::from_schema(schema).unwrap());
        }
    }
    let session = generator.session();
    let team = session.entity("com.example.team.Team").unwrap();
    let lead = session.describe(team).unwrap().remove(0);
    let mut model = As3Model::new();

    let result = model.property(session, &lead);

    assert!(matches!(result, Err(GeneratorError::InvalidState { .. })));
    assert_eq!(model.phase(), EmissionPhase::Idle);
}

#[test]
fn As3Model___reset_mid_class___allows_next_class() {
    let mut generator = Generator::new(GeneratorConfig::default()).unwrap();
    for text in [PERSON, TEAM] {
        for schema in SchemaFile::from_str(text).unwrap().entities {
            generator.add_class(EntityDef::from_schema(schema).unwrap());
        }
    }
    let session = generator.session();
    let team = session.entity("com.example.team.Team").unwrap();
    let lead = session.describe(team).unwrap().remove(0);
    let mut model = As3Model::new();
    model.class_begin(session, team).unwrap();
    model.property(session, &lead).unwrap();

    model.reset();

    assert_eq!(model.phase(), EmissionPhase::Idle);
    model.class_begin(session, team).unwrap();
    let class = model.class_end(session).unwrap();
    assert!(!class.source.contains("_lead"));
}
