//! Target syntax for class frames and single-property access
//!
//! | Style | Target | Access form |
//! |-------|--------|-------------|
//! | `Dom4j` | Java | `o.setX(prefix el.attributeValue("x") suffix);` |
//! | `Dom4jText` | Java | `prefix e.getTextTrim() suffix` |
//! | `Dom4jKey` | Java | `prefix e.attributeValue("KEY") suffix` |
//! | `As3` | AS3 | `o.x = prefix nod.@x suffix;` |
//! | `As3Text` | AS3 | `prefix n suffix` |
//!
//! The text and key styles only render expressions. Helpers switch to them
//! while recursing into a synthetic element, key or entry descriptor.

use crate::config::GeneratorConfig;
use crate::metadata::{NodePlacement, PropertyDescriptor};
use std::collections::BTreeSet;

/// Attribute holding the key of a serialized map entry
pub const MAP_KEY_ATTRIBUTE: &str = "KEY";

/// Element name of serialized array, collection and map entries
pub const ENTRY_ELEMENT: &str = "e";

/// Java variable holding the element being read
const DOM4J_ELEMENT_VAR: &str = "el";

/// AS3 variable holding the node being read
const E4X_NODE_VAR: &str = "nod";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassWriter {
    Dom4j,
    Dom4jText,
    Dom4jKey,
    As3,
    As3Text,
}

impl ClassWriter {
    /// Whether access renders a full statement on the bean
    pub fn is_primary(&self) -> bool {
        matches!(self, ClassWriter::Dom4j | ClassWriter::As3)
    }

    pub fn is_java(&self) -> bool {
        matches!(
            self,
            ClassWriter::Dom4j | ClassWriter::Dom4jText | ClassWriter::Dom4jKey
        )
    }

    /// Indentation level of the class declaration
    pub fn class_level(&self) -> usize {
        if self.is_java() { 0 } else { 1 }
    }

    /// Indentation level of method declarations
    pub fn method_level(&self) -> usize {
        self.class_level() + 1
    }

    /// Indentation level of method bodies
    pub fn body_level(&self) -> usize {
        self.class_level() + 2
    }

    /// Statement or expression reading one property.
    ///
    /// `placement` overrides how an element-bound property is read; `None`
    /// reads its trimmed text. Attribute bindings always read the attribute.
    /// Primary styles return `None` for properties without a setter.
    pub fn property_access(
        &self,
        config: &GeneratorConfig,
        var: &str,
        prop: &PropertyDescriptor,
        prefix: &str,
        suffix: &str,
        placement: Option<NodePlacement>,
    ) -> Option<String> {
        match self {
            ClassWriter::Dom4j => {
                let setter = prop.setter.as_deref()?;
                let accessor = match (prop.node.placement, placement) {
                    (NodePlacement::Attribute, _) => "attributeValue",
                    (_, Some(NodePlacement::Element)) => "element",
                    _ => "elementTextTrim",
                };
                Some(format!(
                    "{}{var}.{setter}({prefix}{DOM4J_ELEMENT_VAR}.{accessor}(\"{}\"){suffix});\n",
                    config.indent(self.body_level()),
                    prop.node.name
                ))
            }
            ClassWriter::Dom4jText => Some(format!("{prefix}{var}.getTextTrim(){suffix}")),
            ClassWriter::Dom4jKey => Some(format!(
                "{prefix}{var}.attributeValue(\"{MAP_KEY_ATTRIBUTE}\"){suffix}"
            )),
            ClassWriter::As3 => {
                if prop.is_read_only() {
                    return None;
                }
                Some(format!(
                    "{}{var}.{} = {prefix}{E4X_NODE_VAR}.{}{suffix};\n",
                    config.indent(self.body_level()),
                    prop.name,
                    prop.node.e4x_path()
                ))
            }
            ClassWriter::As3Text => Some(format!("{prefix}{var}{suffix}")),
        }
    }

    /// Package statement followed by the sorted imports
    pub fn package_declaration(
        &self,
        config: &GeneratorConfig,
        package: &str,
        imports: &BTreeSet<String>,
    ) -> String {
        let mut out = String::new();

        if self.is_java() {
            if !package.is_empty() {
                out.push_str(&format!("package {package};\n\n"));
            }
            for import in imports {
                out.push_str(&format!("import {import};\n"));
            }
        } else {
            out.push_str("package");
            if !package.is_empty() {
                out.push(' ');
                out.push_str(package);
            }
            out.push_str(&config.open_brace(0));
            if !imports.is_empty() {
                out.push('\n');
            }
            for import in imports {
                out.push_str(&format!("{}import {import};\n", config.indent(1)));
            }
        }

        if !imports.is_empty() {
            out.push('\n');
        }
        out
    }

    /// Class header up to and including the opening brace
    pub fn class_declaration(
        &self,
        config: &GeneratorConfig,
        name: &str,
        superclass: Option<&str>,
        interfaces: &[String],
    ) -> String {
        let level = self.class_level();
        let mut out = format!("{}public class {name}", config.indent(level));
        if let Some(superclass) = superclass {
            out.push_str(" extends ");
            out.push_str(superclass);
        }
        if !interfaces.is_empty() {
            out.push_str(" implements ");
            out.push_str(&interfaces.join(", "));
        }
        out.push_str(&config.open_brace(level));
        out
    }

    /// Closing braces of the class, and of the package for AS3
    pub fn class_terminator(&self, config: &GeneratorConfig) -> String {
        if self.is_java() {
            "}\n".to_string()
        } else {
            format!("{}}}\n}}\n", config.indent(1))
        }
    }

    /// `/** */` block at `level`
    pub fn doc_comment(config: &GeneratorConfig, text: &str, level: usize) -> String {
        let indent = config.indent(level);
        let mut out = format!("{indent}/**\n");
        for line in text.lines() {
            if line.is_empty() {
                out.push_str(&format!("{indent} *\n"));
            } else {
                out.push_str(&format!("{indent} * {line}\n"));
            }
        }
        out.push_str(&format!("{indent} */\n"));
        out
    }
}

#[cfg(test)]
#[path = "class_writer/class_writer_tests.rs"]
mod class_writer_tests;
