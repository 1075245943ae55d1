//! Naming helpers shared by every emitter.
//!
//! | Input | Function | Output |
//! |-------|----------|--------|
//! | `name` | [`capitalize`] | `Name` |
//! | `com.example.Person` | [`simple_name`] | `Person` |
//! | `com.example.Person` | [`package_of`] | `com.example` |
//! | `name` | [`accessor_name`] | `getName` / `setName` / `isName` |

/// Capitalize the first letter of a string.
///
/// # Examples
///
/// ```
/// use flexgen_core::capitalize;
///
/// assert_eq!(capitalize("hello"), "Hello");
/// assert_eq!(capitalize("int"), "Int");
/// assert_eq!(capitalize(""), "");
/// ```
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Last dotted segment of a qualified name.
pub fn simple_name(qualified: &str) -> &str {
    match qualified.rfind('.') {
        Some(idx) => &qualified[idx + 1..],
        None => qualified,
    }
}

/// Package part of a qualified name (empty for the default package).
pub fn package_of(qualified: &str) -> &str {
    match qualified.rfind('.') {
        Some(idx) => &qualified[..idx],
        None => "",
    }
}

/// Join a package and a simple class name.
pub fn qualify(package: &str, simple: &str) -> String {
    if package.is_empty() {
        simple.to_string()
    } else {
        format!("{package}.{simple}")
    }
}

/// JavaBean accessor name for a property, e.g. `get` + `name` = `getName`.
pub fn accessor_name(prefix: &str, property: &str) -> String {
    format!("{prefix}{}", capitalize(property))
}
