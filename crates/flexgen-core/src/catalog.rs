//! Localized method names and documentation of generated classes
//!
//! Entries are keyed by writer (`dom4j.get_array`, `as3.get_xml`, ...) and
//! hold a name template plus an optional doc template. Templates use
//! positional `{0}`, `{1}` placeholders.
//!
//! Bundles are layered: the built-in `en` bundle first, then the language
//! bundle, then the exact locale bundle, then an optional user file. A later
//! layer overrides single fields of an entry, so a translation may carry
//! docs only and keep the English method names.

use crate::error::{GeneratorError, GeneratorResult};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

const BUNDLE_EN: &str = include_str!("catalog/en.toml");
const BUNDLE_FR: &str = include_str!("catalog/fr.toml");

/// Locale every lookup falls back to
pub const BASE_LOCALE: &str = "en";

fn builtin_bundle(locale: &str) -> Option<&'static str> {
    match locale {
        "en" => Some(BUNDLE_EN),
        "fr" => Some(BUNDLE_FR),
        _ => None,
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct Bundle {
    #[serde(default)]
    classes: BTreeMap<String, String>,
    #[serde(default)]
    methods: BTreeMap<String, MethodEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
struct MethodEntry {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    doc: Option<String>,
}

/// Resolved message catalog for one locale
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    locale: String,
    classes: BTreeMap<String, String>,
    methods: BTreeMap<String, MethodEntry>,
}

impl Catalog {
    /// Catalog from the built-in bundles only
    pub fn for_locale(locale: &str) -> GeneratorResult<Self> {
        Self::load(locale, None)
    }

    /// Catalog for `locale`, optionally overlaid with a user bundle file
    pub fn load(locale: &str, user_file: Option<&Path>) -> GeneratorResult<Self> {
        let locale = normalize_locale(locale);
        let mut catalog = Self {
            locale: locale.clone(),
            ..Self::default()
        };

        catalog.overlay(BUNDLE_EN)?;

        let language = locale.split('_').next().unwrap_or(BASE_LOCALE).to_string();
        if language != BASE_LOCALE
            && let Some(bundle) = builtin_bundle(&language)
        {
            catalog.overlay(bundle)?;
        }
        if locale != language
            && let Some(bundle) = builtin_bundle(&locale)
        {
            catalog.overlay(bundle)?;
        }

        if let Some(path) = user_file {
            let content = std::fs::read_to_string(path)?;
            catalog.overlay(&content).map_err(|e| match e {
                GeneratorError::Schema(msg) => {
                    GeneratorError::Schema(format!("{}: {msg}", path.display()))
                }
                other => other,
            })?;
            debug!(path = %path.display(), "Loaded documentation overrides");
        }

        Ok(catalog)
    }

    fn overlay(&mut self, content: &str) -> GeneratorResult<()> {
        let bundle: Bundle = toml::from_str(content)?;
        self.classes.extend(bundle.classes);
        for (key, entry) in bundle.methods {
            let slot = self.methods.entry(key).or_default();
            if entry.name.is_some() {
                slot.name = entry.name;
            }
            if entry.doc.is_some() {
                slot.doc = entry.doc;
            }
        }
        Ok(())
    }

    /// Normalized locale tag (`fr_CA`)
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Generated method name for a writer key
    pub fn method_name(&self, key: &str, args: &[&str]) -> GeneratorResult<String> {
        self.methods
            .get(key)
            .and_then(|entry| entry.name.as_deref())
            .map(|template| format_message(template, args))
            .ok_or_else(|| GeneratorError::MissingMethodName(key.to_string()))
    }

    /// Documentation of a generated method, if the catalog has one
    pub fn method_doc(&self, key: &str, args: &[&str]) -> Option<String> {
        self.methods
            .get(key)
            .and_then(|entry| entry.doc.as_deref())
            .map(|template| format_message(template, args))
    }

    /// Documentation of a generated class, if the catalog has one
    pub fn class_doc(&self, key: &str, args: &[&str]) -> Option<String> {
        self.classes
            .get(key)
            .map(|template| format_message(template, args))
    }
}

/// `fr-ca` and `fr_CA` both become `fr_CA`
fn normalize_locale(locale: &str) -> String {
    let locale = locale.trim().replace('-', "_");
    let mut parts = locale.splitn(2, '_');
    let language = parts.next().unwrap_or_default().to_lowercase();
    match parts.next() {
        Some(region) if !region.is_empty() => format!("{language}_{}", region.to_uppercase()),
        _ if language.is_empty() => BASE_LOCALE.to_string(),
        _ => language,
    }
}

/// Replace `{N}` with `args[N]`; other braces are kept as written
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open + 1..];
        let digits = tail.bytes().take_while(u8::is_ascii_digit).count();
        let arg = (digits > 0 && tail[digits..].starts_with('}'))
            .then(|| tail[..digits].parse::<usize>().ok())
            .flatten()
            .and_then(|index| args.get(index));

        match arg {
            Some(value) => {
                out.push_str(value);
                rest = &tail[digits + 1..];
            }
            None => {
                out.push('{');
                rest = tail;
            }
        }
    }

    out.push_str(rest);
    out
}
