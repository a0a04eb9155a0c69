//! Declarative attribute catalogues and a typed reader over them.
//!
//! Each element kind publishes a static table of [`AttributeSpec`] entries.
//! The collection decoder checks required attributes against that table
//! before an element is decoded, and the element's own decode step reads
//! values through [`Attributes`], which turns absent or unparsable text into
//! the matching [`ConfigError`].
//!
//! # Example
//!
//! ```rust
//! use route_config::attributes::{AttributeSpec, Attributes};
//!
//! const CATALOGUE: &[AttributeSpec] = &[
//!     AttributeSpec::required("name"),
//!     AttributeSpec::optional("periodSize"),
//! ];
//!
//! let doc = roxmltree::Document::parse(r#"<MixPort name="primary" periodSize="960"/>"#).unwrap();
//! let attrs = Attributes::new("MixPort", CATALOGUE, doc.root_element());
//!
//! assert_eq!(attrs.required("name").unwrap(), "primary");
//! assert_eq!(attrs.parse::<u32>("periodSize").unwrap(), Some(960));
//! ```

use roxmltree::Node;
use std::fmt::Display;
use std::str::FromStr;

use crate::error::{ConfigError, Result};
use crate::symbols::SymbolTable;

/// One recognized attribute of an element kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttributeSpec {
    /// Attribute name as written in the document.
    pub name: &'static str,
    /// Whether the element is rejected when the attribute is absent.
    pub required: bool,
}

impl AttributeSpec {
    /// A mandatory attribute.
    pub const fn required(name: &'static str) -> Self {
        Self {
            name,
            required: true,
        }
    }

    /// An optional attribute.
    pub const fn optional(name: &'static str) -> Self {
        Self {
            name,
            required: false,
        }
    }
}

/// Checks that every required attribute of `catalogue` is present on `node`.
///
/// Attributes not listed in the catalogue are ignored.
pub fn check_required(
    element: &'static str,
    catalogue: &'static [AttributeSpec],
    node: Node<'_, '_>,
) -> Result<()> {
    for spec in catalogue.iter().filter(|spec| spec.required) {
        if node.attribute(spec.name).is_none() {
            return Err(ConfigError::missing(element, spec.name));
        }
    }
    for attr in node.attributes() {
        if !catalogue.iter().any(|spec| spec.name == attr.name()) {
            tracing::trace!(element, attribute = attr.name(), "ignoring unrecognized attribute");
        }
    }
    Ok(())
}

/// Typed view of one node's attributes, restricted to a kind's catalogue.
#[derive(Debug, Clone, Copy)]
pub struct Attributes<'a, 'input> {
    element: &'static str,
    catalogue: &'static [AttributeSpec],
    node: Node<'a, 'input>,
}

impl<'a, 'input: 'a> Attributes<'a, 'input> {
    /// Create a reader for `node`, decoded as an `element` with `catalogue`.
    pub fn new(
        element: &'static str,
        catalogue: &'static [AttributeSpec],
        node: Node<'a, 'input>,
    ) -> Self {
        Self {
            element,
            catalogue,
            node,
        }
    }

    /// Returns `true` if the attribute is present.
    pub fn has(&self, name: &'static str) -> bool {
        self.optional(name).is_some()
    }

    /// Raw text of an optional attribute.
    pub fn optional(&self, name: &'static str) -> Option<&'a str> {
        debug_assert!(
            self.catalogue.iter().any(|spec| spec.name == name),
            "'{name}' is not in the <{}> catalogue",
            self.element
        );
        self.node.attribute(name)
    }

    /// Raw text of a required attribute.
    pub fn required(&self, name: &'static str) -> Result<&'a str> {
        self.optional(name)
            .ok_or_else(|| ConfigError::missing(self.element, name))
    }

    /// Parses an optional attribute with a custom parser.
    pub fn parse_with<T>(
        &self,
        name: &'static str,
        parser: impl FnOnce(&str) -> std::result::Result<T, String>,
    ) -> Result<Option<T>> {
        match self.optional(name) {
            Some(text) => parser(text)
                .map(Some)
                .map_err(|reason| ConfigError::malformed(self.element, name, text, reason)),
            None => Ok(None),
        }
    }

    /// Reads a required name, trimmed the same way references to it are.
    pub fn required_name(&self, name: &'static str) -> Result<String> {
        let text = self.required(name)?;
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::malformed(self.element, name, text, "name is empty"));
        }
        Ok(trimmed.to_string())
    }

    /// Parses a required attribute with a custom parser.
    pub fn require_with<T>(
        &self,
        name: &'static str,
        parser: impl FnOnce(&str) -> std::result::Result<T, String>,
    ) -> Result<T> {
        let text = self.required(name)?;
        parser(text).map_err(|reason| ConfigError::malformed(self.element, name, text, reason))
    }

    /// Parses an optional attribute through [`FromStr`].
    pub fn parse<T>(&self, name: &'static str) -> Result<Option<T>>
    where
        T: FromStr,
        T::Err: Display,
    {
        self.parse_with(name, |text| text.trim().parse().map_err(|e: T::Err| e.to_string()))
    }

    /// Parses an optional unsigned integer written in decimal or `0x` hex.
    pub fn uint(&self, name: &'static str) -> Result<Option<u32>> {
        self.parse_with(name, parse_uint)
    }

    /// Parses a required unsigned integer written in decimal or `0x` hex.
    pub fn require_uint(&self, name: &'static str) -> Result<u32> {
        self.require_with(name, parse_uint)
    }

    /// Parses an optional boolean (`true`/`false`/`1`/`0`), defaulting to `default`.
    pub fn flag_or(&self, name: &'static str, default: bool) -> Result<bool> {
        Ok(self.parse_with(name, parse_bool)?.unwrap_or(default))
    }

    /// Splits an optional comma-separated attribute into trimmed, non-empty items.
    pub fn list(&self, name: &'static str) -> Vec<String> {
        self.optional(name).map(split_list).unwrap_or_default()
    }

    /// Resolves a required symbolic value (or a plain number) through `table`.
    pub fn require_symbol(&self, name: &'static str, table: &SymbolTable) -> Result<u32> {
        self.require_with(name, |text| table.resolve(text))
    }

    /// Resolves an optional `|`-joined mask of symbols (or a plain number) through `table`.
    pub fn mask(&self, name: &'static str, table: &SymbolTable) -> Result<Option<u32>> {
        self.parse_with(name, |text| table.resolve_mask(text))
    }
}

/// Parses an unsigned integer written in decimal or `0x` hex.
pub fn parse_uint(text: &str) -> std::result::Result<u32, String> {
    let text = text.trim();
    let parsed = match text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
    {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => text.parse::<u32>(),
    };
    parsed.map_err(|_| "expected an unsigned integer".to_string())
}

/// Parses a boolean written as `true`/`false` or `1`/`0`.
pub fn parse_bool(text: &str) -> std::result::Result<bool, String> {
    match text.trim() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err("expected true, false, 1 or 0".to_string()),
    }
}

/// Splits a comma-separated list into trimmed, non-empty items.
pub fn split_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Splits a `key:value` comma-separated list into pairs.
///
/// Items without a `:` are rejected.
pub fn split_pairs(text: &str) -> std::result::Result<Vec<(String, String)>, String> {
    split_list(text)
        .into_iter()
        .map(|item| {
            item.split_once(':')
                .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
                .ok_or_else(|| format!("entry '{item}' is not of the form key:value"))
        })
        .collect()
}
