//! Rogue parameters: values passed straight through to the policy engine.

use roxmltree::Node;
use serde::Serialize;
use std::fmt;

use crate::attributes::{AttributeSpec, Attributes, parse_bool, split_pairs};
use crate::collection::{Named, NamedCollection};
use crate::element::Element;
use crate::error::Result;

/// Value type of a rogue parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterType {
    /// `true`/`false`.
    Bool,
    /// Signed 32-bit integer.
    Int32,
    /// Unsigned 32-bit integer.
    Uint32,
    /// Double-precision float.
    Double,
    /// Free text.
    String,
}

impl ParameterType {
    fn parse(text: &str) -> std::result::Result<Self, String> {
        match text.trim() {
            "bool" => Ok(ParameterType::Bool),
            "int32" | "int32_t" => Ok(ParameterType::Int32),
            "uint32" | "uint32_t" => Ok(ParameterType::Uint32),
            "double" => Ok(ParameterType::Double),
            "string" | "std::string" => Ok(ParameterType::String),
            _ => Err("expected bool, int32, uint32, double or string".to_string()),
        }
    }

    /// Checks that `text` is a valid value of this type.
    pub fn check(self, text: &str) -> std::result::Result<(), String> {
        let text = text.trim();
        let ok = match self {
            ParameterType::Bool => parse_bool(text).is_ok(),
            ParameterType::Int32 => text.parse::<i32>().is_ok(),
            ParameterType::Uint32 => crate::attributes::parse_uint(text).is_ok(),
            ParameterType::Double => text.parse::<f64>().is_ok_and(f64::is_finite),
            ParameterType::String => true,
        };
        if ok {
            Ok(())
        } else {
            Err(format!("not a valid {self} value"))
        }
    }
}

impl fmt::Display for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParameterType::Bool => "bool",
            ParameterType::Int32 => "int32",
            ParameterType::Uint32 => "uint32",
            ParameterType::Double => "double",
            ParameterType::String => "string",
        };
        f.write_str(name)
    }
}

/// A parameter the routing model does not interpret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RogueParameter {
    name: String,
    value_type: ParameterType,
    mapping: Vec<(String, String)>,
    default_value: Option<String>,
    parameter: Option<String>,
    path: String,
}

/// Rogue parameters, keyed by name.
pub type RogueParameters = NamedCollection<RogueParameter>;

impl RogueParameter {
    /// Name of the parameter.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Value type.
    pub fn value_type(&self) -> ParameterType {
        self.value_type
    }

    /// Mapping from Android parameter values to policy values.
    pub fn mapping(&self) -> &[(String, String)] {
        &self.mapping
    }

    /// Default value, already checked against [`RogueParameter::value_type`].
    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }

    /// Android parameter key, if any.
    pub fn parameter(&self) -> Option<&str> {
        self.parameter.as_deref()
    }

    /// Path of the parameter in the policy engine.
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl Named for RogueParameter {
    fn name(&self) -> Option<&str> {
        Some(self.name.as_str())
    }
}

impl Element for RogueParameter {
    const TAG: &'static str = "Parameter";
    const COLLECTION_TAG: &'static str = "Parameters";
    const ATTRIBUTES: &'static [AttributeSpec] = &[
        AttributeSpec::required("name"),
        AttributeSpec::required("type"),
        AttributeSpec::optional("mapping"),
        AttributeSpec::optional("defaultVal"),
        AttributeSpec::optional("parameter"),
        AttributeSpec::required("path"),
    ];
    type Context<'c> = ();
    type Collection = RogueParameters;

    fn decode(node: Node<'_, '_>, (): ()) -> Result<Self> {
        let attrs = Attributes::new(Self::TAG, Self::ATTRIBUTES, node);
        let name = attrs.required_name("name")?;
        let value_type = attrs.require_with("type", ParameterType::parse)?;
        let default_value = attrs.parse_with("defaultVal", |text| {
            value_type.check(text).map(|()| text.to_string())
        })?;

        Ok(Self {
            name,
            value_type,
            mapping: attrs.parse_with("mapping", split_pairs)?.unwrap_or_default(),
            default_value,
            parameter: attrs.optional("parameter").map(str::to_string),
            path: attrs.required("path")?.to_string(),
        })
    }
}
