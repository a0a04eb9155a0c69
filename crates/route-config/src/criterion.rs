//! Policy criteria and their value domains.

use roxmltree::Node;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::attributes::{AttributeSpec, Attributes, parse_uint, split_list, split_pairs};
use crate::collection::{Named, NamedCollection};
use crate::element::Element;
use crate::error::{ConfigError, Result};

/// Whether a criterion holds one value or a combination of values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Inclusiveness {
    /// Exactly one value at a time.
    Exclusive,
    /// Any combination of values, as a bit mask.
    Inclusive,
}

impl Inclusiveness {
    fn parse(text: &str) -> std::result::Result<Self, String> {
        match text.trim() {
            "exclusive" => Ok(Inclusiveness::Exclusive),
            "inclusive" => Ok(Inclusiveness::Inclusive),
            _ => Err("expected 'inclusive' or 'exclusive'".to_string()),
        }
    }

    /// Value assigned to the `index`-th label when none is written.
    fn positional_value(self, index: usize) -> std::result::Result<u32, String> {
        match self {
            Inclusiveness::Exclusive => {
                u32::try_from(index).map_err(|_| "too many values".to_string())
            }
            Inclusiveness::Inclusive => u32::try_from(index)
                .ok()
                .and_then(|shift| 1u32.checked_shl(shift))
                .ok_or_else(|| "inclusive types hold at most 32 values".to_string()),
        }
    }
}

impl fmt::Display for Inclusiveness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Inclusiveness::Exclusive => f.write_str("exclusive"),
            Inclusiveness::Inclusive => f.write_str("inclusive"),
        }
    }
}

/// One `(label, value)` pair of a criterion type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CriterionValue {
    /// Symbolic label.
    pub label: String,
    /// Numerical value.
    pub value: u32,
}

/// Enumeration domain of a criterion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CriterionType {
    name: String,
    inclusiveness: Inclusiveness,
    values: Vec<CriterionValue>,
}

/// Criterion types, keyed by name.
pub type CriterionTypes = NamedCollection<CriterionType>;

impl CriterionType {
    /// Name of the type.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the type is inclusive or exclusive.
    pub fn inclusiveness(&self) -> Inclusiveness {
        self.inclusiveness
    }

    /// Values in declaration order.
    pub fn values(&self) -> &[CriterionValue] {
        &self.values
    }

    /// Numerical value of a label.
    pub fn value_of(&self, label: &str) -> Option<u32> {
        self.values
            .iter()
            .find(|v| v.label == label)
            .map(|v| v.value)
    }

    /// Label carrying a numerical value.
    pub fn label_of(&self, value: u32) -> Option<&str> {
        self.values
            .iter()
            .find(|v| v.value == value)
            .map(|v| v.label.as_str())
    }

    /// Checks a default value against the labels of this type.
    ///
    /// Inclusive types accept a `|`-joined set of labels.
    fn check_default(&self, text: &str) -> std::result::Result<(), String> {
        let mut labels = match self.inclusiveness {
            Inclusiveness::Exclusive => vec![text.trim()],
            Inclusiveness::Inclusive => text
                .split('|')
                .map(str::trim)
                .filter(|label| !label.is_empty())
                .collect(),
        };
        labels.retain(|label| self.value_of(label).is_none());
        match labels.first() {
            None => Ok(()),
            Some(label) => Err(format!("'{label}' is not a value of type '{}'", self.name)),
        }
    }

    fn parse_values(
        inclusiveness: Inclusiveness,
        text: &str,
    ) -> std::result::Result<Vec<CriterionValue>, String> {
        let mut seen = HashSet::new();
        let mut taken = HashMap::new();
        split_list(text)
            .into_iter()
            .enumerate()
            .map(|(index, entry)| {
                let (label, value) = match entry.split_once(':') {
                    Some((label, value)) => (label.trim().to_string(), parse_uint(value)?),
                    None => (entry, inclusiveness.positional_value(index)?),
                };
                if label.is_empty() {
                    return Err(format!("value {index} has an empty label"));
                }
                if !seen.insert(label.clone()) {
                    return Err(format!("label '{label}' is declared twice"));
                }
                if let Some(other) = taken.insert(value, label.clone()) {
                    return Err(format!("label '{label}' reuses value {value} of '{other}'"));
                }
                Ok(CriterionValue { label, value })
            })
            .collect()
    }
}

impl Named for CriterionType {
    fn name(&self) -> Option<&str> {
        Some(self.name.as_str())
    }
}

impl Element for CriterionType {
    const TAG: &'static str = "CriterionType";
    const COLLECTION_TAG: &'static str = "CriterionTypes";
    const ATTRIBUTES: &'static [AttributeSpec] = &[
        AttributeSpec::required("name"),
        AttributeSpec::required("type"),
        AttributeSpec::optional("values"),
    ];
    type Context<'c> = ();
    type Collection = CriterionTypes;

    fn decode(node: Node<'_, '_>, (): ()) -> Result<Self> {
        let attrs = Attributes::new(Self::TAG, Self::ATTRIBUTES, node);
        let name = attrs.required_name("name")?;
        let inclusiveness = attrs.require_with("type", Inclusiveness::parse)?;
        let values = attrs
            .parse_with("values", |text| Self::parse_values(inclusiveness, text))?
            .unwrap_or_default();

        tracing::trace!(name = %name, %inclusiveness, values = values.len(), "criterion type");
        Ok(Self {
            name,
            inclusiveness,
            values,
        })
    }
}

/// A named policy state variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Criterion {
    name: String,
    type_name: String,
    default_value: Option<String>,
    parameter: Option<String>,
    mapping: Vec<(String, String)>,
}

/// Criteria, keyed by name.
pub type Criteria = NamedCollection<Criterion>;

impl Criterion {
    /// Name of the criterion.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the criterion type this criterion draws its values from.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Default value as written, if any.
    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }

    /// Android parameter key this criterion is bound to, if any.
    pub fn parameter(&self) -> Option<&str> {
        self.parameter.as_deref()
    }

    /// Mapping from parameter values to criterion labels.
    pub fn mapping(&self) -> &[(String, String)] {
        &self.mapping
    }
}

impl Named for Criterion {
    fn name(&self) -> Option<&str> {
        Some(self.name.as_str())
    }
}

impl Element for Criterion {
    const TAG: &'static str = "Criterion";
    const COLLECTION_TAG: &'static str = "Criteria";
    const ATTRIBUTES: &'static [AttributeSpec] = &[
        AttributeSpec::required("name"),
        AttributeSpec::required("type"),
        AttributeSpec::optional("defaultVal"),
        AttributeSpec::optional("parameter"),
        AttributeSpec::optional("mapping"),
    ];
    type Context<'c> = &'c CriterionTypes;
    type Collection = Criteria;

    fn decode(node: Node<'_, '_>, types: &CriterionTypes) -> Result<Self> {
        let attrs = Attributes::new(Self::TAG, Self::ATTRIBUTES, node);
        let name = attrs.required_name("name")?;
        let type_name = attrs.required("type")?.trim().to_string();
        let Some(criterion_type) = types.get(&type_name) else {
            return Err(ConfigError::unresolved(Self::TAG, name, type_name));
        };
        let default_value = attrs.parse_with("defaultVal", |text| {
            criterion_type.check_default(text).map(|()| text.to_string())
        })?;

        let mapping = attrs.parse_with("mapping", split_pairs)?.unwrap_or_default();

        tracing::trace!(name = %name, type_name = %type_name, "criterion");
        Ok(Self {
            name,
            type_name,
            default_value,
            parameter: attrs.optional("parameter").map(str::to_string),
            mapping,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::decode_collection;

    fn decode_types(xml: &str) -> Result<CriterionTypes> {
        let doc = roxmltree::Document::parse(xml).unwrap();
        decode_collection::<CriterionType>(doc.root_element(), ())
    }

    fn output_device_types() -> CriterionTypes {
        decode_types(
            r#"<Root><CriterionTypes>
                <CriterionType name="OutputDevice" type="exclusive" values="Earpiece:1,Speaker:2"/>
            </CriterionTypes></Root>"#,
        )
        .unwrap()
    }

    #[test]
    fn explicit_values() {
        let types = output_device_types();
        let ty = types.get("OutputDevice").unwrap();
        assert_eq!(ty.inclusiveness(), Inclusiveness::Exclusive);
        assert_eq!(ty.value_of("Speaker"), Some(2));
        assert_eq!(ty.label_of(1), Some("Earpiece"));
        assert_eq!(ty.value_of("Headset"), None);
    }

    #[test]
    fn positional_values() {
        let types = decode_types(
            r#"<Root><CriterionTypes>
                <CriterionType name="Mode" type="exclusive" values="Normal,Ringtone,InCall"/>
                <CriterionType name="Devices" type="inclusive" values="Mic,BackMic,Headset"/>
            </CriterionTypes></Root>"#,
        )
        .unwrap();
        assert_eq!(types.get("Mode").unwrap().value_of("InCall"), Some(2));
        assert_eq!(types.get("Devices").unwrap().value_of("Headset"), Some(4));
    }

    #[test]
    fn values_are_optional() {
        let types = decode_types(
            r#"<Root><CriterionTypes><CriterionType name="Empty" type="inclusive"/></CriterionTypes></Root>"#,
        )
        .unwrap();
        assert!(types.get("Empty").unwrap().values().is_empty());
    }

    #[test]
    fn bad_inclusiveness_is_malformed() {
        let err = decode_types(
            r#"<Root><CriterionTypes><CriterionType name="X" type="sometimes"/></CriterionTypes></Root>"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::MalformedValue { attribute: "type", .. }));
    }

    #[test]
    fn repeated_label_is_malformed() {
        let err = decode_types(
            r#"<Root><CriterionTypes><CriterionType name="X" type="exclusive" values="A:1,A:2"/></CriterionTypes></Root>"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::MalformedValue { attribute: "values", .. }));
    }

    #[test]
    fn non_numeric_value_is_malformed() {
        let err = decode_types(
            r#"<Root><CriterionTypes><CriterionType name="X" type="exclusive" values="A:one"/></CriterionTypes></Root>"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::MalformedValue { attribute: "values", .. }));
    }

    #[test]
    fn criterion_resolves_its_type() {
        let types = output_device_types();
        let doc = roxmltree::Document::parse(
            r#"<Root><Criteria>
                <Criterion name="SelectedOutput" type="OutputDevice" defaultVal="Earpiece"
                           parameter="output_device" mapping="earpiece:Earpiece,speaker:Speaker"/>
            </Criteria></Root>"#,
        )
        .unwrap();
        let criteria = decode_collection::<Criterion>(doc.root_element(), &types).unwrap();
        let criterion = criteria.get("SelectedOutput").unwrap();
        assert_eq!(criterion.type_name(), "OutputDevice");
        assert_eq!(criterion.default_value(), Some("Earpiece"));
        assert_eq!(criterion.parameter(), Some("output_device"));
        assert_eq!(criterion.mapping().len(), 2);
        assert_eq!(criterion.mapping()[1], ("speaker".to_string(), "Speaker".to_string()));
    }

    #[test]
    fn criterion_with_unknown_type_is_unresolved() {
        let types = output_device_types();
        let doc = roxmltree::Document::parse(
            r#"<Root><Criteria><Criterion name="Mode" type="AudioMode"/></Criteria></Root>"#,
        )
        .unwrap();
        let err = decode_collection::<Criterion>(doc.root_element(), &types).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::UnresolvedReference { element: "Criterion", ref reference, .. } if reference == "AudioMode"
        ));
    }

    #[test]
    fn malformed_mapping_is_rejected() {
        let types = output_device_types();
        let doc = roxmltree::Document::parse(
            r#"<Root><Criteria><Criterion name="S" type="OutputDevice" mapping="earpiece"/></Criteria></Root>"#,
        )
        .unwrap();
        let err = decode_collection::<Criterion>(doc.root_element(), &types).unwrap_err();
        assert!(matches!(err, ConfigError::MalformedValue { attribute: "mapping", .. }));
    }

    fn decode_criteria(types: &CriterionTypes, body: &str) -> Result<Criteria> {
        let xml = format!("<Root><Criteria>{body}</Criteria></Root>");
        let doc = roxmltree::Document::parse(&xml).unwrap();
        decode_collection::<Criterion>(doc.root_element(), types)
    }

    #[test]
    fn repeated_value_is_malformed() {
        let err = decode_types(
            r#"<Root><CriterionTypes><CriterionType name="X" type="inclusive" values="A:2,B"/></CriterionTypes></Root>"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MalformedValue { attribute: "values", ref reason, .. } if reason.contains("reuses value 2")
        ));
    }

    #[test]
    fn duplicate_criterion_type_names() {
        let err = decode_types(
            r#"<Root><CriterionTypes>
                <CriterionType name="T" type="exclusive"/>
                <CriterionType name="T" type="inclusive"/>
            </CriterionTypes></Root>"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::DuplicateName { element: "CriterionType", ref name } if name == "T"
        ));
    }

    #[test]
    fn duplicate_criterion_names() {
        let types = output_device_types();
        let err = decode_criteria(
            &types,
            r#"<Criterion name="C" type="OutputDevice"/><Criterion name="C" type="OutputDevice"/>"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::DuplicateName { element: "Criterion", ref name } if name == "C"
        ));
    }

    #[test]
    fn padded_type_name_matches_padded_reference() {
        let types = decode_types(
            r#"<Root><CriterionTypes><CriterionType name="OutputDevice " type="exclusive"/></CriterionTypes></Root>"#,
        )
        .unwrap();
        assert!(types.contains("OutputDevice"));
        let criteria = decode_criteria(&types, r#"<Criterion name=" Selected" type="OutputDevice "/>"#).unwrap();
        assert_eq!(criteria.get("Selected").unwrap().type_name(), "OutputDevice");
    }

    #[test]
    fn default_value_must_be_a_label() {
        let types = output_device_types();
        let err = decode_criteria(
            &types,
            r#"<Criterion name="S" type="OutputDevice" defaultVal="Earpeice"/>"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MalformedValue { attribute: "defaultVal", ref value, .. } if value == "Earpeice"
        ));
    }

    #[test]
    fn inclusive_default_may_combine_labels() {
        let types = decode_types(
            r#"<Root><CriterionTypes><CriterionType name="Inputs" type="inclusive" values="Mic,BackMic"/></CriterionTypes></Root>"#,
        )
        .unwrap();
        let criteria =
            decode_criteria(&types, r#"<Criterion name="Available" type="Inputs" defaultVal="Mic|BackMic"/>"#).unwrap();
        assert_eq!(criteria.get("Available").unwrap().default_value(), Some("Mic|BackMic"));

        let err = decode_criteria(&types, r#"<Criterion name="A" type="Inputs" defaultVal="Mic|Line"/>"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::MalformedValue { attribute: "defaultVal", .. }));
    }
}
