//! Device ports: physical or virtual endpoints of a hardware module.

use roxmltree::Node;
use serde::Serialize;
use std::fmt;

use crate::attributes::{AttributeSpec, Attributes};
use crate::collection::{Named, NamedCollection};
use crate::element::Element;
use crate::error::Result;
use crate::symbols::DEVICE_TYPES;

/// Direction of a port, seen from the audio framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PortRole {
    /// Produces audio (a microphone, or a playback stream).
    Source,
    /// Consumes audio (a speaker, or a capture stream).
    Sink,
}

impl PortRole {
    pub(crate) fn parse(text: &str) -> std::result::Result<Self, String> {
        match text.trim() {
            "source" => Ok(PortRole::Source),
            "sink" => Ok(PortRole::Sink),
            _ => Err("expected 'source' or 'sink'".to_string()),
        }
    }
}

impl fmt::Display for PortRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortRole::Source => f.write_str("source"),
            PortRole::Sink => f.write_str("sink"),
        }
    }
}

/// A named physical or virtual audio endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DevicePort {
    name: String,
    device_type: u32,
    role: PortRole,
    address: String,
}

/// Device ports of one module, keyed by name.
pub type DevicePorts = NamedCollection<DevicePort>;

impl DevicePort {
    /// Name of the port, unique within its module.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `audio_devices_t` value.
    pub fn device_type(&self) -> u32 {
        self.device_type
    }

    /// Symbolic name of the device type, if it has one.
    pub fn device_type_name(&self) -> Option<&'static str> {
        DEVICE_TYPES.name_of(self.device_type)
    }

    /// Direction of the port.
    pub fn role(&self) -> PortRole {
        self.role
    }

    /// Device address (empty when the type needs none).
    pub fn address(&self) -> &str {
        &self.address
    }
}

impl Named for DevicePort {
    fn name(&self) -> Option<&str> {
        Some(self.name.as_str())
    }
}

impl Element for DevicePort {
    const TAG: &'static str = "DevicePort";
    const COLLECTION_TAG: &'static str = "DevicePorts";
    const ATTRIBUTES: &'static [AttributeSpec] = &[
        AttributeSpec::required("name"),
        AttributeSpec::required("type"),
        AttributeSpec::required("role"),
        AttributeSpec::optional("address"),
    ];
    type Context<'c> = ();
    type Collection = DevicePorts;

    fn decode(node: Node<'_, '_>, (): ()) -> Result<Self> {
        let attrs = Attributes::new(Self::TAG, Self::ATTRIBUTES, node);
        Ok(Self {
            name: attrs.required_name("name")?,
            device_type: attrs.require_symbol("type", &DEVICE_TYPES)?,
            role: attrs.require_with("role", PortRole::parse)?,
            address: attrs.optional("address").unwrap_or_default().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::decode_collection;
    use crate::error::ConfigError;

    fn decode(xml: &str) -> Result<DevicePorts> {
        let doc = roxmltree::Document::parse(xml).unwrap();
        decode_collection::<DevicePort>(doc.root_element(), ())
    }

    #[test]
    fn decodes_ports() {
        let ports = decode(
            r#"<Module><DevicePorts>
                <DevicePort name="Speaker" type="AUDIO_DEVICE_OUT_SPEAKER" role="sink"/>
                <DevicePort name="BT SCO" type="0x10" role="sink" address="00:11:22:33:44:55"/>
            </DevicePorts></Module>"#,
        )
        .unwrap();
        let speaker = ports.get("Speaker").unwrap();
        assert_eq!(speaker.device_type(), 0x2);
        assert_eq!(speaker.device_type_name(), Some("AUDIO_DEVICE_OUT_SPEAKER"));
        assert_eq!(speaker.role(), PortRole::Sink);
        assert_eq!(speaker.address(), "");
        assert_eq!(ports.get("BT SCO").unwrap().address(), "00:11:22:33:44:55");
    }

    #[test]
    fn duplicate_port_name() {
        let err = decode(
            r#"<Module><DevicePorts>
                <DevicePort name="Earpiece" type="AUDIO_DEVICE_OUT_EARPIECE" role="sink"/>
                <DevicePort name="Earpiece" type="AUDIO_DEVICE_OUT_SPEAKER" role="sink"/>
            </DevicePorts></Module>"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateName { element: "DevicePort", .. }));
    }

    #[test]
    fn bad_role_is_malformed() {
        let err = decode(
            r#"<Module><DevicePorts><DevicePort name="Mic" type="AUDIO_DEVICE_IN_BUILTIN_MIC" role="both"/></DevicePorts></Module>"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::MalformedValue { attribute: "role", .. }));
    }

    #[test]
    fn unknown_device_type_is_malformed() {
        let err = decode(
            r#"<Module><DevicePorts><DevicePort name="Mic" type="AUDIO_DEVICE_IN_THEREMIN" role="source"/></DevicePorts></Module>"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::MalformedValue { attribute: "type", .. }));
    }
}
