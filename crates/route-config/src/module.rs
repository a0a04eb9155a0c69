//! Hardware modules and the context their mix ports are resolved in.
//!
//! A module is decoded in two phases. Its device ports and routes come first;
//! neither refers to anything else. The mix ports come second, with a
//! [`ModuleContext`] borrowing the phase-one collections so that every
//! `devicePorts` reference is checked against this module and no other.

use roxmltree::Node;
use serde::Serialize;

use crate::attributes::{AttributeSpec, Attributes};
use crate::collection::{Named, NamedCollection, decode_collection};
use crate::config::DeserializeOptions;
use crate::element::Element;
use crate::error::{ConfigError, Result};
use crate::mix_port::{MixPort, MixPorts};
use crate::port::{DevicePort, DevicePorts};
use crate::route::{Route, Routes};

/// Read-only view of a module's already-decoded siblings.
#[derive(Debug, Clone, Copy)]
pub struct ModuleContext<'a> {
    /// Device ports of the enclosing module.
    pub device_ports: &'a DevicePorts,
    /// Routes of the enclosing module.
    pub routes: &'a Routes,
}

/// A route endpoint naming neither a device port nor a mix port of its module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnresolvedEndpoint<'a> {
    /// Sink of the route holding the name.
    pub route_sink: &'a str,
    /// The unresolved name.
    pub endpoint: &'a str,
}

/// A grouping of ports and routes for one hardware audio module.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Module {
    name: Option<String>,
    device_ports: DevicePorts,
    routes: Routes,
    mix_ports: MixPorts,
}

/// Modules, keyed by name when they have one.
pub type Modules = NamedCollection<Module>;

impl Module {
    /// Name of the module, if declared.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Device ports, keyed by name.
    pub fn device_ports(&self) -> &DevicePorts {
        &self.device_ports
    }

    /// Routes, in document order.
    pub fn routes(&self) -> &Routes {
        &self.routes
    }

    /// Mix ports, keyed by name.
    pub fn mix_ports(&self) -> &MixPorts {
        &self.mix_ports
    }

    /// Route endpoints that name no port of this module.
    pub fn unresolved_route_endpoints(&self) -> Vec<UnresolvedEndpoint<'_>> {
        self.routes
            .iter()
            .flat_map(|route| {
                route.endpoints().map(move |endpoint| UnresolvedEndpoint {
                    route_sink: route.sink(),
                    endpoint,
                })
            })
            .filter(|e| !self.device_ports.contains(e.endpoint) && !self.mix_ports.contains(e.endpoint))
            .collect()
    }

    fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<unnamed>")
    }
}

impl Named for Module {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl Element for Module {
    const TAG: &'static str = "Module";
    const COLLECTION_TAG: &'static str = "Modules";
    const ATTRIBUTES: &'static [AttributeSpec] = &[AttributeSpec::optional("name")];
    type Context<'c> = DeserializeOptions;
    type Collection = Modules;

    fn decode(node: Node<'_, '_>, options: DeserializeOptions) -> Result<Self> {
        let attrs = Attributes::new(Self::TAG, Self::ATTRIBUTES, node);
        let name = attrs
            .optional("name")
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string);

        let device_ports = decode_collection::<DevicePort>(node, ())?;
        let routes = decode_collection::<Route>(node, ())?;

        let ctx = ModuleContext {
            device_ports: &device_ports,
            routes: &routes,
        };
        let mix_ports = decode_collection::<MixPort>(node, ctx)?;

        let module = Self {
            name,
            device_ports,
            routes,
            mix_ports,
        };

        for unresolved in module.unresolved_route_endpoints() {
            if options.check_route_references {
                return Err(ConfigError::unresolved(
                    Route::TAG,
                    unresolved.route_sink,
                    unresolved.endpoint,
                ));
            }
            tracing::warn!(
                module = module.display_name(),
                sink = unresolved.route_sink,
                endpoint = unresolved.endpoint,
                "route endpoint names no port of its module"
            );
        }

        tracing::debug!(
            "module {}: {} device ports, {} routes, {} mix ports",
            module.display_name(),
            module.device_ports.len(),
            module.routes.len(),
            module.mix_ports.len()
        );
        Ok(module)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(xml: &str, options: DeserializeOptions) -> Result<Modules> {
        let doc = roxmltree::Document::parse(xml).unwrap();
        decode_collection::<Module>(doc.root_element(), options)
    }

    const TWO_MODULES: &str = r#"<Root><Modules>
        <Module name="primary">
            <DevicePorts>
                <DevicePort name="Speaker" type="AUDIO_DEVICE_OUT_SPEAKER" role="sink"/>
            </DevicePorts>
            <Routes><Route sink="Speaker" sources="media"/></Routes>
            <MixPorts>
                <MixPort name="media" role="source" card="PCH" device="0" devicePorts="Speaker"/>
            </MixPorts>
        </Module>
        <Module name="hdmi">
            <DevicePorts>
                <DevicePort name="Speaker" type="AUDIO_DEVICE_OUT_HDMI" role="sink"/>
            </DevicePorts>
        </Module>
    </Modules></Root>"#;

    #[test]
    fn same_port_name_in_two_modules() {
        let modules = decode(TWO_MODULES, DeserializeOptions::default()).unwrap();
        assert_eq!(modules.len(), 2);
        let hdmi = modules.get("hdmi").unwrap();
        assert_eq!(hdmi.device_ports().get("Speaker").unwrap().device_type(), 0x400);
        let primary = modules.get("primary").unwrap();
        assert!(primary.mix_ports().get("media").unwrap().reaches("Speaker"));
        assert!(primary.unresolved_route_endpoints().is_empty());
    }

    #[test]
    fn mix_port_cannot_reach_sibling_module() {
        let err = decode(
            r#"<Root><Modules>
                <Module name="a">
                    <DevicePorts><DevicePort name="Speaker" type="AUDIO_DEVICE_OUT_SPEAKER" role="sink"/></DevicePorts>
                </Module>
                <Module name="b">
                    <MixPorts><MixPort name="media" role="source" card="PCH" device="0" devicePorts="Speaker"/></MixPorts>
                </Module>
            </Modules></Root>"#,
            DeserializeOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::UnresolvedReference { element: "MixPort", .. }));
    }

    #[test]
    fn duplicate_module_names() {
        let err = decode(
            r#"<Root><Modules><Module name="a"/><Module name="a"/></Modules></Root>"#,
            DeserializeOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateName { element: "Module", .. }));
    }

    #[test]
    fn unnamed_modules_coexist() {
        let modules = decode(
            "<Root><Modules><Module/><Module/></Modules></Root>",
            DeserializeOptions::default(),
        )
        .unwrap();
        assert_eq!(modules.len(), 2);
        assert_eq!(modules.iter().next().unwrap().name(), None);
    }

    const LOOSE_ROUTE: &str = r#"<Root><Modules><Module name="m">
        <DevicePorts><DevicePort name="Earpiece" type="AUDIO_DEVICE_OUT_EARPIECE" role="sink"/></DevicePorts>
        <Routes><Route sink="Earpiece" sources="Speaker"/></Routes>
    </Module></Modules></Root>"#;

    #[test]
    fn route_endpoints_are_unchecked_by_default() {
        let modules = decode(LOOSE_ROUTE, DeserializeOptions::default()).unwrap();
        let module = modules.get("m").unwrap();
        assert_eq!(module.routes()[0].sources(), ["Speaker"]);
        assert_eq!(
            module.unresolved_route_endpoints(),
            vec![UnresolvedEndpoint {
                route_sink: "Earpiece",
                endpoint: "Speaker"
            }]
        );
    }

    #[test]
    fn route_endpoints_checked_on_request() {
        let options = DeserializeOptions::default().with_route_reference_check(true);
        let err = decode(LOOSE_ROUTE, options).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::UnresolvedReference { element: "Route", ref name, ref reference }
                if name == "Earpiece" && reference == "Speaker"
        ));
    }
}
