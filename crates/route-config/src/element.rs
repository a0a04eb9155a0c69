//! The decode contract shared by every element kind.
//!
//! Each kind of element in a configuration document implements [`Element`]:
//! it names its tag, the tag of the container wrapping repeated instances,
//! its attribute catalogue, the collection it accumulates into and the
//! context it needs to resolve references. [`ElementKind`] enumerates the
//! implementations so the catalogue can be inspected at runtime.

use roxmltree::Node;
use serde::Serialize;

use crate::attributes::AttributeSpec;
use crate::collection::Collection;
use crate::criterion::{Criterion, CriterionType};
use crate::error::Result;
use crate::mix_port::MixPort;
use crate::module::Module;
use crate::parameter::RogueParameter;
use crate::port::DevicePort;
use crate::profile::AudioCapability;
use crate::route::Route;

/// One kind of element in a configuration document.
pub trait Element: Sized {
    /// Tag of one element instance.
    const TAG: &'static str;

    /// Tag of the container wrapping repeated instances.
    ///
    /// When equal to [`Element::TAG`], instances are direct children of the
    /// parent node.
    const COLLECTION_TAG: &'static str;

    /// Recognized attributes.
    const ATTRIBUTES: &'static [AttributeSpec];

    /// Read-only data from already-decoded siblings needed to resolve references.
    type Context<'c>: Copy;

    /// Collection that instances accumulate into.
    type Collection: Collection<Self> + Default;

    /// Builds one element from one node.
    fn decode(node: Node<'_, '_>, ctx: Self::Context<'_>) -> Result<Self>;
}

/// Static description of an element kind, as published by its [`Element`] impl.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ElementSchema {
    /// Tag of one element instance.
    pub tag: &'static str,
    /// Tag of the wrapping container.
    pub collection_tag: &'static str,
    /// Recognized attributes, in catalogue order.
    #[serde(serialize_with = "serialize_catalogue")]
    pub attributes: &'static [AttributeSpec],
}

impl ElementSchema {
    /// Schema of element kind `E`.
    pub const fn of<E: Element>() -> Self {
        Self {
            tag: E::TAG,
            collection_tag: E::COLLECTION_TAG,
            attributes: E::ATTRIBUTES,
        }
    }

    /// Names of the required attributes.
    pub fn required(&self) -> impl Iterator<Item = &'static str> {
        self.attributes
            .iter()
            .filter(|spec| spec.required)
            .map(|spec| spec.name)
    }
}

fn serialize_catalogue<S: serde::Serializer>(
    catalogue: &&'static [AttributeSpec],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    use serde::ser::SerializeMap;
    let mut map = serializer.serialize_map(Some(catalogue.len()))?;
    for spec in catalogue.iter() {
        map.serialize_entry(spec.name, &spec.required)?;
    }
    map.end()
}

/// Every element kind understood by the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// `<CriterionType>`
    CriterionType,
    /// `<Criterion>`
    Criterion,
    /// `<Parameter>`
    RogueParameter,
    /// `<Profile>`
    AudioProfile,
    /// `<DevicePort>`
    DevicePort,
    /// `<Route>`
    Route,
    /// `<Module>`
    Module,
    /// `<MixPort>`
    MixPort,
}

impl ElementKind {
    /// All kinds, in decode order.
    pub const ALL: [ElementKind; 8] = [
        ElementKind::CriterionType,
        ElementKind::Criterion,
        ElementKind::RogueParameter,
        ElementKind::Module,
        ElementKind::DevicePort,
        ElementKind::Route,
        ElementKind::MixPort,
        ElementKind::AudioProfile,
    ];

    /// Schema published by the kind's [`Element`] implementation.
    pub const fn schema(self) -> ElementSchema {
        match self {
            ElementKind::CriterionType => ElementSchema::of::<CriterionType>(),
            ElementKind::Criterion => ElementSchema::of::<Criterion>(),
            ElementKind::RogueParameter => ElementSchema::of::<RogueParameter>(),
            ElementKind::AudioProfile => ElementSchema::of::<AudioCapability>(),
            ElementKind::DevicePort => ElementSchema::of::<DevicePort>(),
            ElementKind::Route => ElementSchema::of::<Route>(),
            ElementKind::Module => ElementSchema::of::<Module>(),
            ElementKind::MixPort => ElementSchema::of::<MixPort>(),
        }
    }

    /// Looks a kind up by its element tag (case-insensitive).
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.schema().tag.eq_ignore_ascii_case(tag))
    }
}
