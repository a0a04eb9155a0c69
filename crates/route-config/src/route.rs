//! Routes: signal paths from a set of sources to one sink.

use roxmltree::Node;
use serde::Serialize;

use crate::attributes::{AttributeSpec, Attributes};
use crate::element::Element;
use crate::error::{ConfigError, Result};

/// One signal path inside a module.
///
/// Endpoint names are kept as written; they are not required to name a
/// device port of the module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    sink: String,
    sources: Vec<String>,
}

/// Routes of one module, in document order.
pub type Routes = Vec<Route>;

impl Route {
    /// Name of the sink endpoint.
    pub fn sink(&self) -> &str {
        &self.sink
    }

    /// Names of the source endpoints, in declaration order.
    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    /// Returns `true` if `name` is one of the route's sources.
    pub fn involves_source(&self, name: &str) -> bool {
        self.sources.iter().any(|source| source == name)
    }

    /// Sink followed by sources.
    pub fn endpoints(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.sink.as_str()).chain(self.sources.iter().map(String::as_str))
    }
}

impl Element for Route {
    const TAG: &'static str = "Route";
    const COLLECTION_TAG: &'static str = "Routes";
    const ATTRIBUTES: &'static [AttributeSpec] = &[
        AttributeSpec::required("sink"),
        AttributeSpec::required("sources"),
    ];
    type Context<'c> = ();
    type Collection = Routes;

    fn decode(node: Node<'_, '_>, (): ()) -> Result<Self> {
        let attrs = Attributes::new(Self::TAG, Self::ATTRIBUTES, node);
        let sink = attrs.required("sink")?.trim().to_string();
        let sources = attrs.list("sources");
        if sources.is_empty() {
            return Err(ConfigError::malformed(
                Self::TAG,
                "sources",
                attrs.required("sources")?,
                "a route needs at least one source",
            ));
        }
        Ok(Self { sink, sources })
    }
}
