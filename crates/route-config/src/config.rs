//! The top-level aggregate and the decode pass that builds it.

use roxmltree::{Document, Node};
use serde::Serialize;

use crate::collection::decode_collection;
use crate::criterion::{Criteria, Criterion, CriterionType, CriterionTypes};
use crate::error::{ConfigError, Result};
use crate::module::{Module, Modules};
use crate::parameter::{RogueParameter, RogueParameters};
use crate::version::{FormatVersion, SUPPORTED_VERSION, VersionPolicy};

/// Tag of the document root.
pub const ROOT_TAG: &str = "RouteManagerConfiguration";

/// Root attribute carrying the format version.
pub const VERSION_ATTRIBUTE: &str = "version";

/// Knobs for one decode pass.
///
/// # Example
///
/// ```rust
/// use route_config::{DeserializeOptions, VersionPolicy};
///
/// let options = DeserializeOptions::default()
///     .with_version_policy(VersionPolicy::Strict)
///     .with_route_reference_check(true);
/// assert!(options.check_route_references);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeserializeOptions {
    /// How the document version is compared with [`SUPPORTED_VERSION`].
    pub version_policy: VersionPolicy,
    /// Reject routes whose endpoints name no port of their module.
    pub check_route_references: bool,
}

impl DeserializeOptions {
    /// Set the version policy.
    pub fn with_version_policy(mut self, policy: VersionPolicy) -> Self {
        self.version_policy = policy;
        self
    }

    /// Enable or disable route endpoint checking.
    pub fn with_route_reference_check(mut self, enabled: bool) -> Self {
        self.check_route_references = enabled;
        self
    }
}

/// Everything the routing subsystem needs, decoded from one document.
///
/// The aggregate owns all its data and holds no reference to the document it
/// was decoded from. It is only ever handed out whole: a failed decode
/// returns an error and nothing else.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RouteManagerConfig {
    version: Option<FormatVersion>,
    criterion_types: CriterionTypes,
    criteria: Criteria,
    parameters: RogueParameters,
    modules: Modules,
}

impl RouteManagerConfig {
    /// Decodes a document with default options.
    pub fn deserialize(text: &str) -> Result<Self> {
        Deserializer::new().deserialize(text)
    }

    /// Version declared by the document; `None` for an empty default configuration.
    pub fn version(&self) -> Option<FormatVersion> {
        self.version
    }

    /// Criterion types, keyed by name.
    pub fn criterion_types(&self) -> &CriterionTypes {
        &self.criterion_types
    }

    /// Criteria, keyed by name.
    pub fn criteria(&self) -> &Criteria {
        &self.criteria
    }

    /// Rogue parameters, keyed by name.
    pub fn parameters(&self) -> &RogueParameters {
        &self.parameters
    }

    /// Modules, keyed by name when they have one.
    pub fn modules(&self) -> &Modules {
        &self.modules
    }

    /// The criterion type a criterion draws its values from.
    pub fn criterion_type_of(&self, criterion: &Criterion) -> Option<&CriterionType> {
        self.criterion_types.get(criterion.type_name())
    }

    /// Returns `true` if no collection holds anything.
    pub fn is_empty(&self) -> bool {
        self.criterion_types.is_empty()
            && self.criteria.is_empty()
            && self.parameters.is_empty()
            && self.modules.is_empty()
    }
}

/// Decodes documents into [`RouteManagerConfig`] values.
///
/// A deserializer holds only its options; independent decodes share nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct Deserializer {
    options: DeserializeOptions,
}

impl Deserializer {
    /// Create a deserializer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a deserializer with the given options.
    pub fn with_options(options: DeserializeOptions) -> Self {
        Self { options }
    }

    /// Options in effect.
    pub fn options(&self) -> DeserializeOptions {
        self.options
    }

    /// Decodes one document.
    pub fn deserialize(&self, text: &str) -> Result<RouteManagerConfig> {
        let document = Document::parse(text)?;
        self.deserialize_document(&document)
    }

    /// Decodes an already-parsed document.
    pub fn deserialize_document(&self, document: &Document<'_>) -> Result<RouteManagerConfig> {
        let root = document.root_element();
        let version = self.check_root(root)?;

        let criterion_types = decode_collection::<CriterionType>(root, ())?;
        let criteria = decode_collection::<Criterion>(root, &criterion_types)?;
        let parameters = decode_collection::<RogueParameter>(root, ())?;
        let modules = decode_collection::<Module>(root, self.options)?;

        tracing::info!(
            %version,
            criterion_types = criterion_types.len(),
            criteria = criteria.len(),
            parameters = parameters.len(),
            modules = modules.len(),
            "decoded route manager configuration"
        );

        Ok(RouteManagerConfig {
            version: Some(version),
            criterion_types,
            criteria,
            parameters,
            modules,
        })
    }

    fn check_root(&self, root: Node<'_, '_>) -> Result<FormatVersion> {
        let tag = root.tag_name().name();
        if tag != ROOT_TAG {
            return Err(ConfigError::UnknownTag {
                expected: ROOT_TAG,
                found: tag.to_string(),
            });
        }

        let text = root
            .attribute(VERSION_ATTRIBUTE)
            .ok_or_else(|| ConfigError::missing(ROOT_TAG, VERSION_ATTRIBUTE))?;
        let version: FormatVersion = text
            .parse()
            .map_err(|e: crate::version::ParseVersionError| {
                ConfigError::malformed(ROOT_TAG, VERSION_ATTRIBUTE, text, e.to_string())
            })?;

        let policy = self.options.version_policy;
        if !policy.accepts(version, SUPPORTED_VERSION) {
            return Err(ConfigError::UnsupportedVersion {
                found: version,
                supported: SUPPORTED_VERSION,
                policy,
            });
        }
        Ok(version)
    }
}

/// Decodes a document with default options.
///
/// # Example
///
/// ```rust
/// let config = route_config::deserialize(
///     r#"<RouteManagerConfiguration version="1.0">
///          <CriterionTypes>
///            <CriterionType name="OutputDevice" type="exclusive" values="Earpiece:1,Speaker:2"/>
///          </CriterionTypes>
///          <Criteria>
///            <Criterion name="SelectedOutput" type="OutputDevice" defaultVal="Earpiece"/>
///          </Criteria>
///        </RouteManagerConfiguration>"#,
/// )
/// .unwrap();
///
/// let criterion = config.criteria().get("SelectedOutput").unwrap();
/// let ty = config.criterion_type_of(criterion).unwrap();
/// assert_eq!(ty.value_of("Speaker"), Some(2));
/// ```
pub fn deserialize(text: &str) -> Result<RouteManagerConfig> {
    RouteManagerConfig::deserialize(text)
}
