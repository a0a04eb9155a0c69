//! Schema-driven decoding of audio route manager configuration.
//!
//! A route manager configuration is an XML document describing the
//! routing policy of an audio subsystem: the criterion types and criteria
//! the policy engine switches on, rogue parameters exposed outside the
//! engine, and the hardware modules with their device ports, mix ports and
//! routes. This crate turns one such document into a fully owned
//! [`RouteManagerConfig`], or a [`ConfigError`] saying exactly what was wrong.
//!
//! # Features
//!
//! - **Schema table**: every element kind declares its tag, collection tag
//!   and attribute catalogue through the [`Element`] trait
//! - **Uniform checks**: required attributes are verified before any
//!   element-specific decoding runs
//! - **Named collections**: lookup by name with duplicate rejection
//! - **Scoped references**: mix ports resolve their device ports inside
//!   their own module only
//! - **Paths**: locating the configuration file on a device
//!
//! # Example
//!
//! ```rust
//! use route_config::{DeserializeOptions, Deserializer};
//!
//! let text = r#"<RouteManagerConfiguration version="1.0">
//!     <Modules>
//!         <Module name="primary">
//!             <DevicePorts>
//!                 <DevicePort name="Speaker" type="AUDIO_DEVICE_OUT_SPEAKER" role="sink"/>
//!             </DevicePorts>
//!             <Routes>
//!                 <Route sink="Speaker" sources="media"/>
//!             </Routes>
//!             <MixPorts>
//!                 <MixPort name="media" role="source" card="PCH" device="0"
//!                          devicePorts="Speaker" samplingRates="48000"
//!                          format="AUDIO_FORMAT_PCM_16_BIT"
//!                          channelMasks="AUDIO_CHANNEL_OUT_STEREO"/>
//!             </MixPorts>
//!         </Module>
//!     </Modules>
//! </RouteManagerConfiguration>"#;
//!
//! let options = DeserializeOptions::default().with_route_reference_check(true);
//! let config = Deserializer::with_options(options).deserialize(text).unwrap();
//!
//! let module = config.modules().get("primary").unwrap();
//! let media = module.mix_ports().get("media").unwrap();
//! assert!(media.reaches("Speaker"));
//! assert_eq!(media.capabilities[0].sampling_rates, [48000]);
//! ```

mod collection;
mod config;
mod criterion;
mod element;
mod error;
mod mix_port;
mod module;
mod parameter;
mod port;
mod profile;
mod route;
mod version;

/// Attribute catalogues and typed attribute access.
pub mod attributes;

/// Locating and loading configuration files.
pub mod paths;

/// Symbolic constants of the audio HAL.
pub mod symbols;

pub use collection::{Collection, Named, NamedCollection, decode_collection};
pub use config::{
    DeserializeOptions, Deserializer, ROOT_TAG, RouteManagerConfig, VERSION_ATTRIBUTE, deserialize,
};
pub use criterion::{Criteria, Criterion, CriterionType, CriterionTypes, CriterionValue, Inclusiveness};
pub use element::{Element, ElementKind, ElementSchema};
pub use error::{ConfigError, Result, Status};
pub use mix_port::{Buffering, ChannelPolicy, DynamicControls, MixPort, MixPorts};
pub use module::{Module, ModuleContext, Modules, UnresolvedEndpoint};
pub use parameter::{ParameterType, RogueParameter, RogueParameters};
pub use port::{DevicePort, DevicePorts, PortRole};
pub use profile::{AudioCapabilities, AudioCapability};
pub use route::{Route, Routes};
pub use version::{FormatVersion, ParseVersionError, SUPPORTED_VERSION, VersionPolicy};
