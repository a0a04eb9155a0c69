//! Mix ports: software-facing stream endpoints of a module.
//!
//! A mix port names the device ports it can reach. Those names are resolved
//! against the device ports of the enclosing module only, which the module
//! hands down as a [`ModuleContext`] once its own ports are decoded.

use roxmltree::Node;
use serde::Serialize;
use std::fmt;

use crate::attributes::{AttributeSpec, Attributes};
use crate::collection::{Named, NamedCollection, decode_collection};
use crate::element::Element;
use crate::error::{ConfigError, Result};
use crate::module::ModuleContext;
use crate::port::PortRole;
use crate::profile::{AudioCapabilities, AudioCapability, CHANNEL_MASKS_ATTR, FORMAT, SAMPLING_RATES};
use crate::symbols::STREAM_FLAGS;

/// What to do with one channel when the stream and the device disagree on
/// channel count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelPolicy {
    /// Copy the matching channel.
    Copy,
    /// Leave the channel silent.
    Ignore,
    /// Mix all channels down into this one.
    Average,
}

impl ChannelPolicy {
    fn parse(text: &str) -> std::result::Result<Self, String> {
        match text.trim() {
            "copy" => Ok(ChannelPolicy::Copy),
            "ignore" => Ok(ChannelPolicy::Ignore),
            "average" => Ok(ChannelPolicy::Average),
            other => Err(format!("unknown channel policy '{other}'")),
        }
    }
}

impl fmt::Display for ChannelPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelPolicy::Copy => f.write_str("copy"),
            ChannelPolicy::Ignore => f.write_str("ignore"),
            ChannelPolicy::Average => f.write_str("average"),
        }
    }
}

/// ALSA buffering parameters. Absent values fall back to driver defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Buffering {
    /// Frames per period.
    pub period_size: Option<u32>,
    /// Periods per buffer.
    pub period_count: Option<u32>,
    /// Frames queued before the stream starts.
    pub start_threshold: Option<u32>,
    /// Frames available before the stream stops.
    pub stop_threshold: Option<u32>,
    /// Frames below which silence is inserted.
    pub silence_threshold: Option<u32>,
    /// Minimum frames available before a wake-up.
    pub avail_min: Option<u32>,
}

/// Mixer controls used to query capabilities at runtime.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DynamicControls {
    /// Control reporting supported channel maps.
    pub channel_maps: Option<String>,
    /// Control reporting supported sample rates.
    pub sample_rates: Option<String>,
    /// Control reporting supported formats.
    pub formats: Option<String>,
}

impl DynamicControls {
    /// Returns `true` if no control is configured.
    pub fn is_empty(&self) -> bool {
        self.channel_maps.is_none() && self.sample_rates.is_none() && self.formats.is_none()
    }
}

/// A named stream endpoint mapped onto device ports of its module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MixPort {
    /// Name of the port, unique within its module.
    pub name: String,
    /// Direction of the port.
    pub role: PortRole,
    /// ALSA card name.
    pub card: String,
    /// ALSA device index on the card.
    pub device: u32,
    /// Address of the device, if any.
    pub device_address: Option<String>,
    /// Output or input flag mask, depending on [`MixPort::role`].
    pub flags: u32,
    /// Whether the device must be enabled before the stream starts.
    pub require_pre_enable: bool,
    /// Whether the device must be disabled after the stream stops.
    pub require_post_disable: bool,
    /// Silence written at stream start, in milliseconds.
    pub silence_prolog_ms: u32,
    /// Per-channel policy, one entry per channel.
    pub channels_policy: Vec<ChannelPolicy>,
    /// ALSA buffering parameters.
    pub buffering: Buffering,
    /// Controls for runtime capability discovery.
    pub dynamic_controls: DynamicControls,
    /// Use cases the port may serve.
    pub supported_use_cases: Vec<String>,
    /// Device ports of the enclosing module this port can reach.
    pub device_ports: Vec<String>,
    /// Effects supported on this port.
    pub effects: Vec<String>,
    /// Capability profiles; the inline profile, if any, comes first.
    pub capabilities: AudioCapabilities,
}

/// Mix ports of one module, keyed by name.
pub type MixPorts = NamedCollection<MixPort>;

impl MixPort {
    /// Returns `true` if the port can reach the named device port.
    pub fn reaches(&self, device_port: &str) -> bool {
        self.device_ports.iter().any(|name| name == device_port)
    }
}

impl Named for MixPort {
    fn name(&self) -> Option<&str> {
        Some(self.name.as_str())
    }
}

impl Element for MixPort {
    const TAG: &'static str = "MixPort";
    const COLLECTION_TAG: &'static str = "MixPorts";
    const ATTRIBUTES: &'static [AttributeSpec] = &[
        AttributeSpec::required("name"),
        AttributeSpec::required("role"),
        AttributeSpec::required("card"),
        AttributeSpec::required("device"),
        AttributeSpec::optional("deviceAddress"),
        AttributeSpec::optional("flagMask"),
        AttributeSpec::optional("requirePreEnable"),
        AttributeSpec::optional("requirePostDisable"),
        AttributeSpec::optional("silencePrologMs"),
        AttributeSpec::optional("channelsPolicy"),
        AttributeSpec::optional("periodSize"),
        AttributeSpec::optional("periodCount"),
        AttributeSpec::optional("startThreshold"),
        AttributeSpec::optional("stopThreshold"),
        AttributeSpec::optional("silenceThreshold"),
        AttributeSpec::optional("availMin"),
        AttributeSpec::optional("dynamicChannelMapsControl"),
        AttributeSpec::optional("dynamicSampleRatesControl"),
        AttributeSpec::optional("dynamicFormatsControl"),
        AttributeSpec::optional("supportedUseCases"),
        AttributeSpec::optional("devicePorts"),
        AttributeSpec::optional("effects"),
        AttributeSpec::optional(SAMPLING_RATES),
        AttributeSpec::optional(FORMAT),
        AttributeSpec::optional(CHANNEL_MASKS_ATTR),
    ];
    type Context<'c> = ModuleContext<'c>;
    type Collection = MixPorts;

    fn decode(node: Node<'_, '_>, ctx: ModuleContext<'_>) -> Result<Self> {
        let attrs = Attributes::new(Self::TAG, Self::ATTRIBUTES, node);
        let name = attrs.required_name("name")?;

        let device_ports = attrs.list("devicePorts");
        if let Some(missing) = device_ports
            .iter()
            .find(|port| !ctx.device_ports.contains(port))
        {
            return Err(ConfigError::unresolved(Self::TAG, name, missing.as_str()));
        }

        let channels_policy = attrs
            .parse_with("channelsPolicy", |text| {
                crate::attributes::split_list(text)
                    .iter()
                    .map(|policy| ChannelPolicy::parse(policy))
                    .collect::<std::result::Result<Vec<_>, _>>()
            })?
            .unwrap_or_default();

        let buffering = Buffering {
            period_size: attrs.uint("periodSize")?,
            period_count: attrs.uint("periodCount")?,
            start_threshold: attrs.uint("startThreshold")?,
            stop_threshold: attrs.uint("stopThreshold")?,
            silence_threshold: attrs.uint("silenceThreshold")?,
            avail_min: attrs.uint("availMin")?,
        };

        let dynamic_controls = DynamicControls {
            channel_maps: attrs.optional("dynamicChannelMapsControl").map(str::to_string),
            sample_rates: attrs.optional("dynamicSampleRatesControl").map(str::to_string),
            formats: attrs.optional("dynamicFormatsControl").map(str::to_string),
        };

        let mut capabilities = Vec::new();
        if AudioCapability::present_in(&attrs) {
            capabilities.push(AudioCapability::read(&attrs)?);
        }
        capabilities.extend(decode_collection::<AudioCapability>(node, ())?);

        tracing::trace!(
            name = %name,
            device_ports = device_ports.len(),
            profiles = capabilities.len(),
            "mix port"
        );

        Ok(Self {
            role: attrs.require_with("role", PortRole::parse)?,
            card: attrs.required("card")?.to_string(),
            device: attrs.require_uint("device")?,
            device_address: attrs.optional("deviceAddress").map(str::to_string),
            flags: attrs.mask("flagMask", &STREAM_FLAGS)?.unwrap_or_default(),
            require_pre_enable: attrs.flag_or("requirePreEnable", false)?,
            require_post_disable: attrs.flag_or("requirePostDisable", false)?,
            silence_prolog_ms: attrs.uint("silencePrologMs")?.unwrap_or(0),
            channels_policy,
            buffering,
            dynamic_controls,
            supported_use_cases: attrs.list("supportedUseCases"),
            device_ports,
            effects: attrs.list("effects"),
            capabilities,
            name,
        })
    }
}
