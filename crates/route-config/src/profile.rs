//! Capability profiles attached to mix ports.

use roxmltree::Node;
use serde::Serialize;

use crate::attributes::{AttributeSpec, Attributes, parse_uint, split_list};
use crate::element::Element;
use crate::error::Result;
use crate::symbols::{CHANNEL_MASKS, FORMATS};

/// Sample rates, format and channel masks a stream endpoint can carry.
///
/// An empty rate or mask set, or an absent format, means the value is
/// discovered at runtime.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AudioCapability {
    /// Supported sampling rates in Hz.
    pub sampling_rates: Vec<u32>,
    /// `audio_format_t` value.
    pub format: Option<u32>,
    /// `audio_channel_mask_t` values.
    pub channel_masks: Vec<u32>,
}

/// Capability profiles, in document order.
pub type AudioCapabilities = Vec<AudioCapability>;

pub(crate) const SAMPLING_RATES: &str = "samplingRates";
pub(crate) const FORMAT: &str = "format";
pub(crate) const CHANNEL_MASKS_ATTR: &str = "channelMasks";

impl AudioCapability {
    /// Returns `true` if every field is discovered at runtime.
    pub fn is_dynamic(&self) -> bool {
        self.sampling_rates.is_empty() && self.format.is_none() && self.channel_masks.is_empty()
    }

    /// Returns `true` if `attrs` carries any capability attribute.
    pub(crate) fn present_in(attrs: &Attributes<'_, '_>) -> bool {
        attrs.has(SAMPLING_RATES) || attrs.has(FORMAT) || attrs.has(CHANNEL_MASKS_ATTR)
    }

    /// Reads the capability attributes through any catalogue that lists them.
    pub(crate) fn read(attrs: &Attributes<'_, '_>) -> Result<Self> {
        let sampling_rates = attrs
            .parse_with(SAMPLING_RATES, |text| {
                split_list(text)
                    .iter()
                    .map(|rate| parse_uint(rate))
                    .collect::<std::result::Result<Vec<_>, _>>()
            })?
            .unwrap_or_default();
        let format = attrs.parse_with(FORMAT, |text| FORMATS.resolve(text))?;
        let channel_masks = attrs
            .parse_with(CHANNEL_MASKS_ATTR, |text| {
                split_list(text)
                    .iter()
                    .map(|mask| CHANNEL_MASKS.resolve(mask))
                    .collect::<std::result::Result<Vec<_>, _>>()
            })?
            .unwrap_or_default();

        Ok(Self {
            sampling_rates,
            format,
            channel_masks,
        })
    }
}

impl Element for AudioCapability {
    const TAG: &'static str = "Profile";
    const COLLECTION_TAG: &'static str = "Profiles";
    const ATTRIBUTES: &'static [AttributeSpec] = &[
        AttributeSpec::optional(SAMPLING_RATES),
        AttributeSpec::optional(FORMAT),
        AttributeSpec::optional(CHANNEL_MASKS_ATTR),
    ];
    type Context<'c> = ();
    type Collection = AudioCapabilities;

    fn decode(node: Node<'_, '_>, (): ()) -> Result<Self> {
        Self::read(&Attributes::new(Self::TAG, Self::ATTRIBUTES, node))
    }
}
