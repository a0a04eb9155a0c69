//! Symbolic audio constants accepted in attribute values.
//!
//! Device types, sample formats, channel masks and stream flags may be written
//! either as their Android constant names or as plain numbers. The tables here
//! only translate names; they say nothing about what a given board supports.

/// A named table of symbolic constants.
#[derive(Debug)]
pub struct SymbolTable {
    /// What the symbols denote, used in error messages.
    pub kind: &'static str,
    /// `(name, value)` pairs.
    pub entries: &'static [(&'static str, u32)],
}

impl SymbolTable {
    /// Value of a symbol, if known.
    pub fn lookup(&self, name: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|(symbol, _)| *symbol == name)
            .map(|&(_, value)| value)
    }

    /// First symbol carrying `value`, if any.
    pub fn name_of(&self, value: u32) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|&&(_, v)| v == value)
            .map(|&(symbol, _)| symbol)
    }

    /// Resolves one symbol or a plain number.
    pub fn resolve(&self, text: &str) -> Result<u32, String> {
        let text = text.trim();
        if let Some(value) = self.lookup(text) {
            return Ok(value);
        }
        crate::attributes::parse_uint(text)
            .map_err(|_| format!("unknown {} '{}'", self.kind, text))
    }

    /// Resolves a `|`-joined set of symbols (or plain numbers) into a mask.
    pub fn resolve_mask(&self, text: &str) -> Result<u32, String> {
        text.split('|')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .try_fold(0u32, |mask, part| self.resolve(part).map(|value| mask | value))
    }
}

/// `audio_devices_t` values.
pub static DEVICE_TYPES: SymbolTable = SymbolTable {
    kind: "device type",
    entries: &[
        ("AUDIO_DEVICE_NONE", 0x0),
        ("AUDIO_DEVICE_OUT_EARPIECE", 0x1),
        ("AUDIO_DEVICE_OUT_SPEAKER", 0x2),
        ("AUDIO_DEVICE_OUT_WIRED_HEADSET", 0x4),
        ("AUDIO_DEVICE_OUT_WIRED_HEADPHONE", 0x8),
        ("AUDIO_DEVICE_OUT_BLUETOOTH_SCO", 0x10),
        ("AUDIO_DEVICE_OUT_BLUETOOTH_SCO_HEADSET", 0x20),
        ("AUDIO_DEVICE_OUT_BLUETOOTH_SCO_CARKIT", 0x40),
        ("AUDIO_DEVICE_OUT_BLUETOOTH_A2DP", 0x80),
        ("AUDIO_DEVICE_OUT_BLUETOOTH_A2DP_HEADPHONES", 0x100),
        ("AUDIO_DEVICE_OUT_BLUETOOTH_A2DP_SPEAKER", 0x200),
        ("AUDIO_DEVICE_OUT_AUX_DIGITAL", 0x400),
        ("AUDIO_DEVICE_OUT_HDMI", 0x400),
        ("AUDIO_DEVICE_OUT_ANLG_DOCK_HEADSET", 0x800),
        ("AUDIO_DEVICE_OUT_DGTL_DOCK_HEADSET", 0x1000),
        ("AUDIO_DEVICE_OUT_USB_ACCESSORY", 0x2000),
        ("AUDIO_DEVICE_OUT_USB_DEVICE", 0x4000),
        ("AUDIO_DEVICE_OUT_REMOTE_SUBMIX", 0x8000),
        ("AUDIO_DEVICE_OUT_TELEPHONY_TX", 0x10000),
        ("AUDIO_DEVICE_OUT_LINE", 0x20000),
        ("AUDIO_DEVICE_OUT_HDMI_ARC", 0x40000),
        ("AUDIO_DEVICE_OUT_SPDIF", 0x80000),
        ("AUDIO_DEVICE_OUT_FM", 0x100000),
        ("AUDIO_DEVICE_OUT_AUX_LINE", 0x200000),
        ("AUDIO_DEVICE_OUT_SPEAKER_SAFE", 0x400000),
        ("AUDIO_DEVICE_OUT_IP", 0x800000),
        ("AUDIO_DEVICE_OUT_BUS", 0x1000000),
        ("AUDIO_DEVICE_IN_COMMUNICATION", 0x80000001),
        ("AUDIO_DEVICE_IN_AMBIENT", 0x80000002),
        ("AUDIO_DEVICE_IN_BUILTIN_MIC", 0x80000004),
        ("AUDIO_DEVICE_IN_BLUETOOTH_SCO_HEADSET", 0x80000008),
        ("AUDIO_DEVICE_IN_WIRED_HEADSET", 0x80000010),
        ("AUDIO_DEVICE_IN_AUX_DIGITAL", 0x80000020),
        ("AUDIO_DEVICE_IN_HDMI", 0x80000020),
        ("AUDIO_DEVICE_IN_VOICE_CALL", 0x80000040),
        ("AUDIO_DEVICE_IN_TELEPHONY_RX", 0x80000040),
        ("AUDIO_DEVICE_IN_BACK_MIC", 0x80000080),
        ("AUDIO_DEVICE_IN_REMOTE_SUBMIX", 0x80000100),
        ("AUDIO_DEVICE_IN_ANLG_DOCK_HEADSET", 0x80000200),
        ("AUDIO_DEVICE_IN_DGTL_DOCK_HEADSET", 0x80000400),
        ("AUDIO_DEVICE_IN_USB_ACCESSORY", 0x80000800),
        ("AUDIO_DEVICE_IN_USB_DEVICE", 0x80001000),
        ("AUDIO_DEVICE_IN_FM_TUNER", 0x80002000),
        ("AUDIO_DEVICE_IN_TV_TUNER", 0x80004000),
        ("AUDIO_DEVICE_IN_LINE", 0x80008000),
        ("AUDIO_DEVICE_IN_SPDIF", 0x80010000),
        ("AUDIO_DEVICE_IN_BLUETOOTH_A2DP", 0x80020000),
        ("AUDIO_DEVICE_IN_LOOPBACK", 0x80040000),
        ("AUDIO_DEVICE_IN_IP", 0x80080000),
        ("AUDIO_DEVICE_IN_BUS", 0x80100000),
    ],
};

/// `audio_format_t` values.
pub static FORMATS: SymbolTable = SymbolTable {
    kind: "audio format",
    entries: &[
        ("AUDIO_FORMAT_DEFAULT", 0x0),
        ("AUDIO_FORMAT_PCM_16_BIT", 0x1),
        ("AUDIO_FORMAT_PCM_8_BIT", 0x2),
        ("AUDIO_FORMAT_PCM_32_BIT", 0x3),
        ("AUDIO_FORMAT_PCM_8_24_BIT", 0x4),
        ("AUDIO_FORMAT_PCM_FLOAT", 0x5),
        ("AUDIO_FORMAT_PCM_24_BIT_PACKED", 0x6),
        ("AUDIO_FORMAT_MP3", 0x01000000),
        ("AUDIO_FORMAT_AAC", 0x04000000),
        ("AUDIO_FORMAT_AC3", 0x09000000),
        ("AUDIO_FORMAT_E_AC3", 0x0A000000),
        ("AUDIO_FORMAT_DTS", 0x0B000000),
        ("AUDIO_FORMAT_IEC61937", 0x0D000000),
    ],
};

/// `audio_channel_mask_t` values.
pub static CHANNEL_MASKS: SymbolTable = SymbolTable {
    kind: "channel mask",
    entries: &[
        ("AUDIO_CHANNEL_NONE", 0x0),
        ("AUDIO_CHANNEL_OUT_MONO", 0x1),
        ("AUDIO_CHANNEL_OUT_STEREO", 0x3),
        ("AUDIO_CHANNEL_OUT_2POINT1", 0xB),
        ("AUDIO_CHANNEL_OUT_QUAD", 0x33),
        ("AUDIO_CHANNEL_OUT_SURROUND", 0x107),
        ("AUDIO_CHANNEL_OUT_5POINT1", 0x3F),
        ("AUDIO_CHANNEL_OUT_7POINT1", 0x63F),
        ("AUDIO_CHANNEL_IN_LEFT", 0x4),
        ("AUDIO_CHANNEL_IN_RIGHT", 0x8),
        ("AUDIO_CHANNEL_IN_MONO", 0x10),
        ("AUDIO_CHANNEL_IN_STEREO", 0xC),
        ("AUDIO_CHANNEL_IN_FRONT_BACK", 0x30),
        ("AUDIO_CHANNEL_IN_VOICE_UPLINK_MONO", 0x4010),
        ("AUDIO_CHANNEL_IN_VOICE_DNLINK_MONO", 0x8010),
        ("AUDIO_CHANNEL_IN_VOICE_CALL_MONO", 0xC010),
        ("AUDIO_CHANNEL_INDEX_MASK_1", 0x80000001),
        ("AUDIO_CHANNEL_INDEX_MASK_2", 0x80000003),
        ("AUDIO_CHANNEL_INDEX_MASK_4", 0x8000000F),
        ("AUDIO_CHANNEL_INDEX_MASK_8", 0x800000FF),
    ],
};

/// `audio_output_flags_t` and `audio_input_flags_t` values.
///
/// Output and input flags share bit positions, so a flag mask is only
/// meaningful together with the role of the port that carries it.
pub static STREAM_FLAGS: SymbolTable = SymbolTable {
    kind: "stream flag",
    entries: &[
        ("AUDIO_OUTPUT_FLAG_NONE", 0x0),
        ("AUDIO_OUTPUT_FLAG_DIRECT", 0x1),
        ("AUDIO_OUTPUT_FLAG_PRIMARY", 0x2),
        ("AUDIO_OUTPUT_FLAG_FAST", 0x4),
        ("AUDIO_OUTPUT_FLAG_DEEP_BUFFER", 0x8),
        ("AUDIO_OUTPUT_FLAG_COMPRESS_OFFLOAD", 0x10),
        ("AUDIO_OUTPUT_FLAG_NON_BLOCKING", 0x20),
        ("AUDIO_OUTPUT_FLAG_HW_AV_SYNC", 0x40),
        ("AUDIO_OUTPUT_FLAG_TTS", 0x80),
        ("AUDIO_OUTPUT_FLAG_RAW", 0x100),
        ("AUDIO_OUTPUT_FLAG_SYNC", 0x200),
        ("AUDIO_OUTPUT_FLAG_IEC958_NONAUDIO", 0x400),
        ("AUDIO_OUTPUT_FLAG_DIRECT_PCM", 0x2000),
        ("AUDIO_OUTPUT_FLAG_MMAP_NOIRQ", 0x4000),
        ("AUDIO_OUTPUT_FLAG_VOIP_RX", 0x8000),
        ("AUDIO_INPUT_FLAG_NONE", 0x0),
        ("AUDIO_INPUT_FLAG_FAST", 0x1),
        ("AUDIO_INPUT_FLAG_HW_HOTWORD", 0x2),
        ("AUDIO_INPUT_FLAG_RAW", 0x4),
        ("AUDIO_INPUT_FLAG_SYNC", 0x8),
        ("AUDIO_INPUT_FLAG_MMAP_NOIRQ", 0x10),
        ("AUDIO_INPUT_FLAG_VOIP_TX", 0x20),
    ],
};
