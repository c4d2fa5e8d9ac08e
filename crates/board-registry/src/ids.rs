use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::RegistryError;
use crate::registry;

// One row per board: variant, published name, code. Codes are a wire contract;
// only append new rows with unused codes.
macro_rules! board_ids {
    ($($variant:ident => $name:literal = $code:literal,)+) => {
        /// Identifier of a supported board or virtual data source.
        ///
        /// The discriminant is the published integer code. Negative codes are virtual
        /// sources, non-negative codes are physical hardware.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "BoardRef", into = "i32")]
        #[repr(i32)]
        pub enum BoardId {
            $($variant = $code,)+
        }

        impl BoardId {
            /// Every identifier, in declaration order.
            pub const ALL: &'static [BoardId] = &[$(BoardId::$variant,)+];

            /// Canonical name, e.g. `CYTON_BOARD`.
            pub const fn name(self) -> &'static str {
                match self {
                    $(BoardId::$variant => $name,)+
                }
            }
        }
    };
}

board_ids! {
    NoBoard => "NO_BOARD" = -100,
    PlaybackFileBoard => "PLAYBACK_FILE_BOARD" = -3,
    StreamingBoard => "STREAMING_BOARD" = -2,
    SyntheticBoard => "SYNTHETIC_BOARD" = -1,
    CytonBoard => "CYTON_BOARD" = 0,
    GanglionBoard => "GANGLION_BOARD" = 1,
    CytonDaisyBoard => "CYTON_DAISY_BOARD" = 2,
    GaleaBoard => "GALEA_BOARD" = 3,
    GanglionWifiBoard => "GANGLION_WIFI_BOARD" = 4,
    CytonWifiBoard => "CYTON_WIFI_BOARD" = 5,
    CytonDaisyWifiBoard => "CYTON_DAISY_WIFI_BOARD" = 6,
    BrainbitBoard => "BRAINBIT_BOARD" = 7,
    UnicornBoard => "UNICORN_BOARD" = 8,
    CallibriEegBoard => "CALLIBRI_EEG_BOARD" = 9,
    CallibriEmgBoard => "CALLIBRI_EMG_BOARD" = 10,
    CallibriEcgBoard => "CALLIBRI_ECG_BOARD" = 11,
    Notion1Board => "NOTION_1_BOARD" = 13,
    Notion2Board => "NOTION_2_BOARD" = 14,
    GforceProBoard => "GFORCE_PRO_BOARD" = 16,
    Freeeeg32Board => "FREEEEG32_BOARD" = 17,
    BrainbitBledBoard => "BRAINBIT_BLED_BOARD" = 18,
    GforceDualBoard => "GFORCE_DUAL_BOARD" = 19,
    GaleaSerialBoard => "GALEA_SERIAL_BOARD" = 20,
    MuseSBledBoard => "MUSE_S_BLED_BOARD" = 21,
    Muse2BledBoard => "MUSE_2_BLED_BOARD" = 22,
    CrownBoard => "CROWN_BOARD" = 23,
    AntNeuroEe410Board => "ANT_NEURO_EE_410_BOARD" = 24,
    AntNeuroEe411Board => "ANT_NEURO_EE_411_BOARD" = 25,
    AntNeuroEe430Board => "ANT_NEURO_EE_430_BOARD" = 26,
    AntNeuroEe211Board => "ANT_NEURO_EE_211_BOARD" = 27,
    AntNeuroEe212Board => "ANT_NEURO_EE_212_BOARD" = 28,
    AntNeuroEe213Board => "ANT_NEURO_EE_213_BOARD" = 29,
    AntNeuroEe214Board => "ANT_NEURO_EE_214_BOARD" = 30,
    AntNeuroEe215Board => "ANT_NEURO_EE_215_BOARD" = 31,
    AntNeuroEe221Board => "ANT_NEURO_EE_221_BOARD" = 32,
    AntNeuroEe222Board => "ANT_NEURO_EE_222_BOARD" = 33,
    AntNeuroEe223Board => "ANT_NEURO_EE_223_BOARD" = 34,
    AntNeuroEe224Board => "ANT_NEURO_EE_224_BOARD" = 35,
    AntNeuroEe225Board => "ANT_NEURO_EE_225_BOARD" = 36,
    EnophoneBoard => "ENOPHONE_BOARD" = 37,
    Muse2Board => "MUSE_2_BOARD" = 38,
    MuseSBoard => "MUSE_S_BOARD" = 39,
    BrainaliveBoard => "BRAINALIVE_BOARD" = 40,
    Muse2016Board => "MUSE_2016_BOARD" = 41,
    Muse2016BledBoard => "MUSE_2016_BLED_BOARD" = 42,
    Explore4ChanBoard => "EXPLORE_4_CHAN_BOARD" = 44,
    Explore8ChanBoard => "EXPLORE_8_CHAN_BOARD" = 45,
    GanglionNativeBoard => "GANGLION_NATIVE_BOARD" = 46,
    EmotibitBoard => "EMOTIBIT_BOARD" = 47,
    GaleaBoardV4 => "GALEA_BOARD_V4" = 48,
    GaleaSerialBoardV4 => "GALEA_SERIAL_BOARD_V4" = 49,
    NtlWifiBoard => "NTL_WIFI_BOARD" = 50,
    AntNeuroEe511Board => "ANT_NEURO_EE_511_BOARD" = 51,
    Freeeeg128Board => "FREEEEG128_BOARD" = 52,
    AavaaV3Board => "AAVAA_V3_BOARD" = 53,
    ExplorePlus8ChanBoard => "EXPLORE_PLUS_8_CHAN_BOARD" = 54,
    ExplorePlus32ChanBoard => "EXPLORE_PLUS_32_CHAN_BOARD" = 55,
    PieegBoard => "PIEEG_BOARD" = 56,
    NeuropawnKnightBoard => "NEUROPAWN_KNIGHT_BOARD" = 57,
    SynchroniTrio3ChannelsBoard => "SYNCHRONI_TRIO_3_CHANNELS_BOARD" = 58,
    SynchroniOcto8ChannelsBoard => "SYNCHRONI_OCTO_8_CHANNELS_BOARD" = 59,
    Ob5000_8ChannelsBoard => "OB5000_8_CHANNELS_BOARD" = 60,
    SynchroniPento8ChannelsBoard => "SYNCHRONI_PENTO_8_CHANNELS_BOARD" = 61,
    SynchroniUno1ChannelsBoard => "SYNCHRONI_UNO_1_CHANNELS_BOARD" = 62,
    Ob3000_24ChannelsBoard => "OB3000_24_CHANNELS_BOARD" = 63,
    BiolistenerBoard => "BIOLISTENER_BOARD" = 64,
    CerelogX8Board => "CERELOG_X8_BOARD" = 65,
}

impl BoardId {
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Synthetic, playback, streaming and the `NO_BOARD` sentinel.
    pub const fn is_virtual(self) -> bool {
        self.code() < 0
    }

    pub const fn is_hardware(self) -> bool {
        !self.is_virtual()
    }
}

impl fmt::Display for BoardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<BoardId> for i32 {
    fn from(board: BoardId) -> Self {
        board.code()
    }
}

impl TryFrom<i32> for BoardId {
    type Error = RegistryError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        registry::board_from_code(code)
    }
}

impl FromStr for BoardId {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        registry::board_from_name(s)
    }
}

/// Wire form accepted when deserializing: the integer code or the exact name.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum BoardRef {
    Code(i32),
    Name(String),
}

impl TryFrom<BoardRef> for BoardId {
    type Error = RegistryError;

    fn try_from(value: BoardRef) -> Result<Self, Self::Error> {
        match value {
            BoardRef::Code(code) => BoardId::try_from(code),
            BoardRef::Name(name) => name.parse(),
        }
    }
}

#[cfg(feature = "schema")]
impl schemars::JsonSchema for BoardId {
    fn schema_name() -> String {
        "BoardId".to_string()
    }

    fn json_schema(gen: &mut schemars::gen::SchemaGenerator) -> schemars::schema::Schema {
        <i32 as schemars::JsonSchema>::json_schema(gen)
    }
}
