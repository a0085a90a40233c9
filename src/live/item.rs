// Declarative live overlay items: one rule each mapping emulator memory to a
// displayable value. Parsed from the `liveSkin` array of a representation.

use serde_json::Value;

use crate::geometry::{Color, Rect, Size};
use crate::live::address::{Address, BitInfo};
use crate::representation::Placement;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayKind {
    Image,
    CircularHp,
    RectangularHp,
    Number,
    IndexedText,
}

impl OverlayKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "image" => Some(OverlayKind::Image),
            "circularHP" => Some(OverlayKind::CircularHp),
            "rectangularHP" => Some(OverlayKind::RectangularHp),
            "number" => Some(OverlayKind::Number),
            "indexedText" => Some(OverlayKind::IndexedText),
            _ => None,
        }
    }
}

/// Text styling forwarded to the rendering collaborator
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub name: Option<String>,
    pub size: f64,
}

/// Tier colors for HP overlays
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HpColors {
    pub full: Color,
    pub half: Color,
    pub quarter: Color,
}

impl HpColors {
    fn parse(colors: &Value) -> Option<Self> {
        let map = colors.as_object()?;
        // All three tier keys must be authored; unparseable values fall back
        // to the stock green/yellow/red.
        let tier = |name: &str, fallback: Color| -> Option<Color> {
            let text = map.get(name)?.as_str()?;
            Some(Color::from_hex_str(text).unwrap_or(fallback))
        };
        Some(Self {
            full: tier("full", Color::from_rgb(0, 255, 0))?,
            half: tier("half", Color::from_rgb(255, 255, 0))?,
            quarter: tier("quarter", Color::from_rgb(255, 0, 0))?,
        })
    }
}

/// Kind-specific payload: addresses, bit-fields and rendering parameters
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayData {
    Image {
        address: Address,
        bits: BitInfo,
        filename: String,
        tile_size: Size,
    },
    CircularHp {
        hp_address: Address,
        hp_max_address: Address,
        hp_bits: BitInfo,
        hp_max_bits: BitInfo,
        colors: HpColors,
    },
    RectangularHp {
        hp_address: Address,
        hp_max_address: Address,
        hp_bits: BitInfo,
        hp_max_bits: BitInfo,
        colors: HpColors,
    },
    Number {
        address: Address,
        bits: BitInfo,
        font: FontSpec,
        color: Color,
    },
    IndexedText {
        address: Address,
        bits: BitInfo,
        font: FontSpec,
        color: Color,
        strings: Vec<String>,
    },
}

/// How raw store reads are decoded before classification. Fixed at
/// configuration time; items describing fields of the same in-memory
/// structure share one method definition.
#[derive(Debug, Clone, PartialEq)]
pub enum DecryptionMethod {
    None,
    Xor {
        key_address: Address,
        key_bits: BitInfo,
    },
    GbaPokemonParty {
        mon_address: Address,
        personality_address: Address,
        ot_id_address: Address,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct LiveOverlayItem {
    pub id: String,
    pub kind: OverlayKind,
    pub frame: Rect,
    pub data: OverlayData,
    pub decryption: DecryptionMethod,
    pub placement: Placement,
}

impl LiveOverlayItem {
    pub(crate) fn parse(id: String, value: &Value, mapping_size: Size) -> Option<Self> {
        let kind = OverlayKind::from_name(value.get("kind")?.as_str()?)?;
        let frame = Rect::from_value(value.get("frame")?)?;
        let data_node = value.get("data")?;

        let decryption = match value.get("decryptionMethod") {
            Some(node) => Self::parse_decryption(node)?,
            None => DecryptionMethod::None,
        };

        let data = Self::parse_data(kind, data_node)?;

        let placement = value
            .get("placement")
            .and_then(Value::as_str)
            .and_then(Placement::from_name)
            .unwrap_or_default();

        let frame = match placement {
            Placement::Controller => {
                frame.scaled(1.0 / mapping_size.width, 1.0 / mapping_size.height)
            }
            Placement::App => frame,
        };

        Some(Self {
            id,
            kind,
            frame,
            data,
            decryption,
            placement,
        })
    }

    fn parse_decryption(node: &Value) -> Option<DecryptionMethod> {
        let method = match node.get("method").and_then(Value::as_str) {
            Some(method) => method,
            None => return Some(DecryptionMethod::None),
        };

        match method {
            "xor" => {
                let key_address = Address::parse(node.get("keyAddress")?.as_str()?)?;
                let width = node.get("keyBitWidth")?.as_u64()? as u32;
                let offset = node
                    .get("keyBitOffset")
                    .and_then(Value::as_u64)
                    .unwrap_or(0) as u32;
                Some(DecryptionMethod::Xor {
                    key_address,
                    key_bits: BitInfo::with_offset(width, offset),
                })
            }
            "gbaPokemonParty" => {
                let mon_address = Address::parse(node.get("monAddress")?.as_str()?)?;
                let personality_address =
                    Address::parse(node.get("personalityAddress")?.as_str()?)?;
                let ot_id_address = Address::parse(node.get("otIdAddress")?.as_str()?)?;
                Some(DecryptionMethod::GbaPokemonParty {
                    mon_address,
                    personality_address,
                    ot_id_address,
                })
            }
            _ => Some(DecryptionMethod::None),
        }
    }

    fn parse_data(kind: OverlayKind, data: &Value) -> Option<OverlayData> {
        let address_at = |name: &str| -> Option<Address> {
            Address::parse(data.get(name)?.as_str()?)
        };
        let bit_width = || -> Option<u32> { Some(data.get("bitWidth")?.as_u64()? as u32) };
        let bit_offset = |name: &str| -> u32 {
            data.get(name).and_then(Value::as_u64).unwrap_or(0) as u32
        };

        match kind {
            OverlayKind::Image => {
                let address = address_at("address")?;
                let bits = BitInfo::with_offset(bit_width()?, bit_offset("bitOffset"));
                let filename = data.get("filename")?.as_str()?.to_string();
                let tile_size = Size::from_value(data.get("size")?)?;
                Some(OverlayData::Image {
                    address,
                    bits,
                    filename,
                    tile_size,
                })
            }
            OverlayKind::CircularHp | OverlayKind::RectangularHp => {
                let hp_address = address_at("hpAddress")?;
                let hp_max_address = address_at("hpMaxAddress")?;
                let width = bit_width()?;
                let hp_bits = BitInfo::with_offset(width, bit_offset("hpBitOffset"));
                let hp_max_bits = BitInfo::with_offset(width, bit_offset("hpMaxBitOffset"));
                let colors = HpColors::parse(data.get("colors")?)?;
                match kind {
                    OverlayKind::CircularHp => Some(OverlayData::CircularHp {
                        hp_address,
                        hp_max_address,
                        hp_bits,
                        hp_max_bits,
                        colors,
                    }),
                    _ => Some(OverlayData::RectangularHp {
                        hp_address,
                        hp_max_address,
                        hp_bits,
                        hp_max_bits,
                        colors,
                    }),
                }
            }
            OverlayKind::Number => {
                let address = address_at("address")?;
                let bits = BitInfo::with_offset(bit_width()?, bit_offset("bitOffset"));
                let size = data.get("fontSize")?.as_f64()?;
                let name = data
                    .get("fontName")
                    .and_then(Value::as_str)
                    .map(String::from);
                let color = Color::from_hex_str(data.get("color")?.as_str()?)?;
                Some(OverlayData::Number {
                    address,
                    bits,
                    font: FontSpec { name, size },
                    color,
                })
            }
            OverlayKind::IndexedText => {
                let address = address_at("address")?;
                let bits = BitInfo::with_offset(bit_width()?, bit_offset("bitOffset"));
                let name = data.get("fontName")?.as_str()?.to_string();
                let size = data.get("fontSize")?.as_f64()?;
                let color = Color::from_hex_str(data.get("color")?.as_str()?)?;
                let strings = data
                    .get("text")?
                    .as_array()?
                    .iter()
                    .map(|s| s.as_str().map(String::from))
                    .collect::<Option<Vec<_>>>()?;
                Some(OverlayData::IndexedText {
                    address,
                    bits,
                    font: FontSpec {
                        name: Some(name),
                        size,
                    },
                    color,
                    strings,
                })
            }
        }
    }
}
