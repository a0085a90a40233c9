// Decodes live overlay items against the external memory store: address
// registration, strategy decryption and per-kind value classification.

use crate::geometry::{Rect, Size};
use crate::live::address::{Address, BitInfo};
use crate::live::item::{DecryptionMethod, LiveOverlayItem, OverlayData};
use crate::live::memory::MemoryStore;

/// Byte length of the unencrypted structure header
const MON_HEADER_LEN: i64 = 32;
/// Byte length of each shuffled substruct
const SUBSTRUCT_LEN: i64 = 12;

/// Encounter-order substruct permutations, indexed by `personality % 24`.
/// Stored literally for bit-exact parity with the source format.
static SUBSTRUCT_ORDER: [[usize; 4]; 24] = [
    [0, 1, 2, 3],
    [0, 1, 3, 2],
    [0, 2, 1, 3],
    [0, 3, 1, 2],
    [0, 2, 3, 1],
    [0, 3, 2, 1],
    [1, 0, 2, 3],
    [1, 0, 3, 2],
    [2, 0, 1, 3],
    [3, 0, 1, 2],
    [2, 0, 3, 1],
    [3, 0, 2, 1],
    [1, 2, 0, 3],
    [1, 3, 0, 2],
    [2, 1, 0, 3],
    [3, 1, 0, 2],
    [2, 3, 0, 1],
    [3, 2, 0, 1],
    [1, 2, 3, 0],
    [1, 3, 2, 0],
    [2, 1, 3, 0],
    [3, 1, 2, 0],
    [2, 3, 1, 0],
    [3, 2, 1, 0],
];

/// Health classification for HP overlay kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HpTier {
    Full,
    Half,
    Quarter,
    /// Circular gauges report zero HP as a distinct degenerate case
    Empty,
}

/// Register every address an item needs with the memory store. Called once
/// when a representation becomes active.
pub fn register_item<M: MemoryStore>(item: &LiveOverlayItem, store: &mut M) {
    match &item.decryption {
        DecryptionMethod::None => {}
        DecryptionMethod::Xor {
            key_address,
            key_bits,
        } => {
            register(key_address, key_bits, store);
        }
        DecryptionMethod::GbaPokemonParty {
            personality_address,
            ot_id_address,
            ..
        } => {
            let word = BitInfo::new(32);
            register(personality_address, &word, store);
            register(ot_id_address, &word, store);
        }
    }

    match &item.data {
        OverlayData::Image { address, bits, .. } => {
            register(address, bits, store);
        }
        OverlayData::CircularHp {
            hp_address,
            hp_max_address,
            hp_bits,
            hp_max_bits,
            ..
        }
        | OverlayData::RectangularHp {
            hp_address,
            hp_max_address,
            hp_bits,
            hp_max_bits,
            ..
        } => {
            register(hp_address, hp_bits, store);
            register(hp_max_address, hp_max_bits, store);
        }
        OverlayData::Number { address, bits, .. }
        | OverlayData::IndexedText { address, bits, .. } => {
            register(address, bits, store);
        }
    }
}

fn register<M: MemoryStore>(address: &Address, bits: &BitInfo, store: &mut M) -> String {
    let key = address.store_key(bits);
    match address {
        Address::Absolute(value) => {
            store.register_address(&key, *value, bits.width, bits.offset);
        }
        Address::Pointer { base, offset } => {
            store.register_pointer(&key, *base, *offset, bits.width, bits.offset);
        }
    }
    key
}

/// Decode one `(address, bit-field)` value under the item's decryption
/// method. `None` marks an undecodable combination, never a crash.
pub fn decode_value<M: MemoryStore>(
    method: &DecryptionMethod,
    address: &Address,
    bits: &BitInfo,
    store: &mut M,
) -> Option<i64> {
    match method {
        DecryptionMethod::None => Some(store.read_value(&address.store_key(bits))),
        DecryptionMethod::Xor {
            key_address,
            key_bits,
        } => {
            let key = store.read_value(&key_address.store_key(key_bits));
            let value = store.read_value(&address.store_key(bits));
            Some(value ^ key)
        }
        DecryptionMethod::GbaPokemonParty {
            mon_address,
            personality_address,
            ot_id_address,
        } => decode_party_value(
            mon_address,
            personality_address,
            ot_id_address,
            address,
            bits,
            store,
        ),
    }
}

// The structure is a 32-byte header followed by four 12-byte substructs whose
// stored order is permuted by `personality % 24`. The nominal address is an
// offset from the structure base; the shuffled address is re-registered on
// every decode because personality changes at runtime.
fn decode_party_value<M: MemoryStore>(
    mon_address: &Address,
    personality_address: &Address,
    ot_id_address: &Address,
    address: &Address,
    bits: &BitInfo,
    store: &mut M,
) -> Option<i64> {
    let base = match mon_address {
        Address::Absolute(value) => *value,
        Address::Pointer { .. } => return None,
    };
    let offset = match address {
        Address::Absolute(value) => *value,
        Address::Pointer { .. } => return None,
    };
    // Header fields are not shuffled or encrypted; an offset inside the
    // header has no substruct to map to.
    if offset < MON_HEADER_LEN {
        return None;
    }

    let substruct = ((offset - MON_HEADER_LEN) / SUBSTRUCT_LEN) as usize;
    let local_offset = (offset - MON_HEADER_LEN) % SUBSTRUCT_LEN;
    if substruct >= 4 {
        return None;
    }

    let word = BitInfo::new(32);
    let personality = store.read_value(&personality_address.store_key(&word));
    let ot_id = store.read_value(&ot_id_address.store_key(&word));

    let order = SUBSTRUCT_ORDER[personality.rem_euclid(24) as usize];
    let real = base + MON_HEADER_LEN + SUBSTRUCT_LEN * order[substruct] as i64 + local_offset;

    let real_address = Address::Absolute(real);
    let key = register(&real_address, bits, store);
    let value = store.read_value(&key);

    let rotation = ((offset % 4) * 8) as u32 + bits.offset;
    let xor_key = ((ot_id ^ personality) >> rotation) & bits.mask();
    Some(value ^ xor_key)
}

/// A decoded, classified overlay value ready for the rendering collaborator
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedOverlay<'a> {
    /// Tile index into the item's source image grid
    Image { tile: i64 },
    CircularHp {
        hp: i64,
        hp_max: i64,
        tier: Option<HpTier>,
    },
    RectangularHp {
        hp: i64,
        hp_max: i64,
        tier: Option<HpTier>,
    },
    Number { value: i64 },
    IndexedText { index: i64, text: Option<&'a str> },
}

/// Decode and classify one overlay item. `None` means the item's addresses
/// were undecodable under its decryption method this frame.
pub fn decode_item<'a, M: MemoryStore>(
    item: &'a LiveOverlayItem,
    store: &mut M,
) -> Option<DecodedOverlay<'a>> {
    match &item.data {
        OverlayData::Image { address, bits, .. } => {
            let tile = decode_value(&item.decryption, address, bits, store)?;
            Some(DecodedOverlay::Image { tile })
        }
        OverlayData::CircularHp {
            hp_address,
            hp_max_address,
            hp_bits,
            hp_max_bits,
            ..
        } => {
            let hp = decode_value(&item.decryption, hp_address, hp_bits, store)?;
            let hp_max = decode_value(&item.decryption, hp_max_address, hp_max_bits, store)?;
            Some(DecodedOverlay::CircularHp {
                hp,
                hp_max,
                tier: classify_circular_hp(hp, hp_max),
            })
        }
        OverlayData::RectangularHp {
            hp_address,
            hp_max_address,
            hp_bits,
            hp_max_bits,
            ..
        } => {
            let hp = decode_value(&item.decryption, hp_address, hp_bits, store)?;
            let hp_max = decode_value(&item.decryption, hp_max_address, hp_max_bits, store)?;
            Some(DecodedOverlay::RectangularHp {
                hp,
                hp_max,
                tier: classify_rectangular_hp(hp, hp_max),
            })
        }
        OverlayData::Number { address, bits, .. } => {
            let value = decode_value(&item.decryption, address, bits, store)?;
            Some(DecodedOverlay::Number { value })
        }
        OverlayData::IndexedText {
            address,
            bits,
            strings,
            ..
        } => {
            let index = decode_value(&item.decryption, address, bits, store)?;
            Some(DecodedOverlay::IndexedText {
                index,
                text: indexed_text(strings, index),
            })
        }
    }
}

/// Circular gauge tiers: `Full` at ratio >= 0.75, `Half` at >= 0.5, `Empty`
/// at exactly zero. `hp_max == 0` produces no classification.
pub fn classify_circular_hp(hp: i64, hp_max: i64) -> Option<HpTier> {
    if hp_max == 0 {
        return None;
    }
    let ratio = hp as f64 / hp_max as f64;
    Some(if ratio == 0.0 {
        HpTier::Empty
    } else if ratio >= 0.75 {
        HpTier::Full
    } else if ratio >= 0.5 {
        HpTier::Half
    } else {
        HpTier::Quarter
    })
}

/// Rectangular bar tiers: `Full` above 0.5, `Quarter` at or below 0.25. The
/// thresholds intentionally differ from the circular gauge; the asymmetry is
/// part of the format.
pub fn classify_rectangular_hp(hp: i64, hp_max: i64) -> Option<HpTier> {
    if hp_max == 0 {
        return None;
    }
    let ratio = hp as f64 / hp_max as f64;
    Some(if ratio > 0.5 {
        HpTier::Full
    } else if ratio > 0.25 {
        HpTier::Half
    } else {
        HpTier::Quarter
    })
}

/// Look up a decoded index in the configured string list. Out of range yields
/// no text rather than an error.
pub fn indexed_text(strings: &[String], index: i64) -> Option<&str> {
    if index < 0 || index as usize >= strings.len() {
        return None;
    }
    Some(strings[index as usize].as_str())
}

/// Frame of tile `index` within a tile grid derived from the source image's
/// pixel size and the declared tile size. Out of range yields no tile.
pub fn tile_frame(image_size: Size, tile_size: Size, index: i64) -> Option<Rect> {
    if tile_size.is_empty() || image_size.is_empty() {
        return None;
    }
    let columns = (image_size.width / tile_size.width).floor() as i64;
    let rows = (image_size.height / tile_size.height).floor() as i64;
    if columns == 0 || index < 0 || index >= columns * rows {
        return None;
    }
    Some(Rect::new(
        (index % columns) as f64 * tile_size.width,
        (index / columns) as f64 * tile_size.height,
        tile_size.width,
        tile_size.height,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::live::memory::MemoryMap;

    fn absolute(value: i64) -> Address {
        Address::Absolute(value)
    }

    #[test]
    fn test_plain_decode_reads_registered_key() {
        let mut memory = MemoryMap::new();
        let bits = BitInfo::new(16);
        memory.set(absolute(0x100).store_key(&bits), 1234);

        let value = decode_value(&DecryptionMethod::None, &absolute(0x100), &bits, &mut memory);
        assert_eq!(value, Some(1234));
    }

    #[test]
    fn test_xor_decode() {
        let mut memory = MemoryMap::new();
        let bits = BitInfo::new(8);
        let key_bits = BitInfo::new(32);
        memory.set(absolute(0x100).store_key(&bits), 0b1010);
        memory.set(absolute(0x200).store_key(&key_bits), 0b0110);

        let method = DecryptionMethod::Xor {
            key_address: absolute(0x200),
            key_bits,
        };
        let value = decode_value(&method, &absolute(0x100), &bits, &mut memory);
        assert_eq!(value, Some(0b1100));
    }

    fn party_method(mon_base: i64) -> DecryptionMethod {
        DecryptionMethod::GbaPokemonParty {
            mon_address: absolute(mon_base),
            personality_address: absolute(0x9000),
            ot_id_address: absolute(0x9004),
        }
    }

    fn party_decode(
        personality: i64,
        ot_id: i64,
        nominal_offset: i64,
        bits: BitInfo,
        raw_value: i64,
    ) -> (Option<i64>, i64) {
        let mon_base = 0x2024284;
        let mut memory = MemoryMap::new();
        let word = BitInfo::new(32);
        memory.set(absolute(0x9000).store_key(&word), personality);
        memory.set(absolute(0x9004).store_key(&word), ot_id);

        let order = SUBSTRUCT_ORDER[(personality % 24) as usize];
        let substruct = ((nominal_offset - 32) / 12) as usize;
        let local = (nominal_offset - 32) % 12;
        let real = mon_base + 32 + 12 * order[substruct] as i64 + local;
        memory.set(absolute(real).store_key(&bits), raw_value);

        let value = decode_value(
            &party_method(mon_base),
            &absolute(nominal_offset),
            &bits,
            &mut memory,
        );
        (value, real)
    }

    #[test]
    fn test_party_identity_permutation() {
        // personality 0 keeps encounter order, offset 44 is substruct 1.
        let bits = BitInfo::new(16);
        let (value, real) = party_decode(0, 0, 44, bits, 0x1234);
        // key = (0 ^ 0) >> _ = 0, value passes through
        assert_eq!(value, Some(0x1234));
        assert_eq!(real, 0x2024284 + 32 + 12);
    }

    #[test]
    fn test_party_permutation_five() {
        // permutation 5 is [0, 3, 2, 1]: substruct 1 lives in slot 3.
        let bits = BitInfo::new(16);
        let personality = 5;
        let ot_id = 0;
        let (value, real) = party_decode(personality, ot_id, 44, bits, 0);
        assert_eq!(real, 0x2024284 + 32 + 12 * 3);
        // offset 44 % 4 == 0, so the key is the low 16 bits of otId ^ personality
        assert_eq!(value, Some((ot_id ^ personality) & 0xFFFF));
    }

    #[test]
    fn test_party_permutation_twenty_three() {
        // permutation 23 is [3, 2, 1, 0]: substruct 0 lives in slot 3.
        let bits = BitInfo::new(8);
        let (_, real) = party_decode(23, 0, 32, bits, 0);
        assert_eq!(real, 0x2024284 + 32 + 12 * 3);

        // substruct 3 lives in slot 0, local offset 4 survives.
        let (_, real) = party_decode(23, 0, 32 + 36 + 4, bits, 0);
        assert_eq!(real, 0x2024284 + 32 + 4);
    }

    #[test]
    fn test_party_rotating_key() {
        // offset 45: key rotates by (45 % 4) * 8 = 8 bits.
        let bits = BitInfo::new(8);
        let personality = 24; // permutation 0
        let ot_id = 0x00AB_CD00;
        let expected_key = ((ot_id ^ personality) >> 8) & 0xFF;
        let (value, _) = party_decode(personality, ot_id, 45, bits, 0);
        assert_eq!(value, Some(expected_key));
    }

    #[test]
    fn test_party_rejects_pointer_addresses() {
        let mut memory = MemoryMap::new();
        let bits = BitInfo::new(16);
        let pointer = Address::Pointer {
            base: 0x3000000,
            offset: 4,
        };
        assert_eq!(
            decode_value(&party_method(0x2024284), &pointer, &bits, &mut memory),
            None
        );

        let method = DecryptionMethod::GbaPokemonParty {
            mon_address: pointer,
            personality_address: absolute(0x9000),
            ot_id_address: absolute(0x9004),
        };
        assert_eq!(
            decode_value(&method, &absolute(44), &bits, &mut memory),
            None
        );
    }

    #[test]
    fn test_party_rejects_header_and_out_of_range_offsets() {
        let mut memory = MemoryMap::new();
        let bits = BitInfo::new(16);
        let method = party_method(0x2024284);
        assert_eq!(decode_value(&method, &absolute(8), &bits, &mut memory), None);
        assert_eq!(
            decode_value(&method, &absolute(32 + 48), &bits, &mut memory),
            None
        );
    }

    #[test]
    fn test_substruct_order_is_canonical() {
        // 24 distinct permutations of {0,1,2,3}
        use std::collections::HashSet;
        let distinct: HashSet<[usize; 4]> = SUBSTRUCT_ORDER.iter().copied().collect();
        assert_eq!(distinct.len(), 24);
        for order in SUBSTRUCT_ORDER.iter() {
            let mut sorted = *order;
            sorted.sort_unstable();
            assert_eq!(sorted, [0, 1, 2, 3]);
        }
        assert_eq!(SUBSTRUCT_ORDER[5], [0, 3, 2, 1]);
        assert_eq!(SUBSTRUCT_ORDER[23], [3, 2, 1, 0]);
    }

    #[test]
    fn test_circular_hp_tiers() {
        assert_eq!(classify_circular_hp(80, 100), Some(HpTier::Full));
        assert_eq!(classify_circular_hp(60, 100), Some(HpTier::Half));
        assert_eq!(classify_circular_hp(30, 100), Some(HpTier::Quarter));
        assert_eq!(classify_circular_hp(0, 100), Some(HpTier::Empty));
        assert_eq!(classify_circular_hp(75, 100), Some(HpTier::Full));
        assert_eq!(classify_circular_hp(50, 100), Some(HpTier::Half));
    }

    #[test]
    fn test_rectangular_hp_tiers() {
        assert_eq!(classify_rectangular_hp(90, 100), Some(HpTier::Full));
        assert_eq!(classify_rectangular_hp(40, 100), Some(HpTier::Half));
        assert_eq!(classify_rectangular_hp(10, 100), Some(HpTier::Quarter));
        // boundaries: > 0.5 and <= 0.25
        assert_eq!(classify_rectangular_hp(50, 100), Some(HpTier::Half));
        assert_eq!(classify_rectangular_hp(25, 100), Some(HpTier::Quarter));
    }

    #[test]
    fn test_zero_hp_max_yields_no_classification() {
        for hp in [0, 1, 100] {
            assert_eq!(classify_circular_hp(hp, 0), None);
            assert_eq!(classify_rectangular_hp(hp, 0), None);
        }
    }

    #[test]
    fn test_indexed_text_bounds() {
        let strings: Vec<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
        assert_eq!(indexed_text(&strings, 2), Some("c"));
        assert_eq!(indexed_text(&strings, 3), None);
        assert_eq!(indexed_text(&strings, -1), None);
    }

    #[test]
    fn test_tile_frame_grid() {
        let image = Size::new(64.0, 32.0);
        let tile = Size::new(16.0, 16.0);
        assert_eq!(tile_frame(image, tile, 0), Some(Rect::new(0.0, 0.0, 16.0, 16.0)));
        assert_eq!(tile_frame(image, tile, 5), Some(Rect::new(16.0, 16.0, 16.0, 16.0)));
        assert_eq!(tile_frame(image, tile, 8), None);
        assert_eq!(tile_frame(image, tile, -1), None);
        assert_eq!(tile_frame(image, Size::zero(), 0), None);
    }
}
