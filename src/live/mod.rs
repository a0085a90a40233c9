// Live overlay engine: declarative memory addresses, decryption strategies
// and per-kind value classification.

pub mod address;
pub mod decoder;
pub mod item;
pub mod memory;

pub use address::{Address, BitInfo};
pub use decoder::{DecodedOverlay, HpTier};
pub use item::{DecryptionMethod, LiveOverlayItem, OverlayData, OverlayKind};
pub use memory::{MemoryMap, MemoryStore};
