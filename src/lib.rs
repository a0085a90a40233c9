// skincore
// Logic core of the controller-skin package format: resolves display traits
// to layout/asset variants and decodes emulator memory into live overlay
// values. Rendering, touch dispatch and archive extraction are external
// collaborators.

pub mod assets;
pub mod error;
pub mod geometry;
pub mod live;
pub mod representation;
pub mod resolver;
pub mod skin;
pub mod store;
pub mod traits;

pub use assets::{AssetSize, SizeClass};
pub use error::SkinError;
pub use geometry::{Color, Rect, Size};
pub use live::{
    Address, BitInfo, DecodedOverlay, DecryptionMethod, HpTier, LiveOverlayItem, MemoryMap,
    MemoryStore, OverlayData, OverlayKind,
};
pub use representation::{Item, Placement, Representation, Screen};
pub use resolver::{ResolvedAsset, TraitResolver};
pub use skin::ControllerSkin;
pub use store::RepresentationStore;
pub use traits::{Device, DisplayType, Orientation, Traits};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
