// Asset size classes and the static geometry/scale tables keyed by traits.

use std::hash::{Hash, Hasher};

use crate::geometry::Size;
use crate::traits::{Device, DisplayType, Orientation, Traits};

/// Logical size hint supplied by callers when requesting an asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeClass {
    Small,
    Medium,
    Large,
    Preview,
}

impl SizeClass {
    /// Ordered asset-size fallback chain for this class. The first entry
    /// present in a representation's asset map wins.
    pub fn fallback_chain(&self) -> Vec<AssetSize> {
        match self {
            SizeClass::Small => vec![
                AssetSize::Small,
                AssetSize::resizable(AssetSize::Small),
                AssetSize::Medium,
                AssetSize::Large,
            ],
            SizeClass::Medium => vec![
                AssetSize::Medium,
                AssetSize::resizable(AssetSize::Medium),
                AssetSize::Large,
                AssetSize::Small,
            ],
            SizeClass::Large => vec![
                AssetSize::Large,
                AssetSize::resizable(AssetSize::Large),
                AssetSize::Medium,
                AssetSize::Small,
            ],
            SizeClass::Preview => vec![
                AssetSize::Preview,
                AssetSize::resizable(AssetSize::Large),
                AssetSize::Large,
                AssetSize::Medium,
                AssetSize::Small,
            ],
        }
    }
}

/// Authored asset key. `Resizable` optionally wraps the size class the
/// caller wants the resizable art rendered at.
#[derive(Debug, Clone)]
pub enum AssetSize {
    Small,
    Medium,
    Large,
    Preview,
    Resizable(Option<Box<AssetSize>>),
}

// Authored maps only ever contain `Resizable(None)`, while fallback chains
// look up `Resizable(Some(_))`. Keys therefore compare by name alone, so any
// resizable lookup hits the single authored resizable entry.
impl PartialEq for AssetSize {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name()
    }
}

impl Eq for AssetSize {}

impl Hash for AssetSize {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name().hash(state);
    }
}

impl AssetSize {
    pub fn resizable(base: AssetSize) -> Self {
        AssetSize::Resizable(Some(Box::new(base)))
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "small" => Some(AssetSize::Small),
            "medium" => Some(AssetSize::Medium),
            "large" => Some(AssetSize::Large),
            "preview" => Some(AssetSize::Preview),
            "resizable" => Some(AssetSize::Resizable(None)),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AssetSize::Small => "small",
            AssetSize::Medium => "medium",
            AssetSize::Large => "large",
            AssetSize::Preview => "preview",
            AssetSize::Resizable(_) => "resizable",
        }
    }

    /// The concrete size this key resolves to: a resizable key yields its
    /// wrapped base (or nothing), every other key yields itself.
    pub fn unwrapped(&self) -> Option<&AssetSize> {
        match self {
            AssetSize::Resizable(Some(base)) => Some(base),
            AssetSize::Resizable(None) => None,
            other => Some(other),
        }
    }

    /// Fixed target pixel size for this asset under the given traits.
    /// SplitView phone, preview and unresolved resizable keys have no fixed
    /// target; callers derive geometry from the decoded content instead.
    pub fn target_size(&self, traits: &Traits) -> Option<Size> {
        let asset = self.unwrapped()?;

        let mut target = match (traits.device, traits.display_type, asset) {
            (Device::Phone, DisplayType::Standard, AssetSize::Small) => Size::new(320.0, 568.0),
            (Device::Phone, DisplayType::Standard, AssetSize::Medium) => Size::new(375.0, 667.0),
            (Device::Phone, DisplayType::Standard, AssetSize::Large) => Size::new(414.0, 736.0),

            (Device::Phone, DisplayType::EdgeToEdge, _) => Size::new(375.0, 812.0),
            (Device::Phone, DisplayType::SplitView, _) => return None,

            (Device::Tablet, _, AssetSize::Small) => Size::new(768.0, 1024.0),
            (Device::Tablet, _, AssetSize::Medium) => Size::new(834.0, 1112.0),
            (Device::Tablet, _, AssetSize::Large) => Size::new(1024.0, 1366.0),

            (Device::Tv, _, _) => Size::new(1080.0, 1920.0),

            _ => return None,
        };

        if traits.orientation == Orientation::Landscape {
            target = target.transposed();
        }

        Some(target)
    }

    /// Fixed art scale factor for this asset under the given traits
    pub fn image_scale(&self, traits: &Traits) -> Option<f64> {
        let asset = self.unwrapped()?;

        let scale = match (traits.device, traits.display_type, asset) {
            (Device::Phone, DisplayType::Standard, AssetSize::Small) => 2.0,
            (Device::Phone, DisplayType::Standard, AssetSize::Medium) => 2.0,
            (Device::Phone, DisplayType::Standard, AssetSize::Large) => 3.0,

            (Device::Phone, DisplayType::EdgeToEdge, _) => 3.0,
            (Device::Phone, DisplayType::SplitView, _) => return None,

            (Device::Tablet, _, _) => 2.0,

            (Device::Tv, _, AssetSize::Small) => 1.0,
            (Device::Tv, _, AssetSize::Medium) => 2.0,
            (Device::Tv, _, AssetSize::Large) => 2.0,

            (_, _, AssetSize::Resizable(_)) => return None,

            // Previews without a more specific entry above
            _ => 2.0,
        };

        Some(scale)
    }
}
