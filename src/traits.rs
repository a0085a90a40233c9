// Display trait tuple: the key into every per-configuration mapping.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Device class of the host display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Device {
    #[serde(rename = "iphone")]
    Phone,
    #[serde(rename = "ipad")]
    Tablet,
    #[serde(rename = "tv")]
    Tv,
}

impl Device {
    pub const ALL: [Device; 3] = [Device::Phone, Device::Tablet, Device::Tv];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "iphone" => Some(Device::Phone),
            "ipad" => Some(Device::Tablet),
            "tv" => Some(Device::Tv),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Device::Phone => "iphone",
            Device::Tablet => "ipad",
            Device::Tv => "tv",
        }
    }
}

/// Display mode within the device class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DisplayType {
    #[serde(rename = "standard")]
    Standard,
    #[serde(rename = "edgeToEdge")]
    EdgeToEdge,
    #[serde(rename = "splitView")]
    SplitView,
}

impl DisplayType {
    pub const ALL: [DisplayType; 3] = [
        DisplayType::Standard,
        DisplayType::EdgeToEdge,
        DisplayType::SplitView,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "standard" => Some(DisplayType::Standard),
            "edgeToEdge" => Some(DisplayType::EdgeToEdge),
            "splitView" => Some(DisplayType::SplitView),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DisplayType::Standard => "standard",
            DisplayType::EdgeToEdge => "edgeToEdge",
            DisplayType::SplitView => "splitView",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    #[serde(rename = "portrait")]
    Portrait,
    #[serde(rename = "landscape")]
    Landscape,
}

impl Orientation {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "portrait" => Some(Orientation::Portrait),
            "landscape" => Some(Orientation::Landscape),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Orientation::Portrait => "portrait",
            Orientation::Landscape => "landscape",
        }
    }
}

/// One layout variant key: `(device, display type, orientation)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Traits {
    pub device: Device,
    pub display_type: DisplayType,
    pub orientation: Orientation,
}

impl Traits {
    pub fn new(device: Device, display_type: DisplayType, orientation: Orientation) -> Self {
        Self {
            device,
            display_type,
            orientation,
        }
    }

    /// TV skins support exactly one trait tuple
    pub fn tv() -> Self {
        Self::new(Device::Tv, DisplayType::Standard, Orientation::Landscape)
    }
}

impl fmt::Display for Traits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{}",
            self.device.name(),
            self.display_type.name(),
            self.orientation.name()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_name_round_trip() {
        for device in Device::ALL {
            assert_eq!(Device::from_name(device.name()), Some(device));
        }
        assert_eq!(Device::from_name("watch"), None);
    }

    #[test]
    fn test_display_type_name_round_trip() {
        for display_type in DisplayType::ALL {
            assert_eq!(DisplayType::from_name(display_type.name()), Some(display_type));
        }
    }

    #[test]
    fn test_traits_display() {
        let traits = Traits::new(Device::Phone, DisplayType::EdgeToEdge, Orientation::Portrait);
        assert_eq!(traits.to_string(), "iphone-edgeToEdge-portrait");
        assert_eq!(Traits::tv().to_string(), "tv-standard-landscape");
    }

    #[test]
    fn test_traits_equality_is_structural() {
        let a = Traits::new(Device::Tablet, DisplayType::Standard, Orientation::Landscape);
        let b = Traits::new(Device::Tablet, DisplayType::Standard, Orientation::Landscape);
        assert_eq!(a, b);
        assert_ne!(a, Traits::tv());
    }
}
