// Fully resolved layout bundles: items, screens, assets and geometry for one
// trait tuple. Parsing normalizes every frame into [0,1] x [0,1] relative to
// the representation's mapping size, except `App`-placed geometry which is
// authored relative already.

use std::collections::HashMap;

use serde_json::Value;

use crate::assets::AssetSize;
use crate::geometry::{Rect, Size};
use crate::live::item::LiveOverlayItem;
use crate::traits::{Device, Traits};

/// Container an item or screen is positioned against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Placement {
    /// Relative to the controller skin's own frame (authored in mapping units)
    #[default]
    Controller,
    /// Relative to the hosting app's frame (authored relative already)
    App,
}

impl Placement {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "controller" => Some(Placement::Controller),
            "app" => Some(Placement::App),
            _ => None,
        }
    }

    fn parse(value: &Value) -> Option<Self> {
        value
            .get("placement")
            .and_then(Value::as_str)
            .and_then(Placement::from_name)
    }
}

/// Optional per-edge hit-test padding, in mapping units
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ExtendedEdges {
    pub top: Option<f64>,
    pub bottom: Option<f64>,
    pub left: Option<f64>,
    pub right: Option<f64>,
}

impl ExtendedEdges {
    pub fn from_value(value: Option<&Value>) -> Self {
        let edge = |name: &str| value.and_then(|v| v.get(name)).and_then(Value::as_f64);
        Self {
            top: edge("top"),
            bottom: edge("bottom"),
            left: edge("left"),
            right: edge("right"),
        }
    }

    /// Per-item overrides replace the representation-wide defaults edge by edge
    pub fn overridden_by(&self, overrides: &ExtendedEdges) -> Self {
        Self {
            top: overrides.top.or(self.top),
            bottom: overrides.bottom.or(self.bottom),
            left: overrides.left.or(self.left),
            right: overrides.right.or(self.right),
        }
    }

    /// Expand `frame` outward by these edges
    pub fn expand(&self, frame: &Rect) -> Rect {
        let left = self.left.unwrap_or(0.0);
        let top = self.top.unwrap_or(0.0);
        Rect::new(
            frame.x - left,
            frame.y - top,
            frame.width + left + self.right.unwrap_or(0.0),
            frame.height + top + self.bottom.unwrap_or(0.0),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Button,
    DPad,
    Thumbstick,
    TouchScreen,
}

/// Input bindings carried by a layout item
#[derive(Debug, Clone, PartialEq)]
pub enum ItemInputs {
    Standard(Vec<String>),
    Directional {
        up: String,
        down: String,
        left: String,
        right: String,
    },
    Touch {
        x: String,
        y: String,
    },
}

impl ItemInputs {
    pub fn all_inputs(&self) -> Vec<&str> {
        match self {
            ItemInputs::Standard(inputs) => inputs.iter().map(String::as_str).collect(),
            ItemInputs::Directional {
                up,
                down,
                left,
                right,
            } => vec![up, down, left, right],
            ItemInputs::Touch { x, y } => vec![x, y],
        }
    }
}

/// Movable thumbstick art declared on a thumbstick item
#[derive(Debug, Clone, PartialEq)]
pub struct ThumbstickArt {
    pub image_name: String,
    /// Relative to the mapping size
    pub size: Size,
}

/// One interactive region of a representation
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: String,
    pub kind: ItemKind,
    pub inputs: ItemInputs,
    pub frame: Rect,
    pub extended_frame: Rect,
    pub placement: Placement,
    pub thumbstick: Option<ThumbstickArt>,
}

impl Item {
    fn parse(
        id: String,
        value: &Value,
        default_edges: &ExtendedEdges,
        mapping_size: Size,
    ) -> Option<Self> {
        let frame = Rect::from_value(value.get("frame")?)?;

        let (kind, inputs, thumbstick) = match value.get("inputs")? {
            Value::Array(names) => {
                let inputs = names
                    .iter()
                    .map(|name| name.as_str().map(String::from))
                    .collect::<Option<Vec<_>>>()?;
                (ItemKind::Button, ItemInputs::Standard(inputs), None)
            }
            Value::Object(map) => {
                let field = |name: &str| map.get(name).and_then(Value::as_str).map(String::from);
                if let (Some(up), Some(down), Some(left), Some(right)) = (
                    field("up"),
                    field("down"),
                    field("left"),
                    field("right"),
                ) {
                    let inputs = ItemInputs::Directional {
                        up,
                        down,
                        left,
                        right,
                    };
                    match Self::parse_thumbstick(value, mapping_size) {
                        Some(art) => (ItemKind::Thumbstick, inputs, Some(art)),
                        None => (ItemKind::DPad, inputs, None),
                    }
                } else if let (Some(x), Some(y)) = (field("x"), field("y")) {
                    (ItemKind::TouchScreen, ItemInputs::Touch { x, y }, None)
                } else {
                    return None;
                }
            }
            _ => return None,
        };

        let edges =
            default_edges.overridden_by(&ExtendedEdges::from_value(value.get("extendedEdges")));
        let extended_frame = edges.expand(&frame);

        // Missing placement means `controller` for backwards compatibility.
        let placement = Placement::parse(value).unwrap_or_default();

        let (frame, extended_frame) = match placement {
            Placement::Controller => {
                let sx = 1.0 / mapping_size.width;
                let sy = 1.0 / mapping_size.height;
                (frame.scaled(sx, sy), extended_frame.scaled(sx, sy))
            }
            Placement::App => (frame, extended_frame),
        };

        Some(Self {
            id,
            kind,
            inputs,
            frame,
            extended_frame,
            placement,
            thumbstick,
        })
    }

    fn parse_thumbstick(value: &Value, mapping_size: Size) -> Option<ThumbstickArt> {
        let thumbstick = value.get("thumbstick")?;
        let image_name = thumbstick.get("name")?.as_str()?.to_string();
        let width = thumbstick.get("width")?.as_f64()?;
        let height = thumbstick.get("height")?.as_f64()?;
        Some(ThumbstickArt {
            image_name,
            size: Size::new(width / mapping_size.width, height / mapping_size.height),
        })
    }
}

/// An emulated display surface within the layout
#[derive(Debug, Clone, PartialEq)]
pub struct Screen {
    pub id: String,
    pub input_frame: Option<Rect>,
    pub output_frame: Option<Rect>,
    pub placement: Placement,
    pub is_touch_screen: bool,
}

/// One fully resolved configuration for one trait tuple. Immutable once built.
#[derive(Debug, Clone)]
pub struct Representation {
    pub traits: Traits,
    pub assets: HashMap<AssetSize, String>,
    pub is_translucent: bool,
    pub screens: Option<Vec<Screen>>,
    /// The coordinate space all relative geometry was normalized against
    pub aspect_ratio: Size,
    pub items: Vec<Item>,
    pub live_overlay_items: Vec<LiveOverlayItem>,
}

impl Representation {
    /// Parse one leaf node of the configuration tree. Returns `None` when a
    /// required field is missing; the store skips that trait tuple.
    pub(crate) fn parse(skin_id: &str, traits: Traits, value: &Value) -> Option<Self> {
        let mapping_size = match value.get("mappingSize").and_then(Size::from_value) {
            Some(size) if !size.is_empty() => size,
            // TV skins may omit their mapping size; everything else must
            // declare one.
            _ if traits.device == Device::Tv => Size::new(1920.0, 1080.0),
            _ => return None,
        };

        let default_edges = ExtendedEdges::from_value(value.get("extendedEdges"));

        let mut items = Vec::new();
        if let Some(array) = value.get("items").and_then(Value::as_array) {
            for (index, node) in array.iter().enumerate() {
                let id = item_id(skin_id, &traits, index);
                if let Some(item) = Item::parse(id, node, &default_edges, mapping_size) {
                    items.push(item);
                }
            }
        }

        let mut live_overlay_items = Vec::new();
        if let Some(array) = value.get("liveSkin").and_then(Value::as_array) {
            for (index, node) in array.iter().enumerate() {
                let id = item_id(skin_id, &traits, index + items.len());
                if let Some(item) = LiveOverlayItem::parse(id, node, mapping_size) {
                    live_overlay_items.push(item);
                }
            }
        }

        let mut assets = HashMap::new();
        if let Some(map) = value.get("assets").and_then(Value::as_object) {
            for (key, filename) in map {
                if let (Some(size), Some(name)) = (AssetSize::from_name(key), filename.as_str()) {
                    assets.insert(size, name.to_string());
                }
            }
        }

        let is_translucent = value
            .get("translucent")
            .and_then(Value::as_bool)
            .unwrap_or(false);

        let screens = Self::parse_screens(skin_id, &traits, value, mapping_size, &items);

        Some(Self {
            traits,
            assets,
            is_translucent,
            screens,
            aspect_ratio: mapping_size,
            items,
            live_overlay_items,
        })
    }

    fn parse_screens(
        skin_id: &str,
        traits: &Traits,
        value: &Value,
        mapping_size: Size,
        items: &[Item],
    ) -> Option<Vec<Screen>> {
        let sx = 1.0 / mapping_size.width;
        let sy = 1.0 / mapping_size.height;

        // Legacy form: a single `gameScreenFrame` in mapping units.
        if let Some(frame) = value.get("gameScreenFrame").and_then(Rect::from_value) {
            return Some(vec![Screen {
                id: item_id(skin_id, traits, 0),
                input_frame: None,
                output_frame: Some(frame.scaled(sx, sy)),
                placement: Placement::Controller,
                is_touch_screen: false,
            }]);
        }

        let array = value.get("screens").and_then(Value::as_array)?;

        let screens = array
            .iter()
            .enumerate()
            .map(|(index, node)| {
                let input_frame = node.get("inputFrame").and_then(Rect::from_value);
                let mut output_frame = node.get("outputFrame").and_then(Rect::from_value);

                // Screens without an output frame fill the app frame, so they
                // default to `app` placement; older skins with output frames
                // assumed `controller`.
                let placement = Placement::parse(node).unwrap_or(if output_frame.is_none() {
                    Placement::App
                } else {
                    Placement::Controller
                });

                if placement == Placement::Controller {
                    output_frame = output_frame.map(|frame| frame.scaled(sx, sy));
                }

                let is_touch_screen = output_frame
                    .map(|frame| {
                        items.iter().any(|item| {
                            item.kind == ItemKind::TouchScreen
                                && item.extended_frame.contains(&frame)
                        })
                    })
                    .unwrap_or(false);

                Screen {
                    id: item_id(skin_id, traits, index),
                    input_frame,
                    output_frame,
                    placement,
                    is_touch_screen,
                }
            })
            .collect();

        Some(screens)
    }
}

fn item_id(skin_id: &str, traits: &Traits, index: usize) -> String {
    format!("{}_{}_{}", skin_id, traits, index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{DisplayType, Orientation};
    use serde_json::json;

    fn phone_traits() -> Traits {
        Traits::new(Device::Phone, DisplayType::Standard, Orientation::Portrait)
    }

    fn leaf() -> Value {
        json!({
            "mappingSize": {"width": 400.0, "height": 800.0},
            "extendedEdges": {"top": 10.0, "bottom": 10.0, "left": 10.0, "right": 10.0},
            "assets": {"medium": "skin-medium.png", "resizable": "skin.pdf", "huge": "bogus.png"},
            "items": [
                {
                    "inputs": ["a"],
                    "frame": {"x": 100.0, "y": 200.0, "width": 100.0, "height": 100.0}
                },
                {
                    "inputs": {"up": "up", "down": "down", "left": "left", "right": "right"},
                    "frame": {"x": 0.0, "y": 0.0, "width": 200.0, "height": 200.0},
                    "extendedEdges": {"top": 0.0, "bottom": 0.0, "left": 0.0, "right": 0.0}
                }
            ],
            "gameScreenFrame": {"x": 0.0, "y": 0.0, "width": 400.0, "height": 300.0}
        })
    }

    #[test]
    fn test_frames_normalized_against_mapping_size() {
        let rep = Representation::parse("skin", phone_traits(), &leaf()).unwrap();
        let button = &rep.items[0];
        assert_eq!(button.frame, Rect::new(0.25, 0.25, 0.25, 0.125));
        // Default edges expand by 10 mapping units on every side.
        assert_eq!(button.extended_frame, Rect::new(0.225, 0.2375, 0.3, 0.15));
    }

    #[test]
    fn test_item_extended_edges_override() {
        let rep = Representation::parse("skin", phone_traits(), &leaf()).unwrap();
        let dpad = &rep.items[1];
        assert_eq!(dpad.kind, ItemKind::DPad);
        assert_eq!(dpad.frame, dpad.extended_frame);
    }

    #[test]
    fn test_unrecognized_asset_keys_dropped() {
        let rep = Representation::parse("skin", phone_traits(), &leaf()).unwrap();
        assert_eq!(rep.assets.len(), 2);
        assert_eq!(
            rep.assets.get(&AssetSize::Medium),
            Some(&"skin-medium.png".to_string())
        );
    }

    #[test]
    fn test_game_screen_frame_becomes_single_screen() {
        let rep = Representation::parse("skin", phone_traits(), &leaf()).unwrap();
        let screens = rep.screens.as_ref().unwrap();
        assert_eq!(screens.len(), 1);
        assert_eq!(screens[0].output_frame, Some(Rect::new(0.0, 0.0, 1.0, 0.375)));
    }

    #[test]
    fn test_missing_mapping_size_rejected_except_tv() {
        let value = json!({"items": []});
        assert!(Representation::parse("skin", phone_traits(), &value).is_none());

        let tv = Representation::parse("skin", Traits::tv(), &value).unwrap();
        assert_eq!(tv.aspect_ratio, Size::new(1920.0, 1080.0));
    }

    #[test]
    fn test_app_placement_keeps_authored_values() {
        let value = json!({
            "mappingSize": {"width": 400.0, "height": 800.0},
            "items": [{
                "inputs": ["menu"],
                "frame": {"x": 0.1, "y": 0.2, "width": 0.3, "height": 0.4},
                "placement": "app"
            }]
        });
        let rep = Representation::parse("skin", phone_traits(), &value).unwrap();
        assert_eq!(rep.items[0].placement, Placement::App);
        assert_eq!(rep.items[0].frame, Rect::new(0.1, 0.2, 0.3, 0.4));
    }

    #[test]
    fn test_screen_placement_defaults() {
        let value = json!({
            "mappingSize": {"width": 100.0, "height": 100.0},
            "screens": [
                {"inputFrame": {"x": 0.0, "y": 0.0, "width": 100.0, "height": 50.0}},
                {
                    "inputFrame": {"x": 0.0, "y": 50.0, "width": 100.0, "height": 50.0},
                    "outputFrame": {"x": 0.0, "y": 0.0, "width": 100.0, "height": 100.0}
                }
            ]
        });
        let rep = Representation::parse("skin", phone_traits(), &value).unwrap();
        let screens = rep.screens.as_ref().unwrap();
        assert_eq!(screens[0].placement, Placement::App);
        assert_eq!(screens[0].output_frame, None);
        assert_eq!(screens[1].placement, Placement::Controller);
        assert_eq!(screens[1].output_frame, Some(Rect::new(0.0, 0.0, 1.0, 1.0)));
    }

    #[test]
    fn test_touch_screen_flag_from_containing_item() {
        let value = json!({
            "mappingSize": {"width": 100.0, "height": 100.0},
            "items": [{
                "inputs": {"x": "touchX", "y": "touchY"},
                "frame": {"x": 0.0, "y": 0.0, "width": 100.0, "height": 100.0}
            }],
            "screens": [{
                "outputFrame": {"x": 10.0, "y": 10.0, "width": 50.0, "height": 50.0}
            }]
        });
        let rep = Representation::parse("skin", phone_traits(), &value).unwrap();
        assert!(rep.screens.as_ref().unwrap()[0].is_touch_screen);
    }

    #[test]
    fn test_thumbstick_item() {
        let value = json!({
            "mappingSize": {"width": 200.0, "height": 400.0},
            "items": [{
                "inputs": {"up": "u", "down": "d", "left": "l", "right": "r"},
                "thumbstick": {"name": "stick.pdf", "width": 50.0, "height": 50.0},
                "frame": {"x": 0.0, "y": 0.0, "width": 100.0, "height": 100.0}
            }]
        });
        let rep = Representation::parse("skin", phone_traits(), &value).unwrap();
        let item = &rep.items[0];
        assert_eq!(item.kind, ItemKind::Thumbstick);
        let art = item.thumbstick.as_ref().unwrap();
        assert_eq!(art.image_name, "stick.pdf");
        assert_eq!(art.size, Size::new(0.25, 0.125));
    }
}
