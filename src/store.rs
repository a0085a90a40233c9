// Builds the flat traits -> representation mappings from the nested,
// sparsely populated configuration tree.

use std::collections::HashMap;

use serde_json::Value;

use crate::error::SkinError;
use crate::representation::Representation;
use crate::traits::{Device, DisplayType, Orientation, Traits};

/// The primary and alternate representation mappings of one skin package.
/// Built once at load time; immutable afterwards.
#[derive(Debug, Clone)]
pub struct RepresentationStore {
    primary: HashMap<Traits, Representation>,
    alternate: HashMap<Traits, Representation>,
    has_alternates: bool,
}

impl RepresentationStore {
    /// Parse the `representations` tree and, if authored, the independent
    /// `altRepresentations` tree. When no alternate tree exists the
    /// alternate mapping holds the primary definitions, so alt queries
    /// succeed identically.
    ///
    /// Fails only when zero usable primary representations result.
    pub fn parse(
        skin_id: &str,
        representations: &Value,
        alt_representations: Option<&Value>,
    ) -> Result<Self, SkinError> {
        let primary = parse_tree(skin_id, representations);
        if primary.is_empty() {
            return Err(SkinError::NoRepresentations);
        }

        let (alternate, has_alternates) = match alt_representations {
            Some(tree) => (parse_tree(skin_id, tree), true),
            None => (primary.clone(), false),
        };

        Ok(Self {
            primary,
            alternate,
            has_alternates,
        })
    }

    pub fn has_alternates(&self) -> bool {
        self.has_alternates
    }

    /// Exact lookup; fallback rules live in the resolver
    pub fn representation(&self, traits: &Traits, alt: bool) -> Option<&Representation> {
        self.mapping(alt).get(traits)
    }

    pub fn contains(&self, traits: &Traits, alt: bool) -> bool {
        self.mapping(alt).contains_key(traits)
    }

    pub fn len(&self, alt: bool) -> usize {
        self.mapping(alt).len()
    }

    pub fn is_empty(&self, alt: bool) -> bool {
        self.mapping(alt).is_empty()
    }

    pub fn iter(&self, alt: bool) -> impl Iterator<Item = (&Traits, &Representation)> {
        self.mapping(alt).iter()
    }

    fn mapping(&self, alt: bool) -> &HashMap<Traits, Representation> {
        if alt {
            &self.alternate
        } else {
            &self.primary
        }
    }
}

// Top level: each key must name a device; unknown keys are ignored.
fn parse_tree(skin_id: &str, tree: &Value) -> HashMap<Traits, Representation> {
    let mut representations = HashMap::new();

    let Some(map) = tree.as_object() else {
        return representations;
    };

    for (key, node) in map {
        let Some(device) = Device::from_name(key) else {
            continue;
        };
        match device {
            Device::Phone | Device::Tablet => {
                parse_device_node(skin_id, device, node, &mut representations);
            }
            // TV skins have exactly one trait tuple; portrait TV layouts are
            // unsupported by design.
            Device::Tv => {
                if let Some(rep) = Representation::parse(skin_id, Traits::tv(), node) {
                    representations.insert(rep.traits, rep);
                }
            }
        }
    }

    representations
}

// Second level: display types. Old-format skins omit this axis entirely, in
// which case the whole node is treated as `standard` exactly once.
fn parse_device_node(
    skin_id: &str,
    device: Device,
    node: &Value,
    out: &mut HashMap<Traits, Representation>,
) {
    let Some(map) = node.as_object() else {
        return;
    };

    for (key, child) in map {
        match (DisplayType::from_name(key), child.is_object()) {
            (Some(display_type), true) => {
                parse_orientation_node(skin_id, device, display_type, child, out);
            }
            _ => {
                parse_orientation_node(skin_id, device, DisplayType::Standard, node, out);
                return;
            }
        }
    }
}

// Third level: orientations; each leaf parses into one representation.
// A leaf that fails validation produces nothing and is not fatal.
fn parse_orientation_node(
    skin_id: &str,
    device: Device,
    display_type: DisplayType,
    node: &Value,
    out: &mut HashMap<Traits, Representation>,
) {
    let Some(map) = node.as_object() else {
        return;
    };

    for (key, leaf) in map {
        let Some(orientation) = Orientation::from_name(key) else {
            continue;
        };
        let traits = Traits::new(device, display_type, orientation);
        if let Some(rep) = Representation::parse(skin_id, traits, leaf) {
            out.insert(rep.traits, rep);
        }
    }
}
