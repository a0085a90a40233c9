// A loaded controller-skin package: metadata plus the representation store,
// exposing the full trait-resolution query surface. Archive extraction and
// image decoding are external collaborators; this layer only consumes the
// already-parsed configuration tree.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde_json::Value;

use crate::assets::SizeClass;
use crate::error::SkinError;
use crate::geometry::{Rect, Size};
use crate::live::item::LiveOverlayItem;
use crate::representation::{Item, Representation, Screen};
use crate::resolver::{ResolvedAsset, TraitResolver};
use crate::store::RepresentationStore;
use crate::traits::Traits;

#[derive(Debug, Clone)]
pub struct ControllerSkin {
    pub name: String,
    pub identifier: String,
    pub game_type: String,
    pub is_debug_mode_enabled: bool,
    store: RepresentationStore,
}

impl ControllerSkin {
    /// Build a skin from the parsed `info.json` tree
    pub fn from_value(info: &Value) -> Result<Self, SkinError> {
        let field = |name: &'static str| -> Result<String, SkinError> {
            info.get(name)
                .and_then(Value::as_str)
                .map(String::from)
                .ok_or(SkinError::MissingField(name))
        };

        let name = field("name")?;
        let identifier = field("identifier")?;
        let game_type = field("gameTypeIdentifier")?;

        let representations = info
            .get("representations")
            .ok_or(SkinError::MissingField("representations"))?;

        let store = RepresentationStore::parse(
            &identifier,
            representations,
            info.get("altRepresentations"),
        )?;

        Ok(Self {
            name,
            identifier,
            game_type,
            is_debug_mode_enabled: info.get("debug").and_then(Value::as_bool).unwrap_or(false),
            store,
        })
    }

    pub fn from_json_str(text: &str) -> Result<Self, SkinError> {
        let info: Value = serde_json::from_str(text)?;
        Self::from_value(&info)
    }

    /// Load a skin description from an extracted `info.json` on disk
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read skin info from {}", path.display()))?;
        let skin = Self::from_json_str(&text)
            .with_context(|| format!("failed to parse skin info from {}", path.display()))?;
        Ok(skin)
    }

    pub fn has_alt_representations(&self) -> bool {
        self.store.has_alternates()
    }

    pub fn store(&self) -> &RepresentationStore {
        &self.store
    }

    fn resolver(&self) -> TraitResolver<'_> {
        TraitResolver::new(&self.store)
    }

    pub fn supports(&self, traits: &Traits, alt: bool) -> bool {
        self.store.contains(traits, alt)
    }

    pub fn supported_traits(&self, traits: &Traits, alt: bool) -> Option<Traits> {
        self.resolver().supported_traits(traits, alt)
    }

    pub fn representation(&self, traits: &Traits, alt: bool) -> Option<&Representation> {
        self.resolver().representation(traits, alt)
    }

    pub fn any_representation(&self, traits: &Traits, alt: bool) -> Option<&Representation> {
        self.resolver().any_representation(traits, alt)
    }

    pub fn items(&self, traits: &Traits, alt: bool) -> Option<&[Item]> {
        self.representation(traits, alt).map(|rep| rep.items.as_slice())
    }

    pub fn live_overlay_items(&self, traits: &Traits, alt: bool) -> Option<&[LiveOverlayItem]> {
        self.representation(traits, alt)
            .map(|rep| rep.live_overlay_items.as_slice())
    }

    pub fn is_translucent(&self, traits: &Traits, alt: bool) -> Option<bool> {
        self.representation(traits, alt).map(|rep| rep.is_translucent)
    }

    pub fn screens(&self, traits: &Traits, alt: bool) -> Option<&[Screen]> {
        self.representation(traits, alt)
            .and_then(|rep| rep.screens.as_deref())
    }

    pub fn game_screen_frame(&self, traits: &Traits, alt: bool) -> Option<Rect> {
        self.screens(traits, alt)?
            .first()
            .and_then(|screen| screen.output_frame)
    }

    pub fn aspect_ratio(&self, traits: &Traits, alt: bool) -> Option<Size> {
        self.representation(traits, alt).map(|rep| rep.aspect_ratio)
    }

    pub fn asset(&self, traits: &Traits, class: SizeClass, alt: bool) -> Option<ResolvedAsset<'_>> {
        self.resolver().asset(traits, class, alt)
    }

    pub fn any_asset(
        &self,
        traits: &Traits,
        class: SizeClass,
        alt: bool,
    ) -> Option<ResolvedAsset<'_>> {
        self.resolver().any_asset(traits, class, alt)
    }

    /// Layout inset reserved for hardware cutouts; skins do not declare one
    pub fn unsafe_area(&self, _traits: &Traits, _alt: bool) -> f64 {
        0.0
    }
}
