// Resolves "best available" representations and assets for requested traits.
//
// Two deliberately separate strategies live here: the narrow single-axis
// fallback of `supported_traits` (phone edge-to-edge -> standard, nothing
// else), and the exhaustive any-variant search that walks every
// `(device, display type)` pair with orientation held fixed. They answer
// different questions and must not be unified.

use crate::assets::{AssetSize, SizeClass};
use crate::geometry::Size;
use crate::representation::Representation;
use crate::store::RepresentationStore;
use crate::traits::{Device, DisplayType, Traits};

/// An asset resolved for a size class: the filename to load plus the fixed
/// geometry the static tables assign it, when any.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedAsset<'a> {
    pub filename: &'a str,
    pub asset_size: AssetSize,
    /// `None` means the caller derives geometry from the decoded content
    pub target_size: Option<Size>,
    pub scale: Option<f64>,
}

/// Read-only resolution queries over a representation store
#[derive(Debug, Clone, Copy)]
pub struct TraitResolver<'a> {
    store: &'a RepresentationStore,
}

impl<'a> TraitResolver<'a> {
    pub fn new(store: &'a RepresentationStore) -> Self {
        Self { store }
    }

    /// The traits actually available for a request, if any. The only
    /// fallback axis is phone edge-to-edge -> standard.
    pub fn supported_traits(&self, traits: &Traits, alt: bool) -> Option<Traits> {
        let mut candidate = *traits;
        loop {
            if self.store.contains(&candidate, alt) {
                return Some(candidate);
            }
            if candidate.device == Device::Phone
                && candidate.display_type == DisplayType::EdgeToEdge
            {
                candidate.display_type = DisplayType::Standard;
            } else {
                return None;
            }
        }
    }

    /// Exact lookup, then `supported_traits` fallback
    pub fn representation(&self, traits: &Traits, alt: bool) -> Option<&'a Representation> {
        if let Some(rep) = self.store.representation(traits, alt) {
            return Some(rep);
        }
        let fallback = self.supported_traits(traits, alt)?;
        self.store.representation(&fallback, alt)
    }

    /// Best-effort search when the requested traits are unsupported: walk
    /// every `(device, display type)` pair holding orientation fixed and
    /// take the first supported tuple. The result's device or display type
    /// may differ from what was asked.
    pub fn any_supported_traits(&self, traits: &Traits, alt: bool) -> Option<Traits> {
        if let Some(found) = self.supported_traits(traits, alt) {
            return Some(found);
        }
        let mut candidate = *traits;
        for device in Device::ALL {
            for display_type in DisplayType::ALL {
                candidate.device = device;
                candidate.display_type = display_type;
                if let Some(found) = self.supported_traits(&candidate, alt) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// `representation` under the best-effort any-variant search
    pub fn any_representation(&self, traits: &Traits, alt: bool) -> Option<&'a Representation> {
        let found = self.any_supported_traits(traits, alt)?;
        self.store.representation(&found, alt)
    }

    /// Resolve an asset for the requested size class through the class's
    /// fixed fallback chain. The first chain entry present in the
    /// representation's asset map wins; absence is a normal outcome.
    pub fn asset(&self, traits: &Traits, class: SizeClass, alt: bool) -> Option<ResolvedAsset<'a>> {
        let rep = self.representation(traits, alt)?;
        Self::asset_from(rep, class)
    }

    /// `asset` under the best-effort any-variant search
    pub fn any_asset(
        &self,
        traits: &Traits,
        class: SizeClass,
        alt: bool,
    ) -> Option<ResolvedAsset<'a>> {
        let rep = self.any_representation(traits, alt)?;
        Self::asset_from(rep, class)
    }

    fn asset_from(rep: &'a Representation, class: SizeClass) -> Option<ResolvedAsset<'a>> {
        for candidate in class.fallback_chain() {
            if let Some(filename) = rep.assets.get(&candidate) {
                return Some(ResolvedAsset {
                    filename: filename.as_str(),
                    target_size: candidate.target_size(&rep.traits),
                    scale: candidate.image_scale(&rep.traits),
                    asset_size: candidate,
                });
            }
        }
        None
    }
}
