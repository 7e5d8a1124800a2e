//! Registry of font assets, filled by asynchronous loader completions.
//!
//! The glyph sheet and the metrics of a font are reported separately and in
//! any order. When both have arrived the asset is frozen and published as an
//! `Arc<FontAsset>`; readers never see a half loaded font through [`FontLibrary::get`].

use std::{collections::HashMap, sync::Arc};

use parking_lot::Mutex;

use crate::{typeface_for_legacy_id, DrawCharResult, FontAsset, FontMetrics, FontSpec, FontStyle, GlyphSheet, Result, TextMeasure, TextRendererFont};

enum FontSlot {
    Loading(FontAsset),
    Ready(Arc<FontAsset>),
}

#[derive(Default)]
pub struct FontLibrary {
    slots: Mutex<HashMap<String, FontSlot>>,
}

impl FontLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// The spec of the glyph sheet backing `spec`: synthesized styles are
    /// drawn from the plain sheet, typeface names are case insensitive and
    /// numeric ids of persisted identifiers name their typeface.
    pub fn asset_spec(spec: &FontSpec) -> FontSpec {
        let typeface = spec.typeface.to_lowercase().replace("%20", " ");
        let typeface = typeface_for_legacy_id(&typeface).map_or(typeface, ToString::to_string);
        FontSpec::new(typeface, spec.size, spec.style.difference(FontStyle::synthesized()))
    }

    /// Key under which the asset for `spec` is stored, e.g. `geneva_12_+biuosdce`.
    pub fn lookup_key(spec: &FontSpec) -> Result<String> {
        Self::asset_spec(spec).encode()
    }

    /// Marks the font as wanted. Does nothing if it is already known.
    pub fn request(&self, spec: &FontSpec) -> Result<()> {
        let key = Self::lookup_key(spec)?;
        self.slots
            .lock()
            .entry(key)
            .or_insert_with(|| FontSlot::Loading(FontAsset::new(Self::asset_spec(spec))));
        Ok(())
    }

    pub fn image_loaded(&self, spec: &FontSpec, sheet: GlyphSheet) -> Result<()> {
        self.complete(spec, |asset| asset.set_image(sheet))
    }

    pub fn metrics_loaded(&self, spec: &FontSpec, metrics: FontMetrics) -> Result<()> {
        self.complete(spec, |asset| asset.set_metrics(metrics))
    }

    fn complete(&self, spec: &FontSpec, apply: impl FnOnce(&mut FontAsset)) -> Result<()> {
        let key = Self::lookup_key(spec)?;
        let mut slots = self.slots.lock();
        let mut asset = match slots.remove(&key) {
            Some(FontSlot::Ready(ready)) => {
                log::warn!("font {key} is already loaded, ignoring late load result");
                slots.insert(key, FontSlot::Ready(ready));
                return Ok(());
            }
            Some(FontSlot::Loading(asset)) => asset,
            None => FontAsset::new(Self::asset_spec(spec)),
        };

        apply(&mut asset);
        let slot = if asset.is_ready() {
            asset.freeze();
            log::debug!("font {key} loaded");
            FontSlot::Ready(Arc::new(asset))
        } else {
            FontSlot::Loading(asset)
        };
        slots.insert(key, slot);
        Ok(())
    }

    /// The frozen asset, `None` while it is still loading or unknown.
    pub fn get(&self, spec: &FontSpec) -> Option<Arc<FontAsset>> {
        let key = Self::lookup_key(spec).ok()?;
        match self.slots.lock().get(&key) {
            Some(FontSlot::Ready(asset)) => Some(asset.clone()),
            _ => None,
        }
    }

    pub fn is_ready(&self, spec: &FontSpec) -> bool {
        self.get(spec).is_some()
    }

    /// Keys of fonts that were requested or partially loaded.
    pub fn pending(&self) -> Vec<String> {
        let mut pending: Vec<String> = self
            .slots
            .lock()
            .iter()
            .filter(|(_, slot)| matches!(slot, FontSlot::Loading(_)))
            .map(|(key, _)| key.clone())
            .collect();
        pending.sort();
        pending
    }

    /// The font ready for drawing `spec`, including synthesized styles.
    pub fn renderer_font(&self, spec: &FontSpec) -> Option<TextRendererFont> {
        self.get(spec).map(|asset| TextRendererFont::new(asset, spec.style))
    }

    pub fn measure_with(&self, spec: &FontSpec) -> LibraryMeasure<'_> {
        LibraryMeasure {
            library: self,
            spec: spec.clone(),
        }
    }
}

/// Measures with whatever font the library has for a spec at the time of
/// the call, so it can be kept around while the font is loading.
pub struct LibraryMeasure<'a> {
    library: &'a FontLibrary,
    spec: FontSpec,
}

impl TextMeasure for LibraryMeasure<'_> {
    fn measure(&self, text: &str) -> Option<DrawCharResult> {
        self.library.renderer_font(&self.spec)?.measure(text)
    }
}
