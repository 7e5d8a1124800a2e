//! One loaded (or loading) bitmap font: the glyph sheet plus its metrics.
//!
//! The sheet and the metrics arrive independently and in either order. Once
//! both are there the asset gets frozen; from then on it is shared read only
//! (usually as `Arc<FontAsset>`) and any attempt to change it panics.

use crate::{FontError, FontMetrics, FontSpec, Rectangle, Result, Size};

/// Reference to the glyph sheet image. Decoding and blitting the image is
/// done by the renderer, the measuring code only needs its extent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphSheet {
    pub name: String,
    pub size: Size,
}

impl GlyphSheet {
    pub fn new(name: impl Into<String>, size: Size) -> Self {
        Self { name: name.into(), size }
    }

    pub fn bounds(&self) -> Rectangle {
        Rectangle::from(0, 0, self.size.width, self.size.height)
    }
}

#[derive(Debug, Clone)]
pub struct FontAsset {
    spec: FontSpec,
    image: Option<GlyphSheet>,
    metrics: Option<FontMetrics>,
    adjust_spacing: i32,
    frozen: bool,
}

impl FontAsset {
    pub fn new(spec: FontSpec) -> Self {
        Self {
            spec,
            image: None,
            metrics: None,
            adjust_spacing: 0,
            frozen: false,
        }
    }

    pub fn spec(&self) -> &FontSpec {
        &self.spec
    }

    pub fn loaded_image(&self) -> bool {
        self.image.is_some()
    }

    pub fn loaded_metrics(&self) -> bool {
        self.metrics.is_some()
    }

    /// Both the glyph sheet and the metrics have arrived.
    pub fn is_ready(&self) -> bool {
        self.loaded_image() && self.loaded_metrics()
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn image(&self) -> Option<&GlyphSheet> {
        self.image.as_ref()
    }

    pub fn metrics(&self) -> Option<&FontMetrics> {
        self.metrics.as_ref()
    }

    /// Extra pixels added to every table driven advance.
    pub fn adjust_spacing(&self) -> i32 {
        self.adjust_spacing
    }

    pub fn set_image(&mut self, image: GlyphSheet) {
        self.assert_mutable();
        self.image = Some(image);
    }

    pub fn set_metrics(&mut self, metrics: FontMetrics) {
        self.assert_mutable();
        self.metrics = Some(metrics);
    }

    pub fn set_adjust_spacing(&mut self, adjust_spacing: i32) {
        self.assert_mutable();
        self.adjust_spacing = adjust_spacing;
    }

    /// Locks the asset once both parts are loaded. Calling it earlier or
    /// more than once does nothing.
    pub fn freeze(&mut self) {
        if self.frozen || !self.is_ready() {
            return;
        }
        if let (Some(image), Some(metrics)) = (&self.image, &self.metrics) {
            let sheet = image.bounds();
            for (code, glyph) in metrics.bounds.iter().enumerate() {
                let Some(glyph) = glyph else {
                    continue;
                };
                if glyph.draws_pixels() && !sheet.contains_rect(&glyph.src) {
                    log::warn!("glyph {code} of font {} lies outside of sheet {} {}", self.spec, image.name, image.size);
                }
            }
        }
        self.frozen = true;
    }

    pub fn line_height(&self) -> Result<i32> {
        self.required_field(|m| m.line_height)
    }

    pub fn cap_height(&self) -> Result<i32> {
        self.required_field(|m| m.cap_height)
    }

    pub fn widest_logical_char(&self) -> Result<i32> {
        self.required_field(|m| m.widest_logical_char)
    }

    pub fn tallest_glyph(&self) -> Result<i32> {
        self.required_field(|m| m.tallest_glyph)
    }

    fn required_field(&self, field: impl Fn(&FontMetrics) -> i32) -> Result<i32> {
        match self.metrics.as_ref().map(field) {
            Some(value) if value != 0 => Ok(value),
            _ => Err(FontError::InvalidMetrics {
                spec: self.spec.to_string(),
            }),
        }
    }

    fn assert_mutable(&self) {
        assert!(!self.frozen, "font {} is frozen and can't be changed", self.spec);
    }
}
