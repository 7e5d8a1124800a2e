//! Glyph metrics of a bitmap font, as written by the font extraction script.
//!
//! The `bounds` table is indexed by character code. An entry is either empty
//! (`null` or `0`), a bare advance (a glyph that draws nothing, like space),
//! or `[x, y, w, h, advance]` with an optional horizontal and vertical draw
//! offset appended.

use serde::Deserialize;

use crate::{Position, Rectangle, Result, Size};

/// Geometry of one glyph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GlyphBounds {
    /// Source rectangle in the glyph sheet, empty for advance only glyphs
    pub src: Rectangle,
    /// How far the logical cursor moves after the glyph
    pub advance: i32,
    /// Where the glyph is drawn relative to the logical cursor and the line top
    pub offset: Position,
}

impl GlyphBounds {
    pub fn advance_only(advance: i32) -> Self {
        Self {
            advance,
            ..Default::default()
        }
    }

    pub fn new(src: Rectangle, advance: i32, offset: Position) -> Self {
        Self { src, advance, offset }
    }

    pub fn draws_pixels(&self) -> bool {
        !self.src.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "RawMetrics")]
pub struct FontMetrics {
    pub version: String,
    pub line_height: i32,
    pub leftmost: i32,
    pub bounds: Vec<Option<GlyphBounds>>,
    pub widest_logical_char: i32,
    pub widest_glyph: i32,
    pub tallest_glyph: i32,
    pub cap_height: i32,
}

impl FontMetrics {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn glyph(&self, code: u32) -> Option<&GlyphBounds> {
        self.bounds.get(code as usize).and_then(Option::as_ref)
    }

    /// Smallest sheet size that holds every glyph rectangle.
    pub fn sheet_extent(&self) -> Size {
        self.bounds
            .iter()
            .flatten()
            .filter(|glyph| glyph.draws_pixels())
            .fold(Size::default(), |size, glyph| {
                Size::new(size.width.max(glyph.src.right()), size.height.max(glyph.src.bottom()))
            })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawBounds {
    Advance(i32),
    Geometry(Vec<i32>),
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct RawMetrics {
    version: String,
    lineheight: i32,
    leftmost: i32,
    bounds: Vec<Option<RawBounds>>,
    widestlogicalchar: i32,
    widestglyph: i32,
    tallestglyph: i32,
    #[serde(rename = "capHeight")]
    cap_height: i32,
}

impl From<RawMetrics> for FontMetrics {
    fn from(raw: RawMetrics) -> Self {
        let bounds = raw
            .bounds
            .into_iter()
            .enumerate()
            .map(|(code, entry)| match entry {
                None => None,
                Some(RawBounds::Advance(advance)) if advance > 0 => Some(GlyphBounds::advance_only(advance)),
                Some(RawBounds::Advance(_)) => None,
                Some(RawBounds::Geometry(values)) => {
                    if let [x, y, w, h, advance, rest @ ..] = values.as_slice() {
                        let offset_x = rest.first().copied().unwrap_or_default();
                        let offset_y = rest.get(1).copied().unwrap_or_default();
                        Some(GlyphBounds::new(
                            Rectangle::from(*x, *y, *w, *h),
                            *advance,
                            Position::new(offset_x, offset_y),
                        ))
                    } else {
                        log::warn!("malformed glyph bounds for char code {code}: {values:?}");
                        None
                    }
                }
            })
            .collect();

        Self {
            version: raw.version,
            line_height: raw.lineheight,
            leftmost: raw.leftmost,
            bounds,
            widest_logical_char: raw.widestlogicalchar,
            widest_glyph: raw.widestglyph,
            tallest_glyph: raw.tallestglyph,
            cap_height: raw.cap_height,
        }
    }
}
