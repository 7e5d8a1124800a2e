//! Measuring text drawn with a bitmap font.
//!
//! A single walk over the text ([`GlyphWalker`]) places every char; measuring
//! folds the placements into a [`DrawCharResult`] and hit-testing searches
//! them, so both always agree on where a char is.

use std::sync::Arc;

use crate::{hit_test::char_at_with, FontAsset, FontMetrics, FontStyle, FoundCharByLocation, Position, Rectangle, Result};

/// Advances one pixel, draws nothing.
pub const ONE_PIXEL_SPACE: char = '\u{01}';
/// Marks a font change in formatted text, takes no space.
pub const FONT_CHANGE: char = '\u{02}';
/// Takes no space, draws nothing.
pub const ZERO_PIXEL_CHAR: char = '\u{03}';
/// Non breaking space in the Mac Roman set.
pub const NON_BREAKING_SPACE: char = '\u{CA}';
/// Used when a char code has no glyph.
pub const DEFAULT_GLYPH: char = '?';

/// Metadata of drawn text: where the logical cursor ended up and the
/// furthest pixels any glyph reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawCharResult {
    pub new_logical_x: i32,
    pub rightmost_pixel_drawn: i32,
    pub lowest_pixel_drawn: i32,
}

impl DrawCharResult {
    pub fn new(new_logical_x: i32, rightmost_pixel_drawn: i32, lowest_pixel_drawn: i32) -> Self {
        Self {
            new_logical_x,
            rightmost_pixel_drawn,
            lowest_pixel_drawn,
        }
    }

    /// Nothing drawn yet at `(x, y)`.
    pub fn starting_at(x: i32, y: i32) -> Self {
        Self::new(x, x - 1, y - 1)
    }

    /// Merges the result of the next char. The extents only grow, the
    /// logical cursor is taken over as is.
    pub fn update(&mut self, drawn: &DrawCharResult) {
        self.lowest_pixel_drawn = self.lowest_pixel_drawn.max(drawn.lowest_pixel_drawn);
        self.rightmost_pixel_drawn = self.rightmost_pixel_drawn.max(drawn.rightmost_pixel_drawn);
        self.new_logical_x = drawn.new_logical_x;
    }
}

/// Where one char of a text run ended up, relative to the run origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CharPlacement {
    /// Char (not byte) index in the text
    pub index: usize,
    pub logical_x: i32,
    pub advance: i32,
    pub drawn: Option<Rectangle>,
    pub line_break: bool,
}

impl CharPlacement {
    /// Chars that draw nothing report the run origin minus one, which leaves
    /// the extents of an accumulator untouched.
    pub fn draw_result(&self) -> DrawCharResult {
        let next_x = if self.line_break { 0 } else { self.logical_x + self.advance };
        match self.drawn {
            Some(r) => DrawCharResult::new(next_x, r.right() - 1, r.bottom() - 1),
            None => DrawCharResult::new(next_x, -1, -1),
        }
    }
}

pub(crate) struct GlyphWalker<'a> {
    metrics: &'a FontMetrics,
    extra_advance: i32,
    chars: std::iter::Enumerate<std::str::Chars<'a>>,
    logical_x: i32,
    line: usize,
}

impl<'a> GlyphWalker<'a> {
    /// `extra_advance` is added to every table driven advance
    /// (spacing adjustment and synthesized condense/extend).
    pub fn new(metrics: &'a FontMetrics, extra_advance: i32, text: &'a str) -> Self {
        Self {
            metrics,
            extra_advance,
            chars: text.chars().enumerate(),
            logical_x: 0,
            line: 0,
        }
    }

    fn resolve(&self, ch: char, line_top: i32) -> (i32, Option<Rectangle>) {
        match ch {
            ONE_PIXEL_SPACE => (1, None),
            FONT_CHANGE | ZERO_PIXEL_CHAR => (0, None),
            '\t' | NON_BREAKING_SPACE => self.table_glyph(' ', line_top),
            _ => self.table_glyph(ch, line_top),
        }
    }

    fn table_glyph(&self, ch: char, line_top: i32) -> (i32, Option<Rectangle>) {
        let glyph = self
            .metrics
            .glyph(ch as u32)
            .or_else(|| self.metrics.glyph(DEFAULT_GLYPH as u32));
        let Some(glyph) = glyph else {
            return (0, None);
        };
        let advance = (glyph.advance + self.extra_advance).max(0);
        let drawn = glyph.draws_pixels().then(|| {
            Rectangle::from(
                self.logical_x + glyph.offset.x,
                line_top + glyph.offset.y,
                glyph.src.width(),
                glyph.src.height(),
            )
        });
        (advance, drawn)
    }
}

impl Iterator for GlyphWalker<'_> {
    type Item = CharPlacement;

    fn next(&mut self) -> Option<CharPlacement> {
        let (index, ch) = self.chars.next()?;
        let line_top = self.line as i32 * self.metrics.line_height;
        if ch == '\n' {
            let placement = CharPlacement {
                index,
                logical_x: self.logical_x,
                advance: 0,
                drawn: None,
                line_break: true,
            };
            self.line += 1;
            self.logical_x = 0;
            return Some(placement);
        }

        let (advance, drawn) = self.resolve(ch, line_top);
        let placement = CharPlacement {
            index,
            logical_x: self.logical_x,
            advance,
            drawn,
            line_break: false,
        };
        self.logical_x += advance;
        Some(placement)
    }
}

pub(crate) fn measure_with(asset: &FontAsset, text: &str, style_advance: i32) -> Option<DrawCharResult> {
    if !asset.is_ready() {
        return None;
    }
    let metrics = asset.metrics()?;
    let mut result = DrawCharResult::starting_at(0, 0);
    for placement in GlyphWalker::new(metrics, asset.adjust_spacing() + style_advance, text) {
        result.update(&placement.draw_result());
    }
    Some(result)
}

/// Measures `text` drawn at the origin. Returns `None` while the font is
/// still loading; that is not an error, ask again on the next tick.
pub fn measure_string(asset: &FontAsset, text: &str) -> Option<DrawCharResult> {
    measure_with(asset, text, 0)
}

/// Anything that can tell how wide a label is going to be.
pub trait TextMeasure {
    /// `None` if the font isn't available yet.
    fn measure(&self, text: &str) -> Option<DrawCharResult>;
}

impl TextMeasure for FontAsset {
    fn measure(&self, text: &str) -> Option<DrawCharResult> {
        measure_string(self, text)
    }
}

impl<T: TextMeasure + ?Sized> TextMeasure for &T {
    fn measure(&self, text: &str) -> Option<DrawCharResult> {
        (**self).measure(text)
    }
}

impl<T: TextMeasure + ?Sized> TextMeasure for Arc<T> {
    fn measure(&self, text: &str) -> Option<DrawCharResult> {
        (**self).measure(text)
    }
}

/// A shared, frozen font plus the styles that are synthesized while
/// drawing instead of coming from a glyph sheet of their own.
#[derive(Debug, Clone)]
pub struct TextRendererFont {
    pub asset: Arc<FontAsset>,
    pub underline: bool,
    pub condense: bool,
    pub extend: bool,
}

impl TextRendererFont {
    pub fn new(asset: Arc<FontAsset>, style: FontStyle) -> Self {
        Self {
            asset,
            underline: style.contains(FontStyle::UNDERLINE),
            condense: style.contains(FontStyle::CONDENSED),
            extend: style.contains(FontStyle::EXTEND),
        }
    }

    /// Condensed text loses a pixel per char, extended text gains one.
    pub fn style_advance(&self) -> i32 {
        i32::from(self.extend) - i32::from(self.condense)
    }

    /// [`crate::char_at`] with the spacing this font measures with.
    pub fn char_at(&self, text: &str, origin: Position, field: Rectangle, x: i32, y: i32) -> Result<Option<FoundCharByLocation>> {
        char_at_with(&self.asset, text, origin, field, (x, y), self.style_advance())
    }
}

impl TextMeasure for TextRendererFont {
    fn measure(&self, text: &str) -> Option<DrawCharResult> {
        measure_with(&self.asset, text, self.style_advance())
    }
}
