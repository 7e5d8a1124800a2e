//! A small synthetic font for tests of this crate and the crates using it.
//!
//! Glyph widths follow a simple rule so expected values can be computed by hand:
//! * space advances `SPACE_ADVANCE` and draws nothing
//! * `i l I ! . , '` are narrow: 1 pixel wide, advance `NARROW_ADVANCE`
//! * `m w M W` are wide: 7 pixels wide, advance `WIDE_ADVANCE`
//! * every other printable ASCII char is 5 pixels wide, advance `REGULAR_ADVANCE`
//! * `g j p q y` reach `DESCENDER_HEIGHT` pixels down, the rest `CAP_HEIGHT`
//! * `j` is drawn one pixel left of the cursor
//! * `~` has no glyph and falls back to `?`

use std::sync::Arc;

use crate::{FontAsset, FontMetrics, FontSpec, FontStyle, GlyphBounds, GlyphSheet, Position, Rectangle, Size};

pub const LINE_HEIGHT: i32 = 12;
pub const CAP_HEIGHT: i32 = 9;
pub const DESCENDER_HEIGHT: i32 = 11;
pub const SPACE_ADVANCE: i32 = 4;
pub const NARROW_ADVANCE: i32 = 2;
pub const WIDE_ADVANCE: i32 = 8;
pub const REGULAR_ADVANCE: i32 = 6;

const CELL_WIDTH: i32 = 8;

/// Advance of a single printable char in the fixture font. `~` uses the
/// regular advance of the `?` fallback.
pub fn advance_of(ch: char) -> i32 {
    match ch {
        ' ' => SPACE_ADVANCE,
        'i' | 'l' | 'I' | '!' | '.' | ',' | '\'' => NARROW_ADVANCE,
        'm' | 'w' | 'M' | 'W' => WIDE_ADVANCE,
        _ => REGULAR_ADVANCE,
    }
}

/// Sum of the advances, the expected `new_logical_x` of a single line.
pub fn width_of(text: &str) -> i32 {
    text.chars().map(advance_of).sum()
}

fn glyph_for(code: u8) -> Option<GlyphBounds> {
    let ch = code as char;
    if ch == ' ' {
        return Some(GlyphBounds::advance_only(SPACE_ADVANCE));
    }
    if !ch.is_ascii_graphic() || ch == '~' {
        return None;
    }
    let advance = advance_of(ch);
    let width = match advance {
        NARROW_ADVANCE => 1,
        WIDE_ADVANCE => 7,
        _ => 5,
    };
    let height = if matches!(ch, 'g' | 'j' | 'p' | 'q' | 'y') { DESCENDER_HEIGHT } else { CAP_HEIGHT };
    let offset = if ch == 'j' { Position::new(-1, 0) } else { Position::default() };
    Some(GlyphBounds::new(
        Rectangle::from(code as i32 * CELL_WIDTH, 0, width, height),
        advance,
        offset,
    ))
}

pub fn fixture_metrics() -> FontMetrics {
    FontMetrics {
        version: "test".to_string(),
        line_height: LINE_HEIGHT,
        leftmost: -1,
        bounds: (0..128u8).map(glyph_for).collect(),
        widest_logical_char: WIDE_ADVANCE,
        widest_glyph: 7,
        tallest_glyph: DESCENDER_HEIGHT,
        cap_height: CAP_HEIGHT,
    }
}

pub fn fixture_sheet() -> GlyphSheet {
    GlyphSheet::new("fixture.png", Size::new(128 * CELL_WIDTH, LINE_HEIGHT))
}

pub fn fixture_spec() -> FontSpec {
    FontSpec::new("chicago", 12, FontStyle::default())
}

/// Ready but not yet frozen.
pub fn fixture_asset() -> FontAsset {
    let mut asset = FontAsset::new(fixture_spec());
    asset.set_image(fixture_sheet());
    asset.set_metrics(fixture_metrics());
    asset
}

/// Ready, frozen and shareable.
pub fn fixture_font() -> Arc<FontAsset> {
    let mut asset = fixture_asset();
    asset.freeze();
    Arc::new(asset)
}
