//! Finding the char under a screen position.
//!
//! A text field is divided into regions per line: the box of every drawn char,
//! the margin left of the first char (wide when the text is centered or right
//! aligned) and the margin right of the last one.

use crate::{
    measure::{CharPlacement, GlyphWalker},
    FontAsset, Position, Rectangle, Result,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharRectType {
    /// Inside the box of a char
    Char,
    /// In the left margin of the field
    SpaceToLeft,
    /// In the right margin of the field
    SpaceToRight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoundCharByLocation {
    pub rect: Rectangle,
    /// For margins this is the caret position next to the margin:
    /// the first char of the line on the left, one past the last on the right.
    pub char_index: usize,
    pub kind: CharRectType,
    pub line: usize,
}

/// Finds the region of `text` (drawn at `origin` inside `field`) that
/// contains `(x, y)`. Positions above the first or below the last line are
/// treated as being on that line.
///
/// Returns `Ok(None)` while the font is loading.
///
/// # Errors
///
/// Fails with `InvalidMetrics` if the loaded font has no line height.
pub fn char_at(asset: &FontAsset, text: &str, origin: Position, field: Rectangle, x: i32, y: i32) -> Result<Option<FoundCharByLocation>> {
    char_at_with(asset, text, origin, field, (x, y), 0)
}

/// `style_advance` is the per char adjustment of condensed or extended text.
pub(crate) fn char_at_with(
    asset: &FontAsset,
    text: &str,
    origin: Position,
    field: Rectangle,
    (x, y): (i32, i32),
    style_advance: i32,
) -> Result<Option<FoundCharByLocation>> {
    if !asset.is_ready() {
        return Ok(None);
    }
    let line_height = asset.line_height()?;
    let Some(metrics) = asset.metrics() else {
        return Ok(None);
    };

    let placements: Vec<CharPlacement> = GlyphWalker::new(metrics, asset.adjust_spacing() + style_advance, text).collect();
    let breaks: Vec<usize> = placements.iter().filter(|p| p.line_break).map(|p| p.index).collect();
    let last_line = breaks.len() as i32;
    let line = (y - origin.y).div_euclid(line_height).clamp(0, last_line) as usize;

    let line_start = if line == 0 { 0 } else { breaks[line - 1] + 1 };
    let line_end = breaks.get(line).copied().unwrap_or(placements.len());
    let line_top = origin.y + line as i32 * line_height;
    let chars = &placements[line_start..line_end];

    let start_x = origin.x;
    let end_x = chars.last().map_or(start_x, |p| origin.x + p.logical_x + p.advance);

    let found = if x < start_x {
        FoundCharByLocation {
            rect: Rectangle::from(field.left(), line_top, (start_x - field.left()).max(0), line_height),
            char_index: line_start,
            kind: CharRectType::SpaceToLeft,
            line,
        }
    } else if let Some(p) = chars.iter().find(|p| {
        let left = origin.x + p.logical_x;
        left <= x && x < left + p.advance
    }) {
        FoundCharByLocation {
            rect: Rectangle::from(origin.x + p.logical_x, line_top, p.advance, line_height),
            char_index: p.index,
            kind: CharRectType::Char,
            line,
        }
    } else {
        FoundCharByLocation {
            rect: Rectangle::from(end_x, line_top, (field.right() - end_x).max(0), line_height),
            char_index: line_end,
            kind: CharRectType::SpaceToRight,
            line,
        }
    };
    Ok(Some(found))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{self, LINE_HEIGHT, REGULAR_ADVANCE};

    fn field() -> Rectangle {
        Rectangle::from(0, 0, 200, 50)
    }

    #[test]
    fn test_hit_char() {
        let asset = test_support::fixture_asset();
        // "abc" at x=10: a=[10,16) b=[16,22) c=[22,28)
        let found = char_at(&asset, "abc", Position::new(10, 5), field(), 17, 6).unwrap().unwrap();
        assert_eq!(found.kind, CharRectType::Char);
        assert_eq!(found.char_index, 1);
        assert_eq!(found.rect, Rectangle::from(16, 5, REGULAR_ADVANCE, LINE_HEIGHT));
    }

    #[test]
    fn test_margins() {
        let asset = test_support::fixture_asset();
        let left = char_at(&asset, "abc", Position::new(10, 5), field(), 3, 6).unwrap().unwrap();
        assert_eq!(left.kind, CharRectType::SpaceToLeft);
        assert_eq!(left.char_index, 0);
        assert_eq!(left.rect, Rectangle::from(0, 5, 10, LINE_HEIGHT));

        let right = char_at(&asset, "abc", Position::new(10, 5), field(), 28, 6).unwrap().unwrap();
        assert_eq!(right.kind, CharRectType::SpaceToRight);
        assert_eq!(right.char_index, 3);
        assert_eq!(right.rect, Rectangle::from(28, 5, 172, LINE_HEIGHT));
    }

    #[test]
    fn test_lines() {
        let asset = test_support::fixture_asset();
        let origin = Position::new(0, 0);
        let second = char_at(&asset, "ab\ncd", origin, field(), 7, LINE_HEIGHT + 1).unwrap().unwrap();
        assert_eq!(second.line, 1);
        assert_eq!(second.char_index, 4);
        assert_eq!(second.rect.top(), LINE_HEIGHT);

        // below the last line clamps to it
        let below = char_at(&asset, "ab\ncd", origin, field(), 1, 45).unwrap().unwrap();
        assert_eq!(below.line, 1);
        assert_eq!(below.char_index, 3);

        // above the first line clamps to it
        let above = char_at(&asset, "ab\ncd", origin, field(), 100, -20).unwrap().unwrap();
        assert_eq!(above.kind, CharRectType::SpaceToRight);
        assert_eq!(above.char_index, 2);
    }

    #[test]
    fn test_empty_text() {
        let asset = test_support::fixture_asset();
        let found = char_at(&asset, "", Position::new(4, 0), field(), 50, 0).unwrap().unwrap();
        assert_eq!(found.kind, CharRectType::SpaceToRight);
        assert_eq!(found.char_index, 0);
        assert_eq!(found.rect, Rectangle::from(4, 0, 196, LINE_HEIGHT));
    }

    #[test]
    fn test_not_ready() {
        let asset = FontAsset::new(test_support::fixture_spec());
        assert_eq!(char_at(&asset, "abc", Position::default(), field(), 0, 0).unwrap(), None);
    }
}
