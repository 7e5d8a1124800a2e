use std::fmt::Write;

use pix_font::{CharRectType, DrawCharResult, FoundCharByLocation};
use pix_menu::MenuBar;

pub fn measured(result: &DrawCharResult) -> String {
    format!(
        "new_logical_x: {}\nrightmost_pixel_drawn: {}\nlowest_pixel_drawn: {}",
        result.new_logical_x, result.rightmost_pixel_drawn, result.lowest_pixel_drawn
    )
}

pub fn hit(found: &FoundCharByLocation) -> String {
    let kind = match found.kind {
        CharRectType::Char => "char",
        CharRectType::SpaceToLeft => "space to the left",
        CharRectType::SpaceToRight => "space to the right",
    };
    format!("{kind} at index {} on line {}: {}", found.char_index, found.line, found.rect)
}

pub fn menu_bar(bar: &MenuBar) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", bar.root.id, bar.root.rect);
    for dropdown in &bar.dropdowns {
        let marker = if dropdown.highlight_active { "*" } else { " " };
        let _ = writeln!(out, "{marker} {} {}", dropdown.id, dropdown.rect);
        for item in dropdown.items.iter().filter(|item| item.visible) {
            let _ = writeln!(out, "    {} {}", item.id, item.rect);
        }
    }
    if bar.items_visible {
        let _ = writeln!(out, "{} {}", bar.background.id, bar.background.rect);
    }
    out
}
