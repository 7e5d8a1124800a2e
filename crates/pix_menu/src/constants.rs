use serde::{Deserialize, Serialize};

use crate::{MenuError, Result};

/// Pixel constants of the menu bar look.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuConstants {
    pub bar_height: i32,
    /// Left margin before the first header.
    pub top_header_margin: i32,
    /// Added to the measured label width of a header.
    pub x_spacing: i32,
    /// Added to the widest measured item label of a dropdown.
    pub add_to_width: i32,
    pub item_height: i32,
    pub shadow_size_left: i32,
    pub shadow_size_right: i32,
    pub shadow_size_bottom: i32,
    /// A header rectangle starts this far left of the cursor ...
    pub header_inset: i32,
    /// ... and is this much wider than the header width.
    pub header_grow: i32,
}

impl Default for MenuConstants {
    fn default() -> Self {
        Self {
            bar_height: 20,
            top_header_margin: 12,
            x_spacing: 13,
            add_to_width: 30,
            item_height: 16,
            shadow_size_left: 1,
            shadow_size_right: 2,
            shadow_size_bottom: 2,
            header_inset: 4,
            header_grow: 5,
        }
    }
}

impl MenuConstants {
    /// Missing keys keep their default.
    pub fn from_toml(text: &str) -> Result<Self> {
        let constants: MenuConstants = toml::from_str(text)?;
        constants.check()?;
        Ok(constants)
    }

    /// Rejects values no menu can be laid out with.
    pub fn check(&self) -> Result<()> {
        if self.bar_height <= 0 {
            return Err(MenuError::InvalidConstants(format!("bar height must be positive, got {}", self.bar_height)));
        }
        if self.item_height <= 0 {
            return Err(MenuError::InvalidConstants(format!("item height must be positive, got {}", self.item_height)));
        }
        if self.shadow_size_left < 0 || self.shadow_size_right < 0 || self.shadow_size_bottom < 0 {
            return Err(MenuError::InvalidConstants("shadow sizes can't be negative".to_string()));
        }
        Ok(())
    }
}
