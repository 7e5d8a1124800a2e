//! The menu bar as a tree of typed elements.
//!
//! Rectangles are written by the layout engine only; everything else is
//! changed by whoever handles clicks and commands.

use pix_font::Rectangle;

use crate::{MenuError, Result};

/// Label of an item that draws a separator line.
pub const SEPARATOR: &str = "---";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MenuState {
    #[default]
    Collapsed,
    /// Index of the open dropdown
    Expanded(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuRoot {
    pub id: String,
    pub state: MenuState,
    pub visible: bool,
    pub rect: Rectangle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuIcon {
    pub group: String,
    pub number: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuDropdown {
    pub id: String,
    /// Empty for icon headers
    pub label: String,
    pub icon: Option<MenuIcon>,
    /// Absolute x position, set for menus anchored to the right of the screen.
    pub fixed_offset: Option<i32>,
    /// Used instead of the measured label width.
    pub fixed_width: Option<i32>,
    pub items: Vec<MenuItem>,
    pub rect: Rectangle,
    pub highlight_active: bool,
}

impl MenuDropdown {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            icon: None,
            fixed_offset: None,
            fixed_width: None,
            items: Vec::new(),
            rect: Rectangle::default(),
            highlight_active: false,
        }
    }

    pub fn with_icon(id: impl Into<String>, icon: MenuIcon, fixed_width: i32) -> Self {
        let mut dropdown = Self::new(id, "");
        dropdown.icon = Some(icon);
        dropdown.fixed_width = Some(fixed_width);
        dropdown
    }

    pub fn is_right_anchored(&self) -> bool {
        self.fixed_offset.is_some()
    }

    pub fn push_item(&mut self, item: MenuItem) {
        self.items.push(item);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub id: String,
    pub label: String,
    pub hotkey: String,
    pub checked: bool,
    pub enabled: bool,
    pub visible: bool,
    pub rect: Rectangle,
}

impl MenuItem {
    pub fn new(id: impl Into<String>, label: impl Into<String>, hotkey: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            hotkey: hotkey.into(),
            checked: false,
            enabled: true,
            visible: false,
            rect: Rectangle::default(),
        }
    }

    pub fn is_separator(&self) -> bool {
        self.label == SEPARATOR
    }
}

/// The shadowed box drawn behind the items of the open dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropdownBackground {
    pub id: String,
    pub rect: Rectangle,
}

/// A menu root with its dropdowns. The background helper lives and dies
/// with the bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuBar {
    pub root: MenuRoot,
    pub dropdowns: Vec<MenuDropdown>,
    pub background: DropdownBackground,
    /// Visibility of the item layer, on while a dropdown is open.
    pub items_visible: bool,
}

impl MenuBar {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            background: DropdownBackground {
                id: format!("{id}##dropdownBg"),
                rect: Rectangle::default(),
            },
            root: MenuRoot {
                id,
                state: MenuState::Collapsed,
                visible: true,
                rect: Rectangle::default(),
            },
            dropdowns: Vec::new(),
            items_visible: false,
        }
    }

    pub fn push_dropdown(&mut self, dropdown: MenuDropdown) {
        self.dropdowns.push(dropdown);
    }

    pub fn expand(&mut self, index: usize) -> Result<()> {
        if index >= self.dropdowns.len() {
            return Err(MenuError::UnknownDropdown(index));
        }
        self.root.state = MenuState::Expanded(index);
        Ok(())
    }

    pub fn collapse(&mut self) {
        self.root.state = MenuState::Collapsed;
    }

    pub fn expanded(&self) -> Option<usize> {
        match self.root.state {
            MenuState::Expanded(index) if index < self.dropdowns.len() => Some(index),
            _ => None,
        }
    }

    pub fn dropdown_index(&self, id: &str) -> Option<usize> {
        self.dropdowns.iter().position(|d| d.id == id)
    }

    pub fn find_item(&self, id: &str) -> Option<&MenuItem> {
        self.dropdowns.iter().flat_map(|d| d.items.iter()).find(|item| item.id == id)
    }

    pub fn find_item_mut(&mut self, id: &str) -> Option<&mut MenuItem> {
        self.dropdowns.iter_mut().flat_map(|d| d.items.iter_mut()).find(|item| item.id == id)
    }

    /// Changes the parts of an item that are given. Returns false (and logs)
    /// if there is no such item.
    pub fn set_item_status(&mut self, id: &str, checked: Option<bool>, enabled: Option<bool>, label: Option<&str>) -> bool {
        let Some(item) = self.find_item_mut(id) else {
            log::warn!("menu item {id} not found");
            return false;
        };
        if let Some(checked) = checked {
            item.checked = checked;
        }
        if let Some(enabled) = enabled {
            item.enabled = enabled;
        }
        if let Some(label) = label {
            item.label = label.to_string();
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar() -> MenuBar {
        let mut bar = MenuBar::new("main");
        let mut file = MenuDropdown::new("mnuFile", "File");
        file.push_item(MenuItem::new("mnuOpen", "Open...", "Cmd+O"));
        file.push_item(MenuItem::new("", SEPARATOR, ""));
        bar.push_dropdown(file);
        bar.push_dropdown(MenuDropdown::new("mnuEdit", "Edit"));
        bar
    }

    #[test]
    fn test_background_belongs_to_root() {
        let bar = MenuBar::new("main");
        assert_eq!(bar.background.id, "main##dropdownBg");
        assert!(bar.root.visible);
        assert_eq!(bar.root.state, MenuState::Collapsed);
    }

    #[test]
    fn test_expand_collapse() {
        let mut bar = bar();
        bar.expand(1).unwrap();
        assert_eq!(bar.expanded(), Some(1));
        assert!(matches!(bar.expand(2), Err(MenuError::UnknownDropdown(2))));
        assert_eq!(bar.expanded(), Some(1));
        bar.collapse();
        assert_eq!(bar.expanded(), None);
    }

    #[test]
    fn test_set_item_status() {
        let mut bar = bar();
        assert!(bar.set_item_status("mnuOpen", Some(true), Some(false), None));
        let item = bar.find_item("mnuOpen").unwrap();
        assert!(item.checked);
        assert!(!item.enabled);
        assert_eq!(item.label, "Open...");

        assert!(bar.set_item_status("mnuOpen", None, Some(true), Some("Open File...")));
        let item = bar.find_item("mnuOpen").unwrap();
        assert!(item.checked);
        assert!(item.enabled);
        assert_eq!(item.label, "Open File...");

        assert!(!bar.set_item_status("mnuMissing", Some(true), None, None));
    }

    #[test]
    fn test_separator() {
        let bar = bar();
        assert!(bar.dropdowns[0].items[1].is_separator());
        assert!(!bar.dropdowns[0].items[0].is_separator());
    }
}
