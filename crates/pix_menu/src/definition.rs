//! Building a menu bar from a compact text definition.
//!
//! ```toml
//! [[menu]]
//! header = "mnuFile|File"
//! items = ["mnuOpen|Open...|Cmd+O", "|---|", "mnuQuit|Quit|Cmd+Q"]
//!
//! [[menu]]
//! header = "mnuApp|icon:logos:3:24"
//! fixed_offset = 460
//! items = ["mnuAbout|About..."]
//! ```
//!
//! Headers are `id|label` or `id|icon:group:number:width`, items are
//! `id|label|hotkey`. Items without id get a generated one.

use std::{collections::HashSet, fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{model::SEPARATOR, MenuBar, MenuConstants, MenuDropdown, MenuError, MenuIcon, MenuItem, Result};

const ICON_PREFIX: &str = "icon:";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuDefinition {
    pub header: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_offset: Option<i32>,
    #[serde(default)]
    pub items: Vec<String>,
}

impl MenuDefinition {
    pub fn new(header: impl Into<String>, items: &[&str]) -> Self {
        Self {
            header: header.into(),
            fixed_offset: None,
            items: items.iter().map(ToString::to_string).collect(),
        }
    }

    pub fn with_fixed_offset(mut self, offset: i32) -> Self {
        self.fixed_offset = Some(offset);
        self
    }
}

/// A menu file: layout constants and the menus of one bar.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuFile {
    pub constants: MenuConstants,
    #[serde(rename = "menu")]
    pub menus: Vec<MenuDefinition>,
}

impl MenuFile {
    pub fn from_toml(text: &str) -> Result<Self> {
        let file: MenuFile = toml::from_str(text)?;
        file.constants.check()?;
        Ok(file)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    pub fn build(&self, id: &str) -> Result<MenuBar> {
        MenuBar::from_definition(id, &self.menus)
    }
}

struct Builder {
    ids: HashSet<String>,
    unnamed: usize,
}

impl Builder {
    fn claim(&mut self, id: &str) -> Result<()> {
        if !self.ids.insert(id.to_string()) {
            return Err(MenuError::InvalidDefinition(format!("duplicate menu id '{id}'")));
        }
        Ok(())
    }

    fn dropdown(&mut self, definition: &MenuDefinition) -> Result<MenuDropdown> {
        let Some((id, label)) = definition.header.split_once('|') else {
            return Err(MenuError::InvalidDefinition(format!(
                "header '{}' must look like id|label",
                definition.header
            )));
        };
        if id.is_empty() {
            return Err(MenuError::InvalidDefinition(format!("header '{}' has no id", definition.header)));
        }
        self.claim(id)?;

        let mut dropdown = if let Some(icon) = label.strip_prefix(ICON_PREFIX) {
            let (icon, width) = parse_icon(icon)
                .ok_or_else(|| MenuError::InvalidDefinition(format!("icon header '{label}' must look like icon:group:number:width")))?;
            MenuDropdown::with_icon(id, icon, width)
        } else {
            MenuDropdown::new(id, label)
        };
        dropdown.fixed_offset = definition.fixed_offset;

        for line in &definition.items {
            let item = self.item(line)?;
            dropdown.push_item(item);
        }
        Ok(dropdown)
    }

    fn item(&mut self, line: &str) -> Result<MenuItem> {
        let mut parts = line.split('|');
        let id = parts.next().unwrap_or_default();
        let (id, label) = match parts.next() {
            Some(label) => (id, label),
            None if id == SEPARATOR => ("", SEPARATOR),
            None => {
                return Err(MenuError::InvalidDefinition(format!("menu item '{line}' must look like id|label|hotkey")));
            }
        };
        let hotkey: String = parts.next().unwrap_or_default().chars().filter(|c| *c != ' ').collect();

        let id = if id.is_empty() {
            self.unnamed += 1;
            format!("unnamedmenu{}", self.unnamed)
        } else {
            id.to_string()
        };
        self.claim(&id)?;
        Ok(MenuItem::new(id, label, hotkey))
    }
}

fn parse_icon(s: &str) -> Option<(MenuIcon, i32)> {
    let mut parts = s.split(':');
    let group = parts.next()?.to_string();
    let number = parts.next()?.parse().ok()?;
    let width = parts.next()?.parse().ok()?;
    Some((MenuIcon { group, number }, width))
}

impl MenuBar {
    /// Installs a new bar with the given menus.
    pub fn from_definition(id: &str, definitions: &[MenuDefinition]) -> Result<Self> {
        let mut bar = MenuBar::new(id);
        let mut builder = Builder {
            ids: HashSet::from([bar.root.id.clone(), bar.background.id.clone()]),
            unnamed: 0,
        };
        for definition in definitions {
            let dropdown = builder.dropdown(definition)?;
            bar.push_dropdown(dropdown);
        }
        Ok(bar)
    }
}
